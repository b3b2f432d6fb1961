use std::path::Path;

/**
 * This module contains all logic for loading textures and coaster data from
 * the asset directory.
 */
pub mod texture;
pub mod track_data;

pub async fn load_string(asset_dir: &Path, file_name: &str) -> anyhow::Result<String> {
    let path = asset_dir.join(file_name);
    let txt = tokio::fs::read_to_string(&path).await?;
    Ok(txt)
}

pub async fn load_binary(asset_dir: &Path, file_name: &str) -> anyhow::Result<Vec<u8>> {
    let path = asset_dir.join(file_name);
    let data = tokio::fs::read(&path).await?;
    Ok(data)
}
