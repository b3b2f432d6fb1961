use std::{collections::HashMap, path::Path};

use crate::{
    data_structures::{
        material::{Material, TextureSlot},
        texture::{self, Wrap},
    },
    resources::load_binary,
};

/// Number of selectable texture sets (cycled with `T`).
pub const TEXTURE_SETS: usize = 2;

pub const GROUND_TEXTURE: &str = "grass.bmp";
pub const CAP_TEXTURES: [&str; TEXTURE_SETS] = ["MickeyMouse.bmp", "BugsBunny.bmp"];
pub const WHEEL_TEXTURES: [&str; 3] = ["BlueMetal.bmp", "Brass.bmp", "Brass.bmp"];
pub const WALL_TEXTURES: [[&str; 4]; TEXTURE_SETS] = [
    ["Mickey.bmp", "Donald.bmp", "Goofy.bmp", "Pluto.bmp"],
    ["Bugs.bmp", "Porky.bmp", "Marvin.bmp", "Tweety.bmp"],
];
pub const CAR_TEXTURES: [&str; 4] = [
    "BlueMetal.bmp",
    "StainedGlass.bmp",
    "BlueMetal.bmp",
    "CutStone.bmp",
];

/// Image file bound to `slot` while texture set `set` is active. Indices wrap
/// around their table.
pub fn texture_file(slot: TextureSlot, set: usize) -> &'static str {
    let set = set % TEXTURE_SETS;
    match slot {
        TextureSlot::Ground => GROUND_TEXTURE,
        TextureSlot::Cap => CAP_TEXTURES[set],
        TextureSlot::Wheel(i) => WHEEL_TEXTURES[i % WHEEL_TEXTURES.len()],
        TextureSlot::Wall(i) => WALL_TEXTURES[set][i % 4],
        TextureSlot::Car(i) => CAR_TEXTURES[i % CAR_TEXTURES.len()],
    }
}

/// Only the ground repeats its texture across the quad.
pub fn wrap_for(slot: TextureSlot) -> Wrap {
    match slot {
        TextureSlot::Ground => Wrap::Repeat,
        _ => Wrap::ClampToEdge,
    }
}

/// Every distinct (file, wrap) pair the scene can reference, in table order.
pub fn texture_files() -> Vec<(&'static str, Wrap)> {
    let mut slots = vec![TextureSlot::Ground, TextureSlot::Cap];
    slots.extend((0..WHEEL_TEXTURES.len()).map(TextureSlot::Wheel));
    slots.extend((0..4).map(TextureSlot::Wall));
    slots.extend((0..CAR_TEXTURES.len()).map(TextureSlot::Car));

    let mut files: Vec<(&'static str, Wrap)> = Vec::new();
    for set in 0..TEXTURE_SETS {
        for slot in &slots {
            let entry = (texture_file(*slot, set), wrap_for(*slot));
            if !files.contains(&entry) {
                files.push(entry);
            }
        }
    }
    files
}

pub fn texture_layout(device: &wgpu::Device) -> wgpu::BindGroupLayout {
    device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
        entries: &[
            wgpu::BindGroupLayoutEntry {
                binding: 0,
                visibility: wgpu::ShaderStages::FRAGMENT,
                ty: wgpu::BindingType::Texture {
                    multisampled: false,
                    view_dimension: wgpu::TextureViewDimension::D2,
                    sample_type: wgpu::TextureSampleType::Float { filterable: true },
                },
                count: None,
            },
            wgpu::BindGroupLayoutEntry {
                binding: 1,
                visibility: wgpu::ShaderStages::FRAGMENT,
                ty: wgpu::BindingType::Sampler(wgpu::SamplerBindingType::Filtering),
                count: None,
            },
        ],
        label: Some("texture_bind_group_layout"),
    })
}

fn texture_bind_group(
    device: &wgpu::Device,
    layout: &wgpu::BindGroupLayout,
    texture: &texture::Texture,
    wrap: Wrap,
    label: &str,
) -> wgpu::BindGroup {
    let sampler = match &texture.sampler {
        Some(sampler) => sampler.clone(),
        None => texture::create_sampler(device, wrap),
    };
    device.create_bind_group(&wgpu::BindGroupDescriptor {
        layout,
        entries: &[
            wgpu::BindGroupEntry {
                binding: 0,
                resource: wgpu::BindingResource::TextureView(&texture.view),
            },
            wgpu::BindGroupEntry {
                binding: 1,
                resource: wgpu::BindingResource::Sampler(&sampler),
            },
        ],
        label: Some(label),
    })
}

pub async fn load_texture(
    asset_dir: &Path,
    file_name: &str,
    wrap: Wrap,
    device: &wgpu::Device,
    queue: &wgpu::Queue,
) -> anyhow::Result<texture::Texture> {
    let data = load_binary(asset_dir, file_name).await?;
    let img = image::load_from_memory_with_format(&data, image::ImageFormat::Bmp)?;
    texture::Texture::from_image(device, queue, &img, Some(file_name), wrap)
}

/// Bind groups for every texture of the scene.
///
/// Files that fail to load are reported once and replaced by a checkerboard,
/// so a missing image never shows whatever texture was bound before it.
pub struct TextureBank {
    groups: HashMap<&'static str, wgpu::BindGroup>,
    placeholder: wgpu::BindGroup,
    /// Bound for materials without a texture.
    white: wgpu::BindGroup,
}

impl TextureBank {
    pub async fn load(
        asset_dir: &Path,
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        layout: &wgpu::BindGroupLayout,
    ) -> anyhow::Result<Self> {
        let checker = texture::Texture::create_placeholder(device, queue, Wrap::Repeat)?;
        let placeholder = texture_bind_group(device, layout, &checker, Wrap::Repeat, "placeholder");
        let white_img = image::DynamicImage::ImageRgba8(image::RgbaImage::from_pixel(
            1,
            1,
            image::Rgba([255, 255, 255, 255]),
        ));
        let white_tex =
            texture::Texture::from_image(device, queue, &white_img, Some("white"), Wrap::ClampToEdge)?;
        let white = texture_bind_group(device, layout, &white_tex, Wrap::ClampToEdge, "white");

        let mut groups = HashMap::new();
        for (file, wrap) in texture_files() {
            match load_texture(asset_dir, file, wrap, device, queue).await {
                Ok(tex) => {
                    groups.insert(file, texture_bind_group(device, layout, &tex, wrap, file));
                }
                Err(e) => log::warn!("texture {} not loaded, using a placeholder: {}", file, e),
            }
        }
        log::info!("{} of {} textures loaded", groups.len(), texture_files().len());

        Ok(Self {
            groups,
            placeholder,
            white,
        })
    }

    /// The bind group a draw with `material` uses under texture set `set`.
    pub fn bind_group(&self, material: &Material, set: usize) -> &wgpu::BindGroup {
        match material.texture() {
            None => &self.white,
            Some(slot) => self
                .groups
                .get(texture_file(slot, set))
                .unwrap_or(&self.placeholder),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn caps_and_walls_follow_the_texture_set() {
        assert_eq!(texture_file(TextureSlot::Cap, 0), "MickeyMouse.bmp");
        assert_eq!(texture_file(TextureSlot::Cap, 1), "BugsBunny.bmp");
        assert_eq!(texture_file(TextureSlot::Wall(2), 0), "Goofy.bmp");
        assert_eq!(texture_file(TextureSlot::Wall(3), 1), "Tweety.bmp");
        assert_eq!(texture_file(TextureSlot::Wall(5), 1), "Porky.bmp");
        assert_eq!(texture_file(TextureSlot::Car(3), 0), texture_file(TextureSlot::Car(3), 1));
    }

    #[test]
    fn only_the_ground_repeats() {
        assert_eq!(wrap_for(TextureSlot::Ground), Wrap::Repeat);
        assert_eq!(wrap_for(TextureSlot::Car(1)), Wrap::ClampToEdge);
        assert_eq!(wrap_for(TextureSlot::Cap), Wrap::ClampToEdge);
    }

    #[test]
    fn file_list_has_no_duplicates() {
        let files = texture_files();
        // grass, 2 caps, BlueMetal, Brass, 8 walls, StainedGlass, CutStone
        assert_eq!(files.len(), 15);
        assert_eq!(files[0], ("grass.bmp", Wrap::Repeat));
    }
}
