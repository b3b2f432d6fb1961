//! Runtime settings of the demo.
//!
//! Defaults reproduce the classic scene. The binary overrides them from the
//! command line, flows can change the live values through `Out::Configure`.

use std::path::PathBuf;

pub const WINDOW_TITLE: &str = "Textured Ferris Wheel";
pub const WINDOW_SIZE: (u32, u32) = (1000, 1000);
pub const TICK_MILLIS: u64 = 50;
pub const CLEAR_COLOUR: wgpu::Color = wgpu::Color {
    r: 0.94,
    g: 0.94,
    b: 1.0,
    a: 1.0,
};

/// Vertical field of view in degrees.
pub const FIELD_OF_VIEW: f32 = 35.0;
pub const Z_NEAR: f32 = 0.1;
pub const Z_FAR: f32 = 100.0;

#[derive(Clone, Debug, PartialEq)]
pub struct Config {
    pub asset_dir: PathBuf,
    pub title: String,
    pub window_size: (u32, u32),
    pub fullscreen: bool,
    pub tick_duration_millis: u64,
    pub clear_colour: wgpu::Color,
    pub reflecting: bool,
    pub texture_set: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            asset_dir: PathBuf::from("./assets"),
            title: WINDOW_TITLE.to_string(),
            window_size: WINDOW_SIZE,
            fullscreen: false,
            tick_duration_millis: TICK_MILLIS,
            clear_colour: CLEAR_COLOUR,
            reflecting: false,
            texture_set: 0,
        }
    }
}
