//! Textured Ferris Wheel
//!
//! # Usage
//!
//! ```bash
//! firewheel
//! firewheel --asset-dir path/to/assets --reflect
//! firewheel --texture-set 1 --tick-ms 25 --fullscreen
//! ```
//!
//! # Keyboard Shortcuts
//!
//! - R: Toggle the reflection
//! - T: Next texture set
//! - Up/Down: Move forward/backward
//! - Left/Right: Turn
//! - F1: Toggle fullscreen
//! - ESC: Quit

use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;

use firewheel::{config::Config, flow, park::Firewheel};

#[derive(Parser)]
#[command(name = "firewheel")]
#[command(author, version, about = "Ferris wheel, carousel and roller coaster track")]
struct Args {
    /// Directory holding the BMP textures and the coaster data files
    #[arg(long, default_value = "./assets")]
    asset_dir: PathBuf,

    /// Start with the reflection drawn under the ground
    #[arg(long, short = 'r')]
    reflect: bool,

    /// Texture set to start with (0 or 1)
    #[arg(long, short = 't', default_value = "0")]
    texture_set: usize,

    /// Milliseconds per animation tick
    #[arg(long, default_value = "50")]
    tick_ms: u64,

    /// Start in fullscreen mode (borderless window)
    #[arg(long, short = 'f')]
    fullscreen: bool,
}

impl From<Args> for Config {
    fn from(args: Args) -> Self {
        Self {
            asset_dir: args.asset_dir,
            reflecting: args.reflect,
            texture_set: args.texture_set,
            tick_duration_millis: args.tick_ms.max(1),
            fullscreen: args.fullscreen,
            ..Config::default()
        }
    }
}

fn main() -> Result<()> {
    let config = Config::from(Args::parse());
    flow::run(config.clone(), vec![Firewheel::constructor(config)])
}
