// cli.rs - Command-line interface configuration
use clap::{Parser, ValueEnum};
use std::path::PathBuf;

/// Which rig drives the active scene camera
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CameraMode {
    /// Orbit around the scene target; drag to orbit, scroll to zoom
    #[default]
    Arcball,
    /// Free-fly; WASD to move, drag to look
    Free,
}

#[derive(Parser, Debug, Clone)]
#[command(name = "scene-viewer")]
#[command(about = "Arcball scene viewer", long_about = None)]
pub struct Cli {
    /// Path to the JSON scene manifest
    #[arg(long, default_value = "manifest.json")]
    pub manifest: PathBuf,

    /// Initial window width in pixels
    #[arg(long, default_value_t = 512)]
    pub width: u32,

    /// Initial window height in pixels
    #[arg(long, default_value_t = 512)]
    pub height: u32,

    /// Camera rig driving the scene
    #[arg(long, value_enum, default_value = "arcball")]
    pub camera: CameraMode,
}
