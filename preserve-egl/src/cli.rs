use clap::Parser;
use std::path::PathBuf;
use tracing::Level;

/// Renders a bouncing triangle on an EGL surface with preserved swap behavior,
/// clearing the background every few frames.
#[derive(Parser, Debug, Default)]
#[command(version, about)]
pub struct Cli {
    /// Config file to read instead of $XDG_CONFIG_HOME/preserve-egl/config.toml
    #[arg(short, long, value_name = "FILE_PATH")]
    pub config: Option<PathBuf>,

    /// Log level to be used for printing to stderr
    #[arg(long, value_name = "LEVEL")]
    pub log_level: Option<Level>,

    /// Number of frames drawn between two background clears
    #[arg(long, value_name = "FRAMES", value_parser = clap::value_parser!(u32).range(1..))]
    pub clear_interval: Option<u32>,

    /// Delay between two frames, in milliseconds
    #[arg(long, value_name = "MS")]
    pub frame_delay: Option<u64>,

    /// Initial window width
    #[arg(long, value_name = "PX", value_parser = clap::value_parser!(i32).range(1..))]
    pub width: Option<i32>,

    /// Initial window height
    #[arg(long, value_name = "PX", value_parser = clap::value_parser!(i32).range(1..))]
    pub height: Option<i32>,
}
