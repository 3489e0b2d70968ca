// cli.rs - Command-line interface configuration
use clap::Parser;

#[derive(Parser, Debug, Clone)]
#[command(name = "plane-sketch")]
#[command(about = "Interactive wgpu shader plane demo", long_about = None)]
pub struct Cli {
    /// Initial window width in logical pixels
    #[arg(long, default_value_t = 800)]
    pub width: u32,

    /// Initial window height in logical pixels
    #[arg(long, default_value_t = 600)]
    pub height: u32,

    /// Disable the debug panel overlay
    #[arg(long = "no-ui", default_value = "false")]
    pub no_ui: bool,
}
