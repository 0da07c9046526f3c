// Command-line interface for the gateway binary

use clap::Parser;

/// trilingo - trilingual community site gateway for the Gemini API
#[derive(Parser, Debug)]
#[command(name = "trilingo", version, about, long_about = None)]
pub struct Args {
    /// Path to a TOML config file (default: ~/.trilingo/config.toml)
    #[arg(long, env = "TRILINGO_CONFIG")]
    pub config: Option<String>,

    /// Verify upstream connectivity and exit without serving
    #[arg(long)]
    pub check: bool,
}
