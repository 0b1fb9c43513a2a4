//! CLI module for colorapp
//!
//! # Commands
//!
//! - `gateway` - Run the gateway in front of the color teller
//! - `teller` - Run a color teller
//!
//! # Example
//!
//! ```bash
//! # Gateway on port 8080, talking to a teller on 9000
//! COLOR_TELLER_ENDPOINT=localhost:9000 colorapp gateway
//!
//! # A blue teller
//! COLOR=blue colorapp teller --port 9000
//! ```

pub mod serve;

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// colorapp - color gateway and color teller demo services
#[derive(Parser, Debug)]
#[command(
    name = "colorapp",
    version,
    about = "Color gateway and color teller demo services"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Start the gateway (requires COLOR_TELLER_ENDPOINT)
    Gateway(ServeArgs),
    /// Start a color teller
    Teller(ServeArgs),
}

#[derive(Args, Debug, Clone, Default)]
pub struct ServeArgs {
    /// Path to an optional TOML configuration file
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Override server port
    #[arg(short, long)]
    pub port: Option<u16>,

    /// Override server host
    #[arg(short = 'H', long)]
    pub host: Option<String>,

    /// Set log level (trace, debug, info, warn, error)
    #[arg(short, long)]
    pub log_level: Option<String>,
}
