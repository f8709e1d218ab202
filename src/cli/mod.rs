//! Command-line interface definitions.

pub mod serve;

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// Switchboard - signaling backend for Twilio Programmable Voice
#[derive(Debug, Parser)]
#[command(name = "switchboard", version, about)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Run the signaling server
    Serve(ServeArgs),
}

#[derive(Debug, Args)]
pub struct ServeArgs {
    /// Path to the configuration file
    #[arg(short, long, default_value = "switchboard.toml")]
    pub config: PathBuf,

    /// Port to listen on (overrides config)
    #[arg(short, long)]
    pub port: Option<u16>,

    /// Host to bind (overrides config)
    #[arg(long)]
    pub host: Option<String>,

    /// Log level (overrides config)
    #[arg(long)]
    pub log_level: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_serve_args_parse() {
        let cli = Cli::parse_from(["switchboard", "serve", "--port", "8080"]);
        let Commands::Serve(args) = cli.command;
        assert_eq!(args.port, Some(8080));
        assert_eq!(args.config, PathBuf::from("switchboard.toml"));
    }

    #[test]
    fn test_serve_args_defaults() {
        let cli = Cli::parse_from(["switchboard", "serve"]);
        let Commands::Serve(args) = cli.command;
        assert!(args.port.is_none());
        assert!(args.host.is_none());
        assert!(args.log_level.is_none());
    }
}
