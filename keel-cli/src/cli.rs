//! CLI argument parsing definitions

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// YAML file of NAME: value inputs; the environment overrides it
    #[arg(long, value_name = "PATH", global = true)]
    pub env_file: Option<PathBuf>,

    /// Only read variables named PREFIX_NAME
    #[arg(long, value_name = "PREFIX", global = true)]
    pub prefix: Option<String>,

    /// Set the log level (trace, debug, info, warn, error)
    #[arg(long, value_name = "LEVEL", global = true)]
    pub log_level: Option<String>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Assemble the configuration and print it
    Resolve {
        /// Output format
        #[arg(long, value_enum, default_value_t = OutputFormat::Yaml)]
        format: OutputFormat,

        /// Print the host platform's startup document instead of the bindings
        #[arg(long)]
        host: bool,
    },

    /// Validate the configuration and report partial or insecure settings
    Check {
        /// Fail when any finding is reported
        #[arg(long)]
        strict: bool,
    },

    /// List capability slots and their providers in priority order
    Providers,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Yaml,
    Json,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_defaults() {
        let cli = Cli::try_parse_from(["keel", "resolve"]).unwrap();
        match cli.command {
            Some(Commands::Resolve { format, host }) => {
                assert_eq!(format, OutputFormat::Yaml);
                assert!(!host);
            }
            _ => panic!("expected resolve"),
        }
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let cli = Cli::try_parse_from([
            "keel",
            "resolve",
            "--format",
            "json",
            "--host",
            "--env-file",
            "deploy.yaml",
            "--prefix",
            "SHOP",
        ])
        .unwrap();
        assert_eq!(cli.env_file, Some(PathBuf::from("deploy.yaml")));
        assert_eq!(cli.prefix.as_deref(), Some("SHOP"));
        assert!(matches!(
            cli.command,
            Some(Commands::Resolve {
                format: OutputFormat::Json,
                host: true
            })
        ));
    }

    #[test]
    fn test_unknown_format_rejected() {
        assert!(Cli::try_parse_from(["keel", "resolve", "--format", "toml"]).is_err());
    }

    #[test]
    fn test_check_strict() {
        let cli = Cli::try_parse_from(["keel", "check", "--strict"]).unwrap();
        assert!(matches!(cli.command, Some(Commands::Check { strict: true })));
    }
}
