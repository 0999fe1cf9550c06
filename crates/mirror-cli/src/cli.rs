//! CLI argument parsing using clap derive

use std::path::PathBuf;

use clap::Parser;
use mirror_core::settings::SettingsLayer;

/// Periodically mirror a source directory onto a replica directory
#[derive(Parser, Debug)]
#[command(name = "dirmirror")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Source folder path
    pub source: Option<PathBuf>,

    /// Replica folder path
    pub replica: Option<PathBuf>,

    /// Synchronization interval in seconds [default: 30]
    #[arg(short, long, value_parser = clap::value_parser!(u64).range(1..))]
    pub interval: Option<u64>,

    /// Path to log file for info messages [default: info.log]
    #[arg(long, alias = "info_log")]
    pub info_log: Option<PathBuf>,

    /// Path to log file for error messages [default: error.log]
    #[arg(long, alias = "error_log")]
    pub error_log: Option<PathBuf>,

    /// Load settings from a TOML, JSON or YAML file; flags override it
    #[arg(short, long, env = "DIRMIRROR_CONFIG")]
    pub config: Option<PathBuf>,

    /// Run a single cycle and exit
    #[arg(long)]
    pub once: bool,

    /// With --once, print the cycle report as JSON
    #[arg(long, requires = "once")]
    pub json: bool,

    /// Enable verbose console output
    #[arg(short, long)]
    pub verbose: bool,
}

impl Cli {
    /// The settings given on the command line, as the top layer.
    pub fn settings_layer(&self) -> SettingsLayer {
        SettingsLayer {
            source: self.source.clone(),
            replica: self.replica.clone(),
            interval: self.interval,
            info_log: self.info_log.clone(),
            error_log: self.error_log.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn verify_cli() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parses_positionals_and_flags() {
        let cli = Cli::try_parse_from([
            "dirmirror",
            "src",
            "dst",
            "--interval",
            "5",
            "--info-log",
            "i.log",
        ])
        .unwrap();

        let layer = cli.settings_layer();
        assert_eq!(layer.source, Some(PathBuf::from("src")));
        assert_eq!(layer.replica, Some(PathBuf::from("dst")));
        assert_eq!(layer.interval, Some(5));
        assert_eq!(layer.info_log, Some(PathBuf::from("i.log")));
        assert_eq!(layer.error_log, None);
    }

    #[test]
    fn zero_interval_is_refused() {
        assert!(Cli::try_parse_from(["dirmirror", "a", "b", "--interval", "0"]).is_err());
    }

    #[test]
    fn json_requires_once() {
        assert!(Cli::try_parse_from(["dirmirror", "a", "b", "--json"]).is_err());
        assert!(Cli::try_parse_from(["dirmirror", "a", "b", "--once", "--json"]).is_ok());
    }
}
