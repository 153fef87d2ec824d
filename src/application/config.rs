//! Command-line configuration.

use crate::infrastructure::DEFAULT_HABITS_FILE;
use clap::Parser;
use std::path::PathBuf;

/// Monthly habit tracker for the terminal.
#[derive(Debug, Parser)]
#[command(name = "habitrack", version, about)]
pub struct Cli {
    /// Habit document to load on start and save after every change
    #[arg(short, long, value_name = "PATH", default_value = DEFAULT_HABITS_FILE)]
    pub file: PathBuf,

    /// Directory for rotating log files [default: <local data dir>/habitrack/logs]
    #[arg(long, value_name = "DIR")]
    pub log_dir: Option<PathBuf>,

    /// Log verbosity: trace, debug, info, warn or error
    #[arg(long, value_name = "LEVEL", default_value = "info")]
    pub log_level: String,
}

/// Resolved runtime settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub habits_file: PathBuf,
    /// `None` when no log directory was given and no platform default exists.
    pub log_dir: Option<PathBuf>,
    pub log_level: String,
}

impl Config {
    pub fn from_cli(cli: Cli) -> Self {
        Self {
            habits_file: cli.file,
            log_dir: cli.log_dir.or_else(default_log_dir),
            log_level: cli.log_level,
        }
    }
}

fn default_log_dir() -> Option<PathBuf> {
    dirs::data_local_dir().map(|dir| dir.join("habitrack").join("logs"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let cli = Cli::try_parse_from(["habitrack"]).unwrap();
        assert_eq!(cli.file, PathBuf::from("habits.json"));
        assert_eq!(cli.log_level, "info");
        assert!(cli.log_dir.is_none());

        let config = Config::from_cli(cli);
        assert_eq!(config.habits_file, PathBuf::from("habits.json"));
        assert_eq!(config.log_dir, default_log_dir());
    }

    #[test]
    fn test_explicit_flags() {
        let cli = Cli::try_parse_from([
            "habitrack",
            "--file",
            "/tmp/my-habits.json",
            "--log-dir",
            "/tmp/logs",
            "--log-level",
            "debug",
        ])
        .unwrap();

        let config = Config::from_cli(cli);
        assert_eq!(config.habits_file, PathBuf::from("/tmp/my-habits.json"));
        assert_eq!(config.log_dir, Some(PathBuf::from("/tmp/logs")));
        assert_eq!(config.log_level, "debug");
    }

    #[test]
    fn test_short_file_flag() {
        let cli = Cli::try_parse_from(["habitrack", "-f", "other.json"]).unwrap();
        assert_eq!(cli.file, PathBuf::from("other.json"));
    }

    #[test]
    fn test_unknown_flag_rejected() {
        assert!(Cli::try_parse_from(["habitrack", "--verbose"]).is_err());
    }
}
