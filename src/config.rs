//! Server configuration
//!
//! Every option can be given as a command-line flag or an environment
//! variable; flags win.

use std::net::SocketAddr;
use std::path::PathBuf;

use chrono_tz::Tz;
use clap::{Parser, ValueEnum};

/// Log output format
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum LogFormat {
    /// Multi-line human readable output
    Pretty,
    /// Single-line human readable output
    #[default]
    Compact,
    /// One JSON object per line
    Json,
}

#[derive(Debug, Clone, Parser)]
#[command(name = "schedule-server")]
#[command(about = "Calendar event scheduling server", version)]
pub struct Config {
    /// JSON file holding all events (created if missing)
    #[arg(long, env = "SCHEDULE_DATA_FILE", default_value = "data/events.json")]
    pub data_file: PathBuf,

    /// Address to listen on
    #[arg(long, env = "SCHEDULE_ADDR", default_value = "0.0.0.0:8080")]
    pub addr: SocketAddr,

    /// Directory with the front-end bundle
    #[arg(long, env = "SCHEDULE_STATIC_DIR", default_value = "static")]
    pub static_dir: PathBuf,

    /// IANA time zone used to group events by calendar day
    #[arg(long, env = "SCHEDULE_TIMEZONE", default_value = "UTC", value_parser = parse_timezone)]
    pub timezone: Tz,

    /// Log filter directive, e.g. `info` or `event_scheduler=debug`
    #[arg(long, env = "RUST_LOG", default_value = "info")]
    pub log_level: String,

    #[arg(long, env = "SCHEDULE_LOG_FORMAT", value_enum, default_value_t = LogFormat::Compact)]
    pub log_format: LogFormat,
}

impl Config {
    /// Data file path, resolved against the working directory when relative
    pub fn resolved_data_file(&self) -> PathBuf {
        if self.data_file.is_absolute() {
            return self.data_file.clone();
        }

        std::env::current_dir()
            .map(|dir| dir.join(&self.data_file))
            .unwrap_or_else(|_| self.data_file.clone())
    }
}

fn parse_timezone(name: &str) -> Result<Tz, String> {
    name.parse::<Tz>()
        .map_err(|_| format!("unknown time zone '{}'", name))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::try_parse_from(["schedule-server"]).unwrap();
        assert_eq!(config.addr.port(), 8080);
        assert_eq!(config.static_dir, PathBuf::from("static"));
        assert!(config.resolved_data_file().ends_with("data/events.json"));
        assert!(config.resolved_data_file().is_absolute());
    }

    #[test]
    fn test_flags() {
        let config = Config::try_parse_from([
            "schedule-server",
            "--data-file",
            "/tmp/cal.json",
            "--timezone",
            "Europe/Moscow",
            "--log-format",
            "json",
        ])
        .unwrap();

        assert_eq!(config.resolved_data_file(), PathBuf::from("/tmp/cal.json"));
        assert_eq!(config.timezone, Tz::Europe__Moscow);
        assert_eq!(config.log_format, LogFormat::Json);
    }

    #[test]
    fn test_rejects_unknown_timezone() {
        let result = Config::try_parse_from(["schedule-server", "--timezone", "Mars/Olympus"]);
        assert!(result.is_err());
    }
}
