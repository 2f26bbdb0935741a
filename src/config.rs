use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::path::PathBuf;

use chrono::NaiveDate;

use crate::db::default_database_path;

pub const DEFAULT_PORT: u16 = 5005;

#[derive(Debug, Clone)]
pub struct Config {
    pub host: IpAddr,
    pub port: u16,
    pub log_level: String,
    /// Directory for rolling log files; `None` logs to stdout only.
    pub log_dir: Option<PathBuf>,
    pub database_path: PathBuf,
    /// Day the one-word-per-day dashboard pace counts from.
    pub pace_start_date: NaiveDate,
    pub seed_default_milestones: bool,
}

impl Config {
    pub fn from_env() -> Self {
        let port = std::env::var("PORT")
            .ok()
            .and_then(|value| value.parse::<u16>().ok())
            .unwrap_or(DEFAULT_PORT);

        let host = std::env::var("HOST")
            .ok()
            .and_then(|value| value.parse::<IpAddr>().ok())
            .unwrap_or(IpAddr::V4(Ipv4Addr::new(0, 0, 0, 0)));

        let log_level = std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string());

        let log_dir = env_bool("ENABLE_FILE_LOGS")
            .unwrap_or(false)
            .then(|| std::env::var("LOG_DIR").unwrap_or_else(|_| "./logs".to_string()))
            .map(PathBuf::from);

        let database_path = std::env::var("DATABASE_PATH")
            .ok()
            .filter(|value| !value.trim().is_empty())
            .map(PathBuf::from)
            .unwrap_or_else(default_database_path);

        let pace_start_date = std::env::var("PACE_START_DATE")
            .ok()
            .and_then(|value| NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d").ok())
            .unwrap_or_else(default_pace_start);

        let seed_default_milestones = env_bool("SEED_DEFAULT_MILESTONES").unwrap_or(true);

        Self {
            host,
            port,
            log_level,
            log_dir,
            database_path,
            pace_start_date,
            seed_default_milestones,
        }
    }

    /// Defaults with an explicit database file; used by tests and embedders.
    pub fn with_database(database_path: impl Into<PathBuf>) -> Self {
        Self {
            host: IpAddr::V4(Ipv4Addr::LOCALHOST),
            port: DEFAULT_PORT,
            log_level: "info".to_string(),
            log_dir: None,
            database_path: database_path.into(),
            pace_start_date: default_pace_start(),
            seed_default_milestones: true,
        }
    }

    pub fn bind_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}

fn default_pace_start() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 1, 1).unwrap_or_default()
}

fn env_bool(key: &str) -> Option<bool> {
    let value = std::env::var(key).ok()?;
    let normalized = value.trim().to_ascii_lowercase();
    if normalized.is_empty() {
        return None;
    }
    match normalized.as_str() {
        "1" | "true" | "yes" | "y" | "on" => Some(true),
        "0" | "false" | "no" | "n" | "off" => Some(false),
        _ => None,
    }
}
