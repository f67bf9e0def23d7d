//! Server configuration loaded from environment variables.

use log::{info, warn};
use std::env;
use std::fmt::Display;
use std::path::PathBuf;
use std::str::FromStr;

const DEFAULT_PORT: &str = "8080";
const DEFAULT_BIND_ADDR: &str = "0.0.0.0";
const DEFAULT_DB_PATH: &str = "emp_management.sqlite3";
const DEFAULT_LOG_DIR_NAME: &str = "logs";
const DEFAULT_PAGE_SIZE: &str = "10";
const DEFAULT_MAX_UPLOAD_BYTES: &str = "5242880";

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid value `{value}` for {key}: {message}")]
    Invalid {
        key: &'static str,
        value: String,
        message: String,
    },

    #[error("cannot resolve working directory: {0}")]
    WorkingDir(#[from] std::io::Error),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub bind_addr: String,
    pub port: u16,
    pub db_path: PathBuf,
    pub log_level: String,
    /// Absolute directory for rolling log files.
    pub log_dir: PathBuf,
    /// Employees per list page.
    pub page_size: u32,
    pub max_upload_bytes: usize,
}

impl Config {
    /// Reads configuration from the process environment.
    pub fn load() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds configuration from an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let log_dir = match lookup("EMP_LOG_DIR") {
            Some(dir) => PathBuf::from(dir),
            None => env::current_dir()?.join(DEFAULT_LOG_DIR_NAME),
        };
        if !log_dir.is_absolute() {
            return Err(ConfigError::Invalid {
                key: "EMP_LOG_DIR",
                value: log_dir.display().to_string(),
                message: "must be an absolute path".to_string(),
            });
        }

        let page_size: u32 = parse_or_default(&lookup, "EMP_PAGE_SIZE", DEFAULT_PAGE_SIZE)?;
        if page_size == 0 {
            return Err(ConfigError::Invalid {
                key: "EMP_PAGE_SIZE",
                value: page_size.to_string(),
                message: "must be at least 1".to_string(),
            });
        }

        Ok(Self {
            bind_addr: string_or_default(&lookup, "EMP_BIND_ADDR", DEFAULT_BIND_ADDR),
            port: parse_or_default(&lookup, "EMP_PORT", DEFAULT_PORT)?,
            db_path: PathBuf::from(string_or_default(&lookup, "EMP_DB_PATH", DEFAULT_DB_PATH)),
            log_level: string_or_default(&lookup, "EMP_LOG_LEVEL", emp_core::default_log_level()),
            log_dir,
            page_size,
            max_upload_bytes: parse_or_default(
                &lookup,
                "EMP_MAX_UPLOAD_BYTES",
                DEFAULT_MAX_UPLOAD_BYTES,
            )?,
        })
    }

    pub fn address(&self) -> String {
        format!("{}:{}", self.bind_addr, self.port)
    }
}

fn string_or_default<F>(lookup: &F, key: &str, default: &str) -> String
where
    F: Fn(&str) -> Option<String>,
{
    lookup(key).unwrap_or_else(|| {
        info!("{key} not set, using default: {default}");
        default.to_string()
    })
}

fn parse_or_default<T, F>(lookup: &F, key: &'static str, default: &str) -> Result<T, ConfigError>
where
    T: FromStr,
    T::Err: Display,
    F: Fn(&str) -> Option<String>,
{
    let raw = string_or_default(lookup, key, default);
    raw.trim().parse::<T>().map_err(|err| {
        warn!("Invalid {key} value: {err}");
        ConfigError::Invalid {
            key,
            value: raw.clone(),
            message: err.to_string(),
        }
    })
}
