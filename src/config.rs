use std::env;
use std::net::{IpAddr, SocketAddr};
use std::str::FromStr;
use std::time::Duration;

use chrono::FixedOffset;

use crate::error::{AppError, Result};

pub const DEFAULT_QUIZ_URL: &str = "https://urdohi.com/my-telenor-test-your-skills/";

/// Asia/Karachi, which observes no daylight saving.
const DEFAULT_UTC_OFFSET_MINUTES: i32 = 5 * 60;

#[derive(Clone, Debug)]
pub struct Config {
    pub server_addr: SocketAddr,
    pub quiz_url: String,
    pub fetch_timeout: Duration,
    /// `None` disables the background refresher.
    pub refresh_interval: Option<Duration>,
    /// Zone used when showing refresh times to people.
    pub utc_offset: FixedOffset,
}

impl Config {
    pub fn load() -> Result<Self> {
        // Load environment variables from .env file if it exists
        dotenv::dotenv().ok();

        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds the configuration from an arbitrary key lookup, applying defaults
    /// for missing keys.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let host = lookup("HOST").unwrap_or_else(|| "0.0.0.0".to_string());
        let ip = IpAddr::from_str(&host)
            .map_err(|e| AppError::ConfigError(format!("Invalid host address: {}", e)))?;
        let port: u16 = parse_var(&lookup, "PORT", 5000)?;

        let quiz_url = lookup("QUIZ_URL").unwrap_or_else(|| DEFAULT_QUIZ_URL.to_string());
        if quiz_url.trim().is_empty() {
            return Err(AppError::ConfigError("QUIZ_URL must not be empty".to_string()));
        }

        let fetch_timeout_secs: u64 = parse_var(&lookup, "FETCH_TIMEOUT_SECS", 10)?;
        if fetch_timeout_secs == 0 {
            return Err(AppError::ConfigError(
                "FETCH_TIMEOUT_SECS must be greater than zero".to_string(),
            ));
        }

        let refresh_interval_secs: u64 = parse_var(&lookup, "REFRESH_INTERVAL_SECS", 3600)?;
        let refresh_interval =
            (refresh_interval_secs > 0).then(|| Duration::from_secs(refresh_interval_secs));

        let offset_minutes: i32 =
            parse_var(&lookup, "UTC_OFFSET_MINUTES", DEFAULT_UTC_OFFSET_MINUTES)?;
        let utc_offset = offset_minutes
            .checked_mul(60)
            .and_then(FixedOffset::east_opt)
            .ok_or_else(|| {
                AppError::ConfigError(format!(
                    "Invalid UTC_OFFSET_MINUTES: {} is out of range",
                    offset_minutes
                ))
            })?;

        Ok(Config {
            server_addr: SocketAddr::new(ip, port),
            quiz_url,
            fetch_timeout: Duration::from_secs(fetch_timeout_secs),
            refresh_interval,
            utc_offset,
        })
    }
}

fn parse_var<F, T>(lookup: &F, key: &str, default: T) -> Result<T>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match lookup(key) {
        Some(raw) => raw
            .trim()
            .parse::<T>()
            .map_err(|e| AppError::ConfigError(format!("Invalid {}: {}", key, e))),
        None => Ok(default),
    }
}
