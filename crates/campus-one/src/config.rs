//! Runtime configuration with environment overrides.

use crate::relay::entity::DEFAULT_LOG_CAP;
use std::path::PathBuf;
use std::time::Duration;
use tracing::warn;

/// Tunables for one running instance. Defaults match the shipped
/// behavior; every field can be overridden through a `CAMPUS_ONE_*`
/// environment variable.
#[derive(Debug, Clone)]
pub struct Config {
    /// Directory the blob store lives in.
    pub data_dir: PathBuf,
    /// How often the background sweep runs.
    pub sweep_interval: Duration,
    /// How close to its slot an appointment gets its reminder.
    pub reminder_window: chrono::Duration,
    /// When set, a reminder whose window passed while no sweep was
    /// running is fired late instead of skipped.
    pub reminder_catch_up: bool,
    /// Simulated delivery latency before a log entry flips to success.
    pub relay_flip_delay: Duration,
    /// Rows kept in the dispatch log.
    pub relay_log_cap: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("campus-data"),
            sweep_interval: Duration::from_secs(10),
            reminder_window: chrono::Duration::minutes(5),
            reminder_catch_up: false,
            relay_flip_delay: Duration::from_millis(2500),
            relay_log_cap: DEFAULT_LOG_CAP,
        }
    }
}

impl Config {
    /// Reads the defaults, then applies any `CAMPUS_ONE_*` overrides.
    /// Unparseable values are logged and ignored.
    pub fn from_env() -> Self {
        let mut config = Self::default();
        if let Ok(dir) = std::env::var("CAMPUS_ONE_DATA_DIR") {
            config.data_dir = PathBuf::from(dir);
        }
        if let Some(secs) = parse_env("CAMPUS_ONE_SWEEP_SECS") {
            config.sweep_interval = Duration::from_secs(secs);
        }
        if let Some(mins) = parse_env("CAMPUS_ONE_REMINDER_WINDOW_MINS") {
            config.reminder_window = chrono::Duration::minutes(mins as i64);
        }
        if let Ok(flag) = std::env::var("CAMPUS_ONE_REMINDER_CATCH_UP") {
            config.reminder_catch_up = matches!(flag.as_str(), "1" | "true" | "yes");
        }
        if let Some(ms) = parse_env("CAMPUS_ONE_RELAY_FLIP_MS") {
            config.relay_flip_delay = Duration::from_millis(ms);
        }
        if let Some(cap) = parse_env("CAMPUS_ONE_RELAY_LOG_CAP") {
            config.relay_log_cap = cap as usize;
        }
        config
    }
}

fn parse_env(key: &str) -> Option<u64> {
    let raw = std::env::var(key).ok()?;
    match raw.parse() {
        Ok(value) => Some(value),
        Err(_) => {
            warn!(key, raw = %raw, "Ignoring unparseable configuration value");
            None
        }
    }
}
