//! Statistics configuration from environment variables

use std::env;
use std::time::Duration;

const DEFAULT_WINDOW_SECONDS: u32 = 60;
const DEFAULT_CLEANUP_INTERVAL_MS: u64 = 3_000;
const DEFAULT_REPORT_INTERVAL_MS: u64 = 10_000;
const DEFAULT_LOG_FILTER: &str = "info";

/// Configuration for the statistics engine and its runtime
///
/// Loaded from environment variables with sensible defaults.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatsConfig {
    /// Sliding window width W, used for both admission and eviction
    pub window_seconds: u32,

    /// Evictor sweep interval in milliseconds
    pub cleanup_interval_ms: u64,

    /// How often the runtime logs a statistics snapshot, in milliseconds
    pub report_interval_ms: u64,

    /// Logger filter directives; `info` when unset
    pub rust_log: Option<String>,
}

impl Default for StatsConfig {
    fn default() -> Self {
        Self {
            window_seconds: DEFAULT_WINDOW_SECONDS,
            cleanup_interval_ms: DEFAULT_CLEANUP_INTERVAL_MS,
            report_interval_ms: DEFAULT_REPORT_INTERVAL_MS,
            rust_log: None,
        }
    }
}

impl StatsConfig {
    /// Load configuration from environment variables
    ///
    /// Environment variables:
    /// - `WINDOW_SECONDS` (default: 60)
    /// - `CLEANUP_INTERVAL_MS` (default: 3000)
    /// - `STATS_REPORT_INTERVAL_MS` (default: 10000)
    /// - `RUST_LOG` (default: info)
    ///
    /// Missing, unparsable or zero values fall back to the default.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load configuration through an arbitrary key lookup
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        Self {
            window_seconds: parse_positive(&lookup, "WINDOW_SECONDS")
                .unwrap_or(defaults.window_seconds),

            cleanup_interval_ms: parse_positive(&lookup, "CLEANUP_INTERVAL_MS")
                .unwrap_or(defaults.cleanup_interval_ms),

            report_interval_ms: parse_positive(&lookup, "STATS_REPORT_INTERVAL_MS")
                .unwrap_or(defaults.report_interval_ms),

            rust_log: lookup("RUST_LOG"),
        }
    }

    pub fn log_filter(&self) -> &str {
        self.rust_log.as_deref().unwrap_or(DEFAULT_LOG_FILTER)
    }

    pub fn window(&self) -> chrono::Duration {
        chrono::Duration::seconds(i64::from(self.window_seconds))
    }

    pub fn cleanup_interval(&self) -> Duration {
        Duration::from_millis(self.cleanup_interval_ms)
    }

    pub fn report_interval(&self) -> Duration {
        Duration::from_millis(self.report_interval_ms)
    }
}

fn parse_positive<F, T>(lookup: &F, key: &str) -> Option<T>
where
    F: Fn(&str) -> Option<String>,
    T: std::str::FromStr + Default + PartialEq,
{
    let value = lookup(key)?;
    match value.trim().parse::<T>() {
        Ok(parsed) if parsed != T::default() => Some(parsed),
        _ => {
            log::warn!("Ignoring invalid {}={:?}, using default", key, value);
            None
        }
    }
}
