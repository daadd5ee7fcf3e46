//! Server configuration parsed from environment variables.
//!
//! Every knob has a default, so an empty environment yields a working
//! service on port 3000 with a 30 minute session TTL swept once a minute.

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;

use std::path::PathBuf;
use std::time::Duration;

pub const DEFAULT_PORT: u16 = 3000;
pub const DEFAULT_SESSION_TTL_SECS: u64 = 30 * 60;
pub const DEFAULT_REAP_INTERVAL_SECS: u64 = 60;
pub const DEFAULT_STATIC_DIR: &str = "public";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub port: u16,
    /// Idle time after which a session is evicted.
    pub session_ttl: Duration,
    /// How often the reaper sweeps.
    pub reap_interval: Duration,
    /// Directory served for every path the API does not claim.
    pub static_dir: PathBuf,
    /// Reject cart sizes/colors the product does not offer.
    pub enforce_options: bool,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: DEFAULT_PORT,
            session_ttl: Duration::from_secs(DEFAULT_SESSION_TTL_SECS),
            reap_interval: Duration::from_secs(DEFAULT_REAP_INTERVAL_SECS),
            static_dir: PathBuf::from(DEFAULT_STATIC_DIR),
            enforce_options: false,
        }
    }
}

impl ServerConfig {
    /// Build config from environment variables.
    ///
    /// Optional:
    /// - `PORT`: default 3000
    /// - `SESSION_TTL_SECS`: default 1800
    /// - `REAP_INTERVAL_SECS`: default 60, zero is bumped to 1
    /// - `STATIC_DIR`: default `public`
    /// - `CART_ENFORCE_OPTIONS`: `true`/`1` to validate size and color
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub(crate) fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let ttl_secs = parse_or(lookup("SESSION_TTL_SECS"), DEFAULT_SESSION_TTL_SECS);
        let reap_secs = parse_or(lookup("REAP_INTERVAL_SECS"), DEFAULT_REAP_INTERVAL_SECS).max(1);
        Self {
            port: parse_or(lookup("PORT"), DEFAULT_PORT),
            session_ttl: Duration::from_secs(ttl_secs),
            reap_interval: Duration::from_secs(reap_secs),
            static_dir: lookup("STATIC_DIR")
                .filter(|v| !v.trim().is_empty())
                .map_or_else(|| PathBuf::from(DEFAULT_STATIC_DIR), PathBuf::from),
            enforce_options: lookup("CART_ENFORCE_OPTIONS").is_some_and(|v| parse_flag(&v)),
        }
    }
}

fn parse_or<T>(raw: Option<String>, default: T) -> T
where
    T: std::str::FromStr + Copy,
{
    raw.and_then(|v| v.trim().parse::<T>().ok()).unwrap_or(default)
}

fn parse_flag(raw: &str) -> bool {
    matches!(raw.trim().to_ascii_lowercase().as_str(), "1" | "true" | "yes" | "on")
}
