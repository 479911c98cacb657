//! Web server configuration from environment variables.

use std::time::Duration;

/// Listen address and tournament expiry settings.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ServerConfig {
    /// `HOST`, default `0.0.0.0` so the app is reachable on a VPS.
    pub host: String,
    /// `PORT`, default 8080.
    pub port: u16,
    /// `TOURNAMENT_TTL_HOURS`: tournaments idle this long are removed. Default 12h.
    pub inactivity_timeout: Duration,
    /// `CLEANUP_INTERVAL_MINUTES`: how often idle tournaments are swept. Default 30min.
    pub cleanup_interval: Duration,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
            inactivity_timeout: Duration::from_secs(12 * 3600),
            cleanup_interval: Duration::from_secs(30 * 60),
        }
    }
}

impl ServerConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from any key lookup. Missing or unparseable values keep their defaults.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        let host = lookup("HOST")
            .map(|h| h.trim().to_string())
            .filter(|h| !h.is_empty())
            .unwrap_or(defaults.host);
        let port = lookup("PORT")
            .and_then(|p| p.trim().parse().ok())
            .unwrap_or(defaults.port);
        let inactivity_timeout = lookup("TOURNAMENT_TTL_HOURS")
            .and_then(|h| h.trim().parse::<u64>().ok())
            .map(|h| Duration::from_secs(h * 3600))
            .unwrap_or(defaults.inactivity_timeout);
        let cleanup_interval = lookup("CLEANUP_INTERVAL_MINUTES")
            .and_then(|m| m.trim().parse::<u64>().ok())
            .filter(|m| *m > 0)
            .map(|m| Duration::from_secs(m * 60))
            .unwrap_or(defaults.cleanup_interval);
        Self {
            host,
            port,
            inactivity_timeout,
            cleanup_interval,
        }
    }
}
