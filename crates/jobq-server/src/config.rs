use std::net::{IpAddr, SocketAddr};
use std::str::FromStr;
use std::time::Duration;

use jobq_core::LeaseConfig;

/// Log output format, selected with `LOG_FORMAT`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

impl FromStr for LogFormat {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "pretty" | "text" => Ok(LogFormat::Pretty),
            "json" => Ok(LogFormat::Json),
            _ => Err(()),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("{name} must be {expected}, got {value:?}")]
    Invalid {
        name: &'static str,
        expected: &'static str,
        value: String,
    },
}

/// Server configuration loaded from environment variables.
///
/// All fields have defaults suitable for local development.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address (default: `0.0.0.0`).
    pub host: IpAddr,
    /// Bind port (default: `8080`).
    pub port: u16,
    /// Queue and processing timeouts.
    pub lease: LeaseConfig,
    /// How often to reap expired leases. `None` disables the reaper.
    pub reaper_interval: Option<Duration>,
    /// HTTP request timeout in seconds (default: `30`).
    pub request_timeout_secs: u64,
    pub log_format: LogFormat,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: IpAddr::from([0, 0, 0, 0]),
            port: 8080,
            lease: LeaseConfig::default(),
            reaper_interval: None,
            request_timeout_secs: 30,
            log_format: LogFormat::Pretty,
        }
    }
}

impl ServerConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                | Default   |
    /// |------------------------|-----------|
    /// | `HOST`                 | `0.0.0.0` |
    /// | `PORT`                 | `8080`    |
    /// | `ENQUEUE_TIMEOUT_MS`   | `60000`   |
    /// | `DEQUEUE_TIMEOUT_MS`   | `30000`   |
    /// | `REAPER_INTERVAL_MS`   | `0` (off) |
    /// | `REQUEST_TIMEOUT_SECS` | `30`      |
    /// | `LOG_FORMAT`           | `pretty`  |
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Same as [`ServerConfig::from_env`] with an arbitrary variable source.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        let var = |name: &'static str, expected: &'static str| Var {
            name,
            expected,
            value: lookup(name),
        };

        let host = var("HOST", "an IP address").parse_or(defaults.host)?;
        let port = var("PORT", "a port number").parse_or(defaults.port)?;
        let enqueue_ms = var("ENQUEUE_TIMEOUT_MS", "a whole number of milliseconds")
            .parse_or(defaults.lease.enqueue_timeout.as_millis() as u64)?;
        let dequeue_ms = var("DEQUEUE_TIMEOUT_MS", "a whole number of milliseconds")
            .parse_or(defaults.lease.dequeue_timeout.as_millis() as u64)?;
        let reaper_ms: u64 =
            var("REAPER_INTERVAL_MS", "a whole number of milliseconds").parse_or(0)?;
        let request_timeout_secs = var("REQUEST_TIMEOUT_SECS", "a whole number of seconds")
            .parse_or(defaults.request_timeout_secs)?;
        let log_format = var("LOG_FORMAT", "`pretty` or `json`").parse_or(defaults.log_format)?;

        Ok(Self {
            host,
            port,
            lease: LeaseConfig::from_millis(enqueue_ms, dequeue_ms),
            reaper_interval: (reaper_ms > 0).then(|| Duration::from_millis(reaper_ms)),
            request_timeout_secs,
            log_format,
        })
    }

    pub fn bind_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}

struct Var {
    name: &'static str,
    expected: &'static str,
    value: Option<String>,
}

impl Var {
    fn parse_or<T: FromStr>(self, default: T) -> Result<T, ConfigError> {
        match self.value {
            None => Ok(default),
            Some(raw) if raw.trim().is_empty() => Ok(default),
            Some(raw) => raw.trim().parse().map_err(|_| ConfigError::Invalid {
                name: self.name,
                expected: self.expected,
                value: raw,
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn load(vars: &[(&str, &str)]) -> Result<ServerConfig, ConfigError> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        ServerConfig::from_lookup(|name| vars.get(name).cloned())
    }

    #[test]
    fn defaults_apply_when_nothing_is_set() {
        let config = load(&[]).unwrap();
        assert_eq!(config.bind_addr(), "0.0.0.0:8080".parse().unwrap());
        assert_eq!(config.lease, LeaseConfig::from_millis(60_000, 30_000));
        assert_eq!(config.reaper_interval, None);
        assert_eq!(config.request_timeout_secs, 30);
        assert_eq!(config.log_format, LogFormat::Pretty);
    }

    #[test]
    fn overrides_are_parsed() {
        let config = load(&[
            ("HOST", "127.0.0.1"),
            ("PORT", "9000"),
            ("ENQUEUE_TIMEOUT_MS", "1500"),
            ("DEQUEUE_TIMEOUT_MS", "250"),
            ("REAPER_INTERVAL_MS", "100"),
            ("LOG_FORMAT", "JSON"),
        ])
        .unwrap();

        assert_eq!(config.bind_addr(), "127.0.0.1:9000".parse().unwrap());
        assert_eq!(config.lease.enqueue_timeout, Duration::from_millis(1500));
        assert_eq!(config.lease.dequeue_timeout, Duration::from_millis(250));
        assert_eq!(config.reaper_interval, Some(Duration::from_millis(100)));
        assert_eq!(config.log_format, LogFormat::Json);
    }

    #[test]
    fn invalid_value_names_the_variable() {
        let err = load(&[("PORT", "eighty")]).unwrap_err();
        assert_eq!(
            err.to_string(),
            "PORT must be a port number, got \"eighty\""
        );
    }
}
