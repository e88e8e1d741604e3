//! # Configuration Module
//!
//! Runtime settings read from the environment at startup.

use chrono::Duration;
use std::net::{IpAddr, Ipv4Addr, SocketAddr};

use crate::errors::ConfigError;

// Defaults
pub const DEFAULT_PORT: u16 = 10000;
pub const DEFAULT_HOST: IpAddr = IpAddr::V4(Ipv4Addr::UNSPECIFIED);
pub const DEFAULT_SESSION_CAPACITY: usize = 10_000;
pub const DEFAULT_SESSION_TTL_SECS: u64 = 24 * 60 * 60; // 1 day
pub const DEFAULT_PURGE_INTERVAL_SECS: u64 = 10 * 60; // 10 minutes

/// Log output format for the tracing subscriber
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    #[default]
    Text,
    Json,
}

/// Session store limits
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionConfig {
    /// Maximum number of sessions held at once
    pub capacity: usize,
    /// Idle time after which a session is dropped
    pub ttl: Duration,
    /// How often expired sessions are purged, in seconds
    pub purge_interval_secs: u64,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            capacity: DEFAULT_SESSION_CAPACITY,
            ttl: Duration::seconds(DEFAULT_SESSION_TTL_SECS as i64),
            purge_interval_secs: DEFAULT_PURGE_INTERVAL_SECS,
        }
    }
}

/// Application configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub bot_token: String,
    pub host: IpAddr,
    pub port: u16,
    pub session: SessionConfig,
    pub log_format: LogFormat,
}

impl Config {
    /// Read configuration from process environment variables
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Read configuration through an arbitrary variable lookup
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let bot_token = lookup("BOT_TOKEN")
            .or_else(|| lookup("TELEGRAM_BOT_TOKEN"))
            .filter(|token| !token.trim().is_empty())
            .ok_or(ConfigError::Missing("BOT_TOKEN"))?;

        let ttl_secs = parse_positive(&lookup, "SESSION_TTL_SECS", DEFAULT_SESSION_TTL_SECS)?;

        Ok(Self {
            bot_token,
            host: parse_var(&lookup, "HOST", DEFAULT_HOST)?,
            port: parse_var(&lookup, "PORT", DEFAULT_PORT)?,
            session: SessionConfig {
                capacity: parse_positive(&lookup, "SESSION_CAPACITY", DEFAULT_SESSION_CAPACITY)?,
                ttl: session_ttl(ttl_secs)?,
                purge_interval_secs: parse_positive(
                    &lookup,
                    "SESSION_PURGE_INTERVAL_SECS",
                    DEFAULT_PURGE_INTERVAL_SECS,
                )?,
            },
            log_format: match lookup("LOG_FORMAT").as_deref().map(str::trim) {
                Some(f) if f.eq_ignore_ascii_case("json") => LogFormat::Json,
                _ => LogFormat::Text,
            },
        })
    }

    pub fn listen_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}

fn parse_var<F, T>(lookup: &F, name: &'static str, default: T) -> Result<T, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    match lookup(name) {
        Some(value) if !value.trim().is_empty() => {
            value.trim().parse().map_err(|e: T::Err| ConfigError::Invalid {
                name,
                value: value.clone(),
                reason: e.to_string(),
            })
        }
        _ => Ok(default),
    }
}

/// Like [`parse_var`], rejecting zero
fn parse_positive<F, T>(lookup: &F, name: &'static str, default: T) -> Result<T, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: std::str::FromStr + Default + PartialEq + ToString,
    T::Err: std::fmt::Display,
{
    let value = parse_var(lookup, name, default)?;
    if value == T::default() {
        return Err(ConfigError::Invalid {
            name,
            value: value.to_string(),
            reason: "must be greater than zero".to_string(),
        });
    }
    Ok(value)
}

fn session_ttl(secs: u64) -> Result<Duration, ConfigError> {
    i64::try_from(secs)
        .ok()
        .and_then(Duration::try_seconds)
        .ok_or_else(|| ConfigError::Invalid {
            name: "SESSION_TTL_SECS",
            value: secs.to_string(),
            reason: "too large".to_string(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name| map.get(name).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = Config::from_lookup(lookup_from(&[("BOT_TOKEN", "123:abc")])).unwrap();
        assert_eq!(config.bot_token, "123:abc");
        assert_eq!(config.port, 10000);
        assert_eq!(config.listen_addr().to_string(), "0.0.0.0:10000");
        assert_eq!(config.session, SessionConfig::default());
        assert_eq!(config.log_format, LogFormat::Text);
    }

    #[test]
    fn test_missing_token() {
        let err = Config::from_lookup(lookup_from(&[("PORT", "8080")])).unwrap_err();
        assert_eq!(err, ConfigError::Missing("BOT_TOKEN"));

        let err = Config::from_lookup(lookup_from(&[("BOT_TOKEN", "  ")])).unwrap_err();
        assert_eq!(err, ConfigError::Missing("BOT_TOKEN"));
    }

    #[test]
    fn test_legacy_token_name() {
        let config =
            Config::from_lookup(lookup_from(&[("TELEGRAM_BOT_TOKEN", "legacy")])).unwrap();
        assert_eq!(config.bot_token, "legacy");
    }

    #[test]
    fn test_overrides() {
        let config = Config::from_lookup(lookup_from(&[
            ("BOT_TOKEN", "t"),
            ("HOST", "127.0.0.1"),
            ("PORT", "8080"),
            ("SESSION_CAPACITY", "5"),
            ("SESSION_TTL_SECS", "60"),
            ("LOG_FORMAT", "JSON"),
        ]))
        .unwrap();
        assert_eq!(config.listen_addr().to_string(), "127.0.0.1:8080");
        assert_eq!(config.session.capacity, 5);
        assert_eq!(config.session.ttl, Duration::minutes(1));
        assert_eq!(config.log_format, LogFormat::Json);
    }

    #[test]
    fn test_invalid_port() {
        let err =
            Config::from_lookup(lookup_from(&[("BOT_TOKEN", "t"), ("PORT", "ten")])).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { name: "PORT", .. }));
    }

    #[test]
    fn test_session_ttl_must_be_positive() {
        for ttl in ["-1", "0"] {
            let err = Config::from_lookup(lookup_from(&[
                ("BOT_TOKEN", "t"),
                ("SESSION_TTL_SECS", ttl),
            ]))
            .unwrap_err();
            assert!(
                matches!(err, ConfigError::Invalid { name: "SESSION_TTL_SECS", .. }),
                "{} accepted",
                ttl
            );
        }
    }

    #[test]
    fn test_session_ttl_out_of_range() {
        let max = i64::MAX.to_string();
        let err = Config::from_lookup(lookup_from(&[
            ("BOT_TOKEN", "t"),
            ("SESSION_TTL_SECS", max.as_str()),
        ]))
        .unwrap_err();
        assert_eq!(
            err,
            ConfigError::Invalid {
                name: "SESSION_TTL_SECS",
                value: max,
                reason: "too large".to_string(),
            }
        );
    }

    #[test]
    fn test_zero_capacity_and_purge_interval_rejected() {
        let err = Config::from_lookup(lookup_from(&[
            ("BOT_TOKEN", "t"),
            ("SESSION_CAPACITY", "0"),
        ]))
        .unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { name: "SESSION_CAPACITY", .. }));

        let err = Config::from_lookup(lookup_from(&[
            ("BOT_TOKEN", "t"),
            ("SESSION_PURGE_INTERVAL_SECS", "0"),
        ]))
        .unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { name: "SESSION_PURGE_INTERVAL_SECS", .. }));
    }
}
