use std::{env, fmt::Display, net::IpAddr, str::FromStr};

use tracing::info;

use crate::error::ConfigError;

pub const DEFAULT_BACKEND_URL: &str = "http://127.0.0.1:5000";
pub const DEFAULT_SESSION_TTL_SECS: u32 = 60 * 60;

#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub backend_url: String,
    pub bind_addr: IpAddr,
    pub port: u16,
    /// Idle time after which a session is dropped from memory.
    pub session_ttl_secs: u32,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        Ok(Self {
            backend_url: load(&lookup, "RECIPE_BACKEND_URL", DEFAULT_BACKEND_URL)?,
            bind_addr: load(&lookup, "BIND_ADDR", "0.0.0.0")?,
            port: load(&lookup, "PORT", "8080")?,
            session_ttl_secs: load(&lookup, "SESSION_TTL_SECS", "3600")?,
        })
    }
}

fn load<T: FromStr>(
    lookup: &impl Fn(&str) -> Option<String>,
    key: &'static str,
    default: &str,
) -> Result<T, ConfigError>
where
    T::Err: Display,
{
    let value = lookup(key).unwrap_or_else(|| {
        info!("{key} not set, using default: {default}");
        default.to_string()
    });
    value.parse().map_err(|e: T::Err| ConfigError::Invalid {
        key,
        reason: e.to_string(),
        value,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn defaults_point_at_local_backend() {
        let config = Config::from_lookup(lookup(&[])).unwrap();
        assert_eq!(
            config,
            Config {
                backend_url: DEFAULT_BACKEND_URL.into(),
                bind_addr: "0.0.0.0".parse().unwrap(),
                port: 8080,
                session_ttl_secs: DEFAULT_SESSION_TTL_SECS,
            }
        );
    }

    #[test]
    fn overrides_are_applied() {
        let config = Config::from_lookup(lookup(&[
            ("RECIPE_BACKEND_URL", "http://recipes.internal:9000"),
            ("PORT", "3000"),
            ("SESSION_TTL_SECS", "600"),
        ]))
        .unwrap();
        assert_eq!(config.backend_url, "http://recipes.internal:9000");
        assert_eq!(config.port, 3000);
        assert_eq!(config.session_ttl_secs, 600);
    }

    #[test]
    fn invalid_port_is_rejected() {
        let err = Config::from_lookup(lookup(&[("PORT", "eighty")])).unwrap_err();
        assert!(err.to_string().contains("PORT"));
    }
}
