//! Client configuration with defaults and environment overrides.
//!
//! | Variable             | Field             | Default                     |
//! |----------------------|-------------------|-----------------------------|
//! | `PAZAR_API_URL`      | `api_base_url`    | `http://localhost:8080/api` |
//! | `PAZAR_MARKET_ID`    | `market_id`       | `market_1`                  |
//! | `PAZAR_TIMEOUT_SECS` | `request_timeout` | 10 s                        |

use std::collections::HashMap;
use std::time::Duration;

use crate::mapping::{MapConfig, SceneConfig};

#[derive(Debug, Clone, PartialEq)]
pub struct ClientConfig {
    /// REST API root, without trailing slash
    pub api_base_url: String,

    /// Market searched when the caller names none
    pub market_id: String,

    pub request_timeout: Duration,

    pub map: MapConfig,

    pub scene: SceneConfig,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_base_url: "http://localhost:8080/api".to_string(),
            market_id: "market_1".to_string(),
            request_timeout: Duration::from_secs(10),
            map: MapConfig::default(),
            scene: SceneConfig::default(),
        }
    }
}

impl ClientConfig {
    /// Defaults overridden by `PAZAR_*` environment variables
    pub fn from_env() -> Self {
        let vars: HashMap<String, String> = std::env::vars()
            .filter(|(k, _)| k.starts_with("PAZAR_"))
            .collect();
        Self::from_vars(&vars)
    }

    /// Same as [`ClientConfig::from_env`] over an explicit map.
    ///
    /// Unparseable timeouts fall back to the default.
    pub fn from_vars(vars: &HashMap<String, String>) -> Self {
        let defaults = Self::default();

        let request_timeout = match vars.get("PAZAR_TIMEOUT_SECS") {
            Some(raw) => match raw.parse::<u64>() {
                Ok(secs) if secs > 0 => Duration::from_secs(secs),
                _ => {
                    tracing::warn!("Ignoring invalid PAZAR_TIMEOUT_SECS={}", raw);
                    defaults.request_timeout
                }
            },
            None => defaults.request_timeout,
        };

        Self {
            api_base_url: vars
                .get("PAZAR_API_URL")
                .map(|url| url.trim_end_matches('/').to_string())
                .unwrap_or(defaults.api_base_url),
            market_id: vars.get("PAZAR_MARKET_ID").cloned().unwrap_or(defaults.market_id),
            request_timeout,
            ..defaults
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = ClientConfig::default();
        assert_eq!(config.market_id, "market_1");
        assert_eq!(config.map.cell_size, 40.0);
        assert_eq!(config.scene.floor_height, 3.0);
    }

    #[test]
    fn test_overrides() {
        let mut vars = HashMap::new();
        vars.insert("PAZAR_API_URL".to_string(), "https://pazar.example/api/".to_string());
        vars.insert("PAZAR_TIMEOUT_SECS".to_string(), "3".to_string());

        let config = ClientConfig::from_vars(&vars);
        assert_eq!(config.api_base_url, "https://pazar.example/api");
        assert_eq!(config.request_timeout, Duration::from_secs(3));
        assert_eq!(config.market_id, "market_1");
    }

    #[test]
    fn test_bad_timeout_uses_default() {
        let mut vars = HashMap::new();
        vars.insert("PAZAR_TIMEOUT_SECS".to_string(), "soon".to_string());
        assert_eq!(ClientConfig::from_vars(&vars).request_timeout, Duration::from_secs(10));
    }
}
