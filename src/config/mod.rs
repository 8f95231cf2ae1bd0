use std::env;
use std::time::Duration;

use thiserror::Error;
use tracing::info;

pub const DEFAULT_BASE_URL: &str = "https://api.odcloud.kr/api/ApplyhomeInfoDetailSvc/v1";
const DEFAULT_TIMEOUT_SECS: u64 = 30;
const DEFAULT_MAX_ROWS: u32 = 50;
const MIN_SERVICE_KEY_LEN: usize = 20;

/// Top-level configuration for the application.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub api: ApiConfig,
    pub telemetry: TelemetryConfig,
}

impl AppConfig {
    /// Load from the process environment (after `.env`, when present).
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Load through an arbitrary variable lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let raw_key = lookup("CHEONGYAK_SERVICE_KEY")
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
            .ok_or(ConfigError::MissingServiceKey)?;
        let service_key = decode_service_key(&raw_key)?;

        let base_url = lookup("CHEONGYAK_BASE_URL")
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());

        let timeout_secs = parse_positive(&lookup, "CHEONGYAK_TIMEOUT_SECS", DEFAULT_TIMEOUT_SECS)?;
        let max_rows = parse_positive(&lookup, "CHEONGYAK_MAX_ROWS", u64::from(DEFAULT_MAX_ROWS))?;
        let max_rows = u32::try_from(max_rows).map_err(|_| ConfigError::InvalidNumber {
            var: "CHEONGYAK_MAX_ROWS",
            value: max_rows.to_string(),
        })?;

        let log_level = lookup("CHEONGYAK_LOG").unwrap_or_else(|| "info".to_string());

        Ok(Self {
            api: ApiConfig {
                service_key,
                base_url,
                timeout: Duration::from_secs(timeout_secs),
                max_rows,
            },
            telemetry: TelemetryConfig { log_level },
        })
    }
}

/// Listing service access.
#[derive(Clone)]
pub struct ApiConfig {
    pub service_key: String,
    pub base_url: String,
    pub timeout: Duration,
    /// Default per-category row limit for comprehensive fetches.
    pub max_rows: u32,
}

// The service key never goes to logs.
impl std::fmt::Debug for ApiConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiConfig")
            .field("service_key", &"<redacted>")
            .field("base_url", &self.base_url)
            .field("timeout", &self.timeout)
            .field("max_rows", &self.max_rows)
            .finish()
    }
}

/// Tracing controls.
#[derive(Debug, Clone)]
pub struct TelemetryConfig {
    pub log_level: String,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("CHEONGYAK_SERVICE_KEY is not set")]
    MissingServiceKey,

    #[error("service key is too short ({len} characters, expected at least {MIN_SERVICE_KEY_LEN})")]
    ServiceKeyTooShort { len: usize },

    #[error("service key is not valid percent-encoded UTF-8")]
    InvalidServiceKey(#[source] std::string::FromUtf8Error),

    #[error("{var} must be a positive integer (got '{value}')")]
    InvalidNumber { var: &'static str, value: String },
}

/// Keys copied from the data portal are often URL-encoded; the HTTP client
/// encodes query values itself, so decode once to avoid double encoding.
fn decode_service_key(raw: &str) -> Result<String, ConfigError> {
    let key = if raw.contains('%') {
        let decoded = urlencoding::decode(raw)
            .map_err(ConfigError::InvalidServiceKey)?
            .into_owned();
        if decoded != raw {
            info!("Service key was URL-encoded; using the decoded form");
        }
        decoded
    } else {
        raw.to_string()
    };

    let len = key.chars().count();
    if len < MIN_SERVICE_KEY_LEN {
        return Err(ConfigError::ServiceKeyTooShort { len });
    }
    Ok(key)
}

fn parse_positive(
    lookup: &impl Fn(&str) -> Option<String>,
    var: &'static str,
    default: u64,
) -> Result<u64, ConfigError> {
    let Some(raw) = lookup(var) else {
        return Ok(default);
    };
    match raw.trim().parse::<u64>() {
        Ok(v) if v > 0 => Ok(v),
        _ => Err(ConfigError::InvalidNumber { var, value: raw }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    const KEY: &str = "abcdEFGH1234ijklMNOP5678+/==";

    fn load(vars: &[(&str, &str)]) -> Result<AppConfig, ConfigError> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        AppConfig::from_lookup(|name| map.get(name).cloned())
    }

    #[test]
    fn load_uses_defaults_when_optional_vars_missing() {
        let config = load(&[("CHEONGYAK_SERVICE_KEY", KEY)]).expect("config loads with defaults");
        assert_eq!(config.api.service_key, KEY);
        assert_eq!(config.api.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.api.timeout, Duration::from_secs(30));
        assert_eq!(config.api.max_rows, 50);
        assert_eq!(config.telemetry.log_level, "info");
    }

    #[test]
    fn missing_key_is_an_error() {
        assert!(matches!(load(&[]), Err(ConfigError::MissingServiceKey)));
        assert!(matches!(
            load(&[("CHEONGYAK_SERVICE_KEY", "   ")]),
            Err(ConfigError::MissingServiceKey)
        ));
    }

    #[test]
    fn percent_encoded_key_is_decoded_once() {
        let encoded = "abcdEFGH1234ijklMNOP5678%2B%2F%3D%3D";
        let config = load(&[("CHEONGYAK_SERVICE_KEY", encoded)]).unwrap();
        assert_eq!(config.api.service_key, KEY);
    }

    #[test]
    fn short_key_is_rejected() {
        assert!(matches!(
            load(&[("CHEONGYAK_SERVICE_KEY", "short")]),
            Err(ConfigError::ServiceKeyTooShort { len: 5 })
        ));
    }

    #[test]
    fn numeric_settings_must_be_positive() {
        let err = load(&[("CHEONGYAK_SERVICE_KEY", KEY), ("CHEONGYAK_TIMEOUT_SECS", "0")]).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidNumber { var: "CHEONGYAK_TIMEOUT_SECS", .. }));

        let err = load(&[("CHEONGYAK_SERVICE_KEY", KEY), ("CHEONGYAK_MAX_ROWS", "many")]).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidNumber { var: "CHEONGYAK_MAX_ROWS", .. }));

        let config = load(&[("CHEONGYAK_SERVICE_KEY", KEY), ("CHEONGYAK_MAX_ROWS", "300")]).unwrap();
        assert_eq!(config.api.max_rows, 300);
    }

    #[test]
    fn debug_output_redacts_key() {
        let config = load(&[("CHEONGYAK_SERVICE_KEY", KEY)]).unwrap();
        let text = format!("{:?}", config.api);
        assert!(!text.contains(KEY));
        assert!(text.contains("<redacted>"));
    }
}
