use std::env;
use std::fmt;
use std::time::Duration;

use url::Url;

use crate::error::ConfigurationError;

pub const DEFAULT_BASE_URL: &str = "https://api.deepseek.com/v1";
pub const DEFAULT_MODEL: &str = "deepseek-chat";
pub const DEFAULT_TEMPERATURE: f32 = 0.3;

pub const ENV_API_KEY: &str = "REVISE_AI_API_KEY";
pub const ENV_BASE_URL: &str = "REVISE_AI_BASE_URL";
pub const ENV_MODEL: &str = "REVISE_AI_MODEL";
pub const ENV_TEMPERATURE: &str = "REVISE_AI_TEMPERATURE";
pub const ENV_TIMEOUT_SECS: &str = "REVISE_AI_TIMEOUT_SECS";

/// Connection settings for the chat-completion endpoint.
///
/// Passed explicitly to the clients; there is no process-wide key.
#[derive(Clone, PartialEq)]
pub struct AiConfig {
    pub base_url: String,
    pub api_key: String,
    pub model: String,
    pub temperature: f32,
    pub timeout: Option<Duration>,
}

impl AiConfig {
    /// # Errors
    ///
    /// Returns `ConfigurationError::MissingApiKey` for a blank key.
    pub fn new(api_key: impl Into<String>) -> Result<Self, ConfigurationError> {
        let api_key = api_key.into().trim().to_string();
        if api_key.is_empty() {
            return Err(ConfigurationError::MissingApiKey);
        }
        Ok(Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            api_key,
            model: DEFAULT_MODEL.to_string(),
            temperature: DEFAULT_TEMPERATURE,
            timeout: None,
        })
    }

    /// Load settings from the environment, reading a `.env` file first if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigurationError` when the key is missing or a value is invalid.
    pub fn from_env() -> Result<Self, ConfigurationError> {
        dotenv::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build settings from an arbitrary variable lookup.
    ///
    /// # Errors
    ///
    /// Returns `ConfigurationError` when the key is missing or a value is invalid.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigurationError> {
        let api_key = lookup(ENV_API_KEY).ok_or(ConfigurationError::MissingApiKey)?;
        let mut config = Self::new(api_key)?;

        if let Some(raw) = non_blank(lookup(ENV_BASE_URL)) {
            config = config.with_base_url(raw)?;
        }
        if let Some(model) = non_blank(lookup(ENV_MODEL)) {
            config = config.with_model(model);
        }
        if let Some(raw) = non_blank(lookup(ENV_TEMPERATURE)) {
            let temperature = raw
                .trim()
                .parse::<f32>()
                .ok()
                .filter(|t| (0.0..=2.0).contains(t))
                .ok_or(ConfigurationError::InvalidTemperature { raw })?;
            config.temperature = temperature;
        }
        if let Some(raw) = non_blank(lookup(ENV_TIMEOUT_SECS)) {
            config = config.with_timeout(parse_timeout_secs(&raw)?);
        }
        Ok(config)
    }

    /// # Errors
    ///
    /// Returns `ConfigurationError::InvalidBaseUrl` unless the value is an http(s) URL.
    pub fn with_base_url(mut self, raw: impl Into<String>) -> Result<Self, ConfigurationError> {
        let raw = raw.into();
        let parsed = Url::parse(raw.trim())
            .ok()
            .filter(|url| matches!(url.scheme(), "http" | "https"))
            .ok_or_else(|| ConfigurationError::InvalidBaseUrl { raw: raw.clone() })?;
        self.base_url = parsed.as_str().trim_end_matches('/').to_string();
        Ok(self)
    }

    #[must_use]
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Full URL of the chat-completions endpoint.
    #[must_use]
    pub fn endpoint(&self) -> String {
        format!("{}/chat/completions", self.base_url.trim_end_matches('/'))
    }
}

impl fmt::Debug for AiConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AiConfig")
            .field("base_url", &self.base_url)
            .field("api_key", &"<redacted>")
            .field("model", &self.model)
            .field("temperature", &self.temperature)
            .field("timeout", &self.timeout)
            .finish()
    }
}

/// # Errors
///
/// Returns `ConfigurationError::InvalidTimeout` unless `raw` is a positive integer.
pub fn parse_timeout_secs(raw: &str) -> Result<Duration, ConfigurationError> {
    raw.trim()
        .parse::<u64>()
        .ok()
        .filter(|secs| *secs > 0)
        .map(Duration::from_secs)
        .ok_or_else(|| ConfigurationError::InvalidTimeout {
            raw: raw.to_string(),
        })
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn blank_key_is_a_configuration_error() {
        assert_eq!(AiConfig::new("  ").unwrap_err(), ConfigurationError::MissingApiKey);
    }

    #[test]
    fn missing_key_variable_is_a_configuration_error() {
        let err = AiConfig::from_lookup(lookup(&[(ENV_MODEL, "m")])).unwrap_err();
        assert_eq!(err, ConfigurationError::MissingApiKey);
    }

    #[test]
    fn defaults_apply_when_only_key_is_set() {
        let config = AiConfig::from_lookup(lookup(&[(ENV_API_KEY, "sk-test")])).unwrap();
        assert_eq!(config.api_key, "sk-test");
        assert_eq!(config.model, DEFAULT_MODEL);
        assert_eq!(config.endpoint(), "https://api.deepseek.com/v1/chat/completions");
        assert_eq!(config.timeout, None);
    }

    #[test]
    fn overrides_are_read_from_lookup() {
        let config = AiConfig::from_lookup(lookup(&[
            (ENV_API_KEY, "sk-test"),
            (ENV_BASE_URL, "https://example.test/api/"),
            (ENV_MODEL, "gpt-4o-mini"),
            (ENV_TEMPERATURE, "0.7"),
            (ENV_TIMEOUT_SECS, "20"),
        ]))
        .unwrap();
        assert_eq!(config.endpoint(), "https://example.test/api/chat/completions");
        assert_eq!(config.model, "gpt-4o-mini");
        assert!((config.temperature - 0.7).abs() < f32::EPSILON);
        assert_eq!(config.timeout, Some(Duration::from_secs(20)));
    }

    #[test]
    fn invalid_values_are_rejected() {
        let bad_url = AiConfig::from_lookup(lookup(&[
            (ENV_API_KEY, "k"),
            (ENV_BASE_URL, "ftp://nope"),
        ]));
        assert!(matches!(bad_url, Err(ConfigurationError::InvalidBaseUrl { .. })));

        let bad_timeout = AiConfig::from_lookup(lookup(&[
            (ENV_API_KEY, "k"),
            (ENV_TIMEOUT_SECS, "0"),
        ]));
        assert!(matches!(bad_timeout, Err(ConfigurationError::InvalidTimeout { .. })));

        let bad_temperature = AiConfig::from_lookup(lookup(&[
            (ENV_API_KEY, "k"),
            (ENV_TEMPERATURE, "hot"),
        ]));
        assert!(matches!(
            bad_temperature,
            Err(ConfigurationError::InvalidTemperature { .. })
        ));
    }

    #[test]
    fn debug_output_redacts_key() {
        let config = AiConfig::new("sk-secret").unwrap();
        let debug = format!("{config:?}");
        assert!(!debug.contains("sk-secret"));
        assert!(debug.contains("<redacted>"));
    }
}
