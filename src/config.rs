// Runtime configuration. Every setting comes from an environment variable
// and falls back to a default that talks to the public services.

use crate::error::ConfigError;
use std::path::PathBuf;
use std::time::Duration;

pub const DEFAULT_DOG_API_URL: &str = "https://dog.ceo/api";
pub const DEFAULT_DISK_API_URL: &str = "https://cloud-api.yandex.net/v1/disk";

/// Settings shared by the HTTP clients, the orchestrator and the UI.
#[derive(Debug, Clone)]
pub struct Config {
    pub dog_api_url: String,
    pub disk_api_url: String,
    /// Scheme token placed before the user's credential in `Authorization`.
    pub auth_scheme: String,
    pub request_timeout: Duration,
    pub upload_timeout: Duration,
    /// Delay after every processed image.
    pub pacing: Duration,
    pub results_path: PathBuf,
    pub plain_output: bool,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            dog_api_url: DEFAULT_DOG_API_URL.into(),
            disk_api_url: DEFAULT_DISK_API_URL.into(),
            auth_scheme: "OAuth".into(),
            request_timeout: Duration::from_secs(10),
            upload_timeout: Duration::from_secs(30),
            pacing: Duration::from_millis(500),
            results_path: PathBuf::from("results.json"),
            plain_output: false,
        }
    }
}

impl Config {
    /// Build the configuration from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as `from_env`, reading values through `lookup`.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Config::default();

        if let Some(url) = lookup("DOG_API_URL") {
            config.dog_api_url = trim_base(&url);
        }
        if let Some(url) = lookup("DISK_API_URL") {
            config.disk_api_url = trim_base(&url);
        }
        if let Some(scheme) = lookup("DISK_AUTH_SCHEME") {
            config.auth_scheme = scheme.trim().to_string();
        }
        if let Some(v) = lookup("HTTP_TIMEOUT_SECS") {
            config.request_timeout = Duration::from_secs(parse_number("HTTP_TIMEOUT_SECS", &v)?);
        }
        if let Some(v) = lookup("UPLOAD_TIMEOUT_SECS") {
            config.upload_timeout = Duration::from_secs(parse_number("UPLOAD_TIMEOUT_SECS", &v)?);
        }
        if let Some(v) = lookup("UPLOAD_PACING_MS") {
            config.pacing = Duration::from_millis(parse_number("UPLOAD_PACING_MS", &v)?);
        }
        if let Some(path) = lookup("RESULTS_PATH") {
            config.results_path = PathBuf::from(path);
        }
        config.plain_output = lookup("NO_COLOR").is_some_and(|v| !v.is_empty());

        Ok(config)
    }
}

fn trim_base(url: &str) -> String {
    url.trim().trim_end_matches('/').to_string()
}

fn parse_number(key: &str, value: &str) -> Result<u64, ConfigError> {
    value.trim().parse().map_err(|_| ConfigError::Invalid {
        key: key.to_string(),
        value: value.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn defaults_when_nothing_is_set() {
        let config = Config::from_lookup(|_| None).unwrap();
        assert_eq!(config.dog_api_url, DEFAULT_DOG_API_URL);
        assert_eq!(config.request_timeout, Duration::from_secs(10));
        assert_eq!(config.pacing, Duration::from_millis(500));
        assert_eq!(config.results_path, PathBuf::from("results.json"));
        assert!(!config.plain_output);
    }

    #[test]
    fn overrides_are_applied() {
        let config = Config::from_lookup(lookup_from(&[
            ("DOG_API_URL", "http://localhost:9000/api/"),
            ("UPLOAD_PACING_MS", "0"),
            ("DISK_AUTH_SCHEME", "Bearer"),
            ("NO_COLOR", "1"),
        ]))
        .unwrap();
        assert_eq!(config.dog_api_url, "http://localhost:9000/api");
        assert_eq!(config.pacing, Duration::ZERO);
        assert_eq!(config.auth_scheme, "Bearer");
        assert!(config.plain_output);
    }

    #[test]
    fn empty_no_color_keeps_colour() {
        let config = Config::from_lookup(lookup_from(&[("NO_COLOR", "")])).unwrap();
        assert!(!config.plain_output);
    }

    #[test]
    fn bad_number_is_rejected() {
        let err = Config::from_lookup(lookup_from(&[("HTTP_TIMEOUT_SECS", "soon")])).unwrap_err();
        assert!(err.to_string().contains("HTTP_TIMEOUT_SECS"));
    }
}
