use std::net::IpAddr;
use std::time::Duration;

use reqwest::Url;
use serde::{Deserialize, Serialize};

use super::ConfigError;
use crate::poller::HttpOptions;
use crate::ui::Theme;

pub const DEFAULT_ENDPOINT: &str = "https://spot.sylveon.live/now-playing";

/// User-editable configuration, stored in `config.toml`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserConfig {
    #[serde(default = "default_endpoint")]
    pub endpoint: String,
    #[serde(default = "default_interval_ms")]
    pub interval_ms: u64,
    #[serde(default = "default_request_timeout_ms")]
    pub request_timeout_ms: u64,
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
    /// Card title.
    #[serde(default = "default_header")]
    pub header: String,
    #[serde(default = "default_true")]
    pub wave_bars: bool,
    /// `tracing` filter directive, e.g. `info` or `nowplaying=debug`.
    #[serde(default = "default_log_level")]
    pub log_level: String,
    #[serde(default)]
    pub theme: Theme,
}

fn default_endpoint() -> String {
    DEFAULT_ENDPOINT.to_string()
}

fn default_interval_ms() -> u64 {
    30_000
}

fn default_request_timeout_ms() -> u64 {
    10_000
}

fn default_user_agent() -> String {
    HttpOptions::default().user_agent
}

fn default_header() -> String {
    "Now Playing On Spotify".to_string()
}

fn default_true() -> bool {
    true
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for UserConfig {
    fn default() -> Self {
        Self {
            endpoint: default_endpoint(),
            interval_ms: default_interval_ms(),
            request_timeout_ms: default_request_timeout_ms(),
            user_agent: default_user_agent(),
            header: default_header(),
            wave_bars: true,
            log_level: default_log_level(),
            theme: Theme::default(),
        }
    }
}

impl UserConfig {
    /// Check the values that `toml` cannot check for us.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.endpoint_url()?;
        if self.interval_ms == 0 {
            return Err(ConfigError::ZeroInterval);
        }
        if self.request_timeout_ms == 0 {
            return Err(ConfigError::ZeroTimeout);
        }
        Ok(())
    }

    /// The endpoint as a URL. Must be `https`, except for loopback hosts
    /// where plain `http` is fine for local development.
    pub fn endpoint_url(&self) -> Result<Url, ConfigError> {
        let invalid = |reason: &str| ConfigError::InvalidEndpoint {
            endpoint: self.endpoint.clone(),
            reason: reason.to_string(),
        };

        let url = Url::parse(&self.endpoint).map_err(|e| invalid(&e.to_string()))?;
        if url.host_str().is_none() {
            return Err(invalid("missing host"));
        }
        match url.scheme() {
            "https" => Ok(url),
            "http" if is_loopback(&url) => Ok(url),
            "http" => Err(invalid("plain http is only allowed for localhost")),
            other => Err(invalid(&format!("unsupported scheme `{}`", other))),
        }
    }

    pub fn interval(&self) -> Duration {
        Duration::from_millis(self.interval_ms)
    }

    pub fn http_options(&self) -> HttpOptions {
        HttpOptions {
            timeout: Duration::from_millis(self.request_timeout_ms),
            user_agent: self.user_agent.clone(),
        }
    }
}

fn is_loopback(url: &Url) -> bool {
    match url.host_str() {
        Some("localhost") => true,
        Some(host) => host
            .trim_start_matches('[')
            .trim_end_matches(']')
            .parse::<IpAddr>()
            .map(|ip| ip.is_loopback())
            .unwrap_or(false),
        None => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn with_endpoint(endpoint: &str) -> UserConfig {
        UserConfig {
            endpoint: endpoint.to_string(),
            ..UserConfig::default()
        }
    }

    #[test]
    fn test_defaults_are_valid() {
        let config = UserConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.interval(), Duration::from_secs(30));
        assert_eq!(config.http_options().timeout, Duration::from_secs(10));
    }

    #[test]
    fn test_empty_file_gives_defaults() {
        let config: UserConfig = toml::from_str("").unwrap();
        assert_eq!(config, UserConfig::default());
    }

    #[test]
    fn test_partial_file() {
        let config: UserConfig = toml::from_str(
            r#"
            endpoint = "https://example.com/api/now-playing"
            interval_ms = 3000
            wave_bars = false
            "#,
        )
        .unwrap();
        assert_eq!(config.interval_ms, 3000);
        assert!(!config.wave_bars);
        assert_eq!(config.header, "Now Playing On Spotify");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_zero_interval_rejected() {
        let config = UserConfig {
            interval_ms: 0,
            ..UserConfig::default()
        };
        assert!(matches!(config.validate(), Err(ConfigError::ZeroInterval)));
    }

    #[test]
    fn test_endpoint_schemes() {
        assert!(with_endpoint("https://spot.example.dev/np").validate().is_ok());
        assert!(with_endpoint("http://localhost:8080/np").validate().is_ok());
        assert!(with_endpoint("http://127.0.0.1:8080/np").validate().is_ok());
        assert!(with_endpoint("http://[::1]:8080/np").validate().is_ok());

        for bad in ["http://spot.example.dev/np", "ftp://example.com", "not a url", "/now-playing"] {
            assert!(
                matches!(
                    with_endpoint(bad).validate(),
                    Err(ConfigError::InvalidEndpoint { .. })
                ),
                "{} should be rejected",
                bad
            );
        }
    }

    #[test]
    fn test_default_config_round_trips_through_toml() {
        let text = toml::to_string_pretty(&UserConfig::default()).unwrap();
        let back: UserConfig = toml::from_str(&text).unwrap();
        assert_eq!(back, UserConfig::default());
    }
}
