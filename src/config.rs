//! Process-wide configuration
//!
//! Read once at start-up and shared read-only with every request through
//! [`crate::state::AppState`]. Per-request tool arguments may override the
//! upstream credentials held here; see [`crate::upstream::credentials`].

use std::{env, fmt, time::Duration};

/// Default listen address (same port the server has always used locally)
pub const DEFAULT_BIND_ADDRESS: &str = "0.0.0.0:8000";
/// Where forwarding variants relay their calls unless overridden
pub const DEFAULT_CANONICAL_ENDPOINT_URL: &str =
    "http://127.0.0.1:8000/.netlify/functions/fakturownia-server";
/// Invoicing API base URL; `{domain}` is replaced by the resolved account domain
pub const DEFAULT_FAKTUROWNIA_BASE_URL: &str = "https://{domain}.fakturownia.pl";
/// Forward relay ceiling in seconds
pub const DEFAULT_FORWARD_TIMEOUT_SECS: u64 = 30;
/// Direct upstream call ceiling in seconds
pub const DEFAULT_UPSTREAM_TIMEOUT_SECS: u64 = 30;

/// Configuration loading errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid value for {key}: {reason}")]
    Invalid { key: &'static str, reason: String },
}

/// Log output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

/// Default credentials for the invoicing API
#[derive(Clone)]
pub struct FakturowniaDefaults {
    pub domain: Option<String>,
    pub api_token: Option<String>,
    /// Base URL template containing a `{domain}` placeholder
    pub base_url_template: String,
}

impl Default for FakturowniaDefaults {
    fn default() -> Self {
        Self {
            domain: None,
            api_token: None,
            base_url_template: DEFAULT_FAKTUROWNIA_BASE_URL.to_string(),
        }
    }
}

impl fmt::Debug for FakturowniaDefaults {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FakturowniaDefaults")
            .field("domain", &self.domain)
            .field("api_token", &redacted(&self.api_token))
            .field("base_url_template", &self.base_url_template)
            .finish()
    }
}

/// Default credentials for the WordPress and WooCommerce APIs
#[derive(Clone, Default)]
pub struct WordPressDefaults {
    pub site_url: Option<String>,
    pub username: Option<String>,
    pub password: Option<String>,
    pub consumer_key: Option<String>,
    pub consumer_secret: Option<String>,
}

impl fmt::Debug for WordPressDefaults {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WordPressDefaults")
            .field("site_url", &self.site_url)
            .field("username", &self.username)
            .field("password", &redacted(&self.password))
            .field("consumer_key", &redacted(&self.consumer_key))
            .field("consumer_secret", &redacted(&self.consumer_secret))
            .finish()
    }
}

fn redacted(secret: &Option<String>) -> &'static str {
    match secret {
        Some(_) => "<redacted>",
        None => "<unset>",
    }
}

/// Application configuration loaded from environment variables
#[derive(Debug, Clone)]
pub struct Config {
    // Server
    pub bind_address: String,
    pub log_format: LogFormat,

    // Forwarding
    pub canonical_endpoint_url: String,
    pub forward_timeout: Duration,

    // Upstream
    pub upstream_timeout: Duration,
    pub fakturownia: FakturowniaDefaults,
    pub wordpress: WordPressDefaults,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            bind_address: DEFAULT_BIND_ADDRESS.to_string(),
            log_format: LogFormat::default(),
            canonical_endpoint_url: DEFAULT_CANONICAL_ENDPOINT_URL.to_string(),
            forward_timeout: Duration::from_secs(DEFAULT_FORWARD_TIMEOUT_SECS),
            upstream_timeout: Duration::from_secs(DEFAULT_UPSTREAM_TIMEOUT_SECS),
            fakturownia: FakturowniaDefaults::default(),
            wordpress: WordPressDefaults::default(),
        }
    }
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build configuration from an arbitrary key lookup.
    ///
    /// Empty values are treated the same as missing ones.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let log_format = match get("LOG_FORMAT").as_deref() {
            None | Some("pretty") => LogFormat::Pretty,
            Some("json") => LogFormat::Json,
            Some(other) => {
                return Err(ConfigError::Invalid {
                    key: "LOG_FORMAT",
                    reason: format!("expected 'pretty' or 'json', got '{}'", other),
                })
            }
        };

        Ok(Self {
            // Server
            bind_address: get("BIND_ADDRESS").unwrap_or_else(|| DEFAULT_BIND_ADDRESS.to_string()),
            log_format,

            // Forwarding
            canonical_endpoint_url: get("CANONICAL_ENDPOINT_URL")
                .unwrap_or_else(|| DEFAULT_CANONICAL_ENDPOINT_URL.to_string()),
            forward_timeout: parse_secs(
                "FORWARD_TIMEOUT_SECS",
                get("FORWARD_TIMEOUT_SECS"),
                DEFAULT_FORWARD_TIMEOUT_SECS,
            )?,

            // Upstream
            upstream_timeout: parse_secs(
                "UPSTREAM_TIMEOUT_SECS",
                get("UPSTREAM_TIMEOUT_SECS"),
                DEFAULT_UPSTREAM_TIMEOUT_SECS,
            )?,
            fakturownia: FakturowniaDefaults {
                domain: get("FAKTUROWNIA_DOMAIN"),
                api_token: get("FAKTUROWNIA_API_TOKEN"),
                base_url_template: get("FAKTUROWNIA_BASE_URL")
                    .unwrap_or_else(|| DEFAULT_FAKTUROWNIA_BASE_URL.to_string()),
            },
            wordpress: WordPressDefaults {
                site_url: get("WORDPRESS_SITE_URL"),
                username: get("WORDPRESS_USERNAME"),
                password: get("WORDPRESS_PASSWORD"),
                consumer_key: get("WOOCOMMERCE_CONSUMER_KEY"),
                consumer_secret: get("WOOCOMMERCE_CONSUMER_SECRET"),
            },
        })
    }
}

fn parse_secs(key: &'static str, raw: Option<String>, default: u64) -> Result<Duration, ConfigError> {
    let Some(raw) = raw else {
        return Ok(Duration::from_secs(default));
    };
    match raw.trim().parse::<u64>() {
        Ok(0) => Err(ConfigError::Invalid {
            key,
            reason: "must be greater than zero".to_string(),
        }),
        Ok(secs) => Ok(Duration::from_secs(secs)),
        Err(e) => Err(ConfigError::Invalid {
            key,
            reason: e.to_string(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn defaults_apply_when_environment_is_empty() {
        let config = Config::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config.bind_address, DEFAULT_BIND_ADDRESS);
        assert_eq!(config.canonical_endpoint_url, DEFAULT_CANONICAL_ENDPOINT_URL);
        assert_eq!(config.forward_timeout, Duration::from_secs(30));
        assert_eq!(config.log_format, LogFormat::Pretty);
        assert!(config.fakturownia.domain.is_none());
        assert_eq!(config.fakturownia.base_url_template, DEFAULT_FAKTUROWNIA_BASE_URL);
    }

    #[test]
    fn empty_values_count_as_missing() {
        let config = Config::from_lookup(lookup(&[
            ("FAKTUROWNIA_DOMAIN", ""),
            ("WORDPRESS_SITE_URL", "   "),
        ]))
        .unwrap();
        assert!(config.fakturownia.domain.is_none());
        assert!(config.wordpress.site_url.is_none());
    }

    #[test]
    fn credentials_and_timeouts_are_read() {
        let config = Config::from_lookup(lookup(&[
            ("FAKTUROWNIA_DOMAIN", "acme"),
            ("FAKTUROWNIA_API_TOKEN", "tok"),
            ("FORWARD_TIMEOUT_SECS", "5"),
            ("LOG_FORMAT", "json"),
        ]))
        .unwrap();
        assert_eq!(config.fakturownia.domain.as_deref(), Some("acme"));
        assert_eq!(config.fakturownia.api_token.as_deref(), Some("tok"));
        assert_eq!(config.forward_timeout, Duration::from_secs(5));
        assert_eq!(config.log_format, LogFormat::Json);
    }

    #[test]
    fn invalid_timeout_is_rejected() {
        let err = Config::from_lookup(lookup(&[("UPSTREAM_TIMEOUT_SECS", "soon")])).unwrap_err();
        assert!(err.to_string().contains("UPSTREAM_TIMEOUT_SECS"));

        let err = Config::from_lookup(lookup(&[("FORWARD_TIMEOUT_SECS", "0")])).unwrap_err();
        assert!(err.to_string().contains("greater than zero"));
    }

    #[test]
    fn debug_output_hides_secrets() {
        let config = Config::from_lookup(lookup(&[
            ("FAKTUROWNIA_API_TOKEN", "super-secret"),
            ("WORDPRESS_PASSWORD", "hunter2"),
        ]))
        .unwrap();
        let rendered = format!("{:?}", config);
        assert!(!rendered.contains("super-secret"));
        assert!(!rendered.contains("hunter2"));
        assert!(rendered.contains("<redacted>"));
    }
}
