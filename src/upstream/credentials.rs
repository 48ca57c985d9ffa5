//! Credential resolution
//!
//! Per-request arguments win over the process defaults in [`Config`]. A
//! credential that is absent from both is a configuration error for that call
//! only; the service itself keeps running.

use std::fmt;

use serde_json::{Map, Value};

use super::operation::Family;
use crate::{
    config::Config,
    error::{ToolError, ToolResult},
};

const DOMAIN_ARG: &str = "domain";
const API_TOKEN_ARG: &str = "apiToken";
const SITE_URL_ARG: &str = "siteUrl";
const USERNAME_ARG: &str = "username";
const PASSWORD_ARG: &str = "password";
const CONSUMER_KEY_ARG: &str = "consumerKey";
const CONSUMER_SECRET_ARG: &str = "consumerSecret";

const FAKTUROWNIA_ARGS: &[(&str, &str)] = &[
    (DOMAIN_ARG, "Fakturownia account domain (overrides FAKTUROWNIA_DOMAIN)"),
    (API_TOKEN_ARG, "Fakturownia API token (overrides FAKTUROWNIA_API_TOKEN)"),
];
const WORDPRESS_ARGS: &[(&str, &str)] = &[
    (SITE_URL_ARG, "WordPress site URL (overrides WORDPRESS_SITE_URL)"),
    (USERNAME_ARG, "WordPress username (overrides WORDPRESS_USERNAME)"),
    (PASSWORD_ARG, "WordPress application password (overrides WORDPRESS_PASSWORD)"),
];
const WOOCOMMERCE_ARGS: &[(&str, &str)] = &[
    (SITE_URL_ARG, "WordPress site URL (overrides WORDPRESS_SITE_URL)"),
    (CONSUMER_KEY_ARG, "WooCommerce consumer key (overrides WOOCOMMERCE_CONSUMER_KEY)"),
    (CONSUMER_SECRET_ARG, "WooCommerce consumer secret (overrides WOOCOMMERCE_CONSUMER_SECRET)"),
];

/// Optional per-call credential arguments for `family`, with descriptions
pub fn credential_args(family: Family) -> &'static [(&'static str, &'static str)] {
    match family {
        Family::Fakturownia => FAKTUROWNIA_ARGS,
        Family::WordPress => WORDPRESS_ARGS,
        Family::WooCommerce => WOOCOMMERCE_ARGS,
    }
}

/// How a request is authenticated against the upstream API
#[derive(Clone, PartialEq, Eq)]
pub enum UpstreamAuth {
    /// `api_token` appended to the query string
    QueryToken { token: String },
    /// HTTP Basic
    Basic { username: String, password: String },
    /// `consumer_key` / `consumer_secret` appended to the query string
    ConsumerKey { key: String, secret: String },
}

impl fmt::Debug for UpstreamAuth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UpstreamAuth::QueryToken { .. } => f.write_str("QueryToken(<redacted>)"),
            UpstreamAuth::Basic { username, .. } => {
                write!(f, "Basic({}:<redacted>)", username)
            }
            UpstreamAuth::ConsumerKey { .. } => f.write_str("ConsumerKey(<redacted>)"),
        }
    }
}

/// Resolved base URL and authentication for one call
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpstreamTarget {
    pub base_url: String,
    pub auth: UpstreamAuth,
}

/// Resolve the target for `family` from call arguments, falling back to `config`
pub fn resolve(family: Family, args: &Map<String, Value>, config: &Config) -> ToolResult<UpstreamTarget> {
    match family {
        Family::Fakturownia => resolve_fakturownia(args, config),
        Family::WordPress => {
            let site = site_url(args, config)?;
            let username = pick(args, USERNAME_ARG, &config.wordpress.username);
            let password = pick(args, PASSWORD_ARG, &config.wordpress.password);
            let (Some(username), Some(password)) = (username, password) else {
                return Err(not_provided("WordPress credentials"));
            };
            Ok(UpstreamTarget {
                base_url: format!("{}/wp-json/wp/v2", site),
                auth: UpstreamAuth::Basic { username, password },
            })
        }
        Family::WooCommerce => {
            let site = site_url(args, config)?;
            let key = pick(args, CONSUMER_KEY_ARG, &config.wordpress.consumer_key);
            let secret = pick(args, CONSUMER_SECRET_ARG, &config.wordpress.consumer_secret);
            let (Some(key), Some(secret)) = (key, secret) else {
                return Err(not_provided("WooCommerce API credentials"));
            };
            Ok(UpstreamTarget {
                base_url: format!("{}/wp-json/wc/v3", site),
                auth: UpstreamAuth::ConsumerKey { key, secret },
            })
        }
    }
}

fn resolve_fakturownia(args: &Map<String, Value>, config: &Config) -> ToolResult<UpstreamTarget> {
    let defaults = &config.fakturownia;
    let domain =
        pick(args, DOMAIN_ARG, &defaults.domain).ok_or_else(|| not_provided("Fakturownia domain"))?;
    let token =
        pick(args, API_TOKEN_ARG, &defaults.api_token).ok_or_else(|| not_provided("Fakturownia API token"))?;

    // The domain becomes part of the host name.
    if !domain.chars().all(|c| c.is_ascii_alphanumeric() || c == '-') {
        return Err(ToolError::Configuration(format!(
            "Invalid Fakturownia domain: {}",
            domain
        )));
    }

    let base_url = defaults.base_url_template.replace("{domain}", &domain);
    Ok(UpstreamTarget {
        base_url: base_url.trim_end_matches('/').to_string(),
        auth: UpstreamAuth::QueryToken { token },
    })
}

fn site_url(args: &Map<String, Value>, config: &Config) -> ToolResult<String> {
    pick(args, SITE_URL_ARG, &config.wordpress.site_url)
        .map(|site| site.trim_end_matches('/').to_string())
        .ok_or_else(|| not_provided("WordPress site URL"))
}

/// Non-empty string argument, else the configured default
fn pick(args: &Map<String, Value>, arg: &str, default: &Option<String>) -> Option<String> {
    args.get(arg)
        .and_then(Value::as_str)
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .or_else(|| default.clone())
}

fn not_provided(what: &str) -> ToolError {
    ToolError::Configuration(format!(
        "{} not provided in environment variables or request parameters",
        what
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn args(value: Value) -> Map<String, Value> {
        value.as_object().cloned().unwrap()
    }

    fn config_with_fakturownia() -> Config {
        let mut config = Config::default();
        config.fakturownia.domain = Some("acme".into());
        config.fakturownia.api_token = Some("env-token".into());
        config
    }

    #[test]
    fn fakturownia_uses_defaults_when_args_are_absent() {
        let target = resolve(Family::Fakturownia, &Map::new(), &config_with_fakturownia()).unwrap();
        assert_eq!(target.base_url, "https://acme.fakturownia.pl");
        assert_eq!(
            target.auth,
            UpstreamAuth::QueryToken {
                token: "env-token".into()
            }
        );
    }

    #[test]
    fn request_arguments_override_defaults() {
        let target = resolve(
            Family::Fakturownia,
            &args(json!({ "domain": "other", "apiToken": "call-token" })),
            &config_with_fakturownia(),
        )
        .unwrap();
        assert_eq!(target.base_url, "https://other.fakturownia.pl");
        assert_eq!(
            target.auth,
            UpstreamAuth::QueryToken {
                token: "call-token".into()
            }
        );
    }

    #[test]
    fn missing_domain_is_a_configuration_error() {
        let err = resolve(Family::Fakturownia, &Map::new(), &Config::default()).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Fakturownia domain not provided in environment variables or request parameters"
        );
    }

    #[test]
    fn empty_argument_falls_back_to_default() {
        let target = resolve(
            Family::Fakturownia,
            &args(json!({ "domain": "" })),
            &config_with_fakturownia(),
        )
        .unwrap();
        assert_eq!(target.base_url, "https://acme.fakturownia.pl");
    }

    #[test]
    fn domain_with_host_characters_is_rejected() {
        let err = resolve(
            Family::Fakturownia,
            &args(json!({ "domain": "evil.example.com/x" })),
            &config_with_fakturownia(),
        )
        .unwrap_err();
        assert!(matches!(err, ToolError::Configuration(_)));
    }

    #[test]
    fn wordpress_and_woocommerce_share_the_site_url() {
        let mut config = Config::default();
        config.wordpress.site_url = Some("https://shop.example/".into());
        config.wordpress.username = Some("admin".into());
        config.wordpress.password = Some("pw".into());
        config.wordpress.consumer_key = Some("ck".into());
        config.wordpress.consumer_secret = Some("cs".into());

        let wp = resolve(Family::WordPress, &Map::new(), &config).unwrap();
        assert_eq!(wp.base_url, "https://shop.example/wp-json/wp/v2");

        let woo = resolve(Family::WooCommerce, &Map::new(), &config).unwrap();
        assert_eq!(woo.base_url, "https://shop.example/wp-json/wc/v3");
        assert_eq!(
            woo.auth,
            UpstreamAuth::ConsumerKey {
                key: "ck".into(),
                secret: "cs".into()
            }
        );
    }

    #[test]
    fn woocommerce_requires_both_keys() {
        let mut config = Config::default();
        config.wordpress.site_url = Some("https://shop.example".into());
        config.wordpress.consumer_key = Some("ck".into());
        let err = resolve(Family::WooCommerce, &Map::new(), &config).unwrap_err();
        assert!(err.to_string().starts_with("WooCommerce API credentials not provided"));
    }

    #[test]
    fn debug_output_hides_secrets() {
        let auth = UpstreamAuth::Basic {
            username: "admin".into(),
            password: "hunter2".into(),
        };
        let rendered = format!("{:?}", auth);
        assert!(rendered.contains("admin"));
        assert!(!rendered.contains("hunter2"));
    }
}
