//! Configuration loading from disk and environment.

use std::env;
use std::fs;
use std::path::Path;

use thiserror::Error;

use crate::config::schema::GatewayConfig;
use crate::config::validation::{validate_config, ValidationError};

/// Environment variables that override file values.
const ENV_BIND: &str = "NEWS_GATEWAY_BIND";
const ENV_NEWS_URL: &str = "NEWS_GATEWAY_NEWS_URL";
const ENV_COMMENTS_URL: &str = "NEWS_GATEWAY_COMMENTS_URL";
const ENV_CENSOR_URL: &str = "NEWS_GATEWAY_CENSOR_URL";

/// Error type for configuration loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Parse error: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation failed: {}", format_errors(.0))]
    Validation(Vec<ValidationError>),
}

fn format_errors(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Load configuration from an optional TOML file, apply environment
/// overrides, and validate the result.
pub fn load_config(path: Option<&Path>) -> Result<GatewayConfig, ConfigError> {
    let mut config = match path {
        Some(path) => {
            let content = fs::read_to_string(path)?;
            toml::from_str(&content)?
        }
        None => GatewayConfig::default(),
    };

    apply_env_overrides(&mut config);

    validate_config(&config).map_err(ConfigError::Validation)?;

    Ok(config)
}

fn apply_env_overrides(config: &mut GatewayConfig) {
    if let Ok(bind) = env::var(ENV_BIND) {
        config.listener.bind_address = bind;
    }
    if let Ok(news) = env::var(ENV_NEWS_URL) {
        config.backends.news = news;
    }
    if let Ok(comments) = env::var(ENV_COMMENTS_URL) {
        config.backends.comments = comments;
    }
    if let Ok(censor) = env::var(ENV_CENSOR_URL) {
        config.backends.censor = Some(censor);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_toml_round_trip() {
        let content = r#"
            [listener]
            bind_address = "127.0.0.1:9000"

            [backends]
            news = "http://news:8081"
            comments = "http://comments:8082"
            censor = "http://censor:8083"

            [timeouts]
            request_secs = 15
            upstream_secs = 5

            [limits]
            max_body_bytes = 4096
        "#;

        let config: GatewayConfig = toml::from_str(content).unwrap();
        assert_eq!(config.listener.bind_address, "127.0.0.1:9000");
        assert_eq!(config.backends.news, "http://news:8081");
        assert_eq!(config.backends.censor.as_deref(), Some("http://censor:8083"));
        assert_eq!(config.timeouts.upstream_secs, 5);
        assert_eq!(config.limits.max_body_bytes, 4096);
        // Untouched section falls back to defaults.
        assert_eq!(config.observability.log_level, "info");
    }

    #[test]
    fn test_partial_file_uses_defaults() {
        let config: GatewayConfig = toml::from_str("[listener]\nbind_address = \"0.0.0.0:80\"\n").unwrap();
        assert_eq!(config.listener.bind_address, "0.0.0.0:80");
        assert_eq!(config.timeouts.request_secs, 30);
    }
}
