//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Check backend URLs parse as absolute http(s) URLs with a host
//! - Validate value ranges (timeouts > 0, body limit > 0)
//!
//! # Design Decisions
//! - Returns all validation errors, not just the first
//! - Validation is a pure function: GatewayConfig → Result<(), Vec<ValidationError>>
//! - Runs before config is accepted into the system

use std::net::SocketAddr;

use thiserror::Error;
use url::Url;

use crate::config::schema::GatewayConfig;

/// A single semantic problem found in a configuration.
#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("listener.bind_address {0:?} is not a valid socket address")]
    InvalidBindAddress(String),

    #[error("backends.{name} URL {url:?} is invalid: {reason}")]
    InvalidBackendUrl {
        name: &'static str,
        url: String,
        reason: String,
    },

    #[error("timeouts.{0} must be greater than zero")]
    ZeroTimeout(&'static str),

    #[error("limits.max_body_bytes must be greater than zero")]
    ZeroBodyLimit,
}

/// Validate a configuration, collecting every problem found.
pub fn validate_config(config: &GatewayConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.listener.bind_address.parse::<SocketAddr>().is_err() {
        errors.push(ValidationError::InvalidBindAddress(
            config.listener.bind_address.clone(),
        ));
    }

    check_url("news", &config.backends.news, &mut errors);
    check_url("comments", &config.backends.comments, &mut errors);
    if let Some(censor) = &config.backends.censor {
        check_url("censor", censor, &mut errors);
    }

    if config.timeouts.request_secs == 0 {
        errors.push(ValidationError::ZeroTimeout("request_secs"));
    }
    if config.timeouts.upstream_secs == 0 {
        errors.push(ValidationError::ZeroTimeout("upstream_secs"));
    }
    if config.limits.max_body_bytes == 0 {
        errors.push(ValidationError::ZeroBodyLimit);
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

fn check_url(name: &'static str, raw: &str, errors: &mut Vec<ValidationError>) {
    match Url::parse(raw) {
        Ok(url) => {
            if !matches!(url.scheme(), "http" | "https") {
                errors.push(ValidationError::InvalidBackendUrl {
                    name,
                    url: raw.to_string(),
                    reason: format!("unsupported scheme {:?}", url.scheme()),
                });
            } else if url.host_str().is_none() {
                errors.push(ValidationError::InvalidBackendUrl {
                    name,
                    url: raw.to_string(),
                    reason: "missing host".to_string(),
                });
            }
        }
        Err(e) => errors.push(ValidationError::InvalidBackendUrl {
            name,
            url: raw.to_string(),
            reason: e.to_string(),
        }),
    }
}
