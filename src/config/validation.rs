//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Check the base URL is an absolute http(s) URL
//! - Validate value ranges (timeouts > 0)
//! - Reject empty whitelist and host entries
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: ClientConfig → Result<(), Vec<ValidationError>>
//! - Runs before config is accepted into the system

use thiserror::Error;
use url::Url;

use crate::config::schema::ClientConfig;

/// A single semantic problem in a configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("base_url '{value}' is not a valid http(s) URL: {reason}")]
    InvalidBaseUrl { value: String, reason: String },

    #[error("auth_whitelist entry {index} is empty")]
    EmptyWhitelistEntry { index: usize },

    #[error("transport.{field} must be greater than zero")]
    ZeroTimeout { field: &'static str },

    #[error("transport.allowed_hosts entry {index} is empty")]
    EmptyAllowedHost { index: usize },
}

/// Validate a configuration, collecting every error.
pub fn validate_config(config: &ClientConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    // An empty base URL is allowed: callers may use absolute paths only.
    if !config.base_url.is_empty() {
        match Url::parse(&config.base_url) {
            Ok(url) if url.scheme() == "http" || url.scheme() == "https" => {}
            Ok(url) => errors.push(ValidationError::InvalidBaseUrl {
                value: config.base_url.clone(),
                reason: format!("unsupported scheme '{}'", url.scheme()),
            }),
            Err(e) => errors.push(ValidationError::InvalidBaseUrl {
                value: config.base_url.clone(),
                reason: e.to_string(),
            }),
        }
    }

    for (index, entry) in config.auth_whitelist.iter().enumerate() {
        if entry.trim().is_empty() {
            errors.push(ValidationError::EmptyWhitelistEntry { index });
        }
    }

    if config.transport.timeout_secs == 0 {
        errors.push(ValidationError::ZeroTimeout { field: "timeout_secs" });
    }
    if config.transport.connect_timeout_secs == 0 {
        errors.push(ValidationError::ZeroTimeout { field: "connect_timeout_secs" });
    }

    for (index, host) in config.transport.allowed_hosts.iter().enumerate() {
        if host.trim().is_empty() {
            errors.push(ValidationError::EmptyAllowedHost { index });
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
