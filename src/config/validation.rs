//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Validate value ranges (timeouts and intervals > 0)
//! - Check that URLs and bind addresses parse
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: DashboardConfig → Result<(), Vec<ValidationError>>
//! - Runs after CLI overrides are applied, before anything starts

use std::net::SocketAddr;

use thiserror::Error;
use url::Url;

use crate::config::schema::DashboardConfig;
use crate::fetch::client::status_url;

const LOG_LEVELS: &[&str] = &["trace", "debug", "info", "warn", "error"];

/// A single semantic problem in the configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("source.base_url '{0}' is not an absolute http(s) URL")]
    InvalidBaseUrl(String),

    #[error("source.status_path must not be empty")]
    EmptyStatusPath,

    #[error("source.status_path '{0}' does not resolve against base_url")]
    InvalidStatusPath(String),

    #[error("{0} must be greater than zero")]
    Zero(&'static str),

    #[error("{field} '{value}' is not a valid socket address")]
    InvalidAddress { field: &'static str, value: String },

    #[error("observability.log_level '{0}' is not one of trace, debug, info, warn, error")]
    InvalidLogLevel(String),
}

/// Check a parsed configuration.
pub fn validate_config(config: &DashboardConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    match Url::parse(&config.source.base_url) {
        Ok(url) if matches!(url.scheme(), "http" | "https") => {}
        _ => errors.push(ValidationError::InvalidBaseUrl(config.source.base_url.clone())),
    }

    if config.source.status_path.trim().is_empty() {
        errors.push(ValidationError::EmptyStatusPath);
    } else if Url::parse(&config.source.base_url).is_ok()
        && status_url(&config.source.base_url, &config.source.status_path).is_err()
    {
        errors.push(ValidationError::InvalidStatusPath(config.source.status_path.clone()));
    }

    if config.source.timeout_ms == 0 {
        errors.push(ValidationError::Zero("source.timeout_ms"));
    }

    if config.refresh.interval_ms == 0 {
        errors.push(ValidationError::Zero("refresh.interval_ms"));
    }

    if config.server.enabled {
        if config.server.bind_address.parse::<SocketAddr>().is_err() {
            errors.push(ValidationError::InvalidAddress {
                field: "server.bind_address",
                value: config.server.bind_address.clone(),
            });
        }
        if config.server.request_timeout_secs == 0 {
            errors.push(ValidationError::Zero("server.request_timeout_secs"));
        }
    }

    if config.observability.metrics_enabled
        && config.observability.metrics_address.parse::<SocketAddr>().is_err()
    {
        errors.push(ValidationError::InvalidAddress {
            field: "observability.metrics_address",
            value: config.observability.metrics_address.clone(),
        });
    }

    if !LOG_LEVELS.contains(&config.observability.log_level.to_ascii_lowercase().as_str()) {
        errors.push(ValidationError::InvalidLogLevel(config.observability.log_level.clone()));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
