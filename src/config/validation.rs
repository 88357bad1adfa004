//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (parsing handles syntactic)
//! - Check the upstream base URL is an absolute http(s) URL
//! - Check the metrics address when metrics are enabled
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Missing credentials are not an error here; requests needing them fail with 500

use std::fmt;

use crate::config::schema::WebPlayerConfig;

/// A single semantic problem in the configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    pub field: &'static str,
    pub message: String,
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// Validate a loaded configuration.
pub fn validate_config(config: &WebPlayerConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    match url::Url::parse(&config.upstream.base_url) {
        Ok(url) if matches!(url.scheme(), "http" | "https") && url.host().is_some() => {}
        Ok(url) => errors.push(ValidationError {
            field: "upstream.base_url",
            message: format!("unsupported URL '{}' (expected http or https)", url),
        }),
        Err(e) => errors.push(ValidationError {
            field: "upstream.base_url",
            message: format!("'{}' is not a valid URL: {}", config.upstream.base_url, e),
        }),
    }

    if config.upstream.connect_timeout_secs == 0 {
        errors.push(ValidationError {
            field: "upstream.connect_timeout_secs",
            message: "must be greater than zero".to_string(),
        });
    }

    if config.observability.metrics_enabled && config.observability.metrics_socket_addr().is_none() {
        errors.push(ValidationError {
            field: "observability.metrics_address",
            message: format!("'{}' is not a socket address", config.observability.metrics_address),
        });
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
