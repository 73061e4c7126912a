//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Validate value ranges (attempts >= 1, ports non-zero)
//! - Check that TLS settings are complete
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: ClientConfig → Result<(), Vec<ValidationError>>

use crate::config::schema::ClientConfig;

/// A single semantic problem in the configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    pub field: &'static str,
    pub message: String,
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// Validate a loaded configuration.
pub fn validate_config(config: &ClientConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();
    let mut fail = |field: &'static str, message: &str| {
        errors.push(ValidationError {
            field,
            message: message.to_string(),
        })
    };

    if config.connection.host.trim().is_empty() {
        fail("connection.host", "must not be empty");
    }
    if config.connection.port == 0 {
        fail("connection.port", "must be non-zero");
    }
    if config.connection.port_internal == 0 {
        fail("connection.port_internal", "must be non-zero");
    }
    if config.connection.node_id.is_some() && config.connection.certificate_file.is_none() {
        fail(
            "connection.certificate_file",
            "is required when node_id is set",
        );
    }
    if config.retries.max_attempts == 0 {
        fail("retries.max_attempts", "must be at least 1");
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
