//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Required provider settings are present
//! - Validate value ranges (timeouts > 0, ports valid)
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: ControlConfig → Result<(), Vec<ValidationError>>
//! - Runs before config is accepted into the system

use thiserror::Error;

use crate::config::schema::ControlConfig;

const LOG_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];

/// A single semantic problem with a configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// A required setting is empty. Carries the environment variable name.
    #[error("{0} is required")]
    Missing(&'static str),

    #[error("request timeout must be greater than zero")]
    ZeroTimeout,

    #[error("listener port must be greater than zero")]
    ZeroPort,

    #[error("unknown log level '{0}'")]
    UnknownLogLevel(String),
}

/// Check a parsed configuration, collecting every problem found.
pub fn validate_config(config: &ControlConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    let provider = &config.provider;
    let required = [
        (&provider.access_key_id, "AWS_ACCESS_KEY_ID"),
        (&provider.secret_access_key, "AWS_SECRET_ACCESS_KEY"),
        (&provider.region, "AWS_REGION"),
        (&provider.instance_name, "LIGHTSAIL_INSTANCE_NAME"),
    ];
    for (value, var) in required {
        if value.trim().is_empty() {
            errors.push(ValidationError::Missing(var));
        }
    }

    if config.timeouts.request_secs == 0 {
        errors.push(ValidationError::ZeroTimeout);
    }

    if config.listener.port == 0 {
        errors.push(ValidationError::ZeroPort);
    }

    let level = config.observability.log_level.to_ascii_lowercase();
    if !LOG_LEVELS.contains(&level.as_str()) {
        errors.push(ValidationError::UnknownLogLevel(
            config.observability.log_level.clone(),
        ));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
