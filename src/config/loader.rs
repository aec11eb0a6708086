//! Configuration loading from disk and the process environment.

use std::fs;
use std::path::Path;

use crate::config::schema::ControlConfig;
use crate::config::validation::{validate_config, ValidationError};

/// Error type for configuration loading.
#[derive(Debug)]
pub enum ConfigError {
    Io(std::io::Error),
    Parse(toml::de::Error),
    Env { var: &'static str, reason: String },
    Validation(Vec<ValidationError>),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::Io(e) => write!(f, "IO error: {}", e),
            ConfigError::Parse(e) => write!(f, "Parse error: {}", e),
            ConfigError::Env { var, reason } => write!(f, "Invalid {}: {}", var, reason),
            ConfigError::Validation(errors) => {
                write!(f, "Validation failed: ")?;
                for (i, err) in errors.iter().enumerate() {
                    if i > 0 { write!(f, ", ")?; }
                    write!(f, "{}", err)?;
                }
                Ok(())
            }
        }
    }
}

impl std::error::Error for ConfigError {}

/// Parse configuration from a TOML file without validating it.
pub fn load_config(path: &Path) -> Result<ControlConfig, ConfigError> {
    let content = fs::read_to_string(path).map_err(ConfigError::Io)?;
    toml::from_str(&content).map_err(ConfigError::Parse)
}

/// Overlay environment variables on top of `config`.
///
/// `lookup` is usually `|k| std::env::var(k).ok()`; empty values are treated as unset.
pub fn apply_env_overrides<F>(mut config: ControlConfig, lookup: F) -> Result<ControlConfig, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    let get = |var: &str| lookup(var).filter(|v| !v.trim().is_empty());

    if let Some(host) = get("HOST") {
        config.listener.host = host;
    }
    if let Some(port) = get("PORT") {
        config.listener.port = port.trim().parse::<u16>().map_err(|e: std::num::ParseIntError| {
            ConfigError::Env { var: "PORT", reason: e.to_string() }
        })?;
    }

    if let Some(v) = get("AWS_ACCESS_KEY_ID") {
        config.provider.access_key_id = v;
    }
    if let Some(v) = get("AWS_SECRET_ACCESS_KEY") {
        config.provider.secret_access_key = v;
    }
    if let Some(v) = get("AWS_REGION") {
        config.provider.region = v;
    }
    if let Some(v) = get("LIGHTSAIL_INSTANCE_NAME") {
        config.provider.instance_name = v;
    }
    if let Some(v) = get("AWS_ENDPOINT_URL") {
        config.provider.endpoint_url = Some(v);
    }

    if let Some(secs) = get("REQUEST_TIMEOUT_SECS") {
        config.timeouts.request_secs = secs.trim().parse::<u64>().map_err(|e: std::num::ParseIntError| {
            ConfigError::Env { var: "REQUEST_TIMEOUT_SECS", reason: e.to_string() }
        })?;
    }

    if let Some(level) = get("LOG_LEVEL") {
        config.observability.log_level = level;
    }
    if let Some(format) = get("LOG_FORMAT") {
        config.observability.log_format = format
            .parse()
            .map_err(|reason| ConfigError::Env { var: "LOG_FORMAT", reason })?;
    }

    Ok(config)
}

/// Build the effective configuration: file (or defaults), then environment, then validation.
pub fn load<F>(path: Option<&Path>, lookup: F) -> Result<ControlConfig, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    let base = match path {
        Some(path) => load_config(path)?,
        None => ControlConfig::default(),
    };
    let config = apply_env_overrides(base, lookup)?;
    validate_config(&config).map_err(ConfigError::Validation)?;
    Ok(config)
}
