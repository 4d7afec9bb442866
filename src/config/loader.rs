//! Configuration loading from disk and environment.

use std::fs;
use std::path::Path;

use thiserror::Error;

use crate::config::schema::RelayConfig;
use crate::config::validation::{validate_config, ValidationError};

/// Environment variable carrying the listening port.
pub const PORT_ENV: &str = "PORT";

/// Error type for configuration loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Parse error: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Invalid environment variable {name}=`{value}`")]
    InvalidEnv { name: &'static str, value: String },

    #[error("Validation failed: {}", join_errors(.0))]
    Validation(Vec<ValidationError>),
}

fn join_errors(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Parse a TOML file without validating it.
pub fn read_config(path: &Path) -> Result<RelayConfig, ConfigError> {
    let content = fs::read_to_string(path)?;
    Ok(toml::from_str(&content)?)
}

/// Apply environment overrides on top of file/default values.
///
/// `lookup` abstracts `std::env::var` so overrides can be exercised in tests.
pub fn apply_env_overrides<F>(config: &mut RelayConfig, lookup: F) -> Result<(), ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    if let Some(value) = lookup(PORT_ENV) {
        config.listener.port = value.trim().parse().map_err(|_| ConfigError::InvalidEnv {
            name: PORT_ENV,
            value,
        })?;
    }
    Ok(())
}

/// Load configuration: optional TOML file, then environment, then validation.
pub fn load_config(path: Option<&Path>) -> Result<RelayConfig, ConfigError> {
    let mut config = match path {
        Some(path) => read_config(path)?,
        None => RelayConfig::default(),
    };

    apply_env_overrides(&mut config, |name| std::env::var(name).ok())?;
    validate_config(&config).map_err(ConfigError::Validation)?;

    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn no_env(_: &str) -> Option<String> {
        None
    }

    #[test]
    fn port_env_overrides_file_value() {
        let mut config = RelayConfig::default();
        config.listener.port = 3000;

        apply_env_overrides(&mut config, |name| {
            (name == PORT_ENV).then(|| "8088".to_string())
        })
        .unwrap();

        assert_eq!(config.listener.port, 8088);
    }

    #[test]
    fn missing_env_keeps_value() {
        let mut config = RelayConfig::default();
        apply_env_overrides(&mut config, no_env).unwrap();
        assert_eq!(config.listener.port, 10_000);
    }

    #[test]
    fn garbage_port_is_rejected() {
        let mut config = RelayConfig::default();
        let err = apply_env_overrides(&mut config, |_| Some("ten-thousand".into())).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidEnv { name: PORT_ENV, .. }));
    }

    #[test]
    fn reads_toml_file() {
        let path = std::env::temp_dir().join(format!("relay-config-{}.toml", uuid::Uuid::new_v4()));
        let mut file = fs::File::create(&path).unwrap();
        writeln!(
            file,
            "[relay]\ndownstream_url = \"http://127.0.0.1:9999/raw\"\nforward_unmatched_posts = true"
        )
        .unwrap();

        let config = read_config(&path).unwrap();
        fs::remove_file(&path).unwrap();

        assert_eq!(config.relay.downstream_url, "http://127.0.0.1:9999/raw");
        assert!(config.relay.forward_unmatched_posts);
    }

    #[test]
    fn missing_file_is_io_error() {
        let err = read_config(Path::new("/definitely/not/here.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::Io(_)));
    }

    #[test]
    fn validation_errors_are_joined() {
        let err = ConfigError::Validation(vec![
            ValidationError::ZeroBodyLimit,
            ValidationError::ZeroPreview,
        ]);
        assert_eq!(
            err.to_string(),
            "Validation failed: listener.max_body_bytes must be greater than zero, \
             relay.body_preview_chars must be greater than zero"
        );
    }
}
