use super::models::Config;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("app.root must not be empty")]
    EmptyRoot,

    #[error("server.host '{host}' is not an IP address")]
    InvalidHost { host: String },
}

/// Validate the entire configuration
///
/// `server.host` is checked by [`ServerConfig::bind_addr`](super::ServerConfig::bind_addr)
/// when the engine binds.
pub fn validate(config: &Config) -> Result<(), ValidationError> {
    validate_app(config)?;
    Ok(())
}

fn validate_app(config: &Config) -> Result<(), ValidationError> {
    if config.app.root.as_os_str().is_empty() {
        return Err(ValidationError::EmptyRoot);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn create_test_config() -> Config {
        toml::from_str(
            r#"
[server]
host = "127.0.0.1"
port = 8080

[app]
root = "./app"
            "#,
        )
        .expect("Failed to parse test config")
    }

    #[test]
    fn test_valid_config() {
        assert!(validate(&create_test_config()).is_ok());
    }

    #[test]
    fn test_empty_root() {
        let mut config = create_test_config();
        config.app.root = PathBuf::new();

        let result = validate(&config);
        assert!(matches!(result, Err(ValidationError::EmptyRoot)));
    }

    #[test]
    fn test_hostname_passes_validation_but_cannot_bind() {
        let mut config = create_test_config();
        config.server.host = "localhost".to_string();

        assert!(validate(&config).is_ok());
        assert!(matches!(
            config.server.bind_addr(),
            Err(ValidationError::InvalidHost { ref host }) if host == "localhost"
        ));
    }
}
