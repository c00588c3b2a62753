//! Configuration error types

use thiserror::Error;

/// Configuration result type
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Configuration errors
#[derive(Error, Debug)]
pub enum ConfigError {
    /// IO error reading an environment file
    #[error("Failed to read environment file: {0}")]
    FileReadError(#[from] std::io::Error),

    /// YAML parsing error
    #[error("Failed to parse environment file: {0}")]
    ParseError(#[from] serde_yaml::Error),

    /// A base setting with no safe default was not provided
    #[error("Missing required input: {name}")]
    MissingRequiredInput { name: String },

    /// Environment variable error
    #[error("Environment variable error: {0}")]
    EnvError(String),

    /// Domain-specific configuration error
    #[error("Domain configuration error in {domain}: {message}")]
    DomainError { domain: String, message: String },
}

impl ConfigError {
    /// Whether the process must refuse to start on this error
    pub fn is_fatal(&self) -> bool {
        matches!(
            self,
            ConfigError::MissingRequiredInput { .. } | ConfigError::DomainError { .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_input_message() {
        let err = ConfigError::MissingRequiredInput {
            name: "DATABASE_URL".to_string(),
        };
        assert_eq!(err.to_string(), "Missing required input: DATABASE_URL");
        assert!(err.is_fatal());
    }

    #[test]
    fn test_env_error_not_fatal() {
        assert!(!ConfigError::EnvError("bad".to_string()).is_fatal());
    }

    #[test]
    fn test_file_errors_not_fatal() {
        let err = ConfigError::from(std::io::Error::new(
            std::io::ErrorKind::NotFound,
            "missing",
        ));
        assert!(matches!(err, ConfigError::FileReadError(_)));
        assert!(!err.is_fatal());

        let err = ConfigError::DomainError {
            domain: "base".to_string(),
            message: "bad".to_string(),
        };
        assert!(err.is_fatal());
    }
}
