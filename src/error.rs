//! Error types and handling for the Aetheria dashboard core

use thiserror::Error;

/// Main error type for the Aetheria dashboard
#[derive(Error, Debug)]
pub enum AetheriaError {
    /// Configuration-related errors
    #[error("Configuration error: {message}")]
    Config { message: String },

    /// API communication errors
    #[error("API error: {message}")]
    Api { message: String },

    /// Input validation errors
    #[error("Invalid input: {message}")]
    Validation { message: String },

    /// Preference storage errors
    #[error("Storage error: {message}")]
    Storage { message: String },

    /// Device geolocation errors (denied, unsupported or timed out)
    #[error("Geolocation error: {message}")]
    Geolocation { message: String },

    /// I/O operation errors
    #[error("I/O error: {source}")]
    Io {
        #[from]
        source: std::io::Error,
    },

    /// General application errors
    #[error("Application error: {message}")]
    General { message: String },
}

impl AetheriaError {
    /// Create a new configuration error
    pub fn config<S: Into<String>>(message: S) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Create a new API error
    pub fn api<S: Into<String>>(message: S) -> Self {
        Self::Api {
            message: message.into(),
        }
    }

    /// Create a new validation error
    pub fn validation<S: Into<String>>(message: S) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    /// Create a new storage error
    pub fn storage<S: Into<String>>(message: S) -> Self {
        Self::Storage {
            message: message.into(),
        }
    }

    /// Create a new geolocation error
    pub fn geolocation<S: Into<String>>(message: S) -> Self {
        Self::Geolocation {
            message: message.into(),
        }
    }

    /// Create a new general error
    pub fn general<S: Into<String>>(message: S) -> Self {
        Self::General {
            message: message.into(),
        }
    }

    /// Get a user-friendly error message
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            AetheriaError::Config { .. } => {
                "Configuration error. Please check your config file.".to_string()
            }
            AetheriaError::Api { .. } => {
                "Unable to connect to external services. Please check your internet connection."
                    .to_string()
            }
            AetheriaError::Validation { message } => {
                format!("Invalid input: {message}")
            }
            AetheriaError::Storage { .. } => {
                "Could not read or write saved preferences.".to_string()
            }
            AetheriaError::Geolocation { .. } => {
                "Your position could not be determined.".to_string()
            }
            AetheriaError::Io { .. } => {
                "File operation failed. Please check file permissions.".to_string()
            }
            AetheriaError::General { message } => message.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_creation() {
        let config_err = AetheriaError::config("missing endpoint");
        assert!(matches!(config_err, AetheriaError::Config { .. }));

        let api_err = AetheriaError::api("connection failed");
        assert!(matches!(api_err, AetheriaError::Api { .. }));

        let geo_err = AetheriaError::geolocation("permission denied");
        assert!(matches!(geo_err, AetheriaError::Geolocation { .. }));
    }

    #[test]
    fn test_user_messages() {
        let config_err = AetheriaError::config("test");
        assert!(config_err.user_message().contains("Configuration error"));

        let api_err = AetheriaError::api("test");
        assert!(api_err.user_message().contains("Unable to connect"));

        let validation_err = AetheriaError::validation("test input");
        assert!(validation_err.user_message().contains("test input"));
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err: AetheriaError = io_err.into();
        assert!(matches!(err, AetheriaError::Io { .. }));
    }
}
