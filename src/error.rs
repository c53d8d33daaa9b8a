//! Error types for the introduction validator.
//!
//! Rule violations found in an introduction are never errors here; they are
//! data carried by `ValidationResult`. These types cover the surrounding
//! infrastructure: configuration, outbound messaging, and the webhook relay.

/// Configuration-related errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid configuration value for {key}: {message}")]
    InvalidValue { key: String, message: String },

    #[error("Failed to parse taxonomy file {path}: {reason}")]
    Taxonomy { path: String, reason: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Outbound messaging errors.
#[derive(Debug, thiserror::Error)]
pub enum ChannelError {
    #[error("Failed to send response on channel {name}: {reason}")]
    SendFailed { name: String, reason: String },

    #[error("HTTP error: {0}")]
    Http(String),
}

/// Webhook relay errors.
#[derive(Debug, thiserror::Error)]
pub enum RelayError {
    #[error("Failed to bind {addr}: {reason}")]
    Bind { addr: String, reason: String },

    #[error("Server error: {0}")]
    Serve(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_value_names_key() {
        let err = ConfigError::InvalidValue {
            key: "PORT".into(),
            message: "expected a port number, got \"abc\"".into(),
        };
        assert_eq!(
            err.to_string(),
            "Invalid configuration value for PORT: expected a port number, got \"abc\""
        );
    }

    #[test]
    fn io_error_converts() {
        let err: ConfigError = std::io::Error::new(std::io::ErrorKind::NotFound, "gone").into();
        assert!(matches!(err, ConfigError::Io(_)));
    }

    #[test]
    fn send_failed_names_channel() {
        let err = ChannelError::SendFailed {
            name: "whatsapp".into(),
            reason: "401 Unauthorized".into(),
        };
        assert!(err.to_string().contains("whatsapp"));
        assert!(err.to_string().contains("401"));
    }
}
