//! Layered error definitions
//!
//! Categorized by source: config / manifest / markup

use thiserror::Error;

/// Unified error type
#[derive(Debug, Error)]
pub enum ContractError {
    // ===== Configuration Errors =====
    /// Configuration parse error
    #[error("config parse error: {message}")]
    ConfigParse {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Configuration validation error
    #[error("config validation error at '{field}': {message}")]
    ConfigValidation { field: String, message: String },

    // ===== Manifest Errors =====
    /// Manifest could not be fetched (network failure, timeout, non-2xx)
    #[error("manifest unavailable at '{url}': {message}")]
    ManifestUnavailable { url: String, message: String },

    /// Manifest was fetched but is not a JSON array of strings
    #[error("manifest at '{url}' has unexpected shape: {message}")]
    ManifestShape { url: String, message: String },

    // ===== General Errors =====
    /// IO error
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// Other error
    #[error("{0}")]
    Other(String),
}

impl ContractError {
    /// Create configuration parse error
    pub fn config_parse(message: impl Into<String>) -> Self {
        Self::ConfigParse {
            message: message.into(),
            source: None,
        }
    }

    /// Create configuration validation error
    pub fn config_validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::ConfigValidation {
            field: field.into(),
            message: message.into(),
        }
    }

    /// Create manifest unavailable error
    pub fn manifest_unavailable(url: impl Into<String>, message: impl Into<String>) -> Self {
        Self::ManifestUnavailable {
            url: url.into(),
            message: message.into(),
        }
    }

    /// Create manifest shape error
    pub fn manifest_shape(url: impl Into<String>, message: impl Into<String>) -> Self {
        Self::ManifestShape {
            url: url.into(),
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_includes_context() {
        let err = ContractError::config_validation("carousels[0].root_id", "root_id cannot be empty");
        assert_eq!(
            err.to_string(),
            "config validation error at 'carousels[0].root_id': root_id cannot be empty"
        );

        let err = ContractError::manifest_unavailable("http://x/featured.json", "status 404");
        assert!(err.to_string().contains("featured.json"));
    }
}
