//! Error types for coinaddr core
//!
//! Every codec operation reports failure through [`Error`]; nothing panics on
//! caller input.

use std::fmt;

/// Result type
pub type Result<T> = std::result::Result<T, Error>;

/// Codec errors
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    /// The network lacks the prefix or HRP the requested encoding needs
    #[error("Unsupported by network: {0}")]
    ConfigurationUnsupported(String),

    /// Checksum mismatch, bad character, bad length or foreign prefix
    #[error("Malformed input: {0}")]
    DecodeMalformed(String),

    /// Structurally valid payload with a type or version code that maps to no address variant
    #[error("Unrecognized variant code: {0}")]
    UnrecognizedVariantCode(String),

    /// WIF payload is well formed but the scalar is not a valid secret key
    #[error("Key validation failed: {0}")]
    KeyValidationFailed(String),
}

impl Error {
    /// Check if error stems from caller input (vs network configuration)
    pub fn is_user_error(&self) -> bool {
        !matches!(self, Error::ConfigurationUnsupported(_))
    }

    /// Get error category for logging
    pub fn category(&self) -> ErrorCategory {
        match self {
            Error::ConfigurationUnsupported(_) => ErrorCategory::Configuration,
            Error::DecodeMalformed(_) | Error::UnrecognizedVariantCode(_) => ErrorCategory::Input,
            Error::KeyValidationFailed(_) => ErrorCategory::Keys,
        }
    }
}

/// Error categories for classification
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    /// Network profile cannot express the request
    Configuration,
    /// Rejected caller input
    Input,
    /// Secret key problems
    Keys,
}

impl fmt::Display for ErrorCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ErrorCategory::Configuration => write!(f, "Configuration"),
            ErrorCategory::Input => write!(f, "Input"),
            ErrorCategory::Keys => write!(f, "Keys"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_error_detection() {
        assert!(Error::DecodeMalformed("test".to_string()).is_user_error());
        assert!(Error::UnrecognizedVariantCode("test".to_string()).is_user_error());
        assert!(Error::KeyValidationFailed("test".to_string()).is_user_error());
        assert!(!Error::ConfigurationUnsupported("test".to_string()).is_user_error());
    }

    #[test]
    fn test_error_categories() {
        assert_eq!(
            Error::ConfigurationUnsupported("test".to_string()).category(),
            ErrorCategory::Configuration
        );
        assert_eq!(
            Error::UnrecognizedVariantCode("test".to_string()).category(),
            ErrorCategory::Input
        );
        assert_eq!(
            Error::KeyValidationFailed("test".to_string()).category(),
            ErrorCategory::Keys
        );
    }

    #[test]
    fn test_display() {
        let error = Error::DecodeMalformed("bad checksum".to_string());
        assert_eq!(error.to_string(), "Malformed input: bad checksum");
        assert_eq!(ErrorCategory::Keys.to_string(), "Keys");
    }
}
