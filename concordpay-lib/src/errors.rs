//! Error types for ConcordPay operations.
//!
//! Missing fields during serialization are never errors; see
//! [`crate::signature::serialize`].

/// Error codes for FFI and host-integration layers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(i32)]
pub enum ConcordpayErrorCode {
    /// Secret key unavailable or unset
    Configuration = 1000,
    /// Signature did not match the recomputed value
    SignatureMismatch = 3000,
    /// Invalid field source or request payload
    Serialization = 5002,
    /// Internal/unexpected error
    Internal = 9999,
}

/// Error type for ConcordPay operations.
#[derive(Debug, thiserror::Error)]
pub enum ConcordpayError {
    /// The merchant secret could not be obtained for a module.
    ///
    /// Signing or validating without the secret is impossible, so this is
    /// always fatal for the calling operation.
    #[error("configuration error for module {module_id}: {reason}")]
    Configuration {
        /// Payment module the secret was requested for
        module_id: String,
        /// Why the secret is unavailable
        reason: String,
    },

    /// A notification carried a signature that does not match.
    #[error("wrong signature received")]
    SignatureMismatch,

    /// Payload could not be turned into a field source.
    #[error("serialization error: {0}")]
    Serialization(String),

    /// Internal/unexpected error.
    #[error("internal error: {0}")]
    Internal(String),
}

impl ConcordpayError {
    /// Get the error code for FFI/host integration.
    pub fn code(&self) -> ConcordpayErrorCode {
        match self {
            Self::Configuration { .. } => ConcordpayErrorCode::Configuration,
            Self::SignatureMismatch => ConcordpayErrorCode::SignatureMismatch,
            Self::Serialization(_) => ConcordpayErrorCode::Serialization,
            Self::Internal(_) => ConcordpayErrorCode::Internal,
        }
    }

    /// Returns true when the caller should record this as a security event.
    pub fn is_security_event(&self) -> bool {
        matches!(self, Self::SignatureMismatch)
    }

    /// Create a configuration error.
    pub fn configuration(module_id: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Configuration {
            module_id: module_id.into(),
            reason: reason.into(),
        }
    }
}

impl From<serde_json::Error> for ConcordpayError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_codes() {
        let err = ConcordpayError::configuration("commerce_concordpay", "secret key is not set");
        assert_eq!(err.code(), ConcordpayErrorCode::Configuration);
        assert!(!err.is_security_event());

        assert_eq!(
            ConcordpayError::SignatureMismatch.code(),
            ConcordpayErrorCode::SignatureMismatch
        );
        assert!(ConcordpayError::SignatureMismatch.is_security_event());
    }

    #[test]
    fn test_error_display() {
        let err = ConcordpayError::configuration("commerce_concordpay", "secret key is not set");
        assert!(err.to_string().contains("commerce_concordpay"));
        assert!(err.to_string().contains("secret key is not set"));
    }

    #[test]
    fn test_from_serde_json() {
        let err: ConcordpayError = serde_json::from_str::<serde_json::Value>("{")
            .unwrap_err()
            .into();
        assert_eq!(err.code(), ConcordpayErrorCode::Serialization);
    }
}
