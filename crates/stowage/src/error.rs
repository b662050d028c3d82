//! Error types for the packing engine.

use thiserror::Error;

/// Errors returned by a `Pack` call.
///
/// Every variant means "packing did not happen": no partial result is ever
/// returned alongside an error.
#[derive(Debug, Error)]
pub enum PackingError {
    /// The packer was built without a usable backend.
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// The embedded packing library failed.
    #[error("Packing computation failed: {0}")]
    Computation(stowage_core::Error),

    /// The caller cancelled the call.
    #[error("Packing cancelled")]
    Cancelled,

    /// The caller's deadline passed before packing finished.
    #[error("Packing deadline of {0}ms exceeded")]
    DeadlineExceeded(u64),

    /// The request could not be serialized.
    #[error("Failed to encode packing request: {0}")]
    Encoding(String),

    /// Network failure, timeout or non-2xx status from the packing service.
    #[error("{}", transport_message(.status, .message))]
    Transport {
        /// HTTP status, if a response was received.
        status: Option<u16>,
        /// Failure description, including any service-reported message.
        message: String,
    },

    /// The packing service answered `success: false`.
    #[error("Packing service error [{code}]: {message}")]
    Service {
        /// Service error code.
        code: String,
        /// Service error message.
        message: String,
    },

    /// The response body did not match the expected structure.
    #[error("Failed to decode packing response (HTTP {status}): {message}")]
    Decoding {
        /// HTTP status of the undecodable response.
        status: u16,
        /// Parser error.
        message: String,
    },

    /// The packing service returned something the request cannot explain.
    #[error("Packing service contract violation: {0}")]
    ContractViolation(String),
}

fn transport_message(status: &Option<u16>, message: &str) -> String {
    match status {
        Some(status) => format!("Packing service returned HTTP {status}: {message}"),
        None => format!("Packing service unreachable: {message}"),
    }
}

impl PackingError {
    /// Returns true if a caller-side retry might succeed.
    ///
    /// The engine itself never retries.
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::Transport { status: None, .. } => true,
            Self::Transport {
                status: Some(status),
                ..
            } => *status >= 500,
            Self::DeadlineExceeded(_) => true,
            _ => false,
        }
    }
}

impl From<stowage_core::Error> for PackingError {
    fn from(err: stowage_core::Error) -> Self {
        match err {
            stowage_core::Error::Cancelled => Self::Cancelled,
            stowage_core::Error::Timeout(ms) => Self::DeadlineExceeded(ms),
            other => Self::Computation(other),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_core_error_routing() {
        assert!(matches!(
            PackingError::from(stowage_core::Error::Cancelled),
            PackingError::Cancelled
        ));
        assert!(matches!(
            PackingError::from(stowage_core::Error::Timeout(50)),
            PackingError::DeadlineExceeded(50)
        ));
        assert!(matches!(
            PackingError::from(stowage_core::Error::Internal("boom".into())),
            PackingError::Computation(_)
        ));
    }

    #[test]
    fn test_transport_display() {
        let err = PackingError::Transport {
            status: Some(502),
            message: "upstream down".into(),
        };
        assert_eq!(
            err.to_string(),
            "Packing service returned HTTP 502: upstream down"
        );

        let err = PackingError::Transport {
            status: None,
            message: "connection refused".into(),
        };
        assert_eq!(
            err.to_string(),
            "Packing service unreachable: connection refused"
        );
    }

    #[test]
    fn test_retryable() {
        let server = PackingError::Transport {
            status: Some(503),
            message: String::new(),
        };
        let client = PackingError::Transport {
            status: Some(400),
            message: String::new(),
        };
        assert!(server.is_retryable());
        assert!(!client.is_retryable());
        assert!(!PackingError::ContractViolation("x".into()).is_retryable());
    }
}
