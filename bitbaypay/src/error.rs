//! Error types for BitBayPay gateway calls.
//!
//! Every failure of a call ends up as one [`Error`] variant. None of them are
//! retried by this crate; callers decide whether a call is worth repeating.

/// Base error type for gateway operations.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum Error {
    /// The public or private key is missing. Raised before any signing or
    /// network activity.
    #[error("credentials not set, both the public and the private key are required")]
    CredentialsNotSet,

    /// The transport failed: connection error, non-2xx status or an
    /// undecodable response body.
    #[error(transparent)]
    CallMethod(#[from] CallMethodError),

    /// Create-payment parameters were rejected before the request was signed.
    #[error(transparent)]
    CallPaymentsMethod(#[from] CallPaymentsMethodError),

    /// The gateway answered, but the envelope status was not `Ok`.
    #[error(transparent)]
    MethodResponseFail(#[from] MethodResponseFail),
}

impl Error {
    /// Returns the gateway failure reason when this is a
    /// [`Error::MethodResponseFail`].
    #[must_use]
    pub fn reason(&self) -> Option<&str> {
        match self {
            Self::MethodResponseFail(fail) => Some(fail.reason()),
            _ => None,
        }
    }
}

/// Transport-level failure of a single API method call.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("call to API method `{method}` failed: {details}")]
pub struct CallMethodError {
    /// The method path that was being called.
    pub method: String,
    /// Message of the underlying transport failure.
    pub details: String,
}

impl CallMethodError {
    /// Creates a new call error for `method`.
    #[must_use]
    pub fn new(method: impl Into<String>, details: impl Into<String>) -> Self {
        Self {
            method: method.into(),
            details: details.into(),
        }
    }
}

/// Validation failure of the create-payment parameters.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid payments call parameters: {details}")]
pub struct CallPaymentsMethodError {
    /// JSON object describing the failed rules, keyed by parameter name.
    pub details: String,
}

impl CallPaymentsMethodError {
    /// Creates a new validation error.
    #[must_use]
    pub fn new(details: impl Into<String>) -> Self {
        Self {
            details: details.into(),
        }
    }
}

/// Failure reported by the gateway inside a well-formed response envelope.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("method returned status fail, reason: {reason}")]
pub struct MethodResponseFail {
    reason: String,
}

impl MethodResponseFail {
    /// Creates a new failure with the given reason code.
    #[must_use]
    pub fn new(reason: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
        }
    }

    /// Returns the reason code, e.g. `AUTHENTICATION_FAILED`.
    #[must_use]
    pub fn reason(&self) -> &str {
        &self.reason
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reason_only_for_response_fail() {
        let err = Error::from(MethodResponseFail::new("UNDER_MAINTENANCE"));
        assert_eq!(err.reason(), Some("UNDER_MAINTENANCE"));
        assert!(err.to_string().contains("UNDER_MAINTENANCE"));

        let err = Error::from(CallMethodError::new("payments", "404 Not Found"));
        assert_eq!(err.reason(), None);
    }

    #[test]
    fn test_call_method_error_display() {
        let err = CallMethodError::new("payments/search", "connection refused");
        assert_eq!(
            err.to_string(),
            "call to API method `payments/search` failed: connection refused"
        );
    }
}
