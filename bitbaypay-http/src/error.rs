//! Error types for the HTTP transport.

use http::StatusCode;

/// Errors that can occur while executing a signed request.
///
/// At the [`bitbaypay::Transport`] seam every variant is folded into a
/// [`bitbaypay::CallMethodError`] carrying this error's message.
#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    /// The signed URL could not be parsed.
    #[error("URL parse error: {context}: {source}")]
    UrlParse {
        /// Human-readable context.
        context: &'static str,
        /// The underlying parse error.
        #[source]
        source: url::ParseError,
    },
    /// A header name is not valid HTTP.
    #[error("Invalid header name {name}: {source}")]
    InvalidHeaderName {
        /// The offending header.
        name: &'static str,
        /// The underlying error.
        #[source]
        source: http::header::InvalidHeaderName,
    },
    /// A header value contains characters HTTP does not allow.
    #[error("Invalid value for header {name}: {source}")]
    InvalidHeaderValue {
        /// The offending header. The value itself is never reported.
        name: &'static str,
        /// The underlying error.
        #[source]
        source: http::header::InvalidHeaderValue,
    },
    /// HTTP transport error (connection, TLS, timeout).
    #[error("HTTP error: {context}: {source}")]
    Http {
        /// Human-readable context.
        context: &'static str,
        /// The underlying reqwest error.
        #[source]
        source: reqwest::Error,
    },
    /// The gateway answered with a non-2xx status.
    #[error("Unexpected HTTP status {status}: {context}: {body}")]
    HttpStatus {
        /// Human-readable context.
        context: &'static str,
        /// The HTTP status code.
        status: StatusCode,
        /// The response body.
        body: String,
    },
    /// Failed to read the response body.
    #[error("Failed to read response body: {context}: {source}")]
    ResponseBodyRead {
        /// Human-readable context.
        context: &'static str,
        /// The underlying reqwest error.
        #[source]
        source: reqwest::Error,
    },
}

impl TransportError {
    /// Returns the HTTP status for [`TransportError::HttpStatus`].
    #[must_use]
    pub const fn status(&self) -> Option<StatusCode> {
        match self {
            Self::HttpStatus { status, .. } => Some(*status),
            _ => None,
        }
    }
}
