//! A [`bitbaypay::Transport`] implementation backed by `reqwest`.
//!
//! [`HttpTransport`] sends each [`SignedRequest`] exactly once:
//!
//! - `GET` parameters are appended to the URL as a query string
//! - every other verb sends the signed JSON text as the body, byte for byte
//! - the signing headers are copied as-is
//! - an optional per-request timeout is applied
//!
//! Only 2xx replies yield a body; everything else becomes a
//! [`CallMethodError`] naming the method path. Nothing is retried.

use std::fmt::Display;
use std::time::Duration;

use bitbaypay::transport::BoxFuture;
use bitbaypay::{CallMethodError, RequestBody, SignedRequest, Transport, Verb};
use http::header::{HeaderMap, HeaderName, HeaderValue};
use http::Method;
use reqwest::Client;
use url::Url;

#[cfg(feature = "telemetry")]
use tracing::{Instrument, Span};

use crate::error::TransportError;

/// Sends signed gateway requests over HTTP.
#[derive(Clone, Debug, Default)]
pub struct HttpTransport {
    client: Client,
    timeout: Option<Duration>,
}

impl HttpTransport {
    /// Creates a transport with a fresh [`Client`] and no timeout.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a transport reusing an existing [`Client`].
    #[must_use]
    pub const fn with_client(client: Client) -> Self {
        Self {
            client,
            timeout: None,
        }
    }

    /// Sets a timeout for every request.
    #[must_use]
    pub const fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Returns the configured timeout, if any.
    #[must_use]
    pub const fn timeout(&self) -> Option<Duration> {
        self.timeout
    }

    /// Returns the underlying HTTP client.
    #[must_use]
    pub const fn client(&self) -> &Client {
        &self.client
    }

    /// Sends `request` and returns the body of a 2xx reply.
    ///
    /// # Errors
    ///
    /// Returns [`TransportError`] if the request cannot be built, the
    /// connection fails or times out, or the status is not 2xx.
    pub async fn send(&self, request: &SignedRequest) -> Result<Vec<u8>, TransportError> {
        let mut url = Url::parse(request.url()).map_err(|e| TransportError::UrlParse {
            context: "Failed to parse request URL",
            source: e,
        })?;

        let mut req = match request.body() {
            RequestBody::Form(pairs) => {
                if !pairs.is_empty() {
                    url.query_pairs_mut().extend_pairs(pairs);
                }
                self.client.request(http_method(request.verb()), url)
            }
            RequestBody::Json(json) => self
                .client
                .request(http_method(request.verb()), url)
                .body(json.clone()),
        };
        req = req.headers(header_map(request)?);
        if let Some(timeout) = self.timeout {
            req = req.timeout(timeout);
        }

        let http_response = req.send().await.map_err(|e| TransportError::Http {
            context: "Failed to send request",
            source: e,
        })?;

        let status = http_response.status();
        if status.is_success() {
            let bytes = http_response
                .bytes()
                .await
                .map_err(|e| TransportError::ResponseBodyRead {
                    context: "Failed to read gateway reply",
                    source: e,
                })?;
            Ok(bytes.to_vec())
        } else {
            let body = http_response
                .text()
                .await
                .map_err(|e| TransportError::ResponseBodyRead {
                    context: "Failed to read gateway error reply",
                    source: e,
                })?;
            Err(TransportError::HttpStatus {
                context: "Gateway rejected request",
                status,
                body,
            })
        }
    }

    async fn execute_inner(&self, request: &SignedRequest) -> Result<Vec<u8>, CallMethodError> {
        let result = self.send(request).await;
        record_result_on_span(&result);
        result.map_err(|e| CallMethodError::new(request.method_path(), e.to_string()))
    }
}

impl Transport for HttpTransport {
    #[cfg(feature = "telemetry")]
    fn execute<'a>(
        &'a self,
        request: &'a SignedRequest,
    ) -> BoxFuture<'a, Result<Vec<u8>, CallMethodError>> {
        Box::pin(with_span(
            self.execute_inner(request),
            tracing::info_span!(
                "bitbaypay.http.execute",
                method = request.method_path(),
                verb = %request.verb(),
                operation_id = %request.operation_id(),
                timeout = ?self.timeout,
                otel.status_code = tracing::field::Empty,
                error.message = tracing::field::Empty,
            ),
        ))
    }

    #[cfg(not(feature = "telemetry"))]
    fn execute<'a>(
        &'a self,
        request: &'a SignedRequest,
    ) -> BoxFuture<'a, Result<Vec<u8>, CallMethodError>> {
        Box::pin(self.execute_inner(request))
    }
}

const fn http_method(verb: Verb) -> Method {
    match verb {
        Verb::Get => Method::GET,
        Verb::Post => Method::POST,
        Verb::Put => Method::PUT,
        Verb::Patch => Method::PATCH,
        Verb::Delete => Method::DELETE,
    }
}

fn header_map(request: &SignedRequest) -> Result<HeaderMap, TransportError> {
    let mut headers = HeaderMap::with_capacity(request.headers().len());
    for &(name, ref value) in request.headers() {
        let header_name = HeaderName::from_bytes(name.as_bytes())
            .map_err(|source| TransportError::InvalidHeaderName { name, source })?;
        let header_value = HeaderValue::from_str(value)
            .map_err(|source| TransportError::InvalidHeaderValue { name, source })?;
        headers.insert(header_name, header_value);
    }
    Ok(headers)
}

/// Records the outcome of a request on the current span.
#[cfg(feature = "telemetry")]
fn record_result_on_span<R, E: Display>(result: &Result<R, E>) {
    let span = Span::current();
    match result {
        Ok(_) => {
            span.record("otel.status_code", "OK");
        }
        Err(err) => {
            span.record("otel.status_code", "ERROR");
            span.record("error.message", tracing::field::display(err));
            tracing::event!(tracing::Level::ERROR, error = %err, "Request to gateway failed");
        }
    }
}

/// Noop if telemetry feature is off.
#[cfg(not(feature = "telemetry"))]
fn record_result_on_span<R, E: Display>(_result: &Result<R, E>) {}

/// Instruments a future with a given tracing span.
#[cfg(feature = "telemetry")]
fn with_span<F: Future>(fut: F, span: Span) -> impl Future<Output = F::Output> {
    fut.instrument(span)
}
