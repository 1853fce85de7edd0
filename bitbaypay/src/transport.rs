//! The seam between request signing and the HTTP stack.

use std::future::Future;
use std::pin::Pin;

use crate::error::CallMethodError;
use crate::signer::SignedRequest;

/// Boxed, `Send` future returned by [`Transport`] implementations.
pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

/// Executes signed requests.
///
/// Implementations send the request exactly once and return the raw
/// response body of a 2xx reply. Any other outcome (connection failure,
/// timeout, non-2xx status) is reported as a [`CallMethodError`] for
/// [`SignedRequest::method_path`]; implementations must not retry.
pub trait Transport: Send + Sync {
    /// Sends `request` and returns the response body.
    fn execute<'a>(
        &'a self,
        request: &'a SignedRequest,
    ) -> BoxFuture<'a, Result<Vec<u8>, CallMethodError>>;
}

impl<T: Transport + ?Sized> Transport for std::sync::Arc<T> {
    fn execute<'a>(
        &'a self,
        request: &'a SignedRequest,
    ) -> BoxFuture<'a, Result<Vec<u8>, CallMethodError>> {
        (**self).execute(request)
    }
}
