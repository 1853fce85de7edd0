//! Gateway operations: sign, send, decode, normalize.
//!
//! [`BitBayPay`] owns an immutable key pair and a [`Transport`]. Each call is
//! an independent round trip with a fresh timestamp and operation id; nothing
//! is cached between calls and nothing is retried.

use std::sync::Arc;

use serde_json::Value;

use crate::call::{CallRequest, Parameters, Verb};
use crate::constants::{
    BASE_URL, METHOD_PAYMENTS, METHOD_PAYMENTS_SEARCH, METHOD_STORES_CURRENCIES_SETTINGS,
    METHOD_STORES_MARKETS,
};
use crate::credentials::Credentials;
use crate::envelope::parse_response;
use crate::error::{CallMethodError, Error};
use crate::payment::validate_create_payment;
use crate::signer::{OperationIdSource, RandomOperationIds, RequestSigner, SignedRequest};
use crate::timestamp::{Clock, SystemClock};
use crate::transport::Transport;

/// BitBayPay API client over a pluggable [`Transport`].
///
/// # Example
///
/// ```ignore
/// use bitbaypay::{BitBayPay, Credentials};
///
/// let gateway = BitBayPay::new(transport, Credentials::new("public", "private"));
/// let markets = gateway.get_markets().await?;
/// ```
pub struct BitBayPay<T> {
    transport: T,
    credentials: Credentials,
    signer: RequestSigner,
    clock: Arc<dyn Clock>,
    operation_ids: Arc<dyn OperationIdSource>,
}

impl<T> std::fmt::Debug for BitBayPay<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BitBayPay")
            .field("base_url", &self.signer.base_url())
            .field("credentials", &self.credentials)
            .finish_non_exhaustive()
    }
}

impl<T: Transport> BitBayPay<T> {
    /// Creates a client for the production endpoint.
    #[must_use]
    pub fn new(transport: T, credentials: Credentials) -> Self {
        Self {
            transport,
            credentials,
            signer: RequestSigner::new(BASE_URL),
            clock: Arc::new(SystemClock),
            operation_ids: Arc::new(RandomOperationIds),
        }
    }

    /// Targets another base URL. Method paths are appended verbatim.
    #[must_use]
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.signer = RequestSigner::new(base_url);
        self
    }

    /// Replaces the signing clock.
    #[must_use]
    pub fn with_clock(mut self, clock: impl Clock + 'static) -> Self {
        self.clock = Arc::new(clock);
        self
    }

    /// Replaces the `operation-id` source.
    #[must_use]
    pub fn with_operation_ids(mut self, operation_ids: impl OperationIdSource + 'static) -> Self {
        self.operation_ids = Arc::new(operation_ids);
        self
    }

    /// Returns the key pair.
    #[must_use]
    pub const fn credentials(&self) -> &Credentials {
        &self.credentials
    }

    /// Returns the base URL.
    #[must_use]
    pub fn base_url(&self) -> &str {
        self.signer.base_url()
    }

    /// Returns the transport.
    #[must_use]
    pub const fn transport(&self) -> &T {
        &self.transport
    }

    /// Signs `call` with the current time and a fresh operation id.
    ///
    /// # Errors
    ///
    /// Returns [`Error::CredentialsNotSet`] if either key is absent.
    pub fn sign(&self, call: &CallRequest) -> Result<SignedRequest, Error> {
        self.signer.sign(
            call,
            &self.credentials,
            self.clock.now(),
            self.operation_ids.next_id(),
        )
    }

    /// Signs and sends `call`, returning the raw response body.
    ///
    /// # Errors
    ///
    /// Returns [`Error::CredentialsNotSet`] before any network activity, or
    /// [`Error::CallMethod`] if the transport fails.
    pub async fn send(&self, call: &CallRequest) -> Result<Vec<u8>, Error> {
        let request = self.sign(call)?;
        Ok(self.transport.execute(&request).await?)
    }

    /// Calls an arbitrary API method and returns the raw response body.
    ///
    /// # Errors
    ///
    /// See [`BitBayPay::send`].
    pub async fn call_method(
        &self,
        method: &str,
        parameters: Parameters,
        verb: Verb,
    ) -> Result<Vec<u8>, Error> {
        self.send(&CallRequest::new(method, parameters, verb)).await
    }

    /// Signs and sends `call`, then normalizes the response envelope.
    ///
    /// # Errors
    ///
    /// Returns [`Error::CredentialsNotSet`], [`Error::CallMethod`] (including
    /// a body that is not JSON) or [`Error::MethodResponseFail`].
    #[cfg_attr(
        feature = "telemetry",
        tracing::instrument(
            name = "bitbaypay.call",
            skip_all,
            fields(method = call.method_path(), verb = %call.verb()),
            err
        )
    )]
    pub async fn call(&self, call: &CallRequest) -> Result<Value, Error> {
        let body = self.send(call).await?;
        let response: Value = serde_json::from_slice(&body).map_err(|e| {
            CallMethodError::new(call.method_path(), format!("invalid JSON response: {e}"))
        })?;
        Ok(parse_response(&response)?)
    }

    /// Creates a payment (`POST payments`).
    ///
    /// Parameters are validated before credentials are read or anything is
    /// signed; see [`validate_create_payment`].
    ///
    /// # Errors
    ///
    /// Returns [`Error::CallPaymentsMethod`] for invalid parameters, otherwise
    /// see [`BitBayPay::call`].
    pub async fn create_payment(&self, parameters: Parameters) -> Result<Value, Error> {
        validate_create_payment(&parameters)?;
        self.call(&CallRequest::post(METHOD_PAYMENTS, parameters))
            .await
    }

    /// Fetches a payment (`GET payments/{payment_id}`).
    ///
    /// # Errors
    ///
    /// See [`BitBayPay::call`].
    pub async fn get_payment(&self, payment_id: &str) -> Result<Value, Error> {
        self.call(&CallRequest::get(format!("{METHOD_PAYMENTS}/{payment_id}")))
            .await
    }

    /// Lists the store's currency settings (`GET stores/currenciesSettings`).
    ///
    /// # Errors
    ///
    /// See [`BitBayPay::call`].
    pub async fn get_currencies_settings(&self) -> Result<Value, Error> {
        self.call(&CallRequest::get(METHOD_STORES_CURRENCIES_SETTINGS))
            .await
    }

    /// Lists the store's markets (`GET stores/markets`).
    ///
    /// # Errors
    ///
    /// See [`BitBayPay::call`].
    pub async fn get_markets(&self) -> Result<Value, Error> {
        self.call(&CallRequest::get(METHOD_STORES_MARKETS)).await
    }

    /// Searches payments (`GET payments/search`) with filter parameters.
    ///
    /// # Errors
    ///
    /// See [`BitBayPay::call`].
    pub async fn search_payments(&self, parameters: Parameters) -> Result<Value, Error> {
        self.call(&CallRequest::new(
            METHOD_PAYMENTS_SEARCH,
            parameters,
            Verb::Get,
        ))
        .await
    }
}
