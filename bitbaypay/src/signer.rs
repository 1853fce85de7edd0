//! Request signing for the gateway's HMAC-SHA-512 scheme.
//!
//! A signed request carries five headers:
//!
//! | header              | value                                        |
//! |---------------------|----------------------------------------------|
//! | `API-Key`           | public key                                   |
//! | `API-Hash`          | `hex(HMAC-SHA-512(private_key, payload))`    |
//! | `operation-id`      | random UUID v4, not part of the signature    |
//! | `Request-Timestamp` | Unix seconds used in the payload             |
//! | `Content-Type`      | `application/json`                           |
//!
//! The signature payload is `public_key + timestamp + body`, where `body` is
//! empty for `GET` and the compact JSON of the parameters otherwise. The
//! JSON text that is signed is the exact text sent as the request body.

use std::fmt;

use hmac::{Hmac, Mac};
use serde_json::Value;
use sha2::Sha512;
use uuid::Uuid;

use crate::call::{CallRequest, Parameters, Verb};
use crate::constants::{
    API_HASH_HEADER, API_KEY_HEADER, CONTENT_TYPE_HEADER, CONTENT_TYPE_JSON, OPERATION_ID_HEADER,
    REQUEST_TIMESTAMP_HEADER,
};
use crate::credentials::Credentials;
use crate::error::Error;
use crate::timestamp::UnixTimestamp;

type HmacSha512 = Hmac<Sha512>;

/// Source of `operation-id` values.
pub trait OperationIdSource: Send + Sync {
    /// Returns the id for the next request.
    fn next_id(&self) -> Uuid;
}

/// Generates a random UUID v4 per request.
#[derive(Debug, Clone, Copy, Default)]
pub struct RandomOperationIds;

impl OperationIdSource for RandomOperationIds {
    fn next_id(&self) -> Uuid {
        Uuid::new_v4()
    }
}

/// Returns the same id for every request.
#[derive(Debug, Clone, Copy)]
pub struct FixedOperationId(pub Uuid);

impl OperationIdSource for FixedOperationId {
    fn next_id(&self) -> Uuid {
        self.0
    }
}

/// Builds the string that gets signed.
#[must_use]
pub fn signature_payload(public_key: &str, timestamp: UnixTimestamp, body: Option<&str>) -> String {
    format!("{public_key}{timestamp}{}", body.unwrap_or_default())
}

/// Computes the lower-case hex HMAC-SHA-512 of `payload` keyed with
/// `private_key`.
///
/// # Panics
///
/// Never in practice: HMAC accepts keys of any length.
#[must_use]
pub fn compute_signature(private_key: &str, payload: &str) -> String {
    let mut mac = HmacSha512::new_from_slice(private_key.as_bytes())
        .expect("HMAC can take key of any size");
    mac.update(payload.as_bytes());
    hex::encode(mac.finalize().into_bytes())
}

/// Flattens parameters into form pairs.
///
/// Nested values use bracket notation (`filter[status]`, `ids[0]`), booleans
/// become `1`/`0` and `null` values are dropped.
#[must_use]
pub fn form_pairs(parameters: &Parameters) -> Vec<(String, String)> {
    let mut pairs = Vec::with_capacity(parameters.len());
    for (key, value) in parameters {
        push_form_value(&mut pairs, key.clone(), value);
    }
    pairs
}

fn push_form_value(pairs: &mut Vec<(String, String)>, key: String, value: &Value) {
    match value {
        Value::Null => {}
        Value::Bool(flag) => pairs.push((key, if *flag { "1" } else { "0" }.to_owned())),
        Value::Number(number) => pairs.push((key, number.to_string())),
        Value::String(text) => pairs.push((key, text.clone())),
        Value::Array(items) => {
            for (index, item) in items.iter().enumerate() {
                push_form_value(pairs, format!("{key}[{index}]"), item);
            }
        }
        Value::Object(map) => {
            for (name, item) in map {
                push_form_value(pairs, format!("{key}[{name}]"), item);
            }
        }
    }
}

/// Body of a signed request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RequestBody {
    /// Form pairs, used for `GET` calls.
    Form(Vec<(String, String)>),
    /// JSON text, identical to the signed body component.
    Json(String),
}

/// A request ready for the transport. Built by [`RequestSigner::sign`].
#[derive(Clone, PartialEq, Eq)]
pub struct SignedRequest {
    method_path: String,
    url: String,
    verb: Verb,
    headers: Vec<(&'static str, String)>,
    body: RequestBody,
    timestamp: UnixTimestamp,
    operation_id: Uuid,
}

impl SignedRequest {
    /// Returns the method path the request was built for.
    #[must_use]
    pub fn method_path(&self) -> &str {
        &self.method_path
    }

    /// Returns the target URL, `base_url + method_path`.
    #[must_use]
    pub fn url(&self) -> &str {
        &self.url
    }

    /// Returns the verb.
    #[must_use]
    pub const fn verb(&self) -> Verb {
        self.verb
    }

    /// Returns the header set, in the order it is sent.
    #[must_use]
    pub fn headers(&self) -> &[(&'static str, String)] {
        &self.headers
    }

    /// Returns the value of header `name`, compared case-insensitively.
    #[must_use]
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }

    /// Returns the body.
    #[must_use]
    pub const fn body(&self) -> &RequestBody {
        &self.body
    }

    /// Returns the signing timestamp.
    #[must_use]
    pub const fn timestamp(&self) -> UnixTimestamp {
        self.timestamp
    }

    /// Returns the operation id.
    #[must_use]
    pub const fn operation_id(&self) -> Uuid {
        self.operation_id
    }
}

impl fmt::Debug for SignedRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SignedRequest")
            .field("method_path", &self.method_path)
            .field("url", &self.url)
            .field("verb", &self.verb)
            .field("timestamp", &self.timestamp)
            .field("operation_id", &self.operation_id)
            .finish_non_exhaustive()
    }
}

/// Signs calls against a fixed base URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestSigner {
    base_url: String,
}

impl RequestSigner {
    /// Creates a signer targeting `base_url`.
    #[must_use]
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
        }
    }

    /// Returns the base URL.
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Builds the signed request for `call` at `timestamp`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::CredentialsNotSet`] if either key is absent.
    pub fn sign(
        &self,
        call: &CallRequest,
        credentials: &Credentials,
        timestamp: UnixTimestamp,
        operation_id: Uuid,
    ) -> Result<SignedRequest, Error> {
        let (public_key, private_key) = credentials.require()?;

        let verb = call.verb();
        let (body, json) = if verb.is_get() {
            (RequestBody::Form(form_pairs(call.parameters())), None)
        } else {
            let json = Value::Object(call.parameters().clone()).to_string();
            (RequestBody::Json(json.clone()), Some(json))
        };

        let payload = signature_payload(public_key, timestamp, json.as_deref());
        let signature = compute_signature(private_key, &payload);

        let headers = vec![
            (API_KEY_HEADER, public_key.to_owned()),
            (API_HASH_HEADER, signature),
            (OPERATION_ID_HEADER, operation_id.to_string()),
            (REQUEST_TIMESTAMP_HEADER, timestamp.to_string()),
            (CONTENT_TYPE_HEADER, CONTENT_TYPE_JSON.to_owned()),
        ];

        #[cfg(feature = "telemetry")]
        tracing::debug!(
            method = call.method_path(),
            verb = %verb,
            timestamp = %timestamp,
            operation_id = %operation_id,
            "Signed gateway request"
        );

        Ok(SignedRequest {
            method_path: call.method_path().to_owned(),
            url: format!("{}{}", self.base_url, call.method_path()),
            verb,
            headers,
            body,
            timestamp,
            operation_id,
        })
    }
}
