#![cfg_attr(docsrs, feature(doc_auto_cfg))]

//! Request signing and response handling for the BitBayPay gateway API.
//!
//! Every call to the gateway goes through the same two steps:
//!
//! 1. the [`signer`] turns a method path, parameters and verb into a request
//!    authenticated with an HMAC-SHA-512 signature over
//!    `public_key + timestamp + body`;
//! 2. the [`envelope`] normalizer turns the decoded `{status, data, errors}`
//!    reply into either the `data` payload or a typed failure reason.
//!
//! [`BitBayPay`] ties both together over a [`Transport`]; the
//! `bitbaypay-http` crate provides the `reqwest` implementation.
//!
//! # Modules
//!
//! - [`call`] - Verbs, parameters and unsigned call descriptions
//! - [`constants`] - Endpoint, header and parameter names
//! - [`credentials`] - The API key pair
//! - [`envelope`] - Response envelope normalization
//! - [`error`] - Error taxonomy
//! - [`gateway`] - Endpoint operations
//! - [`payment`] - Create-payment parameters and validation
//! - [`signer`] - Request signing
//! - [`timestamp`] - Signing time and clocks
//! - [`transport`] - The trait HTTP stacks implement
//!
//! # Feature Flags
//!
//! - `telemetry` - Enables tracing instrumentation for debugging and monitoring

pub mod call;
pub mod constants;
pub mod credentials;
pub mod envelope;
pub mod error;
pub mod gateway;
pub mod payment;
pub mod signer;
pub mod timestamp;
pub mod transport;

pub use call::{CallRequest, Parameters, Verb};
pub use credentials::Credentials;
pub use error::{CallMethodError, CallPaymentsMethodError, Error, MethodResponseFail};
pub use gateway::BitBayPay;
pub use signer::{RequestBody, RequestSigner, SignedRequest};
pub use transport::Transport;
