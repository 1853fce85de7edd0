#![cfg_attr(docsrs, feature(doc_auto_cfg))]

//! `reqwest` transport for the BitBayPay gateway client.
//!
//! ```rust,no_run
//! use bitbaypay::Credentials;
//! use bitbaypay_http::ClientConfig;
//!
//! # async fn run() -> Result<(), bitbaypay::Error> {
//! let client = ClientConfig::new(Credentials::new("public-key", "private-key")).build();
//! let markets = client.get_markets().await?;
//! println!("{markets}");
//! # Ok(())
//! # }
//! ```
//!
//! # Feature Flags
//!
//! - `telemetry` - Records each request on a tracing span

pub mod client;
pub mod error;
pub mod transport;

pub use client::{BitBayPayClient, ClientConfig};
pub use error::TransportError;
pub use transport::HttpTransport;
