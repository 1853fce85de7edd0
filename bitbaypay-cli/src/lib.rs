//! Command-line client for the BitBayPay gateway API.
//!
//! # Modules
//!
//! - [`args`] - clap arguments and their environment fallbacks
//! - [`commands`] - Dispatch of parsed commands to the gateway

pub mod args;
pub mod commands;

pub use args::{Cli, Command};
