//! Logical API calls before they are signed.

use std::fmt;

use serde_json::{Map, Value};

/// Call parameters, kept in insertion order.
pub type Parameters = Map<String, Value>;

/// HTTP verb of a call.
///
/// The signer only distinguishes `GET` from everything else: `GET` calls are
/// signed without a body and send their parameters form-encoded, all other
/// verbs sign and send a JSON body.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Verb {
    /// `GET`
    #[default]
    Get,
    /// `POST`
    Post,
    /// `PUT`
    Put,
    /// `PATCH`
    Patch,
    /// `DELETE`
    Delete,
}

impl Verb {
    /// Returns the upper-case method name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Post => "POST",
            Self::Put => "PUT",
            Self::Patch => "PATCH",
            Self::Delete => "DELETE",
        }
    }

    /// Returns `true` for `GET`.
    #[must_use]
    pub const fn is_get(self) -> bool {
        matches!(self, Self::Get)
    }
}

impl fmt::Display for Verb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single gateway call: method path, parameters and verb.
///
/// `method_path` is appended verbatim to the base URL, so it must already be
/// in the gateway's format, e.g. `payments/search` or `payments/{id}`.
#[derive(Debug, Clone, PartialEq)]
pub struct CallRequest {
    method_path: String,
    parameters: Parameters,
    verb: Verb,
}

impl CallRequest {
    /// Creates a call.
    #[must_use]
    pub fn new(method_path: impl Into<String>, parameters: Parameters, verb: Verb) -> Self {
        Self {
            method_path: method_path.into(),
            parameters,
            verb,
        }
    }

    /// Creates a `GET` call without parameters.
    #[must_use]
    pub fn get(method_path: impl Into<String>) -> Self {
        Self::new(method_path, Parameters::new(), Verb::Get)
    }

    /// Creates a `POST` call with a JSON body.
    #[must_use]
    pub fn post(method_path: impl Into<String>, parameters: Parameters) -> Self {
        Self::new(method_path, parameters, Verb::Post)
    }

    /// Replaces the parameters.
    #[must_use]
    pub fn with_parameters(mut self, parameters: Parameters) -> Self {
        self.parameters = parameters;
        self
    }

    /// Returns the method path.
    #[must_use]
    pub fn method_path(&self) -> &str {
        &self.method_path
    }

    /// Returns the parameters.
    #[must_use]
    pub const fn parameters(&self) -> &Parameters {
        &self.parameters
    }

    /// Returns the verb.
    #[must_use]
    pub const fn verb(&self) -> Verb {
        self.verb
    }
}
