//! API key pair used to sign gateway requests.

use std::fmt;

use crate::error::Error;

/// Public/private key pair issued by the gateway.
///
/// Both halves may be absent while a configuration is being assembled, but a
/// signed call requires both. The value is immutable once handed to a client:
/// the `with_*` methods return a new value instead of mutating shared state.
///
/// The `Debug` implementation never prints key material.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct Credentials {
    public_key: Option<String>,
    private_key: Option<String>,
}

impl Credentials {
    /// Creates a complete key pair.
    #[must_use]
    pub fn new(public_key: impl Into<String>, private_key: impl Into<String>) -> Self {
        Self {
            public_key: Some(public_key.into()),
            private_key: Some(private_key.into()),
        }
    }

    /// Creates credentials from optional halves, e.g. read from the
    /// environment.
    #[must_use]
    pub const fn from_parts(public_key: Option<String>, private_key: Option<String>) -> Self {
        Self {
            public_key,
            private_key,
        }
    }

    /// Returns a copy with the public key replaced.
    #[must_use]
    pub fn with_public_key(mut self, public_key: Option<String>) -> Self {
        self.public_key = public_key;
        self
    }

    /// Returns a copy with the private key replaced.
    #[must_use]
    pub fn with_private_key(mut self, private_key: Option<String>) -> Self {
        self.private_key = private_key;
        self
    }

    /// Returns `true` when both keys are present.
    #[must_use]
    pub const fn is_complete(&self) -> bool {
        self.public_key.is_some() && self.private_key.is_some()
    }

    /// Returns `(public_key, private_key)`, read together.
    ///
    /// # Errors
    ///
    /// Returns [`Error::CredentialsNotSet`] if either key is absent.
    pub fn require(&self) -> Result<(&str, &str), Error> {
        match (&self.public_key, &self.private_key) {
            (Some(public_key), Some(private_key)) => Ok((public_key, private_key)),
            _ => Err(Error::CredentialsNotSet),
        }
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("has_public_key", &self.public_key.is_some())
            .field("has_private_key", &self.private_key.is_some())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_require_complete_pair() {
        let credentials = Credentials::new("public", "private");
        assert!(credentials.is_complete());
        assert_eq!(credentials.require().unwrap(), ("public", "private"));
    }

    #[test]
    fn test_require_fails_when_either_key_missing() {
        let cases = [
            Credentials::default(),
            Credentials::default().with_public_key(Some("public".into())),
            Credentials::default().with_private_key(Some("private".into())),
            Credentials::new("public", "private").with_private_key(None),
        ];
        for credentials in cases {
            assert!(!credentials.is_complete());
            assert!(matches!(
                credentials.require(),
                Err(Error::CredentialsNotSet)
            ));
        }
    }

    #[test]
    fn test_debug_redacts_keys() {
        let credentials = Credentials::new("my-public-key", "my-private-key");
        let debug = format!("{credentials:?}");
        assert!(!debug.contains("my-public-key"));
        assert!(!debug.contains("my-private-key"));
        assert!(debug.contains("has_public_key: true"));
    }
}
