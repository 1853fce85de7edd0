//! Unix timestamps for request signing, and the clock that produces them.
//!
//! The gateway expects the `Request-Timestamp` header in whole seconds and
//! the same decimal string inside the signature payload. The [`Clock`] trait
//! lets tests pin the time so signatures become reproducible.

use std::fmt::{Display, Formatter};
use std::time::SystemTime;

/// A Unix timestamp in seconds since 1970-01-01T00:00:00Z.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Ord, Eq, Hash)]
pub struct UnixTimestamp(u64);

impl Display for UnixTimestamp {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl UnixTimestamp {
    /// Creates a new [`UnixTimestamp`] from a raw seconds value.
    #[must_use]
    pub const fn from_secs(secs: u64) -> Self {
        Self(secs)
    }

    /// Returns the current system time as a [`UnixTimestamp`].
    ///
    /// # Panics
    ///
    /// Panics if the system clock is set to a time before the Unix epoch.
    #[must_use]
    pub fn now() -> Self {
        let now = SystemTime::now()
            .duration_since(SystemTime::UNIX_EPOCH)
            .expect("SystemTime before UNIX epoch?!?")
            .as_secs();
        Self(now)
    }

    /// Returns the timestamp as raw seconds since the Unix epoch.
    #[must_use]
    pub const fn as_secs(&self) -> u64 {
        self.0
    }
}

/// Source of the signing time.
pub trait Clock: Send + Sync {
    /// Returns the current time.
    fn now(&self) -> UnixTimestamp;
}

/// [`Clock`] backed by the system wall clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> UnixTimestamp {
        UnixTimestamp::now()
    }
}

/// [`Clock`] that always returns the same instant.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub UnixTimestamp);

impl Clock for FixedClock {
    fn now(&self) -> UnixTimestamp {
        self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_is_decimal_seconds() {
        assert_eq!(UnixTimestamp::from_secs(1_583_836_800).to_string(), "1583836800");
    }

    #[test]
    fn test_system_clock_is_after_2020() {
        assert!(SystemClock.now().as_secs() > 1_577_836_800);
    }

    #[test]
    fn test_fixed_clock() {
        let clock = FixedClock(UnixTimestamp::from_secs(42));
        assert_eq!(clock.now(), clock.now());
        assert_eq!(clock.now().as_secs(), 42);
    }
}
