//! Document key generation.
//!
//! Keys are ULIDs in their 26-character Crockford base32 form. They sort by
//! creation time, so store listings come back oldest first.

use log::warn;
use std::sync::{Mutex, PoisonError};
use ulid::{Generator, Ulid};

/// Source of fresh document keys.
pub trait KeyGen: Send + Sync {
    fn generate(&self) -> String;
}

/// Monotonic ULID generator: keys from one generator are strictly
/// increasing, even within a millisecond.
pub struct UlidKeyGen {
    generator: Mutex<Generator>,
}

impl Default for UlidKeyGen {
    fn default() -> Self {
        Self::new()
    }
}

impl UlidKeyGen {
    pub fn new() -> Self {
        Self {
            generator: Mutex::new(Generator::new()),
        }
    }

    pub fn next_ulid(&self) -> Ulid {
        let mut generator = self.generator.lock().unwrap_or_else(PoisonError::into_inner);
        generator.generate().unwrap_or_else(|e| {
            // Random part exhausted within one millisecond.
            warn!("monotonic key generation failed ({}), using a fresh ulid", e);
            Ulid::new()
        })
    }
}

impl KeyGen for UlidKeyGen {
    fn generate(&self) -> String {
        self.next_ulid().to_string()
    }
}
