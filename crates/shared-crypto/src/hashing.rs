//! # SHA-256 Hashing
//!
//! One canonical hash function for the whole node. Blocks, transactions,
//! and proposals all hash through here so that every subsystem agrees on
//! digests.

use sha2::{Digest, Sha256};

/// Hash arbitrary bytes with SHA-256.
#[must_use]
pub fn sha256(data: &[u8]) -> [u8; 32] {
    let mut hasher = Sha256::new();
    hasher.update(data);
    hasher.finalize().into()
}

/// Incremental SHA-256 hasher for multi-part input.
#[derive(Default)]
pub struct Sha256Hasher {
    inner: Sha256,
}

impl Sha256Hasher {
    /// Create a fresh hasher.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed more input.
    pub fn update(&mut self, data: &[u8]) {
        self.inner.update(data);
    }

    /// Consume the hasher and produce the digest.
    #[must_use]
    pub fn finalize(self) -> [u8; 32] {
        self.inner.finalize().into()
    }
}
