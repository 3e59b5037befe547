//! Ed25519 node signer.

use async_trait::async_trait;

use shared_crypto::Ed25519KeyPair;
use shared_types::{Block, SignedBlock};

use crate::error::Result;
use crate::ports::BlockSigner;

/// Signs assembled blocks with this node's keypair.
///
/// Signing is deterministic and CPU-only; the keypair is internally
/// immutable, so one signer can be shared across simulators.
pub struct Ed25519BlockSigner {
    keypair: Ed25519KeyPair,
}

impl Ed25519BlockSigner {
    /// Wrap an existing keypair.
    #[must_use]
    pub fn new(keypair: Ed25519KeyPair) -> Self {
        Self { keypair }
    }

    /// Derive the keypair from a 32-byte seed.
    #[must_use]
    pub fn from_seed(seed: [u8; 32]) -> Self {
        Self::new(Ed25519KeyPair::from_seed(seed))
    }

    /// This node's public key.
    #[must_use]
    pub fn public_key(&self) -> [u8; 32] {
        *self.keypair.public_key().as_bytes()
    }
}

#[async_trait]
impl BlockSigner for Ed25519BlockSigner {
    async fn sign(&self, block: Block) -> Result<SignedBlock> {
        let signature = self.keypair.sign(&block.hash());
        Ok(SignedBlock {
            block,
            public_key: self.public_key(),
            signature: *signature.as_bytes(),
        })
    }
}
