//! # Chain Types
//!
//! Proposals, transactions, and blocks as they move through the pipeline
//! `ordering → simulator → consensus`. These are tagged value records with
//! accessors; the simulator never inspects transaction payloads.

use serde::{Deserialize, Serialize};
use serde_with::{serde_as, Bytes};
use sha2::{Digest, Sha256};

use crate::{Hash, PublicKey, Signature};

/// A single ledger transaction.
///
/// The command list is opaque at this layer; the stateful validator is the
/// only component that interprets it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transaction {
    /// Account that created and signed the transaction.
    pub creator_account_id: String,
    /// Creation time, milliseconds since the Unix epoch.
    pub created_at_ms: u64,
    /// Serialized command list.
    pub payload: Vec<u8>,
}

impl Transaction {
    /// Compute the transaction hash.
    #[must_use]
    pub fn hash(&self) -> Hash {
        let mut hasher = Sha256::new();
        hasher.update(self.creator_account_id.as_bytes());
        hasher.update(self.created_at_ms.to_le_bytes());
        hasher.update(&self.payload);
        hasher.finalize().into()
    }
}

/// An ordered batch of transactions produced by the ordering layer,
/// candidate for a single block height.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Proposal {
    /// Target block height, strictly positive.
    pub height: u64,
    /// Creation time, milliseconds since the Unix epoch.
    pub created_at_ms: u64,
    /// Ordered transaction list.
    pub transactions: Vec<Transaction>,
}

/// A stateful-validation error for one rejected transaction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransactionError {
    /// Name of the command that failed validation.
    pub command_name: String,
    /// Human-readable rejection reason. Not part of any machine contract.
    pub reason: String,
    /// Hash of the rejected transaction.
    pub tx_hash: Hash,
}

/// Block content before signing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Block {
    /// Height of this block.
    pub height: u64,
    /// Hash of the parent block.
    pub prev_hash: Hash,
    /// Creation time, milliseconds since the Unix epoch.
    pub created_at_ms: u64,
    /// Transactions committed by this block.
    pub transactions: Vec<Transaction>,
}

impl Block {
    /// Compute the block hash: SHA-256 over the header fields and every
    /// transaction hash, in order.
    #[must_use]
    pub fn hash(&self) -> Hash {
        let mut hasher = Sha256::new();
        hasher.update(self.height.to_le_bytes());
        hasher.update(self.prev_hash);
        hasher.update(self.created_at_ms.to_le_bytes());
        for tx in &self.transactions {
            hasher.update(tx.hash());
        }
        hasher.finalize().into()
    }
}

/// A block carrying this node's signature, ready for consensus.
#[serde_as]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignedBlock {
    /// The signed content.
    pub block: Block,
    /// Public key of the signing node.
    pub public_key: PublicKey,
    /// Ed25519 signature over the block hash.
    #[serde_as(as = "Bytes")]
    pub signature: Signature,
}

impl SignedBlock {
    /// Height accessor, forwarded from the inner block.
    #[must_use]
    pub fn height(&self) -> u64 {
        self.block.height
    }

    /// Hash of the inner block content.
    #[must_use]
    pub fn hash(&self) -> Hash {
        self.block.hash()
    }
}
