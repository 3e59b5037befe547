//! # Shared Types
//!
//! Single source of truth for the domain entities exchanged between the
//! Arbor subsystems.
//!
//! ## Clusters
//!
//! - **World state**: [`entities`] — the rows the WSV command layer
//!   persists (accounts, assets, balances, roles, signatories, peers,
//!   domains).
//! - **Chain**: [`chain`] — proposals, transactions, blocks, and the
//!   per-transaction validation errors the simulator carries between
//!   ordering and consensus.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod chain;
pub mod entities;

pub use chain::{Block, Proposal, SignedBlock, Transaction, TransactionError};
pub use entities::{Account, AccountAsset, Asset, Domain, Peer};

/// A 32-byte SHA-256 hash.
pub type Hash = [u8; 32];

/// A 64-byte Ed25519 signature.
pub type Signature = [u8; 64];

/// A 32-byte Ed25519 public key.
///
/// Public keys are opaque byte sequences everywhere in the node; hex is a
/// display format only.
pub type PublicKey = [u8; 32];

/// Render a binary key for logs and error messages.
#[must_use]
pub fn to_hex(bytes: &[u8]) -> String {
    hex::encode(bytes)
}
