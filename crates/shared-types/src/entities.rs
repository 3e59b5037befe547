//! # World-State Entities
//!
//! The rows the WSV command layer persists. These are plain value objects;
//! all referential rules (no dangling foreign references, unique tuples,
//! quorum versus signatory count) live in the store schema and the
//! stateful validator, not here.

use serde::{Deserialize, Serialize};

use crate::PublicKey;

/// Lower bound for an account quorum.
pub const MIN_QUORUM: u16 = 1;

/// Upper bound for an account quorum.
pub const MAX_QUORUM: u16 = 128;

/// An account registered in a domain.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Account {
    /// Unique account identifier.
    pub account_id: String,
    /// Domain the account belongs to.
    pub domain_id: String,
    /// Minimum number of signatories required on a transaction,
    /// in `[MIN_QUORUM, MAX_QUORUM]`.
    pub quorum: u16,
    /// Number of committed transactions sent by this account.
    pub transaction_count: u64,
    /// Account key-value store: a JSON object keyed by
    /// creator-account-id, then by key.
    pub json_data: String,
}

impl Account {
    /// Create an account with an empty key-value store.
    #[must_use]
    pub fn new(account_id: impl Into<String>, domain_id: impl Into<String>, quorum: u16) -> Self {
        Self {
            account_id: account_id.into(),
            domain_id: domain_id.into(),
            quorum,
            transaction_count: 0,
            json_data: "{}".to_owned(),
        }
    }
}

/// An asset type registered in a domain.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Asset {
    /// Unique asset identifier.
    pub asset_id: String,
    /// Domain the asset belongs to.
    pub domain_id: String,
    /// Number of decimal places, `0..=255`.
    pub precision: u8,
}

/// The balance of one asset held by one account.
///
/// The amount is an arbitrary-precision non-negative decimal carried as a
/// string; balance arithmetic is the stateful validator's responsibility.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccountAsset {
    /// Holding account.
    pub account_id: String,
    /// Held asset.
    pub asset_id: String,
    /// Decimal amount, e.g. `"12.50"`.
    pub amount: String,
}

/// A network peer participating in consensus.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Peer {
    /// The peer's public key.
    pub public_key: PublicKey,
    /// The peer's network address, e.g. `"10.0.0.3:10001"`.
    pub address: String,
}

/// A domain grouping accounts and assets under a default role.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Domain {
    /// Unique domain identifier.
    pub domain_id: String,
    /// Role granted to accounts created in this domain. Must reference an
    /// existing role.
    pub default_role: String,
}
