//! Outbound ports (driven side - SPI)
//!
//! Every call into a collaborator may block on I/O; there is no
//! cancellation primitive.

use std::sync::Arc;

use arbor_wsv::TemporaryWsv;
use async_trait::async_trait;

use shared_types::{Block, Hash, Proposal, SignedBlock, Transaction, TransactionError};

use crate::error::Result;

/// Port: read access to the top of the committed block log.
#[async_trait]
pub trait BlockQuery: Send + Sync {
    /// Fetch the current top block.
    async fn top_block(&self) -> Result<SignedBlock>;
}

/// Port: hands out block-query instances.
///
/// Shared read-only across simulators. `None` means no query is currently
/// available and the caller should drop the work at hand.
pub trait BlockQueryFactory: Send + Sync {
    /// Obtain a block-query instance, if one is available.
    fn create_block_query(&self) -> Option<Arc<dyn BlockQuery>>;
}

/// Port: issues ephemeral WSV snapshots for speculative validation.
///
/// A fresh snapshot per call; release is the factory's responsibility once
/// validation completes (here, `Drop`).
#[async_trait]
pub trait TemporaryWsvFactory: Send + Sync {
    /// Create a temporary WSV reflecting the state to validate against.
    async fn create_temporary_wsv(&self) -> Result<TemporaryWsv>;
}

/// Port: stateful validation of a proposal against a temporary WSV.
///
/// Returns the surviving sub-proposal (an order-preserving subset of the
/// input transactions) plus one error record per rejected transaction.
/// Per-transaction rejections are data, not failures; an `Err` from this
/// port means validation itself could not run.
#[async_trait]
pub trait StatefulValidator: Send + Sync {
    /// Validate `proposal` against `wsv`.
    async fn validate(
        &self,
        proposal: Proposal,
        wsv: &mut TemporaryWsv,
    ) -> Result<(Proposal, Vec<TransactionError>)>;
}

/// Port: assembles block content from validated parts.
///
/// `build_unchecked` performs no validation of its own; the simulator has
/// already gated the height and the transaction set.
pub trait BlockFactory: Send + Sync {
    /// Assemble unsigned block content.
    fn build_unchecked(
        &self,
        height: u64,
        prev_hash: Hash,
        created_at_ms: u64,
        transactions: Vec<Transaction>,
    ) -> Block;
}

/// Port: attaches this node's signature to an assembled block.
///
/// Shared across simulators; implementations must be internally
/// synchronized.
#[async_trait]
pub trait BlockSigner: Send + Sync {
    /// Sign the block and return it with signature and public key attached.
    async fn sign(&self, block: Block) -> Result<SignedBlock>;
}
