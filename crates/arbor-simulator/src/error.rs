//! Error types for the block simulator

use thiserror::Error;

/// Result type alias for simulator operations
pub type Result<T> = std::result::Result<T, SimulatorError>;

/// Reasons a proposal is dropped from the output streams.
///
/// None of these are retried; the ordering layer resends on the next
/// round. User-visible failure surfaces only through logs and the absence
/// of expected output.
#[derive(Debug, Error)]
pub enum SimulatorError {
    /// The block-query factory had no instance to hand out.
    #[error("no block query available")]
    BlockQueryUnavailable,

    /// Reading the top block failed.
    #[error("failed to read top block: {0}")]
    TopBlock(String),

    /// The proposal is stale or from the future.
    #[error("parent height mismatch: top block at {top_height}, proposal for {proposal_height}")]
    ParentHeightMismatch {
        /// Height of the current top block.
        top_height: u64,
        /// Height the proposal targets.
        proposal_height: u64,
    },

    /// Acquiring a temporary WSV failed.
    #[error("failed to acquire temporary WSV: {0}")]
    TemporaryWsv(#[from] arbor_wsv::WsvError),

    /// The stateful validator itself failed (not per-transaction
    /// rejections, which are data on the verified-proposal stream).
    #[error("stateful validation failed: {0}")]
    Validation(String),

    /// The node signer refused the assembled block.
    #[error("failed to sign block at height {height}: {reason}")]
    Signing {
        /// Height of the block that could not be signed.
        height: u64,
        /// Signer-reported reason.
        reason: String,
    },
}
