//! Metrics collection for the block simulator

use std::sync::atomic::{AtomicU64, Ordering};

/// Metrics collector for proposal processing
#[derive(Debug, Default)]
pub struct Metrics {
    /// Proposals that made it through the whole pipeline.
    pub proposals_processed: AtomicU64,

    /// Proposals dropped before emitting a block.
    pub proposals_dropped: AtomicU64,

    /// Verified proposals published.
    pub verified_proposals_emitted: AtomicU64,

    /// Signed blocks published.
    pub blocks_emitted: AtomicU64,
}

impl Metrics {
    /// Create a new metrics collector
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a fully processed proposal
    pub fn record_processed(&self) {
        self.proposals_processed.fetch_add(1, Ordering::Relaxed);
    }

    /// Record a dropped proposal
    pub fn record_dropped(&self) {
        self.proposals_dropped.fetch_add(1, Ordering::Relaxed);
    }

    /// Record a verified-proposal emission
    pub fn record_verified_emitted(&self) {
        self.verified_proposals_emitted.fetch_add(1, Ordering::Relaxed);
    }

    /// Record a block emission
    pub fn record_block_emitted(&self) {
        self.blocks_emitted.fetch_add(1, Ordering::Relaxed);
    }

    /// Get processed count
    pub fn get_processed(&self) -> u64 {
        self.proposals_processed.load(Ordering::Relaxed)
    }

    /// Get dropped count
    pub fn get_dropped(&self) -> u64 {
        self.proposals_dropped.load(Ordering::Relaxed)
    }

    /// Get emitted block count
    pub fn get_blocks_emitted(&self) -> u64 {
        self.blocks_emitted.load(Ordering::Relaxed)
    }
}
