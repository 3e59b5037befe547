//! Configuration types for the block simulator

use serde::Deserialize;

use crate::DEFAULT_STREAM_CAPACITY;

/// Runtime configuration for a simulator instance
#[derive(Clone, Debug, Deserialize)]
pub struct SimulatorConfig {
    /// Buffered events on the verified-proposal stream before slow
    /// subscribers start lagging.
    pub verified_proposal_capacity: usize,

    /// Buffered events on the block stream.
    pub block_capacity: usize,
}

impl Default for SimulatorConfig {
    fn default() -> Self {
        Self {
            verified_proposal_capacity: DEFAULT_STREAM_CAPACITY,
            block_capacity: DEFAULT_STREAM_CAPACITY,
        }
    }
}
