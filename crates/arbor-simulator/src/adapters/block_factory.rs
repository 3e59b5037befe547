//! Plain block assembly.

use shared_types::{Block, Hash, Transaction};

use crate::ports::BlockFactory;

/// Assembles block content directly from the validated parts.
///
/// No serialization format beyond [`Block`] itself; consensus-facing wire
/// encoding lives with the transport.
pub struct StandardBlockFactory;

impl BlockFactory for StandardBlockFactory {
    fn build_unchecked(
        &self,
        height: u64,
        prev_hash: Hash,
        created_at_ms: u64,
        transactions: Vec<Transaction>,
    ) -> Block {
        Block {
            height,
            prev_hash,
            created_at_ms,
            transactions,
        }
    }
}
