//! Outbound events (published)

use serde::{Deserialize, Serialize};

use shared_types::{Proposal, TransactionError};

/// Event: a proposal survived stateful validation.
///
/// Carried on the verified-proposal stream. The transactions are an
/// order-preserving subset of the incoming proposal; every rejected
/// transaction is accounted for in `rejected`. An empty surviving set is
/// still published — downstream consensus decides whether to commit an
/// empty block.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct VerifiedProposalEvent {
    /// The surviving sub-proposal.
    pub proposal: Proposal,

    /// Per-transaction rejections reported by the stateful validator.
    pub rejected: Vec<TransactionError>,
}
