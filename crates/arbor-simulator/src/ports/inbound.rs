//! Inbound port (driving side)

use tokio::sync::broadcast;

use shared_types::Proposal;

/// An ordering-round event carrying a candidate proposal.
#[derive(Clone, Debug)]
pub struct OrderingEvent {
    /// The proposal for the next block height.
    pub proposal: Proposal,
}

/// Port: the ordering layer's proposal stream.
///
/// The simulator subscribes once at construction and is the single
/// consumer of its subscription: proposals are processed to completion in
/// arrival order. When the stream closes, any in-flight step runs to
/// completion and its outputs are discarded with it.
pub trait OrderingGate: Send + Sync {
    /// Subscribe to the proposal stream.
    fn on_proposal(&self) -> broadcast::Receiver<OrderingEvent>;
}
