//! Hexagonal architecture interfaces
//!
//! - [`inbound`]: the ordering-gate stream that drives the simulator
//! - [`outbound`]: the collaborators the simulator calls out to

pub mod inbound;
pub mod outbound;

pub use inbound::{OrderingEvent, OrderingGate};
pub use outbound::{
    BlockFactory, BlockQuery, BlockQueryFactory, BlockSigner, StatefulValidator,
    TemporaryWsvFactory,
};
