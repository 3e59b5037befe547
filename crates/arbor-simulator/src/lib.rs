//! # Arbor - Block Simulator
//!
//! **Bounded Context:** Stateful Validation & Block Assembly
//!
//! ## Purpose
//!
//! The simulator sits between the ordering layer and consensus. For every
//! candidate proposal it:
//!
//! 1. Checks that the proposal extends the current top block
//!    (`top.height == proposal.height - 1`).
//! 2. Acquires a temporary WSV and runs the stateful validator against it.
//! 3. Publishes the verified proposal (surviving transactions plus
//!    per-transaction errors) on one stream.
//! 4. Assembles a block from the surviving transactions, has the node
//!    signer sign it, and publishes it on a second stream.
//!
//! Error handling is drop-and-continue: any collaborator failure drops the
//! current proposal and the ordering layer resends on the next round.
//!
//! ## Architecture Layers
//!
//! ```text
//! ┌─────────────────────────────────────────────────────┐
//! │  Adapters (Outer)                                   │
//! │  - Flat-file block store (BlockQuery)               │
//! │  - Ed25519 node signer                              │
//! │  - In-memory temporary WSV factory                  │
//! └─────────────────────────────────────────────────────┘
//!                         │
//! ┌─────────────────────────────────────────────────────┐
//! │  Ports (Middle)                                     │
//! │  - Inbound: OrderingGate proposal stream            │
//! │  - Outbound: BlockQuery(Factory), TemporaryWsv-     │
//! │    Factory, StatefulValidator, BlockFactory, Signer │
//! └─────────────────────────────────────────────────────┘
//!                         │
//! ┌─────────────────────────────────────────────────────┐
//! │  Service (Inner)                                    │
//! │  - Simulator: parent gate → validate → publish →    │
//! │    assemble → sign → publish                        │
//! └─────────────────────────────────────────────────────┘
//! ```
//!
//! ## Critical Invariants
//!
//! 1. **Height gate**: nothing is emitted unless the top block is the
//!    proposal's direct parent.
//! 2. **Order**: for each admitted proposal the verified-proposal event
//!    strictly precedes the block event, and proposals are processed in
//!    arrival order (single consumer on the input stream).
//! 3. **Subset**: an emitted block carries exactly the validator's
//!    surviving transactions, order preserved.
//! 4. **Parent link**: an emitted block's `prev_hash` is the hash of the
//!    top block observed during the height check.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod adapters;
pub mod events;
pub mod ports;
pub mod service;
pub mod streams;

mod config;
mod error;
mod metrics;

pub use config::SimulatorConfig;
pub use error::{Result, SimulatorError};
pub use events::VerifiedProposalEvent;
pub use metrics::Metrics;
pub use service::Simulator;
pub use streams::{EventStream, StreamError};

pub use adapters::{
    Ed25519BlockSigner, FlatFileBlockStore, FlatFileBlockStoreFactory, InMemoryWsvFactory,
    StandardBlockFactory,
};

pub use ports::{
    BlockFactory, BlockQuery, BlockQueryFactory, BlockSigner, OrderingEvent, OrderingGate,
    StatefulValidator, TemporaryWsvFactory,
};

/// Default capacity of each output stream before slow subscribers lag.
pub const DEFAULT_STREAM_CAPACITY: usize = 1000;
