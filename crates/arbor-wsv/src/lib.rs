//! # Arbor - World-State View Layer
//!
//! **Bounded Context:** Ledger Current State
//!
//! ## Purpose
//!
//! The world-state view (WSV) is the materialized current state of the
//! ledger — accounts, assets, balances, roles, permissions, signatories,
//! peers, and domains — kept in a relational store, distinct from the
//! block log. This crate defines the algebra of state mutation over that
//! store: which mutations are legal, which invariants they preserve, and
//! how failures are surfaced.
//!
//! ## Key Design Principles
//!
//! 1. **Borrowed cursor**: every executor holds a non-owning handle to a
//!    store cursor; transaction discipline (begin/commit/rollback) belongs
//!    to the caller.
//! 2. **One statement per operation**: no operation has partial effects.
//! 3. **Parameter binding everywhere**: no user-supplied string or binary
//!    value can alter statement structure.
//! 4. **Schema-enforced invariants**: unique tuples, foreign references,
//!    and range checks live in the DDL, not in application code.
//!
//! ## Module Structure
//!
//! - [`ports`]: the [`WsvCommand`](ports::WsvCommand) and
//!   [`WsvQuery`](ports::WsvQuery) interfaces
//! - [`adapters`]: SQLite implementations of both ports
//! - [`schema`]: canonical DDL and connection preparation
//! - [`temporary`]: ephemeral WSV snapshots for speculative validation
//! - [`error`]: failure taxonomy of the layer

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod adapters;
pub mod error;
pub mod ports;
pub mod schema;
pub mod temporary;

pub use adapters::{SqliteWsvCommand, SqliteWsvQuery};
pub use error::{CommandResult, QueryResult, WsvError};
pub use ports::{WsvCommand, WsvQuery};
pub use schema::prepare_connection;
pub use temporary::TemporaryWsv;

/// Transaction counter written by account inserts and updates.
///
/// The caller-supplied counter is ignored until the committed-transaction
/// counter path is wired through the committer; both operations write this
/// fixed value.
pub const DEFAULT_TX_COUNTER: u64 = 0;
