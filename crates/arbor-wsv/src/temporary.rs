//! Ephemeral WSV snapshots for speculative validation.

use rusqlite::Connection;
use tracing::debug;

use crate::adapters::{SqliteWsvCommand, SqliteWsvQuery};
use crate::error::{CommandResult, WsvError};
use crate::schema::prepare_connection;

/// A discardable copy of the world state.
///
/// The stateful validator applies a proposal's commands against a
/// temporary WSV to decide which transactions survive, then the whole
/// snapshot is dropped; nothing ever flows back into the durable store.
/// The owning factory is responsible for release, which here is simply
/// `Drop`.
pub struct TemporaryWsv {
    conn: Connection,
}

impl TemporaryWsv {
    /// Create an empty in-memory snapshot carrying the WSV schema.
    pub fn in_memory() -> Result<Self, WsvError> {
        let conn = Connection::open_in_memory().map_err(|source| {
            WsvError::from_sqlite("failed to open temporary world state".to_owned(), source)
        })?;
        prepare_connection(&conn)?;
        debug!("temporary WSV created");
        Ok(Self { conn })
    }

    /// Populate the snapshot from the durable store.
    ///
    /// `seed` runs with a command cursor on the fresh snapshot inside a
    /// single transaction; any failure rolls the whole seed back.
    pub fn seeded<F>(seed: F) -> Result<Self, WsvError>
    where
        F: FnOnce(&SqliteWsvCommand<'_>) -> CommandResult,
    {
        let wsv = Self::in_memory()?;
        wsv.conn.execute_batch("BEGIN").map_err(|source| {
            WsvError::from_sqlite("failed to begin temporary WSV seed".to_owned(), source)
        })?;
        match seed(&wsv.command()) {
            Ok(()) => {
                wsv.conn.execute_batch("COMMIT").map_err(|source| {
                    WsvError::from_sqlite("failed to commit temporary WSV seed".to_owned(), source)
                })?;
                Ok(wsv)
            }
            Err(err) => {
                // Best effort; the snapshot is discarded either way.
                let _ = wsv.conn.execute_batch("ROLLBACK");
                Err(err)
            }
        }
    }

    /// Mutation cursor over the snapshot.
    #[must_use]
    pub fn command(&self) -> SqliteWsvCommand<'_> {
        SqliteWsvCommand::new(&self.conn)
    }

    /// Read cursor over the snapshot.
    #[must_use]
    pub fn query(&self) -> SqliteWsvQuery<'_> {
        SqliteWsvQuery::new(&self.conn)
    }
}
