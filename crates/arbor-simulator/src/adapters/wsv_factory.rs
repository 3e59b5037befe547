//! In-memory temporary WSV issuance.

use arbor_wsv::{CommandResult, SqliteWsvCommand, TemporaryWsv};
use async_trait::async_trait;

use crate::error::Result;
use crate::ports::TemporaryWsvFactory;

type SeedFn = Box<dyn Fn(&SqliteWsvCommand<'_>) -> CommandResult + Send + Sync>;

/// Issues fresh in-memory WSV snapshots.
///
/// With a seed installed, every snapshot is populated through it before
/// being handed to the validator; without one, snapshots start empty.
pub struct InMemoryWsvFactory {
    seed: Option<SeedFn>,
}

impl InMemoryWsvFactory {
    /// Factory producing empty snapshots.
    #[must_use]
    pub fn new() -> Self {
        Self { seed: None }
    }

    /// Factory that seeds every snapshot with `seed`.
    #[must_use]
    pub fn with_seed(
        seed: impl Fn(&SqliteWsvCommand<'_>) -> CommandResult + Send + Sync + 'static,
    ) -> Self {
        Self {
            seed: Some(Box::new(seed)),
        }
    }
}

impl Default for InMemoryWsvFactory {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl TemporaryWsvFactory for InMemoryWsvFactory {
    async fn create_temporary_wsv(&self) -> Result<TemporaryWsv> {
        let wsv = match &self.seed {
            Some(seed) => TemporaryWsv::seeded(seed)?,
            None => TemporaryWsv::in_memory()?,
        };
        Ok(wsv)
    }
}
