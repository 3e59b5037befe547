//! Error types for the world-state view layer

use thiserror::Error;

/// Result of a single WSV mutation.
pub type CommandResult = Result<(), WsvError>;

/// Result of a single WSV lookup.
pub type QueryResult<T> = Result<T, WsvError>;

/// Failures surfaced by the WSV command and query layer.
///
/// The context strings name the operation and echo its identifying inputs;
/// they are free-form human text, not part of any machine contract.
#[derive(Debug, Error)]
pub enum WsvError {
    /// The store rejected the statement with a unique, foreign-key, or
    /// check constraint violation. The caller decides whether to roll back.
    #[error("constraint violation: {context}")]
    ConstraintViolation {
        /// What was attempted, with the offending inputs.
        context: String,
        /// Underlying store error.
        #[source]
        source: rusqlite::Error,
    },

    /// The cursor is dead or the store is unreachable.
    #[error("store transport failure: {context}")]
    TransportFailure {
        /// What was attempted.
        context: String,
        /// Underlying store error.
        #[source]
        source: rusqlite::Error,
    },

    /// Bulk permission insert invoked with an empty set. The statement is
    /// never sent to the store.
    #[error("failed to insert role permissions, role id: '{role_id}': empty permission set")]
    EmptyPermissionSet {
        /// Role the caller tried to grant permissions to.
        role_id: String,
    },
}

impl WsvError {
    /// Classify a store error under the layer's failure taxonomy.
    pub(crate) fn from_sqlite(context: String, source: rusqlite::Error) -> Self {
        if is_constraint(&source) {
            Self::ConstraintViolation { context, source }
        } else {
            Self::TransportFailure { context, source }
        }
    }

    /// True when the store raised a unique/foreign-key/check violation.
    #[must_use]
    pub fn is_constraint_violation(&self) -> bool {
        matches!(self, Self::ConstraintViolation { .. })
    }
}

fn is_constraint(err: &rusqlite::Error) -> bool {
    matches!(
        err,
        rusqlite::Error::SqliteFailure(e, _)
            if e.code == rusqlite::ErrorCode::ConstraintViolation
    )
}
