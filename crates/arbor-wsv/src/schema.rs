//! # World-State Schema
//!
//! Canonical relational layout of the WSV. Entity tables come first, then
//! the relationship tables that reference them.
//!
//! Invariants carried by the DDL:
//!
//! - no dangling foreign references (`REFERENCES` on every edge table),
//! - no duplicate primary keys or unique tuples,
//! - `quorum` in `[1, 128]`, `precision` in `[0, 255]`,
//!   `transaction_count >= 0`,
//! - `data` is a JSON object (checked on write by the JSON functions, not
//!   by the DDL).
//!
//! The `quorum <= number of signatories` rule is the stateful validator's
//! job, and the "signatory row exists iff referenced" rule is maintained
//! by the `delete_signatory` guard rather than a constraint.

use rusqlite::Connection;

use crate::error::{CommandResult, WsvError};

/// DDL for the world-state view tables.
pub const WSV_SCHEMA: &str = r#"
CREATE TABLE IF NOT EXISTS role (
    role_id           TEXT PRIMARY KEY
);

CREATE TABLE IF NOT EXISTS domain (
    domain_id         TEXT PRIMARY KEY,
    default_role      TEXT NOT NULL REFERENCES role(role_id)
);

CREATE TABLE IF NOT EXISTS account (
    account_id        TEXT PRIMARY KEY,
    domain_id         TEXT NOT NULL REFERENCES domain(domain_id),
    quorum            INTEGER NOT NULL CHECK (quorum BETWEEN 1 AND 128),
    transaction_count INTEGER NOT NULL DEFAULT 0 CHECK (transaction_count >= 0),
    data              TEXT NOT NULL DEFAULT '{}'
);

CREATE TABLE IF NOT EXISTS account_has_roles (
    account_id        TEXT NOT NULL REFERENCES account(account_id),
    role_id           TEXT NOT NULL REFERENCES role(role_id),
    PRIMARY KEY (account_id, role_id)
);

CREATE TABLE IF NOT EXISTS role_has_permissions (
    role_id           TEXT NOT NULL REFERENCES role(role_id),
    permission_id     TEXT NOT NULL,
    PRIMARY KEY (role_id, permission_id)
);

CREATE TABLE IF NOT EXISTS account_has_grantable_permissions (
    permittee_account_id TEXT NOT NULL REFERENCES account(account_id),
    account_id           TEXT NOT NULL REFERENCES account(account_id),
    permission_id        TEXT NOT NULL,
    PRIMARY KEY (permittee_account_id, account_id, permission_id)
);

CREATE TABLE IF NOT EXISTS asset (
    asset_id          TEXT PRIMARY KEY,
    domain_id         TEXT NOT NULL REFERENCES domain(domain_id),
    "precision"       INTEGER NOT NULL CHECK ("precision" BETWEEN 0 AND 255),
    data              TEXT
);

CREATE TABLE IF NOT EXISTS account_has_asset (
    account_id        TEXT NOT NULL REFERENCES account(account_id),
    asset_id          TEXT NOT NULL REFERENCES asset(asset_id),
    amount            TEXT NOT NULL,
    PRIMARY KEY (account_id, asset_id)
);

CREATE TABLE IF NOT EXISTS signatory (
    public_key        BLOB PRIMARY KEY
);

CREATE TABLE IF NOT EXISTS account_has_signatory (
    account_id        TEXT NOT NULL REFERENCES account(account_id),
    public_key        BLOB NOT NULL REFERENCES signatory(public_key),
    PRIMARY KEY (account_id, public_key)
);

CREATE TABLE IF NOT EXISTS peer (
    public_key        BLOB PRIMARY KEY,
    address           TEXT NOT NULL
);
"#;

/// Enable referential integrity on the cursor and apply the WSV DDL.
///
/// Idempotent; safe to call on a connection that already carries the
/// schema.
pub fn prepare_connection(conn: &Connection) -> CommandResult {
    conn.pragma_update(None, "foreign_keys", true)
        .map_err(|source| {
            WsvError::from_sqlite("failed to enable foreign key enforcement".to_owned(), source)
        })?;
    conn.execute_batch(WSV_SCHEMA).map_err(|source| {
        WsvError::from_sqlite("failed to apply world-state schema".to_owned(), source)
    })
}
