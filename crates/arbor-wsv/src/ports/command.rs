//! Mutation interface of the world-state view.

use std::collections::BTreeSet;

use shared_types::{Account, AccountAsset, Asset, Domain, Peer, PublicKey};

use crate::error::CommandResult;

/// Typed, schema-aware mutation API over a store cursor.
///
/// Implementations execute exactly one statement per operation against a
/// borrowed cursor; the cursor's transaction discipline belongs to the
/// caller, and a cursor must never be shared across threads. An operation
/// reports failure only when the store raises a violation; the failure
/// names the operation and echoes its identifying inputs.
pub trait WsvCommand {
    /// Register a role. Fails on a duplicate `role_name`.
    fn insert_role(&self, role_name: &str) -> CommandResult;

    /// Attach a role to an account. Both sides must exist.
    fn insert_account_role(&self, account_id: &str, role_name: &str) -> CommandResult;

    /// Detach a role from an account, removing exactly the matching row.
    fn delete_account_role(&self, account_id: &str, role_name: &str) -> CommandResult;

    /// Atomically grant a set of permissions to a role.
    ///
    /// The emitted statement enumerates every element exactly once; set
    /// iteration order does not affect success. A duplicate against an
    /// existing row fails the whole operation. The set must be non-empty.
    fn insert_role_permissions(
        &self,
        role_id: &str,
        permissions: &BTreeSet<String>,
    ) -> CommandResult;

    /// Record that `account_id` granted `permission_id` to `permittee_account_id`.
    fn insert_account_grantable_permission(
        &self,
        permittee_account_id: &str,
        account_id: &str,
        permission_id: &str,
    ) -> CommandResult;

    /// Revoke a previously granted permission edge.
    fn delete_account_grantable_permission(
        &self,
        permittee_account_id: &str,
        account_id: &str,
        permission_id: &str,
    ) -> CommandResult;

    /// Create an account. The stored transaction counter starts at the
    /// fixed default regardless of `account.transaction_count`; `data` is
    /// the caller-supplied JSON object (possibly empty).
    fn insert_account(&self, account: &Account) -> CommandResult;

    /// Update an account's quorum. The stored transaction counter is reset
    /// to the fixed default; `data` is not touched here.
    fn update_account(&self, account: &Account) -> CommandResult;

    /// Set `data[creator_account_id][key] = val` on an account, creating
    /// the creator's subtree first when absent. Other creators' subtrees
    /// are unaffected; `val` lands as a JSON string.
    fn set_account_kv(
        &self,
        account_id: &str,
        creator_account_id: &str,
        key: &str,
        val: &str,
    ) -> CommandResult;

    /// Register an asset. Asset-level `data` is reserved and stored as
    /// null.
    fn insert_asset(&self, asset: &Asset) -> CommandResult;

    /// Insert or replace the balance for an (account, asset) pair. The
    /// whole decimal amount is overwritten; balance arithmetic is the
    /// validator's responsibility.
    fn upsert_account_asset(&self, account_asset: &AccountAsset) -> CommandResult;

    /// Register a signatory key. Idempotent: a no-op on an existing key.
    fn insert_signatory(&self, signatory: &PublicKey) -> CommandResult;

    /// Attach a signatory to an account. Strict insert.
    fn insert_account_signatory(&self, account_id: &str, signatory: &PublicKey) -> CommandResult;

    /// Detach a signatory from an account. Strict delete.
    fn delete_account_signatory(&self, account_id: &str, signatory: &PublicKey) -> CommandResult;

    /// Garbage-collect a signatory key.
    ///
    /// Executes only when no account and no peer still references the key;
    /// otherwise the statement matches nothing and the operation succeeds
    /// without effect. Signatory GC is a best-effort sweep.
    fn delete_signatory(&self, signatory: &PublicKey) -> CommandResult;

    /// Register a peer. Strict insert.
    fn insert_peer(&self, peer: &Peer) -> CommandResult;

    /// Remove a peer, matching both key and address. Strict delete.
    fn delete_peer(&self, peer: &Peer) -> CommandResult;

    /// Register a domain. Its default role must exist.
    fn insert_domain(&self, domain: &Domain) -> CommandResult;
}
