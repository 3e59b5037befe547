//! Read interface of the world-state view.

use shared_types::{Account, AccountAsset, Asset, Domain, Peer, PublicKey};

use crate::error::QueryResult;

/// Primary-key lookups over the WSV, the read twin of
/// [`WsvCommand`](super::WsvCommand).
///
/// Same cursor discipline as the command side: borrowed cursor, one
/// statement per call, no transaction management.
pub trait WsvQuery {
    /// Fetch an account by id.
    fn account(&self, account_id: &str) -> QueryResult<Option<Account>>;

    /// Fetch an asset by id.
    fn asset(&self, asset_id: &str) -> QueryResult<Option<Asset>>;

    /// Fetch the balance row for an (account, asset) pair.
    fn account_asset(&self, account_id: &str, asset_id: &str)
        -> QueryResult<Option<AccountAsset>>;

    /// Fetch a domain by id.
    fn domain(&self, domain_id: &str) -> QueryResult<Option<Domain>>;

    /// All registered peers, ordered by address.
    fn peers(&self) -> QueryResult<Vec<Peer>>;

    /// Signatory keys attached to an account.
    fn account_signatories(&self, account_id: &str) -> QueryResult<Vec<PublicKey>>;

    /// Roles attached to an account.
    fn account_roles(&self, account_id: &str) -> QueryResult<Vec<String>>;

    /// Permissions granted to a role.
    fn role_permissions(&self, role_id: &str) -> QueryResult<Vec<String>>;

    /// Whether `account_id` granted `permission_id` to `permittee_account_id`.
    fn has_account_grantable_permission(
        &self,
        permittee_account_id: &str,
        account_id: &str,
        permission_id: &str,
    ) -> QueryResult<bool>;

    /// Whether a signatory row exists for the key.
    fn signatory_exists(&self, signatory: &PublicKey) -> QueryResult<bool>;
}
