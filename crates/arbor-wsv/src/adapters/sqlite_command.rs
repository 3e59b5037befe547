//! SQLite implementation of the WSV mutation port.

use std::collections::BTreeSet;

use rusqlite::{params, params_from_iter, Connection};
use tracing::debug;

use shared_types::{to_hex, Account, AccountAsset, Asset, Domain, Peer, PublicKey};

use crate::error::{CommandResult, WsvError};
use crate::ports::WsvCommand;
use crate::DEFAULT_TX_COUNTER;

/// WSV command executor over a borrowed SQLite cursor.
///
/// The cursor is non-owning: transaction discipline belongs to the caller,
/// and the executor must not outlive the connection. One SQL statement per
/// operation; every user-supplied string and binary value is bound, never
/// interpolated.
pub struct SqliteWsvCommand<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteWsvCommand<'conn> {
    /// Wrap a cursor. The connection must already carry the WSV schema.
    #[must_use]
    pub fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }

    fn execute<P, F>(&self, sql: &str, params: P, context: F) -> CommandResult
    where
        P: rusqlite::Params,
        F: FnOnce() -> String,
    {
        match self.conn.execute(sql, params) {
            Ok(rows) => {
                debug!(rows, "wsv statement executed");
                Ok(())
            }
            Err(source) => Err(WsvError::from_sqlite(context(), source)),
        }
    }
}

/// Build a JSON path of double-quoted member names, e.g. `$."a"."b"`.
fn json_member_path(segments: &[&str]) -> String {
    let mut path = String::from("$");
    for segment in segments {
        path.push('.');
        path.push('"');
        path.push_str(segment);
        path.push('"');
    }
    path
}

impl WsvCommand for SqliteWsvCommand<'_> {
    fn insert_role(&self, role_name: &str) -> CommandResult {
        self.execute(
            "INSERT INTO role(role_id) VALUES (?1)",
            params![role_name],
            || format!("failed to insert role '{role_name}'"),
        )
    }

    fn insert_account_role(&self, account_id: &str, role_name: &str) -> CommandResult {
        self.execute(
            "INSERT INTO account_has_roles(account_id, role_id) VALUES (?1, ?2)",
            params![account_id, role_name],
            || format!("failed to insert account role, account: '{account_id}', role: '{role_name}'"),
        )
    }

    fn delete_account_role(&self, account_id: &str, role_name: &str) -> CommandResult {
        self.execute(
            "DELETE FROM account_has_roles WHERE account_id = ?1 AND role_id = ?2",
            params![account_id, role_name],
            || format!("failed to delete account role, account: '{account_id}', role: '{role_name}'"),
        )
    }

    fn insert_role_permissions(
        &self,
        role_id: &str,
        permissions: &BTreeSet<String>,
    ) -> CommandResult {
        if permissions.is_empty() {
            return Err(WsvError::EmptyPermissionSet {
                role_id: role_id.to_owned(),
            });
        }

        // One (role, permission) tuple per set element, all in a single
        // statement so the whole grant succeeds or fails together.
        let placeholders = (0..permissions.len())
            .map(|i| format!("(?{}, ?{})", 2 * i + 1, 2 * i + 2))
            .collect::<Vec<_>>()
            .join(", ");
        let sql = format!(
            "INSERT INTO role_has_permissions(role_id, permission_id) VALUES {placeholders}"
        );

        let mut values: Vec<&str> = Vec::with_capacity(permissions.len() * 2);
        for permission in permissions {
            values.push(role_id);
            values.push(permission);
        }

        self.execute(&sql, params_from_iter(values), || {
            let listed = permissions.iter().cloned().collect::<Vec<_>>().join(", ");
            format!("failed to insert role permissions, role id: '{role_id}', permissions: [{listed}]")
        })
    }

    fn insert_account_grantable_permission(
        &self,
        permittee_account_id: &str,
        account_id: &str,
        permission_id: &str,
    ) -> CommandResult {
        self.execute(
            "INSERT INTO account_has_grantable_permissions(permittee_account_id, account_id, \
             permission_id) VALUES (?1, ?2, ?3)",
            params![permittee_account_id, account_id, permission_id],
            || {
                format!(
                    "failed to insert account grantable permission, permittee: \
                     '{permittee_account_id}', account: '{account_id}', permission: '{permission_id}'"
                )
            },
        )
    }

    fn delete_account_grantable_permission(
        &self,
        permittee_account_id: &str,
        account_id: &str,
        permission_id: &str,
    ) -> CommandResult {
        self.execute(
            "DELETE FROM account_has_grantable_permissions WHERE permittee_account_id = ?1 \
             AND account_id = ?2 AND permission_id = ?3",
            params![permittee_account_id, account_id, permission_id],
            || {
                format!(
                    "failed to delete account grantable permission, permittee: \
                     '{permittee_account_id}', account: '{account_id}', permission: '{permission_id}'"
                )
            },
        )
    }

    fn insert_account(&self, account: &Account) -> CommandResult {
        self.execute(
            "INSERT INTO account(account_id, domain_id, quorum, transaction_count, data) \
             VALUES (?1, ?2, ?3, ?4, ?5)",
            params![
                account.account_id,
                account.domain_id,
                account.quorum,
                DEFAULT_TX_COUNTER,
                account.json_data,
            ],
            || {
                format!(
                    "failed to insert account, account id: '{}', domain id: '{}', quorum: {}, \
                     transaction count: {}, data: {}",
                    account.account_id,
                    account.domain_id,
                    account.quorum,
                    DEFAULT_TX_COUNTER,
                    account.json_data,
                )
            },
        )
    }

    fn update_account(&self, account: &Account) -> CommandResult {
        self.execute(
            "UPDATE account SET quorum = ?1, transaction_count = ?2 WHERE account_id = ?3",
            params![account.quorum, DEFAULT_TX_COUNTER, account.account_id],
            || {
                format!(
                    "failed to update account, account id: '{}', quorum: {}",
                    account.account_id, account.quorum,
                )
            },
        )
    }

    fn set_account_kv(
        &self,
        account_id: &str,
        creator_account_id: &str,
        key: &str,
        val: &str,
    ) -> CommandResult {
        let creator_path = json_member_path(&[creator_account_id]);
        let key_path = json_member_path(&[creator_account_id, key]);

        // The CASE initializes the creator's subtree when the top-level
        // member is absent; a bound TEXT value lands as a JSON string.
        self.execute(
            "UPDATE account SET data = json_set(\
                 CASE WHEN json_type(data, ?2) IS NOT NULL THEN data \
                      ELSE json_set(data, ?2, json('{}')) END, \
                 ?3, ?4) \
             WHERE account_id = ?1",
            params![account_id, creator_path, key_path, val],
            || {
                format!(
                    "failed to set account key-value, account id: '{account_id}', \
                     creator account id: '{creator_account_id}', key: '{key}', value: '{val}'"
                )
            },
        )
    }

    fn insert_asset(&self, asset: &Asset) -> CommandResult {
        // Asset-level data is reserved; always stored as null.
        self.execute(
            "INSERT INTO asset(asset_id, domain_id, \"precision\", data) VALUES (?1, ?2, ?3, NULL)",
            params![asset.asset_id, asset.domain_id, asset.precision],
            || {
                format!(
                    "failed to insert asset, asset id: '{}', domain id: '{}', precision: {}",
                    asset.asset_id, asset.domain_id, asset.precision,
                )
            },
        )
    }

    fn upsert_account_asset(&self, account_asset: &AccountAsset) -> CommandResult {
        self.execute(
            "INSERT INTO account_has_asset(account_id, asset_id, amount) VALUES (?1, ?2, ?3) \
             ON CONFLICT (account_id, asset_id) DO UPDATE SET amount = excluded.amount",
            params![
                account_asset.account_id,
                account_asset.asset_id,
                account_asset.amount,
            ],
            || {
                format!(
                    "failed to upsert account asset, account id: '{}', asset id: '{}', amount: {}",
                    account_asset.account_id, account_asset.asset_id, account_asset.amount,
                )
            },
        )
    }

    fn insert_signatory(&self, signatory: &PublicKey) -> CommandResult {
        self.execute(
            "INSERT INTO signatory(public_key) VALUES (?1) ON CONFLICT DO NOTHING",
            params![signatory.as_slice()],
            || format!("failed to insert signatory '{}'", to_hex(signatory)),
        )
    }

    fn insert_account_signatory(&self, account_id: &str, signatory: &PublicKey) -> CommandResult {
        self.execute(
            "INSERT INTO account_has_signatory(account_id, public_key) VALUES (?1, ?2)",
            params![account_id, signatory.as_slice()],
            || {
                format!(
                    "failed to insert account signatory, account id: '{account_id}', key '{}'",
                    to_hex(signatory),
                )
            },
        )
    }

    fn delete_account_signatory(&self, account_id: &str, signatory: &PublicKey) -> CommandResult {
        self.execute(
            "DELETE FROM account_has_signatory WHERE account_id = ?1 AND public_key = ?2",
            params![account_id, signatory.as_slice()],
            || {
                format!(
                    "failed to delete account signatory, account id: '{account_id}', key '{}'",
                    to_hex(signatory),
                )
            },
        )
    }

    fn delete_signatory(&self, signatory: &PublicKey) -> CommandResult {
        // Matches nothing while any account or peer still references the
        // key; signatory GC stays a best-effort sweep.
        self.execute(
            "DELETE FROM signatory WHERE public_key = ?1 \
             AND NOT EXISTS (SELECT 1 FROM account_has_signatory WHERE public_key = ?1) \
             AND NOT EXISTS (SELECT 1 FROM peer WHERE public_key = ?1)",
            params![signatory.as_slice()],
            || format!("failed to delete signatory '{}'", to_hex(signatory)),
        )
    }

    fn insert_peer(&self, peer: &Peer) -> CommandResult {
        self.execute(
            "INSERT INTO peer(public_key, address) VALUES (?1, ?2)",
            params![peer.public_key.as_slice(), peer.address],
            || {
                format!(
                    "failed to insert peer, public key '{}', address: '{}'",
                    to_hex(&peer.public_key),
                    peer.address,
                )
            },
        )
    }

    fn delete_peer(&self, peer: &Peer) -> CommandResult {
        self.execute(
            "DELETE FROM peer WHERE public_key = ?1 AND address = ?2",
            params![peer.public_key.as_slice(), peer.address],
            || {
                format!(
                    "failed to delete peer, public key '{}', address: '{}'",
                    to_hex(&peer.public_key),
                    peer.address,
                )
            },
        )
    }

    fn insert_domain(&self, domain: &Domain) -> CommandResult {
        self.execute(
            "INSERT INTO domain(domain_id, default_role) VALUES (?1, ?2)",
            params![domain.domain_id, domain.default_role],
            || {
                format!(
                    "failed to insert domain, domain id: '{}', default role: '{}'",
                    domain.domain_id, domain.default_role,
                )
            },
        )
    }
}
