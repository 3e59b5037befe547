//! SQLite implementation of the WSV read port.

use rusqlite::{params, Connection, OptionalExtension, Row};

use shared_types::{to_hex, Account, AccountAsset, Asset, Domain, Peer, PublicKey};

use crate::error::{QueryResult, WsvError};
use crate::ports::WsvQuery;

/// WSV lookup executor over a borrowed SQLite cursor.
pub struct SqliteWsvQuery<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteWsvQuery<'conn> {
    /// Wrap a cursor. The connection must already carry the WSV schema.
    #[must_use]
    pub fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }
}

fn read_key(row: &Row<'_>, idx: usize) -> rusqlite::Result<PublicKey> {
    let blob: Vec<u8> = row.get(idx)?;
    blob.try_into().map_err(|_| {
        rusqlite::Error::FromSqlConversionFailure(
            idx,
            rusqlite::types::Type::Blob,
            "public key is not 32 bytes".into(),
        )
    })
}

fn transport(context: String) -> impl FnOnce(rusqlite::Error) -> WsvError {
    move |source| WsvError::from_sqlite(context, source)
}

impl WsvQuery for SqliteWsvQuery<'_> {
    fn account(&self, account_id: &str) -> QueryResult<Option<Account>> {
        self.conn
            .query_row(
                "SELECT account_id, domain_id, quorum, transaction_count, data \
                 FROM account WHERE account_id = ?1",
                params![account_id],
                |row| {
                    Ok(Account {
                        account_id: row.get(0)?,
                        domain_id: row.get(1)?,
                        quorum: row.get(2)?,
                        transaction_count: row.get(3)?,
                        json_data: row.get(4)?,
                    })
                },
            )
            .optional()
            .map_err(transport(format!("failed to fetch account '{account_id}'")))
    }

    fn asset(&self, asset_id: &str) -> QueryResult<Option<Asset>> {
        self.conn
            .query_row(
                "SELECT asset_id, domain_id, \"precision\" FROM asset WHERE asset_id = ?1",
                params![asset_id],
                |row| {
                    Ok(Asset {
                        asset_id: row.get(0)?,
                        domain_id: row.get(1)?,
                        precision: row.get(2)?,
                    })
                },
            )
            .optional()
            .map_err(transport(format!("failed to fetch asset '{asset_id}'")))
    }

    fn account_asset(
        &self,
        account_id: &str,
        asset_id: &str,
    ) -> QueryResult<Option<AccountAsset>> {
        self.conn
            .query_row(
                "SELECT account_id, asset_id, amount FROM account_has_asset \
                 WHERE account_id = ?1 AND asset_id = ?2",
                params![account_id, asset_id],
                |row| {
                    Ok(AccountAsset {
                        account_id: row.get(0)?,
                        asset_id: row.get(1)?,
                        amount: row.get(2)?,
                    })
                },
            )
            .optional()
            .map_err(transport(format!(
                "failed to fetch account asset, account id: '{account_id}', asset id: '{asset_id}'"
            )))
    }

    fn domain(&self, domain_id: &str) -> QueryResult<Option<Domain>> {
        self.conn
            .query_row(
                "SELECT domain_id, default_role FROM domain WHERE domain_id = ?1",
                params![domain_id],
                |row| {
                    Ok(Domain {
                        domain_id: row.get(0)?,
                        default_role: row.get(1)?,
                    })
                },
            )
            .optional()
            .map_err(transport(format!("failed to fetch domain '{domain_id}'")))
    }

    fn peers(&self) -> QueryResult<Vec<Peer>> {
        let context = "failed to fetch peers".to_owned();
        let mut stmt = self
            .conn
            .prepare("SELECT public_key, address FROM peer ORDER BY address")
            .map_err(transport(context.clone()))?;
        let rows = stmt
            .query_map([], |row| {
                Ok(Peer {
                    public_key: read_key(row, 0)?,
                    address: row.get(1)?,
                })
            })
            .map_err(transport(context.clone()))?;
        rows.collect::<rusqlite::Result<Vec<_>>>()
            .map_err(transport(context))
    }

    fn account_signatories(&self, account_id: &str) -> QueryResult<Vec<PublicKey>> {
        let context = format!("failed to fetch signatories of account '{account_id}'");
        let mut stmt = self
            .conn
            .prepare("SELECT public_key FROM account_has_signatory WHERE account_id = ?1")
            .map_err(transport(context.clone()))?;
        let rows = stmt
            .query_map(params![account_id], |row| read_key(row, 0))
            .map_err(transport(context.clone()))?;
        rows.collect::<rusqlite::Result<Vec<_>>>()
            .map_err(transport(context))
    }

    fn account_roles(&self, account_id: &str) -> QueryResult<Vec<String>> {
        let context = format!("failed to fetch roles of account '{account_id}'");
        let mut stmt = self
            .conn
            .prepare("SELECT role_id FROM account_has_roles WHERE account_id = ?1 ORDER BY role_id")
            .map_err(transport(context.clone()))?;
        let rows = stmt
            .query_map(params![account_id], |row| row.get(0))
            .map_err(transport(context.clone()))?;
        rows.collect::<rusqlite::Result<Vec<_>>>()
            .map_err(transport(context))
    }

    fn role_permissions(&self, role_id: &str) -> QueryResult<Vec<String>> {
        let context = format!("failed to fetch permissions of role '{role_id}'");
        let mut stmt = self
            .conn
            .prepare(
                "SELECT permission_id FROM role_has_permissions WHERE role_id = ?1 \
                 ORDER BY permission_id",
            )
            .map_err(transport(context.clone()))?;
        let rows = stmt
            .query_map(params![role_id], |row| row.get(0))
            .map_err(transport(context.clone()))?;
        rows.collect::<rusqlite::Result<Vec<_>>>()
            .map_err(transport(context))
    }

    fn has_account_grantable_permission(
        &self,
        permittee_account_id: &str,
        account_id: &str,
        permission_id: &str,
    ) -> QueryResult<bool> {
        self.conn
            .query_row(
                "SELECT 1 FROM account_has_grantable_permissions \
                 WHERE permittee_account_id = ?1 AND account_id = ?2 AND permission_id = ?3",
                params![permittee_account_id, account_id, permission_id],
                |_| Ok(()),
            )
            .optional()
            .map(|found| found.is_some())
            .map_err(transport(format!(
                "failed to fetch grantable permission, permittee: '{permittee_account_id}', \
                 account: '{account_id}', permission: '{permission_id}'"
            )))
    }

    fn signatory_exists(&self, signatory: &PublicKey) -> QueryResult<bool> {
        self.conn
            .query_row(
                "SELECT 1 FROM signatory WHERE public_key = ?1",
                params![signatory.as_slice()],
                |_| Ok(()),
            )
            .optional()
            .map(|found| found.is_some())
            .map_err(transport(format!(
                "failed to fetch signatory '{}'",
                to_hex(signatory)
            )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::SqliteWsvCommand;
    use crate::ports::WsvCommand;
    use crate::schema::prepare_connection;

    fn wsv() -> Connection {
        let conn = Connection::open_in_memory().unwrap();
        prepare_connection(&conn).unwrap();
        conn
    }

    fn seed(conn: &Connection) {
        let cmd = SqliteWsvCommand::new(conn);
        cmd.insert_role("user").unwrap();
        cmd.insert_domain(&Domain {
            domain_id: "test".to_owned(),
            default_role: "user".to_owned(),
        })
        .unwrap();
        cmd.insert_account(&Account::new("alice@test", "test", 2))
            .unwrap();
    }

    #[test]
    fn test_account_round_trip() {
        let conn = wsv();
        seed(&conn);
        let query = SqliteWsvQuery::new(&conn);

        let account = query.account("alice@test").unwrap().unwrap();
        assert_eq!(account.account_id, "alice@test");
        assert_eq!(account.domain_id, "test");
        assert_eq!(account.quorum, 2);
        assert_eq!(account.transaction_count, 0);
        assert_eq!(account.json_data, "{}");

        assert!(query.account("ghost@test").unwrap().is_none());
    }

    #[test]
    fn test_asset_and_balance_round_trip() {
        let conn = wsv();
        seed(&conn);
        let cmd = SqliteWsvCommand::new(&conn);
        let query = SqliteWsvQuery::new(&conn);

        let asset = Asset {
            asset_id: "coin#test".to_owned(),
            domain_id: "test".to_owned(),
            precision: 2,
        };
        cmd.insert_asset(&asset).unwrap();
        assert_eq!(query.asset("coin#test").unwrap().unwrap(), asset);

        let holding = AccountAsset {
            account_id: "alice@test".to_owned(),
            asset_id: "coin#test".to_owned(),
            amount: "12.34".to_owned(),
        };
        cmd.upsert_account_asset(&holding).unwrap();
        assert_eq!(
            query.account_asset("alice@test", "coin#test").unwrap().unwrap(),
            holding
        );
        assert!(query.account_asset("alice@test", "nothing#test").unwrap().is_none());
    }

    #[test]
    fn test_domain_round_trip() {
        let conn = wsv();
        seed(&conn);
        let query = SqliteWsvQuery::new(&conn);

        let domain = query.domain("test").unwrap().unwrap();
        assert_eq!(domain.default_role, "user");
        assert!(query.domain("missing").unwrap().is_none());
    }

    #[test]
    fn test_peers_ordered_by_address() {
        let conn = wsv();
        let cmd = SqliteWsvCommand::new(&conn);
        let query = SqliteWsvQuery::new(&conn);

        cmd.insert_peer(&Peer {
            public_key: [2u8; 32],
            address: "b:1".to_owned(),
        })
        .unwrap();
        cmd.insert_peer(&Peer {
            public_key: [1u8; 32],
            address: "a:1".to_owned(),
        })
        .unwrap();

        let peers = query.peers().unwrap();
        assert_eq!(peers.len(), 2);
        assert_eq!(peers[0].address, "a:1");
        assert_eq!(peers[0].public_key, [1u8; 32]);
    }

    #[test]
    fn test_signatories_roles_and_permissions() {
        let conn = wsv();
        seed(&conn);
        let cmd = SqliteWsvCommand::new(&conn);
        let query = SqliteWsvQuery::new(&conn);

        let key: PublicKey = [7u8; 32];
        cmd.insert_signatory(&key).unwrap();
        cmd.insert_account_signatory("alice@test", &key).unwrap();
        assert_eq!(query.account_signatories("alice@test").unwrap(), vec![key]);
        assert!(query.signatory_exists(&key).unwrap());
        assert!(!query.signatory_exists(&[8u8; 32]).unwrap());

        cmd.insert_account_role("alice@test", "user").unwrap();
        assert_eq!(
            query.account_roles("alice@test").unwrap(),
            vec!["user".to_owned()]
        );

        let permissions = ["can_transfer".to_owned()].into_iter().collect();
        cmd.insert_role_permissions("user", &permissions).unwrap();
        assert_eq!(
            query.role_permissions("user").unwrap(),
            vec!["can_transfer".to_owned()]
        );

        cmd.insert_account(&Account::new("bob@test", "test", 1))
            .unwrap();
        cmd.insert_account_grantable_permission("bob@test", "alice@test", "can_set_my_quorum")
            .unwrap();
        assert!(query
            .has_account_grantable_permission("bob@test", "alice@test", "can_set_my_quorum")
            .unwrap());
        assert!(!query
            .has_account_grantable_permission("bob@test", "alice@test", "can_transfer")
            .unwrap());
    }
}
