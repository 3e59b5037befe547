//! # Durable WSV Flows
//!
//! Exercises the command layer the way a committer does: one cursor, one
//! explicit transaction per block, reads through the query twin.

#[cfg(test)]
mod tests {
    use rusqlite::Connection;

    use arbor_wsv::ports::{WsvCommand, WsvQuery};
    use arbor_wsv::{prepare_connection, SqliteWsvCommand, SqliteWsvQuery};
    use shared_types::{Account, AccountAsset, Asset, Domain, Peer, PublicKey};

    fn durable_wsv() -> Connection {
        let conn = Connection::open_in_memory().unwrap();
        prepare_connection(&conn).unwrap();
        conn
    }

    /// A committer applying a block's worth of mutations under one
    /// transaction, then reading the result back.
    #[test]
    fn test_committer_style_block_application() {
        let conn = durable_wsv();
        let cmd = SqliteWsvCommand::new(&conn);
        let query = SqliteWsvQuery::new(&conn);

        conn.execute_batch("BEGIN").unwrap();
        cmd.insert_role("user").unwrap();
        cmd.insert_domain(&Domain {
            domain_id: "wonderland".to_owned(),
            default_role: "user".to_owned(),
        })
        .unwrap();
        cmd.insert_account(&Account::new("alice@wonderland", "wonderland", 1))
            .unwrap();
        cmd.insert_asset(&Asset {
            asset_id: "rose#wonderland".to_owned(),
            domain_id: "wonderland".to_owned(),
            precision: 2,
        })
        .unwrap();
        cmd.upsert_account_asset(&AccountAsset {
            account_id: "alice@wonderland".to_owned(),
            asset_id: "rose#wonderland".to_owned(),
            amount: "100.00".to_owned(),
        })
        .unwrap();
        conn.execute_batch("COMMIT").unwrap();

        let account = query.account("alice@wonderland").unwrap().unwrap();
        assert_eq!(account.domain_id, "wonderland");
        let holding = query
            .account_asset("alice@wonderland", "rose#wonderland")
            .unwrap()
            .unwrap();
        assert_eq!(holding.amount, "100.00");
    }

    /// A constraint violation mid-block lets the committer roll the whole
    /// block back; none of its effects survive.
    #[test]
    fn test_failed_block_rolls_back_cleanly() {
        let conn = durable_wsv();
        let cmd = SqliteWsvCommand::new(&conn);
        let query = SqliteWsvQuery::new(&conn);

        cmd.insert_role("user").unwrap();

        conn.execute_batch("BEGIN").unwrap();
        cmd.insert_domain(&Domain {
            domain_id: "wonderland".to_owned(),
            default_role: "user".to_owned(),
        })
        .unwrap();
        // Dangling domain reference: the store rejects it.
        let err = cmd
            .insert_account(&Account::new("alice@nowhere", "nowhere", 1))
            .unwrap_err();
        assert!(err.is_constraint_violation());
        conn.execute_batch("ROLLBACK").unwrap();

        assert!(query.domain("wonderland").unwrap().is_none());
        assert!(query.account("alice@nowhere").unwrap().is_none());
    }

    /// Account key-value writes keep each creator's subtree isolated.
    #[test]
    fn test_account_kv_accumulates_per_creator() {
        let conn = durable_wsv();
        let cmd = SqliteWsvCommand::new(&conn);
        let query = SqliteWsvQuery::new(&conn);

        cmd.insert_role("user").unwrap();
        cmd.insert_domain(&Domain {
            domain_id: "test".to_owned(),
            default_role: "user".to_owned(),
        })
        .unwrap();
        cmd.insert_account(&Account::new("a@test", "test", 1)).unwrap();

        cmd.set_account_kv("a@test", "admin", "k1", "v1").unwrap();
        cmd.set_account_kv("a@test", "admin", "k2", "v2").unwrap();
        cmd.set_account_kv("a@test", "other", "k1", "z").unwrap();

        let account = query.account("a@test").unwrap().unwrap();
        let data: serde_json::Value = serde_json::from_str(&account.json_data).unwrap();
        assert_eq!(
            data,
            serde_json::json!({
                "admin": {"k1": "v1", "k2": "v2"},
                "other": {"k1": "z"},
            })
        );
    }

    /// Signatory rows survive exactly as long as an account or peer
    /// references them.
    #[test]
    fn test_signatory_lifecycle_across_account_and_peer() {
        let conn = durable_wsv();
        let cmd = SqliteWsvCommand::new(&conn);
        let query = SqliteWsvQuery::new(&conn);

        cmd.insert_role("user").unwrap();
        cmd.insert_domain(&Domain {
            domain_id: "test".to_owned(),
            default_role: "user".to_owned(),
        })
        .unwrap();
        cmd.insert_account(&Account::new("a@test", "test", 1)).unwrap();

        let key: PublicKey = [0xC4; 32];
        let peer = Peer {
            public_key: key,
            address: "10.0.0.9:10001".to_owned(),
        };

        cmd.insert_signatory(&key).unwrap();
        cmd.insert_account_signatory("a@test", &key).unwrap();
        cmd.insert_peer(&peer).unwrap();

        // Still referenced twice: the sweep leaves the row in place.
        cmd.delete_signatory(&key).unwrap();
        assert!(query.signatory_exists(&key).unwrap());

        cmd.delete_peer(&peer).unwrap();
        cmd.delete_signatory(&key).unwrap();
        assert!(query.signatory_exists(&key).unwrap());

        cmd.delete_account_signatory("a@test", &key).unwrap();
        cmd.delete_signatory(&key).unwrap();
        assert!(!query.signatory_exists(&key).unwrap());
    }
}
