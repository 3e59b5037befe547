//! # Simulator Pipeline Flows
//!
//! The full ordering → simulator → block path against real adapters:
//! flat-file block storage, in-memory temporary WSVs, and Ed25519 signing.
//! The validator used here interprets each transaction payload as a
//! role-creation command so that validation genuinely runs against the
//! temporary world state.

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    use async_trait::async_trait;
    use tokio::sync::broadcast;
    use tokio::time::{timeout, Duration};

    use arbor_simulator::{
        BlockSigner, Ed25519BlockSigner, FlatFileBlockStore, FlatFileBlockStoreFactory,
        InMemoryWsvFactory, OrderingEvent, OrderingGate, Simulator, SimulatorConfig,
        StandardBlockFactory, StatefulValidator,
    };
    use arbor_wsv::ports::WsvCommand;
    use arbor_wsv::TemporaryWsv;
    use shared_crypto::{Ed25519PublicKey, Ed25519Signature};
    use shared_types::{Block, Proposal, SignedBlock, Transaction, TransactionError};

    // =========================================================================
    // TEST FIXTURES
    // =========================================================================

    struct ChannelOrderingGate {
        sender: broadcast::Sender<OrderingEvent>,
    }

    impl ChannelOrderingGate {
        fn new() -> Self {
            let (sender, _) = broadcast::channel(16);
            Self { sender }
        }

        fn send(&self, proposal: Proposal) {
            self.sender.send(OrderingEvent { proposal }).unwrap();
        }
    }

    impl OrderingGate for ChannelOrderingGate {
        fn on_proposal(&self) -> broadcast::Receiver<OrderingEvent> {
            self.sender.subscribe()
        }
    }

    /// Treats each transaction payload as a role name and replays it
    /// against the temporary WSV; transactions whose insert the store
    /// rejects are reported as errors.
    struct RoleCreationValidator {
        calls: AtomicUsize,
    }

    impl RoleCreationValidator {
        fn new() -> Self {
            Self {
                calls: AtomicUsize::new(0),
            }
        }
    }

    #[async_trait]
    impl StatefulValidator for RoleCreationValidator {
        async fn validate(
            &self,
            proposal: Proposal,
            wsv: &mut TemporaryWsv,
        ) -> arbor_simulator::Result<(Proposal, Vec<TransactionError>)> {
            self.calls.fetch_add(1, Ordering::SeqCst);

            let mut surviving = Vec::new();
            let mut rejected = Vec::new();
            {
                let cmd = wsv.command();
                for tx in proposal.transactions {
                    let role = String::from_utf8_lossy(&tx.payload).into_owned();
                    match cmd.insert_role(&role) {
                        Ok(()) => surviving.push(tx),
                        Err(err) => rejected.push(TransactionError {
                            command_name: "CreateRole".to_owned(),
                            reason: err.to_string(),
                            tx_hash: tx.hash(),
                        }),
                    }
                }
            }

            Ok((
                Proposal {
                    height: proposal.height,
                    created_at_ms: proposal.created_at_ms,
                    transactions: surviving,
                },
                rejected,
            ))
        }
    }

    fn tx(role: &str) -> Transaction {
        Transaction {
            creator_account_id: "admin@root".to_owned(),
            created_at_ms: 1_700_000_000_000,
            payload: role.as_bytes().to_vec(),
        }
    }

    fn proposal(height: u64, roles: &[&str]) -> Proposal {
        Proposal {
            height,
            created_at_ms: 1_700_000_000_500,
            transactions: roles.iter().map(|r| tx(r)).collect(),
        }
    }

    struct Pipeline {
        gate: ChannelOrderingGate,
        store: Arc<FlatFileBlockStore>,
        validator: Arc<RoleCreationValidator>,
        simulator: Simulator,
        _dir: tempfile::TempDir,
    }

    /// Wire a simulator to a flat-file store seeded with `committed`
    /// blocks, all signed by the node key.
    async fn pipeline(committed_heights: &[u64]) -> Pipeline {
        let dir = tempfile::tempdir().unwrap();
        let store = Arc::new(FlatFileBlockStore::open(dir.path()).unwrap());
        let signer = Arc::new(Ed25519BlockSigner::from_seed([11u8; 32]));

        let mut prev_hash = [0u8; 32];
        for &height in committed_heights {
            let block = Block {
                height,
                prev_hash,
                created_at_ms: height * 1_000,
                transactions: vec![],
            };
            prev_hash = block.hash();
            let signed = signer.sign(block).await.unwrap();
            store.insert(&signed).unwrap();
        }

        let gate = ChannelOrderingGate::new();
        let validator = Arc::new(RoleCreationValidator::new());
        let simulator = Simulator::new(
            &gate,
            validator.clone(),
            Arc::new(InMemoryWsvFactory::new()),
            Arc::new(FlatFileBlockStoreFactory::new(store.clone())),
            Arc::new(StandardBlockFactory),
            signer,
            SimulatorConfig::default(),
        );

        Pipeline {
            gate,
            store,
            validator,
            simulator,
            _dir: dir,
        }
    }

    // =========================================================================
    // INTEGRATION TESTS: ORDERING → SIMULATOR → BLOCK
    // =========================================================================

    #[tokio::test]
    async fn test_proposal_on_top_of_committed_chain_becomes_block() {
        crate::init_tracing();
        let p = pipeline(&[1]).await;
        let expected_prev = p.store.fetch(1).unwrap().unwrap().hash();

        let mut verified_rx = p.simulator.on_verified_proposal();
        let mut block_rx = p.simulator.on_block();

        p.simulator
            .process_proposal(proposal(2, &["role_a", "role_b"]))
            .await;

        let event = verified_rx.try_recv().unwrap();
        assert_eq!(event.proposal.height, 2);
        assert_eq!(event.proposal.transactions.len(), 2);
        assert!(event.rejected.is_empty());

        let block = block_rx.try_recv().unwrap();
        assert_eq!(block.height(), 2);
        assert_eq!(block.block.prev_hash, expected_prev);
        assert_eq!(block.block.transactions, event.proposal.transactions);

        // The emitted block carries a genuine node signature.
        let key = Ed25519PublicKey::from_bytes(block.public_key).unwrap();
        let signature = Ed25519Signature::from_bytes(block.signature);
        assert!(key.verify(&block.block.hash(), &signature).is_ok());
    }

    #[tokio::test]
    async fn test_empty_chain_drops_proposal_without_validation() {
        let p = pipeline(&[]).await;

        let mut verified_rx = p.simulator.on_verified_proposal();
        let mut block_rx = p.simulator.on_block();

        p.simulator.process_proposal(proposal(2, &["role_a"])).await;

        assert!(verified_rx.try_recv().is_err());
        assert!(block_rx.try_recv().is_err());
        assert_eq!(p.validator.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_already_committed_height_is_dropped() {
        let p = pipeline(&[1, 2]).await;

        let mut verified_rx = p.simulator.on_verified_proposal();
        let mut block_rx = p.simulator.on_block();

        p.simulator.process_proposal(proposal(2, &["role_a"])).await;

        assert!(verified_rx.try_recv().is_err());
        assert!(block_rx.try_recv().is_err());
        assert_eq!(p.validator.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_statefully_invalid_transactions_are_filtered() {
        let p = pipeline(&[1, 2]).await;

        let mut verified_rx = p.simulator.on_verified_proposal();
        let mut block_rx = p.simulator.on_block();

        // The duplicate role insertions fail stateful validation.
        p.simulator
            .process_proposal(proposal(3, &["role_a", "role_a", "role_a"]))
            .await;

        let event = verified_rx.try_recv().unwrap();
        assert_eq!(event.proposal.transactions.len(), 1);
        assert_eq!(event.rejected.len(), 2);
        assert!(event.rejected[0].reason.contains("role_a"));

        let block = block_rx.try_recv().unwrap();
        assert_eq!(block.height(), 3);
        assert_eq!(block.block.transactions.len(), 1);
    }

    #[tokio::test]
    async fn test_chain_grows_across_rounds_through_the_gate() {
        crate::init_tracing();
        let p = pipeline(&[1]).await;

        let mut block_rx = p.simulator.block_stream();

        let simulator = Arc::new(p.simulator);
        let runner = {
            let simulator = simulator.clone();
            tokio::spawn(async move { simulator.run().await })
        };

        // Round one: height 2 extends the committed chain.
        p.gate.send(proposal(2, &["role_a"]));
        let block2: SignedBlock = timeout(Duration::from_secs(1), block_rx.recv())
            .await
            .unwrap()
            .unwrap();
        assert_eq!(block2.height(), 2);

        // Commit it, then round two extends on top of it.
        p.store.insert(&block2).unwrap();
        p.gate.send(proposal(3, &["role_b"]));
        let block3: SignedBlock = timeout(Duration::from_secs(1), block_rx.recv())
            .await
            .unwrap()
            .unwrap();
        assert_eq!(block3.height(), 3);
        assert_eq!(block3.block.prev_hash, block2.hash());

        drop(p.gate);
        timeout(Duration::from_secs(1), runner).await.unwrap().unwrap();
    }
}
