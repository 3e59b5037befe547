//! Simulator service: the proposal-to-block pipeline.

use std::sync::{Arc, Mutex};

use tokio::sync::broadcast;
use tracing::{debug, info, warn};

use shared_types::{Proposal, SignedBlock};

use crate::config::SimulatorConfig;
use crate::error::{Result, SimulatorError};
use crate::events::VerifiedProposalEvent;
use crate::metrics::Metrics;
use crate::ports::{
    BlockFactory, BlockQueryFactory, BlockSigner, OrderingEvent, OrderingGate, StatefulValidator,
    TemporaryWsvFactory,
};
use crate::streams::EventStream;

/// Drives candidate proposals from the ordering gate through stateful
/// validation into signed blocks.
///
/// Construction subscribes to the ordering gate's proposal stream;
/// [`run`](Simulator::run) drains that subscription one proposal at a
/// time. The two output streams fan out to any number of subscribers, who
/// must not block: they are invoked on the simulator's emission path.
pub struct Simulator {
    validator: Arc<dyn StatefulValidator>,
    temporary_factory: Arc<dyn TemporaryWsvFactory>,
    block_query_factory: Arc<dyn BlockQueryFactory>,
    block_factory: Arc<dyn BlockFactory>,
    signer: Arc<dyn BlockSigner>,

    /// Single-consumer subscription taken by `run`.
    proposals: Mutex<Option<broadcast::Receiver<OrderingEvent>>>,

    verified_tx: broadcast::Sender<VerifiedProposalEvent>,
    block_tx: broadcast::Sender<SignedBlock>,

    metrics: Metrics,
}

impl Simulator {
    /// Create a simulator and subscribe it to the ordering gate.
    pub fn new(
        ordering_gate: &dyn OrderingGate,
        validator: Arc<dyn StatefulValidator>,
        temporary_factory: Arc<dyn TemporaryWsvFactory>,
        block_query_factory: Arc<dyn BlockQueryFactory>,
        block_factory: Arc<dyn BlockFactory>,
        signer: Arc<dyn BlockSigner>,
        config: SimulatorConfig,
    ) -> Self {
        info!("initializing block simulator");
        let (verified_tx, _) = broadcast::channel(config.verified_proposal_capacity);
        let (block_tx, _) = broadcast::channel(config.block_capacity);
        let proposals = ordering_gate.on_proposal();

        Self {
            validator,
            temporary_factory,
            block_query_factory,
            block_factory,
            signer,
            proposals: Mutex::new(Some(proposals)),
            verified_tx,
            block_tx,
            metrics: Metrics::new(),
        }
    }

    /// Subscribe to verified proposals.
    #[must_use]
    pub fn on_verified_proposal(&self) -> broadcast::Receiver<VerifiedProposalEvent> {
        self.verified_tx.subscribe()
    }

    /// Subscribe to signed blocks.
    #[must_use]
    pub fn on_block(&self) -> broadcast::Receiver<SignedBlock> {
        self.block_tx.subscribe()
    }

    /// Verified proposals as a [`Stream`](tokio_stream::Stream).
    #[must_use]
    pub fn verified_proposal_stream(&self) -> EventStream<VerifiedProposalEvent> {
        EventStream::new(self.on_verified_proposal())
    }

    /// Signed blocks as a [`Stream`](tokio_stream::Stream).
    #[must_use]
    pub fn block_stream(&self) -> EventStream<SignedBlock> {
        EventStream::new(self.on_block())
    }

    /// Processing counters for this instance.
    #[must_use]
    pub fn metrics(&self) -> &Metrics {
        &self.metrics
    }

    /// Drain the ordering-gate subscription until it closes.
    ///
    /// One proposal is processed to completion before the next is
    /// consumed; the simulator is the single consumer of its input stream.
    pub async fn run(&self) {
        let receiver = self.proposals.lock().unwrap().take();
        let Some(mut receiver) = receiver else {
            warn!("simulator already running; refusing second consumer");
            return;
        };
        info!("simulator consuming ordering gate proposals");

        loop {
            match receiver.recv().await {
                Ok(event) => self.process_proposal(event.proposal).await,
                Err(broadcast::error::RecvError::Lagged(missed)) => {
                    warn!(missed, "simulator lagged behind the ordering gate");
                }
                Err(broadcast::error::RecvError::Closed) => {
                    info!("ordering gate closed; simulator stopping");
                    return;
                }
            }
        }
    }

    /// Run one proposal through the pipeline, dropping it on any failure.
    pub async fn process_proposal(&self, proposal: Proposal) {
        let height = proposal.height;
        match self.simulate(proposal).await {
            Ok(()) => self.metrics.record_processed(),
            Err(err) => {
                self.metrics.record_dropped();
                warn!(height, %err, "proposal dropped");
            }
        }
    }

    async fn simulate(&self, proposal: Proposal) -> Result<()> {
        let height = proposal.height;
        let created_at_ms = proposal.created_at_ms;

        let block_query = self
            .block_query_factory
            .create_block_query()
            .ok_or(SimulatorError::BlockQueryUnavailable)?;

        let top_block = block_query.top_block().await?;
        if top_block.height() != height.wrapping_sub(1) {
            return Err(SimulatorError::ParentHeightMismatch {
                top_height: top_block.height(),
                proposal_height: height,
            });
        }
        let prev_hash = top_block.hash();

        let mut wsv = self.temporary_factory.create_temporary_wsv().await?;
        let (verified, rejected) = self.validator.validate(proposal, &mut wsv).await?;
        debug!(
            height,
            surviving = verified.transactions.len(),
            rejected = rejected.len(),
            "stateful validation finished"
        );

        let transactions = verified.transactions.clone();
        let event = VerifiedProposalEvent {
            proposal: verified,
            rejected,
        };
        if self.verified_tx.send(event).is_err() {
            debug!(height, "verified proposal emitted with no subscribers");
        }
        self.metrics.record_verified_emitted();

        let block = self
            .block_factory
            .build_unchecked(height, prev_hash, created_at_ms, transactions);
        let signed = self.signer.sign(block).await?;

        if self.block_tx.send(signed).is_err() {
            debug!(height, "block emitted with no subscribers");
        }
        self.metrics.record_block_emitted();

        Ok(())
    }
}
