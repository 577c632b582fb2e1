// Copyright 2019-2026 ChainSafe Systems
// SPDX-License-Identifier: Apache-2.0, MIT

// Block generation turns a parent tipset, the winning tickets and an
// election proof into a signed block whose state root reflects every pending
// message the state-transition engine accepted.

use std::sync::Arc;
use std::time::Instant;

use super::{
    ChainContext, Error, MinerConfig, Provider, aggregate_bls, divide_messages,
    metrics::{BLOCKS_GENERATED, GENERATION_FAILURE, GENERATION_TIME},
    partition::application_order,
    reconcile,
};
use crate::blocks::{Block, CachingBlockHeader, ElectionProof, RawBlockHeader, Ticket, Tipset};
use crate::chain::MessageStore;
use crate::db::StorageMap;
use crate::interpreter::Processor;
use crate::key_management::Signer;
use crate::message_pool::{MessageQueue, MessageSource, claim};
use crate::metrics::{HistogramTimerExt as _, StageLabel};
use crate::shim::state_tree::StateTree as _;
use crate::utils::clock::Clock;
use anyhow::Context as _;
use fvm_ipld_blockstore::Blockstore;
use tracing::{debug, info, warn};

/// Produces candidate blocks for one miner.
pub struct Generator<P, E, DB> {
    config: MinerConfig,
    provider: Arc<P>,
    processor: Arc<E>,
    blockstore: Arc<DB>,
    message_source: Arc<dyn MessageSource>,
    message_store: Arc<dyn MessageStore>,
    signer: Arc<dyn Signer>,
    clock: Arc<dyn Clock>,
}

impl<P, E, DB> Generator<P, E, DB>
where
    P: Provider,
    E: Processor<P::StateTree>,
    DB: Blockstore,
{
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        config: MinerConfig,
        provider: Arc<P>,
        processor: Arc<E>,
        blockstore: Arc<DB>,
        message_source: Arc<dyn MessageSource>,
        message_store: Arc<dyn MessageStore>,
        signer: Arc<dyn Signer>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            config,
            provider,
            processor,
            blockstore,
            message_source,
            message_store,
            signer,
            clock,
        }
    }

    /// Generates a signed block on top of `parent`, `null_block_count` empty
    /// rounds later, from the messages currently pending in the pool.
    ///
    /// On error the pool is left as it was. On success permanently failed
    /// messages have been removed from it.
    #[tracing::instrument(
        skip_all,
        fields(parent = %parent, null_block_count = null_block_count)
    )]
    pub fn generate(
        &self,
        parent: &Tipset,
        tickets: Vec<Ticket>,
        election_proof: ElectionProof,
        null_block_count: u64,
    ) -> Result<Block, Error> {
        let start = Instant::now();
        let result = {
            let _timer = GENERATION_TIME.start_timer();
            self.generate_block(parent, tickets, election_proof, null_block_count)
        };
        match &result {
            Ok(block) => {
                BLOCKS_GENERATED.inc();
                info!(
                    cid = %block.cid(),
                    epoch = block.header.epoch,
                    bls_messages = block.bls_messages.len(),
                    secp_messages = block.secp_messages.len(),
                    "generated block"
                );
            }
            Err(e) => {
                GENERATION_FAILURE
                    .get_or_create(&StageLabel::new(e.stage()))
                    .inc();
                warn!("block generation failed: {e}");
            }
        }
        info!(
            "[TIMER] Generator::generate base tipset: {parent} - elapsed time: {}ms",
            start.elapsed().as_millis()
        );
        result
    }

    fn generate_block(
        &self,
        parent: &Tipset,
        tickets: Vec<Ticket>,
        election_proof: ElectionProof,
        null_block_count: u64,
    ) -> Result<Block, Error> {
        let miner_address = self.config.miner_address;
        let ChainContext {
            mut state_tree,
            ancestors,
            weight,
            height,
        } = ChainContext::resolve(
            self.provider.as_ref(),
            parent,
            &miner_address,
            null_block_count,
        )?;

        // Claimed messages are released when `_claim` drops, on every path.
        let (_claim, pending) = claim(self.message_source.as_ref());
        let messages = application_order(MessageQueue::new(pending).drain());
        debug!("applying {} pending messages", messages.len());

        let storage = StorageMap::new(self.blockstore.as_ref());
        let res = self
            .processor
            .apply_messages_and_pay_rewards(
                &mut state_tree,
                &storage,
                &messages,
                &self.config.owner_address,
                height,
                &ancestors,
            )
            .context("generate apply messages")
            .map_err(Error::Application)?;
        res.validate(&messages)
            .context("inconsistent apply result")
            .map_err(Error::Application)?;

        let state_root = state_tree
            .flush()
            .context("generate flush state tree")
            .map_err(Error::Flush)?;
        storage
            .flush()
            .context("generate flush vm storage map")
            .map_err(Error::Flush)?;

        let receipts = res.receipts();
        let (mined_secp, mined_bls) = divide_messages(res.successful_messages.iter().cloned());
        let (unwrapped_bls, bls_aggregate) =
            aggregate_bls(&mined_bls).map_err(Error::Aggregation)?;

        let messages_root = self
            .message_store
            .store_messages(&mined_secp, &unwrapped_bls)
            .context("error persisting messages")
            .map_err(Error::Persistence)?;
        let receipts_root = self
            .message_store
            .store_receipts(&receipts)
            .context("error persisting receipts")
            .map_err(Error::Persistence)?;

        let mut header = RawBlockHeader {
            miner_address,
            epoch: height,
            messages: messages_root,
            message_receipts: receipts_root,
            parents: parent.key().clone(),
            weight,
            election_proof,
            state_root,
            tickets,
            timestamp: self.clock.now_unix(),
            bls_aggregate: Some(bls_aggregate),
            signature: None,
        };

        let worker = self
            .provider
            .worker_address(&miner_address, parent.key())
            .context("failed to read worker address during block generation")
            .map_err(Error::WorkerLookup)?;
        let signing_bytes = header
            .signing_bytes()
            .context("failed to encode block for signing")
            .map_err(Error::Signing)?;
        header.signature = Some(
            self.signer
                .sign_bytes(&signing_bytes, &worker)
                .map_err(Error::Signing)?,
        );

        reconcile(self.message_source.as_ref(), &res);

        Ok(Block {
            header: CachingBlockHeader::new(header),
            bls_messages: unwrapped_bls,
            secp_messages: mined_secp,
        })
    }
}
