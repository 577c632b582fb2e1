// Copyright 2019-2026 ChainSafe Systems
// SPDX-License-Identifier: Apache-2.0, MIT

// In-memory pool of pending signed messages. Messages are added by the local
// node and handed to the block generator through exclusive claims.

use crate::message::SignedMessage;
use crate::message_pool::{errors::Error, metrics, msgpool::provider::MessageSource};
use ahash::{HashMap, HashSet};
use cid::Cid;
use parking_lot::RwLock as SyncRwLock;
use tracing::debug;

#[derive(Default, Debug)]
struct PoolState {
    pending: HashMap<Cid, SignedMessage>,
    claimed: HashSet<Cid>,
}

/// This contains all necessary information needed for the message pool.
#[derive(Default, Debug)]
pub struct MessagePool {
    state: SyncRwLock<PoolState>,
}

impl MessagePool {
    pub fn new() -> Self {
        Self::default()
    }

    /// Verifies the message signature and adds it to the pool, returning its
    /// CID.
    pub fn add(&self, msg: SignedMessage) -> Result<Cid, Error> {
        msg.verify()
            .map_err(|e| Error::InvalidSignature(e.to_string()))?;
        self.add_unverified(msg)
    }

    /// Adds a message without checking its signature.
    pub fn add_unverified(&self, msg: SignedMessage) -> Result<Cid, Error> {
        let cid = msg.cid()?;
        let mut state = self.state.write();
        if state.pending.contains_key(&cid) {
            return Err(Error::DuplicateMessage);
        }
        state.pending.insert(cid, msg);
        metrics::MPOOL_MESSAGE_TOTAL.inc();
        Ok(cid)
    }

    /// Snapshot of all pending messages, claimed or not. Does not remove
    /// anything from the pool.
    pub fn pending(&self) -> Vec<SignedMessage> {
        self.state.read().pending.values().cloned().collect()
    }

    pub fn contains(&self, cid: &Cid) -> bool {
        self.state.read().pending.contains_key(cid)
    }

    pub fn is_claimed(&self, cid: &Cid) -> bool {
        self.state.read().claimed.contains(cid)
    }

    pub fn len(&self) -> usize {
        self.state.read().pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.state.read().pending.is_empty()
    }
}

impl MessageSource for MessagePool {
    fn claim_pending(&self) -> Vec<(Cid, SignedMessage)> {
        let mut state = self.state.write();
        let PoolState { pending, claimed } = &mut *state;
        let unclaimed: Vec<_> = pending
            .iter()
            .filter(|(cid, _)| !claimed.contains(*cid))
            .map(|(cid, msg)| (*cid, msg.clone()))
            .collect();
        claimed.extend(unclaimed.iter().map(|(cid, _)| *cid));
        debug!("claimed {} pending messages", unclaimed.len());
        unclaimed
    }

    fn release(&self, cids: &[Cid]) {
        let mut state = self.state.write();
        for cid in cids {
            state.claimed.remove(cid);
        }
    }

    fn remove(&self, cid: &Cid) -> bool {
        let mut state = self.state.write();
        state.claimed.remove(cid);
        let removed = state.pending.remove(cid).is_some();
        if removed {
            metrics::MPOOL_MESSAGE_TOTAL.dec();
        }
        removed
    }
}
