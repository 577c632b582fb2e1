// Copyright 2019-2026 ChainSafe Systems
// SPDX-License-Identifier: Apache-2.0, MIT

use crate::message::SignedMessage;
use cid::Cid;

/// Pool operations the block generator relies on. Implementations must make
/// claims exclusive: a message handed out by [`MessageSource::claim_pending`]
/// is not handed out again until it is released.
pub trait MessageSource: Send + Sync {
    /// Returns every pending message not currently claimed, keyed by CID,
    /// and marks them claimed. Messages stay in the pool.
    fn claim_pending(&self) -> Vec<(Cid, SignedMessage)>;

    /// Drops the claim on the given messages. Unknown CIDs are ignored.
    fn release(&self, cids: &[Cid]);

    /// Removes a message from the pool. Returns `false` if the message was
    /// not in the pool, in which case nothing changes.
    fn remove(&self, cid: &Cid) -> bool;
}

/// Holds a claim on a set of pool messages for the duration of one
/// generation attempt and releases it on drop.
pub struct ClaimGuard<'a, S: MessageSource + ?Sized> {
    source: &'a S,
    cids: Vec<Cid>,
}

impl<S: MessageSource + ?Sized> ClaimGuard<'_, S> {
    pub fn cids(&self) -> &[Cid] {
        &self.cids
    }
}

impl<S: MessageSource + ?Sized> Drop for ClaimGuard<'_, S> {
    fn drop(&mut self) {
        if !self.cids.is_empty() {
            self.source.release(&self.cids);
        }
    }
}

/// Claims every unclaimed pending message of `source`.
pub fn claim<S: MessageSource + ?Sized>(source: &S) -> (ClaimGuard<'_, S>, Vec<SignedMessage>) {
    let (cids, messages) = source.claim_pending().into_iter().unzip();
    (ClaimGuard { source, cids }, messages)
}
