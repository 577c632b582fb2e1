// Copyright 2019-2026 ChainSafe Systems
// SPDX-License-Identifier: Apache-2.0, MIT

use crate::chain::persist_objects;
use crate::message::SignedMessage;
use crate::shim::message::Message;
use cid::Cid;
use fvm_ipld_blockstore::Blockstore;
use fvm_ipld_encoding::tuple::*;

use super::CachingBlockHeader;

/// A signed header together with the messages it commits to. BLS messages are
/// carried unsigned; their signatures live in the header's aggregate.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Block {
    pub header: CachingBlockHeader,
    pub bls_messages: Vec<Message>,
    pub secp_messages: Vec<SignedMessage>,
}

impl std::hash::Hash for Block {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        std::hash::Hash::hash(self.cid(), state)
    }
}

impl Block {
    pub fn cid(&self) -> &Cid {
        self.header.cid()
    }

    /// Number of messages included, of either kind.
    pub fn message_count(&self) -> usize {
        self.bls_messages.len() + self.secp_messages.len()
    }

    /// Writes the header and every message to `db`.
    pub fn persist(&self, db: &impl Blockstore) -> anyhow::Result<()> {
        persist_objects(db, std::iter::once(&self.header))?;
        persist_objects(db, self.bls_messages.iter())?;
        persist_objects(db, self.secp_messages.iter())
    }
}

/// Root of a block's message batch: one array of BLS message CIDs and one of
/// secp256k1 message CIDs, each in inclusion order.
#[derive(Clone, Debug, PartialEq, Eq, Serialize_tuple, Deserialize_tuple)]
pub struct TxMeta {
    pub bls_message_root: Cid,
    pub secp_message_root: Cid,
}
