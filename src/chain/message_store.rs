// Copyright 2019-2026 ChainSafe Systems
// SPDX-License-Identifier: Apache-2.0, MIT

use std::sync::Arc;

use super::{persist_objects, put_cbor};
use crate::blocks::TxMeta;
use crate::message::SignedMessage;
use crate::shim::{executor::Receipt, message::Message};
use anyhow::Context as _;
use cid::Cid;
use fvm_ipld_amt::Amtv0 as Amt;
use fvm_ipld_blockstore::Blockstore;
use serde::de::DeserializeOwned;
use tracing::debug;

/// Durable storage for the message and receipt batches a block references.
pub trait MessageStore: Send + Sync {
    /// Persists both message lists and returns the CID of the [`TxMeta`]
    /// linking them.
    fn store_messages(&self, secp: &[SignedMessage], bls: &[Message]) -> anyhow::Result<Cid>;

    /// Persists an ordered receipt list and returns the root CID. An empty
    /// list yields the root of an empty array.
    fn store_receipts(&self, receipts: &[Receipt]) -> anyhow::Result<Cid>;
}

/// [`MessageStore`] writing AMT-rooted batches into a blockstore.
#[derive(Debug)]
pub struct ChainMessageStore<DB> {
    db: Arc<DB>,
}

impl<DB> ChainMessageStore<DB> {
    pub fn new(db: Arc<DB>) -> Self {
        Self { db }
    }

    pub fn blockstore(&self) -> &DB {
        &self.db
    }
}

impl<DB: Blockstore + Send + Sync> MessageStore for ChainMessageStore<DB> {
    fn store_messages(&self, secp: &[SignedMessage], bls: &[Message]) -> anyhow::Result<Cid> {
        persist_objects(self.blockstore(), bls.iter())?;
        persist_objects(self.blockstore(), secp.iter())?;

        let bls_cids = bls.iter().map(Message::cid).collect::<Result<Vec<_>, _>>()?;
        let secp_cids = secp
            .iter()
            .map(SignedMessage::cid)
            .collect::<Result<Vec<_>, _>>()?;

        let meta = TxMeta {
            bls_message_root: Amt::new_from_iter(self.blockstore(), bls_cids)?,
            secp_message_root: Amt::new_from_iter(self.blockstore(), secp_cids)?,
        };
        let cid = put_cbor(self.blockstore(), &meta)?;
        debug!(bls = bls.len(), secp = secp.len(), %cid, "stored block messages");
        Ok(cid)
    }

    fn store_receipts(&self, receipts: &[Receipt]) -> anyhow::Result<Cid> {
        let cid = Amt::new_from_iter(self.blockstore(), receipts.iter().cloned())?;
        debug!(count = receipts.len(), %cid, "stored block receipts");
        Ok(cid)
    }
}

/// Loads the messages referenced by a [`TxMeta`] CID.
pub fn block_messages<DB>(db: &DB, msg_meta: &Cid) -> anyhow::Result<(Vec<Message>, Vec<SignedMessage>)>
where
    DB: Blockstore,
{
    let meta: TxMeta = get_object(db, msg_meta)?;
    let bls = read_amt::<_, Cid>(db, &meta.bls_message_root)?
        .iter()
        .map(|cid| get_object(db, cid))
        .collect::<anyhow::Result<Vec<_>>>()?;
    let secp = read_amt::<_, Cid>(db, &meta.secp_message_root)?
        .iter()
        .map(|cid| get_object(db, cid))
        .collect::<anyhow::Result<Vec<_>>>()?;
    Ok((bls, secp))
}

/// Loads an ordered receipt list from its root CID.
pub fn read_receipts<DB>(db: &DB, root: &Cid) -> anyhow::Result<Vec<Receipt>>
where
    DB: Blockstore,
{
    read_amt(db, root)
}

fn read_amt<DB, V>(db: &DB, root: &Cid) -> anyhow::Result<Vec<V>>
where
    DB: Blockstore,
    V: DeserializeOwned + serde::Serialize + Clone,
{
    let amt = Amt::<V, _>::load(root, db)?;

    let mut values = Vec::new();
    for i in 0..amt.count() {
        if let Some(v) = amt.get(i)? {
            values.push(v.clone());
        }
    }

    Ok(values)
}

fn get_object<DB, T>(db: &DB, cid: &Cid) -> anyhow::Result<T>
where
    DB: Blockstore,
    T: DeserializeOwned,
{
    let bytes = db
        .get(cid)?
        .with_context(|| format!("no object with cid {cid} in store"))?;
    Ok(fvm_ipld_encoding::from_slice(&bytes)?)
}
