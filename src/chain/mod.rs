// Copyright 2019-2026 ChainSafe Systems
// SPDX-License-Identifier: Apache-2.0, MIT

mod message_store;

pub use self::message_store::{ChainMessageStore, MessageStore, block_messages, read_receipts};

use cid::Cid;
use fvm_ipld_blockstore::Blockstore;
use multihash_codetable::{Code, MultihashDigest as _};
use serde::Serialize;

/// Persists a sequence of `serializable` objects to `blockstore` under their
/// `dag-cbor` BLAKE2b-256 CIDs.
pub fn persist_objects<'a, DB, C>(
    db: &DB,
    objects: impl Iterator<Item = &'a C>,
) -> anyhow::Result<()>
where
    DB: Blockstore,
    C: Serialize + 'a,
{
    for obj in objects {
        put_cbor(db, obj)?;
    }
    Ok(())
}

/// Writes a single object and returns its CID.
pub(crate) fn put_cbor<DB, C>(db: &DB, obj: &C) -> anyhow::Result<Cid>
where
    DB: Blockstore,
    C: Serialize,
{
    let bytes = fvm_ipld_encoding::to_vec(obj)?;
    let cid = Cid::new_v1(fvm_ipld_encoding::DAG_CBOR, Code::Blake2b256.digest(&bytes));
    db.put_keyed(&cid, &bytes)?;
    Ok(cid)
}
