// Copyright 2019-2026 ChainSafe Systems
// SPDX-License-Identifier: Apache-2.0, MIT

use ahash::HashMap;
use cid::Cid;
use fvm_ipld_blockstore::Blockstore;
use parking_lot::RwLock;
use tracing::debug;

/// Scratch storage for a single state transition. Writes are buffered in
/// memory and reach the backing store only on [`StorageMap::flush`]; reads
/// see buffered writes first. Dropping an unflushed map discards its writes.
pub struct StorageMap<'a, DB> {
    db: &'a DB,
    buffer: RwLock<HashMap<Cid, Vec<u8>>>,
}

impl<'a, DB: Blockstore> StorageMap<'a, DB> {
    pub fn new(db: &'a DB) -> Self {
        Self {
            db,
            buffer: Default::default(),
        }
    }

    /// Number of buffered, unflushed blocks.
    pub fn pending(&self) -> usize {
        self.buffer.read().len()
    }

    /// Writes every buffered block to the backing store. On error the
    /// buffer is left intact.
    pub fn flush(&self) -> anyhow::Result<()> {
        let mut buffer = self.buffer.write();
        if buffer.is_empty() {
            return Ok(());
        }
        self.db
            .put_many_keyed(buffer.iter().map(|(cid, data)| (*cid, data.as_slice())))?;
        debug!("flushed {} blocks from storage map", buffer.len());
        buffer.clear();
        Ok(())
    }
}

impl<DB: Blockstore> Blockstore for StorageMap<'_, DB> {
    fn get(&self, k: &Cid) -> anyhow::Result<Option<Vec<u8>>> {
        if let Some(data) = self.buffer.read().get(k) {
            return Ok(Some(data.clone()));
        }
        self.db.get(k)
    }

    fn put_keyed(&self, k: &Cid, block: &[u8]) -> anyhow::Result<()> {
        self.buffer.write().insert(*k, block.to_vec());
        Ok(())
    }
}
