// Copyright 2019-2026 ChainSafe Systems
// SPDX-License-Identifier: Apache-2.0, MIT

use std::fmt;
use std::sync::OnceLock;

use super::{CachingBlockHeader, Error, RawBlockHeader};
use crate::shim::clock::ChainEpoch;
use crate::utils::cid::CidCborExt as _;
use cid::Cid;
use itertools::Itertools as _;
use serde::{Deserialize, Serialize};

/// A set of `CIDs` forming a unique key for a Tipset.
/// A tipset's key lists its block `CIDs` in the tipset's block order.
#[derive(
    Clone,
    Debug,
    Default,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    derive_more::From,
    derive_more::Into,
)]
#[serde(transparent)]
pub struct TipsetKey(Vec<Cid>);

impl TipsetKey {
    pub fn cids(&self) -> &[Cid] {
        &self.0
    }

    /// Returns `true` if the key holds no block CIDs (the key of genesis'
    /// parents).
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Content hash of the key, stable across processes.
    pub fn cid(&self) -> anyhow::Result<Cid> {
        Ok(Cid::from_cbor_blake2b256(&self.0)?)
    }
}

impl FromIterator<Cid> for TipsetKey {
    fn from_iter<T: IntoIterator<Item = Cid>>(iter: T) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl fmt::Display for TipsetKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{{}}}", self.0.iter().join(", "))
    }
}

/// An immutable set of blocks at the same height with the same parent set.
/// Blocks are ordered by the digest of their first ticket, then by CID.
#[derive(Clone, Debug)]
pub struct Tipset {
    /// Sorted
    headers: Vec<CachingBlockHeader>,
    // key is lazily initialized via `fn key()`.
    key: OnceLock<TipsetKey>,
}

impl PartialEq for Tipset {
    fn eq(&self, other: &Self) -> bool {
        self.headers.eq(&other.headers)
    }
}

impl Eq for Tipset {}

impl From<RawBlockHeader> for Tipset {
    fn from(value: RawBlockHeader) -> Self {
        Self::from(CachingBlockHeader::from(value))
    }
}

impl From<CachingBlockHeader> for Tipset {
    fn from(value: CachingBlockHeader) -> Self {
        Self {
            headers: vec![value],
            key: OnceLock::new(),
        }
    }
}

impl Tipset {
    /// Builds a new Tipset from a collection of blocks.
    /// A valid tipset contains a non-empty collection of blocks from distinct
    /// miners that all specify identical epoch, parents and state root.
    /// Duplicate headers are collapsed.
    pub fn new<H: Into<CachingBlockHeader>>(
        headers: impl IntoIterator<Item = H>,
    ) -> Result<Self, Error> {
        let headers = headers
            .into_iter()
            .map(Into::<CachingBlockHeader>::into)
            .unique_by(|it| *it.cid())
            .sorted_by_cached_key(|it| it.tipset_sort_key())
            .collect_vec();

        verify_block_headers(&headers)?;

        Ok(Self {
            headers,
            key: OnceLock::new(),
        })
    }

    /// Returns epoch of the tipset.
    pub fn epoch(&self) -> ChainEpoch {
        self.min_ticket_block().epoch
    }

    /// Returns the smallest ticket of all blocks in the tipset
    pub fn min_ticket_block(&self) -> &CachingBlockHeader {
        // `verify_block_headers` guarantees at least one header
        &self.headers[0]
    }

    /// Returns the parent tipset key of the tipset.
    pub fn parents(&self) -> &TipsetKey {
        &self.min_ticket_block().parents
    }

    /// Returns the state root recorded by the tipset's blocks.
    pub fn parent_state(&self) -> &Cid {
        &self.min_ticket_block().state_root
    }

    /// Returns the tipset's calculated weight
    pub fn weight(&self) -> u64 {
        self.min_ticket_block().weight
    }

    /// Returns a key for the tipset.
    pub fn key(&self) -> &TipsetKey {
        self.key
            .get_or_init(|| self.headers.iter().map(|h| *h.cid()).collect())
    }

    /// Returns slice of `CIDs` for the current tipset
    pub fn cids(&self) -> &[Cid] {
        self.key().cids()
    }

    /// Returns the number of blocks in the tipset.
    pub fn len(&self) -> usize {
        self.headers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.headers.is_empty()
    }
}

impl fmt::Display for Tipset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} @ {}", self.key(), self.epoch())
    }
}

fn verify_block_headers(headers: &[CachingBlockHeader]) -> Result<(), Error> {
    let first = headers.first().ok_or(Error::NoBlocks)?;
    for header in headers {
        if header.parents != first.parents {
            return Err(Error::InvalidTipset(
                "parent cids are not equal".to_string(),
            ));
        }
        if header.state_root != first.state_root {
            return Err(Error::InvalidTipset("state_roots are not equal".into()));
        }
        if header.epoch != first.epoch {
            return Err(Error::InvalidTipset("epochs are not equal".into()));
        }
        if header.miner_address == first.miner_address && header.cid() != first.cid() {
            return Err(Error::InvalidTipset(
                "miner_addresses are not distinct".into(),
            ));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shim::address::Address;
    use crate::test_utils::mock_header;

    fn header(miner: u64, epoch: ChainEpoch, ticket: &[u8]) -> RawBlockHeader {
        let mut raw = mock_header(epoch, TipsetKey::default(), ticket).into_raw();
        raw.miner_address = Address::new_id(miner);
        raw
    }

    #[test]
    fn empty_tipset_is_rejected() {
        assert_eq!(
            Tipset::new(Vec::<RawBlockHeader>::new()),
            Err(Error::NoBlocks)
        );
    }

    #[test]
    fn mismatched_epochs_are_rejected() {
        let result = Tipset::new([header(1, 5, b"a"), header(2, 6, b"b")]);
        assert!(matches!(result, Err(Error::InvalidTipset(_))));
    }

    #[test]
    fn duplicate_miners_are_rejected() {
        let result = Tipset::new([header(1, 5, b"a"), header(1, 5, b"b")]);
        assert!(matches!(result, Err(Error::InvalidTipset(_))));
    }

    #[test]
    fn duplicate_headers_collapse() {
        let ts = Tipset::new([header(1, 5, b"a"), header(1, 5, b"a")]).unwrap();
        assert_eq!(ts.len(), 1);
    }

    #[test]
    fn key_is_independent_of_input_order() {
        let a = header(1, 5, b"a");
        let b = header(2, 5, b"b");
        let ts1 = Tipset::new([a.clone(), b.clone()]).unwrap();
        let ts2 = Tipset::new([b, a]).unwrap();
        assert_eq!(ts1.key(), ts2.key());
        assert_eq!(ts1.key().cid().unwrap(), ts2.key().cid().unwrap());
        assert_eq!(ts1.epoch(), 5);
    }

    #[test]
    fn blocks_sort_by_ticket_digest_then_cid() {
        // the two "same" headers tie on ticket and fall back to CID order
        let headers = [
            header(1, 5, b"same"),
            header(2, 5, b"other"),
            header(3, 5, b"same"),
        ];
        let expected = headers
            .iter()
            .sorted_by_key(|h| (h.tickets[0].digest(), h.cid().to_bytes()))
            .map(RawBlockHeader::cid)
            .collect_vec();
        let ts = Tipset::new(headers.iter().rev().cloned()).unwrap();
        assert_eq!(ts.cids(), expected.as_slice());
    }

    #[test]
    fn tipset_key_serializes_as_cid_list() {
        let ts = Tipset::from(header(1, 5, b"a"));
        let bytes = fvm_ipld_encoding::to_vec(ts.key()).unwrap();
        let cids: Vec<Cid> = fvm_ipld_encoding::from_slice(&bytes).unwrap();
        assert_eq!(cids, ts.cids());
    }
}
