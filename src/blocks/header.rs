// Copyright 2019-2026 ChainSafe Systems
// SPDX-License-Identifier: Apache-2.0, MIT

use std::sync::OnceLock;

use super::{ElectionProof, Error, Ticket, TipsetKey};
use crate::shim::{address::Address, clock::ChainEpoch, crypto::Signature};
use crate::utils::cid::CidCborExt as _;
use cid::Cid;
use fvm_ipld_encoding::tuple::*;
use serde::{Deserialize, Serialize};

/// Block header. The tuple field order is the canonical encoding used for
/// both the header CID and the signing bytes; reordering fields breaks
/// signature verification against previously produced blocks.
#[derive(Deserialize_tuple, Serialize_tuple, Clone, Hash, Eq, PartialEq, Debug)]
pub struct RawBlockHeader {
    /// The address of the miner actor that mined this block
    pub miner_address: Address,
    /// Height of this block. Parent height plus one, plus any null rounds in
    /// between.
    pub epoch: ChainEpoch,
    /// The CID of the [`TxMeta`](super::TxMeta) linking `bls_messages` and
    /// `secp_messages`
    pub messages: Cid,
    /// The CID of the root of an array of `MessageReceipts`
    pub message_receipts: Cid,
    /// The set of parents this block was based on.
    /// Typically one, but can be several in the case where there were multiple
    /// winning ticket-holders for an epoch
    pub parents: TipsetKey,
    /// The aggregate chain weight of the parent set
    pub weight: u64,
    /// Proof that this miner won the election for the round
    pub election_proof: ElectionProof,
    /// The CID of the state root after applying this block's messages.
    pub state_root: Cid,
    pub tickets: Vec<Ticket>,
    /// Block creation time, in seconds since the Unix epoch
    pub timestamp: u64,
    /// Aggregate signature of the BLS messages in this block
    pub bls_aggregate: Option<Signature>,
    pub signature: Option<Signature>,
}

impl RawBlockHeader {
    pub fn cid(&self) -> Cid {
        Cid::from_cbor_blake2b256(self).expect("CBOR serialization failed")
    }

    pub(super) fn tipset_sort_key(&self) -> ([u8; 32], Vec<u8>) {
        let ticket_hash = self
            .tickets
            .first()
            .map(Ticket::digest)
            .unwrap_or_default();
        (ticket_hash, self.cid().to_bytes())
    }

    /// Check to ensure block signature is valid
    pub fn verify_signature_against(&self, addr: &Address) -> Result<(), Error> {
        let signature = self
            .signature
            .as_ref()
            .ok_or_else(|| Error::InvalidSignature("Signature is nil in header".to_owned()))?;

        let signing_bytes = self
            .signing_bytes()
            .map_err(|e| Error::InvalidSignature(format!("Block encoding failed: {e}")))?;

        signature
            .verify(&signing_bytes, addr)
            .map_err(|e| Error::InvalidSignature(format!("Block signature invalid: {e}")))?;

        Ok(())
    }

    /// Serializes the header to bytes for signing purposes i.e. without the
    /// signature field
    pub fn signing_bytes(&self) -> Result<Vec<u8>, fvm_ipld_encoding::Error> {
        let mut blk = self.clone();
        blk.signature = None;
        fvm_ipld_encoding::to_vec(&blk)
    }
}

/// A [`RawBlockHeader`] which caches its CID.
#[derive(Debug, Clone, derive_more::Deref)]
pub struct CachingBlockHeader {
    #[deref]
    uncached: RawBlockHeader,
    cid: OnceLock<Cid>,
}

impl PartialEq for CachingBlockHeader {
    fn eq(&self, other: &Self) -> bool {
        // Epoch check is redundant but cheap.
        self.uncached.epoch == other.uncached.epoch && self.cid() == other.cid()
    }
}

impl Eq for CachingBlockHeader {}

impl From<RawBlockHeader> for CachingBlockHeader {
    fn from(value: RawBlockHeader) -> Self {
        Self::new(value)
    }
}

impl CachingBlockHeader {
    pub fn new(uncached: RawBlockHeader) -> Self {
        Self {
            uncached,
            cid: OnceLock::new(),
        }
    }

    pub fn into_raw(self) -> RawBlockHeader {
        self.uncached
    }

    pub fn cid(&self) -> &Cid {
        self.cid.get_or_init(|| self.uncached.cid())
    }

    /// Checks the signature against `addr`. Not cached: the same header may
    /// be checked against different addresses.
    pub fn verify_signature_against(&self, addr: &Address) -> Result<(), Error> {
        self.uncached.verify_signature_against(addr)
    }
}

impl From<CachingBlockHeader> for RawBlockHeader {
    fn from(value: CachingBlockHeader) -> Self {
        value.into_raw()
    }
}

impl Serialize for CachingBlockHeader {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        self.uncached.serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for CachingBlockHeader {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        RawBlockHeader::deserialize(deserializer).map(Self::new)
    }
}
