// Copyright 2019-2026 ChainSafe Systems
// SPDX-License-Identifier: Apache-2.0, MIT

use std::sync::Arc;

use crate::blocks::{
    CachingBlockHeader, ElectionProof, RawBlockHeader, Ticket, Tipset, TipsetKey, VRFProof,
};
use crate::chain::{MessageStore, put_cbor};
use crate::db::MemoryDB;
use crate::interpreter::{ApplicationResult, ApplyResult, FailedMessage, Processor};
use crate::key_management::{Key, sign};
use crate::message::SignedMessage;
use crate::miner::{PowerTable, Provider};
use crate::shim::{
    address::Address, clock::ChainEpoch, econ::TokenAmount, error::ExitCode, executor::Receipt,
    message::Message, state_tree::StateTree,
};
use crate::utils::cid::CidCborExt as _;
use ahash::HashSet;
use anyhow::{bail, ensure};
use cid::Cid;
use fvm_ipld_blockstore::Blockstore;
use fvm_ipld_encoding::RawBytes;
use parking_lot::Mutex;

/// State root every mock header points at.
pub fn genesis_state_root() -> Cid {
    Cid::from_cbor_blake2b256(&"genesis state").expect("infallible")
}

pub fn mock_header(epoch: ChainEpoch, parents: TipsetKey, ticket: &[u8]) -> CachingBlockHeader {
    let empty = Cid::from_cbor_blake2b256(&Vec::<Cid>::new()).expect("infallible");
    CachingBlockHeader::new(RawBlockHeader {
        miner_address: Address::new_id(0),
        epoch,
        messages: empty,
        message_receipts: empty,
        parents,
        weight: 0,
        election_proof: ElectionProof::default(),
        state_root: genesis_state_root(),
        tickets: vec![Ticket::new(VRFProof::new(ticket.to_vec()))],
        timestamp: 0,
        bls_aggregate: None,
        signature: None,
    })
}

/// Single-block tipset at `epoch` with the given weight.
pub fn mock_tipset(epoch: ChainEpoch, weight: u64) -> Tipset {
    let mut raw = mock_header(epoch, TipsetKey::default(), b"parent").into_raw();
    raw.weight = weight;
    Tipset::from(raw)
}

/// Builds a message from `key`'s address and signs its CID with `key`.
pub fn signed_message(key: &Key, sequence: u64, premium: u64) -> SignedMessage {
    let message = Message {
        to: Address::new_id(1000),
        from: key.address,
        sequence,
        gas_limit: 1_000_000,
        gas_premium: TokenAmount::from_atto(premium),
        ..Message::default()
    };
    let signature = sign(
        key.key_info.key_type(),
        key.key_info.private_key(),
        &message.cid().expect("infallible").to_bytes(),
    )
    .expect("signing with a generated key");
    SignedMessage::new_unchecked(message, signature)
}

/// State tree whose root hashes the ordered list of applied changes.
pub struct FakeStateTree {
    db: Arc<MemoryDB>,
    root: Cid,
    pending: Vec<Cid>,
    fail_flush: bool,
}

impl FakeStateTree {
    pub fn record(&mut self, change: Cid) {
        self.pending.push(change);
    }
}

impl StateTree for FakeStateTree {
    fn root(&self) -> Cid {
        self.root
    }

    fn flush(&mut self) -> anyhow::Result<Cid> {
        if self.fail_flush {
            bail!("state store is read-only");
        }
        if !self.pending.is_empty() {
            self.root = put_cbor(self.db.as_ref(), &(self.root, &self.pending))?;
            self.pending.clear();
        }
        Ok(self.root)
    }
}

pub struct FakePowerTable(HashSet<Address>);

impl PowerTable for FakePowerTable {
    fn has_power(&self, miner: &Address) -> bool {
        self.0.contains(miner)
    }
}

pub struct FakeProvider {
    pub db: Arc<MemoryDB>,
    pub powered: HashSet<Address>,
    pub worker: Address,
    pub fail_state_flush: bool,
    pub fail_worker_lookup: bool,
    pub detached_ancestors: bool,
}

impl FakeProvider {
    pub fn new(db: Arc<MemoryDB>, miner: Address, worker: Address) -> Self {
        Self {
            db,
            powered: [miner].into_iter().collect(),
            worker,
            fail_state_flush: false,
            fail_worker_lookup: false,
            detached_ancestors: false,
        }
    }
}

impl Provider for FakeProvider {
    type StateTree = FakeStateTree;
    type PowerTable = FakePowerTable;

    fn load_state_tree(&self, ts: &Tipset) -> anyhow::Result<FakeStateTree> {
        Ok(FakeStateTree {
            db: self.db.clone(),
            root: *ts.parent_state(),
            pending: vec![],
            fail_flush: self.fail_state_flush,
        })
    }

    fn power_table(&self, _tsk: &TipsetKey) -> anyhow::Result<FakePowerTable> {
        Ok(FakePowerTable(self.powered.clone()))
    }

    fn weight(&self, ts: &Tipset) -> anyhow::Result<u64> {
        Ok(ts.weight() + 1)
    }

    fn ancestors(&self, ts: &Tipset, _height: ChainEpoch) -> anyhow::Result<Vec<Tipset>> {
        if self.detached_ancestors {
            Ok(vec![mock_tipset(ts.epoch() + 100, 0)])
        } else {
            Ok(vec![ts.clone()])
        }
    }

    fn worker_address(&self, _miner: &Address, _tsk: &TipsetKey) -> anyhow::Result<Address> {
        ensure!(!self.fail_worker_lookup, "miner actor not found");
        Ok(self.worker)
    }
}

/// Deterministic engine: applies every message not marked as failing,
/// records it in the state tree and credits the reward owner.
#[derive(Default)]
pub struct FakeProcessor {
    pub permanent: HashSet<Cid>,
    pub temporary: HashSet<Cid>,
    pub fail: bool,
    pub drop_receipts: bool,
    /// CIDs of every message handed to the engine, in the order received.
    pub seen: Mutex<Vec<Cid>>,
}

impl Processor<FakeStateTree> for FakeProcessor {
    fn apply_messages_and_pay_rewards(
        &self,
        state_tree: &mut FakeStateTree,
        storage: &impl Blockstore,
        messages: &[SignedMessage],
        reward_owner: &Address,
        height: ChainEpoch,
        ancestors: &[Tipset],
    ) -> anyhow::Result<ApplyResult> {
        ensure!(!self.fail, "engine crashed");
        ensure!(!ancestors.is_empty(), "no ancestors");

        let mut res = ApplyResult::default();
        for msg in messages {
            let cid = msg.cid()?;
            self.seen.lock().push(cid);
            if self.permanent.contains(&cid) {
                res.permanent_failures
                    .push(FailedMessage::new(msg.clone(), "nonce too low"));
            } else if self.temporary.contains(&cid) {
                res.temporary_failures
                    .push(FailedMessage::new(msg.clone(), "nonce too high"));
            } else {
                state_tree.record(cid);
                put_cbor(storage, msg.message())?;
                res.results.push(ApplicationResult {
                    message: msg.clone(),
                    receipt: Receipt::new(ExitCode::OK, RawBytes::default(), msg.message.gas_limit / 2),
                });
                res.successful_messages.push(msg.clone());
            }
        }
        if self.drop_receipts {
            res.results.clear();
        }
        state_tree.record(Cid::from_cbor_blake2b256(&(reward_owner.to_bytes(), height))?);
        Ok(res)
    }
}

/// Blockstore that holds nothing and rejects every write.
#[derive(Default)]
pub struct FailingBlockstore;

impl Blockstore for FailingBlockstore {
    fn get(&self, _k: &Cid) -> anyhow::Result<Option<Vec<u8>>> {
        Ok(None)
    }

    fn put_keyed(&self, _k: &Cid, _block: &[u8]) -> anyhow::Result<()> {
        bail!("disk full")
    }
}

/// Message store whose writes always fail.
pub struct FailingMessageStore;

impl MessageStore for FailingMessageStore {
    fn store_messages(&self, _secp: &[SignedMessage], _bls: &[Message]) -> anyhow::Result<Cid> {
        bail!("disk full")
    }

    fn store_receipts(&self, _receipts: &[Receipt]) -> anyhow::Result<Cid> {
        bail!("disk full")
    }
}
