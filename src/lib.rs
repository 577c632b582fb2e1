// Copyright 2019-2026 ChainSafe Systems
// SPDX-License-Identifier: Apache-2.0, MIT

//! Block generation for Filecoin storage miners.
//!
//! A [`Generator`] takes a parent tipset plus the winning tickets and election
//! proof of a round, applies the pending messages on top of the parent state
//! and returns a signed [`Block`]. Chain access, message execution, the
//! message pool, batch persistence, signing and the clock are supplied by the
//! caller through the traits re-exported here.

mod blocks;
mod chain;
mod config;
mod db;
mod interpreter;
mod key_management;
mod logger;
mod message;
mod message_pool;
mod metrics;
mod miner;
mod shim;
#[cfg(test)]
mod test_utils;
mod utils;

pub use blocks::{
    Block, CachingBlockHeader, ElectionProof, RawBlockHeader, Ticket, Tipset, TipsetKey, TxMeta,
    VRFProof,
};
pub use chain::{ChainMessageStore, MessageStore, block_messages, read_receipts};
pub use config::Config;
pub use db::{MemoryDB, StorageMap};
pub use interpreter::{ApplicationResult, ApplyResult, FailedMessage, Processor};
pub use key_management::{Key, KeyInfo, KeyStore, Signer, generate_key};
pub use logger::{LogConfig, setup_logger};
pub use message::SignedMessage;
pub use message_pool::{ClaimGuard, MessagePool, MessageQueue, MessageSource, claim};
pub use metrics::{default_registry, encode_metrics};
pub use miner::{
    Error, Generator, MinerConfig, PowerTable, Provider, aggregate_bls, application_order,
    block_height, check_eligibility, divide_messages, reconcile,
};
pub use shim::{
    address::Address,
    clock::ChainEpoch,
    crypto::{Signature, SignatureType},
    econ::TokenAmount,
    error::ExitCode,
    executor::Receipt,
    message::Message,
    state_tree::StateTree,
};
pub use utils::clock::{Clock, ManualClock, SystemClock};
