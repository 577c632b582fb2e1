// Copyright 2019-2026 ChainSafe Systems
// SPDX-License-Identifier: Apache-2.0, MIT

use thiserror::Error;

mod block;
mod election_proof;
mod header;
mod ticket;
mod tipset;
mod vrf_proof;

pub use block::{Block, TxMeta};
pub use election_proof::ElectionProof;
pub use header::{CachingBlockHeader, RawBlockHeader};
pub use ticket::Ticket;
pub use tipset::{Tipset, TipsetKey};
pub use vrf_proof::VRFProof;

/// Errors building tipsets and checking block signatures.
#[derive(Debug, PartialEq, Eq, Error)]
pub enum Error {
    /// Headers disagree on epoch, parents or state root, or share a miner.
    #[error("Invalid tipset: {0}")]
    InvalidTipset(String),
    #[error("No blocks for tipset")]
    NoBlocks,
    #[error("Invalid signature: {0}")]
    InvalidSignature(String),
}
