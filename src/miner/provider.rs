// Copyright 2019-2026 ChainSafe Systems
// SPDX-License-Identifier: Apache-2.0, MIT

use crate::blocks::{Tipset, TipsetKey};
use crate::shim::{address::Address, clock::ChainEpoch, state_tree::StateTree};

/// Point-in-time view of miner storage power.
pub trait PowerTable {
    /// Returns `true` if `miner` holds non-zero registered power.
    fn has_power(&self, miner: &Address) -> bool;
}

/// Chain reads needed to build a block on top of a tipset.
pub trait Provider: Send + Sync {
    type StateTree: StateTree;
    type PowerTable: PowerTable;

    /// Loads the state tree rooted at the tipset's parent state.
    fn load_state_tree(&self, ts: &Tipset) -> anyhow::Result<Self::StateTree>;

    /// Loads the power table as of the given tipset.
    fn power_table(&self, tsk: &TipsetKey) -> anyhow::Result<Self::PowerTable>;

    /// Computes the aggregate chain weight of the tipset.
    fn weight(&self, ts: &Tipset) -> anyhow::Result<u64>;

    /// Returns the ancestor chain the state-transition engine needs to run at
    /// `height`, starting with `ts` itself.
    fn ancestors(&self, ts: &Tipset, height: ChainEpoch) -> anyhow::Result<Vec<Tipset>>;

    /// Resolves the worker address of `miner` as of the given tipset.
    fn worker_address(&self, miner: &Address, tsk: &TipsetKey) -> anyhow::Result<Address>;
}
