// Copyright 2019-2026 ChainSafe Systems
// SPDX-License-Identifier: Apache-2.0, MIT

use super::{Error, PowerTable, Provider};
use crate::blocks::Tipset;
use crate::shim::{address::Address, clock::ChainEpoch};
use anyhow::{Context as _, anyhow};
use tracing::debug;

/// Everything the state transition for a new block needs from the chain.
pub struct ChainContext<S> {
    pub state_tree: S,
    pub ancestors: Vec<Tipset>,
    pub weight: u64,
    /// Height of the block being produced.
    pub height: ChainEpoch,
}

impl<S> ChainContext<S> {
    /// Resolves the context for a block on top of `parent`, aborting with
    /// [`Error::IneligibleMiner`] before anything else is read if `miner`
    /// holds no power.
    pub fn resolve<P>(
        provider: &P,
        parent: &Tipset,
        miner: &Address,
        null_block_count: u64,
    ) -> Result<Self, Error>
    where
        P: Provider<StateTree = S>,
    {
        let state_tree = provider
            .load_state_tree(parent)
            .context("get state tree")
            .map_err(Error::ContextResolution)?;

        let power_table = provider
            .power_table(parent.key())
            .context("get power table")
            .map_err(Error::ContextResolution)?;
        check_eligibility(&power_table, miner)?;

        let weight = provider
            .weight(parent)
            .context("get weight")
            .map_err(Error::ContextResolution)?;

        let height = block_height(parent.epoch(), null_block_count)?;

        let ancestors = provider
            .ancestors(parent, height)
            .context("get base tipset ancestors")
            .and_then(|ancestors| {
                check_ancestors(parent, &ancestors)?;
                Ok(ancestors)
            })
            .map_err(Error::ContextResolution)?;

        debug!(
            parent = %parent,
            height,
            weight,
            ancestors = ancestors.len(),
            "resolved chain context"
        );

        Ok(Self {
            state_tree,
            ancestors,
            weight,
            height,
        })
    }
}

/// Rejects miners without registered power.
pub fn check_eligibility(power_table: &impl PowerTable, miner: &Address) -> Result<(), Error> {
    if power_table.has_power(miner) {
        Ok(())
    } else {
        Err(Error::IneligibleMiner(anyhow!(
            "bad miner address, miner must store files before mining: {miner}"
        )))
    }
}

/// Height of a block mined `null_block_count` empty rounds after a parent at
/// `parent_height`.
pub fn block_height(parent_height: ChainEpoch, null_block_count: u64) -> Result<ChainEpoch, Error> {
    parent_height
        .checked_add(null_block_count)
        .and_then(|height| height.checked_add(1))
        .ok_or_else(|| {
            Error::ContextResolution(anyhow!(
                "block height overflows: parent {parent_height} + {null_block_count} null blocks"
            ))
        })
}

fn check_ancestors(parent: &Tipset, ancestors: &[Tipset]) -> anyhow::Result<()> {
    let head = ancestors
        .first()
        .context("ancestor chain is empty")?;
    anyhow::ensure!(
        head.key() == parent.key(),
        "ancestor chain starts at {head}, expected {parent}"
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn height_counts_null_rounds() {
        assert_eq!(block_height(10, 0).unwrap(), 11);
        assert_eq!(block_height(10, 3).unwrap(), 14);
    }

    #[test]
    fn height_overflow_is_an_error() {
        assert!(matches!(
            block_height(ChainEpoch::MAX, 0),
            Err(Error::ContextResolution(_))
        ));
        assert!(matches!(
            block_height(1, u64::MAX),
            Err(Error::ContextResolution(_))
        ));
    }
}
