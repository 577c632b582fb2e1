// Copyright 2019-2026 ChainSafe Systems
// SPDX-License-Identifier: Apache-2.0, MIT

mod apply_result;

pub use self::apply_result::{ApplicationResult, ApplyResult, FailedMessage};

use crate::blocks::Tipset;
use crate::message::SignedMessage;
use crate::shim::{address::Address, clock::ChainEpoch, state_tree::StateTree};
use fvm_ipld_blockstore::Blockstore;

/// State-transition engine used to apply a block's messages.
///
/// Implementations must be deterministic: the same state root, ancestors,
/// message list and height always produce the same receipts and flushed
/// state root. Messages are applied in the order given.
pub trait Processor<S: StateTree> {
    /// Applies `messages` on top of `state_tree`, credits the block reward to
    /// `reward_owner` and classifies every message as applied, permanently
    /// failed or temporarily failed. Intermediate objects go to `storage`.
    ///
    /// An `Err` means the engine itself failed; per-message failures are
    /// reported inside the [`ApplyResult`].
    fn apply_messages_and_pay_rewards(
        &self,
        state_tree: &mut S,
        storage: &impl Blockstore,
        messages: &[SignedMessage],
        reward_owner: &Address,
        height: ChainEpoch,
        ancestors: &[Tipset],
    ) -> anyhow::Result<ApplyResult>;
}
