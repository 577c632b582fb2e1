// Copyright 2019-2026 ChainSafe Systems
// SPDX-License-Identifier: Apache-2.0, MIT

use cid::Cid;

/// A versioned mapping from actor address to actor state, rooted at a content
/// identifier. Actor-level access belongs to the state-transition engine that
/// owns the concrete implementation; block generation only needs the root and
/// the ability to commit pending changes.
pub trait StateTree {
    /// Root the tree was loaded from, or last flushed to.
    fn root(&self) -> Cid;

    /// Commits all pending changes to the backing store and returns the new
    /// root. A failed flush must leave the previously flushed root intact.
    fn flush(&mut self) -> anyhow::Result<Cid>;
}
