// Copyright 2019-2026 ChainSafe Systems
// SPDX-License-Identifier: Apache-2.0, MIT

/// Height of a tipset or block, counted in rounds since genesis. Rounds
/// without a block (null rounds) still advance the height.
pub type ChainEpoch = u64;
