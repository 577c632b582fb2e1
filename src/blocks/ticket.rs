// Copyright 2019-2026 ChainSafe Systems
// SPDX-License-Identifier: Apache-2.0, MIT

use crate::blocks::VRFProof;
use fvm_ipld_encoding::tuple::*;

/// VRF output proving the miner won the round. Produced outside block
/// generation and copied into the header unchanged.
#[derive(
    Clone,
    Debug,
    PartialEq,
    Eq,
    Default,
    Serialize_tuple,
    Deserialize_tuple,
    Hash,
    PartialOrd,
    Ord,
    derive_more::Constructor,
)]
pub struct Ticket {
    pub vrfproof: VRFProof,
}

impl Ticket {
    /// Digest used to order blocks within a tipset.
    pub fn digest(&self) -> [u8; 32] {
        self.vrfproof.digest()
    }
}

#[cfg(test)]
impl quickcheck::Arbitrary for Ticket {
    fn arbitrary(g: &mut quickcheck::Gen) -> Self {
        Self::new(VRFProof::new(<Vec<u8> as quickcheck::Arbitrary>::arbitrary(g)))
    }
}
