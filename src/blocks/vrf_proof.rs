// Copyright 2019-2026 ChainSafe Systems
// SPDX-License-Identifier: Apache-2.0, MIT

use crate::utils::encoding::{blake2b_256, serde_byte_array};
use serde::{Deserialize, Serialize};

/// Raw VRF proof bytes, encoded as a CBOR byte string.
#[cfg_attr(test, derive(derive_more::Constructor))]
#[derive(Clone, Debug, PartialEq, Eq, Ord, PartialOrd, Default, Serialize, Deserialize, Hash)]
pub struct VRFProof(#[serde(with = "serde_byte_array")] pub Vec<u8>);

impl VRFProof {
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    /// BLAKE2b-256 of the proof bytes.
    pub fn digest(&self) -> [u8; 32] {
        blake2b_256(&self.0)
    }
}
