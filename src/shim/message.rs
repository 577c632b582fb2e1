// Copyright 2019-2026 ChainSafe Systems
// SPDX-License-Identifier: Apache-2.0, MIT

use crate::shim::{address::Address, econ::TokenAmount};
use crate::utils::cid::CidCborExt as _;
use cid::Cid;
use fvm_ipld_encoding::RawBytes;
use fvm_ipld_encoding::tuple::*;

/// Method number indicator for calling actor methods.
pub type MethodNum = u64;

/// An unsigned Filecoin message. Field order is the canonical CBOR tuple
/// order, and must not change.
#[derive(Clone, PartialEq, Eq, Debug, Hash, Serialize_tuple, Deserialize_tuple)]
pub struct Message {
    pub version: u64,
    pub to: Address,
    pub from: Address,
    pub sequence: u64,
    pub value: TokenAmount,
    pub gas_limit: u64,
    pub gas_fee_cap: TokenAmount,
    pub gas_premium: TokenAmount,
    pub method_num: MethodNum,
    pub params: RawBytes,
}

impl Default for Message {
    fn default() -> Self {
        Self {
            version: 0,
            to: Address::new_id(0),
            from: Address::new_id(0),
            sequence: 0,
            value: TokenAmount::default(),
            gas_limit: 0,
            gas_fee_cap: TokenAmount::default(),
            gas_premium: TokenAmount::default(),
            method_num: 0,
            params: RawBytes::default(),
        }
    }
}

impl Message {
    /// Content identifier of the DAG-CBOR encoded message.
    pub fn cid(&self) -> Result<Cid, fvm_ipld_encoding::Error> {
        Cid::from_cbor_blake2b256(self)
    }
}
