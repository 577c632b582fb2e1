// Copyright 2019-2026 ChainSafe Systems
// SPDX-License-Identifier: Apache-2.0, MIT

pub mod signed_message;

use crate::shim::{
    address::{Address, Protocol},
    econ::TokenAmount,
    message::Message as UnsignedMessage,
};
pub use signed_message::SignedMessage;

/// Read access to the fields block generation orders and partitions by,
/// shared by signed and unsigned messages.
pub trait Message {
    fn from(&self) -> Address;
    fn to(&self) -> Address;
    /// Sender nonce.
    fn sequence(&self) -> u64;
    fn gas_limit(&self) -> u64;
    fn gas_premium(&self) -> TokenAmount;

    /// Whether the sender is a BLS address. Such messages are carried in a
    /// block without their signature.
    fn is_from_bls(&self) -> bool {
        self.from().protocol() == Protocol::BLS
    }
}

impl Message for UnsignedMessage {
    fn from(&self) -> Address {
        self.from
    }
    fn to(&self) -> Address {
        self.to
    }
    fn sequence(&self) -> u64 {
        self.sequence
    }
    fn gas_limit(&self) -> u64 {
        self.gas_limit
    }
    fn gas_premium(&self) -> TokenAmount {
        self.gas_premium.clone()
    }
}
