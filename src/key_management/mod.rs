// Copyright 2019-2026 ChainSafe Systems
// SPDX-License-Identifier: Apache-2.0, MIT

mod errors;
mod keystore;
mod wallet_helpers;

pub use errors::*;
pub use keystore::*;
pub use wallet_helpers::*;

use crate::shim::{address::Address, crypto::Signature};

/// Produces signatures on behalf of an address whose private key it holds.
pub trait Signer: Send + Sync {
    fn sign_bytes(&self, data: &[u8], addr: &Address) -> anyhow::Result<Signature>;
}
