// Copyright 2019-2026 ChainSafe Systems
// SPDX-License-Identifier: Apache-2.0, MIT

use super::{Error, Signer, new_address, sign, to_public};
use crate::shim::{
    address::Address,
    crypto::{Signature, SignatureType},
};
use ahash::HashMap;
use anyhow::Context as _;
use parking_lot::RwLock;

/// `KeyInfo` structure, this contains the type of key and the private key
#[derive(Clone, PartialEq, Debug, Eq)]
pub struct KeyInfo {
    key_type: SignatureType,
    // Vec<u8> is used because Eq is not implemented for the private key types
    private_key: Vec<u8>,
}

impl KeyInfo {
    pub fn new(key_type: SignatureType, private_key: Vec<u8>) -> Self {
        KeyInfo {
            key_type,
            private_key,
        }
    }

    pub fn key_type(&self) -> SignatureType {
        self.key_type
    }

    pub fn private_key(&self) -> &[u8] {
        &self.private_key
    }
}

/// A key with its derived public key and address.
#[derive(Clone, PartialEq, Debug, Eq)]
pub struct Key {
    pub key_info: KeyInfo,
    pub public_key: Vec<u8>,
    pub address: Address,
}

impl TryFrom<KeyInfo> for Key {
    type Error = Error;

    fn try_from(key_info: KeyInfo) -> Result<Self, Self::Error> {
        let public_key = to_public(key_info.key_type, &key_info.private_key)?;
        let address = new_address(key_info.key_type, &public_key)?;
        Ok(Key {
            key_info,
            public_key,
            address,
        })
    }
}

/// In-memory key store, keyed by `wallet-<address>`.
#[derive(Default, Debug)]
pub struct KeyStore {
    key_info: RwLock<HashMap<String, KeyInfo>>,
}

fn wallet_key(addr: &Address) -> String {
    format!("wallet-{addr}")
}

impl KeyStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Return all of the keys that are stored in the `KeyStore`
    pub fn list(&self) -> Vec<String> {
        self.key_info.read().keys().cloned().collect()
    }

    /// Return `KeyInfo` that corresponds to a given key
    pub fn get(&self, k: &str) -> Result<KeyInfo, Error> {
        self.key_info
            .read()
            .get(k)
            .cloned()
            .ok_or(Error::KeyNotExists)
    }

    /// Save a key/`KeyInfo` pair to the `KeyStore`
    pub fn put(&self, key: String, key_info: KeyInfo) -> Result<(), Error> {
        let mut store = self.key_info.write();
        if store.contains_key(&key) {
            return Err(Error::KeyExists);
        }
        store.insert(key, key_info);
        Ok(())
    }

    /// Remove the Key and corresponding `KeyInfo` from the `KeyStore`
    pub fn remove(&self, key: &str) -> Result<KeyInfo, Error> {
        self.key_info.write().remove(key).ok_or(Error::KeyNotExists)
    }

    /// Stores `key` under its address and returns that address.
    pub fn import(&self, key: Key) -> Result<Address, Error> {
        self.put(wallet_key(&key.address), key.key_info)?;
        Ok(key.address)
    }
}

impl Signer for KeyStore {
    fn sign_bytes(&self, data: &[u8], addr: &Address) -> anyhow::Result<Signature> {
        let key_info = self
            .get(&wallet_key(addr))
            .with_context(|| format!("no key for address {addr}"))?;
        Ok(sign(key_info.key_type, &key_info.private_key, data)?)
    }
}
