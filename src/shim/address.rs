// Copyright 2019-2026 ChainSafe Systems
// SPDX-License-Identifier: Apache-2.0, MIT

pub use super::fvm_shared_latest::address::{Address, Error, Payload, Protocol};

/// Serializes an [`Address`] as its human-readable string form, e.g. `f01000`.
///
/// Used by configuration types, where the CBOR byte encoding would be
/// unreadable.
pub mod address_string {
    use super::Address;
    use serde::{Deserialize, Deserializer, Serializer, de};
    use std::str::FromStr as _;

    pub fn serialize<S>(addr: &Address, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&addr.to_string())
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Address, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Address::from_str(&s).map_err(de::Error::custom)
    }
}
