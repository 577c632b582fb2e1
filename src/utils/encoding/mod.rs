// Copyright 2019-2026 ChainSafe Systems
// SPDX-License-Identifier: Apache-2.0, MIT

use blake2b_simd::Params;

/// `serde_bytes` with max length check
pub mod serde_byte_array {
    use fvm_ipld_encoding::strict_bytes;
    use serde::{Deserializer, Serializer, de, ser};

    /// lotus use cbor-gen for generating codec for types, it has a length limit
    /// for byte array as `2 << 20`
    ///
    /// <https://github.com/whyrusleeping/cbor-gen/blob/f57984553008dd4285df16d4ec2760f97977d713/gen.go#L16>
    pub const BYTE_ARRAY_MAX_LEN: usize = 2 << 20;

    /// checked if `input > crate::utils::BYTE_ARRAY_MAX_LEN`
    pub fn serialize<T, S>(bytes: &T, serializer: S) -> Result<S::Ok, S::Error>
    where
        T: ?Sized + AsRef<[u8]>,
        S: Serializer,
    {
        let len = bytes.as_ref().len();
        if len > BYTE_ARRAY_MAX_LEN {
            return Err(ser::Error::custom::<String>(
                "Array exceed max length".into(),
            ));
        }

        strict_bytes::Serialize::serialize(bytes.as_ref(), serializer)
    }

    /// checked if `output > crate::utils::ByteArrayMaxLen`
    pub fn deserialize<'de, D>(deserializer: D) -> Result<Vec<u8>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let bytes: Vec<u8> = strict_bytes::Deserialize::deserialize(deserializer)?;
        if bytes.len() > BYTE_ARRAY_MAX_LEN {
            return Err(de::Error::custom::<String>(
                "Array exceed max length".into(),
            ));
        }
        Ok(bytes)
    }
}

/// Generates BLAKE2b hash of fixed 32 bytes size.
pub fn blake2b_256(ingest: &[u8]) -> [u8; 32] {
    let digest = Params::new()
        .hash_length(32)
        .to_state()
        .update(ingest)
        .finalize();

    let mut ret = [0u8; 32];
    ret.clone_from_slice(digest.as_bytes());
    ret
}

#[cfg(test)]
mod tests {
    use super::*;
    use fvm_ipld_encoding::tuple::*;

    #[derive(Serialize_tuple, Deserialize_tuple, Debug, PartialEq)]
    struct ByteArray {
        #[serde(with = "serde_byte_array")]
        pub inner: Vec<u8>,
    }

    #[test]
    fn can_serialize_byte_array() {
        for len in [0, 1, serde_byte_array::BYTE_ARRAY_MAX_LEN] {
            let bytes = ByteArray {
                inner: vec![0; len],
            };
            assert!(fvm_ipld_encoding::to_vec(&bytes).is_ok());
        }
    }

    #[test]
    fn cannot_serialize_byte_array_overflow() {
        let bytes = ByteArray {
            inner: vec![0; serde_byte_array::BYTE_ARRAY_MAX_LEN + 1],
        };
        assert!(fvm_ipld_encoding::to_vec(&bytes).is_err());
    }

    #[test]
    fn blake2b_256_is_stable() {
        assert_eq!(blake2b_256(b"forest"), blake2b_256(b"forest"));
        assert_ne!(blake2b_256(b"forest"), blake2b_256(b"lotus"));
    }
}
