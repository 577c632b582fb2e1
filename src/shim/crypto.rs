// Copyright 2019-2026 ChainSafe Systems
// SPDX-License-Identifier: Apache-2.0, MIT

pub use super::fvm_shared_latest::crypto::signature::{BLS_SIG_LEN, SECP_SIG_LEN};
use crate::shim::address::{Address, Protocol};
use crate::utils::encoding::blake2b_256;
use anyhow::{Context as _, ensure};
use bls_signatures::{PublicKey as BlsPublicKey, Serialize as _, Signature as BlsSignature};
use fvm_ipld_encoding::{de, ser, strict_bytes};
use std::borrow::Cow;

/// A cryptographic signature, represented in bytes, of any key protocol.
#[derive(Clone, Debug, PartialEq, Eq, Hash, derive_more::Constructor)]
pub struct Signature {
    pub sig_type: SignatureType,
    pub bytes: Vec<u8>,
}

impl ser::Serialize for Signature {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: ser::Serializer,
    {
        strict_bytes::Serialize::serialize(&self.to_bytes(), serializer)
    }
}

impl<'de> de::Deserialize<'de> for Signature {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: de::Deserializer<'de>,
    {
        let bytes: Cow<'de, [u8]> = strict_bytes::Deserialize::deserialize(deserializer)?;
        match bytes.split_first() {
            None => Err(de::Error::custom("Cannot deserialize empty bytes")),
            Some((&sig_byte, rest)) => {
                // Remove signature type byte
                let sig_type = SignatureType::try_from(sig_byte).map_err(de::Error::custom)?;
                Ok(Signature {
                    bytes: rest.to_vec(),
                    sig_type,
                })
            }
        }
    }
}

impl Signature {
    /// Creates a BLS Signature given the raw bytes.
    pub fn new_bls(bytes: Vec<u8>) -> Self {
        Self {
            sig_type: SignatureType::Bls,
            bytes,
        }
    }

    /// Creates a SECP Signature given the raw bytes.
    pub fn new_secp256k1(bytes: Vec<u8>) -> Self {
        Self {
            sig_type: SignatureType::Secp256k1,
            bytes,
        }
    }

    /// Returns the signature bytes including the signature type byte.
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut bytes = Vec::with_capacity(self.bytes.len() + 1);
        bytes.push(self.sig_type as u8);
        bytes.extend_from_slice(&self.bytes);
        bytes
    }

    pub fn signature_type(&self) -> SignatureType {
        self.sig_type
    }

    /// Returns reference to signature bytes.
    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Checks if a signature is valid given data and address.
    pub fn verify(&self, data: &[u8], addr: &Address) -> anyhow::Result<()> {
        match self.sig_type {
            SignatureType::Bls => verify_bls_sig(&self.bytes, data, addr),
            SignatureType::Secp256k1 => verify_secp256k1_sig(&self.bytes, data, addr),
        }
    }
}

impl TryFrom<&Signature> for BlsSignature {
    type Error = anyhow::Error;
    fn try_from(value: &Signature) -> Result<Self, Self::Error> {
        match value.sig_type {
            SignatureType::Secp256k1 => {
                anyhow::bail!("cannot convert Secp256k1 signature to bls signature")
            }
            SignatureType::Bls => Ok(BlsSignature::from_bytes(&value.bytes)?),
        }
    }
}

/// Checks a BLS signature against the public key carried in a BLS address.
pub fn verify_bls_sig(signature: &[u8], data: &[u8], addr: &Address) -> anyhow::Result<()> {
    ensure!(
        addr.protocol() == Protocol::BLS,
        "cannot validate a BLS signature against a {} address",
        addr.protocol()
    );
    let pub_key = BlsPublicKey::from_bytes(&addr.payload_bytes())?;
    let sig = BlsSignature::from_bytes(signature)?;
    ensure!(
        bls_signatures::verify_messages(&sig, &[data], &[pub_key]),
        "bls signature verification failed"
    );
    Ok(())
}

/// Checks a recoverable secp256k1 signature over the BLAKE2b-256 digest of
/// `data` by recovering the signer's address.
pub fn verify_secp256k1_sig(signature: &[u8], data: &[u8], addr: &Address) -> anyhow::Result<()> {
    ensure!(
        addr.protocol() == Protocol::Secp256k1,
        "cannot validate a secp256k1 signature against a {} address",
        addr.protocol()
    );

    let sig: [u8; SECP_SIG_LEN] = signature.try_into().with_context(|| {
        format!(
            "invalid secp256k1 signature length. Was {}, must be {}",
            signature.len(),
            SECP_SIG_LEN,
        )
    })?;

    let hash = blake2b_256(data);
    let pub_key = recover_secp_public_key(&hash, &sig)?;
    let rec_addr = Address::new_secp256k1(&pub_key)?;

    ensure!(rec_addr == *addr, "secp256k1 signature verification failed");
    Ok(())
}

fn recover_secp_public_key(hash: &[u8; 32], sig: &[u8; SECP_SIG_LEN]) -> anyhow::Result<[u8; 65]> {
    use k256::ecdsa::{RecoveryId, Signature as EcdsaSignature, VerifyingKey};

    let (rs, v) = sig.split_at(64);
    let signature = EcdsaSignature::from_slice(rs)?;
    let recovery_id = v
        .first()
        .copied()
        .and_then(RecoveryId::from_byte)
        .context("invalid secp256k1 recovery id")?;
    let key = VerifyingKey::recover_from_prehash(hash, &signature, recovery_id)?;
    key.to_encoded_point(false)
        .as_bytes()
        .try_into()
        .context("recovered public key has unexpected length")
}

/// Signature variants for Filecoin signatures.
#[derive(Clone, Debug, PartialEq, Copy, Eq, Hash)]
#[repr(u8)]
pub enum SignatureType {
    Secp256k1 = 1,
    Bls = 2,
}

impl TryFrom<u8> for SignatureType {
    type Error = anyhow::Error;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(SignatureType::Secp256k1),
            2 => Ok(SignatureType::Bls),
            invalid => anyhow::bail!("Invalid signature type byte: {}", invalid),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::key_management::{generate_key, sign};

    #[test]
    fn signature_cbor_carries_type_byte() {
        let sig = Signature::new_bls(vec![7; BLS_SIG_LEN]);
        let bytes = fvm_ipld_encoding::to_vec(&sig).unwrap();
        let decoded: Signature = fvm_ipld_encoding::from_slice(&bytes).unwrap();
        assert_eq!(decoded, sig);
        assert_eq!(sig.to_bytes()[0], SignatureType::Bls as u8);
    }

    #[test]
    fn reject_unknown_signature_type() {
        let bytes = fvm_ipld_encoding::to_vec(&fvm_ipld_encoding::RawBytes::new(vec![9, 1, 2])).unwrap();
        assert!(fvm_ipld_encoding::from_slice::<Signature>(&bytes).is_err());
    }

    #[test]
    fn verify_bls_and_secp() {
        for sig_type in [SignatureType::Bls, SignatureType::Secp256k1] {
            let key = generate_key(sig_type).unwrap();
            let data = b"important protocol message";
            let sig = sign(sig_type, key.key_info.private_key(), data).unwrap();
            sig.verify(data, &key.address).unwrap();
            assert!(sig.verify(b"another message", &key.address).is_err());
        }
    }

    #[test]
    fn verify_rejects_wrong_protocol() {
        let bls = generate_key(SignatureType::Bls).unwrap();
        let secp = generate_key(SignatureType::Secp256k1).unwrap();
        let sig = sign(SignatureType::Bls, bls.key_info.private_key(), b"data").unwrap();
        assert!(sig.verify(b"data", &secp.address).is_err());
    }
}
