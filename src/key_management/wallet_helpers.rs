// Copyright 2019-2026 ChainSafe Systems
// SPDX-License-Identifier: Apache-2.0, MIT

use super::{Error, Key, KeyInfo};
use crate::shim::{
    address::Address,
    crypto::{Signature, SignatureType},
};
use crate::utils::encoding::blake2b_256;
use bls_signatures::{PrivateKey as BlsPrivate, Serialize as _};
use k256::ecdsa::SigningKey;
use k256::elliptic_curve::sec1::ToEncodedPoint as _;
use rand::rngs::OsRng;

/// Return the public key for a given private key and `SignatureType`
pub fn to_public(sig_type: SignatureType, private_key: &[u8]) -> Result<Vec<u8>, Error> {
    match sig_type {
        SignatureType::Bls => Ok(BlsPrivate::from_bytes(private_key)
            .map_err(|err| Error::Other(err.to_string()))?
            .public_key()
            .as_bytes()),
        SignatureType::Secp256k1 => {
            let private_key = k256::SecretKey::from_slice(private_key)
                .map_err(|err| Error::Other(err.to_string()))?;
            Ok(private_key
                .public_key()
                .to_encoded_point(false)
                .as_bytes()
                .to_vec())
        }
    }
}

/// Return a new Address that is of a given `SignatureType` and uses the
/// supplied public key
pub fn new_address(sig_type: SignatureType, public_key: &[u8]) -> Result<Address, Error> {
    match sig_type {
        SignatureType::Bls => {
            Address::new_bls(public_key).map_err(|err| Error::Other(err.to_string()))
        }
        SignatureType::Secp256k1 => {
            Address::new_secp256k1(public_key).map_err(|err| Error::Other(err.to_string()))
        }
    }
}

/// Sign takes in `SignatureType`, private key and message. Returns a Signature
/// for that message
pub fn sign(sig_type: SignatureType, private_key: &[u8], msg: &[u8]) -> Result<Signature, Error> {
    match sig_type {
        SignatureType::Bls => {
            let priv_key =
                BlsPrivate::from_bytes(private_key).map_err(|err| Error::Other(err.to_string()))?;
            // this returns a signature from bls-signatures, so we need to convert this to a
            // crypto signature
            let sig = priv_key.sign(msg);
            Ok(Signature::new_bls(sig.as_bytes()))
        }
        SignatureType::Secp256k1 => {
            let priv_key =
                SigningKey::from_slice(private_key).map_err(|err| Error::Other(err.to_string()))?;
            let msg_hash = blake2b_256(msg);
            let (sig, recovery_id) = priv_key
                .sign_prehash_recoverable(&msg_hash)
                .map_err(|err| Error::Other(err.to_string()))?;
            let mut new_bytes = Vec::with_capacity(65);
            new_bytes.extend_from_slice(&sig.to_bytes());
            new_bytes.push(recovery_id.to_byte());
            Ok(Signature::new_secp256k1(new_bytes))
        }
    }
}

/// Generate a new private key
pub fn generate(sig_type: SignatureType) -> Result<Vec<u8>, Error> {
    let rng = &mut OsRng;
    match sig_type {
        SignatureType::Bls => {
            let key = BlsPrivate::generate(rng);
            Ok(key.as_bytes())
        }
        SignatureType::Secp256k1 => {
            let key = k256::SecretKey::random(rng);
            Ok(key.to_bytes().to_vec())
        }
    }
}

/// Generates a fresh key pair of the given type along with its address.
pub fn generate_key(sig_type: SignatureType) -> Result<Key, Error> {
    let private_key = generate(sig_type)?;
    Key::try_from(KeyInfo::new(sig_type, private_key))
}
