// Copyright 2019-2026 ChainSafe Systems
// SPDX-License-Identifier: Apache-2.0, MIT

use crate::message::SignedMessage;
use crate::shim::{crypto::Signature, message::Message};
use anyhow::Context as _;
use bls_signatures::{Serialize as _, Signature as BlsSignature};
use group::prime::PrimeCurveAffine as _;

/// Unwraps BLS messages to their unsigned bodies and aggregates their
/// signatures. With no messages the aggregate is the compressed identity
/// point of G2.
pub fn aggregate_bls(messages: &[SignedMessage]) -> anyhow::Result<(Vec<Message>, Signature)> {
    let sigs = messages
        .iter()
        .map(|msg| {
            BlsSignature::try_from(msg.signature())
                .with_context(|| format!("message from {} has no valid bls signature", msg.message.from))
        })
        .collect::<anyhow::Result<Vec<_>>>()?;

    let aggregate = if sigs.is_empty() {
        blstrs::G2Affine::identity().to_compressed().to_vec()
    } else {
        bls_signatures::aggregate(&sigs)
            .context("could not aggregate signatures")?
            .as_bytes()
    };

    let unwrapped = messages.iter().map(|msg| msg.message().clone()).collect();
    Ok((unwrapped, Signature::new_bls(aggregate)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::key_management::generate_key;
    use crate::shim::crypto::{BLS_SIG_LEN, SignatureType};
    use crate::test_utils::signed_message;
    use bls_signatures::PublicKey;

    #[test]
    fn empty_aggregate_is_well_defined() {
        let (msgs, sig) = aggregate_bls(&[]).unwrap();
        assert!(msgs.is_empty());
        assert_eq!(sig.signature_type(), SignatureType::Bls);
        assert_eq!(sig.bytes().len(), BLS_SIG_LEN);
        assert_eq!(aggregate_bls(&[]).unwrap().1, sig);
    }

    #[test]
    fn aggregate_verifies_against_all_signers() {
        let keys = [
            generate_key(SignatureType::Bls).unwrap(),
            generate_key(SignatureType::Bls).unwrap(),
        ];
        let signed: Vec<_> = keys
            .iter()
            .enumerate()
            .map(|(i, key)| signed_message(key, i as u64, 1))
            .collect();

        let (unwrapped, aggregate) = aggregate_bls(&signed).unwrap();
        assert_eq!(
            unwrapped,
            signed.iter().map(|m| m.message().clone()).collect::<Vec<_>>()
        );

        let data: Vec<Vec<u8>> = unwrapped
            .iter()
            .map(|m| m.cid().unwrap().to_bytes())
            .collect();
        let data_refs: Vec<&[u8]> = data.iter().map(Vec::as_slice).collect();
        let pub_keys: Vec<PublicKey> = keys
            .iter()
            .map(|k| PublicKey::from_bytes(&k.public_key).unwrap())
            .collect();
        let sig = BlsSignature::try_from(&aggregate).unwrap();
        assert!(bls_signatures::verify_messages(&sig, &data_refs, &pub_keys));
    }

    #[test]
    fn non_bls_signature_is_rejected() {
        let key = generate_key(SignatureType::Secp256k1).unwrap();
        assert!(aggregate_bls(&[signed_message(&key, 0, 1)]).is_err());
    }
}
