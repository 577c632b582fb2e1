// Copyright 2019-2026 ChainSafe Systems
// SPDX-License-Identifier: Apache-2.0, MIT

use crate::message::{Message as _, SignedMessage};

/// Splits messages by sender protocol into `(secp, bls)`, keeping the
/// relative order within each half.
pub fn divide_messages(
    messages: impl IntoIterator<Item = SignedMessage>,
) -> (Vec<SignedMessage>, Vec<SignedMessage>) {
    messages
        .into_iter()
        .partition(|msg| !msg.is_from_bls())
}

/// Orders messages for application: every BLS message precedes every other
/// message.
pub fn application_order(messages: impl IntoIterator<Item = SignedMessage>) -> Vec<SignedMessage> {
    let (secp, mut bls) = divide_messages(messages);
    bls.extend(secp);
    bls
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shim::{address::Address, crypto::Signature, message::Message};
    use crate::shim::address::Protocol;
    use quickcheck_macros::quickcheck;

    // A fixed 48-byte payload is enough for a BLS protocol address.
    fn bls_address(seed: u8) -> Address {
        Address::new_bls(&[seed; 48]).unwrap()
    }

    fn msg(bls: bool, seed: u8, sequence: u64) -> SignedMessage {
        let from = if bls {
            bls_address(seed)
        } else {
            Address::new_id(u64::from(seed))
        };
        SignedMessage::new_unchecked(
            Message {
                from,
                to: Address::new_id(100),
                sequence,
                ..Message::default()
            },
            Signature::new_secp256k1(vec![]),
        )
    }

    fn build(flags: &[(bool, u8)]) -> Vec<SignedMessage> {
        flags
            .iter()
            .enumerate()
            .map(|(i, (bls, seed))| msg(*bls, *seed, i as u64))
            .collect()
    }

    #[test]
    fn bls_first_order() {
        let msgs = build(&[(false, 1), (true, 2), (false, 3), (true, 4)]);
        let ordered = application_order(msgs);
        let seqs: Vec<u64> = ordered.iter().map(|m| m.sequence()).collect();
        assert_eq!(seqs, vec![1, 3, 0, 2]);
    }

    #[quickcheck]
    fn partition_is_disjoint_and_complete(flags: Vec<(bool, u8)>) -> bool {
        let msgs = build(&flags);
        let (secp, bls) = divide_messages(msgs.clone());
        let secp_ok = secp.iter().all(|m| m.from().protocol() != Protocol::BLS);
        let bls_ok = bls.iter().all(|m| m.from().protocol() == Protocol::BLS);
        let complete = secp.len() + bls.len() == msgs.len();
        let ordered = |part: &[SignedMessage]| part.windows(2).all(|w| w[0].sequence() < w[1].sequence());
        secp_ok && bls_ok && complete && ordered(&secp) && ordered(&bls)
    }

    #[quickcheck]
    fn bls_precedes_secp(flags: Vec<(bool, u8)>) -> bool {
        let ordered = application_order(build(&flags));
        let first_secp = ordered
            .iter()
            .position(|m| m.from().protocol() != Protocol::BLS)
            .unwrap_or(ordered.len());
        ordered[first_secp..]
            .iter()
            .all(|m| m.from().protocol() != Protocol::BLS)
    }
}
