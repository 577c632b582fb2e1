// Copyright 2019-2026 ChainSafe Systems
// SPDX-License-Identifier: Apache-2.0, MIT

use crate::interpreter::ApplyResult;
use crate::message::Message as _;
use crate::message_pool::{MessageSource, metrics::MPOOL_PERMANENT_FAILURES_REMOVED};
use tracing::{info, warn};

/// Drops permanently failed messages from the pool and leaves temporarily
/// failed ones in place. Returns the number of messages actually removed;
/// failures already gone from the pool are not counted.
///
/// Only call this once a block has been produced. Running it twice for the
/// same result removes nothing the second time.
pub fn reconcile<S: MessageSource + ?Sized>(source: &S, result: &ApplyResult) -> usize {
    let mut removed = 0;
    for failure in &result.permanent_failures {
        let msg = &failure.message;
        info!(
            from = %msg.from(),
            sequence = msg.sequence(),
            "permanent ApplyMessage failure: {}",
            failure.reason
        );
        match msg.cid() {
            Ok(cid) => {
                if source.remove(&cid) {
                    MPOOL_PERMANENT_FAILURES_REMOVED.inc();
                    removed += 1;
                }
            }
            Err(e) => warn!("failed to get CID from message: {e}"),
        }
    }

    for failure in &result.temporary_failures {
        let msg = &failure.message;
        info!(
            from = %msg.from(),
            sequence = msg.sequence(),
            "temporary ApplyMessage failure: {}",
            failure.reason
        );
    }
    removed
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::interpreter::FailedMessage;
    use crate::key_management::generate_key;
    use crate::message_pool::MessagePool;
    use crate::shim::crypto::SignatureType;
    use crate::test_utils::signed_message;

    #[test]
    fn removes_permanent_keeps_temporary() {
        let pool = MessagePool::new();
        let key = generate_key(SignatureType::Secp256k1).unwrap();
        let permanent = signed_message(&key, 0, 1);
        let temporary = signed_message(&key, 1, 1);
        let permanent_cid = pool.add(permanent.clone()).unwrap();
        let temporary_cid = pool.add(temporary.clone()).unwrap();

        let result = ApplyResult {
            permanent_failures: vec![FailedMessage::new(permanent, "nonce too low")],
            temporary_failures: vec![FailedMessage::new(temporary, "nonce too high")],
            ..Default::default()
        };
        assert_eq!(reconcile(&pool, &result), 1);
        assert!(!pool.contains(&permanent_cid));
        assert!(pool.contains(&temporary_cid));

        // a second pass over the same result changes nothing
        assert_eq!(reconcile(&pool, &result), 0);
        assert_eq!(pool.len(), 1);
    }
}
