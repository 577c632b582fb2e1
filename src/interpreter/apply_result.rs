// Copyright 2019-2026 ChainSafe Systems
// SPDX-License-Identifier: Apache-2.0, MIT

use crate::message::SignedMessage;
use crate::shim::executor::Receipt;
use ahash::{HashSet, HashSetExt as _};
use anyhow::{bail, ensure};
use cid::Cid;

/// A message that was applied to the state tree together with its receipt.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ApplicationResult {
    pub message: SignedMessage,
    pub receipt: Receipt,
}

/// A message the engine refused, with the reason it gave.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FailedMessage {
    pub message: SignedMessage,
    pub reason: String,
}

impl FailedMessage {
    pub fn new(message: SignedMessage, reason: impl Into<String>) -> Self {
        Self {
            message,
            reason: reason.into(),
        }
    }
}

/// Outcome of applying a batch of messages.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ApplyResult {
    /// Applied messages with their receipts, in application order.
    pub results: Vec<ApplicationResult>,
    /// Applied messages, in application order.
    pub successful_messages: Vec<SignedMessage>,
    /// Messages that can never be applied and should leave the pool.
    pub permanent_failures: Vec<FailedMessage>,
    /// Messages that may succeed in a later round.
    pub temporary_failures: Vec<FailedMessage>,
}

impl ApplyResult {
    /// Receipts in application order.
    pub fn receipts(&self) -> Vec<Receipt> {
        self.results.iter().map(|r| r.receipt.clone()).collect()
    }

    /// Checks that the result accounts for every message in `applied` exactly
    /// once and carries one receipt per successful message.
    pub fn validate(&self, applied: &[SignedMessage]) -> anyhow::Result<()> {
        ensure!(
            self.results.len() == self.successful_messages.len(),
            "engine returned {} receipts for {} successful messages",
            self.results.len(),
            self.successful_messages.len()
        );
        ensure!(
            self.results
                .iter()
                .zip(&self.successful_messages)
                .all(|(result, msg)| result.message == *msg),
            "receipts are not in application order"
        );

        let expected = applied
            .iter()
            .map(SignedMessage::cid)
            .collect::<Result<HashSet<Cid>, _>>()?;
        let mut seen = HashSet::with_capacity(expected.len());
        let outcomes = self
            .successful_messages
            .iter()
            .chain(self.permanent_failures.iter().map(|f| &f.message))
            .chain(self.temporary_failures.iter().map(|f| &f.message));
        for msg in outcomes {
            let cid = msg.cid()?;
            if !expected.contains(&cid) {
                bail!("engine reported unknown message {cid}");
            }
            if !seen.insert(cid) {
                bail!("engine reported message {cid} more than once");
            }
        }
        ensure!(
            seen.len() == expected.len(),
            "engine dropped {} messages",
            expected.len() - seen.len()
        );
        Ok(())
    }
}
