// Copyright 2019-2026 ChainSafe Systems
// SPDX-License-Identifier: Apache-2.0, MIT

use std::collections::VecDeque;

use crate::message::{Message as _, SignedMessage};
use crate::shim::address::Address;
use ahash::HashMap;
use itertools::Itertools as _;

/// Orders an unordered pool snapshot for inclusion in a block. Each sender's
/// messages leave the queue in ascending sequence order; across senders the
/// head with the highest gas premium goes first, ties broken by the sender's
/// address bytes.
#[derive(Debug, Default)]
pub struct MessageQueue {
    queues: Vec<VecDeque<SignedMessage>>,
}

impl MessageQueue {
    pub fn new(msgs: impl IntoIterator<Item = SignedMessage>) -> Self {
        let mut by_sender: HashMap<Address, Vec<SignedMessage>> = HashMap::default();
        for msg in msgs {
            by_sender.entry(msg.from()).or_default().push(msg);
        }
        let queues = by_sender
            .into_values()
            .map(|msgs| {
                msgs.into_iter()
                    .sorted_by_cached_key(|m| {
                        (
                            m.sequence(),
                            m.cid().map(|cid| cid.to_bytes()).unwrap_or_default(),
                        )
                    })
                    .collect()
            })
            .collect();
        Self { queues }
    }

    pub fn len(&self) -> usize {
        self.queues.iter().map(VecDeque::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.queues.iter().all(VecDeque::is_empty)
    }

    /// Removes and returns the next message to include, if any.
    pub fn pop(&mut self) -> Option<SignedMessage> {
        let (idx, _) = self
            .queues
            .iter()
            .enumerate()
            .filter_map(|(idx, queue)| queue.front().map(|head| (idx, head)))
            .max_by(|(_, a), (_, b)| {
                a.gas_premium()
                    .cmp(&b.gas_premium())
                    .then_with(|| b.from().to_bytes().cmp(&a.from().to_bytes()))
            })?;
        self.queues.get_mut(idx)?.pop_front()
    }

    /// Empties the queue, returning every message in inclusion order.
    pub fn drain(mut self) -> Vec<SignedMessage> {
        let mut out = Vec::with_capacity(self.len());
        while let Some(msg) = self.pop() {
            out.push(msg);
        }
        out
    }
}
