// Copyright 2019-2026 ChainSafe Systems
// SPDX-License-Identifier: Apache-2.0, MIT

mod errors;
pub(crate) mod metrics;
mod msg_queue;
mod msgpool;

pub use self::{
    errors::*,
    msg_queue::MessageQueue,
    msgpool::{
        msg_pool::MessagePool,
        provider::{ClaimGuard, MessageSource, claim},
    },
};
