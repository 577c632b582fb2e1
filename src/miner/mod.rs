// Copyright 2019-2026 ChainSafe Systems
// SPDX-License-Identifier: Apache-2.0, MIT

mod aggregate;
mod config;
mod context;
mod errors;
mod generate;
mod metrics;
mod partition;
mod provider;
mod reconcile;

pub use self::{
    aggregate::aggregate_bls,
    config::MinerConfig,
    context::{ChainContext, block_height, check_eligibility},
    errors::Error,
    generate::Generator,
    partition::{application_order, divide_messages},
    provider::{PowerTable, Provider},
    reconcile::reconcile,
};
