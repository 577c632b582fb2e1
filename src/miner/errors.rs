// Copyright 2019-2026 ChainSafe Systems
// SPDX-License-Identifier: Apache-2.0, MIT

use thiserror::Error;

/// Block generation error. Every variant is fatal to the attempt; the wrapped
/// cause names the failing step.
#[derive(Debug, Error)]
pub enum Error {
    #[error("failed to resolve chain context: {0:#}")]
    ContextResolution(#[source] anyhow::Error),
    #[error("miner is not eligible to produce blocks: {0:#}")]
    IneligibleMiner(#[source] anyhow::Error),
    #[error("failed to apply messages: {0:#}")]
    Application(#[source] anyhow::Error),
    #[error("failed to flush state: {0:#}")]
    Flush(#[source] anyhow::Error),
    #[error("failed to aggregate bls signatures: {0:#}")]
    Aggregation(#[source] anyhow::Error),
    #[error("failed to persist block data: {0:#}")]
    Persistence(#[source] anyhow::Error),
    #[error("failed to look up worker address: {0:#}")]
    WorkerLookup(#[source] anyhow::Error),
    #[error("failed to sign block: {0:#}")]
    Signing(#[source] anyhow::Error),
}

impl Error {
    /// Short stable name of the failing stage, used as a metrics label.
    pub fn stage(&self) -> &'static str {
        match self {
            Error::ContextResolution(_) => "context_resolution",
            Error::IneligibleMiner(_) => "ineligible_miner",
            Error::Application(_) => "application",
            Error::Flush(_) => "flush",
            Error::Aggregation(_) => "aggregation",
            Error::Persistence(_) => "persistence",
            Error::WorkerLookup(_) => "worker_lookup",
            Error::Signing(_) => "signing",
        }
    }
}
