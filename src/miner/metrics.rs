// Copyright 2019-2026 ChainSafe Systems
// SPDX-License-Identifier: Apache-2.0, MIT

use crate::metrics::{StageLabel, default_histogram};
use prometheus_client::metrics::{counter::Counter, family::Family, histogram::Histogram};
use std::sync::LazyLock;

pub static BLOCKS_GENERATED: LazyLock<Counter> = LazyLock::new(|| {
    let metric = Counter::default();
    crate::metrics::default_registry().register(
        "miner_blocks_generated",
        "Number of blocks successfully generated",
        metric.clone(),
    );
    metric
});

pub static GENERATION_FAILURE: LazyLock<Family<StageLabel, Counter>> = LazyLock::new(|| {
    let metric = Family::default();
    crate::metrics::default_registry().register(
        "miner_generation_failure",
        "Number of failed block generation attempts, by failing stage",
        metric.clone(),
    );
    metric
});

pub static GENERATION_TIME: LazyLock<Histogram> = LazyLock::new(|| {
    let metric = default_histogram();
    crate::metrics::default_registry().register(
        "miner_generation_time",
        "Duration of block generation in seconds",
        metric.clone(),
    );
    metric
});
