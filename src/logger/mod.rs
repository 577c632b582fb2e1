// Copyright 2019-2026 ChainSafe Systems
// SPDX-License-Identifier: Apache-2.0, MIT

use serde::{Deserialize, Serialize};
use tracing_subscriber::{EnvFilter, Registry, prelude::*};

/// Logging settings.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LogConfig {
    /// Comma-separated filter directives used when `RUST_LOG` is unset.
    pub directives: String,
    /// Emit JSON lines instead of human-readable text.
    pub json: bool,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            directives: "info".into(),
            json: false,
        }
    }
}

/// Installs the global subscriber. Fails if the directives are malformed or a
/// subscriber has already been installed.
pub fn setup_logger(config: &LogConfig) -> anyhow::Result<()> {
    let filter = get_env_filter(config_filter(config)?);
    let layer: Box<dyn tracing_subscriber::layer::Layer<Registry> + Send + Sync> = if config.json
    {
        Box::new(
            tracing_subscriber::fmt::Layer::new()
                .json()
                .with_filter(filter),
        )
    } else {
        Box::new(tracing_subscriber::fmt::Layer::new().with_filter(filter))
    };
    tracing_subscriber::registry().with(layer).try_init()?;
    Ok(())
}

/// Returns an [`EnvFilter`] according to the `RUST_LOG` environment variable,
/// or `def` when it is not set.
fn get_env_filter(def: EnvFilter) -> EnvFilter {
    use std::env::{
        self,
        VarError::{NotPresent, NotUnicode},
    };
    match env::var(EnvFilter::DEFAULT_ENV) {
        Ok(s) => EnvFilter::new(s),
        Err(NotPresent) => def,
        Err(NotUnicode(_)) => EnvFilter::default(),
    }
}

fn config_filter(config: &LogConfig) -> anyhow::Result<EnvFilter> {
    Ok(EnvFilter::try_new(&config.directives)?)
}
