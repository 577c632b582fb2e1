// Copyright 2019-2026 ChainSafe Systems
// SPDX-License-Identifier: Apache-2.0, MIT

use crate::logger::LogConfig;
use crate::miner::MinerConfig;
use crate::utils::io::read_toml;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    pub miner: MinerConfig,
    #[serde(default)]
    pub log: LogConfig,
}

impl Config {
    pub fn from_toml(toml_string: &str) -> anyhow::Result<Self> {
        read_toml(toml_string)
    }
}
