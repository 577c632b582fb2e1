// Copyright 2019-2026 ChainSafe Systems
// SPDX-License-Identifier: Apache-2.0, MIT

use crate::shim::address::{Address, address_string};
use serde::{Deserialize, Serialize};

/// Identity of the local miner.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MinerConfig {
    /// Address of the miner actor blocks are produced for.
    #[serde(with = "address_string")]
    pub miner_address: Address,
    /// Address credited with block rewards.
    #[serde(with = "address_string")]
    pub owner_address: Address,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::io::read_toml;

    #[test]
    fn addresses_parse_from_strings() {
        let config: MinerConfig = read_toml(
            r#"
            miner_address = "f01000"
            owner_address = "f0100"
            "#,
        )
        .unwrap();
        assert_eq!(config.miner_address, Address::new_id(1000));
        assert_eq!(config.owner_address, Address::new_id(100));
    }

    #[test]
    fn malformed_address_is_rejected() {
        assert!(
            read_toml::<MinerConfig>("miner_address = \"xyz\"\nowner_address = \"f0100\"").is_err()
        );
    }
}
