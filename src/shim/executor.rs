// Copyright 2019-2026 ChainSafe Systems
// SPDX-License-Identifier: Apache-2.0, MIT

use crate::shim::error::ExitCode;
use fvm_ipld_encoding::RawBytes;
use fvm_ipld_encoding::tuple::*;

/// Result of a message execution against the state tree.
#[derive(PartialEq, Eq, Clone, Debug, Serialize_tuple, Deserialize_tuple)]
pub struct Receipt {
    pub exit_code: ExitCode,
    pub return_data: RawBytes,
    pub gas_used: u64,
}

impl Receipt {
    pub fn new(exit_code: ExitCode, return_data: RawBytes, gas_used: u64) -> Self {
        Self {
            exit_code,
            return_data,
            gas_used,
        }
    }

    pub fn exit_code(&self) -> ExitCode {
        self.exit_code
    }

    pub fn return_data(&self) -> &RawBytes {
        &self.return_data
    }

    pub fn gas_used(&self) -> u64 {
        self.gas_used
    }
}
