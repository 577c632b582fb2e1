// Copyright 2019-2026 ChainSafe Systems
// SPDX-License-Identifier: Apache-2.0, MIT

use thiserror::Error;

/// `MessagePool` error.
#[derive(Debug, PartialEq, Eq, Error)]
pub enum Error {
    #[error("Message with same CID already in mempool")]
    DuplicateMessage,
    #[error("Invalid message signature: {0}")]
    InvalidSignature(String),
    #[error("Message could not be encoded: {0}")]
    Encoding(String),
}

impl From<fvm_ipld_encoding::Error> for Error {
    fn from(ee: fvm_ipld_encoding::Error) -> Self {
        Error::Encoding(ee.to_string())
    }
}
