// Copyright 2019-2026 ChainSafe Systems
// SPDX-License-Identifier: Apache-2.0, MIT

mod memory;
mod storage_map;

pub use memory::MemoryDB;
pub use storage_map::StorageMap;
