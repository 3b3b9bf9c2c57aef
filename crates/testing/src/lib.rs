// Copyright (c) metashelf.dev 2025
// This file is licensed under the MIT, see license.md file

//! Test scaffolding: an in-process catalog service speaking the metashelf
//! wire protocol, plus small socket and tracing utilities. The service
//! holds its catalog in memory and mirrors the fault behavior of the real
//! one, so client tests exercise the full request/response path.

mod catalog;
mod network;
mod trace;

pub use catalog::{DEFAULT_WAREHOUSE, TestCatalog};
pub use network::free_local_addr;
pub use trace::init_tracing;
