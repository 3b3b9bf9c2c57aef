// Copyright (c) metashelf.dev 2025
// This file is licensed under the MIT, see license.md file

//! Immutable request descriptors and their builders.
//!
//! Builders accumulate optional attributes through chained,
//! order-independent setters and validate at the terminal `build()` step.
//! Violations are `Error::Validation` naming the offending field. Builders
//! never contact the service.

mod database;
mod partition;
mod table;

pub use database::{CreateDatabaseDesc, CreateDatabaseDescBuilder};
pub use partition::{AddPartitionDesc, AddPartitionDescBuilder};
pub use table::{CreateTableDesc, CreateTableDescBuilder};
