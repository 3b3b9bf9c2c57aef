// Copyright (c) metashelf.dev 2025
// This file is licensed under the MIT, see license.md file

//! Client façade over a remote schema-catalog service.
//!
//! A [`CatalogClient`] owns exactly one connection. Operations build
//! validated descriptors locally, issue typed wire calls, and surface a
//! small stable error taxonomy. A transport failure permanently invalidates
//! the client; recovery is caller-driven: construct a replacement client and
//! replay the intended operation. The idempotency flags on mutating
//! operations (`if_not_exists`, `ignore_missing`) make that replay safe.

mod client;
mod config;
mod descriptor;
pub mod format;
mod session;

pub use client::CatalogClient;
pub use config::ClientConfig;
pub use descriptor::{
	AddPartitionDesc, AddPartitionDescBuilder, CreateDatabaseDesc,
	CreateDatabaseDescBuilder, CreateTableDesc, CreateTableDescBuilder,
};
pub use format::FormatTriple;
// Re-export the data model and error types callers interact with.
pub use metashelf_catalog::{
	ColumnDef, DatabaseDef, PartitionDef, PartitionEventType, PartitionKey,
	TableDef,
};
pub use metashelf_type::{
	Diagnostic, EntityKind, Error, FieldType, Result,
};
