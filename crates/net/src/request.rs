// Copyright (c) metashelf.dev 2025
// This file is licensed under the MIT, see license.md file

use metashelf_catalog::{
	DatabaseDef, PartitionDef, PartitionEventType, PartitionKey, TableDef,
};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Request {
	pub id: String,
	#[serde(flatten)]
	pub payload: RequestPayload,
}

/// One variant per catalog operation. Mutating requests carry their
/// idempotency flags so the service performs the suppression and the no-op
/// answer is authoritative.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", content = "payload")]
pub enum RequestPayload {
	CreateDatabase(CreateDatabaseRequest),
	DropDatabase(DropDatabaseRequest),
	ListDatabases(ListDatabasesRequest),
	GetDatabase(GetDatabaseRequest),
	CreateTable(CreateTableRequest),
	DropTable(DropTableRequest),
	RenameTable(RenameTableRequest),
	GetTable(GetTableRequest),
	ListTables(ListTablesRequest),
	AddPartition(AddPartitionRequest),
	DropPartition(DropPartitionRequest),
	GetPartition(GetPartitionRequest),
	ListPartitions(ListPartitionsRequest),
	MarkPartitionEvent(MarkPartitionEventRequest),
	CheckPartitionEvent(CheckPartitionEventRequest),
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateDatabaseRequest {
	pub database: DatabaseDef,
	pub if_not_exists: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DropDatabaseRequest {
	pub name: String,
	pub if_exists: bool,
	pub cascade: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListDatabasesRequest {
	pub pattern: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GetDatabaseRequest {
	pub name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateTableRequest {
	pub table: TableDef,
	pub if_not_exists: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DropTableRequest {
	pub database: String,
	pub table: String,
	pub if_exists: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RenameTableRequest {
	pub database: String,
	pub from: String,
	pub to: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GetTableRequest {
	pub database: String,
	pub table: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListTablesRequest {
	pub database: String,
	pub pattern: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AddPartitionRequest {
	pub partition: PartitionDef,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DropPartitionRequest {
	pub database: String,
	pub table: String,
	pub key: PartitionKey,
	pub if_exists: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GetPartitionRequest {
	pub database: String,
	pub table: String,
	pub key: PartitionKey,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListPartitionsRequest {
	pub database: String,
	pub table: String,
	pub filter: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MarkPartitionEventRequest {
	pub database: String,
	pub table: String,
	pub key: PartitionKey,
	pub event: PartitionEventType,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CheckPartitionEventRequest {
	pub database: String,
	pub table: String,
	pub key: PartitionKey,
	pub event: PartitionEventType,
}
