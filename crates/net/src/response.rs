// Copyright (c) metashelf.dev 2025
// This file is licensed under the MIT, see license.md file

use metashelf_catalog::{DatabaseDef, PartitionDef, TableDef};
use serde::{Deserialize, Serialize};

use crate::fault::FaultResponse;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Response {
	pub id: String,
	#[serde(flatten)]
	pub payload: ResponsePayload,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", content = "payload")]
pub enum ResponsePayload {
	Unit,
	Database(DatabaseDef),
	Names(Vec<String>),
	Table(TableDef),
	Partition(PartitionDef),
	Partitions(Vec<PartitionDef>),
	Marked(bool),
	Err(FaultResponse),
}
