// Copyright (c) metashelf.dev 2025
// This file is licensed under the MIT, see license.md file

use metashelf_catalog::{
	DatabaseDef, PartitionDef, PartitionEventType, PartitionKey, TableDef,
};
use metashelf_net::{
	AddPartitionRequest, CheckPartitionEventRequest, CreateDatabaseRequest,
	CreateTableRequest, DropDatabaseRequest, DropPartitionRequest,
	DropTableRequest, GetDatabaseRequest, GetPartitionRequest,
	GetTableRequest, ListDatabasesRequest, ListPartitionsRequest,
	ListTablesRequest, MarkPartitionEventRequest, RenameTableRequest,
	RequestPayload, ResponsePayload,
};
use metashelf_type::{Error, Result};

use crate::{
	config::ClientConfig,
	descriptor::{AddPartitionDesc, CreateDatabaseDesc, CreateTableDesc},
	session::Session,
};

/// Client façade over the catalog service.
///
/// Owns exactly one session and is meant for one logical thread of control;
/// callers requiring concurrency use one client per thread. Operations are
/// issued strictly in call order, with no batching and no internal retry.
/// Any `Error::Transport` leaves the client permanently unusable.
#[derive(Debug)]
pub struct CatalogClient {
	session: Session,
}

impl CatalogClient {
	pub fn connect(config: ClientConfig) -> Result<Self> {
		config.validate()?;
		Ok(Self {
			session: Session::connect(&config)?,
		})
	}

	pub fn create_database(
		&mut self,
		desc: &CreateDatabaseDesc,
	) -> Result<()> {
		self.expect_unit(RequestPayload::CreateDatabase(
			CreateDatabaseRequest {
				database: desc.database.clone(),
				if_not_exists: desc.if_not_exists,
			},
		))
	}

	pub fn drop_database(
		&mut self,
		name: &str,
		ignore_missing: bool,
		cascade: bool,
	) -> Result<()> {
		self.expect_unit(RequestPayload::DropDatabase(
			DropDatabaseRequest {
				name: name.to_string(),
				if_exists: ignore_missing,
				cascade,
			},
		))
	}

	/// List database names matching a glob pattern (`*`, `?`). The pattern
	/// is passed through verbatim; matching happens service-side.
	pub fn list_database_names(
		&mut self,
		pattern: &str,
	) -> Result<Vec<String>> {
		match self.session.call(RequestPayload::ListDatabases(
			ListDatabasesRequest {
				pattern: pattern.to_string(),
			},
		))? {
			ResponsePayload::Names(names) => Ok(names),
			other => Err(self.unexpected(other)),
		}
	}

	pub fn get_database(&mut self, name: &str) -> Result<DatabaseDef> {
		match self.session.call(RequestPayload::GetDatabase(
			GetDatabaseRequest {
				name: name.to_string(),
			},
		))? {
			ResponsePayload::Database(database) => Ok(database),
			other => Err(self.unexpected(other)),
		}
	}

	pub fn create_table(&mut self, desc: &CreateTableDesc) -> Result<()> {
		self.expect_unit(RequestPayload::CreateTable(
			CreateTableRequest {
				table: desc.table.clone(),
				if_not_exists: desc.if_not_exists,
			},
		))
	}

	/// Create a table shaped like an existing one: same columns, partition
	/// columns and resolved format triple, under a new name. The source
	/// format identifiers are copied verbatim, never re-resolved.
	pub fn create_table_like(
		&mut self,
		src_database: &str,
		src_table: &str,
		new_database: &str,
		new_table: &str,
		if_not_exists: bool,
		external: bool,
		new_location: Option<&str>,
	) -> Result<()> {
		if new_database.trim().is_empty() {
			return Err(Error::validation(
				"database name must not be empty",
			));
		}
		if new_table.trim().is_empty() {
			return Err(Error::validation(
				"table name must not be empty",
			));
		}

		let source = self.get_table(src_database, src_table)?;
		let table = TableDef {
			database: new_database.to_string(),
			name: new_table.to_string(),
			columns: source.columns,
			partition_columns: source.partition_columns,
			input_format: source.input_format,
			output_format: source.output_format,
			serde_lib: source.serde_lib,
			location: new_location.map(str::to_string),
			comment: None,
			external,
		};
		self.expect_unit(RequestPayload::CreateTable(
			CreateTableRequest {
				table,
				if_not_exists,
			},
		))
	}

	pub fn drop_table(
		&mut self,
		database: &str,
		table: &str,
		ignore_missing: bool,
	) -> Result<()> {
		self.expect_unit(RequestPayload::DropTable(DropTableRequest {
			database: database.to_string(),
			table: table.to_string(),
			if_exists: ignore_missing,
		}))
	}

	/// Rename a table. The name component of its key changes; identity,
	/// columns and format are preserved.
	pub fn rename_table(
		&mut self,
		database: &str,
		from: &str,
		to: &str,
	) -> Result<()> {
		if to.trim().is_empty() {
			return Err(Error::validation(
				"table name must not be empty",
			));
		}
		self.expect_unit(RequestPayload::RenameTable(
			RenameTableRequest {
				database: database.to_string(),
				from: from.to_string(),
				to: to.to_string(),
			},
		))
	}

	pub fn get_table(
		&mut self,
		database: &str,
		table: &str,
	) -> Result<TableDef> {
		match self.session.call(RequestPayload::GetTable(
			GetTableRequest {
				database: database.to_string(),
				table: table.to_string(),
			},
		))? {
			ResponsePayload::Table(table) => Ok(table),
			other => Err(self.unexpected(other)),
		}
	}

	pub fn list_table_names(
		&mut self,
		database: &str,
		pattern: &str,
	) -> Result<Vec<String>> {
		match self.session.call(RequestPayload::ListTables(
			ListTablesRequest {
				database: database.to_string(),
				pattern: pattern.to_string(),
			},
		))? {
			ResponsePayload::Names(names) => Ok(names),
			other => Err(self.unexpected(other)),
		}
	}

	/// Add a partition. The key must be a total assignment over the
	/// table's declared partition columns; it is validated against the
	/// fetched table definition and sent in declared column order, since
	/// the remote side is positional.
	pub fn add_partition(&mut self, desc: &AddPartitionDesc) -> Result<()> {
		let table = self.get_table(
			&desc.partition.database,
			&desc.partition.table,
		)?;
		let key = align_partition_key(&table, &desc.partition.key)?;
		let partition = PartitionDef {
			database: desc.partition.database.clone(),
			table: desc.partition.table.clone(),
			key,
			location: desc.partition.location.clone(),
		};
		self.expect_unit(RequestPayload::AddPartition(
			AddPartitionRequest {
				partition,
			},
		))
	}

	pub fn drop_partition(
		&mut self,
		database: &str,
		table: &str,
		key: &PartitionKey,
		ignore_missing: bool,
	) -> Result<()> {
		let key = self.exact_key(database, table, key)?;
		self.expect_unit(RequestPayload::DropPartition(
			DropPartitionRequest {
				database: database.to_string(),
				table: table.to_string(),
				key,
				if_exists: ignore_missing,
			},
		))
	}

	pub fn get_partition(
		&mut self,
		database: &str,
		table: &str,
		key: &PartitionKey,
	) -> Result<PartitionDef> {
		let key = self.exact_key(database, table, key)?;
		match self.session.call(RequestPayload::GetPartition(
			GetPartitionRequest {
				database: database.to_string(),
				table: table.to_string(),
				key,
			},
		))? {
			ResponsePayload::Partition(partition) => Ok(partition),
			other => Err(self.unexpected(other)),
		}
	}

	/// List partitions matching a filter expression over partition-column
	/// values, e.g. `country = "usa"`. The expression is passed through
	/// verbatim and evaluated service-side; `None` or an empty string
	/// selects every partition of the table.
	pub fn list_partitions_by_filter(
		&mut self,
		database: &str,
		table: &str,
		filter: Option<&str>,
	) -> Result<Vec<PartitionDef>> {
		match self.session.call(RequestPayload::ListPartitions(
			ListPartitionsRequest {
				database: database.to_string(),
				table: table.to_string(),
				filter: filter.map(str::to_string),
			},
		))? {
			ResponsePayload::Partitions(partitions) => {
				Ok(partitions)
			}
			other => Err(self.unexpected(other)),
		}
	}

	pub fn mark_partition_for_event(
		&mut self,
		database: &str,
		table: &str,
		key: &PartitionKey,
		event: PartitionEventType,
	) -> Result<()> {
		let key = self.exact_key(database, table, key)?;
		self.expect_unit(RequestPayload::MarkPartitionEvent(
			MarkPartitionEventRequest {
				database: database.to_string(),
				table: table.to_string(),
				key,
				event,
			},
		))
	}

	pub fn is_partition_marked_for_event(
		&mut self,
		database: &str,
		table: &str,
		key: &PartitionKey,
		event: PartitionEventType,
	) -> Result<bool> {
		let key = self.exact_key(database, table, key)?;
		match self.session.call(RequestPayload::CheckPartitionEvent(
			CheckPartitionEventRequest {
				database: database.to_string(),
				table: table.to_string(),
				key,
				event,
			},
		))? {
			ResponsePayload::Marked(marked) => Ok(marked),
			other => Err(self.unexpected(other)),
		}
	}

	/// Idempotent. Releases the session; the client is unusable afterwards.
	pub fn close(&mut self) {
		self.session.close();
	}

	/// Fetch the table definition and align the caller's key to the
	/// declared partition-column order.
	fn exact_key(
		&mut self,
		database: &str,
		table: &str,
		key: &PartitionKey,
	) -> Result<PartitionKey> {
		let def = self.get_table(database, table)?;
		align_partition_key(&def, key)
	}

	fn expect_unit(&mut self, payload: RequestPayload) -> Result<()> {
		match self.session.call(payload)? {
			ResponsePayload::Unit => Ok(()),
			other => Err(self.unexpected(other)),
		}
	}

	/// A payload of the wrong shape is a protocol violation, not a remote
	/// fault: the session is poisoned like any other transport failure.
	fn unexpected(&mut self, payload: ResponsePayload) -> Error {
		self.session.fail(format!(
			"unexpected response payload: {:?}",
			payload
		))
	}
}

/// Check that `key` is a total assignment over the table's declared
/// partition columns and rewrite it into declared order with declared
/// column-name case.
fn align_partition_key(
	table: &TableDef,
	key: &PartitionKey,
) -> Result<PartitionKey> {
	if !table.is_partitioned() {
		return Err(Error::validation(format!(
			"table {} is not partitioned",
			table.qualified_name()
		)));
	}
	for column in key.columns() {
		if table.partition_column(column).is_none() {
			return Err(Error::validation(format!(
				"unknown partition column: {}",
				column
			)));
		}
	}

	let mut aligned = PartitionKey::new();
	for column in &table.partition_columns {
		match key.get(&column.name) {
			Some(value) => {
				aligned.push(column.name.clone(), value);
			}
			None => {
				return Err(Error::validation(format!(
					"partition key missing column: {}",
					column.name
				)));
			}
		}
	}
	Ok(aligned)
}

#[cfg(test)]
mod tests {
	use metashelf_catalog::ColumnDef;
	use metashelf_type::FieldType;

	use super::*;

	fn partitioned_table() -> TableDef {
		TableDef {
			database: "ptndb".to_string(),
			name: "page_view".to_string(),
			columns: vec![ColumnDef::new("userid", FieldType::Int)],
			partition_columns: vec![
				ColumnDef::new("dt", FieldType::Utf8),
				ColumnDef::new("country", FieldType::Utf8),
			],
			input_format: "in".to_string(),
			output_format: "out".to_string(),
			serde_lib: "serde".to_string(),
			location: None,
			comment: None,
			external: false,
		}
	}

	#[test]
	fn test_align_reorders_to_declared_order() {
		let key = PartitionKey::new()
			.with("COUNTRY", "usa")
			.with("dt", "04/30/2012");
		let aligned =
			align_partition_key(&partitioned_table(), &key).unwrap();
		assert_eq!(
			aligned.iter().collect::<Vec<_>>(),
			vec![("dt", "04/30/2012"), ("country", "usa")]
		);
	}

	#[test]
	fn test_align_names_the_missing_column() {
		let key = PartitionKey::new().with("dt", "04/30/2012");
		let err = align_partition_key(&partitioned_table(), &key)
			.unwrap_err();
		assert!(matches!(err, Error::Validation { .. }));
		assert!(err.to_string().contains("country"));
	}

	#[test]
	fn test_align_rejects_unknown_columns() {
		let key = PartitionKey::new()
			.with("dt", "04/30/2012")
			.with("country", "usa")
			.with("region", "south");
		let err = align_partition_key(&partitioned_table(), &key)
			.unwrap_err();
		assert!(err.to_string().contains("unknown partition column"));
	}

	#[test]
	fn test_align_rejects_unpartitioned_tables() {
		let mut table = partitioned_table();
		table.partition_columns.clear();
		let key = PartitionKey::new().with("dt", "04/30/2012");
		let err = align_partition_key(&table, &key).unwrap_err();
		assert!(err.to_string().contains("not partitioned"));
	}
}
