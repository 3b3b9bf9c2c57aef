// Copyright (c) metashelf.dev 2025
// This file is licensed under the MIT, see license.md file

use std::collections::{BTreeMap, HashSet};

use metashelf_catalog::{
	DatabaseDef, PartitionDef, PartitionEventType, PartitionKey, TableDef,
};
use metashelf_net::{
	AddPartitionRequest, CheckPartitionEventRequest, CreateDatabaseRequest,
	CreateTableRequest, DropDatabaseRequest, DropPartitionRequest,
	DropTableRequest, Fault, FaultResponse, GetDatabaseRequest,
	GetPartitionRequest, GetTableRequest, ListDatabasesRequest,
	ListPartitionsRequest, ListTablesRequest, MarkPartitionEventRequest,
	RenameTableRequest, RequestPayload, ResponsePayload,
};
use metashelf_type::EntityKind;

use super::glob::glob_match;

const DEFAULT_DATABASE: &str = "default";

type OpResult = Result<ResponsePayload, Fault>;

/// In-memory catalog. Entities are keyed by lower-cased name for
/// case-insensitive lookup; the defs keep the case they were created with.
pub(crate) struct CatalogState {
	warehouse_root: String,
	databases: BTreeMap<String, StoredDatabase>,
	events: HashSet<EventMark>,
}

struct StoredDatabase {
	def: DatabaseDef,
	tables: BTreeMap<String, StoredTable>,
}

struct StoredTable {
	def: TableDef,
	partitions: Vec<PartitionDef>,
}

#[derive(Clone, PartialEq, Eq, Hash)]
struct EventMark {
	database: String,
	table: String,
	key: String,
	event: PartitionEventType,
}

impl CatalogState {
	pub(crate) fn new(warehouse_root: &str) -> Self {
		let warehouse_root =
			warehouse_root.trim_end_matches('/').to_string();

		let mut default = DatabaseDef::new(DEFAULT_DATABASE);
		default.location = Some(warehouse_root.clone());

		let mut databases = BTreeMap::new();
		databases.insert(
			DEFAULT_DATABASE.to_string(),
			StoredDatabase {
				def: default,
				tables: BTreeMap::new(),
			},
		);

		Self {
			warehouse_root,
			databases,
			events: HashSet::new(),
		}
	}

	pub(crate) fn handle(
		&mut self,
		payload: RequestPayload,
	) -> ResponsePayload {
		let result = match payload {
			RequestPayload::CreateDatabase(req) => {
				self.create_database(req)
			}
			RequestPayload::DropDatabase(req) => {
				self.drop_database(req)
			}
			RequestPayload::ListDatabases(req) => {
				self.list_databases(req)
			}
			RequestPayload::GetDatabase(req) => {
				self.get_database(req)
			}
			RequestPayload::CreateTable(req) => {
				self.create_table(req)
			}
			RequestPayload::DropTable(req) => self.drop_table(req),
			RequestPayload::RenameTable(req) => {
				self.rename_table(req)
			}
			RequestPayload::GetTable(req) => self.get_table(req),
			RequestPayload::ListTables(req) => self.list_tables(req),
			RequestPayload::AddPartition(req) => {
				self.add_partition(req)
			}
			RequestPayload::DropPartition(req) => {
				self.drop_partition(req)
			}
			RequestPayload::GetPartition(req) => {
				self.get_partition(req)
			}
			RequestPayload::ListPartitions(req) => {
				self.list_partitions(req)
			}
			RequestPayload::MarkPartitionEvent(req) => {
				self.mark_partition_event(req)
			}
			RequestPayload::CheckPartitionEvent(req) => {
				self.check_partition_event(req)
			}
		};

		match result {
			Ok(payload) => payload,
			Err(fault) => ResponsePayload::Err(FaultResponse {
				fault,
			}),
		}
	}

	fn create_database(&mut self, req: CreateDatabaseRequest) -> OpResult {
		let key = req.database.name.to_ascii_lowercase();
		if self.databases.contains_key(&key) {
			return if req.if_not_exists {
				Ok(ResponsePayload::Unit)
			} else {
				Err(Fault::already_exists(
					EntityKind::Database,
					req.database.name,
				))
			};
		}

		let mut def = req.database;
		def.location = Some(match def.location.take() {
			Some(location) => qualify(&location),
			None => format!("{}/{}.db", self.warehouse_root, key),
		});
		self.databases.insert(
			key,
			StoredDatabase {
				def,
				tables: BTreeMap::new(),
			},
		);
		Ok(ResponsePayload::Unit)
	}

	fn drop_database(&mut self, req: DropDatabaseRequest) -> OpResult {
		let key = req.name.to_ascii_lowercase();
		let Some(stored) = self.databases.get(&key) else {
			return if req.if_exists {
				Ok(ResponsePayload::Unit)
			} else {
				Err(Fault::not_found(
					EntityKind::Database,
					req.name,
				))
			};
		};

		if !req.cascade && !stored.tables.is_empty() {
			return Err(Fault::service(
				"CAT_002",
				format!(
					"database {} is not empty",
					stored.def.name
				),
			));
		}

		self.databases.remove(&key);
		self.events.retain(|mark| mark.database != key);
		Ok(ResponsePayload::Unit)
	}

	fn list_databases(&self, req: ListDatabasesRequest) -> OpResult {
		let names = self
			.databases
			.values()
			.map(|db| db.def.name.clone())
			.filter(|name| glob_match(&req.pattern, name))
			.collect();
		Ok(ResponsePayload::Names(names))
	}

	fn get_database(&self, req: GetDatabaseRequest) -> OpResult {
		let db = self.database(&req.name)?;
		Ok(ResponsePayload::Database(db.def.clone()))
	}

	fn create_table(&mut self, req: CreateTableRequest) -> OpResult {
		let qualified = req.table.qualified_name();
		let db = self.database_mut(&req.table.database)?;

		let key = req.table.name.to_ascii_lowercase();
		if db.tables.contains_key(&key) {
			return if req.if_not_exists {
				Ok(ResponsePayload::Unit)
			} else {
				Err(Fault::already_exists(
					EntityKind::Table,
					qualified,
				))
			};
		}

		let db_location =
			db.def.location.clone().unwrap_or_default();
		let mut def = req.table;
		def.location = Some(match def.location.take() {
			Some(location) => qualify(&location),
			None => format!("{}/{}", db_location, key),
		});
		db.tables.insert(
			key,
			StoredTable {
				def,
				partitions: Vec::new(),
			},
		);
		Ok(ResponsePayload::Unit)
	}

	fn drop_table(&mut self, req: DropTableRequest) -> OpResult {
		let db_key = req.database.to_ascii_lowercase();
		let table_key = req.table.to_ascii_lowercase();

		let removed = match self.databases.get_mut(&db_key) {
			Some(db) => db.tables.remove(&table_key).is_some(),
			None => false,
		};

		if removed {
			self.events.retain(|mark| {
				!(mark.database == db_key
					&& mark.table == table_key)
			});
			Ok(ResponsePayload::Unit)
		} else if req.if_exists {
			Ok(ResponsePayload::Unit)
		} else {
			Err(Fault::not_found(
				EntityKind::Table,
				format!("{}.{}", req.database, req.table),
			))
		}
	}

	fn rename_table(&mut self, req: RenameTableRequest) -> OpResult {
		let db_key = req.database.to_ascii_lowercase();
		let from_key = req.from.to_ascii_lowercase();
		let to_key = req.to.to_ascii_lowercase();

		let db = self.database_mut(&req.database)?;
		if db.tables.contains_key(&to_key) {
			return Err(Fault::already_exists(
				EntityKind::Table,
				format!("{}.{}", req.database, req.to),
			));
		}
		let Some(mut stored) = db.tables.remove(&from_key) else {
			return Err(Fault::not_found(
				EntityKind::Table,
				format!("{}.{}", req.database, req.from),
			));
		};

		stored.def.name = req.to.clone();
		for partition in &mut stored.partitions {
			partition.table = req.to.clone();
		}
		db.tables.insert(to_key.clone(), stored);

		let marks: Vec<EventMark> = self
			.events
			.iter()
			.filter(|mark| {
				mark.database == db_key
					&& mark.table == from_key
			})
			.cloned()
			.collect();
		for mark in marks {
			self.events.remove(&mark);
			self.events.insert(EventMark {
				table: to_key.clone(),
				..mark
			});
		}
		Ok(ResponsePayload::Unit)
	}

	fn get_table(&self, req: GetTableRequest) -> OpResult {
		let table = self.table(&req.database, &req.table)?;
		Ok(ResponsePayload::Table(table.def.clone()))
	}

	fn list_tables(&self, req: ListTablesRequest) -> OpResult {
		let db = self.database(&req.database)?;
		let names = db
			.tables
			.values()
			.map(|table| table.def.name.clone())
			.filter(|name| glob_match(&req.pattern, name))
			.collect();
		Ok(ResponsePayload::Names(names))
	}

	fn add_partition(&mut self, req: AddPartitionRequest) -> OpResult {
		let mut partition = req.partition;
		let table = self
			.table_mut(&partition.database, &partition.table)?;

		if !key_matches_declared(&table.def, &partition.key) {
			return Err(Fault::service(
				"CAT_010",
				format!(
					"partition key {} does not match the partition columns of {}",
					partition.key,
					table.def.qualified_name()
				),
			));
		}
		if table.partitions
			.iter()
			.any(|existing| existing.key.matches(&partition.key))
		{
			return Err(Fault::already_exists(
				EntityKind::Partition,
				partition.key.to_string(),
			));
		}

		let table_location =
			table.def.location.clone().unwrap_or_default();
		partition.location = Some(match partition.location.take() {
			Some(location) => qualify(&location),
			None => {
				let suffix = partition
					.key
					.iter()
					.map(|(column, value)| {
						format!("{}={}", column, value)
					})
					.collect::<Vec<_>>()
					.join("/");
				format!("{}/{}", table_location, suffix)
			}
		});
		table.partitions.push(partition);
		Ok(ResponsePayload::Unit)
	}

	fn drop_partition(&mut self, req: DropPartitionRequest) -> OpResult {
		let db_key = req.database.to_ascii_lowercase();
		let table_key = req.table.to_ascii_lowercase();

		let removed = match self.table_mut(&req.database, &req.table) {
			Ok(table) => {
				match table.partitions.iter().position(|p| {
					p.key.matches(&req.key)
				}) {
					Some(index) => {
						table.partitions.remove(index);
						true
					}
					None => false,
				}
			}
			Err(fault) => {
				return if req.if_exists {
					Ok(ResponsePayload::Unit)
				} else {
					Err(fault)
				};
			}
		};

		if removed {
			let key = canonical_key(&req.key);
			self.events.retain(|mark| {
				!(mark.database == db_key
					&& mark.table == table_key
					&& mark.key == key)
			});
			Ok(ResponsePayload::Unit)
		} else if req.if_exists {
			Ok(ResponsePayload::Unit)
		} else {
			Err(Fault::not_found(
				EntityKind::Partition,
				req.key.to_string(),
			))
		}
	}

	fn get_partition(&self, req: GetPartitionRequest) -> OpResult {
		let table = self.table(&req.database, &req.table)?;
		table.partitions
			.iter()
			.find(|p| p.key.matches(&req.key))
			.map(|p| ResponsePayload::Partition(p.clone()))
			.ok_or_else(|| {
				Fault::not_found(
					EntityKind::Partition,
					req.key.to_string(),
				)
			})
	}

	fn list_partitions(&self, req: ListPartitionsRequest) -> OpResult {
		let table = self.table(&req.database, &req.table)?;

		let filter = req
			.filter
			.as_deref()
			.map(str::trim)
			.filter(|f| !f.is_empty());
		let partitions = match filter {
			None => table.partitions.clone(),
			Some(expression) => {
				let (column, value) = parse_filter(expression)?;
				if table.def.partition_column(&column).is_none()
				{
					return Err(Fault::service(
						"CAT_011",
						format!(
							"unknown column in partition filter: {}",
							column
						),
					));
				}
				table.partitions
					.iter()
					.filter(|p| {
						p.key.get(&column)
							== Some(value.as_str())
					})
					.cloned()
					.collect()
			}
		};
		Ok(ResponsePayload::Partitions(partitions))
	}

	fn mark_partition_event(
		&mut self,
		req: MarkPartitionEventRequest,
	) -> OpResult {
		self.partition_exists(&req.database, &req.table, &req.key)?;
		self.events.insert(EventMark {
			database: req.database.to_ascii_lowercase(),
			table: req.table.to_ascii_lowercase(),
			key: canonical_key(&req.key),
			event: req.event,
		});
		Ok(ResponsePayload::Unit)
	}

	fn check_partition_event(
		&self,
		req: CheckPartitionEventRequest,
	) -> OpResult {
		self.partition_exists(&req.database, &req.table, &req.key)?;
		let mark = EventMark {
			database: req.database.to_ascii_lowercase(),
			table: req.table.to_ascii_lowercase(),
			key: canonical_key(&req.key),
			event: req.event,
		};
		Ok(ResponsePayload::Marked(self.events.contains(&mark)))
	}

	fn database(&self, name: &str) -> Result<&StoredDatabase, Fault> {
		self.databases
			.get(&name.to_ascii_lowercase())
			.ok_or_else(|| {
				Fault::not_found(EntityKind::Database, name)
			})
	}

	fn database_mut(
		&mut self,
		name: &str,
	) -> Result<&mut StoredDatabase, Fault> {
		self.databases
			.get_mut(&name.to_ascii_lowercase())
			.ok_or_else(|| {
				Fault::not_found(EntityKind::Database, name)
			})
	}

	fn table(
		&self,
		database: &str,
		table: &str,
	) -> Result<&StoredTable, Fault> {
		let db = self.database(database)?;
		db.tables.get(&table.to_ascii_lowercase()).ok_or_else(|| {
			Fault::not_found(
				EntityKind::Table,
				format!("{}.{}", database, table),
			)
		})
	}

	fn table_mut(
		&mut self,
		database: &str,
		table: &str,
	) -> Result<&mut StoredTable, Fault> {
		let db = self.database_mut(database)?;
		db.tables
			.get_mut(&table.to_ascii_lowercase())
			.ok_or_else(|| {
				Fault::not_found(
					EntityKind::Table,
					format!("{}.{}", database, table),
				)
			})
	}

	fn partition_exists(
		&self,
		database: &str,
		table: &str,
		key: &PartitionKey,
	) -> Result<(), Fault> {
		let table = self.table(database, table)?;
		if table.partitions.iter().any(|p| p.key.matches(key)) {
			Ok(())
		} else {
			Err(Fault::not_found(
				EntityKind::Partition,
				key.to_string(),
			))
		}
	}
}

/// Resolve a caller-supplied location to an absolute URI.
fn qualify(location: &str) -> String {
	if location.contains(':') {
		location.to_string()
	} else {
		format!("file:{}", location)
	}
}

/// Positional check of a key against the declared partition columns.
fn key_matches_declared(table: &TableDef, key: &PartitionKey) -> bool {
	table.partition_columns.len() == key.len()
		&& table.partition_columns
			.iter()
			.zip(key.columns())
			.all(|(declared, given)| {
				declared.name.eq_ignore_ascii_case(given)
			})
}

fn canonical_key(key: &PartitionKey) -> String {
	key.iter()
		.map(|(column, value)| {
			format!("{}={}", column.to_ascii_lowercase(), value)
		})
		.collect::<Vec<_>>()
		.join("/")
}

/// Parse the comparison grammar of partition filters: `column = "value"`.
fn parse_filter(expression: &str) -> Result<(String, String), Fault> {
	let unsupported = || {
		Fault::service(
			"CAT_012",
			format!("unsupported partition filter: {}", expression),
		)
	};

	let Some((lhs, rhs)) = expression.split_once('=') else {
		return Err(unsupported());
	};

	let column = lhs.trim();
	if column.is_empty()
		|| !column
			.chars()
			.all(|c| c.is_ascii_alphanumeric() || c == '_')
	{
		return Err(unsupported());
	}

	let value = rhs.trim();
	if value.len() < 2 || !value.starts_with('"') || !value.ends_with('"')
	{
		return Err(unsupported());
	}

	Ok((
		column.to_string(),
		value[1..value.len() - 1].to_string(),
	))
}

#[cfg(test)]
mod tests {
	use metashelf_catalog::ColumnDef;
	use metashelf_type::FieldType;

	use super::*;

	fn state() -> CatalogState {
		CatalogState::new("file:/wh")
	}

	fn table_def(database: &str, name: &str) -> TableDef {
		TableDef {
			database: database.to_string(),
			name: name.to_string(),
			columns: vec![ColumnDef::new("id", FieldType::Int)],
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
	fn test_database_location_is_derived_under_the_warehouse() {
		let mut state = state();
		let result = state.create_database(CreateDatabaseRequest {
			database: DatabaseDef::new("TestDb"),
			if_not_exists: false,
		});
		assert!(matches!(result, Ok(ResponsePayload::Unit)));

		// Lookup is case-insensitive, stored case is preserved.
		let db = state.database("TESTDB").unwrap();
		assert_eq!(db.def.name, "TestDb");
		assert_eq!(
			db.def.location.as_deref(),
			Some("file:/wh/testdb.db")
		);
	}

	#[test]
	fn test_duplicate_database_without_flag_is_a_fault() {
		let mut state = state();
		for _ in 0..2 {
			let result =
				state.create_database(CreateDatabaseRequest {
					database: DatabaseDef::new("testdb"),
					if_not_exists: false,
				});
			if let Err(fault) = result {
				assert_eq!(
					fault,
					Fault::already_exists(
						EntityKind::Database,
						"testdb"
					)
				);
				return;
			}
		}
		panic!("second create did not fault");
	}

	#[test]
	fn test_if_not_exists_is_a_pure_noop() {
		let mut state = state();
		let mut first = DatabaseDef::new("testdb");
		first.comment = Some("original".to_string());
		state.create_database(CreateDatabaseRequest {
			database: first,
			if_not_exists: false,
		})
		.unwrap();

		let mut second = DatabaseDef::new("testdb");
		second.comment = Some("changed".to_string());
		state.create_database(CreateDatabaseRequest {
			database: second,
			if_not_exists: true,
		})
		.unwrap();

		// No attribute comparison, no overwrite.
		let db = state.database("testdb").unwrap();
		assert_eq!(db.def.comment.as_deref(), Some("original"));
	}

	#[test]
	fn test_partition_location_follows_declared_order() {
		let mut state = state();
		state.create_database(CreateDatabaseRequest {
			database: DatabaseDef::new("ptndb"),
			if_not_exists: false,
		})
		.unwrap();
		state.create_table(CreateTableRequest {
			table: table_def("ptndb", "page_view"),
			if_not_exists: false,
		})
		.unwrap();

		let key = PartitionKey::new()
			.with("dt", "04/30/2012")
			.with("country", "usa");
		state.add_partition(AddPartitionRequest {
			partition: PartitionDef {
				database: "ptndb".to_string(),
				table: "page_view".to_string(),
				key: key.clone(),
				location: None,
			},
		})
		.unwrap();

		let result = state.get_partition(GetPartitionRequest {
			database: "ptndb".to_string(),
			table: "page_view".to_string(),
			key,
		});
		let Ok(ResponsePayload::Partition(partition)) = result else {
			panic!("partition lookup failed");
		};
		assert_eq!(
			partition.location.as_deref(),
			Some("file:/wh/ptndb.db/page_view/dt=04/30/2012/country=usa")
		);
	}

	#[test]
	fn test_non_cascade_drop_of_non_empty_database_faults() {
		let mut state = state();
		state.create_database(CreateDatabaseRequest {
			database: DatabaseDef::new("testdb"),
			if_not_exists: false,
		})
		.unwrap();
		state.create_table(CreateTableRequest {
			table: table_def("testdb", "t"),
			if_not_exists: false,
		})
		.unwrap();

		let result = state.drop_database(DropDatabaseRequest {
			name: "testdb".to_string(),
			if_exists: false,
			cascade: false,
		});
		assert!(matches!(result, Err(Fault::Service { .. })));

		state.drop_database(DropDatabaseRequest {
			name: "testdb".to_string(),
			if_exists: false,
			cascade: true,
		})
		.unwrap();
		assert!(state.database("testdb").is_err());
	}

	#[test]
	fn test_filter_grammar() {
		assert_eq!(
			parse_filter("country = \"usa\"").unwrap(),
			("country".to_string(), "usa".to_string())
		);
		assert!(parse_filter("country").is_err());
		assert!(parse_filter("country = usa").is_err());
		assert!(parse_filter("country < \"usa\"").is_err());
	}
}
