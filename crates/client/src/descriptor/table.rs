// Copyright (c) metashelf.dev 2025
// This file is licensed under the MIT, see license.md file

use std::collections::HashSet;

use metashelf_catalog::{ColumnDef, TableDef};
use metashelf_type::{Error, Result};

use crate::format;

/// Validated create-table request. The storage format is resolved here,
/// once; the def carries the resolved identifiers from then on.
#[derive(Debug, Clone)]
pub struct CreateTableDesc {
	pub(crate) table: TableDef,
	pub(crate) if_not_exists: bool,
}

impl CreateTableDesc {
	pub fn builder(
		database: impl Into<String>,
		name: impl Into<String>,
		columns: Vec<ColumnDef>,
	) -> CreateTableDescBuilder {
		CreateTableDescBuilder {
			database: database.into(),
			name: name.into(),
			columns,
			partition_columns: Vec::new(),
			file_format: None,
			location: None,
			comment: None,
			external: false,
			if_not_exists: false,
		}
	}

	pub fn table(&self) -> &TableDef {
		&self.table
	}

	pub fn if_not_exists(&self) -> bool {
		self.if_not_exists
	}
}

#[derive(Debug, Clone)]
pub struct CreateTableDescBuilder {
	database: String,
	name: String,
	columns: Vec<ColumnDef>,
	partition_columns: Vec<ColumnDef>,
	file_format: Option<String>,
	location: Option<String>,
	comment: Option<String>,
	external: bool,
	if_not_exists: bool,
}

impl CreateTableDescBuilder {
	pub fn if_not_exists(mut self, if_not_exists: bool) -> Self {
		self.if_not_exists = if_not_exists;
		self
	}

	pub fn partition_columns(mut self, columns: Vec<ColumnDef>) -> Self {
		self.partition_columns = columns;
		self
	}

	/// Short storage-format name, resolved case-insensitively at build
	/// time. Unset or unrecognized names resolve to plain text.
	pub fn file_format(mut self, name: impl Into<String>) -> Self {
		self.file_format = Some(name.into());
		self
	}

	pub fn location(mut self, location: impl Into<String>) -> Self {
		self.location = Some(location.into());
		self
	}

	pub fn comment(mut self, comment: impl Into<String>) -> Self {
		self.comment = Some(comment.into());
		self
	}

	pub fn external(mut self, external: bool) -> Self {
		self.external = external;
		self
	}

	pub fn build(self) -> Result<CreateTableDesc> {
		if self.database.trim().is_empty() {
			return Err(Error::validation(
				"database name must not be empty",
			));
		}
		if self.name.trim().is_empty() {
			return Err(Error::validation(
				"table name must not be empty",
			));
		}
		if self.columns.is_empty() {
			return Err(Error::validation(
				"column list must not be empty",
			));
		}

		// Columns and partition columns share one namespace.
		let mut seen = HashSet::new();
		for column in self.columns.iter().chain(&self.partition_columns) {
			if column.name.trim().is_empty() {
				return Err(Error::validation(
					"column name must not be empty",
				));
			}
			if !seen.insert(column.name.to_ascii_lowercase()) {
				return Err(Error::validation(format!(
					"duplicate column name: {}",
					column.name
				)));
			}
		}

		let triple = format::resolve(self.file_format.as_deref());
		Ok(CreateTableDesc {
			table: TableDef {
				database: self.database,
				name: self.name,
				columns: self.columns,
				partition_columns: self.partition_columns,
				input_format: triple.input_format.to_string(),
				output_format: triple.output_format.to_string(),
				serde_lib: triple.serde_lib.to_string(),
				location: self.location,
				comment: self.comment,
				external: self.external,
			},
			if_not_exists: self.if_not_exists,
		})
	}
}
