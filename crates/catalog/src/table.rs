// Copyright (c) metashelf.dev 2025
// This file is licensed under the MIT, see license.md file

use serde::{Deserialize, Serialize};

use crate::ColumnDef;

/// A table as known to the catalog service.
///
/// The composite key is (database, name). `input_format`, `output_format`
/// and `serde_lib` are opaque storage-handler identifiers, resolved once at
/// create time and copied verbatim by every later operation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableDef {
	pub database: String,
	pub name: String,
	pub columns: Vec<ColumnDef>,
	pub partition_columns: Vec<ColumnDef>,
	pub input_format: String,
	pub output_format: String,
	pub serde_lib: String,
	pub location: Option<String>,
	pub comment: Option<String>,
	pub external: bool,
}

impl TableDef {
	pub fn qualified_name(&self) -> String {
		format!("{}.{}", self.database, self.name)
	}

	pub fn column(&self, name: &str) -> Option<&ColumnDef> {
		self.columns.iter().find(|c| c.name.eq_ignore_ascii_case(name))
	}

	pub fn partition_column(&self, name: &str) -> Option<&ColumnDef> {
		self.partition_columns
			.iter()
			.find(|c| c.name.eq_ignore_ascii_case(name))
	}

	pub fn is_partitioned(&self) -> bool {
		!self.partition_columns.is_empty()
	}
}

#[cfg(test)]
mod tests {
	use metashelf_type::FieldType;

	use super::*;

	fn table() -> TableDef {
		TableDef {
			database: "reports".to_string(),
			name: "page_view".to_string(),
			columns: vec![
				ColumnDef::new("userid", FieldType::Int),
				ColumnDef::new("pageurl", FieldType::Utf8),
			],
			partition_columns: vec![ColumnDef::new(
				"dt",
				FieldType::Utf8,
			)],
			input_format: "in".to_string(),
			output_format: "out".to_string(),
			serde_lib: "serde".to_string(),
			location: None,
			comment: None,
			external: false,
		}
	}

	#[test]
	fn test_column_lookup_is_case_insensitive() {
		let table = table();
		assert!(table.column("USERID").is_some());
		assert!(table.column("dt").is_none());
		assert!(table.partition_column("DT").is_some());
	}

	#[test]
	fn test_qualified_name() {
		assert_eq!(table().qualified_name(), "reports.page_view");
	}
}
