// Copyright (c) metashelf.dev 2025
// This file is licensed under the MIT, see license.md file

use std::collections::HashSet;

use metashelf_catalog::{PartitionDef, PartitionKey};
use metashelf_type::{Error, Result};

/// Validated add-partition request.
///
/// Build-time validation covers what the descriptor can see on its own: a
/// non-empty key with well-formed entries. Whether the key is a total
/// assignment over the table's declared partition columns is checked by the
/// façade against the fetched table definition, before anything is sent.
#[derive(Debug, Clone)]
pub struct AddPartitionDesc {
	pub(crate) partition: PartitionDef,
}

impl AddPartitionDesc {
	pub fn builder(
		database: impl Into<String>,
		table: impl Into<String>,
		key: PartitionKey,
	) -> AddPartitionDescBuilder {
		AddPartitionDescBuilder {
			database: database.into(),
			table: table.into(),
			key,
			location: None,
		}
	}

	pub fn key(&self) -> &PartitionKey {
		&self.partition.key
	}
}

#[derive(Debug, Clone)]
pub struct AddPartitionDescBuilder {
	database: String,
	table: String,
	key: PartitionKey,
	location: Option<String>,
}

impl AddPartitionDescBuilder {
	/// Explicit location override. When absent the service derives
	/// `<tableLocation>/<col1>=<val1>/...` in declared column order.
	pub fn location(mut self, location: impl Into<String>) -> Self {
		self.location = Some(location.into());
		self
	}

	pub fn build(self) -> Result<AddPartitionDesc> {
		if self.database.trim().is_empty() {
			return Err(Error::validation(
				"database name must not be empty",
			));
		}
		if self.table.trim().is_empty() {
			return Err(Error::validation(
				"table name must not be empty",
			));
		}
		if self.key.is_empty() {
			return Err(Error::validation(
				"partition key must not be empty",
			));
		}

		let mut seen = HashSet::new();
		for (column, value) in self.key.iter() {
			if column.trim().is_empty() {
				return Err(Error::validation(
					"partition column name must not be empty",
				));
			}
			if value.is_empty() {
				return Err(Error::validation(format!(
					"partition value for column {} must not be empty",
					column
				)));
			}
			if !seen.insert(column.to_ascii_lowercase()) {
				return Err(Error::validation(format!(
					"duplicate partition column: {}",
					column
				)));
			}
		}

		Ok(AddPartitionDesc {
			partition: PartitionDef {
				database: self.database,
				table: self.table,
				key: self.key,
				location: self.location,
			},
		})
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_empty_key_is_rejected() {
		let err = AddPartitionDesc::builder(
			"testdb",
			"page_view",
			PartitionKey::new(),
		)
		.build()
		.unwrap_err();
		assert!(matches!(err, Error::Validation { .. }));
		assert!(err.to_string().contains("partition key"));
	}

	#[test]
	fn test_empty_value_names_the_column() {
		let key = PartitionKey::new().with("dt", "");
		let err = AddPartitionDesc::builder("testdb", "page_view", key)
			.build()
			.unwrap_err();
		assert!(err.to_string().contains("dt"));
	}

	#[test]
	fn test_duplicate_column_is_rejected() {
		let key = PartitionKey::new()
			.with("dt", "2012-04-30")
			.with("DT", "2012-05-01");
		let err = AddPartitionDesc::builder("testdb", "page_view", key)
			.build()
			.unwrap_err();
		assert!(err.to_string().contains("duplicate partition column"));
	}
}
