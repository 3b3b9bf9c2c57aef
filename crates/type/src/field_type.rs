// Copyright (c) metashelf.dev 2025
// This file is licensed under the MIT, see license.md file

use std::fmt::{Display, Formatter};

use serde::{Deserialize, Serialize};

/// Semantic type of a table column as recorded in the catalog.
///
/// The catalog stores types, it does not interpret values; this enum is the
/// closed set of type names the service understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldType {
	Boolean,
	TinyInt,
	SmallInt,
	Int,
	BigInt,
	Float,
	Double,
	Decimal,
	Utf8,
	Binary,
	Date,
	Timestamp,
}

impl FieldType {
	pub fn as_str(&self) -> &'static str {
		match self {
			FieldType::Boolean => "boolean",
			FieldType::TinyInt => "tinyint",
			FieldType::SmallInt => "smallint",
			FieldType::Int => "int",
			FieldType::BigInt => "bigint",
			FieldType::Float => "float",
			FieldType::Double => "double",
			FieldType::Decimal => "decimal",
			FieldType::Utf8 => "utf8",
			FieldType::Binary => "binary",
			FieldType::Date => "date",
			FieldType::Timestamp => "timestamp",
		}
	}
}

impl Display for FieldType {
	fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
		f.write_str(self.as_str())
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_serialized_spelling_matches_display() {
		let json = serde_json::to_string(&FieldType::BigInt).unwrap();
		assert_eq!(json, "\"bigint\"");
		assert_eq!(FieldType::BigInt.to_string(), "bigint");
	}

	#[test]
	fn test_round_trip() {
		let parsed: FieldType =
			serde_json::from_str("\"timestamp\"").unwrap();
		assert_eq!(parsed, FieldType::Timestamp);
	}
}
