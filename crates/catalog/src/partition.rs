// Copyright (c) metashelf.dev 2025
// This file is licensed under the MIT, see license.md file

use std::fmt::{Display, Formatter};

use serde::{Deserialize, Serialize};

/// Ordered assignment of values to a table's partition columns.
///
/// Order is significant: the remote side is positional, not name-indexed,
/// so a key sent over the wire must follow the table's declared
/// partition-column order. Column lookup is case-insensitive, stored case
/// is preserved.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PartitionKey(Vec<(String, String)>);

impl PartitionKey {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn with(
		mut self,
		column: impl Into<String>,
		value: impl Into<String>,
	) -> Self {
		self.push(column, value);
		self
	}

	pub fn push(
		&mut self,
		column: impl Into<String>,
		value: impl Into<String>,
	) {
		self.0.push((column.into(), value.into()));
	}

	pub fn get(&self, column: &str) -> Option<&str> {
		self.0.iter()
			.find(|(name, _)| name.eq_ignore_ascii_case(column))
			.map(|(_, value)| value.as_str())
	}

	pub fn contains(&self, column: &str) -> bool {
		self.get(column).is_some()
	}

	pub fn len(&self) -> usize {
		self.0.len()
	}

	pub fn is_empty(&self) -> bool {
		self.0.is_empty()
	}

	pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
		self.0.iter().map(|(c, v)| (c.as_str(), v.as_str()))
	}

	pub fn columns(&self) -> impl Iterator<Item = &str> {
		self.0.iter().map(|(c, _)| c.as_str())
	}

	pub fn values(&self) -> impl Iterator<Item = &str> {
		self.0.iter().map(|(_, v)| v.as_str())
	}

	/// Positional equality: same length, pairwise case-insensitive column
	/// names, exact values.
	pub fn matches(&self, other: &PartitionKey) -> bool {
		self.0.len() == other.0.len()
			&& self.iter().zip(other.iter()).all(|((ac, av), (bc, bv))| {
				ac.eq_ignore_ascii_case(bc) && av == bv
			})
	}
}

impl FromIterator<(String, String)> for PartitionKey {
	fn from_iter<I: IntoIterator<Item = (String, String)>>(iter: I) -> Self {
		Self(iter.into_iter().collect())
	}
}

impl Display for PartitionKey {
	fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
		for (index, (column, value)) in self.0.iter().enumerate() {
			if index > 0 {
				f.write_str("/")?;
			}
			write!(f, "{}={}", column, value)?;
		}
		Ok(())
	}
}

/// A partition as known to the catalog service. Belongs to exactly one
/// table; `location` defaults to a path derived from the table location and
/// the ordered key values when the create request carries none.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PartitionDef {
	pub database: String,
	pub table: String,
	pub key: PartitionKey,
	pub location: Option<String>,
}
