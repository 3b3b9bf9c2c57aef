// Copyright (c) metashelf.dev 2025
// This file is licensed under the MIT, see license.md file

use metashelf_type::FieldType;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnDef {
	pub name: String,
	pub field_type: FieldType,
	pub comment: Option<String>,
}

impl ColumnDef {
	pub fn new(name: impl Into<String>, field_type: FieldType) -> Self {
		Self {
			name: name.into(),
			field_type,
			comment: None,
		}
	}

	pub fn with_comment(mut self, comment: impl Into<String>) -> Self {
		self.comment = Some(comment.into());
		self
	}
}
