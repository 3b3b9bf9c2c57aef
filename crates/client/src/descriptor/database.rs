// Copyright (c) metashelf.dev 2025
// This file is licensed under the MIT, see license.md file

use std::collections::BTreeMap;

use metashelf_catalog::DatabaseDef;
use metashelf_type::{Error, Result};

/// Validated create-database request.
#[derive(Debug, Clone)]
pub struct CreateDatabaseDesc {
	pub(crate) database: DatabaseDef,
	pub(crate) if_not_exists: bool,
}

impl CreateDatabaseDesc {
	pub fn builder(name: impl Into<String>) -> CreateDatabaseDescBuilder {
		CreateDatabaseDescBuilder {
			name: name.into(),
			comment: None,
			location: None,
			properties: BTreeMap::new(),
			if_not_exists: false,
		}
	}

	pub fn name(&self) -> &str {
		&self.database.name
	}

	pub fn if_not_exists(&self) -> bool {
		self.if_not_exists
	}
}

#[derive(Debug, Clone)]
pub struct CreateDatabaseDescBuilder {
	name: String,
	comment: Option<String>,
	location: Option<String>,
	properties: BTreeMap<String, String>,
	if_not_exists: bool,
}

impl CreateDatabaseDescBuilder {
	/// Succeed as a no-op when the database already exists.
	pub fn if_not_exists(mut self, if_not_exists: bool) -> Self {
		self.if_not_exists = if_not_exists;
		self
	}

	pub fn comment(mut self, comment: impl Into<String>) -> Self {
		self.comment = Some(comment.into());
		self
	}

	/// Explicit location. When absent the service derives one under its
	/// warehouse root.
	pub fn location(mut self, location: impl Into<String>) -> Self {
		self.location = Some(location.into());
		self
	}

	pub fn property(
		mut self,
		key: impl Into<String>,
		value: impl Into<String>,
	) -> Self {
		self.properties.insert(key.into(), value.into());
		self
	}

	pub fn build(self) -> Result<CreateDatabaseDesc> {
		if self.name.trim().is_empty() {
			return Err(Error::validation(
				"database name must not be empty",
			));
		}
		Ok(CreateDatabaseDesc {
			database: DatabaseDef {
				name: self.name,
				comment: self.comment,
				location: self.location,
				properties: self.properties,
			},
			if_not_exists: self.if_not_exists,
		})
	}
}
