// Copyright (c) metashelf.dev 2025
// This file is licensed under the MIT, see license.md file

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// A database as known to the catalog service.
///
/// `location` is the resolved absolute URI. The service computes it when a
/// create request carries none; a def read back from the service always has
/// it set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DatabaseDef {
	pub name: String,
	pub comment: Option<String>,
	pub location: Option<String>,
	pub properties: BTreeMap<String, String>,
}

impl DatabaseDef {
	pub fn new(name: impl Into<String>) -> Self {
		Self {
			name: name.into(),
			comment: None,
			location: None,
			properties: BTreeMap::new(),
		}
	}
}
