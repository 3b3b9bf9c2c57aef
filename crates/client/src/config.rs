// Copyright (c) metashelf.dev 2025
// This file is licensed under the MIT, see license.md file

use std::time::Duration;

use metashelf_type::{Error, Result};

/// Connection configuration for a [`crate::CatalogClient`].
///
/// Endpoints are `host:port` strings tried in order; each gets
/// `connect_retries + 1` attempts before the next one is considered.
#[derive(Debug, Clone)]
pub struct ClientConfig {
	pub(crate) endpoints: Vec<String>,
	pub(crate) connect_retries: u32,
	pub(crate) connect_timeout: Duration,
	pub(crate) read_timeout: Duration,
}

impl ClientConfig {
	pub fn new(endpoint: impl Into<String>) -> Self {
		Self {
			endpoints: vec![endpoint.into()],
			connect_retries: 2,
			connect_timeout: Duration::from_secs(5),
			read_timeout: Duration::from_secs(30),
		}
	}

	/// Add a fallback endpoint.
	pub fn endpoint(mut self, endpoint: impl Into<String>) -> Self {
		self.endpoints.push(endpoint.into());
		self
	}

	pub fn connect_retries(mut self, retries: u32) -> Self {
		self.connect_retries = retries;
		self
	}

	pub fn connect_timeout(mut self, timeout: Duration) -> Self {
		self.connect_timeout = timeout;
		self
	}

	pub fn read_timeout(mut self, timeout: Duration) -> Self {
		self.read_timeout = timeout;
		self
	}

	pub(crate) fn validate(&self) -> Result<()> {
		if self.endpoints.iter().any(|e| e.trim().is_empty()) {
			return Err(Error::validation(
				"endpoint must not be empty",
			));
		}
		Ok(())
	}
}
