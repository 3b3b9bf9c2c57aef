// Copyright (c) metashelf.dev 2025
// This file is licensed under the MIT, see license.md file

use std::fmt::{Display, Formatter};

use serde::{Deserialize, Serialize};

/// Fault detail reported by the catalog service, preserved verbatim for
/// diagnostics. The client never branches on `message` text; classification
/// happens on the typed wire payload before a `Diagnostic` reaches a caller.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Diagnostic {
	pub code: String,
	pub message: String,
	pub label: Option<String>,
	pub notes: Vec<String>,
}

impl Diagnostic {
	pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
		Self {
			code: code.into(),
			message: message.into(),
			label: None,
			notes: Vec::new(),
		}
	}

	pub fn with_label(mut self, label: impl Into<String>) -> Self {
		self.label = Some(label.into());
		self
	}

	pub fn with_note(mut self, note: impl Into<String>) -> Self {
		self.notes.push(note.into());
		self
	}
}

impl Display for Diagnostic {
	fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
		write!(f, "{}: {}", self.code, self.message)
	}
}

/// The kind of catalog entity an error refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntityKind {
	Database,
	Table,
	Partition,
}

impl Display for EntityKind {
	fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
		f.write_str(match self {
			EntityKind::Database => "database",
			EntityKind::Table => "table",
			EntityKind::Partition => "partition",
		})
	}
}

/// Everything a catalog operation can fail with.
///
/// `Validation` is raised locally before any request leaves the process.
/// `NotFound` and `AlreadyExists` are deterministic service answers and safe
/// to treat as expected outcomes. `Transport` means the issuing session is
/// permanently unusable; the owning client must be replaced.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum Error {
	#[error("invalid request: {reason}")]
	Validation { reason: String },

	#[error("{kind} not found: {name}")]
	NotFound { kind: EntityKind, name: String },

	#[error("{kind} already exists: {name}")]
	AlreadyExists { kind: EntityKind, name: String },

	#[error("catalog service fault: {diagnostic}")]
	Service { diagnostic: Diagnostic },

	#[error("transport failure: {reason}")]
	Transport { reason: String },
}

impl Error {
	pub fn validation(reason: impl Into<String>) -> Self {
		Error::Validation {
			reason: reason.into(),
		}
	}

	pub fn not_found(kind: EntityKind, name: impl Into<String>) -> Self {
		Error::NotFound {
			kind,
			name: name.into(),
		}
	}

	pub fn already_exists(kind: EntityKind, name: impl Into<String>) -> Self {
		Error::AlreadyExists {
			kind,
			name: name.into(),
		}
	}

	pub fn service(diagnostic: Diagnostic) -> Self {
		Error::Service {
			diagnostic,
		}
	}

	pub fn transport(reason: impl Into<String>) -> Self {
		Error::Transport {
			reason: reason.into(),
		}
	}

	/// True when the originating session is no longer usable.
	pub fn is_transport(&self) -> bool {
		matches!(self, Error::Transport { .. })
	}
}

pub type Result<T> = std::result::Result<T, Error>;
