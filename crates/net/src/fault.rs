// Copyright (c) metashelf.dev 2025
// This file is licensed under the MIT, see license.md file

use metashelf_type::{Diagnostic, EntityKind, Error};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FaultResponse {
	pub fault: Fault,
}

/// Remote fault as it travels on the wire. Transport failure is never a
/// wire payload; it is inferred at the socket boundary by the session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind")]
pub enum Fault {
	NotFound { entity: EntityKind, name: String },
	AlreadyExists { entity: EntityKind, name: String },
	Service { diagnostic: Diagnostic },
}

impl Fault {
	pub fn not_found(entity: EntityKind, name: impl Into<String>) -> Self {
		Fault::NotFound {
			entity,
			name: name.into(),
		}
	}

	pub fn already_exists(
		entity: EntityKind,
		name: impl Into<String>,
	) -> Self {
		Fault::AlreadyExists {
			entity,
			name: name.into(),
		}
	}

	pub fn service(
		code: impl Into<String>,
		message: impl Into<String>,
	) -> Self {
		Fault::Service {
			diagnostic: Diagnostic::new(code, message),
		}
	}

	/// Structural classification into the client error taxonomy.
	pub fn into_error(self) -> Error {
		match self {
			Fault::NotFound {
				entity,
				name,
			} => Error::not_found(entity, name),
			Fault::AlreadyExists {
				entity,
				name,
			} => Error::already_exists(entity, name),
			Fault::Service {
				diagnostic,
			} => Error::service(diagnostic),
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_classification_is_structural() {
		// A service fault whose text happens to say "not found" must
		// still classify as a service fault.
		let fault = Fault::service("CAT_050", "scratch volume not found");
		assert!(matches!(fault.into_error(), Error::Service { .. }));
	}

	#[test]
	fn test_not_found_carries_the_entity_key() {
		let err = Fault::not_found(EntityKind::Database, "reports")
			.into_error();
		assert_eq!(err, Error::not_found(EntityKind::Database, "reports"));
	}
}
