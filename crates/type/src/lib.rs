// Copyright (c) metashelf.dev 2025
// This file is licensed under the MIT, see license.md file

mod error;
mod field_type;

pub use error::{Diagnostic, EntityKind, Error, Result};
pub use field_type::FieldType;
