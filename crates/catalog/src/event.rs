// Copyright (c) metashelf.dev 2025
// This file is licensed under the MIT, see license.md file

use std::fmt::{Display, Formatter};

use serde::{Deserialize, Serialize};

/// Lifecycle event a partition can be tagged with. A tag is a set-membership
/// fact per (partition, event type) pair, independent of the partition's
/// other attributes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PartitionEventType {
	LoadDone,
}

impl Display for PartitionEventType {
	fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
		f.write_str(match self {
			PartitionEventType::LoadDone => "load_done",
		})
	}
}
