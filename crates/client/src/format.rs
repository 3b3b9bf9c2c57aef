// Copyright (c) metashelf.dev 2025
// This file is licensed under the MIT, see license.md file

//! Short storage-format names and the handler triples they resolve to.
//!
//! Resolution happens exactly once, when a create-table descriptor is
//! built. Everything downstream (rename, create-table-like) copies the
//! resolved identifiers verbatim and never re-resolves from the short name.

use tracing::warn;

/// The (input format, output format, serialization library) identifiers a
/// short format name stands for. The identifiers are the storage-handler
/// class names used by the catalog ecosystem, carried as opaque strings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FormatTriple {
	pub input_format: &'static str,
	pub output_format: &'static str,
	pub serde_lib: &'static str,
}

const TEXT: FormatTriple = FormatTriple {
	input_format: "org.apache.hadoop.mapred.TextInputFormat",
	output_format: "org.apache.hadoop.hive.ql.io.IgnoreKeyTextOutputFormat",
	serde_lib: "org.apache.hadoop.hive.serde2.lazy.LazySimpleSerDe",
};

const RCFILE: FormatTriple = FormatTriple {
	input_format: "org.apache.hadoop.hive.ql.io.RCFileInputFormat",
	output_format: "org.apache.hadoop.hive.ql.io.RCFileOutputFormat",
	serde_lib: "org.apache.hadoop.hive.serde2.columnar.ColumnarSerDe",
};

const SEQUENCEFILE: FormatTriple = FormatTriple {
	input_format: "org.apache.hadoop.mapred.SequenceFileInputFormat",
	output_format: "org.apache.hadoop.hive.ql.io.HiveSequenceFileOutputFormat",
	serde_lib: "org.apache.hadoop.hive.serde2.lazy.LazySimpleSerDe",
};

/// Resolve a short format name, case-insensitively. An absent or
/// unrecognized name yields the plain-text triple.
pub fn resolve(name: Option<&str>) -> FormatTriple {
	let Some(name) = name else {
		return TEXT;
	};
	match name.to_ascii_lowercase().as_str() {
		"rcfile" => RCFILE,
		"sequencefile" => SEQUENCEFILE,
		"textfile" => TEXT,
		other => {
			warn!(
				format = other,
				"unrecognized storage format, using plain text"
			);
			TEXT
		}
	}
}
