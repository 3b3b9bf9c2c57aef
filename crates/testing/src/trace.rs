// Copyright (c) metashelf.dev 2025
// This file is licensed under the MIT, see license.md file

use tracing_subscriber::EnvFilter;

/// Install a test-friendly tracing subscriber, honoring `RUST_LOG`.
/// Safe to call from every test; only the first call wins.
pub fn init_tracing() {
	let _ = tracing_subscriber::fmt()
		.with_env_filter(EnvFilter::from_default_env())
		.with_test_writer()
		.try_init();
}
