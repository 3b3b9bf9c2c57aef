// Copyright (c) metashelf.dev 2025
// This file is licensed under the MIT, see license.md file

use metashelf_client::{CatalogClient, ClientConfig};
use metashelf_testing::{TestCatalog, init_tracing};

pub fn spawn_catalog() -> TestCatalog {
	init_tracing();
	TestCatalog::spawn()
}

pub fn connect(catalog: &TestCatalog) -> CatalogClient {
	CatalogClient::connect(ClientConfig::new(catalog.addr()))
		.expect("failed to connect to test catalog")
}
