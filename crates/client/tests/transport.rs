// Copyright (c) metashelf.dev 2025
// This file is licensed under the MIT, see license.md file

mod common;

use std::time::{Duration, Instant};

use common::{connect, spawn_catalog};
use metashelf_client::{
	CatalogClient, ClientConfig, CreateDatabaseDesc, Error,
};
use metashelf_testing::{free_local_addr, init_tracing};

#[test]
fn test_transport_failure_poisons_the_client() {
	let catalog = spawn_catalog();
	let mut client = connect(&catalog);

	let desc = CreateDatabaseDesc::builder("testdb").build().unwrap();
	client.create_database(&desc).unwrap();

	// Sever the connection under the client's feet; the next call
	// observes it as a transport failure.
	catalog.sever_connections();
	let err = client.list_database_names("*").unwrap_err();
	assert!(err.is_transport());

	// Every further call on the same client fails fast, without
	// attempting the network.
	let started = Instant::now();
	let err = client.get_database("testdb").unwrap_err();
	assert!(err.is_transport());
	assert!(started.elapsed() < Duration::from_millis(100));

	// Recovery is caller-driven: a replacement client against the same
	// endpoint succeeds and observes the earlier write.
	let mut replacement = connect(&catalog);
	let names = replacement.list_database_names("*").unwrap();
	assert!(names.iter().any(|name| name == "testdb"));

	client.close();
	replacement.close();
}

#[test]
fn test_connect_failure_is_a_transport_error() {
	init_tracing();
	let nobody_listens = free_local_addr();

	let config = ClientConfig::new(nobody_listens.to_string())
		.connect_retries(0)
		.connect_timeout(Duration::from_millis(200));
	let err = CatalogClient::connect(config).unwrap_err();
	assert!(err.is_transport());
}

#[test]
fn test_close_is_idempotent() {
	let catalog = spawn_catalog();
	let mut client = connect(&catalog);

	client.close();
	client.close();

	let err = client.list_database_names("*").unwrap_err();
	assert!(err.is_transport());
}

#[test]
fn test_operations_before_and_after_failure_do_not_interleave() {
	let catalog = spawn_catalog();
	let mut client = connect(&catalog);

	let desc = CreateDatabaseDesc::builder("survivor").build().unwrap();
	client.create_database(&desc).unwrap();

	catalog.sever_connections();
	assert!(client.create_database(&desc).unwrap_err().is_transport());

	// The failed create was either applied before the severance or not
	// at all; the replacement client sees a consistent catalog either
	// way, and the idempotency flag makes the replay safe.
	let mut replacement = connect(&catalog);
	let retry = CreateDatabaseDesc::builder("survivor")
		.if_not_exists(true)
		.build()
		.unwrap();
	replacement.create_database(&retry).unwrap();
	assert!(replacement
		.list_database_names("survivor")
		.unwrap()
		.iter()
		.any(|name| name == "survivor"));

	replacement.close();
}
