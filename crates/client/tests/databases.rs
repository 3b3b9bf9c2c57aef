// Copyright (c) metashelf.dev 2025
// This file is licensed under the MIT, see license.md file

mod common;

use common::{connect, spawn_catalog};
use metashelf_client::{CreateDatabaseDesc, EntityKind, Error};
use metashelf_testing::DEFAULT_WAREHOUSE;

#[test]
fn test_create_database_with_derived_location() {
	let catalog = spawn_catalog();
	let mut client = connect(&catalog);

	let desc = CreateDatabaseDesc::builder("testdb").build().unwrap();
	client.create_database(&desc).unwrap();

	let names = client.list_database_names("*").unwrap();
	assert!(names.iter().any(|name| name == "default"));
	assert!(names.iter().any(|name| name == "testdb"));

	let db = client.get_database("testdb").unwrap();
	assert_eq!(db.comment, None);
	assert!(db.properties.is_empty());
	let location = db.location.expect("server must resolve a location");
	assert!(location
		.eq_ignore_ascii_case(&format!("{}/testdb.db", DEFAULT_WAREHOUSE)));

	client.close();
}

#[test]
fn test_create_database_with_explicit_location() {
	let catalog = spawn_catalog();
	let mut client = connect(&catalog);

	let desc = CreateDatabaseDesc::builder("locationdb")
		.location("/tmp/locationdb")
		.build()
		.unwrap();
	client.create_database(&desc).unwrap();

	let db = client.get_database("locationdb").unwrap();
	assert!(db.location
		.unwrap()
		.eq_ignore_ascii_case("file:/tmp/locationdb"));

	client.close();
}

#[test]
fn test_database_attributes_round_trip() {
	let catalog = spawn_catalog();
	let mut client = connect(&catalog);

	let desc = CreateDatabaseDesc::builder("annotated")
		.comment("nightly marts")
		.property("owner", "etl")
		.build()
		.unwrap();
	client.create_database(&desc).unwrap();

	// Lookup is case-insensitive; stored case is preserved.
	let db = client.get_database("Annotated").unwrap();
	assert_eq!(db.name, "annotated");
	assert_eq!(db.comment.as_deref(), Some("nightly marts"));
	assert_eq!(
		db.properties.get("owner").map(String::as_str),
		Some("etl")
	);

	client.close();
}

#[test]
fn test_create_database_twice() {
	let catalog = spawn_catalog();
	let mut client = connect(&catalog);

	let desc = CreateDatabaseDesc::builder("testdb").build().unwrap();
	client.create_database(&desc).unwrap();

	let err = client.create_database(&desc).unwrap_err();
	assert_eq!(
		err,
		Error::already_exists(EntityKind::Database, "testdb")
	);

	// With the flag set the call is a pure no-op: no fault, no attribute
	// comparison, no overwrite.
	let noop = CreateDatabaseDesc::builder("testdb")
		.if_not_exists(true)
		.comment("should not overwrite")
		.build()
		.unwrap();
	client.create_database(&noop).unwrap();
	assert_eq!(client.get_database("testdb").unwrap().comment, None);

	client.close();
}

#[test]
fn test_drop_database_missing() {
	let catalog = spawn_catalog();
	let mut client = connect(&catalog);

	let err = client.drop_database("ghost", false, false).unwrap_err();
	assert_eq!(err, Error::not_found(EntityKind::Database, "ghost"));

	// Idempotent with the ignore-missing flag.
	client.drop_database("ghost", true, false).unwrap();

	client.close();
}

#[test]
fn test_drop_database_cascade() {
	let catalog = spawn_catalog();
	let mut client = connect(&catalog);

	let desc = CreateDatabaseDesc::builder("testdb").build().unwrap();
	client.create_database(&desc).unwrap();

	let table = metashelf_client::CreateTableDesc::builder(
		"testdb",
		"t1",
		vec![metashelf_client::ColumnDef::new(
			"id",
			metashelf_client::FieldType::Int,
		)],
	)
	.build()
	.unwrap();
	client.create_table(&table).unwrap();

	// A non-empty database only drops with cascade.
	let err = client.drop_database("testdb", false, false).unwrap_err();
	assert!(matches!(err, Error::Service { .. }));

	client.drop_database("testdb", false, true).unwrap();
	let err = client.get_database("testdb").unwrap_err();
	assert_eq!(err, Error::not_found(EntityKind::Database, "testdb"));

	client.close();
}

#[test]
fn test_list_database_names_by_pattern() {
	let catalog = spawn_catalog();
	let mut client = connect(&catalog);

	for name in ["marts_one", "marts_two", "staging"] {
		let desc =
			CreateDatabaseDesc::builder(name).build().unwrap();
		client.create_database(&desc).unwrap();
	}

	let names = client.list_database_names("marts_*").unwrap();
	assert_eq!(names, vec!["marts_one", "marts_two"]);

	let names = client.list_database_names("marts_?ne").unwrap();
	assert_eq!(names, vec!["marts_one"]);

	client.close();
}
