// Copyright (c) metashelf.dev 2025
// This file is licensed under the MIT, see license.md file

//! Wire protocol between the client and the catalog service: one JSON
//! message per line over a TCP stream. Requests carry a client-generated id
//! that the matching response echoes back; faults are typed payloads, never
//! free text the client would have to parse.

mod codec;
mod fault;
mod request;
mod response;

pub use codec::{generate_request_id, read_message, write_message};
pub use fault::{Fault, FaultResponse};
pub use request::{
	AddPartitionRequest, CheckPartitionEventRequest, CreateDatabaseRequest,
	CreateTableRequest, DropDatabaseRequest, DropPartitionRequest,
	DropTableRequest, GetDatabaseRequest, GetPartitionRequest,
	GetTableRequest, ListDatabasesRequest, ListPartitionsRequest,
	ListTablesRequest, MarkPartitionEventRequest, RenameTableRequest,
	Request, RequestPayload,
};
pub use response::{Response, ResponsePayload};
