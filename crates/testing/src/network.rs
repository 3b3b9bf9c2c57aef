// Copyright (c) metashelf.dev 2025
// This file is licensed under the MIT, see license.md file

use std::net::{SocketAddr, TcpListener};

/// Reserve an ephemeral local address and release it again. Nothing listens
/// there afterwards; useful for provoking connect failures.
pub fn free_local_addr() -> SocketAddr {
	let listener = TcpListener::bind("127.0.0.1:0")
		.expect("failed to bind to ephemeral port");
	let addr = listener.local_addr().expect("failed to get local addr");
	drop(listener);
	addr
}
