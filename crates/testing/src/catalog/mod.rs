// Copyright (c) metashelf.dev 2025
// This file is licensed under the MIT, see license.md file

mod glob;
mod state;

use std::{
	io::BufReader,
	net::{Shutdown, SocketAddr, TcpListener, TcpStream},
	sync::{
		Arc,
		atomic::{AtomicBool, Ordering},
	},
	thread,
};

use metashelf_net::{Request, Response, read_message, write_message};
use parking_lot::Mutex;
use tracing::debug;

use self::state::CatalogState;

pub const DEFAULT_WAREHOUSE: &str = "file:/warehouse";

/// In-process catalog service for tests.
///
/// Listens on an ephemeral local port and serves the wire protocol from an
/// in-memory catalog. `sever_connections` shuts down every accepted stream
/// while the listener stays up, so tests can simulate a transport failure
/// and then connect a replacement client against the same endpoint.
pub struct TestCatalog {
	addr: SocketAddr,
	shared: Arc<Shared>,
}

struct Shared {
	state: Mutex<CatalogState>,
	connections: Mutex<Vec<TcpStream>>,
	shutdown: AtomicBool,
}

impl TestCatalog {
	pub fn spawn() -> Self {
		Self::spawn_with_warehouse(DEFAULT_WAREHOUSE)
	}

	pub fn spawn_with_warehouse(warehouse_root: &str) -> Self {
		let listener = TcpListener::bind("127.0.0.1:0")
			.expect("failed to bind test catalog");
		let addr = listener
			.local_addr()
			.expect("failed to get test catalog addr");

		let shared = Arc::new(Shared {
			state: Mutex::new(CatalogState::new(warehouse_root)),
			connections: Mutex::new(Vec::new()),
			shutdown: AtomicBool::new(false),
		});

		let accept_shared = shared.clone();
		thread::spawn(move || accept_loop(listener, accept_shared));
		debug!(addr = %addr, "test catalog listening");

		Self {
			addr,
			shared,
		}
	}

	/// The `host:port` endpoint clients should connect to.
	pub fn addr(&self) -> String {
		self.addr.to_string()
	}

	/// Shut down every accepted connection. The listener keeps running,
	/// so new clients can still connect.
	pub fn sever_connections(&self) {
		for stream in self.shared.connections.lock().drain(..) {
			let _ = stream.shutdown(Shutdown::Both);
		}
	}

	pub fn shutdown(&self) {
		if self.shared.shutdown.swap(true, Ordering::SeqCst) {
			return;
		}
		// Wake the accept loop so it observes the flag.
		let _ = TcpStream::connect(self.addr);
		self.sever_connections();
	}
}

impl Drop for TestCatalog {
	fn drop(&mut self) {
		self.shutdown();
	}
}

fn accept_loop(listener: TcpListener, shared: Arc<Shared>) {
	for stream in listener.incoming() {
		if shared.shutdown.load(Ordering::SeqCst) {
			break;
		}
		let Ok(stream) = stream else {
			continue;
		};
		if let Ok(clone) = stream.try_clone() {
			shared.connections.lock().push(clone);
		}
		let conn_shared = shared.clone();
		thread::spawn(move || serve_connection(stream, conn_shared));
	}
}

fn serve_connection(mut stream: TcpStream, shared: Arc<Shared>) {
	let Ok(clone) = stream.try_clone() else {
		return;
	};
	let mut reader = BufReader::new(clone);

	loop {
		let request: Request = match read_message(&mut reader) {
			Ok(request) => request,
			Err(_) => break,
		};
		debug!(id = %request.id, "test catalog request");

		let payload = shared.state.lock().handle(request.payload);
		let response = Response {
			id: request.id,
			payload,
		};
		if write_message(&mut stream, &response).is_err() {
			break;
		}
	}
}
