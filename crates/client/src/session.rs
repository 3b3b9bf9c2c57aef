// Copyright (c) metashelf.dev 2025
// This file is licensed under the MIT, see license.md file

use std::{
	io::BufReader,
	net::{Shutdown, TcpStream, ToSocketAddrs},
};

use metashelf_net::{
	Request, RequestPayload, Response, ResponsePayload, generate_request_id,
	read_message, write_message,
};
use metashelf_type::{Error, Result};
use tracing::{debug, warn};

use crate::config::ClientConfig;

/// One owned connection to the catalog service.
///
/// The state is checked at the top of every call: once a session has
/// failed, every further call reports a transport failure without touching
/// the network, and the session must be discarded. Reconnect policy does
/// not live here — the caller constructs a replacement client.
#[derive(Debug)]
pub(crate) struct Session {
	stream: TcpStream,
	reader: BufReader<TcpStream>,
	state: SessionState,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SessionState {
	Connected,
	Failed,
	Closed,
}

impl Session {
	pub(crate) fn connect(config: &ClientConfig) -> Result<Self> {
		let mut last_error = String::from("no endpoints configured");
		for endpoint in &config.endpoints {
			for attempt in 0..=config.connect_retries {
				match Self::try_connect(endpoint, config) {
					Ok(session) => {
						debug!(
							endpoint = %endpoint,
							attempt,
							"connected to catalog service"
						);
						return Ok(session);
					}
					Err(reason) => {
						warn!(
							endpoint = %endpoint,
							attempt,
							reason = %reason,
							"connect attempt failed"
						);
						last_error = reason;
					}
				}
			}
		}
		Err(Error::transport(format!(
			"unable to reach catalog service: {}",
			last_error
		)))
	}

	fn try_connect(
		endpoint: &str,
		config: &ClientConfig,
	) -> std::result::Result<Self, String> {
		let addrs = endpoint
			.to_socket_addrs()
			.map_err(|e| format!("resolve {}: {}", endpoint, e))?;

		let mut last_error = format!("no addresses for {}", endpoint);
		for addr in addrs {
			match TcpStream::connect_timeout(
				&addr,
				config.connect_timeout,
			) {
				Ok(stream) => {
					stream.set_read_timeout(Some(
						config.read_timeout,
					))
					.map_err(|e| e.to_string())?;
					let _ = stream.set_nodelay(true);
					let reader = BufReader::new(
						stream.try_clone()
							.map_err(|e| e.to_string())?,
					);
					return Ok(Self {
						stream,
						reader,
						state: SessionState::Connected,
					});
				}
				Err(e) => {
					last_error =
						format!("connect {}: {}", addr, e);
				}
			}
		}
		Err(last_error)
	}

	/// Issue one request and wait for the matching response.
	///
	/// I/O errors, EOF, malformed frames and id mismatches poison the
	/// session. Typed wire faults classify into the error taxonomy and
	/// leave the session usable.
	pub(crate) fn call(
		&mut self,
		payload: RequestPayload,
	) -> Result<ResponsePayload> {
		match self.state {
			SessionState::Connected => {}
			SessionState::Failed => {
				return Err(Error::transport(
					"session has failed; the client must be replaced",
				));
			}
			SessionState::Closed => {
				return Err(Error::transport(
					"session is closed",
				));
			}
		}

		let request = Request {
			id: generate_request_id(),
			payload,
		};
		debug!(id = %request.id, "issuing catalog request");

		if let Err(e) = write_message(&mut self.stream, &request) {
			return Err(self.fail(format!("send failed: {}", e)));
		}

		let response: Response = match read_message(&mut self.reader) {
			Ok(response) => response,
			Err(e) => {
				return Err(self
					.fail(format!("receive failed: {}", e)));
			}
		};

		if response.id != request.id {
			return Err(self.fail(format!(
				"response id {} does not match request id {}",
				response.id, request.id
			)));
		}

		match response.payload {
			ResponsePayload::Err(fault) => {
				Err(fault.fault.into_error())
			}
			payload => Ok(payload),
		}
	}

	/// Transition to `Failed` and report the reason as a transport error.
	pub(crate) fn fail(&mut self, reason: impl Into<String>) -> Error {
		let reason = reason.into();
		warn!(reason = %reason, "session is no longer usable");
		self.state = SessionState::Failed;
		let _ = self.stream.shutdown(Shutdown::Both);
		Error::transport(reason)
	}

	/// Idempotent. Releases the connection; later calls report transport
	/// failure.
	pub(crate) fn close(&mut self) {
		if self.state != SessionState::Closed {
			let _ = self.stream.shutdown(Shutdown::Both);
			self.state = SessionState::Closed;
			debug!("session closed");
		}
	}
}

impl Drop for Session {
	fn drop(&mut self) {
		self.close();
	}
}
