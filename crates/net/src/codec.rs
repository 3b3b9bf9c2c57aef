// Copyright (c) metashelf.dev 2025
// This file is licensed under the MIT, see license.md file

use std::{
	io::{self, BufRead, ErrorKind, Write},
	sync::atomic::{AtomicU64, Ordering},
	time::{SystemTime, UNIX_EPOCH},
};

use serde::{Serialize, de::DeserializeOwned};

/// Write one message as a single JSON line and flush it.
pub fn write_message<W: Write, T: Serialize>(
	writer: &mut W,
	message: &T,
) -> io::Result<()> {
	let mut line = serde_json::to_vec(message)
		.map_err(|e| io::Error::new(ErrorKind::InvalidData, e))?;
	line.push(b'\n');
	writer.write_all(&line)?;
	writer.flush()
}

/// Read one JSON-line message. A read of zero bytes means the peer closed
/// the connection and is reported as `UnexpectedEof`.
pub fn read_message<R: BufRead, T: DeserializeOwned>(
	reader: &mut R,
) -> io::Result<T> {
	let mut line = String::new();
	let read = reader.read_line(&mut line)?;
	if read == 0 {
		return Err(io::Error::new(
			ErrorKind::UnexpectedEof,
			"connection closed by peer",
		));
	}
	serde_json::from_str(line.trim_end())
		.map_err(|e| io::Error::new(ErrorKind::InvalidData, e))
}

/// Generate a unique request ID
pub fn generate_request_id() -> String {
	static COUNTER: AtomicU64 = AtomicU64::new(0);

	let count = COUNTER.fetch_add(1, Ordering::Relaxed);
	let timestamp = SystemTime::now()
		.duration_since(UNIX_EPOCH)
		.unwrap_or_default()
		.as_millis();

	format!("{}-{}", timestamp, count)
}
