use std::fmt;

use bytes::{BufMut, Bytes, BytesMut};
use mime::Mime;
use tokio_util::codec::Encoder;
use tracing::error;

use crate::codec::HeaderEncoder;
use crate::protocol::ResponseHead;

const INIT_BUFFER_SIZE: usize = 4 * 1024;

/// In-memory response buffer handed to a [`Handler`](crate::handler::Handler).
///
/// Nothing reaches the socket until the connection flushes the buffer once,
/// after the handler returned. If processing fails, whatever was buffered is
/// discarded and replaced by a failure response.
///
/// Body text can be written with `write!` / `writeln!` through the
/// [`fmt::Write`] implementation.
#[derive(Debug)]
pub struct ResponseWriter {
    buffer: BytesMut,
    encoder: HeaderEncoder,
}

impl ResponseWriter {
    pub fn new() -> Self {
        Self::with_capacity(INIT_BUFFER_SIZE)
    }

    pub fn with_capacity(buffer_size: usize) -> Self {
        Self { buffer: BytesMut::with_capacity(buffer_size), encoder: HeaderEncoder }
    }

    /// Writes `HTTP/1.0 200 OK` with `Content-Type: text/html`.
    pub fn write_success(&mut self) {
        self.write_success_as(&mime::TEXT_HTML);
    }

    /// Writes `HTTP/1.0 200 OK` with the given content type.
    pub fn write_success_as(&mut self, content_type: &Mime) {
        self.write_head(&ResponseHead::success(content_type));
    }

    /// Writes the generic `HTTP/1.0 404 File not found` response.
    pub fn write_failure(&mut self) {
        self.write_head(&ResponseHead::failure());
    }

    pub fn write_head(&mut self, head: &ResponseHead) {
        match self.encoder.encode(head, &mut self.buffer) {
            Ok(()) => {}
            // encoding into memory never performs io
            Err(e) => error!(cause = %e, "failed to encode response head"),
        }
    }

    pub fn write_bytes(&mut self, bytes: &[u8]) {
        self.buffer.put_slice(bytes);
    }

    /// Writes `line` followed by CRLF.
    pub fn write_line(&mut self, line: &str) {
        self.buffer.put_slice(line.as_bytes());
        self.buffer.put_slice(b"\r\n");
    }

    pub fn len(&self) -> usize {
        self.buffer.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buffer.is_empty()
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.buffer
    }

    /// Drops everything written so far.
    pub fn clear(&mut self) {
        self.buffer.clear();
    }

    pub fn into_bytes(self) -> Bytes {
        self.buffer.freeze()
    }
}

impl Default for ResponseWriter {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Write for ResponseWriter {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        self.buffer.put_slice(s.as_bytes());
        Ok(())
    }
}
