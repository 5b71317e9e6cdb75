//! HTTP/1.0 response head encoder.
//!
//! Writes the status line, the optional `Content-Type`, `Connection: close`
//! and the blank line ending the head, always in that order.

use std::io;
use std::io::Write;

use bytes::{BufMut, BytesMut};
use tokio_util::codec::Encoder;

use crate::protocol::{ResponseHead, SendError};

/// Initial buffer size reserved for a response head
const INIT_HEADER_SIZE: usize = 128;

/// Encoder for HTTP response heads implementing the [`Encoder`] trait.
#[derive(Debug, Clone, Copy, Default)]
pub struct HeaderEncoder;

impl Encoder<&ResponseHead> for HeaderEncoder {
    type Error = SendError;

    fn encode(&mut self, head: &ResponseHead, dst: &mut BytesMut) -> Result<(), Self::Error> {
        dst.reserve(INIT_HEADER_SIZE);

        write!(FastWrite(dst), "HTTP/1.0 {} {}\r\n", head.status().as_str(), head.reason())?;

        if let Some(content_type) = head.content_type() {
            write_header(dst, "Content-Type", content_type);
        }
        write_header(dst, "Connection", "close");

        dst.put_slice(b"\r\n");
        Ok(())
    }
}

#[inline]
fn write_header(dst: &mut BytesMut, name: &str, value: &str) {
    dst.put_slice(name.as_bytes());
    dst.put_slice(b": ");
    dst.put_slice(value.as_bytes());
    dst.put_slice(b"\r\n");
}

/// Fast writer implementation for writing to BytesMut.
///
/// Lets `write!` format straight into the buffer without an intermediate
/// `String`.
struct FastWrite<'a>(&'a mut BytesMut);

impl Write for FastWrite<'_> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.put_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}
