//! HTTP/1.0 codec module, written directly against raw bytes.
//!
//! Request side, leaves first:
//!
//! - [`LineDecoder`]: assembles `\n`-terminated lines, dropping every `\r`
//! - [`HeaderDecoder`]: parses the request line and header lines
//! - [`LengthDecoder`]: reads a Content-Length body
//! - [`RequestDecoder`]: chains the above into one request per connection
//!
//! Response side:
//!
//! - [`HeaderEncoder`]: writes the status line and the fixed header set
//!
//! All decoders implement [`tokio_util::codec::Decoder`], so a connection
//! reads through a `FramedRead` and the parsing logic stays independent of
//! the socket.
//!
//! # Example
//!
//! ```
//! use bytes::BytesMut;
//! use simple_http::codec::LineDecoder;
//! use tokio_util::codec::Decoder;
//!
//! let mut decoder = LineDecoder::new();
//! let mut buffer = BytesMut::from("Host: x\r\n");
//! assert_eq!(decoder.decode(&mut buffer).unwrap().as_deref(), Some("Host: x"));
//! ```

mod body;
mod header;
mod line_decoder;
mod request_decoder;

pub use body::LengthDecoder;
pub use header::{HeaderDecoder, HeaderEncoder};
pub use header::{MAX_BODY_SIZE, MAX_HEADER_NUM, parse_header_line, parse_request_line};
pub use line_decoder::{LineDecoder, MAX_LINE_BYTES};
pub use request_decoder::RequestDecoder;
