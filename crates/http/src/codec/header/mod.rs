//! HTTP/1.0 head processing.
//!
//! - [`HeaderDecoder`]: parses the request line and header lines into a
//!   [`RequestHeader`](crate::protocol::RequestHeader)
//!   - exactly three request-line tokens
//!   - raw, case-preserving header names
//!   - line, header count and body size limits
//!
//! - [`HeaderEncoder`]: writes a [`ResponseHead`](crate::protocol::ResponseHead)
//!   as status line, `Content-Type`, `Connection: close` and a blank line

mod header_decoder;
mod header_encoder;

pub use header_decoder::HeaderDecoder;
pub use header_decoder::{MAX_BODY_SIZE, MAX_HEADER_NUM, parse_header_line, parse_request_line};
pub use header_encoder::HeaderEncoder;
