//! HTTP/1.0 body decoding.
//!
//! Without chunked transfer encoding, a request body is exactly the number
//! of bytes announced by `Content-Length`.
//!
//! - [`LengthDecoder`]: hands out body chunks until the announced length is
//!   reached and reports a client disconnect if the stream ends first

mod length_decoder;

pub use length_decoder::LengthDecoder;
