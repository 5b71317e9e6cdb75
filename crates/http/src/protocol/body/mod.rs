//! HTTP request body handling.
//!
//! An HTTP/1.0 POST body is announced by `Content-Length` and read completely
//! before the handler runs, bounded by the server's maximum body size. The
//! buffered result is a [`RequestBody`], which implements `http_body::Body`
//! and can also be read through a cursor.

mod req_body;

pub use req_body::RequestBody;
