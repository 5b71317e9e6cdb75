//! HTTP connection handling module
//!
//! - [`HttpConnection`]: processes the single request of one accepted
//!   connection, from request line to closing the socket
//! - [`ResponseWriter`]: the buffer a handler writes its response into
//! - [`ConnectionConfig`], [`ErrorResponses`]: per-connection settings

mod http_connection;
mod response_writer;
mod timeout_reader;

pub use http_connection::{ConnectionConfig, DEFAULT_READ_TIMEOUT, ErrorResponses, HttpConnection};
pub use response_writer::ResponseWriter;
