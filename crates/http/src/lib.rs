//! A small asynchronous HTTP/1.0 server written directly against TCP streams
//!
//! This crate accepts TCP connections, parses one HTTP/1.0 request per
//! connection by hand (request line, headers, optional `Content-Length`
//! body), hands GET and POST requests to a user supplied [`handler::Handler`],
//! writes the buffered response once and closes the connection.
//!
//! # Features
//!
//! - Hand written request parsing on top of `tokio_util::codec`
//! - One request, one response, one connection
//! - Bounded resources: line length, header count, body size and read time
//! - Generic or detailed error responses
//! - Graceful shutdown through a `CancellationToken`
//!
//! # Example
//!
//! ```no_run
//! use std::fmt::Write;
//! use async_trait::async_trait;
//! use simple_http::connection::ResponseWriter;
//! use simple_http::handler::{Handler, HandlerError};
//! use simple_http::protocol::RequestHeader;
//! use simple_http::protocol::body::RequestBody;
//! use simple_http::server::Server;
//! use tokio_util::sync::CancellationToken;
//!
//! struct Hello;
//!
//! #[async_trait]
//! impl Handler for Hello {
//!     async fn handle_get(&self, request: &RequestHeader, response: &mut ResponseWriter) -> Result<(), HandlerError> {
//!         response.write_success();
//!         write!(response, "Hello World! url : {}", request.target())?;
//!         Ok(())
//!     }
//!
//!     async fn handle_post(&self, _request: &RequestHeader, body: RequestBody, response: &mut ResponseWriter) -> Result<(), HandlerError> {
//!         response.write_success();
//!         write!(response, "received {} bytes", body.len())?;
//!         Ok(())
//!     }
//! }
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let shutdown = CancellationToken::new();
//!     let server = Server::builder().port(8080).handler(Hello).build()?;
//!     server.start(shutdown).await?;
//!     Ok(())
//! }
//! ```
//!
//! # Architecture
//!
//! - [`codec`]: line, head and body decoders, plus the response head encoder
//! - [`protocol`]: request/response types and the error hierarchy
//! - [`connection`]: processing of a single connection and the response buffer
//! - [`handler`]: the trait a server is built with
//! - [`server`]: builder, listening socket and accept loop
//!
//! ## Error Handling
//!
//! - [`protocol::HttpError`]: everything that can end a connection early
//! - [`protocol::ParseError`]: malformed, oversized, truncated or stalled requests
//! - [`protocol::SendError`]: failures writing the response
//! - [`server::ServerError`]: building or binding the server
//!
//! # Limitations
//!
//! - HTTP/1.0 only: no keep-alive, no chunked transfer encoding
//! - Only GET and POST are answered; other methods get an empty response
//! - Maximum line length: 8KB
//! - Maximum number of header lines: 64
//! - Maximum body size: 10MB by default

pub mod codec;
pub mod connection;
pub mod handler;
pub mod protocol;
pub mod server;

mod utils;
pub(crate) use utils::ensure;
