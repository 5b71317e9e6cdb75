//! The response-generation capability a server is built with.
//!
//! The connection parses the request and reads the body; a [`Handler`] only
//! decides what to write. One handler instance is shared by every connection
//! and called concurrently, hence the `Send + Sync` bound.
//!
//! # Example
//!
//! ```
//! use std::fmt::Write;
//! use async_trait::async_trait;
//! use simple_http::connection::ResponseWriter;
//! use simple_http::handler::{Handler, HandlerError};
//! use simple_http::protocol::RequestHeader;
//! use simple_http::protocol::body::RequestBody;
//!
//! struct Echo;
//!
//! #[async_trait]
//! impl Handler for Echo {
//!     async fn handle_get(&self, request: &RequestHeader, response: &mut ResponseWriter) -> Result<(), HandlerError> {
//!         response.write_success();
//!         write!(response, "you asked for {}", request.target())?;
//!         Ok(())
//!     }
//!
//!     async fn handle_post(&self, _request: &RequestHeader, body: RequestBody, response: &mut ResponseWriter) -> Result<(), HandlerError> {
//!         response.write_success();
//!         response.write_bytes(body.as_bytes());
//!         Ok(())
//!     }
//! }
//! ```

use std::error::Error;
use std::sync::Arc;

use async_trait::async_trait;

use crate::connection::ResponseWriter;
use crate::protocol::RequestHeader;
use crate::protocol::body::RequestBody;

pub type HandlerError = Box<dyn Error + Send + Sync>;

#[async_trait]
pub trait Handler: Send + Sync {
    /// Writes the response to a GET request.
    async fn handle_get(&self, request: &RequestHeader, response: &mut ResponseWriter) -> Result<(), HandlerError>;

    /// Writes the response to a POST request. `body` holds exactly the
    /// `Content-Length` bytes sent by the client, or nothing when the header
    /// was absent.
    async fn handle_post(&self, request: &RequestHeader, body: RequestBody, response: &mut ResponseWriter) -> Result<(), HandlerError>;
}

#[async_trait]
impl<H: Handler + ?Sized> Handler for Arc<H> {
    async fn handle_get(&self, request: &RequestHeader, response: &mut ResponseWriter) -> Result<(), HandlerError> {
        self.as_ref().handle_get(request, response).await
    }

    async fn handle_post(&self, request: &RequestHeader, body: RequestBody, response: &mut ResponseWriter) -> Result<(), HandlerError> {
        self.as_ref().handle_post(request, body, response).await
    }
}
