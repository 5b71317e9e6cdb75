//! Core HTTP/1.0 protocol types.
//!
//! - **Message Handling** (`message`): what the request decoder yields
//!   - [`Message`]: either the request head or a payload item
//!   - [`PayloadItem`]: a body chunk or the end of the body
//!   - [`PayloadSize`]: the announced body size
//!
//! - **Request** (`request`, `header`): [`RequestHeader`] with its raw
//!   [`Headers`] mapping
//!
//! - **Response** (`response`): [`ResponseHead`], the status line and
//!   content type written before a body
//!
//! - **Body** ([`body`]): [`body::RequestBody`], the buffered POST body
//!
//! - **Error Handling** (`error`):
//!   - [`HttpError`]: Top-level error type
//!   - [`ParseError`]: Request parsing errors
//!   - [`SendError`]: Response sending errors

mod message;
pub use message::Message;
pub use message::PayloadItem;
pub use message::PayloadSize;
pub use message::RequestMessage;

mod header;
pub use header::Headers;

mod request;
pub use request::RequestHeader;
pub use request::{GET, POST};

mod response;
pub use response::ResponseHead;
pub use response::FAILURE_REASON;

mod error;
pub use error::HttpError;
pub use error::ParseError;
pub use error::SendError;

pub mod body;
