//! HTTP response head definitions.
//!
//! Every response this server writes is `HTTP/1.0` with `Connection: close`.
//! A head is the status line plus an optional `Content-Type`; the body is
//! whatever the handler writes afterwards.

use http::StatusCode;
use mime::Mime;

/// Reason phrase of the generic failure response.
pub const FAILURE_REASON: &str = "File not found";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResponseHead {
    status: StatusCode,
    reason: &'static str,
    content_type: Option<String>,
}

impl ResponseHead {
    /// `200 OK` with the given content type.
    pub fn success(content_type: &Mime) -> Self {
        Self { status: StatusCode::OK, reason: "OK", content_type: Some(content_type.to_string()) }
    }

    /// The generic failure head: `404 File not found`, no content type.
    pub fn failure() -> Self {
        Self { status: StatusCode::NOT_FOUND, reason: FAILURE_REASON, content_type: None }
    }

    /// A failure head carrying `status` and its canonical reason.
    pub fn error(status: StatusCode) -> Self {
        Self { status, reason: status.canonical_reason().unwrap_or("Unknown"), content_type: None }
    }

    pub fn status(&self) -> StatusCode {
        self.status
    }

    pub fn reason(&self) -> &'static str {
        self.reason
    }

    pub fn content_type(&self) -> Option<&str> {
        self.content_type.as_deref()
    }
}
