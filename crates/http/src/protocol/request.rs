//! HTTP request header handling implementation.
//!
//! A [`RequestHeader`] is everything read before the body: the three tokens of
//! the request line and the raw header mapping. Nothing is decoded or
//! normalized beyond upper-casing the method.


use crate::protocol::Headers;

pub const GET: &str = "GET";
pub const POST: &str = "POST";

const CONTENT_LENGTH_NAME: &str = "Content-Length";

/// Represents a parsed HTTP/1.0 request head.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RequestHeader {
    method: String,
    target: String,
    version: String,
    headers: Headers,
}

impl RequestHeader {
    /// Creates a header without any header fields, upper-casing `method`.
    pub fn new<M: AsRef<str>, T: Into<String>, V: Into<String>>(method: M, target: T, version: V) -> Self {
        Self { method: method.as_ref().to_uppercase(), target: target.into(), version: version.into(), headers: Headers::new() }
    }

    /// Returns the upper-cased request method.
    pub fn method(&self) -> &str {
        &self.method
    }

    /// Returns the raw, undecoded request target (path and query).
    pub fn target(&self) -> &str {
        &self.target
    }

    /// Returns the protocol-version token of the request line. It is never
    /// validated.
    pub fn version(&self) -> &str {
        &self.version
    }

    pub fn headers(&self) -> &Headers {
        &self.headers
    }

    pub fn headers_mut(&mut self) -> &mut Headers {
        &mut self.headers
    }

    pub fn is_post(&self) -> bool {
        self.method == POST
    }

    /// Only POST requests have their body read.
    pub fn need_body(&self) -> bool {
        self.is_post()
    }

    /// Returns the raw `Content-Length` value. The name must match exactly.
    pub fn content_length(&self) -> Option<&str> {
        self.headers.get(CONTENT_LENGTH_NAME)
    }

    /// Returns the raw `Content-Length` value, looked up ignoring ASCII case.
    pub fn content_length_ignore_case(&self) -> Option<&str> {
        self.headers.get_ignore_case(CONTENT_LENGTH_NAME)
    }
}
