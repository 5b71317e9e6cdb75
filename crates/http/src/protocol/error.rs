use std::error::Error;
use std::io;
use std::time::Duration;

use http::StatusCode;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum HttpError {
    #[error("request error: {source}")]
    RequestError {
        #[from]
        source: ParseError,
    },

    #[error("response error: {source}")]
    ResponseError {
        #[from]
        source: SendError,
    },

    #[error("handler error: {source}")]
    HandlerError { source: Box<dyn Error + Send + Sync> },
}

impl HttpError {
    pub fn handler<E: Into<Box<dyn Error + Send + Sync>>>(e: E) -> Self {
        Self::HandlerError { source: e.into() }
    }

    /// The status a detailed error response reports for this error.
    pub fn status(&self) -> StatusCode {
        match self {
            HttpError::RequestError { source } => source.status(),
            HttpError::ResponseError { .. } | HttpError::HandlerError { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

#[derive(Error, Debug)]
pub enum ParseError {
    #[error("invalid http request line, expect 3 tokens but got {tokens}: {line:?}")]
    MalformedRequestLine { line: String, tokens: usize },

    #[error("invalid http header line: {line:?}")]
    MalformedHeader { line: String },

    #[error("header number exceed the limit {max_num}")]
    TooManyHeaders { max_num: usize },

    #[error("line size too large, current: {current_size} exceed the limit {max_size}")]
    TooLargeLine { current_size: usize, max_size: usize },

    #[error("invalid content-length header: {reason}")]
    InvalidContentLength { reason: String },

    #[error("payload size too large, content-length: {length} exceed the limit {max_size}")]
    PayloadTooLarge { length: u64, max_size: usize },

    #[error("client disconnected during post, {remaining} bytes not received")]
    ClientDisconnected { remaining: u64 },

    #[error("connection closed before the request head was complete")]
    ConnectionClosed,

    #[error("no data received within {timeout:?}")]
    Timeout { timeout: Duration },

    #[error("io error: {source}")]
    Io {
        #[from]
        source: io::Error,
    },
}

impl ParseError {
    pub fn malformed_request_line<S: ToString>(line: S, tokens: usize) -> Self {
        Self::MalformedRequestLine { line: line.to_string(), tokens }
    }

    pub fn malformed_header<S: ToString>(line: S) -> Self {
        Self::MalformedHeader { line: line.to_string() }
    }

    pub fn too_many_headers(max_num: usize) -> Self {
        Self::TooManyHeaders { max_num }
    }

    pub fn too_large_line(current_size: usize, max_size: usize) -> Self {
        Self::TooLargeLine { current_size, max_size }
    }

    pub fn invalid_content_length<S: ToString>(str: S) -> Self {
        Self::InvalidContentLength { reason: str.to_string() }
    }

    pub fn payload_too_large(length: u64, max_size: usize) -> Self {
        Self::PayloadTooLarge { length, max_size }
    }

    pub fn client_disconnected(remaining: u64) -> Self {
        Self::ClientDisconnected { remaining }
    }

    pub fn timeout(timeout: Duration) -> Self {
        Self::Timeout { timeout }
    }

    pub fn io<E: Into<io::Error>>(e: E) -> Self {
        Self::Io { source: e.into() }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            ParseError::PayloadTooLarge { .. } => StatusCode::PAYLOAD_TOO_LARGE,
            ParseError::Timeout { .. } => StatusCode::REQUEST_TIMEOUT,
            ParseError::TooLargeLine { .. } | ParseError::TooManyHeaders { .. } => StatusCode::REQUEST_HEADER_FIELDS_TOO_LARGE,
            _ => StatusCode::BAD_REQUEST,
        }
    }
}

#[derive(Error, Debug)]
pub enum SendError {
    #[error("io error: {source}")]
    Io {
        #[from]
        source: io::Error,
    },
}
