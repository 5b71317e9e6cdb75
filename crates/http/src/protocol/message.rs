//! What the request decoder yields, item by item.

use bytes::Bytes;

use crate::protocol::RequestHeader;

/// One decoded item of a request: its head, or a piece of its body.
#[derive(Debug)]
pub enum Message<T> {
    Header(T),
    Payload(PayloadItem),
}

/// The message type of an HTTP/1.0 request: the parsed head with its
/// announced body size, then the body items.
pub type RequestMessage = Message<(RequestHeader, PayloadSize)>;

impl<T> Message<T> {
    pub fn into_payload_item(self) -> Option<PayloadItem> {
        match self {
            Message::Header(_) => None,
            Message::Payload(item) => Some(item),
        }
    }
}

/// A body chunk as read from the socket, or the end of the body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PayloadItem {
    Chunk(Bytes),
    Eof,
}

impl PayloadItem {
    pub fn chunk(&self) -> Option<&Bytes> {
        match self {
            PayloadItem::Chunk(bytes) => Some(bytes),
            PayloadItem::Eof => None,
        }
    }
}

/// Body size announced by the request head.
///
/// `Empty` means no body is read at all: the request is not a POST, or it
/// carries no `Content-Length`. `Length(0)` is a POST announcing an empty body.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum PayloadSize {
    Length(u64),
    Empty,
}

impl PayloadSize {
    pub fn is_empty(&self) -> bool {
        matches!(self, PayloadSize::Empty)
    }

    /// Bytes still to be read for this body, zero when there is none.
    pub fn length(&self) -> u64 {
        match *self {
            PayloadSize::Length(length) => length,
            PayloadSize::Empty => 0,
        }
    }
}
