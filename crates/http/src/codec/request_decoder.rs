//! HTTP/1.0 request decoder.
//!
//! Chains the head decoder and the body decoder into the message stream one
//! connection consumes:
//!
//! ```text
//! Header((RequestHeader, PayloadSize)) [Payload(Chunk)]* [Payload(Eof)]
//! ```
//!
//! A connection carries a single request, so once the head (and the body, if
//! any) has been decoded the decoder ignores everything that follows.
//!
//! # Example
//!
//! ```
//! use bytes::BytesMut;
//! use simple_http::codec::RequestDecoder;
//! use simple_http::protocol::Message;
//! use tokio_util::codec::Decoder;
//!
//! let mut decoder = RequestDecoder::new();
//! let mut buffer = BytesMut::from("GET /hello HTTP/1.0\r\nHost: x\r\n\r\n");
//!
//! match decoder.decode(&mut buffer).unwrap() {
//!     Some(Message::Header((header, _payload_size))) => assert_eq!(header.target(), "/hello"),
//!     _ => unreachable!(),
//! }
//! ```

use crate::codec::body::LengthDecoder;
use crate::codec::header::{HeaderDecoder, MAX_BODY_SIZE};
use crate::protocol::{Message, ParseError, PayloadItem, PayloadSize, RequestMessage};
use bytes::BytesMut;
use tokio_util::codec::Decoder;

/// A decoder for one HTTP/1.0 request: head first, then the body if any.
///
/// # State Machine
///
/// - `payload_decoder` is `None` and `finished` is false: parsing the head
/// - `payload_decoder` is `Some`: reading the Content-Length body
/// - `finished`: the request is complete, input is no longer decoded
#[derive(Debug)]
pub struct RequestDecoder {
    header_decoder: HeaderDecoder,
    payload_decoder: Option<LengthDecoder>,
    finished: bool,
}

impl RequestDecoder {
    /// Creates a new `RequestDecoder` accepting bodies up to [`MAX_BODY_SIZE`]
    pub fn new() -> Self {
        Self::with_max_body_size(MAX_BODY_SIZE)
    }

    pub fn with_max_body_size(max_body_size: usize) -> Self {
        Self { header_decoder: HeaderDecoder::with_max_body_size(max_body_size), payload_decoder: None, finished: false }
    }

    /// See [`HeaderDecoder::content_length_ignore_case`].
    #[must_use]
    pub fn content_length_ignore_case(mut self, ignore_case: bool) -> Self {
        self.header_decoder = self.header_decoder.content_length_ignore_case(ignore_case);
        self
    }
}

impl Default for RequestDecoder {
    fn default() -> Self {
        Self::new()
    }
}

impl Decoder for RequestDecoder {
    type Item = RequestMessage;
    type Error = ParseError;

    /// Attempts to decode the next request message from the provided buffer
    ///
    /// # Returns
    ///
    /// - `Ok(Some(Message::Header(_)))`: Successfully decoded request head
    /// - `Ok(Some(Message::Payload(_)))`: Successfully decoded a payload chunk or the end of the body
    /// - `Ok(None)`: Need more data to proceed, or the request is already complete
    /// - `Err(_)`: Encountered a parsing error
    fn decode(&mut self, src: &mut BytesMut) -> Result<Option<Self::Item>, Self::Error> {
        if self.finished {
            return Ok(None);
        }

        // parse payload if have payload_decoder
        if let Some(payload_decoder) = &mut self.payload_decoder {
            let message = match payload_decoder.decode(src)? {
                Some(item @ PayloadItem::Chunk(_)) => Some(Message::Payload(item)),
                Some(item @ PayloadItem::Eof) => {
                    self.payload_decoder.take();
                    self.finished = true;
                    Some(Message::Payload(item))
                }
                None => None,
            };

            return Ok(message);
        }

        // parse request head
        let message = match self.header_decoder.decode(src)? {
            Some((header, payload_size)) => {
                match payload_size {
                    PayloadSize::Length(length) => self.payload_decoder = Some(LengthDecoder::new(length)),
                    PayloadSize::Empty => self.finished = true,
                }
                Some(Message::Header((header, payload_size)))
            }
            None => None,
        };

        Ok(message)
    }

    /// Decodes what is left once the peer closed its side.
    ///
    /// Closing before sending anything ends the stream quietly. Closing in the
    /// middle of the head fails with [`ParseError::ConnectionClosed`], closing
    /// in the middle of the body with [`ParseError::ClientDisconnected`].
    fn decode_eof(&mut self, src: &mut BytesMut) -> Result<Option<Self::Item>, Self::Error> {
        if let Some(message) = self.decode(src)? {
            return Ok(Some(message));
        }

        if self.finished {
            return Ok(None);
        }

        match &mut self.payload_decoder {
            Some(payload_decoder) => payload_decoder.decode_eof(src).map(|item| item.map(Message::Payload)),
            None if src.is_empty() && self.header_decoder.is_idle() => Ok(None),
            None => Err(ParseError::ConnectionClosed),
        }
    }
}
