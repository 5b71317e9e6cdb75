//! Decoder for request bodies announced by `Content-Length`.
//!
//! Chunks are produced as the bytes arrive, however the network splits them,
//! until exactly the announced number of bytes has been handed out.

use crate::protocol::{ParseError, PayloadItem};
use bytes::BytesMut;
use tokio_util::codec::Decoder;

/// Counts down the bytes of one `Content-Length` body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LengthDecoder {
    remaining: u64,
}

impl LengthDecoder {
    pub fn new(content_length: u64) -> Self {
        Self { remaining: content_length }
    }

    /// The number of body bytes not yet handed out.
    pub fn remaining(&self) -> u64 {
        self.remaining
    }
}

impl Decoder for LengthDecoder {
    type Item = PayloadItem;
    type Error = ParseError;

    /// Yields `Chunk` for every batch of buffered body bytes, `Eof` once the
    /// count reaches zero, `None` while waiting for the socket. Bytes past the
    /// end of the body stay in `src`.
    fn decode(&mut self, src: &mut BytesMut) -> Result<Option<Self::Item>, Self::Error> {
        if self.remaining == 0 {
            return Ok(Some(PayloadItem::Eof));
        }

        if src.is_empty() {
            return Ok(None);
        }

        let take = usize::try_from(self.remaining).map_or(src.len(), |remaining| remaining.min(src.len()));
        let chunk = src.split_to(take).freeze();
        self.remaining -= chunk.len() as u64;

        Ok(Some(PayloadItem::Chunk(chunk)))
    }

    /// The stream ending while bytes are still owed means the client went
    /// away mid-body.
    fn decode_eof(&mut self, src: &mut BytesMut) -> Result<Option<Self::Item>, Self::Error> {
        self.decode(src)?.map_or_else(|| Err(ParseError::client_disconnected(self.remaining)), |item| Ok(Some(item)))
    }
}
