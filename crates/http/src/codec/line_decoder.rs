//! Line assembly for the request head.
//!
//! A line ends at `\n`, which is not part of the result. Every `\r` is dropped
//! wherever it appears, so `CRLF`, bare `LF` and stray carriage returns inside
//! a line are all accepted. Each remaining byte maps to one `char` (Latin-1),
//! so a line always decodes.

use bytes::BytesMut;
use tokio_util::codec::Decoder;

use crate::ensure;
use crate::protocol::ParseError;

/// Maximum size in bytes of a single request-line or header line
pub const MAX_LINE_BYTES: usize = 8 * 1024;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineDecoder {
    /// bytes of `src` already known not to contain `\n`
    next_index: usize,
    max_length: usize,
}

impl LineDecoder {
    pub fn new() -> Self {
        Self::with_max_length(MAX_LINE_BYTES)
    }

    pub fn with_max_length(max_length: usize) -> Self {
        Self { next_index: 0, max_length }
    }

    /// True when no bytes of a partial line have been scanned yet.
    pub fn is_idle(&self) -> bool {
        self.next_index == 0
    }
}

impl Default for LineDecoder {
    fn default() -> Self {
        Self::new()
    }
}

impl Decoder for LineDecoder {
    type Item = String;
    type Error = ParseError;

    /// Returns the next complete line, or `Ok(None)` when `src` holds only
    /// part of one.
    fn decode(&mut self, src: &mut BytesMut) -> Result<Option<Self::Item>, Self::Error> {
        let Some(offset) = src[self.next_index..].iter().position(|b| *b == b'\n') else {
            self.next_index = src.len();
            ensure!(src.len() <= self.max_length, ParseError::too_large_line(src.len(), self.max_length));
            return Ok(None);
        };

        let line_end = self.next_index + offset;
        self.next_index = 0;
        ensure!(line_end <= self.max_length, ParseError::too_large_line(line_end, self.max_length));

        let line_bytes = src.split_to(line_end + 1);
        let line: String = line_bytes[..line_end].iter().filter(|b| **b != b'\r').map(|b| char::from(*b)).collect();
        Ok(Some(line))
    }
}
