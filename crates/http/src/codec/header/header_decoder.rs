//! HTTP/1.0 request head decoder.
//!
//! The head is parsed line by line with [`LineDecoder`]:
//!
//! 1. The request line is split on single spaces into exactly three tokens:
//!    method, target and version. The method is upper-cased, the target is
//!    kept verbatim and the version token is stored without validation.
//! 2. Header lines follow until an empty line. The first `:` separates the
//!    name from the value and spaces (not tabs) after it are skipped. Names
//!    keep their case and a repeated name overwrites the earlier value.
//! 3. For a POST carrying `Content-Length`, the announced length is validated
//!    against the maximum body size before any body byte is read.
//!
//! # Limits
//!
//! - Maximum line size: [`MAX_LINE_BYTES`](crate::codec::MAX_LINE_BYTES)
//! - Maximum number of header lines: 64
//! - Maximum body size: 10 MiB unless configured otherwise

use bytes::BytesMut;
use tokio_util::codec::Decoder;
use tracing::trace;

use crate::codec::LineDecoder;
use crate::ensure;
use crate::protocol::{ParseError, PayloadSize, RequestHeader};

/// Maximum number of header lines allowed in a request
pub const MAX_HEADER_NUM: usize = 64;

/// Maximum accepted `Content-Length`, 10 MiB
pub const MAX_BODY_SIZE: usize = 10 * 1024 * 1024;

/// Decoder for HTTP request heads implementing the [`Decoder`] trait.
///
/// Yields the parsed [`RequestHeader`] together with the [`PayloadSize`] the
/// connection has to read next.
#[derive(Debug)]
pub struct HeaderDecoder {
    line_decoder: LineDecoder,
    /// set once the request line has been parsed
    header: Option<RequestHeader>,
    header_lines: usize,
    max_body_size: usize,
    content_length_ignore_case: bool,
}

impl HeaderDecoder {
    pub fn new() -> Self {
        Self::with_max_body_size(MAX_BODY_SIZE)
    }

    pub fn with_max_body_size(max_body_size: usize) -> Self {
        Self { line_decoder: LineDecoder::new(), header: None, header_lines: 0, max_body_size, content_length_ignore_case: false }
    }

    /// Accept `Content-Length` in any ASCII case, e.g. `content-length`.
    /// Off by default: the name must then match exactly.
    #[must_use]
    pub fn content_length_ignore_case(mut self, ignore_case: bool) -> Self {
        self.content_length_ignore_case = ignore_case;
        self
    }

    /// True when nothing of a request head has been consumed yet.
    pub fn is_idle(&self) -> bool {
        self.header.is_none() && self.line_decoder.is_idle()
    }
}

impl Default for HeaderDecoder {
    fn default() -> Self {
        Self::new()
    }
}

impl Decoder for HeaderDecoder {
    type Item = (RequestHeader, PayloadSize);
    type Error = ParseError;

    /// Attempts to decode a complete request head from `src`.
    ///
    /// # Returns
    ///
    /// - `Ok(Some((header, payload_size)))` once the empty line ending the head was read
    /// - `Ok(None)` if more data is needed
    /// - `Err(ParseError)` if a line is malformed or a limit is exceeded
    fn decode(&mut self, src: &mut BytesMut) -> Result<Option<Self::Item>, Self::Error> {
        while let Some(line) = self.line_decoder.decode(src)? {
            match self.header.take() {
                None => {
                    let header = parse_request_line(&line)?;
                    trace!(method = header.method(), target = header.target(), "parsed request line");
                    self.header = Some(header);
                }

                Some(header) if line.is_empty() => {
                    trace!(header_count = header.headers().len(), "parsed request headers");
                    self.header_lines = 0;
                    let payload_size = self.parse_payload(&header)?;
                    return Ok(Some((header, payload_size)));
                }

                Some(mut header) => {
                    self.header_lines += 1;
                    ensure!(self.header_lines <= MAX_HEADER_NUM, ParseError::too_many_headers(MAX_HEADER_NUM));

                    let (name, value) = parse_header_line(&line)?;
                    trace!(header_name = name, header_value = value, "parsed header");
                    header.headers_mut().insert(name, value);
                    self.header = Some(header);
                }
            }
        }

        Ok(None)
    }
}

/// Splits a request line into method, target and version.
///
/// The line must consist of exactly three tokens separated by single spaces.
///
/// # Errors
///
/// Returns [`ParseError::MalformedRequestLine`] for any other token count,
/// including targets containing a space or doubled separators.
pub fn parse_request_line(line: &str) -> Result<RequestHeader, ParseError> {
    let tokens = line.split(' ').collect::<Vec<_>>();
    match tokens.as_slice() {
        [method, target, version] => Ok(RequestHeader::new(method, *target, *version)),
        _ => Err(ParseError::malformed_request_line(line, tokens.len())),
    }
}

/// Splits a header line at its first `:`.
///
/// Spaces directly after the separator are skipped; tabs and trailing
/// whitespace are kept.
///
/// # Errors
///
/// Returns [`ParseError::MalformedHeader`] if the line has no `:`.
pub fn parse_header_line(line: &str) -> Result<(&str, &str), ParseError> {
    let (name, value) = line.split_once(':').ok_or_else(|| ParseError::malformed_header(line))?;
    Ok((name, value.trim_start_matches(' ')))
}

impl HeaderDecoder {
    /// Determines how many body bytes follow the head.
    ///
    /// Only POST bodies are read, and only when `Content-Length` is present.
    ///
    /// # Errors
    ///
    /// Returns `ParseError` if:
    /// - the Content-Length value is not a non-negative integer
    /// - the announced length exceeds `max_body_size`
    fn parse_payload(&self, header: &RequestHeader) -> Result<PayloadSize, ParseError> {
        if !header.need_body() {
            return Ok(PayloadSize::Empty);
        }

        let content_length = if self.content_length_ignore_case { header.content_length_ignore_case() } else { header.content_length() };
        let Some(cl_str) = content_length else {
            return Ok(PayloadSize::Empty);
        };

        let length = cl_str.trim().parse::<u64>().map_err(|_e| ParseError::invalid_content_length(format!("value {cl_str} is not u64")))?;

        ensure!(length <= self.max_body_size as u64, ParseError::payload_too_large(length, self.max_body_size));

        Ok(PayloadSize::Length(length))
    }
}
