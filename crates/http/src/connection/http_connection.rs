use std::cmp;
use std::io;
use std::time::Duration;

use bytes::BytesMut;
use futures::StreamExt;
use tokio::io::{AsyncRead, AsyncWrite, AsyncWriteExt};
use tokio_util::codec::FramedRead;
use tracing::{debug, info, trace};

use crate::codec::{MAX_BODY_SIZE, RequestDecoder};
use crate::connection::ResponseWriter;
use crate::connection::timeout_reader::TimeoutReader;
use crate::handler::Handler;
use crate::protocol::body::RequestBody;
use crate::protocol::{GET, HttpError, Message, POST, ParseError, PayloadItem, PayloadSize, RequestHeader, RequestMessage, ResponseHead, SendError};

/// Default time a read may wait for the next bytes from the client
pub const DEFAULT_READ_TIMEOUT: Duration = Duration::from_secs(30);

const INIT_READ_BUFFER_SIZE: usize = 8 * 1024;
const INIT_BODY_BUFFER_SIZE: usize = 64 * 1024;

/// How processing errors are reported to the client.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ErrorResponses {
    /// Every error is answered with `HTTP/1.0 404 File not found`.
    #[default]
    Generic,
    /// Errors are answered with a matching status: 400 for malformed
    /// requests, 408 for read timeouts, 413 for oversized bodies, 431 for
    /// oversized heads and 500 for handler failures.
    Detailed,
}

/// Per-connection settings, shared by every connection of a server.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConnectionConfig {
    pub max_body_size: usize,
    /// Longest wait for the next bytes from the client. It restarts
    /// whenever data arrives, so a slow but steady client is not cut off.
    /// `None` lets a read wait indefinitely.
    pub read_timeout: Option<Duration>,
    pub error_responses: ErrorResponses,
    /// Accept `Content-Length` in any ASCII case. Off by default.
    pub content_length_ignore_case: bool,
}

impl Default for ConnectionConfig {
    fn default() -> Self {
        Self {
            max_body_size: MAX_BODY_SIZE,
            read_timeout: Some(DEFAULT_READ_TIMEOUT),
            error_responses: ErrorResponses::default(),
            content_length_ignore_case: false,
        }
    }
}

/// One HTTP/1.0 connection: a single request, a single response, then close.
///
/// Processing runs strictly in order:
///
/// 1. read and parse the request line and headers
/// 2. dispatch GET to [`Handler::handle_get`]; for POST read the
///    Content-Length body first, then call [`Handler::handle_post`]; any
///    other method is ignored and produces no output
/// 3. write the buffered response to the socket, flush once and shut the
///    write side down
///
/// Any error along the way replaces the buffered response with a failure
/// response before step 3. The connection is closed on every path.
///
/// # Type Parameters
///
/// * `R`: The async readable stream type
/// * `W`: The async writable stream type
#[derive(Debug)]
pub struct HttpConnection<R, W> {
    framed_read: FramedRead<TimeoutReader<R>, RequestDecoder>,
    writer: W,
    read_timeout: Option<Duration>,
    error_responses: ErrorResponses,
}

impl<R, W> HttpConnection<R, W>
where
    R: AsyncRead + Unpin,
    W: AsyncWrite + Unpin,
{
    pub fn new(reader: R, writer: W) -> Self {
        Self::with_config(reader, writer, &ConnectionConfig::default())
    }

    pub fn with_config(reader: R, writer: W, config: &ConnectionConfig) -> Self {
        let decoder = RequestDecoder::with_max_body_size(config.max_body_size).content_length_ignore_case(config.content_length_ignore_case);
        Self {
            framed_read: FramedRead::with_capacity(TimeoutReader::new(reader, config.read_timeout), decoder, INIT_READ_BUFFER_SIZE),
            writer,
            read_timeout: config.read_timeout,
            error_responses: config.error_responses,
        }
    }

    /// Processes the request on this connection and closes it.
    ///
    /// Returns the processing error, if any, after the failure response has
    /// been sent.
    pub async fn process<H>(mut self, handler: &H) -> Result<(), HttpError>
    where
        H: Handler + ?Sized,
    {
        let mut response = ResponseWriter::new();
        let result = self.do_process(handler, &mut response).await;

        if let Err(e) = &result {
            response.clear();
            match self.error_responses {
                ErrorResponses::Generic => response.write_failure(),
                ErrorResponses::Detailed => response.write_head(&ResponseHead::error(e.status())),
            }
        }

        let flush_result = self.flush(&response).await;
        result?;
        flush_result.map_err(HttpError::from)
    }

    async fn do_process<H>(&mut self, handler: &H, response: &mut ResponseWriter) -> Result<(), HttpError>
    where
        H: Handler + ?Sized,
    {
        let Some((header, payload_size)) = self.read_header().await? else {
            debug!("connection closed before a request was sent");
            return Ok(());
        };

        info!(method = header.method(), target = header.target(), version = header.version(), "receive request");

        match header.method() {
            GET => handler.handle_get(&header, response).await.map_err(HttpError::handler)?,
            POST => {
                let body = self.read_body(payload_size).await?;
                handler.handle_post(&header, body, response).await.map_err(HttpError::handler)?;
            }
            method => info!(method, "unsupported method, no response written"),
        }

        Ok(())
    }

    async fn read_header(&mut self) -> Result<Option<(RequestHeader, PayloadSize)>, ParseError> {
        match self.next_message().await {
            Some(Ok(Message::Header(header))) => Ok(Some(header)),
            Some(Ok(Message::Payload(_))) => Err(ParseError::io(io::Error::new(io::ErrorKind::InvalidData, "payload received before request head"))),
            Some(Err(e)) => Err(e),
            None => Ok(None),
        }
    }

    /// Collects exactly `payload_size` bytes into a [`RequestBody`].
    async fn read_body(&mut self, payload_size: PayloadSize) -> Result<RequestBody, ParseError> {
        if payload_size.is_empty() {
            return Ok(RequestBody::empty());
        }

        let length = payload_size.length();
        #[allow(clippy::cast_possible_truncation, reason = "bounded by INIT_BODY_BUFFER_SIZE")]
        let mut buf = BytesMut::with_capacity(cmp::min(length, INIT_BODY_BUFFER_SIZE as u64) as usize);

        loop {
            match self.next_message().await {
                Some(Ok(Message::Payload(PayloadItem::Chunk(bytes)))) => {
                    trace!(size = bytes.len(), "receive body chunk");
                    buf.extend_from_slice(&bytes);
                }
                Some(Ok(Message::Payload(PayloadItem::Eof))) => break,
                Some(Ok(Message::Header(_))) => {
                    return Err(ParseError::io(io::Error::new(io::ErrorKind::InvalidData, "request head received while reading body")));
                }
                Some(Err(e)) => return Err(e),
                None => return Err(ParseError::client_disconnected(length - buf.len() as u64)),
            }
        }

        debug!(size = buf.len(), "read request body");
        Ok(RequestBody::new(buf.freeze()))
    }

    async fn next_message(&mut self) -> Option<Result<RequestMessage, ParseError>> {
        match (self.framed_read.next().await, self.read_timeout) {
            (Some(Err(ParseError::Io { source })), Some(timeout)) if source.kind() == io::ErrorKind::TimedOut => {
                Some(Err(ParseError::timeout(timeout)))
            }
            (message, _) => message,
        }
    }

    async fn flush(&mut self, response: &ResponseWriter) -> Result<(), SendError> {
        self.writer.write_all(response.as_bytes()).await?;
        self.writer.flush().await?;
        self.writer.shutdown().await?;
        Ok(())
    }
}
