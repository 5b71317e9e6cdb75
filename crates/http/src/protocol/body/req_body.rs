use std::convert::Infallible;
use std::io::Cursor;
use std::pin::Pin;
use std::task::{Context, Poll};

use bytes::Bytes;
use http_body::{Body, Frame, SizeHint};

/// A fully buffered request body.
///
/// The connection reads exactly `Content-Length` bytes before the POST handler
/// runs, so the body is always complete. It is cheap to clone and can be read
/// any number of times, either as raw [`Bytes`], as a reader positioned at the
/// start, or through the `http_body::Body` trait, which yields the whole
/// buffer as a single data frame.
#[derive(Debug, Clone, Default)]
pub struct RequestBody {
    bytes: Bytes,
    polled: bool,
}

impl RequestBody {
    pub fn new(bytes: Bytes) -> Self {
        Self { bytes, polled: false }
    }

    pub fn empty() -> Self {
        Self::default()
    }

    pub fn as_bytes(&self) -> &Bytes {
        &self.bytes
    }

    pub fn into_bytes(self) -> Bytes {
        self.bytes
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// Returns a reader over the whole body, usable with both `std::io::Read`
    /// and `tokio::io::AsyncRead`.
    pub fn reader(&self) -> Cursor<Bytes> {
        Cursor::new(self.bytes.clone())
    }
}

impl From<Bytes> for RequestBody {
    fn from(bytes: Bytes) -> Self {
        Self::new(bytes)
    }
}

impl Body for RequestBody {
    type Data = Bytes;
    type Error = Infallible;

    fn poll_frame(mut self: Pin<&mut Self>, _cx: &mut Context<'_>) -> Poll<Option<Result<Frame<Self::Data>, Self::Error>>> {
        if self.is_end_stream() {
            return Poll::Ready(None);
        }

        self.polled = true;
        Poll::Ready(Some(Ok(Frame::data(self.bytes.clone()))))
    }

    fn is_end_stream(&self) -> bool {
        self.polled || self.bytes.is_empty()
    }

    fn size_hint(&self) -> SizeHint {
        if self.is_end_stream() { SizeHint::with_exact(0) } else { SizeHint::with_exact(self.bytes.len() as u64) }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use http_body_util::BodyExt;
    use std::io::Read;
    use tokio::io::AsyncReadExt;

    #[tokio::test]
    async fn collect_whole_body() {
        let body = RequestBody::from(Bytes::from_static(b"FirstName=Ada"));
        assert_eq!(body.size_hint().exact(), Some(13));

        let collected = body.clone().collect().await.unwrap().to_bytes();
        assert_eq!(&collected[..], b"FirstName=Ada");

        // clones replay from the start
        let again = body.collect().await.unwrap().to_bytes();
        assert_eq!(&again[..], b"FirstName=Ada");
    }

    #[tokio::test]
    async fn empty_body_has_no_frames() {
        let mut body = RequestBody::empty();
        assert!(body.is_end_stream());
        assert!(body.frame().await.is_none());
    }

    #[tokio::test]
    async fn reader_starts_at_beginning() {
        let body = RequestBody::from(Bytes::from_static(b"hello"));

        let mut sync_read = String::new();
        Read::read_to_string(&mut body.reader(), &mut sync_read).unwrap();
        assert_eq!(sync_read, "hello");

        let mut async_read = Vec::new();
        AsyncReadExt::read_to_end(&mut body.reader(), &mut async_read).await.unwrap();
        assert_eq!(async_read, b"hello");
    }
}
