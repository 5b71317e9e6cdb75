use std::future::Future;
use std::io;
use std::pin::Pin;
use std::task::{Context, Poll};
use std::time::Duration;

use tokio::io::{AsyncRead, ReadBuf};
use tokio::time::{Sleep, sleep};

/// Bounds how long a single read may wait for the peer.
///
/// The deadline is armed when a read has to wait and dropped as soon as a
/// read completes, so a client sending slowly but steadily never expires.
/// An expired deadline surfaces as an `io::ErrorKind::TimedOut` read error.
#[derive(Debug)]
pub(crate) struct TimeoutReader<R> {
    reader: R,
    timeout: Option<Duration>,
    deadline: Option<Pin<Box<Sleep>>>,
}

impl<R> TimeoutReader<R> {
    pub(crate) fn new(reader: R, timeout: Option<Duration>) -> Self {
        Self { reader, timeout, deadline: None }
    }
}

impl<R: AsyncRead + Unpin> AsyncRead for TimeoutReader<R> {
    fn poll_read(mut self: Pin<&mut Self>, cx: &mut Context<'_>, buf: &mut ReadBuf<'_>) -> Poll<io::Result<()>> {
        let this = &mut *self;

        if let Poll::Ready(result) = Pin::new(&mut this.reader).poll_read(cx, buf) {
            this.deadline = None;
            return Poll::Ready(result);
        }

        let Some(timeout) = this.timeout else {
            return Poll::Pending;
        };

        let deadline = this.deadline.get_or_insert_with(|| Box::pin(sleep(timeout)));
        match deadline.as_mut().poll(cx) {
            Poll::Ready(()) => {
                this.deadline = None;
                Poll::Ready(Err(io::Error::new(io::ErrorKind::TimedOut, format!("no data received within {timeout:?}"))))
            }
            Poll::Pending => Poll::Pending,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};

    #[tokio::test]
    async fn idle_peer_times_out() {
        let (_client, server) = tokio::io::duplex(64);
        let mut reader = TimeoutReader::new(server, Some(Duration::from_millis(30)));

        let mut buf = [0u8; 8];
        let error = reader.read(&mut buf).await.unwrap_err();
        assert_eq!(error.kind(), io::ErrorKind::TimedOut);
    }

    #[tokio::test]
    async fn deadline_restarts_after_each_read() {
        let (mut client, server) = tokio::io::duplex(64);
        let mut reader = TimeoutReader::new(server, Some(Duration::from_millis(100)));

        let writer = tokio::spawn(async move {
            for _ in 0..5 {
                tokio::time::sleep(Duration::from_millis(40)).await;
                client.write_all(b"x").await.unwrap();
            }
        });

        let mut received = Vec::new();
        let mut buf = [0u8; 8];
        while received.len() < 5 {
            let n = reader.read(&mut buf).await.unwrap();
            received.extend_from_slice(&buf[..n]);
        }

        assert_eq!(received, b"xxxxx");
        writer.await.unwrap();
    }

    #[tokio::test]
    async fn no_timeout_waits() {
        let (mut client, server) = tokio::io::duplex(64);
        let mut reader = TimeoutReader::new(server, None);

        let writer = tokio::spawn(async move {
            tokio::time::sleep(Duration::from_millis(50)).await;
            client.write_all(b"late").await.unwrap();
        });

        let mut buf = [0u8; 8];
        let n = reader.read(&mut buf).await.unwrap();
        assert_eq!(&buf[..n], b"late");
        writer.await.unwrap();
    }
}
