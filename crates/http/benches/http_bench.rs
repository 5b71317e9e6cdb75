use async_trait::async_trait;
use bytes::BytesMut;
use criterion::{Criterion, criterion_group, criterion_main};
use std::hint::black_box;
use simple_http::codec::{HeaderEncoder, RequestDecoder};
use simple_http::connection::{HttpConnection, ResponseWriter};
use simple_http::handler::{Handler, HandlerError};
use simple_http::protocol::body::RequestBody;
use simple_http::protocol::{RequestHeader, ResponseHead};
use std::{
    io,
    pin::Pin,
    task::{Context, Poll},
};
use tokio::io::{AsyncRead, AsyncWrite, ReadBuf};
use tokio::runtime::Runtime;
use tokio_util::codec::{Decoder, Encoder};

const GET_REQUEST: &[u8] = b"GET /hello HTTP/1.0\r\nHost: localhost\r\nUser-Agent: bench\r\nAccept: */*\r\n\r\n";
const POST_REQUEST: &[u8] = b"POST /form HTTP/1.0\r\nHost: localhost\r\nContent-Length: 27\r\n\r\nFirstName=Mickey&ClickValue";

// Mock IO for testing
#[derive(Clone)]
struct MockIO {
    read_data: &'static [u8],
    write_data: Vec<u8>,
    read_pos: usize,
}

impl MockIO {
    fn new(read_data: &'static [u8]) -> Self {
        Self { read_data, write_data: Vec::new(), read_pos: 0 }
    }
}

impl AsyncRead for MockIO {
    fn poll_read(mut self: Pin<&mut Self>, _cx: &mut Context<'_>, buf: &mut ReadBuf<'_>) -> Poll<io::Result<()>> {
        let remaining = &self.read_data[self.read_pos..];
        let amt = std::cmp::min(remaining.len(), buf.remaining());
        buf.put_slice(&remaining[..amt]);
        self.read_pos += amt;
        Poll::Ready(Ok(()))
    }
}

impl AsyncWrite for MockIO {
    fn poll_write(mut self: Pin<&mut Self>, _cx: &mut Context<'_>, buf: &[u8]) -> Poll<Result<usize, io::Error>> {
        self.write_data.extend_from_slice(buf);
        Poll::Ready(Ok(buf.len()))
    }

    fn poll_flush(self: Pin<&mut Self>, _cx: &mut Context<'_>) -> Poll<Result<(), io::Error>> {
        Poll::Ready(Ok(()))
    }

    fn poll_shutdown(self: Pin<&mut Self>, _cx: &mut Context<'_>) -> Poll<Result<(), io::Error>> {
        Poll::Ready(Ok(()))
    }
}

struct HelloHandler;

#[async_trait]
impl Handler for HelloHandler {
    async fn handle_get(&self, request: &RequestHeader, response: &mut ResponseWriter) -> Result<(), HandlerError> {
        response.write_success();
        response.write_line("<html><body><h1>Simple Server</h1>");
        response.write_line(request.target());
        Ok(())
    }

    async fn handle_post(&self, _request: &RequestHeader, body: RequestBody, response: &mut ResponseWriter) -> Result<(), HandlerError> {
        response.write_success();
        response.write_bytes(body.as_bytes());
        Ok(())
    }
}

fn bench_request_decoder(c: &mut Criterion) {
    c.bench_function("decode_get_request", |b| {
        b.iter(|| {
            let mut decoder = RequestDecoder::new();
            let mut bytes = BytesMut::from(GET_REQUEST);
            black_box(decoder.decode(&mut bytes).unwrap());
        });
    });

    c.bench_function("decode_post_request", |b| {
        b.iter(|| {
            let mut decoder = RequestDecoder::new();
            let mut bytes = BytesMut::from(POST_REQUEST);
            while let Some(message) = decoder.decode(&mut bytes).unwrap() {
                black_box(message);
            }
        });
    });
}

fn bench_header_encoder(c: &mut Criterion) {
    let head = ResponseHead::success(&mime::TEXT_HTML);

    c.bench_function("encode_response_head", |b| {
        b.iter(|| {
            let mut bytes = BytesMut::new();
            HeaderEncoder.encode(&head, &mut bytes).unwrap();
            black_box(bytes);
        });
    });
}

fn bench_http_connection(c: &mut Criterion) {
    let runtime = Runtime::new().unwrap();
    let handler = HelloHandler;

    c.bench_function("process_get_request", |b| {
        b.to_async(&runtime).iter(|| async {
            let mock_io = MockIO::new(GET_REQUEST);
            let connection = HttpConnection::new(mock_io.clone(), mock_io);
            black_box(connection.process(&handler).await.unwrap());
        });
    });

    c.bench_function("process_post_request", |b| {
        b.to_async(&runtime).iter(|| async {
            let mock_io = MockIO::new(POST_REQUEST);
            let connection = HttpConnection::new(mock_io.clone(), mock_io);
            black_box(connection.process(&handler).await.unwrap());
        });
    });
}

criterion_group!(benches, bench_request_decoder, bench_header_encoder, bench_http_connection);
criterion_main!(benches);
