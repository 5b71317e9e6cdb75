use std::fmt::Write;
use std::net::SocketAddr;
use std::time::Duration;

use async_trait::async_trait;
use simple_http::connection::{ErrorResponses, ResponseWriter};
use simple_http::handler::{Handler, HandlerError};
use simple_http::protocol::RequestHeader;
use simple_http::protocol::body::RequestBody;
use simple_http::server::{Server, ServerBuilder};
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpStream;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

const SUCCESS_HEAD: &str = "HTTP/1.0 200 OK\r\nContent-Type: text/html\r\nConnection: close\r\n\r\n";
const FAILURE: &str = "HTTP/1.0 404 File not found\r\nConnection: close\r\n\r\n";

struct PageHandler;

#[async_trait]
impl Handler for PageHandler {
    async fn handle_get(&self, request: &RequestHeader, response: &mut ResponseWriter) -> Result<(), HandlerError> {
        response.write_success();
        write!(response, "url : {}", request.target())?;
        Ok(())
    }

    async fn handle_post(&self, _request: &RequestHeader, body: RequestBody, response: &mut ResponseWriter) -> Result<(), HandlerError> {
        response.write_success();
        write!(response, "postbody: <pre>{}</pre>", String::from_utf8_lossy(body.as_bytes()))?;
        Ok(())
    }
}

struct TestServer {
    address: SocketAddr,
    shutdown: CancellationToken,
    running: JoinHandle<()>,
}

impl TestServer {
    async fn start() -> Self {
        Self::start_with(Server::builder()).await
    }

    async fn start_with(builder: ServerBuilder) -> Self {
        let listener = builder.address("127.0.0.1:0").handler(PageHandler).build().unwrap().bind().await.unwrap();
        let address = listener.local_addr().unwrap();
        let shutdown = CancellationToken::new();
        let running = tokio::spawn(listener.run(shutdown.clone()));
        Self { address, shutdown, running }
    }

    async fn stop(self) {
        self.shutdown.cancel();
        tokio::time::timeout(Duration::from_secs(5), self.running).await.unwrap().unwrap();
    }
}

async fn exchange(address: SocketAddr, request: &[u8]) -> String {
    let mut stream = TcpStream::connect(address).await.unwrap();
    stream.write_all(request).await.unwrap();
    read_response(&mut stream).await
}

async fn read_response(stream: &mut TcpStream) -> String {
    let mut response = Vec::new();
    tokio::time::timeout(Duration::from_secs(5), stream.read_to_end(&mut response)).await.unwrap().unwrap();
    String::from_utf8(response).unwrap()
}

#[tokio::test]
async fn get_request() {
    let server = TestServer::start().await;

    let response = exchange(server.address, b"GET /hello HTTP/1.0\r\nHost: x\r\n\r\n").await;
    assert_eq!(response, format!("{SUCCESS_HEAD}url : /hello"));

    server.stop().await;
}

#[tokio::test]
async fn post_request() {
    let server = TestServer::start().await;

    let response = exchange(server.address, b"POST /form HTTP/1.0\r\nContent-Length: 5\r\n\r\nhello").await;
    assert_eq!(response, format!("{SUCCESS_HEAD}postbody: <pre>hello</pre>"));

    server.stop().await;
}

#[tokio::test]
async fn post_body_sent_in_two_writes() {
    let server = TestServer::start().await;

    let mut stream = TcpStream::connect(server.address).await.unwrap();
    stream.write_all(b"POST /form HTTP/1.0\r\nContent-Length: 11\r\n\r\nhello").await.unwrap();
    tokio::time::sleep(Duration::from_millis(20)).await;
    stream.write_all(b" world").await.unwrap();

    let response = read_response(&mut stream).await;
    assert_eq!(response, format!("{SUCCESS_HEAD}postbody: <pre>hello world</pre>"));

    server.stop().await;
}

#[tokio::test]
async fn other_methods_get_no_response() {
    let server = TestServer::start().await;

    let response = exchange(server.address, b"PUT /x HTTP/1.0\r\n\r\n").await;
    assert!(response.is_empty());

    server.stop().await;
}

#[tokio::test]
async fn oversized_body_is_rejected() {
    let server = TestServer::start().await;

    let response = exchange(server.address, b"POST /form HTTP/1.0\r\nContent-Length: 10485761\r\n\r\n").await;
    assert_eq!(response, FAILURE);

    server.stop().await;
}

#[tokio::test]
async fn client_disconnects_mid_body() {
    let server = TestServer::start().await;

    let mut stream = TcpStream::connect(server.address).await.unwrap();
    stream.write_all(b"POST /form HTTP/1.0\r\nContent-Length: 10\r\n\r\nhello").await.unwrap();
    stream.shutdown().await.unwrap();

    let response = read_response(&mut stream).await;
    assert_eq!(response, FAILURE);

    server.stop().await;
}

#[tokio::test]
async fn detailed_error_responses() {
    let server = TestServer::start_with(Server::builder().error_responses(ErrorResponses::Detailed).max_body_size(4)).await;

    let response = exchange(server.address, b"POST /form HTTP/1.0\r\nContent-Length: 5\r\n\r\nhello").await;
    assert_eq!(response, "HTTP/1.0 413 Payload Too Large\r\nConnection: close\r\n\r\n");

    let response = exchange(server.address, b"GARBAGE\r\n\r\n").await;
    assert_eq!(response, "HTTP/1.0 400 Bad Request\r\nConnection: close\r\n\r\n");

    server.stop().await;
}

#[tokio::test]
async fn stalled_client_times_out() {
    let server = TestServer::start_with(Server::builder().read_timeout(Some(Duration::from_millis(50)))).await;

    let mut stream = TcpStream::connect(server.address).await.unwrap();
    stream.write_all(b"GET /hello HTTP/1.0\r\n").await.unwrap();

    let response = read_response(&mut stream).await;
    assert_eq!(response, FAILURE);

    server.stop().await;
}

#[tokio::test]
async fn repeated_requests_get_identical_responses() {
    let server = TestServer::start().await;

    let first = exchange(server.address, b"GET /hello HTTP/1.0\r\n\r\n").await;
    let second = exchange(server.address, b"GET /hello HTTP/1.0\r\n\r\n").await;
    assert_eq!(first, second);

    server.stop().await;
}

#[tokio::test]
async fn idle_connection_does_not_block_others() {
    let server = TestServer::start().await;

    let idle = TcpStream::connect(server.address).await.unwrap();

    let response = exchange(server.address, b"GET /busy HTTP/1.0\r\n\r\n").await;
    assert_eq!(response, format!("{SUCCESS_HEAD}url : /busy"));

    drop(idle);
    server.stop().await;
}

#[tokio::test]
async fn shutdown_stops_accepting() {
    let server = TestServer::start().await;
    let address = server.address;

    server.stop().await;

    assert!(TcpStream::connect(address).await.is_err());
}
