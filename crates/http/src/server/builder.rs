use std::fmt;
use std::io;
use std::net::{Ipv4Addr, SocketAddr, ToSocketAddrs};
use std::sync::Arc;
use std::time::Duration;

use tokio::net::TcpListener;
use tokio_util::sync::CancellationToken;
use tracing::{error, info};

use crate::connection::{ConnectionConfig, ErrorResponses};
use crate::handler::Handler;
use crate::server::{Listener, ServerError};

/// Port used when neither [`ServerBuilder::address`] nor [`ServerBuilder::port`] is called
pub const DEFAULT_PORT: u16 = 8080;

/// Pause between two accepted connections
pub const DEFAULT_ACCEPT_PAUSE: Duration = Duration::from_millis(1);

/// Settings shared by the accept loop and every connection it spawns.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ServerConfig {
    pub connection: ConnectionConfig,
    /// Zero disables the pause
    pub accept_pause: Duration,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self { connection: ConnectionConfig::default(), accept_pause: DEFAULT_ACCEPT_PAUSE }
    }
}

pub struct ServerBuilder {
    address: Option<io::Result<Vec<SocketAddr>>>,
    handler: Option<Arc<dyn Handler>>,
    config: ServerConfig,
}

impl fmt::Debug for ServerBuilder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ServerBuilder")
            .field("address", &self.address)
            .field("handler", &self.handler.is_some())
            .field("config", &self.config)
            .finish()
    }
}

impl ServerBuilder {
    fn new() -> Self {
        Self { address: None, handler: None, config: ServerConfig::default() }
    }

    /// Sets the listening address. Resolution errors are reported by [`ServerBuilder::build`].
    pub fn address<A: ToSocketAddrs>(mut self, address: A) -> Self {
        self.address = Some(address.to_socket_addrs().map(Iterator::collect));
        self
    }

    /// Listens on every interface at `port`.
    pub fn port(self, port: u16) -> Self {
        self.address((Ipv4Addr::UNSPECIFIED, port))
    }

    pub fn handler(mut self, handler: impl Handler + 'static) -> Self {
        self.handler = Some(Arc::new(handler));
        self
    }

    pub fn max_body_size(mut self, max_body_size: usize) -> Self {
        self.config.connection.max_body_size = max_body_size;
        self
    }

    /// Bounds how long the connection waits for the next bytes from the client.
    /// The wait restarts whenever data arrives; `None` waits forever.
    pub fn read_timeout(mut self, read_timeout: Option<Duration>) -> Self {
        self.config.connection.read_timeout = read_timeout;
        self
    }

    pub fn error_responses(mut self, error_responses: ErrorResponses) -> Self {
        self.config.connection.error_responses = error_responses;
        self
    }

    /// Reads the body of a POST whose `Content-Length` name differs in case,
    /// e.g. `content-length`. Off by default.
    pub fn content_length_ignore_case(mut self, ignore_case: bool) -> Self {
        self.config.connection.content_length_ignore_case = ignore_case;
        self
    }

    pub fn accept_pause(mut self, accept_pause: Duration) -> Self {
        self.config.accept_pause = accept_pause;
        self
    }

    pub fn build(self) -> Result<Server, ServerError> {
        let handler = self.handler.ok_or(ServerError::MissingHandler)?;

        let address = match self.address {
            Some(resolved) => resolved.map_err(ServerError::invalid_address)?,
            None => vec![SocketAddr::from((Ipv4Addr::UNSPECIFIED, DEFAULT_PORT))],
        };

        if address.is_empty() {
            return Err(ServerError::invalid_address(io::Error::new(io::ErrorKind::InvalidInput, "address resolved to nothing")));
        }

        Ok(Server { address, handler, config: self.config })
    }
}

/// A configured, not yet listening, HTTP/1.0 server.
///
/// # Example
///
/// ```no_run
/// # use simple_http::handler::Handler;
/// use simple_http::server::Server;
/// use tokio_util::sync::CancellationToken;
///
/// # async fn run(handler: impl Handler + 'static) -> Result<(), Box<dyn std::error::Error>> {
/// let shutdown = CancellationToken::new();
/// let server = Server::builder().port(8080).handler(handler).build()?;
/// server.start(shutdown).await?;
/// # Ok(())
/// # }
/// ```
pub struct Server {
    address: Vec<SocketAddr>,
    handler: Arc<dyn Handler>,
    config: ServerConfig,
}

impl fmt::Debug for Server {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Server").field("address", &self.address).field("config", &self.config).finish_non_exhaustive()
    }
}

impl Server {
    pub fn builder() -> ServerBuilder {
        ServerBuilder::new()
    }

    pub fn address(&self) -> &[SocketAddr] {
        &self.address
    }

    pub fn config(&self) -> &ServerConfig {
        &self.config
    }

    /// Binds the listening socket without accepting yet.
    pub async fn bind(self) -> Result<Listener, ServerError> {
        info!("start listening at {:?}", self.address);
        let tcp_listener = match TcpListener::bind(self.address.as_slice()).await {
            Ok(tcp_listener) => tcp_listener,
            Err(e) => {
                error!(cause = %e, "bind server error");
                return Err(ServerError::bind(e));
            }
        };

        Ok(Listener::new(tcp_listener, self.handler, self.config))
    }

    /// Binds, then serves connections until `shutdown` is cancelled.
    pub async fn start(self, shutdown: CancellationToken) -> Result<(), ServerError> {
        self.bind().await?.run(shutdown).await;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::connection::ResponseWriter;
    use crate::handler::HandlerError;
    use crate::protocol::RequestHeader;
    use crate::protocol::body::RequestBody;
    use async_trait::async_trait;

    struct Noop;

    #[async_trait]
    impl Handler for Noop {
        async fn handle_get(&self, _request: &RequestHeader, _response: &mut ResponseWriter) -> Result<(), HandlerError> {
            Ok(())
        }

        async fn handle_post(&self, _request: &RequestHeader, _body: RequestBody, _response: &mut ResponseWriter) -> Result<(), HandlerError> {
            Ok(())
        }
    }

    #[test]
    fn handler_is_required() {
        let result = Server::builder().port(0).build();
        assert!(matches!(result, Err(ServerError::MissingHandler)));
    }

    #[test]
    fn defaults() {
        let server = Server::builder().handler(Noop).build().unwrap();
        assert_eq!(server.address(), &[SocketAddr::from((Ipv4Addr::UNSPECIFIED, DEFAULT_PORT))]);
        assert_eq!(server.config(), &ServerConfig::default());
        assert_eq!(server.config().accept_pause, DEFAULT_ACCEPT_PAUSE);
    }

    #[test]
    fn settings_reach_the_connection_config() {
        let server = Server::builder()
            .address("127.0.0.1:9000")
            .handler(Noop)
            .max_body_size(16)
            .read_timeout(None)
            .error_responses(ErrorResponses::Detailed)
            .accept_pause(Duration::ZERO)
            .content_length_ignore_case(true)
            .build()
            .unwrap();

        assert_eq!(server.address(), &["127.0.0.1:9000".parse::<SocketAddr>().unwrap()]);
        let config = server.config();
        assert_eq!(config.connection.max_body_size, 16);
        assert_eq!(config.connection.read_timeout, None);
        assert_eq!(config.connection.error_responses, ErrorResponses::Detailed);
        assert!(config.accept_pause.is_zero());
        assert!(config.connection.content_length_ignore_case);
    }

    #[test]
    fn invalid_address() {
        let result = Server::builder().address("not an address").handler(Noop).build();
        assert!(matches!(result, Err(ServerError::InvalidAddress { .. })));
    }

    #[tokio::test]
    async fn bind_conflict() {
        let first = Server::builder().address("127.0.0.1:0").handler(Noop).build().unwrap().bind().await.unwrap();
        let taken = first.local_addr().unwrap();

        let result = Server::builder().address(taken).handler(Noop).build().unwrap().bind().await;
        assert!(matches!(result, Err(ServerError::Bind { .. })));
    }
}
