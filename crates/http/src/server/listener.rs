use std::fmt;
use std::io;
use std::net::SocketAddr;
use std::sync::Arc;

use tokio::net::{TcpListener, TcpStream};
use tokio::select;
use tokio_util::sync::CancellationToken;
use tokio_util::task::TaskTracker;
use tracing::{Instrument, error, info, info_span, warn};

use crate::connection::HttpConnection;
use crate::handler::Handler;
use crate::protocol::HttpError;
use crate::server::ServerConfig;

/// A bound server socket, ready to accept connections.
pub struct Listener {
    tcp_listener: TcpListener,
    handler: Arc<dyn Handler>,
    config: ServerConfig,
}

impl fmt::Debug for Listener {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Listener").field("tcp_listener", &self.tcp_listener).field("config", &self.config).finish_non_exhaustive()
    }
}

impl Listener {
    pub(crate) fn new(tcp_listener: TcpListener, handler: Arc<dyn Handler>, config: ServerConfig) -> Self {
        Self { tcp_listener, handler, config }
    }

    pub fn local_addr(&self) -> io::Result<SocketAddr> {
        self.tcp_listener.local_addr()
    }

    /// Accepts connections until `shutdown` is cancelled, then waits for the
    /// connections still in flight.
    ///
    /// Every accepted connection is processed on its own task. A failed
    /// accept is logged and the loop goes on.
    pub async fn run(self, shutdown: CancellationToken) {
        let tracker = TaskTracker::new();

        loop {
            let accepted = select! {
                () = shutdown.cancelled() => break,
                accepted = self.tcp_listener.accept() => accepted,
            };

            match accepted {
                Ok((tcp_stream, remote_addr)) => self.spawn_connection(&tracker, tcp_stream, remote_addr),
                Err(e) => warn!(cause = %e, "failed to accept"),
            }

            if !self.config.accept_pause.is_zero() {
                tokio::time::sleep(self.config.accept_pause).await;
            }
        }

        tracker.close();
        info!(connections = tracker.len(), "stop accepting, waiting for open connections");
        tracker.wait().await;
        info!("server stopped");
    }

    fn spawn_connection(&self, tracker: &TaskTracker, tcp_stream: TcpStream, remote_addr: SocketAddr) {
        let handler = Arc::clone(&self.handler);
        let connection_config = self.config.connection;

        tracker.spawn(
            async move {
                let (reader, writer) = tcp_stream.into_split();
                let connection = HttpConnection::with_config(reader, writer, &connection_config);
                match connection.process(handler.as_ref()).await {
                    Ok(()) => info!("finished process, connection shutdown"),
                    Err(e @ HttpError::HandlerError { .. }) => error!("service has error, cause {}, connection shutdown", e),
                    Err(e) => warn!("request failed, cause {}, connection shutdown", e),
                }
            }
            .instrument(info_span!("connection", %remote_addr)),
        );
    }
}
