//! Demo HTTP/1.0 server.
//!
//! ```bash
//! simple-http-server 8080
//! SIMPLE_HTTP_PORT=9000 simple-http-server --read-timeout-secs 5 --detailed-errors
//! ```

mod page;

use std::process::ExitCode;
use std::time::Duration;

use clap::Parser;
use simple_http::codec::MAX_BODY_SIZE;
use simple_http::connection::{DEFAULT_READ_TIMEOUT, ErrorResponses};
use simple_http::server::{DEFAULT_PORT, Server};
use tokio_util::sync::CancellationToken;
use tracing::{Level, error, info};
use tracing_subscriber::FmtSubscriber;

use crate::page::DemoHandler;

#[derive(Debug, Clone, Parser)]
#[command(name = "simple-http-server", version, about = "Serves the demo pages over HTTP/1.0")]
struct Args {
    /// Port to listen on, on every interface
    #[arg(default_value_t = DEFAULT_PORT, env = "SIMPLE_HTTP_PORT")]
    port: u16,

    /// Largest accepted request body, in bytes
    #[arg(long, default_value_t = MAX_BODY_SIZE, env = "SIMPLE_HTTP_MAX_BODY_SIZE")]
    max_body_size: usize,

    /// Seconds to wait for the next bytes from the client, 0 waits forever
    #[arg(long, default_value_t = DEFAULT_READ_TIMEOUT.as_secs(), env = "SIMPLE_HTTP_READ_TIMEOUT_SECS")]
    read_timeout_secs: u64,

    /// Answer errors with a matching status instead of 404
    #[arg(long, env = "SIMPLE_HTTP_DETAILED_ERRORS")]
    detailed_errors: bool,

    /// Accept Content-Length in any letter case
    #[arg(long, env = "SIMPLE_HTTP_CONTENT_LENGTH_IGNORE_CASE")]
    content_length_ignore_case: bool,
}

impl Args {
    fn read_timeout(&self) -> Option<Duration> {
        (self.read_timeout_secs > 0).then(|| Duration::from_secs(self.read_timeout_secs))
    }

    fn error_responses(&self) -> ErrorResponses {
        if self.detailed_errors { ErrorResponses::Detailed } else { ErrorResponses::Generic }
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    let subscriber = FmtSubscriber::builder().with_max_level(Level::INFO).finish();
    if let Err(e) = tracing::subscriber::set_global_default(subscriber) {
        eprintln!("setting default subscriber failed: {e}");
        return ExitCode::FAILURE;
    }

    let args = Args::parse();

    let server = match Server::builder()
        .port(args.port)
        .handler(DemoHandler)
        .max_body_size(args.max_body_size)
        .read_timeout(args.read_timeout())
        .error_responses(args.error_responses())
        .content_length_ignore_case(args.content_length_ignore_case)
        .build()
    {
        Ok(server) => server,
        Err(e) => {
            error!(cause = %e, "invalid server settings");
            return ExitCode::FAILURE;
        }
    };

    let shutdown = CancellationToken::new();
    let ctrl_c_shutdown = shutdown.clone();
    tokio::spawn(async move {
        match tokio::signal::ctrl_c().await {
            Ok(()) => info!("received ctrl-c, shutting down"),
            Err(e) => error!(cause = %e, "failed to listen for ctrl-c, shutting down"),
        }
        ctrl_c_shutdown.cancel();
    });

    match server.start(shutdown).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!(cause = %e, "server error");
            ExitCode::FAILURE
        }
    }
}
