//! TCP listener and server construction.
//!
//! - [`ServerBuilder`]: collects the address, the [`Handler`](crate::handler::Handler)
//!   and the tunables, producing a [`Server`]
//! - [`Server::bind`]: binds the listening socket, returning a [`Listener`]
//! - [`Listener::run`]: the accept loop, one tokio task per connection, until
//!   the shutdown token is cancelled

mod builder;
mod error;
mod listener;

pub use builder::{DEFAULT_ACCEPT_PAUSE, DEFAULT_PORT, Server, ServerBuilder, ServerConfig};
pub use error::ServerError;
pub use listener::Listener;
