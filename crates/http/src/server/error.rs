use std::io;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ServerError {
    #[error("handler must be set")]
    MissingHandler,

    #[error("invalid address: {source}")]
    InvalidAddress { source: io::Error },

    #[error("bind server error: {source}")]
    Bind { source: io::Error },
}

impl ServerError {
    pub fn invalid_address<E: Into<io::Error>>(e: E) -> Self {
        Self::InvalidAddress { source: e.into() }
    }

    pub fn bind<E: Into<io::Error>>(e: E) -> Self {
        Self::Bind { source: e.into() }
    }
}
