//! Errors that end a match.

use std::path::PathBuf;
use std::time::Duration;

use thiserror::Error;

use crate::protocol::CodecError;

#[derive(Debug, Error)]
pub enum ClientError {
    /// Invalid startup configuration; the match was never started.
    #[error("usage error: {0}")]
    Usage(String),

    #[error("cannot connect to {}: {source}", .path.display())]
    Connect {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("transport error: {0}")]
    Transport(#[from] std::io::Error),

    #[error("connection closed by peer")]
    Closed,

    #[error("no message from server within {0:?}")]
    Timeout(Duration),

    /// The server sent something the protocol does not allow at this point.
    #[error("protocol error: expected {expected}, got {found}")]
    Protocol {
        expected: &'static str,
        found: String,
    },

    #[error("decode error: {0}")]
    Decode(#[from] CodecError),
}

pub type Result<T> = std::result::Result<T, ClientError>;
