use std::path::PathBuf;
use std::time::Duration;

use crate::error::{ClientError, Result};
use crate::protocol::ProtocolVersion;

/// Size of one wire frame. Every message is zero-padded to exactly this many bytes.
pub const MAX_MSG_SIZE: usize = 256;
/// Size of the name buffers on the server side, terminator included.
pub const MAX_NAME_SIZE: usize = 64;
/// Largest `setup_match` board size the client accepts.
pub const MAX_BOARD_SIZE: usize = 1024;

pub const DEFAULT_AI_NAME: &str = "Rust Example Player";
pub const DEFAULT_AUTHOR_NAMES: &str = "Battleship Client Authors";

/// Everything needed to play one match against the server.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    pub socket_path: PathBuf,
    pub protocol: ProtocolVersion,
    pub ai_name: String,
    pub author_names: String,
    /// `None` waits on the server forever.
    pub read_timeout: Option<Duration>,
}

impl ClientConfig {
    pub fn new(socket_path: impl Into<PathBuf>) -> Self {
        Self {
            socket_path: socket_path.into(),
            protocol: ProtocolVersion::default(),
            ai_name: DEFAULT_AI_NAME.to_string(),
            author_names: DEFAULT_AUTHOR_NAMES.to_string(),
            read_timeout: None,
        }
    }

    pub fn with_protocol(mut self, protocol: ProtocolVersion) -> Self {
        self.protocol = protocol;
        self
    }

    pub fn with_names(mut self, ai_name: impl Into<String>, author_names: impl Into<String>) -> Self {
        self.ai_name = ai_name.into();
        self.author_names = author_names.into();
        self
    }

    pub fn with_read_timeout(mut self, read_timeout: Option<Duration>) -> Self {
        self.read_timeout = read_timeout;
        self
    }

    /// Reject settings that cannot start a match.
    pub fn validate(&self) -> Result<()> {
        if self.socket_path.as_os_str().is_empty() {
            return Err(ClientError::Usage("socket path is empty".into()));
        }
        if self.read_timeout == Some(Duration::ZERO) {
            return Err(ClientError::Usage("read timeout must be positive".into()));
        }
        Ok(())
    }
}
