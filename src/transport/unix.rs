use std::path::{Path, PathBuf};

use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::UnixStream;
use tokio::time::{timeout, Duration};

use crate::config::MAX_MSG_SIZE;
use crate::error::{ClientError, Result};
use crate::protocol::frame::pad_frame;
use crate::transport::Transport;

/// Frame transport over a Unix domain stream socket.
pub struct UnixTransport {
    stream: Option<UnixStream>,
    path: PathBuf,
    read_timeout: Option<Duration>,
}

impl UnixTransport {
    pub fn new(stream: UnixStream) -> Self {
        Self {
            stream: Some(stream),
            path: PathBuf::new(),
            read_timeout: None,
        }
    }

    pub async fn connect(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        let stream = UnixStream::connect(&path)
            .await
            .map_err(|source| ClientError::Connect {
                path: path.clone(),
                source,
            })?;
        log::debug!("connected to {}", path.display());
        Ok(Self {
            stream: Some(stream),
            path,
            read_timeout: None,
        })
    }

    /// Fail `recv` after `read_timeout` instead of waiting forever.
    pub fn with_read_timeout(mut self, read_timeout: Option<Duration>) -> Self {
        self.read_timeout = read_timeout;
        self
    }

    /// Socket path this transport connected to, empty for adopted streams.
    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn is_closed(&self) -> bool {
        self.stream.is_none()
    }

    fn stream(&mut self) -> Result<&mut UnixStream> {
        self.stream.as_mut().ok_or(ClientError::Closed)
    }
}

fn map_io(e: std::io::Error) -> ClientError {
    match e.kind() {
        std::io::ErrorKind::UnexpectedEof
        | std::io::ErrorKind::ConnectionReset
        | std::io::ErrorKind::BrokenPipe => ClientError::Closed,
        _ => ClientError::Transport(e),
    }
}

#[async_trait::async_trait]
impl Transport for UnixTransport {
    async fn send(&mut self, payload: &[u8]) -> Result<()> {
        let frame = pad_frame(payload);
        let stream = self.stream()?;
        stream.write_all(&frame).await.map_err(map_io)?;
        stream.flush().await.map_err(map_io)?;
        Ok(())
    }

    async fn recv(&mut self) -> Result<Vec<u8>> {
        let read_timeout = self.read_timeout;
        let stream = self.stream()?;
        let mut frame = vec![0u8; MAX_MSG_SIZE];

        let read = stream.read_exact(&mut frame);
        let result = match read_timeout {
            Some(limit) => timeout(limit, read)
                .await
                .map_err(|_| ClientError::Timeout(limit))?,
            None => read.await,
        };
        result.map_err(map_io)?;

        Ok(frame)
    }

    async fn close(&mut self) -> Result<()> {
        if let Some(mut stream) = self.stream.take() {
            if let Err(e) = stream.shutdown().await {
                log::debug!("shutdown of {} failed: {}", self.path.display(), e);
            }
        }
        Ok(())
    }
}
