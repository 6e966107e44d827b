//! Frame transports.
//!
//! A transport moves whole frames: `send` pads a payload to the fixed frame
//! size and `recv` hands back one complete frame, padding included. Stripping
//! the padding is left to the codec.

use crate::error::Result;

#[async_trait::async_trait]
pub trait Transport: Send + Sync {
    async fn send(&mut self, payload: &[u8]) -> Result<()>;
    async fn recv(&mut self) -> Result<Vec<u8>>;

    /// Release the connection. Later calls to `send`/`recv` fail.
    async fn close(&mut self) -> Result<()> {
        Ok(())
    }
}

#[async_trait::async_trait]
impl<T: Transport + ?Sized> Transport for Box<T> {
    async fn send(&mut self, payload: &[u8]) -> Result<()> {
        (**self).send(payload).await
    }

    async fn recv(&mut self) -> Result<Vec<u8>> {
        (**self).recv().await
    }

    async fn close(&mut self) -> Result<()> {
        (**self).close().await
    }
}

pub mod in_memory;
#[cfg(unix)]
pub mod unix;
