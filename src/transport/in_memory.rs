use std::collections::VecDeque;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, MutexGuard};

use tokio::task::yield_now;

use crate::error::{ClientError, Result};
use crate::protocol::frame::pad_frame;
use crate::transport::Transport;

#[derive(Default)]
struct Pipe {
    frames: Mutex<VecDeque<Vec<u8>>>,
    closed: AtomicBool,
}

impl Pipe {
    fn frames(&self) -> MutexGuard<'_, VecDeque<Vec<u8>>> {
        self.frames.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn is_closed(&self) -> bool {
        self.closed.load(Ordering::SeqCst)
    }
}

/// One end of an in-process frame channel with the same framing as a socket.
pub struct InMemoryTransport {
    inbound: Arc<Pipe>,
    outbound: Arc<Pipe>,
}

impl InMemoryTransport {
    pub fn pair() -> (Self, Self) {
        let a = Arc::new(Pipe::default());
        let b = Arc::new(Pipe::default());
        (
            Self {
                inbound: a.clone(),
                outbound: b.clone(),
            },
            Self {
                inbound: b,
                outbound: a,
            },
        )
    }

    /// Frames sent by the peer and not received yet.
    pub fn pending(&self) -> usize {
        self.inbound.frames().len()
    }

    fn shut(&self) {
        self.inbound.closed.store(true, Ordering::SeqCst);
        self.outbound.closed.store(true, Ordering::SeqCst);
    }
}

impl Drop for InMemoryTransport {
    fn drop(&mut self) {
        self.shut();
    }
}

#[async_trait::async_trait]
impl Transport for InMemoryTransport {
    async fn send(&mut self, payload: &[u8]) -> Result<()> {
        if self.outbound.is_closed() {
            return Err(ClientError::Closed);
        }
        self.outbound.frames().push_back(pad_frame(payload).to_vec());
        Ok(())
    }

    async fn recv(&mut self) -> Result<Vec<u8>> {
        loop {
            let next = self.inbound.frames().pop_front();
            if let Some(frame) = next {
                return Ok(frame);
            }
            if self.inbound.is_closed() {
                return Err(ClientError::Closed);
            }
            yield_now().await;
        }
    }

    async fn close(&mut self) -> Result<()> {
        self.shut();
        Ok(())
    }
}
