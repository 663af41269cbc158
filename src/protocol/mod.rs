//! Half-duplex command/response exchange with the mount.
//!
//! The hand controller answers every command with a response terminated by
//! [`TERMINATOR`]. Only one command may be outstanding at a time: a second
//! [`ProtocolEngine::send_command`] while one is pending fails immediately with
//! [`Error::Busy`] instead of queueing.

mod serial;
mod transport;

pub use serial::SerialTransport;
pub use transport::Transport;

use std::io;
use std::time::Duration;
use thiserror::Error;
use tokio::sync::Mutex;
use tokio::time::Instant;

/// Byte that ends every response.
pub const TERMINATOR: u8 = b'#';

/// How long to wait for a terminated response by default, in milliseconds.
pub const DEFAULT_TIMEOUT_MS: u64 = 3500;
/// How long to wait for a terminated response by default.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_millis(DEFAULT_TIMEOUT_MS);

/// Protocol engine errors.
#[derive(Debug, Error)]
pub enum Error {
    /// Another command is still awaiting its response.
    #[error("Another command is already in flight")]
    Busy,
    /// No terminator arrived before the deadline.
    #[error("Command timed out after {elapsed_ms} ms")]
    Timeout {
        /// Time spent waiting for the response.
        elapsed_ms: u64,
    },
    /// The transport failed.
    #[error("Transport error: {0}")]
    Io(#[from] io::Error),
}

/// Result type for protocol operations.
pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug)]
struct PendingSlot {
    transport: Box<dyn Transport>,
    buffer: Vec<u8>,
}

impl PendingSlot {
    async fn read_response(&mut self) -> Result<Vec<u8>> {
        let mut chunk = [0_u8; 64];

        loop {
            // Scan everything accumulated so far, not just the last chunk.
            if let Some(end) = self.buffer.iter().position(|&b| b == TERMINATOR) {
                let trailing = self.buffer.split_off(end + 1);
                if !trailing.is_empty() {
                    tracing::trace!(
                        trailing = %trailing.escape_ascii(),
                        "Dropping bytes after the terminator"
                    );
                }
                return Ok(std::mem::take(&mut self.buffer));
            }

            let n = self.transport.read(&mut chunk).await?;
            if n == 0 {
                return Err(io::Error::from(io::ErrorKind::UnexpectedEof).into());
            }
            self.buffer.extend_from_slice(&chunk[..n]);
        }
    }
}

/// Serialises commands to the mount over a [`Transport`].
#[derive(Debug)]
pub struct ProtocolEngine {
    slot: Mutex<PendingSlot>,
    timeout: Duration,
}

impl ProtocolEngine {
    /// Create an engine with the given response deadline.
    pub fn new(transport: impl Transport + 'static, timeout: Duration) -> Self {
        Self {
            slot: Mutex::new(PendingSlot {
                transport: Box::new(transport),
                buffer: Vec::new(),
            }),
            timeout,
        }
    }

    /// Send `command` and wait for its terminated response.
    ///
    /// The returned bytes include the terminator. Anything the transport
    /// delivered after the terminator in the same read is dropped.
    pub async fn send_command(&self, command: &[u8]) -> Result<Vec<u8>> {
        let Ok(mut slot) = self.slot.try_lock() else {
            tracing::debug!(command = %command.escape_ascii(), "Rejecting command, engine is busy");
            return Err(Error::Busy);
        };

        slot.buffer.clear();
        slot.transport.discard_input()?;
        slot.transport.write(command).await?;

        let started = Instant::now();
        let result = tokio::time::timeout(self.timeout, slot.read_response()).await;

        match result {
            Ok(Ok(response)) => {
                tracing::trace!(
                    command = %command.escape_ascii(),
                    response = %response.escape_ascii(),
                    "Command completed"
                );
                Ok(response)
            }
            Ok(Err(err)) => {
                slot.buffer.clear();
                Err(err)
            }
            Err(_elapsed) => {
                slot.buffer.clear();
                let elapsed_ms = u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX);
                tracing::warn!(command = %command.escape_ascii(), elapsed_ms, "Command timed out");
                Err(Error::Timeout { elapsed_ms })
            }
        }
    }
}
