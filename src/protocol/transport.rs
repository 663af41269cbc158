use async_trait::async_trait;
use std::fmt::Debug;
use std::io;

/// Raw byte channel to a mount.
///
/// Implementations only move bytes. Framing, timeouts and the
/// one-command-at-a-time discipline live in [`ProtocolEngine`](super::ProtocolEngine).
#[async_trait]
pub trait Transport: Debug + Send {
    /// Write all of `data` to the device.
    async fn write(&mut self, data: &[u8]) -> io::Result<()>;

    /// Read whatever is available into `buf`, waiting until at least one byte arrives.
    ///
    /// Returns `Ok(0)` only when the channel is closed for good.
    async fn read(&mut self, buf: &mut [u8]) -> io::Result<usize>;

    /// Drop bytes that already arrived but were never read.
    ///
    /// Called before every command so that a late answer to a timed-out
    /// command can't be mistaken for the next response.
    fn discard_input(&mut self) -> io::Result<()> {
        Ok(())
    }
}

#[async_trait]
impl<T: Transport + ?Sized> Transport for Box<T> {
    async fn write(&mut self, data: &[u8]) -> io::Result<()> {
        (**self).write(data).await
    }

    async fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        (**self).read(buf).await
    }

    fn discard_input(&mut self) -> io::Result<()> {
        (**self).discard_input()
    }
}
