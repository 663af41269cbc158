use super::Transport;
use async_trait::async_trait;
use std::io;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio_serial::{ClearBuffer, SerialPort, SerialPortBuilderExt, SerialStream};

/// Serial port connection to the hand controller.
///
/// NexStar controllers use 8 data bits, no parity, one stop bit and no flow
/// control, which are the `tokio-serial` defaults.
#[derive(derive_more::Debug)]
pub struct SerialTransport {
    #[debug(skip)]
    port: SerialStream,
    port_name: String,
}

impl SerialTransport {
    /// Open the serial device at `path`.
    #[tracing::instrument(level = "debug", err)]
    pub fn open(path: &str, baud_rate: u32) -> io::Result<Self> {
        let port = tokio_serial::new(path, baud_rate)
            .open_native_async()
            .map_err(io::Error::from)?;

        tracing::info!(port = %path, baud_rate, "Serial port opened");

        Ok(Self {
            port,
            port_name: path.to_owned(),
        })
    }
}

#[async_trait]
impl Transport for SerialTransport {
    async fn write(&mut self, data: &[u8]) -> io::Result<()> {
        tracing::trace!(port = %self.port_name, ?data, "Sending data");
        self.port.write_all(data).await?;
        self.port.flush().await
    }

    async fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        let n = self.port.read(buf).await?;
        tracing::trace!(port = %self.port_name, data = ?&buf[..n], "Received data");
        Ok(n)
    }

    fn discard_input(&mut self) -> io::Result<()> {
        self.port.clear(ClearBuffer::Input).map_err(io::Error::from)
    }
}
