use serde::Serialize;
use socket2::{Domain, Protocol, Socket, Type};
use std::convert::Infallible;
use std::net::{Ipv6Addr, SocketAddr};
#[cfg(windows)]
use std::os::windows::prelude::AsRawSocket;
use tokio::net::UdpSocket;

const DISCOVERY_ADDR_V6: Ipv6Addr = Ipv6Addr::new(0xff12, 0, 0, 0, 0, 0, 0xa1, 0x9aca);
const DISCOVERY_MSG: &[u8] = b"alpacadiscovery1";

/// Well-known Alpaca discovery port.
pub const DEFAULT_DISCOVERY_PORT: u16 = 32227;

#[derive(Serialize)]
struct AlpacaPort {
    #[serde(rename = "AlpacaPort")]
    alpaca_port: u16,
}

#[tracing::instrument(level = "trace")]
fn bind_socket(addr: SocketAddr) -> eyre::Result<UdpSocket> {
    let socket = Socket::new(Domain::for_address(addr), Type::DGRAM, Some(Protocol::UDP))?;
    socket.set_nonblocking(true)?;
    // Several servers on one host must be able to share the well-known port.
    socket.set_reuse_address(true)?;
    if addr.is_ipv6() {
        // Also serve IPv4 broadcasts from the same socket.
        socket.set_only_v6(false)?;
    }
    // Without SIO_UDP_CONNRESET an ICMP "port unreachable" for a previous
    // reply poisons the next `recv_from` on Windows.
    #[cfg(windows)]
    {
        use eyre::Context;
        use windows_sys::Win32::Networking::WinSock::{
            SIO_UDP_CONNRESET, WSAGetLastError, ioctlsocket,
        };

        unsafe {
            #[expect(
                clippy::as_conversions,
                clippy::cast_possible_truncation,
                clippy::cast_possible_wrap
            )]
            match ioctlsocket(socket.as_raw_socket() as _, SIO_UDP_CONNRESET as _, &mut 0) {
                0_i32 => Ok(()),
                _ => Err(WSAGetLastError()),
            }
        }
        .map_err(std::io::Error::from_raw_os_error)
        .context("Couldn't configure the UDP socket to ignore ICMP errors")?;
    }
    socket.bind(&addr.into())?;
    Ok(UdpSocket::from_std(socket.into())?)
}

/// Alpaca discovery responder.
#[derive(Debug, Clone, Copy)]
pub struct Server {
    /// Port of the Alpaca HTTP server to advertise.
    pub alpaca_port: u16,
    /// Discovery address to listen on.
    pub listen_addr: SocketAddr,
}

/// Discovery responder with its socket already bound.
#[derive(Debug)]
pub struct BoundServer {
    socket: UdpSocket,
    response_msg: String,
}

impl Server {
    /// Responder for an Alpaca server bound to `alpaca_listen_addr`, on the well-known port.
    pub const fn for_alpaca_server_at(alpaca_listen_addr: SocketAddr, discovery_port: u16) -> Self {
        Self {
            alpaca_port: alpaca_listen_addr.port(),
            listen_addr: SocketAddr::new(alpaca_listen_addr.ip(), discovery_port),
        }
    }

    /// Binds the discovery socket, joining the IPv6 multicast group when listening on IPv6.
    #[tracing::instrument(err)]
    pub fn bind(self) -> eyre::Result<BoundServer> {
        let response_msg = serde_json::to_string(&AlpacaPort {
            alpaca_port: self.alpaca_port,
        })?;
        let socket = bind_socket(self.listen_addr)?;
        if self.listen_addr.is_ipv6() {
            socket.join_multicast_v6(&DISCOVERY_ADDR_V6, 0)?;
        }
        Ok(BoundServer {
            socket,
            response_msg,
        })
    }
}

impl BoundServer {
    /// Address the responder is actually listening on.
    pub fn listen_addr(&self) -> std::io::Result<SocketAddr> {
        self.socket.local_addr()
    }

    /// Answers discovery requests forever.
    ///
    /// Errors while handling a single request are logged and don't stop the loop.
    pub async fn start(self) -> Infallible {
        tracing::debug!("Starting Alpaca discovery server");
        let mut buf = [0; DISCOVERY_MSG.len() + 1];
        loop {
            if let Err(err) = async {
                let (len, src) = self.socket.recv_from(&mut buf).await?;
                if &buf[..len] == DISCOVERY_MSG {
                    tracing::debug!(%src, "Received Alpaca discovery request");
                    eyre::ensure!(
                        self.socket
                            .send_to(self.response_msg.as_bytes(), src)
                            .await?
                            == self.response_msg.len(),
                        "Failed to send discovery response",
                    );
                } else {
                    tracing::warn!(%src, "Received unknown discovery packet");
                }
                Ok(())
            }
            .await
            {
                tracing::error!(%err, "Error while handling a discovery request");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::net::Ipv4Addr;
    use std::time::Duration;

    #[tokio::test]
    async fn answers_with_alpaca_port() -> eyre::Result<()> {
        let server = Server {
            alpaca_port: 8378,
            listen_addr: (Ipv4Addr::LOCALHOST, 0).into(),
        }
        .bind()?;
        let server_addr = server.listen_addr()?;
        let responder = tokio::spawn(server.start());

        let client = UdpSocket::bind((Ipv4Addr::LOCALHOST, 0)).await?;
        client.send_to(b"not a discovery request", server_addr).await?;
        client.send_to(DISCOVERY_MSG, server_addr).await?;

        let mut buf = [0; 64];
        let (len, _) =
            tokio::time::timeout(Duration::from_secs(5), client.recv_from(&mut buf)).await??;
        let reply: serde_json::Value = serde_json::from_slice(&buf[..len])?;
        assert_eq!(reply, serde_json::json!({ "AlpacaPort": 8378 }));

        responder.abort();
        Ok(())
    }
}
