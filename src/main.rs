//! Command-line entry point for the NexStar Alpaca server.

use clap::Parser;
use nexstar_alpaca::driver::NexStarTelescope;
use nexstar_alpaca::mount::{Mount, Simulator};
use nexstar_alpaca::protocol::SerialTransport;
use nexstar_alpaca::{Config, Server};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> eyre::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = Config::parse();
    config.validate()?;

    let mount = if config.simulator {
        tracing::info!("Using the built-in mount simulator");
        Mount::new(
            Simulator::default(),
            config.command_timeout(),
            config.precision(),
        )
    } else {
        Mount::new(
            SerialTransport::open(&config.serial_port, config.baud_rate)?,
            config.command_timeout(),
            config.precision(),
        )
    };

    let server = Server {
        listen_addr: config.listen,
        discovery_port: config.discovery_port(),
        ..Server::new(NexStarTelescope::new(mount))
    };

    let server = server.bind().await?;
    tracing::info!(addr = %server.listen_addr()?, "Alpaca server listening");
    server.start().await
}
