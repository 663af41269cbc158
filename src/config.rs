//! Process configuration.

use crate::mount::Precision;
use crate::protocol::DEFAULT_TIMEOUT_MS;
use crate::server::{DEFAULT_DISCOVERY_PORT, DEFAULT_LISTEN_ADDR};
use clap::Parser;
use std::net::SocketAddr;
use std::time::Duration;

/// Serve a Celestron NexStar mount as an ASCOM Alpaca telescope.
#[derive(Debug, Clone, Parser)]
#[command(version, about)]
pub struct Config {
    /// Serial device the hand controller is attached to.
    #[arg(long, env = "NEXSTAR_SERIAL_PORT", default_value = "/dev/ttyUSB0")]
    pub serial_port: String,

    /// Serial baud rate.
    #[arg(long, env = "NEXSTAR_BAUD_RATE", default_value_t = 9600)]
    pub baud_rate: u32,

    /// Use the built-in mount simulator instead of the serial port.
    #[arg(long, env = "NEXSTAR_SIMULATOR")]
    pub simulator: bool,

    /// HTTP address to listen on.
    #[arg(long, env = "NEXSTAR_LISTEN", default_value_t = DEFAULT_LISTEN_ADDR)]
    pub listen: SocketAddr,

    /// UDP port for Alpaca discovery.
    #[arg(long, env = "NEXSTAR_DISCOVERY_PORT", default_value_t = DEFAULT_DISCOVERY_PORT)]
    pub discovery_port: u16,

    /// Don't answer Alpaca discovery requests.
    #[arg(long)]
    pub no_discovery: bool,

    /// How long to wait for a response to a serial command, in milliseconds.
    #[arg(long, env = "NEXSTAR_COMMAND_TIMEOUT_MS", default_value_t = DEFAULT_TIMEOUT_MS)]
    pub command_timeout_ms: u64,

    /// Use the 32-bit coordinate commands.
    #[arg(long, env = "NEXSTAR_PRECISE")]
    pub precise: bool,
}

impl Config {
    /// Rejects settings that can't possibly work.
    pub fn validate(&self) -> eyre::Result<()> {
        eyre::ensure!(self.baud_rate > 0, "Baud rate must be positive");
        eyre::ensure!(
            self.command_timeout_ms > 0,
            "Command timeout must be positive"
        );
        Ok(())
    }

    /// Timeout for a single serial command.
    pub const fn command_timeout(&self) -> Duration {
        Duration::from_millis(self.command_timeout_ms)
    }

    /// Coordinate precision for the mount driver.
    pub const fn precision(&self) -> Precision {
        if self.precise {
            Precision::Precise
        } else {
            Precision::Coarse
        }
    }

    /// Discovery port, unless discovery is disabled.
    pub const fn discovery_port(&self) -> Option<u16> {
        if self.no_discovery {
            None
        } else {
            Some(self.discovery_port)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() -> eyre::Result<()> {
        let config = Config::try_parse_from(["nexstar-alpaca"])?;
        config.validate()?;
        assert_eq!(config.serial_port, "/dev/ttyUSB0");
        assert_eq!(config.baud_rate, 9600);
        assert!(!config.simulator);
        assert_eq!(config.listen, "0.0.0.0:3000".parse::<SocketAddr>()?);
        assert_eq!(config.discovery_port(), Some(32227));
        assert_eq!(config.command_timeout(), Duration::from_millis(3500));
        assert_eq!(config.precision(), Precision::Coarse);
        Ok(())
    }

    #[test]
    fn flags_override_defaults() -> eyre::Result<()> {
        let config = Config::try_parse_from([
            "nexstar-alpaca",
            "--serial-port",
            "/dev/ttyACM1",
            "--simulator",
            "--listen",
            "127.0.0.1:11111",
            "--no-discovery",
            "--command-timeout-ms",
            "500",
            "--precise",
        ])?;
        config.validate()?;
        assert_eq!(config.serial_port, "/dev/ttyACM1");
        assert!(config.simulator);
        assert_eq!(config.listen.port(), 11111);
        assert_eq!(config.discovery_port(), None);
        assert_eq!(config.command_timeout(), Duration::from_millis(500));
        assert_eq!(config.precision(), Precision::Precise);
        Ok(())
    }

    #[test]
    fn rejects_zero_values() -> eyre::Result<()> {
        let config = Config::try_parse_from(["nexstar-alpaca", "--baud-rate", "0"])?;
        assert!(config.validate().is_err());
        let config = Config::try_parse_from(["nexstar-alpaca", "--command-timeout-ms", "0"])?;
        assert!(config.validate().is_err());
        Ok(())
    }
}
