//! ASCOM Alpaca telescope server for mounts that speak the Celestron NexStar
//! hand-controller serial protocol.
//!
//! The crate is layered bottom-up:
//!
//! - [`protocol`] owns the byte [`Transport`](protocol::Transport) and runs one
//!   command/response exchange at a time, framing responses by the `#` terminator.
//! - [`mount`] knows the NexStar opcodes and the hex angle encoding and exposes a typed
//!   async [`Mount`](mount::Mount) driver. It also ships an in-memory
//!   [`Simulator`](mount::Simulator) that answers the same command set.
//! - [`api`] declares the Alpaca [`Device`](api::Device) and [`Telescope`](api::Telescope)
//!   operation tables, and [`driver`] implements them on top of the mount with explicit
//!   per-property state cells.
//! - [`Server`] routes the Alpaca HTTP surface to the device and enforces the
//!   transaction-envelope conventions.
//!
//! ## Example
//!
//! ```no_run
//! use nexstar_alpaca::driver::NexStarTelescope;
//! use nexstar_alpaca::mount::{Mount, Precision, Simulator};
//! use nexstar_alpaca::Server;
//! use std::time::Duration;
//!
//! # async fn run() -> eyre::Result<()> {
//! let mount = Mount::new(Simulator::default(), Duration::from_millis(3500), Precision::Coarse);
//!
//! Server::new(NexStarTelescope::new(mount))
//!     .bind()
//!     .await?
//!     .start()
//!     .await?;
//! # Ok(())
//! # }
//! ```

pub(crate) mod macros;

pub mod api;
pub mod config;
pub mod driver;
pub mod mount;
pub mod protocol;

mod errors;
mod server;

#[cfg(test)]
mod test;
#[cfg(test)]
mod test_utils;

pub use config::Config;
pub use errors::{ASCOMError, ASCOMErrorCode, ASCOMResult};
pub use server::{BoundServer, DiscoveryServer, Server};
