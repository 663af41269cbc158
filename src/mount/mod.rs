//! Typed driver for the NexStar hand-controller command set.
//!
//! Every method issues exactly one command through the [`ProtocolEngine`] and
//! validates the response length against the fixed size for that command.
//! Errors from the engine are passed through unchanged, and nothing is retried.

pub mod codec;
mod error;
mod simulator;

pub use codec::{MountAxis, Precision, TrackingMode, VariableSlew};
pub use error::{Error, Result};
pub use simulator::Simulator;

use crate::protocol::{ProtocolEngine, Transport};
use codec::{
    DEGREES_FULL_SCALE, RA_FULL_SCALE, SET_TRACKING_MODE, decode_angle, encode_pair, model_name,
    signed_degrees, split_pair,
};
use std::time::Duration;

/// Equatorial coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RaDec {
    /// Right ascension in hours, `[0, 24)`.
    pub ra: f64,
    /// Declination in degrees, `(-180, 180]`.
    pub dec: f64,
}

/// Horizontal coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AltAzm {
    /// Altitude in degrees, `(-180, 180]`.
    pub alt: f64,
    /// Azimuth in degrees, `[0, 360)`.
    pub azm: f64,
}

const ACK_LEN: usize = 1;
const BYTE_REPLY_LEN: usize = 2;
const VERSION_LEN: usize = 3;

fn opcode(command: &[u8]) -> char {
    command.first().copied().map_or('?', char::from)
}

/// NexStar mount driver.
#[derive(Debug)]
pub struct Mount {
    engine: ProtocolEngine,
    precision: Precision,
}

impl Mount {
    /// Create a driver over `transport`.
    ///
    /// `precision` selects which coordinate commands the convenience
    /// methods ([`Self::ra_dec`], [`Self::goto`] and friends) use.
    pub fn new(transport: impl Transport + 'static, timeout: Duration, precision: Precision) -> Self {
        Self {
            engine: ProtocolEngine::new(transport, timeout),
            precision,
        }
    }

    async fn exchange(&self, command: &[u8], expected: usize) -> Result<Vec<u8>> {
        let response = self.engine.send_command(command).await?;
        if response.len() != expected {
            return Err(Error::InvalidResponseSize {
                command: opcode(command),
                expected,
                actual: response.len(),
            });
        }
        Ok(response)
    }

    async fn read_pair(
        &self,
        command: u8,
        precision: Precision,
        (first_scale, second_scale): (f64, f64),
    ) -> Result<(f64, f64)> {
        let response = self
            .exchange(&[command], precision.pair_response_len())
            .await?;
        let malformed = |reason| Error::MalformedResponse {
            command: char::from(command),
            reason,
        };
        let (first, second) = split_pair(&response, precision).map_err(malformed)?;
        Ok((
            decode_angle(first, first_scale, precision).map_err(malformed)?,
            decode_angle(second, second_scale, precision).map_err(malformed)?,
        ))
    }

    async fn send_pair(
        &self,
        command: u8,
        precision: Precision,
        first: (f64, f64),
        second: (f64, f64),
    ) -> Result<()> {
        let mut bytes = vec![command];
        bytes.extend_from_slice(encode_pair(first, second, precision).as_bytes());
        _ = self.exchange(&bytes, ACK_LEN).await?;
        Ok(())
    }

    async fn read_ra_dec(&self, command: u8, precision: Precision) -> Result<RaDec> {
        let (ra, dec) = self
            .read_pair(command, precision, (RA_FULL_SCALE, DEGREES_FULL_SCALE))
            .await?;
        Ok(RaDec {
            ra,
            dec: signed_degrees(dec),
        })
    }

    async fn read_alt_azm(&self, command: u8, precision: Precision) -> Result<AltAzm> {
        // Azimuth comes first on the wire.
        let (azm, alt) = self
            .read_pair(command, precision, (DEGREES_FULL_SCALE, DEGREES_FULL_SCALE))
            .await?;
        Ok(AltAzm {
            alt: signed_degrees(alt),
            azm,
        })
    }

    /// Hand controller firmware version as `major.minor`.
    pub async fn version(&self) -> Result<String> {
        let response = self.exchange(b"V", VERSION_LEN).await?;
        Ok(format!("{}.{}", response[0], response[1]))
    }

    /// Mount model name. Unknown model codes are not an error.
    pub async fn model(&self) -> Result<&'static str> {
        let response = self.exchange(b"m", BYTE_REPLY_LEN).await?;
        Ok(model_name(response[0]))
    }

    /// Current equatorial position, 16-bit.
    pub async fn get_ra_dec(&self) -> Result<RaDec> {
        self.read_ra_dec(b'E', Precision::Coarse).await
    }

    /// Current equatorial position, 32-bit.
    pub async fn get_precise_ra_dec(&self) -> Result<RaDec> {
        self.read_ra_dec(b'e', Precision::Precise).await
    }

    /// Current horizontal position, 16-bit.
    pub async fn get_alt_azm(&self) -> Result<AltAzm> {
        self.read_alt_azm(b'Z', Precision::Coarse).await
    }

    /// Current horizontal position, 32-bit.
    pub async fn get_precise_alt_azm(&self) -> Result<AltAzm> {
        self.read_alt_azm(b'z', Precision::Precise).await
    }

    /// Slew to equatorial coordinates, 16-bit.
    #[tracing::instrument(level = "debug", skip(self), err)]
    pub async fn goto_ra_dec(&self, ra: f64, dec: f64) -> Result<()> {
        self.send_pair(
            b'R',
            Precision::Coarse,
            (ra, RA_FULL_SCALE),
            (dec, DEGREES_FULL_SCALE),
        )
        .await
    }

    /// Slew to equatorial coordinates, 32-bit.
    #[tracing::instrument(level = "debug", skip(self), err)]
    pub async fn goto_precise_ra_dec(&self, ra: f64, dec: f64) -> Result<()> {
        self.send_pair(
            b'r',
            Precision::Precise,
            (ra, RA_FULL_SCALE),
            (dec, DEGREES_FULL_SCALE),
        )
        .await
    }

    /// Slew to horizontal coordinates, 16-bit.
    #[tracing::instrument(level = "debug", skip(self), err)]
    pub async fn goto_alt_azm(&self, alt: f64, azm: f64) -> Result<()> {
        self.send_pair(
            b'B',
            Precision::Coarse,
            (azm, DEGREES_FULL_SCALE),
            (alt, DEGREES_FULL_SCALE),
        )
        .await
    }

    /// Slew to horizontal coordinates, 32-bit.
    #[tracing::instrument(level = "debug", skip(self), err)]
    pub async fn goto_precise_alt_azm(&self, alt: f64, azm: f64) -> Result<()> {
        self.send_pair(
            b'b',
            Precision::Precise,
            (azm, DEGREES_FULL_SCALE),
            (alt, DEGREES_FULL_SCALE),
        )
        .await
    }

    /// Tell the mount it's pointing at the given equatorial coordinates, 16-bit.
    ///
    /// Scaled the same way as [`Self::goto_ra_dec`].
    #[tracing::instrument(level = "debug", skip(self), err)]
    pub async fn sync_ra_dec(&self, ra: f64, dec: f64) -> Result<()> {
        self.send_pair(
            b'S',
            Precision::Coarse,
            (ra, RA_FULL_SCALE),
            (dec, DEGREES_FULL_SCALE),
        )
        .await
    }

    /// Tell the mount it's pointing at the given equatorial coordinates, 32-bit.
    #[tracing::instrument(level = "debug", skip(self), err)]
    pub async fn sync_precise_ra_dec(&self, ra: f64, dec: f64) -> Result<()> {
        self.send_pair(
            b's',
            Precision::Precise,
            (ra, RA_FULL_SCALE),
            (dec, DEGREES_FULL_SCALE),
        )
        .await
    }

    /// Move `axis` at `rate` degrees per second. Zero stops it.
    ///
    /// The frame is validated before anything goes on the wire.
    #[tracing::instrument(level = "debug", skip(self), err)]
    pub async fn slew_variable(&self, axis: MountAxis, rate: f64) -> Result<()> {
        let frame = VariableSlew::new(axis, rate)?;
        _ = self.exchange(&frame.to_bytes(), ACK_LEN).await?;
        Ok(())
    }

    /// Current tracking mode.
    pub async fn get_tracking_mode(&self) -> Result<TrackingMode> {
        let response = self.exchange(b"t", BYTE_REPLY_LEN).await?;
        TrackingMode::try_from(response[0]).map_err(|err| Error::MalformedResponse {
            command: 't',
            reason: err.to_string(),
        })
    }

    /// Switch tracking mode.
    #[tracing::instrument(level = "debug", skip(self), err)]
    pub async fn set_tracking_mode(&self, mode: TrackingMode) -> Result<()> {
        _ = self
            .exchange(&[SET_TRACKING_MODE, mode.into()], ACK_LEN)
            .await?;
        Ok(())
    }

    /// Whether the hand controller finished its alignment.
    pub async fn is_align_complete(&self) -> Result<bool> {
        let response = self.exchange(b"J", BYTE_REPLY_LEN).await?;
        Ok(response[0] == 1)
    }

    /// Whether a goto is still running.
    pub async fn is_goto_in_progress(&self) -> Result<bool> {
        let response = self.exchange(b"L", BYTE_REPLY_LEN).await?;
        Ok(response[0] == b'1')
    }

    /// Abort a running goto.
    #[tracing::instrument(level = "debug", skip(self), err)]
    pub async fn cancel_goto(&self) -> Result<()> {
        _ = self.exchange(b"M", ACK_LEN).await?;
        Ok(())
    }

    /// Round-trip a single byte through the hand controller.
    pub async fn echo(&self, byte: u8) -> Result<u8> {
        let response = self.exchange(&[b'K', byte], BYTE_REPLY_LEN).await?;
        Ok(response[0])
    }

    /// Current equatorial position at the configured precision.
    pub async fn ra_dec(&self) -> Result<RaDec> {
        match self.precision {
            Precision::Coarse => self.get_ra_dec().await,
            Precision::Precise => self.get_precise_ra_dec().await,
        }
    }

    /// Current horizontal position at the configured precision.
    pub async fn alt_azm(&self) -> Result<AltAzm> {
        match self.precision {
            Precision::Coarse => self.get_alt_azm().await,
            Precision::Precise => self.get_precise_alt_azm().await,
        }
    }

    /// Goto at the configured precision.
    pub async fn goto(&self, RaDec { ra, dec }: RaDec) -> Result<()> {
        match self.precision {
            Precision::Coarse => self.goto_ra_dec(ra, dec).await,
            Precision::Precise => self.goto_precise_ra_dec(ra, dec).await,
        }
    }

    /// Horizontal goto at the configured precision.
    pub async fn goto_horizontal(&self, AltAzm { alt, azm }: AltAzm) -> Result<()> {
        match self.precision {
            Precision::Coarse => self.goto_alt_azm(alt, azm).await,
            Precision::Precise => self.goto_precise_alt_azm(alt, azm).await,
        }
    }

    /// Sync at the configured precision.
    pub async fn sync(&self, RaDec { ra, dec }: RaDec) -> Result<()> {
        match self.precision {
            Precision::Coarse => self.sync_ra_dec(ra, dec).await,
            Precision::Precise => self.sync_precise_ra_dec(ra, dec).await,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::protocol::DEFAULT_TIMEOUT;
    use async_trait::async_trait;
    use std::io;

    fn simulated(precision: Precision) -> (Mount, Simulator) {
        let simulator = Simulator::default();
        (
            Mount::new(simulator.clone(), DEFAULT_TIMEOUT, precision),
            simulator,
        )
    }

    fn close(a: f64, b: f64, tolerance: f64) -> bool {
        (a - b).abs() <= tolerance
    }

    /// Replies to every command with the same bytes.
    #[derive(Debug)]
    struct Canned {
        reply: &'static [u8],
        pending: bool,
    }

    impl Canned {
        const fn new(reply: &'static [u8]) -> Self {
            Self {
                reply,
                pending: false,
            }
        }
    }

    #[async_trait]
    impl Transport for Canned {
        async fn write(&mut self, _data: &[u8]) -> io::Result<()> {
            self.pending = true;
            Ok(())
        }

        async fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
            if !std::mem::take(&mut self.pending) {
                return futures::future::pending().await;
            }
            buf[..self.reply.len()].copy_from_slice(self.reply);
            Ok(self.reply.len())
        }
    }

    #[tokio::test]
    async fn identifies_mount() -> eyre::Result<()> {
        let (mount, _) = simulated(Precision::Coarse);
        assert_eq!(mount.version().await?, "4.21");
        assert_eq!(mount.model().await?, "Advanced VX");
        assert!(mount.is_align_complete().await?);
        assert_eq!(mount.echo(b'x').await?, b'x');
        Ok(())
    }

    #[tokio::test]
    async fn goto_round_trips_at_both_precisions() -> eyre::Result<()> {
        let (mount, simulator) = simulated(Precision::Coarse);

        // The simulator decodes and re-encodes, so allow two quantization steps.
        mount.goto_ra_dec(5.5, -12.25).await?;
        let coarse = mount.get_ra_dec().await?;
        assert!(close(coarse.ra, 5.5, 2.0 * 24.0 / 65535.0), "{coarse:?}");
        assert!(close(coarse.dec, -12.25, 2.0 * 360.0 / 65535.0), "{coarse:?}");

        mount.goto_precise_ra_dec(18.123_456, 41.269_1).await?;
        let precise = mount.get_precise_ra_dec().await?;
        assert!(close(precise.ra, 18.123_456, 1e-6), "{precise:?}");
        assert!(close(precise.dec, 41.269_1, 1e-6), "{precise:?}");

        let last = simulator.commands().pop().unwrap_or_default();
        assert_eq!(last, b"e");
        Ok(())
    }

    #[tokio::test]
    async fn horizontal_goto_sends_azimuth_first() -> eyre::Result<()> {
        let (mount, simulator) = simulated(Precision::Precise);

        mount.goto_horizontal(AltAzm { alt: 45.0, azm: 180.0 }).await?;
        assert_eq!(
            simulator.commands().last().map(Vec::as_slice),
            Some(&b"b7FFFFFFF,1FFFFFFF"[..])
        );

        let position = mount.alt_azm().await?;
        assert!(close(position.alt, 45.0, 1e-6), "{position:?}");
        assert!(close(position.azm, 180.0, 1e-6), "{position:?}");
        Ok(())
    }

    #[tokio::test]
    async fn sync_uses_goto_scaling() -> eyre::Result<()> {
        let (mount, simulator) = simulated(Precision::Coarse);

        mount.sync(RaDec { ra: 12.0, dec: 90.0 }).await?;
        assert_eq!(
            simulator.commands().last().map(Vec::as_slice),
            Some(&b"S7FFF,3FFF"[..])
        );
        Ok(())
    }

    #[tokio::test]
    async fn tracking_mode_round_trip() -> eyre::Result<()> {
        let (mount, simulator) = simulated(Precision::Coarse);

        mount.set_tracking_mode(TrackingMode::Off).await?;
        assert_eq!(mount.get_tracking_mode().await?, TrackingMode::Off);
        mount.set_tracking_mode(TrackingMode::EqNorth).await?;
        assert_eq!(mount.get_tracking_mode().await?, TrackingMode::EqNorth);
        assert_eq!(simulator.commands()[0], [0x54, 0]);
        Ok(())
    }

    #[tokio::test]
    async fn goto_progress_and_cancel() -> eyre::Result<()> {
        let (mount, _) = simulated(Precision::Coarse);

        assert!(!mount.is_goto_in_progress().await?);
        mount.goto(RaDec { ra: 1.0, dec: 2.0 }).await?;
        assert!(mount.is_goto_in_progress().await?);
        mount.cancel_goto().await?;
        assert!(!mount.is_goto_in_progress().await?);
        Ok(())
    }

    #[tokio::test]
    async fn variable_slew_reaches_the_motor() -> eyre::Result<()> {
        let (mount, simulator) = simulated(Precision::Coarse);

        mount.slew_variable(MountAxis::Altitude, -2.0).await?;
        assert_eq!(simulator.axis_rates(), [0.0, -2.0]);

        assert!(matches!(
            mount.slew_variable(MountAxis::Azimuth, 10.0).await,
            Err(Error::RateOutOfRange { .. })
        ));
        // Nothing was sent for the rejected rate.
        assert_eq!(simulator.commands().len(), 1);
        Ok(())
    }

    #[tokio::test]
    async fn handles_chunked_simulator_output() -> eyre::Result<()> {
        let simulator = Simulator::default().with_chunk_size(1);
        let mount = Mount::new(simulator, DEFAULT_TIMEOUT, Precision::Precise);

        let position = mount.ra_dec().await?;
        assert!(close(position.ra, 0.0, 1e-6), "{position:?}");
        assert!(close(position.dec, 90.0, 1e-6), "{position:?}");
        Ok(())
    }

    #[tokio::test]
    async fn rejects_wrong_response_size() {
        let mount = Mount::new(Canned::new(b"12#"), DEFAULT_TIMEOUT, Precision::Coarse);

        assert!(matches!(
            mount.model().await,
            Err(Error::InvalidResponseSize {
                command: 'm',
                expected: 2,
                actual: 3
            })
        ));
        assert!(matches!(
            mount.get_ra_dec().await,
            Err(Error::InvalidResponseSize { command: 'E', .. })
        ));
        assert!(mount.version().await.is_ok());
    }

    #[tokio::test]
    async fn rejects_undecodable_responses() {
        let mount = Mount::new(Canned::new(b"12G4,0000#"), DEFAULT_TIMEOUT, Precision::Coarse);
        assert!(matches!(
            mount.get_ra_dec().await,
            Err(Error::MalformedResponse { command: 'E', .. })
        ));

        let mount = Mount::new(Canned::new(b"\x09#"), DEFAULT_TIMEOUT, Precision::Coarse);
        assert!(matches!(
            mount.get_tracking_mode().await,
            Err(Error::MalformedResponse { command: 't', .. })
        ));
    }

    #[tokio::test(start_paused = true)]
    async fn passes_protocol_errors_through() {
        let mount = Mount::new(
            Canned::new(b"no terminator"),
            Duration::from_millis(100),
            Precision::Coarse,
        );

        assert!(matches!(
            mount.cancel_goto().await,
            Err(Error::Protocol(crate::protocol::Error::Timeout { elapsed_ms: 100 }))
        ));
    }
}
