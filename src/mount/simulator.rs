use super::codec::{
    DEGREES_FULL_SCALE, PASS_THROUGH, Precision, RA_FULL_SCALE, SET_TRACKING_MODE, TrackingMode,
    decode_angle, encode_pair, signed_degrees, split_pair,
};
use crate::protocol::{TERMINATOR, Transport};
use async_trait::async_trait;
use parking_lot::Mutex;
use std::collections::VecDeque;
use std::io;
use std::sync::Arc;

#[derive(Debug)]
struct State {
    ra: f64,
    dec: f64,
    alt: f64,
    azm: f64,
    tracking_mode: TrackingMode,
    goto_in_progress: bool,
    axis_rates: [f64; 2],
    commands: VecDeque<Vec<u8>>,
    outbox: VecDeque<u8>,
}

/// In-memory mount answering the NexStar command set.
///
/// Clones share the same state, so a test can keep one clone around to
/// inspect what the driver did with the other.
#[derive(Debug, Clone)]
pub struct Simulator {
    state: Arc<Mutex<State>>,
    chunk_size: usize,
}

impl Default for Simulator {
    fn default() -> Self {
        Self {
            state: Arc::new(Mutex::new(State {
                ra: 0.0,
                dec: 90.0,
                alt: 0.0,
                azm: 0.0,
                tracking_mode: TrackingMode::EqNorth,
                goto_in_progress: false,
                axis_rates: [0.0; 2],
                commands: VecDeque::new(),
                outbox: VecDeque::new(),
            })),
            chunk_size: usize::MAX,
        }
    }
}

/// How many recent commands the simulator remembers.
const COMMAND_HISTORY: usize = 256;

const VERSION: (u8, u8) = (4, 21);
/// Advanced VX.
const MODEL: u8 = 20;

fn framed(mut payload: Vec<u8>) -> Vec<u8> {
    payload.push(TERMINATOR);
    payload
}

fn parse_pair(payload: &[u8], precision: Precision) -> Option<(f64, f64)> {
    let framed = framed(payload.to_vec());
    let (first, second) = split_pair(&framed, precision).ok()?;
    Some((
        decode_angle(first, 1.0, precision).ok()?,
        decode_angle(second, 1.0, precision).ok()?,
    ))
}

const fn precision_of(opcode: u8) -> Precision {
    if opcode.is_ascii_lowercase() {
        Precision::Precise
    } else {
        Precision::Coarse
    }
}

impl State {
    fn respond(&mut self, command: &[u8]) -> Vec<u8> {
        let reply = match *command {
            [b'V'] => vec![VERSION.0, VERSION.1],
            [b'm'] => vec![MODEL],
            [opcode @ (b'E' | b'e')] => encode_pair(
                (self.ra, RA_FULL_SCALE),
                (self.dec, DEGREES_FULL_SCALE),
                precision_of(opcode),
            )
            .into_bytes(),
            [opcode @ (b'Z' | b'z')] => encode_pair(
                (self.azm, DEGREES_FULL_SCALE),
                (self.alt, DEGREES_FULL_SCALE),
                precision_of(opcode),
            )
            .into_bytes(),
            [opcode @ (b'R' | b'r' | b'S' | b's'), ref payload @ ..] => {
                if let Some((ra, dec)) = parse_pair(payload, precision_of(opcode)) {
                    self.ra = ra * RA_FULL_SCALE;
                    self.dec = signed_degrees(dec * DEGREES_FULL_SCALE);
                    self.goto_in_progress = opcode.eq_ignore_ascii_case(&b'R');
                } else {
                    tracing::warn!(command = %command.escape_ascii(), "Ignoring malformed coordinates");
                }
                vec![]
            }
            [opcode @ (b'B' | b'b'), ref payload @ ..] => {
                if let Some((azm, alt)) = parse_pair(payload, precision_of(opcode)) {
                    self.azm = azm * DEGREES_FULL_SCALE;
                    self.alt = signed_degrees(alt * DEGREES_FULL_SCALE);
                    self.goto_in_progress = true;
                } else {
                    tracing::warn!(command = %command.escape_ascii(), "Ignoring malformed coordinates");
                }
                vec![]
            }
            [b't'] => vec![self.tracking_mode.into()],
            [SET_TRACKING_MODE, mode] => {
                match TrackingMode::try_from(mode) {
                    Ok(mode) => self.tracking_mode = mode,
                    Err(err) => tracing::warn!(%err, "Ignoring unknown tracking mode"),
                }
                vec![]
            }
            [b'J'] => vec![1],
            // Gotos complete instantly, but report "in progress" once.
            [b'L'] => vec![if std::mem::take(&mut self.goto_in_progress) {
                b'1'
            } else {
                b'0'
            }],
            [b'M'] => {
                self.goto_in_progress = false;
                self.axis_rates = [0.0; 2];
                vec![]
            }
            [b'K', byte] => vec![byte],
            [PASS_THROUGH, 3, device @ (16 | 17), direction @ (6 | 7), high, low, 0, 0] => {
                let rate = f64::from(u16::from_be_bytes([high, low])) / 4.0 / 3600.0;
                self.axis_rates[usize::from(device - 16)] = if direction == 7 { -rate } else { rate };
                vec![]
            }
            _ => {
                tracing::debug!(command = %command.escape_ascii(), "Acknowledging unknown command");
                vec![]
            }
        };
        framed(reply)
    }
}

impl Simulator {
    /// Deliver responses at most `chunk_size` bytes per read.
    #[must_use]
    pub fn with_chunk_size(mut self, chunk_size: usize) -> Self {
        self.chunk_size = chunk_size.max(1);
        self
    }

    /// Start out in `mode` instead of northern equatorial tracking.
    #[must_use]
    pub fn with_tracking_mode(self, mode: TrackingMode) -> Self {
        self.state.lock().tracking_mode = mode;
        self
    }

    /// Current tracking mode.
    pub fn tracking_mode(&self) -> TrackingMode {
        self.state.lock().tracking_mode
    }

    /// Last variable-slew rate per axis, in degrees per second.
    pub fn axis_rates(&self) -> [f64; 2] {
        self.state.lock().axis_rates
    }

    /// The most recent commands received, oldest first.
    pub fn commands(&self) -> Vec<Vec<u8>> {
        self.state.lock().commands.iter().cloned().collect()
    }
}

#[async_trait]
impl Transport for Simulator {
    async fn write(&mut self, data: &[u8]) -> io::Result<()> {
        let mut state = self.state.lock();
        if state.commands.len() == COMMAND_HISTORY {
            _ = state.commands.pop_front();
        }
        state.commands.push_back(data.to_vec());
        let reply = state.respond(data);
        state.outbox.extend(reply);
        Ok(())
    }

    async fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        let n = {
            let mut state = self.state.lock();
            let n = state.outbox.len().min(buf.len()).min(self.chunk_size);
            for (dst, src) in buf.iter_mut().zip(state.outbox.drain(..n)) {
                *dst = src;
            }
            n
        };
        if n == 0 {
            // Nothing was asked; a real mount would stay silent too.
            return futures::future::pending().await;
        }
        Ok(n)
    }

    fn discard_input(&mut self) -> io::Result<()> {
        self.state.lock().outbox.clear();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mount::Mount;
    use crate::protocol::DEFAULT_TIMEOUT;

    #[tokio::test]
    async fn command_history_is_bounded() -> eyre::Result<()> {
        let simulator = Simulator::default();
        let mount = Mount::new(simulator.clone(), DEFAULT_TIMEOUT, Precision::Coarse);

        for byte in 0..=u8::MAX {
            assert_eq!(mount.echo(byte).await?, byte);
        }
        assert_eq!(mount.version().await?, "4.21");

        let commands = simulator.commands();
        assert_eq!(commands.len(), COMMAND_HISTORY);
        assert_eq!(commands[0], [b'K', 1]);
        assert_eq!(commands[COMMAND_HISTORY - 1], b"V");
        Ok(())
    }

    #[tokio::test]
    async fn reports_preset_tracking_mode() -> eyre::Result<()> {
        let simulator = Simulator::default().with_tracking_mode(TrackingMode::EqSouth);
        let mount = Mount::new(simulator.clone(), DEFAULT_TIMEOUT, Precision::Coarse);

        assert_eq!(mount.get_tracking_mode().await?, TrackingMode::EqSouth);
        assert_eq!(simulator.tracking_mode(), TrackingMode::EqSouth);
        Ok(())
    }
}
