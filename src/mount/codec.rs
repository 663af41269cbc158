//! Wire encoding for NexStar commands and responses.
//!
//! Angles travel as fractions of a full turn packed into fixed-width
//! uppercase hex. Right ascension uses 24 hours as a full turn, everything
//! else 360 degrees.

use super::Error;
use num_enum::{IntoPrimitive, TryFromPrimitive};
use serde_repr::{Deserialize_repr, Serialize_repr};

/// Full turn of right ascension, in hours.
pub const RA_FULL_SCALE: f64 = 24.0;
/// Full turn of declination, altitude or azimuth, in degrees.
pub const DEGREES_FULL_SCALE: f64 = 360.0;

/// Coordinate resolution used on the wire.
#[derive(Debug, Default, PartialEq, Eq, Clone, Copy)]
pub enum Precision {
    /// 16-bit angles, 4 hex digits each.
    #[default]
    Coarse,
    /// 32-bit angles, 8 hex digits each.
    Precise,
}

impl Precision {
    /// Number of hex digits per angle.
    pub const fn digits(self) -> usize {
        match self {
            Self::Coarse => 4,
            Self::Precise => 8,
        }
    }

    /// Value that represents a full turn.
    pub const fn full_scale(self) -> u32 {
        match self {
            Self::Coarse => 0xFFFF,
            Self::Precise => 0xFFFF_FFFF,
        }
    }

    /// Size of a `AAAA,BBBB#` pair response at this precision.
    pub const fn pair_response_len(self) -> usize {
        self.digits() * 2 + 2
    }
}

/// Encode `value` (in units where `divisor` is a full turn) as hex digits.
///
/// Values outside of one turn are wrapped, so `-10` degrees encodes as `350`.
#[expect(
    clippy::as_conversions,
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss
)]
pub fn encode_angle(value: f64, divisor: f64, precision: Precision) -> String {
    let fraction = value.rem_euclid(divisor) / divisor;
    let raw = (fraction * f64::from(precision.full_scale())).trunc() as u32;
    format!("{raw:0width$X}", width = precision.digits())
}

/// Decode hex digits into a value in `[0, multiplier)`.
pub fn decode_angle(hex: &[u8], multiplier: f64, precision: Precision) -> Result<f64, String> {
    if hex.len() != precision.digits() {
        return Err(format!(
            "expected {} hex digits, got {}",
            precision.digits(),
            hex.len()
        ));
    }
    let text = std::str::from_utf8(hex).map_err(|err| err.to_string())?;
    let raw = u32::from_str_radix(text, 16).map_err(|err| format!("{text:?}: {err}"))?;
    Ok(f64::from(raw) / f64::from(precision.full_scale()) * multiplier)
}

/// Encode a pair of angles as the `AAAA,BBBB` goto/sync payload.
pub fn encode_pair(
    (first, first_divisor): (f64, f64),
    (second, second_divisor): (f64, f64),
    precision: Precision,
) -> String {
    format!(
        "{},{}",
        encode_angle(first, first_divisor, precision),
        encode_angle(second, second_divisor, precision)
    )
}

/// Split an `AAAA,BBBB#` response into its two raw hex fields.
pub fn split_pair(response: &[u8], precision: Precision) -> Result<(&[u8], &[u8]), String> {
    let digits = precision.digits();
    if response.len() != precision.pair_response_len() {
        return Err(format!("unexpected length {}", response.len()));
    }
    if response[digits] != b',' {
        return Err("missing field separator".to_owned());
    }
    Ok((&response[..digits], &response[digits + 1..digits * 2 + 1]))
}

/// Wrap a decoded angle in `[0, 360)` into `(-180, 180]`.
///
/// Declination and altitude are signed, but the mount reports them as a
/// fraction of a full turn.
pub fn signed_degrees(degrees: f64) -> f64 {
    if degrees > 180.0 {
        degrees - DEGREES_FULL_SCALE
    } else {
        degrees
    }
}

/// Mount tracking mode as understood by the `t` / `T` commands.
#[derive(
    Debug,
    PartialEq,
    Eq,
    Clone,
    Copy,
    Serialize_repr,
    Deserialize_repr,
    TryFromPrimitive,
    IntoPrimitive,
)]
#[repr(u8)]
pub enum TrackingMode {
    /// Not tracking.
    Off = 0,
    /// Alt-azimuth tracking.
    AltAzm = 1,
    /// Equatorial tracking, northern hemisphere.
    EqNorth = 2,
    /// Equatorial tracking, southern hemisphere.
    EqSouth = 3,
}

/// Motor axis addressed by a variable-rate slew.
#[derive(Debug, PartialEq, Eq, Clone, Copy, TryFromPrimitive, IntoPrimitive)]
#[repr(i32)]
pub enum MountAxis {
    /// Azimuth / right ascension motor.
    Azimuth = 0,
    /// Altitude / declination motor.
    Altitude = 1,
}

impl MountAxis {
    /// Motor controller address used in pass-through commands.
    pub const fn device_id(self) -> u8 {
        match self {
            Self::Azimuth => 16,
            Self::Altitude => 17,
        }
    }
}

/// Opcode of the pass-through command frame.
pub const PASS_THROUGH: u8 = 0x50;
/// Opcode for setting the tracking mode.
pub const SET_TRACKING_MODE: u8 = 0x54;

const POSITIVE_VARIABLE_SLEW: u8 = 6;
const NEGATIVE_VARIABLE_SLEW: u8 = 7;

/// A validated variable-rate slew frame.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub struct VariableSlew {
    axis: MountAxis,
    negative: bool,
    ticks: u16,
}

impl VariableSlew {
    /// Build a slew at `rate` degrees per second.
    ///
    /// The rate is sent as quarter-arcseconds per second, rounded to the
    /// nearest tick. A zero rate stops the axis.
    #[expect(
        clippy::as_conversions,
        clippy::cast_possible_truncation,
        clippy::cast_sign_loss
    )]
    pub fn new(axis: MountAxis, rate: f64) -> Result<Self, Error> {
        let ticks = (rate * 3600.0).abs() * 4.0;
        let ticks = ticks.round();
        if !ticks.is_finite() || ticks > f64::from(u16::MAX) {
            return Err(Error::RateOutOfRange { rate });
        }
        Ok(Self {
            axis,
            negative: rate < 0.0,
            ticks: ticks as u16,
        })
    }

    /// Pass-through command bytes.
    pub fn to_bytes(self) -> [u8; 8] {
        let [high, low] = self.ticks.to_be_bytes();
        [
            PASS_THROUGH,
            3,
            self.axis.device_id(),
            if self.negative {
                NEGATIVE_VARIABLE_SLEW
            } else {
                POSITIVE_VARIABLE_SLEW
            },
            high,
            low,
            0,
            0,
        ]
    }
}

/// Human-readable name for a model code returned by `m`.
pub const fn model_name(code: u8) -> &'static str {
    match code {
        1 => "GPS Series",
        3 => "i-Series",
        4 => "i-Series SE",
        5 => "CGE",
        6 => "Advanced GT",
        7 => "SLT",
        9 => "CPC",
        10 => "GT",
        11 => "4/5 SE",
        12 => "6/8 SE",
        13 => "GCE Pro",
        14 => "CGEM DX",
        15 => "LCM",
        16 => "Sky Prodigy",
        17 => "CPC Deluxe",
        18 => "GT 16",
        19 => "StarSeeker",
        20 => "Advanced VX",
        21 => "Cosmos",
        22 => "Evolution",
        23 => "CGX",
        24 => "CGXL",
        25 => "Astrofi",
        26 => "SkyWatcher",
        _ => "Unknown model",
    }
}
