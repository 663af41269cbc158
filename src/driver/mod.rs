//! Alpaca [`Telescope`] backed by a NexStar [`Mount`].
//!
//! Properties the mount can't report are kept in per-property cells.
//! A cell changes only after the mount accepted the corresponding command,
//! so a failed call never leaves a half-updated state behind.

mod astro;
mod cell;

use crate::api::{
    AlignmentMode, AxisRate, Device, DriveRate, EquatorialCoordinateType, GuideDirection,
    PierSide, Telescope, UtcDate,
};
use crate::mount::{AltAzm, Mount, MountAxis, RaDec, TrackingMode, VariableSlew};
use crate::{ASCOMError, ASCOMResult};
use async_trait::async_trait;
use cell::StateCell;
use std::fmt::Debug;
use std::ops::RangeBounds;

const NAME: &str = "Telescope";
const UNIQUE_ID: &str = "fb9472c8-6217-4140-9ebe-67d9ca0754c1";

/// 361 degrees per 86400 seconds.
const SIDEREAL_RATE: f64 = 361.0 / 86_400.0;

const AXIS_RATES: [AxisRate; 9] = [
    AxisRate::fixed(2.0 * SIDEREAL_RATE),
    AxisRate::fixed(4.0 * SIDEREAL_RATE),
    AxisRate::fixed(8.0 * SIDEREAL_RATE),
    AxisRate::fixed(16.0 * SIDEREAL_RATE),
    AxisRate::fixed(32.0 * SIDEREAL_RATE),
    AxisRate::fixed(0.3),
    AxisRate::fixed(1.0),
    AxisRate::fixed(2.0),
    AxisRate::fixed(4.0),
];

fn ensure_within(
    name: &str,
    value: f64,
    range: impl RangeBounds<f64> + Debug,
) -> ASCOMResult<f64> {
    if range.contains(&value) {
        Ok(value)
    } else {
        Err(ASCOMError::invalid_value(format_args!(
            "{name} {value} is outside of {range:?}"
        )))
    }
}

fn ensure_finite(name: &str, value: f64) -> ASCOMResult<f64> {
    ensure_within(name, value, f64::MIN..=f64::MAX)
}

fn ensure_ra_dec(ra: f64, dec: f64) -> ASCOMResult<RaDec> {
    Ok(RaDec {
        ra: ensure_within("RightAscension", ra, 0.0..24.0)?,
        dec: ensure_within("Declination", dec, -90.0..=90.0)?,
    })
}

fn ensure_alt_azm(azimuth: f64, altitude: f64) -> ASCOMResult<AltAzm> {
    Ok(AltAzm {
        alt: ensure_within("Altitude", altitude, -90.0..=90.0)?,
        azm: ensure_within("Azimuth", azimuth, 0.0..360.0)?,
    })
}

/// NexStar mount exposed as an Alpaca telescope.
#[derive(Debug)]
pub struct NexStarTelescope {
    mount: Mount,

    connected: StateCell<bool>,
    slewing: StateCell<bool>,
    is_pulse_guiding: StateCell<bool>,
    /// `None` until first read from the mount.
    tracking: StateCell<Option<bool>>,

    right_ascension_rate: StateCell<f64>,
    declination_rate: StateCell<f64>,
    does_refraction: StateCell<bool>,
    guide_rate_declination: StateCell<f64>,
    guide_rate_right_ascension: StateCell<f64>,
    side_of_pier: StateCell<PierSide>,
    destination_side_of_pier: StateCell<PierSide>,
    site_elevation: StateCell<f64>,
    site_latitude: StateCell<f64>,
    site_longitude: StateCell<f64>,
    slew_settle_time: StateCell<i32>,
    target_declination: StateCell<f64>,
    target_right_ascension: StateCell<f64>,
    tracking_rate: StateCell<DriveRate>,
    /// Client-set UTC minus system UTC.
    clock_offset: StateCell<time::Duration>,

    /// Refreshed together with right ascension.
    declination: StateCell<f64>,
    /// Refreshed together with altitude.
    azimuth: StateCell<f64>,
}

impl NexStarTelescope {
    /// Wrap `mount`. Nothing is sent to it until the first request.
    pub fn new(mount: Mount) -> Self {
        Self {
            mount,
            connected: StateCell::new(false),
            slewing: StateCell::new(false),
            is_pulse_guiding: StateCell::new(false),
            tracking: StateCell::new(None),
            right_ascension_rate: StateCell::default(),
            declination_rate: StateCell::default(),
            does_refraction: StateCell::new(false),
            guide_rate_declination: StateCell::default(),
            guide_rate_right_ascension: StateCell::default(),
            side_of_pier: StateCell::new(PierSide::East),
            destination_side_of_pier: StateCell::new(PierSide::East),
            site_elevation: StateCell::default(),
            site_latitude: StateCell::default(),
            site_longitude: StateCell::default(),
            slew_settle_time: StateCell::default(),
            target_declination: StateCell::default(),
            target_right_ascension: StateCell::default(),
            tracking_rate: StateCell::default(),
            clock_offset: StateCell::new(time::Duration::ZERO),
            declination: StateCell::default(),
            azimuth: StateCell::default(),
        }
    }

    fn utc_now(&self) -> time::OffsetDateTime {
        time::OffsetDateTime::now_utc() + self.clock_offset.get()
    }

    fn target(&self) -> ASCOMResult<RaDec> {
        ensure_ra_dec(
            self.target_right_ascension.get(),
            self.target_declination.get(),
        )
    }

    async fn goto(&self, target: RaDec) -> ASCOMResult<()> {
        tracing::debug!(?target, "Slewing to equatorial coordinates");
        self.mount.goto(target).await?;
        Ok(())
    }

    async fn sync(&self, target: RaDec) -> ASCOMResult<()> {
        tracing::debug!(?target, "Syncing to equatorial coordinates");
        self.mount.sync(target).await?;
        Ok(())
    }

    async fn goto_horizontal(&self, target: AltAzm) -> ASCOMResult<()> {
        tracing::debug!(?target, "Slewing to horizontal coordinates");
        self.mount.goto_horizontal(target).await?;
        Ok(())
    }
}

#[async_trait]
impl Device for NexStarTelescope {
    fn static_name(&self) -> &str {
        NAME
    }

    fn unique_id(&self) -> &str {
        UNIQUE_ID
    }

    async fn device_name(&self) -> String {
        match self.mount.model().await {
            Ok(model) => model.to_owned(),
            Err(err) => {
                tracing::warn!(%err, "Couldn't query the mount model");
                NAME.to_owned()
            }
        }
    }

    async fn connected(&self) -> ASCOMResult<bool> {
        Ok(self.connected.get())
    }

    async fn set_connected(&self, connected: bool) -> ASCOMResult<()> {
        self.connected.set(connected);
        Ok(())
    }

    async fn description(&self) -> ASCOMResult<String> {
        Ok(NAME.to_owned())
    }

    async fn driver_info(&self) -> ASCOMResult<String> {
        Ok(NAME.to_owned())
    }

    async fn driver_version(&self) -> ASCOMResult<String> {
        Ok(concat!(env!("CARGO_PKG_VERSION_MAJOR"), ".", env!("CARGO_PKG_VERSION_MINOR")).to_owned())
    }
}

#[async_trait]
impl Telescope for NexStarTelescope {
    async fn alignment_mode(&self) -> ASCOMResult<AlignmentMode> {
        Ok(AlignmentMode::GermanPolar)
    }

    async fn altitude(&self) -> ASCOMResult<f64> {
        let AltAzm { alt, azm } = self.mount.alt_azm().await?;
        self.azimuth.set(azm);
        Ok(alt)
    }

    async fn aperture_area(&self) -> ASCOMResult<f64> {
        Ok(0.0)
    }

    async fn aperture_diameter(&self) -> ASCOMResult<f64> {
        Ok(0.0)
    }

    async fn at_home(&self) -> ASCOMResult<bool> {
        Ok(false)
    }

    async fn at_park(&self) -> ASCOMResult<bool> {
        Ok(false)
    }

    async fn azimuth(&self) -> ASCOMResult<f64> {
        Ok(self.azimuth.get())
    }

    async fn can_move_axis(&self, _axis: i32) -> ASCOMResult<bool> {
        Ok(true)
    }

    async fn can_set_declination_rate(&self) -> ASCOMResult<bool> {
        Ok(true)
    }

    async fn can_set_park(&self) -> ASCOMResult<bool> {
        Ok(true)
    }

    async fn can_set_right_ascension_rate(&self) -> ASCOMResult<bool> {
        Ok(true)
    }

    async fn can_set_tracking(&self) -> ASCOMResult<bool> {
        Ok(true)
    }

    async fn can_slew_alt_az_async(&self) -> ASCOMResult<bool> {
        Ok(true)
    }

    async fn can_slew_async(&self) -> ASCOMResult<bool> {
        Ok(true)
    }

    async fn can_sync(&self) -> ASCOMResult<bool> {
        Ok(true)
    }

    async fn can_sync_alt_az(&self) -> ASCOMResult<bool> {
        Ok(true)
    }

    async fn declination(&self) -> ASCOMResult<f64> {
        Ok(self.declination.get())
    }

    async fn declination_rate(&self) -> ASCOMResult<f64> {
        Ok(self.declination_rate.get())
    }

    async fn set_declination_rate(&self, declination_rate: f64) -> ASCOMResult<()> {
        self.declination_rate
            .set(ensure_finite("DeclinationRate", declination_rate)?);
        Ok(())
    }

    async fn does_refraction(&self) -> ASCOMResult<bool> {
        Ok(self.does_refraction.get())
    }

    async fn set_does_refraction(&self, does_refraction: bool) -> ASCOMResult<()> {
        self.does_refraction.set(does_refraction);
        Ok(())
    }

    async fn equatorial_system(&self) -> ASCOMResult<EquatorialCoordinateType> {
        Ok(EquatorialCoordinateType::Topocentric)
    }

    async fn focal_length(&self) -> ASCOMResult<f64> {
        Ok(0.0)
    }

    async fn guide_rate_declination(&self) -> ASCOMResult<f64> {
        Ok(self.guide_rate_declination.get())
    }

    async fn set_guide_rate_declination(&self, guide_rate_declination: f64) -> ASCOMResult<()> {
        self.guide_rate_declination.set(ensure_within(
            "GuideRateDeclination",
            guide_rate_declination,
            0.0..=f64::MAX,
        )?);
        Ok(())
    }

    async fn guide_rate_right_ascension(&self) -> ASCOMResult<f64> {
        Ok(self.guide_rate_right_ascension.get())
    }

    async fn set_guide_rate_right_ascension(
        &self,
        guide_rate_right_ascension: f64,
    ) -> ASCOMResult<()> {
        self.guide_rate_right_ascension.set(ensure_within(
            "GuideRateRightAscension",
            guide_rate_right_ascension,
            0.0..=f64::MAX,
        )?);
        Ok(())
    }

    async fn is_pulse_guiding(&self) -> ASCOMResult<bool> {
        Ok(self.is_pulse_guiding.get())
    }

    async fn right_ascension(&self) -> ASCOMResult<f64> {
        let RaDec { ra, dec } = self.mount.ra_dec().await?;
        self.declination.set(dec);
        Ok(ra)
    }

    async fn right_ascension_rate(&self) -> ASCOMResult<f64> {
        Ok(self.right_ascension_rate.get())
    }

    async fn set_right_ascension_rate(&self, right_ascension_rate: f64) -> ASCOMResult<()> {
        self.right_ascension_rate
            .set(ensure_finite("RightAscensionRate", right_ascension_rate)?);
        Ok(())
    }

    async fn side_of_pier(&self) -> ASCOMResult<PierSide> {
        Ok(self.side_of_pier.get())
    }

    async fn set_side_of_pier(&self, side_of_pier: PierSide) -> ASCOMResult<()> {
        self.side_of_pier.set(side_of_pier);
        Ok(())
    }

    async fn sidereal_time(&self) -> ASCOMResult<f64> {
        Ok(astro::local_sidereal_hours(
            self.utc_now(),
            self.site_longitude.get(),
        ))
    }

    async fn site_elevation(&self) -> ASCOMResult<f64> {
        Ok(self.site_elevation.get())
    }

    async fn set_site_elevation(&self, site_elevation: f64) -> ASCOMResult<()> {
        self.site_elevation.set(ensure_within(
            "SiteElevation",
            site_elevation,
            -300.0..=10_000.0,
        )?);
        Ok(())
    }

    async fn site_latitude(&self) -> ASCOMResult<f64> {
        Ok(self.site_latitude.get())
    }

    async fn set_site_latitude(&self, site_latitude: f64) -> ASCOMResult<()> {
        self.site_latitude
            .set(ensure_within("SiteLatitude", site_latitude, -90.0..=90.0)?);
        Ok(())
    }

    async fn site_longitude(&self) -> ASCOMResult<f64> {
        Ok(self.site_longitude.get())
    }

    async fn set_site_longitude(&self, site_longitude: f64) -> ASCOMResult<()> {
        self.site_longitude.set(ensure_within(
            "SiteLongitude",
            site_longitude,
            -180.0..=180.0,
        )?);
        Ok(())
    }

    async fn slewing(&self) -> ASCOMResult<bool> {
        Ok(self.slewing.get())
    }

    async fn slew_settle_time(&self) -> ASCOMResult<i32> {
        Ok(self.slew_settle_time.get())
    }

    async fn set_slew_settle_time(&self, slew_settle_time: i32) -> ASCOMResult<()> {
        if slew_settle_time < 0 {
            return Err(ASCOMError::invalid_value(format_args!(
                "SlewSettleTime {slew_settle_time} is negative"
            )));
        }
        self.slew_settle_time.set(slew_settle_time);
        Ok(())
    }

    async fn target_declination(&self) -> ASCOMResult<f64> {
        Ok(self.target_declination.get())
    }

    async fn set_target_declination(&self, target_declination: f64) -> ASCOMResult<()> {
        self.target_declination.set(ensure_within(
            "TargetDeclination",
            target_declination,
            -90.0..=90.0,
        )?);
        Ok(())
    }

    async fn target_right_ascension(&self) -> ASCOMResult<f64> {
        Ok(self.target_right_ascension.get())
    }

    async fn set_target_right_ascension(&self, target_right_ascension: f64) -> ASCOMResult<()> {
        self.target_right_ascension.set(ensure_within(
            "TargetRightAscension",
            target_right_ascension,
            0.0..24.0,
        )?);
        Ok(())
    }

    async fn tracking(&self) -> ASCOMResult<bool> {
        if let Some(tracking) = self.tracking.get() {
            return Ok(tracking);
        }
        let tracking = self.mount.get_tracking_mode().await? != TrackingMode::Off;
        self.tracking.set(Some(tracking));
        Ok(tracking)
    }

    async fn set_tracking(&self, tracking: bool) -> ASCOMResult<()> {
        let mode = if tracking {
            TrackingMode::EqNorth
        } else {
            TrackingMode::Off
        };
        self.mount.set_tracking_mode(mode).await?;
        self.tracking.set(Some(tracking));
        Ok(())
    }

    async fn tracking_rate(&self) -> ASCOMResult<DriveRate> {
        Ok(self.tracking_rate.get())
    }

    async fn set_tracking_rate(&self, tracking_rate: DriveRate) -> ASCOMResult<()> {
        self.tracking_rate.set(tracking_rate);
        Ok(())
    }

    async fn utc_date(&self) -> ASCOMResult<UtcDate> {
        Ok(UtcDate(self.utc_now()))
    }

    async fn set_utc_date(&self, utc_date: UtcDate) -> ASCOMResult<()> {
        self.clock_offset
            .set(utc_date.0 - time::OffsetDateTime::now_utc());
        Ok(())
    }

    async fn abort_slew(&self) -> ASCOMResult<()> {
        self.slewing.set(false);
        self.tracking.set(Some(true));
        if let Err(err) = self.mount.cancel_goto().await {
            tracing::warn!(%err, "Couldn't cancel goto on the mount");
        }
        Ok(())
    }

    async fn axis_rates(&self, _axis: i32) -> ASCOMResult<Vec<AxisRate>> {
        Ok(AXIS_RATES.to_vec())
    }

    async fn destination_side_of_pier(
        &self,
        right_ascension: f64,
        declination: f64,
    ) -> ASCOMResult<PierSide> {
        _ = ensure_ra_dec(right_ascension, declination)?;
        Ok(self.destination_side_of_pier.get())
    }

    async fn find_home(&self) -> ASCOMResult<()> {
        Ok(())
    }

    async fn move_axis(&self, axis: i32, rate: f64) -> ASCOMResult<()> {
        // Only the two motor axes move; other axis numbers are accepted and ignored.
        let axis = MountAxis::try_from(axis).ok();
        match axis {
            Some(axis) => _ = VariableSlew::new(axis, rate)?,
            None => _ = ensure_finite("Rate", rate)?,
        }

        let moving = rate != 0.0;
        if moving {
            self.mount.set_tracking_mode(TrackingMode::Off).await?;
        }
        if let Some(axis) = axis {
            self.mount.slew_variable(axis, rate).await?;
        }
        if !moving {
            self.mount.set_tracking_mode(TrackingMode::EqNorth).await?;
        }

        self.slewing.set(moving);
        self.tracking.set(Some(!moving));
        Ok(())
    }

    async fn park(&self) -> ASCOMResult<()> {
        Ok(())
    }

    async fn pulse_guide(&self, direction: GuideDirection, duration: i32) -> ASCOMResult<()> {
        if duration < 0 {
            return Err(ASCOMError::invalid_value(format_args!(
                "Duration {duration} is negative"
            )));
        }
        tracing::debug!(?direction, duration, "Pulse guiding isn't supported by the mount");
        self.is_pulse_guiding.set(false);
        Ok(())
    }

    async fn set_park(&self) -> ASCOMResult<()> {
        Ok(())
    }

    async fn slew_to_alt_az(&self, azimuth: f64, altitude: f64) -> ASCOMResult<()> {
        self.goto_horizontal(ensure_alt_azm(azimuth, altitude)?).await
    }

    async fn slew_to_alt_az_async(&self, azimuth: f64, altitude: f64) -> ASCOMResult<()> {
        self.goto_horizontal(ensure_alt_azm(azimuth, altitude)?).await
    }

    async fn slew_to_coordinates(&self, right_ascension: f64, declination: f64) -> ASCOMResult<()> {
        self.goto(ensure_ra_dec(right_ascension, declination)?).await
    }

    async fn slew_to_coordinates_async(
        &self,
        right_ascension: f64,
        declination: f64,
    ) -> ASCOMResult<()> {
        self.goto(ensure_ra_dec(right_ascension, declination)?).await
    }

    async fn slew_to_target(&self) -> ASCOMResult<()> {
        self.goto(self.target()?).await
    }

    async fn slew_to_target_async(&self) -> ASCOMResult<()> {
        self.goto(self.target()?).await
    }

    async fn sync_to_alt_az(&self, azimuth: f64, altitude: f64) -> ASCOMResult<()> {
        let target = ensure_alt_azm(azimuth, altitude)?;
        // The hand controller has no horizontal sync command.
        tracing::debug!(?target, "Ignoring horizontal sync");
        Ok(())
    }

    async fn sync_to_coordinates(&self, right_ascension: f64, declination: f64) -> ASCOMResult<()> {
        self.sync(ensure_ra_dec(right_ascension, declination)?).await
    }

    async fn sync_to_target(&self) -> ASCOMResult<()> {
        self.sync(self.target()?).await
    }

    async fn unpark(&self) -> ASCOMResult<()> {
        Ok(())
    }
}
