use time::OffsetDateTime;

const SECONDS_PER_DAY: f64 = 86_400.0;
/// Julian date of the Unix epoch.
const UNIX_EPOCH_JD: f64 = 2_440_587.5;
/// Julian date of J2000.0.
const J2000_JD: f64 = 2_451_545.0;

/// Greenwich mean sidereal time in hours.
pub(crate) fn greenwich_sidereal_hours(utc: OffsetDateTime) -> f64 {
    let days_since_j2000 = (utc - OffsetDateTime::UNIX_EPOCH).as_seconds_f64() / SECONDS_PER_DAY
        + UNIX_EPOCH_JD
        - J2000_JD;
    24.065_709_824_419_08_f64
        .mul_add(days_since_j2000, 18.697_374_558)
        .rem_euclid(24.0)
}

/// Local mean sidereal time in hours for a site at `longitude` degrees East.
pub(crate) fn local_sidereal_hours(utc: OffsetDateTime, longitude: f64) -> f64 {
    (greenwich_sidereal_hours(utc) + longitude / 15.0).rem_euclid(24.0)
}
