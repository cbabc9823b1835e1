use hifitime::{Epoch, TimeScale, Unit};

use crate::constants::{MetSeconds, Radian, DAYS_PER_JULIAN_CENTURY, DPI, SECONDS_PER_DAY, T2000};

/// Absolute instant of January 1st, 00:00:00 UTC of the given calendar year.
///
/// This is the internal time origin of an MCC ephemeris table: every raw time
/// offset in the file counts seconds from this instant.
pub fn year_start_utc(year: i32) -> Epoch {
    Epoch::from_gregorian_utc_at_midnight(year, 1, 1)
}

/// Elapsed seconds from `met0` to `epoch`.
///
/// The difference is taken on the continuous (TAI) time line, so leap seconds
/// inserted between the two instants are counted.
pub fn met_of_epoch(epoch: Epoch, met0: Epoch) -> MetSeconds {
    (epoch.to_time_scale(TimeScale::TAI) - met0.to_time_scale(TimeScale::TAI)).to_seconds()
}

/// Absolute instant reached `met` elapsed SI seconds after `met0`.
///
/// The instant is returned in TAI. A UTC representation is ambiguous during a
/// leap second and would not round-trip through [`met_of_epoch`].
pub fn epoch_of_met(met: MetSeconds, met0: Epoch) -> Epoch {
    met0.to_time_scale(TimeScale::TAI) + met * Unit::Second
}

/// Compute the Greenwich Mean Sidereal Time (GMST) in radians
/// for a given Modified Julian Date (UT1 time scale).
///
/// IAU 1982 expression: a cubic polynomial gives GMST at 0h UT1 for the
/// integer part of the date, the fraction of the day is then scaled by the
/// ratio of the sidereal to the solar day.
///
/// # Arguments
/// * `tjm` - Modified Julian Date (MJD, UT1 time scale)
///
/// # Returns
/// * GMST angle in radians, normalized to the interval [0, 2π).
pub fn gmst(tjm: f64) -> Radian {
    // Polynomial coefficients for GMST at 0h UT1 (in seconds)
    const C0: f64 = 24110.54841;
    const C1: f64 = 8640184.812866;
    const C2: f64 = 9.3104e-2;
    const C3: f64 = -6.2e-6;

    // Ratio of sidereal day to solar day
    const RAP: f64 = 1.00273790934;

    let itjm = tjm.floor();
    let t = (itjm - T2000) / DAYS_PER_JULIAN_CENTURY;

    let gmst0 = (((C3 * t + C2) * t + C1) * t + C0) * DPI / SECONDS_PER_DAY;
    let h = (tjm - itjm) * DPI;

    (gmst0 + h * RAP).rem_euclid(DPI)
}
