//! # Inertial → Earth-fixed → geodetic transform
//!
//! The trajectory interpolator produces positions in the celestial (ECI) frame; what the
//! caller wants are geodetic coordinates. The step between the two is isolated behind the
//! [`FrameTransform`] trait so that the interpolation core only deals with splines and
//! time offsets, and any Earth-orientation model can be plugged in.
//!
//! ## Default model
//!
//! [`EquinoxFrameTransform`] applies the classical equinox-based reduction
//!
//! ```text
//! r_pef = R3(GAST) · N(t_TT) · P(t_TT) · r_eci
//! ```
//!
//! (see [`celestial_to_terrestrial`]) and converts the result to WGS84 latitude,
//! longitude and height with [`ecef_to_geodetic`]. Polar motion is neglected, so the
//! pseudo Earth-fixed frame is taken as Earth-fixed.
//!
//! The Earth rotation angle needs UT1. Three sources are supported:
//!
//! - a [`hifitime::ut1::Ut1Provider`] (EOP table), see [`EquinoxFrameTransform::with_ut1_provider`];
//! - a fixed `UT1 − UTC` offset, see [`EquinoxFrameTransform::with_dut1`];
//! - nothing, in which case UT1 is approximated by UTC (|UT1 − UTC| < 0.9 s, i.e. less
//!   than ~0.004° of longitude).
use hifitime::{ut1::Ut1Provider, Duration, Epoch};
use nalgebra::Vector3;
use tracing::warn;

use crate::{
    constants::{Meter, MJD, SECONDS_PER_DAY},
    geodetic::{ecef_to_geodetic, GeodeticPosition},
    ref_system::celestial_to_terrestrial,
};

/// Conversion of an inertial position at a given instant into geodetic coordinates.
///
/// Implementations must be pure functions of `(position, instant)`: the interpolator
/// relies on it to guarantee deterministic queries and to cache the ground track.
pub trait FrameTransform: Send + Sync {
    /// Geodetic coordinates of the ECI `position` (meters) at the absolute `instant`.
    fn geodetic_of(&self, position: &Vector3<Meter>, instant: &Epoch) -> GeodeticPosition;
}

enum Ut1Source {
    Utc,
    FixedOffset(Duration),
    Provider(Box<Ut1Provider>),
}

/// IAU 1976/1980 equinox-based celestial → terrestrial transform, followed by the WGS84
/// geodetic conversion.
pub struct EquinoxFrameTransform {
    ut1: Ut1Source,
}

impl Default for EquinoxFrameTransform {
    fn default() -> Self {
        warn!("No UT1 source configured, Earth rotation will use UTC as UT1");
        EquinoxFrameTransform {
            ut1: Ut1Source::Utc,
        }
    }
}

impl EquinoxFrameTransform {
    /// Use the Earth orientation table of `provider` to obtain UT1.
    pub fn with_ut1_provider(provider: Ut1Provider) -> Self {
        EquinoxFrameTransform {
            ut1: Ut1Source::Provider(Box::new(provider)),
        }
    }

    /// Use a constant `UT1 − UTC` offset, as published in IERS Bulletin A for a given day.
    pub fn with_dut1(dut1: Duration) -> Self {
        EquinoxFrameTransform {
            ut1: Ut1Source::FixedOffset(dut1),
        }
    }

    fn mjd_ut1(&self, instant: &Epoch) -> MJD {
        match &self.ut1 {
            Ut1Source::Utc => instant.to_mjd_utc_days(),
            Ut1Source::FixedOffset(dut1) => {
                instant.to_mjd_utc_days() + dut1.to_seconds() / SECONDS_PER_DAY
            }
            Ut1Source::Provider(provider) => instant.to_ut1(provider).to_mjd_tai_days(),
        }
    }

    /// Position in the pseudo Earth-fixed frame of date.
    ///
    /// Arguments
    /// ---------
    /// * `position`: ECI position (GCRS ≈ J2000 mean equator), any length unit.
    /// * `instant`: absolute instant of the position.
    ///
    /// Return
    /// ------
    /// * The same vector expressed in the Earth-fixed frame, same unit as the input.
    pub fn to_earth_fixed(&self, position: &Vector3<f64>, instant: &Epoch) -> Vector3<f64> {
        let rotation = celestial_to_terrestrial(instant.to_mjd_tt_days(), self.mjd_ut1(instant));
        rotation * position
    }
}

impl FrameTransform for EquinoxFrameTransform {
    fn geodetic_of(&self, position: &Vector3<Meter>, instant: &Epoch) -> GeodeticPosition {
        ecef_to_geodetic(&self.to_earth_fixed(position, instant))
    }
}

#[cfg(test)]
mod frame_transform_test {
    use super::*;
    use approx::assert_relative_eq;
    use hifitime::Unit;

    /// Vallado, *Fundamentals of Astrodynamics*, example 3-15 (IAU-76/FK5 reduction).
    #[test]
    fn test_vallado_gcrf_to_pef() {
        let instant = Epoch::from_gregorian_utc(2004, 4, 6, 7, 51, 28, 386_009_000);
        let transform = EquinoxFrameTransform::with_dut1(-0.4399619 * Unit::Second);

        let r_gcrf = Vector3::new(5102.508958, 6123.011401, 6378.136928) * 1e3;
        let r_pef = transform.to_earth_fixed(&r_gcrf, &instant);

        let expected = Vector3::new(-1033.4750313, 7901.3055856, 6380.3445328) * 1e3;
        assert!(
            (r_pef - expected).norm() < 20.0,
            "PEF position off by {} m",
            (r_pef - expected).norm()
        );
    }

    #[test]
    fn test_rotation_preserves_norm() {
        let instant = Epoch::from_gregorian_utc_at_midnight(2020, 4, 9);
        let transform = EquinoxFrameTransform::default();
        let r = Vector3::new(5_415_310.82, 3_970_730.25, 922_415.93);
        assert_relative_eq!(
            transform.to_earth_fixed(&r, &instant).norm(),
            r.norm(),
            max_relative = 1e-14
        );
    }

    #[test]
    fn test_fixed_inertial_point_drifts_west_at_sidereal_rate() {
        let transform = EquinoxFrameTransform::default();
        let r = Vector3::new(6_778_137.0, 0.0, 0.0);
        let t0 = Epoch::from_gregorian_utc_at_midnight(2020, 4, 9);
        let t1 = t0 + 1.0 * Unit::Hour;

        let lon0 = transform.geodetic_of(&r, &t0).longitude;
        let lon1 = transform.geodetic_of(&r, &t1).longitude;

        // 360° per sidereal day, i.e. ~15.041° per solar hour
        let drift = (lon0 - lon1).rem_euclid(360.0);
        assert_relative_eq!(drift, 15.041_07, epsilon = 1e-3);
    }

    #[test]
    fn test_dut1_shifts_longitude() {
        let r = Vector3::new(6_778_137.0, 0.0, 0.0);
        let t = Epoch::from_gregorian_utc_at_midnight(2020, 4, 9);

        let utc = EquinoxFrameTransform::default().geodetic_of(&r, &t);
        let shifted = EquinoxFrameTransform::with_dut1(0.5 * Unit::Second).geodetic_of(&r, &t);

        // 0.5 s of Earth rotation is ~0.00209°
        assert_relative_eq!(utc.longitude - shifted.longitude, 0.002_089, epsilon = 1e-5);
        assert_relative_eq!(utc.latitude, shifted.latitude, epsilon = 1e-10);
    }

    #[test]
    fn test_geodetic_of_is_deterministic() {
        let transform = EquinoxFrameTransform::default();
        let r = Vector3::new(-2_100_000.0, 4_900_000.0, 4_200_000.0);
        let t = Epoch::from_gregorian_utc(2020, 4, 9, 12, 30, 0, 0);
        assert_eq!(transform.geodetic_of(&r, &t), transform.geodetic_of(&r, &t));
    }
}
