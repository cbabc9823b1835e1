//! # Earth-fixed Cartesian → geodetic coordinates
//!
//! Converts a position expressed in an Earth-fixed frame into latitude, longitude and
//! height above the **WGS84** ellipsoid.
//!
//! ## Method
//!
//! Longitude is direct, `λ = atan2(y, x)`. Latitude is found by fixed-point iteration on
//!
//! ```text
//! φ = atan2(z + e²·N(φ)·sin φ, p),   N(φ) = a / √(1 − e²·sin²φ),   p = √(x² + y²)
//! ```
//!
//! which converges to machine precision in a handful of steps for any point outside the
//! Earth's core, and the height is taken as `h = p·cos φ + z·sin φ − a·√(1 − e²·sin²φ)`,
//! a form that stays well conditioned at the poles.
use nalgebra::Vector3;
use serde::Serialize;

use crate::constants::{Degree, Meter, Radian, WGS84_ECCENTRICITY_SQUARED, WGS84_SEMI_MAJOR_AXIS};

const MAX_ITERATIONS: usize = 10;
const LATITUDE_TOLERANCE: Radian = 1e-13;

/// Geodetic coordinates on the WGS84 ellipsoid.
///
/// Fields
/// -----------------
/// * `latitude` – geodetic latitude in degrees, in [−90°, 90°].
/// * `longitude` – east longitude in degrees, in (−180°, 180°].
/// * `height` – height above the ellipsoid in meters.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct GeodeticPosition {
    pub latitude: Degree,
    pub longitude: Degree,
    pub height: Meter,
}

impl GeodeticPosition {
    /// `(latitude, longitude)` in degrees.
    pub fn latlon(&self) -> (Degree, Degree) {
        (self.latitude, self.longitude)
    }
}

/// Convert an Earth-fixed Cartesian position (meters) to WGS84 geodetic coordinates.
pub fn ecef_to_geodetic(position: &Vector3<Meter>) -> GeodeticPosition {
    let (x, y, z) = (position.x, position.y, position.z);
    let e2 = WGS84_ECCENTRICITY_SQUARED;
    let a = WGS84_SEMI_MAJOR_AXIS;

    let p = x.hypot(y);
    let longitude = y.atan2(x);

    let mut latitude = z.atan2(p * (1.0 - e2));
    for _ in 0..MAX_ITERATIONS {
        let sin_lat = latitude.sin();
        let n = a / (1.0 - e2 * sin_lat * sin_lat).sqrt();
        let next = (z + e2 * n * sin_lat).atan2(p);
        let converged = (next - latitude).abs() < LATITUDE_TOLERANCE;
        latitude = next;
        if converged {
            break;
        }
    }

    let (sin_lat, cos_lat) = latitude.sin_cos();
    let height = p * cos_lat + z * sin_lat - a * (1.0 - e2 * sin_lat * sin_lat).sqrt();

    GeodeticPosition {
        latitude: latitude.to_degrees(),
        longitude: normalize_longitude(longitude.to_degrees()),
        height,
    }
}

/// Fold an angle in degrees into (−180°, 180°].
fn normalize_longitude(lon: Degree) -> Degree {
    if lon <= -180.0 {
        lon + 360.0
    } else if lon > 180.0 {
        lon - 360.0
    } else {
        lon
    }
}
