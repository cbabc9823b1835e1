//! # Constants and type definitions for mcc_ephem
//!
//! Physical constants, unit conversion factors and the type aliases shared by the
//! ephemeris parser, the interpolator and the Earth-orientation model.
//!
//! ## Overview
//!
//! - Angle and time conversions (degrees, arcseconds, Julian centuries)
//! - Length conversion from the MCC native unit (international foot) to meters
//! - WGS84 ellipsoid parameters used by the geodetic conversion
//! - The minimum number of samples a cubic interpolant needs

// -------------------------------------------------------------------------------------------------
// Physical constants and unit conversions
// -------------------------------------------------------------------------------------------------

/// 2π, useful for trigonometric conversions
pub const DPI: f64 = 2. * std::f64::consts::PI;

/// Number of seconds in a Julian day
pub const SECONDS_PER_DAY: f64 = 86_400.0;

/// Number of days in a Julian century
pub const DAYS_PER_JULIAN_CENTURY: f64 = 36_525.0;

/// MJD epoch of J2000.0 (2000-01-01 12:00:00 TT)
pub const T2000: f64 = 51544.5;

/// Degrees → radians
pub const RADEG: f64 = std::f64::consts::PI / 180.0;

/// Arcseconds → radians
pub const RADSEC: f64 = std::f64::consts::PI / 648000.0;

/// International foot → meters (exact by definition)
pub const FOOT_TO_METER: f64 = 0.3048;

/// WGS84 semi-major axis (equatorial radius) in meters
pub const WGS84_SEMI_MAJOR_AXIS: f64 = 6_378_137.0;

/// WGS84 flattening
pub const WGS84_FLATTENING: f64 = 1.0 / 298.257_223_563;

/// WGS84 first eccentricity squared, e² = f (2 − f)
pub const WGS84_ECCENTRICITY_SQUARED: f64 = WGS84_FLATTENING * (2.0 - WGS84_FLATTENING);

/// Smallest sample count a cubic (k = 3) interpolant can be fitted to
pub const MIN_SAMPLES: usize = 4;

// -------------------------------------------------------------------------------------------------
// Type aliases
// -------------------------------------------------------------------------------------------------

/// Angle in degrees
pub type Degree = f64;
/// Angle in arcseconds
pub type ArcSec = f64;
/// Angle in radians
pub type Radian = f64;
/// Distance in meters
pub type Meter = f64;
/// Distance in international feet
pub type Foot = f64;
/// Mission elapsed time: seconds since `MET0`
pub type MetSeconds = f64;
/// Modified Julian Date (days)
pub type MJD = f64;
