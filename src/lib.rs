//! # mcc_ephem
//!
//! Continuous geodetic position of a spacecraft from an ISS **MCC ephemeris**: a table of
//! Earth-Centered-Inertial positions sampled at discrete epochs.
//!
//! ## Pipeline
//! -----------------
//! 1. [`EphemerisTable::load`] parses the file, shifts its times to seconds since `MET0`
//!    (given by [`MissionConfig`]) and converts feet to meters.
//! 2. [`TrajectoryInterpolator::from_table`] fits one not-a-knot cubic spline per axis.
//! 3. [`TrajectoryInterpolator::latlon`] interpolates the ECI position at a mission
//!    elapsed time and hands it, with the absolute instant, to a [`FrameTransform`] that
//!    returns WGS84 latitude and longitude.
//!
//! ```rust, no_run
//! use camino::Utf8Path;
//! use mcc_ephem::{EphemerisTable, MissionConfig, TrajectoryInterpolator};
//!
//! let table = EphemerisTable::load(Utf8Path::new("ISS.mcc"), &MissionConfig::default())?;
//! let iss = TrajectoryInterpolator::from_table(table)?;
//! let (lat, lon) = iss.latlon(1.9e8)?;
//! # Ok::<(), mcc_ephem::MccError>(())
//! ```
pub mod config;
pub mod constants;
mod earth_orientation;
pub mod ephemeris;
pub mod frame_transform;
pub mod geodetic;
pub mod mcc_errors;
mod ref_system;
pub mod spline;
pub mod time;
pub mod trajectory;

pub use config::MissionConfig;
pub use ephemeris::{EphemerisSample, EphemerisTable};
pub use frame_transform::{EquinoxFrameTransform, FrameTransform};
pub use geodetic::GeodeticPosition;
pub use mcc_errors::MccError;
pub use trajectory::{TrackPoint, TrajectoryInterpolator};
