//! # Trajectory interpolation
//!
//! [`TrajectoryInterpolator`] turns an [`EphemerisTable`] into a continuous trajectory:
//! one not-a-knot [`CubicSpline`] per ECI axis, queried at any mission elapsed time inside
//! the table range, and a [`FrameTransform`] that maps the interpolated inertial position
//! to geodetic coordinates.
//!
//! ## Example
//! -----------------
//! ```rust, no_run
//! use camino::Utf8Path;
//! use mcc_ephem::{
//!     config::MissionConfig, ephemeris::EphemerisTable, trajectory::TrajectoryInterpolator,
//! };
//!
//! let table = EphemerisTable::load(Utf8Path::new("ISS.mcc"), &MissionConfig::default())?;
//! let iss = TrajectoryInterpolator::from_table(table)?;
//!
//! let (t_min, t_max) = iss.time_range();
//! let (lat, lon) = iss.latlon(0.5 * (t_min + t_max))?;
//! println!("ISS over {lat:.3}°, {lon:.3}°");
//! # Ok::<(), mcc_ephem::mcc_errors::MccError>(())
//! ```
//!
//! ## Ground track
//! -----------------
//! The geodetic position at every sample time is a diagnostic product. It is computed on
//! first call to [`TrajectoryInterpolator::ground_track`] and cached in a
//! [`OnceCell`], so building an interpolator stays cheap and the interpolator can still be
//! shared across threads.
use camino::Utf8Path;
use hifitime::Epoch;
use nalgebra::Vector3;
use once_cell::sync::OnceCell;
use serde::Serialize;
use tracing::{debug, trace};

use crate::{
    constants::{Degree, Meter, MetSeconds, MIN_SAMPLES},
    ephemeris::EphemerisTable,
    frame_transform::{EquinoxFrameTransform, FrameTransform},
    geodetic::GeodeticPosition,
    mcc_errors::MccError,
    spline::CubicSpline,
    time::epoch_of_met,
};

/// Geodetic position of the spacecraft at one ephemeris sample.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrackPoint {
    pub met: MetSeconds,
    pub position: Vector3<Meter>,
    pub geodetic: GeodeticPosition,
}

/// Row of the ground-track CSV export.
#[derive(Debug, Serialize)]
struct TrackRecord {
    met: MetSeconds,
    x: Meter,
    y: Meter,
    z: Meter,
    latitude: Degree,
    longitude: Degree,
}

impl From<&TrackPoint> for TrackRecord {
    fn from(point: &TrackPoint) -> Self {
        TrackRecord {
            met: point.met,
            x: point.position.x,
            y: point.position.y,
            z: point.position.z,
            latitude: point.geodetic.latitude,
            longitude: point.geodetic.longitude,
        }
    }
}

/// Continuous spacecraft trajectory built from an ephemeris table.
///
/// Immutable once built: every query is a pure function of its time argument, and the
/// only interior state is the lazily computed ground track.
pub struct TrajectoryInterpolator {
    table: EphemerisTable,
    fx: CubicSpline,
    fy: CubicSpline,
    fz: CubicSpline,
    transform: Box<dyn FrameTransform>,
    ground_track: OnceCell<Vec<TrackPoint>>,
}

impl TrajectoryInterpolator {
    /// Fit the trajectory with the default [`EquinoxFrameTransform`].
    ///
    /// Arguments
    /// -----------------
    /// * `table`: the ephemeris samples, consumed.
    ///
    /// Return
    /// ----------
    /// * The interpolator, or [`MccError::InsufficientSamples`] if the table holds fewer
    ///   than 4 samples.
    pub fn from_table(table: EphemerisTable) -> Result<Self, MccError> {
        Self::with_transform(table, EquinoxFrameTransform::default())
    }

    /// Fit the trajectory and use `transform` for the inertial → geodetic step.
    pub fn with_transform<T>(table: EphemerisTable, transform: T) -> Result<Self, MccError>
    where
        T: FrameTransform + 'static,
    {
        if table.len() < MIN_SAMPLES {
            return Err(MccError::InsufficientSamples {
                found: table.len(),
                required: MIN_SAMPLES,
            });
        }

        let axis = |component: usize| {
            CubicSpline::new(
                table
                    .samples()
                    .iter()
                    .map(|s| (s.time_offset_seconds, s.position_meters[component])),
            )
        };
        let fx = axis(0)?;
        let fy = axis(1)?;
        let fz = axis(2)?;

        let (t_min, t_max) = fx.range();
        debug!(
            samples = table.len(),
            t_min, t_max, "Trajectory interpolator ready"
        );

        Ok(TrajectoryInterpolator {
            table,
            fx,
            fy,
            fz,
            transform: Box::new(transform),
            ground_track: OnceCell::new(),
        })
    }

    /// Validity interval `[t_min, t_max]`, in seconds since `MET0`.
    pub fn time_range(&self) -> (MetSeconds, MetSeconds) {
        self.fx.range()
    }

    pub fn table(&self) -> &EphemerisTable {
        &self.table
    }

    /// Absolute instant of the mission elapsed time `met`.
    pub fn absolute_instant(&self, met: MetSeconds) -> Epoch {
        epoch_of_met(met, self.table.met0())
    }

    /// Interpolated ECI position (meters) at `met`.
    pub fn eci_position(&self, met: MetSeconds) -> Result<Vector3<Meter>, MccError> {
        Ok(Vector3::new(
            self.fx.evaluate(met)?,
            self.fy.evaluate(met)?,
            self.fz.evaluate(met)?,
        ))
    }

    /// Interpolated ECI velocity (meters per second) at `met`.
    pub fn eci_velocity(&self, met: MetSeconds) -> Result<Vector3<f64>, MccError> {
        Ok(Vector3::new(
            self.fx.derivative(met)?,
            self.fy.derivative(met)?,
            self.fz.derivative(met)?,
        ))
    }

    /// Geodetic position (latitude, longitude, height) at `met`.
    pub fn geodetic(&self, met: MetSeconds) -> Result<GeodeticPosition, MccError> {
        let position = self.eci_position(met)?;
        let instant = self.absolute_instant(met);
        let geodetic = self.transform.geodetic_of(&position, &instant);

        trace!(
            met,
            latitude = geodetic.latitude,
            longitude = geodetic.longitude,
            "Trajectory query"
        );
        Ok(geodetic)
    }

    /// Latitude and longitude of the spacecraft at `met`.
    ///
    /// Arguments
    /// -----------------
    /// * `met`: seconds since `MET0`.
    ///
    /// Return
    /// ----------
    /// * `(latitude, longitude)` in degrees, longitude in (−180°, 180°], or
    ///   [`MccError::OutOfRange`] if `met` is outside [`Self::time_range`]. The interpolator
    ///   remains usable after an out-of-range query.
    pub fn latlon(&self, met: MetSeconds) -> Result<(Degree, Degree), MccError> {
        self.geodetic(met).map(|g| g.latlon())
    }

    /// [`Self::latlon`] over several times; fails on the first out-of-range time.
    pub fn latlon_many(&self, mets: &[MetSeconds]) -> Result<Vec<(Degree, Degree)>, MccError> {
        mets.iter().map(|&met| self.latlon(met)).collect()
    }

    /// Geodetic position of every ephemeris sample, computed on first call.
    pub fn ground_track(&self) -> &[TrackPoint] {
        self.ground_track.get_or_init(|| {
            debug!(samples = self.table.len(), "Computing ground track");
            self.table
                .samples()
                .iter()
                .map(|sample| {
                    let instant = self.absolute_instant(sample.time_offset_seconds);
                    TrackPoint {
                        met: sample.time_offset_seconds,
                        position: sample.position_meters,
                        geodetic: self
                            .transform
                            .geodetic_of(&sample.position_meters, &instant),
                    }
                })
                .collect()
        })
    }

    /// Write the ground track as CSV with columns `met,x,y,z,latitude,longitude`.
    ///
    /// Return
    /// ----------
    /// * [`MccError::TrackExport`] if the file cannot be created or a row cannot be
    ///   written, [`MccError::IoError`] if the final flush fails.
    pub fn write_track_csv(&self, path: &Utf8Path) -> Result<(), MccError> {
        let mut writer = csv::Writer::from_path(path)?;
        for point in self.ground_track() {
            writer.serialize(TrackRecord::from(point))?;
        }
        writer.flush()?;

        debug!(path = %path, "Ground track written");
        Ok(())
    }
}
