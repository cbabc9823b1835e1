//! # Ephemeris tables
//!
//! An [`EphemerisTable`] is the validated, time-ordered sample set of a spacecraft
//! trajectory: positions in the Earth-Centered-Inertial frame, in **meters**, tagged with
//! **seconds since `MET0`** (mission elapsed time).
//!
//! ## Loading an MCC file
//! -----------------
//! ```rust, no_run
//! use camino::Utf8Path;
//! use mcc_ephem::{config::MissionConfig, ephemeris::EphemerisTable};
//!
//! let table = EphemerisTable::load(Utf8Path::new("ISS.mcc"), &MissionConfig::default())?;
//! let (t_min, t_max) = table.time_range().expect("loaded tables are non-empty");
//! println!("{} samples from MET {t_min} s to {t_max} s", table.len());
//! # Ok::<(), mcc_ephem::mcc_errors::MccError>(())
//! ```
//!
//! ## Normalization
//! -----------------
//! The file stores offsets from January 1st of its epoch year and positions in feet.
//! On load each row becomes
//!
//! ```text
//! time_offset_seconds = raw_offset + (epoch_year-01-01T00:00:00 UTC − MET0)
//! position_meters     = position_feet × 0.3048
//! ```
//!
//! The epoch difference is computed by hifitime on a continuous time scale, so leap
//! seconds between `MET0` and the table epoch are included.
pub mod mcc_reader;

use std::cmp::Ordering;

use camino::Utf8Path;
use hifitime::Epoch;
use itertools::Itertools;
use nalgebra::Vector3;
use tracing::debug;

use crate::{
    config::MissionConfig,
    constants::{Meter, MetSeconds, FOOT_TO_METER},
    mcc_errors::MccError,
    time::{met_of_epoch, year_start_utc},
};

use self::mcc_reader::parse_mcc;

/// One trajectory sample.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EphemerisSample {
    /// Seconds since `MET0`.
    pub time_offset_seconds: MetSeconds,
    /// ECI position in meters.
    pub position_meters: Vector3<Meter>,
}

/// Immutable, strictly time-ordered set of ephemeris samples.
#[derive(Debug, Clone, PartialEq)]
pub struct EphemerisTable {
    samples: Vec<EphemerisSample>,
    epoch_year: i32,
    mission_epoch: Epoch,
    met0: Epoch,
}

impl EphemerisTable {
    /// Read and normalize an MCC ephemeris file.
    ///
    /// Arguments
    /// -----------------
    /// * `path`: location of the MCC file.
    /// * `config`: mission configuration providing `MET0`.
    ///
    /// Return
    /// ----------
    /// * The table, [`MccError::IoError`] if the file cannot be read, or
    ///   [`MccError::Format`] if its content is malformed.
    ///
    /// See also
    /// ------------
    /// * [`EphemerisTable::from_mcc_str`] – same parser on in-memory content.
    pub fn load(path: &Utf8Path, config: &MissionConfig) -> Result<Self, MccError> {
        let content = std::fs::read_to_string(path)?;
        let table = Self::from_mcc_str(&content, config)?;

        debug!(
            path = %path,
            samples = table.len(),
            epoch_year = table.epoch_year,
            "Loaded MCC ephemeris"
        );
        Ok(table)
    }

    /// Parse and normalize the content of an MCC ephemeris file.
    pub fn from_mcc_str(content: &str, config: &MissionConfig) -> Result<Self, MccError> {
        let raw = parse_mcc(content)?;

        let mission_epoch = year_start_utc(raw.epoch_year);
        let epoch_shift = met_of_epoch(mission_epoch, config.met0());

        // offsets increasing in the file can still collapse once shifted by ~1e8 s
        if let Some((previous, current)) = raw
            .records
            .iter()
            .tuple_windows()
            .find(|(prev, cur)| {
                (cur.raw_offset + epoch_shift).partial_cmp(&(prev.raw_offset + epoch_shift))
                    != Some(Ordering::Greater)
            })
        {
            let line = content
                .lines()
                .nth(current.line_number - 1)
                .unwrap_or_default();
            return Err(MccError::format(
                current.line_number,
                line,
                format!(
                    "time offset {} s does not follow {} s once shifted to MET0 ({} s)",
                    current.raw_offset, previous.raw_offset, epoch_shift
                ),
            ));
        }

        let samples = raw
            .records
            .into_iter()
            .map(|record| EphemerisSample {
                time_offset_seconds: record.raw_offset + epoch_shift,
                position_meters: record.position_feet * FOOT_TO_METER,
            })
            .collect();

        Self::from_samples(raw.epoch_year, samples, config)
    }

    /// Build a table from samples already expressed in seconds since `MET0` and meters.
    ///
    /// Only the ordering is checked: any number of samples is accepted here, and the
    /// interpolator enforces its own minimum.
    ///
    /// Return
    /// ----------
    /// * The table, or [`MccError::UnorderedSamples`] if a sample time does not strictly
    ///   follow the previous one.
    pub fn from_samples(
        epoch_year: i32,
        samples: Vec<EphemerisSample>,
        config: &MissionConfig,
    ) -> Result<Self, MccError> {
        if let Some((index, (previous, current))) = samples
            .iter()
            .map(|s| s.time_offset_seconds)
            .tuple_windows()
            .enumerate()
            .find(|(_, (prev, cur))| cur.partial_cmp(prev) != Some(Ordering::Greater))
        {
            return Err(MccError::UnorderedSamples {
                index: index + 1,
                previous,
                current,
            });
        }

        Ok(EphemerisTable {
            samples,
            epoch_year,
            mission_epoch: year_start_utc(epoch_year),
            met0: config.met0(),
        })
    }

    pub fn samples(&self) -> &[EphemerisSample] {
        &self.samples
    }

    /// Year read from the second header line.
    pub fn epoch_year(&self) -> i32 {
        self.epoch_year
    }

    /// January 1st, 00:00:00 UTC of [`Self::epoch_year`].
    pub fn mission_epoch(&self) -> Epoch {
        self.mission_epoch
    }

    /// The `MET0` the sample times are counted from.
    pub fn met0(&self) -> Epoch {
        self.met0
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// First and last sample times, `None` for an empty table.
    pub fn time_range(&self) -> Option<(MetSeconds, MetSeconds)> {
        let first = self.samples.first()?;
        let last = self.samples.last()?;
        Some((first.time_offset_seconds, last.time_offset_seconds))
    }

    pub fn times(&self) -> impl Iterator<Item = MetSeconds> + '_ {
        self.samples.iter().map(|s| s.time_offset_seconds)
    }

    pub fn positions(&self) -> impl Iterator<Item = &Vector3<Meter>> + '_ {
        self.samples.iter().map(|s| &s.position_meters)
    }
}
