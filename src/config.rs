//! # Mission configuration
//!
//! [`MissionConfig`] carries the mission-wide time origin `MET0`: the absolute instant
//! from which every mission elapsed time (MET) in this crate is counted. It is passed
//! explicitly to the ephemeris loader instead of living in a global, so tests can run
//! against synthetic reference epochs.
//!
//! ## Sources
//!
//! - [`MissionConfig::default`] – the NICER mission origin, 2014-01-01T00:00:00 UTC.
//! - [`MissionConfig::new`] – any [`hifitime::Epoch`].
//! - [`MissionConfig::from_iso`] – a hifitime-parsable date string.
//! - [`MissionConfig::from_ron_str`] – a RON document such as
//!   `(met0: "2014-01-01T00:00:00 UTC")`.
use std::str::FromStr;

use hifitime::Epoch;
use serde::Deserialize;

use crate::mcc_errors::MccError;

/// Read-only mission configuration shared by the parser and the interpolator.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MissionConfig {
    met0: Epoch,
}

/// Textual form of [`MissionConfig`], as found in RON configuration files.
#[derive(Debug, Deserialize)]
struct MissionConfigText {
    met0: String,
}

impl Default for MissionConfig {
    fn default() -> Self {
        MissionConfig {
            met0: Epoch::from_gregorian_utc_at_midnight(2014, 1, 1),
        }
    }
}

impl MissionConfig {
    pub fn new(met0: Epoch) -> Self {
        MissionConfig { met0 }
    }

    /// Build a configuration from a date string such as `"2014-01-01T00:00:00 UTC"`.
    ///
    /// Strings without an explicit time scale are read as UTC by hifitime.
    pub fn from_iso(met0: &str) -> Result<Self, MccError> {
        let epoch = Epoch::from_str(met0.trim())
            .map_err(|e| MccError::InvalidConfig(format!("MET0 {met0:?}: {e}")))?;
        Ok(MissionConfig::new(epoch))
    }

    /// Parse a RON configuration document.
    ///
    /// Arguments
    /// -----------------
    /// * `text`: a RON struct with a single `met0` string field.
    ///
    /// Return
    /// ----------
    /// * The configuration, or [`MccError::InvalidConfig`] if the document or the date
    ///   inside it cannot be parsed.
    pub fn from_ron_str(text: &str) -> Result<Self, MccError> {
        let raw: MissionConfigText =
            ron::from_str(text).map_err(|e| MccError::InvalidConfig(e.to_string()))?;
        MissionConfig::from_iso(&raw.met0)
    }

    /// The absolute instant at which MET is zero.
    pub fn met0(&self) -> Epoch {
        self.met0
    }
}
