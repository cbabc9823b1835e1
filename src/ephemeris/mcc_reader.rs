//! # MCC ephemeris reader
//!
//! Line-level parser for the fixed-format ISS **MCC ephemeris** text files.
//!
//! ## Layout
//! -----------------
//! ```text
//! line 1   free-form title                                   (ignored)
//! line 2   YYYY  <anything>                                  (epoch year, first token)
//! line 3+  raw_offset  x  y  z  [vx vy vz ...]               (seconds, feet)
//! ```
//!
//! * `raw_offset` counts seconds from January 1st, 00:00:00 UTC of the epoch year.
//! * `x y z` are ECI coordinates in international feet; trailing columns (velocities)
//!   are ignored.
//! * Blank lines and lines starting with `#` are skipped in the data section.
//!
//! Every failure is reported as [`MccError::Format`] with the 1-based line number and the
//! offending text. The reader does not convert units nor shift times: that is the job of
//! [`EphemerisTable`](super::EphemerisTable).
use nalgebra::Vector3;

use crate::{
    constants::{Foot, MIN_SAMPLES},
    mcc_errors::MccError,
};

/// One data row, as written in the file.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct RawMccRecord {
    /// 1-based line number in the file.
    pub(crate) line_number: usize,
    /// Seconds since the start of the epoch year.
    pub(crate) raw_offset: f64,
    pub(crate) position_feet: Vector3<Foot>,
}

/// Header year plus the data rows of an MCC file, in file order.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct RawMccFile {
    pub(crate) epoch_year: i32,
    pub(crate) records: Vec<RawMccRecord>,
}

/// Parse the first token of the second header line as a four-digit year.
///
/// Some generators write the year as a float (`2020.0`); a zero fractional part is
/// accepted.
fn parse_epoch_year(line_number: usize, line: &str) -> Result<i32, MccError> {
    let token = line
        .split_whitespace()
        .next()
        .ok_or_else(|| MccError::format(line_number, line, "missing epoch year"))?;

    let year = match token.parse::<i32>() {
        Ok(year) => Some(year),
        Err(_) => token
            .parse::<f64>()
            .ok()
            .filter(|y| y.is_finite() && y.fract() == 0.0 && y.abs() < 1e5)
            .map(|y| y as i32),
    };

    match year {
        Some(year) if (1000..=9999).contains(&year) => Ok(year),
        _ => Err(MccError::format(
            line_number,
            line,
            format!("invalid epoch year {token:?}"),
        )),
    }
}

/// Parse a data row into its time offset and position.
fn parse_record(line_number: usize, line: &str) -> Result<RawMccRecord, MccError> {
    let mut fields = [0.0; 4];
    let mut tokens = line.split_whitespace();

    for (index, field) in fields.iter_mut().enumerate() {
        let token = tokens.next().ok_or_else(|| {
            MccError::format(line_number, line, "expected at least 4 fields")
        })?;

        *field = token
            .parse::<f64>()
            .ok()
            .filter(|v| v.is_finite())
            .ok_or_else(|| {
                MccError::format(
                    line_number,
                    line,
                    format!("field {} is not a finite number: {token:?}", index + 1),
                )
            })?;
    }

    let [raw_offset, x, y, z] = fields;
    Ok(RawMccRecord {
        line_number,
        raw_offset,
        position_feet: Vector3::new(x, y, z),
    })
}

fn is_skipped(line: &str) -> bool {
    let trimmed = line.trim_start();
    trimmed.is_empty() || trimmed.starts_with('#')
}

/// Parse the whole content of an MCC ephemeris file.
///
/// Arguments
/// -----------------
/// * `content`: the complete text of the file.
///
/// Return
/// ----------
/// * The epoch year and the data rows, or [`MccError::Format`] if a header line is
///   missing or invalid, a row is malformed, a row's time offset does not strictly
///   increase, or fewer than 4 data rows are present.
pub(crate) fn parse_mcc(content: &str) -> Result<RawMccFile, MccError> {
    let mut lines = content.lines().enumerate().map(|(idx, line)| (idx + 1, line));

    lines
        .next()
        .ok_or_else(|| MccError::format(1, "", "missing title line"))?;

    let (year_line_number, year_line) = lines
        .next()
        .ok_or_else(|| MccError::format(2, "", "missing epoch year line"))?;
    let epoch_year = parse_epoch_year(year_line_number, year_line)?;

    let mut records: Vec<RawMccRecord> = Vec::new();
    let mut last_line = (year_line_number, year_line);

    for (line_number, line) in lines.filter(|(_, line)| !is_skipped(line)) {
        let record = parse_record(line_number, line)?;

        if let Some(previous) = records.last() {
            if record.raw_offset <= previous.raw_offset {
                return Err(MccError::format(
                    line_number,
                    line,
                    format!(
                        "time offset {} s does not follow {} s",
                        record.raw_offset, previous.raw_offset
                    ),
                ));
            }
        }

        records.push(record);
        last_line = (line_number, line);
    }

    if records.len() < MIN_SAMPLES {
        let (line_number, line) = last_line;
        return Err(MccError::format(
            line_number,
            line,
            format!(
                "found {} data rows, need at least {MIN_SAMPLES}",
                records.len()
            ),
        ));
    }

    Ok(RawMccFile {
        epoch_year,
        records,
    })
}
