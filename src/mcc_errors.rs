use thiserror::Error;

use crate::constants::MetSeconds;

#[derive(Error, Debug)]
pub enum MccError {
    #[error("Malformed ephemeris at line {line} ({reason}): {content:?}")]
    Format {
        line: usize,
        content: String,
        reason: String,
    },

    #[error("Not enough samples for a cubic interpolant: found {found}, need at least {required}")]
    InsufficientSamples { found: usize, required: usize },

    #[error("Query time {time} s is outside the ephemeris range [{t_min}, {t_max}] s")]
    OutOfRange {
        time: MetSeconds,
        t_min: MetSeconds,
        t_max: MetSeconds,
    },

    #[error("Sample {index} is not after its predecessor ({current} s <= {previous} s)")]
    UnorderedSamples {
        index: usize,
        previous: MetSeconds,
        current: MetSeconds,
    },

    #[error("Unable to perform file operation: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Invalid mission configuration: {0}")]
    InvalidConfig(String),

    #[error("Unable to write ground track: {0}")]
    TrackExport(#[from] csv::Error),
}

impl MccError {
    pub(crate) fn format(line: usize, content: &str, reason: impl Into<String>) -> Self {
        MccError::Format {
            line,
            content: content.to_string(),
            reason: reason.into(),
        }
    }
}

impl PartialEq for MccError {
    fn eq(&self, other: &Self) -> bool {
        use MccError::*;
        match (self, other) {
            (
                Format {
                    line: l1,
                    content: c1,
                    reason: r1,
                },
                Format {
                    line: l2,
                    content: c2,
                    reason: r2,
                },
            ) => l1 == l2 && c1 == c2 && r1 == r2,
            (
                InsufficientSamples {
                    found: f1,
                    required: r1,
                },
                InsufficientSamples {
                    found: f2,
                    required: r2,
                },
            ) => f1 == f2 && r1 == r2,
            (
                OutOfRange {
                    time: t1,
                    t_min: a1,
                    t_max: b1,
                },
                OutOfRange {
                    time: t2,
                    t_min: a2,
                    t_max: b2,
                },
            ) => t1 == t2 && a1 == a2 && b1 == b2,
            (
                UnorderedSamples {
                    index: i1,
                    previous: p1,
                    current: c1,
                },
                UnorderedSamples {
                    index: i2,
                    previous: p2,
                    current: c2,
                },
            ) => i1 == i2 && p1 == p2 && c1 == c2,
            (InvalidConfig(a), InvalidConfig(b)) => a == b,

            // io and csv errors carry no comparable payload: same variant is enough
            (IoError(_), IoError(_)) => true,
            (TrackExport(_), TrackExport(_)) => true,

            _ => false,
        }
    }
}

#[cfg(test)]
mod mcc_errors_test {
    use super::*;

    #[test]
    fn test_format_message_carries_line_context() {
        let err = MccError::format(7, "12.0 1.0 2.0", "expected at least 4 fields");
        assert_eq!(
            err.to_string(),
            "Malformed ephemeris at line 7 (expected at least 4 fields): \"12.0 1.0 2.0\""
        );
    }

    #[test]
    fn test_io_errors_compare_by_variant() {
        let a = MccError::from(std::io::Error::new(std::io::ErrorKind::NotFound, "a"));
        let b = MccError::from(std::io::Error::new(std::io::ErrorKind::Other, "b"));
        assert_eq!(a, b);
        assert_ne!(a, MccError::InvalidConfig("a".into()));
    }
}
