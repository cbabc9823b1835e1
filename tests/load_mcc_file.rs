mod common;

use std::io::Write;

use approx::assert_relative_eq;
use camino::Utf8Path;
use common::{load_iss, CircularOrbit, FIRST_SAMPLE_MET, ISS_SYNTHETIC};
use hifitime::Epoch;
use mcc_ephem::{EphemerisTable, MccError, MissionConfig};
use nalgebra::Vector3;
use tempfile::NamedTempFile;

fn write_mcc(content: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(content.as_bytes()).unwrap();
    file
}

fn load_tmp(file: &NamedTempFile) -> Result<EphemerisTable, MccError> {
    let path = Utf8Path::from_path(file.path()).unwrap();
    EphemerisTable::load(path, &MissionConfig::default())
}

#[test]
fn test_load_synthetic_iss() {
    let table = load_iss();

    assert_eq!(table.len(), 61);
    assert_eq!(table.epoch_year(), 2020);
    assert_eq!(
        table.mission_epoch(),
        Epoch::from_gregorian_utc_at_midnight(2020, 1, 1)
    );
    assert_eq!(
        table.time_range(),
        Some((FIRST_SAMPLE_MET, FIRST_SAMPLE_MET + 3600.0))
    );

    // first row: 17766767.798 13027330.217 3026298.977 ft
    assert_eq!(
        table.samples()[0].position_meters,
        Vector3::new(
            17766767.798 * 0.3048,
            13027330.217 * 0.3048,
            3026298.977 * 0.3048
        )
    );

    let orbit = CircularOrbit::iss_synthetic();
    for (k, sample) in table.samples().iter().enumerate() {
        let expected = orbit.position(60.0 * k as f64);
        assert!((sample.position_meters - expected).norm() < 1e-3);
    }
}

#[test]
fn test_times_are_strictly_increasing() {
    let table = load_iss();
    let times: Vec<f64> = table.times().collect();
    assert!(times.windows(2).all(|w| w[1] > w[0]));
    assert_eq!(table.positions().count(), table.len());
}

#[test]
fn test_custom_met0() {
    let config = MissionConfig::from_ron_str(r#"(met0: "2020-01-01T00:00:00 UTC")"#).unwrap();
    let table = EphemerisTable::load(Utf8Path::new(ISS_SYNTHETIC), &config).unwrap();

    assert_eq!(table.samples()[0].time_offset_seconds, 8_640_000.0);
    assert_eq!(table.met0(), Epoch::from_gregorian_utc_at_midnight(2020, 1, 1));
}

#[test]
fn test_met0_after_table_epoch_gives_negative_times() {
    let config = MissionConfig::from_iso("2020-04-10T00:00:00 UTC").unwrap();
    let content = "title\n2020\n0 1 2 3\n60 1 2 3\n120 1 2 3\n180 1 2 3\n";
    let table = EphemerisTable::from_mcc_str(content, &config).unwrap();

    assert_relative_eq!(table.samples()[0].time_offset_seconds, -8_640_000.0);
}

#[test]
fn test_missing_file() {
    let result = EphemerisTable::load(
        Utf8Path::new("tests/data/does_not_exist.mcc"),
        &MissionConfig::default(),
    );
    assert!(matches!(result, Err(MccError::IoError(_))));
}

#[test]
fn test_malformed_row_reports_line() {
    let file = write_mcc(
        "ISS EPHEMERIS\n\
         2020 100 GMT\n\
         0.0 1.0 2.0 3.0\n\
         60.0 1.0 2.0 3.0\n\
         120.0 1.0 2.0\n\
         180.0 1.0 2.0 3.0\n",
    );

    let err = load_tmp(&file).unwrap_err();
    assert_eq!(
        err,
        MccError::Format {
            line: 5,
            content: "120.0 1.0 2.0".into(),
            reason: "expected at least 4 fields".into(),
        }
    );
    assert!(err.to_string().contains("line 5"));
}

#[test]
fn test_bad_year_line() {
    let file = write_mcc("ISS EPHEMERIS\nGMT 2020\n0 1 2 3\n60 1 2 3\n120 1 2 3\n180 1 2 3\n");
    assert!(matches!(
        load_tmp(&file),
        Err(MccError::Format { line: 2, .. })
    ));
}

#[test]
fn test_too_few_rows_in_file() {
    let file = write_mcc("ISS EPHEMERIS\n2020\n0 1 2 3\n60 1 2 3\n120 1 2 3\n");
    assert!(matches!(
        load_tmp(&file),
        Err(MccError::Format { line: 5, .. })
    ));
}

#[test]
fn test_out_of_order_rows_are_rejected() {
    let file = write_mcc("ISS EPHEMERIS\n2020\n0 1 2 3\n120 1 2 3\n60 1 2 3\n180 1 2 3\n");
    assert!(matches!(
        load_tmp(&file),
        Err(MccError::Format { line: 5, .. })
    ));
}
