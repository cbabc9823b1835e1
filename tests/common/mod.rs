use camino::Utf8Path;
use mcc_ephem::{EphemerisTable, MissionConfig};
use nalgebra::Vector3;

/// Synthetic ISS-like ephemeris: circular orbit, 61 samples one minute apart, starting
/// 2020-04-10T00:00:00 UTC (day 100 of 2020).
pub const ISS_SYNTHETIC: &str = "tests/data/iss_synthetic.mcc";

/// MET of the first sample of [`ISS_SYNTHETIC`] with the default `MET0` (2014-01-01):
/// 2191 days, 2 leap seconds and 100 days.
pub const FIRST_SAMPLE_MET: f64 = 189_302_402.0 + 8_640_000.0;

pub fn load_iss() -> EphemerisTable {
    EphemerisTable::load(Utf8Path::new(ISS_SYNTHETIC), &MissionConfig::default())
        .expect("synthetic ephemeris should load")
}

/// The circular orbit the synthetic ephemeris was sampled from.
pub struct CircularOrbit {
    pub radius: f64,
    pub inclination: f64,
    pub ascending_node: f64,
    pub initial_argument_of_latitude: f64,
    pub mean_motion: f64,
}

impl CircularOrbit {
    pub fn iss_synthetic() -> Self {
        let radius: f64 = 6_778_137.0;
        CircularOrbit {
            radius,
            inclination: 51.6_f64.to_radians(),
            ascending_node: 30.0_f64.to_radians(),
            initial_argument_of_latitude: 10.0_f64.to_radians(),
            mean_motion: (3.986004418e14 / radius.powi(3)).sqrt(),
        }
    }

    /// ECI position (m) `dt` seconds after the first sample.
    pub fn position(&self, dt: f64) -> Vector3<f64> {
        let u = self.initial_argument_of_latitude + self.mean_motion * dt;
        let (sin_u, cos_u) = u.sin_cos();
        let (sin_o, cos_o) = self.ascending_node.sin_cos();
        let (sin_i, cos_i) = self.inclination.sin_cos();
        self.radius
            * Vector3::new(
                cos_o * cos_u - sin_o * sin_u * cos_i,
                sin_o * cos_u + cos_o * sin_u * cos_i,
                sin_u * sin_i,
            )
    }

    /// ECI velocity (m/s) `dt` seconds after the first sample.
    pub fn velocity(&self, dt: f64) -> Vector3<f64> {
        let u = self.initial_argument_of_latitude + self.mean_motion * dt;
        let (sin_u, cos_u) = u.sin_cos();
        let (sin_o, cos_o) = self.ascending_node.sin_cos();
        let (sin_i, cos_i) = self.inclination.sin_cos();
        self.radius
            * self.mean_motion
            * Vector3::new(
                -cos_o * sin_u - sin_o * cos_u * cos_i,
                -sin_o * sin_u + cos_o * cos_u * cos_i,
                cos_u * sin_i,
            )
    }
}
