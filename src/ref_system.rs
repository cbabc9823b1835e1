//! Elementary frame rotations and the celestial → terrestrial rotation.
//!
//! All matrices here are **passive**: they re-express a fixed vector in a rotated
//! frame (`x_new = R · x_old`). This is the convention of the classical reduction
//! chain `ITRS ≈ R3(GAST) · N · P · GCRS`.
use nalgebra::{Matrix3, Rotation3, Vector3};

use crate::{
    constants::{Radian, MJD},
    earth_orientation::{equation_of_equinoxes, nutation_matrix, precession_matrix},
    time::gmst,
};

/// Principal axis of a frame rotation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    X,
    Y,
    Z,
}

/// Rotation of the coordinate frame by `alpha` around `axis`.
///
/// The frame turns counter-clockwise seen from the tip of the axis, so the
/// coordinates of a fixed vector turn by `-alpha`. With nalgebra's active
/// [`Rotation3::from_axis_angle`] this is simply the rotation by `-alpha`.
///
/// # Arguments
///
/// * `alpha` - Rotation angle of the frame in **radians**.
/// * `axis` - Principal axis of the rotation.
///
/// # Returns
///
/// A 3×3 orthonormal matrix `R` such that `x_rotated_frame = R · x`.
pub fn frame_rotation(alpha: Radian, axis: Axis) -> Matrix3<f64> {
    let axis = match axis {
        Axis::X => Vector3::x_axis(),
        Axis::Y => Vector3::y_axis(),
        Axis::Z => Vector3::z_axis(),
    };

    Rotation3::from_axis_angle(&axis, -alpha).into()
}

/// Rotation from the celestial (GCRS ≈ mean equator and equinox of J2000) frame to
/// the pseudo Earth-fixed frame of date.
///
/// Arguments
/// ---------
/// * `tjm_tt`: date in MJD, TT scale (precession, nutation, equation of the equinoxes).
/// * `tjm_ut1`: the same instant in MJD, UT1 scale (Earth rotation).
///
/// Return
/// ------
/// * `R3(GAST) · N(t) · P(t)`, where GAST is the Greenwich apparent sidereal time.
///
/// Remarks
/// -------
/// * The ~20 mas frame bias between GCRS and J2000 and the polar motion are
///   neglected; both stay below a few tens of meters at low Earth orbit.
pub fn celestial_to_terrestrial(tjm_tt: MJD, tjm_ut1: MJD) -> Matrix3<f64> {
    let gast = gmst(tjm_ut1) + equation_of_equinoxes(tjm_tt);

    frame_rotation(gast, Axis::Z) * nutation_matrix(tjm_tt) * precession_matrix(tjm_tt)
}
