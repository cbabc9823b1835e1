//! # Not-a-knot cubic interpolating spline
//!
//! One-dimensional cubic spline passing through every knot, twice continuously
//! differentiable, with the *not-a-knot* end condition: the third derivative is continuous
//! across the second and the penultimate knots, so the first two and the last two
//! segments are each a single cubic. Cubic polynomials are therefore reproduced exactly,
//! and with exactly four knots the spline is the interpolating cubic itself.
//!
//! ## Representation
//!
//! The spline is stored as its knots `xᵢ`, values `yᵢ` and second derivatives `Mᵢ`. On
//! segment `[xᵢ, xᵢ₊₁]` of width `h`, with `a = xᵢ₊₁ − t` and `b = t − xᵢ`:
//!
//! ```text
//! S(t) = Mᵢ a³/(6h) + Mᵢ₊₁ b³/(6h) + (yᵢ/h − Mᵢ h/6) a + (yᵢ₊₁/h − Mᵢ₊₁ h/6) b
//! ```
//!
//! The interior `Mᵢ` solve a tridiagonal system (C¹ continuity at interior knots); the
//! first and last rows are modified by eliminating `M₀` and `Mₙ₋₁` with the not-a-knot
//! conditions, which keeps the system tridiagonal. It is solved in O(n) with the Thomas
//! algorithm.
//!
//! Evaluation outside `[x₀, xₙ₋₁]` is refused with [`MccError::OutOfRange`]: the spline
//! never extrapolates.
use std::cmp::Ordering;

use itertools::Itertools;

use crate::{constants::MIN_SAMPLES, mcc_errors::MccError};

#[derive(Debug, Clone, PartialEq)]
pub struct CubicSpline {
    knots: Vec<f64>,
    values: Vec<f64>,
    second_derivatives: Vec<f64>,
}

impl CubicSpline {
    /// Fit the spline through `(knot, value)` pairs.
    ///
    /// Arguments
    /// -----------------
    /// * `points`: the interpolation nodes, knots strictly increasing.
    ///
    /// Return
    /// ----------
    /// * The fitted spline, or
    ///   - [`MccError::InsufficientSamples`] with fewer than 4 points,
    ///   - [`MccError::UnorderedSamples`] if a knot is not strictly after its predecessor.
    pub fn new<I>(points: I) -> Result<Self, MccError>
    where
        I: IntoIterator<Item = (f64, f64)>,
    {
        let (knots, values): (Vec<f64>, Vec<f64>) = points.into_iter().unzip();

        if knots.len() < MIN_SAMPLES {
            return Err(MccError::InsufficientSamples {
                found: knots.len(),
                required: MIN_SAMPLES,
            });
        }

        if let Some((index, (&previous, &current))) = knots
            .iter()
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

        let second_derivatives = not_a_knot_second_derivatives(&knots, &values);

        Ok(CubicSpline {
            knots,
            values,
            second_derivatives,
        })
    }

    /// `(first knot, last knot)`.
    pub fn range(&self) -> (f64, f64) {
        // at least MIN_SAMPLES knots exist by construction
        (self.knots[0], self.knots[self.knots.len() - 1])
    }

    pub fn knots(&self) -> &[f64] {
        &self.knots
    }

    /// Value of the spline at `t`.
    pub fn evaluate(&self, t: f64) -> Result<f64, MccError> {
        let i = self.segment(t)?;
        let (x0, x1) = (self.knots[i], self.knots[i + 1]);
        let (y0, y1) = (self.values[i], self.values[i + 1]);
        let (m0, m1) = (self.second_derivatives[i], self.second_derivatives[i + 1]);

        let h = x1 - x0;
        let a = x1 - t;
        let b = t - x0;

        Ok(m0 * a.powi(3) / (6.0 * h)
            + m1 * b.powi(3) / (6.0 * h)
            + (y0 / h - m0 * h / 6.0) * a
            + (y1 / h - m1 * h / 6.0) * b)
    }

    /// First derivative of the spline at `t`.
    pub fn derivative(&self, t: f64) -> Result<f64, MccError> {
        let i = self.segment(t)?;
        let (x0, x1) = (self.knots[i], self.knots[i + 1]);
        let (y0, y1) = (self.values[i], self.values[i + 1]);
        let (m0, m1) = (self.second_derivatives[i], self.second_derivatives[i + 1]);

        let h = x1 - x0;
        let a = x1 - t;
        let b = t - x0;

        Ok(-m0 * a * a / (2.0 * h) + m1 * b * b / (2.0 * h) + (y1 - y0) / h
            - (m1 - m0) * h / 6.0)
    }

    /// Index `i` of the segment `[xᵢ, xᵢ₊₁]` containing `t`.
    ///
    /// The last knot belongs to the last segment. Anything outside the knot range,
    /// NaN included, is rejected.
    fn segment(&self, t: f64) -> Result<usize, MccError> {
        let (t_min, t_max) = self.range();
        if !(t >= t_min && t <= t_max) {
            return Err(MccError::OutOfRange {
                time: t,
                t_min,
                t_max,
            });
        }

        let upper = self.knots.partition_point(|&knot| knot <= t);
        Ok(upper.saturating_sub(1).min(self.knots.len() - 2))
    }
}

/// Second derivatives at the knots of the not-a-knot spline.
///
/// `x` has at least 4 strictly increasing entries and `y` the same length.
fn not_a_knot_second_derivatives(x: &[f64], y: &[f64]) -> Vec<f64> {
    let n = x.len();
    let h: Vec<f64> = x.iter().tuple_windows().map(|(a, b)| b - a).collect();
    let slopes: Vec<f64> = (0..n - 1).map(|i| (y[i + 1] - y[i]) / h[i]).collect();

    // unknowns M₁ … Mₙ₋₂
    let m = n - 2;
    let mut lower = vec![0.0; m];
    let mut diag = vec![0.0; m];
    let mut upper = vec![0.0; m];
    let mut rhs = vec![0.0; m];

    for k in 0..m {
        lower[k] = h[k];
        diag[k] = 2.0 * (h[k] + h[k + 1]);
        upper[k] = h[k + 1];
        rhs[k] = 6.0 * (slopes[k + 1] - slopes[k]);
    }

    // not-a-knot at x₁: M₀ = M₁ (1 + h₀/h₁) − M₂ h₀/h₁
    let (h0, h1) = (h[0], h[1]);
    lower[0] = 0.0;
    diag[0] = (h0 + h1) * (h0 + 2.0 * h1) / h1;
    upper[0] = (h1 * h1 - h0 * h0) / h1;

    // not-a-knot at xₙ₋₂: Mₙ₋₁ = Mₙ₋₂ (1 + b/a) − Mₙ₋₃ b/a
    let (a, b) = (h[n - 3], h[n - 2]);
    lower[m - 1] = (a * a - b * b) / a;
    diag[m - 1] = (a + b) * (2.0 * a + b) / a;
    upper[m - 1] = 0.0;

    let interior = solve_tridiagonal(&lower, &diag, &upper, &rhs);

    let mut second = Vec::with_capacity(n);
    second.push(interior[0] * (1.0 + h0 / h1) - interior[1] * h0 / h1);
    second.extend_from_slice(&interior);
    second.push(interior[m - 1] * (1.0 + b / a) - interior[m - 2] * b / a);
    second
}

/// Thomas algorithm for a tridiagonal system.
///
/// `lower[0]` and `upper[len - 1]` are ignored.
fn solve_tridiagonal(lower: &[f64], diag: &[f64], upper: &[f64], rhs: &[f64]) -> Vec<f64> {
    let len = diag.len();
    let mut c = vec![0.0; len];
    let mut d = vec![0.0; len];

    c[0] = upper[0] / diag[0];
    d[0] = rhs[0] / diag[0];
    for k in 1..len {
        let denom = diag[k] - lower[k] * c[k - 1];
        c[k] = upper[k] / denom;
        d[k] = (rhs[k] - lower[k] * d[k - 1]) / denom;
    }

    let mut solution = d;
    for k in (0..len - 1).rev() {
        solution[k] -= c[k] * solution[k + 1];
    }
    solution
}
