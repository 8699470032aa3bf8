//! # Exact Trigonometry
//!
//! Sine/cosine evaluators that return exact 0/±1 at multiples of a right
//! angle. `f64::sin(PI)` is ~1.2e-16, which leaves rings and rotated vertices
//! slightly off their axis-aligned positions; seams that should be coincident
//! then fail bit-identical comparisons inside boolean solvers.

use glam::{DMat4, DVec3};
use std::f64::consts::TAU;

/// Returns `(sin, cos)` of the angle `2π · step / steps`.
///
/// Exact whenever the angle is a multiple of 90°.
///
/// # Example
///
/// ```rust
/// use bcg_mesh::trig::sin_cos_turn;
///
/// assert_eq!(sin_cos_turn(2, 4), (0.0, -1.0));
/// assert_eq!(sin_cos_turn(3, 4), (-1.0, 0.0));
/// ```
pub fn sin_cos_turn(step: u32, steps: u32) -> (f64, f64) {
    let steps = steps.max(1) as u64;
    let step = step as u64 % steps;
    if (4 * step) % steps == 0 {
        return quadrant(((4 * step) / steps) as u32);
    }
    (TAU * step as f64 / steps as f64).sin_cos()
}

/// Returns `(sin, cos)` of an angle given in degrees.
///
/// Exact whenever the angle is a multiple of 90°.
pub fn sin_cos_degrees(degrees: f64) -> (f64, f64) {
    let quarter = degrees / 90.0;
    if quarter.fract() == 0.0 && quarter.is_finite() {
        let q = quarter.rem_euclid(4.0) as u32;
        return quadrant(q);
    }
    degrees.to_radians().sin_cos()
}

fn quadrant(q: u32) -> (f64, f64) {
    match q % 4 {
        0 => (0.0, 1.0),
        1 => (1.0, 0.0),
        2 => (0.0, -1.0),
        _ => (-1.0, 0.0),
    }
}

/// Rotation matrix for `degrees` about `axis` (right-handed).
///
/// Principal axes build the matrix directly from [`sin_cos_degrees`] so quarter
/// turns map integer coordinates to integer coordinates. Other axes are
/// normalized first; a zero axis yields the identity.
///
/// # Example
///
/// ```rust
/// use bcg_mesh::trig::rotation;
/// use glam::DVec3;
///
/// let m = rotation(DVec3::Z, 90.0);
/// assert_eq!(m.transform_point3(DVec3::X), DVec3::Y);
/// ```
pub fn rotation(axis: DVec3, degrees: f64) -> DMat4 {
    let (s, c) = sin_cos_degrees(degrees);
    if axis == DVec3::X {
        DMat4::from_cols(
            [1.0, 0.0, 0.0, 0.0].into(),
            [0.0, c, s, 0.0].into(),
            [0.0, -s, c, 0.0].into(),
            [0.0, 0.0, 0.0, 1.0].into(),
        )
    } else if axis == DVec3::Y {
        DMat4::from_cols(
            [c, 0.0, -s, 0.0].into(),
            [0.0, 1.0, 0.0, 0.0].into(),
            [s, 0.0, c, 0.0].into(),
            [0.0, 0.0, 0.0, 1.0].into(),
        )
    } else if axis == DVec3::Z {
        DMat4::from_cols(
            [c, s, 0.0, 0.0].into(),
            [-s, c, 0.0, 0.0].into(),
            [0.0, 0.0, 1.0, 0.0].into(),
            [0.0, 0.0, 0.0, 1.0].into(),
        )
    } else {
        match axis.try_normalize() {
            Some(unit) => DMat4::from_axis_angle(unit, degrees.to_radians()),
            None => DMat4::IDENTITY,
        }
    }
}
