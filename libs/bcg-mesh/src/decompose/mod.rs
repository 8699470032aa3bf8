//! # Profile Decomposition
//!
//! Splits a revolution profile into maximal convex runs so a non-convex
//! silhouette can be built as a union of convex hulls.
//!
//! ## Turn Test
//!
//! In the `(radius, z)` plane (radius as x) the solid lies to the left of a
//! profile walked bottom to top. A clockwise turn (`orient2d < 0`) is a concave
//! corner and ends the current run. The predicate is evaluated with
//! `robust::orient2d` so collinear points never flip sign through rounding.
//!
//! ## Boundaries
//!
//! Neighbouring runs overlap by `epsilon` in z so their union has no
//! zero-thickness seam:
//!
//! - flat step outward, or concave corner with growing radius: the closing run
//!   is extended up by `(r, z + ε)`
//! - flat step inward, or concave corner with shrinking radius: the next run
//!   starts at `(r, z - ε)`

use crate::error::MeshError;
use crate::profile::{validate_profile, ProfilePoint};
use robust::{orient2d, Coord};

/// A run of profile points under construction.
#[derive(Debug, Default)]
struct Run {
    points: Vec<ProfilePoint>,
    /// Points taken from the input (synthetic nudges excluded)
    real: usize,
}

impl Run {
    fn starting_with(points: &[ProfilePoint], real: usize) -> Self {
        Self {
            points: points.to_vec(),
            real,
        }
    }

    fn push_real(&mut self, p: ProfilePoint) {
        self.points.push(p);
        self.real += 1;
    }

    fn push_nudge(&mut self, p: ProfilePoint) {
        self.points.push(p);
    }

    fn finish(self, groups: &mut Vec<Vec<ProfilePoint>>) {
        if self.real >= 2 && !self.points.iter().all(ProfilePoint::is_pole) {
            groups.push(self.points);
        }
    }
}

fn coord(p: ProfilePoint) -> Coord<f64> {
    Coord {
        x: p.radius,
        y: p.z,
    }
}

/// Splits `profile` into convex groups.
///
/// Each returned group is itself a valid open profile (≥2 points, z
/// non-decreasing). Groups with fewer than two input points, or made only of
/// poles, are dropped.
///
/// # Errors
///
/// [`MeshError::InvalidProfile`] if the profile breaks the sweep contract
/// (fewer than 2 points, decreasing z, negative radius) or `epsilon` is not a
/// positive number.
///
/// # Example
///
/// ```rust
/// use bcg_mesh::{decompose_profile, ProfilePoint};
///
/// // Narrow shaft widening into a head: concave at (0.3, 0)
/// let profile = [
///     ProfilePoint::new(0.3, -2.0),
///     ProfilePoint::new(0.3, 0.0),
///     ProfilePoint::new(0.5, 0.5),
///     ProfilePoint::new(0.5, 2.0),
/// ];
/// let groups = decompose_profile(&profile, 1e-3).unwrap();
/// assert_eq!(groups.len(), 2);
/// ```
pub fn decompose_profile(
    profile: &[ProfilePoint],
    epsilon: f64,
) -> Result<Vec<Vec<ProfilePoint>>, MeshError> {
    if !epsilon.is_finite() || epsilon <= 0.0 {
        return Err(MeshError::invalid_profile(format!(
            "decomposition epsilon must be positive: {epsilon}"
        )));
    }
    validate_profile(profile, false)?;

    let mut groups = Vec::new();
    let mut run = Run::starting_with(&profile[..1], 1);
    // Start of the previous segment inside the current run
    let mut previous: Option<ProfilePoint> = None;

    for pair in profile.windows(2) {
        let (a, b) = (pair[0], pair[1]);
        if a == b {
            continue;
        }

        if b.z == a.z {
            let next = if b.radius >= a.radius {
                run.push_nudge(ProfilePoint::new(a.radius, a.z + epsilon));
                Run::starting_with(&[b], 1)
            } else {
                Run::starting_with(&[ProfilePoint::new(b.radius, b.z - epsilon), b], 1)
            };
            std::mem::replace(&mut run, next).finish(&mut groups);
            previous = None;
            continue;
        }

        let concave = previous
            .map(|start| orient2d(coord(start), coord(a), coord(b)) < 0.0)
            .unwrap_or(false);

        if concave {
            let next = if b.radius >= a.radius {
                run.push_nudge(ProfilePoint::new(a.radius, a.z + epsilon));
                Run::starting_with(&[a, b], 2)
            } else {
                Run::starting_with(&[ProfilePoint::new(a.radius, a.z - epsilon), a, b], 2)
            };
            std::mem::replace(&mut run, next).finish(&mut groups);
        } else {
            run.push_real(b);
        }
        previous = Some(a);
    }

    run.finish(&mut groups);
    Ok(groups)
}
