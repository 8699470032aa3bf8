//! # Revolution Profiles
//!
//! A profile is an ordered list of `(radius, z)` cross-sections swept around
//! the z axis. Radius zero is a pole: the ring collapses to a single vertex.

use crate::error::MeshError;
use serde::{Deserialize, Serialize};

/// One cross-section of a surface of revolution.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ProfilePoint {
    /// Distance from the z axis
    pub radius: f64,
    /// Height of the ring
    pub z: f64,
}

impl ProfilePoint {
    /// Creates a profile point.
    pub const fn new(radius: f64, z: f64) -> Self {
        Self { radius, z }
    }

    /// Returns true if this cross-section collapses to a single vertex.
    #[inline]
    pub fn is_pole(&self) -> bool {
        self.radius == 0.0
    }
}

impl From<(f64, f64)> for ProfilePoint {
    fn from((radius, z): (f64, f64)) -> Self {
        Self::new(radius, z)
    }
}

/// Checks the sweep contract for a profile.
///
/// Open profiles need at least 2 points with finite, non-negative radii and
/// non-decreasing z, and at least one point off the axis. Looping profiles (tori) need at least 3 points and no
/// poles; the z ordering does not apply to them since they return to their
/// start.
///
/// # Example
///
/// ```rust
/// use bcg_mesh::profile::{validate_profile, ProfilePoint};
///
/// let ok = [ProfilePoint::new(1.0, 0.0), ProfilePoint::new(1.0, 1.0)];
/// assert!(validate_profile(&ok, false).is_ok());
///
/// let bad = [ProfilePoint::new(1.0, 1.0), ProfilePoint::new(1.0, 0.0)];
/// assert!(validate_profile(&bad, false).is_err());
/// ```
pub fn validate_profile(profile: &[ProfilePoint], looped: bool) -> Result<(), MeshError> {
    let min_points = if looped { 3 } else { 2 };
    if profile.len() < min_points {
        return Err(MeshError::invalid_profile(format!(
            "expected at least {min_points} points, got {}",
            profile.len()
        )));
    }

    for (i, p) in profile.iter().enumerate() {
        if !p.radius.is_finite() || !p.z.is_finite() {
            return Err(MeshError::invalid_profile(format!(
                "point {i} is not finite: ({}, {})",
                p.radius, p.z
            )));
        }
        if p.radius < 0.0 {
            return Err(MeshError::invalid_profile(format!(
                "point {i} has negative radius {}",
                p.radius
            )));
        }
        if looped && p.is_pole() {
            return Err(MeshError::invalid_profile(format!(
                "looping profile has a pole at point {i}"
            )));
        }
    }

    if profile.iter().all(ProfilePoint::is_pole) {
        return Err(MeshError::invalid_profile(
            "every point lies on the axis, the sweep has no surface",
        ));
    }

    if !looped {
        if let Some(i) = profile.windows(2).position(|w| w[1].z < w[0].z) {
            return Err(MeshError::invalid_profile(format!(
                "z decreases between points {i} and {}",
                i + 1
            )));
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn points(raw: &[(f64, f64)]) -> Vec<ProfilePoint> {
        raw.iter().copied().map(ProfilePoint::from).collect()
    }

    #[test]
    fn test_pole_detection() {
        assert!(ProfilePoint::new(0.0, 3.0).is_pole());
        assert!(!ProfilePoint::new(0.5, 3.0).is_pole());
    }

    #[test]
    fn test_too_few_points() {
        assert!(matches!(
            validate_profile(&points(&[(1.0, 0.0)]), false),
            Err(MeshError::InvalidProfile { .. })
        ));
        assert!(validate_profile(&points(&[(1.0, 0.0), (1.0, 1.0)]), true).is_err());
    }

    #[test]
    fn test_decreasing_z_rejected() {
        let err = validate_profile(&points(&[(1.0, 0.0), (1.0, 2.0), (1.0, 1.0)]), false)
            .unwrap_err();
        assert!(err.to_string().contains("between points 1 and 2"));
    }

    #[test]
    fn test_axis_only_profile_rejected() {
        let err = validate_profile(&points(&[(0.0, 0.0), (0.0, 1.0)]), false).unwrap_err();
        assert!(matches!(err, MeshError::InvalidProfile { .. }));
        assert!(validate_profile(&points(&[(0.0, 0.0), (1.0, 0.5), (0.0, 1.0)]), false).is_ok());
    }

    #[test]
    fn test_flat_steps_allowed() {
        assert!(validate_profile(&points(&[(1.0, 0.0), (2.0, 0.0), (2.0, 1.0)]), false).is_ok());
    }

    #[test]
    fn test_negative_and_nan_rejected() {
        assert!(validate_profile(&points(&[(-1.0, 0.0), (1.0, 1.0)]), false).is_err());
        assert!(validate_profile(&points(&[(f64::NAN, 0.0), (1.0, 1.0)]), false).is_err());
    }

    #[test]
    fn test_looped_profile_ignores_z_order_but_rejects_poles() {
        let ring = points(&[(2.0, 0.0), (3.0, 1.0), (2.0, 0.5)]);
        assert!(validate_profile(&ring, true).is_ok());

        let with_pole = points(&[(0.0, 0.0), (3.0, 1.0), (2.0, 0.5)]);
        assert!(validate_profile(&with_pole, true).is_err());
    }
}
