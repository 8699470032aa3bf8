//! # Sphere Primitive
//!
//! Latitude rings between two poles.

use super::sweep::sweep_profile;
use crate::error::MeshError;
use crate::mesh::Mesh;
use crate::profile::ProfilePoint;
use crate::trig::sin_cos_turn;

/// Creates a sphere centered at the origin.
///
/// `stacks` latitude bands run from the south pole to the north pole, so the
/// mesh has `(stacks - 1) * facets + 2` vertices and `stacks * facets` faces.
///
/// # Example
///
/// ```rust
/// use bcg_mesh::primitives::create_sphere;
///
/// let mesh = create_sphere(1.0, 32, 20).unwrap();
/// assert_eq!(mesh.vertex_count(), 19 * 32 + 2);
/// assert_eq!(mesh.face_count(), 20 * 32);
/// ```
pub fn create_sphere(radius: f64, facets: u32, stacks: u32) -> Result<Mesh, MeshError> {
    if !radius.is_finite() || radius <= 0.0 {
        return Err(MeshError::degenerate(format!(
            "Sphere radius must be positive: {radius}"
        )));
    }
    if stacks < 2 {
        return Err(MeshError::degenerate(format!(
            "Sphere needs at least 2 stacks, got {stacks}"
        )));
    }

    // Polar angle π·i/stacks is a half turn split into `stacks` steps
    let profile: Vec<ProfilePoint> = (0..=stacks)
        .map(|i| {
            let (s, c) = sin_cos_turn(i, 2 * stacks);
            ProfilePoint::new(radius * s, -radius * c)
        })
        .collect();

    sweep_profile(&profile, facets, false)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sphere_counts() {
        let mesh = create_sphere(2.0, 8, 4).unwrap();
        assert_eq!(mesh.vertex_count(), 3 * 8 + 2);
        assert_eq!(mesh.face_count(), 32);
        assert!(mesh.validate());
    }

    #[test]
    fn test_sphere_poles_are_exact() {
        let mesh = create_sphere(2.0, 8, 4).unwrap();
        let (min, max) = mesh.bounding_box();
        assert_eq!(min.z, -2.0);
        assert_eq!(max.z, 2.0);
        assert_eq!(max.x, 2.0);
    }

    #[test]
    fn test_sphere_volume_approaches_ball() {
        let mesh = create_sphere(1.0, 64, 32).unwrap();
        let ball = 4.0 / 3.0 * std::f64::consts::PI;
        let v = mesh.signed_volume();
        assert!(v > 0.95 * ball && v < ball);
    }

    #[test]
    fn test_sphere_invalid() {
        assert!(create_sphere(0.0, 8, 4).is_err());
        assert!(create_sphere(1.0, 8, 1).is_err());
        assert!(create_sphere(f64::NAN, 8, 4).is_err());
        assert!(create_sphere(f64::INFINITY, 8, 4).is_err());
    }
}
