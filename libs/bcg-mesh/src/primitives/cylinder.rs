//! # Cylinder Primitive
//!
//! Cylinders and cones as two-point profile sweeps.

use super::sweep::sweep_profile;
use crate::error::MeshError;
use crate::mesh::Mesh;
use crate::profile::ProfilePoint;

/// Creates a cylinder, cone or frustum around the z axis.
///
/// # Arguments
///
/// * `height` - Height along z
/// * `r1` - Bottom radius (0 for a cone pointing down)
/// * `r2` - Top radius (0 for a cone pointing up)
/// * `center` - Center along z instead of starting at z = 0
/// * `facets` - Segments around the axis
///
/// # Example
///
/// ```rust
/// use bcg_mesh::primitives::create_cylinder;
///
/// let mesh = create_cylinder(2.0, 1.0, 1.0, false, 4).unwrap();
/// assert_eq!(mesh.vertex_count(), 8);
/// assert_eq!(mesh.face_count(), 6);
/// ```
pub fn create_cylinder(
    height: f64,
    r1: f64,
    r2: f64,
    center: bool,
    facets: u32,
) -> Result<Mesh, MeshError> {
    if !height.is_finite() || height <= 0.0 {
        return Err(MeshError::degenerate(format!(
            "Cylinder height must be positive: {height}"
        )));
    }
    if r1 < 0.0 || r2 < 0.0 {
        return Err(MeshError::degenerate(format!(
            "Cylinder radii must be non-negative: r1={r1}, r2={r2}"
        )));
    }
    if r1 == 0.0 && r2 == 0.0 {
        return Err(MeshError::degenerate("Cylinder needs a non-zero radius"));
    }

    let z0 = if center { -height / 2.0 } else { 0.0 };
    sweep_profile(
        &[ProfilePoint::new(r1, z0), ProfilePoint::new(r2, z0 + height)],
        facets,
        false,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::DVec3;

    #[test]
    fn test_cylinder_counts() {
        let mesh = create_cylinder(10.0, 5.0, 5.0, false, 32).unwrap();
        assert_eq!(mesh.vertex_count(), 64);
        assert_eq!(mesh.face_count(), 34);
        assert!(mesh.validate());
    }

    #[test]
    fn test_cylinder_centered() {
        let mesh = create_cylinder(10.0, 5.0, 5.0, true, 16).unwrap();
        let (min, max) = mesh.bounding_box();
        assert_eq!(min.z, -5.0);
        assert_eq!(max.z, 5.0);
        assert_eq!(max.x, 5.0);
    }

    #[test]
    fn test_cone_apex() {
        let mesh = create_cylinder(3.0, 2.0, 0.0, false, 8).unwrap();
        assert_eq!(mesh.vertex_count(), 9);
        assert!(mesh.vertices().contains(&DVec3::new(0.0, 0.0, 3.0)));
        assert!(mesh.signed_volume() > 0.0);
    }

    #[test]
    fn test_cylinder_invalid() {
        assert!(create_cylinder(0.0, 1.0, 1.0, false, 8).is_err());
        assert!(create_cylinder(1.0, 0.0, 0.0, false, 8).is_err());
        assert!(create_cylinder(1.0, -1.0, 1.0, false, 8).is_err());
        assert!(create_cylinder(1.0, 1.0, 1.0, false, 2).is_err());
        assert!(create_cylinder(f64::NAN, 1.0, 1.0, false, 8).is_err());
    }
}
