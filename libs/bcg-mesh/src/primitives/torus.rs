//! # Torus Primitive
//!
//! A circular looping profile swept around the z axis.

use super::sweep::sweep_profile;
use crate::error::MeshError;
use crate::mesh::Mesh;
use crate::profile::ProfilePoint;
use crate::trig::sin_cos_turn;

/// Creates a torus around the z axis.
///
/// # Arguments
///
/// * `major_radius` - Distance from the axis to the tube center
/// * `minor_radius` - Tube radius, strictly less than `major_radius`
/// * `facets` - Segments around the z axis
/// * `tube_facets` - Segments around the tube
///
/// # Example
///
/// ```rust
/// use bcg_mesh::primitives::create_torus;
///
/// let mesh = create_torus(3.0, 1.0, 12, 6).unwrap();
/// assert_eq!(mesh.vertex_count(), 72);
/// assert_eq!(mesh.face_count(), 72);
/// ```
pub fn create_torus(
    major_radius: f64,
    minor_radius: f64,
    facets: u32,
    tube_facets: u32,
) -> Result<Mesh, MeshError> {
    if !minor_radius.is_finite() || minor_radius <= 0.0 {
        return Err(MeshError::degenerate(format!(
            "Torus tube radius must be positive: {minor_radius}"
        )));
    }
    if !major_radius.is_finite() || major_radius <= minor_radius {
        return Err(MeshError::degenerate(format!(
            "Torus major radius {major_radius} must exceed tube radius {minor_radius}"
        )));
    }

    // Counter-clockwise in the (radius, z) plane keeps the winding outward
    let profile: Vec<ProfilePoint> = (0..tube_facets)
        .map(|j| {
            let (s, c) = sin_cos_turn(j, tube_facets);
            ProfilePoint::new(major_radius + minor_radius * c, minor_radius * s)
        })
        .collect();

    sweep_profile(&profile, facets, true)
}
