//! # Cube Primitive
//!
//! Generates mesh for cube and rectangular prism shapes.

use crate::error::MeshError;
use crate::mesh::Mesh;
use glam::DVec3;

/// Creates a cube or rectangular prism mesh.
///
/// # Arguments
///
/// * `size` - Dimensions [x, y, z]
/// * `center` - If true, center at origin; if false, corner at origin
///
/// # Returns
///
/// A mesh with 8 vertices and 6 quad faces.
///
/// # Example
///
/// ```rust
/// use bcg_mesh::primitives::create_cube;
/// use glam::DVec3;
///
/// let mesh = create_cube(DVec3::splat(10.0), false).unwrap();
/// assert_eq!(mesh.vertex_count(), 8);
/// assert_eq!(mesh.face_count(), 6);
/// ```
pub fn create_cube(size: DVec3, center: bool) -> Result<Mesh, MeshError> {
    if !size.is_finite() || size.min_element() <= 0.0 {
        return Err(MeshError::degenerate(format!(
            "Cube size must be positive: {size:?}"
        )));
    }

    let mut mesh = Mesh::with_capacity(8, 6);

    let (min, max) = if center {
        let half = size / 2.0;
        (-half, half)
    } else {
        (DVec3::ZERO, size)
    };

    // Bottom ring then top ring, counter-clockwise seen from +z
    let v0 = mesh.add_vertex(DVec3::new(min.x, min.y, min.z));
    let v1 = mesh.add_vertex(DVec3::new(max.x, min.y, min.z));
    let v2 = mesh.add_vertex(DVec3::new(max.x, max.y, min.z));
    let v3 = mesh.add_vertex(DVec3::new(min.x, max.y, min.z));
    let v4 = mesh.add_vertex(DVec3::new(min.x, min.y, max.z));
    let v5 = mesh.add_vertex(DVec3::new(max.x, min.y, max.z));
    let v6 = mesh.add_vertex(DVec3::new(max.x, max.y, max.z));
    let v7 = mesh.add_vertex(DVec3::new(min.x, max.y, max.z));

    mesh.add_face([v0, v3, v2, v1]); // bottom
    mesh.add_face([v4, v5, v6, v7]); // top
    mesh.add_face([v0, v1, v5, v4]); // front (y = min)
    mesh.add_face([v2, v3, v7, v6]); // back (y = max)
    mesh.add_face([v3, v0, v4, v7]); // left (x = min)
    mesh.add_face([v1, v2, v6, v5]); // right (x = max)

    Ok(mesh)
}
