//! # Polyhedron Primitive
//!
//! Raw vertex/face input from the authoring script.

use crate::error::MeshError;
use crate::mesh::Mesh;
use glam::DVec3;

/// Creates a mesh from explicit vertices and faces.
///
/// Faces must have at least 3 distinct indices, all in range. Winding is taken
/// as given.
///
/// # Example
///
/// ```rust
/// use bcg_mesh::primitives::create_polyhedron;
/// use glam::DVec3;
///
/// let mesh = create_polyhedron(
///     vec![DVec3::ZERO, DVec3::X, DVec3::Y, DVec3::Z],
///     vec![vec![0, 2, 1], vec![0, 1, 3], vec![1, 2, 3], vec![0, 3, 2]],
/// )
/// .unwrap();
/// assert_eq!(mesh.face_count(), 4);
/// ```
pub fn create_polyhedron(vertices: Vec<DVec3>, faces: Vec<Vec<u32>>) -> Result<Mesh, MeshError> {
    if let Some(i) = vertices.iter().position(|v| !v.is_finite()) {
        return Err(MeshError::invalid_topology(format!(
            "vertex {i} is not finite"
        )));
    }

    let vertex_count = vertices.len() as u32;
    for (f, face) in faces.iter().enumerate() {
        if face.len() < 3 {
            return Err(MeshError::invalid_topology(format!(
                "face {f} has {} vertices, expected at least 3",
                face.len()
            )));
        }
        if let Some(&i) = face.iter().find(|&&i| i >= vertex_count) {
            return Err(MeshError::invalid_topology(format!(
                "face {f} references vertex {i}, mesh has {vertex_count}"
            )));
        }
        if face.iter().enumerate().any(|(k, i)| face[k + 1..].contains(i)) {
            return Err(MeshError::invalid_topology(format!(
                "face {f} repeats a vertex"
            )));
        }
    }

    Ok(Mesh::from_parts(vertices, faces))
}
