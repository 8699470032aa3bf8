//! # Mesh Data Structure
//!
//! Polygon mesh with shared vertices and ordered faces.

use config::constants::AREA_EPSILON;
use glam::{DMat4, DVec3};
use serde::{Deserialize, Serialize};

/// A polygon mesh: vertex positions plus faces indexing into them.
///
/// Faces are ordered vertex index lists with at least three entries. Winding
/// is counter-clockwise when viewed from outside, so the Newell normal of
/// every face points outward. A mesh without vertices is the "empty"
/// sentinel that joins silently discard.
///
/// # Example
///
/// ```rust
/// use bcg_mesh::Mesh;
/// use glam::DVec3;
///
/// let mut mesh = Mesh::new();
/// let a = mesh.add_vertex(DVec3::new(0.0, 0.0, 0.0));
/// let b = mesh.add_vertex(DVec3::new(1.0, 0.0, 0.0));
/// let c = mesh.add_vertex(DVec3::new(0.0, 1.0, 0.0));
/// mesh.add_face([a, b, c]);
/// assert!(mesh.validate());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Mesh {
    /// Vertex positions (f64 for precision)
    vertices: Vec<DVec3>,
    /// Faces as vertex index lists
    faces: Vec<Vec<u32>>,
}

impl Mesh {
    /// Creates an empty mesh.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a mesh with pre-allocated capacity.
    pub fn with_capacity(vertex_count: usize, face_count: usize) -> Self {
        Self {
            vertices: Vec::with_capacity(vertex_count),
            faces: Vec::with_capacity(face_count),
        }
    }

    /// Creates a mesh from raw parts without validation.
    pub fn from_parts(vertices: Vec<DVec3>, faces: Vec<Vec<u32>>) -> Self {
        Self { vertices, faces }
    }

    /// Returns the number of vertices.
    #[inline]
    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    /// Returns the number of faces.
    #[inline]
    pub fn face_count(&self) -> usize {
        self.faces.len()
    }

    /// Returns the number of triangles a fan triangulation would produce.
    pub fn triangle_count(&self) -> usize {
        self.faces
            .iter()
            .map(|f| f.len().saturating_sub(2))
            .sum()
    }

    /// Returns true if the mesh has no vertices.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    /// Adds a vertex and returns its index.
    pub fn add_vertex(&mut self, position: DVec3) -> u32 {
        let index = self.vertices.len() as u32;
        self.vertices.push(position);
        index
    }

    /// Adds a face by vertex indices.
    pub fn add_face(&mut self, face: impl Into<Vec<u32>>) {
        self.faces.push(face.into());
    }

    /// Returns a reference to the vertices.
    #[inline]
    pub fn vertices(&self) -> &[DVec3] {
        &self.vertices
    }

    /// Returns a reference to the faces.
    #[inline]
    pub fn faces(&self) -> &[Vec<u32>] {
        &self.faces
    }

    /// Returns the vertex at the given index.
    #[inline]
    pub fn vertex(&self, index: u32) -> DVec3 {
        self.vertices[index as usize]
    }

    /// Returns the face at the given index.
    #[inline]
    pub fn face(&self, index: usize) -> &[u32] {
        &self.faces[index]
    }

    /// Computes the axis-aligned bounding box.
    ///
    /// Returns (min, max) corners of the bounding box.
    pub fn bounding_box(&self) -> (DVec3, DVec3) {
        if self.vertices.is_empty() {
            return (DVec3::ZERO, DVec3::ZERO);
        }

        let mut min = self.vertices[0];
        let mut max = self.vertices[0];

        for v in &self.vertices[1..] {
            min = min.min(*v);
            max = max.max(*v);
        }

        (min, max)
    }

    /// Transforms all vertices by a 4x4 affine matrix.
    pub fn transform(&mut self, matrix: &DMat4) {
        for v in &mut self.vertices {
            *v = matrix.transform_point3(*v);
        }
    }

    /// Translates the mesh by a vector.
    pub fn translate(&mut self, offset: DVec3) {
        for v in &mut self.vertices {
            *v += offset;
        }
    }

    /// Merges another mesh into this one.
    pub fn merge(&mut self, other: &Mesh) {
        let offset = self.vertices.len() as u32;

        self.vertices.extend_from_slice(&other.vertices);
        self.faces.extend(
            other
                .faces
                .iter()
                .map(|face| face.iter().map(|i| i + offset).collect::<Vec<_>>()),
        );
    }

    /// Concatenates meshes into one, discarding empty inputs.
    ///
    /// Joining nothing yields the empty sentinel and joining a single
    /// non-empty mesh returns it unchanged.
    ///
    /// # Example
    ///
    /// ```rust
    /// use bcg_mesh::Mesh;
    ///
    /// let joined = Mesh::join(Vec::<Mesh>::new());
    /// assert!(joined.is_empty());
    /// ```
    pub fn join<I>(meshes: I) -> Mesh
    where
        I: IntoIterator<Item = Mesh>,
    {
        let mut iter = meshes.into_iter().filter(|m| !m.is_empty());
        let Some(mut result) = iter.next() else {
            return Mesh::new();
        };
        for mesh in iter {
            result.merge(&mesh);
        }
        result
    }

    /// Newell normal of a face.
    ///
    /// The length equals twice the face area, so degenerate faces return a
    /// (near) zero vector.
    pub fn face_normal(&self, index: usize) -> DVec3 {
        let face = &self.faces[index];
        let mut normal = DVec3::ZERO;
        for (k, &i) in face.iter().enumerate() {
            let current = self.vertices[i as usize];
            let next = self.vertices[face[(k + 1) % face.len()] as usize];
            normal.x += (current.y - next.y) * (current.z + next.z);
            normal.y += (current.z - next.z) * (current.x + next.x);
            normal.z += (current.x - next.x) * (current.y + next.y);
        }
        normal
    }

    /// Area of a face.
    pub fn face_area(&self, index: usize) -> f64 {
        self.face_normal(index).length() * 0.5
    }

    /// Average of a face's vertex positions.
    pub fn face_centroid(&self, index: usize) -> DVec3 {
        let face = &self.faces[index];
        let sum: DVec3 = face.iter().map(|&i| self.vertices[i as usize]).sum();
        sum / face.len() as f64
    }

    /// Signed enclosed volume.
    ///
    /// Positive for closed meshes with outward winding, negative when every
    /// face is inverted.
    pub fn signed_volume(&self) -> f64 {
        let mut volume = 0.0;
        for face in &self.faces {
            if face.len() < 3 {
                continue;
            }
            let v0 = self.vertices[face[0] as usize];
            for k in 1..face.len() - 1 {
                let v1 = self.vertices[face[k] as usize];
                let v2 = self.vertices[face[k + 1] as usize];
                volume += v0.dot(v1.cross(v2));
            }
        }
        volume / 6.0
    }

    /// Validates the mesh for correctness.
    ///
    /// Checks:
    /// - All face indices are valid
    /// - Every face has at least 3 distinct vertices
    /// - No degenerate faces (zero area)
    ///
    /// Returns true if valid.
    pub fn validate(&self) -> bool {
        let vertex_count = self.vertices.len() as u32;

        for (index, face) in self.faces.iter().enumerate() {
            if face.len() < 3 {
                return false;
            }
            if face.iter().any(|&i| i >= vertex_count) {
                return false;
            }
            for (k, i) in face.iter().enumerate() {
                if face[k + 1..].contains(i) {
                    return false;
                }
            }
            if self.face_area(index) < AREA_EPSILON {
                return false;
            }
        }

        true
    }
}
