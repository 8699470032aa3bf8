//! # Boolean Operations (CSG)
//!
//! Constructive Solid Geometry operations using BSP trees.
//!
//! ## Algorithm
//!
//! Based on the csg.js algorithm by Evan Wallace:
//! - Union: A.clipTo(B); B.clipTo(A); B.invert(); B.clipTo(A); B.invert(); A.build(B)
//! - Difference: A.invert(); A.clipTo(B); B.clipTo(A); B.invert(); B.clipTo(A); B.invert(); A.build(B); A.invert()
//! - Intersection: A.invert(); B.clipTo(A); B.invert(); A.clipTo(B); B.clipTo(A); A.build(B); A.invert()
//!
//! `epsilon` is the plane thickness used to classify points; see
//! [`SolverHint`](crate::host::SolverHint).
//!
//! ## Example
//!
//! ```rust
//! use bcg_mesh::ops::boolean::difference;
//! use bcg_mesh::primitives::create_cube;
//! use glam::DVec3;
//!
//! let a = create_cube(DVec3::splat(1.0), false).unwrap();
//! let result = difference(&a, &a, 1e-9).unwrap();
//! assert!(result.is_empty());
//! ```

mod bsp;
mod plane;
mod polygon;


use crate::error::MeshError;
use crate::mesh::Mesh;
use bsp::BspNode;
use glam::DVec3;
use polygon::Polygon;
use std::collections::HashMap;

// =============================================================================
// PUBLIC API
// =============================================================================

/// Compute union of two meshes.
pub fn union(a: &Mesh, b: &Mesh, epsilon: f64) -> Result<Mesh, MeshError> {
    let polys_a = mesh_to_polygons(a, epsilon)?;
    let polys_b = mesh_to_polygons(b, epsilon)?;

    if polys_a.is_empty() {
        return Ok(b.clone());
    }
    if polys_b.is_empty() {
        return Ok(a.clone());
    }
    if bounds_disjoint(a, b, epsilon) {
        return Ok(Mesh::join([a.clone(), b.clone()]));
    }

    let mut bsp_a = BspNode::new(polys_a, epsilon);
    let mut bsp_b = BspNode::new(polys_b, epsilon);

    bsp_a.clip_to(&bsp_b);
    bsp_b.clip_to(&bsp_a);
    bsp_b.invert();
    bsp_b.clip_to(&bsp_a);
    bsp_b.invert();
    bsp_a.build(bsp_b.all_polygons());

    Ok(polygons_to_mesh(&bsp_a.all_polygons()))
}

/// Compute difference of two meshes (A - B).
pub fn difference(a: &Mesh, b: &Mesh, epsilon: f64) -> Result<Mesh, MeshError> {
    let polys_a = mesh_to_polygons(a, epsilon)?;
    let polys_b = mesh_to_polygons(b, epsilon)?;

    if polys_a.is_empty() {
        return Ok(Mesh::new());
    }
    if polys_b.is_empty() || bounds_disjoint(a, b, epsilon) {
        return Ok(a.clone());
    }

    let mut bsp_a = BspNode::new(polys_a, epsilon);
    let mut bsp_b = BspNode::new(polys_b, epsilon);

    // A - B = ~(~A | B)
    bsp_a.invert();
    bsp_a.clip_to(&bsp_b);
    bsp_b.clip_to(&bsp_a);
    bsp_b.invert();
    bsp_b.clip_to(&bsp_a);
    bsp_b.invert();
    bsp_a.build(bsp_b.all_polygons());
    bsp_a.invert();

    Ok(polygons_to_mesh(&bsp_a.all_polygons()))
}

/// Compute intersection of two meshes.
pub fn intersection(a: &Mesh, b: &Mesh, epsilon: f64) -> Result<Mesh, MeshError> {
    let polys_a = mesh_to_polygons(a, epsilon)?;
    let polys_b = mesh_to_polygons(b, epsilon)?;

    if polys_a.is_empty() || polys_b.is_empty() || bounds_disjoint(a, b, epsilon) {
        return Ok(Mesh::new());
    }

    let mut bsp_a = BspNode::new(polys_a, epsilon);
    let mut bsp_b = BspNode::new(polys_b, epsilon);

    // A & B = ~(~A | ~B)
    bsp_a.invert();
    bsp_b.clip_to(&bsp_a);
    bsp_b.invert();
    bsp_a.clip_to(&bsp_b);
    bsp_b.clip_to(&bsp_a);
    bsp_a.build(bsp_b.all_polygons());
    bsp_a.invert();

    Ok(polygons_to_mesh(&bsp_a.all_polygons()))
}

/// True when the bounding boxes are separated by more than `epsilon` on
/// some axis.
fn bounds_disjoint(a: &Mesh, b: &Mesh, epsilon: f64) -> bool {
    let (min_a, max_a) = a.bounding_box();
    let (min_b, max_b) = b.bounding_box();
    (0..3).any(|axis| min_b[axis] - max_a[axis] > epsilon || min_a[axis] - max_b[axis] > epsilon)
}

// =============================================================================
// CONVERSION
// =============================================================================

/// Converts mesh faces to BSP polygons.
///
/// Zero-area faces are dropped. Non-planar faces are fan-triangulated.
fn mesh_to_polygons(mesh: &Mesh, epsilon: f64) -> Result<Vec<Polygon>, MeshError> {
    let vertices = mesh.vertices();
    if let Some(i) = vertices.iter().position(|v| !v.is_finite()) {
        return Err(MeshError::boolean_failed(format!(
            "operand vertex {i} is not finite"
        )));
    }

    let mut polygons = Vec::with_capacity(mesh.face_count());
    for (f, face) in mesh.faces().iter().enumerate() {
        let points = face
            .iter()
            .map(|&i| {
                vertices.get(i as usize).copied().ok_or_else(|| {
                    MeshError::boolean_failed(format!("face {f} references missing vertex {i}"))
                })
            })
            .collect::<Result<Vec<DVec3>, MeshError>>()?;

        let Some(poly) = Polygon::from_vertices(points.clone()) else {
            continue;
        };
        let planar = points
            .iter()
            .all(|p| poly.plane().signed_distance(*p).abs() <= epsilon);
        if planar {
            polygons.push(poly);
        } else {
            polygons.extend(
                (1..points.len() - 1)
                    .filter_map(|k| {
                        Polygon::from_vertices(vec![points[0], points[k], points[k + 1]])
                    }),
            );
        }
    }
    Ok(polygons)
}

/// Converts BSP polygons back to a mesh, welding identical positions.
fn polygons_to_mesh(polygons: &[Polygon]) -> Mesh {
    let mut mesh = Mesh::new();
    let mut index: HashMap<[u64; 3], u32> = HashMap::new();

    for poly in polygons {
        let mut face: Vec<u32> = Vec::with_capacity(poly.vertices().len());
        for v in poly.vertices() {
            // + 0.0 folds -0.0 into 0.0 before hashing bits
            let v = *v + DVec3::ZERO;
            let key = [v.x.to_bits(), v.y.to_bits(), v.z.to_bits()];
            let i = *index.entry(key).or_insert_with(|| mesh.add_vertex(v));
            if face.last() != Some(&i) {
                face.push(i);
            }
        }
        while face.len() > 1 && face.first() == face.last() {
            face.pop();
        }
        if face.len() >= 3 {
            mesh.add_face(face);
        }
    }

    mesh
}
