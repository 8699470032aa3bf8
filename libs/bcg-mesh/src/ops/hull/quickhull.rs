//! # QuickHull Algorithm
//!
//! 3D convex hull computation using the QuickHull algorithm.
//! Based on the original algorithm by Barber, Dobkin, and Huhdanpaa.
//!
//! ## Algorithm Steps
//!
//! 1. Find 6 extreme points (min/max on each axis)
//! 2. Build initial tetrahedron from 4 non-coplanar points
//! 3. Assign remaining points to faces they're outside of
//! 4. For each face with outside points:
//!    a. Find farthest point
//!    b. Find horizon edges (boundary of visible faces)
//!    c. Create new faces from horizon to farthest point
//!    d. Reassign outside points to the updated face set
//! 5. Repeat until no faces have outside points
//!
//! Faces are kept counter-clockwise seen from outside, so a horizon edge
//! `(a, b)` taken from a visible face yields the new face `(a, b, apex)`
//! with the same orientation.

use crate::error::MeshError;
use crate::mesh::Mesh;
use config::constants::HULL_EPSILON;
use glam::DVec3;
use std::collections::{HashMap, HashSet};
use tracing::trace;

/// Computes the convex hull of a point set as a triangle mesh.
///
/// # Errors
///
/// [`MeshError::HullFailed`] when fewer than 4 distinct points are given or
/// the points are collinear or coplanar.
pub fn convex_hull(points: &[DVec3]) -> Result<Mesh, MeshError> {
    if let Some(i) = points.iter().position(|p| !p.is_finite()) {
        return Err(MeshError::hull_failed(format!("point {i} is not finite")));
    }

    let unique_points = remove_duplicates(points);
    if unique_points.len() < 4 {
        return Err(MeshError::hull_failed(format!(
            "convex hull requires at least 4 distinct points, got {}",
            unique_points.len()
        )));
    }

    let tolerance = HULL_EPSILON * scale(&unique_points);
    let faces = build_initial_simplex(&unique_points, tolerance)?;
    let faces = quickhull_iterate(faces, &unique_points, tolerance);

    trace!(
        input = points.len(),
        faces = faces.len(),
        "convex hull computed"
    );
    Ok(faces_to_mesh(&faces, &unique_points, tolerance))
}

// =============================================================================
// HULL FACE
// =============================================================================

#[derive(Debug, Clone)]
struct HullFace {
    vertices: [usize; 3],
    normal: DVec3,
    distance: f64,
    outside_points: Vec<usize>,
}

impl HullFace {
    fn new(v0: usize, v1: usize, v2: usize, points: &[DVec3]) -> Self {
        let p0 = points[v0];
        let normal = (points[v1] - p0)
            .cross(points[v2] - p0)
            .normalize_or_zero();
        Self {
            vertices: [v0, v1, v2],
            normal,
            distance: normal.dot(p0),
            outside_points: Vec::new(),
        }
    }

    fn signed_distance(&self, point: DVec3) -> f64 {
        self.normal.dot(point) - self.distance
    }

    fn farthest_point(&self, points: &[DVec3]) -> Option<usize> {
        self.outside_points.iter().copied().max_by(|&a, &b| {
            self.signed_distance(points[a])
                .total_cmp(&self.signed_distance(points[b]))
        })
    }

    fn edges(&self) -> [(usize, usize); 3] {
        let [a, b, c] = self.vertices;
        [(a, b), (b, c), (c, a)]
    }
}

// =============================================================================
// SETUP
// =============================================================================

fn remove_duplicates(points: &[DVec3]) -> Vec<DVec3> {
    let mut seen = HashSet::with_capacity(points.len());
    points
        .iter()
        .map(|p| *p + DVec3::ZERO)
        .filter(|p| seen.insert([p.x.to_bits(), p.y.to_bits(), p.z.to_bits()]))
        .collect()
}

/// Largest absolute coordinate, at least 1.
fn scale(points: &[DVec3]) -> f64 {
    points
        .iter()
        .map(|p| p.abs().max_element())
        .fold(1.0, f64::max)
}

fn build_initial_simplex(points: &[DVec3], tolerance: f64) -> Result<Vec<HullFace>, MeshError> {
    let mut extremes = [0usize; 6];
    for (i, p) in points.iter().enumerate() {
        for axis in 0..3 {
            if p[axis] < points[extremes[2 * axis]][axis] {
                extremes[2 * axis] = i;
            }
            if p[axis] > points[extremes[2 * axis + 1]][axis] {
                extremes[2 * axis + 1] = i;
            }
        }
    }

    let (p0, p1) = find_farthest_pair(&extremes, points);
    let p2 = find_farthest_from_line(p0, p1, points, tolerance)?;
    let p3 = find_farthest_from_plane(p0, p1, p2, points, tolerance)?;

    let mut faces = vec![
        HullFace::new(p0, p1, p2, points),
        HullFace::new(p0, p2, p3, points),
        HullFace::new(p0, p3, p1, points),
        HullFace::new(p1, p3, p2, points),
    ];
    // Orient outward: the opposite apex must lie behind each face
    if faces[0].signed_distance(points[p3]) > 0.0 {
        for face in &mut faces {
            let [a, b, c] = face.vertices;
            *face = HullFace::new(a, c, b, points);
        }
    }

    let used = [p0, p1, p2, p3];
    let remaining: Vec<usize> = (0..points.len()).filter(|i| !used.contains(i)).collect();
    assign_points(&mut faces, &remaining, points, tolerance);

    Ok(faces)
}

fn find_farthest_pair(indices: &[usize], points: &[DVec3]) -> (usize, usize) {
    let mut max_dist = -1.0;
    let mut best = (indices[0], indices[1]);

    for (i, &a) in indices.iter().enumerate() {
        for &b in &indices[i + 1..] {
            let dist = points[a].distance_squared(points[b]);
            if dist > max_dist {
                max_dist = dist;
                best = (a, b);
            }
        }
    }
    best
}

fn find_farthest_from_line(
    p0: usize,
    p1: usize,
    points: &[DVec3],
    tolerance: f64,
) -> Result<usize, MeshError> {
    let origin = points[p0];
    let dir = (points[p1] - origin).normalize_or_zero();

    let (best, dist) = points
        .iter()
        .enumerate()
        .map(|(i, p)| {
            let v = *p - origin;
            (i, (v - v.dot(dir) * dir).length())
        })
        .max_by(|a, b| a.1.total_cmp(&b.1))
        .unwrap_or((p0, 0.0));

    if dist <= tolerance {
        return Err(MeshError::hull_failed("all points are collinear"));
    }
    Ok(best)
}

fn find_farthest_from_plane(
    p0: usize,
    p1: usize,
    p2: usize,
    points: &[DVec3],
    tolerance: f64,
) -> Result<usize, MeshError> {
    let face = HullFace::new(p0, p1, p2, points);

    let (best, dist) = points
        .iter()
        .enumerate()
        .map(|(i, p)| (i, face.signed_distance(*p).abs()))
        .max_by(|a, b| a.1.total_cmp(&b.1))
        .unwrap_or((p0, 0.0));

    if dist <= tolerance {
        return Err(MeshError::hull_failed("all points are coplanar"));
    }
    Ok(best)
}

/// Gives each point to the first face it lies outside of.
fn assign_points(faces: &mut [HullFace], candidates: &[usize], points: &[DVec3], tolerance: f64) {
    for &idx in candidates {
        let point = points[idx];
        if let Some(face) = faces
            .iter_mut()
            .find(|f| f.signed_distance(point) > tolerance)
        {
            face.outside_points.push(idx);
        }
    }
}

// =============================================================================
// ITERATION
// =============================================================================

fn quickhull_iterate(mut faces: Vec<HullFace>, points: &[DVec3], tolerance: f64) -> Vec<HullFace> {
    while let Some(face_idx) = faces.iter().position(|f| !f.outside_points.is_empty()) {
        let Some(apex) = faces[face_idx].farthest_point(points) else {
            break;
        };
        let apex_point = points[apex];

        let (visible, kept): (Vec<HullFace>, Vec<HullFace>) = faces
            .into_iter()
            .partition(|f| f.signed_distance(apex_point) > tolerance);

        let horizon = find_horizon_edges(&visible);

        let mut orphans: Vec<usize> = visible
            .iter()
            .flat_map(|f| f.outside_points.iter().copied())
            .filter(|&p| p != apex)
            .collect();

        faces = horizon
            .into_iter()
            .map(|(a, b)| HullFace::new(a, b, apex, points))
            .collect();
        faces.extend(kept);

        // Orphans inside every face are interior and drop out
        orphans.sort_unstable();
        orphans.dedup();
        assign_points(&mut faces, &orphans, points, tolerance);
    }

    faces
}

/// Directed edges of visible faces whose twin is not visible.
fn find_horizon_edges(visible: &[HullFace]) -> Vec<(usize, usize)> {
    let edges: HashSet<(usize, usize)> = visible.iter().flat_map(HullFace::edges).collect();

    visible
        .iter()
        .flat_map(HullFace::edges)
        .filter(|&(a, b)| !edges.contains(&(b, a)))
        .collect()
}

// =============================================================================
// OUTPUT
// =============================================================================

/// Builds the output mesh, skipping sliver triangles left by coplanar apexes.
fn faces_to_mesh(faces: &[HullFace], points: &[DVec3], tolerance: f64) -> Mesh {
    let mut mesh = Mesh::with_capacity(faces.len() / 2 + 2, faces.len());
    let mut remap: HashMap<usize, u32> = HashMap::new();

    for face in faces {
        let [a, b, c] = face.vertices.map(|v| points[v]);
        if (b - a).cross(c - a).length() <= tolerance {
            continue;
        }
        let indices: Vec<u32> = face
            .vertices
            .iter()
            .map(|&v| *remap.entry(v).or_insert_with(|| mesh.add_vertex(points[v])))
            .collect();
        mesh.add_face(indices);
    }

    mesh
}
