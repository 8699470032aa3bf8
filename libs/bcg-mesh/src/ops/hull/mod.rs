//! # Convex Hull
//!
//! QuickHull algorithm for computing 3D convex hulls.
//!
//! ## Algorithm Overview
//!
//! QuickHull is a divide-and-conquer algorithm:
//! 1. Find extreme points to form initial simplex (tetrahedron)
//! 2. For each face, find the farthest point outside
//! 3. Create new faces from that point to the horizon edges
//! 4. Repeat until no points remain outside
//!
//! ## Example
//!
//! ```rust
//! use bcg_mesh::ops::hull::convex_hull;
//! use bcg_mesh::primitives::create_cube;
//! use glam::DVec3;
//!
//! let cube = create_cube(DVec3::splat(1.0), false).unwrap();
//! let result = convex_hull(cube.vertices()).unwrap();
//! assert_eq!(result.vertex_count(), 8);
//! ```

mod quickhull;


pub use quickhull::convex_hull;
