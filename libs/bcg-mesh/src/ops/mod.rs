//! # Mesh Operations
//!
//! Native implementations of the host capabilities: boolean operations (CSG)
//! and convex hull.

pub mod boolean;
pub mod hull;

pub use boolean::{difference, intersection, union};
pub use hull::convex_hull;
