//! # bcg Mesh
//!
//! Pure geometry kernel for the bcg scene builder.
//!
//! ## Architecture
//!
//! ```text
//! profile (radius, z) → sweep → Mesh
//!                     ↘ decompose → convex groups → hull per group
//! Mesh ⇄ MeshHost (boolean, hull, join, duplicate)
//! ```
//!
//! ## Algorithms
//!
//! All algorithms are pure Rust:
//! - **Primitives**: surface-of-revolution sweep with exact right-angle trig
//! - **Decomposition**: convex run splitting of revolution profiles
//! - **Boolean Operations**: BSP trees (csg.js algorithm)
//! - **Hull**: QuickHull
//!
//! ## Usage
//!
//! ```rust
//! use bcg_mesh::{primitives::sweep_profile, ProfilePoint};
//!
//! let profile = [ProfilePoint::new(1.0, 0.0), ProfilePoint::new(1.0, 2.0)];
//! let mesh = sweep_profile(&profile, 4, false).unwrap();
//! assert_eq!(mesh.vertex_count(), 8);
//! assert_eq!(mesh.face_count(), 6);
//! ```

pub mod decompose;
pub mod error;
pub mod host;
pub mod mesh;
pub mod ops;
pub mod primitives;
pub mod profile;
pub mod trig;

pub use decompose::decompose_profile;
pub use error::MeshError;
pub use host::{BooleanOp, MeshHost, NativeHost, SolverHint};
pub use mesh::Mesh;
pub use profile::ProfilePoint;
