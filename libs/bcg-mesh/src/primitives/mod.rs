//! # Primitives
//!
//! Mesh generation for the authoring primitives. Everything round is built on
//! [`sweep_profile`].

pub mod cube;
pub mod cylinder;
pub mod polyhedron;
pub mod sphere;
pub mod sweep;
pub mod torus;

pub use cube::create_cube;
pub use cylinder::create_cylinder;
pub use polyhedron::create_polyhedron;
pub use sphere::create_sphere;
pub use sweep::sweep_profile;
pub use torus::create_torus;
