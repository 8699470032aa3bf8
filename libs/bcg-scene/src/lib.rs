//! # bcg Scene
//!
//! Scoped CSG scene builder. Authoring scripts record a tree of operations
//! and primitives; the construction engine renders it through a
//! [`MeshHost`](bcg_mesh::MeshHost), once per detail pass.
//!
//! ## Architecture
//!
//! ```text
//! script(&mut BuildContext) → SceneGraph → Vec<SceneNode> → Engine → Mesh
//!            ↑ Scope (+)                                   ↘ host booleans / hulls
//! ```
//!
//! ## Usage
//!
//! ```rust
//! use bcg_scene::{build_object, BuildOptions, Scope};
//! use bcg_mesh::NativeHost;
//! use glam::DVec3;
//!
//! let mut host = NativeHost::new();
//! let output = build_object("Washer", &BuildOptions::default().preview(), &mut host, |ctx| {
//!     ctx.with(Scope::difference(), |ctx| {
//!         ctx.cylinder(2.0, 2.0, 0.5, false, None)?;
//!         ctx.with(Scope::translate(0.0, 0.0, -0.5), |ctx| {
//!             ctx.cylinder(1.0, 1.0, 1.5, false, None)
//!         })
//!     })
//! })
//! .unwrap();
//!
//! let washer = output.get("Washer.Lo").unwrap();
//! assert!(washer.signed_volume() > 0.0);
//! assert_eq!(host.stats().booleans, 1);
//! ```

pub mod context;
pub mod engine;
pub mod error;
pub mod graph;
pub mod node;
pub mod pass;
pub mod scope;

pub use context::{BuildContext, RenderContext};
pub use engine::{Construction, DebugSnapshot, Engine};
pub use error::SceneError;
pub use graph::SceneGraph;
pub use node::{dump, Operation, RotationAxis, SceneNode};
pub use pass::{build_object, BuildOptions, BuildOutput, OutputMesh, PassKind, Resolution};
pub use scope::Scope;
