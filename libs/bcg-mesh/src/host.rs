//! # Host Capabilities
//!
//! The construction engine never combines meshes itself. Boolean operations,
//! convex hulls, joins and debug duplicates go through a [`MeshHost`], so an
//! embedding application can route them to its own modelling kernel.
//! [`NativeHost`] is the in-process implementation backed by [`crate::ops`].

use crate::error::MeshError;
use crate::mesh::Mesh;
use crate::ops::{boolean, hull};
use config::constants::{BSP_EXACT_EPSILON, BSP_FAST_EPSILON};
use glam::DVec3;
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::trace;

/// Boolean operator applied by [`MeshHost::apply_boolean`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BooleanOp {
    Union,
    Difference,
    Intersection,
}

impl BooleanOp {
    /// Display name used in scene dumps.
    pub fn name(self) -> &'static str {
        match self {
            BooleanOp::Union => "Union",
            BooleanOp::Difference => "Difference",
            BooleanOp::Intersection => "Intersection",
        }
    }
}

impl fmt::Display for BooleanOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Numerical strategy requested for a boolean operation.
///
/// Hosts map the hint onto whatever robustness knobs they have. The native
/// host uses it as the BSP plane thickness.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SolverHint {
    /// Coarse tolerance, absorbs rounding noise from transformed operands
    Fast,
    /// Tight tolerance for exactly aligned geometry
    #[default]
    Exact,
}

impl SolverHint {
    /// Plane classification tolerance for this hint.
    pub fn epsilon(self) -> f64 {
        match self {
            SolverHint::Fast => BSP_FAST_EPSILON,
            SolverHint::Exact => BSP_EXACT_EPSILON,
        }
    }
}

/// Mesh capabilities supplied by the embedding application.
///
/// Calls are synchronous. Any error is fatal to the current pass and is never
/// retried.
pub trait MeshHost {
    /// Combines `primary` with `secondary`, consuming both.
    fn apply_boolean(
        &mut self,
        primary: Mesh,
        secondary: Mesh,
        op: BooleanOp,
        solver: SolverHint,
    ) -> Result<Mesh, MeshError>;

    /// Convex hull of a point set.
    fn convex_hull(&mut self, points: &[DVec3]) -> Result<Mesh, MeshError>;

    /// Concatenates meshes, discarding empty ones.
    ///
    /// Joining nothing yields the empty mesh; joining one mesh returns it.
    fn join(&mut self, meshes: Vec<Mesh>) -> Result<Mesh, MeshError> {
        Ok(Mesh::join(meshes))
    }

    /// Independent copy of `mesh` registered under `name`.
    fn duplicate(&mut self, mesh: &Mesh, name: &str) -> Result<Mesh, MeshError>;
}

/// Number of capability calls a [`NativeHost`] has served.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct HostStats {
    pub booleans: usize,
    pub hulls: usize,
    pub joins: usize,
    pub duplicates: usize,
}

/// In-process host: BSP booleans and QuickHull.
///
/// # Example
///
/// ```rust
/// use bcg_mesh::{BooleanOp, MeshHost, NativeHost, SolverHint};
/// use bcg_mesh::primitives::create_cube;
/// use glam::DVec3;
///
/// let mut host = NativeHost::new();
/// let a = create_cube(DVec3::splat(1.0), false).unwrap();
/// let result = host
///     .apply_boolean(a.clone(), a, BooleanOp::Difference, SolverHint::Exact)
///     .unwrap();
/// assert!(result.is_empty());
/// assert_eq!(host.stats().booleans, 1);
/// ```
#[derive(Debug, Clone, Default)]
pub struct NativeHost {
    stats: HostStats,
    names: Vec<String>,
}

impl NativeHost {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn stats(&self) -> HostStats {
        self.stats
    }

    /// Names given to [`MeshHost::duplicate`], in call order.
    pub fn duplicate_names(&self) -> &[String] {
        &self.names
    }
}

impl MeshHost for NativeHost {
    fn apply_boolean(
        &mut self,
        primary: Mesh,
        secondary: Mesh,
        op: BooleanOp,
        solver: SolverHint,
    ) -> Result<Mesh, MeshError> {
        self.stats.booleans += 1;
        trace!(
            %op,
            ?solver,
            primary_faces = primary.face_count(),
            secondary_faces = secondary.face_count(),
            "native boolean"
        );
        let epsilon = solver.epsilon();
        match op {
            BooleanOp::Union => boolean::union(&primary, &secondary, epsilon),
            BooleanOp::Difference => boolean::difference(&primary, &secondary, epsilon),
            BooleanOp::Intersection => boolean::intersection(&primary, &secondary, epsilon),
        }
    }

    fn convex_hull(&mut self, points: &[DVec3]) -> Result<Mesh, MeshError> {
        self.stats.hulls += 1;
        hull::convex_hull(points)
    }

    fn join(&mut self, meshes: Vec<Mesh>) -> Result<Mesh, MeshError> {
        self.stats.joins += 1;
        Ok(Mesh::join(meshes))
    }

    fn duplicate(&mut self, mesh: &Mesh, name: &str) -> Result<Mesh, MeshError> {
        self.stats.duplicates += 1;
        self.names.push(name.to_string());
        Ok(mesh.clone())
    }
}
