//! # Build Context
//!
//! Handle passed to authoring scripts. It owns the pass's [`SceneGraph`] and
//! the [`RenderContext`] that scripts query for the pass and its resolution.

use crate::error::SceneError;
use crate::graph::SceneGraph;
use crate::node::{Operation, SceneNode};
use crate::pass::{BuildOptions, PassKind, Resolution};
use crate::scope::Scope;
use bcg_mesh::primitives::{
    create_cube, create_cylinder, create_polyhedron, create_sphere, create_torus, sweep_profile,
};
use bcg_mesh::{decompose_profile, Mesh, ProfilePoint};
use glam::DVec3;

// =============================================================================
// RENDER CONTEXT
// =============================================================================

/// Pass-wide settings visible to the authoring script.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderContext {
    pass: PassKind,
    resolution: Resolution,
    options: BuildOptions,
}

impl RenderContext {
    pub fn new(pass: PassKind, options: BuildOptions) -> Self {
        Self {
            pass,
            resolution: options.resolution(pass),
            options,
        }
    }

    pub fn pass(&self) -> PassKind {
        self.pass
    }

    pub fn resolution(&self) -> Resolution {
        self.resolution
    }

    pub fn set_resolution(&mut self, resolution: Resolution) {
        self.resolution = resolution;
    }

    pub fn options(&self) -> &BuildOptions {
        &self.options
    }
}

impl Default for RenderContext {
    fn default() -> Self {
        Self::new(PassKind::Low, BuildOptions::default())
    }
}

// =============================================================================
// BUILD CONTEXT
// =============================================================================

/// Scene recording handle for one pass.
///
/// Scopes are entered with [`BuildContext::with`], which closes them again
/// however the closure returns. Primitives emit leaves into the innermost
/// open scope.
///
/// # Example
///
/// ```rust
/// use bcg_scene::{BuildContext, BuildOptions, PassKind, Scope};
///
/// let mut ctx = BuildContext::new("Part.Lo", PassKind::Low, BuildOptions::default());
/// ctx.with(Scope::difference(), |ctx| {
///     ctx.cylinder(2.0, 2.0, 1.0, false, 8)?;
///     ctx.with(Scope::translate(0.0, 0.0, -1.0), |ctx| {
///         ctx.cylinder(1.0, 1.0, 3.0, false, 8)
///     })
/// })
/// .unwrap();
///
/// let roots = ctx.finish().unwrap();
/// assert_eq!(roots[0].children().len(), 2);
/// ```
#[derive(Debug)]
pub struct BuildContext {
    graph: SceneGraph,
    render: RenderContext,
}

impl BuildContext {
    pub fn new(name: impl Into<String>, pass: PassKind, options: BuildOptions) -> Self {
        Self {
            graph: SceneGraph::new(name),
            render: RenderContext::new(pass, options),
        }
    }

    pub fn graph(&self) -> &SceneGraph {
        &self.graph
    }

    pub fn render_context(&self) -> &RenderContext {
        &self.render
    }

    pub fn render_context_mut(&mut self) -> &mut RenderContext {
        &mut self.render
    }

    /// Ends recording, see [`SceneGraph::finish`].
    pub fn finish(&mut self) -> Result<Vec<SceneNode>, SceneError> {
        self.graph.finish()
    }

    // =========================================================================
    // SCOPES
    // =========================================================================

    /// Opens a single scope. Prefer [`BuildContext::with`].
    pub fn begin_group(&mut self, op: Operation) -> Result<(), SceneError> {
        self.graph.begin_group(op)
    }

    pub fn end_group(&mut self) -> Result<(), SceneError> {
        self.graph.end_group()
    }

    /// Runs `body` inside `scope`.
    ///
    /// Operations are entered in order and exited in reverse order. Every
    /// entered operation is exited even when `body` fails; the body's error
    /// wins over any exit error.
    pub fn with<S, F, R>(&mut self, scope: S, body: F) -> Result<R, SceneError>
    where
        S: Into<Scope>,
        F: FnOnce(&mut Self) -> Result<R, SceneError>,
    {
        let scope = scope.into();
        let mut entered = 0;
        let mut result = Ok(());
        for op in scope.operations() {
            result = self.graph.begin_group(op.clone());
            if result.is_err() {
                break;
            }
            entered += 1;
        }

        let result = result.and_then(|()| body(self));

        let mut exit = Ok(());
        for _ in 0..entered {
            if let Err(err) = self.graph.end_group() {
                exit = Err(err);
                break;
            }
        }
        let value = result?;
        exit.map(|()| value)
    }

    /// Appends a mesh as a named leaf.
    pub fn emit(&mut self, name: impl Into<String>, mesh: Mesh) -> Result<(), SceneError> {
        self.graph.emit_leaf(name, mesh)
    }

    // =========================================================================
    // PRIMITIVES
    // =========================================================================

    /// Axis-aligned box, from the origin or centred on it.
    pub fn cube(&mut self, size: DVec3, center: bool) -> Result<(), SceneError> {
        let mesh = create_cube(size, center)?;
        self.emit("cube", mesh)
    }

    /// Cylinder or cone along z. `facets: None` takes the pass resolution.
    pub fn cylinder(
        &mut self,
        r1: f64,
        r2: f64,
        height: f64,
        center: bool,
        facets: impl Into<Option<u32>>,
    ) -> Result<(), SceneError> {
        let facets = self.facets_or_default(facets.into());
        let mesh = create_cylinder(height, r1, r2, center, facets)?;
        self.emit("cylinder", mesh)
    }

    /// Sphere centred on the origin.
    pub fn sphere(
        &mut self,
        radius: f64,
        facets: impl Into<Option<u32>>,
        stacks: impl Into<Option<u32>>,
    ) -> Result<(), SceneError> {
        let facets = self.facets_or_default(facets.into());
        let stacks = stacks.into().unwrap_or(self.render.resolution.stacks);
        let mesh = create_sphere(radius, facets, stacks)?;
        self.emit("sphere", mesh)
    }

    /// Torus around the z axis.
    pub fn torus(
        &mut self,
        major_radius: f64,
        minor_radius: f64,
        facets: impl Into<Option<u32>>,
        tube_facets: impl Into<Option<u32>>,
    ) -> Result<(), SceneError> {
        let facets = self.facets_or_default(facets.into());
        let tube_facets = self.facets_or_default(tube_facets.into());
        let mesh = create_torus(major_radius, minor_radius, facets, tube_facets)?;
        self.emit("torus", mesh)
    }

    /// Surface of revolution of a `(radius, z)` profile.
    pub fn profile_sweep(
        &mut self,
        profile: &[ProfilePoint],
        facets: impl Into<Option<u32>>,
        looped: bool,
    ) -> Result<(), SceneError> {
        let facets = self.facets_or_default(facets.into());
        let mesh = sweep_profile(profile, facets, looped)?;
        self.emit("profile", mesh)
    }

    /// Explicit vertices and polygon faces.
    pub fn polyhedron(
        &mut self,
        name: impl Into<String>,
        vertices: Vec<DVec3>,
        faces: Vec<Vec<u32>>,
    ) -> Result<(), SceneError> {
        let mesh = create_polyhedron(vertices, faces)?;
        self.emit(name, mesh)
    }

    // =========================================================================
    // PASS QUERIES
    // =========================================================================

    pub fn pass(&self) -> PassKind {
        self.render.pass
    }

    pub fn is_high_detail_pass(&self) -> bool {
        self.render.pass.is_high_detail()
    }

    /// Picks `high` in the high detail pass and `low` otherwise.
    pub fn select_by_pass<T>(&self, high: T, low: T) -> T {
        if self.is_high_detail_pass() {
            high
        } else {
            low
        }
    }

    /// Default facet count of the current pass.
    pub fn facets(&self) -> u32 {
        self.render.resolution.facets
    }

    /// Script argument from [`BuildOptions::args`].
    pub fn arg(&self, key: &str) -> Option<&str> {
        self.render.options.args.get(key).map(String::as_str)
    }

    fn facets_or_default(&self, facets: Option<u32>) -> u32 {
        facets.unwrap_or(self.render.resolution.facets)
    }

    // =========================================================================
    // AUTHORING HELPERS
    // =========================================================================

    /// Hull of `shape` placed at every corner of an axis-aligned box.
    ///
    /// `size` has one entry per axis (1 to 3, missing axes stay at 0). Along
    /// each axis the corners sit at `inset` and `size - inset`, so a shape of
    /// radius `inset` keeps the hull inside `[0, size]`.
    pub fn corner_hull<F>(&mut self, size: &[f64], inset: f64, mut shape: F) -> Result<(), SceneError>
    where
        F: FnMut(&mut Self) -> Result<(), SceneError>,
    {
        if size.is_empty() || size.len() > 3 {
            return Err(SceneError::invalid_argument(format!(
                "corner hull needs 1 to 3 dimensions, got {}",
                size.len()
            )));
        }
        if inset.is_nan() || inset < 0.0 {
            return Err(SceneError::invalid_argument(format!(
                "corner hull inset must be non-negative: {inset}"
            )));
        }
        if let Some(s) = size.iter().find(|&&s| s.is_nan() || s < 2.0 * inset) {
            return Err(SceneError::invalid_argument(format!(
                "corner hull size {s} is smaller than twice the inset {inset}"
            )));
        }

        self.with(Scope::hull(), |ctx| {
            for mask in 0..(1u32 << size.len()) {
                let mut corner = DVec3::ZERO;
                for (axis, &extent) in size.iter().enumerate() {
                    corner[axis] = if mask & (1 << axis) == 0 {
                        inset
                    } else {
                        extent - inset
                    };
                }
                ctx.with(Scope::offset(corner), &mut shape)?;
            }
            Ok(())
        })
    }

    /// [`BuildContext::corner_hull`] over the four corners of a rectangle.
    pub fn square_hull<F>(&mut self, sx: f64, sy: f64, inset: f64, shape: F) -> Result<(), SceneError>
    where
        F: FnMut(&mut Self) -> Result<(), SceneError>,
    {
        self.corner_hull(&[sx, sy], inset, shape)
    }

    /// [`BuildContext::corner_hull`] over the eight corners of a box.
    pub fn cube_hull<F>(
        &mut self,
        sx: f64,
        sy: f64,
        sz: f64,
        inset: f64,
        shape: F,
    ) -> Result<(), SceneError>
    where
        F: FnMut(&mut Self) -> Result<(), SceneError>,
    {
        self.corner_hull(&[sx, sy, sz], inset, shape)
    }

    /// Splits a profile into convex groups using the build's nudge distance.
    pub fn decompose_profile(
        &self,
        profile: &[ProfilePoint],
    ) -> Result<Vec<Vec<ProfilePoint>>, SceneError> {
        Ok(decompose_profile(
            profile,
            self.render.options.decompose_epsilon,
        )?)
    }

    /// Sweeps a possibly concave profile as a union of convex hulls.
    ///
    /// Every convex group is swept and hulled on its own so each hull stays
    /// inside the swept solid.
    pub fn convex_sweep(
        &mut self,
        profile: &[ProfilePoint],
        facets: impl Into<Option<u32>>,
    ) -> Result<(), SceneError> {
        let facets = self.facets_or_default(facets.into());
        let groups = self.decompose_profile(profile)?;
        self.with(Scope::union(), |ctx| {
            for group in &groups {
                ctx.with(Scope::hull(), |ctx| ctx.profile_sweep(group, facets, false))?;
            }
            Ok(())
        })
    }
}
