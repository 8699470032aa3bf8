//! # Construction Passes
//!
//! An object is built once per detail level. Each pass runs the authoring
//! script against a fresh [`BuildContext`], renders the recorded tree through
//! the host and names the result `<name>.Lo` or `<name>.Hi`.
//!
//! ```text
//! build_object("Part")
//!   ├─ pass Lo: script → SceneGraph → Engine → "Part.Lo" (+ "Part.Lo.Debug")
//!   └─ pass Hi: script → SceneGraph → Engine → "Part.Hi" (+ "Part.Hi.Debug")
//! ```

use crate::context::BuildContext;
use crate::engine::Engine;
use crate::error::SceneError;
use crate::node::dump;
use bcg_mesh::{Mesh, MeshHost, SolverHint};
use config::constants::{
    GlobalConfig, DEFAULT_DECOMPOSE_EPSILON, HIGH_DETAIL_FACETS, HIGH_DETAIL_STACKS,
    HIGH_DETAIL_SUFFIX, LOW_DETAIL_FACETS, LOW_DETAIL_STACKS, LOW_DETAIL_SUFFIX,
};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::time::Instant;
use tracing::{info, info_span, trace};

// =============================================================================
// PASS KIND
// =============================================================================

/// Detail level of a construction pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PassKind {
    /// Preview quality
    Low,
    /// Final quality
    High,
}

impl PassKind {
    /// Output name suffix, `.Lo` or `.Hi`.
    pub fn suffix(self) -> &'static str {
        match self {
            PassKind::Low => LOW_DETAIL_SUFFIX,
            PassKind::High => HIGH_DETAIL_SUFFIX,
        }
    }

    pub fn is_high_detail(self) -> bool {
        self == PassKind::High
    }

    /// Built-in tessellation preset for this pass.
    pub fn resolution(self) -> Resolution {
        match self {
            PassKind::Low => Resolution {
                facets: LOW_DETAIL_FACETS,
                stacks: LOW_DETAIL_STACKS,
            },
            PassKind::High => Resolution {
                facets: HIGH_DETAIL_FACETS,
                stacks: HIGH_DETAIL_STACKS,
            },
        }
    }
}

/// Default tessellation applied when a primitive does not specify its own.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Resolution {
    /// Segments around the axis
    pub facets: u32,
    /// Latitude bands of a sphere
    pub stacks: u32,
}

// =============================================================================
// BUILD OPTIONS
// =============================================================================

/// Options for [`build_object`].
#[derive(Debug, Clone, PartialEq)]
pub struct BuildOptions {
    /// Run only the low detail pass
    pub preview_only: bool,
    /// Capture `Debug` scopes as separate outputs
    pub collect_debug: bool,
    /// Solver for boolean scopes that do not pin their own
    pub solver: SolverHint,
    /// Nudge distance for profile decomposition
    pub decompose_epsilon: f64,
    /// Default tessellation of the low detail pass
    pub low_detail: Resolution,
    /// Default tessellation of the high detail pass
    pub high_detail: Resolution,
    /// Free-form arguments visible to the authoring script
    pub args: BTreeMap<String, String>,
}

impl Default for BuildOptions {
    fn default() -> Self {
        Self {
            preview_only: false,
            collect_debug: true,
            solver: SolverHint::default(),
            decompose_epsilon: DEFAULT_DECOMPOSE_EPSILON,
            low_detail: PassKind::Low.resolution(),
            high_detail: PassKind::High.resolution(),
            args: BTreeMap::new(),
        }
    }
}

impl BuildOptions {
    /// Options taking the kernel-wide settings from `config`.
    pub fn from_config(config: &GlobalConfig) -> Self {
        let mut options = Self {
            decompose_epsilon: config.decompose_epsilon,
            ..Self::default()
        };
        options.low_detail.facets = config.low_detail_facets;
        options.high_detail.facets = config.high_detail_facets;
        options
    }

    /// Default tessellation handed to scripts in `pass`.
    pub fn resolution(&self, pass: PassKind) -> Resolution {
        match pass {
            PassKind::Low => self.low_detail,
            PassKind::High => self.high_detail,
        }
    }

    pub fn preview(mut self) -> Self {
        self.preview_only = true;
        self
    }

    pub fn with_arg(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.args.insert(key.into(), value.into());
        self
    }

    /// Passes to run, in order.
    pub fn passes(&self) -> &'static [PassKind] {
        if self.preview_only {
            &[PassKind::Low]
        } else {
            &[PassKind::Low, PassKind::High]
        }
    }
}

// =============================================================================
// OUTPUT
// =============================================================================

/// One mesh produced by a build.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutputMesh {
    pub name: String,
    pub pass: PassKind,
    /// True for debug snapshots
    pub debug: bool,
    pub mesh: Mesh,
}

/// Everything [`build_object`] produced, in creation order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BuildOutput {
    pub meshes: Vec<OutputMesh>,
}

impl BuildOutput {
    pub fn get(&self, name: &str) -> Option<&Mesh> {
        self.meshes.iter().find(|m| m.name == name).map(|m| &m.mesh)
    }

    pub fn names(&self) -> Vec<&str> {
        self.meshes.iter().map(|m| m.name.as_str()).collect()
    }

    pub fn len(&self) -> usize {
        self.meshes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.meshes.is_empty()
    }

    /// Debug snapshots only.
    pub fn debug_meshes(&self) -> impl Iterator<Item = &OutputMesh> {
        self.meshes.iter().filter(|m| m.debug)
    }
}

// =============================================================================
// BUILD
// =============================================================================

/// Builds `name` by running `script` once per pass.
///
/// The script must be repeatable: it is called again for every pass and sees
/// the pass through [`BuildContext::is_high_detail_pass`]. Any failure aborts
/// the build and is wrapped in [`SceneError::PassFailed`] naming the pass
/// output.
///
/// # Example
///
/// ```rust
/// use bcg_scene::{build_object, BuildOptions, Scope};
/// use bcg_mesh::NativeHost;
/// use glam::DVec3;
///
/// let mut host = NativeHost::new();
/// let output = build_object("Block", &BuildOptions::default(), &mut host, |ctx| {
///     ctx.with(Scope::translate(0.0, 0.0, 1.0), |ctx| {
///         ctx.cube(DVec3::splat(2.0), true)
///     })
/// })
/// .unwrap();
///
/// assert_eq!(output.names(), ["Block.Lo", "Block.Hi"]);
/// assert_eq!(output.get("Block.Hi").unwrap().bounding_box().0.z, 0.0);
/// ```
pub fn build_object<H, F>(
    name: &str,
    options: &BuildOptions,
    host: &mut H,
    mut script: F,
) -> Result<BuildOutput, SceneError>
where
    H: MeshHost + ?Sized,
    F: FnMut(&mut BuildContext) -> Result<(), SceneError>,
{
    let mut output = BuildOutput::default();

    for &pass in options.passes() {
        let pass_name = format!("{name}{}", pass.suffix());
        let span = info_span!("pass", object = name, pass = pass.suffix());
        let _guard = span.enter();
        info!(output = %pass_name, "starting pass");

        let started = Instant::now();
        let construction = run_pass(&pass_name, pass, options, host, &mut script).map_err(
            |source| SceneError::PassFailed {
                pass: pass_name.clone(),
                source: Box::new(source),
            },
        )?;
        let elapsed = started.elapsed();

        info!(
            output = %pass_name,
            vertices = construction.mesh.vertex_count(),
            faces = construction.mesh.face_count(),
            debug_snapshots = construction.debug.len(),
            elapsed_ms = elapsed.as_secs_f64() * 1000.0,
            "PASS cg for {pass_name} (took {:.2} s)",
            elapsed.as_secs_f64()
        );

        output.meshes.push(OutputMesh {
            name: pass_name,
            pass,
            debug: false,
            mesh: construction.mesh,
        });
        output
            .meshes
            .extend(construction.debug.into_iter().map(|snapshot| OutputMesh {
                name: snapshot.name,
                pass,
                debug: true,
                mesh: snapshot.mesh,
            }));
    }

    Ok(output)
}

fn run_pass<H, F>(
    pass_name: &str,
    pass: PassKind,
    options: &BuildOptions,
    host: &mut H,
    script: &mut F,
) -> Result<crate::engine::Construction, SceneError>
where
    H: MeshHost + ?Sized,
    F: FnMut(&mut BuildContext) -> Result<(), SceneError>,
{
    let mut ctx = BuildContext::new(pass_name, pass, options.clone());
    script(&mut ctx)?;
    let nodes = ctx.finish()?;
    trace!(tree = %dump(&nodes), "scene tree");

    let mut engine = Engine::new(host, options.solver);
    engine.construct(&nodes, pass_name, options.collect_debug)
}
