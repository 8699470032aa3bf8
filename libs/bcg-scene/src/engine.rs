//! # Construction Engine
//!
//! Renders a finished scene tree bottom-up. Every combination step is
//! delegated to the [`MeshHost`]; the engine only applies transforms and
//! decides which capability a node needs.
//!
//! | Operation            | Rendering                                           |
//! |----------------------|-----------------------------------------------------|
//! | Group / Debug        | join of children                                    |
//! | Translate / Rotate   | children transformed, then joined                   |
//! | Boolean              | first child ⊕ join(rest); join when ≤ 1 child      |
//! | Hull                 | hull of the joined children's vertices              |
//!
//! Children that render to the empty mesh are dropped before the parent
//! combines them.

use crate::error::SceneError;
use crate::node::{Operation, SceneNode};
use bcg_mesh::{Mesh, MeshHost, SolverHint};
use config::constants::{DEBUG_SUFFIX, STACKER_RED_ZONE_BYTES, STACKER_STACK_SIZE_BYTES};
use glam::DMat4;
use std::collections::HashMap;
use tracing::{debug, warn};

/// Named copy of a `Debug` subtree.
#[derive(Debug, Clone, PartialEq)]
pub struct DebugSnapshot {
    pub name: String,
    pub mesh: Mesh,
}

/// Result of constructing one pass.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Construction {
    /// Join of all top-level nodes
    pub mesh: Mesh,
    /// Non-empty debug snapshots in tree order
    pub debug: Vec<DebugSnapshot>,
}

/// Scene tree renderer bound to a host.
pub struct Engine<'h, H: MeshHost + ?Sized> {
    host: &'h mut H,
    default_solver: SolverHint,
    /// Rendered `Debug` subtrees in tree order, present while collecting
    captured: Option<Vec<Option<Mesh>>>,
}

impl<'h, H: MeshHost + ?Sized> Engine<'h, H> {
    pub fn new(host: &'h mut H, default_solver: SolverHint) -> Self {
        Self {
            host,
            default_solver,
            captured: None,
        }
    }

    /// Renders the top-level nodes and, if requested, the debug snapshots.
    ///
    /// Each `Debug` subtree is rendered once; its snapshot is a world-space
    /// copy of the mesh that also feeds the primary result. Snapshots are
    /// named `<name>.Debug` (or `<name>.Debug.<tag>`), with `.001`, `.002`,
    /// ... appended to repeated names.
    pub fn construct(
        &mut self,
        nodes: &[SceneNode],
        name: &str,
        collect_debug: bool,
    ) -> Result<Construction, SceneError> {
        self.captured = collect_debug.then(Vec::new);
        let rendered = self.render_all(nodes);
        let captured = self.captured.take().unwrap_or_default();
        let mesh = rendered?;

        let mut collector = DebugCollector::new(name);
        let tags = debug_tags(nodes);
        for (tag, mesh) in tags.into_iter().zip(captured) {
            let Some(mesh) = mesh else {
                debug!(tag = ?tag, "skipping empty debug snapshot");
                continue;
            };
            let name = collector.next_name(tag);
            let mesh = self.host.duplicate(&mesh, &name)?;
            debug!(snapshot = %name, faces = mesh.face_count(), "debug snapshot");
            collector.snapshots.push(DebugSnapshot { name, mesh });
        }
        Ok(Construction {
            mesh,
            debug: collector.snapshots,
        })
    }

    /// Renders `nodes` and joins the results.
    pub fn render_all(&mut self, nodes: &[SceneNode]) -> Result<Mesh, SceneError> {
        let meshes = self.render_children(nodes, DMat4::IDENTITY)?;
        Ok(self.host.join(meshes)?)
    }

    /// Renders a single node.
    pub fn render(&mut self, node: &SceneNode) -> Result<Mesh, SceneError> {
        self.render_at(node, DMat4::IDENTITY)
    }

    /// Renders `node` whose ancestors place it with `world`.
    fn render_at(&mut self, node: &SceneNode, world: DMat4) -> Result<Mesh, SceneError> {
        stacker::maybe_grow(STACKER_RED_ZONE_BYTES, STACKER_STACK_SIZE_BYTES, || {
            self.render_inner(node, world)
        })
    }

    fn render_children(
        &mut self,
        nodes: &[SceneNode],
        world: DMat4,
    ) -> Result<Vec<Mesh>, SceneError> {
        let mut meshes = Vec::with_capacity(nodes.len());
        for node in nodes {
            let mesh = self.render_at(node, world)?;
            if !mesh.is_empty() {
                meshes.push(mesh);
            }
        }
        Ok(meshes)
    }

    fn render_inner(&mut self, node: &SceneNode, world: DMat4) -> Result<Mesh, SceneError> {
        let (op, children) = match node {
            SceneNode::Leaf { mesh, .. } => return Ok(mesh.clone()),
            SceneNode::Composite { op, children } => (op, children),
        };

        // Reserved before the children so snapshots keep tree order
        let slot = match (op, self.captured.as_mut()) {
            (Operation::Debug { .. }, Some(captured)) => {
                captured.push(None);
                Some(captured.len() - 1)
            }
            _ => None,
        };

        let child_world = match op.transform() {
            Some(local) => world * local,
            None => world,
        };
        let mut meshes = self.render_children(children, child_world)?;
        let operands = meshes.len();

        let mesh = match op {
            Operation::Group | Operation::Debug { .. } => self.host.join(meshes)?,
            Operation::Translate(_) | Operation::Rotate { .. } => {
                if let Some(matrix) = op.transform() {
                    for mesh in &mut meshes {
                        mesh.transform(&matrix);
                    }
                }
                self.host.join(meshes)?
            }
            Operation::Boolean { op: boolean, solver } => {
                if meshes.len() <= 1 {
                    warn!(
                        operation = %boolean,
                        operands = meshes.len(),
                        "boolean with fewer than two operands, joining instead"
                    );
                    self.host.join(meshes)?
                } else {
                    let rest = meshes.split_off(1);
                    let primary = meshes.remove(0);
                    let secondary = self.host.join(rest)?;
                    let solver = solver.unwrap_or(self.default_solver);
                    self.host.apply_boolean(primary, secondary, *boolean, solver)?
                }
            }
            Operation::Hull => {
                let joined = self.host.join(meshes)?;
                if joined.is_empty() {
                    warn!("hull of an empty subtree");
                    joined
                } else {
                    self.host.convex_hull(joined.vertices())?
                }
            }
        };
        debug!(
            node = %op.name(),
            operands,
            vertices = mesh.vertex_count(),
            faces = mesh.face_count(),
            "render composite"
        );

        if let (Some(slot), false) = (slot, mesh.is_empty()) {
            let mut snapshot = mesh.clone();
            snapshot.transform(&world);
            if let Some(entry) = self.captured.as_mut().and_then(|c| c.get_mut(slot)) {
                *entry = Some(snapshot);
            }
        }
        Ok(mesh)
    }
}

/// Tags of every `Debug` node in tree order.
fn debug_tags(nodes: &[SceneNode]) -> Vec<Option<&str>> {
    let mut tags = Vec::new();
    let mut stack: Vec<&SceneNode> = nodes.iter().rev().collect();
    while let Some(node) = stack.pop() {
        if let SceneNode::Composite { op, children } = node {
            if let Operation::Debug { tag } = op {
                tags.push(tag.as_deref());
            }
            stack.extend(children.iter().rev());
        }
    }
    tags
}

struct DebugCollector {
    base: String,
    used: HashMap<String, usize>,
    snapshots: Vec<DebugSnapshot>,
}

impl DebugCollector {
    fn new(name: &str) -> Self {
        Self {
            base: format!("{name}{DEBUG_SUFFIX}"),
            used: HashMap::new(),
            snapshots: Vec::new(),
        }
    }

    fn next_name(&mut self, tag: Option<&str>) -> String {
        let name = match tag {
            Some(tag) => format!("{}.{tag}", self.base),
            None => self.base.clone(),
        };
        let count = self.used.entry(name.clone()).or_insert(0);
        *count += 1;
        if *count == 1 {
            name
        } else {
            format!("{name}.{:03}", *count - 1)
        }
    }
}

#[cfg(test)]
mod tests;
