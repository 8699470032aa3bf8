//! # Scene Nodes
//!
//! The scene tree recorded by authoring scripts. Composite nodes carry an
//! [`Operation`] applied to their children; leaves carry a finished mesh.
//!
//! ## Example Tree
//!
//! ```text
//! Difference
//! . cube
//! . Translate(5.000000,5.000000,0.000000)
//! . . cylinder
//! ```

use bcg_mesh::trig::rotation;
use bcg_mesh::{BooleanOp, Mesh, SolverHint};
use glam::{DMat4, DVec3};
use std::fmt::Write;

// =============================================================================
// OPERATIONS
// =============================================================================

/// Axis of a rotation scope.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum RotationAxis {
    X,
    Y,
    Z,
    /// Arbitrary axis, normalized when the matrix is built
    Vector(DVec3),
}

impl RotationAxis {
    pub fn vector(self) -> DVec3 {
        match self {
            RotationAxis::X => DVec3::X,
            RotationAxis::Y => DVec3::Y,
            RotationAxis::Z => DVec3::Z,
            RotationAxis::Vector(v) => v,
        }
    }

    fn label(self) -> String {
        match self {
            RotationAxis::X => "X".to_string(),
            RotationAxis::Y => "Y".to_string(),
            RotationAxis::Z => "Z".to_string(),
            RotationAxis::Vector(v) => format!("({:.6},{:.6},{:.6})", v.x, v.y, v.z),
        }
    }
}

/// Operation attached to a composite node.
#[derive(Debug, Clone, PartialEq)]
pub enum Operation {
    /// Plain grouping, children are joined
    Group,

    /// Offset applied to the joined children
    Translate(DVec3),

    /// Rotation in degrees applied to the joined children
    Rotate { degrees: f64, axis: RotationAxis },

    /// First child combined with the join of the remaining children.
    ///
    /// `solver: None` defers to the build's default solver.
    Boolean {
        op: BooleanOp,
        solver: Option<SolverHint>,
    },

    /// Convex hull of the joined children
    Hull,

    /// Group whose rendered subtree is also captured as a debug snapshot
    Debug { tag: Option<String> },
}

impl Operation {
    pub fn boolean(op: BooleanOp) -> Self {
        Operation::Boolean { op, solver: None }
    }

    /// Display name used in tree dumps.
    ///
    /// ```rust
    /// use bcg_scene::Operation;
    /// use glam::DVec3;
    ///
    /// let op = Operation::Translate(DVec3::new(1.0, 2.0, 3.0));
    /// assert_eq!(op.name(), "Translate(1.000000,2.000000,3.000000)");
    /// ```
    pub fn name(&self) -> String {
        match self {
            Operation::Group => "Group".to_string(),
            Operation::Translate(v) => format!("Translate({:.6},{:.6},{:.6})", v.x, v.y, v.z),
            Operation::Rotate { degrees, axis } => {
                format!("Rotate({:.6},{})", degrees, axis.label())
            }
            Operation::Boolean { op, .. } => op.name().to_string(),
            Operation::Hull => "Hull".to_string(),
            Operation::Debug { tag: None } => "Debug".to_string(),
            Operation::Debug { tag: Some(tag) } => format!("Debug({tag})"),
        }
    }

    /// Local transform introduced by this operation, if any.
    pub fn transform(&self) -> Option<DMat4> {
        match self {
            Operation::Translate(v) => Some(DMat4::from_translation(*v)),
            Operation::Rotate { degrees, axis } => Some(rotation(axis.vector(), *degrees)),
            _ => None,
        }
    }
}

// =============================================================================
// NODES
// =============================================================================

/// A node of the scene tree.
#[derive(Debug, Clone, PartialEq)]
pub enum SceneNode {
    Composite {
        op: Operation,
        children: Vec<SceneNode>,
    },
    Leaf {
        name: String,
        mesh: Mesh,
    },
}

impl SceneNode {
    pub fn name(&self) -> String {
        match self {
            SceneNode::Composite { op, .. } => op.name(),
            SceneNode::Leaf { name, .. } => name.clone(),
        }
    }

    pub fn is_leaf(&self) -> bool {
        matches!(self, SceneNode::Leaf { .. })
    }

    pub fn children(&self) -> &[SceneNode] {
        match self {
            SceneNode::Composite { children, .. } => children,
            SceneNode::Leaf { .. } => &[],
        }
    }

    /// Total number of nodes in this subtree.
    pub fn node_count(&self) -> usize {
        1 + self.children().iter().map(SceneNode::node_count).sum::<usize>()
    }
}

/// Renders `nodes` as an indented listing, one line per node, with `". "`
/// repeated once per depth level.
pub fn dump(nodes: &[SceneNode]) -> String {
    let mut out = String::new();
    for node in nodes {
        dump_node(node, 0, &mut out);
    }
    out
}

pub(crate) fn dump_line(out: &mut String, depth: usize, name: &str) {
    let _ = writeln!(out, "{}{}", ". ".repeat(depth), name);
}

fn dump_node(node: &SceneNode, depth: usize, out: &mut String) {
    dump_line(out, depth, &node.name());
    for child in node.children() {
        dump_node(child, depth + 1, out);
    }
}
