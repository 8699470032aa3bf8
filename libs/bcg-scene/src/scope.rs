//! # Composable Scopes
//!
//! A [`Scope`] is an ordered list of operations entered outermost first and
//! exited innermost first. Scopes compose with `+`:
//!
//! ```rust
//! use bcg_scene::Scope;
//! use bcg_scene::node::RotationAxis;
//!
//! let scope = Scope::translate(1.0, 0.0, 0.0) + Scope::rotate(90.0, RotationAxis::Z) + Scope::union();
//! let names: Vec<String> = scope.operations().iter().map(|op| op.name()).collect();
//! assert_eq!(names, ["Translate(1.000000,0.000000,0.000000)", "Rotate(90.000000,Z)", "Union"]);
//! ```

use crate::node::{Operation, RotationAxis};
use bcg_mesh::{BooleanOp, SolverHint};
use glam::DVec3;
use std::ops::Add;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Scope {
    operations: Vec<Operation>,
}

impl Scope {
    /// Scope that opens nothing.
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn new(op: Operation) -> Self {
        Self {
            operations: vec![op],
        }
    }

    pub fn group() -> Self {
        Self::new(Operation::Group)
    }

    pub fn translate(x: f64, y: f64, z: f64) -> Self {
        Self::new(Operation::Translate(DVec3::new(x, y, z)))
    }

    pub fn offset(offset: DVec3) -> Self {
        Self::new(Operation::Translate(offset))
    }

    /// Rotation by `degrees` about `axis`.
    pub fn rotate(degrees: f64, axis: RotationAxis) -> Self {
        Self::new(Operation::Rotate { degrees, axis })
    }

    pub fn union() -> Self {
        Self::new(Operation::boolean(BooleanOp::Union))
    }

    pub fn difference() -> Self {
        Self::new(Operation::boolean(BooleanOp::Difference))
    }

    pub fn intersection() -> Self {
        Self::new(Operation::boolean(BooleanOp::Intersection))
    }

    pub fn hull() -> Self {
        Self::new(Operation::Hull)
    }

    pub fn debug() -> Self {
        Self::new(Operation::Debug { tag: None })
    }

    /// Debug scope whose snapshot name carries `tag` as a suffix.
    pub fn debug_tagged(tag: impl Into<String>) -> Self {
        Self::new(Operation::Debug {
            tag: Some(tag.into()),
        })
    }

    /// Pins the solver of every boolean operation in this scope.
    pub fn with_solver(mut self, solver: SolverHint) -> Self {
        for op in &mut self.operations {
            if let Operation::Boolean { solver: slot, .. } = op {
                *slot = Some(solver);
            }
        }
        self
    }

    pub fn operations(&self) -> &[Operation] {
        &self.operations
    }

    pub fn is_empty(&self) -> bool {
        self.operations.is_empty()
    }
}

impl Add for Scope {
    type Output = Scope;

    fn add(mut self, rhs: Scope) -> Scope {
        self.operations.extend(rhs.operations);
        self
    }
}

impl From<Operation> for Scope {
    fn from(op: Operation) -> Self {
        Scope::new(op)
    }
}
