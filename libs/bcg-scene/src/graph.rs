//! # Scene Graph Builder
//!
//! Records the tree emitted by an authoring script. Open scopes live on a
//! frame stack; closing a scope folds its frame into a composite node of the
//! parent frame. The bottom frame collects the top-level nodes.

use crate::error::SceneError;
use crate::node::{dump, dump_line, Operation, SceneNode};
use bcg_mesh::Mesh;

#[derive(Debug)]
struct Frame {
    op: Option<Operation>,
    children: Vec<SceneNode>,
}

impl Frame {
    fn root() -> Self {
        Self {
            op: None,
            children: Vec::new(),
        }
    }

    fn open(op: Operation) -> Self {
        Self {
            op: Some(op),
            children: Vec::new(),
        }
    }
}

/// Builder for one pass's scene tree.
///
/// # Example
///
/// ```rust
/// use bcg_scene::{Operation, SceneGraph};
/// use bcg_mesh::{BooleanOp, Mesh};
///
/// let mut graph = SceneGraph::new("Part");
/// graph.begin_group(Operation::boolean(BooleanOp::Union)).unwrap();
/// graph.emit_leaf("a", Mesh::new()).unwrap();
/// graph.end_group().unwrap();
///
/// let roots = graph.finish().unwrap();
/// assert_eq!(roots.len(), 1);
/// assert!(!graph.is_active());
/// ```
#[derive(Debug)]
pub struct SceneGraph {
    name: String,
    frames: Vec<Frame>,
}

impl SceneGraph {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            frames: vec![Frame::root()],
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns false once [`SceneGraph::finish`] has succeeded.
    pub fn is_active(&self) -> bool {
        !self.frames.is_empty()
    }

    /// Number of scopes currently open.
    pub fn depth(&self) -> usize {
        self.frames.len().saturating_sub(1)
    }

    /// Opens a composite node as a child of the current scope and makes it
    /// the current scope.
    pub fn begin_group(&mut self, op: Operation) -> Result<(), SceneError> {
        if !self.is_active() {
            return Err(SceneError::NoActiveGraph);
        }
        self.frames.push(Frame::open(op));
        Ok(())
    }

    /// Closes the current scope.
    pub fn end_group(&mut self) -> Result<(), SceneError> {
        match self.frames.len() {
            0 => Err(SceneError::NoActiveGraph),
            1 => Err(SceneError::ScopeUnderflow),
            _ => {
                let frame = self.frames.pop().ok_or(SceneError::ScopeUnderflow)?;
                let node = SceneNode::Composite {
                    op: frame.op.unwrap_or(Operation::Group),
                    children: frame.children,
                };
                self.current()?.children.push(node);
                Ok(())
            }
        }
    }

    /// Appends a leaf to the current scope.
    pub fn emit_leaf(&mut self, name: impl Into<String>, mesh: Mesh) -> Result<(), SceneError> {
        self.current()?.children.push(SceneNode::Leaf {
            name: name.into(),
            mesh,
        });
        Ok(())
    }

    /// Ends recording and returns the top-level nodes.
    ///
    /// Fails with `UnbalancedScopes` while any scope is still open; the graph
    /// stays active in that case.
    pub fn finish(&mut self) -> Result<Vec<SceneNode>, SceneError> {
        match self.frames.len() {
            0 => Err(SceneError::NoActiveGraph),
            1 => Ok(self
                .frames
                .pop()
                .map(|root| root.children)
                .unwrap_or_default()),
            n => Err(SceneError::UnbalancedScopes { open: n - 1 }),
        }
    }

    /// Indented listing of everything recorded so far, open scopes included.
    pub fn dump(&self) -> String {
        let mut out = String::new();
        self.dump_frame(0, 0, &mut out);
        out
    }

    fn dump_frame(&self, index: usize, depth: usize, out: &mut String) {
        let Some(frame) = self.frames.get(index) else {
            return;
        };
        out.push_str(
            &dump(&frame.children)
                .lines()
                .map(|line| format!("{}{}\n", ". ".repeat(depth), line))
                .collect::<String>(),
        );
        if let Some(next) = self.frames.get(index + 1) {
            let name = next.op.as_ref().map(Operation::name).unwrap_or_default();
            dump_line(out, depth, &name);
            self.dump_frame(index + 1, depth + 1, out);
        }
    }

    fn current(&mut self) -> Result<&mut Frame, SceneError> {
        self.frames.last_mut().ok_or(SceneError::NoActiveGraph)
    }
}
