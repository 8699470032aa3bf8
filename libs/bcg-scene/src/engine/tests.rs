//! Tests for the construction engine.

use super::*;
use crate::node::RotationAxis;
use approx::assert_relative_eq;
use bcg_mesh::primitives::create_cube;
use bcg_mesh::{BooleanOp, MeshError, NativeHost};
use glam::DVec3;

/// Host that records every call and never combines anything.
#[derive(Default)]
struct RecordingHost {
    calls: Vec<String>,
}

impl MeshHost for RecordingHost {
    fn apply_boolean(
        &mut self,
        primary: Mesh,
        secondary: Mesh,
        op: BooleanOp,
        solver: SolverHint,
    ) -> Result<Mesh, MeshError> {
        self.calls.push(format!(
            "{op} {solver:?} {}+{}",
            primary.face_count(),
            secondary.face_count()
        ));
        Ok(primary)
    }

    fn convex_hull(&mut self, points: &[DVec3]) -> Result<Mesh, MeshError> {
        self.calls.push(format!("hull {}", points.len()));
        bcg_mesh::ops::convex_hull(points)
    }

    fn join(&mut self, meshes: Vec<Mesh>) -> Result<Mesh, MeshError> {
        self.calls.push(format!("join {}", meshes.len()));
        Ok(Mesh::join(meshes))
    }

    fn duplicate(&mut self, mesh: &Mesh, name: &str) -> Result<Mesh, MeshError> {
        self.calls.push(format!("duplicate {name}"));
        Ok(mesh.clone())
    }
}

fn cube(size: f64) -> SceneNode {
    SceneNode::Leaf {
        name: "cube".to_string(),
        mesh: create_cube(DVec3::splat(size), false).unwrap(),
    }
}

fn empty() -> SceneNode {
    SceneNode::Leaf {
        name: "empty".to_string(),
        mesh: Mesh::new(),
    }
}

fn node(op: Operation, children: Vec<SceneNode>) -> SceneNode {
    SceneNode::Composite { op, children }
}

fn debug(tag: Option<&str>, children: Vec<SceneNode>) -> SceneNode {
    node(
        Operation::Debug {
            tag: tag.map(str::to_string),
        },
        children,
    )
}

#[test]
fn leaf_renders_its_mesh() {
    let mut host = RecordingHost::default();
    let mesh = Engine::new(&mut host, SolverHint::Exact)
        .render(&cube(1.0))
        .unwrap();
    assert_eq!(mesh.face_count(), 6);
    assert!(host.calls.is_empty());
}

#[test]
fn boolean_combines_first_child_with_join_of_rest() {
    let mut host = RecordingHost::default();
    let tree = node(
        Operation::boolean(BooleanOp::Difference),
        vec![cube(3.0), cube(1.0), cube(2.0)],
    );
    Engine::new(&mut host, SolverHint::Fast).render(&tree).unwrap();
    assert_eq!(host.calls, ["join 2", "Difference Fast 6+12"]);
}

#[test]
fn pinned_solver_overrides_default() {
    let mut host = RecordingHost::default();
    let tree = node(
        Operation::Boolean {
            op: BooleanOp::Union,
            solver: Some(SolverHint::Exact),
        },
        vec![cube(1.0), cube(1.0)],
    );
    Engine::new(&mut host, SolverHint::Fast).render(&tree).unwrap();
    assert_eq!(host.calls.last().map(String::as_str), Some("Union Exact 6+6"));
}

#[test]
fn boolean_with_one_operand_falls_back_to_join() {
    let mut host = RecordingHost::default();
    let tree = node(
        Operation::boolean(BooleanOp::Difference),
        vec![empty(), cube(1.0), empty()],
    );
    let mesh = Engine::new(&mut host, SolverHint::Exact).render(&tree).unwrap();
    assert_eq!(mesh.face_count(), 6);
    assert_eq!(host.calls, ["join 1"]);
}

#[test]
fn transforms_apply_to_children() {
    let mut host = RecordingHost::default();
    let tree = node(
        Operation::Translate(DVec3::new(5.0, 0.0, 0.0)),
        vec![node(
            Operation::Rotate {
                degrees: 90.0,
                axis: RotationAxis::Z,
            },
            vec![cube(1.0)],
        )],
    );
    let mesh = Engine::new(&mut host, SolverHint::Exact).render(&tree).unwrap();
    let (min, max) = mesh.bounding_box();
    assert_eq!(min, DVec3::new(4.0, 0.0, 0.0));
    assert_eq!(max, DVec3::new(5.0, 1.0, 1.0));
}

#[test]
fn hull_of_nothing_stays_empty() {
    let mut host = RecordingHost::default();
    let tree = node(Operation::Hull, vec![empty(), node(Operation::Group, vec![])]);
    let mesh = Engine::new(&mut host, SolverHint::Exact).render(&tree).unwrap();
    assert!(mesh.is_empty());
    assert!(host.calls.iter().all(|call| !call.starts_with("hull")));
}

#[test]
fn hull_spans_translated_children() {
    let mut host = NativeHost::new();
    let tree = node(
        Operation::Hull,
        vec![
            cube(1.0),
            node(Operation::Translate(DVec3::new(3.0, 0.0, 0.0)), vec![cube(1.0)]),
        ],
    );
    let mesh = Engine::new(&mut host, SolverHint::Exact).render(&tree).unwrap();
    assert_relative_eq!(mesh.signed_volume(), 4.0, epsilon = 1e-9);
    assert_eq!(host.stats().hulls, 1);
}

#[test]
fn construct_joins_top_level_nodes() {
    let mut host = NativeHost::new();
    let nodes = vec![
        cube(1.0),
        node(Operation::Translate(DVec3::new(2.0, 0.0, 0.0)), vec![cube(1.0)]),
    ];
    let result = Engine::new(&mut host, SolverHint::Exact)
        .construct(&nodes, "Part.Lo", true)
        .unwrap();
    assert_eq!(result.mesh.vertex_count(), 16);
    assert!(result.debug.is_empty());
}

#[test]
fn debug_snapshots_are_named_and_positioned() {
    let mut host = RecordingHost::default();
    let nodes = vec![node(
        Operation::Translate(DVec3::new(0.0, 0.0, 10.0)),
        vec![
            debug(None, vec![cube(1.0)]),
            debug(None, vec![cube(2.0)]),
            debug(Some("holes"), vec![cube(1.0)]),
            debug(Some("nothing"), vec![empty()]),
        ],
    )];
    let result = Engine::new(&mut host, SolverHint::Exact)
        .construct(&nodes, "Part.Lo", true)
        .unwrap();

    let names: Vec<&str> = result.debug.iter().map(|s| s.name.as_str()).collect();
    assert_eq!(
        names,
        ["Part.Lo.Debug", "Part.Lo.Debug.001", "Part.Lo.Debug.holes"]
    );
    assert_eq!(result.debug[0].mesh.bounding_box().0.z, 10.0);
    assert_eq!(result.debug[1].mesh.bounding_box().1, DVec3::new(2.0, 2.0, 12.0));
    assert_eq!(
        host.calls
            .iter()
            .filter(|call| call.starts_with("duplicate"))
            .count(),
        3
    );
    // Debug groups still contribute to the primary mesh
    assert_eq!(result.mesh.face_count(), 18);
}

#[test]
fn nested_debug_scopes_each_snapshot() {
    let mut host = RecordingHost::default();
    let nodes = vec![debug(
        Some("outer"),
        vec![
            cube(1.0),
            node(
                Operation::Translate(DVec3::new(5.0, 0.0, 0.0)),
                vec![debug(Some("inner"), vec![cube(1.0)])],
            ),
        ],
    )];
    let result = Engine::new(&mut host, SolverHint::Exact)
        .construct(&nodes, "P.Hi", true)
        .unwrap();
    assert_eq!(result.debug.len(), 2);
    assert_eq!(result.debug[0].mesh.face_count(), 12);
    assert_eq!(result.debug[1].name, "P.Hi.Debug.inner");
    assert_eq!(result.debug[1].mesh.bounding_box().0.x, 5.0);
}

#[test]
fn debug_subtree_renders_once() {
    let mut host = RecordingHost::default();
    let nodes = vec![node(
        Operation::Translate(DVec3::new(0.0, 0.0, 4.0)),
        vec![debug(
            None,
            vec![node(
                Operation::boolean(BooleanOp::Difference),
                vec![cube(2.0), debug(Some("tool"), vec![cube(1.0)])],
            )],
        )],
    )];
    let result = Engine::new(&mut host, SolverHint::Exact)
        .construct(&nodes, "Part.Lo", true)
        .unwrap();

    let booleans = host
        .calls
        .iter()
        .filter(|call| call.starts_with("Difference"))
        .count();
    assert_eq!(booleans, 1);
    let names: Vec<&str> = result.debug.iter().map(|s| s.name.as_str()).collect();
    assert_eq!(names, ["Part.Lo.Debug", "Part.Lo.Debug.tool"]);
    assert_eq!(result.debug[1].mesh.bounding_box().0.z, 4.0);
}

#[test]
fn debug_collection_can_be_disabled() {
    let mut host = RecordingHost::default();
    let nodes = vec![debug(None, vec![cube(1.0)])];
    let result = Engine::new(&mut host, SolverHint::Exact)
        .construct(&nodes, "Part.Lo", false)
        .unwrap();
    assert!(result.debug.is_empty());
    assert_eq!(result.mesh.face_count(), 6);
}

#[test]
fn host_errors_propagate() {
    struct FailingHost;
    impl MeshHost for FailingHost {
        fn apply_boolean(
            &mut self,
            _primary: Mesh,
            _secondary: Mesh,
            _op: BooleanOp,
            _solver: SolverHint,
        ) -> Result<Mesh, MeshError> {
            Err(MeshError::boolean_failed("solver gave up"))
        }
        fn convex_hull(&mut self, _points: &[DVec3]) -> Result<Mesh, MeshError> {
            Err(MeshError::hull_failed("unsupported"))
        }
        fn duplicate(&mut self, mesh: &Mesh, _name: &str) -> Result<Mesh, MeshError> {
            Ok(mesh.clone())
        }
    }

    let tree = node(
        Operation::boolean(BooleanOp::Union),
        vec![cube(1.0), cube(1.0)],
    );
    let err = Engine::new(&mut FailingHost, SolverHint::Exact)
        .render(&tree)
        .unwrap_err();
    assert_eq!(err, SceneError::Mesh(MeshError::boolean_failed("solver gave up")));
}

#[test]
fn deep_nesting_renders() {
    let mut tree = cube(1.0);
    for _ in 0..1_000 {
        tree = node(Operation::Group, vec![tree]);
    }
    let mut host = NativeHost::new();
    let result = Engine::new(&mut host, SolverHint::Exact)
        .construct(std::slice::from_ref(&tree), "Deep.Lo", true)
        .unwrap();
    assert_eq!(result.mesh.face_count(), 6);
}
