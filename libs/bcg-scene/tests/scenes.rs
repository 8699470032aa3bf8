//! Larger scenes combining helpers, decomposition and booleans.

use bcg_mesh::{BooleanOp, NativeHost, ProfilePoint};
use bcg_scene::{build_object, BuildContext, BuildOptions, RotationAxis, SceneError, Scope};
use glam::DVec3;

const PLATE: (f64, f64, f64) = (20.0, 10.0, 3.0);
const CORNER_RADIUS: f64 = 2.0;

/// Stepped button hole: narrow shaft, flared countersink.
fn button_profile() -> Vec<ProfilePoint> {
    [(1.0, -1.0), (1.0, 1.5), (1.5, 2.0), (1.5, 4.0)]
        .into_iter()
        .map(ProfilePoint::from)
        .collect()
}

fn plate(ctx: &mut BuildContext) -> Result<(), SceneError> {
    let facets = ctx.select_by_pass(32, 16);
    ctx.square_hull(PLATE.0, PLATE.1, CORNER_RADIUS, |ctx| {
        ctx.cylinder(CORNER_RADIUS, CORNER_RADIUS, PLATE.2, false, facets)
    })
}

fn panel(ctx: &mut BuildContext) -> Result<(), SceneError> {
    ctx.with(Scope::difference(), |ctx| {
        plate(ctx)?;
        for x in [6.0, 14.0] {
            ctx.with(Scope::translate(x, 5.0, 0.0), |ctx| {
                ctx.convex_sweep(&button_profile(), 16)
            })?;
        }
        Ok(())
    })
}

#[test]
fn button_panel_is_cut_by_decomposed_holes() {
    let options = BuildOptions::default().preview();

    let mut plate_host = NativeHost::new();
    let plate_only = build_object("Plate", &options, &mut plate_host, plate).unwrap();
    let plate_volume = plate_only.get("Plate.Lo").unwrap().signed_volume();

    let mut host = NativeHost::new();
    let output = build_object("Panel", &options, &mut host, panel).unwrap();
    let mesh = output.get("Panel.Lo").unwrap();

    // Corner cylinders touch the plate outline at quarter turns
    let (min, max) = mesh.bounding_box();
    assert_eq!(min, DVec3::ZERO);
    assert_eq!(max, DVec3::new(PLATE.0, PLATE.1, PLATE.2));

    // Each hole removes roughly 13.9 units: shaft, countersink cone and bore
    let removed = plate_volume - mesh.signed_volume();
    assert!(removed > 20.0 && removed < 35.0, "removed {removed}");

    // One difference plus one union per decomposed button
    let stats = host.stats();
    assert_eq!(stats.booleans, 3);
    assert_eq!(stats.hulls, 1 + 2 * 2);
}

#[test]
fn rotated_quarter_turns_stay_exact() {
    let options = BuildOptions::default().preview();
    let mut host = NativeHost::new();
    let output = build_object("Bracket", &options, &mut host, |ctx| {
        ctx.with(Scope::group(), |ctx| {
            ctx.cube(DVec3::new(4.0, 1.0, 1.0), false)?;
            ctx.with(
                Scope::translate(1.0, 0.0, 0.0) + Scope::rotate(90.0, RotationAxis::Y),
                |ctx| ctx.cube(DVec3::new(4.0, 1.0, 1.0), false),
            )
        })
    })
    .unwrap();

    let mesh = output.get("Bracket.Lo").unwrap();
    for v in mesh.vertices() {
        assert_eq!(*v, v.round(), "vertex drifted: {v}");
    }
    let (min, max) = mesh.bounding_box();
    assert_eq!(min, DVec3::new(0.0, 0.0, -4.0));
    assert_eq!(max, DVec3::new(4.0, 1.0, 1.0));
    assert_eq!(host.stats().booleans, 0);
}

#[test]
fn pinned_solver_and_intersection() {
    let options = BuildOptions::default().preview();
    let mut host = NativeHost::new();
    let output = build_object("Lens", &options, &mut host, |ctx| {
        let scope = Scope::new(bcg_scene::Operation::boolean(BooleanOp::Intersection))
            .with_solver(bcg_mesh::SolverHint::Fast);
        ctx.with(scope, |ctx| {
            ctx.cube(DVec3::splat(2.0), false)?;
            ctx.with(Scope::translate(1.0, 1.0, 1.0), |ctx| {
                ctx.cube(DVec3::splat(2.0), false)
            })
        })
    })
    .unwrap();

    let mesh = output.get("Lens.Lo").unwrap();
    approx::assert_relative_eq!(mesh.signed_volume(), 1.0, epsilon = 1e-6);
    assert_eq!(host.stats().booleans, 1);
}

#[test]
fn torus_ring_hull_and_tree_dump() {
    let mut ctx = BuildContext::new("Ring.Lo", bcg_scene::PassKind::Low, BuildOptions::default());
    ctx.with(Scope::hull(), |ctx| {
        ctx.torus(3.0, 1.0, 12, 8)?;
        ctx.with(Scope::translate(0.0, 0.0, 5.0), |ctx| ctx.sphere(1.0, 8, 4))
    })
    .unwrap();
    assert_eq!(
        ctx.graph().dump(),
        "Hull\n. torus\n. Translate(0.000000,0.000000,5.000000)\n. . sphere\n"
    );

    let roots = ctx.finish().unwrap();
    let mut host = NativeHost::new();
    let mut engine = bcg_scene::Engine::new(&mut host, bcg_mesh::SolverHint::Exact);
    let mesh = engine.render_all(&roots).unwrap();
    let (min, max) = mesh.bounding_box();
    assert_eq!(min.z, -1.0);
    assert_eq!(max.z, 6.0);
    assert_eq!(max.x, 4.0);
}

#[test]
fn mixed_scene_builds_both_passes() {
    let tilted = |s: f64| {
        Scope::translate(s, 2.0 * s, 3.0 * s)
            + Scope::rotate(10.0 + s, RotationAxis::X)
            + Scope::translate(0.0, 0.0, 0.0)
    };

    let mut host = NativeHost::new();
    let output = build_object("Stuff", &BuildOptions::default(), &mut host, |ctx| {
        let facets = ctx.select_by_pass(48, 12);
        ctx.with(tilted(1.0) + Scope::hull(), |ctx| {
            ctx.cylinder(1.0, 1.0, 1.0, false, None)?;
            ctx.with(
                Scope::translate(0.0, 3.0, 0.0) + Scope::translate(3.0, 0.0, 0.0),
                |ctx| ctx.cylinder(1.0, 1.0, 1.0, false, facets),
            )
        })?;
        ctx.with(Scope::translate(-2.0, -2.0, 0.0) + Scope::difference(), |ctx| {
            ctx.cylinder(1.0, 1.0, 1.0, false, None)?;
            ctx.with(Scope::translate(0.0, 0.0, -1.0), |ctx| {
                ctx.cylinder(0.5, 0.5, 3.0, false, facets)
            })
        })?;
        ctx.with(Scope::translate(2.0, -2.0, 0.0) + Scope::difference(), |ctx| {
            ctx.cylinder(1.0, 1.0, 1.0, false, None)?;
            ctx.with(Scope::translate(0.0, 0.0, 1.0), |ctx| ctx.sphere(0.5, facets, None))
        })
    })
    .unwrap();

    assert_eq!(output.names(), ["Stuff.Lo", "Stuff.Hi"]);
    let stats = host.stats();
    assert_eq!(stats.booleans, 4);
    assert_eq!(stats.hulls, 2);

    let lo = output.get("Stuff.Lo").unwrap();
    let hi = output.get("Stuff.Hi").unwrap();
    assert!(lo.signed_volume() > 0.0);
    assert!(hi.signed_volume() > 0.0);
    assert!(hi.vertex_count() > lo.vertex_count());
}
