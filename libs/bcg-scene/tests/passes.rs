//! End-to-end tests for `build_object`.

use approx::assert_relative_eq;
use bcg_mesh::{Mesh, NativeHost, ProfilePoint};
use bcg_scene::{build_object, BuildContext, BuildOptions, PassKind, SceneError, Scope};
use config::constants::{HIGH_DETAIL_FACETS, LOW_DETAIL_FACETS};
use glam::DVec3;

fn profile(raw: &[(f64, f64)]) -> Vec<ProfilePoint> {
    raw.iter().copied().map(ProfilePoint::from).collect()
}

fn build<F>(name: &str, options: &BuildOptions, script: F) -> (NativeHost, Vec<(String, Mesh)>)
where
    F: FnMut(&mut BuildContext) -> Result<(), SceneError>,
{
    let mut host = NativeHost::new();
    let output = build_object(name, options, &mut host, script).unwrap();
    let meshes = output
        .meshes
        .into_iter()
        .map(|m| (m.name, m.mesh))
        .collect();
    (host, meshes)
}

#[test]
fn right_cylinder_from_two_point_profile() {
    let (_, meshes) = build("Cyl", &BuildOptions::default(), |ctx| {
        ctx.profile_sweep(&profile(&[(1.0, 0.0), (1.0, 2.0)]), 4, false)
    });

    assert_eq!(meshes.len(), 2);
    for (name, mesh) in &meshes {
        assert_eq!(mesh.vertex_count(), 8, "{name}");
        assert_eq!(mesh.face_count(), 6, "{name}");
        assert!(mesh.validate());
        assert_relative_eq!(mesh.signed_volume(), 4.0, epsilon = 1e-12);
    }
}

#[test]
fn bipyramid_has_no_pole_band() {
    for facets in [3, 5, 8, 24] {
        let (_, meshes) = build("Bi", &BuildOptions::default().preview(), |ctx| {
            ctx.profile_sweep(&profile(&[(0.0, -1.0), (1.0, 0.0), (0.0, 1.0)]), facets, false)
        });
        let mesh = &meshes[0].1;
        assert_eq!(mesh.vertex_count(), facets as usize + 2);
        assert_eq!(mesh.face_count(), 2 * facets as usize);
        assert!(mesh.faces().iter().all(|f| f.len() == 3));
    }
}

#[test]
fn disjoint_union_matches_group_join() {
    let script = |scope: Scope| {
        move |ctx: &mut BuildContext| {
            ctx.with(scope.clone(), |ctx| {
                ctx.cube(DVec3::ONE, false)?;
                ctx.with(Scope::translate(3.0, 0.0, 0.0), |ctx| {
                    ctx.cube(DVec3::ONE, false)
                })
            })
        }
    };
    let options = BuildOptions::default().preview();
    let (union_host, union) = build("U", &options, script(Scope::union()));
    let (group_host, group) = build("G", &options, script(Scope::group()));

    assert_eq!(union_host.stats().booleans, 1);
    assert_eq!(group_host.stats().booleans, 0);
    assert_eq!(union[0].1.vertex_count(), group[0].1.vertex_count());
    assert_eq!(union[0].1.face_count(), group[0].1.face_count());
    assert_relative_eq!(union[0].1.signed_volume(), 2.0, epsilon = 1e-9);
}

#[test]
fn disjoint_curved_union_matches_group_join() {
    let script = |scope: Scope| {
        move |ctx: &mut BuildContext| {
            ctx.with(scope.clone(), |ctx| {
                ctx.cylinder(1.0, 1.0, 2.0, false, 8)?;
                ctx.with(Scope::translate(5.0, 0.3, 0.2), |ctx| ctx.sphere(1.0, 8, 4))
            })
        }
    };
    let options = BuildOptions::default().preview();
    let (_, union) = build("U", &options, script(Scope::union()));
    let (_, group) = build("G", &options, script(Scope::group()));

    assert_eq!(union[0].1.vertex_count(), group[0].1.vertex_count());
    assert_eq!(union[0].1.face_count(), group[0].1.face_count());
    assert_relative_eq!(
        union[0].1.signed_volume(),
        group[0].1.signed_volume(),
        epsilon = 1e-9
    );
}

#[test]
fn self_difference_is_empty() {
    let (host, meshes) = build("Nothing", &BuildOptions::default(), |ctx| {
        ctx.with(Scope::difference(), |ctx| {
            ctx.cube(DVec3::splat(2.0), true)?;
            ctx.with(Scope::translate(0.0, 0.0, 0.0), |ctx| {
                ctx.cube(DVec3::splat(2.0), true)
            })
        })
    });
    assert_eq!(host.stats().booleans, 2);
    for (name, mesh) in &meshes {
        assert!(mesh.is_empty(), "{name}");
    }
}

#[test]
fn preview_runs_only_low_pass() {
    let mut calls = Vec::new();
    let (_, meshes) = build("Part", &BuildOptions::default().preview(), |ctx| {
        calls.push(ctx.pass());
        ctx.cube(DVec3::ONE, false)
    });
    assert_eq!(calls, [PassKind::Low]);
    assert_eq!(meshes.len(), 1);
    assert_eq!(meshes[0].0, "Part.Lo");
}

#[test]
fn passes_see_their_own_resolution() {
    let mut seen = Vec::new();
    let (_, meshes) = build("Rod", &BuildOptions::default(), |ctx| {
        seen.push((ctx.is_high_detail_pass(), ctx.facets()));
        let stacks = ctx.select_by_pass(6, 3);
        ctx.with(Scope::union(), |ctx| {
            ctx.cylinder(1.0, 1.0, 4.0, false, None)?;
            ctx.sphere(1.0, None, stacks)
        })
    });

    assert_eq!(
        seen,
        [(false, LOW_DETAIL_FACETS), (true, HIGH_DETAIL_FACETS)]
    );
    let names: Vec<&str> = meshes.iter().map(|(name, _)| name.as_str()).collect();
    assert_eq!(names, ["Rod.Lo", "Rod.Hi"]);
    assert!(meshes[1].1.vertex_count() > meshes[0].1.vertex_count());
}

#[test]
fn debug_scopes_add_snapshots_per_pass() {
    let (host, meshes) = build("Panel", &BuildOptions::default(), |ctx| {
        ctx.with(Scope::difference(), |ctx| {
            ctx.cube(DVec3::new(10.0, 10.0, 2.0), false)?;
            ctx.with(Scope::debug() + Scope::translate(5.0, 5.0, -1.0), |ctx| {
                ctx.cylinder(1.0, 1.0, 4.0, false, 8)
            })
        })
    });

    let names: Vec<&str> = meshes.iter().map(|(name, _)| name.as_str()).collect();
    assert_eq!(
        names,
        ["Panel.Lo", "Panel.Lo.Debug", "Panel.Hi", "Panel.Hi.Debug"]
    );
    assert_eq!(host.duplicate_names(), ["Panel.Lo.Debug", "Panel.Hi.Debug"]);

    // The debugged cutter still cuts the primary mesh
    let panel = &meshes[0].1;
    assert!(panel.signed_volume() < 200.0);
    let snapshot = &meshes[1].1;
    let (min, max) = snapshot.bounding_box();
    assert_eq!(min, DVec3::new(4.0, 4.0, -1.0));
    assert_eq!(max, DVec3::new(6.0, 6.0, 3.0));
}

#[test]
fn debug_collection_disabled() {
    let options = BuildOptions {
        collect_debug: false,
        ..BuildOptions::default()
    };
    let (host, meshes) = build("Part", &options, |ctx| {
        ctx.with(Scope::debug(), |ctx| ctx.cube(DVec3::ONE, false))
    });
    assert_eq!(meshes.len(), 2);
    assert_eq!(host.stats().duplicates, 0);
    assert_eq!(meshes[0].1.face_count(), 6);
}

#[test]
fn debugged_boolean_runs_once_per_pass() {
    let (host, meshes) = build("Cut", &BuildOptions::default().preview(), |ctx| {
        ctx.with(Scope::debug() + Scope::difference(), |ctx| {
            ctx.cube(DVec3::splat(2.0), false)?;
            ctx.with(Scope::translate(0.5, 0.5, 1.5), |ctx| {
                ctx.cube(DVec3::ONE, false)
            })
        })
    });
    assert_eq!(host.stats().booleans, 1);
    assert_eq!(host.stats().duplicates, 1);
    assert_eq!(meshes[1].0, "Cut.Lo.Debug");
    assert_eq!(meshes[0].1, meshes[1].1);
    assert_relative_eq!(meshes[1].1.signed_volume(), 7.5, epsilon = 1e-9);
}

#[test]
fn unbalanced_scope_fails_the_pass() {
    let mut host = NativeHost::new();
    let err = build_object("Broken", &BuildOptions::default(), &mut host, |ctx| {
        ctx.begin_group(bcg_scene::Operation::Hull)?;
        ctx.cube(DVec3::ONE, false)
    })
    .unwrap_err();

    match &err {
        SceneError::PassFailed { pass, source } => {
            assert_eq!(pass, "Broken.Lo");
            assert_eq!(**source, SceneError::UnbalancedScopes { open: 1 });
        }
        other => panic!("unexpected error {other:?}"),
    }
}

#[test]
fn failure_aborts_remaining_passes() {
    let mut host = NativeHost::new();
    let mut runs = 0;
    let err = build_object("Bad", &BuildOptions::default(), &mut host, |ctx| {
        runs += 1;
        ctx.profile_sweep(&profile(&[(1.0, 2.0), (1.0, 0.0)]), None, false)
    })
    .unwrap_err();

    assert_eq!(runs, 1);
    assert!(matches!(err.root_cause(), SceneError::Mesh(_)));
    assert!(err.to_string().contains("Bad.Lo"));
}

#[test]
fn script_arguments_reach_every_pass() {
    let options = BuildOptions::default().with_arg("size", "3");
    let (_, meshes) = build("Arg", &options, |ctx| {
        let size: f64 = ctx
            .arg("size")
            .and_then(|s| s.parse().ok())
            .ok_or_else(|| SceneError::invalid_argument("size"))?;
        ctx.cube(DVec3::splat(size), false)
    });
    for (_, mesh) in &meshes {
        assert_relative_eq!(mesh.signed_volume(), 27.0, epsilon = 1e-12);
    }
}

#[test]
fn build_output_serializes() {
    let mut host = NativeHost::new();
    let output = build_object("Json", &BuildOptions::default().preview(), &mut host, |ctx| {
        ctx.cube(DVec3::ONE, false)
    })
    .unwrap();

    let json = serde_json::to_string(&output).unwrap();
    assert!(json.contains("\"Json.Lo\""));
    let back: bcg_scene::BuildOutput = serde_json::from_str(&json).unwrap();
    assert_eq!(back, output);
}
