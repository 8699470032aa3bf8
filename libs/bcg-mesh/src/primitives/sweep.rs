//! # Profile Sweep
//!
//! Surface of revolution generator. Every round primitive (cylinder, cone,
//! sphere, torus) is a profile swept around the z axis.
//!
//! ## Winding
//!
//! For consecutive profile points `a` (lower) and `b` (upper) the band quad is
//! `[a_i, a_{i+1}, b_{i+1}, b_i]`. Its normal is `(dz, -dr)` in the
//! `(radius, z)` plane, i.e. outward for a profile walked bottom to top, and
//! outward for a looping profile walked counter-clockwise.

use crate::error::MeshError;
use crate::mesh::Mesh;
use crate::profile::{validate_profile, ProfilePoint};
use crate::trig::sin_cos_turn;
use config::constants::MIN_FACETS;
use glam::DVec3;

/// Vertex layout of one cross-section.
#[derive(Debug, Clone, Copy)]
enum Section {
    /// Single vertex on the axis
    Pole(u32),
    /// `facets` consecutive vertices starting at this index
    Ring(u32),
}

impl Section {
    fn vertex(self, i: u32, facets: u32) -> u32 {
        match self {
            Section::Pole(index) => index,
            Section::Ring(start) => start + i % facets,
        }
    }
}

/// Sweeps a `(radius, z)` profile around the z axis.
///
/// # Arguments
///
/// * `profile` - Cross-sections, bottom to top (or a closed loop)
/// * `facets` - Number of segments around the axis (≥ 3)
/// * `looped` - Connect the last cross-section back to the first instead of
///   capping both ends
///
/// # Example
///
/// ```rust
/// use bcg_mesh::primitives::sweep_profile;
/// use bcg_mesh::ProfilePoint;
///
/// // Bipyramid: two poles around one ring
/// let profile = [
///     ProfilePoint::new(0.0, -1.0),
///     ProfilePoint::new(1.0, 0.0),
///     ProfilePoint::new(0.0, 1.0),
/// ];
/// let mesh = sweep_profile(&profile, 6, false).unwrap();
/// assert_eq!(mesh.vertex_count(), 8);
/// assert_eq!(mesh.face_count(), 12);
/// ```
pub fn sweep_profile(
    profile: &[ProfilePoint],
    facets: u32,
    looped: bool,
) -> Result<Mesh, MeshError> {
    if facets < MIN_FACETS {
        return Err(MeshError::degenerate(format!(
            "Sweep needs at least {MIN_FACETS} facets, got {facets}"
        )));
    }
    validate_profile(profile, looped)?;

    let ring_count = profile.iter().filter(|p| !p.is_pole()).count();
    let pole_count = profile.len() - ring_count;
    let mut mesh = Mesh::with_capacity(
        ring_count * facets as usize + pole_count,
        (profile.len() + 1) * facets as usize,
    );

    let sections: Vec<Section> = profile
        .iter()
        .map(|p| {
            if p.is_pole() {
                Section::Pole(mesh.add_vertex(DVec3::new(0.0, 0.0, p.z)))
            } else {
                let start = mesh.vertex_count() as u32;
                for i in 0..facets {
                    let (s, c) = sin_cos_turn(i, facets);
                    mesh.add_vertex(DVec3::new(p.radius * c, p.radius * s, p.z));
                }
                Section::Ring(start)
            }
        })
        .collect();

    let band_count = if looped {
        profile.len()
    } else {
        profile.len() - 1
    };
    for k in 0..band_count {
        let next = (k + 1) % profile.len();
        if profile[k] == profile[next] {
            continue;
        }
        add_band(&mut mesh, sections[k], sections[next], facets);
    }

    if !looped {
        if let Some(Section::Ring(start)) = sections.first().copied() {
            mesh.add_face((0..facets).rev().map(|i| start + i).collect::<Vec<_>>());
        }
        if let Some(Section::Ring(start)) = sections.last().copied() {
            mesh.add_face((0..facets).map(|i| start + i).collect::<Vec<_>>());
        }
    }

    Ok(mesh)
}

fn add_band(mesh: &mut Mesh, lower: Section, upper: Section, facets: u32) {
    match (lower, upper) {
        (Section::Pole(_), Section::Pole(_)) => {}
        (Section::Pole(p), ring) => {
            for i in 0..facets {
                mesh.add_face([p, ring.vertex(i + 1, facets), ring.vertex(i, facets)]);
            }
        }
        (ring, Section::Pole(q)) => {
            for i in 0..facets {
                mesh.add_face([ring.vertex(i, facets), ring.vertex(i + 1, facets), q]);
            }
        }
        (a, b) => {
            for i in 0..facets {
                mesh.add_face([
                    a.vertex(i, facets),
                    a.vertex(i + 1, facets),
                    b.vertex(i + 1, facets),
                    b.vertex(i, facets),
                ]);
            }
        }
    }
}
