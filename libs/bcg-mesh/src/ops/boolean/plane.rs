//! # Plane for BSP Operations
//!
//! Plane representation with point classification.

use glam::DVec3;

// =============================================================================
// CLASSIFICATION
// =============================================================================

/// Position of a point or polygon relative to a plane.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Classification {
    Front,
    Back,
    Coplanar,
    Spanning,
}

// =============================================================================
// PLANE
// =============================================================================

/// Oriented plane `normal · p = w` with a unit normal.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Plane {
    normal: DVec3,
    w: f64,
}

impl Plane {
    pub fn new(normal: DVec3, w: f64) -> Self {
        Self { normal, w }
    }

    /// Best-fit plane of a polygon using Newell's method.
    ///
    /// Returns `None` for zero-area input.
    pub fn from_polygon(points: &[DVec3]) -> Option<Self> {
        if points.len() < 3 {
            return None;
        }
        let mut normal = DVec3::ZERO;
        let mut centroid = DVec3::ZERO;
        for (i, current) in points.iter().enumerate() {
            let next = points[(i + 1) % points.len()];
            normal.x += (current.y - next.y) * (current.z + next.z);
            normal.y += (current.z - next.z) * (current.x + next.x);
            normal.z += (current.x - next.x) * (current.y + next.y);
            centroid += *current;
        }
        let normal = normal.try_normalize()?;
        let centroid = centroid / points.len() as f64;
        Some(Self {
            normal,
            w: normal.dot(centroid),
        })
    }

    pub fn normal(&self) -> DVec3 {
        self.normal
    }

    pub fn w(&self) -> f64 {
        self.w
    }

    pub fn flip(&self) -> Plane {
        Plane {
            normal: -self.normal,
            w: -self.w,
        }
    }

    pub fn signed_distance(&self, point: DVec3) -> f64 {
        self.normal.dot(point) - self.w
    }

    pub fn classify_point(&self, point: DVec3, epsilon: f64) -> Classification {
        let dist = self.signed_distance(point);
        if dist > epsilon {
            Classification::Front
        } else if dist < -epsilon {
            Classification::Back
        } else {
            Classification::Coplanar
        }
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f64 = 1e-9;

    #[test]
    fn test_plane_from_polygon() {
        let plane =
            Plane::from_polygon(&[DVec3::ZERO, DVec3::X, DVec3::new(1.0, 1.0, 0.0), DVec3::Y])
                .unwrap();
        assert_eq!(plane.normal(), DVec3::Z);
        assert_eq!(plane.w(), 0.0);
    }

    #[test]
    fn test_plane_degenerate() {
        assert!(Plane::from_polygon(&[DVec3::ZERO, DVec3::X, DVec3::X * 2.0]).is_none());
        assert!(Plane::from_polygon(&[DVec3::ZERO, DVec3::X]).is_none());
    }

    #[test]
    fn test_plane_classify_point() {
        let plane = Plane::new(DVec3::Z, 0.0);
        assert_eq!(plane.classify_point(DVec3::Z, EPS), Classification::Front);
        assert_eq!(plane.classify_point(-DVec3::Z, EPS), Classification::Back);
        assert_eq!(
            plane.classify_point(DVec3::new(1.0, 1.0, 1e-12), EPS),
            Classification::Coplanar
        );
    }

    #[test]
    fn test_plane_flip() {
        let flipped = Plane::new(DVec3::Z, 5.0).flip();
        assert_eq!(flipped.normal(), -DVec3::Z);
        assert_eq!(flipped.w(), -5.0);
    }
}
