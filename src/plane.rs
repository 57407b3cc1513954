// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Plane definition and edge intersection

use nalgebra::{Point3, Vector3};

/// Plane defined by a point and a unit normal
#[derive(Debug, Clone, Copy)]
pub struct Plane {
    /// Point on the plane
    pub point: Point3<f64>,
    /// Normal vector (must be normalized)
    pub normal: Vector3<f64>,
}

impl Plane {
    /// Create a new plane
    pub fn new(point: Point3<f64>, normal: Vector3<f64>) -> Self {
        Self {
            point,
            normal: normal.normalize(),
        }
    }

    /// Create a plane through three points, `None` when they are collinear
    pub fn from_points(a: Point3<f64>, b: Point3<f64>, c: Point3<f64>) -> Option<Self> {
        let normal = (b - a).cross(&(c - a));
        let len = normal.norm();
        if len < 1e-10 {
            return None;
        }
        Some(Self {
            point: a,
            normal: normal / len,
        })
    }

    /// Calculate signed distance from point to plane
    /// Positive = in front, Negative = behind
    #[inline]
    pub fn signed_distance(&self, point: &Point3<f64>) -> f64 {
        (point - self.point).dot(&self.normal)
    }

    /// Intersect the edge from `a` to `b` with the plane.
    ///
    /// Returns the crossing point only when it lies within the edge span
    /// (parameter in [0, 1]). Edges parallel to the plane yield `None`,
    /// including edges lying in the plane.
    pub fn intersect_edge(&self, a: &Point3<f64>, b: &Point3<f64>) -> Option<Point3<f64>> {
        let direction = b - a;
        let denom = self.normal.dot(&direction);
        if denom.abs() < 1e-12 {
            return None;
        }

        let t = self.normal.dot(&(self.point - a)) / denom;
        if !(0.0..=1.0).contains(&t) {
            return None;
        }

        Some(a + direction * t)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_plane_signed_distance() {
        let plane = Plane::new(Point3::new(0.0, 0.0, 0.0), Vector3::new(0.0, 0.0, 1.0));

        assert_eq!(plane.signed_distance(&Point3::new(0.0, 0.0, 5.0)), 5.0);
        assert_eq!(plane.signed_distance(&Point3::new(0.0, 0.0, -5.0)), -5.0);
        assert_eq!(plane.signed_distance(&Point3::new(5.0, 5.0, 0.0)), 0.0);
    }

    #[test]
    fn test_from_points() {
        let plane = Plane::from_points(
            Point3::new(1.0, 0.0, 0.0),
            Point3::new(1.0, 1.0, 0.0),
            Point3::new(1.0, 0.0, 1.0),
        )
        .unwrap();
        assert_relative_eq!(plane.normal.x.abs(), 1.0, epsilon = 1e-9);
        assert_relative_eq!(plane.normal.y, 0.0, epsilon = 1e-9);
    }

    #[test]
    fn test_from_points_collinear() {
        let plane = Plane::from_points(
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(1.0, 0.0, 0.0),
            Point3::new(2.0, 0.0, 0.0),
        );
        assert!(plane.is_none());
    }

    #[test]
    fn test_intersect_edge_crossing() {
        let plane = Plane::new(Point3::new(0.0, 0.0, 1.0), Vector3::new(0.0, 0.0, 1.0));
        let hit = plane
            .intersect_edge(&Point3::new(0.0, 0.0, 0.0), &Point3::new(0.0, 0.0, 2.0))
            .unwrap();
        assert_relative_eq!(hit.z, 1.0, epsilon = 1e-9);
    }

    #[test]
    fn test_intersect_edge_outside_span() {
        let plane = Plane::new(Point3::new(0.0, 0.0, 5.0), Vector3::new(0.0, 0.0, 1.0));
        let hit = plane.intersect_edge(&Point3::new(0.0, 0.0, 0.0), &Point3::new(0.0, 0.0, 2.0));
        assert!(hit.is_none());
    }

    #[test]
    fn test_intersect_edge_parallel() {
        let plane = Plane::new(Point3::new(0.0, 0.0, 1.0), Vector3::new(0.0, 0.0, 1.0));
        let hit = plane.intersect_edge(&Point3::new(0.0, 0.0, 0.0), &Point3::new(1.0, 0.0, 0.0));
        assert!(hit.is_none());
    }
}
