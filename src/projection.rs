// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Normal estimation and planar projection
//!
//! Two deliberately separate normal computations: a covariance-based fit
//! for judging coplanarity of a whole point set, and the exact cross
//! product of the leading triangle for building a projection frame. They
//! have different robustness trade-offs and are not interchangeable.

use nalgebra::{Point2, Point3, Vector3};

/// Best-fit plane normal for a near-coplanar point set.
///
/// Accumulates the second-moment (covariance) sums around the centroid
/// and normalizes the vector of its principal 2x2 minors. This is a
/// cheap proxy for the dominant principal axis, reliable only when the
/// points are close to one plane. Returns `None` for degenerate sets
/// (fewer than 3 points, or moments too small to normalize).
pub fn fitted_normal(points: &[Point3<f64>]) -> Option<Vector3<f64>> {
    if points.len() < 3 {
        return None;
    }

    let mut centroid = Vector3::zeros();
    for point in points {
        centroid += point.coords;
    }
    centroid /= points.len() as f64;

    let (mut xx, mut xy, mut xz) = (0.0, 0.0, 0.0);
    let (mut yy, mut yz, mut zz) = (0.0, 0.0, 0.0);
    for point in points {
        let delta = point.coords - centroid;
        xx += delta.x * delta.x;
        xy += delta.x * delta.y;
        xz += delta.x * delta.z;
        yy += delta.y * delta.y;
        yz += delta.y * delta.z;
        zz += delta.z * delta.z;
    }

    let normal = Vector3::new(
        yy * zz - yz * yz,
        xx * zz - xz * xz,
        xx * yy - xy * xy,
    );

    let len = normal.norm();
    if len < 1e-12 {
        return None;
    }
    Some(normal / len)
}

/// Exact normal of the triangle (a, b, c).
///
/// `None` when the points are near-collinear.
pub fn triangle_normal(
    a: &Point3<f64>,
    b: &Point3<f64>,
    c: &Point3<f64>,
) -> Option<Vector3<f64>> {
    let normal = (b - a).cross(&(c - a));
    let len = normal.norm();
    if len < 1e-10 {
        return None;
    }
    Some(normal / len)
}

/// Check whether a point set lies on one plane within `epsilon`.
///
/// Uses the fitted normal; sets too degenerate to fit a normal are
/// trivially coplanar, as are sets of fewer than 4 points.
pub fn are_points_coplanar(points: &[Point3<f64>], epsilon: f64) -> bool {
    if points.len() < 4 {
        return true;
    }

    let normal = match fitted_normal(points) {
        Some(normal) => normal,
        None => return true,
    };

    let base = points[0];
    points
        .iter()
        .all(|point| (point - base).dot(&normal).abs() < epsilon)
}

/// Project vertices into a 2D frame on the plane with the given normal.
///
/// The in-plane x axis points from the centroid towards the first vertex,
/// falling back to a cross-product axis when that direction degenerates
/// or runs near-parallel to the normal.
pub fn project_to_plane(vertices: &[Point3<f64>], normal: &Vector3<f64>) -> Vec<Point2<f64>> {
    if vertices.is_empty() {
        return Vec::new();
    }

    let mut centroid = Vector3::zeros();
    for vertex in vertices {
        centroid += vertex.coords;
    }
    centroid /= vertices.len() as f64;

    let towards_first = vertices[0].coords - centroid;
    let mut basis_x = if towards_first.norm() > 1e-12 {
        towards_first.normalize()
    } else {
        fallback_basis(normal)
    };
    if basis_x.dot(normal).abs() > 0.9 {
        basis_x = fallback_basis(normal);
    }

    let basis_y = normal.cross(&basis_x).normalize();

    vertices
        .iter()
        .map(|vertex| {
            let relative = vertex.coords - centroid;
            Point2::new(relative.dot(&basis_x), relative.dot(&basis_y))
        })
        .collect()
}

fn fallback_basis(normal: &Vector3<f64>) -> Vector3<f64> {
    let candidate = Vector3::x().cross(normal);
    if candidate.norm() > 1e-10 {
        candidate.normalize()
    } else {
        // Normal is along x, any perpendicular axis works
        Vector3::y().cross(normal).normalize()
    }
}
