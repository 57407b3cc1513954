// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Geometric predicates
//!
//! Containment and intersection tests used by the clipping pipeline.
//! Degenerate configurations (collinear bases, parallel lines, segments
//! that miss each other) report "no result" rather than erroring.

use nalgebra::Point3;

/// Tolerance for line degeneracy and intersection acceptance
pub const LINE_TOLERANCE: f64 = 1e-6;

/// Tolerance cell size for merging nearby points during stitching
pub const MERGE_EPSILON: f64 = 1e-5;

/// Test whether a point lies within the quadrilateral spanned by
/// `quad[0]` and its two adjacent edges towards `quad[1]` and `quad[3]`.
///
/// Solves the normal equations for the affine coordinates (s, t) of the
/// point in the (u, v) edge basis. `quad[2]` does not participate: the
/// region tested is the parallelogram spanned by the basis corner, which
/// matches the intended planar-quad inputs.
pub fn point_in_quad(point: &Point3<f64>, quad: &[Point3<f64>; 4]) -> bool {
    let u = quad[1] - quad[0];
    let v = quad[3] - quad[0];
    let w = point - quad[0];

    let uu = u.dot(&u);
    let uv = u.dot(&v);
    let vv = v.dot(&v);
    let wu = w.dot(&u);
    let wv = w.dot(&v);

    let denom = uu * vv - uv * uv;
    // Near-zero denominator means u and v are collinear, no valid basis
    if denom.abs() < LINE_TOLERANCE {
        return false;
    }

    let s = (wu * vv - wv * uv) / denom;
    let t = (wv * uu - wu * uv) / denom;

    (0.0..=1.0).contains(&s) && (0.0..=1.0).contains(&t)
}

/// Nearest-point intersection of two 3D segments.
///
/// Solves the closest-point-of-approach system for the two carrying
/// lines. Returns `None` when the lines are parallel within tolerance,
/// when either closest-approach parameter falls outside its segment, or
/// when the segments pass each other farther apart than `tolerance`
/// (skew, non-coplanar case). Otherwise returns the point on the first
/// segment.
pub fn segment_intersection(
    p1: &Point3<f64>,
    p2: &Point3<f64>,
    p3: &Point3<f64>,
    p4: &Point3<f64>,
    tolerance: f64,
) -> Option<Point3<f64>> {
    let r = p2 - p1;
    let s = p4 - p3;
    let w0 = p1 - p3;

    let a = r.dot(&r);
    let b = r.dot(&s);
    let c = s.dot(&s);
    let d = r.dot(&w0);
    let e = s.dot(&w0);

    let denom = a * c - b * b;
    if denom.abs() < tolerance {
        return None;
    }

    let t = (b * e - c * d) / denom;
    let s_param = (a * e - b * d) / denom;

    // The carrying lines meet, but outside one of the segments
    if !(0.0..=1.0).contains(&t) || !(0.0..=1.0).contains(&s_param) {
        return None;
    }

    let on_first = p1 + r * t;
    let on_second = p3 + s * s_param;

    if (on_first - on_second).norm() > tolerance {
        return None;
    }

    Some(on_first)
}
