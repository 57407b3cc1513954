// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Polygon triangulation
//!
//! Wrapper around earcutr for 2D simple-polygon triangulation. The
//! polygon must be non-self-intersecting; holes are out of scope.

use crate::error::{Error, Result};
use nalgebra::Point2;

/// Triangulate a simple polygon (no holes)
/// Returns triangle indices into the input points
pub fn triangulate_polygon(points: &[Point2<f64>]) -> Result<Vec<u32>> {
    let n = points.len();

    if n < 3 {
        return Err(Error::TriangulationError(
            "need at least 3 points to triangulate".to_string(),
        ));
    }

    // FAST PATH: a triangle is its own triangulation
    if n == 3 {
        return Ok(vec![0, 1, 2]);
    }

    // Flatten points for earcutr
    let mut vertices = Vec::with_capacity(n * 2);
    for p in points {
        vertices.push(p.x);
        vertices.push(p.y);
    }

    let indices = earcutr::earcut(&vertices, &[], 2)
        .map_err(|e| Error::TriangulationError(format!("{:?}", e)))?;

    Ok(indices.into_iter().map(|i| i as u32).collect())
}
