// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Plane clipping
//!
//! Intersects every mesh triangle with the clip quad's plane, clamps the
//! resulting boundary segments against the quad silhouette and stitches
//! them into ordered cross-section paths.

use crate::error::{Error, Result};
use crate::mesh::Mesh;
use crate::plane::Plane;
use crate::predicates::{point_in_quad, segment_intersection, LINE_TOLERANCE, MERGE_EPSILON};
use crate::stitch::{stitch_segments, Path};
use nalgebra::Point3;
use smallvec::SmallVec;

/// Shortest boundary segment the clipper will emit
const MIN_SEGMENT_LENGTH: f64 = 1e-6;

/// Ordered pair of boundary endpoints
#[derive(Debug, Clone, Copy)]
pub struct Segment {
    pub start: Point3<f64>,
    pub end: Point3<f64>,
}

impl Segment {
    /// Create a new segment
    #[inline]
    pub fn new(start: Point3<f64>, end: Point3<f64>) -> Self {
        Self { start, end }
    }

    /// Segment length
    #[inline]
    pub fn length(&self) -> f64 {
        (self.end - self.start).norm()
    }
}

/// Planar quadrilateral clip region
///
/// Four ordered points assumed to lie near one plane and form a simple
/// quadrilateral. Containment treats vertex 0 with its two adjacent edges
/// as the affine basis, so strongly non-parallelogram quads are tested
/// against the parallelogram those edges span.
#[derive(Debug, Clone)]
pub struct ClipQuad {
    vertices: [Point3<f64>; 4],
}

impl ClipQuad {
    /// Create a clip quad from exactly four points
    pub fn new(vertices: &[Point3<f64>]) -> Result<Self> {
        let vertices: [Point3<f64>; 4] = vertices.try_into().map_err(|_| {
            Error::InvalidInput(format!(
                "clip quad needs exactly 4 vertices, got {}",
                vertices.len()
            ))
        })?;
        Ok(Self { vertices })
    }

    /// The four corner points
    #[inline]
    pub fn vertices(&self) -> &[Point3<f64>; 4] {
        &self.vertices
    }

    /// Test whether a point on the quad's plane falls inside the region
    #[inline]
    pub fn contains(&self, point: &Point3<f64>) -> bool {
        point_in_quad(point, &self.vertices)
    }

    /// Clip plane through the first three vertices
    pub fn plane(&self) -> Result<Plane> {
        Plane::from_points(self.vertices[0], self.vertices[1], self.vertices[2]).ok_or_else(
            || Error::InvalidInput("first three clip quad vertices are collinear".to_string()),
        )
    }

    /// The four boundary edges, wrapping back to the first vertex
    fn edges(&self) -> impl Iterator<Item = (Point3<f64>, Point3<f64>)> + '_ {
        (0..4).map(move |i| (self.vertices[i], self.vertices[(i + 1) % 4]))
    }
}

/// Clip a mesh against the quad's plane, returning raw boundary segments.
///
/// Each triangle contributes at most one segment: the one spanned by
/// exactly two edge/plane crossings. Segments entirely outside the quad
/// are dropped; segments straddling the quad boundary are clamped to the
/// first boundary-edge intersection. Degenerate results below
/// `MIN_SEGMENT_LENGTH` are discarded.
pub fn clip_segments(mesh: &Mesh, quad: &ClipQuad) -> Result<Vec<Segment>> {
    let plane = quad.plane()?;
    validate_mesh(mesh)?;

    let mut segments = Vec::new();

    for tri in 0..mesh.triangle_count() {
        let (v0, v1, v2) = mesh.triangle(tri);

        let mut hits: SmallVec<[Point3<f64>; 3]> = SmallVec::new();
        for (a, b) in [(v0, v1), (v0, v2), (v1, v2)] {
            if let Some(point) = plane.intersect_edge(&a, &b) {
                hits.push(point);
            }
        }

        // Only a clean two-point crossing yields a boundary candidate
        if hits.len() != 2 {
            continue;
        }

        let inside = [quad.contains(&hits[0]), quad.contains(&hits[1])];
        if !inside[0] && !inside[1] {
            continue;
        }

        let mut segment = Segment::new(hits[0], hits[1]);
        if inside[0] != inside[1] {
            // One endpoint escapes the quad: clamp the segment to the
            // quad silhouette at the first boundary edge it crosses
            let kept = if inside[0] { hits[0] } else { hits[1] };
            for (edge_start, edge_end) in quad.edges() {
                if let Some(boundary) = segment_intersection(
                    &hits[0],
                    &hits[1],
                    &edge_start,
                    &edge_end,
                    LINE_TOLERANCE,
                ) {
                    segment = Segment::new(kept, boundary);
                    break;
                }
            }
        }

        if segment.length() > MIN_SEGMENT_LENGTH {
            segments.push(segment);
        }
    }

    Ok(segments)
}

/// Clip a mesh against the quad and stitch the boundary into paths.
///
/// Closed cross-sections come back as loops with the duplicate terminal
/// point removed; partial cuts come back as open polylines.
pub fn cross_section(mesh: &Mesh, quad: &ClipQuad) -> Result<Vec<Path>> {
    let segments = clip_segments(mesh, quad)?;
    Ok(stitch_segments(&segments, MERGE_EPSILON))
}

fn validate_mesh(mesh: &Mesh) -> Result<()> {
    if mesh.positions.len() % 3 != 0 {
        return Err(Error::InvalidInput(format!(
            "position buffer length {} is not a multiple of 3",
            mesh.positions.len()
        )));
    }
    if mesh.indices.len() % 3 != 0 {
        return Err(Error::InvalidInput(format!(
            "index buffer length {} is not a multiple of 3",
            mesh.indices.len()
        )));
    }
    let vertex_count = mesh.vertex_count() as u32;
    if let Some(&bad) = mesh.indices.iter().find(|&&i| i >= vertex_count) {
        return Err(Error::InvalidInput(format!(
            "index {} out of range for {} vertices",
            bad, vertex_count
        )));
    }
    Ok(())
}
