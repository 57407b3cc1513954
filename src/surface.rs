// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Planar surface construction
//!
//! Builds a filled, triangulated mesh from an ordered list of
//! near-coplanar 3D vertices: project into the plane of the leading
//! triangle, triangulate in 2D, then emit buffers in the input vertex
//! order with area-weighted vertex normals.

use crate::error::{Error, Result};
use crate::mesh::Mesh;
use crate::projection::{project_to_plane, triangle_normal};
use crate::triangulation::triangulate_polygon;
use nalgebra::Point3;

/// Build a filled planar surface mesh from polygon vertices.
///
/// Fewer than 3 vertices produce a point-only mesh (positions, no
/// indices, no normals) as a defined fallback. The projection frame
/// comes from the exact normal of the first three vertices, so a
/// near-collinear leading triple is rejected as invalid input.
pub fn build_planar_surface(vertices: &[Point3<f64>]) -> Result<Mesh> {
    if vertices.len() < 3 {
        let mut mesh = Mesh::with_capacity(vertices.len(), 0);
        for vertex in vertices {
            mesh.add_point(*vertex);
        }
        return Ok(mesh);
    }

    let normal = triangle_normal(&vertices[0], &vertices[1], &vertices[2]).ok_or_else(|| {
        Error::InvalidInput("first three vertices are collinear".to_string())
    })?;

    let projected = project_to_plane(vertices, &normal);
    let indices = triangulate_polygon(&projected)?;

    let mut mesh = Mesh::with_capacity(vertices.len(), indices.len());
    // Positions keep the input 3D vertex order, not the projected order
    for vertex in vertices {
        mesh.add_point(*vertex);
    }
    mesh.indices = indices;
    mesh.compute_vertex_normals();

    Ok(mesh)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn mesh_area(mesh: &Mesh) -> f64 {
        let mut area = 0.0;
        for tri in 0..mesh.triangle_count() {
            let (a, b, c) = mesh.triangle(tri);
            area += (b - a).cross(&(c - a)).norm() * 0.5;
        }
        area
    }

    #[test]
    fn test_unit_square_surface() {
        let vertices = vec![
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(1.0, 0.0, 0.0),
            Point3::new(1.0, 1.0, 0.0),
            Point3::new(0.0, 1.0, 0.0),
        ];

        let mesh = build_planar_surface(&vertices).unwrap();

        assert_eq!(mesh.vertex_count(), 4);
        assert_eq!(mesh.triangle_count(), 2);
        assert_relative_eq!(mesh_area(&mesh), 1.0, epsilon = 1e-6);

        // Normals are unit length and perpendicular to the square
        for chunk in mesh.normals.chunks_exact(3) {
            assert_relative_eq!(chunk[0], 0.0, epsilon = 1e-6);
            assert_relative_eq!(chunk[1], 0.0, epsilon = 1e-6);
            assert_relative_eq!(chunk[2].abs(), 1.0, epsilon = 1e-6);
        }
    }

    #[test]
    fn test_positions_keep_input_order() {
        let vertices = vec![
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(2.0, 0.0, 0.0),
            Point3::new(2.0, 1.0, 0.0),
            Point3::new(0.0, 1.0, 0.0),
        ];

        let mesh = build_planar_surface(&vertices).unwrap();

        for (i, vertex) in vertices.iter().enumerate() {
            let p = mesh.position(i);
            assert_relative_eq!(p.x, vertex.x, epsilon = 1e-6);
            assert_relative_eq!(p.y, vertex.y, epsilon = 1e-6);
            assert_relative_eq!(p.z, vertex.z, epsilon = 1e-6);
        }
    }

    #[test]
    fn test_point_only_fallback() {
        for count in 0..3 {
            let vertices: Vec<Point3<f64>> =
                (0..count).map(|i| Point3::new(i as f64, 0.0, 0.0)).collect();

            let mesh = build_planar_surface(&vertices).unwrap();

            assert_eq!(mesh.vertex_count(), count);
            assert!(mesh.indices.is_empty());
            assert!(mesh.normals.is_empty());
        }
    }

    #[test]
    fn test_tilted_pentagon() {
        // Regular-ish pentagon rotated out of the XY plane
        let normal = nalgebra::Vector3::new(0.0, 1.0, 1.0).normalize();
        let u = nalgebra::Vector3::x();
        let v = normal.cross(&u);
        let origin = Point3::new(1.0, 2.0, 3.0);

        let vertices: Vec<Point3<f64>> = (0..5)
            .map(|i| {
                let angle = i as f64 * std::f64::consts::TAU / 5.0;
                origin + u * angle.cos() + v * angle.sin()
            })
            .collect();

        let mesh = build_planar_surface(&vertices).unwrap();

        assert_eq!(mesh.vertex_count(), 5);
        assert_eq!(mesh.triangle_count(), 3);

        // Area of a regular pentagon with circumradius 1
        let expected = 5.0 / 2.0 * (std::f64::consts::TAU / 5.0).sin();
        assert_relative_eq!(mesh_area(&mesh), expected, epsilon = 1e-5);
    }

    #[test]
    fn test_collinear_leading_vertices_rejected() {
        let vertices = vec![
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(1.0, 0.0, 0.0),
            Point3::new(2.0, 0.0, 0.0),
            Point3::new(0.0, 1.0, 0.0),
        ];

        let result = build_planar_surface(&vertices);
        assert!(matches!(result, Err(Error::InvalidInput(_))));
    }
}
