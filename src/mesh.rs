// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Mesh data structures

use crate::{Error, Result};
use nalgebra::{Point3, Vector3};

/// Triangle mesh
///
/// Flat position/normal buffers (3 floats per vertex) plus a triangle
/// index buffer (3 indices per triangle). A point-only mesh carries
/// positions but no indices and no normals.
#[derive(Debug, Clone)]
pub struct Mesh {
    /// Vertex positions (x, y, z)
    pub positions: Vec<f32>,
    /// Vertex normals (nx, ny, nz)
    pub normals: Vec<f32>,
    /// Triangle indices (i0, i1, i2)
    pub indices: Vec<u32>,
}

impl Mesh {
    /// Create a new empty mesh
    pub fn new() -> Self {
        Self {
            positions: Vec::new(),
            normals: Vec::new(),
            indices: Vec::new(),
        }
    }

    /// Create a mesh with capacity
    pub fn with_capacity(vertex_count: usize, index_count: usize) -> Self {
        Self {
            positions: Vec::with_capacity(vertex_count * 3),
            normals: Vec::with_capacity(vertex_count * 3),
            indices: Vec::with_capacity(index_count),
        }
    }

    /// Build a mesh from caller-supplied buffers, validating their shape.
    ///
    /// The position buffer length must be a multiple of 3, the index buffer
    /// length a multiple of 3, and every index must reference an existing
    /// vertex.
    pub fn from_buffers(positions: Vec<f32>, indices: Vec<u32>) -> Result<Self> {
        if positions.len() % 3 != 0 {
            return Err(Error::InvalidInput(format!(
                "position buffer length {} is not a multiple of 3",
                positions.len()
            )));
        }
        if indices.len() % 3 != 0 {
            return Err(Error::InvalidInput(format!(
                "index buffer length {} is not a multiple of 3",
                indices.len()
            )));
        }

        let vertex_count = (positions.len() / 3) as u32;
        if let Some(&bad) = indices.iter().find(|&&i| i >= vertex_count) {
            return Err(Error::InvalidInput(format!(
                "index {} out of range for {} vertices",
                bad, vertex_count
            )));
        }

        Ok(Self {
            positions,
            normals: Vec::new(),
            indices,
        })
    }

    /// Get vertex position in f64 precision
    #[inline]
    pub fn position(&self, index: usize) -> Point3<f64> {
        Point3::new(
            self.positions[index * 3] as f64,
            self.positions[index * 3 + 1] as f64,
            self.positions[index * 3 + 2] as f64,
        )
    }

    /// Get the three corners of a triangle
    #[inline]
    pub fn triangle(&self, tri: usize) -> (Point3<f64>, Point3<f64>, Point3<f64>) {
        let i0 = self.indices[tri * 3] as usize;
        let i1 = self.indices[tri * 3 + 1] as usize;
        let i2 = self.indices[tri * 3 + 2] as usize;
        (self.position(i0), self.position(i1), self.position(i2))
    }

    /// Add a position without a normal (point-only geometry)
    #[inline]
    pub fn add_point(&mut self, position: Point3<f64>) {
        self.positions.push(position.x as f32);
        self.positions.push(position.y as f32);
        self.positions.push(position.z as f32);
    }

    /// Add a vertex with normal
    #[inline]
    pub fn add_vertex(&mut self, position: Point3<f64>, normal: Vector3<f64>) {
        self.positions.push(position.x as f32);
        self.positions.push(position.y as f32);
        self.positions.push(position.z as f32);

        self.normals.push(normal.x as f32);
        self.normals.push(normal.y as f32);
        self.normals.push(normal.z as f32);
    }

    /// Add a triangle
    #[inline]
    pub fn add_triangle(&mut self, i0: u32, i1: u32, i2: u32) {
        self.indices.push(i0);
        self.indices.push(i1);
        self.indices.push(i2);
    }

    /// Get vertex count
    #[inline]
    pub fn vertex_count(&self) -> usize {
        self.positions.len() / 3
    }

    /// Get triangle count
    #[inline]
    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    /// Check if mesh is empty
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    /// Recompute per-vertex normals by area-weighted face-normal accumulation
    ///
    /// The unnormalized cross product of two triangle edges is proportional
    /// to the triangle area, so summing raw face normals per vertex before
    /// normalizing gives the area weighting.
    pub fn compute_vertex_normals(&mut self) {
        let vertex_count = self.vertex_count();
        if vertex_count == 0 {
            return;
        }

        let mut normals = vec![Vector3::<f64>::zeros(); vertex_count];

        for tri in 0..self.triangle_count() {
            let (v0, v1, v2) = self.triangle(tri);
            let face_normal = (v1 - v0).cross(&(v2 - v0));

            normals[self.indices[tri * 3] as usize] += face_normal;
            normals[self.indices[tri * 3 + 1] as usize] += face_normal;
            normals[self.indices[tri * 3 + 2] as usize] += face_normal;
        }

        self.normals.clear();
        self.normals.reserve(vertex_count * 3);

        for normal in normals {
            let len = normal.norm();
            // Vertices not referenced by any triangle keep a zero normal
            let normalized = if len > 1e-12 { normal / len } else { normal };
            self.normals.push(normalized.x as f32);
            self.normals.push(normalized.y as f32);
            self.normals.push(normalized.z as f32);
        }
    }
}

impl Default for Mesh {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mesh_creation() {
        let mesh = Mesh::new();
        assert!(mesh.is_empty());
        assert_eq!(mesh.vertex_count(), 0);
        assert_eq!(mesh.triangle_count(), 0);
    }

    #[test]
    fn test_add_vertex() {
        let mut mesh = Mesh::new();
        mesh.add_vertex(Point3::new(1.0, 2.0, 3.0), Vector3::new(0.0, 0.0, 1.0));
        assert_eq!(mesh.vertex_count(), 1);
        assert_eq!(mesh.positions, vec![1.0, 2.0, 3.0]);
        assert_eq!(mesh.normals, vec![0.0, 0.0, 1.0]);
    }

    #[test]
    fn test_from_buffers_valid() {
        let mesh = Mesh::from_buffers(
            vec![0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 1.0, 0.0],
            vec![0, 1, 2],
        )
        .unwrap();
        assert_eq!(mesh.vertex_count(), 3);
        assert_eq!(mesh.triangle_count(), 1);
    }

    #[test]
    fn test_from_buffers_index_out_of_range() {
        let result = Mesh::from_buffers(vec![0.0, 0.0, 0.0, 1.0, 0.0, 0.0], vec![0, 1, 2]);
        assert!(matches!(result, Err(Error::InvalidInput(_))));
    }

    #[test]
    fn test_from_buffers_ragged_positions() {
        let result = Mesh::from_buffers(vec![0.0, 0.0], vec![]);
        assert!(matches!(result, Err(Error::InvalidInput(_))));
    }

    #[test]
    fn test_triangle_accessor() {
        let mesh = Mesh::from_buffers(
            vec![0.0, 0.0, 0.0, 2.0, 0.0, 0.0, 0.0, 0.0, 2.0],
            vec![0, 1, 2],
        )
        .unwrap();
        let (a, b, c) = mesh.triangle(0);
        assert_eq!(a, Point3::new(0.0, 0.0, 0.0));
        assert_eq!(b, Point3::new(2.0, 0.0, 0.0));
        assert_eq!(c, Point3::new(0.0, 0.0, 2.0));
    }

    #[test]
    fn test_compute_vertex_normals_flat_triangle() {
        let mut mesh = Mesh::from_buffers(
            vec![0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 1.0, 0.0],
            vec![0, 1, 2],
        )
        .unwrap();
        mesh.compute_vertex_normals();

        assert_eq!(mesh.normals.len(), 9);
        for chunk in mesh.normals.chunks_exact(3) {
            assert!((chunk[2] - 1.0).abs() < 1e-6);
        }
    }
}
