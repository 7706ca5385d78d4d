// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Mesh representation and the sink interface the face mesher writes into

use super::BoundingBox;
use nalgebra::{Point3, Vector3};
use serde::{Deserialize, Serialize};

/// Receiver of a triangulated face.
///
/// The face mesher resets the sink, then inserts every output point followed
/// by every triangle, in output order.
pub trait MeshSink {
    /// Remove all points and cells
    fn reset(&mut self);

    /// Append a point and return its index
    fn insert_point(&mut self, position: Point3<f64>) -> usize;

    /// Append a triangle cell tagged with the model face it belongs to
    fn insert_triangle(&mut self, indices: [usize; 3], face_id: i64);
}

/// Vertex with position and normal
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Vertex {
    pub position: Point3<f64>,
    pub normal: Vector3<f64>,
}

impl Vertex {
    pub fn new(position: Point3<f64>, normal: Vector3<f64>) -> Self {
        Self { position, normal }
    }

    /// Vertex of a planar face, facing +Z
    pub fn planar(position: Point3<f64>) -> Self {
        Self::new(position, Vector3::z())
    }
}

/// Triangle defined by three vertex indices and the face it was meshed from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Triangle {
    pub indices: [usize; 3],
    pub face_id: i64,
}

impl Triangle {
    pub fn new(indices: [usize; 3], face_id: i64) -> Self {
        Self { indices, face_id }
    }
}

/// Triangular mesh
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Mesh {
    pub vertices: Vec<Vertex>,
    pub triangles: Vec<Triangle>,
}

impl Mesh {
    pub fn new() -> Self {
        Self {
            vertices: Vec::new(),
            triangles: Vec::new(),
        }
    }

    pub fn with_capacity(vertex_count: usize, triangle_count: usize) -> Self {
        Self {
            vertices: Vec::with_capacity(vertex_count),
            triangles: Vec::with_capacity(triangle_count),
        }
    }

    /// Add a vertex and return its index
    pub fn add_vertex(&mut self, vertex: Vertex) -> usize {
        let index = self.vertices.len();
        self.vertices.push(vertex);
        index
    }

    /// Add a triangle
    pub fn add_triangle(&mut self, triangle: Triangle) {
        self.triangles.push(triangle);
    }

    /// Compute the bounding box of the vertex positions in the XY plane
    pub fn bounding_box(&self) -> BoundingBox {
        BoundingBox::from_points(self.vertices.iter().map(|v| (v.position.x, v.position.y)))
    }

    /// Get vertex count
    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    /// Get triangle count
    pub fn triangle_count(&self) -> usize {
        self.triangles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty() && self.triangles.is_empty()
    }

    /// Corner positions of triangle `index`
    pub fn triangle_positions(&self, index: usize) -> Option<[Point3<f64>; 3]> {
        let triangle = self.triangles.get(index)?;
        let [a, b, c] = triangle.indices;
        Some([
            self.vertices.get(a)?.position,
            self.vertices.get(b)?.position,
            self.vertices.get(c)?.position,
        ])
    }

    /// Append another mesh, offsetting its triangle indices
    pub fn merge(&mut self, other: &Mesh) {
        let offset = self.vertices.len();
        self.vertices.extend_from_slice(&other.vertices);

        for triangle in &other.triangles {
            self.triangles.push(Triangle::new(
                [
                    triangle.indices[0] + offset,
                    triangle.indices[1] + offset,
                    triangle.indices[2] + offset,
                ],
                triangle.face_id,
            ));
        }
    }
}

impl MeshSink for Mesh {
    fn reset(&mut self) {
        self.vertices.clear();
        self.triangles.clear();
    }

    fn insert_point(&mut self, position: Point3<f64>) -> usize {
        self.add_vertex(Vertex::planar(position))
    }

    fn insert_triangle(&mut self, indices: [usize; 3], face_id: i64) {
        self.add_triangle(Triangle::new(indices, face_id));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn unit_triangle(face_id: i64) -> Mesh {
        let mut mesh = Mesh::new();
        mesh.insert_point(Point3::new(0.0, 0.0, 0.0));
        mesh.insert_point(Point3::new(1.0, 0.0, 0.0));
        mesh.insert_point(Point3::new(0.0, 1.0, 0.0));
        mesh.insert_triangle([0, 1, 2], face_id);
        mesh
    }

    #[test]
    fn test_sink_reset_clears_everything() {
        let mut mesh = unit_triangle(3);
        assert_eq!(mesh.vertex_count(), 3);
        assert_eq!(mesh.triangle_count(), 1);

        mesh.reset();
        assert!(mesh.is_empty());
    }

    #[test]
    fn test_merge_offsets_indices_and_keeps_face_ids() {
        let mut mesh = unit_triangle(1);
        mesh.merge(&unit_triangle(2));

        assert_eq!(mesh.vertex_count(), 6);
        assert_eq!(mesh.triangles[1], Triangle::new([3, 4, 5], 2));
    }

    #[test]
    fn test_planar_vertices_face_up() {
        let mesh = unit_triangle(0);
        assert!(mesh.vertices.iter().all(|v| v.normal == Vector3::z()));
        let corners = mesh.triangle_positions(0).unwrap();
        assert_eq!(corners[1], Point3::new(1.0, 0.0, 0.0));
        assert!(mesh.triangle_positions(1).is_none());
    }
}
