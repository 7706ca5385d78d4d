// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Planar mesh analytics and statistics

use super::Mesh;
use crate::utils::math::{orient_2d, triangle_angles_deg, triangle_area_2d};
use nalgebra::Point2;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Planar mesh statistics
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MeshStats {
    /// Sum of triangle areas
    pub area: f64,
    /// Smallest triangle corner angle in degrees
    pub min_angle: f64,
    /// Largest single triangle area
    pub max_triangle_area: f64,
    /// Bounding box [min_x, min_y, max_x, max_y]
    pub bbox: [f64; 4],
    /// Number of vertices
    pub vertex_count: usize,
    /// Number of triangles
    pub triangle_count: usize,
    /// Vertices no triangle refers to
    pub unused_vertex_count: usize,
    /// Edges used by exactly one triangle
    pub boundary_edge_count: usize,
}

impl MeshStats {
    /// Create empty stats
    pub fn empty() -> Self {
        Self {
            area: 0.0,
            min_angle: 0.0,
            max_triangle_area: 0.0,
            bbox: [0.0; 4],
            vertex_count: 0,
            triangle_count: 0,
            unused_vertex_count: 0,
            boundary_edge_count: 0,
        }
    }

    /// Pretty print statistics
    pub fn print(&self) {
        println!("╔══════════════════════════════════════════════════════════╗");
        println!("║              FACE MESH ANALYTICS                         ║");
        println!("╠══════════════════════════════════════════════════════════╣");
        println!("║ Area:            {:>12.6}                            ║", self.area);
        println!(
            "║ Max Triangle:    {:>12.6}                            ║",
            self.max_triangle_area
        );
        println!(
            "║ Min Angle:       {:>12.4}°                           ║",
            self.min_angle
        );
        println!("║                                                          ║");
        println!(
            "║ Bounds: ({:>8.3}, {:>8.3}) - ({:>8.3}, {:>8.3})          ║",
            self.bbox[0], self.bbox[1], self.bbox[2], self.bbox[3]
        );
        println!("║                                                          ║");
        println!(
            "║ Vertices:        {:>10}                              ║",
            self.vertex_count
        );
        println!(
            "║ Triangles:       {:>10}                              ║",
            self.triangle_count
        );
        println!(
            "║ Boundary Edges:  {:>10}                              ║",
            self.boundary_edge_count
        );
        println!("╚══════════════════════════════════════════════════════════╝");
    }
}

/// Analyze a planar mesh and compute statistics
pub fn analyze(mesh: &Mesh) -> MeshStats {
    let vertex_count = mesh.vertices.len();
    let triangle_count = mesh.triangles.len();

    if vertex_count == 0 || triangle_count == 0 {
        return MeshStats {
            vertex_count,
            triangle_count,
            unused_vertex_count: vertex_count,
            ..MeshStats::empty()
        };
    }

    let mut area = 0.0;
    let mut max_triangle_area: f64 = 0.0;
    let mut min_angle = f64::MAX;
    let mut used = vec![false; vertex_count];

    for (index, triangle) in mesh.triangles.iter().enumerate() {
        let Some([a, b, c]) = corners(mesh, index) else {
            continue;
        };
        let triangle_area = triangle_area_2d(&a, &b, &c);
        area += triangle_area;
        max_triangle_area = max_triangle_area.max(triangle_area);
        for angle in triangle_angles_deg(&a, &b, &c) {
            min_angle = min_angle.min(angle);
        }
        for &corner in &triangle.indices {
            if let Some(flag) = used.get_mut(corner) {
                *flag = true;
            }
        }
    }

    MeshStats {
        area,
        min_angle,
        max_triangle_area,
        bbox: mesh.bounding_box().to_array(),
        vertex_count,
        triangle_count,
        unused_vertex_count: used.iter().filter(|u| !**u).count(),
        boundary_edge_count: count_boundary_edges(mesh),
    }
}

/// Index of a triangle whose interior strictly contains `point`
pub fn locate_triangle(mesh: &Mesh, point: Point2<f64>) -> Option<usize> {
    (0..mesh.triangles.len()).find(|&index| {
        corners(mesh, index).is_some_and(|[a, b, c]| {
            let d1 = orient_2d(&a, &b, &point);
            let d2 = orient_2d(&b, &c, &point);
            let d3 = orient_2d(&c, &a, &point);
            (d1 > 0.0 && d2 > 0.0 && d3 > 0.0) || (d1 < 0.0 && d2 < 0.0 && d3 < 0.0)
        })
    })
}

fn corners(mesh: &Mesh, index: usize) -> Option<[Point2<f64>; 3]> {
    mesh.triangle_positions(index)
        .map(|positions| positions.map(|p| Point2::new(p.x, p.y)))
}

/// Count edges shared by exactly one triangle
fn count_boundary_edges(mesh: &Mesh) -> usize {
    let mut edge_count: HashMap<(usize, usize), usize> = HashMap::new();

    for triangle in &mesh.triangles {
        let indices = &triangle.indices;

        for i in 0..3 {
            let v1 = indices[i];
            let v2 = indices[(i + 1) % 3];

            // Normalize edge (smaller index first)
            let edge = if v1 < v2 { (v1, v2) } else { (v2, v1) };

            *edge_count.entry(edge).or_insert(0) += 1;
        }
    }

    edge_count.values().filter(|&&count| count == 1).count()
}
