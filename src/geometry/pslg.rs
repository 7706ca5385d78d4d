// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Planar straight-line graph description of a face

use crate::mesher::{BufferKind, FaceMesher, MeshError, Real, Triangulator};
use serde::{Deserialize, Serialize};

/// Points, boundary segments and hole seeds of one face
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Pslg {
    pub points: Vec<[f64; 2]>,
    pub segments: Vec<[usize; 2]>,
    #[serde(default)]
    pub holes: Vec<[f64; 2]>,
}

impl Pslg {
    pub fn new() -> Self {
        Self::default()
    }

    /// Closed polygon through `points`
    pub fn polygon(points: &[[f64; 2]]) -> Self {
        let mut pslg = Self::new();
        pslg.add_loop(points);
        pslg
    }

    /// Append a closed loop and return the index of its first point
    pub fn add_loop(&mut self, points: &[[f64; 2]]) -> usize {
        let first = self.points.len();
        let count = points.len();
        self.points.extend_from_slice(points);
        for offset in 0..count {
            self.segments
                .push([first + offset, first + (offset + 1) % count]);
        }
        first
    }

    /// Append an inner loop together with a hole seed inside it
    pub fn add_hole_loop(&mut self, points: &[[f64; 2]], seed: [f64; 2]) -> usize {
        let first = self.add_loop(points);
        self.holes.push(seed);
        first
    }

    pub fn add_hole(&mut self, x: f64, y: f64) {
        self.holes.push([x, y]);
    }

    /// Double precision mesher sized for and filled with this graph
    pub fn face_mesher<'a>(&self) -> FaceMesher<'a> {
        let mut mesher = FaceMesher::new(self.points.len(), self.segments.len(), self.holes.len());
        let filled = self.fill(&mut mesher);
        debug_assert!(filled.is_ok(), "mesher sized from the graph rejected it: {:?}", filled);
        mesher
    }

    /// Write this graph into a mesher whose counts match
    pub fn fill<R: Real, T: Triangulator>(
        &self,
        mesher: &mut FaceMesher<'_, R, T>,
    ) -> Result<(), MeshError> {
        for (index, [x, y]) in self.points.iter().enumerate() {
            if !mesher.set_point(index, R::from_f64(*x), R::from_f64(*y)) {
                return Err(out_of_range(BufferKind::Points, index, mesher.num_points()));
            }
        }
        for (index, [p1, p2]) in self.segments.iter().enumerate() {
            if !mesher.set_segment(index, *p1, *p2) {
                return Err(out_of_range(BufferKind::Segments, index, mesher.num_segments()));
            }
        }
        for (index, [x, y]) in self.holes.iter().enumerate() {
            if !mesher.set_hole(index, R::from_f64(*x), R::from_f64(*y)) {
                return Err(out_of_range(BufferKind::Holes, index, mesher.num_holes()));
            }
        }
        Ok(())
    }
}

fn out_of_range(kind: BufferKind, index: usize, count: usize) -> MeshError {
    MeshError::IndexOutOfRange { kind, index, count }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_polygon_closes_the_loop() {
        let pslg = Pslg::polygon(&[[0.0, 0.0], [1.0, 0.0], [0.0, 1.0]]);
        assert_eq!(pslg.segments, vec![[0, 1], [1, 2], [2, 0]]);
    }

    #[test]
    fn test_hole_loop_offsets_indices() {
        let mut pslg = Pslg::polygon(&[[0.0, 0.0], [4.0, 0.0], [4.0, 4.0], [0.0, 4.0]]);
        let first = pslg.add_hole_loop(&[[1.0, 1.0], [2.0, 1.0], [2.0, 2.0]], [1.6, 1.3]);
        assert_eq!(first, 4);
        assert_eq!(pslg.segments[4..].to_vec(), vec![[4, 5], [5, 6], [6, 4]]);
        assert_eq!(pslg.holes, vec![[1.6, 1.3]]);
    }

    #[test]
    fn test_fill_rejects_mismatched_counts() {
        let pslg = Pslg::polygon(&[[0.0, 0.0], [1.0, 0.0], [0.0, 1.0]]);
        let mut mesher = FaceMesher::new(2, 3, 0);
        assert_eq!(
            pslg.fill(&mut mesher),
            Err(MeshError::IndexOutOfRange {
                kind: BufferKind::Points,
                index: 2,
                count: 2
            })
        );
    }

    #[test]
    fn test_face_mesher_copies_everything() {
        let mut pslg = Pslg::polygon(&[[0.0, 0.0], [3.0, 0.0], [0.0, 3.0]]);
        pslg.add_hole(0.5, 0.5);
        let mesher = pslg.face_mesher();
        assert_eq!(mesher.num_points(), 3);
        assert_eq!(mesher.point(1), Some((3.0, 0.0)));
        assert_eq!(mesher.segment(2), Some((2, 0)));
        assert_eq!(mesher.hole(0), Some((0.5, 0.5)));
    }
}
