// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Face mesher facade
//!
//! [`FaceMesher`] owns the triangulation buffer records of one model face.
//! Points, segments and holes are written by index into buffers sized at
//! construction, meshing options are validated into a switch string, and a
//! successful triangulation is copied into a caller-owned [`MeshSink`].

use super::error::{BufferKind, MeshError};
use super::real::Real;
use super::switches::Switches;
use super::tio::{BufferOwnership, TriangleBuffers, TriangulateIo};
use super::triangulator::{SpadeTriangulator, Triangulator};
use crate::geometry::{BoundingBox, MeshSink};
use nalgebra::Point3;

/// Largest minimum-angle bound the quality refinement converges for
pub const MIN_ANGLE_LIMIT: f64 = 33.0;

/// Whether the last build produced a mesh
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MesherState {
    Configuring,
    Built,
}

/// Counts reported by a successful build
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MeshSummary {
    pub points: usize,
    pub triangles: usize,
    pub segments: usize,
    /// Output points that were not in the input
    pub steiner_points: usize,
}

/// Constrained Delaunay mesher for a single planar face
pub struct FaceMesher<'a, R: Real = f64, T: Triangulator = SpadeTriangulator> {
    num_points: usize,
    num_segments: usize,
    num_holes: usize,
    max_area: f64,
    max_area_enabled: bool,
    min_angle: f64,
    min_angle_enabled: bool,
    buffers: TriangleBuffers<R>,
    output_mesh: Option<&'a mut dyn MeshSink>,
    triangulator: T,
    state: MesherState,
}

impl<'a> FaceMesher<'a> {
    /// Double precision mesher backed by the default triangulation routine
    pub fn new(num_points: usize, num_segments: usize, num_holes: usize) -> Self {
        Self::with_triangulator(num_points, num_segments, num_holes, SpadeTriangulator::default())
    }
}

impl<'a, R: Real, T: Triangulator> FaceMesher<'a, R, T> {
    /// Mesher with zero-initialized buffers of fixed size
    pub fn with_triangulator(
        num_points: usize,
        num_segments: usize,
        num_holes: usize,
        triangulator: T,
    ) -> Self {
        Self {
            num_points,
            num_segments,
            num_holes,
            max_area: 0.0,
            max_area_enabled: false,
            min_angle: 0.0,
            min_angle_enabled: false,
            buffers: TriangleBuffers::new(num_points, num_segments, num_holes),
            output_mesh: None,
            triangulator,
            state: MesherState::Configuring,
        }
    }

    pub fn num_points(&self) -> usize {
        self.num_points
    }

    pub fn num_segments(&self) -> usize {
        self.num_segments
    }

    pub fn num_holes(&self) -> usize {
        self.num_holes
    }

    pub fn state(&self) -> MesherState {
        self.state
    }

    pub fn triangulator(&self) -> &T {
        &self.triangulator
    }

    /// Write point `index`. Returns false if `index >= num_points`.
    pub fn set_point(&mut self, index: usize, x: R, y: R) -> bool {
        let count = self.num_points;
        self.write_pair(BufferKind::Points, index, count, |buffers| buffers.input_points_mut(), (x, y))
    }

    /// Write segment `index` as the point index pair `(p1, p2)`.
    ///
    /// The point indices are checked by the triangulation routine, not here.
    pub fn set_segment(&mut self, index: usize, p1: usize, p2: usize) -> bool {
        let count = self.num_segments;
        self.write_pair(BufferKind::Segments, index, count, |buffers| buffers.input_segments_mut(), (p1, p2))
    }

    /// Write hole seed `index`. Returns false if `index >= num_holes`.
    pub fn set_hole(&mut self, index: usize, x: R, y: R) -> bool {
        let count = self.num_holes;
        self.write_pair(BufferKind::Holes, index, count, |buffers| buffers.input_holes_mut(), (x, y))
    }

    fn write_pair<V: Copy>(
        &mut self,
        kind: BufferKind,
        index: usize,
        count: usize,
        buffer: impl FnOnce(&mut TriangleBuffers<R>) -> Option<&mut Vec<V>>,
        (first, second): (V, V),
    ) -> bool {
        if index >= count {
            log::debug!("{}", MeshError::IndexOutOfRange { kind, index, count });
            return false;
        }
        match buffer(&mut self.buffers) {
            Some(list) if list.len() >= 2 * index + 2 => {
                list[2 * index] = first;
                list[2 * index + 1] = second;
                self.state = MesherState::Configuring;
                true
            }
            _ => false,
        }
    }

    pub fn point(&self, index: usize) -> Option<(R, R)> {
        self.buffers.input().point(index)
    }

    pub fn segment(&self, index: usize) -> Option<(usize, usize)> {
        self.buffers.input().segment(index)
    }

    pub fn hole(&self, index: usize) -> Option<(R, R)> {
        self.buffers.input().hole(index)
    }

    /// Assign the mesh that builds write into
    pub fn set_output_mesh(&mut self, mesh: &'a mut dyn MeshSink) {
        self.output_mesh = Some(mesh);
    }

    pub fn has_output_mesh(&self) -> bool {
        self.output_mesh.is_some()
    }

    pub fn set_max_area(&mut self, value: f64) {
        self.max_area = value;
    }

    pub fn max_area(&self) -> f64 {
        self.max_area
    }

    pub fn enable_max_area(&mut self, enabled: bool) {
        self.max_area_enabled = enabled;
    }

    pub fn is_max_area_enabled(&self) -> bool {
        self.max_area_enabled
    }

    pub fn set_min_angle(&mut self, value: f64) {
        self.min_angle = value;
    }

    pub fn min_angle(&self) -> f64 {
        self.min_angle
    }

    pub fn enable_min_angle(&mut self, enabled: bool) {
        self.min_angle_enabled = enabled;
    }

    pub fn is_min_angle_enabled(&self) -> bool {
        self.min_angle_enabled
    }

    /// Bounds of the input points; all zero when there are none
    pub fn bounds(&self) -> BoundingBox {
        let input = self.buffers.input();
        BoundingBox::from_points(
            (0..self.num_points)
                .filter_map(|index| input.point(index))
                .map(|(x, y)| (x.to_f64(), y.to_f64())),
        )
    }

    /// Area of [`bounds`](Self::bounds).
    ///
    /// This is the bounding-box area, not the area of the meshed polygon.
    /// Callers use it for relative element sizing.
    pub fn area(&self) -> f64 {
        self.bounds().area()
    }

    /// Switches the next build passes to the triangulation routine
    pub fn switches(&self) -> Result<Switches, MeshError> {
        let max_area = if self.max_area_enabled {
            if self.max_area.is_nan() || self.max_area < 0.0 {
                return Err(MeshError::NegativeMaxArea(self.max_area));
            }
            Some(self.max_area)
        } else {
            None
        };

        let min_angle = if self.min_angle_enabled {
            if !(0.0..=MIN_ANGLE_LIMIT).contains(&self.min_angle) {
                return Err(MeshError::MinAngleOutOfRange {
                    value: self.min_angle,
                    limit: MIN_ANGLE_LIMIT,
                });
            }
            Some(self.min_angle)
        } else {
            None
        };

        Ok(Switches::face_meshing(max_area, min_angle))
    }

    /// Ownership of the point, segment and hole buffers between the
    /// input and output records
    pub fn buffer_ownership(&self) -> BufferOwnership {
        self.buffers.ownership()
    }

    /// Output record of the last triangulation
    pub fn output(&self) -> &TriangulateIo<R> {
        self.buffers.output()
    }

    /// Triangulate and fill the output mesh; false on any failure
    pub fn build_face_mesh(&mut self, face_id: i64) -> bool {
        self.build_face_mesh_at(face_id, 0.0)
    }

    /// As [`build_face_mesh`](Self::build_face_mesh), placing the vertices at height `z`
    pub fn build_face_mesh_at(&mut self, face_id: i64, z: f64) -> bool {
        match self.try_build_face_mesh_at(face_id, z) {
            Ok(summary) => {
                log::debug!(
                    "face {}: {} points, {} triangles ({} Steiner points)",
                    face_id,
                    summary.points,
                    summary.triangles,
                    summary.steiner_points
                );
                true
            }
            Err(err) => {
                log::warn!("face {}: mesh not built: {}", face_id, err);
                false
            }
        }
    }

    pub fn try_build_face_mesh(&mut self, face_id: i64) -> Result<MeshSummary, MeshError> {
        self.try_build_face_mesh_at(face_id, 0.0)
    }

    /// Triangulate and fill the output mesh, reporting why a build failed.
    ///
    /// On failure the output mesh is left empty.
    pub fn try_build_face_mesh_at(&mut self, face_id: i64, z: f64) -> Result<MeshSummary, MeshError> {
        self.state = MesherState::Configuring;

        self.output_mesh
            .as_deref_mut()
            .ok_or(MeshError::MissingOutputMesh)?
            .reset();

        if self.num_points < 3 {
            return Err(MeshError::TooFewPoints(self.num_points));
        }
        if self.num_segments < 3 {
            return Err(MeshError::TooFewSegments(self.num_segments));
        }

        let switches = self.switches()?.to_string();
        log::debug!("face {}: triangulating with switches {}", face_id, switches);

        self.buffers.reset_output();
        let TriangleBuffers {
            input,
            output,
            voronoi,
        } = &mut self.buffers;
        self.triangulator
            .triangulate(&switches, input, output, voronoi.as_mut())?;

        let output = &self.buffers.output;
        if output.number_of_points == 0
            || output.number_of_triangles == 0
            || output.number_of_segments == 0
        {
            return Err(MeshError::EmptyOutput {
                points: output.number_of_points,
                triangles: output.number_of_triangles,
                segments: output.number_of_segments,
            });
        }

        let sink = self
            .output_mesh
            .as_deref_mut()
            .ok_or(MeshError::MissingOutputMesh)?;
        for index in 0..output.number_of_points {
            if let Some((x, y)) = output.point(index) {
                sink.insert_point(Point3::new(x.to_f64(), y.to_f64(), z));
            }
        }
        for index in 0..output.number_of_triangles {
            if let Some(corners) = output.triangle(index) {
                sink.insert_triangle(corners, face_id);
            }
        }

        self.state = MesherState::Built;
        Ok(MeshSummary {
            points: output.number_of_points,
            triangles: output.number_of_triangles,
            segments: output.number_of_segments,
            steiner_points: output.number_of_points.saturating_sub(self.num_points),
        })
    }
}
