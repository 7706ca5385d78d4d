// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Buffer records exchanged with the triangulation routine
//!
//! A [`TriangulateIo`] mirrors the flat-array layout the routine works on.
//! The routine is allowed to reuse an input buffer in its output record
//! instead of allocating a copy, so the same allocation can be reachable from
//! both records. [`TriangleBuffers`] owns the `in`/`out`/`vout` triple and
//! classifies every buffer field by pointer identity before releasing it.

use super::real::Real;
use std::sync::Arc;

/// Shared flat array
pub type Buffer<T> = Arc<Vec<T>>;

/// Flat-array PSLG record
#[derive(Debug, Clone, Default)]
pub struct TriangulateIo<R> {
    /// `x0, y0, x1, y1, ...`
    pub point_list: Option<Buffer<R>>,
    pub number_of_points: usize,
    /// Point index pairs
    pub segment_list: Option<Buffer<usize>>,
    pub number_of_segments: usize,
    /// Hole seeds, `x0, y0, x1, y1, ...`
    pub hole_list: Option<Buffer<R>>,
    pub number_of_holes: usize,
    /// Three point indices per triangle, counterclockwise
    pub triangle_list: Option<Buffer<usize>>,
    pub number_of_triangles: usize,
}

impl<R: Real> TriangulateIo<R> {
    /// Zero-initialized input record with fixed sizes.
    ///
    /// The hole buffer is only allocated when `num_holes > 0`.
    pub fn with_capacity(num_points: usize, num_segments: usize, num_holes: usize) -> Self {
        Self {
            point_list: Some(Arc::new(vec![R::default(); 2 * num_points])),
            number_of_points: num_points,
            segment_list: Some(Arc::new(vec![0; 2 * num_segments])),
            number_of_segments: num_segments,
            hole_list: (num_holes > 0).then(|| Arc::new(vec![R::default(); 2 * num_holes])),
            number_of_holes: num_holes,
            triangle_list: None,
            number_of_triangles: 0,
        }
    }

    /// Point `index` as `(x, y)`
    pub fn point(&self, index: usize) -> Option<(R, R)> {
        pair(self.point_list.as_deref(), index, self.number_of_points)
    }

    /// Segment `index` as a pair of point indices
    pub fn segment(&self, index: usize) -> Option<(usize, usize)> {
        pair(self.segment_list.as_deref(), index, self.number_of_segments)
    }

    /// Hole seed `index` as `(x, y)`
    pub fn hole(&self, index: usize) -> Option<(R, R)> {
        pair(self.hole_list.as_deref(), index, self.number_of_holes)
    }

    /// Triangle `index` as three point indices
    pub fn triangle(&self, index: usize) -> Option<[usize; 3]> {
        if index >= self.number_of_triangles {
            return None;
        }
        let list = self.triangle_list.as_deref()?;
        let corners = list.get(3 * index..3 * index + 3)?;
        Some([corners[0], corners[1], corners[2]])
    }

    /// Drop every buffer and reset all counts
    pub fn clear(&mut self) {
        *self = Self {
            point_list: None,
            number_of_points: 0,
            segment_list: None,
            number_of_segments: 0,
            hole_list: None,
            number_of_holes: 0,
            triangle_list: None,
            number_of_triangles: 0,
        };
    }
}

fn pair<T: Copy>(list: Option<&Vec<T>>, index: usize, count: usize) -> Option<(T, T)> {
    if index >= count {
        return None;
    }
    let list = list?;
    Some((*list.get(2 * index)?, *list.get(2 * index + 1)?))
}

/// Who a buffer field belongs to at release time
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BufferOwner {
    /// Neither record holds the field
    Absent,
    /// Only the input record holds it
    Input,
    /// Only the output record holds it
    Output,
    /// Both records hold separate allocations
    Separate,
    /// The output record reuses the input allocation
    SharedInputOutput,
}

impl BufferOwner {
    fn classify<T>(input: Option<&Buffer<T>>, output: Option<&Buffer<T>>) -> Self {
        match (input, output) {
            (None, None) => BufferOwner::Absent,
            (Some(_), None) => BufferOwner::Input,
            (None, Some(_)) => BufferOwner::Output,
            (Some(a), Some(b)) if Arc::ptr_eq(a, b) => BufferOwner::SharedInputOutput,
            (Some(_), Some(_)) => BufferOwner::Separate,
        }
    }

    /// Whether the output record must let go of this field before release
    pub fn is_shared(&self) -> bool {
        matches!(self, BufferOwner::SharedInputOutput)
    }
}

/// Per-field ownership of the point, segment and hole buffers
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BufferOwnership {
    pub points: BufferOwner,
    pub segments: BufferOwner,
    pub holes: BufferOwner,
}

impl BufferOwnership {
    /// Classify the fields of an input/output record pair
    pub fn of<R>(input: &TriangulateIo<R>, output: &TriangulateIo<R>) -> Self {
        Self {
            points: BufferOwner::classify(input.point_list.as_ref(), output.point_list.as_ref()),
            segments: BufferOwner::classify(
                input.segment_list.as_ref(),
                output.segment_list.as_ref(),
            ),
            holes: BufferOwner::classify(input.hole_list.as_ref(), output.hole_list.as_ref()),
        }
    }

    /// Number of fields shared between the two records
    pub fn shared_count(&self) -> usize {
        [self.points, self.segments, self.holes]
            .iter()
            .filter(|owner| owner.is_shared())
            .count()
    }
}

/// The `in`/`out`/`vout` record triple owned by a face mesher
#[derive(Debug)]
pub struct TriangleBuffers<R: Real> {
    pub(crate) input: TriangulateIo<R>,
    pub(crate) output: TriangulateIo<R>,
    pub(crate) voronoi: Option<TriangulateIo<R>>,
}

impl<R: Real> TriangleBuffers<R> {
    pub fn new(num_points: usize, num_segments: usize, num_holes: usize) -> Self {
        Self {
            input: TriangulateIo::with_capacity(num_points, num_segments, num_holes),
            output: TriangulateIo::default(),
            voronoi: None,
        }
    }

    pub fn input(&self) -> &TriangulateIo<R> {
        &self.input
    }

    pub fn output(&self) -> &TriangulateIo<R> {
        &self.output
    }

    /// Current ownership of the point, segment and hole fields
    pub fn ownership(&self) -> BufferOwnership {
        BufferOwnership::of(&self.input, &self.output)
    }

    /// Mutable access to an input buffer.
    ///
    /// An output record still sharing the allocation keeps its own snapshot.
    pub(crate) fn input_points_mut(&mut self) -> Option<&mut Vec<R>> {
        self.input.point_list.as_mut().map(Arc::make_mut)
    }

    pub(crate) fn input_segments_mut(&mut self) -> Option<&mut Vec<usize>> {
        self.input.segment_list.as_mut().map(Arc::make_mut)
    }

    pub(crate) fn input_holes_mut(&mut self) -> Option<&mut Vec<R>> {
        self.input.hole_list.as_mut().map(Arc::make_mut)
    }

    /// Release the output record so it can be filled again.
    ///
    /// Shared fields are detached from the output before anything is freed,
    /// leaving the input record intact.
    pub fn reset_output(&mut self) -> BufferOwnership {
        let ownership = self.detach_shared();
        self.output.clear();
        self.voronoi = None;
        ownership
    }

    /// Release all three records
    pub fn release(&mut self) -> BufferOwnership {
        let ownership = self.detach_shared();
        self.input.clear();
        self.output.clear();
        self.voronoi = None;
        ownership
    }

    fn detach_shared(&mut self) -> BufferOwnership {
        let ownership = self.ownership();
        if ownership.points.is_shared() {
            self.output.point_list = None;
        }
        if ownership.segments.is_shared() {
            self.output.segment_list = None;
        }
        if ownership.holes.is_shared() {
            self.output.hole_list = None;
        }
        ownership
    }
}

impl<R: Real> Drop for TriangleBuffers<R> {
    fn drop(&mut self) {
        let ownership = self.release();
        log::trace!("released triangulation buffers: {:?}", ownership);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_input_record_is_zero_initialized() {
        let io = TriangulateIo::<f64>::with_capacity(4, 3, 0);
        assert_eq!(io.point_list.as_deref().map(Vec::len), Some(8));
        assert!(io.point_list.as_deref().unwrap().iter().all(|v| *v == 0.0));
        assert_eq!(io.segment(2), Some((0, 0)));
        assert!(io.hole_list.is_none());
        assert_eq!(io.segment(3), None);
    }

    #[test]
    fn test_ownership_classification() {
        let mut buffers = TriangleBuffers::<f64>::new(3, 3, 1);
        assert_eq!(buffers.ownership().points, BufferOwner::Input);

        buffers.output.point_list = Some(Arc::new(vec![0.0; 6]));
        buffers.output.segment_list = buffers.input.segment_list.clone();
        buffers.output.hole_list = buffers.input.hole_list.clone();

        let ownership = buffers.ownership();
        assert_eq!(ownership.points, BufferOwner::Separate);
        assert_eq!(ownership.segments, BufferOwner::SharedInputOutput);
        assert_eq!(ownership.holes, BufferOwner::SharedInputOutput);
        assert_eq!(ownership.shared_count(), 2);
    }

    #[test]
    fn test_release_detaches_shared_fields_first() {
        let mut buffers = TriangleBuffers::<f64>::new(3, 3, 0);
        buffers.output.segment_list = buffers.input.segment_list.clone();
        let segments = buffers.input.segment_list.clone().unwrap();
        assert_eq!(Arc::strong_count(&segments), 3);

        let ownership = buffers.reset_output();
        assert_eq!(ownership.segments, BufferOwner::SharedInputOutput);
        assert!(buffers.output.segment_list.is_none());
        assert_eq!(Arc::strong_count(&segments), 2);

        buffers.release();
        assert_eq!(Arc::strong_count(&segments), 1);
        assert_eq!(buffers.ownership().segments, BufferOwner::Absent);
    }

    #[test]
    fn test_write_after_sharing_keeps_output_snapshot() {
        let mut buffers = TriangleBuffers::<f64>::new(3, 3, 0);
        buffers.output.point_list = buffers.input.point_list.clone();
        buffers.output.number_of_points = 3;

        buffers.input_points_mut().unwrap()[0] = 7.0;

        assert_eq!(buffers.input.point(0), Some((7.0, 0.0)));
        assert_eq!(buffers.output.point(0), Some((0.0, 0.0)));
        assert_eq!(buffers.ownership().points, BufferOwner::Separate);
    }
}
