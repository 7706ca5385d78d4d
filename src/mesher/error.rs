// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Error types for the face mesher and the triangulation routine

use thiserror::Error;

/// Buffer addressed by an index setter
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BufferKind {
    Points,
    Segments,
    Holes,
}

impl std::fmt::Display for BufferKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BufferKind::Points => write!(f, "point"),
            BufferKind::Segments => write!(f, "segment"),
            BufferKind::Holes => write!(f, "hole"),
        }
    }
}

/// Reasons the triangulation routine rejects its input
#[derive(Debug, Clone, PartialEq, Error)]
pub enum TriangulationFailure {
    #[error("unrecognized switch '{switch}' at position {position}")]
    UnknownSwitch { switch: char, position: usize },

    #[error("switch '{switch}' has a malformed number: {text:?}")]
    MalformedNumber { switch: char, text: String },

    #[error("input record holds {found} points, at least {required} are needed")]
    TooFewPoints { found: usize, required: usize },

    #[error("input record is missing its {0} buffer")]
    MissingBuffer(BufferKind),

    #[error("point {index} has a non-finite coordinate")]
    NonFiniteCoordinate { index: usize },

    #[error("point {index} could not be inserted")]
    Insertion { index: usize },

    #[error("segment {segment} references point {point}, only {count} points exist")]
    SegmentIndexOutOfRange { segment: usize, point: usize, count: usize },

    #[error("segment {segment} intersects a previously inserted segment")]
    IntersectingSegments { segment: usize },

    #[error("maximum area must be positive, got {0}")]
    NonPositiveArea(f64),

    #[error("{oversized} triangles still exceed the area bound after {added} Steiner points")]
    RefinementIncomplete { oversized: usize, added: usize },
}

impl TriangulationFailure {
    /// Nonzero status code, in the numbering used by the log output
    pub fn code(&self) -> i32 {
        match self {
            TriangulationFailure::UnknownSwitch { .. } => 1,
            TriangulationFailure::MalformedNumber { .. } => 2,
            TriangulationFailure::TooFewPoints { .. } => 3,
            TriangulationFailure::MissingBuffer(_) => 4,
            TriangulationFailure::NonFiniteCoordinate { .. } => 5,
            TriangulationFailure::Insertion { .. } => 6,
            TriangulationFailure::SegmentIndexOutOfRange { .. } => 7,
            TriangulationFailure::IntersectingSegments { .. } => 8,
            TriangulationFailure::NonPositiveArea(_) => 9,
            TriangulationFailure::RefinementIncomplete { .. } => 10,
        }
    }
}

/// Reasons a face mesh could not be built
#[derive(Debug, Clone, PartialEq, Error)]
pub enum MeshError {
    #[error("{kind} index {index} is out of range (count {count})")]
    IndexOutOfRange {
        kind: BufferKind,
        index: usize,
        count: usize,
    },

    #[error("no output mesh has been assigned")]
    MissingOutputMesh,

    #[error("at least 3 points are required, got {0}")]
    TooFewPoints(usize),

    #[error("at least 3 segments are required, got {0}")]
    TooFewSegments(usize),

    #[error("maximum area must not be negative, got {0}")]
    NegativeMaxArea(f64),

    #[error("minimum angle must lie in [0, {limit}] degrees, got {value}")]
    MinAngleOutOfRange { value: f64, limit: f64 },

    #[error("triangulation failed (status {code}): {0}", code = .0.code())]
    Triangulation(#[from] TriangulationFailure),

    #[error("triangulation produced an empty mesh ({points} points, {triangles} triangles, {segments} segments)")]
    EmptyOutput {
        points: usize,
        triangles: usize,
        segments: usize,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_failure_codes_are_nonzero() {
        let failures = [
            TriangulationFailure::UnknownSwitch { switch: 'x', position: 0 },
            TriangulationFailure::TooFewPoints { found: 1, required: 3 },
            TriangulationFailure::IntersectingSegments { segment: 2 },
            TriangulationFailure::NonPositiveArea(0.0),
            TriangulationFailure::RefinementIncomplete { oversized: 3, added: 0 },
        ];
        for failure in &failures {
            assert_ne!(failure.code(), 0);
        }
    }

    #[test]
    fn test_triangulation_error_message_carries_code() {
        let error = MeshError::from(TriangulationFailure::IntersectingSegments { segment: 4 });
        let message = error.to_string();
        assert!(message.contains("status 8"));
        assert!(message.contains("segment 4"));
    }
}
