// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Face mesher - constrained Delaunay triangulation of planar faces

mod error;
mod face_mesher;
mod real;
mod switches;
mod tio;
mod triangulator;

pub use error::{BufferKind, MeshError, TriangulationFailure};
pub use face_mesher::{FaceMesher, MeshSummary, MesherState, MIN_ANGLE_LIMIT};
pub use real::Real;
pub use switches::{Switches, DEFAULT_QUALITY_ANGLE};
pub use tio::{Buffer, BufferOwner, BufferOwnership, TriangleBuffers, TriangulateIo};
pub use triangulator::{SpadeTriangulator, Triangulator};
