// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Geometry module - mesh representation, face descriptions and analytics

mod analytics;
mod bbox;
mod mesh;
mod pslg;

pub use analytics::{analyze, locate_triangle, MeshStats};
pub use bbox::BoundingBox;
pub use mesh::{Mesh, MeshSink, Triangle, Vertex};
pub use pslg::Pslg;
