// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Polyframe Face Mesher
//!
//! Constrained Delaunay triangulation of planar model faces. A face is
//! described by boundary points, segments and hole seeds; the mesher
//! triangulates it with optional area and angle bounds and writes the
//! result into a triangle mesh.

pub mod config;
pub mod fuzz;
pub mod geometry;
pub mod io;
pub mod mesher;
pub mod utils;

pub use config::MesherConfig;
pub use geometry::{Mesh, MeshSink, Pslg};
pub use io::{export, load_pslg, ExportFormat};
pub use mesher::{FaceMesher, MeshError, MeshSummary, TriangulationFailure};

use anyhow::{Context, Result};

/// Mesh one face with the given options
pub fn mesh_pslg(pslg: &Pslg, config: &MesherConfig) -> Result<Mesh> {
    let mut mesh = Mesh::new();
    {
        let mut mesher = FaceMesher::new(pslg.points.len(), pslg.segments.len(), pslg.holes.len());
        pslg.fill(&mut mesher)?;
        config.apply(&mut mesher);
        mesher.set_output_mesh(&mut mesh);
        mesher
            .try_build_face_mesh_at(config.face_id, config.elevation)
            .context(format!("Failed to mesh face {}", config.face_id))?;
    }
    Ok(mesh)
}

/// Load a face description and mesh it
pub fn mesh_file(path: &str, config: &MesherConfig) -> Result<Mesh> {
    let pslg = load_pslg(path)?;
    mesh_pslg(&pslg, config)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_basic_square() {
        let pslg = Pslg::polygon(&[[0.0, 0.0], [1.0, 0.0], [1.0, 1.0], [0.0, 1.0]]);
        let mesh = mesh_pslg(&pslg, &MesherConfig::default()).unwrap();
        assert_eq!(mesh.vertex_count(), 4);
        assert_eq!(mesh.triangle_count(), 2);
    }

    #[test]
    fn test_invalid_angle_is_reported() {
        let pslg = Pslg::polygon(&[[0.0, 0.0], [1.0, 0.0], [1.0, 1.0], [0.0, 1.0]]);
        let config = MesherConfig {
            min_angle: Some(40.0),
            ..MesherConfig::default()
        };
        let err = mesh_pslg(&pslg, &config).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<MeshError>(),
            Some(MeshError::MinAngleOutOfRange { .. })
        ));
    }
}
