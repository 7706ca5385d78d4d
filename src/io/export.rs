// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Mesh exporters: ASCII STL, Wavefront OBJ, legacy VTK and JSON

use crate::geometry::Mesh;
use crate::utils::math::orient_2d;
use anyhow::{bail, Context, Result};
use nalgebra::Point2;
use std::fmt::Write as _;
use std::fs;
use std::str::FromStr;

/// Supported output formats
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    Stl,
    Obj,
    Vtk,
    Json,
}

impl ExportFormat {
    /// Format implied by a file extension
    pub fn from_path(path: &str) -> Option<Self> {
        let extension = std::path::Path::new(path).extension()?.to_str()?;
        extension.parse().ok()
    }
}

impl FromStr for ExportFormat {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "stl" => Ok(ExportFormat::Stl),
            "obj" => Ok(ExportFormat::Obj),
            "vtk" => Ok(ExportFormat::Vtk),
            "json" => Ok(ExportFormat::Json),
            _ => bail!("Unsupported format: {} (supported: stl, obj, vtk, json)", s),
        }
    }
}

/// Export a mesh in the given format
pub fn export(mesh: &Mesh, path: &str, format: ExportFormat) -> Result<()> {
    let content = match format {
        ExportFormat::Stl => format_stl(mesh, "facemesh"),
        ExportFormat::Obj => format_obj(mesh),
        ExportFormat::Vtk => format_vtk(mesh),
        ExportFormat::Json => serde_json::to_string_pretty(mesh)?,
    };
    fs::write(path, content).context(format!("Failed to write mesh file: {}", path))
}

pub fn export_stl(mesh: &Mesh, path: &str) -> Result<()> {
    export(mesh, path, ExportFormat::Stl)
}

pub fn export_obj(mesh: &Mesh, path: &str) -> Result<()> {
    export(mesh, path, ExportFormat::Obj)
}

pub fn export_vtk(mesh: &Mesh, path: &str) -> Result<()> {
    export(mesh, path, ExportFormat::Vtk)
}

pub fn export_json(mesh: &Mesh, path: &str) -> Result<()> {
    export(mesh, path, ExportFormat::Json)
}

/// ASCII STL; facet normals are +Z or -Z depending on winding
pub fn format_stl(mesh: &Mesh, name: &str) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "solid {}", name);
    for index in 0..mesh.triangles.len() {
        let Some(corners) = mesh.triangle_positions(index) else {
            continue;
        };
        let [a, b, c] = corners.map(|p| Point2::new(p.x, p.y));
        let nz = if orient_2d(&a, &b, &c) >= 0.0 { 1.0 } else { -1.0 };
        let _ = writeln!(out, "  facet normal 0 0 {}", nz);
        let _ = writeln!(out, "    outer loop");
        for corner in &corners {
            let _ = writeln!(out, "      vertex {} {} {}", corner.x, corner.y, corner.z);
        }
        let _ = writeln!(out, "    endloop");
        let _ = writeln!(out, "  endfacet");
    }
    let _ = writeln!(out, "endsolid {}", name);
    out
}

/// Wavefront OBJ with 1-based face indices
pub fn format_obj(mesh: &Mesh) -> String {
    let mut out = String::new();
    for vertex in &mesh.vertices {
        let p = vertex.position;
        let _ = writeln!(out, "v {} {} {}", p.x, p.y, p.z);
    }
    for triangle in &mesh.triangles {
        let [a, b, c] = triangle.indices;
        let _ = writeln!(out, "f {} {} {}", a + 1, b + 1, c + 1);
    }
    out
}

/// Legacy VTK polydata with a `FaceId` cell array
pub fn format_vtk(mesh: &Mesh) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "# vtk DataFile Version 3.0");
    let _ = writeln!(out, "facemesh");
    let _ = writeln!(out, "ASCII");
    let _ = writeln!(out, "DATASET POLYDATA");
    let _ = writeln!(out, "POINTS {} double", mesh.vertices.len());
    for vertex in &mesh.vertices {
        let p = vertex.position;
        let _ = writeln!(out, "{} {} {}", p.x, p.y, p.z);
    }
    let _ = writeln!(
        out,
        "POLYGONS {} {}",
        mesh.triangles.len(),
        4 * mesh.triangles.len()
    );
    for triangle in &mesh.triangles {
        let [a, b, c] = triangle.indices;
        let _ = writeln!(out, "3 {} {} {}", a, b, c);
    }
    if !mesh.triangles.is_empty() {
        let _ = writeln!(out, "CELL_DATA {}", mesh.triangles.len());
        let _ = writeln!(out, "SCALARS FaceId long 1");
        let _ = writeln!(out, "LOOKUP_TABLE default");
        for triangle in &mesh.triangles {
            let _ = writeln!(out, "{}", triangle.face_id);
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::MeshSink;
    use nalgebra::Point3;

    fn triangle_mesh() -> Mesh {
        let mut mesh = Mesh::new();
        mesh.insert_point(Point3::new(0.0, 0.0, 0.0));
        mesh.insert_point(Point3::new(1.0, 0.0, 0.0));
        mesh.insert_point(Point3::new(0.0, 1.0, 0.0));
        mesh.insert_triangle([0, 1, 2], 42);
        mesh
    }

    #[test]
    fn test_format_from_extension() {
        assert_eq!(ExportFormat::from_path("out/face.OBJ"), Some(ExportFormat::Obj));
        assert_eq!(ExportFormat::from_path("face.vtk"), Some(ExportFormat::Vtk));
        assert_eq!(ExportFormat::from_path("face.glb"), None);
        assert!("ply".parse::<ExportFormat>().is_err());
    }

    #[test]
    fn test_stl_has_one_facet_per_triangle() {
        let stl = format_stl(&triangle_mesh(), "t");
        assert!(stl.starts_with("solid t"));
        assert_eq!(stl.matches("facet normal 0 0 1").count(), 1);
        assert_eq!(stl.matches("vertex ").count(), 3);
    }

    #[test]
    fn test_obj_uses_one_based_faces() {
        let obj = format_obj(&triangle_mesh());
        assert!(obj.contains("f 1 2 3"));
        assert_eq!(obj.lines().filter(|l| l.starts_with("v ")).count(), 3);
    }

    #[test]
    fn test_vtk_carries_face_ids() {
        let vtk = format_vtk(&triangle_mesh());
        assert!(vtk.contains("POLYGONS 1 4"));
        assert!(vtk.contains("SCALARS FaceId long 1"));
        assert!(vtk.trim_end().ends_with("42"));
    }
}
