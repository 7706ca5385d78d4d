// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! I/O module - reading face descriptions and exporting meshes

mod export;
mod importer;
mod poly;

pub use export::{
    export, export_json, export_obj, export_stl, export_vtk, format_obj, format_stl, format_vtk,
    ExportFormat,
};
pub use importer::load_pslg;
pub use poly::{format_poly, parse_poly, read_poly, write_poly};
