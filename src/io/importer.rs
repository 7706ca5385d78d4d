// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! PSLG importer

use super::read_poly;
use crate::geometry::Pslg;
use anyhow::{Context, Result};
use std::fs;
use std::path::Path;

/// Load a face description from a `.poly` or `.json` file
pub fn load_pslg(path: &str) -> Result<Pslg> {
    let extension = Path::new(path)
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_lowercase);
    match extension.as_deref() {
        Some("json") => {
            let source = fs::read_to_string(path)
                .context(format!("Failed to read PSLG file: {}", path))?;
            serde_json::from_str(&source).context(format!("Failed to parse PSLG file: {}", path))
        }
        _ => read_poly(path),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::Builder;

    #[test]
    fn test_load_json_pslg() -> Result<()> {
        let mut file = Builder::new().suffix(".json").tempfile()?;
        writeln!(
            file,
            r#"{{"points": [[0,0],[1,0],[0,1]], "segments": [[0,1],[1,2],[2,0]]}}"#
        )?;

        let pslg = load_pslg(file.path().to_str().unwrap())?;
        assert_eq!(pslg.points.len(), 3);
        assert!(pslg.holes.is_empty());
        Ok(())
    }

    #[test]
    fn test_load_poly_pslg() -> Result<()> {
        let mut file = Builder::new().suffix(".poly").tempfile()?;
        writeln!(file, "3 2 0 0\n1 0 0\n2 1 0\n3 0 1\n3 0\n1 1 2\n2 2 3\n3 3 1\n0")?;

        let pslg = load_pslg(file.path().to_str().unwrap())?;
        assert_eq!(pslg.segments[2], [2, 0]);
        Ok(())
    }

    #[test]
    fn test_missing_file_is_an_error() {
        assert!(load_pslg("/nonexistent/face.poly").is_err());
    }
}
