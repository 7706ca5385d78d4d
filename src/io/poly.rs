// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Triangle `.poly` reader and writer
//!
//! ```text
//! # vertices: count, dimension (2), attribute count, marker flag
//! 4 2 0 0
//! 1 0.0 0.0
//! ...
//! # segments: count, marker flag
//! 4 0
//! 1 1 2
//! ...
//! # holes
//! 0
//! ```
//!
//! Numbering starts at whatever the first vertex uses (0 or 1).

use crate::geometry::Pslg;
use anyhow::{anyhow, bail, Context, Result};
use std::fmt::Write as _;
use std::fs;

/// Parse `.poly` text
pub fn parse_poly(source: &str) -> Result<Pslg> {
    let mut lines = source
        .lines()
        .enumerate()
        .map(|(number, line)| (number + 1, line.split('#').next().unwrap_or("").trim()))
        .filter(|(_, line)| !line.is_empty());

    let (line, header) = next_line(&mut lines, "vertex header")?;
    let vertex_count = field::<usize>(&header, 0, line)?;
    let dimension = header.get(1).map(|_| field::<usize>(&header, 1, line)).transpose()?.unwrap_or(2);
    if dimension != 2 {
        bail!("line {}: only two-dimensional vertices are supported, got {}", line, dimension);
    }
    if vertex_count == 0 {
        bail!("line {}: vertices listed in a separate .node file are not supported", line);
    }

    let mut pslg = Pslg::new();
    let mut base = 0;
    for index in 0..vertex_count {
        let (line, fields) = next_line(&mut lines, "vertices")?;
        let number = field::<usize>(&fields, 0, line)?;
        if index == 0 {
            base = number;
            if base > 1 {
                bail!("line {}: vertex numbering must start at 0 or 1, got {}", line, base);
            }
        }
        pslg.points.push([field(&fields, 1, line)?, field(&fields, 2, line)?]);
    }

    let (line, header) = next_line(&mut lines, "segment header")?;
    let segment_count = field::<usize>(&header, 0, line)?;
    for _ in 0..segment_count {
        let (line, fields) = next_line(&mut lines, "segments")?;
        let endpoints = [field::<usize>(&fields, 1, line)?, field::<usize>(&fields, 2, line)?];
        let mut segment = [0; 2];
        for (slot, endpoint) in segment.iter_mut().zip(endpoints) {
            *slot = endpoint
                .checked_sub(base)
                .filter(|index| *index < vertex_count)
                .ok_or_else(|| anyhow!("line {}: segment endpoint {} does not name a vertex", line, endpoint))?;
        }
        pslg.segments.push(segment);
    }

    // The hole section may be left out entirely
    if let Ok((line, header)) = next_line(&mut lines, "hole header") {
        let hole_count = field::<usize>(&header, 0, line)?;
        for _ in 0..hole_count {
            let (line, fields) = next_line(&mut lines, "holes")?;
            pslg.holes.push([field(&fields, 1, line)?, field(&fields, 2, line)?]);
        }
    }

    Ok(pslg)
}

fn next_line<'s>(
    lines: &mut impl Iterator<Item = (usize, &'s str)>,
    section: &str,
) -> Result<(usize, Vec<&'s str>)> {
    lines
        .next()
        .map(|(number, line)| (number, line.split_whitespace().collect()))
        .ok_or_else(|| anyhow!("unexpected end of input while reading {}", section))
}

fn field<T: std::str::FromStr>(fields: &[&str], index: usize, line: usize) -> Result<T> {
    let text = fields
        .get(index)
        .ok_or_else(|| anyhow!("line {}: expected at least {} fields", line, index + 1))?;
    text.parse::<T>()
        .map_err(|_| anyhow!("line {}: cannot parse {:?}", line, text))
}

/// Read a `.poly` file
pub fn read_poly(path: &str) -> Result<Pslg> {
    let source = fs::read_to_string(path)
        .context(format!("Failed to read poly file: {}", path))?;
    parse_poly(&source).context(format!("Failed to parse poly file: {}", path))
}

/// Render a graph as `.poly` text with 0-based numbering
pub fn format_poly(pslg: &Pslg) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{} 2 0 0", pslg.points.len());
    for (index, [x, y]) in pslg.points.iter().enumerate() {
        let _ = writeln!(out, "{} {:?} {:?}", index, x, y);
    }
    let _ = writeln!(out, "{} 0", pslg.segments.len());
    for (index, [a, b]) in pslg.segments.iter().enumerate() {
        let _ = writeln!(out, "{} {} {}", index, a, b);
    }
    let _ = writeln!(out, "{}", pslg.holes.len());
    for (index, [x, y]) in pslg.holes.iter().enumerate() {
        let _ = writeln!(out, "{} {:?} {:?}", index, x, y);
    }
    out
}

/// Write a `.poly` file
pub fn write_poly(pslg: &Pslg, path: &str) -> Result<()> {
    fs::write(path, format_poly(pslg)).context(format!("Failed to write poly file: {}", path))
}

#[cfg(test)]
mod tests {
    use super::*;

    const SQUARE_WITH_HOLE: &str = "\
# outer square and inner triangle, 1-based
7 2 0 1
1 0 0 1
2 4 0 1
3 4 4 1
4 0 4 1
5 1 1
6 2 1
7 1.5 2
7 1
1 1 2 1
2 2 3 1
3 3 4 1
4 4 1 1
5 5 6
6 6 7
7 7 5
1
1 1.5 1.5   # inside the triangle
";

    #[test]
    fn test_parse_one_based_file() {
        let pslg = parse_poly(SQUARE_WITH_HOLE).unwrap();
        assert_eq!(pslg.points.len(), 7);
        assert_eq!(pslg.points[6], [1.5, 2.0]);
        assert_eq!(pslg.segments[0], [0, 1]);
        assert_eq!(pslg.segments[6], [6, 4]);
        assert_eq!(pslg.holes, vec![[1.5, 1.5]]);
    }

    #[test]
    fn test_format_then_parse_is_lossless() {
        let pslg = parse_poly(SQUARE_WITH_HOLE).unwrap();
        assert_eq!(parse_poly(&format_poly(&pslg)).unwrap(), pslg);
    }

    #[test]
    fn test_missing_hole_section_is_allowed() {
        let pslg = parse_poly("3 2 0 0\n0 0 0\n1 1 0\n2 0 1\n3 0\n0 0 1\n1 1 2\n2 2 0\n").unwrap();
        assert!(pslg.holes.is_empty());
        assert_eq!(pslg.segments.len(), 3);
    }

    #[test]
    fn test_bad_segment_endpoint_is_reported() {
        let err = parse_poly("3 2 0 0\n0 0 0\n1 1 0\n2 0 1\n1 0\n0 0 3\n").unwrap_err();
        assert!(err.to_string().contains("endpoint 3"));
    }

    #[test]
    fn test_node_file_reference_is_rejected() {
        assert!(parse_poly("0 2 0 0\n").is_err());
    }
}
