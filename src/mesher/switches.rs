// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Triangulation switch string
//!
//! The switch string is a concatenation of single-letter switches, some of
//! which carry a fixed-notation number:
//!
//! ```text
//! p z Q [a<area>] [q<angle>] Y
//! ```
//!
//! [`Switches`] renders this string for the face mesher and parses it back on
//! the triangulation side.

use super::error::TriangulationFailure;
use std::fmt;

/// Minimum angle used when `q` is given without a number
pub const DEFAULT_QUALITY_ANGLE: f64 = 20.0;

/// Parsed triangulation switches
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Switches {
    /// `p`: triangulate a planar straight-line graph
    pub pslg: bool,
    /// `z`: point indices in segments start at zero
    pub zero_based: bool,
    /// `Q`: no diagnostic output
    pub quiet: bool,
    /// `a<area>`: maximum triangle area
    pub max_area: Option<f64>,
    /// `q<angle>`: minimum triangle angle in degrees
    pub min_angle: Option<f64>,
    /// `Y`: no Steiner points on boundary segments
    pub preserve_boundary: bool,
}

impl Default for Switches {
    fn default() -> Self {
        Self {
            pslg: false,
            zero_based: false,
            quiet: false,
            max_area: None,
            min_angle: None,
            preserve_boundary: false,
        }
    }
}

impl Switches {
    /// Switches used for face meshing: `pzQ`, optional constraints, `Y`
    pub fn face_meshing(max_area: Option<f64>, min_angle: Option<f64>) -> Self {
        Self {
            pslg: true,
            zero_based: true,
            quiet: true,
            max_area,
            min_angle,
            preserve_boundary: true,
        }
    }

    /// Whether refinement beyond the plain constrained triangulation is requested
    pub fn refines(&self) -> bool {
        self.max_area.is_some() || self.min_angle.is_some()
    }

    /// Parse a switch string
    pub fn parse(text: &str) -> Result<Self, TriangulationFailure> {
        let mut switches = Switches::default();
        let chars: Vec<char> = text.chars().collect();
        let mut position = 0;

        while position < chars.len() {
            let switch = chars[position];
            position += 1;
            match switch {
                'p' => switches.pslg = true,
                'z' => switches.zero_based = true,
                'Q' => switches.quiet = true,
                'Y' => switches.preserve_boundary = true,
                'a' | 'q' => {
                    let start = position;
                    while position < chars.len()
                        && (chars[position].is_ascii_digit() || chars[position] == '.')
                    {
                        position += 1;
                    }
                    let number: String = chars[start..position].iter().collect();
                    let value = if number.is_empty() {
                        None
                    } else {
                        Some(number.parse::<f64>().map_err(|_| {
                            TriangulationFailure::MalformedNumber {
                                switch,
                                text: number.clone(),
                            }
                        })?)
                    };

                    if switch == 'a' {
                        // A bare `a` means per-region constraints, which faces never carry
                        let area = value.ok_or_else(|| TriangulationFailure::MalformedNumber {
                            switch,
                            text: String::new(),
                        })?;
                        if area <= 0.0 {
                            return Err(TriangulationFailure::NonPositiveArea(area));
                        }
                        switches.max_area = Some(area);
                    } else {
                        switches.min_angle = Some(value.unwrap_or(DEFAULT_QUALITY_ANGLE));
                    }
                }
                _ => {
                    return Err(TriangulationFailure::UnknownSwitch {
                        switch,
                        position: position - 1,
                    })
                }
            }
        }

        Ok(switches)
    }
}

impl fmt::Display for Switches {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.pslg {
            write!(f, "p")?;
        }
        if self.zero_based {
            write!(f, "z")?;
        }
        if self.quiet {
            write!(f, "Q")?;
        }
        if let Some(area) = self.max_area {
            write!(f, "a{:.6}", area)?;
        }
        if let Some(angle) = self.min_angle {
            write!(f, "q{:.6}", angle)?;
        }
        if self.preserve_boundary {
            write!(f, "Y")?;
        }
        Ok(())
    }
}
