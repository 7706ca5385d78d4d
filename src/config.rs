// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Meshing configuration

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::mesher::{FaceMesher, Real, Triangulator};

/// Default configuration file looked up by [`MesherConfig::load`]
pub const CONFIG_FILE: &str = "facemesh.toml";

/// Options applied to every face meshed by the CLI and [`crate::mesh_pslg`]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MesherConfig {
    /// Upper bound on triangle area; `None` leaves area unconstrained
    pub max_area: Option<f64>,
    /// Lower bound on triangle angles in degrees; `None` disables quality refinement
    pub min_angle: Option<f64>,
    /// Z coordinate of emitted vertices
    pub elevation: f64,
    /// Tag written on every emitted triangle
    pub face_id: i64,
}

impl Default for MesherConfig {
    fn default() -> Self {
        Self {
            max_area: None,
            min_angle: None,
            elevation: 0.0,
            face_id: 0,
        }
    }
}

impl MesherConfig {
    /// Load configuration from file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref())
            .with_context(|| format!("Failed to read config file: {:?}", path.as_ref()))?;
        let config: MesherConfig = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {:?}", path.as_ref()))?;
        Ok(config)
    }

    /// Load configuration with environment variable overrides
    pub fn load() -> Result<Self> {
        let mut config = if PathBuf::from(CONFIG_FILE).exists() {
            Self::from_file(CONFIG_FILE)?
        } else {
            Self::default()
        };
        config.apply_env(|key| std::env::var(key).ok());
        Ok(config)
    }

    /// Override options from `FACEMESH_*` variables.
    ///
    /// An empty `FACEMESH_MAX_AREA` or `FACEMESH_MIN_ANGLE` turns the bound
    /// off. Values that do not parse are ignored with a warning.
    fn apply_env(&mut self, var: impl Fn(&str) -> Option<String>) {
        if let Some(area) = var("FACEMESH_MAX_AREA") {
            if area.trim().is_empty() {
                self.max_area = None;
            } else if let Some(area) = parse_env("FACEMESH_MAX_AREA", &area) {
                self.max_area = Some(area);
            }
        }
        if let Some(angle) = var("FACEMESH_MIN_ANGLE") {
            if angle.trim().is_empty() {
                self.min_angle = None;
            } else if let Some(angle) = parse_env("FACEMESH_MIN_ANGLE", &angle) {
                self.min_angle = Some(angle);
            }
        }
        if let Some(elevation) = var("FACEMESH_ELEVATION") {
            if let Some(elevation) = parse_env("FACEMESH_ELEVATION", &elevation) {
                self.elevation = elevation;
            }
        }
    }

    /// Save configuration to file
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let content = toml::to_string_pretty(self)
            .context("Failed to serialize config")?;
        std::fs::write(path.as_ref(), content)
            .with_context(|| format!("Failed to write config file: {:?}", path.as_ref()))?;
        Ok(())
    }

    /// Copy the refinement options onto a mesher
    pub fn apply<R: Real, T: Triangulator>(&self, mesher: &mut FaceMesher<'_, R, T>) {
        match self.max_area {
            Some(area) => {
                mesher.set_max_area(area);
                mesher.enable_max_area(true);
            }
            None => mesher.enable_max_area(false),
        }
        match self.min_angle {
            Some(angle) => {
                mesher.set_min_angle(angle);
                mesher.enable_min_angle(true);
            }
            None => mesher.enable_min_angle(false),
        }
    }
}

fn parse_env(name: &str, value: &str) -> Option<f64> {
    match value.trim().parse() {
        Ok(parsed) => Some(parsed),
        Err(e) => {
            log::warn!("ignoring {}={:?}: {}", name, value, e);
            None
        }
    }
}
