// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Random face generation for stress testing the mesher
//! Generates star-shaped polygons, optionally with a triangular-to-hexagonal hole

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::f64::consts::TAU;

use crate::geometry::Pslg;

/// Fuzzer configuration
#[derive(Debug, Clone)]
pub struct FuzzerConfig {
    pub count: usize,
    pub min_vertices: usize,
    pub max_vertices: usize,
    pub with_holes: bool,
    pub seed: u64,
}

impl Default for FuzzerConfig {
    fn default() -> Self {
        Self {
            count: 200,
            min_vertices: 5,
            max_vertices: 24,
            with_holes: false,
            seed: 0,
        }
    }
}

/// Seeded generator of random faces
pub struct PslgFuzzer {
    config: FuzzerConfig,
    rng: StdRng,
}

impl PslgFuzzer {
    pub fn new(config: FuzzerConfig) -> Self {
        let rng = StdRng::seed_from_u64(config.seed);
        Self { config, rng }
    }

    /// Generate one face
    ///
    /// The outer loop is star-shaped around its center with at least five
    /// vertices, so every edge stays more than `0.4 * r_min` from the center
    /// and the hole loop at `0.3 * r_min` never touches it.
    pub fn generate(&mut self) -> Pslg {
        let min = self.config.min_vertices.max(5);
        let max = self.config.max_vertices.max(min);
        let count = self.rng.gen_range(min..=max);
        let center = [self.rng.gen_range(-50.0..=50.0), self.rng.gen_range(-50.0..=50.0)];
        let r_min = self.rng.gen_range(1.0..=10.0);
        let r_max = r_min * self.rng.gen_range(1.0..=3.0);

        let step = TAU / count as f64;
        let outer: Vec<[f64; 2]> = (0..count)
            .map(|i| {
                let theta = (i as f64 + self.rng.gen_range(-0.4..=0.4)) * step;
                let r = self.rng.gen_range(r_min..=r_max);
                [center[0] + r * theta.cos(), center[1] + r * theta.sin()]
            })
            .collect();
        let mut pslg = Pslg::polygon(&outer);

        if self.config.with_holes {
            let sides = self.rng.gen_range(3..=6);
            let phase = self.rng.gen_range(0.0..TAU);
            let radius = 0.3 * r_min;
            let inner: Vec<[f64; 2]> = (0..sides)
                .map(|i| {
                    let theta = phase + i as f64 * TAU / sides as f64;
                    [center[0] + radius * theta.cos(), center[1] + radius * theta.sin()]
                })
                .collect();
            pslg.add_hole_loop(&inner, center);
        }

        pslg
    }

    /// Generate the configured number of named faces
    pub fn run(&mut self) -> Vec<(String, Pslg)> {
        (0..self.config.count)
            .map(|i| (format!("fuzz_{:05}", i), self.generate()))
            .collect()
    }
}
