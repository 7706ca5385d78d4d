// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Polyframe Face Mesher CLI

use anyhow::{bail, Result};
use clap::{Parser, Subcommand};
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};
use facemesh::fuzz::{FuzzerConfig, PslgFuzzer};
use facemesh::geometry::analyze;
use facemesh::{export, load_pslg, mesh_pslg, ExportFormat, Mesh, MesherConfig};
use rayon::prelude::*;
use std::path::Path;

#[derive(Parser)]
#[command(name = "facemesh")]
#[command(about = "Polyframe Face Mesher - constrained Delaunay meshing of planar faces", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Verbose output
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Mesh one or more .poly or .json face descriptions into a single mesh
    Mesh {
        /// Input face files; the n-th face is tagged with face id + n
        #[arg(required = true)]
        inputs: Vec<String>,

        /// Output file
        #[arg(short, long)]
        output: String,

        /// Output format (stl, obj, vtk, json); defaults to the output extension
        #[arg(short, long)]
        format: Option<String>,

        /// Maximum triangle area
        #[arg(long)]
        max_area: Option<f64>,

        /// Minimum triangle angle in degrees
        #[arg(long)]
        min_angle: Option<f64>,

        /// Face id written on every triangle
        #[arg(long)]
        face_id: Option<i64>,

        /// Z coordinate of the output vertices
        #[arg(long)]
        elevation: Option<f64>,

        /// Configuration file (defaults to facemesh.toml when present)
        #[arg(short, long)]
        config: Option<String>,
    },

    /// Mesh randomly generated faces and report failures
    Fuzz {
        /// Number of faces
        #[arg(short, long, default_value = "200")]
        count: usize,

        /// Random seed
        #[arg(short, long, default_value = "0")]
        seed: u64,

        /// Add a hole to every face
        #[arg(long)]
        with_holes: bool,

        /// Minimum triangle angle in degrees
        #[arg(long)]
        min_angle: Option<f64>,
    },

    /// Show version information
    Version,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let level = if cli.verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();

    match cli.command {
        Commands::Mesh {
            inputs,
            output,
            format,
            max_area,
            min_angle,
            face_id,
            elevation,
            config,
        } => {
            let mut config = match config {
                Some(path) => MesherConfig::from_file(path)?,
                None => MesherConfig::load()?,
            };
            if max_area.is_some() {
                config.max_area = max_area;
            }
            if min_angle.is_some() {
                config.min_angle = min_angle;
            }
            if let Some(face_id) = face_id {
                config.face_id = face_id;
            }
            if let Some(elevation) = elevation {
                config.elevation = elevation;
            }
            mesh_command(&inputs, &output, format.as_deref(), &config, cli.verbose)?;
        }
        Commands::Fuzz {
            count,
            seed,
            with_holes,
            min_angle,
        } => {
            fuzz_command(count, seed, with_holes, min_angle)?;
        }
        Commands::Version => {
            println!("Polyframe Face Mesher v{}", env!("CARGO_PKG_VERSION"));
        }
    }

    Ok(())
}

fn mesh_command(
    inputs: &[String],
    output: &str,
    format: Option<&str>,
    config: &MesherConfig,
    verbose: bool,
) -> Result<()> {
    let format = match format {
        Some(name) => name.parse()?,
        None => ExportFormat::from_path(output).unwrap_or(ExportFormat::Stl),
    };

    let start = std::time::Instant::now();
    let mut mesh = Mesh::new();
    for (offset, input) in inputs.iter().enumerate() {
        if !Path::new(input).exists() {
            bail!("Input file not found: {}", input);
        }
        let face_config = MesherConfig {
            face_id: config.face_id + offset as i64,
            ..config.clone()
        };
        let face = mesh_pslg(&load_pslg(input)?, &face_config)?;
        if verbose {
            println!(
                "{} face {}: {} triangles",
                input,
                face_config.face_id,
                face.triangle_count()
            );
        }
        mesh.merge(&face);
    }
    let mesh_time = start.elapsed();

    export(&mesh, output, format)?;

    if verbose {
        println!("Meshed in {:.2?}", mesh_time);
        analyze(&mesh).print();
        println!("Output: {}", output);
    } else {
        println!(
            "{} {} face(s) -> {} ({} triangles)",
            "Meshed".green(),
            inputs.len(),
            output,
            mesh.triangle_count()
        );
    }

    Ok(())
}

fn fuzz_command(count: usize, seed: u64, with_holes: bool, min_angle: Option<f64>) -> Result<()> {
    let faces = PslgFuzzer::new(FuzzerConfig {
        count,
        with_holes,
        seed,
        ..FuzzerConfig::default()
    })
    .run();

    let config = MesherConfig {
        min_angle,
        ..MesherConfig::default()
    };

    let progress = ProgressBar::new(faces.len() as u64);
    progress.set_style(
        ProgressStyle::with_template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len}")?
            .progress_chars("#>-"),
    );

    let failures: Vec<(String, String)> = faces
        .par_iter()
        .filter_map(|(name, pslg)| {
            let result = mesh_pslg(pslg, &config);
            progress.inc(1);
            result.err().map(|e| (name.clone(), format!("{:#}", e)))
        })
        .collect();
    progress.finish_and_clear();

    println!("{}", "═".repeat(60).bright_black());
    println!("{}", "Fuzz Summary".bold());
    println!("{}", "═".repeat(60).bright_black());
    println!("  {} {}", "Faces:".bright_black(), faces.len().to_string().cyan());
    println!(
        "  {} {}",
        "Failed:".bright_black(),
        if failures.is_empty() {
            "0".green()
        } else {
            failures.len().to_string().red()
        }
    );
    for (name, error) in &failures {
        println!("    {} {}", name.red(), error.bright_black());
    }

    if !failures.is_empty() {
        std::process::exit(1);
    }

    Ok(())
}
