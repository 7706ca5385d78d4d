// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Meshing of randomly generated faces

use anyhow::Result;
use facemesh::fuzz::{FuzzerConfig, PslgFuzzer};
use facemesh::geometry::{analyze, locate_triangle};
use facemesh::utils::math::triangle_angles_deg;
use facemesh::{mesh_pslg, Mesh, MesherConfig};
use nalgebra::Point2;

#[test]
fn test_random_polygons_mesh_without_holes() -> Result<()> {
    let faces = PslgFuzzer::new(FuzzerConfig {
        count: 100,
        seed: 1,
        ..FuzzerConfig::default()
    })
    .run();

    for (name, pslg) in &faces {
        let mesh = mesh_pslg(pslg, &MesherConfig::default())?;
        let stats = analyze(&mesh);
        // No Steiner points, so a simple polygon fans into n - 2 triangles
        assert_eq!(stats.triangle_count, pslg.points.len() - 2, "{}", name);
        assert_eq!(stats.vertex_count, pslg.points.len(), "{}", name);
        assert_eq!(stats.boundary_edge_count, pslg.segments.len(), "{}", name);
    }
    Ok(())
}

#[test]
fn test_random_polygons_with_holes() -> Result<()> {
    let faces = PslgFuzzer::new(FuzzerConfig {
        count: 100,
        with_holes: true,
        seed: 2,
        ..FuzzerConfig::default()
    })
    .run();

    for (name, pslg) in &faces {
        let mesh = mesh_pslg(pslg, &MesherConfig::default())?;
        let [x, y] = pslg.holes[0];
        assert_eq!(locate_triangle(&mesh, Point2::new(x, y)), None, "{}", name);
        // An annulus with n vertices triangulates into exactly n triangles
        assert_eq!(mesh.triangle_count(), pslg.points.len(), "{}", name);
    }
    Ok(())
}

#[test]
fn test_random_polygons_with_quality_bound() -> Result<()> {
    let faces = PslgFuzzer::new(FuzzerConfig {
        count: 25,
        seed: 3,
        ..FuzzerConfig::default()
    })
    .run();
    let config = MesherConfig {
        min_angle: Some(20.0),
        ..MesherConfig::default()
    };

    for (name, pslg) in &faces {
        let mesh = mesh_pslg(pslg, &config)?;
        let plain = mesh_pslg(pslg, &MesherConfig::default())?;
        let refined_area = analyze(&mesh).area;
        let plain_area = analyze(&plain).area;
        assert!(
            (refined_area - plain_area).abs() < 1e-6 * plain_area,
            "{}: refined area {} differs from {}",
            name,
            refined_area,
            plain_area
        );
        assert!(mesh.triangle_count() >= plain.triangle_count(), "{}", name);
    }
    Ok(())
}

#[test]
fn test_random_polygons_meet_area_bound() -> Result<()> {
    let faces = PslgFuzzer::new(FuzzerConfig {
        count: 25,
        with_holes: true,
        seed: 5,
        ..FuzzerConfig::default()
    })
    .run();

    for (name, pslg) in &faces {
        let (min, max) = pslg.points.iter().fold(
            ([f64::MAX; 2], [f64::MIN; 2]),
            |(min, max), [x, y]| ([min[0].min(*x), min[1].min(*y)], [max[0].max(*x), max[1].max(*y)]),
        );
        let max_area = (max[0] - min[0]) * (max[1] - min[1]) / 200.0;
        let config = MesherConfig {
            max_area: Some(max_area),
            ..MesherConfig::default()
        };

        let refined = analyze(&mesh_pslg(pslg, &config)?);
        let plain = analyze(&mesh_pslg(pslg, &MesherConfig::default())?);
        assert!(
            refined.max_triangle_area <= max_area * (1.0 + 1e-9),
            "{}: largest triangle {} exceeds {}",
            name,
            refined.max_triangle_area,
            max_area
        );
        assert!((refined.area - plain.area).abs() < 1e-6 * plain.area, "{}", name);
        assert_eq!(refined.unused_vertex_count, 0, "{}", name);
    }
    Ok(())
}

#[test]
fn test_random_polygons_gain_well_shaped_triangles() -> Result<()> {
    let faces = PslgFuzzer::new(FuzzerConfig {
        count: 25,
        seed: 6,
        ..FuzzerConfig::default()
    })
    .run();
    let min_angle = 20.0;
    let config = MesherConfig {
        min_angle: Some(min_angle),
        ..MesherConfig::default()
    };
    let well_shaped = |mesh: &Mesh| -> (usize, usize) {
        let good = (0..mesh.triangle_count())
            .filter_map(|index| mesh.triangle_positions(index))
            .filter(|[a, b, c]| {
                let [a, b, c] = [a, b, c].map(|p| Point2::new(p.x, p.y));
                triangle_angles_deg(&a, &b, &c).iter().all(|angle| *angle >= min_angle)
            })
            .count();
        (good, mesh.triangle_count())
    };

    let (mut plain_good, mut plain_total) = (0, 0);
    let (mut refined_good, mut refined_total) = (0, 0);
    for (name, pslg) in &faces {
        let plain = mesh_pslg(pslg, &MesherConfig::default())?;
        let refined = mesh_pslg(pslg, &config)?;
        let (good, total) = well_shaped(&plain);
        plain_good += good;
        plain_total += total;
        let (good, total) = well_shaped(&refined);
        refined_good += good;
        refined_total += total;

        let plain_min = analyze(&plain).min_angle;
        if plain_min >= min_angle {
            // Nothing to refine
            assert_eq!(refined, plain, "{}", name);
        }
    }

    let plain_share = plain_good as f64 / plain_total as f64;
    let refined_share = refined_good as f64 / refined_total as f64;
    println!(
        "Triangles with every angle >= {}: plain {:.3}, refined {:.3}",
        min_angle, plain_share, refined_share
    );
    assert!(refined_share > plain_share);
    Ok(())
}

#[test]
fn test_repeated_builds_with_aliased_buffers() -> Result<()> {
    let faces = PslgFuzzer::new(FuzzerConfig {
        count: 20,
        with_holes: true,
        seed: 4,
        ..FuzzerConfig::default()
    })
    .run();

    for (name, pslg) in &faces {
        let mut mesh = facemesh::Mesh::new();
        let mut mesher = pslg.face_mesher();
        mesher.set_min_angle(25.0);
        mesher.set_output_mesh(&mut mesh);
        for round in 0..4 {
            // Alternate between aliased (plain) and separate (refined) outputs
            mesher.enable_min_angle(round % 2 == 1);
            let summary = mesher.try_build_face_mesh(0)?;
            let ownership = mesher.buffer_ownership();
            if summary.steiner_points == 0 {
                assert_eq!(ownership.shared_count(), 3, "{} round {}", name, round);
            } else {
                assert!(!ownership.points.is_shared(), "{} round {}", name, round);
            }
        }
    }
    Ok(())
}
