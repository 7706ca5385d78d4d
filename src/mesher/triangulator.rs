// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Constrained Delaunay triangulation routine
//!
//! [`Triangulator`] is the call surface the face mesher drives: a switch
//! string, an input record, an output record and an optional Voronoi record.
//! [`SpadeTriangulator`] implements it on top of `spade`:
//!
//! 1. insert the points and the segments as constraint edges
//! 2. refine when an area or angle bound is requested
//! 3. remove triangles reachable from the convex hull or from a hole seed
//!    without crossing a segment
//! 4. write the surviving triangles into the output record
//!
//! Output numbering keeps every input point at its input index. Steiner
//! points added by refinement follow, in insertion order. Fields for which
//! nothing new was produced reuse the input allocation.

use super::error::{BufferKind, TriangulationFailure};
use super::real::Real;
use super::switches::Switches;
use super::tio::TriangulateIo;
use crate::utils::math::{triangle_angles_deg, triangle_area_2d};
use spade::handles::{FixedFaceHandle, FixedVertexHandle, InnerTag};
use spade::{
    AngleLimit, ConstrainedDelaunayTriangulation, Point2, PositionInTriangulation,
    RefinementParameters, Triangulation,
};
use std::sync::Arc;

type Cdt = ConstrainedDelaunayTriangulation<Point2<f64>>;

/// A planar straight-line graph triangulation routine
pub trait Triangulator {
    /// Triangulate `input` according to `switches`, filling `output`.
    ///
    /// `output` is expected to be empty. It may receive clones of the input
    /// buffers rather than fresh allocations.
    fn triangulate<R: Real>(
        &self,
        switches: &str,
        input: &TriangulateIo<R>,
        output: &mut TriangulateIo<R>,
        voronoi: Option<&mut TriangulateIo<R>>,
    ) -> Result<(), TriangulationFailure>;
}

/// Triangulation routine backed by `spade`'s constrained Delaunay triangulation
#[derive(Debug, Clone, Copy)]
pub struct SpadeTriangulator {
    /// Upper bound on Steiner points, as a multiple of the input point count
    pub steiner_budget: usize,
}

impl Default for SpadeTriangulator {
    fn default() -> Self {
        Self { steiner_budget: 64 }
    }
}

impl Triangulator for SpadeTriangulator {
    fn triangulate<R: Real>(
        &self,
        switches: &str,
        input: &TriangulateIo<R>,
        output: &mut TriangulateIo<R>,
        voronoi: Option<&mut TriangulateIo<R>>,
    ) -> Result<(), TriangulationFailure> {
        let switches = Switches::parse(switches)?;
        if voronoi.is_some() && !switches.quiet {
            log::debug!("voronoi output is not produced");
        }

        let points = input
            .point_list
            .as_deref()
            .ok_or(TriangulationFailure::MissingBuffer(BufferKind::Points))?;
        let count = input.number_of_points;
        if count < 3 {
            return Err(TriangulationFailure::TooFewPoints {
                found: count,
                required: 3,
            });
        }

        let mut cdt = Cdt::new();
        let handles = insert_points(&mut cdt, points, count)?;

        let mut constrained = 0;
        if switches.pslg && input.number_of_segments > 0 {
            let segments = input
                .segment_list
                .as_deref()
                .ok_or(TriangulationFailure::MissingBuffer(BufferKind::Segments))?;
            constrained = insert_segments(
                &mut cdt,
                &handles,
                segments,
                input.number_of_segments,
                switches.zero_based,
            )?;
        }

        let holes = if switches.pslg {
            hole_seeds(input)
        } else {
            Vec::new()
        };

        if switches.refines() {
            self.refine(&mut cdt, &switches, &holes, count)?;
        }

        let dead = carve(&cdt, switches.pslg, &holes);

        write_output(&cdt, &handles, &dead, input, output, constrained);

        if !switches.quiet {
            log::debug!(
                "triangulated {} points into {} triangles ({} output points)",
                count,
                output.number_of_triangles,
                output.number_of_points
            );
        }
        Ok(())
    }
}

impl SpadeTriangulator {
    /// Refine until every live triangle meets the area bound.
    ///
    /// spade's Ruppert pass handles the angle bound first. It never splits a
    /// segment under `Y`, so the area bound is then enforced here by
    /// inserting circumcenters, or centroids where a circumcenter would leave
    /// the domain or encroach a segment. An angle bound that cannot be met is
    /// logged; an area bound that cannot be met within the Steiner budget is
    /// an error.
    fn refine(
        &self,
        cdt: &mut Cdt,
        switches: &Switches,
        holes: &[Point2<f64>],
        count: usize,
    ) -> Result<(), TriangulationFailure> {
        let cells = match switches.max_area {
            Some(area) if area > 0.0 => {
                let cells = (hull_area(cdt) / area).ceil();
                if cells.is_finite() {
                    cells as usize
                } else {
                    usize::MAX
                }
            }
            Some(area) => return Err(TriangulationFailure::NonPositiveArea(area)),
            None => 0,
        };
        let budget = self.steiner_budget.saturating_mul(count.max(cells));
        let initial = cdt.num_vertices();

        if let Some(degrees) = switches.min_angle {
            let mut parameters = RefinementParameters::<f64>::new()
                .with_angle_limit(AngleLimit::from_deg(degrees))
                .exclude_outer_faces(switches.pslg)
                .with_max_additional_vertices(budget);
            if switches.preserve_boundary {
                parameters = parameters.keep_constraint_edges();
            }
            cdt.refine(parameters);
        }

        loop {
            let dead = carve(cdt, switches.pslg, holes);
            let pass = refinement_pass(cdt, &dead, switches.max_area, switches.min_angle);
            if pass.oversized == 0 && pass.candidates.is_empty() {
                return Ok(());
            }

            let before = cdt.num_vertices();
            for point in pass.candidates {
                if cdt.num_vertices() - initial >= budget {
                    break;
                }
                // Candidates are finite and strictly inside the domain
                let _ = cdt.insert(point);
            }

            if cdt.num_vertices() == before {
                let added = before - initial;
                if pass.oversized > 0 {
                    return Err(TriangulationFailure::RefinementIncomplete {
                        oversized: pass.oversized,
                        added,
                    });
                }
                if added >= budget {
                    log::warn!("angle refinement stopped at the Steiner point budget ({} points)", added);
                }
                return Ok(());
            }
        }
    }
}

/// Points to insert in one refinement round
struct RefinementPass {
    /// Live triangles larger than the area bound
    oversized: usize,
    candidates: Vec<Point2<f64>>,
}

fn refinement_pass(
    cdt: &Cdt,
    dead: &[bool],
    max_area: Option<f64>,
    min_angle: Option<f64>,
) -> RefinementPass {
    let constraints: Vec<[Point2<f64>; 2]> = cdt
        .undirected_edges()
        .filter(|edge| cdt.is_constraint_edge(edge.fix()))
        .map(|edge| edge.vertices().map(|vertex| vertex.position()))
        .collect();

    let mut pass = RefinementPass {
        oversized: 0,
        candidates: Vec::new(),
    };
    for face in cdt.inner_faces() {
        if dead[face.fix().index()] {
            continue;
        }
        let corners = face.vertices().map(|vertex| vertex.position());
        let [a, b, c] = corners.map(|p| nalgebra::Point2::new(p.x, p.y));
        let too_large = max_area.is_some_and(|limit| triangle_area_2d(&a, &b, &c) > limit);
        let too_sharp = min_angle.is_some_and(|limit| {
            triangle_angles_deg(&a, &b, &c).iter().any(|angle| *angle < limit)
        });
        if !too_large && !too_sharp {
            continue;
        }

        let center = centroid(corners);
        match circumcenter(corners).filter(|p| insertable(cdt, dead, &constraints, center, *p)) {
            Some(point) => pass.candidates.push(point),
            None if too_large => pass.candidates.push(center),
            None => {}
        }
        if too_large {
            pass.oversized += 1;
        }
    }
    pass
}

/// Whether `point` lies in a live triangle, off every segment and outside
/// every segment's diametral circle, and is visible from `from`
fn insertable(
    cdt: &Cdt,
    dead: &[bool],
    constraints: &[[Point2<f64>; 2]],
    from: Point2<f64>,
    point: Point2<f64>,
) -> bool {
    let live = match cdt.locate(point) {
        PositionInTriangulation::OnFace(face) => !dead[face.index()],
        PositionInTriangulation::OnEdge(edge) => {
            let edge = cdt.directed_edge(edge);
            !cdt.is_constraint_edge(edge.as_undirected().fix())
                && [edge.face(), edge.rev().face()]
                    .into_iter()
                    .all(|face| face.as_inner().is_some_and(|inner| !dead[inner.fix().index()]))
        }
        _ => false,
    };
    live && constraints
        .iter()
        .all(|&[u, v]| !encroaches(point, u, v) && !crosses(from, point, u, v))
}

fn encroaches(point: Point2<f64>, u: Point2<f64>, v: Point2<f64>) -> bool {
    let (mx, my) = ((u.x + v.x) / 2.0, (u.y + v.y) / 2.0);
    let radius_squared = ((u.x - v.x).powi(2) + (u.y - v.y).powi(2)) / 4.0;
    (point.x - mx).powi(2) + (point.y - my).powi(2) <= radius_squared
}

/// Proper crossing of segments `ab` and `uv`
fn crosses(a: Point2<f64>, b: Point2<f64>, u: Point2<f64>, v: Point2<f64>) -> bool {
    let orient = |p: Point2<f64>, q: Point2<f64>, r: Point2<f64>| {
        (q.x - p.x) * (r.y - p.y) - (q.y - p.y) * (r.x - p.x)
    };
    orient(a, b, u) * orient(a, b, v) < 0.0 && orient(u, v, a) * orient(u, v, b) < 0.0
}

fn centroid([a, b, c]: [Point2<f64>; 3]) -> Point2<f64> {
    Point2::new((a.x + b.x + c.x) / 3.0, (a.y + b.y + c.y) / 3.0)
}

fn circumcenter([a, b, c]: [Point2<f64>; 3]) -> Option<Point2<f64>> {
    let (bx, by) = (b.x - a.x, b.y - a.y);
    let (cx, cy) = (c.x - a.x, c.y - a.y);
    let d = 2.0 * (bx * cy - by * cx);
    if d == 0.0 {
        return None;
    }
    let (b2, c2) = (bx * bx + by * by, cx * cx + cy * cy);
    let x = a.x + (cy * b2 - by * c2) / d;
    let y = a.y + (bx * c2 - cx * b2) / d;
    (x.is_finite() && y.is_finite()).then(|| Point2::new(x, y))
}

/// Area of the bounding box of all vertices
fn hull_area(cdt: &Cdt) -> f64 {
    let mut min = Point2::new(f64::INFINITY, f64::INFINITY);
    let mut max = Point2::new(f64::NEG_INFINITY, f64::NEG_INFINITY);
    for vertex in cdt.vertices() {
        let position = vertex.position();
        min.x = min.x.min(position.x);
        min.y = min.y.min(position.y);
        max.x = max.x.max(position.x);
        max.y = max.y.max(position.y);
    }
    (max.x - min.x).max(0.0) * (max.y - min.y).max(0.0)
}

fn insert_points<R: Real>(
    cdt: &mut Cdt,
    points: &[R],
    count: usize,
) -> Result<Vec<FixedVertexHandle>, TriangulationFailure> {
    let mut handles = Vec::with_capacity(count);
    for index in 0..count {
        let (x, y) = match (points.get(2 * index), points.get(2 * index + 1)) {
            (Some(x), Some(y)) => (x.to_f64(), y.to_f64()),
            _ => return Err(TriangulationFailure::MissingBuffer(BufferKind::Points)),
        };
        if !x.is_finite() || !y.is_finite() {
            return Err(TriangulationFailure::NonFiniteCoordinate { index });
        }
        // Duplicate positions resolve to the vertex inserted first
        let handle = cdt
            .insert(Point2::new(x, y))
            .map_err(|_| TriangulationFailure::Insertion { index })?;
        handles.push(handle);
    }
    Ok(handles)
}

/// Insert segments as constraint edges, returning how many were inserted
fn insert_segments(
    cdt: &mut Cdt,
    handles: &[FixedVertexHandle],
    segments: &[usize],
    count: usize,
    zero_based: bool,
) -> Result<usize, TriangulationFailure> {
    let base = if zero_based { 0 } else { 1 };
    let resolve = |segment: usize, point: usize| -> Result<FixedVertexHandle, TriangulationFailure> {
        point
            .checked_sub(base)
            .and_then(|index| handles.get(index).copied())
            .ok_or(TriangulationFailure::SegmentIndexOutOfRange {
                segment,
                point,
                count: handles.len(),
            })
    };

    let mut inserted = 0;
    for segment in 0..count {
        let (first, second) = match (segments.get(2 * segment), segments.get(2 * segment + 1)) {
            (Some(a), Some(b)) => (*a, *b),
            _ => return Err(TriangulationFailure::MissingBuffer(BufferKind::Segments)),
        };
        let from = resolve(segment, first)?;
        let to = resolve(segment, second)?;
        if from == to {
            log::debug!("segment {} has coincident endpoints, skipped", segment);
            continue;
        }
        if !cdt.can_add_constraint(from, to) {
            return Err(TriangulationFailure::IntersectingSegments { segment });
        }
        cdt.add_constraint(from, to);
        inserted += 1;
    }
    Ok(inserted)
}

fn hole_seeds<R: Real>(input: &TriangulateIo<R>) -> Vec<Point2<f64>> {
    (0..input.number_of_holes)
        .filter_map(|index| input.hole(index))
        .map(|(x, y)| Point2::new(x.to_f64(), y.to_f64()))
        .filter(|seed| seed.x.is_finite() && seed.y.is_finite())
        .collect()
}

/// Mark faces outside the segment-bounded domain and inside holes.
///
/// Returns a flag per face index, `true` for removed faces.
fn carve(cdt: &Cdt, pslg: bool, holes: &[Point2<f64>]) -> Vec<bool> {
    let mut dead = vec![false; cdt.num_all_faces()];
    if !pslg {
        return dead;
    }

    let mut stack: Vec<FixedFaceHandle<InnerTag>> = Vec::new();
    for edge in cdt.convex_hull() {
        if cdt.is_constraint_edge(edge.as_undirected().fix()) {
            continue;
        }
        for face in [edge.face(), edge.rev().face()] {
            if let Some(inner) = face.as_inner() {
                stack.push(inner.fix());
            }
        }
    }

    for seed in holes {
        let face = match cdt.locate(*seed) {
            PositionInTriangulation::OnFace(face) => Some(face),
            PositionInTriangulation::OnEdge(edge) => cdt.directed_edge(edge).face().as_inner().map(|f| f.fix()),
            _ => None,
        };
        match face {
            Some(face) => stack.push(face),
            None => log::debug!("hole seed ({}, {}) is not inside any triangle", seed.x, seed.y),
        }
    }

    while let Some(face) = stack.pop() {
        if dead[face.index()] {
            continue;
        }
        dead[face.index()] = true;
        for edge in cdt.face(face).adjacent_edges() {
            if cdt.is_constraint_edge(edge.as_undirected().fix()) {
                continue;
            }
            if let Some(neighbor) = edge.rev().face().as_inner() {
                if !dead[neighbor.fix().index()] {
                    stack.push(neighbor.fix());
                }
            }
        }
    }

    dead
}

fn write_output<R: Real>(
    cdt: &Cdt,
    handles: &[FixedVertexHandle],
    dead: &[bool],
    input: &TriangulateIo<R>,
    output: &mut TriangulateIo<R>,
    constrained: usize,
) {
    let alive: Vec<[FixedVertexHandle; 3]> = cdt
        .inner_faces()
        .filter(|face| !dead[face.fix().index()])
        .map(|face| face.vertices().map(|vertex| vertex.fix()))
        .collect();

    // Input points keep their index; the first of a set of duplicates owns the vertex
    let mut numbering: Vec<Option<usize>> = vec![None; cdt.num_vertices()];
    for (index, handle) in handles.iter().enumerate() {
        numbering[handle.index()].get_or_insert(index);
    }

    let mut used = vec![false; cdt.num_vertices()];
    for corners in &alive {
        for corner in corners {
            used[corner.index()] = true;
        }
    }

    let mut steiner: Vec<Point2<f64>> = Vec::new();
    for vertex in cdt.vertices() {
        let slot = vertex.fix().index();
        if numbering[slot].is_none() && used[slot] {
            numbering[slot] = Some(handles.len() + steiner.len());
            steiner.push(vertex.position());
        }
    }

    output.number_of_points = handles.len() + steiner.len();
    output.point_list = if steiner.is_empty() {
        input.point_list.clone()
    } else {
        let mut list: Vec<R> = input
            .point_list
            .as_deref()
            .map(|points| points[..2 * handles.len()].to_vec())
            .unwrap_or_default();
        for point in &steiner {
            list.push(R::from_f64(point.x));
            list.push(R::from_f64(point.y));
        }
        Some(Arc::new(list))
    };

    let mut triangles = Vec::with_capacity(3 * alive.len());
    for corners in &alive {
        for corner in corners {
            // Every corner of a surviving triangle was numbered above
            triangles.push(numbering[corner.index()].unwrap_or_default());
        }
    }
    output.number_of_triangles = alive.len();
    output.triangle_list = Some(Arc::new(triangles));

    let constraint_edges: Vec<[usize; 2]> = cdt
        .undirected_edges()
        .filter(|edge| cdt.is_constraint_edge(edge.fix()))
        .filter_map(|edge| {
            let [a, b] = edge.vertices();
            Some([numbering[a.fix().index()]?, numbering[b.fix().index()]?])
        })
        .collect();

    if steiner.is_empty() && constrained == input.number_of_segments && constraint_edges.len() == constrained {
        output.segment_list = input.segment_list.clone();
        output.number_of_segments = input.number_of_segments;
    } else {
        output.number_of_segments = constraint_edges.len();
        output.segment_list = Some(Arc::new(constraint_edges.into_iter().flatten().collect()));
    }

    output.hole_list = input.hole_list.clone();
    output.number_of_holes = input.number_of_holes;
}
