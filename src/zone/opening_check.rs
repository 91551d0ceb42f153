use std::collections::VecDeque;

use tracing::{debug, instrument};

use crate::error::Result;
use crate::math::distance_2d::segment_segment_dist;
use crate::math::intersect_3d::signed_distance_to_plane;
use crate::math::polygon_2d::convex_overlap_area;
use crate::math::polygon_3d::{
    classify_point_polygon_3d, project_to_uv, segment_point_at, PolygonContainment,
};
use crate::math::{decimal_places, round_to, Point2, Point3};
use crate::operations::query::facet_area;
use crate::tessellation::{triangulate_polygon, Facet, TessellateFace, TessellationParams};
use crate::topology::{FaceId, TopologyStore};

/// Returns `true` if every opening lies flush on the zone boundary.
///
/// `boundary` must be the tessellation of the zone solid. For each opening,
/// the boundary facets coplanar with it (all opening vertices within `tol` of
/// the facet plane) are overlapped with it. When several facets contribute,
/// they must form one region connected through shared edges. The summed
/// overlap area and the opening's own area are rounded to the tolerance's
/// decimal places and must agree.
///
/// # Errors
///
/// Returns an error if an opening face cannot be read or tessellated.
#[instrument(skip(store, boundary, params))]
pub fn check_windows_on_zone(
    store: &TopologyStore,
    boundary: &[Facet],
    openings: &[FaceId],
    tol: f64,
    params: &TessellationParams,
) -> Result<bool> {
    let digits = decimal_places(tol);
    for &opening in openings {
        let facets = TessellateFace::new(opening, *params).execute(store)?;
        let mut opening_area = 0.0;
        let mut overlap_area = 0.0;
        for facet in &facets {
            opening_area += facet_area(facet);
            match overlap_with_boundary(facet, boundary, tol) {
                Some(area) => overlap_area += area,
                None => {
                    debug!(?opening, "overlap with the boundary is not one connected region");
                    return Ok(false);
                }
            }
        }
        if !rounded_eq(overlap_area, opening_area, digits) {
            debug!(?opening, opening_area, overlap_area, "opening is not flush on the boundary");
            return Ok(false);
        }
    }
    Ok(true)
}

/// Both values land on the same step of the `digits` decimal grid.
#[allow(clippy::float_cmp)]
fn rounded_eq(a: f64, b: f64, digits: u32) -> bool {
    round_to(a, digits) == round_to(b, digits)
}

/// Area shared by `piece` and the boundary facets coplanar with it, or `None`
/// if the contributing facets are not edge-connected.
fn overlap_with_boundary(piece: &Facet, boundary: &[Facet], tol: f64) -> Option<f64> {
    let piece_tris = triangles_in(piece, piece).unwrap_or_default();

    let mut contributing: Vec<&Facet> = Vec::new();
    let mut total = 0.0;
    for facet in boundary {
        let coplanar = piece
            .outer
            .iter()
            .all(|p| signed_distance_to_plane(p, &facet.plane).abs() <= tol);
        if !coplanar {
            continue;
        }
        let Some(facet_tris) = triangles_in(facet, piece) else {
            continue;
        };
        let area: f64 = piece_tris
            .iter()
            .flat_map(|a| facet_tris.iter().map(move |b| convex_overlap_area(a, b)))
            .sum();
        if area > tol * tol {
            contributing.push(facet);
            total += area;
        }
    }

    if contributing.len() > 1 && !edge_connected(&contributing, tol) {
        return None;
    }
    Some(total)
}

/// Triangulates `facet` in the UV frame of `frame`'s plane.
fn triangles_in(facet: &Facet, frame: &Facet) -> Option<Vec<[Point2; 3]>> {
    let outer: Vec<Point2> = facet.outer.iter().map(|p| project_to_uv(p, &frame.plane)).collect();
    let holes: Vec<Vec<Point2>> = facet
        .holes
        .iter()
        .map(|h| h.iter().map(|p| project_to_uv(p, &frame.plane)).collect())
        .collect();
    match triangulate_polygon(&outer, &holes) {
        Ok(tris) => Some(tris),
        Err(err) => {
            debug!(%err, "facet could not be triangulated");
            None
        }
    }
}

/// Returns `true` if the facets form one group under the relation "share an
/// edge" (two coincident consecutive vertices, in either direction).
fn edge_connected(facets: &[&Facet], tol: f64) -> bool {
    let n = facets.len();
    let mut seen = vec![false; n];
    let mut queue = VecDeque::from([0]);
    seen[0] = true;
    while let Some(i) = queue.pop_front() {
        for j in 0..n {
            if !seen[j] && share_edge(facets[i], facets[j], tol) {
                seen[j] = true;
                queue.push_back(j);
            }
        }
    }
    seen.into_iter().all(|s| s)
}

fn share_edge(a: &Facet, b: &Facet, tol: f64) -> bool {
    let near = |p: &Point3, q: &Point3| (p - q).norm() <= tol;
    let edges = |f: &Facet| -> Vec<(Point3, Point3)> {
        let n = f.outer.len();
        (0..n).map(|i| (f.outer[i], f.outer[(i + 1) % n])).collect()
    };
    let b_edges = edges(b);
    edges(a).iter().any(|(p0, p1)| {
        b_edges
            .iter()
            .any(|(q0, q1)| (near(p0, q0) && near(p1, q1)) || (near(p0, q1) && near(p1, q0)))
    })
}

/// Returns `true` if no two openings share a point.
///
/// Coplanar openings fail when they overlap, contain one another, or their
/// edges come within `tol`. Non-coplanar openings fail when an edge of one
/// meets the other.
///
/// # Errors
///
/// Returns an error if an opening face cannot be read or tessellated.
#[instrument(skip(store, params))]
pub fn check_windows_self_intersect(
    store: &TopologyStore,
    openings: &[FaceId],
    tol: f64,
    params: &TessellationParams,
) -> Result<bool> {
    let pieces = openings
        .iter()
        .map(|&face| TessellateFace::new(face, *params).execute(store))
        .collect::<Result<Vec<_>>>()?;

    for i in 0..pieces.len() {
        for j in i + 1..pieces.len() {
            let touching = pieces[i]
                .iter()
                .any(|a| pieces[j].iter().any(|b| facets_touch(a, b, tol)));
            if touching {
                debug!(first = ?openings[i], second = ?openings[j], "openings intersect");
                return Ok(false);
            }
        }
    }
    Ok(true)
}

fn facets_touch(a: &Facet, b: &Facet, tol: f64) -> bool {
    facet_edges(b).any(|(p0, p1)| edge_meets_facet(&p0, &p1, a, tol))
        || facet_edges(a).any(|(p0, p1)| edge_meets_facet(&p0, &p1, b, tol))
}

fn facet_edges(facet: &Facet) -> impl Iterator<Item = (Point3, Point3)> + '_ {
    std::iter::once(&facet.outer).chain(&facet.holes).flat_map(|ring| {
        let n = ring.len();
        (0..n).map(move |i| (ring[i], ring[(i + 1) % n]))
    })
}

fn contains(facet: &Facet, point: &Point3, tol: f64) -> bool {
    classify_point_polygon_3d(point, &facet.outer, &facet.holes, &facet.plane, tol)
        != PolygonContainment::Outside
}

/// Returns `true` if the segment `p0..p1` shares a point with `facet`.
fn edge_meets_facet(p0: &Point3, p1: &Point3, facet: &Facet, tol: f64) -> bool {
    let d0 = signed_distance_to_plane(p0, &facet.plane);
    let d1 = signed_distance_to_plane(p1, &facet.plane);
    let on0 = d0.abs() <= tol;
    let on1 = d1.abs() <= tol;

    if on0 && on1 {
        return contains(facet, p0, tol)
            || contains(facet, p1, tol)
            || in_plane_edge_touches_boundary(p0, p1, facet, tol);
    }
    if (on0 && contains(facet, p0, tol)) || (on1 && contains(facet, p1, tol)) {
        return true;
    }
    if !on0 && !on1 && d0 * d1 < 0.0 {
        let crossing = segment_point_at(p0, p1, d0 / (d0 - d1));
        return contains(facet, &crossing, tol);
    }
    false
}

fn in_plane_edge_touches_boundary(p0: &Point3, p1: &Point3, facet: &Facet, tol: f64) -> bool {
    let uv = |p: &Point3| {
        let q = project_to_uv(p, &facet.plane);
        (q.x, q.y)
    };
    let (s0, s1) = (uv(p0), uv(p1));
    facet_edges(facet).any(|(a, b)| segment_segment_dist(s0, s1, uv(&a), uv(&b)) <= tol)
}
