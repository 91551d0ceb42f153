use tracing::{debug, instrument, warn};

use crate::error::Result;
use crate::math::Point3;
use crate::operations::query::{classify_point_in_solid, intersect_segment_solid, PointClassification};
use crate::tessellation::Facet;
use crate::topology::{SolidId, TopologyStore, WireId};

use super::config::{AmbiguousChordPolicy, ZoneConfig};
use super::diagnostics::ConvexityReport;

/// An edge as traversed by one wire, reduced to positions.
#[derive(Debug, Clone, Copy)]
struct HalfEdge {
    from: Point3,
    to: Point3,
    mid: Point3,
}

fn near(a: &Point3, b: &Point3, tol: f64) -> bool {
    (a - b).norm() <= tol
}

/// Returns `true` if the boundary of `solid` is a closed, consistently
/// oriented 2-manifold.
///
/// Requires at least four faces and closed, connected wires. Every traversed
/// edge must be matched by exactly one traversal of the same curve in the
/// opposite direction and by none in the same direction. Edges are compared
/// by position (endpoints and curve midpoint), so faces need not share
/// vertex or edge entities.
///
/// # Errors
///
/// Returns an error if an entity referenced by the solid is missing.
#[instrument(skip(store))]
pub fn check_closed(store: &TopologyStore, solid: SolidId, tol: f64) -> Result<bool> {
    let faces = store.solid_faces(solid)?;
    if faces.len() < 4 {
        debug!(faces = faces.len(), "too few faces to enclose a volume");
        return Ok(false);
    }

    let mut half_edges = Vec::new();
    for &face in faces {
        for wire in store.face_wires(face)? {
            let Some(edges) = wire_half_edges(store, wire, tol)? else {
                debug!(?face, "face has an open or disconnected wire");
                return Ok(false);
            };
            half_edges.extend(edges);
        }
    }

    for (i, h) in half_edges.iter().enumerate() {
        let mut opposite = 0usize;
        let mut same = 0usize;
        for (j, g) in half_edges.iter().enumerate() {
            if i == j || !near(&g.mid, &h.mid, tol) {
                continue;
            }
            if near(&g.from, &h.to, tol) && near(&g.to, &h.from, tol) {
                opposite += 1;
            } else if near(&g.from, &h.from, tol) && near(&g.to, &h.to, tol) {
                same += 1;
            }
        }
        if opposite != 1 || same != 0 {
            debug!(from = ?h.from, to = ?h.to, opposite, same, "edge is not shared by exactly two faces");
            return Ok(false);
        }
    }

    Ok(true)
}

/// Positions of a wire's oriented edges, or `None` if the wire is flagged
/// open, empty, or has a gap between consecutive edges.
fn wire_half_edges(store: &TopologyStore, wire: WireId, tol: f64) -> Result<Option<Vec<HalfEdge>>> {
    let data = store.wire(wire)?;
    if !data.is_closed || data.edges.is_empty() {
        return Ok(None);
    }

    let mut half_edges = Vec::with_capacity(data.edges.len());
    for oe in &data.edges {
        let edge = store.edge(oe.edge)?;
        let start = store.vertex(edge.start)?.point;
        let end = store.vertex(edge.end)?.point;
        let (from, to) = if oe.forward { (start, end) } else { (end, start) };
        half_edges.push(HalfEdge {
            from,
            to,
            mid: edge.midpoint()?,
        });
    }

    let n = half_edges.len();
    let connected = (0..n).all(|i| near(&half_edges[i].to, &half_edges[(i + 1) % n].from, tol));
    Ok(connected.then_some(half_edges))
}

/// Returns `true` if every edge of the solid is a straight segment.
///
/// # Errors
///
/// Returns an error if an entity referenced by the solid is missing.
#[instrument(skip(store))]
pub fn check_linear(store: &TopologyStore, solid: SolidId) -> Result<bool> {
    for &face in store.solid_faces(solid)? {
        for wire in store.face_wires(face)? {
            for oe in &store.wire(wire)?.edges {
                if !store.edge(oe.edge)?.curve.as_curve().is_straight() {
                    debug!(?face, "face has a curved edge");
                    return Ok(false);
                }
            }
        }
    }
    Ok(true)
}

/// Returns `true` if every face lies on a plane: the surface is planar and
/// each vertex and edge midpoint is within `tol` of it.
///
/// # Errors
///
/// Returns an error if an entity referenced by the solid is missing.
#[instrument(skip(store))]
pub fn check_planar(store: &TopologyStore, solid: SolidId, tol: f64) -> Result<bool> {
    for &face in store.solid_faces(solid)? {
        let data = store.face(face)?;
        let Some(plane) = data.surface.as_plane() else {
            debug!(?face, "face surface is not a plane");
            return Ok(false);
        };
        for wire in store.face_wires(face)? {
            for oe in &store.wire(wire)?.edges {
                let edge = store.edge(oe.edge)?;
                let points = [
                    store.vertex(edge.start)?.point,
                    store.vertex(edge.end)?.point,
                    edge.midpoint()?,
                ];
                if let Some(off) = points.iter().find(|p| plane.distance_to(p) > tol) {
                    debug!(?face, point = ?off, distance = plane.distance_to(off), "boundary leaves the face plane");
                    return Ok(false);
                }
            }
        }
    }
    Ok(true)
}

/// Checks convexity by intersecting every vertex-to-vertex chord with the
/// boundary.
///
/// `facets` must be the tessellation of `solid`. A chord meeting the boundary
/// in more than two isolated points, or in exactly two whose midpoint is not
/// strictly inside, proves the solid non-convex. Chords with fewer points are
/// handled by [`ZoneConfig::ambiguous_chord_policy`]. The check stops at the
/// first chord that decides against convexity. Curved faces take part
/// through their facets; their corners are the only vertices tested.
///
/// # Errors
///
/// Returns an error if an entity referenced by the solid is missing.
#[instrument(skip(store, facets, config), fields(tol = config.tolerance))]
pub fn check_convex(
    store: &TopologyStore,
    solid: SolidId,
    facets: &[Facet],
    config: &ZoneConfig,
) -> Result<ConvexityReport> {
    let tol = config.tolerance;
    let mut report = ConvexityReport::default();

    let vertices = distinct_vertices(store, solid, tol)?;
    let n = vertices.len();
    report.vertex_count = n;

    if let Some(limit) = config.convexity_vertex_limit {
        if n > limit {
            warn!(vertices = n, limit, "vertex limit exceeded; convexity not checked");
            report.skipped = true;
            return Ok(report);
        }
    }
    if n > config.convexity_warn_vertices {
        warn!(vertices = n, chords = n * (n - 1) / 2, "convexity check is quadratic in vertex count");
    }

    for i in 0..n {
        for j in i + 1..n {
            report.chords_tested += 1;
            let hit = intersect_segment_solid(&vertices[i], &vertices[j], facets, tol);
            let holds = match hit.points.as_slice() {
                [a, b] => {
                    let mid = nalgebra::center(a, b);
                    classify_point_in_solid(&mid, facets, tol) == PointClassification::Inside
                }
                [] | [_] => {
                    report.ambiguous_chords += 1;
                    config.ambiguous_chord_policy == AmbiguousChordPolicy::Skip
                }
                _ => false,
            };
            if !holds {
                debug!(
                    from = ?vertices[i],
                    to = ?vertices[j],
                    points = hit.points.len(),
                    "chord is not contained in the solid"
                );
                return Ok(report);
            }
        }
    }

    report.is_convex = true;
    Ok(report)
}

/// Vertex positions of the solid with coincident points (within `tol`)
/// merged, in first-seen order.
fn distinct_vertices(store: &TopologyStore, solid: SolidId, tol: f64) -> Result<Vec<Point3>> {
    let mut vertices: Vec<Point3> = Vec::new();
    for &face in store.solid_faces(solid)? {
        for p in store.face_points(face)? {
            if !vertices.iter().any(|q| near(q, &p, tol)) {
                vertices.push(p);
            }
        }
    }
    Ok(vertices)
}
