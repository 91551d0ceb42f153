use crate::math::intersect_3d::{line_plane_intersect, LinePlaneRelation};
use crate::math::polygon_3d::{
    classify_point_polygon_3d, clip_segment_to_region, segment_point_at, PolygonContainment,
};
use crate::math::{Point3, EPSILON};
use crate::tessellation::Facet;

/// Where a segment meets the boundary of a solid.
#[derive(Debug, Clone, Default)]
pub struct SegmentSolidIntersection {
    /// Isolated crossing or touching points, ordered along the segment.
    pub points: Vec<Point3>,
    /// Parameter intervals `(t_start, t_end)` in `[0, 1]` where the segment
    /// runs inside a boundary facet, merged and ordered.
    pub overlaps: Vec<(f64, f64)>,
}

/// Intersects the segment `start..end` with the boundary facets of a solid.
///
/// Points closer than `tol` along the segment are merged into one, so a
/// crossing through an edge shared by two facets counts once. Points inside
/// an overlap interval are absorbed by it.
#[must_use]
pub fn intersect_segment_solid(
    start: &Point3,
    end: &Point3,
    facets: &[Facet],
    tol: f64,
) -> SegmentSolidIntersection {
    let dir = end - start;
    let len = dir.norm();
    if len < EPSILON {
        return SegmentSolidIntersection::default();
    }
    let t_tol = tol / len;

    let mut hits: Vec<f64> = Vec::new();
    let mut overlaps: Vec<(f64, f64)> = Vec::new();

    for facet in facets {
        let coplanar = facet.plane.distance_to(start) <= tol && facet.plane.distance_to(end) <= tol;
        if coplanar {
            overlaps.extend(clip_segment_to_region(
                start,
                end,
                &facet.outer,
                &facet.holes,
                &facet.plane,
                tol,
            ));
            continue;
        }

        if let LinePlaneRelation::Point { point, t } = line_plane_intersect(start, &dir, &facet.plane, tol) {
            if t < -t_tol || t > 1.0 + t_tol {
                continue;
            }
            if classify_point_polygon_3d(&point, &facet.outer, &facet.holes, &facet.plane, tol)
                != PolygonContainment::Outside
            {
                hits.push(t.clamp(0.0, 1.0));
            }
        }
    }

    overlaps.sort_by(|a, b| a.0.total_cmp(&b.0));
    let mut merged: Vec<(f64, f64)> = Vec::with_capacity(overlaps.len());
    for (t0, t1) in overlaps {
        match merged.last_mut() {
            Some(last) if t0 <= last.1 + t_tol => last.1 = last.1.max(t1),
            _ => merged.push((t0, t1)),
        }
    }

    hits.retain(|&t| !merged.iter().any(|&(t0, t1)| t >= t0 - t_tol && t <= t1 + t_tol));
    hits.sort_by(f64::total_cmp);
    hits.dedup_by(|a, b| (*a - *b).abs() <= t_tol);

    SegmentSolidIntersection {
        points: hits.iter().map(|&t| segment_point_at(start, end, t)).collect(),
        overlaps: merged,
    }
}
