use crate::geometry::surface::Plane;

use super::distance_2d::point_to_segment_dist;
use super::{Point2, Point3, Vector3, EPSILON};

/// Position of a point relative to a closed polygon (optionally with holes).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PolygonContainment {
    Inside,
    OnBoundary,
    Outside,
}

/// Projects a 3D point onto the UV coordinate system of a plane.
#[must_use]
pub fn project_to_uv(point: &Point3, plane: &Plane) -> Point2 {
    let diff = point - plane.origin();
    Point2::new(diff.dot(plane.u_dir()), diff.dot(plane.v_dir()))
}

/// Lifts UV coordinates back onto the plane.
#[must_use]
pub fn lift_from_uv(uv: &Point2, plane: &Plane) -> Point3 {
    plane.origin() + plane.u_dir() * uv.x + plane.v_dir() * uv.y
}

/// Classifies a 2D point against a single closed loop.
///
/// Points within `tol` of an edge are on the boundary; otherwise the winding
/// number decides.
#[must_use]
pub fn classify_point_loop_2d(point: &Point2, verts: &[Point2], tol: f64) -> PolygonContainment {
    let n = verts.len();
    if n < 3 {
        return PolygonContainment::Outside;
    }
    for i in 0..n {
        let a = verts[i];
        let b = verts[(i + 1) % n];
        if point_to_segment_dist(point.x, point.y, a.x, a.y, b.x, b.y) < tol {
            return PolygonContainment::OnBoundary;
        }
    }
    if winding_number_2d(point.x, point.y, verts) == 0 {
        PolygonContainment::Outside
    } else {
        PolygonContainment::Inside
    }
}

/// Classifies a 2D point against an outer loop with holes.
#[must_use]
pub fn classify_point_region_2d(
    point: &Point2,
    outer: &[Point2],
    holes: &[Vec<Point2>],
    tol: f64,
) -> PolygonContainment {
    match classify_point_loop_2d(point, outer, tol) {
        PolygonContainment::Inside => {}
        other => return other,
    }
    for hole in holes {
        match classify_point_loop_2d(point, hole, tol) {
            PolygonContainment::Inside => return PolygonContainment::Outside,
            PolygonContainment::OnBoundary => return PolygonContainment::OnBoundary,
            PolygonContainment::Outside => {}
        }
    }
    PolygonContainment::Inside
}

/// Point-in-polygon test for a 3D point coplanar with the polygon.
///
/// The point is projected into the plane's UV space; its distance to the
/// plane is not checked here.
#[must_use]
pub fn classify_point_polygon_3d(
    point: &Point3,
    outer: &[Point3],
    holes: &[Vec<Point3>],
    plane: &Plane,
    tol: f64,
) -> PolygonContainment {
    let uv = project_to_uv(point, plane);
    let outer_uv: Vec<Point2> = outer.iter().map(|p| project_to_uv(p, plane)).collect();
    let holes_uv: Vec<Vec<Point2>> = holes
        .iter()
        .map(|h| h.iter().map(|p| project_to_uv(p, plane)).collect())
        .collect();
    classify_point_region_2d(&uv, &outer_uv, &holes_uv, tol)
}

/// Winding number of point `(px, py)` with respect to polygon `verts`.
///
/// Non-zero => inside, zero => outside.
fn winding_number_2d(px: f64, py: f64, verts: &[Point2]) -> i32 {
    let n = verts.len();
    let mut winding = 0i32;
    for i in 0..n {
        let (x0, y0) = (verts[i].x, verts[i].y);
        let (x1, y1) = (verts[(i + 1) % n].x, verts[(i + 1) % n].y);

        if y0 <= py {
            if y1 > py && cross_2d(x1 - x0, y1 - y0, px - x0, py - y0) > 0.0 {
                winding += 1;
            }
        } else if y1 <= py && cross_2d(x1 - x0, y1 - y0, px - x0, py - y0) < 0.0 {
            winding -= 1;
        }
    }
    winding
}

/// 2D cross product: `(ax * by - ay * bx)`.
#[inline]
fn cross_2d(ax: f64, ay: f64, bx: f64, by: f64) -> f64 {
    ax * by - ay * bx
}

/// Clips a line segment to a planar region (outer loop minus holes).
///
/// The segment and region must be coplanar with `plane`. Returns the
/// sub-segments lying inside the region or on its boundary as `(t_start, t_end)`
/// pairs, `t` being the parameter along the original segment in `[0, 1]`.
/// Degenerate (single point) contacts are not reported.
#[must_use]
pub fn clip_segment_to_region(
    seg_start: &Point3,
    seg_end: &Point3,
    outer: &[Point3],
    holes: &[Vec<Point3>],
    plane: &Plane,
    tol: f64,
) -> Vec<(f64, f64)> {
    if outer.len() < 3 {
        return Vec::new();
    }

    let s = project_to_uv(seg_start, plane);
    let e = project_to_uv(seg_end, plane);
    let du = e.x - s.x;
    let dv = e.y - s.y;
    let seg_len = du.hypot(dv);
    if seg_len < EPSILON {
        return Vec::new();
    }
    let t_tol = tol / seg_len;

    let outer_uv: Vec<Point2> = outer.iter().map(|p| project_to_uv(p, plane)).collect();
    let holes_uv: Vec<Vec<Point2>> = holes
        .iter()
        .map(|h| h.iter().map(|p| project_to_uv(p, plane)).collect())
        .collect();

    // Every t where the segment meets a loop edge.
    let mut cuts: Vec<f64> = vec![0.0, 1.0];
    for verts in std::iter::once(&outer_uv).chain(holes_uv.iter()) {
        let n = verts.len();
        for i in 0..n {
            let a = verts[i];
            let b = verts[(i + 1) % n];
            let edx = b.x - a.x;
            let edy = b.y - a.y;

            let cross = du * edy - dv * edx;
            if cross.abs() < EPSILON {
                // Collinear edge endpoints still split the segment.
                for q in [a, b] {
                    let t = ((q.x - s.x) * du + (q.y - s.y) * dv) / (seg_len * seg_len);
                    if (0.0..=1.0).contains(&t) {
                        cuts.push(t);
                    }
                }
                continue;
            }

            let dx = a.x - s.x;
            let dy = a.y - s.y;
            let t = (dx * edy - dy * edx) / cross;
            let u_edge = (dx * dv - dy * du) / cross;
            if t >= -t_tol && t <= 1.0 + t_tol && (-EPSILON..=1.0 + EPSILON).contains(&u_edge) {
                cuts.push(t.clamp(0.0, 1.0));
            }
        }
    }

    cuts.sort_by(f64::total_cmp);
    cuts.dedup_by(|a, b| (*a - *b).abs() < t_tol);

    let mut result: Vec<(f64, f64)> = Vec::new();
    for win in cuts.windows(2) {
        let (t0, t1) = (win[0], win[1]);
        if t1 - t0 < t_tol {
            continue;
        }
        let mid_t = (t0 + t1) * 0.5;
        let mid = Point2::new(s.x + du * mid_t, s.y + dv * mid_t);
        if classify_point_region_2d(&mid, &outer_uv, &holes_uv, tol) == PolygonContainment::Outside
        {
            continue;
        }
        if let Some(last) = result.last_mut() {
            if (t0 - last.1).abs() < t_tol {
                last.1 = t1;
                continue;
            }
        }
        result.push((t0, t1));
    }

    result
}

/// Newell normal of a closed polygon.
///
/// The length of the returned vector is twice the polygon's area; its
/// direction follows the right-hand rule over the vertex order.
#[must_use]
pub fn newell_normal(points: &[Point3]) -> Vector3 {
    let n = points.len();
    let mut normal = Vector3::zeros();
    if n < 3 {
        return normal;
    }
    for i in 0..n {
        let a = points[i];
        let b = points[(i + 1) % n];
        normal.x += (a.y - b.y) * (a.z + b.z);
        normal.y += (a.z - b.z) * (a.x + b.x);
        normal.z += (a.x - b.x) * (a.y + b.y);
    }
    normal
}

/// Compute the area of a 3D polygon (coplanar points).
///
/// Uses the cross-product summation method projected along the polygon normal.
#[must_use]
pub fn polygon_area_3d(points: &[Point3], normal: &Vector3) -> f64 {
    if points.len() < 3 {
        return 0.0;
    }
    let n = points.len();
    let mut cross_sum = Vector3::new(0.0, 0.0, 0.0);
    let o = &points[0];
    for i in 1..n {
        let a = points[i] - o;
        let b = points[(i + 1) % n] - o;
        cross_sum += a.cross(&b);
    }
    0.5 * cross_sum.dot(normal).abs()
}

/// Area-weighted centroid of a planar polygon.
///
/// Works for non-convex polygons by fanning signed triangles from the first
/// vertex. Falls back to the vertex average for degenerate input.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn polygon_centroid_3d(points: &[Point3]) -> Point3 {
    let n = points.len();
    if n == 0 {
        return Point3::origin();
    }
    let average = Point3::from(points.iter().map(|p| p.coords).sum::<Vector3>() / n as f64);
    if n < 3 {
        return average;
    }

    let normal = newell_normal(points);
    let len = normal.norm();
    if len < EPSILON {
        return average;
    }
    let unit = normal / len;

    let o = points[0];
    let mut weighted = Vector3::zeros();
    let mut total = 0.0;
    for i in 1..n - 1 {
        let a = points[i];
        let b = points[i + 1];
        let signed = 0.5 * (a - o).cross(&(b - o)).dot(&unit);
        let centre = (o.coords + a.coords + b.coords) / 3.0;
        weighted += centre * signed;
        total += signed;
    }
    if total.abs() < EPSILON {
        return average;
    }
    Point3::from(weighted / total)
}

/// Compute the 3D point along a segment at parameter `t`.
#[must_use]
pub fn segment_point_at(start: &Point3, end: &Point3, t: f64) -> Point3 {
    start + (end - start) * t
}
