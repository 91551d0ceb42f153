use crate::geometry::surface::Plane;

use super::{Point3, Vector3, EPSILON};

/// Where a line meets a plane.
#[derive(Debug)]
pub enum LinePlaneRelation {
    /// A single crossing at `origin + t * dir`.
    Point { point: Point3, t: f64 },
    /// Parallel and off the plane.
    Parallel,
    /// Parallel and within tolerance of the plane.
    OnPlane,
}

/// Intersects the line `origin + t * dir` with `plane`.
///
/// `dir` need not be unit length, so `t` is in units of `dir`; passing
/// `end - start` gives `t` in `[0, 1]` along a segment. The line is parallel
/// when `dir` has no component along the normal beyond `EPSILON` (scaled by
/// its length), and lies on the plane when `origin` is within `tol` of it.
#[must_use]
pub fn line_plane_intersect(
    origin: &Point3,
    dir: &Vector3,
    plane: &Plane,
    tol: f64,
) -> LinePlaneRelation {
    let normal = plane.plane_normal();
    let along = normal.dot(dir);
    let offset = signed_distance_to_plane(origin, plane);

    if along.abs() < EPSILON * dir.norm().max(1.0) {
        return if offset.abs() < tol {
            LinePlaneRelation::OnPlane
        } else {
            LinePlaneRelation::Parallel
        };
    }
    let t = -offset / along;
    LinePlaneRelation::Point {
        point: origin + dir * t,
        t,
    }
}

/// Signed distance from `point` to `plane`, positive on the normal side.
#[must_use]
pub fn signed_distance_to_plane(point: &Point3, plane: &Plane) -> f64 {
    plane.plane_normal().dot(&(point - plane.origin()))
}
