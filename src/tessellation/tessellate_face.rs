use std::f64::consts::{PI, TAU};

use crate::error::Result;
use crate::geometry::curve::Curve;
use crate::geometry::surface::{Cylinder, Plane, Surface};
use crate::math::{Point3, EPSILON};
use crate::topology::{EdgeCurve, FaceId, FaceSurface, TopologyStore, WireId};

use super::{Facet, TessellationParams};

/// Approximates a face by planar facets.
///
/// Planar faces become a single facet whose loops are the face wires with
/// arcs sampled. Cylindrical faces become a row of quads over the face's
/// angular range; the surface is ruled along its axis so one row is exact.
pub struct TessellateFace {
    face: FaceId,
    params: TessellationParams,
}

impl TessellateFace {
    /// Creates a new `TessellateFace` operation.
    #[must_use]
    pub fn new(face: FaceId, params: TessellationParams) -> Self {
        Self { face, params }
    }

    /// Executes the tessellation, returning the facets of the face.
    ///
    /// # Errors
    ///
    /// Returns an error if the face or its wires cannot be read, or a facet
    /// is degenerate.
    pub fn execute(&self, store: &TopologyStore) -> Result<Vec<Facet>> {
        let face = store.face(self.face)?;
        match &face.surface {
            FaceSurface::Plane(plane) => {
                let plane = if face.same_sense {
                    plane.clone()
                } else {
                    plane.flipped()
                };
                let outer = collect_wire_points_tessellated(store, face.outer_wire, &self.params)?;
                let holes = face
                    .inner_wires
                    .iter()
                    .map(|&wire| collect_wire_points_tessellated(store, wire, &self.params))
                    .collect::<Result<Vec<_>>>()?;
                Ok(vec![Facet {
                    face: self.face,
                    plane,
                    outer,
                    holes,
                }])
            }
            FaceSurface::Cylinder(cyl) => {
                let outer = collect_wire_points_tessellated(store, face.outer_wire, &self.params)?;
                cylinder_facets(self.face, cyl, &outer, face.same_sense, &self.params)
            }
        }
    }
}

/// Splits the patch of `cyl` spanned by `boundary` into quads.
fn cylinder_facets(
    face: FaceId,
    cyl: &Cylinder,
    boundary: &[Point3],
    same_sense: bool,
    params: &TessellationParams,
) -> Result<Vec<Facet>> {
    let (v_min, v_max) = compute_v_bounds(boundary, |p| cyl.closest_parameter(p));
    let (u_min, u_max) = compute_unwrapped_u_bounds(boundary, |p| cyl.closest_parameter(p));
    if v_max - v_min < EPSILON || u_max - u_min < EPSILON {
        return Ok(Vec::new());
    }

    let n_u = adaptive_angular_segments(cyl.radius(), u_max - u_min, params);
    let mut facets = Vec::with_capacity(n_u);
    for iu in 0..n_u {
        #[allow(clippy::cast_precision_loss)]
        let u0 = u_min + (u_max - u_min) * iu as f64 / n_u as f64;
        #[allow(clippy::cast_precision_loss)]
        let u1 = u_min + (u_max - u_min) * (iu + 1) as f64 / n_u as f64;

        let mut quad = vec![
            cyl.evaluate(u0, v_min)?,
            cyl.evaluate(u1, v_min)?,
            cyl.evaluate(u1, v_max)?,
            cyl.evaluate(u0, v_max)?,
        ];
        if !same_sense {
            quad.reverse();
        }
        facets.push(Facet {
            face,
            plane: Plane::from_polygon(&quad)?,
            outer: quad,
            holes: Vec::new(),
        });
    }
    Ok(facets)
}

/// Computes u-bounds by unwrapping `atan2` values along the wire boundary.
///
/// `closest_parameter` returns `u` via `atan2`, which jumps at ±π. Tracking
/// cumulative angular deltas gives a continuous `(u_min, u_max)` range, also
/// for sweeps beyond π.
fn compute_unwrapped_u_bounds(
    points: &[Point3],
    inverse: impl Fn(&Point3) -> (f64, f64),
) -> (f64, f64) {
    let Some(first) = points.first() else {
        return (0.0, 0.0);
    };

    let (first_u, _) = inverse(first);
    let mut u_min = first_u;
    let mut u_max = first_u;
    let mut prev_raw = first_u;
    let mut running = first_u;

    for p in &points[1..] {
        let (raw_u, _) = inverse(p);
        let mut delta = raw_u - prev_raw;
        if delta > PI {
            delta -= TAU;
        } else if delta < -PI {
            delta += TAU;
        }
        running += delta;
        u_min = u_min.min(running);
        u_max = u_max.max(running);
        prev_raw = raw_u;
    }

    (u_min, u_max)
}

fn compute_v_bounds(points: &[Point3], inverse: impl Fn(&Point3) -> (f64, f64)) -> (f64, f64) {
    points
        .iter()
        .map(|p| inverse(p).1)
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| (lo.min(v), hi.max(v)))
}

/// Number of chords for an angular range so that chord error stays within
/// the tolerance.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn adaptive_angular_segments(radius: f64, sweep: f64, params: &TessellationParams) -> usize {
    if radius > params.tolerance {
        let half_angle = (1.0 - params.tolerance / radius).acos();
        let computed = (sweep.abs() / (2.0 * half_angle)).ceil() as usize;
        computed.clamp(params.min_segments, params.max_segments)
    } else {
        params.min_segments
    }
}

/// Collects 3D points from a wire, sampling arcs into polylines.
///
/// Line edges contribute their start point only; arcs contribute every
/// sample except the last, which is the next edge's start.
fn collect_wire_points_tessellated(
    store: &TopologyStore,
    wire_id: WireId,
    params: &TessellationParams,
) -> Result<Vec<Point3>> {
    let wire = store.wire(wire_id)?;
    let mut points = Vec::new();

    for oe in &wire.edges {
        let edge = store.edge(oe.edge)?;
        let (t_start, t_end) = if oe.forward {
            (edge.t_start, edge.t_end)
        } else {
            (edge.t_end, edge.t_start)
        };

        match &edge.curve {
            EdgeCurve::Line(line) => points.push(line.evaluate(t_start)?),
            EdgeCurve::Arc(arc) => {
                let n = adaptive_angular_segments(arc.radius(), t_end - t_start, params);
                let samples = arc.sample(t_start, t_end, n)?;
                points.extend_from_slice(&samples[..n]);
            }
        }
    }

    Ok(points)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::operations::creation::MakePolygon;
    use crate::zone::fixtures::half_cylinder_prism;
    use approx::assert_relative_eq;

    #[test]
    fn planar_face_is_one_facet() {
        let mut store = TopologyStore::new();
        let face = MakePolygon::new(vec![
            Point3::new(0.0, 0.0, 1.0),
            Point3::new(2.0, 0.0, 1.0),
            Point3::new(2.0, 2.0, 1.0),
            Point3::new(0.0, 2.0, 1.0),
        ])
        .execute(&mut store)
        .unwrap();

        let facets = TessellateFace::new(face, TessellationParams::default())
            .execute(&store)
            .unwrap();
        assert_eq!(facets.len(), 1);
        assert_eq!(facets[0].outer.len(), 4);
        assert_relative_eq!(*facets[0].plane.plane_normal(), crate::math::Vector3::z(), epsilon = 1e-12);
    }

    #[test]
    fn arc_edges_are_sampled() {
        let mut store = TopologyStore::new();
        let prism = half_cylinder_prism(&mut store, 2.0);
        let bottom = store.solid_faces(prism).unwrap()[0];
        let facets = TessellateFace::new(bottom, TessellationParams::default())
            .execute(&store)
            .unwrap();
        // One line vertex plus twelve arc chords' start points.
        assert_eq!(facets[0].outer.len(), 13);
    }

    #[test]
    fn cylinder_face_becomes_outward_quads() {
        let mut store = TopologyStore::new();
        let prism = half_cylinder_prism(&mut store, 2.0);
        let curved = store.solid_faces(prism).unwrap()[3];
        let facets = TessellateFace::new(curved, TessellationParams::default())
            .execute(&store)
            .unwrap();
        assert_eq!(facets.len(), 12);
        for facet in &facets {
            let centre = facet.outer.iter().map(|p| p.coords).sum::<crate::math::Vector3>() / 4.0;
            let radial = crate::math::Vector3::new(centre.x, centre.y, 0.0);
            assert!(facet.plane.plane_normal().dot(&radial) > 0.0);
        }
    }

    #[test]
    fn unwrapping_crosses_the_seam() {
        let pts: Vec<Point3> = [3.0, -3.0, -2.5]
            .iter()
            .map(|a: &f64| Point3::new(a.cos(), a.sin(), 0.0))
            .collect();
        let (lo, hi) = compute_unwrapped_u_bounds(&pts, |p| (p.y.atan2(p.x), 0.0));
        assert_relative_eq!(lo, 3.0, epsilon = 1e-12);
        assert_relative_eq!(hi, TAU - 2.5, epsilon = 1e-12);
    }
}
