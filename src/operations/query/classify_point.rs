use crate::math::distance_2d::point_to_segment_dist;
use crate::math::intersect_3d::{line_plane_intersect, LinePlaneRelation};
use crate::math::polygon_3d::{classify_point_polygon_3d, project_to_uv, PolygonContainment};
use crate::math::{Point3, Vector3};
use crate::tessellation::Facet;

/// Classification of a point relative to a solid.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointClassification {
    Inside,
    Outside,
    OnBoundary,
}

/// Ray directions tried in turn. None is axis-aligned, so rays through the
/// interior of a box-like zone rarely graze an edge.
const RAY_DIRECTIONS: [[f64; 3]; 6] = [
    [0.872, 0.361, 0.331],
    [-0.293, 0.903, 0.314],
    [0.182, -0.411, 0.893],
    [-0.667, -0.581, -0.466],
    [0.517, -0.739, -0.432],
    [-0.844, 0.137, -0.519],
];

/// Classifies a point as inside, outside, or on the boundary of the solid
/// bounded by `facets`.
///
/// A point within `tol` of some facet is on the boundary. Otherwise a ray is
/// shot from the point and facet crossings are counted: odd means inside. A
/// ray that grazes a facet edge or runs inside a facet plane is degenerate
/// and the next direction is tried.
#[must_use]
pub fn classify_point_in_solid(point: &Point3, facets: &[Facet], tol: f64) -> PointClassification {
    for facet in facets {
        if facet.plane.distance_to(point) <= tol
            && classify_point_polygon_3d(point, &facet.outer, &facet.holes, &facet.plane, tol)
                != PolygonContainment::Outside
        {
            return PointClassification::OnBoundary;
        }
    }

    for dir in RAY_DIRECTIONS {
        let dir = Vector3::new(dir[0], dir[1], dir[2]).normalize();
        if let RayCastResult::Clear(classification) = ray_cast_classify(point, &dir, facets, tol) {
            return classification;
        }
    }

    // Every direction grazed something; treat as outside.
    PointClassification::Outside
}

enum RayCastResult {
    Clear(PointClassification),
    Degenerate,
}

fn ray_cast_classify(point: &Point3, dir: &Vector3, facets: &[Facet], tol: f64) -> RayCastResult {
    let mut crossings = 0u32;

    for facet in facets {
        match line_plane_intersect(point, dir, &facet.plane, tol) {
            LinePlaneRelation::Point { point: hit, t } => {
                if t <= tol {
                    continue;
                }
                match classify_point_polygon_3d(&hit, &facet.outer, &facet.holes, &facet.plane, tol) {
                    PolygonContainment::Outside => {}
                    PolygonContainment::OnBoundary => return RayCastResult::Degenerate,
                    PolygonContainment::Inside => {
                        if is_near_facet_edge(&hit, facet, tol) {
                            return RayCastResult::Degenerate;
                        }
                        crossings += 1;
                    }
                }
            }
            LinePlaneRelation::OnPlane => return RayCastResult::Degenerate,
            LinePlaneRelation::Parallel => {}
        }
    }

    if crossings % 2 == 1 {
        RayCastResult::Clear(PointClassification::Inside)
    } else {
        RayCastResult::Clear(PointClassification::Outside)
    }
}

/// Hits within a few tolerances of an edge are too close to call, even when
/// the polygon test says inside.
fn is_near_facet_edge(point: &Point3, facet: &Facet, tol: f64) -> bool {
    let edge_tol = tol * 10.0;
    let uv = project_to_uv(point, &facet.plane);
    std::iter::once(&facet.outer).chain(&facet.holes).any(|ring| {
        let n = ring.len();
        (0..n).any(|i| {
            let a = project_to_uv(&ring[i], &facet.plane);
            let b = project_to_uv(&ring[(i + 1) % n], &facet.plane);
            point_to_segment_dist(uv.x, uv.y, a.x, a.y, b.x, b.y) < edge_tol
        })
    })
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::operations::creation::{MakeBox, MakePrism};
    use crate::tessellation::{TessellateSolid, TessellationParams};
    use crate::topology::TopologyStore;

    const TOL: f64 = 1e-3;

    fn p(x: f64, y: f64, z: f64) -> Point3 {
        Point3::new(x, y, z)
    }

    fn box_facets() -> Vec<Facet> {
        let mut store = TopologyStore::new();
        let solid = MakeBox::new(p(0.0, 0.0, 0.0), p(2.0, 2.0, 2.0)).execute(&mut store).unwrap();
        TessellateSolid::new(solid, TessellationParams::default()).execute(&store).unwrap()
    }

    #[test]
    fn center_is_inside() {
        assert_eq!(classify_point_in_solid(&p(1.0, 1.0, 1.0), &box_facets(), TOL), PointClassification::Inside);
    }

    #[test]
    fn far_point_is_outside() {
        assert_eq!(classify_point_in_solid(&p(5.0, 1.0, 1.0), &box_facets(), TOL), PointClassification::Outside);
    }

    #[test]
    fn face_edge_and_vertex_are_on_boundary() {
        let facets = box_facets();
        for q in [p(1.0, 1.0, 2.0), p(2.0, 1.0, 0.0), p(0.0, 0.0, 0.0), p(1.0, 1.0, 2.0005)] {
            assert_eq!(classify_point_in_solid(&q, &facets, TOL), PointClassification::OnBoundary);
        }
    }

    #[test]
    fn notch_of_l_prism_is_outside() {
        let mut store = TopologyStore::new();
        let footprint = vec![
            p(0.0, 0.0, 0.0),
            p(4.0, 0.0, 0.0),
            p(4.0, 2.0, 0.0),
            p(2.0, 2.0, 0.0),
            p(2.0, 4.0, 0.0),
            p(0.0, 4.0, 0.0),
        ];
        let solid = MakePrism::new(footprint, Vector3::new(0.0, 0.0, 3.0)).execute(&mut store).unwrap();
        let facets = TessellateSolid::new(solid, TessellationParams::default()).execute(&store).unwrap();
        assert_eq!(classify_point_in_solid(&p(3.0, 3.0, 1.5), &facets, TOL), PointClassification::Outside);
        assert_eq!(classify_point_in_solid(&p(1.0, 3.0, 1.5), &facets, TOL), PointClassification::Inside);
    }
}
