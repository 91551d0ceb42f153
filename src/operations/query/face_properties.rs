use crate::error::Result;
use crate::geometry::surface::Plane;
use crate::math::polygon_3d::{lift_from_uv, polygon_area_3d, polygon_centroid_3d, project_to_uv};
use crate::math::{Point2, Point3, Vector3, EPSILON};
use crate::tessellation::{triangulate_polygon, Facet};
use crate::topology::{FaceId, SolidId, TopologyStore};

use super::classify_point::{classify_point_in_solid, PointClassification};
use super::volume::facet_area;

/// Derived geometric properties of one boundary face.
#[derive(Debug, Clone)]
pub struct FaceProperties {
    /// Position of the face within the solid's outer shell.
    pub index: usize,
    /// The face.
    pub face: FaceId,
    /// The solid whose boundary the face belongs to.
    pub solid: SolidId,
    /// Supporting plane oriented along the outward normal, if planar.
    pub plane: Option<Plane>,
    /// Area-weighted centroid.
    pub centroid: Point3,
    /// Unit outward normal at the surface point closest to the centroid.
    pub normal: Vector3,
    /// Face area.
    pub area: f64,
}

/// Computes [`FaceProperties`] for every face of `solid`, in shell order.
///
/// `facets` must be the tessellation of `solid`. The normal is taken from the
/// surface at the parameter closest to the centroid and oriented by the face's
/// `same_sense` flag; a point just outside the face is then probed, and the
/// normal flipped if that point lies inside the solid. The probe assumes the
/// solid is closed.
///
/// # Errors
///
/// Returns an error if the solid, a face, or a surface normal cannot be read.
pub fn face_properties(
    store: &TopologyStore,
    solid: SolidId,
    facets: &[Facet],
    tol: f64,
) -> Result<Vec<FaceProperties>> {
    let faces = store.solid_faces(solid)?;
    let mut properties = Vec::with_capacity(faces.len());

    for (index, &face_id) in faces.iter().enumerate() {
        let face = store.face(face_id)?;
        let own: Vec<&Facet> = facets.iter().filter(|f| f.face == face_id).collect();

        let area: f64 = own.iter().map(|f| facet_area(f)).sum();
        let centroid = if area > EPSILON {
            let weighted: Vector3 = own
                .iter()
                .map(|f| facet_centroid(f).coords * facet_area(f))
                .sum();
            Point3::from(weighted / area)
        } else {
            polygon_centroid_3d(&store.face_points(face_id)?)
        };

        let surface = face.surface.as_surface();
        let (u, v) = surface.closest_parameter(&centroid);
        let mut normal = surface.normal(u, v)?;
        if !face.same_sense {
            normal = -normal;
        }
        if facets_point_inward(&own, facets, tol) {
            normal = -normal;
        }

        let plane = face.surface.as_plane().map(|plane| {
            if plane.plane_normal().dot(&normal) < 0.0 {
                plane.flipped()
            } else {
                plane.clone()
            }
        });

        properties.push(FaceProperties {
            index,
            face: face_id,
            solid,
            plane,
            centroid,
            normal,
            area,
        });
    }

    Ok(properties)
}

/// Area-weighted centroid of a facet, holes subtracted.
fn facet_centroid(facet: &Facet) -> Point3 {
    let normal = facet.plane.plane_normal();
    let outer_area = polygon_area_3d(&facet.outer, normal);
    let mut weighted = polygon_centroid_3d(&facet.outer).coords * outer_area;
    let mut total = outer_area;
    for hole in &facet.holes {
        let a = polygon_area_3d(hole, normal);
        weighted -= polygon_centroid_3d(hole).coords * a;
        total -= a;
    }
    if total.abs() < EPSILON {
        return polygon_centroid_3d(&facet.outer);
    }
    Point3::from(weighted / total)
}

/// Probes just off the largest facet of a face along its oriented normal.
fn facets_point_inward(own: &[&Facet], all: &[Facet], tol: f64) -> bool {
    let Some(largest) = own
        .iter()
        .max_by(|a, b| facet_area(a).total_cmp(&facet_area(b)))
    else {
        return false;
    };
    let Some(seed) = interior_point(largest) else {
        return false;
    };
    let probe = seed + largest.plane.plane_normal() * (tol * 10.0);
    classify_point_in_solid(&probe, all, tol) == PointClassification::Inside
}

/// A point strictly inside a facet: the centroid of its largest triangle.
fn interior_point(facet: &Facet) -> Option<Point3> {
    let outer: Vec<Point2> = facet.outer.iter().map(|p| project_to_uv(p, &facet.plane)).collect();
    let holes: Vec<Vec<Point2>> = facet
        .holes
        .iter()
        .map(|h| h.iter().map(|p| project_to_uv(p, &facet.plane)).collect())
        .collect();
    let triangles = triangulate_polygon(&outer, &holes).ok()?;
    let best = triangles.iter().max_by(|a, b| triangle_area(a).total_cmp(&triangle_area(b)))?;
    let centre = Point2::from((best[0].coords + best[1].coords + best[2].coords) / 3.0);
    Some(lift_from_uv(&centre, &facet.plane))
}

fn triangle_area(t: &[Point2; 3]) -> f64 {
    let ab = t[1] - t[0];
    let ac = t[2] - t[0];
    0.5 * (ab.x * ac.y - ab.y * ac.x).abs()
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::operations::creation::{MakeBox, MakeFace, MakeShell, MakeSolid, MakeWire};
    use crate::tessellation::{TessellateSolid, TessellationParams};
    use crate::zone::fixtures::half_cylinder_prism;
    use approx::assert_relative_eq;

    const TOL: f64 = 1e-3;

    fn p(x: f64, y: f64, z: f64) -> Point3 {
        Point3::new(x, y, z)
    }

    fn props(store: &TopologyStore, solid: SolidId) -> Vec<FaceProperties> {
        let facets = TessellateSolid::new(solid, TessellationParams::default()).execute(store).unwrap();
        face_properties(store, solid, &facets, TOL).unwrap()
    }

    #[test]
    fn box_faces() {
        let mut store = TopologyStore::new();
        let solid = MakeBox::new(p(0.0, 0.0, 0.0), p(4.0, 4.0, 3.0)).execute(&mut store).unwrap();
        let props = props(&store, solid);
        assert_eq!(props.len(), 6);

        let bottom = &props[0];
        assert_eq!(bottom.index, 0);
        assert_eq!(bottom.solid, solid);
        assert_relative_eq!(bottom.area, 16.0, epsilon = 1e-9);
        assert_relative_eq!(bottom.centroid, p(2.0, 2.0, 0.0), epsilon = 1e-9);
        assert_relative_eq!(bottom.normal, -Vector3::z(), epsilon = 1e-9);

        let front = &props[2];
        assert_relative_eq!(front.area, 12.0, epsilon = 1e-9);
        assert_relative_eq!(front.normal, -Vector3::y(), epsilon = 1e-9);
    }

    #[test]
    fn inward_wound_face_is_flipped() {
        let mut store = TopologyStore::new();
        let box_solid = MakeBox::new(p(0.0, 0.0, 0.0), p(1.0, 1.0, 1.0)).execute(&mut store).unwrap();
        let mut faces = store.solid_faces(box_solid).unwrap().to_vec();

        // Replace the top with a clockwise (inward) copy.
        let wire = MakeWire::new(
            vec![p(0.0, 0.0, 1.0), p(0.0, 1.0, 1.0), p(1.0, 1.0, 1.0), p(1.0, 0.0, 1.0)],
            true,
        )
        .execute(&mut store)
        .unwrap();
        faces[1] = MakeFace::new(wire, vec![]).execute(&mut store).unwrap();
        let shell = MakeShell::new(faces).execute(&mut store).unwrap();
        let solid = MakeSolid::new(shell, vec![]).execute(&mut store).unwrap();

        let top = &props(&store, solid)[1];
        assert_relative_eq!(top.normal, Vector3::z(), epsilon = 1e-9);
        assert_relative_eq!(*top.plane.as_ref().unwrap().plane_normal(), Vector3::z(), epsilon = 1e-9);
    }

    #[test]
    fn curved_face_normal_is_radial() {
        let mut store = TopologyStore::new();
        let solid = half_cylinder_prism(&mut store, 2.0);
        let curved = &props(&store, solid)[3];
        assert!(curved.plane.is_none());
        assert!(curved.normal.y > 0.99);
        assert_relative_eq!(curved.area, std::f64::consts::PI * 2.0, max_relative = 0.01);
    }
}
