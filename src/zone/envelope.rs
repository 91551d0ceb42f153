use tracing::{debug, warn};

use crate::error::Result;
use crate::math::Vector3;
use crate::operations::query::{classify_point_in_solid, FaceProperties, PointClassification};
use crate::tessellation::Facet;
use crate::topology::{FaceId, TopologyStore};

use super::component::{EnvelopeComponent, Role};

/// Role of a boundary face with unit outward normal `normal`.
///
/// Floors face straight down (within `tol`); faces closer than
/// `roof_angle_deg` to +Z are roofs; everything else, including downward
/// tilted soffits, is a wall.
#[must_use]
pub fn role_for_normal(normal: &Vector3, tol: f64, roof_angle_deg: f64) -> Role {
    if (normal.dot(&-Vector3::z()) - 1.0).abs() < tol {
        return Role::Floor;
    }
    let angle = normal.z.clamp(-1.0, 1.0).acos().to_degrees();
    if angle < roof_angle_deg {
        Role::Roof
    } else {
        Role::Wall
    }
}

/// One component per boundary face, in shell order.
#[must_use]
pub fn classify_faces(faces: &[FaceProperties], tol: f64, roof_angle_deg: f64) -> Vec<EnvelopeComponent> {
    faces
        .iter()
        .map(|props| {
            let role = role_for_normal(&props.normal, tol, roof_angle_deg);
            debug!(index = props.index, ?role, normal = ?props.normal, "classified face");
            EnvelopeComponent::new(role, props.face, Some(props.solid))
        })
        .collect()
}

/// Returns `true` if every vertex of `insert` lies inside the zone or on its
/// boundary. `boundary` must be the tessellation of the zone solid.
///
/// # Errors
///
/// Returns an error if the insert face cannot be read.
pub fn accept_floor_insert(
    store: &TopologyStore,
    insert: FaceId,
    boundary: &[Facet],
    tol: f64,
) -> Result<bool> {
    for point in store.face_points(insert)? {
        if classify_point_in_solid(&point, boundary, tol) == PointClassification::Outside {
            warn!(?insert, ?point, "floor insert leaves the zone; rejected");
            return Ok(false);
        }
    }
    Ok(true)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::math::Point3;
    use crate::operations::creation::{MakeBox, MakePolygon};
    use crate::tessellation::{TessellateSolid, TessellationParams};

    const TOL: f64 = 1e-3;

    #[test]
    fn roles_by_normal() {
        assert_eq!(role_for_normal(&-Vector3::z(), TOL, 45.0), Role::Floor);
        assert_eq!(role_for_normal(&Vector3::z(), TOL, 45.0), Role::Roof);
        assert_eq!(role_for_normal(&Vector3::x(), TOL, 45.0), Role::Wall);

        let pitched = Vector3::new(0.5, 0.0, 1.0).normalize();
        assert_eq!(role_for_normal(&pitched, TOL, 45.0), Role::Roof);
        let steep = Vector3::new(1.5, 0.0, 1.0).normalize();
        assert_eq!(role_for_normal(&steep, TOL, 45.0), Role::Wall);
        let soffit = Vector3::new(0.3, 0.0, -1.0).normalize();
        assert_eq!(role_for_normal(&soffit, TOL, 45.0), Role::Wall);
    }

    #[test]
    fn nearly_flat_floor_uses_tolerance() {
        let almost = Vector3::new(0.01, 0.0, -1.0).normalize();
        assert_eq!(role_for_normal(&almost, TOL, 45.0), Role::Floor);
        let tilted = Vector3::new(0.1, 0.0, -1.0).normalize();
        assert_eq!(role_for_normal(&tilted, TOL, 45.0), Role::Wall);
    }

    #[test]
    fn floor_inserts() {
        let mut store = TopologyStore::new();
        let p = |x: f64, y: f64, z: f64| Point3::new(x, y, z);
        let solid = MakeBox::new(p(0.0, 0.0, 0.0), p(4.0, 4.0, 6.0)).execute(&mut store).unwrap();
        let boundary = TessellateSolid::new(solid, TessellationParams::default()).execute(&store).unwrap();

        let slab = MakePolygon::new(vec![p(0.0, 0.0, 3.0), p(4.0, 0.0, 3.0), p(4.0, 4.0, 3.0), p(0.0, 4.0, 3.0)])
            .execute(&mut store)
            .unwrap();
        assert!(accept_floor_insert(&store, slab, &boundary, TOL).unwrap());

        let balcony = MakePolygon::new(vec![p(0.0, 0.0, 3.0), p(5.0, 0.0, 3.0), p(5.0, 4.0, 3.0), p(0.0, 4.0, 3.0)])
            .execute(&mut store)
            .unwrap();
        assert!(!accept_floor_insert(&store, balcony, &boundary, TOL).unwrap());
    }
}
