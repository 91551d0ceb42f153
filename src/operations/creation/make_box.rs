use crate::error::{OperationError, Result};
use crate::math::Point3;
use crate::topology::{SolidId, TopologyStore};

use super::MakePolyhedron;

/// Creates an axis-aligned box solid from two corner points.
///
/// Faces are created in the order bottom, top, front (min y), back (max y),
/// left (min x), right (max x), all with outward normals.
pub struct MakeBox {
    min_corner: Point3,
    max_corner: Point3,
}

impl MakeBox {
    /// Creates a new `MakeBox` operation.
    #[must_use]
    pub fn new(min_corner: Point3, max_corner: Point3) -> Self {
        Self {
            min_corner,
            max_corner,
        }
    }

    /// Executes the operation, creating the box in the topology store.
    ///
    /// # Errors
    ///
    /// Returns [`OperationError::InvalidInput`] if the box has no extent along
    /// some axis.
    pub fn execute(&self, store: &mut TopologyStore) -> Result<SolidId> {
        let (lo, hi) = (self.min_corner, self.max_corner);
        if hi.x <= lo.x || hi.y <= lo.y || hi.z <= lo.z {
            return Err(OperationError::InvalidInput(format!(
                "box corners {lo} and {hi} do not span a volume"
            ))
            .into());
        }

        let p = |x: f64, y: f64, z: f64| Point3::new(x, y, z);
        let faces = vec![
            vec![p(lo.x, lo.y, lo.z), p(lo.x, hi.y, lo.z), p(hi.x, hi.y, lo.z), p(hi.x, lo.y, lo.z)],
            vec![p(lo.x, lo.y, hi.z), p(hi.x, lo.y, hi.z), p(hi.x, hi.y, hi.z), p(lo.x, hi.y, hi.z)],
            vec![p(lo.x, lo.y, lo.z), p(hi.x, lo.y, lo.z), p(hi.x, lo.y, hi.z), p(lo.x, lo.y, hi.z)],
            vec![p(lo.x, hi.y, lo.z), p(lo.x, hi.y, hi.z), p(hi.x, hi.y, hi.z), p(hi.x, hi.y, lo.z)],
            vec![p(lo.x, lo.y, lo.z), p(lo.x, lo.y, hi.z), p(lo.x, hi.y, hi.z), p(lo.x, hi.y, lo.z)],
            vec![p(hi.x, lo.y, lo.z), p(hi.x, hi.y, lo.z), p(hi.x, hi.y, hi.z), p(hi.x, lo.y, hi.z)],
        ];
        MakePolyhedron::new(faces).execute(store)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::math::polygon_3d::polygon_centroid_3d;

    #[test]
    fn box_faces_point_outward() {
        let mut store = TopologyStore::new();
        let solid = MakeBox::new(Point3::new(0.0, 0.0, 0.0), Point3::new(2.0, 3.0, 4.0))
            .execute(&mut store)
            .unwrap();
        let centre = Point3::new(1.0, 1.5, 2.0);

        let faces = store.solid_faces(solid).unwrap().to_vec();
        assert_eq!(faces.len(), 6);
        for face in faces {
            let points = store.face_points(face).unwrap();
            let plane = store.face(face).unwrap().surface.as_plane().unwrap().clone();
            let outward = polygon_centroid_3d(&points) - centre;
            assert!(plane.plane_normal().dot(&outward) > 0.0);
        }
    }

    #[test]
    fn flat_box_rejected() {
        let mut store = TopologyStore::new();
        let r = MakeBox::new(Point3::new(0.0, 0.0, 0.0), Point3::new(2.0, 3.0, 0.0)).execute(&mut store);
        assert!(r.is_err());
    }
}
