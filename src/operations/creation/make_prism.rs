use crate::error::{OperationError, Result};
use crate::math::polygon_3d::newell_normal;
use crate::math::{Point3, Vector3, EPSILON};
use crate::topology::{SolidId, TopologyStore};

use super::MakePolyhedron;

/// Extrudes a planar footprint polygon along a direction to create a solid.
///
/// The footprint may be wound either way and may be non-convex (e.g. an
/// L-shaped floor plan). The bottom face comes first, then the top face,
/// then one side face per footprint edge.
pub struct MakePrism {
    footprint: Vec<Point3>,
    direction: Vector3,
}

impl MakePrism {
    /// Creates a new `MakePrism` operation.
    #[must_use]
    pub fn new(footprint: Vec<Point3>, direction: Vector3) -> Self {
        Self {
            footprint,
            direction,
        }
    }

    /// Executes the extrusion, creating the solid in the topology store.
    ///
    /// # Errors
    ///
    /// Returns [`OperationError::InvalidInput`] if the direction is zero-length,
    /// lies in the footprint plane, or the footprint is degenerate.
    pub fn execute(&self, store: &mut TopologyStore) -> Result<SolidId> {
        if self.footprint.len() < 3 || self.direction.norm() < EPSILON {
            return Err(OperationError::InvalidInput(
                "prism needs a footprint of 3+ points and a non-zero direction".into(),
            )
            .into());
        }

        let normal = newell_normal(&self.footprint);
        let along = normal.dot(&self.direction);
        if along.abs() < EPSILON {
            return Err(OperationError::InvalidInput(
                "extrusion direction lies in the footprint plane".into(),
            )
            .into());
        }

        // Orient the base so its normal agrees with the direction. Then the
        // reversed base faces away from the prism, the translated base faces
        // along it, and the side quads face outward.
        let base: Vec<Point3> = if along > 0.0 {
            self.footprint.clone()
        } else {
            self.footprint.iter().rev().copied().collect()
        };
        let top: Vec<Point3> = base.iter().map(|p| p + self.direction).collect();

        let n = base.len();
        let mut polygons = Vec::with_capacity(n + 2);
        polygons.push(base.iter().rev().copied().collect());
        polygons.push(top.clone());
        for i in 0..n {
            let j = (i + 1) % n;
            polygons.push(vec![base[i], base[j], top[j], top[i]]);
        }

        MakePolyhedron::new(polygons).execute(store)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn prism_face_count() {
        let mut store = TopologyStore::new();
        let footprint = vec![
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(4.0, 0.0, 0.0),
            Point3::new(4.0, 2.0, 0.0),
            Point3::new(2.0, 2.0, 0.0),
            Point3::new(2.0, 4.0, 0.0),
            Point3::new(0.0, 4.0, 0.0),
        ];
        let solid = MakePrism::new(footprint, Vector3::new(0.0, 0.0, 3.0))
            .execute(&mut store)
            .unwrap();
        assert_eq!(store.solid_faces(solid).unwrap().len(), 8);
    }

    #[test]
    fn in_plane_direction_rejected() {
        let mut store = TopologyStore::new();
        let footprint = vec![
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(1.0, 0.0, 0.0),
            Point3::new(1.0, 1.0, 0.0),
        ];
        assert!(MakePrism::new(footprint, Vector3::x()).execute(&mut store).is_err());
    }
}
