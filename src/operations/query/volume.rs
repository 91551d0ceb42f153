use crate::error::Result;
use crate::math::polygon_3d::polygon_area_3d;
use crate::tessellation::{Facet, TessellateSolid, TessellationParams};
use crate::topology::{SolidId, TopologyStore};

/// Computes the volume of a solid.
///
/// Applies the divergence theorem to the solid's facets: each planar facet
/// contributes `(n . p) * A / 3` for its oriented unit normal `n`, any point
/// `p` on it, and its area `A` (outer loop minus holes). Exact for polyhedral
/// solids; curved faces are approximated by their facets.
pub struct Volume {
    solid: SolidId,
    params: TessellationParams,
}

impl Volume {
    /// Creates a new `Volume` query with default tessellation parameters.
    #[must_use]
    pub fn new(solid: SolidId) -> Self {
        Self {
            solid,
            params: TessellationParams::default(),
        }
    }

    /// Sets custom tessellation parameters for curved faces.
    #[must_use]
    pub fn with_params(mut self, params: TessellationParams) -> Self {
        self.params = params;
        self
    }

    /// Executes the query, returning the volume (absolute value).
    ///
    /// # Errors
    ///
    /// Returns an error if the solid cannot be tessellated.
    pub fn execute(&self, store: &TopologyStore) -> Result<f64> {
        let facets = TessellateSolid::new(self.solid, self.params).execute(store)?;
        Ok(facets_volume(&facets))
    }
}

/// Signed volume enclosed by oriented facets, returned as an absolute value.
#[must_use]
pub fn facets_volume(facets: &[Facet]) -> f64 {
    let signed: f64 = facets
        .iter()
        .filter_map(|facet| {
            let first = facet.outer.first()?;
            let normal = facet.plane.plane_normal();
            Some(normal.dot(&first.coords) * facet_area(facet))
        })
        .sum();
    signed.abs() / 3.0
}

/// Area of a facet: outer loop minus holes.
#[must_use]
pub fn facet_area(facet: &Facet) -> f64 {
    let normal = facet.plane.plane_normal();
    let holes: f64 = facet.holes.iter().map(|h| polygon_area_3d(h, normal)).sum();
    polygon_area_3d(&facet.outer, normal) - holes
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::math::{Point3, Vector3};
    use crate::operations::creation::{MakeBox, MakePrism};
    use crate::zone::fixtures::half_cylinder_prism;
    use approx::assert_relative_eq;
    use std::f64::consts::PI;

    fn p(x: f64, y: f64, z: f64) -> Point3 {
        Point3::new(x, y, z)
    }

    #[test]
    fn box_volume() {
        let mut store = TopologyStore::new();
        let solid = MakeBox::new(p(0.0, 0.0, 0.0), p(4.0, 4.0, 3.0)).execute(&mut store).unwrap();
        assert_relative_eq!(Volume::new(solid).execute(&store).unwrap(), 48.0, epsilon = 1e-9);
    }

    #[test]
    fn offset_box_volume_is_translation_invariant() {
        let mut store = TopologyStore::new();
        let solid = MakeBox::new(p(10.0, -5.0, 2.0), p(12.0, -2.0, 3.0)).execute(&mut store).unwrap();
        assert_relative_eq!(Volume::new(solid).execute(&store).unwrap(), 6.0, epsilon = 1e-9);
    }

    #[test]
    fn l_prism_volume() {
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
        assert_relative_eq!(Volume::new(solid).execute(&store).unwrap(), 36.0, epsilon = 1e-9);
    }

    #[test]
    fn half_cylinder_volume_is_close() {
        let mut store = TopologyStore::new();
        let solid = half_cylinder_prism(&mut store, 2.0);
        let v = Volume::new(solid).execute(&store).unwrap();
        assert_relative_eq!(v, PI, max_relative = 0.02);
    }

    #[test]
    fn finer_tessellation_converges() {
        let mut store = TopologyStore::new();
        let solid = half_cylinder_prism(&mut store, 2.0);
        let fine = TessellationParams {
            tolerance: 1e-4,
            ..TessellationParams::default()
        };
        let v = Volume::new(solid).with_params(fine).execute(&store).unwrap();
        assert_relative_eq!(v, PI, max_relative = 1e-3);
    }
}
