use crate::error::Result;
use crate::topology::{SolidId, TopologyStore};

use super::{Facet, TessellateFace, TessellationParams};

/// Tessellates every face of a solid's outer shell into facets.
pub struct TessellateSolid {
    solid: SolidId,
    params: TessellationParams,
}

impl TessellateSolid {
    /// Creates a new `TessellateSolid` operation.
    #[must_use]
    pub fn new(solid: SolidId, params: TessellationParams) -> Self {
        Self { solid, params }
    }

    /// Executes the tessellation, returning the facets of all faces in shell
    /// order.
    ///
    /// # Errors
    ///
    /// Returns an error if the solid or any of its faces cannot be tessellated.
    pub fn execute(&self, store: &TopologyStore) -> Result<Vec<Facet>> {
        let mut facets = Vec::new();
        for &face_id in store.solid_faces(self.solid)? {
            facets.extend(TessellateFace::new(face_id, self.params).execute(store)?);
        }
        Ok(facets)
    }
}
