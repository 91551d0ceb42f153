use crate::error::{OperationError, Result};
use crate::math::Point3;
use crate::topology::{SolidId, TopologyStore};

use super::{MakePolygon, MakeShell, MakeSolid};

/// Creates a solid from planar polygons.
///
/// Each polygon becomes one planar face whose normal follows its winding, so
/// callers wind every polygon counter-clockwise when seen from outside.
pub struct MakePolyhedron {
    polygons: Vec<Vec<Point3>>,
}

impl MakePolyhedron {
    /// Creates a new `MakePolyhedron` operation.
    #[must_use]
    pub fn new(polygons: Vec<Vec<Point3>>) -> Self {
        Self { polygons }
    }

    /// Executes the operation, creating faces, shell and solid in the store.
    ///
    /// # Errors
    ///
    /// Returns [`OperationError::InvalidInput`] for fewer than four polygons and
    /// propagates errors from degenerate polygons.
    pub fn execute(&self, store: &mut TopologyStore) -> Result<SolidId> {
        if self.polygons.len() < 4 {
            return Err(OperationError::InvalidInput(format!(
                "a polyhedron needs at least 4 faces, got {}",
                self.polygons.len()
            ))
            .into());
        }
        let faces = self
            .polygons
            .iter()
            .map(|points| MakePolygon::new(points.clone()).execute(store))
            .collect::<Result<Vec<_>>>()?;
        let shell = MakeShell::new(faces).execute(store)?;
        MakeSolid::new(shell, Vec::new()).execute(store)
    }
}
