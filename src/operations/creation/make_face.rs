use crate::error::{Result, TopologyError};
use crate::geometry::surface::Plane;
use crate::math::Point3;
use crate::topology::{FaceData, FaceId, FaceSurface, TopologyStore, WireId};

use super::MakeWire;

/// Creates a face from a wire boundary and a surface.
///
/// Without an explicit surface the face is planar: the plane is fitted to the
/// outer wire with the normal following its winding. The fitted plane is kept
/// even if the wire is not flat; the planarity validator reports that case.
pub struct MakeFace {
    outer_wire: WireId,
    inner_wires: Vec<WireId>,
    surface: Option<(FaceSurface, bool)>,
}

impl MakeFace {
    /// Creates a new planar `MakeFace` operation.
    #[must_use]
    pub fn new(outer_wire: WireId, inner_wires: Vec<WireId>) -> Self {
        Self {
            outer_wire,
            inner_wires,
            surface: None,
        }
    }

    /// Uses `surface` instead of a fitted plane. `same_sense` tells whether the
    /// face normal agrees with the surface normal.
    #[must_use]
    pub fn with_surface(mut self, surface: FaceSurface, same_sense: bool) -> Self {
        self.surface = Some((surface, same_sense));
        self
    }

    /// Executes the operation, creating the face in the topology store.
    ///
    /// # Errors
    ///
    /// Returns an error if a wire is missing or open, or if no plane can be
    /// fitted to the outer wire.
    pub fn execute(&self, store: &mut TopologyStore) -> Result<FaceId> {
        for &wire in std::iter::once(&self.outer_wire).chain(&self.inner_wires) {
            if !store.wire(wire)?.is_closed {
                return Err(TopologyError::WireNotClosed.into());
            }
        }

        let (surface, same_sense) = match &self.surface {
            Some((surface, same_sense)) => (surface.clone(), *same_sense),
            None => {
                let points = store.wire_points(self.outer_wire)?;
                (FaceSurface::Plane(Plane::from_polygon(&points)?), true)
            }
        };

        Ok(store.add_face(FaceData {
            surface,
            outer_wire: self.outer_wire,
            inner_wires: self.inner_wires.clone(),
            same_sense,
        }))
    }
}

/// Creates a planar face from a single closed polygon.
///
/// Convenience for openings, floor inserts and shading elements, which are
/// plain polygons outside any solid.
pub struct MakePolygon {
    points: Vec<Point3>,
}

impl MakePolygon {
    /// Creates a new `MakePolygon` operation.
    #[must_use]
    pub fn new(points: Vec<Point3>) -> Self {
        Self { points }
    }

    /// Executes the operation, creating the wire and face in the store.
    ///
    /// # Errors
    ///
    /// Returns an error if the polygon is degenerate.
    pub fn execute(&self, store: &mut TopologyStore) -> Result<FaceId> {
        let wire = MakeWire::new(self.points.clone(), true).execute(store)?;
        MakeFace::new(wire, Vec::new()).execute(store)
    }
}
