pub mod edge;
pub mod face;
pub mod shell;
pub mod solid;
pub mod vertex;
pub mod wire;

pub use edge::{EdgeCurve, EdgeData, EdgeId};
pub use face::{FaceData, FaceId, FaceSurface};
pub use shell::{ShellData, ShellId};
pub use solid::{SolidData, SolidId};
pub use vertex::{VertexData, VertexId};
pub use wire::{OrientedEdge, WireData, WireId};

use crate::error::TopologyError;
use crate::math::Point3;
use slotmap::SlotMap;

/// Central arena that owns all topological entities.
///
/// Zone boundaries, openings and floor inserts all live in one store owned by
/// the caller; zone code only ever borrows it immutably. Entities reference
/// each other via typed IDs (generational indices).
#[derive(Debug, Default)]
pub struct TopologyStore {
    vertices: SlotMap<VertexId, VertexData>,
    edges: SlotMap<EdgeId, EdgeData>,
    wires: SlotMap<WireId, WireData>,
    faces: SlotMap<FaceId, FaceData>,
    shells: SlotMap<ShellId, ShellData>,
    solids: SlotMap<SolidId, SolidData>,
}

/// Generates the insert and lookup pair for one entity arena.
macro_rules! arena_accessors {
    ($($field:ident: $id:ty => $data:ty, $add:ident, $get:ident, $kind:literal;)*) => {
        impl TopologyStore {
            $(
                #[doc = concat!("Inserts a new ", $kind, " and returns its ID.")]
                pub fn $add(&mut self, data: $data) -> $id {
                    self.$field.insert(data)
                }

                #[doc = concat!("Looks up the ", $kind, " with the given ID.")]
                ///
                /// # Errors
                ///
                /// Returns [`TopologyError::EntityNotFound`] if the ID belongs to
                /// no entity of this store.
                pub fn $get(&self, id: $id) -> Result<&$data, TopologyError> {
                    self.$field
                        .get(id)
                        .ok_or_else(|| TopologyError::EntityNotFound($kind.into()))
                }
            )*
        }
    };
}

arena_accessors! {
    vertices: VertexId => VertexData, add_vertex, vertex, "vertex";
    edges: EdgeId => EdgeData, add_edge, edge, "edge";
    wires: WireId => WireData, add_wire, wire, "wire";
    faces: FaceId => FaceData, add_face, face, "face";
    shells: ShellId => ShellData, add_shell, shell, "shell";
    solids: SolidId => SolidData, add_solid, solid, "solid";
}

impl TopologyStore {
    /// Creates a new, empty topology store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    // --- Traversal ---

    /// Returns the faces of a solid's outer shell, in shell order.
    ///
    /// # Errors
    ///
    /// Returns an error if the solid or its shell is not in the store.
    pub fn solid_faces(&self, id: SolidId) -> Result<&[FaceId], TopologyError> {
        let solid = self.solid(id)?;
        Ok(&self.shell(solid.outer_shell)?.faces)
    }

    /// Returns the wires bounding a face, outer wire first.
    ///
    /// # Errors
    ///
    /// Returns an error if the face is not in the store.
    pub fn face_wires(&self, id: FaceId) -> Result<Vec<WireId>, TopologyError> {
        let face = self.face(id)?;
        let mut wires = Vec::with_capacity(1 + face.inner_wires.len());
        wires.push(face.outer_wire);
        wires.extend_from_slice(&face.inner_wires);
        Ok(wires)
    }

    /// Returns the vertex positions of a wire in traversal order.
    ///
    /// Each oriented edge contributes its start point, so the polygon is
    /// implicitly closed. Curved edges contribute no intermediate samples.
    ///
    /// # Errors
    ///
    /// Returns an error if the wire, an edge or a vertex is not in the store.
    pub fn wire_points(&self, id: WireId) -> Result<Vec<Point3>, TopologyError> {
        let wire = self.wire(id)?;
        wire.edges
            .iter()
            .map(|oe| {
                let edge = self.edge(oe.edge)?;
                let vid = if oe.forward { edge.start } else { edge.end };
                Ok(self.vertex(vid)?.point)
            })
            .collect()
    }

    /// Returns the corner positions of a face's outer and inner wires.
    ///
    /// # Errors
    ///
    /// Returns an error if the face or any of its entities is not in the store.
    pub fn face_points(&self, id: FaceId) -> Result<Vec<Point3>, TopologyError> {
        let mut points = Vec::new();
        for wire in self.face_wires(id)? {
            points.extend(self.wire_points(wire)?);
        }
        Ok(points)
    }
}
