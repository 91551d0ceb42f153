mod tessellate_face;
mod tessellate_solid;
mod triangulate;

pub use tessellate_face::TessellateFace;
pub use tessellate_solid::TessellateSolid;
pub use triangulate::triangulate_polygon;

use crate::geometry::surface::Plane;
use crate::math::Point3;
use crate::topology::FaceId;

/// Parameters controlling tessellation quality.
#[derive(Debug, Clone, Copy)]
pub struct TessellationParams {
    /// Maximum allowed chord deviation from the true geometry.
    pub tolerance: f64,
    /// Minimum number of segments for curves.
    pub min_segments: usize,
    /// Maximum number of segments for curves.
    pub max_segments: usize,
}

impl Default for TessellationParams {
    fn default() -> Self {
        Self {
            tolerance: 0.01,
            min_segments: 4,
            max_segments: 256,
        }
    }
}

/// A planar polygon approximating all or part of a face.
///
/// `plane` carries the face's oriented normal: the surface normal, flipped
/// when the face is not `same_sense`. A planar face yields exactly one facet
/// with its holes; a curved face yields one hole-free facet per grid cell.
#[derive(Debug, Clone)]
pub struct Facet {
    /// The face this facet was cut from.
    pub face: FaceId,
    /// Supporting plane, oriented with the face.
    pub plane: Plane,
    /// Outer loop.
    pub outer: Vec<Point3>,
    /// Hole loops.
    pub holes: Vec<Vec<Point3>>,
}
