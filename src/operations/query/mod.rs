mod classify_point;
mod face_properties;
mod intersect_segment;
mod volume;

pub use classify_point::{classify_point_in_solid, PointClassification};
pub use face_properties::{face_properties, FaceProperties};
pub use intersect_segment::{intersect_segment_solid, SegmentSolidIntersection};
pub use volume::{facet_area, facets_volume, Volume};
