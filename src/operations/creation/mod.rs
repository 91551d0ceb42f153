mod make_box;
mod make_face;
mod make_polyhedron;
mod make_prism;
mod make_solid;
mod make_wire;

pub use make_box::MakeBox;
pub use make_face::{MakeFace, MakePolygon};
pub use make_polyhedron::MakePolyhedron;
pub use make_prism::MakePrism;
pub use make_solid::{MakeShell, MakeSolid};
pub use make_wire::MakeWire;
