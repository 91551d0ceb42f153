use std::f64::consts::PI;

use crate::geometry::curve::{Arc, Line};
use crate::geometry::surface::{Cylinder, Plane};
use crate::math::{Point3, Vector3};
use crate::operations::creation::{MakeFace, MakeShell, MakeSolid};
use crate::topology::{
    EdgeCurve, EdgeData, EdgeId, FaceSurface, OrientedEdge, SolidId, TopologyStore, VertexData,
    VertexId, WireData, WireId,
};

/// A half-cylinder prism of radius 1 over `y >= 0`, from `z = 0` to `height`.
///
/// Faces in order: bottom, top, flat side (`y = 0`), curved side. The curved
/// side is a cylinder patch bounded by two arcs, so the solid is closed but
/// has curved edges and a non-planar face.
#[allow(clippy::unwrap_used)]
pub(crate) fn half_cylinder_prism(store: &mut TopologyStore, height: f64) -> SolidId {
    let b0 = store.add_vertex(VertexData::new(Point3::new(1.0, 0.0, 0.0)));
    let b1 = store.add_vertex(VertexData::new(Point3::new(-1.0, 0.0, 0.0)));
    let t0 = store.add_vertex(VertexData::new(Point3::new(1.0, 0.0, height)));
    let t1 = store.add_vertex(VertexData::new(Point3::new(-1.0, 0.0, height)));

    let bottom_line = line_edge(store, b0, b1);
    let top_line = line_edge(store, t1, t0);
    let left = line_edge(store, b1, t1);
    let right = line_edge(store, b0, t0);
    let bottom_arc = arc_edge(store, b0, b1, 0.0);
    let top_arc = arc_edge(store, t0, t1, height);

    let bottom_wire = wire(store, &[(bottom_line, true), (bottom_arc, false)]);
    let top_wire = wire(store, &[(top_line, true), (top_arc, true)]);
    let flat_wire = wire(store, &[(bottom_line, false), (right, true), (top_line, false), (left, false)]);
    let curved_wire = wire(store, &[(bottom_arc, true), (left, true), (top_arc, false), (right, false)]);

    let bottom_plane = Plane::from_normal(Point3::origin(), -Vector3::z()).unwrap();
    let top_plane = Plane::from_normal(Point3::new(0.0, 0.0, height), Vector3::z()).unwrap();
    let cylinder = Cylinder::new(Point3::origin(), 1.0, Vector3::z(), Vector3::x()).unwrap();

    let faces = vec![
        MakeFace::new(bottom_wire, vec![])
            .with_surface(FaceSurface::Plane(bottom_plane), true)
            .execute(store)
            .unwrap(),
        MakeFace::new(top_wire, vec![])
            .with_surface(FaceSurface::Plane(top_plane), true)
            .execute(store)
            .unwrap(),
        MakeFace::new(flat_wire, vec![]).execute(store).unwrap(),
        MakeFace::new(curved_wire, vec![])
            .with_surface(FaceSurface::Cylinder(cylinder), true)
            .execute(store)
            .unwrap(),
    ];
    let shell = MakeShell::new(faces).execute(store).unwrap();
    MakeSolid::new(shell, vec![]).execute(store).unwrap()
}

#[allow(clippy::unwrap_used)]
fn line_edge(store: &mut TopologyStore, start: VertexId, end: VertexId) -> EdgeId {
    let a = store.vertex(start).unwrap().point;
    let b = store.vertex(end).unwrap().point;
    let (line, t_start, t_end) = Line::through(a, b).unwrap();
    store.add_edge(EdgeData {
        start,
        end,
        curve: EdgeCurve::Line(line),
        t_start,
        t_end,
    })
}

/// Upper half circle at height `z`, from angle 0 to pi.
#[allow(clippy::unwrap_used)]
fn arc_edge(store: &mut TopologyStore, start: VertexId, end: VertexId, z: f64) -> EdgeId {
    let arc = Arc::new(Point3::new(0.0, 0.0, z), 1.0, Vector3::z(), Vector3::x()).unwrap();
    store.add_edge(EdgeData {
        start,
        end,
        curve: EdgeCurve::Arc(arc),
        t_start: 0.0,
        t_end: PI,
    })
}

fn wire(store: &mut TopologyStore, edges: &[(EdgeId, bool)]) -> WireId {
    store.add_wire(WireData {
        edges: edges.iter().map(|&(e, fwd)| OrientedEdge::new(e, fwd)).collect(),
        is_closed: true,
    })
}

/// A `size` x `size` x `height` box whose front wall (`y = 0`) is split into
/// two faces at `x = size / 2`.
#[allow(clippy::unwrap_used)]
pub(crate) fn split_wall_box(store: &mut TopologyStore, size: f64, height: f64) -> SolidId {
    use crate::operations::creation::MakePolyhedron;

    let (s, h, m) = (size, height, size / 2.0);
    let p = |x: f64, y: f64, z: f64| Point3::new(x, y, z);
    MakePolyhedron::new(vec![
        vec![p(0.0, 0.0, 0.0), p(0.0, s, 0.0), p(s, s, 0.0), p(s, 0.0, 0.0), p(m, 0.0, 0.0)],
        vec![p(0.0, 0.0, h), p(m, 0.0, h), p(s, 0.0, h), p(s, s, h), p(0.0, s, h)],
        vec![p(0.0, 0.0, 0.0), p(m, 0.0, 0.0), p(m, 0.0, h), p(0.0, 0.0, h)],
        vec![p(m, 0.0, 0.0), p(s, 0.0, 0.0), p(s, 0.0, h), p(m, 0.0, h)],
        vec![p(0.0, s, 0.0), p(0.0, s, h), p(s, s, h), p(s, s, 0.0)],
        vec![p(0.0, 0.0, 0.0), p(0.0, 0.0, h), p(0.0, s, h), p(0.0, s, 0.0)],
        vec![p(s, 0.0, 0.0), p(s, s, 0.0), p(s, s, h), p(s, 0.0, h)],
    ])
    .execute(store)
    .unwrap()
}
