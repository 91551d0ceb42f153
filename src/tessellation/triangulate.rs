use std::collections::{HashMap, HashSet, VecDeque};

use spade::handles::{FixedFaceHandle, InnerTag};
use spade::{
    ConstrainedDelaunayTriangulation, InsertionError, Point2 as SpadePoint2, Triangulation,
};

use crate::error::{Result, TessellationError};
use crate::math::Point2;

type Cdt = ConstrainedDelaunayTriangulation<SpadePoint2<f64>>;

/// Triangulates a planar region given in 2D (outer loop minus holes).
///
/// Loops may be wound either way and non-convex. The union of the returned
/// triangles covers the region exactly.
///
/// # Errors
///
/// Returns [`TessellationError::Failed`] if a loop has fewer than three points,
/// a coordinate cannot be inserted, or two loop edges cross.
pub fn triangulate_polygon(outer: &[Point2], holes: &[Vec<Point2>]) -> Result<Vec<[Point2; 3]>> {
    let mut cdt = Cdt::new();
    insert_constraint_loop(&mut cdt, outer)?;
    for hole in holes {
        insert_constraint_loop(&mut cdt, hole)?;
    }

    let interior = classify_interior_faces(&cdt);
    let triangles = cdt
        .inner_faces()
        .filter(|face| interior.contains(&face.fix().index()))
        .map(|face| {
            face.vertices().map(|v| {
                let pos = v.position();
                Point2::new(pos.x, pos.y)
            })
        })
        .collect();
    Ok(triangles)
}

/// Inserts a closed polygon as constraint edges into the CDT.
fn insert_constraint_loop(cdt: &mut Cdt, points: &[Point2]) -> Result<()> {
    if points.len() < 3 {
        return Err(
            TessellationError::Failed("constraint loop needs at least 3 points".into()).into(),
        );
    }

    let mut handles = Vec::with_capacity(points.len());
    for p in points {
        let h = cdt
            .insert(SpadePoint2::new(p.x, p.y))
            .map_err(|e: InsertionError| TessellationError::Failed(format!("CDT insert: {e}")))?;
        handles.push(h);
    }

    for i in 0..handles.len() {
        let from = handles[i];
        let to = handles[(i + 1) % handles.len()];
        if from == to {
            continue;
        }
        if !cdt.can_add_constraint(from, to) {
            return Err(TessellationError::Failed("loop edges cross".into()).into());
        }
        cdt.add_constraint(from, to);
    }

    Ok(())
}

/// Classifies which inner faces of the CDT are inside the region using flood-fill.
///
/// Starts from faces adjacent to the outer (infinite) face at depth 0. Each time
/// a constraint edge is crossed, depth increments. Odd depth = interior.
fn classify_interior_faces(cdt: &Cdt) -> HashSet<usize> {
    let mut interior = HashSet::new();
    let mut depth_map: HashMap<usize, u32> = HashMap::new();
    let mut queue: VecDeque<(FixedFaceHandle<InnerTag>, u32)> = VecDeque::new();

    let outer_fix = cdt.outer_face().fix();

    for edge in cdt.directed_edges() {
        if edge.face().fix() != outer_fix {
            continue;
        }
        if let Some(inner) = edge.rev().face().as_inner() {
            let idx = inner.fix().index();
            if depth_map.contains_key(&idx) {
                continue;
            }
            let depth = u32::from(cdt.is_constraint_edge(edge.as_undirected().fix()));
            depth_map.insert(idx, depth);
            if depth % 2 == 1 {
                interior.insert(idx);
            }
            queue.push_back((inner.fix(), depth));
        }
    }

    while let Some((face_fix, depth)) = queue.pop_front() {
        let face = cdt.face(face_fix);
        for edge in face.adjacent_edges() {
            let Some(neighbor) = edge.rev().face().as_inner() else {
                continue;
            };
            let idx = neighbor.fix().index();
            if depth_map.contains_key(&idx) {
                continue;
            }
            let new_depth = depth + u32::from(cdt.is_constraint_edge(edge.as_undirected().fix()));
            depth_map.insert(idx, new_depth);
            if new_depth % 2 == 1 {
                interior.insert(idx);
            }
            queue.push_back((neighbor.fix(), new_depth));
        }
    }

    interior
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::math::polygon_2d::signed_area_2d;
    use approx::assert_relative_eq;

    fn p(x: f64, y: f64) -> Point2 {
        Point2::new(x, y)
    }

    fn total_area(triangles: &[[Point2; 3]]) -> f64 {
        triangles.iter().map(|t| signed_area_2d(t).abs()).sum()
    }

    #[test]
    fn l_shape_covered_exactly() {
        let outer = vec![p(0.0, 0.0), p(4.0, 0.0), p(4.0, 2.0), p(2.0, 2.0), p(2.0, 4.0), p(0.0, 4.0)];
        let tris = triangulate_polygon(&outer, &[]).unwrap();
        assert_eq!(tris.len(), 4);
        assert_relative_eq!(total_area(&tris), 12.0, epsilon = 1e-9);
    }

    #[test]
    fn hole_is_excluded() {
        let outer = vec![p(0.0, 0.0), p(4.0, 0.0), p(4.0, 4.0), p(0.0, 4.0)];
        let hole = vec![p(1.0, 1.0), p(1.0, 3.0), p(3.0, 3.0), p(3.0, 1.0)];
        let tris = triangulate_polygon(&outer, &[hole]).unwrap();
        assert_relative_eq!(total_area(&tris), 12.0, epsilon = 1e-9);
    }

    #[test]
    fn clockwise_loop_accepted() {
        let outer = vec![p(0.0, 0.0), p(0.0, 1.0), p(1.0, 1.0), p(1.0, 0.0)];
        let tris = triangulate_polygon(&outer, &[]).unwrap();
        assert_relative_eq!(total_area(&tris), 1.0, epsilon = 1e-9);
    }

    #[test]
    fn degenerate_loop_rejected() {
        assert!(triangulate_polygon(&[p(0.0, 0.0), p(1.0, 0.0)], &[]).is_err());
    }
}
