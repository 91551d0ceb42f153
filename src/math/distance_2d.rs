/// Returns the minimum distance from point `(px, py)` to the line segment
/// from `(ax, ay)` to `(bx, by)`.
#[must_use]
pub fn point_to_segment_dist(px: f64, py: f64, ax: f64, ay: f64, bx: f64, by: f64) -> f64 {
    let dx = bx - ax;
    let dy = by - ay;
    let len_sq = dx * dx + dy * dy;

    if len_sq < 1e-20 {
        return ((px - ax).powi(2) + (py - ay).powi(2)).sqrt();
    }

    // Project point onto the infinite line, clamp to [0, 1].
    let t = ((px - ax) * dx + (py - ay) * dy) / len_sq;
    let t = t.clamp(0.0, 1.0);

    let closest_x = ax + t * dx;
    let closest_y = ay + t * dy;

    ((px - closest_x).powi(2) + (py - closest_y).powi(2)).sqrt()
}

/// Returns the minimum distance between segments `a0→a1` and `b0→b1`.
///
/// Zero when the segments cross.
#[must_use]
pub fn segment_segment_dist(a0: (f64, f64), a1: (f64, f64), b0: (f64, f64), b1: (f64, f64)) -> f64 {
    if segments_cross(a0, a1, b0, b1) {
        return 0.0;
    }
    let d1 = point_to_segment_dist(a0.0, a0.1, b0.0, b0.1, b1.0, b1.1);
    let d2 = point_to_segment_dist(a1.0, a1.1, b0.0, b0.1, b1.0, b1.1);
    let d3 = point_to_segment_dist(b0.0, b0.1, a0.0, a0.1, a1.0, a1.1);
    let d4 = point_to_segment_dist(b1.0, b1.1, a0.0, a0.1, a1.0, a1.1);
    d1.min(d2).min(d3).min(d4)
}

/// Proper crossing test (endpoints strictly on opposite sides).
fn segments_cross(a0: (f64, f64), a1: (f64, f64), b0: (f64, f64), b1: (f64, f64)) -> bool {
    let orient = |p: (f64, f64), q: (f64, f64), r: (f64, f64)| {
        (q.0 - p.0) * (r.1 - p.1) - (q.1 - p.1) * (r.0 - p.0)
    };
    let o1 = orient(a0, a1, b0);
    let o2 = orient(a0, a1, b1);
    let o3 = orient(b0, b1, a0);
    let o4 = orient(b0, b1, a1);
    o1 * o2 < 0.0 && o3 * o4 < 0.0
}

#[cfg(test)]
mod tests {
    use super::*;

    const TOL: f64 = 1e-10;

    #[test]
    fn segment_dist_perpendicular_projection() {
        let d = point_to_segment_dist(1.0, 1.0, 0.0, 0.0, 2.0, 0.0);
        assert!((d - 1.0).abs() < TOL, "d={d}");
    }

    #[test]
    fn segment_dist_endpoint_closest() {
        let d = point_to_segment_dist(-1.0, 0.0, 0.0, 0.0, 2.0, 0.0);
        assert!((d - 1.0).abs() < TOL, "d={d}");
    }

    #[test]
    fn segment_dist_degenerate() {
        let d = point_to_segment_dist(3.0, 4.0, 0.0, 0.0, 0.0, 0.0);
        assert!((d - 5.0).abs() < TOL, "d={d}");
    }

    #[test]
    fn crossing_segments_have_zero_distance() {
        let d = segment_segment_dist((0.0, 0.0), (2.0, 2.0), (0.0, 2.0), (2.0, 0.0));
        assert!(d.abs() < TOL);
    }

    #[test]
    fn parallel_segments_distance() {
        let d = segment_segment_dist((0.0, 0.0), (2.0, 0.0), (0.5, 1.5), (1.5, 1.5));
        assert!((d - 1.5).abs() < TOL, "d={d}");
    }

    #[test]
    fn touching_segments() {
        let d = segment_segment_dist((0.0, 0.0), (1.0, 0.0), (1.0, 0.0), (1.0, 1.0));
        assert!(d.abs() < TOL);
    }
}
