use super::{Point2, EPSILON};

/// Computes the signed area of a polygon (shoelace formula).
///
/// Positive for counter-clockwise, negative for clockwise.
#[must_use]
pub fn signed_area_2d(points: &[Point2]) -> f64 {
    let n = points.len();
    if n < 3 {
        return 0.0;
    }
    let mut sum = 0.0;
    for i in 0..n {
        let j = (i + 1) % n;
        sum += points[i].x * points[j].y - points[j].x * points[i].y;
    }
    sum * 0.5
}

/// Clips `subject` against a convex `clip` polygon (Sutherland–Hodgman).
///
/// Both polygons may be wound either way; the clip polygon is normalised to
/// counter-clockwise internally. Returns an empty vector when the
/// intersection is empty or degenerate.
#[must_use]
pub fn clip_convex_2d(subject: &[Point2], clip: &[Point2]) -> Vec<Point2> {
    if subject.len() < 3 || clip.len() < 3 {
        return Vec::new();
    }
    let mut clip = clip.to_vec();
    if signed_area_2d(&clip) < 0.0 {
        clip.reverse();
    }

    let inside = |p: &Point2, a: &Point2, b: &Point2| {
        (b.x - a.x) * (p.y - a.y) - (b.y - a.y) * (p.x - a.x) >= -EPSILON
    };
    let intersect = |p: &Point2, q: &Point2, a: &Point2, b: &Point2| {
        let r = q - p;
        let s = b - a;
        let denom = r.x * s.y - r.y * s.x;
        if denom.abs() < EPSILON {
            return *p;
        }
        let t = ((a.x - p.x) * s.y - (a.y - p.y) * s.x) / denom;
        p + r * t
    };

    let mut output = subject.to_vec();
    let n = clip.len();
    for i in 0..n {
        if output.is_empty() {
            break;
        }
        let a = clip[i];
        let b = clip[(i + 1) % n];
        let input = std::mem::take(&mut output);
        let m = input.len();
        for j in 0..m {
            let current = input[j];
            let previous = input[(j + m - 1) % m];
            let cur_in = inside(&current, &a, &b);
            let prev_in = inside(&previous, &a, &b);
            if cur_in {
                if !prev_in {
                    output.push(intersect(&previous, &current, &a, &b));
                }
                output.push(current);
            } else if prev_in {
                output.push(intersect(&previous, &current, &a, &b));
            }
        }
    }

    if output.len() < 3 {
        Vec::new()
    } else {
        output
    }
}

/// Area of the intersection of two convex polygons.
#[must_use]
pub fn convex_overlap_area(a: &[Point2], b: &[Point2]) -> f64 {
    signed_area_2d(&clip_convex_2d(a, b)).abs()
}
