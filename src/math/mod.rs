pub mod distance_2d;
pub mod intersect_3d;
pub mod polygon_2d;
pub mod polygon_3d;

/// 2D point type.
pub type Point2 = nalgebra::Point2<f64>;

/// 3D point type.
pub type Point3 = nalgebra::Point3<f64>;

/// 2D vector type.
pub type Vector2 = nalgebra::Vector2<f64>;

/// 3D vector type.
pub type Vector3 = nalgebra::Vector3<f64>;

/// Numerical floor used when constructing geometry (zero-length vectors,
/// parallel directions). Zone predicates never use it; they take the zone
/// tolerance as an explicit argument.
pub const EPSILON: f64 = 1e-10;

/// Number of decimal places written out in the tolerance's decimal form.
///
/// `0.001` gives 3, `0.0025` gives 4, `1.0` gives 0. Capped at 15 so the
/// result stays meaningful for `f64`.
#[must_use]
pub fn decimal_places(tolerance: f64) -> u32 {
    let text = format!("{tolerance}");
    let digits = text.split_once('.').map_or(0, |(_, frac)| frac.len());
    u32::try_from(digits.min(15)).unwrap_or(15)
}

/// Rounds `value` half away from zero to `digits` decimal places.
#[must_use]
pub fn round_to(value: f64, digits: u32) -> f64 {
    let scale = 10f64.powi(i32::try_from(digits).unwrap_or(15));
    (value * scale).round() / scale
}
