mod arc;
mod line;

pub use arc::Arc;
pub use line::Line;

use crate::error::Result;
use crate::math::Point3;

/// Trait for parametric curves in 3D space.
pub trait Curve {
    /// Evaluates the curve at parameter `t`, returning the 3D point.
    ///
    /// # Errors
    ///
    /// Returns an error if evaluation fails.
    fn evaluate(&self, t: f64) -> Result<Point3>;

    /// Returns `true` if the curve is a straight line.
    fn is_straight(&self) -> bool;

    /// Samples `segments + 1` points from `t_start` to `t_end` inclusive.
    ///
    /// # Errors
    ///
    /// Returns an error if any evaluation fails.
    #[allow(clippy::cast_precision_loss)]
    fn sample(&self, t_start: f64, t_end: f64, segments: usize) -> Result<Vec<Point3>> {
        let segments = segments.max(1);
        (0..=segments)
            .map(|i| {
                let t = t_start + (t_end - t_start) * i as f64 / segments as f64;
                self.evaluate(t)
            })
            .collect()
    }
}
