use crate::error::{GeometryError, Result};
use crate::math::{Point3, Vector3, EPSILON};

use super::Curve;

/// An infinite line through `origin` with unit `direction`.
///
/// `P(t) = origin + t * direction`, so `t` measures distance from the origin.
#[derive(Debug, Clone)]
pub struct Line {
    origin: Point3,
    direction: Vector3,
}

impl Line {
    /// Creates a new line from an origin and direction.
    ///
    /// # Errors
    ///
    /// Returns an error if the direction vector is zero-length.
    pub fn new(origin: Point3, direction: Vector3) -> Result<Self> {
        let len = direction.norm();
        if len < EPSILON {
            return Err(GeometryError::ZeroVector.into());
        }
        Ok(Self {
            origin,
            direction: direction / len,
        })
    }

    /// Creates the line through `start` and `end` together with the parameter
    /// range `(0, |end - start|)` covering the segment.
    ///
    /// # Errors
    ///
    /// Returns an error if the two points coincide.
    pub fn through(start: Point3, end: Point3) -> Result<(Self, f64, f64)> {
        let line = Self::new(start, end - start)?;
        Ok((line, 0.0, (end - start).norm()))
    }
}

impl Curve for Line {
    fn evaluate(&self, t: f64) -> Result<Point3> {
        Ok(self.origin + self.direction * t)
    }

    fn is_straight(&self) -> bool {
        true
    }
}
