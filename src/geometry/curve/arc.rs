use crate::error::{GeometryError, Result};
use crate::math::{Point3, Vector3, EPSILON};

use super::Curve;

/// A circle in 3D space, parameterised by angle.
///
/// `P(t) = center + radius * (cos(t) * ref_dir + sin(t) * (normal x ref_dir))`.
/// Edges carry the angular range they use, so the same `Arc` can back any
/// portion of the circle.
#[derive(Debug, Clone)]
pub struct Arc {
    center: Point3,
    radius: f64,
    normal: Vector3,
    ref_dir: Vector3,
}

impl Arc {
    /// Creates a new arc.
    ///
    /// # Errors
    ///
    /// Returns an error if the radius is non-positive, a direction is
    /// zero-length, or `ref_dir` is not perpendicular to `normal`.
    pub fn new(center: Point3, radius: f64, normal: Vector3, ref_dir: Vector3) -> Result<Self> {
        if radius < EPSILON {
            return Err(GeometryError::Degenerate("arc radius must be positive".into()).into());
        }
        let normal_len = normal.norm();
        let ref_len = ref_dir.norm();
        if normal_len < EPSILON || ref_len < EPSILON {
            return Err(GeometryError::ZeroVector.into());
        }
        let normal = normal / normal_len;
        let ref_dir = ref_dir / ref_len;
        if normal.dot(&ref_dir).abs() > 1e-9 {
            return Err(GeometryError::Degenerate(
                "reference direction must be perpendicular to normal".into(),
            )
            .into());
        }

        Ok(Self {
            center,
            radius,
            normal,
            ref_dir,
        })
    }

    /// Returns the radius of the arc.
    #[must_use]
    pub fn radius(&self) -> f64 {
        self.radius
    }

    fn binormal(&self) -> Vector3 {
        self.normal.cross(&self.ref_dir)
    }
}

impl Curve for Arc {
    fn evaluate(&self, t: f64) -> Result<Point3> {
        let x = self.radius * t.cos();
        let y = self.radius * t.sin();
        Ok(self.center + self.ref_dir * x + self.binormal() * y)
    }

    fn is_straight(&self) -> bool {
        false
    }
}
