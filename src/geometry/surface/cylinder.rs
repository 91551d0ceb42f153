use crate::error::{GeometryError, Result};
use crate::math::{Point3, Vector3, EPSILON};

use super::Surface;

/// A cylindrical surface in 3D space.
///
/// `P(u, v) = center + radius * (cos(u) * ref_dir + sin(u) * binormal) + v * axis`
/// where `binormal = axis x ref_dir`. The natural normal points away from the
/// axis.
#[derive(Debug, Clone)]
pub struct Cylinder {
    center: Point3,
    radius: f64,
    axis: Vector3,
    ref_dir: Vector3,
}

impl Cylinder {
    /// Creates a new cylinder.
    ///
    /// # Errors
    ///
    /// Returns an error if the radius is non-positive, a direction is
    /// zero-length, or `ref_dir` is not perpendicular to `axis`.
    pub fn new(center: Point3, radius: f64, axis: Vector3, ref_dir: Vector3) -> Result<Self> {
        if radius < EPSILON {
            return Err(
                GeometryError::Degenerate("cylinder radius must be positive".into()).into(),
            );
        }
        let axis_len = axis.norm();
        let ref_len = ref_dir.norm();
        if axis_len < EPSILON || ref_len < EPSILON {
            return Err(GeometryError::ZeroVector.into());
        }
        let axis = axis / axis_len;
        let ref_dir = ref_dir / ref_len;
        if axis.dot(&ref_dir).abs() > 1e-9 {
            return Err(GeometryError::Degenerate(
                "reference direction must be perpendicular to axis".into(),
            )
            .into());
        }

        Ok(Self {
            center,
            radius,
            axis,
            ref_dir,
        })
    }

    /// Returns the radius.
    #[must_use]
    pub fn radius(&self) -> f64 {
        self.radius
    }

    fn binormal(&self) -> Vector3 {
        self.axis.cross(&self.ref_dir)
    }
}

impl Surface for Cylinder {
    fn evaluate(&self, u: f64, v: f64) -> Result<Point3> {
        let radial = self.ref_dir * u.cos() + self.binormal() * u.sin();
        Ok(self.center + radial * self.radius + self.axis * v)
    }

    fn normal(&self, u: f64, _v: f64) -> Result<Vector3> {
        let n = self.ref_dir * u.cos() + self.binormal() * u.sin();
        let len = n.norm();
        if len < EPSILON {
            return Err(GeometryError::ZeroVector.into());
        }
        Ok(n / len)
    }

    /// `u` is the atan2 angle in `(-pi, pi]`, `v` the signed axial distance.
    fn closest_parameter(&self, point: &Point3) -> (f64, f64) {
        let dp = point - self.center;
        let v = dp.dot(&self.axis);
        let u = dp.dot(&self.binormal()).atan2(dp.dot(&self.ref_dir));
        (u, v)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use std::f64::consts::FRAC_PI_2;

    fn z_cylinder(radius: f64) -> Cylinder {
        Cylinder::new(Point3::origin(), radius, Vector3::z(), Vector3::x()).unwrap()
    }

    #[test]
    fn evaluate_with_height() {
        let p = z_cylinder(2.0).evaluate(FRAC_PI_2, 5.0).unwrap();
        assert_relative_eq!(p, Point3::new(0.0, 2.0, 5.0), epsilon = 1e-12);
    }

    #[test]
    fn normal_points_away_from_axis() {
        let n = z_cylinder(1.0).normal(0.0, 3.0).unwrap();
        assert_relative_eq!(n, Vector3::x(), epsilon = 1e-12);
    }

    #[test]
    fn closest_parameter_of_off_surface_point() {
        // A point inside the cylinder projects radially onto it.
        let (u, v) = z_cylinder(2.0).closest_parameter(&Point3::new(0.0, 0.5, 1.5));
        assert_relative_eq!(u, FRAC_PI_2, epsilon = 1e-12);
        assert_relative_eq!(v, 1.5, epsilon = 1e-12);
    }

    #[test]
    fn invalid_radius() {
        assert!(Cylinder::new(Point3::origin(), 0.0, Vector3::z(), Vector3::x()).is_err());
    }
}
