use crate::error::{GeometryError, Result};
use crate::math::polygon_3d::newell_normal;
use crate::math::{Point3, Vector3, EPSILON};

use super::Surface;

/// An infinite plane in 3D space.
///
/// Defined by an origin point and two orthonormal in-plane directions
/// (`u_dir`, `v_dir`). The normal is `u_dir x v_dir`.
///
/// Parametric form: `P(u, v) = origin + u * u_dir + v * v_dir`.
#[derive(Debug, Clone)]
pub struct Plane {
    origin: Point3,
    u_dir: Vector3,
    v_dir: Vector3,
    normal: Vector3,
}

impl Plane {
    /// Creates a plane from an origin and a normal vector.
    ///
    /// The U and V directions are computed automatically.
    ///
    /// # Errors
    ///
    /// Returns an error if the normal vector is zero-length.
    pub fn from_normal(origin: Point3, normal: Vector3) -> Result<Self> {
        let len = normal.norm();
        if len < EPSILON {
            return Err(GeometryError::ZeroVector.into());
        }
        let normal = normal / len;

        // Any reference not parallel to the normal will do.
        let reference = if normal.x.abs() < 0.9 {
            Vector3::x()
        } else {
            Vector3::y()
        };

        let u_dir = normal.cross(&reference).normalize();
        let v_dir = normal.cross(&u_dir);

        Ok(Self {
            origin,
            u_dir,
            v_dir,
            normal,
        })
    }

    /// Fits a plane to a closed polygon using its Newell normal.
    ///
    /// The normal follows the right-hand rule over the point order and the
    /// origin is the vertex average.
    ///
    /// # Errors
    ///
    /// Returns an error if the points are collinear or fewer than three.
    #[allow(clippy::cast_precision_loss)]
    pub fn from_polygon(points: &[Point3]) -> Result<Self> {
        if points.len() < 3 {
            return Err(GeometryError::Degenerate("plane needs at least 3 points".into()).into());
        }
        let normal = newell_normal(points);
        if normal.norm() < EPSILON {
            return Err(GeometryError::Degenerate("polygon points are collinear".into()).into());
        }
        let sum: Vector3 = points.iter().map(|p| p.coords).sum();
        Self::from_normal(Point3::from(sum / points.len() as f64), normal)
    }

    /// Returns the same plane with the opposite orientation.
    #[must_use]
    pub fn flipped(&self) -> Self {
        Self {
            origin: self.origin,
            u_dir: self.v_dir,
            v_dir: self.u_dir,
            normal: -self.normal,
        }
    }

    /// Returns the origin point of the plane.
    #[must_use]
    pub fn origin(&self) -> &Point3 {
        &self.origin
    }

    /// Returns the U direction vector.
    #[must_use]
    pub fn u_dir(&self) -> &Vector3 {
        &self.u_dir
    }

    /// Returns the V direction vector.
    #[must_use]
    pub fn v_dir(&self) -> &Vector3 {
        &self.v_dir
    }

    /// Returns the normal vector of the plane.
    #[must_use]
    pub fn plane_normal(&self) -> &Vector3 {
        &self.normal
    }

    /// Unsigned distance from `point` to the plane.
    #[must_use]
    pub fn distance_to(&self, point: &Point3) -> f64 {
        (point - self.origin).dot(&self.normal).abs()
    }
}

impl Surface for Plane {
    fn evaluate(&self, u: f64, v: f64) -> Result<Point3> {
        Ok(self.origin + self.u_dir * u + self.v_dir * v)
    }

    fn normal(&self, _u: f64, _v: f64) -> Result<Vector3> {
        Ok(self.normal)
    }

    fn closest_parameter(&self, point: &Point3) -> (f64, f64) {
        let d = point - self.origin;
        (d.dot(&self.u_dir), d.dot(&self.v_dir))
    }
}
