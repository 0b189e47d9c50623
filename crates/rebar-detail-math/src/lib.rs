#![warn(missing_docs)]

//! Math types for rebar bending-detail geometry.
//!
//! Thin wrappers around nalgebra providing the point, vector and rigid
//! transform types the detailing pipeline works with, together with the
//! tolerance and angle helpers every comparison in the pipeline goes through.

use nalgebra::{Matrix4, Unit, Vector2, Vector3, Vector4};
use serde::{Deserialize, Serialize};
use std::f64::consts::TAU;

/// A point in 3D space.
pub type Point3 = nalgebra::Point3<f64>;

/// A vector in 3D space.
pub type Vec3 = Vector3<f64>;

/// A unit (normalized) direction vector in 3D space.
pub type Dir3 = Unit<Vector3<f64>>;

/// A point in 2D view space.
pub type Point2 = nalgebra::Point2<f64>;

/// A vector in 2D view space.
pub type Vec2 = Vector2<f64>;

/// A 4x4 affine transformation matrix.
#[derive(Debug, Clone, PartialEq)]
pub struct Transform {
    /// The underlying 4x4 matrix.
    pub matrix: Matrix4<f64>,
}

impl Transform {
    /// Identity transform.
    pub fn identity() -> Self {
        Self {
            matrix: Matrix4::identity(),
        }
    }

    /// Translation by `(dx, dy, dz)`.
    pub fn translation(dx: f64, dy: f64, dz: f64) -> Self {
        let mut m = Matrix4::identity();
        m[(0, 3)] = dx;
        m[(1, 3)] = dy;
        m[(2, 3)] = dz;
        Self { matrix: m }
    }

    /// Rotation about the Z axis by `angle` radians.
    pub fn rotation_z(angle: f64) -> Self {
        let (s, c) = angle.sin_cos();
        let mut m = Matrix4::identity();
        m[(0, 0)] = c;
        m[(0, 1)] = -s;
        m[(1, 0)] = s;
        m[(1, 1)] = c;
        Self { matrix: m }
    }

    /// Rotation about an arbitrary axis through the origin by `angle` radians.
    ///
    /// Uses Rodrigues' rotation formula; positive angles turn counter-clockwise
    /// when looking down the axis toward the origin.
    pub fn rotation_about_axis(axis: &Dir3, angle: f64) -> Self {
        let (s, c) = angle.sin_cos();
        let t = 1.0 - c;
        let (x, y, z) = (axis.as_ref().x, axis.as_ref().y, axis.as_ref().z);
        let mut m = Matrix4::identity();
        m[(0, 0)] = t * x * x + c;
        m[(0, 1)] = t * x * y - s * z;
        m[(0, 2)] = t * x * z + s * y;
        m[(1, 0)] = t * x * y + s * z;
        m[(1, 1)] = t * y * y + c;
        m[(1, 2)] = t * y * z - s * x;
        m[(2, 0)] = t * x * z - s * y;
        m[(2, 1)] = t * y * z + s * x;
        m[(2, 2)] = t * z * z + c;
        Self { matrix: m }
    }

    /// Rotation about an axis passing through `pivot`.
    pub fn rotation_at_point(axis: &Dir3, angle: f64, pivot: &Point3) -> Self {
        let to_origin = Self::translation(-pivot.x, -pivot.y, -pivot.z);
        let back = Self::translation(pivot.x, pivot.y, pivot.z);
        back.then(&Self::rotation_about_axis(axis, angle)).then(&to_origin)
    }

    /// Compose: `self` then `other` (self * other).
    ///
    /// The product applies `other` first, so `a.then(&b).apply_point(p)`
    /// equals `a.apply_point(&b.apply_point(p))`.
    pub fn then(&self, other: &Transform) -> Self {
        Self {
            matrix: self.matrix * other.matrix,
        }
    }

    /// Transform a point.
    pub fn apply_point(&self, p: &Point3) -> Point3 {
        let v = self.matrix * Vector4::new(p.x, p.y, p.z, 1.0);
        Point3::new(v.x, v.y, v.z)
    }

    /// Transform a direction vector (ignores translation).
    pub fn apply_vec(&self, v: &Vec3) -> Vec3 {
        let r = self.matrix * Vector4::new(v.x, v.y, v.z, 0.0);
        Vec3::new(r.x, r.y, r.z)
    }

    /// Inverse of this transform, if it exists.
    pub fn inverse(&self) -> Option<Self> {
        self.matrix.try_inverse().map(|matrix| Self { matrix })
    }
}

impl Default for Transform {
    fn default() -> Self {
        Self::identity()
    }
}

/// Tolerance constants for geometric comparisons.
///
/// One value is threaded through a whole detailing run so that every
/// comparison against 0, π/2 and π uses the same bounds.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tolerance {
    /// Linear distance tolerance in model units.
    pub linear: f64,
    /// Angular tolerance in radians.
    pub angular: f64,
}

impl Tolerance {
    /// Default drafting tolerances (1e-9 linear, 1e-9 rad angular).
    pub const DEFAULT: Self = Self {
        linear: 1e-9,
        angular: 1e-9,
    };

    /// Check if two points are coincident within tolerance.
    pub fn points_equal(&self, a: &Point3, b: &Point3) -> bool {
        (a - b).norm() < self.linear
    }

    /// Check if a scalar distance is effectively zero.
    pub fn is_zero(&self, d: f64) -> bool {
        d.abs() < self.linear
    }

    /// Check if two lengths are effectively equal.
    pub fn lengths_equal(&self, a: f64, b: f64) -> bool {
        (a - b).abs() < self.linear
    }

    /// Check if two angles are effectively equal (in radians).
    pub fn angles_equal(&self, a: f64, b: f64) -> bool {
        (a - b).abs() < self.angular
    }

    /// `a < b`, and not within angular tolerance of `b`.
    pub fn angle_less_than(&self, a: f64, b: f64) -> bool {
        a < b && !self.angles_equal(a, b)
    }

    /// `a >= b`, or within angular tolerance of `b`.
    pub fn angle_at_least(&self, a: f64, b: f64) -> bool {
        a >= b || self.angles_equal(a, b)
    }

    /// Component-wise comparison of two vectors.
    pub fn vectors_equal(&self, a: &Vec3, b: &Vec3) -> bool {
        (a - b).amax() < self.linear.max(self.angular)
    }
}

impl Default for Tolerance {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// Unsigned angle between two vectors, in `[0, π]`.
///
/// Computed from `atan2(|a × b|, a · b)`, which stays accurate for
/// nearly parallel vectors where `acos` of the dot product does not.
pub fn angle_between(a: &Vec3, b: &Vec3) -> f64 {
    a.cross(b).norm().atan2(a.dot(b))
}

/// Angle that rotates `from` onto `to`, measured counter-clockwise about
/// `normal`, after projecting both vectors into the plane with that normal.
///
/// The result lies in `[0, 2π)`.
pub fn angle_on_plane_to(from: &Vec3, to: &Vec3, normal: &Vec3) -> f64 {
    let n = match normal.try_normalize(0.0) {
        Some(n) => n,
        None => return 0.0,
    };
    let a = from - n * from.dot(&n);
    let b = to - n * to.dot(&n);
    normalize_angle(n.dot(&a.cross(&b)).atan2(a.dot(&b)))
}

/// Wrap an angle into `[0, 2π)`.
pub fn normalize_angle(angle: f64) -> f64 {
    let wrapped = angle.rem_euclid(TAU);
    if wrapped >= TAU {
        0.0
    } else {
        wrapped
    }
}
