#![warn(missing_docs)]

//! Plane and curve types for rebar centerlines.
//!
//! A bar centerline is a polycurve of straight lines and circular arcs.
//! Both implement [`Curve3d`]; the closed [`Curve`] enum is what the
//! detailing pipeline stores and transforms.

use rebar_detail_math::{Dir3, Point2, Point3, Transform, Vec3};
use std::f64::consts::TAU;

// =============================================================================
// Plane
// =============================================================================

/// An infinite plane defined by an origin point and a coordinate frame.
///
/// Parameterization: `P(u, v) = origin + u * x_dir + v * y_dir`
#[derive(Debug, Clone)]
pub struct Plane {
    /// Origin point on the plane.
    pub origin: Point3,
    /// Unit vector along the u direction.
    pub x_dir: Dir3,
    /// Unit vector along the v direction.
    pub y_dir: Dir3,
    /// Unit normal (x_dir × y_dir).
    pub normal_dir: Dir3,
}

impl Plane {
    /// Create a plane from origin and two orthogonal direction vectors.
    /// The vectors do not need to be normalized.
    pub fn new(origin: Point3, x_dir: Vec3, y_dir: Vec3) -> Self {
        let x = Dir3::new_normalize(x_dir);
        let y = Dir3::new_normalize(y_dir);
        let n = Dir3::new_normalize(x_dir.cross(&y_dir));
        Self {
            origin,
            x_dir: x,
            y_dir: y,
            normal_dir: n,
        }
    }

    /// XY plane at the origin.
    pub fn xy() -> Self {
        Self::new(Point3::origin(), Vec3::x(), Vec3::y())
    }

    /// Project a 3D point onto this plane's (u, v) parameter space.
    pub fn project(&self, p: &Point3) -> Point2 {
        let d = p - self.origin;
        Point2::new(d.dot(self.x_dir.as_ref()), d.dot(self.y_dir.as_ref()))
    }

    /// Signed distance from a point to this plane.
    pub fn signed_distance(&self, p: &Point3) -> f64 {
        (p - self.origin).dot(self.normal_dir.as_ref())
    }

    /// Orthogonal projection of a 3D point onto the plane.
    pub fn project_point(&self, p: &Point3) -> Point3 {
        p - self.signed_distance(p) * self.normal_dir.as_ref()
    }
}

// =============================================================================
// Curve types
// =============================================================================

/// The kind of a curve.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CurveKind {
    /// Straight line segment.
    Line,
    /// Bounded circular arc.
    Arc,
}

/// A bounded parametric curve in 3D space.
pub trait Curve3d: Send + Sync + std::fmt::Debug {
    /// Evaluate the curve at raw parameter `t` to get a 3D point.
    fn evaluate(&self, t: f64) -> Point3;

    /// First derivative at raw parameter `t`.
    fn tangent(&self, t: f64) -> Vec3;

    /// Parameter domain `(t_min, t_max)`.
    fn domain(&self) -> (f64, f64);

    /// The kind of this curve.
    fn curve_type(&self) -> CurveKind;

    /// Arc length of the bounded curve.
    fn length(&self) -> f64;

    /// Evaluate at a normalized parameter, where 0 is the start and 1 the end.
    fn evaluate_normalized(&self, u: f64) -> Point3 {
        let (t0, t1) = self.domain();
        self.evaluate(t0 + u * (t1 - t0))
    }

    /// First point of the curve.
    fn start_point(&self) -> Point3 {
        self.evaluate(self.domain().0)
    }

    /// Last point of the curve.
    fn end_point(&self) -> Point3 {
        self.evaluate(self.domain().1)
    }
}

/// Local derivative frame of a curve at one parameter.
#[derive(Debug, Clone)]
pub struct Frame {
    /// Point on the curve.
    pub origin: Point3,
    /// Normalized first derivative.
    pub tangent: Vec3,
    /// Normalized second derivative (points at the center of curvature).
    pub normal: Vec3,
    /// `tangent × normal`.
    pub binormal: Vec3,
}

// =============================================================================
// Line3d
// =============================================================================

/// A 3D line segment defined by origin and direction.
///
/// Parameterization: `P(t) = origin + t * direction`, `t ∈ [0, 1]`
#[derive(Debug, Clone)]
pub struct Line3d {
    /// Starting point.
    pub origin: Point3,
    /// Direction; its magnitude is the segment length.
    pub direction: Vec3,
}

impl Line3d {
    /// Create a line from two endpoints, parameterized so `t=0` gives `start` and `t=1` gives `end`.
    pub fn from_points(start: Point3, end: Point3) -> Self {
        Self {
            origin: start,
            direction: end - start,
        }
    }

    /// Unit direction, or the zero vector for a degenerate line.
    pub fn unit_direction(&self) -> Vec3 {
        self.direction.try_normalize(0.0).unwrap_or_else(Vec3::zeros)
    }
}

impl Curve3d for Line3d {
    fn evaluate(&self, t: f64) -> Point3 {
        self.origin + t * self.direction
    }

    fn tangent(&self, _t: f64) -> Vec3 {
        self.direction
    }

    fn domain(&self) -> (f64, f64) {
        (0.0, 1.0)
    }

    fn curve_type(&self) -> CurveKind {
        CurveKind::Line
    }

    fn length(&self) -> f64 {
        self.direction.norm()
    }
}

// =============================================================================
// Arc3d
// =============================================================================

/// A bounded circular arc.
///
/// Parameterization: `P(t) = center + radius * (cos(t) * x_dir + sin(t) * y_dir)`
///
/// Where `t ∈ [start_angle, end_angle]` and `start_angle < end_angle`, so the
/// arc always runs counter-clockwise about `x_dir × y_dir`.
#[derive(Debug, Clone)]
pub struct Arc3d {
    /// Center of the arc.
    pub center: Point3,
    /// Radius.
    pub radius: f64,
    /// Reference direction for t=0.
    pub x_dir: Dir3,
    /// Second in-plane direction.
    pub y_dir: Dir3,
    /// Start angle in radians.
    pub start_angle: f64,
    /// End angle in radians.
    pub end_angle: f64,
}

impl Arc3d {
    /// Create an arc from its center, radius, in-plane axes and angular bounds.
    ///
    /// An end angle below the start angle is taken to wrap once around.
    pub fn new(
        center: Point3,
        radius: f64,
        x_dir: Vec3,
        y_dir: Vec3,
        start_angle: f64,
        end_angle: f64,
    ) -> Self {
        let end_angle = if end_angle < start_angle {
            end_angle + TAU
        } else {
            end_angle
        };
        Self {
            center,
            radius,
            x_dir: Dir3::new_normalize(x_dir),
            y_dir: Dir3::new_normalize(y_dir),
            start_angle,
            end_angle,
        }
    }

    /// An arc in a plane parallel to XY, counter-clockwise about +Z.
    pub fn in_xy(center: Point3, radius: f64, start_angle: f64, end_angle: f64) -> Self {
        Self::new(center, radius, Vec3::x(), Vec3::y(), start_angle, end_angle)
    }

    /// Normal of the arc plane (`x_dir × y_dir`).
    pub fn normal(&self) -> Vec3 {
        self.x_dir.as_ref().cross(self.y_dir.as_ref())
    }

    /// Angular span in radians.
    pub fn sweep(&self) -> f64 {
        self.end_angle - self.start_angle
    }

    /// Whether `t` lies strictly between the start and end angles.
    pub fn contains_parameter(&self, t: f64) -> bool {
        t > self.start_angle && t < self.end_angle
    }

    /// Second derivative at raw parameter `t`.
    pub fn second_derivative(&self, t: f64) -> Vec3 {
        let (sin_t, cos_t) = t.sin_cos();
        -self.radius * (cos_t * self.x_dir.as_ref() + sin_t * self.y_dir.as_ref())
    }

    /// Tangent, normal and binormal at a normalized parameter.
    pub fn derivative_frame(&self, u: f64) -> Frame {
        let t = self.start_angle + u * self.sweep();
        let d1 = self.tangent(t);
        let d2 = self.second_derivative(t);
        let tangent = d1.try_normalize(0.0).unwrap_or_else(Vec3::zeros);
        let normal = d2.try_normalize(0.0).unwrap_or_else(Vec3::zeros);
        Frame {
            origin: self.evaluate(t),
            tangent,
            normal,
            binormal: tangent.cross(&normal),
        }
    }
}

impl Curve3d for Arc3d {
    fn evaluate(&self, t: f64) -> Point3 {
        let (sin_t, cos_t) = t.sin_cos();
        self.center + self.radius * (cos_t * self.x_dir.as_ref() + sin_t * self.y_dir.as_ref())
    }

    fn tangent(&self, t: f64) -> Vec3 {
        let (sin_t, cos_t) = t.sin_cos();
        self.radius * (-sin_t * self.x_dir.as_ref() + cos_t * self.y_dir.as_ref())
    }

    fn domain(&self) -> (f64, f64) {
        (self.start_angle, self.end_angle)
    }

    fn curve_type(&self) -> CurveKind {
        CurveKind::Arc
    }

    fn length(&self) -> f64 {
        self.radius * self.sweep()
    }
}

// =============================================================================
// Curve
// =============================================================================

/// One segment of a bar centerline.
#[derive(Debug, Clone)]
pub enum Curve {
    /// Straight segment.
    Line(Line3d),
    /// Circular bend.
    Arc(Arc3d),
}

impl Curve {
    /// Straight segment between two points.
    pub fn line(start: Point3, end: Point3) -> Self {
        Curve::Line(Line3d::from_points(start, end))
    }

    /// The arc, when this curve is one.
    pub fn as_arc(&self) -> Option<&Arc3d> {
        match self {
            Curve::Arc(arc) => Some(arc),
            Curve::Line(_) => None,
        }
    }

    /// Apply a rigid transform, returning a new curve.
    ///
    /// Arcs keep their angular bounds; their axes are carried through the
    /// transform so the parameterization stays consistent.
    pub fn transformed(&self, t: &Transform) -> Curve {
        match self {
            Curve::Line(line) => Curve::Line(Line3d {
                origin: t.apply_point(&line.origin),
                direction: t.apply_vec(&line.direction),
            }),
            Curve::Arc(arc) => {
                let x = t.apply_vec(arc.x_dir.as_ref());
                let y = t.apply_vec(arc.y_dir.as_ref());
                Curve::Arc(Arc3d {
                    center: t.apply_point(&arc.center),
                    radius: arc.radius * x.norm(),
                    x_dir: Dir3::new_normalize(x),
                    y_dir: Dir3::new_normalize(y),
                    start_angle: arc.start_angle,
                    end_angle: arc.end_angle,
                })
            }
        }
    }

    fn inner(&self) -> &dyn Curve3d {
        match self {
            Curve::Line(line) => line,
            Curve::Arc(arc) => arc,
        }
    }
}

impl From<Line3d> for Curve {
    fn from(line: Line3d) -> Self {
        Curve::Line(line)
    }
}

impl From<Arc3d> for Curve {
    fn from(arc: Arc3d) -> Self {
        Curve::Arc(arc)
    }
}

impl Curve3d for Curve {
    fn evaluate(&self, t: f64) -> Point3 {
        self.inner().evaluate(t)
    }

    fn tangent(&self, t: f64) -> Vec3 {
        self.inner().tangent(t)
    }

    fn domain(&self) -> (f64, f64) {
        self.inner().domain()
    }

    fn curve_type(&self) -> CurveKind {
        self.inner().curve_type()
    }

    fn length(&self) -> f64 {
        self.inner().length()
    }
}
