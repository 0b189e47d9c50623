//! Axis-aligned bounding box of a bar centerline.
//!
//! Arcs contribute their extreme points as well as their endpoints, so the
//! box encloses the outside of every bend rather than just the bend chord.

use std::f64::consts::{FRAC_PI_2, PI};

use rebar_detail_geom::{Arc3d, Curve, Curve3d};
use rebar_detail_math::{Point3, Vec3};

/// Axis-aligned 3D box grown curve by curve.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CurveBoundingBox {
    /// Minimum corner.
    pub min: Point3,
    /// Maximum corner.
    pub max: Point3,
}

impl CurveBoundingBox {
    /// Create an empty bounding box.
    pub fn empty() -> Self {
        Self {
            min: Point3::new(f64::INFINITY, f64::INFINITY, f64::INFINITY),
            max: Point3::new(f64::NEG_INFINITY, f64::NEG_INFINITY, f64::NEG_INFINITY),
        }
    }

    /// Box enclosing every curve of `curves`.
    pub fn from_curves<'a>(curves: impl IntoIterator<Item = &'a Curve>) -> Self {
        let mut bbox = Self::empty();
        for curve in curves {
            bbox.include_curve(curve);
        }
        bbox
    }

    /// Check if the box contains at least one point.
    pub fn is_valid(&self) -> bool {
        self.min.x <= self.max.x && self.min.y <= self.max.y && self.min.z <= self.max.z
    }

    /// Expand the box to include a point.
    pub fn include_point(&mut self, p: &Point3) {
        self.min = self.min.inf(p);
        self.max = self.max.sup(p);
    }

    /// Expand the box to include a curve, extreme points of arcs included.
    pub fn include_curve(&mut self, curve: &Curve) {
        if let Curve::Arc(arc) = curve {
            for axis in 0..3 {
                for t in axis_extrema(arc, axis) {
                    self.include_point(&arc.evaluate(t));
                }
            }
        }
        self.include_point(&curve.start_point());
        self.include_point(&curve.end_point());
    }

    /// Center of the box.
    pub fn center(&self) -> Point3 {
        Point3::from((self.min.coords + self.max.coords) / 2.0)
    }

    /// Size of the box along each axis.
    pub fn extent(&self) -> Vec3 {
        self.max - self.min
    }
}

impl Default for CurveBoundingBox {
    fn default() -> Self {
        Self::empty()
    }
}

/// Parameters strictly inside the arc where the coordinate along `axis`
/// is stationary.
///
/// The coordinate is `r·(cos t·x_k + sin t·y_k)`; its derivative vanishes at
/// `tan t = y_k / x_k`, and again every half turn after that.
fn axis_extrema(arc: &Arc3d, axis: usize) -> Vec<f64> {
    let x_k = arc.x_dir.as_ref()[axis];
    let y_k = arc.y_dir.as_ref()[axis];
    let mut theta = if x_k != 0.0 { (y_k / x_k).atan() } else { FRAC_PI_2 };

    while theta > arc.start_angle {
        theta -= PI;
    }
    let mut params = Vec::new();
    while theta < arc.end_angle {
        if arc.contains_parameter(theta) {
            params.push(theta);
        }
        theta += PI;
    }
    params
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use std::f64::consts::TAU;

    #[test]
    fn test_lines_use_endpoints() {
        let curves = [
            Curve::line(Point3::new(0.0, 0.0, 0.0), Point3::new(4.0, 0.0, 0.0)),
            Curve::line(Point3::new(4.0, 0.0, 0.0), Point3::new(4.0, -3.0, 2.0)),
        ];
        let bbox = CurveBoundingBox::from_curves(&curves);
        assert_eq!(bbox.min, Point3::new(0.0, -3.0, 0.0));
        assert_eq!(bbox.max, Point3::new(4.0, 0.0, 2.0));
        assert_eq!(bbox.center(), Point3::new(2.0, -1.5, 1.0));
    }

    #[test]
    fn test_full_circle() {
        let r = 2.5;
        let circle = Curve::from(Arc3d::in_xy(Point3::origin(), r, 0.0, TAU));
        let bbox = CurveBoundingBox::from_curves([&circle]);
        assert_relative_eq!(bbox.min, Point3::new(-r, -r, 0.0), epsilon = 1e-12);
        assert_relative_eq!(bbox.max, Point3::new(r, r, 0.0), epsilon = 1e-12);
    }

    #[test]
    fn test_quarter_arc_bulge_is_included() {
        // Quarter arc from (1,0) to (0,1): no interior extremum on any axis.
        let arc = Curve::from(Arc3d::in_xy(Point3::origin(), 1.0, 0.0, FRAC_PI_2));
        let bbox = CurveBoundingBox::from_curves([&arc]);
        assert_relative_eq!(bbox.max, Point3::new(1.0, 1.0, 0.0), epsilon = 1e-12);
        assert_relative_eq!(bbox.min, Point3::new(0.0, 0.0, 0.0), epsilon = 1e-12);

        // Half arc over the top reaches y = r between its endpoints.
        let top = Curve::from(Arc3d::in_xy(Point3::origin(), 3.0, 0.0, PI));
        let bbox = CurveBoundingBox::from_curves([&top]);
        assert_relative_eq!(bbox.max.y, 3.0, epsilon = 1e-12);
        assert_relative_eq!(bbox.min.y, 0.0, epsilon = 1e-12);
    }

    #[test]
    fn test_tilted_arc_extrema() {
        // Half circle in the XZ plane, bulging toward +Z.
        let arc = Curve::from(Arc3d::new(
            Point3::new(1.0, 1.0, 1.0),
            2.0,
            Vec3::x(),
            Vec3::z(),
            0.0,
            PI,
        ));
        let bbox = CurveBoundingBox::from_curves([&arc]);
        assert_relative_eq!(bbox.max.z, 3.0, epsilon = 1e-12);
        assert_relative_eq!(bbox.min.z, 1.0, epsilon = 1e-12);
        assert_relative_eq!(bbox.extent().y, 0.0, epsilon = 1e-12);
    }

    #[test]
    fn test_rotated_basis_arc() {
        // Basis rotated 45° in-plane; a full circle still spans ±r on X and Y.
        let s = 0.5_f64.sqrt();
        let arc = Curve::from(Arc3d::new(
            Point3::origin(),
            1.0,
            Vec3::new(s, s, 0.0),
            Vec3::new(-s, s, 0.0),
            0.0,
            TAU,
        ));
        let bbox = CurveBoundingBox::from_curves([&arc]);
        assert_relative_eq!(bbox.min, Point3::new(-1.0, -1.0, 0.0), epsilon = 1e-12);
        assert_relative_eq!(bbox.max, Point3::new(1.0, 1.0, 0.0), epsilon = 1e-12);
    }

    #[test]
    fn test_degenerate_curves_contribute_endpoints() {
        let p = Point3::new(1.0, 2.0, 3.0);
        let zero_arc = Curve::from(Arc3d::in_xy(p, 0.0, 0.0, FRAC_PI_2));
        let zero_line = Curve::line(p, p);
        let bbox = CurveBoundingBox::from_curves([&zero_arc, &zero_line]);
        assert!(bbox.is_valid());
        assert_eq!(bbox.min, p);
        assert_eq!(bbox.max, p);
    }

    #[test]
    fn test_empty_box_is_invalid() {
        assert!(!CurveBoundingBox::empty().is_valid());
    }
}
