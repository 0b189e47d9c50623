//! Alignment of a bar's bend plane with the view plane.
//!
//! A bar whose bend plane is tilted against the view is folded about the
//! line where the two planes meet, pivoting at the centerline's bounding-box
//! center, so the bent shape is drawn true to size. The fold direction is
//! chosen so that the bend reads from the bottom and from the right.

use std::f64::consts::{FRAC_PI_2, PI};

use rebar_detail_geom::Curve;
use rebar_detail_math::{
    angle_between, angle_on_plane_to, Dir3, Point3, Tolerance, Transform, Vec3,
};

use crate::bbox::CurveBoundingBox;
use crate::types::ViewBasis;

/// Result of aligning one bar position with the view.
#[derive(Debug, Clone)]
pub struct Alignment {
    /// Maps base centerline curves into the view-aligned position.
    pub transform: Transform,
    /// Bounding-box center of the positioned (not yet folded) centerline.
    pub box_center: Point3,
    /// `box_center` projected orthogonally onto the view plane.
    pub projected_center: Point3,
    /// Angle between bend plane and view plane, folded into `[0, π/2]`.
    pub fold_angle: f64,
    /// Signed rotation applied about `axis`, reading half-turn included.
    pub rotation_angle: f64,
    /// Intersection direction of the two planes, `None` when coplanar.
    pub axis: Option<Dir3>,
    /// Whether a half turn was added so the bend reads from bottom/right.
    pub reading_flip: bool,
}

impl Alignment {
    /// Transform every curve into the aligned position.
    pub fn apply(&self, curves: &[Curve]) -> Vec<Curve> {
        curves.iter().map(|c| c.transformed(&self.transform)).collect()
    }
}

/// Whether a fold axis at `in_plane` (angle from the axis to view-right,
/// counter-clockwise about the view normal) needs an extra half turn.
///
/// Angles in `[0, π/2)` and `[3π/2, 2π)` flip; the lower boundary of each
/// interval is inclusive within tolerance, the upper one exclusive.
pub fn needs_reading_flip(in_plane: f64, tol: &Tolerance) -> bool {
    (tol.angle_at_least(in_plane, 0.0) && tol.angle_less_than(in_plane, FRAC_PI_2))
        || tol.angle_at_least(in_plane, 3.0 * FRAC_PI_2)
}

/// Compute the transform that brings one bar position into the view plane.
///
/// `curves` are the base centerline curves, `position` the rigid transform
/// of the bar position being drawn.
pub fn align_to_view(
    curves: &[Curve],
    bend_normal: &Vec3,
    position: &Transform,
    view: &ViewBasis,
    tol: &Tolerance,
) -> Alignment {
    let positioned: Vec<Curve> = curves.iter().map(|c| c.transformed(position)).collect();
    let box_center = CurveBoundingBox::from_curves(&positioned).center();
    let projected_center = view.plane().project_point(&box_center);

    let raw_angle = angle_between(&view.normal, bend_normal);
    let fold_angle = if raw_angle > FRAC_PI_2 {
        PI - raw_angle
    } else {
        raw_angle
    };

    if tol.angles_equal(fold_angle, 0.0) {
        return Alignment {
            transform: position.clone(),
            box_center,
            projected_center,
            fold_angle,
            rotation_angle: 0.0,
            axis: None,
            reading_flip: false,
        };
    }

    let axis_vec = view.normal.cross(bend_normal);
    let axis = Dir3::new_normalize(axis_vec);
    let in_plane = angle_on_plane_to(&axis_vec, &view.right, &view.normal);
    let reading_flip = needs_reading_flip(in_plane, tol);

    // Rotating about normal_view × normal_bend moves the bend normal away
    // from the view normal. From a quarter turn on (within tolerance) it is
    // carried onto the reversed view normal; below that it folds back.
    let mut rotation_angle = if tol.angle_at_least(raw_angle, FRAC_PI_2) {
        PI - raw_angle
    } else {
        -raw_angle
    };
    if reading_flip {
        rotation_angle += PI;
    }

    let fold = Transform::rotation_at_point(&axis, rotation_angle, &box_center);
    Alignment {
        transform: fold.then(position),
        box_center,
        projected_center,
        fold_angle,
        rotation_angle,
        axis: Some(axis),
        reading_flip,
    }
}
