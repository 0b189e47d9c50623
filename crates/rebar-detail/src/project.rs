//! Projection of aligned centerline curves into detail segments.

use std::f64::consts::{PI, TAU};

use rebar_detail_geom::{Curve, Curve3d, Plane};
use rebar_detail_math::{angle_on_plane_to, Point3, Tolerance};

use crate::bar::BarHooks;
use crate::types::{DetailSegment, SegmentKind, ViewBasis};

/// Detail segments of one bar, split into hooks and body.
#[derive(Debug, Clone, Default)]
pub struct ProjectedSegments {
    /// Descriptor of the first curve when the bar has a start hook.
    pub start_hook: Option<DetailSegment>,
    /// Remaining descriptors in centerline order.
    pub body: Vec<DetailSegment>,
    /// Descriptor of the last curve when the bar has an end hook.
    pub end_hook: Option<DetailSegment>,
}

/// Drawing rotation of an aligned curve in the view.
///
/// Lines measure `2π` minus the counter-clockwise angle from their direction
/// to view-right. Arcs measure `π` minus that angle for their midpoint
/// tangent, plus a half turn when they bend clockwise in the view.
pub fn segment_rotation(curve: &Curve, view: &ViewBasis, tol: &Tolerance) -> f64 {
    match curve {
        Curve::Line(line) => TAU - angle_on_plane_to(&line.direction, &view.right, &view.normal),
        Curve::Arc(arc) => {
            let frame = arc.derivative_frame(0.5);
            let mut rotation = PI - angle_on_plane_to(&frame.tangent, &view.right, &view.normal);
            if !tol.vectors_equal(&frame.binormal, &view.normal) {
                rotation += PI;
            }
            rotation
        }
    }
}

/// Describe one aligned curve relative to the projected center.
///
/// Labels are left blank; the constraint walker fills them in.
pub fn describe_curve(
    curve: &Curve,
    frame: &Plane,
    view: &ViewBasis,
    kind: SegmentKind,
    tol: &Tolerance,
) -> DetailSegment {
    let offset = frame.project(&curve.evaluate_normalized(0.5));
    DetailSegment {
        x_offset: offset.x,
        y_offset: offset.y,
        length: curve.length(),
        arc_radius: curve.as_arc().map_or(0.0, |arc| arc.radius),
        rotation: segment_rotation(curve, view, tol),
        min_label: 0.0,
        max_label: None,
        is_start_segment: false,
        is_end_segment: false,
        kind,
    }
}

/// Project every aligned curve, diverting the first and last curves into
/// hook slots when the bar has hooks at those ends.
///
/// A single curve with hooks at both ends becomes the start hook.
pub fn project_segments(
    curves: &[Curve],
    view: &ViewBasis,
    projected_center: &Point3,
    hooks: &BarHooks,
    tol: &Tolerance,
) -> ProjectedSegments {
    let frame = Plane::new(*projected_center, view.right, view.up);
    let last = curves.len().saturating_sub(1);
    let mut projected = ProjectedSegments::default();

    for (index, curve) in curves.iter().enumerate() {
        let kind = if index == 0 && hooks.start.is_some() {
            SegmentKind::StartHook
        } else if index == last && hooks.end.is_some() {
            SegmentKind::EndHook
        } else {
            SegmentKind::Body
        };

        let mut segment = describe_curve(curve, &frame, view, kind, tol);
        segment.is_start_segment = index == 0;
        segment.is_end_segment = index == last;

        match kind {
            SegmentKind::StartHook => projected.start_hook = Some(segment),
            SegmentKind::EndHook => projected.end_hook = Some(segment),
            SegmentKind::Body => projected.body.push(segment),
        }
    }
    projected
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bar::Hook;
    use approx::assert_relative_eq;
    use rebar_detail_geom::Arc3d;
    use rebar_detail_math::{Transform, Vec3};
    use std::f64::consts::FRAC_PI_2;

    fn tol() -> Tolerance {
        Tolerance::DEFAULT
    }

    #[test]
    fn test_line_rotations() {
        let view = ViewBasis::plan();
        let along_x = Curve::line(Point3::origin(), Point3::new(3.0, 0.0, 0.0));
        let along_y = Curve::line(Point3::origin(), Point3::new(0.0, 3.0, 0.0));
        let back_x = Curve::line(Point3::new(3.0, 0.0, 0.0), Point3::origin());
        assert_relative_eq!(segment_rotation(&along_x, &view, &tol()), TAU, epsilon = 1e-12);
        assert_relative_eq!(segment_rotation(&along_y, &view, &tol()), FRAC_PI_2, epsilon = 1e-12);
        assert_relative_eq!(segment_rotation(&back_x, &view, &tol()), PI, epsilon = 1e-12);
    }

    #[test]
    fn test_arc_rotation_depends_on_bend_side() {
        let view = ViewBasis::plan();
        // Counter-clockwise over the top: midpoint tangent points along -X.
        let ccw = Curve::from(Arc3d::in_xy(Point3::origin(), 1.0, 0.0, PI));
        assert_relative_eq!(segment_rotation(&ccw, &view, &tol()), 0.0, epsilon = 1e-12);

        // Clockwise under the bottom: same tangent, opposite binormal.
        let cw = Curve::from(Arc3d::new(
            Point3::origin(),
            1.0,
            Vec3::x(),
            -Vec3::y(),
            0.0,
            PI,
        ));
        assert_relative_eq!(segment_rotation(&cw, &view, &tol()), PI, epsilon = 1e-12);
    }

    #[test]
    fn test_offsets_measure_from_projected_center() {
        let view = ViewBasis::plan();
        let curves = vec![
            Curve::line(Point3::new(0.0, 0.0, 0.0), Point3::new(8.0, 0.0, 0.0)),
            Curve::from(Arc3d::in_xy(Point3::new(8.0, 2.0, 0.0), 2.0, -FRAC_PI_2, 0.0)),
        ];
        let center = Point3::new(4.0, 1.0, 0.0);
        let projected = project_segments(&curves, &view, &center, &BarHooks::default(), &tol());
        assert_eq!(projected.body.len(), 2);

        let line = &projected.body[0];
        assert_relative_eq!(line.x_offset, 0.0, epsilon = 1e-12);
        assert_relative_eq!(line.y_offset, -1.0, epsilon = 1e-12);
        assert_relative_eq!(line.length, 8.0, epsilon = 1e-12);
        assert_eq!(line.arc_radius, 0.0);
        assert!(line.is_start_segment && !line.is_end_segment);

        let arc = &projected.body[1];
        let s = 0.5_f64.sqrt();
        assert_relative_eq!(arc.x_offset, 4.0 + 2.0 * s, epsilon = 1e-12);
        assert_relative_eq!(arc.y_offset, 1.0 - 2.0 * s, epsilon = 1e-12);
        assert_relative_eq!(arc.length, PI, epsilon = 1e-12);
        assert_eq!(arc.arc_radius, 2.0);
        assert!(arc.is_end_segment);
    }

    #[test]
    fn test_offsets_ignore_depth() {
        let view = ViewBasis::plan();
        let lift = Transform::translation(0.0, 0.0, 7.5);
        let curve = Curve::line(Point3::new(1.0, 1.0, 0.0), Point3::new(3.0, 1.0, 0.0));
        let center = Point3::origin();
        let flat = project_segments(
            std::slice::from_ref(&curve),
            &view,
            &center,
            &BarHooks::default(),
            &tol(),
        );
        let lifted = project_segments(
            &[curve.transformed(&lift)],
            &view,
            &center,
            &BarHooks::default(),
            &tol(),
        );
        assert_eq!(flat.body, lifted.body);
    }

    fn three_lines() -> Vec<Curve> {
        vec![
            Curve::line(Point3::new(0.0, 4.0, 0.0), Point3::origin()),
            Curve::line(Point3::origin(), Point3::new(6.0, 0.0, 0.0)),
            Curve::line(Point3::new(6.0, 0.0, 0.0), Point3::new(6.0, 4.0, 0.0)),
        ]
    }

    #[test]
    fn test_hooks_take_first_and_last_curve() {
        let hooks = BarHooks {
            start: Some(Hook { tangent_length: 4.0 }),
            end: Some(Hook { tangent_length: 4.0 }),
        };
        let projected = project_segments(
            &three_lines(),
            &ViewBasis::plan(),
            &Point3::new(3.0, 2.0, 0.0),
            &hooks,
            &tol(),
        );
        let start = projected.start_hook.as_ref().map(|s| s.kind);
        let end = projected.end_hook.as_ref().map(|s| s.kind);
        assert_eq!(start, Some(SegmentKind::StartHook));
        assert_eq!(end, Some(SegmentKind::EndHook));
        assert_eq!(projected.body.len(), 1);
        assert_relative_eq!(projected.body[0].length, 6.0, epsilon = 1e-12);
        assert!(!projected.body[0].is_start_segment && !projected.body[0].is_end_segment);
    }

    #[test]
    fn test_only_end_hook() {
        let hooks = BarHooks {
            start: None,
            end: Some(Hook { tangent_length: 4.0 }),
        };
        let projected = project_segments(
            &three_lines(),
            &ViewBasis::plan(),
            &Point3::origin(),
            &hooks,
            &tol(),
        );
        assert!(projected.start_hook.is_none());
        assert!(projected.end_hook.is_some());
        assert_eq!(projected.body.len(), 2);
        assert!(projected.body[0].is_start_segment);
    }

    #[test]
    fn test_single_curve_with_both_hooks_becomes_start_hook() {
        let hooks = BarHooks {
            start: Some(Hook { tangent_length: 1.0 }),
            end: Some(Hook { tangent_length: 1.0 }),
        };
        let curve = Curve::line(Point3::origin(), Point3::new(2.0, 0.0, 0.0));
        let projected =
            project_segments(&[curve], &ViewBasis::plan(), &Point3::origin(), &hooks, &tol());
        assert!(projected.start_hook.is_some());
        assert!(projected.end_hook.is_none());
        assert!(projected.body.is_empty());
    }
}
