use proptest::prelude::*;
use std::f64::consts::{FRAC_PI_2, PI, TAU};

use rebar_detail::bbox::CurveBoundingBox;
use rebar_detail::rebar_detail_geom::{Arc3d, Curve, Curve3d};
use rebar_detail::rebar_detail_math::{Dir3, Point3, Tolerance, Transform, Vec3};
use rebar_detail::{
    align_to_view, detail_bar, BarInput, BarLayout, BarShapeGeometry, ConstraintKind,
    DetailSettings, LayoutRule, ShapeConstraint, ShapeDefinition, ShapeSegment, ViewBasis,
};

fn coord() -> impl Strategy<Value = f64> {
    -100.0f64..100.0
}

fn polyline(points: &[Point3]) -> Vec<Curve> {
    points
        .windows(2)
        .map(|w| Curve::line(w[0], w[1]))
        .collect()
}

proptest! {
    #[test]
    fn test_coplanar_alignment_is_position_transform(
        xs in prop::array::uniform3(coord()),
        ys in prop::array::uniform3(coord()),
        z in coord(),
        shift in prop::array::uniform3(coord()),
        flipped in any::<bool>(),
    ) {
        let points: Vec<Point3> = (0..3).map(|i| Point3::new(xs[i], ys[i], z)).collect();
        let normal = if flipped { -Vec3::z() } else { Vec3::z() };
        let position = Transform::translation(shift[0], shift[1], shift[2]);
        let alignment = align_to_view(
            &polyline(&points),
            &normal,
            &position,
            &ViewBasis::plan(),
            &Tolerance::DEFAULT,
        );
        prop_assert_eq!(alignment.transform, position);
        prop_assert!(alignment.axis.is_none());
    }

    #[test]
    fn test_swapped_view_axes_change_only_reading_branch(
        tilt in 0.01f64..3.13,
        spin in 0.0f64..TAU,
    ) {
        // Bend normal tipped away from +Z by `tilt`, in a direction set by `spin`.
        let axis = Dir3::new_normalize(Vec3::new(spin.cos(), spin.sin(), 0.0));
        let normal = Transform::rotation_about_axis(&axis, tilt).apply_vec(&Vec3::z());
        let curves = vec![Curve::line(Point3::origin(), Point3::new(1.0, 0.0, 0.0))];
        let tol = Tolerance::DEFAULT;

        let plan = ViewBasis::plan();
        let swapped = ViewBasis::new(Point3::origin(), Vec3::y(), Vec3::x());
        let a = align_to_view(&curves, &normal, &Transform::identity(), &plan, &tol);
        let b = align_to_view(&curves, &normal, &Transform::identity(), &swapped, &tol);

        let expected = if tilt > FRAC_PI_2 { PI - tilt } else { tilt };
        prop_assert!((a.fold_angle - expected).abs() < 1e-9);
        prop_assert!((a.fold_angle - b.fold_angle).abs() < 1e-12);

        // The fold axis points at `spin` in plan. Plan reads it against +x,
        // the swapped view against +y seen from below.
        prop_assume!((spin % FRAC_PI_2).abs() > 1e-6 && (FRAC_PI_2 - spin % FRAC_PI_2) > 1e-6);
        prop_assert_eq!(a.reading_flip, spin.cos() > 0.0);
        prop_assert_eq!(b.reading_flip, spin.sin() < 0.0);

        // Without the reading half turn both folds turn by the same magnitude.
        for alignment in [&a, &b] {
            let half_turn = if alignment.reading_flip { PI } else { 0.0 };
            let base = alignment.rotation_angle - half_turn;
            prop_assert!((base.abs() - a.fold_angle).abs() < 1e-9);
        }
    }

    #[test]
    fn test_full_circle_box_spans_diameter(
        cx in coord(),
        cy in coord(),
        cz in coord(),
        radius in 0.1f64..50.0,
        start in -TAU..TAU,
    ) {
        let center = Point3::new(cx, cy, cz);
        let circle = Curve::from(Arc3d::in_xy(center, radius, start, start + TAU));
        let bbox = CurveBoundingBox::from_curves([&circle]);
        let eps = 1e-9 * (1.0 + radius + cx.abs() + cy.abs());
        prop_assert!((bbox.min.x - (cx - radius)).abs() < eps);
        prop_assert!((bbox.max.x - (cx + radius)).abs() < eps);
        prop_assert!((bbox.min.y - (cy - radius)).abs() < eps);
        prop_assert!((bbox.max.y - (cy + radius)).abs() < eps);
        prop_assert!((bbox.extent().z).abs() < eps);
    }

    #[test]
    fn test_face_on_offsets_match_direct_measurement(
        xs in prop::array::uniform4(coord()),
        ys in prop::array::uniform4(coord()),
    ) {
        let points: Vec<Point3> = (0..4).map(|i| Point3::new(xs[i], ys[i], 0.0)).collect();
        let curves = polyline(&points);
        prop_assume!(curves.iter().all(|c| c.length() > 1e-3));

        let bar = BarInput {
            geometry: BarShapeGeometry::single(curves.clone(), Vec3::z()),
            layout: BarLayout::default(),
            hooks: Default::default(),
            shape: ShapeDefinition::BySegments(Vec::new()),
            diameter: 0.5,
        };
        let detail = detail_bar(&bar, &ViewBasis::plan(), &DetailSettings::default()).unwrap();
        let center = CurveBoundingBox::from_curves(&curves).center();
        prop_assert_eq!(detail.body().len(), curves.len());

        for (segment, curve) in detail.body().iter().zip(&curves) {
            let mid = curve.evaluate_normalized(0.5);
            prop_assert!((segment.x_offset - (mid.x - center.x)).abs() < 1e-9);
            prop_assert!((segment.y_offset - (mid.y - center.y)).abs() < 1e-9);
            prop_assert!((segment.length - curve.length()).abs() < 1e-9);
        }
    }

    #[test]
    fn test_varying_range_tracks_extremes(
        base in 1.0f64..100.0,
        positions in 2usize..8,
        odd_one in 0usize..8,
        delta in prop_oneof![-0.99f64..-0.01, 0.01f64..50.0],
    ) {
        let odd_one = odd_one % positions;
        let mut lengths = vec![base; positions];
        let bar = |lengths: Vec<f64>| BarInput {
            geometry: BarShapeGeometry {
                curves: vec![Curve::line(Point3::origin(), Point3::new(base, 0.0, 0.0))],
                normal: Vec3::z(),
                position_transforms: vec![Transform::identity(); positions],
                hidden_in_view: Vec::new(),
            },
            layout: BarLayout {
                rule: LayoutRule::FixedNumber,
                varying_length: true,
                ..BarLayout::default()
            },
            hooks: Default::default(),
            shape: ShapeDefinition::BySegments(vec![ShapeSegment {
                constraints: vec![ShapeConstraint::per_position(
                    ConstraintKind::SegmentLength,
                    lengths,
                )],
            }]),
            diameter: 0.5,
        };
        let view = ViewBasis::plan();
        let settings = DetailSettings::default();

        let uniform = detail_bar(&bar(lengths.clone()), &view, &settings).unwrap();
        prop_assert_eq!(uniform.body()[0].max_label, None);
        prop_assert_eq!(uniform.body()[0].min_label.abs(), base);

        lengths[odd_one] = base * (1.0 + delta);
        let (lo, hi) = if delta < 0.0 { (lengths[odd_one], base) } else { (base, lengths[odd_one]) };
        let varied = detail_bar(&bar(lengths), &view, &settings).unwrap();
        let segment = &varied.body()[0];
        prop_assert_eq!(segment.min_label.abs(), lo);
        prop_assert_eq!(segment.max_label.map(f64::abs), Some(hi));
    }
}
