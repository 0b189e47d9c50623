//! Reading direction of dimension labels.

use std::f64::consts::FRAC_PI_2;

use rebar_detail_math::{Tolerance, Vec2};

use crate::types::DetailSegment;

/// Whether the label of `segment` must be negated to read correctly.
///
/// The label text sits on the side of the segment given by `-up` rotated by
/// the segment rotation. When that side faces away from the shape center
/// the label is flipped. Segments centered on the shape never flip.
pub fn needs_label_flip(segment: &DetailSegment, tol: &Tolerance) -> bool {
    let from_center = Vec2::new(segment.x_offset, segment.y_offset);
    if from_center.norm() <= tol.linear {
        return false;
    }
    let (sin, cos) = segment.rotation.sin_cos();
    let label_side = Vec2::new(sin, -cos);
    tol.angle_less_than(from_center.angle(&label_side), FRAC_PI_2)
}

/// Return `segment` with its label sign set for reading.
pub fn orient_label(segment: DetailSegment, tol: &Tolerance) -> DetailSegment {
    if needs_label_flip(&segment, tol) {
        segment.with_flipped_label()
    } else {
        segment
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{LabelRange, SegmentKind};
    use std::f64::consts::PI;

    fn segment(x: f64, y: f64, rotation: f64) -> DetailSegment {
        DetailSegment {
            x_offset: x,
            y_offset: y,
            length: 10.0,
            arc_radius: 0.0,
            rotation,
            min_label: 10.0,
            max_label: Some(12.0),
            is_start_segment: false,
            is_end_segment: false,
            kind: SegmentKind::Body,
        }
    }

    #[test]
    fn test_label_facing_outward_is_flipped() {
        // Bottom segment drawn with rotation 0: label side points down, away
        // from a center above it.
        let s = orient_label(segment(0.0, -5.0, 0.0), &Tolerance::DEFAULT);
        assert_eq!(s.min_label, -10.0);
        assert_eq!(s.max_label, Some(-12.0));
    }

    #[test]
    fn test_label_facing_inward_is_kept() {
        let s = orient_label(segment(0.0, -5.0, PI), &Tolerance::DEFAULT);
        assert_eq!(s.min_label, 10.0);
        assert_eq!(s.max_label, Some(12.0));
    }

    #[test]
    fn test_centered_segment_never_flips() {
        let s = segment(0.0, 0.0, 0.0).with_label(LabelRange::fixed(4.0));
        assert!(!needs_label_flip(&s, &Tolerance::DEFAULT));
        assert_eq!(orient_label(s, &Tolerance::DEFAULT).min_label, 4.0);
    }

    #[test]
    fn test_perpendicular_label_side_is_kept() {
        // Offset along +X, label side along -Y: exactly a quarter turn apart.
        assert!(!needs_label_flip(&segment(5.0, 0.0, 0.0), &Tolerance::DEFAULT));
    }
}
