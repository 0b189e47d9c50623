//! Core types for bending-detail output.

use rebar_detail_geom::Plane;
use rebar_detail_math::{Point3, Vec3};
use serde::{Deserialize, Serialize};

/// Plain 3D point used in serialized detail output.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point3D {
    /// X coordinate.
    pub x: f64,
    /// Y coordinate.
    pub y: f64,
    /// Z coordinate.
    pub z: f64,
}

impl From<Point3> for Point3D {
    fn from(p: Point3) -> Self {
        Self {
            x: p.x,
            y: p.y,
            z: p.z,
        }
    }
}

impl From<Point3D> for Point3 {
    fn from(p: Point3D) -> Self {
        Point3::new(p.x, p.y, p.z)
    }
}

/// Orientation of the drafting view a detail is placed on.
#[derive(Debug, Clone)]
pub struct ViewBasis {
    /// View origin.
    pub origin: Point3,
    /// Unit vector pointing right on the sheet (view X).
    pub right: Vec3,
    /// Unit vector pointing up on the sheet (view Y).
    pub up: Vec3,
    /// Unit vector pointing out of the sheet toward the viewer (view Z).
    pub normal: Vec3,
}

impl ViewBasis {
    /// Build a basis from right/up directions; the normal is `right × up`.
    pub fn new(origin: Point3, right: Vec3, up: Vec3) -> Self {
        let right = right.normalize();
        let up = up.normalize();
        Self {
            origin,
            right,
            up,
            normal: right.cross(&up),
        }
    }

    /// Plan-style view: right = +X, up = +Y, looking down -Z.
    pub fn plan() -> Self {
        Self::new(Point3::origin(), Vec3::x(), Vec3::y())
    }

    /// The view plane through the view origin.
    pub fn plane(&self) -> Plane {
        Plane::new(self.origin, self.right, self.up)
    }
}

/// Role of a descriptor in the detail.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SegmentKind {
    /// Regular segment of the bar body.
    Body,
    /// First curve of a bar with a start hook.
    StartHook,
    /// Last curve of a bar with an end hook.
    EndHook,
}

/// Dimension value of one segment, possibly a range over a bar set.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LabelRange {
    /// Smallest (or only) value.
    pub min: f64,
    /// Largest value, present only when it differs from `min`.
    pub max: Option<f64>,
}

impl LabelRange {
    /// A single value with no range.
    pub fn fixed(value: f64) -> Self {
        Self {
            min: value,
            max: None,
        }
    }

    /// Label that suppresses the dimension text.
    pub fn blank() -> Self {
        Self::fixed(0.0)
    }
}

/// Placement and labeling data for one projected curve.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DetailSegment {
    /// Midpoint offset from the projected center along view X.
    pub x_offset: f64,
    /// Midpoint offset from the projected center along view Y.
    pub y_offset: f64,
    /// Curve length.
    pub length: f64,
    /// Arc radius, 0 for straight segments.
    pub arc_radius: f64,
    /// Drawing rotation in radians.
    pub rotation: f64,
    /// Dimension label (sign selects the reading side).
    pub min_label: f64,
    /// Upper bound of a varying dimension.
    pub max_label: Option<f64>,
    /// First curve of the centerline.
    pub is_start_segment: bool,
    /// Last curve of the centerline.
    pub is_end_segment: bool,
    /// Body or hook.
    pub kind: SegmentKind,
}

impl DetailSegment {
    /// Copy of this segment carrying `label`.
    pub fn with_label(self, label: LabelRange) -> Self {
        Self {
            min_label: label.min,
            max_label: label.max,
            ..self
        }
    }

    /// Copy of this segment with both labels negated.
    pub fn with_flipped_label(self) -> Self {
        Self {
            min_label: -self.min_label,
            max_label: self.max_label.map(|max| -max),
            ..self
        }
    }

    /// Max label as the symbol expects it: 0 when absent.
    pub fn max_label_value(&self) -> f64 {
        self.max_label.unwrap_or(0.0)
    }

    /// Whether the segment is drawn as an arc.
    pub fn is_arc(&self) -> bool {
        self.arc_radius > 0.0
    }

    /// Whether this descriptor is one of the hooks.
    pub fn is_hook(&self) -> bool {
        self.kind != SegmentKind::Body
    }
}

/// Finished annotation description for one bar.
///
/// Built once per bar by [`crate::detail_bar`] and read-only afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BendingDetail {
    projected_center: Point3D,
    bar_diameter: f64,
    start_hook: Option<DetailSegment>,
    body: Vec<DetailSegment>,
    end_hook: Option<DetailSegment>,
}

impl BendingDetail {
    pub(crate) fn new(
        projected_center: Point3,
        bar_diameter: f64,
        start_hook: Option<DetailSegment>,
        body: Vec<DetailSegment>,
        end_hook: Option<DetailSegment>,
    ) -> Self {
        Self {
            projected_center: projected_center.into(),
            bar_diameter,
            start_hook,
            body,
            end_hook,
        }
    }

    /// Placement origin of the symbol on the view plane.
    pub fn projected_center(&self) -> Point3 {
        self.projected_center.into()
    }

    /// Nominal bar diameter.
    pub fn bar_diameter(&self) -> f64 {
        self.bar_diameter
    }

    /// Start hook descriptor, if the bar has a start hook.
    pub fn start_hook(&self) -> Option<&DetailSegment> {
        self.start_hook.as_ref()
    }

    /// End hook descriptor, if the bar has an end hook.
    pub fn end_hook(&self) -> Option<&DetailSegment> {
        self.end_hook.as_ref()
    }

    /// Body descriptors in centerline order.
    pub fn body(&self) -> &[DetailSegment] {
        &self.body
    }

    /// Every descriptor in centerline order, hooks included.
    pub fn segments(&self) -> impl Iterator<Item = &DetailSegment> {
        self.start_hook
            .iter()
            .chain(self.body.iter())
            .chain(self.end_hook.iter())
    }
}
