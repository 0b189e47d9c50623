//! Input description of a bar as supplied by the host model.

use rebar_detail_geom::{Curve, Curve3d};
use rebar_detail_math::{Tolerance, Transform, Vec3};

use crate::error::{DetailError, Result};

/// Centerline geometry of a bar set.
#[derive(Debug, Clone)]
pub struct BarShapeGeometry {
    /// Centerline curves of one bar position, in bar order.
    pub curves: Vec<Curve>,
    /// Normal of the bend plane.
    pub normal: Vec3,
    /// Rigid transform of each bar position relative to `curves`.
    pub position_transforms: Vec<Transform>,
    /// Per-position hidden flag in the detailed view. Missing entries are visible.
    pub hidden_in_view: Vec<bool>,
}

impl BarShapeGeometry {
    /// A single-position bar drawn where its curves are.
    pub fn single(curves: Vec<Curve>, normal: Vec3) -> Self {
        Self {
            curves,
            normal,
            position_transforms: vec![Transform::identity()],
            hidden_in_view: Vec::new(),
        }
    }

    /// Number of bar positions in the set.
    pub fn num_positions(&self) -> usize {
        self.position_transforms.len()
    }

    /// Whether `position` is hidden in the view.
    pub fn is_hidden(&self, position: usize) -> bool {
        self.hidden_in_view.get(position).copied().unwrap_or(false)
    }

    /// Transform of `position`, identity when the set carries none for it.
    pub fn position_transform(&self, position: usize) -> Transform {
        self.position_transforms
            .get(position)
            .cloned()
            .unwrap_or_default()
    }
}

/// How bar positions of a set are distributed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LayoutRule {
    /// One bar only.
    #[default]
    Single,
    /// A fixed number of bars.
    FixedNumber,
    /// As many bars as fit at a maximum spacing.
    MaximumSpacing,
    /// A number of bars at a given spacing.
    NumberWithSpacing,
    /// As many bars as fit at a minimum clear spacing.
    MinimumClearSpacing,
}

/// Layout metadata of a bar set.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BarLayout {
    /// Distribution rule.
    pub rule: LayoutRule,
    /// Whether the first position belongs to the set.
    pub include_first: bool,
    /// Whether the last position belongs to the set.
    pub include_last: bool,
    /// Whether shape dimensions vary from position to position.
    pub varying_length: bool,
}

impl Default for BarLayout {
    fn default() -> Self {
        Self {
            rule: LayoutRule::Single,
            include_first: true,
            include_last: true,
            varying_length: false,
        }
    }
}

impl BarLayout {
    /// Active positions of a set with `num_positions` bars, as a half-open range.
    ///
    /// Only multi-bar layouts can exclude their first or last bar.
    pub fn active_positions(&self, num_positions: usize) -> std::ops::Range<usize> {
        let mut start = 0;
        let mut end = num_positions;
        if self.rule != LayoutRule::Single {
            if !self.include_first {
                start += 1;
            }
            if !self.include_last {
                end = end.saturating_sub(1);
            }
        }
        start..end.max(start)
    }
}

/// A hook at one end of the bar.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Hook {
    /// Straight extension length past the hook bend.
    pub tangent_length: f64,
}

/// Hooks at both ends of a bar.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct BarHooks {
    /// Hook at the start of the centerline.
    pub start: Option<Hook>,
    /// Hook at the end of the centerline.
    pub end: Option<Hook>,
}

/// Kind of a symbolic shape dimension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConstraintKind {
    /// Length of a straight segment.
    SegmentLength,
    /// Length of a simple arc.
    ArcLength,
    /// Radius of a 180° bend.
    BendRadius180,
    /// Arc length of a 180° bend.
    BendArcLength180,
}

/// Numeric value of a constraint over the positions of a set.
#[derive(Debug, Clone, PartialEq)]
pub enum ConstraintValues {
    /// Same value at every position.
    Fixed(f64),
    /// One value per bar position.
    PerPosition(Vec<f64>),
}

/// A symbolic dimension of the bar shape.
#[derive(Debug, Clone, PartialEq)]
pub struct ShapeConstraint {
    /// What the dimension measures.
    pub kind: ConstraintKind,
    /// Its values.
    pub values: ConstraintValues,
}

impl ShapeConstraint {
    /// Constraint with one value at every position.
    pub fn fixed(kind: ConstraintKind, value: f64) -> Self {
        Self {
            kind,
            values: ConstraintValues::Fixed(value),
        }
    }

    /// Constraint with a value per position.
    pub fn per_position(kind: ConstraintKind, values: Vec<f64>) -> Self {
        Self {
            kind,
            values: ConstraintValues::PerPosition(values),
        }
    }

    /// Value at bar position `position`.
    pub fn value_at(&self, position: usize) -> Result<f64> {
        match &self.values {
            ConstraintValues::Fixed(value) => Ok(*value),
            ConstraintValues::PerPosition(values) => values.get(position).copied().ok_or(
                DetailError::MissingConstraintValue {
                    position,
                    positions: values.len(),
                },
            ),
        }
    }
}

/// Variant of an arc-defined shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArcShapeKind {
    /// Open circular arc.
    Arc,
    /// Closed circle with lapped ends.
    LappedCircle,
    /// Spiral.
    Spiral,
}

/// Constraints of one logical segment of a segment-defined shape.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ShapeSegment {
    /// Constraints attached to this segment.
    pub constraints: Vec<ShapeConstraint>,
}

impl ShapeSegment {
    /// Segment dimensioned by a single straight length.
    pub fn length(value: f64) -> Self {
        Self {
            constraints: vec![ShapeConstraint::fixed(ConstraintKind::SegmentLength, value)],
        }
    }
}

/// The symbolic definition of a bar shape.
#[derive(Debug, Clone, PartialEq)]
pub enum ShapeDefinition {
    /// A simple arc shape, dimensioned by its arc length.
    ByArc {
        /// Arc shape variant.
        kind: ArcShapeKind,
        /// Shape constraints.
        constraints: Vec<ShapeConstraint>,
    },
    /// A polyline shape with constraints grouped per logical segment.
    BySegments(Vec<ShapeSegment>),
}

/// Everything the pipeline reads about one bar.
#[derive(Debug, Clone)]
pub struct BarInput {
    /// Centerline geometry.
    pub geometry: BarShapeGeometry,
    /// Set layout.
    pub layout: BarLayout,
    /// End hooks.
    pub hooks: BarHooks,
    /// Symbolic shape.
    pub shape: ShapeDefinition,
    /// Nominal bar diameter.
    pub diameter: f64,
}

impl BarInput {
    /// Active positions of the set.
    pub fn active_positions(&self) -> std::ops::Range<usize> {
        self.layout.active_positions(self.geometry.num_positions())
    }

    /// Lowest active position that is visible in the view.
    pub fn visible_position(&self) -> Result<usize> {
        self.active_positions()
            .find(|&position| !self.geometry.is_hidden(position))
            .ok_or(DetailError::NoVisiblePosition)
    }

    /// Reject bars the pipeline cannot draw: no centerline, no bend-plane
    /// normal, or curves leaving the bend plane.
    pub fn check_supported(&self, tol: &Tolerance) -> Result<()> {
        let curves = &self.geometry.curves;
        let first = match curves.first() {
            Some(curve) => curve.start_point(),
            None => return Err(DetailError::Unsupported("bar has no centerline".into())),
        };
        let normal = match self.geometry.normal.try_normalize(0.0) {
            Some(normal) => normal,
            None => {
                return Err(DetailError::Unsupported(
                    "bar has no bend-plane normal".into(),
                ))
            }
        };
        if curves.len() == 1 {
            return Ok(());
        }
        for (index, curve) in curves.iter().enumerate() {
            for u in [0.0, 0.5, 1.0] {
                let offset = (curve.evaluate_normalized(u) - first).dot(&normal);
                if !tol.is_zero(offset) {
                    return Err(DetailError::Unsupported(format!(
                        "curve {index} leaves the bend plane by {offset:.3e}"
                    )));
                }
            }
        }
        Ok(())
    }
}
