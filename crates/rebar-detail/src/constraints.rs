//! Mapping of symbolic shape constraints onto projected body segments.
//!
//! Shape constraints and centerline curves are ordered the same way but at
//! different granularity: vertex curves between straight segments carry no
//! constraint, and 180° bends add a constraint without adding a straight
//! segment. [`ConstraintWalker`] keeps the two lists in step with an explicit
//! state and a cursor over the body slots.

use std::ops::Range;

use rebar_detail_math::Tolerance;
use tracing::trace;

use crate::bar::{
    ArcShapeKind, BarInput, ConstraintKind, ShapeConstraint, ShapeDefinition, ShapeSegment,
};
use crate::error::{DetailError, Result};
use crate::types::{DetailSegment, LabelRange};

// =============================================================================
// Label ranges
// =============================================================================

/// Evaluates constraints over the positions of a bar set.
#[derive(Debug, Clone)]
pub struct LabelResolver {
    varying: bool,
    active: Range<usize>,
    visible: usize,
    tolerance: Tolerance,
}

impl LabelResolver {
    /// Resolver for `bar`, drawn at its `visible` position.
    pub fn new(bar: &BarInput, visible: usize, tolerance: Tolerance) -> Self {
        Self {
            varying: bar.layout.varying_length,
            active: bar.active_positions(),
            visible,
            tolerance,
        }
    }

    /// Label range of `constraint`.
    ///
    /// Varying sets report the smallest and largest value over the active
    /// positions, collapsing to a single value when the two agree. Other sets
    /// report the value at the visible position.
    pub fn resolve(&self, constraint: &ShapeConstraint) -> Result<LabelRange> {
        if !self.varying {
            return constraint.value_at(self.visible).map(LabelRange::fixed);
        }
        if self.active.is_empty() {
            return Err(DetailError::NoVisiblePosition);
        }

        let mut min = f64::INFINITY;
        let mut max = f64::NEG_INFINITY;
        for position in self.active.clone() {
            let value = constraint.value_at(position)?;
            min = min.min(value);
            max = max.max(value);
        }
        if self.tolerance.lengths_equal(min, max) {
            Ok(LabelRange::fixed(min))
        } else {
            Ok(LabelRange {
                min,
                max: Some(max),
            })
        }
    }
}

// =============================================================================
// Walker
// =============================================================================

/// Position of the walker relative to the last labeled segment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WalkerState {
    /// Nothing labeled yet.
    AwaitSegment,
    /// The last label went to a straight segment; a vertex curve may follow.
    AfterPlainSegment,
    /// The last label went to a 180° bend.
    AfterBendArc,
}

/// Shape of a body slot as seen by the walker.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SlotKind {
    /// A straight segment of non-zero length.
    Straight,
    /// A bend arc or a zero-length joint between segments.
    Vertex,
}

impl SlotKind {
    /// Classify a projected body segment.
    pub fn of(segment: &DetailSegment, tol: &Tolerance) -> Self {
        if segment.is_arc() || tol.is_zero(segment.length) {
            SlotKind::Vertex
        } else {
            SlotKind::Straight
        }
    }
}

/// What one logical shape segment contributes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SegmentEvent {
    /// A 180° bend dimensioned by its arc length.
    BendArcLength(LabelRange),
    /// A 180° bend dimensioned by its radius; drawn without a length label.
    BendRadius,
    /// A straight segment dimensioned by its length.
    Length(LabelRange),
    /// Nothing to label.
    Unlabeled,
}

impl SegmentEvent {
    /// Classify a logical shape segment from its constraints.
    ///
    /// A positive bend arc length wins over a bend radius, which wins over a
    /// plain length. Upper bounds of zero are dropped.
    pub fn from_segment(segment: &ShapeSegment, resolver: &LabelResolver) -> Result<Self> {
        let mut length: Option<LabelRange> = None;
        let mut bend_radius: Option<LabelRange> = None;
        let mut bend_arc_length: Option<LabelRange> = None;

        for constraint in &segment.constraints {
            let slot = match constraint.kind {
                ConstraintKind::SegmentLength => &mut length,
                ConstraintKind::BendRadius180 => &mut bend_radius,
                ConstraintKind::BendArcLength180 => &mut bend_arc_length,
                ConstraintKind::ArcLength => continue,
            };
            *slot = Some(resolver.resolve(constraint)?);
        }

        let positive = |range: Option<LabelRange>| {
            range.filter(|r| r.min > 0.0).map(|r| LabelRange {
                min: r.min,
                max: r.max.filter(|&max| max > 0.0),
            })
        };

        Ok(match (positive(bend_arc_length), positive(bend_radius), positive(length)) {
            (Some(arc), _, _) => SegmentEvent::BendArcLength(arc),
            (None, Some(_), Some(_)) => SegmentEvent::BendRadius,
            (None, _, Some(length)) => SegmentEvent::Length(length),
            _ => SegmentEvent::Unlabeled,
        })
    }
}

/// Labels body slots one logical shape segment at a time.
#[derive(Debug, Clone)]
pub struct ConstraintWalker {
    slots: Vec<SlotKind>,
    labels: Vec<LabelRange>,
    state: WalkerState,
    cursor: usize,
}

impl ConstraintWalker {
    /// Walker over `slots`. A start hook counts as an already labeled
    /// straight segment.
    pub fn new(slots: Vec<SlotKind>, has_start_hook: bool) -> Self {
        let labels = vec![LabelRange::blank(); slots.len()];
        let state = if has_start_hook {
            WalkerState::AfterPlainSegment
        } else {
            WalkerState::AwaitSegment
        };
        Self {
            slots,
            labels,
            state,
            cursor: 0,
        }
    }

    /// Walker over projected body segments.
    pub fn for_body(body: &[DetailSegment], has_start_hook: bool, tol: &Tolerance) -> Self {
        Self::new(
            body.iter().map(|s| SlotKind::of(s, tol)).collect(),
            has_start_hook,
        )
    }

    /// Current state.
    pub fn state(&self) -> WalkerState {
        self.state
    }

    /// Index of the next unlabeled slot.
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Labels assigned so far, one per slot.
    pub fn labels(&self) -> &[LabelRange] {
        &self.labels
    }

    /// Consume the walker, returning one label per slot.
    pub fn finish(self) -> Vec<LabelRange> {
        self.labels
    }

    fn slot_is_vertex(&self, index: usize) -> bool {
        self.slots.get(index) == Some(&SlotKind::Vertex)
    }

    fn assign(&mut self, index: usize, label: LabelRange) -> Result<()> {
        let slots = self.slots.len();
        match self.labels.get_mut(index) {
            Some(slot) => {
                *slot = label;
                Ok(())
            }
            None => Err(DetailError::ConstraintMismatch(format!(
                "label for body slot {index} but the centerline has {slots} body segments"
            ))),
        }
    }

    /// Apply one event and advance.
    pub fn apply(&mut self, event: SegmentEvent) -> Result<()> {
        let from = self.state;
        match event {
            SegmentEvent::Length(label) => {
                if self.state == WalkerState::AfterPlainSegment && self.slot_is_vertex(self.cursor) {
                    self.cursor += 1;
                }
                self.assign(self.cursor, label)?;
                self.cursor += 1;
                self.state = WalkerState::AfterPlainSegment;
            }
            SegmentEvent::BendArcLength(label) => {
                if self.state != WalkerState::AfterPlainSegment {
                    return Err(DetailError::ConstraintMismatch(format!(
                        "180° bend at body slot {} does not follow a straight segment",
                        self.cursor
                    )));
                }
                if self.slot_is_vertex(self.cursor) {
                    self.assign(self.cursor, label)?;
                    self.cursor += 1;
                } else {
                    // No bend curve of its own: label the segment before it.
                    let previous = self.cursor.checked_sub(1).ok_or_else(|| {
                        DetailError::ConstraintMismatch(
                            "180° bend before the first body segment".into(),
                        )
                    })?;
                    self.assign(previous, label)?;
                }
                self.state = WalkerState::AfterBendArc;
            }
            SegmentEvent::BendRadius => {
                if self.state == WalkerState::AfterPlainSegment && self.slot_is_vertex(self.cursor) {
                    self.assign(self.cursor, LabelRange::blank())?;
                    self.cursor += 1;
                    self.state = WalkerState::AfterBendArc;
                }
            }
            SegmentEvent::Unlabeled => {}
        }
        trace!(?from, to = ?self.state, ?event, cursor = self.cursor, "constraint walker step");
        Ok(())
    }
}

// =============================================================================
// Assignment
// =============================================================================

/// Labels for every descriptor of one bar.
#[derive(Debug, Clone, PartialEq)]
pub struct SegmentLabels {
    /// Start hook label (its tangent length).
    pub start_hook: Option<LabelRange>,
    /// One label per body segment.
    pub body: Vec<LabelRange>,
    /// End hook label (its tangent length).
    pub end_hook: Option<LabelRange>,
}

/// Label the body segments and hooks of `bar` drawn at position `visible`.
pub fn assign_labels(
    bar: &BarInput,
    body: &[DetailSegment],
    visible: usize,
    tol: &Tolerance,
) -> Result<SegmentLabels> {
    let resolver = LabelResolver::new(bar, visible, *tol);
    let has_start_hook = bar.hooks.start.is_some();

    let body_labels = match &bar.shape {
        ShapeDefinition::ByArc { kind, constraints } => {
            label_arc_shape(*kind, constraints, body.len(), has_start_hook, &resolver)?
        }
        ShapeDefinition::BySegments(segments) => {
            let mut walker = ConstraintWalker::for_body(body, has_start_hook, tol);
            for segment in segments {
                walker.apply(SegmentEvent::from_segment(segment, &resolver)?)?;
            }
            walker.finish()
        }
    };

    Ok(SegmentLabels {
        start_hook: bar.hooks.start.map(|h| LabelRange::fixed(h.tangent_length)),
        body: body_labels,
        end_hook: bar.hooks.end.map(|h| LabelRange::fixed(h.tangent_length)),
    })
}

/// Arc shapes carry one arc-length label on the main arc, which follows the
/// start hook's bend when there is one.
fn label_arc_shape(
    kind: ArcShapeKind,
    constraints: &[ShapeConstraint],
    slots: usize,
    has_start_hook: bool,
    resolver: &LabelResolver,
) -> Result<Vec<LabelRange>> {
    let mut labels = vec![LabelRange::blank(); slots];
    let index = if has_start_hook && slots > 1 { 1 } else { 0 };

    for constraint in constraints {
        if constraint.kind != ConstraintKind::ArcLength {
            continue;
        }
        let range = resolver.resolve(constraint)?;
        let label = if kind == ArcShapeKind::LappedCircle {
            LabelRange {
                min: 0.0,
                max: range.max.map(|_| 0.0),
            }
        } else {
            range
        };
        let slot = labels.get_mut(index).ok_or_else(|| {
            DetailError::ConstraintMismatch("arc shape has no body segment to label".into())
        })?;
        *slot = label;
    }
    Ok(labels)
}
