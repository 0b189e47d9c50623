#![warn(missing_docs)]

//! Bending details for reinforcement bars.
//!
//! Given the centerline of a bent bar and a drafting view, this crate
//! computes everything a parametric 2D detail symbol needs to draw the bar
//! true to shape and fully dimensioned:
//!
//! - **Alignment**: the bend plane is folded into the view plane
//! - **Projection**: each curve becomes an offset/length/rotation/radius descriptor
//! - **Labeling**: shape constraints are mapped onto the descriptors, as
//!   min/max ranges for varying bar sets
//! - **Orientation**: label signs are set so dimensions read consistently
//!
//! # Example
//!
//! ```ignore
//! use rebar_detail::{detail_bar, place_detail, DetailSettings, ViewBasis};
//!
//! let settings = DetailSettings::load("rebar-detail.toml")?;
//! let detail = detail_bar(&bar, &ViewBasis::plan(), &settings)?;
//! for segment in detail.segments() {
//!     println!("{:?}: {} at ({}, {})",
//!         segment.kind, segment.min_label, segment.x_offset, segment.y_offset);
//! }
//! let id = place_detail(&mut host, &detail, &settings)?;
//! ```

pub mod align;
pub mod bar;
pub mod bbox;
pub mod constraints;
pub mod error;
pub mod orient;
pub mod pipeline;
pub mod placement;
pub mod project;
pub mod settings;
pub mod types;

pub use rebar_detail_geom;
pub use rebar_detail_math;

pub use align::{align_to_view, Alignment};
pub use bar::{
    ArcShapeKind, BarHooks, BarInput, BarLayout, BarShapeGeometry, ConstraintKind,
    ConstraintValues, Hook, LayoutRule, ShapeConstraint, ShapeDefinition, ShapeSegment,
};
pub use bbox::CurveBoundingBox;
pub use constraints::{
    assign_labels, ConstraintWalker, SegmentEvent, SegmentLabels, WalkerState,
};
pub use error::{DetailError, Result};
pub use orient::orient_label;
pub use pipeline::{detail_bar, detail_bars, detail_bars_parallel, BarFailure, BatchReport};
pub use placement::{place_detail, ParameterValue, SymbolHost, SymbolParameters};
pub use project::{project_segments, ProjectedSegments};
pub use settings::DetailSettings;
pub use types::{BendingDetail, DetailSegment, LabelRange, Point3D, SegmentKind, ViewBasis};
