//! Mapping of a finished detail onto the parameters of the detail symbol.
//!
//! The symbol exposes numbered body slots `s1..sN` and two hook slots
//! `h1`/`h2`. Hosts implement [`SymbolHost`] to create the symbol instance
//! and apply the assignments.

use std::fmt::Display;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{DetailError, Result};
use crate::settings::DetailSettings;
use crate::types::{BendingDetail, DetailSegment, Point3D};

/// Value written to one symbol parameter.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ParameterValue {
    /// Integer parameter (visibility and segment flags).
    Integer(i64),
    /// Length or angle parameter.
    Double(f64),
}

/// One named parameter assignment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParameterAssignment {
    /// Parameter name on the symbol.
    pub name: String,
    /// Value to set.
    pub value: ParameterValue,
}

/// Everything a host needs to place one detail symbol.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SymbolParameters {
    /// Symbol to instantiate.
    pub symbol_name: String,
    /// Placement point on the view plane.
    pub origin: Point3D,
    /// Assignments in the order they are applied.
    pub assignments: Vec<ParameterAssignment>,
}

impl SymbolParameters {
    /// Assignments for `detail`.
    ///
    /// Body slots are numbered from 1. Past `max_body_slots` the mapping
    /// stops at the first zero-length segment. The last body slot, or a
    /// zero-length one, is marked as the end segment when the bar has no end
    /// hook. Hook slots are written only for hooks that exist.
    pub fn from_detail(detail: &BendingDetail, settings: &DetailSettings) -> Self {
        let mut params = Self {
            symbol_name: settings.symbol_name.clone(),
            origin: detail.projected_center().into(),
            assignments: Vec::new(),
        };
        params.double("Bar_Diameter", detail.bar_diameter());

        let body = detail.body();
        let no_end_hook = detail.end_hook().is_none();
        let tol = &settings.tolerance;
        for (index, segment) in body.iter().enumerate() {
            let slot = index + 1;
            let zero_length = tol.is_zero(segment.length);
            if slot > settings.max_body_slots && zero_length {
                break;
            }
            params.body_slot(slot, segment);
            let is_last = index + 1 == body.len();
            if no_end_hook && (is_last || zero_length) {
                params.integer(&format!("s{slot}_End_Segment"), 1);
            }
        }

        if let Some(hook) = detail.start_hook() {
            params.hook_slot(1, hook);
            params.integer("s1_Start_Segment", 0);
        }
        if let Some(hook) = detail.end_hook() {
            params.hook_slot(2, hook);
        }
        params
    }

    fn double(&mut self, name: &str, value: f64) {
        self.assignments.push(ParameterAssignment {
            name: name.to_string(),
            value: ParameterValue::Double(value),
        });
    }

    fn integer(&mut self, name: &str, value: i64) {
        self.assignments.push(ParameterAssignment {
            name: name.to_string(),
            value: ParameterValue::Integer(value),
        });
    }

    fn body_slot(&mut self, slot: usize, segment: &DetailSegment) {
        let prefix = format!("s{slot}");
        self.double(&format!("{prefix}_Length"), segment.length);
        self.double(&format!("{prefix}_X_Offset"), segment.x_offset);
        self.double(&format!("{prefix}_Y_Offset"), segment.y_offset);
        self.double(&format!("{prefix}_Arc_Radius"), segment.arc_radius);
        self.double(&format!("{prefix}_Rotation"), segment.rotation);
        self.double(&format!("{prefix}_Min_Label"), segment.min_label);
        self.double(&format!("{prefix}_Max_Label"), segment.max_label_value());
        self.integer(&format!("{prefix}_Visibility"), 1);
    }

    fn hook_slot(&mut self, slot: usize, hook: &DetailSegment) {
        let prefix = format!("h{slot}");
        self.double(&format!("{prefix}_Length"), hook.length);
        self.double(&format!("{prefix}_X_Offset"), hook.x_offset);
        self.double(&format!("{prefix}_Y_Offset"), hook.y_offset);
        self.double(&format!("{prefix}_Rotation"), hook.rotation);
        self.double(&format!("{prefix}_Label"), hook.min_label);
        self.integer(&format!("{prefix}_Visibility"), 1);
    }

    /// Value assigned to `name`, if any.
    pub fn get(&self, name: &str) -> Option<ParameterValue> {
        self.assignments
            .iter()
            .find(|a| a.name == name)
            .map(|a| a.value)
    }
}

/// A drafting host able to place detail symbols on a view.
pub trait SymbolHost {
    /// Identifier of a placed symbol instance.
    type Id;
    /// Host failure.
    type Error: Display;

    /// Create one symbol instance and apply `params` to it.
    fn place(&mut self, params: &SymbolParameters) -> std::result::Result<Self::Id, Self::Error>;
}

/// Place `detail` through `host`.
pub fn place_detail<H: SymbolHost>(
    host: &mut H,
    detail: &BendingDetail,
    settings: &DetailSettings,
) -> Result<H::Id> {
    let params = SymbolParameters::from_detail(detail, settings);
    debug!(
        symbol = %params.symbol_name,
        assignments = params.assignments.len(),
        "placing detail symbol"
    );
    host.place(&params).map_err(|e| DetailError::Placement(e.to_string()))
}
