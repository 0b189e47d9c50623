//! Per-bar detailing pipeline and batch driver.

use rayon::prelude::*;
use tracing::{debug, warn};

use crate::align::align_to_view;
use crate::bar::BarInput;
use crate::constraints::assign_labels;
use crate::error::{DetailError, Result};
use crate::orient::orient_label;
use crate::project::project_segments;
use crate::settings::DetailSettings;
use crate::types::{BendingDetail, DetailSegment, LabelRange, ViewBasis};

/// Compute the bending detail of one bar on `view`.
///
/// The bar is drawn at its lowest visible active position. Bars that fail
/// [`BarInput::check_supported`] are rejected with [`DetailError::Unsupported`].
pub fn detail_bar(
    bar: &BarInput,
    view: &ViewBasis,
    settings: &DetailSettings,
) -> Result<BendingDetail> {
    let tol = &settings.tolerance;
    bar.check_supported(tol)?;

    let position = bar.visible_position()?;
    let geometry = &bar.geometry;
    let alignment = align_to_view(
        &geometry.curves,
        &geometry.normal,
        &geometry.position_transform(position),
        view,
        tol,
    );
    debug!(
        position,
        fold_angle = alignment.fold_angle,
        reading_flip = alignment.reading_flip,
        "aligned bar with view"
    );

    let aligned = alignment.apply(&geometry.curves);
    let projected = project_segments(&aligned, view, &alignment.projected_center, &bar.hooks, tol);
    let labels = assign_labels(bar, &projected.body, position, tol)?;

    let finish =
        |segment: DetailSegment, label: LabelRange| orient_label(segment.with_label(label), tol);
    let start_hook = projected
        .start_hook
        .zip(labels.start_hook)
        .map(|(segment, label)| finish(segment, label));
    let end_hook = projected
        .end_hook
        .zip(labels.end_hook)
        .map(|(segment, label)| finish(segment, label));
    let body: Vec<DetailSegment> = projected
        .body
        .into_iter()
        .zip(labels.body)
        .map(|(segment, label)| finish(segment, label))
        .collect();

    debug!(
        body = body.len(),
        start_hook = start_hook.is_some(),
        end_hook = end_hook.is_some(),
        "projected bar segments"
    );
    Ok(BendingDetail::new(
        alignment.projected_center,
        bar.diameter,
        start_hook,
        body,
        end_hook,
    ))
}

/// A bar the batch could not detail.
#[derive(Debug)]
pub struct BarFailure {
    /// Index of the bar in the batch input.
    pub index: usize,
    /// Why it failed.
    pub error: DetailError,
}

/// Outcome of detailing a batch of bars.
#[derive(Debug, Default)]
pub struct BatchReport {
    /// Finished details with the index of their bar.
    pub details: Vec<(usize, BendingDetail)>,
    /// Bars rejected as unsupported.
    pub unsupported: Vec<BarFailure>,
    /// Bars that failed for any other reason.
    pub failures: Vec<BarFailure>,
}

impl BatchReport {
    fn record(&mut self, index: usize, result: Result<BendingDetail>) {
        match result {
            Ok(detail) => self.details.push((index, detail)),
            Err(error @ DetailError::Unsupported(_)) => {
                debug!(index, %error, "skipping unsupported bar");
                self.unsupported.push(BarFailure { index, error });
            }
            Err(error) => {
                warn!(index, %error, "bar detailing failed");
                self.failures.push(BarFailure { index, error });
            }
        }
    }

    /// Whether every bar was detailed.
    pub fn is_complete(&self) -> bool {
        self.unsupported.is_empty() && self.failures.is_empty()
    }
}

/// Detail every bar in order. A failing bar never stops the batch.
pub fn detail_bars(bars: &[BarInput], view: &ViewBasis, settings: &DetailSettings) -> BatchReport {
    let mut report = BatchReport::default();
    for (index, bar) in bars.iter().enumerate() {
        report.record(index, detail_bar(bar, view, settings));
    }
    report
}

/// Detail every bar on the rayon thread pool.
///
/// The report lists bars in input order, as [`detail_bars`] does.
pub fn detail_bars_parallel(
    bars: &[BarInput],
    view: &ViewBasis,
    settings: &DetailSettings,
) -> BatchReport {
    let results: Vec<Result<BendingDetail>> = bars
        .par_iter()
        .map(|bar| detail_bar(bar, view, settings))
        .collect();

    let mut report = BatchReport::default();
    for (index, result) in results.into_iter().enumerate() {
        report.record(index, result);
    }
    report
}
