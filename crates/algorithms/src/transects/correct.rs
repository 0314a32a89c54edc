//! Transect orientation correction
//!
//! Smoothing keeps most transects perpendicular to the coast, but sharp
//! baseline features still produce two kinds of anomaly, fixed in two
//! passes per baseline:
//!
//! - **Pass A (inversion repair)**: a run of transects pointing inland.
//!   Bearing jumps of roughly 180° open and close such runs; every transect
//!   inside one is rotated 180° about its centroid.
//! - **Pass B (outlier smoothing)**: isolated transects whose bearing jumps
//!   more than `corr_factor` from the previous one. Their bearings are
//!   re-interpolated from the nearest unflagged neighbours and the
//!   transects rotated to match.
//!
//! Baselines are independent and corrected in parallel; within a baseline
//! both passes scan the full id-ordered sequence.

use std::collections::BTreeMap;

use shorekit_core::angle::{normalize_bearing, shortest_rotation};
use shorekit_core::{check_unique_ids, Algorithm, BaselineId, Error, Result, Transect, TransectId};
use tracing::{debug, warn};

use crate::maybe_rayon::*;
use crate::vector::rotate_about_centroid;

/// Parameters for orientation correction
#[derive(Debug, Clone)]
pub struct CorrectionParams {
    /// Largest acceptable bearing change between consecutive transects (°)
    pub corr_factor: f64,
    /// Lower bound (inclusive) of a bearing jump read as an inversion (°)
    pub inversion_min: f64,
    /// Upper bound (exclusive) of a bearing jump read as an inversion (°)
    pub inversion_max: f64,
    /// Jumps at or above this are the natural 360°→0° wrap, not outliers (°)
    pub wrap_threshold: f64,
}

impl Default for CorrectionParams {
    fn default() -> Self {
        Self {
            corr_factor: 15.0,
            inversion_min: 130.0,
            inversion_max: 230.0,
            wrap_threshold: 330.0,
        }
    }
}

impl CorrectionParams {
    pub fn validate(&self) -> Result<()> {
        let finite = [
            self.corr_factor,
            self.inversion_min,
            self.inversion_max,
            self.wrap_threshold,
        ]
        .iter()
        .all(|v| v.is_finite());
        if !finite {
            return Err(Error::invalid_parameter(
                "correction",
                format!("{self:?}"),
                "all thresholds must be finite",
            ));
        }
        if !(self.corr_factor > 0.0 && self.corr_factor < self.wrap_threshold) {
            return Err(Error::invalid_parameter(
                "corr_factor",
                self.corr_factor,
                format!("must be in (0, {})", self.wrap_threshold),
            ));
        }
        if !(self.inversion_min < self.inversion_max) {
            return Err(Error::invalid_parameter(
                "inversion_min",
                self.inversion_min,
                "must be below inversion_max",
            ));
        }
        Ok(())
    }
}

/// Result of correcting a transect set
#[derive(Debug, Default)]
pub struct CorrectionReport {
    /// All transects, ordered by id
    pub transects: Vec<Transect>,
    /// Transects turned 180° by pass A
    pub flipped: Vec<TransectId>,
    /// Transects re-oriented by pass B
    pub smoothed: Vec<TransectId>,
    /// Baselines whose correction failed; their transects are returned unchanged
    pub failures: Vec<(Option<BaselineId>, Error)>,
}

/// Successive bearing differences `Δᵢ = bearing(i) − bearing(i−1)`, with
/// `Δ₀ = NaN`
fn bearing_steps(bearings: &[f64]) -> Vec<f64> {
    std::iter::once(f64::NAN)
        .chain(bearings.windows(2).map(|w| w[1] - w[0]))
        .collect()
}

/// Pass A rotation angles: 180° inside inverted runs, 0° elsewhere.
///
/// Jumps with `inversion_min <= |Δ| < inversion_max` are run boundaries.
/// The scan toggles in and out of a run at each boundary: the transect at
/// an opening boundary is inside the run, the one at a closing boundary is
/// not. An unmatched final boundary leaves the run open to the end.
pub fn inversion_angles(bearings: &[f64], params: &CorrectionParams) -> Vec<f64> {
    let mut inside_run = false;
    bearing_steps(bearings)
        .into_iter()
        .map(|step| {
            let jump = step.abs();
            if jump >= params.inversion_min && jump < params.inversion_max {
                inside_run = !inside_run;
            }
            if inside_run {
                180.0
            } else {
                0.0
            }
        })
        .collect()
}

/// Pass B flags: `corr_factor < |Δ| < wrap_threshold`.
///
/// Transects without a usable bearing are flagged as well.
pub fn outlier_flags(bearings: &[f64], params: &CorrectionParams) -> Vec<bool> {
    bearing_steps(bearings)
        .into_iter()
        .zip(bearings)
        .map(|(step, b)| {
            let jump = step.abs();
            !b.is_finite() || (jump > params.corr_factor && jump < params.wrap_threshold)
        })
        .collect()
}

/// Fill missing bearings by linear interpolation over sequence index.
///
/// A gap between two known bearings is filled along the shorter arc
/// between them, so a gap spanning north does not swing through south.
/// Gaps at either end copy the nearest known bearing. Returns `None` when
/// no bearing is known at all.
pub fn fill_missing_bearings(values: &[Option<f64>]) -> Option<Vec<f64>> {
    let known: Vec<(usize, f64)> = values
        .iter()
        .enumerate()
        .filter_map(|(i, v)| v.map(|b| (i, b)))
        .collect();
    if known.is_empty() {
        return if values.is_empty() { Some(Vec::new()) } else { None };
    }

    let filled = (0..values.len())
        .map(|i| {
            if let Some(b) = values[i] {
                return b;
            }
            // First known index after i
            let next = known.partition_point(|(k, _)| *k < i);
            let Some(&(l, bl)) = next.checked_sub(1).and_then(|p| known.get(p)) else {
                // Leading gap
                return known.first().map_or(f64::NAN, |(_, b)| *b);
            };
            match known.get(next) {
                Some(&(r, br)) => {
                    let frac = (i - l) as f64 / (r - l) as f64;
                    normalize_bearing(bl + shortest_rotation(bl, br) * frac)
                }
                None => bl,
            }
        })
        .collect();
    Some(filled)
}

fn rotate(transect: &mut Transect, clockwise_deg: f64) -> Result<()> {
    let line = rotate_about_centroid(&transect.line(), clockwise_deg);
    transect.set_line(line)
}

fn bearings(transects: &[Transect]) -> Vec<f64> {
    transects.iter().map(Transect::bearing).collect()
}

/// Both passes over one baseline's id-ordered transects, in place
fn correct_baseline(
    transects: &mut [Transect],
    baseline_id: Option<BaselineId>,
    params: &CorrectionParams,
) -> Result<(Vec<TransectId>, Vec<TransectId>)> {
    // Pass A
    let angles = inversion_angles(&bearings(transects), params);
    let mut flipped = Vec::new();
    for (t, angle) in transects.iter_mut().zip(&angles) {
        if *angle != 0.0 {
            rotate(t, *angle)?;
            flipped.push(t.id);
        }
    }

    // Pass B, on the bearings pass A left behind
    let current = bearings(transects);
    let flags = outlier_flags(&current, params);
    if !flags.iter().any(|f| *f) {
        return Ok((flipped, Vec::new()));
    }
    let masked: Vec<Option<f64>> = current
        .iter()
        .zip(&flags)
        .map(|(b, flagged)| (!flagged).then_some(*b))
        .collect();
    let target = fill_missing_bearings(&masked).ok_or(Error::DegenerateCorrection { baseline_id })?;

    let mut smoothed = Vec::new();
    for ((t, flagged), (original, wanted)) in transects
        .iter_mut()
        .zip(&flags)
        .zip(current.iter().zip(&target))
    {
        if *flagged {
            rotate(t, wanted - original)?;
            smoothed.push(t.id);
        }
    }
    Ok((flipped, smoothed))
}

/// Correct transect orientations, baseline by baseline.
///
/// Transects are grouped by `baseline_id` and ordered by id within each
/// group. A baseline that cannot be corrected is reported in
/// [`CorrectionReport::failures`] with its transects untouched; the others
/// are still corrected.
///
/// # Errors
/// Only invalid parameters or a repeated transect id fail the whole call.
pub fn correct_transects(
    transects: Vec<Transect>,
    params: &CorrectionParams,
) -> Result<CorrectionReport> {
    params.validate()?;
    check_unique_ids(&transects)?;

    let mut groups: BTreeMap<Option<BaselineId>, Vec<Transect>> = BTreeMap::new();
    for t in transects {
        groups.entry(t.baseline_id).or_default().push(t);
    }

    let outcomes: Vec<_> = groups
        .into_iter()
        .collect::<Vec<_>>()
        .into_par_iter()
        .map(|(baseline_id, group)| {
            correct_group(baseline_id, group, |ts| correct_baseline(ts, baseline_id, params))
        })
        .collect();
    Ok(merge_outcomes(outcomes))
}

type GroupOutcome = (
    Vec<Transect>,
    Vec<TransectId>,
    Vec<TransectId>,
    Option<(Option<BaselineId>, Error)>,
);

/// Run `correct` on one baseline's transects, rolling the group back to its
/// input state if it fails.
fn correct_group<F>(
    baseline_id: Option<BaselineId>,
    mut group: Vec<Transect>,
    correct: F,
) -> GroupOutcome
where
    F: FnOnce(&mut [Transect]) -> Result<(Vec<TransectId>, Vec<TransectId>)>,
{
    group.sort_by_key(|t| t.id);
    let original = group.clone();
    match correct(&mut group) {
        Ok((flipped, smoothed)) => {
            debug!(
                "baseline {:?}: {} flipped, {} smoothed",
                baseline_id.map(|b| b.0),
                flipped.len(),
                smoothed.len()
            );
            (group, flipped, smoothed, None)
        }
        Err(e) => {
            warn!("orientation correction skipped: {e}");
            (original, Vec::new(), Vec::new(), Some((baseline_id, e)))
        }
    }
}

fn merge_outcomes(outcomes: Vec<GroupOutcome>) -> CorrectionReport {
    let mut report = CorrectionReport::default();
    for (group, flipped, smoothed, failure) in outcomes {
        report.transects.extend(group);
        report.flipped.extend(flipped);
        report.smoothed.extend(smoothed);
        report.failures.extend(failure);
    }
    report.transects.sort_by_key(|t| t.id);
    report.flipped.sort();
    report.smoothed.sort();
    report
}

/// Orientation correction algorithm
#[derive(Debug, Clone, Default)]
pub struct CorrectTransects;

impl Algorithm for CorrectTransects {
    type Input = Vec<Transect>;
    type Output = CorrectionReport;
    type Params = CorrectionParams;
    type Error = Error;

    fn name(&self) -> &'static str {
        "Correct Transects"
    }

    fn description(&self) -> &'static str {
        "Repair inverted runs and smooth outlier bearings by rotating transects about their centroids"
    }

    fn execute(&self, input: Self::Input, params: Self::Params) -> Result<Self::Output> {
        correct_transects(input, &params)
    }
}
