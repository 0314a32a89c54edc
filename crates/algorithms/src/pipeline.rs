//! Full shoreline change analysis
//!
//! generate → correct → intersect → evolve, over in-memory geometries.
//! Every parameter set is validated before the first stage runs.

use shorekit_core::{
    Baseline, BaselineId, BaselineIntersection, DistanceObservation, Error, EvolutionMetrics,
    Result, Shoreline, ShorelineIntersection, Transect, TransectId, Warning,
};
use tracing::{info, warn};

use crate::intersection::intersect_transects;
use crate::statistics::{shoreline_evolution, EvolutionParams};
use crate::transects::{correct_transects, generate_transects, CorrectionParams, TransectParams};

/// Parameters for every stage of [`run_analysis`]
#[derive(Debug, Clone)]
pub struct AnalysisParams {
    pub transects: TransectParams,
    pub correction: CorrectionParams,
    pub evolution: EvolutionParams,
    /// Run orientation correction between generation and intersection
    pub correct: bool,
}

impl Default for AnalysisParams {
    fn default() -> Self {
        Self {
            transects: TransectParams::default(),
            correction: CorrectionParams::default(),
            evolution: EvolutionParams::default(),
            correct: true,
        }
    }
}

impl AnalysisParams {
    pub fn validate(&self) -> Result<()> {
        self.transects.validate()?;
        self.correction.validate()?;
        self.evolution.validate()
    }
}

/// Output of every stage
#[derive(Debug, Default)]
pub struct AnalysisReport {
    /// Final (corrected, if enabled) transects, ordered by id
    pub transects: Vec<Transect>,
    pub flipped: Vec<TransectId>,
    pub smoothed: Vec<TransectId>,
    /// Baselines whose transects were left uncorrected, with the reason
    pub correction_failures: Vec<(Option<BaselineId>, Error)>,
    pub baseline_points: Vec<BaselineIntersection>,
    pub shoreline_points: Vec<ShorelineIntersection>,
    pub observations: Vec<DistanceObservation>,
    pub metrics: Vec<EvolutionMetrics>,
    /// Warnings of all stages, in stage order
    pub warnings: Vec<Warning>,
}

impl AnalysisReport {
    /// Number of transects with a significant rate at `alpha`
    pub fn significant_count(&self, alpha: f64) -> usize {
        self.metrics.iter().filter(|m| m.is_significant(alpha)).count()
    }
}

/// Run the whole analysis.
///
/// # Errors
/// Invalid parameters, no baselines or shorelines, or malformed geometry.
/// A baseline whose orientation cannot be corrected is not an error: its
/// transects go on uncorrected and the cause lands in
/// [`AnalysisReport::correction_failures`].
pub fn run_analysis(
    baselines: &[Baseline],
    shorelines: &[Shoreline],
    params: &AnalysisParams,
) -> Result<AnalysisReport> {
    params.validate()?;
    if shorelines.is_empty() {
        return Err(Error::EmptyInput("shorelines"));
    }

    let generated = generate_transects(baselines, &params.transects)?;
    info!("Generated {} transects", generated.transects.len());
    let mut report = AnalysisReport {
        warnings: generated.warnings,
        ..Default::default()
    };

    report.transects = if params.correct {
        let corrected = correct_transects(generated.transects, &params.correction)?;
        for (baseline_id, e) in &corrected.failures {
            warn!("baseline {baseline_id:?} left uncorrected: {e}");
        }
        info!(
            "Corrected orientation: {} flipped, {} smoothed",
            corrected.flipped.len(),
            corrected.smoothed.len()
        );
        report.flipped = corrected.flipped;
        report.smoothed = corrected.smoothed;
        report.correction_failures = corrected.failures;
        corrected.transects
    } else {
        generated.transects
    };

    let crossings = intersect_transects(&report.transects, baselines, shorelines)?;
    info!(
        "Found {} shoreline crossings on {} transects",
        crossings.shoreline_points.len(),
        crossings.baseline_points.len()
    );
    report.baseline_points = crossings.baseline_points;
    report.shoreline_points = crossings.shoreline_points;
    report.observations = crossings.observations;
    report.warnings.extend(crossings.warnings);

    let ids: Vec<TransectId> = report.transects.iter().map(|t| t.id).collect();
    let evolution = shoreline_evolution(&report.observations, &ids, &params.evolution)?;
    report.metrics = evolution.metrics;
    report.warnings.extend(evolution.warnings);

    Ok(report)
}
