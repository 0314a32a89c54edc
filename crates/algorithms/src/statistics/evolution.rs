//! Shoreline evolution metrics
//!
//! Per transect, the distance series is reduced to one distance per date
//! (the smallest, i.e. the crossing closest to the baseline) and regressed
//! on elapsed years. Transects are independent and processed in parallel.

use std::collections::{BTreeMap, BTreeSet, HashMap};

use chrono::NaiveDate;
use ndarray::Array1;
use shorekit_core::{
    Algorithm, DistanceObservation, Error, EvolutionMetrics, Result, TransectId, Warning,
};
use tracing::{debug, warn};

use super::regression::fit_line;
use crate::maybe_rayon::*;

/// Parameters for the evolution statistics
#[derive(Debug, Clone)]
pub struct EvolutionParams {
    /// Days in one year of the time axis
    pub days_per_year: f64,
    /// Confidence level of the LRR interval
    pub confidence: f64,
}

impl Default for EvolutionParams {
    fn default() -> Self {
        Self {
            days_per_year: 365.24,
            confidence: 0.95,
        }
    }
}

impl EvolutionParams {
    pub fn validate(&self) -> Result<()> {
        if !(self.days_per_year.is_finite() && self.days_per_year > 0.0) {
            return Err(Error::invalid_parameter(
                "days_per_year",
                self.days_per_year,
                "must be positive",
            ));
        }
        if !(self.confidence > 0.0 && self.confidence < 1.0) {
            return Err(Error::invalid_parameter(
                "confidence",
                self.confidence,
                "must be in (0, 1)",
            ));
        }
        Ok(())
    }
}

/// Metrics for every transect, plus what could not be estimated
#[derive(Debug, Clone, Default)]
pub struct EvolutionReport {
    /// One record per transect, ordered by id
    pub metrics: Vec<EvolutionMetrics>,
    pub warnings: Vec<Warning>,
}

impl EvolutionReport {
    /// Number of transects whose rate is significant at `alpha`
    pub fn significant_count(&self, alpha: f64) -> usize {
        self.metrics.iter().filter(|m| m.is_significant(alpha)).count()
    }
}

/// One distance per date, the minimum, in date order.
///
/// Undefined and non-finite distances are dropped.
pub fn prepare_series<'a, I>(observations: I) -> Vec<(NaiveDate, f64)>
where
    I: IntoIterator<Item = &'a DistanceObservation>,
{
    let mut by_date: BTreeMap<NaiveDate, f64> = BTreeMap::new();
    for obs in observations {
        let Some(d) = obs.distance.filter(|d| d.is_finite()) else {
            continue;
        };
        by_date
            .entry(obs.date)
            .and_modify(|v| *v = v.min(d))
            .or_insert(d);
    }
    by_date.into_iter().collect()
}

/// Evolution metrics of one prepared series.
///
/// Fewer than two dates give [`EvolutionMetrics::missing`].
pub fn evolution_metrics(
    transect_id: TransectId,
    series: &[(NaiveDate, f64)],
    params: &EvolutionParams,
) -> EvolutionMetrics {
    let n = series.len();
    let (Some(&(first_date, first)), Some(&(_, last))) = (series.first(), series.last()) else {
        return EvolutionMetrics::missing(transect_id, n);
    };

    let years: Array1<f64> = series
        .iter()
        .map(|(date, _)| (*date - first_date).num_days() as f64 / params.days_per_year)
        .collect();
    let distances: Array1<f64> = series.iter().map(|(_, d)| *d).collect();

    let Some(fit) = fit_line(&years, &distances) else {
        return EvolutionMetrics::missing(transect_id, n);
    };
    let (lci_low, lci_upp) = fit.slope_interval(params.confidence);
    let (min, max) = distances
        .iter()
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), d| {
            (lo.min(*d), hi.max(*d))
        });

    EvolutionMetrics {
        transect_id,
        n_dates: n,
        lrr: fit.slope,
        lci_low,
        lci_upp,
        r2: fit.r2,
        p_value: fit.p_value(),
        rmse: fit.rmse,
        sce: max - min,
        nsm: last - first,
    }
}

/// Evolution metrics for every transect.
///
/// Every id in `transect_ids`, and every id that appears in
/// `observations`, gets exactly one record, possibly all-missing.
pub fn shoreline_evolution(
    observations: &[DistanceObservation],
    transect_ids: &[TransectId],
    params: &EvolutionParams,
) -> Result<EvolutionReport> {
    params.validate()?;

    let mut grouped: HashMap<TransectId, Vec<&DistanceObservation>> = HashMap::new();
    for obs in observations {
        grouped.entry(obs.transect_id).or_default().push(obs);
    }
    let ids: BTreeSet<TransectId> = transect_ids
        .iter()
        .copied()
        .chain(grouped.keys().copied())
        .collect();

    let metrics: Vec<EvolutionMetrics> = ids
        .into_iter()
        .collect::<Vec<_>>()
        .into_par_iter()
        .map(|id| {
            let series = prepare_series(grouped.get(&id).into_iter().flatten().copied());
            evolution_metrics(id, &series, params)
        })
        .collect();

    let mut report = EvolutionReport {
        metrics,
        warnings: Vec::new(),
    };
    for m in &report.metrics {
        let warning = if m.n_dates < 2 {
            Warning::InsufficientObservations {
                transect_id: m.transect_id,
                dates: m.n_dates,
            }
        } else if m.r2.is_nan() {
            Warning::UndefinedRSquared {
                transect_id: m.transect_id,
            }
        } else {
            continue;
        };
        warn!("{warning}");
        report.warnings.push(warning);
    }
    debug!(
        "evolution metrics for {} transects, {} without a trend",
        report.metrics.len(),
        report.metrics.iter().filter(|m| !m.has_trend()).count()
    );
    Ok(report)
}

/// Shoreline evolution algorithm
#[derive(Debug, Clone, Default)]
pub struct ShorelineEvolution;

impl Algorithm for ShorelineEvolution {
    type Input = Vec<DistanceObservation>;
    type Output = EvolutionReport;
    type Params = EvolutionParams;
    type Error = Error;

    fn name(&self) -> &'static str {
        "Shoreline Evolution"
    }

    fn description(&self) -> &'static str {
        "Linear regression rate, confidence interval, R², p-value, RMSE, SCE and NSM per transect"
    }

    fn execute(&self, input: Self::Input, params: Self::Params) -> Result<Self::Output> {
        shoreline_evolution(&input, &[], &params)
    }
}
