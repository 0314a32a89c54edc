//! Intersection engine
//!
//! Turns corrected transects plus baseline and shoreline geometries into
//! a distance time series:
//! - **baseline**: one origin point per transect
//! - **shoreline**: every transect × shoreline crossing
//! - **distance**: crossing distance from the origin, per shoreline date

mod baseline;
mod distance;
mod shoreline;

pub use baseline::{intersect_baselines, BaselineCrossings};
pub use distance::{distance_observations, ObservationSet};
pub use shoreline::{intersect_shorelines, ShorelineCrossings};

use shorekit_core::{
    Algorithm, Baseline, BaselineIntersection, DistanceObservation, Error, Result, Shoreline,
    ShorelineIntersection, Transect, Warning,
};

/// Geometries consumed by [`IntersectTransects`]
#[derive(Debug, Clone, Default)]
pub struct IntersectionInput {
    pub transects: Vec<Transect>,
    pub baselines: Vec<Baseline>,
    pub shorelines: Vec<Shoreline>,
}

/// All records produced by the intersection engine
#[derive(Debug, Clone, Default)]
pub struct IntersectionReport {
    pub baseline_points: Vec<BaselineIntersection>,
    pub shoreline_points: Vec<ShorelineIntersection>,
    pub observations: Vec<DistanceObservation>,
    pub warnings: Vec<Warning>,
}

/// Baseline crossings, shoreline crossings and distances in one step.
pub fn intersect_transects(
    transects: &[Transect],
    baselines: &[Baseline],
    shorelines: &[Shoreline],
) -> Result<IntersectionReport> {
    let base = intersect_baselines(transects, baselines)?;
    let shore = intersect_shorelines(transects, shorelines)?;
    let obs = distance_observations(&base.points, &shore.intersections);

    let mut warnings = base.warnings;
    warnings.extend(shore.warnings);
    warnings.extend(obs.warnings);

    Ok(IntersectionReport {
        baseline_points: base.points,
        shoreline_points: shore.intersections,
        observations: obs.observations,
        warnings,
    })
}

/// Intersection engine algorithm
#[derive(Debug, Clone, Default)]
pub struct IntersectTransects;

impl Algorithm for IntersectTransects {
    type Input = IntersectionInput;
    type Output = IntersectionReport;
    type Params = ();
    type Error = Error;

    fn name(&self) -> &'static str {
        "Intersect Transects"
    }

    fn description(&self) -> &'static str {
        "Intersect transects with baselines and dated shorelines and measure crossing distances"
    }

    fn execute(&self, input: Self::Input, _params: Self::Params) -> Result<Self::Output> {
        intersect_transects(&input.transects, &input.baselines, &input.shorelines)
    }
}
