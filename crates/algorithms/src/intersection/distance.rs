//! Distance of shoreline crossings from the baseline

use std::collections::HashMap;

use shorekit_core::{BaselineIntersection, DistanceObservation, ShorelineIntersection, Warning};
use tracing::warn;

use crate::vector::distance;

/// Distance time series for all transects
#[derive(Debug, Clone, Default)]
pub struct ObservationSet {
    /// One observation per shoreline crossing, in crossing order
    pub observations: Vec<DistanceObservation>,
    pub warnings: Vec<Warning>,
}

/// Measure every shoreline crossing from the baseline crossing of the same
/// transect.
///
/// When the transect has no baseline crossing the observation is kept with
/// an undefined distance and a [`Warning::UndefinedDistance`].
pub fn distance_observations(
    baseline_points: &[BaselineIntersection],
    crossings: &[ShorelineIntersection],
) -> ObservationSet {
    let origin: HashMap<_, _> = baseline_points
        .iter()
        .map(|b| (b.transect_id, b.point))
        .collect();

    let mut set = ObservationSet::default();
    for crossing in crossings {
        let d = origin
            .get(&crossing.transect_id)
            .map(|base| distance(base.0, crossing.point.0));
        if d.is_none() {
            let warning = Warning::UndefinedDistance {
                transect_id: crossing.transect_id,
                shoreline_id: crossing.shoreline_id,
                date: crossing.date,
            };
            warn!("{warning}");
            set.warnings.push(warning);
        }
        set.observations.push(DistanceObservation {
            transect_id: crossing.transect_id,
            shoreline_id: crossing.shoreline_id,
            date: crossing.date,
            distance: d,
        });
    }
    set
}
