//! Transect × baseline crossings

use std::collections::HashMap;

use geo::{MultiLineString, Point};
use shorekit_core::{
    check_unique_ids, Baseline, BaselineId, BaselineIntersection, Error, Result, Transect,
    TransectId, Warning,
};
use tracing::warn;

use crate::maybe_rayon::*;
use crate::vector::intersect_multi_line_string;

/// Baseline crossing of every transect that has one
#[derive(Debug, Clone, Default)]
pub struct BaselineCrossings {
    /// At most one point per transect, ordered by transect id
    pub points: Vec<BaselineIntersection>,
    pub warnings: Vec<Warning>,
}

impl BaselineCrossings {
    /// Crossing points keyed by transect id
    pub fn by_transect(&self) -> HashMap<TransectId, Point<f64>> {
        self.points.iter().map(|p| (p.transect_id, p.point)).collect()
    }
}

enum Outcome {
    Hit(BaselineIntersection, Option<Warning>),
    Miss(Warning),
}

/// Intersect each transect with its own baseline.
///
/// A transect tagged with a baseline id is tested against that baseline,
/// all parts combined. An untagged transect is tested against every
/// baseline supplied. No crossing means no point and a warning; several
/// crossings keep the one nearest the transect start (the landward end)
/// with a warning.
///
/// # Errors
/// No baselines supplied, or a transect id used twice.
pub fn intersect_baselines(transects: &[Transect], baselines: &[Baseline]) -> Result<BaselineCrossings> {
    if baselines.is_empty() {
        return Err(Error::EmptyInput("baselines"));
    }
    check_unique_ids(transects)?;

    let by_id: HashMap<BaselineId, &MultiLineString<f64>> = baselines
        .iter()
        .filter_map(|b| b.id.map(|id| (id, &b.geometry)))
        .collect();
    let combined = MultiLineString::new(
        baselines
            .iter()
            .flat_map(|b| b.geometry.0.iter().cloned())
            .collect(),
    );

    let outcomes: Vec<Outcome> = transects
        .par_iter()
        .map(|t| {
            let geometry = match t.baseline_id {
                Some(id) => match by_id.get(&id) {
                    Some(g) => *g,
                    None => {
                        return Outcome::Miss(Warning::UnknownBaseline {
                            transect_id: t.id,
                            baseline_id: id,
                        })
                    }
                },
                None => &combined,
            };
            let hits = intersect_multi_line_string(t.line(), geometry);
            match hits.first() {
                None => Outcome::Miss(Warning::NoBaselineIntersection { transect_id: t.id }),
                Some(first) => {
                    let point = BaselineIntersection {
                        transect_id: t.id,
                        point: Point::from(*first),
                    };
                    let extra = (hits.len() > 1).then(|| Warning::MultipleBaselineIntersections {
                        transect_id: t.id,
                        count: hits.len(),
                    });
                    Outcome::Hit(point, extra)
                }
            }
        })
        .collect();

    let mut crossings = BaselineCrossings::default();
    for outcome in outcomes {
        let warning = match outcome {
            Outcome::Hit(point, warning) => {
                crossings.points.push(point);
                warning
            }
            Outcome::Miss(warning) => Some(warning),
        };
        if let Some(w) = warning {
            warn!("{w}");
            crossings.warnings.push(w);
        }
    }
    crossings.points.sort_by_key(|p| p.transect_id);
    Ok(crossings)
}
