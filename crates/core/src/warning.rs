//! Non-fatal diagnostics
//!
//! Geometric gaps and degenerate statistics never abort a run. Each stage
//! collects them as [`Warning`]s, which always name the offending feature.

use std::fmt;

use chrono::NaiveDate;

use crate::model::{BaselineId, ShorelineId, TransectId};

/// A non-fatal problem found while processing one feature
#[derive(Debug, Clone, PartialEq)]
pub enum Warning {
    /// The baseline is too short to place a single transect
    EmptyBaseline {
        baseline_id: Option<BaselineId>,
        length: f64,
    },
    /// The transect does not cross its baseline
    NoBaselineIntersection { transect_id: TransectId },
    /// The transect crosses its baseline more than once; the landward crossing is kept
    MultipleBaselineIntersections { transect_id: TransectId, count: usize },
    /// The transect references a baseline that was not supplied
    UnknownBaseline {
        transect_id: TransectId,
        baseline_id: BaselineId,
    },
    /// The transect does not cross the shoreline
    NoShorelineIntersection {
        transect_id: TransectId,
        shoreline_id: ShorelineId,
    },
    /// A shoreline crossing exists but no baseline crossing to measure from
    UndefinedDistance {
        transect_id: TransectId,
        shoreline_id: ShorelineId,
        date: NaiveDate,
    },
    /// Fewer than two distinct dates carry a distance
    InsufficientObservations { transect_id: TransectId, dates: usize },
    /// All distances are identical, so R² is 0/0
    UndefinedRSquared { transect_id: TransectId },
}

impl Warning {
    /// Transect the warning refers to, if any
    pub fn transect_id(&self) -> Option<TransectId> {
        match self {
            Warning::EmptyBaseline { .. } => None,
            Warning::NoBaselineIntersection { transect_id }
            | Warning::MultipleBaselineIntersections { transect_id, .. }
            | Warning::UnknownBaseline { transect_id, .. }
            | Warning::NoShorelineIntersection { transect_id, .. }
            | Warning::UndefinedDistance { transect_id, .. }
            | Warning::InsufficientObservations { transect_id, .. }
            | Warning::UndefinedRSquared { transect_id } => Some(*transect_id),
        }
    }
}

impl fmt::Display for Warning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Warning::EmptyBaseline {
                baseline_id: Some(id),
                length,
            } => write!(f, "baseline {id} ({length:.2} m) is too short for any transect"),
            Warning::EmptyBaseline {
                baseline_id: None,
                length,
            } => write!(f, "baseline ({length:.2} m) is too short for any transect"),
            Warning::NoBaselineIntersection { transect_id } => {
                write!(f, "transect {transect_id} does not intersect the baseline")
            }
            Warning::MultipleBaselineIntersections { transect_id, count } => write!(
                f,
                "transect {transect_id} intersects the baseline {count} times; keeping the landward point"
            ),
            Warning::UnknownBaseline {
                transect_id,
                baseline_id,
            } => write!(
                f,
                "transect {transect_id} references unknown baseline {baseline_id}"
            ),
            Warning::NoShorelineIntersection {
                transect_id,
                shoreline_id,
            } => write!(
                f,
                "transect {transect_id} does not intersect shoreline {shoreline_id}"
            ),
            Warning::UndefinedDistance {
                transect_id,
                shoreline_id,
                date,
            } => write!(
                f,
                "distance undefined for transect {transect_id}, shoreline {shoreline_id} ({date}): no baseline intersection"
            ),
            Warning::InsufficientObservations { transect_id, dates } => write!(
                f,
                "transect {transect_id} has {dates} dated observation(s); at least 2 are needed"
            ),
            Warning::UndefinedRSquared { transect_id } => write!(
                f,
                "transect {transect_id} has constant distances; R² is undefined"
            ),
        }
    }
}
