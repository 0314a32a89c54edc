//! Shoreline change data model
//!
//! Inputs (baselines, shorelines) are immutable once loaded. Transects are
//! mutable while they are generated and corrected. Everything downstream
//! (intersections, observations, metrics) is derived and rebuilt on each run.

use std::collections::HashSet;
use std::fmt;

use chrono::NaiveDate;
use geo_types::{Coord, Line, LineString, MultiLineString, Point};
use serde::{Deserialize, Serialize};

use crate::angle::bearing;
use crate::error::{Error, Result};

macro_rules! id_type {
    ($(#[$meta:meta])* $name:ident($inner:ty)) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(pub $inner);

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                self.0.fmt(f)
            }
        }

        impl From<$inner> for $name {
            fn from(v: $inner) -> Self {
                Self(v)
            }
        }
    };
}

id_type!(
    /// Sequential transect identifier, starting at 1
    TransectId(u32)
);
id_type!(
    /// Identifier of one independent baseline segment
    BaselineId(i64)
);
id_type!(
    /// Identifier of one dated shoreline trace
    ShorelineId(i64)
);

/// Total Euclidean length of all parts.
pub fn multi_line_length(geometry: &MultiLineString<f64>) -> f64 {
    geometry
        .0
        .iter()
        .flat_map(|ls| ls.lines())
        .map(|l| (l.end.x - l.start.x).hypot(l.end.y - l.start.y))
        .sum()
}

fn check_parts(geometry: &MultiLineString<f64>, feature: impl Fn() -> String) -> Result<()> {
    if geometry.0.is_empty() {
        return Err(Error::InvalidGeometry {
            feature: feature(),
            reason: "geometry has no parts".into(),
        });
    }
    for (i, part) in geometry.0.iter().enumerate() {
        if part.0.len() < 2 {
            return Err(Error::InvalidGeometry {
                feature: feature(),
                reason: format!("part {i} has {} vertex(es), need at least 2", part.0.len()),
            });
        }
        if part.0.iter().any(|c| !c.x.is_finite() || !c.y.is_finite()) {
            return Err(Error::InvalidGeometry {
                feature: feature(),
                reason: format!("part {i} has non-finite coordinates"),
            });
        }
    }
    Ok(())
}

/// Reference line from which transects are cast
#[derive(Debug, Clone, PartialEq)]
pub struct Baseline {
    /// Present when several independent baselines are analysed together
    pub id: Option<BaselineId>,
    /// One or more ordered vertex sequences
    pub geometry: MultiLineString<f64>,
}

impl Baseline {
    pub fn new(id: Option<BaselineId>, geometry: impl Into<MultiLineString<f64>>) -> Self {
        Self {
            id,
            geometry: geometry.into(),
        }
    }

    /// Single-part baseline from `(x, y)` vertices
    pub fn from_coords(id: Option<BaselineId>, coords: Vec<(f64, f64)>) -> Self {
        Self::new(id, MultiLineString::new(vec![LineString::from(coords)]))
    }

    pub fn length(&self) -> f64 {
        multi_line_length(&self.geometry)
    }

    /// Check that every part has at least two finite vertices
    pub fn validate(&self) -> Result<()> {
        check_parts(&self.geometry, || match self.id {
            Some(id) => format!("baseline {id}"),
            None => "baseline".to_string(),
        })
    }
}

/// A dated observed coastline position
#[derive(Debug, Clone, PartialEq)]
pub struct Shoreline {
    pub id: ShorelineId,
    pub date: NaiveDate,
    pub geometry: MultiLineString<f64>,
}

impl Shoreline {
    pub fn new(id: ShorelineId, date: NaiveDate, geometry: impl Into<MultiLineString<f64>>) -> Self {
        Self {
            id,
            date,
            geometry: geometry.into(),
        }
    }

    pub fn validate(&self) -> Result<()> {
        check_parts(&self.geometry, || format!("shoreline {}", self.id))
    }
}

/// Fixed-length measurement axis cast across the baseline.
///
/// The bearing is derived from the geometry and recomputed on every
/// geometry change, so the two can never disagree.
#[derive(Debug, Clone, PartialEq)]
pub struct Transect {
    pub id: TransectId,
    pub baseline_id: Option<BaselineId>,
    line: Line<f64>,
    bearing: f64,
}

impl Transect {
    /// Create a transect running `line.start -> line.end`.
    ///
    /// Fails when the endpoints coincide or are not finite.
    pub fn new(id: TransectId, baseline_id: Option<BaselineId>, line: Line<f64>) -> Result<Self> {
        let bearing = checked_bearing(id, &line)?;
        Ok(Self {
            id,
            baseline_id,
            line,
            bearing,
        })
    }

    pub fn line(&self) -> Line<f64> {
        self.line
    }

    /// Bearing from start to end, degrees clockwise from north
    pub fn bearing(&self) -> f64 {
        self.bearing
    }

    pub fn start(&self) -> Coord<f64> {
        self.line.start
    }

    pub fn end(&self) -> Coord<f64> {
        self.line.end
    }

    pub fn length(&self) -> f64 {
        (self.line.end.x - self.line.start.x).hypot(self.line.end.y - self.line.start.y)
    }

    /// Replace the geometry and recompute the bearing
    pub fn set_line(&mut self, line: Line<f64>) -> Result<()> {
        self.bearing = checked_bearing(self.id, &line)?;
        self.line = line;
        Ok(())
    }

    pub fn to_line_string(&self) -> LineString<f64> {
        LineString::new(vec![self.line.start, self.line.end])
    }
}

/// Fail on the first transect id that occurs twice.
///
/// Downstream records are keyed by transect id, so a repeated id would
/// merge two transects' measurements.
pub fn check_unique_ids(transects: &[Transect]) -> Result<()> {
    let mut seen = HashSet::with_capacity(transects.len());
    match transects.iter().find(|t| !seen.insert(t.id)) {
        Some(t) => Err(Error::DuplicateTransectId(t.id)),
        None => Ok(()),
    }
}

fn checked_bearing(id: TransectId, line: &Line<f64>) -> Result<f64> {
    let finite = [line.start, line.end]
        .iter()
        .all(|c| c.x.is_finite() && c.y.is_finite());
    let b = bearing(line.start, line.end);
    if !finite || b.is_nan() {
        return Err(Error::InvalidGeometry {
            feature: format!("transect {id}"),
            reason: "endpoints must be finite and distinct".into(),
        });
    }
    Ok(b)
}

/// Where a transect crosses its baseline
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BaselineIntersection {
    pub transect_id: TransectId,
    pub point: Point<f64>,
}

/// One crossing of a transect with a shoreline.
///
/// A `(transect_id, shoreline_id)` key may occur several times when the
/// shoreline is multi-part or folds back across the transect.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ShorelineIntersection {
    pub transect_id: TransectId,
    pub shoreline_id: ShorelineId,
    pub date: NaiveDate,
    pub point: Point<f64>,
}

/// Distance of one shoreline crossing from the baseline along a transect
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DistanceObservation {
    pub transect_id: TransectId,
    pub shoreline_id: ShorelineId,
    pub date: NaiveDate,
    /// `None` when the transect has no baseline intersection
    #[serde(rename = "distance_from_base")]
    pub distance: Option<f64>,
}

/// Shoreline change statistics for one transect.
///
/// Undefined values are `NaN`, never zero.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EvolutionMetrics {
    pub transect_id: TransectId,
    /// Number of distinct dates that entered the fit
    pub n_dates: usize,
    /// Linear regression rate (m/year)
    #[serde(rename = "LRR")]
    pub lrr: f64,
    #[serde(rename = "LCI_low")]
    pub lci_low: f64,
    #[serde(rename = "LCI_upp")]
    pub lci_upp: f64,
    #[serde(rename = "R2")]
    pub r2: f64,
    #[serde(rename = "Pvalue")]
    pub p_value: f64,
    #[serde(rename = "RMSE")]
    pub rmse: f64,
    /// Shoreline change envelope (m)
    #[serde(rename = "SCE")]
    pub sce: f64,
    /// Net shoreline movement (m)
    #[serde(rename = "NSM")]
    pub nsm: f64,
}

impl EvolutionMetrics {
    /// Record with every statistic missing
    pub fn missing(transect_id: TransectId, n_dates: usize) -> Self {
        Self {
            transect_id,
            n_dates,
            lrr: f64::NAN,
            lci_low: f64::NAN,
            lci_upp: f64::NAN,
            r2: f64::NAN,
            p_value: f64::NAN,
            rmse: f64::NAN,
            sce: f64::NAN,
            nsm: f64::NAN,
        }
    }

    /// True when a regression rate could be estimated
    pub fn has_trend(&self) -> bool {
        !self.lrr.is_nan()
    }

    /// True when the rate is significant at level `alpha` (0.05 in most studies)
    pub fn is_significant(&self, alpha: f64) -> bool {
        !self.p_value.is_nan() && self.p_value <= alpha
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    fn line(x0: f64, y0: f64, x1: f64, y1: f64) -> Line<f64> {
        Line::new(Coord { x: x0, y: y0 }, Coord { x: x1, y: y1 })
    }

    #[test]
    fn test_transect_bearing_follows_geometry() {
        let mut t = Transect::new(TransectId(1), None, line(0.0, 0.0, 10.0, 0.0)).unwrap();
        assert_abs_diff_eq!(t.bearing(), 90.0, epsilon = 1e-12);

        t.set_line(line(0.0, 0.0, 0.0, -5.0)).unwrap();
        assert_abs_diff_eq!(t.bearing(), 180.0, epsilon = 1e-12);
        assert_abs_diff_eq!(t.length(), 5.0, epsilon = 1e-12);
    }

    #[test]
    fn test_transect_rejects_degenerate_line() {
        assert!(Transect::new(TransectId(1), None, line(1.0, 1.0, 1.0, 1.0)).is_err());
        assert!(Transect::new(TransectId(1), None, line(f64::NAN, 1.0, 1.0, 1.0)).is_err());

        let mut t = Transect::new(TransectId(2), None, line(0.0, 0.0, 1.0, 0.0)).unwrap();
        assert!(t.set_line(line(2.0, 2.0, 2.0, 2.0)).is_err());
        // Failed update leaves the transect untouched
        assert_eq!(t.end(), Coord { x: 1.0, y: 0.0 });
    }

    #[test]
    fn test_duplicate_transect_ids_rejected() {
        let a = Transect::new(TransectId(1), None, line(0.0, 0.0, 0.0, 10.0)).unwrap();
        let b = Transect::new(TransectId(2), None, line(5.0, 0.0, 5.0, 10.0)).unwrap();
        let c = Transect::new(TransectId(1), None, line(9.0, 0.0, 9.0, 10.0)).unwrap();
        assert!(check_unique_ids(&[a.clone(), b.clone()]).is_ok());
        assert!(matches!(
            check_unique_ids(&[a, b, c]),
            Err(Error::DuplicateTransectId(TransectId(1)))
        ));
    }

    #[test]
    fn test_baseline_length_and_validation() {
        let b = Baseline::from_coords(Some(BaselineId(1)), vec![(0.0, 0.0), (3.0, 4.0), (3.0, 10.0)]);
        assert_abs_diff_eq!(b.length(), 11.0, epsilon = 1e-12);
        assert!(b.validate().is_ok());

        let bad = Baseline::from_coords(None, vec![(0.0, 0.0)]);
        assert!(matches!(bad.validate(), Err(Error::InvalidGeometry { .. })));

        let empty = Baseline::new(None, MultiLineString::<f64>::new(vec![]));
        assert!(empty.validate().is_err());
    }

    #[test]
    fn test_metrics_missing_is_nan_not_zero() {
        let m = EvolutionMetrics::missing(TransectId(3), 1);
        assert!(m.lrr.is_nan());
        assert!(m.sce.is_nan());
        assert!(m.nsm.is_nan());
        assert!(!m.has_trend());
        assert!(!m.is_significant(0.05));
    }

    #[test]
    fn test_metrics_significance() {
        let mut m = EvolutionMetrics::missing(TransectId(1), 5);
        m.lrr = -1.2;
        m.p_value = 0.01;
        assert!(m.is_significant(0.05));
        m.p_value = 0.2;
        assert!(!m.is_significant(0.05));
    }

    #[test]
    fn test_id_display() {
        assert_eq!(TransectId(7).to_string(), "7");
        assert_eq!(ShorelineId::from(-2).to_string(), "-2");
    }
}
