//! Transect × shoreline crossings

use geo::Point;
use shorekit_core::{
    check_unique_ids, Error, Result, Shoreline, ShorelineIntersection, Transect, Warning,
};
use tracing::debug;

use crate::maybe_rayon::*;
use crate::vector::intersect_multi_line_string;

/// Every crossing of every transect with every shoreline
#[derive(Debug, Clone, Default)]
pub struct ShorelineCrossings {
    /// Ordered by transect id, then date. A `(transect_id, shoreline_id)`
    /// key repeats once per crossing.
    pub intersections: Vec<ShorelineIntersection>,
    /// One [`Warning::NoShorelineIntersection`] per pair that never crosses
    pub warnings: Vec<Warning>,
}

/// Intersect all transects with all parts of all shorelines.
///
/// Pairs are tested in parallel. A pair with no crossing produces no
/// record; a pair crossing several times produces one record per crossing.
///
/// # Errors
/// No shorelines supplied, a shoreline part with fewer than 2 vertices, or
/// a transect id used twice.
pub fn intersect_shorelines(
    transects: &[Transect],
    shorelines: &[Shoreline],
) -> Result<ShorelineCrossings> {
    if shorelines.is_empty() {
        return Err(Error::EmptyInput("shorelines"));
    }
    for shoreline in shorelines {
        shoreline.validate()?;
    }
    check_unique_ids(transects)?;

    let pairs: Vec<(usize, usize)> = (0..transects.len())
        .flat_map(|t| (0..shorelines.len()).map(move |s| (t, s)))
        .collect();

    let per_pair: Vec<std::result::Result<Vec<ShorelineIntersection>, Warning>> = pairs
        .into_par_iter()
        .map(|(ti, si)| {
            let transect = &transects[ti];
            let shoreline = &shorelines[si];
            let hits = intersect_multi_line_string(transect.line(), &shoreline.geometry);
            if hits.is_empty() {
                return Err(Warning::NoShorelineIntersection {
                    transect_id: transect.id,
                    shoreline_id: shoreline.id,
                });
            }
            Ok(hits
                .into_iter()
                .map(|c| ShorelineIntersection {
                    transect_id: transect.id,
                    shoreline_id: shoreline.id,
                    date: shoreline.date,
                    point: Point::from(c),
                })
                .collect())
        })
        .collect();

    let mut crossings = ShorelineCrossings::default();
    for outcome in per_pair {
        match outcome {
            Ok(hits) => crossings.intersections.extend(hits),
            Err(miss) => {
                debug!("{miss}");
                crossings.warnings.push(miss);
            }
        }
    }
    crossings
        .intersections
        .sort_by_key(|i| (i.transect_id, i.date, i.shoreline_id));
    debug!(
        "{} shoreline crossings from {} transects × {} shorelines",
        crossings.intersections.len(),
        transects.len(),
        shorelines.len()
    );
    Ok(crossings)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use geo::{Coord, Line, LineString, MultiLineString};
    use shorekit_core::{ShorelineId, TransectId};

    fn transect(id: u32, x: f64) -> Transect {
        Transect::new(
            TransectId(id),
            None,
            Line::new(Coord { x, y: -0.5 }, Coord { x, y: 100.0 }),
        )
        .unwrap()
    }

    fn date(y: i32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, 6, 1).unwrap()
    }

    fn straight(id: i64, year: i32, y: f64) -> Shoreline {
        Shoreline::new(
            ShorelineId(id),
            date(year),
            LineString::from(vec![(-50.0, y), (50.0, y)]),
        )
    }

    #[test]
    fn test_one_record_per_crossing() {
        let crossings = intersect_shorelines(
            &[transect(1, 0.0), transect(2, 10.0)],
            &[straight(1, 2000, 20.0), straight(2, 2010, 30.0)],
        )
        .unwrap();
        assert_eq!(crossings.intersections.len(), 4);
        assert!(crossings.warnings.is_empty());
        assert_eq!(crossings.intersections[0].transect_id, TransectId(1));
        assert_eq!(crossings.intersections[0].date, date(2000));
        assert_eq!(crossings.intersections[1].shoreline_id, ShorelineId(2));
    }

    #[test]
    fn test_two_part_shoreline_two_points_same_key() {
        let geometry = MultiLineString::new(vec![
            LineString::from(vec![(-50.0, 20.0), (50.0, 20.0)]),
            LineString::from(vec![(-50.0, 35.0), (50.0, 35.0)]),
        ]);
        let shoreline = Shoreline::new(ShorelineId(4), date(2015), geometry);
        let crossings = intersect_shorelines(&[transect(1, 0.0)], &[shoreline]).unwrap();

        assert_eq!(crossings.intersections.len(), 2);
        assert!(crossings
            .intersections
            .iter()
            .all(|i| i.transect_id == TransectId(1) && i.shoreline_id == ShorelineId(4)));
    }

    #[test]
    fn test_miss_is_skipped_with_warning() {
        let crossings =
            intersect_shorelines(&[transect(1, 0.0), transect(2, 80.0)], &[straight(1, 2000, 20.0)])
                .unwrap();
        assert_eq!(crossings.intersections.len(), 1);
        assert_eq!(
            crossings.warnings,
            vec![Warning::NoShorelineIntersection {
                transect_id: TransectId(2),
                shoreline_id: ShorelineId(1)
            }]
        );
    }

    #[test]
    fn test_no_shorelines_is_error() {
        assert!(intersect_shorelines(&[transect(1, 0.0)], &[]).is_err());
    }
}
