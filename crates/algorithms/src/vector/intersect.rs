//! Line intersection
//!
//! Transects are straight segments; baselines and shorelines are
//! (multi-part) polylines. A transect is tested against every
//! consecutive-vertex sub-segment of every part. Collinear overlaps carry
//! no single crossing point and are ignored.

use geo::algorithm::line_intersection::{line_intersection, LineIntersection};
use geo::{Coord, Line, LineString, MultiLineString};

use super::measurements::distance;

/// Crossings closer than this (map units) are the same point.
///
/// A transect passing exactly through a shared vertex hits both adjacent
/// sub-segments; this folds the two hits into one.
pub const MERGE_TOLERANCE: f64 = 1e-6;

/// Crossing point of two segments, `None` when disjoint or collinear.
pub fn segment_intersection(a: Line<f64>, b: Line<f64>) -> Option<Coord<f64>> {
    match line_intersection(a, b)? {
        LineIntersection::SinglePoint { intersection, .. } => Some(intersection),
        LineIntersection::Collinear { .. } => None,
    }
}

fn push_unique(points: &mut Vec<Coord<f64>>, p: Coord<f64>) {
    if !points.iter().any(|q| distance(*q, p) <= MERGE_TOLERANCE) {
        points.push(p);
    }
}

fn collect_crossings(segment: Line<f64>, part: &LineString<f64>, out: &mut Vec<Coord<f64>>) {
    for sub in part.lines() {
        if distance(sub.start, sub.end) <= f64::EPSILON {
            continue;
        }
        if let Some(p) = segment_intersection(segment, sub) {
            push_unique(out, p);
        }
    }
}

fn sort_from_start(segment: Line<f64>, points: &mut [Coord<f64>]) {
    points.sort_by(|a, b| {
        distance(segment.start, *a).total_cmp(&distance(segment.start, *b))
    });
}

/// All distinct crossings of `segment` with a polyline, ordered from the
/// segment start.
pub fn intersect_line_string(segment: Line<f64>, line: &LineString<f64>) -> Vec<Coord<f64>> {
    let mut points = Vec::new();
    collect_crossings(segment, line, &mut points);
    sort_from_start(segment, &mut points);
    points
}

/// All distinct crossings of `segment` with every part of a multi-part
/// polyline, ordered from the segment start.
pub fn intersect_multi_line_string(
    segment: Line<f64>,
    lines: &MultiLineString<f64>,
) -> Vec<Coord<f64>> {
    let mut points = Vec::new();
    for part in &lines.0 {
        collect_crossings(segment, part, &mut points);
    }
    sort_from_start(segment, &mut points);
    points
}
