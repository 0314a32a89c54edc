//! Geometric measurements: distance, positions along a line

use geo::{Coord, Line, MultiLineString};
use shorekit_core::angle::bearing;

/// Euclidean distance between two coordinates
#[inline]
pub fn distance(a: Coord<f64>, b: Coord<f64>) -> f64 {
    (b.x - a.x).hypot(b.y - a.y)
}

/// Position on a line found by walking it by arc length
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LinePosition {
    pub coord: Coord<f64>,
    /// Bearing of the segment the position falls on
    pub bearing: f64,
}

/// Arc-length index over a multi-part line.
///
/// Parts are walked in order as if joined end to end, so a distance is
/// measured along everything that precedes it. Zero-length segments are
/// dropped.
#[derive(Debug, Clone)]
pub struct ArcLengthIndex {
    /// (segment, arc length at segment start, segment length)
    segments: Vec<(Line<f64>, f64, f64)>,
    total: f64,
}

impl ArcLengthIndex {
    pub fn new(geom: &MultiLineString<f64>) -> Self {
        let mut segments = Vec::new();
        let mut total = 0.0;
        for line in geom.0.iter().flat_map(|ls| ls.lines()) {
            let len = distance(line.start, line.end);
            if len > 0.0 {
                segments.push((line, total, len));
                total += len;
            }
        }
        Self { segments, total }
    }

    pub fn total_length(&self) -> f64 {
        self.total
    }

    /// Position at arc length `s`, or `None` outside `[0, total]`
    pub fn locate(&self, s: f64) -> Option<LinePosition> {
        if self.segments.is_empty() || !(0.0..=self.total).contains(&s) {
            return None;
        }
        let idx = self
            .segments
            .partition_point(|(_, start, _)| *start <= s)
            .saturating_sub(1);
        let (line, start, len) = self.segments[idx];
        let t = ((s - start) / len).clamp(0.0, 1.0);
        Some(LinePosition {
            coord: Coord {
                x: line.start.x + t * (line.end.x - line.start.x),
                y: line.start.y + t * (line.end.y - line.start.y),
            },
            bearing: bearing(line.start, line.end),
        })
    }
}
