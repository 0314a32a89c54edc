//! Spatial operations on transect segments: centroid, rotation

use geo::{Centroid, Line, Point, Rotate};

/// Midpoint of a segment
pub fn centroid(line: &Line<f64>) -> Point<f64> {
    line.centroid()
}

/// Rotate a segment about its own centroid.
///
/// Positive angles turn clockwise, the same sense bearings grow in, so a
/// rotation by `θ` adds `θ` to the segment bearing.
pub fn rotate_about_centroid(line: &Line<f64>, clockwise_deg: f64) -> Line<f64> {
    line.rotate_around_point(-clockwise_deg, centroid(line))
}
