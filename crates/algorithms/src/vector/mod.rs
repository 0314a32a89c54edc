//! Geometry primitives
//!
//! Planar operations shared by the transect, correction and intersection
//! stages:
//! - Measurements: distance, arc-length positions
//! - Intersect: segment × segment and segment × (multi)polyline crossings
//! - Spatial: centroid, rotation about the centroid

mod intersect;
mod measurements;
mod spatial;

pub use intersect::{
    intersect_line_string, intersect_multi_line_string, segment_intersection, MERGE_TOLERANCE,
};
pub use measurements::{distance, ArcLengthIndex, LinePosition};
pub use spatial::{centroid, rotate_about_centroid};
