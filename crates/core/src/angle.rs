//! Compass bearings
//!
//! Bearings are degrees clockwise from north (+y), in `[0, 360)`.

use geo_types::Coord;

/// Wrap an angle in degrees into `[0, 360)`.
#[inline]
pub fn normalize_bearing(degrees: f64) -> f64 {
    let wrapped = degrees.rem_euclid(360.0);
    // rem_euclid can round up to exactly 360 for tiny negative inputs
    if wrapped >= 360.0 {
        0.0
    } else {
        wrapped
    }
}

/// Bearing of the direction `from -> to`.
///
/// Returns NaN when the two coordinates coincide.
#[inline]
pub fn bearing(from: Coord<f64>, to: Coord<f64>) -> f64 {
    let dx = to.x - from.x;
    let dy = to.y - from.y;
    if dx == 0.0 && dy == 0.0 {
        return f64::NAN;
    }
    normalize_bearing(dx.atan2(dy).to_degrees())
}

/// Unit vector `(sin θ, cos θ)` pointing along a bearing.
#[inline]
pub fn unit_vector(bearing_deg: f64) -> (f64, f64) {
    let rad = bearing_deg.to_radians();
    (rad.sin(), rad.cos())
}

/// Signed shortest rotation from `from` to `to`, in `(-180, 180]`.
#[inline]
pub fn shortest_rotation(from: f64, to: f64) -> f64 {
    let d = normalize_bearing(to - from);
    if d > 180.0 {
        d - 360.0
    } else {
        d
    }
}
