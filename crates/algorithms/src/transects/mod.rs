//! Transect casting and orientation
//!
//! - **orientation**: circular means and smoothed baseline bearings
//! - **generate**: equally spaced, perpendicular transects along baselines
//! - **correct**: inversion repair and outlier smoothing of bearings

mod correct;
mod generate;
mod orientation;

pub use correct::{
    correct_transects, fill_missing_bearings, inversion_angles, outlier_flags, CorrectTransects,
    CorrectionParams, CorrectionReport,
};
pub use generate::{generate_transects, GenerateTransects, SeaSide, TransectParams, TransectSet};
pub use orientation::{circular_mean, smoothed_bearings};
