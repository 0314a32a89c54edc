//! # Shorekit Core
//!
//! Core types, traits and I/O for the shorekit shoreline change library.
//!
//! This crate provides:
//! - Baselines, shorelines, transects and the records derived from them
//! - `Error` / `Warning`: fatal and non-fatal diagnostics
//! - Algorithm traits for consistent API
//! - GeoJSON input and GeoJSON/CSV output adapters

pub mod angle;
pub mod error;
pub mod io;
pub mod model;
pub mod vector;
pub mod warning;

pub use error::{Error, Result};
pub use model::{
    check_unique_ids, Baseline, BaselineId, BaselineIntersection, DistanceObservation,
    EvolutionMetrics, Shoreline, ShorelineId, ShorelineIntersection, Transect, TransectId,
};
pub use warning::Warning;

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::error::{Error, Result};
    pub use crate::model::{
        Baseline, BaselineId, BaselineIntersection, DistanceObservation, EvolutionMetrics,
        Shoreline, ShorelineId, ShorelineIntersection, Transect, TransectId,
    };
    pub use crate::warning::Warning;
    pub use crate::Algorithm;
}

/// Core trait for all algorithms in shorekit.
///
/// Algorithms are pure functions that transform input data according to parameters.
pub trait Algorithm {
    /// Input type for the algorithm
    type Input;
    /// Output type for the algorithm
    type Output;
    /// Parameters controlling algorithm behavior
    type Params: Default;
    /// Error type for algorithm execution
    type Error: std::error::Error;

    /// Returns the algorithm name
    fn name(&self) -> &'static str;

    /// Returns a description of what the algorithm does
    fn description(&self) -> &'static str;

    /// Execute the algorithm
    fn execute(&self, input: Self::Input, params: Self::Params) -> std::result::Result<Self::Output, Self::Error>;

    /// Execute with default parameters
    fn execute_default(&self, input: Self::Input) -> std::result::Result<Self::Output, Self::Error> {
        self.execute(input, Self::Params::default())
    }
}
