//! # Shorekit Algorithms
//!
//! Shoreline change analysis over baselines and dated shorelines.
//!
//! ## Modules
//!
//! - **vector**: planar geometry primitives (length, arc-length positions,
//!   segment intersection, rotation)
//! - **transects**: transect generation and orientation correction
//! - **intersection**: baseline and shoreline crossings, distance series
//! - **statistics**: regression-based shoreline evolution metrics
//! - **pipeline**: all of the above in one call

mod maybe_rayon;

pub mod intersection;
pub mod pipeline;
pub mod statistics;
pub mod transects;
pub mod vector;

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::intersection::{
        distance_observations, intersect_baselines, intersect_shorelines, intersect_transects,
        IntersectTransects, IntersectionReport,
    };
    pub use crate::pipeline::{run_analysis, AnalysisParams, AnalysisReport};
    pub use crate::statistics::{
        evolution_metrics, prepare_series, shoreline_evolution, EvolutionParams,
        EvolutionReport, ShorelineEvolution,
    };
    pub use crate::transects::{
        correct_transects, generate_transects, CorrectTransects, CorrectionParams,
        CorrectionReport, GenerateTransects, SeaSide, TransectParams, TransectSet,
    };
    pub use shorekit_core::prelude::*;
}
