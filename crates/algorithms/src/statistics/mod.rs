//! Statistical analysis of shoreline position series
//!
//! - **distribution**: Student's t CDF, tail probability and quantile
//! - **regression**: ordinary least squares with slope inference
//! - **evolution**: LRR, confidence interval, R², p-value, RMSE, SCE, NSM

pub mod distribution;
pub mod regression;
mod evolution;

pub use evolution::{
    evolution_metrics, prepare_series, shoreline_evolution, EvolutionParams, EvolutionReport,
    ShorelineEvolution,
};
pub use regression::{fit_line, LinearFit};
