//! I/O for shoreline change inputs and outputs
//!
//! The algorithms never touch files. These adapters load GeoJSON into the
//! typed model and write results back out as GeoJSON or CSV.

mod geojson;
mod tables;

pub use geojson::{
    baselines_from, parse_date, parse_features, read_baselines, read_features, read_shorelines,
    read_transects, shorelines_from, transects_from, transects_to_geojson,
    write_transects_geojson, DEFAULT_SHORELINE_ID_FIELD,
};
pub use tables::{
    read_observations, read_observations_csv, write_baseline_points, write_baseline_points_csv,
    write_metrics, write_metrics_csv, write_observations, write_observations_csv,
    write_shoreline_points, write_shoreline_points_csv, write_transects, write_transects_csv,
};
