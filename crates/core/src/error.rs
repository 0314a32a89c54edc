//! Error types for shorekit

use crate::model::{BaselineId, TransectId};
use thiserror::Error;

/// Main error type for shorekit operations
#[derive(Error, Debug)]
pub enum Error {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Invalid date '{value}': {source}")]
    Date {
        value: String,
        #[source]
        source: chrono::ParseError,
    },

    #[error("Invalid parameter: {name} = {value} ({reason})")]
    InvalidParameter {
        name: &'static str,
        value: String,
        reason: String,
    },

    #[error("Unknown sea side '{0}' (expected 'left' or 'right')")]
    UnknownSeaSide(String),

    #[error("No {0} supplied")]
    EmptyInput(&'static str),

    #[error("Invalid geometry for {feature}: {reason}")]
    InvalidGeometry { feature: String, reason: String },

    #[error("Feature {feature} is missing attribute '{attribute}'")]
    MissingAttribute { feature: usize, attribute: String },

    #[error("Feature {feature} has an invalid '{attribute}' attribute: {reason}")]
    InvalidAttribute {
        feature: usize,
        attribute: String,
        reason: String,
    },

    #[error("Transect id {0} occurs more than once")]
    DuplicateTransectId(TransectId),

    #[error("Every transect of {} was flagged as an orientation outlier; no reference bearing left to interpolate from", display_baseline(.baseline_id))]
    DegenerateCorrection { baseline_id: Option<BaselineId> },

    #[error("{0}")]
    Other(String),
}

fn display_baseline(id: &Option<BaselineId>) -> String {
    match id {
        Some(id) => format!("baseline {id}"),
        None => "the baseline".to_string(),
    }
}

impl Error {
    /// Shorthand for [`Error::InvalidParameter`]
    pub fn invalid_parameter(
        name: &'static str,
        value: impl ToString,
        reason: impl Into<String>,
    ) -> Self {
        Error::InvalidParameter {
            name,
            value: value.to_string(),
            reason: reason.into(),
        }
    }
}

/// Result type alias for shorekit operations
pub type Result<T> = std::result::Result<T, Error>;
