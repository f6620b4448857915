use crate::domain::record::Outcome;
use thiserror::Error;

/// Reasons a single record cannot be transformed.
///
/// Every variant maps to the failure outcome; none of them is fatal to the process.
#[derive(Error, Debug)]
pub enum TransformError {
    #[error("Malformed JSON payload: {0}")]
    ParseError(#[from] serde_json::Error),
    #[error("Missing required field `{0}`")]
    MissingFieldError(String),
    #[error("Field `{field}` must be {expected}, found {found}")]
    TypeError {
        field: String,
        expected: &'static str,
        found: &'static str,
    },
    #[error("Non-finite result computing `{0}`")]
    NumericError(&'static str),
}

#[derive(Error, Debug)]
pub enum ProcessorError {
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
    #[error("Failed to deliver record to the {route} sink: {source}")]
    SinkError {
        route: Outcome,
        source: Box<ProcessorError>,
    },
}

impl ProcessorError {
    /// Tags a sink failure with the route it was serving.
    pub fn sink(route: Outcome, source: ProcessorError) -> Self {
        Self::SinkError {
            route,
            source: Box::new(source),
        }
    }
}

pub type Result<T> = std::result::Result<T, ProcessorError>;
