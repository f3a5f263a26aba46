//! Error type shared by the problem model, the loaders and the strategies.

use std::fmt::{self, Display};

/// Errors raised while building, loading or querying a TSP instance.
#[derive(Debug)]
pub enum TspError {
    /// The distance matrix does not describe a valid instance
    /// (empty, not square, negative or non-finite entries).
    InvalidModel { reason: String },
    /// A city index outside `[0, num_cities)` was used.
    IndexOutOfRange { index: usize, num_cities: usize },
    /// An I/O error occurred while reading an instance file.
    Io(std::io::Error),
    /// A line of a TSPLIB file could not be understood.
    Parse { line: usize, message: String },
    /// A JSON instance could not be decoded.
    Json(serde_json::Error),
    /// Benchmark results could not be written as CSV.
    Csv(csv::Error),
}

impl TspError {
    pub(crate) fn invalid_model(reason: impl Into<String>) -> Self {
        TspError::InvalidModel { reason: reason.into() }
    }

    pub(crate) fn parse(line: usize, message: impl Into<String>) -> Self {
        TspError::Parse { line, message: message.into() }
    }
}

impl Display for TspError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidModel { reason } => write!(f, "Invalid model: {}", reason),
            Self::IndexOutOfRange { index, num_cities } => write!(
                f,
                "City index {} out of range for an instance with {} cities",
                index, num_cities
            ),
            Self::Io(e) => write!(f, "I/O error: {e}"),
            Self::Parse { line, message } => write!(f, "Parse error on line {}: {}", line, message),
            Self::Json(e) => write!(f, "JSON error: {e}"),
            Self::Csv(e) => write!(f, "CSV error: {e}"),
        }
    }
}

impl std::error::Error for TspError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(e) => Some(e),
            Self::Json(e) => Some(e),
            Self::Csv(e) => Some(e),
            _ => None,
        }
    }
}

impl From<std::io::Error> for TspError {
    fn from(e: std::io::Error) -> Self {
        Self::Io(e)
    }
}

impl From<csv::Error> for TspError {
    fn from(e: csv::Error) -> Self {
        Self::Csv(e)
    }
}

impl From<serde_json::Error> for TspError {
    fn from(e: serde_json::Error) -> Self {
        Self::Json(e)
    }
}
