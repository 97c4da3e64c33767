//! Error types for the submission service.

use std::error::Error;
use std::fmt;

use crate::store::StoreError;
use crate::svg::MalformedMarkup;

/// Error type for submission and query operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmissionError {
    /// Text is not bracketed by `<svg` ... `</svg>`.
    InvalidShape,
    /// Text passed the shape check but is not well-formed XML.
    MalformedMarkup(String),
    /// The store could not complete the operation.
    Storage(StoreError),
    /// No SVG has been submitted yet.
    NotFound,
}

impl fmt::Display for SubmissionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SubmissionError::InvalidShape => write!(
                f,
                "Content must be a valid SVG (should start with <svg and end with </svg>)"
            ),
            SubmissionError::MalformedMarkup(msg) => {
                write!(f, "Content is not well-formed SVG markup: {}", msg)
            }
            SubmissionError::Storage(e) => write!(f, "storage error: {}", e),
            SubmissionError::NotFound => write!(f, "No SVG found"),
        }
    }
}

impl Error for SubmissionError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            SubmissionError::Storage(e) => Some(e),
            _ => None,
        }
    }
}

impl From<StoreError> for SubmissionError {
    fn from(err: StoreError) -> Self {
        SubmissionError::Storage(err)
    }
}

impl From<MalformedMarkup> for SubmissionError {
    fn from(err: MalformedMarkup) -> Self {
        SubmissionError::MalformedMarkup(err.0)
    }
}

impl SubmissionError {
    /// Map this error to an HTTP-style status code.
    pub fn status_code(&self) -> u16 {
        match self {
            SubmissionError::InvalidShape => 400,
            SubmissionError::MalformedMarkup(_) => 400,
            SubmissionError::Storage(_) => 500,
            SubmissionError::NotFound => 404,
        }
    }

    /// True for errors the submitter can fix by changing the input.
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            SubmissionError::InvalidShape | SubmissionError::MalformedMarkup(_)
        )
    }
}
