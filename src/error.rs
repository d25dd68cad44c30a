use thiserror::Error;

/// The error half of the public result container.
///
/// Both variants carry a finished, display-ready message; the structured
/// failure record never crosses the public boundary.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum Error {
    /// The raw text handed to `run_on_text` was not valid JSON. Carries the
    /// parser's own message verbatim.
    #[error("Given an invalid JSON: {0}")]
    InvalidJson(String),

    /// The decoder rejected the value. Carries the rendered failure trail.
    #[error("{0}")]
    Decode(String),
}

pub type Result<T> = std::result::Result<T, Error>;
