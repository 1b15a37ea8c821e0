use std::fmt;

use thiserror::Error;

/// Identifier of one analysis run, as issued by the backend.
/// Always a positive integer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RunId(i64);

impl RunId {
    pub fn new(value: i64) -> Option<Self> {
        (value > 0).then_some(Self(value))
    }

    pub fn get(self) -> i64 {
        self.0
    }
}

impl fmt::Display for RunId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.get())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RunIdError {
    #[error("run_id is missing")]
    Missing,

    #[error("run_id is not a positive integer: {0}")]
    Invalid(String),
}

/// Which page is asking. Only changes the wording shown for a missing id.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Page {
    Results,
    Roadmap,
}

impl RunIdError {
    pub fn user_message(&self, page: Page) -> &'static str {
        match (self, page) {
            (RunIdError::Missing, Page::Results) => {
                "No valid run_id in URL. Please re-run the analysis."
            }
            (RunIdError::Missing, Page::Roadmap) => {
                "No valid run_id in URL. Please open roadmap from results page."
            }
            (RunIdError::Invalid(_), _) => "Invalid run_id in URL.",
        }
    }
}

/// Validates the `run_id` query parameter.
///
/// Browsers happily serialize absent JS values, so the literal strings
/// "undefined" and "null" count as missing rather than invalid.
pub fn parse_run_id(raw: Option<&str>) -> Result<RunId, RunIdError> {
    let raw = match raw.map(str::trim) {
        None | Some("") | Some("undefined") | Some("null") => return Err(RunIdError::Missing),
        Some(raw) => raw,
    };

    raw.parse::<i64>()
        .ok()
        .and_then(RunId::new)
        .ok_or_else(|| RunIdError::Invalid(raw.to_string()))
}
