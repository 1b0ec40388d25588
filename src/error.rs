//! Evaluator failures. Each variant carries enough context to be shown to
//! the end user verbatim.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum EvalError {
    /// No books, or no weighted criteria.
    #[error("At least one {what} is required.")]
    EmptyInput { what: &'static str },

    #[error("Weight for '{criterion}' must be a finite positive number (got {weight}).")]
    InvalidWeight { criterion: String, weight: f64 },

    #[error("Rating for '{criterion}' on book '{book}' must be between 0 and 10 (got {rating}).")]
    InvalidRating {
        book: String,
        criterion: String,
        rating: f64,
    },

    /// Weights so large the weighted sum is not a finite number.
    #[error("Score for book '{book}' is too large to represent; use smaller weights.")]
    ScoreOverflow { book: String },

    /// Strict coverage only.
    #[error("Book '{book}' is missing ratings for: {}.", .criteria.join(", "))]
    MissingRating { book: String, criteria: Vec<String> },

    /// Strict coverage only.
    #[error("Book '{book}' has unknown criteria: {}.", .criteria.join(", "))]
    UnknownCriterion { book: String, criteria: Vec<String> },
}

impl EvalError {
    pub fn no_books() -> Self {
        Self::EmptyInput { what: "book" }
    }

    pub fn no_criteria() -> Self {
        Self::EmptyInput {
            what: "criterion weight",
        }
    }

    /// Stable snake_case tag used in responses and metric labels.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::EmptyInput { .. } => "empty_input",
            Self::InvalidWeight { .. } => "invalid_weight",
            Self::InvalidRating { .. } => "invalid_rating",
            Self::ScoreOverflow { .. } => "score_overflow",
            Self::MissingRating { .. } => "missing_rating",
            Self::UnknownCriterion { .. } => "unknown_criterion",
        }
    }
}
