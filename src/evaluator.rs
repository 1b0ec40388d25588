//! # Evaluator
//! Pure, testable logic that maps `(books, weights)` → ranked `{name, score}`.
//! No I/O and no state between calls.
//!
//! Policy: weighted sum. `score = Σ weight[c] * rating(book, c)` over the
//! weighted criteria, not divided by the total weight. A missing rating
//! contributes 0 (lenient coverage) or fails the request (strict coverage).
//! Ties keep submission order.

use std::collections::BTreeSet;

use tracing::debug;

use crate::error::EvalError;
use crate::model::{Book, CriterionWeightSet, EvaluationRequest, RankedEntry, RATING_MAX, RATING_MIN};

/// How books that don't rate exactly the weighted criteria are treated.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum CoveragePolicy {
    /// Missing ratings count as 0, unweighted ratings are ignored.
    #[default]
    Lenient,
    /// Every book must rate exactly the weighted criteria.
    Strict,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ScoringPolicy {
    pub coverage: CoveragePolicy,
}

impl ScoringPolicy {
    pub fn strict() -> Self {
        Self {
            coverage: CoveragePolicy::Strict,
        }
    }
}

/// Rank `books` by weighted sum using the default (lenient) policy.
pub fn evaluate(books: &[Book], weights: &CriterionWeightSet) -> Result<Vec<RankedEntry>, EvalError> {
    evaluate_with_policy(books, weights, ScoringPolicy::default())
}

/// Convenience wrapper over a whole request.
pub fn evaluate_request(
    req: &EvaluationRequest,
    policy: ScoringPolicy,
) -> Result<Vec<RankedEntry>, EvalError> {
    evaluate_with_policy(&req.books, &req.weights, policy)
}

pub fn evaluate_with_policy(
    books: &[Book],
    weights: &CriterionWeightSet,
    policy: ScoringPolicy,
) -> Result<Vec<RankedEntry>, EvalError> {
    // 1) Fail fast on the first invalid input
    validate(books, weights, policy)?;

    // 2) Score in submission order; huge weights can overflow to inf
    let mut ranked = Vec::with_capacity(books.len());
    for b in books {
        let score = score_book(b, weights);
        if !score.is_finite() {
            return Err(EvalError::ScoreOverflow {
                book: b.name.clone(),
            });
        }
        ranked.push(RankedEntry::new(b.name.clone(), score));
    }

    // 3) Descending; `sort_by` is stable so equal scores keep input order
    ranked.sort_by(|a, b| b.score.total_cmp(&a.score));

    debug!(
        books = books.len(),
        criteria = weights.len(),
        top = ranked.first().map(|r| r.score),
        "evaluation ranked"
    );
    Ok(ranked)
}

/// Weighted-sum term for a single book. Criteria the weight set doesn't
/// know are ignored; a missing rating contributes 0.
pub fn score_book(book: &Book, weights: &CriterionWeightSet) -> f64 {
    weights
        .iter()
        .map(|(criterion, w)| w * book.rating(criterion).unwrap_or(0.0))
        .sum()
}

fn validate(books: &[Book], weights: &CriterionWeightSet, policy: ScoringPolicy) -> Result<(), EvalError> {
    if books.is_empty() {
        return Err(EvalError::no_books());
    }
    if weights.is_empty() {
        return Err(EvalError::no_criteria());
    }

    for (criterion, w) in weights.iter() {
        if !w.is_finite() || w <= 0.0 {
            return Err(EvalError::InvalidWeight {
                criterion: criterion.to_string(),
                weight: w,
            });
        }
    }

    for book in books {
        for (criterion, &r) in &book.ratings {
            // NaN fails `contains` as well
            if !(RATING_MIN..=RATING_MAX).contains(&r) {
                return Err(EvalError::InvalidRating {
                    book: book.name.clone(),
                    criterion: criterion.clone(),
                    rating: r,
                });
            }
        }
    }

    if policy.coverage == CoveragePolicy::Strict {
        for book in books {
            check_coverage(book, weights)?;
        }
    }
    Ok(())
}

fn check_coverage(book: &Book, weights: &CriterionWeightSet) -> Result<(), EvalError> {
    let missing: Vec<String> = weights
        .iter()
        .filter(|(c, _)| !book.ratings.contains_key(*c))
        .map(|(c, _)| c.to_string())
        .collect();
    if !missing.is_empty() {
        return Err(EvalError::MissingRating {
            book: book.name.clone(),
            criteria: missing,
        });
    }

    let unknown: BTreeSet<&String> = book.ratings.keys().filter(|c| !weights.contains(c)).collect();
    if !unknown.is_empty() {
        return Err(EvalError::UnknownCriterion {
            book: book.name.clone(),
            criteria: unknown.into_iter().cloned().collect(),
        });
    }
    Ok(())
}
