//! Assembles an [`EvaluationRequest`] from loosely edited form state.
//!
//! Editors keep their own mutable rows; this only runs at submit time.
//! Rules:
//! - names are trimmed, blank books/criteria are skipped
//! - a repeated criterion name overwrites the earlier weight
//! - rating keys are trimmed the same way as criterion names

use std::collections::BTreeMap;

use crate::error::EvalError;
use crate::model::{Book, CriterionWeightSet, EvaluationRequest};

#[derive(Debug, Clone, Default)]
pub struct EvaluationBuilder {
    books: Vec<Book>,
    weights: CriterionWeightSet,
}

impl EvaluationBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn criterion(mut self, name: &str, weight: f64) -> Self {
        let name = name.trim();
        if !name.is_empty() {
            self.weights.insert(name, weight);
        }
        self
    }

    pub fn book<'a, I>(mut self, name: &str, ratings: I) -> Self
    where
        I: IntoIterator<Item = (&'a str, f64)>,
    {
        let name = name.trim();
        if name.is_empty() {
            return self;
        }
        let ratings: BTreeMap<String, f64> = ratings
            .into_iter()
            .map(|(c, r)| (c.trim(), r))
            .filter(|(c, _)| !c.is_empty())
            .map(|(c, r)| (c.to_string(), r))
            .collect();
        self.books.push(Book {
            name: name.to_string(),
            ratings,
        });
        self
    }

    /// Freeze the collected rows. Value validation is left to the evaluator.
    pub fn build(self) -> Result<EvaluationRequest, EvalError> {
        if self.books.is_empty() {
            return Err(EvalError::no_books());
        }
        if self.weights.is_empty() {
            return Err(EvalError::no_criteria());
        }
        Ok(EvaluationRequest::new(self.books, self.weights))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trims_and_skips_blank_names() {
        let req = EvaluationBuilder::new()
            .criterion("  Depth ", 2.0)
            .criterion("   ", 9.0)
            .book(" Dune ", [(" Depth", 7.0), ("", 3.0)])
            .book("  ", [("Depth", 1.0)])
            .build()
            .unwrap();

        assert_eq!(req.books.len(), 1);
        assert_eq!(req.books[0].name, "Dune");
        assert_eq!(req.books[0].rating("Depth"), Some(7.0));
        assert_eq!(req.books[0].ratings.len(), 1);
        assert_eq!(req.weights.len(), 1);
        assert_eq!(req.weights.get("Depth"), Some(2.0));
    }

    #[test]
    fn later_criterion_overwrites_earlier() {
        let req = EvaluationBuilder::new()
            .criterion("Depth", 2.0)
            .criterion("Depth ", 4.0)
            .book("A", [])
            .build()
            .unwrap();
        assert_eq!(req.weights.get("Depth"), Some(4.0));
    }

    #[test]
    fn nothing_named_is_empty_input() {
        let no_books = EvaluationBuilder::new().criterion("Depth", 1.0).book(" ", []).build();
        assert_eq!(no_books, Err(EvalError::no_books()));

        let no_criteria = EvaluationBuilder::new().criterion("", 1.0).book("A", []).build();
        assert_eq!(no_criteria, Err(EvalError::no_criteria()));
    }

    #[test]
    fn keeps_book_order_and_duplicates() {
        let req = EvaluationBuilder::new()
            .criterion("Depth", 1.0)
            .book("B", [])
            .book("A", [])
            .book("B", [])
            .build()
            .unwrap();
        let names: Vec<&str> = req.books.iter().map(|b| b.name.as_str()).collect();
        assert_eq!(names, vec!["B", "A", "B"]);
    }
}
