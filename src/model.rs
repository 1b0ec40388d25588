//! # Evaluation model
//! Plain value records the evaluator works on. Everything here is built
//! once per request and never mutated afterwards.
//!
//! Criterion maps are `BTreeMap`s so iteration (and therefore float
//! summation order) only depends on the names, never on insertion order.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Lowest accepted rating (inclusive).
pub const RATING_MIN: f64 = 0.0;
/// Highest accepted rating (inclusive).
pub const RATING_MAX: f64 = 10.0;

/// Criterion name → weight. Unique names; validated by the evaluator.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CriterionWeightSet {
    weights: BTreeMap<String, f64>,
}

impl CriterionWeightSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder style insert; a repeated name overwrites the earlier weight.
    pub fn with(mut self, criterion: impl Into<String>, weight: f64) -> Self {
        self.insert(criterion, weight);
        self
    }

    pub fn insert(&mut self, criterion: impl Into<String>, weight: f64) {
        self.weights.insert(criterion.into(), weight);
    }

    pub fn get(&self, criterion: &str) -> Option<f64> {
        self.weights.get(criterion).copied()
    }

    pub fn contains(&self, criterion: &str) -> bool {
        self.weights.contains_key(criterion)
    }

    /// Criteria in name order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> {
        self.weights.iter().map(|(k, &w)| (k.as_str(), w))
    }

    pub fn len(&self) -> usize {
        self.weights.len()
    }

    pub fn is_empty(&self) -> bool {
        self.weights.is_empty()
    }
}

impl<K: Into<String>> FromIterator<(K, f64)> for CriterionWeightSet {
    fn from_iter<I: IntoIterator<Item = (K, f64)>>(iter: I) -> Self {
        Self {
            weights: iter.into_iter().map(|(k, w)| (k.into(), w)).collect(),
        }
    }
}

/// One alternative under comparison. Names need not be unique.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Book {
    pub name: String,
    #[serde(default)]
    pub ratings: BTreeMap<String, f64>,
}

impl Book {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ratings: BTreeMap::new(),
        }
    }

    /// Add one rating (builder style).
    pub fn rated(mut self, criterion: impl Into<String>, rating: f64) -> Self {
        self.ratings.insert(criterion.into(), rating);
        self
    }

    pub fn rating(&self, criterion: &str) -> Option<f64> {
        self.ratings.get(criterion).copied()
    }
}

/// Books in submission order plus the weight set they are scored against.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EvaluationRequest {
    pub books: Vec<Book>,
    pub weights: CriterionWeightSet,
}

impl EvaluationRequest {
    pub fn new(books: Vec<Book>, weights: CriterionWeightSet) -> Self {
        Self { books, weights }
    }
}

/// One row of the ranking. `score` keeps full precision.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankedEntry {
    pub name: String,
    pub score: f64,
}

impl RankedEntry {
    pub fn new(name: impl Into<String>, score: f64) -> Self {
        Self {
            name: name.into(),
            score,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn weight_set_iterates_in_name_order() {
        let w = CriterionWeightSet::new()
            .with("Readability", 3.0)
            .with("Depth", 5.0)
            .with("Appeal", 1.0);
        let names: Vec<&str> = w.iter().map(|(n, _)| n).collect();
        assert_eq!(names, vec!["Appeal", "Depth", "Readability"]);
    }

    #[test]
    fn later_insert_overwrites_weight() {
        let w = CriterionWeightSet::new().with("Depth", 2.0).with("Depth", 7.0);
        assert_eq!(w.len(), 1);
        assert_eq!(w.get("Depth"), Some(7.0));
    }

    #[test]
    fn book_deserializes_from_wire_shape() {
        let b: Book = serde_json::from_value(json!({
            "name": "Deep Work",
            "ratings": { "Depth": 9, "Readability": 7.5 }
        }))
        .unwrap();
        assert_eq!(b.name, "Deep Work");
        assert_eq!(b.rating("Depth"), Some(9.0));
        assert_eq!(b.rating("Readability"), Some(7.5));
        assert_eq!(b.rating("Popularity"), None);
    }

    #[test]
    fn weight_set_is_a_plain_json_object() {
        let w = CriterionWeightSet::new().with("Depth", 5.0);
        assert_eq!(serde_json::to_value(&w).unwrap(), json!({ "Depth": 5.0 }));
    }
}
