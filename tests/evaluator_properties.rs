// tests/evaluator_properties.rs
//
// Property checks for the ranking engine: determinism, exact single
// criterion products, tie stability, monotonicity and inert unweighted
// criteria.

use book_decision_companion::evaluator::score_book;
use book_decision_companion::{evaluate, Book, CriterionWeightSet};
use proptest::prelude::*;

const CRITERIA: [&str; 3] = ["Depth", "Pace", "Readability"];

fn rating() -> impl Strategy<Value = f64> {
    (0u32..=100).prop_map(|x| f64::from(x) / 10.0)
}

fn weight() -> impl Strategy<Value = f64> {
    (1u32..=50).prop_map(|x| f64::from(x) / 5.0)
}

fn weights() -> impl Strategy<Value = CriterionWeightSet> {
    proptest::collection::vec(weight(), CRITERIA.len())
        .prop_map(|ws| CRITERIA.iter().copied().zip(ws).collect())
}

/// Books rate a random subset of the criteria (missing = 0).
fn books() -> impl Strategy<Value = Vec<Book>> {
    proptest::collection::vec(
        proptest::collection::vec(proptest::option::of(rating()), CRITERIA.len()),
        1..8,
    )
    .prop_map(|rows| {
        rows.into_iter()
            .enumerate()
            .map(|(i, row)| {
                let mut b = Book::new(format!("book-{i}"));
                for (c, r) in CRITERIA.iter().zip(row) {
                    if let Some(r) = r {
                        b = b.rated(*c, r);
                    }
                }
                b
            })
            .collect()
    })
}

proptest! {
    #[test]
    fn evaluation_is_deterministic(bs in books(), ws in weights()) {
        let a = evaluate(&bs, &ws).unwrap();
        let b = evaluate(&bs, &ws).unwrap();
        prop_assert_eq!(a.len(), b.len());
        for (x, y) in a.iter().zip(&b) {
            prop_assert_eq!(&x.name, &y.name);
            prop_assert_eq!(x.score.to_bits(), y.score.to_bits());
        }
    }

    #[test]
    fn output_is_sorted_descending(bs in books(), ws in weights()) {
        let out = evaluate(&bs, &ws).unwrap();
        prop_assert_eq!(out.len(), bs.len());
        for pair in out.windows(2) {
            prop_assert!(pair[0].score >= pair[1].score);
        }
    }

    #[test]
    fn single_criterion_is_exact_product(r in rating(), w in weight()) {
        let ws = CriterionWeightSet::new().with("Depth", w);
        let out = evaluate(&[Book::new("A").rated("Depth", r)], &ws).unwrap();
        prop_assert_eq!(out[0].score, w * r);
    }

    #[test]
    fn unweighted_criteria_never_matter(bs in books(), ws in weights(), noise in rating()) {
        let noisy: Vec<Book> = bs.iter().cloned().map(|b| b.rated("Cover", noise)).collect();
        prop_assert_eq!(evaluate(&bs, &ws).unwrap(), evaluate(&noisy, &ws).unwrap());
    }

    #[test]
    fn missing_rating_equals_explicit_zero(bs in books(), ws in weights()) {
        for b in &bs {
            let mut filled = b.clone();
            for c in CRITERIA {
                filled.ratings.entry(c.to_string()).or_insert(0.0);
            }
            prop_assert_eq!(score_book(b, &ws), score_book(&filled, &ws));
        }
    }

    #[test]
    fn raising_a_rating_never_drops_rank(bs in books(), ws in weights(), pick in any::<prop::sample::Index>(), c in 0usize..3) {
        let idx = pick.index(bs.len());
        let criterion = CRITERIA[c];
        let mut raised = bs.clone();
        let current = raised[idx].rating(criterion).unwrap_or(0.0);
        raised[idx].ratings.insert(criterion.to_string(), (current + 1.0).min(10.0));

        let name = format!("book-{idx}");
        let before = evaluate(&bs, &ws).unwrap().iter().position(|r| r.name == name).unwrap();
        let after = evaluate(&raised, &ws).unwrap().iter().position(|r| r.name == name).unwrap();
        prop_assert!(after <= before, "rank went from {} to {}", before, after);
    }

    #[test]
    fn equal_scores_keep_input_order(n in 2usize..8, r in rating(), ws in weights()) {
        let bs: Vec<Book> = (0..n)
            .map(|i| {
                CRITERIA
                    .iter()
                    .fold(Book::new(format!("twin-{i}")), |b, c| b.rated(*c, r))
            })
            .collect();
        let out = evaluate(&bs, &ws).unwrap();
        let names: Vec<String> = out.into_iter().map(|e| e.name).collect();
        let expected: Vec<String> = (0..n).map(|i| format!("twin-{i}")).collect();
        prop_assert_eq!(names, expected);
    }
}
