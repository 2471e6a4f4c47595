use super::common::*;
use crate::workflows::evaluation::{
    compute_quality_score, CategoryId, QualityBand, RatingSet, ValidationError,
};
use proptest::prelude::*;

fn ratings_strategy() -> impl Strategy<Value = RatingSet> {
    (1u8..=5, 1u8..=5, 1u8..=5, 1u8..=5, 1u8..=5).prop_map(|(p, u, e, t, l)| RatingSet {
        pedagogical_design: p,
        ui_ux: u,
        engagement: e,
        technical_performance: t,
        learning_effectiveness: l,
    })
}

#[test]
fn sample_ratings_score_eighty_percent() {
    let score = compute_quality_score(&sample_ratings()).expect("valid ratings");

    assert_eq!(score.value(), 80);
    assert_eq!(score.band(), QualityBand::Excellent);
}

#[test]
fn extremes_map_to_twenty_and_one_hundred() {
    let lowest = RatingSet::uniform(1).expect("valid");
    let highest = RatingSet::uniform(5).expect("valid");

    assert_eq!(compute_quality_score(&lowest).expect("scores").value(), 20);
    assert_eq!(compute_quality_score(&highest).expect("scores").value(), 100);
}

#[test]
fn rejects_zero_and_six() {
    let mut ratings = sample_ratings();
    ratings.ui_ux = 0;
    assert_eq!(
        compute_quality_score(&ratings),
        Err(ValidationError::OutOfRange {
            category: CategoryId::UiUx,
            value: 0
        })
    );

    let mut ratings = sample_ratings();
    ratings.learning_effectiveness = 6;
    assert!(matches!(
        compute_quality_score(&ratings),
        Err(ValidationError::OutOfRange {
            category: CategoryId::LearningEffectiveness,
            value: 6
        })
    ));
}

proptest! {
    #[test]
    fn score_stays_within_twenty_and_one_hundred(ratings in ratings_strategy()) {
        let score = compute_quality_score(&ratings).expect("valid ratings").value();
        prop_assert!((20..=100).contains(&score));
    }

    #[test]
    fn raising_one_rating_never_lowers_the_score(
        ratings in ratings_strategy(),
        index in 0usize..5,
    ) {
        let category = CategoryId::ordered()[index];
        let current = ratings.get(category);
        prop_assume!(current < 5);

        let mut raised = ratings;
        raised.set(category, current + 1);

        let before = compute_quality_score(&ratings).expect("valid ratings");
        let after = compute_quality_score(&raised).expect("valid ratings");
        prop_assert!(after >= before);
    }

    #[test]
    fn scoring_is_idempotent(ratings in ratings_strategy()) {
        prop_assert_eq!(
            compute_quality_score(&ratings),
            compute_quality_score(&ratings)
        );
    }

    #[test]
    fn score_matches_rounded_percentage(ratings in ratings_strategy()) {
        let sum: u32 = ratings.entries().iter().map(|(_, r)| u32::from(*r)).sum();
        let expected = (f64::from(sum) / 25.0 * 100.0).round() as u8;
        prop_assert_eq!(compute_quality_score(&ratings).expect("valid").value(), expected);
    }
}
