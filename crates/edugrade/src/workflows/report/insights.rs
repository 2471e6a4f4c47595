use crate::workflows::evaluation::{CategoryCatalog, QualityScore, RatingSet};

/// Three headline observations: strongest category, weakest category, overall outlook.
///
/// Ties resolve to the earliest category in catalog order.
pub fn build_insights(
    catalog: &CategoryCatalog,
    ratings: &RatingSet,
    score: QualityScore,
) -> Vec<String> {
    let entries = ratings.entries();

    let (best, best_rating) = entries
        .iter()
        .copied()
        .fold(entries[0], |acc, entry| if entry.1 > acc.1 { entry } else { acc });
    let (worst, worst_rating) = entries
        .iter()
        .copied()
        .fold(entries[0], |acc, entry| if entry.1 < acc.1 { entry } else { acc });

    let mut insights = vec![
        format!(
            "{} is resonating with learners (score {best_rating}/5). Consider showcasing successful flows to stakeholders.",
            catalog.definition(best).name
        ),
        format!(
            "{} needs immediate experimentation (score {worst_rating}/5). Co-create improvements with 3 target users this week.",
            catalog.definition(worst).name
        ),
    ];

    let outlook = if score.value() >= 80 {
        "Overall quality is excellent. Focus on scaling adoption and measuring learning outcomes."
    } else if score.value() >= 60 {
        "Quality is solid but inconsistent. Prioritize guardrails to lift the weakest dimension."
    } else {
        "Foundational work required. Align team on success metrics and rebuild critical journeys."
    };
    insights.push(outlook.to_string());

    insights
}
