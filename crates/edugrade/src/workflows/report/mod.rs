mod document;
mod insights;
mod paginator;
pub mod views;

pub use document::{
    export_file_name, DocumentSpec, LineRole, Page, PageGeometry, Placement, ReportDocument,
    SuggestionSection, REPORT_TITLE,
};
pub use insights::build_insights;
pub use paginator::{
    bullet_lines, minimum_width, paginate, wrap_text, LayoutError, ReportPaginator, BULLET,
    CONTINUATION_MARKER, RECOMMENDATIONS_HEADING, SCORES_HEADING,
};
pub use views::{CategoryScoreEntry, EvaluationReport};

use crate::workflows::evaluation::{
    compute_quality_score, rating_label, CategoryCatalog, EvaluationRecord, SuggestionLibrary,
    SuggestionTier, ValidationError, MAX_RATING,
};

impl EvaluationReport {
    /// Re-derives score, breakdown and suggestions from a stored record.
    pub fn build(
        record: &EvaluationRecord,
        catalog: &CategoryCatalog,
        library: &SuggestionLibrary,
    ) -> Result<Self, ValidationError> {
        let score = compute_quality_score(&record.ratings)?;
        let suggestions = library.suggestions_for_all(catalog, &record.ratings)?;

        let category_scores = record
            .ratings
            .entries()
            .into_iter()
            .map(|(category, rating)| {
                let definition = catalog.definition(category);
                CategoryScoreEntry {
                    category,
                    name: definition.name.to_string(),
                    short_label: definition.short_label.to_string(),
                    icon: definition.icon(),
                    rating,
                    rating_label: rating_label(rating),
                    max_rating: MAX_RATING,
                    percent: ((u16::from(rating) * 100) / u16::from(MAX_RATING)) as u8,
                    tier: SuggestionTier::for_rating(rating),
                }
            })
            .collect();

        let band = score.band();
        Ok(Self {
            evaluation_id: record.id,
            app_name: record.app_name.clone(),
            created_at: record.created_at,
            quality_score: score.value(),
            quality_band: band,
            quality_label: band.label(),
            quality_verdict: score.verdict(),
            category_scores,
            suggestions,
            insights: build_insights(catalog, &record.ratings, score),
        })
    }

    pub fn document_spec(&self) -> DocumentSpec {
        DocumentSpec::from_report(self)
    }
}
