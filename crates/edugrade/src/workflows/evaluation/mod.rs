//! Rating intake, quality scoring, and improvement suggestions for educational apps.
//!
//! Scoring and suggestion lookup are pure functions of a [`RatingSet`]; the service
//! adds storage and report export on top of them.

pub mod catalog;
pub mod domain;
pub mod import;
pub mod repository;
pub mod router;
pub mod scoring;
pub mod service;
pub mod suggestions;

#[cfg(test)]
mod tests;

pub use catalog::{CatalogError, CategoryCatalog, CategoryDefinition};
pub use domain::{
    checked_rating, rating_label, CategoryIcon, CategoryId, EvaluationId, EvaluationRecord,
    EvaluationSubmission, RatingForm, RatingSet, SubmissionForm, ValidationError, MAX_RATING,
    MIN_RATING,
};
pub use import::{EvaluationCsvImporter, EvaluationImportError};
pub use repository::{EvaluationRepository, EvaluationSummaryView, RepositoryError};
pub use router::evaluation_router;
pub use scoring::{compute_quality_score, QualityBand, QualityScore};
pub use service::{EvaluationService, EvaluationServiceError, ScorePreview};
pub use suggestions::{
    suggestions_for, suggestions_for_all, CategorySuggestionBlock, SuggestionLibrary,
    SuggestionTier, TierIndicator, TierSuggestions,
};
