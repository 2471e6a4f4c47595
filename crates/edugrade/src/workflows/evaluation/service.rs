use std::sync::Arc;

use chrono::Utc;
use serde::Serialize;
use tracing::{debug, info};

use super::catalog::{CatalogError, CategoryCatalog, CategoryDefinition};
use super::domain::{
    EvaluationId, EvaluationRecord, EvaluationSubmission, RatingSet, ValidationError,
};
use super::repository::{EvaluationRepository, RepositoryError};
use super::scoring::{compute_quality_score, QualityBand};
use super::suggestions::{CategorySuggestionBlock, SuggestionLibrary};
use crate::workflows::report::{
    EvaluationReport, LayoutError, PageGeometry, ReportDocument, ReportPaginator,
};

/// Service composing the category catalog, suggestion library, repository, and layout.
pub struct EvaluationService<R> {
    repository: Arc<R>,
    catalog: Arc<CategoryCatalog>,
    library: Arc<SuggestionLibrary>,
    geometry: PageGeometry,
}

/// Score and suggestions for ratings that have not been stored.
#[derive(Debug, Clone, Serialize)]
pub struct ScorePreview {
    pub quality_score: u8,
    pub quality_band: QualityBand,
    pub quality_label: &'static str,
    pub suggestions: Vec<CategorySuggestionBlock>,
}

impl<R> EvaluationService<R>
where
    R: EvaluationRepository + 'static,
{
    /// Service over the built-in catalog and suggestion tables.
    pub fn new(repository: Arc<R>) -> Self {
        Self {
            repository,
            catalog: Arc::new(CategoryCatalog::standard()),
            library: Arc::new(SuggestionLibrary::standard()),
            geometry: PageGeometry::default(),
        }
    }

    /// Service over caller-supplied content, checked before any request is served.
    pub fn with_content(
        repository: Arc<R>,
        catalog: CategoryCatalog,
        library: SuggestionLibrary,
        geometry: PageGeometry,
    ) -> Result<Self, CatalogError> {
        catalog.validate()?;
        library.validate()?;

        Ok(Self {
            repository,
            catalog: Arc::new(catalog),
            library: Arc::new(library),
            geometry,
        })
    }

    pub fn categories(&self) -> &[CategoryDefinition] {
        self.catalog.categories()
    }

    pub fn default_geometry(&self) -> PageGeometry {
        self.geometry
    }

    /// Validate, score, and store a new evaluation.
    pub fn submit(
        &self,
        submission: EvaluationSubmission,
    ) -> Result<EvaluationRecord, EvaluationServiceError> {
        let EvaluationSubmission { app_name, ratings } = submission;

        let app_name = app_name.trim();
        if app_name.is_empty() {
            return Err(ValidationError::EmptyAppName.into());
        }

        let score = compute_quality_score(&ratings)?;
        let record = EvaluationRecord {
            id: EvaluationId::generate(),
            app_name: app_name.to_string(),
            ratings,
            quality_score: score.value(),
            created_at: Utc::now(),
        };

        let stored = self.repository.insert(record)?;
        info!(
            evaluation_id = %stored.id,
            app_name = %stored.app_name,
            quality_score = stored.quality_score,
            "evaluation stored"
        );
        Ok(stored)
    }

    pub fn preview(&self, ratings: &RatingSet) -> Result<ScorePreview, ValidationError> {
        let score = compute_quality_score(ratings)?;
        let suggestions = self.library.suggestions_for_all(&self.catalog, ratings)?;
        let band = score.band();

        Ok(ScorePreview {
            quality_score: score.value(),
            quality_band: band,
            quality_label: band.label(),
            suggestions,
        })
    }

    pub fn get(&self, id: &EvaluationId) -> Result<EvaluationRecord, EvaluationServiceError> {
        let record = self
            .repository
            .fetch(id)?
            .ok_or(RepositoryError::NotFound)?;
        Ok(record)
    }

    pub fn list(&self) -> Result<Vec<EvaluationRecord>, EvaluationServiceError> {
        Ok(self.repository.all()?)
    }

    pub fn report(&self, id: &EvaluationId) -> Result<EvaluationReport, EvaluationServiceError> {
        let record = self.get(id)?;
        Ok(EvaluationReport::build(&record, &self.catalog, &self.library)?)
    }

    /// Paginated export layout; falls back to the configured page geometry.
    pub fn document(
        &self,
        id: &EvaluationId,
        geometry: Option<PageGeometry>,
    ) -> Result<ReportDocument, EvaluationServiceError> {
        let geometry = geometry.unwrap_or(self.geometry);
        let paginator = ReportPaginator::new(geometry)?;
        let report = self.report(id)?;
        let document = paginator.paginate(&report.document_spec());

        debug!(
            evaluation_id = %id,
            pages = document.page_count(),
            width = geometry.width_chars,
            height = geometry.height_lines,
            "report document laid out"
        );
        Ok(document)
    }
}

/// Error raised by the evaluation service.
#[derive(Debug, thiserror::Error)]
pub enum EvaluationServiceError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error(transparent)]
    Layout(#[from] LayoutError),
    #[error(transparent)]
    Repository(#[from] RepositoryError),
}
