use chrono::{DateTime, Utc};
use serde::Serialize;

use super::domain::{EvaluationId, EvaluationRecord};
use super::scoring::QualityBand;

/// Storage abstraction so the service module can be exercised in isolation.
///
/// Implementations never reuse an id and return [`EvaluationRepository::all`] in
/// insertion order.
pub trait EvaluationRepository: Send + Sync {
    fn insert(&self, record: EvaluationRecord) -> Result<EvaluationRecord, RepositoryError>;
    fn fetch(&self, id: &EvaluationId) -> Result<Option<EvaluationRecord>, RepositoryError>;
    fn all(&self) -> Result<Vec<EvaluationRecord>, RepositoryError>;
}

/// Error enumeration for repository failures.
#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    #[error("record already exists")]
    Conflict,
    #[error("record not found")]
    NotFound,
    #[error("repository unavailable: {0}")]
    Unavailable(String),
}

/// Compact listing entry for stored evaluations.
#[derive(Debug, Clone, Serialize)]
pub struct EvaluationSummaryView {
    pub id: EvaluationId,
    pub app_name: String,
    pub quality_score: u8,
    pub quality_label: &'static str,
    pub created_at: DateTime<Utc>,
}

impl EvaluationRecord {
    pub fn summary_view(&self) -> EvaluationSummaryView {
        EvaluationSummaryView {
            id: self.id,
            app_name: self.app_name.clone(),
            quality_score: self.quality_score,
            quality_label: QualityBand::for_score(self.quality_score).label(),
            created_at: self.created_at,
        }
    }
}

