use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use axum::response::Response;
use serde_json::Value;

use crate::workflows::evaluation::domain::{EvaluationId, EvaluationSubmission, RatingSet};
use crate::workflows::evaluation::repository::{EvaluationRepository, RepositoryError};
use crate::workflows::evaluation::{evaluation_router, EvaluationRecord, EvaluationService};

/// Ratings from the sample report: 4, 3, 5, 4, 4.
pub(super) fn sample_ratings() -> RatingSet {
    RatingSet {
        pedagogical_design: 4,
        ui_ux: 3,
        engagement: 5,
        technical_performance: 4,
        learning_effectiveness: 4,
    }
}

pub(super) fn submission() -> EvaluationSubmission {
    EvaluationSubmission {
        app_name: "Sample Educational App".to_string(),
        ratings: sample_ratings(),
    }
}

pub(super) fn out_of_range_submission() -> EvaluationSubmission {
    let mut submission = submission();
    submission.ratings.engagement = 6;
    submission
}

pub(super) fn build_service() -> (EvaluationService<MemoryRepository>, Arc<MemoryRepository>) {
    let repository = Arc::new(MemoryRepository::default());
    let service = EvaluationService::new(repository.clone());
    (service, repository)
}

#[derive(Default, Clone)]
pub(super) struct MemoryRepository {
    pub(super) records: Arc<Mutex<HashMap<EvaluationId, EvaluationRecord>>>,
    pub(super) order: Arc<Mutex<Vec<EvaluationId>>>,
}

impl EvaluationRepository for MemoryRepository {
    fn insert(&self, record: EvaluationRecord) -> Result<EvaluationRecord, RepositoryError> {
        let mut guard = self.records.lock().expect("repository mutex poisoned");
        if guard.contains_key(&record.id) {
            return Err(RepositoryError::Conflict);
        }
        guard.insert(record.id, record.clone());
        self.order
            .lock()
            .expect("order mutex poisoned")
            .push(record.id);
        Ok(record)
    }

    fn fetch(&self, id: &EvaluationId) -> Result<Option<EvaluationRecord>, RepositoryError> {
        let guard = self.records.lock().expect("repository mutex poisoned");
        Ok(guard.get(id).cloned())
    }

    fn all(&self) -> Result<Vec<EvaluationRecord>, RepositoryError> {
        let guard = self.records.lock().expect("repository mutex poisoned");
        let order = self.order.lock().expect("order mutex poisoned");
        Ok(order.iter().filter_map(|id| guard.get(id).cloned()).collect())
    }
}

pub(super) struct ConflictRepository;

impl EvaluationRepository for ConflictRepository {
    fn insert(&self, _record: EvaluationRecord) -> Result<EvaluationRecord, RepositoryError> {
        Err(RepositoryError::Conflict)
    }

    fn fetch(&self, _id: &EvaluationId) -> Result<Option<EvaluationRecord>, RepositoryError> {
        Ok(None)
    }

    fn all(&self) -> Result<Vec<EvaluationRecord>, RepositoryError> {
        Ok(Vec::new())
    }
}

pub(super) struct UnavailableRepository;

impl EvaluationRepository for UnavailableRepository {
    fn insert(&self, _record: EvaluationRecord) -> Result<EvaluationRecord, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn fetch(&self, _id: &EvaluationId) -> Result<Option<EvaluationRecord>, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn all(&self) -> Result<Vec<EvaluationRecord>, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 256 * 1024)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}

pub(super) fn evaluation_router_with_service(
    service: EvaluationService<MemoryRepository>,
) -> axum::Router {
    evaluation_router(Arc::new(service))
}
