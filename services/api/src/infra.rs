use edugrade::config::ReportConfig;
use edugrade::error::AppError;
use edugrade::workflows::evaluation::{
    CategoryCatalog, EvaluationId, EvaluationRecord, EvaluationRepository, EvaluationService,
    RepositoryError, SuggestionLibrary,
};
use metrics_exporter_prometheus::PrometheusHandle;
use std::collections::HashMap;
use std::sync::atomic::AtomicBool;
use std::sync::{Arc, Mutex};
use tracing::info;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

/// Insertion-ordered store with an id index for O(1) lookups.
#[derive(Default)]
pub(crate) struct InMemoryEvaluationRepository {
    inner: Mutex<EvaluationStore>,
}

#[derive(Default)]
struct EvaluationStore {
    records: Vec<EvaluationRecord>,
    index: HashMap<EvaluationId, usize>,
}

impl InMemoryEvaluationRepository {
    fn store(&self) -> Result<std::sync::MutexGuard<'_, EvaluationStore>, RepositoryError> {
        self.inner
            .lock()
            .map_err(|_| RepositoryError::Unavailable("evaluation store poisoned".to_string()))
    }
}

impl EvaluationRepository for InMemoryEvaluationRepository {
    fn insert(&self, record: EvaluationRecord) -> Result<EvaluationRecord, RepositoryError> {
        let mut store = self.store()?;
        if store.index.contains_key(&record.id) {
            return Err(RepositoryError::Conflict);
        }
        let slot = store.records.len();
        store.index.insert(record.id, slot);
        store.records.push(record.clone());
        Ok(record)
    }

    fn fetch(&self, id: &EvaluationId) -> Result<Option<EvaluationRecord>, RepositoryError> {
        let store = self.store()?;
        Ok(store
            .index
            .get(id)
            .and_then(|slot| store.records.get(*slot))
            .cloned())
    }

    fn all(&self) -> Result<Vec<EvaluationRecord>, RepositoryError> {
        Ok(self.store()?.records.clone())
    }
}

/// Loads the category catalog and suggestion library, honoring `CATEGORIES_PATH`
/// and `SUGGESTIONS_PATH`.
pub(crate) fn load_content(
    report: &ReportConfig,
) -> Result<(CategoryCatalog, SuggestionLibrary), AppError> {
    let catalog = match &report.categories_path {
        Some(path) => {
            info!(path = %path.display(), "loading category catalog override");
            CategoryCatalog::from_path(path)?
        }
        None => CategoryCatalog::standard(),
    };
    let library = match &report.suggestions_path {
        Some(path) => {
            info!(path = %path.display(), "loading suggestion library override");
            SuggestionLibrary::from_path(path)?
        }
        None => SuggestionLibrary::standard(),
    };
    Ok((catalog, library))
}

pub(crate) fn build_service(
    report: &ReportConfig,
) -> Result<EvaluationService<InMemoryEvaluationRepository>, AppError> {
    let (catalog, library) = load_content(report)?;
    let repository = Arc::new(InMemoryEvaluationRepository::default());
    Ok(EvaluationService::with_content(
        repository,
        catalog,
        library,
        report.geometry,
    )?)
}
