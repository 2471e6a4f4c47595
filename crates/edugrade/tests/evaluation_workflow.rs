//! End-to-end scenarios for scoring, suggestions, and report export through the public
//! service facade and HTTP router.

mod common {
    use std::collections::HashMap;
    use std::sync::{Arc, Mutex};

    use edugrade::workflows::evaluation::{
        EvaluationId, EvaluationRecord, EvaluationRepository, EvaluationService,
        EvaluationSubmission, RatingSet, RepositoryError,
    };

    pub(super) fn sample_submission() -> EvaluationSubmission {
        EvaluationSubmission {
            app_name: "Sample Educational App".to_string(),
            ratings: RatingSet::new(4, 3, 5, 4, 4).expect("valid ratings"),
        }
    }

    #[derive(Default)]
    pub(super) struct MemoryRepository {
        records: Mutex<Vec<EvaluationRecord>>,
        index: Mutex<HashMap<EvaluationId, usize>>,
    }

    impl EvaluationRepository for MemoryRepository {
        fn insert(&self, record: EvaluationRecord) -> Result<EvaluationRecord, RepositoryError> {
            let mut records = self.records.lock().expect("records mutex poisoned");
            let mut index = self.index.lock().expect("index mutex poisoned");
            if index.contains_key(&record.id) {
                return Err(RepositoryError::Conflict);
            }
            index.insert(record.id, records.len());
            records.push(record.clone());
            Ok(record)
        }

        fn fetch(&self, id: &EvaluationId) -> Result<Option<EvaluationRecord>, RepositoryError> {
            let records = self.records.lock().expect("records mutex poisoned");
            let index = self.index.lock().expect("index mutex poisoned");
            Ok(index.get(id).and_then(|slot| records.get(*slot)).cloned())
        }

        fn all(&self) -> Result<Vec<EvaluationRecord>, RepositoryError> {
            Ok(self.records.lock().expect("records mutex poisoned").clone())
        }
    }

    pub(super) fn service() -> Arc<EvaluationService<MemoryRepository>> {
        Arc::new(EvaluationService::new(Arc::new(MemoryRepository::default())))
    }
}

use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use common::*;
use edugrade::workflows::evaluation::{
    compute_quality_score, evaluation_router, suggestions_for_all, CategoryId,
    EvaluationCsvImporter, RatingSet, SuggestionTier,
};
use edugrade::workflows::report::{export_file_name, REPORT_TITLE};
use serde_json::Value;
use tower::ServiceExt;

#[test]
fn sample_app_scores_eighty_with_expected_tiers() {
    let ratings = RatingSet::new(4, 3, 5, 4, 4).expect("valid ratings");

    assert_eq!(compute_quality_score(&ratings).expect("scores").value(), 80);

    let blocks = suggestions_for_all(&ratings).expect("suggestions");
    let tier_of = |category: CategoryId| {
        blocks
            .iter()
            .find(|block| block.category.id == category)
            .map(|block| block.tier)
    };
    assert_eq!(tier_of(CategoryId::UiUx), Some(SuggestionTier::Enhancement));
    assert_eq!(tier_of(CategoryId::Engagement), Some(SuggestionTier::Excellent));
}

#[test]
fn exported_text_report_lists_every_category() {
    let service = service();
    let record = service.submit(sample_submission()).expect("stored");

    let document = service.document(&record.id, None).expect("layout");
    let text = document.render_text();

    assert!(text.contains(REPORT_TITLE));
    assert!(text.contains("Quality Score: 80%"));
    for short_label in ["Pedagogical: 4/5", "UI/UX: 3/5", "Engagement: 5/5"] {
        assert!(text.contains(short_label), "missing {short_label}");
    }
    assert!(text.contains("User Interface & Experience (Enhancement Opportunities)"));
    assert_eq!(
        export_file_name(&record.app_name, "txt"),
        "Sample_Educational_App_QA_Report.txt"
    );
}

#[test]
fn imported_rows_score_independently() {
    let csv = "app_name,pedagogical_design,ui_ux,engagement,technical_performance,learning_effectiveness\n\
               Math Quest,5,5,5,5,5\n\
               Word Garden,1,1,1,1,1\n";
    let service = service();

    let scores: Vec<u8> = EvaluationCsvImporter::from_reader(csv.as_bytes())
        .expect("valid import")
        .into_iter()
        .map(|submission| service.submit(submission).expect("stored").quality_score)
        .collect();

    assert_eq!(scores, vec![100, 20]);
    assert_eq!(service.list().expect("list").len(), 2);
}

#[tokio::test]
async fn http_submission_is_rejected_for_out_of_range_rating() {
    let router = evaluation_router(service());
    let payload = serde_json::json!({
        "app_name": "Broken App",
        "ratings": {
            "pedagogical_design": 4,
            "ui_ux": 6,
            "engagement": 5,
            "technical_performance": 4,
            "learning_effectiveness": 4
        }
    });

    let response = router
        .oneshot(
            Request::post("/api/v1/evaluations")
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(payload.to_string()))
                .expect("request builds"),
        )
        .await
        .expect("route executes");

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let body = axum::body::to_bytes(response.into_body(), 4096)
        .await
        .expect("read body");
    let body: Value = serde_json::from_slice(&body).expect("json payload");
    assert!(body["error"].as_str().unwrap_or_default().contains("ui_ux"));
}
