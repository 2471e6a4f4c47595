use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Router,
};
use serde::Deserialize;
use serde_json::json;

use super::domain::{EvaluationId, RatingForm, SubmissionForm};
use super::repository::{EvaluationRepository, EvaluationSummaryView, RepositoryError};
use super::service::{EvaluationService, EvaluationServiceError};
use crate::workflows::report::PageGeometry;

/// Router builder exposing HTTP endpoints for submission, lookup, and report export.
pub fn evaluation_router<R>(service: Arc<EvaluationService<R>>) -> Router
where
    R: EvaluationRepository + 'static,
{
    Router::new()
        .route("/api/v1/categories", get(categories_handler::<R>))
        .route("/api/v1/evaluations/preview", post(preview_handler::<R>))
        .route(
            "/api/v1/evaluations",
            post(submit_handler::<R>).get(list_handler::<R>),
        )
        .route("/api/v1/evaluations/:evaluation_id", get(get_handler::<R>))
        .route(
            "/api/v1/evaluations/:evaluation_id/report",
            get(report_handler::<R>),
        )
        .route(
            "/api/v1/evaluations/:evaluation_id/document",
            get(document_handler::<R>),
        )
        .with_state(service)
}

/// Optional page size overrides for the document endpoint.
#[derive(Debug, Default, Deserialize)]
pub(crate) struct DocumentQuery {
    pub(crate) width: Option<usize>,
    pub(crate) height: Option<usize>,
    pub(crate) top_margin: Option<usize>,
}

impl DocumentQuery {
    fn geometry(&self, defaults: PageGeometry) -> Option<PageGeometry> {
        if self.width.is_none() && self.height.is_none() && self.top_margin.is_none() {
            return None;
        }
        Some(PageGeometry {
            width_chars: self.width.unwrap_or(defaults.width_chars),
            height_lines: self.height.unwrap_or(defaults.height_lines),
            top_margin_lines: self.top_margin.unwrap_or(defaults.top_margin_lines),
        })
    }
}

pub(crate) async fn categories_handler<R>(
    State(service): State<Arc<EvaluationService<R>>>,
) -> Response
where
    R: EvaluationRepository + 'static,
{
    (StatusCode::OK, axum::Json(service.categories().to_vec())).into_response()
}

pub(crate) async fn preview_handler<R>(
    State(service): State<Arc<EvaluationService<R>>>,
    payload: Result<axum::Json<RatingForm>, JsonRejection>,
) -> Response
where
    R: EvaluationRepository + 'static,
{
    let form = match payload {
        Ok(axum::Json(form)) => form,
        Err(rejection) => return rejection_response(rejection),
    };
    match form
        .into_ratings()
        .and_then(|ratings| service.preview(&ratings))
    {
        Ok(preview) => (StatusCode::OK, axum::Json(preview)).into_response(),
        Err(error) => error_response(EvaluationServiceError::Validation(error)),
    }
}

pub(crate) async fn submit_handler<R>(
    State(service): State<Arc<EvaluationService<R>>>,
    payload: Result<axum::Json<SubmissionForm>, JsonRejection>,
) -> Response
where
    R: EvaluationRepository + 'static,
{
    let form = match payload {
        Ok(axum::Json(form)) => form,
        Err(rejection) => return rejection_response(rejection),
    };
    let submission = match form.into_submission() {
        Ok(submission) => submission,
        Err(error) => return error_response(EvaluationServiceError::Validation(error)),
    };
    match service.submit(submission) {
        Ok(record) => (StatusCode::CREATED, axum::Json(record)).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn list_handler<R>(State(service): State<Arc<EvaluationService<R>>>) -> Response
where
    R: EvaluationRepository + 'static,
{
    match service.list() {
        Ok(records) => {
            let views: Vec<EvaluationSummaryView> =
                records.iter().map(|record| record.summary_view()).collect();
            (StatusCode::OK, axum::Json(views)).into_response()
        }
        Err(error) => error_response(error),
    }
}

pub(crate) async fn get_handler<R>(
    State(service): State<Arc<EvaluationService<R>>>,
    Path(evaluation_id): Path<String>,
) -> Response
where
    R: EvaluationRepository + 'static,
{
    let Some(id) = EvaluationId::parse(&evaluation_id) else {
        return not_found(&evaluation_id);
    };
    match service.get(&id) {
        Ok(record) => (StatusCode::OK, axum::Json(record)).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn report_handler<R>(
    State(service): State<Arc<EvaluationService<R>>>,
    Path(evaluation_id): Path<String>,
) -> Response
where
    R: EvaluationRepository + 'static,
{
    let Some(id) = EvaluationId::parse(&evaluation_id) else {
        return not_found(&evaluation_id);
    };
    match service.report(&id) {
        Ok(report) => (StatusCode::OK, axum::Json(report)).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn document_handler<R>(
    State(service): State<Arc<EvaluationService<R>>>,
    Path(evaluation_id): Path<String>,
    Query(query): Query<DocumentQuery>,
) -> Response
where
    R: EvaluationRepository + 'static,
{
    let Some(id) = EvaluationId::parse(&evaluation_id) else {
        return not_found(&evaluation_id);
    };
    let geometry = query.geometry(service.default_geometry());
    match service.document(&id, geometry) {
        Ok(document) => (StatusCode::OK, axum::Json(document)).into_response(),
        Err(error) => error_response(error),
    }
}

fn not_found(evaluation_id: &str) -> Response {
    let payload = json!({
        "error": format!("evaluation {evaluation_id} not found"),
    });
    (StatusCode::NOT_FOUND, axum::Json(payload)).into_response()
}

/// Body extraction failures (bad JSON, wrong types, wrong content type) keep axum's
/// status but use the same JSON error shape as every other failure.
fn rejection_response(rejection: JsonRejection) -> Response {
    let payload = json!({
        "error": rejection.body_text(),
    });
    (rejection.status(), axum::Json(payload)).into_response()
}

fn error_response(error: EvaluationServiceError) -> Response {
    let status = match &error {
        EvaluationServiceError::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
        EvaluationServiceError::Layout(_) => StatusCode::BAD_REQUEST,
        EvaluationServiceError::Repository(RepositoryError::NotFound) => StatusCode::NOT_FOUND,
        EvaluationServiceError::Repository(RepositoryError::Conflict) => StatusCode::CONFLICT,
        EvaluationServiceError::Repository(RepositoryError::Unavailable(_)) => {
            StatusCode::INTERNAL_SERVER_ERROR
        }
    };

    let payload = json!({
        "error": error.to_string(),
    });
    (status, axum::Json(payload)).into_response()
}
