use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use chrono::NaiveDate;
use serde::Deserialize;
use serde_json::json;

use super::domain::{ApplicationId, StudentId};
use super::repository::ApplicationRepository;
use super::service::{ensure_can_view, ApplicationService, ApplicationServiceError};
use crate::awards::{AwardId, AwardQuery, AwardRepository};
use crate::dates::{deserialize_optional_date, today_or_local, TodayParams};
use crate::session::Session;
use crate::store::RepositoryError;

/// Router builder exposing HTTP endpoints for drafting, submission and review.
pub fn application_router<W, R>(service: Arc<ApplicationService<W, R>>) -> Router
where
    W: AwardRepository + 'static,
    R: ApplicationRepository + 'static,
{
    Router::new()
        .route("/api/v1/applications", post(start_handler::<W, R>))
        .route(
            "/api/v1/applications/:application_id",
            get(status_handler::<W, R>),
        )
        .route(
            "/api/v1/applications/:application_id/submit",
            post(submit_handler::<W, R>),
        )
        .route(
            "/api/v1/applications/:application_id/review",
            post(review_handler::<W, R>),
        )
        .route(
            "/api/v1/students/:student_id/awards",
            get(linkages_handler::<W, R>),
        )
        .route(
            "/api/v1/students/:student_id/awards/:award_id/linkage",
            get(linkage_handler::<W, R>),
        )
        .with_state(service)
}

#[derive(Debug, Deserialize)]
pub(crate) struct StartRequest {
    pub(crate) award_id: AwardId,
    #[serde(default, deserialize_with = "deserialize_optional_date")]
    pub(crate) today: Option<NaiveDate>,
}

pub(crate) async fn start_handler<W, R>(
    State(service): State<Arc<ApplicationService<W, R>>>,
    session: Session,
    Json(request): Json<StartRequest>,
) -> Response
where
    W: AwardRepository + 'static,
    R: ApplicationRepository + 'static,
{
    let today = today_or_local(request.today);
    match service.start_draft(&session, &request.award_id, today) {
        Ok(application) => (StatusCode::CREATED, Json(application.view())).into_response(),
        Err(error) => service_error_response(error),
    }
}

pub(crate) async fn status_handler<W, R>(
    State(service): State<Arc<ApplicationService<W, R>>>,
    session: Session,
    Path(application_id): Path<String>,
) -> Response
where
    W: AwardRepository + 'static,
    R: ApplicationRepository + 'static,
{
    let visible = service
        .get(&ApplicationId(application_id))
        .and_then(|application| {
            ensure_can_view(&session, &application.student_id)?;
            Ok(application)
        });
    match visible {
        Ok(application) => (StatusCode::OK, Json(application.view())).into_response(),
        Err(error) => service_error_response(error),
    }
}

pub(crate) async fn submit_handler<W, R>(
    State(service): State<Arc<ApplicationService<W, R>>>,
    session: Session,
    Path(application_id): Path<String>,
    Query(params): Query<TodayParams>,
) -> Response
where
    W: AwardRepository + 'static,
    R: ApplicationRepository + 'static,
{
    let id = ApplicationId(application_id);
    match service.submit(&session, &id, today_or_local(params.today)) {
        Ok(application) => (StatusCode::OK, Json(application.view())).into_response(),
        Err(error) => service_error_response(error),
    }
}

pub(crate) async fn review_handler<W, R>(
    State(service): State<Arc<ApplicationService<W, R>>>,
    session: Session,
    Path(application_id): Path<String>,
) -> Response
where
    W: AwardRepository + 'static,
    R: ApplicationRepository + 'static,
{
    let id = ApplicationId(application_id);
    match service.review(&session, &id) {
        Ok(application) => (StatusCode::OK, Json(application.view())).into_response(),
        Err(error) => service_error_response(error),
    }
}

pub(crate) async fn linkage_handler<W, R>(
    State(service): State<Arc<ApplicationService<W, R>>>,
    session: Session,
    Path((student_id, award_id)): Path<(String, String)>,
    Query(params): Query<TodayParams>,
) -> Response
where
    W: AwardRepository + 'static,
    R: ApplicationRepository + 'static,
{
    let student = StudentId(student_id);
    let today = today_or_local(params.today);
    let linkage = ensure_can_view(&session, &student)
        .and_then(|()| service.linkage(&student, &AwardId(award_id), today));
    match linkage {
        Ok(linkage) => (StatusCode::OK, Json(linkage)).into_response(),
        Err(error) => service_error_response(error),
    }
}

pub(crate) async fn linkages_handler<W, R>(
    State(service): State<Arc<ApplicationService<W, R>>>,
    session: Session,
    Path(student_id): Path<String>,
    Query(params): Query<TodayParams>,
) -> Response
where
    W: AwardRepository + 'static,
    R: ApplicationRepository + 'static,
{
    let student = StudentId(student_id);
    let today = today_or_local(params.today);
    let linkages = ensure_can_view(&session, &student)
        .and_then(|()| service.linkages(&student, &AwardQuery::default(), today));
    match linkages {
        Ok(linkages) => (StatusCode::OK, Json(linkages)).into_response(),
        Err(error) => service_error_response(error),
    }
}

pub(crate) fn service_error_response(error: ApplicationServiceError) -> Response {
    let status = match &error {
        ApplicationServiceError::Forbidden { .. } => StatusCode::FORBIDDEN,
        ApplicationServiceError::AwardClosed(_) => StatusCode::UNPROCESSABLE_ENTITY,
        ApplicationServiceError::AlreadyApplied(_)
        | ApplicationServiceError::InvalidTransition { .. }
        | ApplicationServiceError::Repository(RepositoryError::Conflict) => StatusCode::CONFLICT,
        ApplicationServiceError::Repository(RepositoryError::NotFound) => StatusCode::NOT_FOUND,
        ApplicationServiceError::Repository(RepositoryError::Unavailable(_)) => {
            StatusCode::INTERNAL_SERVER_ERROR
        }
    };

    let payload = json!({
        "error": error.to_string(),
    });
    (status, Json(payload)).into_response()
}
