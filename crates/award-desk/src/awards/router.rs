use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, put},
    Json, Router,
};
use chrono::{NaiveDate, Utc};
use serde::Deserialize;
use serde_json::json;

use super::catalogue::{AwardCatalogue, CatalogueError};
use super::domain::{Award, AwardCategory, AwardId};
use super::query::{AwardQuery, AwardSort, SortDirection, SortField};
use super::repository::AwardRepository;
use crate::dates::{deserialize_optional_date, today_or_local, TodayParams};
use crate::session::Session;
use crate::store::RepositoryError;

/// Router exposing award browsing and activation endpoints.
pub fn catalogue_router<R>(catalogue: Arc<AwardCatalogue<R>>) -> Router
where
    R: AwardRepository + 'static,
{
    Router::new()
        .route(
            "/api/v1/awards",
            get(browse_handler::<R>).post(publish_handler::<R>),
        )
        .route("/api/v1/awards/:award_id", get(award_handler::<R>))
        .route(
            "/api/v1/awards/:award_id/activation",
            put(activation_handler::<R>),
        )
        .with_state(catalogue)
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct BrowseParams {
    #[serde(default)]
    pub(crate) search: Option<String>,
    #[serde(default)]
    pub(crate) category: Option<String>,
    /// Comma separated citizenship codes.
    #[serde(default)]
    pub(crate) citizenship: Option<String>,
    #[serde(default)]
    pub(crate) sort: Option<String>,
    #[serde(default)]
    pub(crate) order: Option<String>,
    #[serde(default)]
    pub(crate) include_inactive: bool,
    #[serde(default, deserialize_with = "deserialize_optional_date")]
    pub(crate) today: Option<NaiveDate>,
}

impl BrowseParams {
    pub(crate) fn to_query(&self) -> Result<AwardQuery, String> {
        let category = self
            .category
            .as_deref()
            .filter(|value| !value.trim().is_empty())
            .map(|value| AwardCategory::parse(value).ok_or(format!("unknown category '{value}'")))
            .transpose()?;

        let direction = match self.order.as_deref() {
            Some(value) => SortDirection::parse(value)
                .ok_or_else(|| format!("unknown sort order '{value}'"))?,
            None => SortDirection::default(),
        };

        let sort = self
            .sort
            .as_deref()
            .map(|value| {
                SortField::parse(value)
                    .map(|field| AwardSort::new(field, direction))
                    .ok_or_else(|| format!("unknown sort field '{value}'"))
            })
            .transpose()?;

        let citizenship = self
            .citizenship
            .as_deref()
            .map(|value| {
                value
                    .split(',')
                    .map(str::trim)
                    .filter(|entry| !entry.is_empty())
                    .map(str::to_string)
                    .collect()
            })
            .unwrap_or_default();

        Ok(AwardQuery {
            active: if self.include_inactive { None } else { Some(true) },
            search: self.search.clone(),
            category,
            citizenship,
            sort,
        })
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct ActivationRequest {
    pub(crate) is_active: bool,
}

/// Award body accepted from admins; `created_at` is stamped on receipt.
#[derive(Debug, Deserialize)]
pub(crate) struct PublishRequest {
    pub(crate) id: String,
    pub(crate) title: String,
    #[serde(default)]
    pub(crate) description: String,
    pub(crate) category: AwardCategory,
    #[serde(default)]
    pub(crate) value: u32,
    pub(crate) deadline: NaiveDate,
    #[serde(default)]
    pub(crate) is_active: Option<bool>,
    #[serde(default)]
    pub(crate) citizenship: Vec<String>,
}

impl PublishRequest {
    fn into_award(self) -> Award {
        Award {
            id: AwardId(self.id),
            title: self.title,
            description: self.description,
            category: self.category,
            value: self.value,
            deadline: self.deadline,
            is_active: self.is_active,
            citizenship: self.citizenship,
            created_at: Utc::now(),
        }
    }
}

pub(crate) async fn browse_handler<R>(
    State(catalogue): State<Arc<AwardCatalogue<R>>>,
    Query(params): Query<BrowseParams>,
) -> Response
where
    R: AwardRepository + 'static,
{
    let query = match params.to_query() {
        Ok(query) => query,
        Err(message) => {
            return (StatusCode::BAD_REQUEST, Json(json!({ "error": message }))).into_response()
        }
    };

    match catalogue.browse(&query, today_or_local(params.today)) {
        Ok(views) => (StatusCode::OK, Json(views)).into_response(),
        Err(error) => catalogue_error_response(error),
    }
}

pub(crate) async fn award_handler<R>(
    State(catalogue): State<Arc<AwardCatalogue<R>>>,
    Path(award_id): Path<String>,
    Query(params): Query<TodayParams>,
) -> Response
where
    R: AwardRepository + 'static,
{
    let id = AwardId(award_id);
    match catalogue.get(&id, today_or_local(params.today)) {
        Ok(view) => (StatusCode::OK, Json(view)).into_response(),
        Err(error) => catalogue_error_response(error),
    }
}

pub(crate) async fn publish_handler<R>(
    State(catalogue): State<Arc<AwardCatalogue<R>>>,
    session: Session,
    Query(params): Query<TodayParams>,
    Json(request): Json<PublishRequest>,
) -> Response
where
    R: AwardRepository + 'static,
{
    match catalogue.publish(&session, request.into_award()) {
        Ok(award) => (
            StatusCode::CREATED,
            Json(award.view(today_or_local(params.today))),
        )
            .into_response(),
        Err(error) => catalogue_error_response(error),
    }
}

pub(crate) async fn activation_handler<R>(
    State(catalogue): State<Arc<AwardCatalogue<R>>>,
    session: Session,
    Path(award_id): Path<String>,
    Json(request): Json<ActivationRequest>,
) -> Response
where
    R: AwardRepository + 'static,
{
    let id = AwardId(award_id);
    match catalogue.set_active(&session, &id, request.is_active) {
        Ok(award) => {
            let payload = json!({
                "award_id": award.id,
                "is_active": award.window().is_active(),
            });
            (StatusCode::OK, Json(payload)).into_response()
        }
        Err(error) => catalogue_error_response(error),
    }
}

fn catalogue_error_response(error: CatalogueError) -> Response {
    let status = match &error {
        CatalogueError::Forbidden => StatusCode::FORBIDDEN,
        CatalogueError::Repository(RepositoryError::NotFound) => StatusCode::NOT_FOUND,
        CatalogueError::Repository(RepositoryError::Conflict) => StatusCode::CONFLICT,
        CatalogueError::Repository(RepositoryError::Unavailable(_)) => {
            StatusCode::INTERNAL_SERVER_ERROR
        }
    };

    (status, Json(json!({ "error": error.to_string() }))).into_response()
}
