use std::sync::Arc;

use axum::body::Body;
use axum::http::{header, Request};
use axum::response::Response;
use serde_json::Value;

pub(super) use crate::fixtures::*;

use crate::applications::{application_router, ApplicationService};
use crate::awards::{catalogue_router, AwardCatalogue};
use crate::session::{Session, USER_ID_HEADER, USER_ROLE_HEADER};

pub(super) type MemoryService = ApplicationService<MemoryAwards, MemoryApplications>;

pub(super) fn build_service() -> (MemoryService, Arc<MemoryAwards>, Arc<MemoryApplications>) {
    let awards = MemoryAwards::seeded(sample_awards());
    let applications = Arc::new(MemoryApplications::default());
    let service = ApplicationService::new(awards.clone(), applications.clone());
    (service, awards, applications)
}

pub(super) fn portal_router(service: MemoryService, awards: Arc<MemoryAwards>) -> axum::Router {
    application_router(Arc::new(service)).merge(catalogue_router(Arc::new(AwardCatalogue::new(
        awards,
    ))))
}

pub(super) fn request(
    method: &str,
    uri: &str,
    session: Option<&Session>,
    body: Option<Value>,
) -> Request<Body> {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(session) = session {
        builder = builder
            .header(USER_ID_HEADER, session.user_id.as_str())
            .header(USER_ROLE_HEADER, session.role.label());
    }

    match body {
        Some(payload) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(serde_json::to_vec(&payload).expect("json body")))
            .expect("request builds"),
        None => builder.body(Body::empty()).expect("request builds"),
    }
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 64 * 1024)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}
