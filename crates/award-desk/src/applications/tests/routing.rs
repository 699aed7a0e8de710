use super::common::*;
use axum::http::StatusCode;
use serde_json::json;
use tower::ServiceExt;

#[tokio::test]
async fn start_route_creates_draft() {
    let (service, awards, _) = build_service();
    let router = portal_router(service, awards);

    let response = router
        .oneshot(request(
            "POST",
            "/api/v1/applications",
            Some(&student("s-1")),
            Some(json!({ "award_id": "open-1", "today": "2024-03-01" })),
        ))
        .await
        .expect("route executes");

    assert_eq!(response.status(), StatusCode::CREATED);
    let payload = read_json_body(response).await;
    assert_eq!(payload["status"], "draft");
    assert_eq!(payload["award_id"], "open-1");
    assert!(payload.get("submitted_on").is_none());
}

#[tokio::test]
async fn start_route_requires_session_headers() {
    let (service, awards, _) = build_service();
    let router = portal_router(service, awards);

    let response = router
        .oneshot(request(
            "POST",
            "/api/v1/applications",
            None,
            Some(json!({ "award_id": "open-1" })),
        ))
        .await
        .expect("route executes");

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn start_route_maps_service_errors() {
    let (service, awards, _) = build_service();
    let router = portal_router(service, awards);

    let closed = router
        .clone()
        .oneshot(request(
            "POST",
            "/api/v1/applications",
            Some(&student("s-1")),
            Some(json!({ "award_id": "past-1", "today": "2024-03-01" })),
        ))
        .await
        .expect("route executes");
    assert_eq!(closed.status(), StatusCode::UNPROCESSABLE_ENTITY);

    let forbidden = router
        .clone()
        .oneshot(request(
            "POST",
            "/api/v1/applications",
            Some(&reviewer()),
            Some(json!({ "award_id": "open-1", "today": "2024-03-01" })),
        ))
        .await
        .expect("route executes");
    assert_eq!(forbidden.status(), StatusCode::FORBIDDEN);

    let missing = router
        .oneshot(request(
            "POST",
            "/api/v1/applications",
            Some(&student("s-1")),
            Some(json!({ "award_id": "nope", "today": "2024-03-01" })),
        ))
        .await
        .expect("route executes");
    assert_eq!(missing.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn submit_and_review_routes_walk_the_lifecycle() {
    let (service, awards, _) = build_service();
    let session = student("s-1");
    let draft = service
        .start_draft(&session, &crate::awards::AwardId("open-1".to_string()), today())
        .expect("draft opens");
    let router = portal_router(service, awards);

    let submit_uri = format!("/api/v1/applications/{}/submit?today=2024-03-05", draft.id.0);
    let submitted = router
        .clone()
        .oneshot(request("POST", &submit_uri, Some(&session), None))
        .await
        .expect("route executes");
    assert_eq!(submitted.status(), StatusCode::OK);
    let payload = read_json_body(submitted).await;
    assert_eq!(payload["status"], "submitted");
    assert_eq!(payload["submitted_on"], "2024-03-05");

    let again = router
        .clone()
        .oneshot(request("POST", &submit_uri, Some(&session), None))
        .await
        .expect("route executes");
    assert_eq!(again.status(), StatusCode::CONFLICT);

    let review_uri = format!("/api/v1/applications/{}/review", draft.id.0);
    let reviewed = router
        .clone()
        .oneshot(request("POST", &review_uri, Some(&reviewer()), None))
        .await
        .expect("route executes");
    assert_eq!(reviewed.status(), StatusCode::OK);

    let status = router
        .oneshot(request(
            "GET",
            &format!("/api/v1/applications/{}", draft.id.0),
            Some(&session),
            None,
        ))
        .await
        .expect("route executes");
    assert_eq!(status.status(), StatusCode::OK);
    assert_eq!(read_json_body(status).await["status"], "reviewed");
}

#[tokio::test]
async fn status_route_returns_not_found_for_unknown_application() {
    let (service, awards, _) = build_service();
    let router = portal_router(service, awards);

    let response = router
        .oneshot(request(
            "GET",
            "/api/v1/applications/app-missing",
            Some(&reviewer()),
            None,
        ))
        .await
        .expect("route executes");

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn linkage_route_reports_affordance() {
    let (service, awards, _) = build_service();
    let router = portal_router(service, awards);

    let response = router
        .oneshot(request(
            "GET",
            "/api/v1/students/s-1/awards/open-1/linkage?today=2024-03-01",
            Some(&student("s-1")),
            None,
        ))
        .await
        .expect("route executes");

    assert_eq!(response.status(), StatusCode::OK);
    let payload = read_json_body(response).await;
    assert_eq!(payload["status"], "open");
    assert_eq!(payload["has_applied"], false);
    assert_eq!(payload["affordance"], "apply");
    assert_eq!(payload["affordance_label"], "Apply");
    assert!(payload.get("application_status").is_none());
}

#[tokio::test]
async fn student_awards_route_lists_linkages() {
    let (service, awards, _) = build_service();
    let router = portal_router(service, awards);

    let response = router
        .oneshot(request(
            "GET",
            "/api/v1/students/s-1/awards?today=2024-03-01",
            Some(&student("s-1")),
            None,
        ))
        .await
        .expect("route executes");

    assert_eq!(response.status(), StatusCode::OK);
    let payload = read_json_body(response).await;
    let entries = payload.as_array().expect("array payload");
    assert_eq!(entries.len(), 3);
    assert_eq!(entries[2]["affordance"], "unavailable");
}

#[tokio::test]
async fn browse_route_classifies_and_filters_awards() {
    let (service, awards, _) = build_service();
    let router = portal_router(service, awards);

    let response = router
        .clone()
        .oneshot(request(
            "GET",
            "/api/v1/awards?today=2024-03-01&sort=deadline&order=desc&include_inactive=true",
            None,
            None,
        ))
        .await
        .expect("route executes");
    assert_eq!(response.status(), StatusCode::OK);
    let payload = read_json_body(response).await;
    let statuses: Vec<(&str, &str)> = payload
        .as_array()
        .expect("array payload")
        .iter()
        .map(|view| {
            (
                view["id"].as_str().expect("id"),
                view["status"].as_str().expect("status"),
            )
        })
        .collect();
    assert_eq!(
        statuses,
        vec![
            ("later-1", "upcoming"),
            ("paused-1", "closed"),
            ("open-1", "open"),
            ("past-1", "closed"),
        ]
    );

    let bad_sort = router
        .oneshot(request("GET", "/api/v1/awards?sort=popularity", None, None))
        .await
        .expect("route executes");
    assert_eq!(bad_sort.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn activation_route_is_admin_only() {
    let (service, awards, _) = build_service();
    let router = portal_router(service, awards);
    let body = json!({ "is_active": false });

    let denied = router
        .clone()
        .oneshot(request(
            "PUT",
            "/api/v1/awards/open-1/activation",
            Some(&student("s-1")),
            Some(body.clone()),
        ))
        .await
        .expect("route executes");
    assert_eq!(denied.status(), StatusCode::FORBIDDEN);

    let closed = router
        .clone()
        .oneshot(request(
            "PUT",
            "/api/v1/awards/open-1/activation",
            Some(&admin()),
            Some(body),
        ))
        .await
        .expect("route executes");
    assert_eq!(closed.status(), StatusCode::OK);
    assert_eq!(read_json_body(closed).await["is_active"], false);

    let view = router
        .oneshot(request("GET", "/api/v1/awards/open-1?today=2024-03-01", None, None))
        .await
        .expect("route executes");
    let payload = read_json_body(view).await;
    assert_eq!(payload["status"], "closed");
    assert_eq!(payload["deadline"], "2024-03-10");
}

#[tokio::test]
async fn publish_route_is_admin_only_and_lists_new_award() {
    let (service, awards, _) = build_service();
    let router = portal_router(service, awards);
    let body = json!({
        "id": "new-1",
        "title": "Community Bursary",
        "category": "bursary",
        "value": 750,
        "deadline": "2024-03-20",
        "citizenship": ["CA"],
    });

    let denied = router
        .clone()
        .oneshot(request(
            "POST",
            "/api/v1/awards",
            Some(&reviewer()),
            Some(body.clone()),
        ))
        .await
        .expect("route executes");
    assert_eq!(denied.status(), StatusCode::FORBIDDEN);

    let created = router
        .clone()
        .oneshot(request(
            "POST",
            "/api/v1/awards?today=2024-03-01",
            Some(&admin()),
            Some(body),
        ))
        .await
        .expect("route executes");
    assert_eq!(created.status(), StatusCode::CREATED);
    let payload = read_json_body(created).await;
    assert_eq!(payload["id"], "new-1");
    assert_eq!(payload["status"], "open");

    let fetched = router
        .oneshot(request("GET", "/api/v1/awards/new-1?today=2024-03-01", None, None))
        .await
        .expect("route executes");
    assert_eq!(fetched.status(), StatusCode::OK);
    assert_eq!(read_json_body(fetched).await["title"], "Community Bursary");
}

#[tokio::test]
async fn student_reads_are_limited_to_owner_and_staff() {
    let (service, awards, _) = build_service();
    let owner = student("s-1");
    let draft = service
        .start_draft(&owner, &crate::awards::AwardId("open-1".to_string()), today())
        .expect("draft opens");
    let router = portal_router(service, awards);
    let application_uri = format!("/api/v1/applications/{}", draft.id.0);

    for uri in [
        application_uri.as_str(),
        "/api/v1/students/s-1/awards?today=2024-03-01",
        "/api/v1/students/s-1/awards/open-1/linkage?today=2024-03-01",
    ] {
        let anonymous = router
            .clone()
            .oneshot(request("GET", uri, None, None))
            .await
            .expect("route executes");
        assert_eq!(anonymous.status(), StatusCode::UNAUTHORIZED, "{uri}");

        let other = router
            .clone()
            .oneshot(request("GET", uri, Some(&student("s-2")), None))
            .await
            .expect("route executes");
        assert_eq!(other.status(), StatusCode::FORBIDDEN, "{uri}");

        for session in [owner.clone(), reviewer(), admin()] {
            let allowed = router
                .clone()
                .oneshot(request("GET", uri, Some(&session), None))
                .await
                .expect("route executes");
            assert_eq!(allowed.status(), StatusCode::OK, "{uri} as {}", session.user_id);
        }
    }
}
