//! Envelope behavior of the item REST surface, exercised through the router.

mod support;

use std::sync::Arc;

use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode, header},
};
use coursewiki::application::{wiki::WikiService, xsrf::XsrfTokenManager};
use coursewiki::cache::ListingCache;
use coursewiki::infra::http::{HttpState, build_router};
use coursewiki_api_types::{RestEnvelope, WikiItemPayload, WikiItemPutRequest};
use tower::ServiceExt;
use uuid::Uuid;

use support::MemoryWikiRepo;

const ITEM_URI: &str = "/rest/wiki/item";

fn harness(repo: Arc<MemoryWikiRepo>) -> (Router, Arc<XsrfTokenManager>) {
    let wiki = Arc::new(WikiService::new(repo, ListingCache::new()));
    let xsrf = Arc::new(XsrfTokenManager::new("integration-secret"));
    let router = build_router(HttpState {
        wiki,
        xsrf: xsrf.clone(),
    });
    (router, xsrf)
}

fn as_admin(builder: axum::http::request::Builder) -> axum::http::request::Builder {
    builder
        .header("x-course-role", "admin")
        .header("x-course-user", "staff@example.edu")
}

fn get_request(key: &str, admin: bool) -> Request<Body> {
    let mut builder = Request::builder()
        .method("GET")
        .uri(format!("{ITEM_URI}?key={key}"));
    if admin {
        builder = as_admin(builder);
    }
    builder.body(Body::empty()).unwrap()
}

fn put_request(payload: &WikiItemPutRequest, admin: bool) -> Request<Body> {
    let mut builder = Request::builder()
        .method("PUT")
        .uri(ITEM_URI)
        .header(header::CONTENT_TYPE, "application/json");
    if admin {
        builder = as_admin(builder);
    }
    builder
        .body(Body::from(serde_json::to_vec(payload).unwrap()))
        .unwrap()
}

async fn envelope_from(response: axum::response::Response) -> RestEnvelope {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

#[tokio::test]
async fn unknown_key_is_not_found() {
    let repo = Arc::new(MemoryWikiRepo::new());
    let (router, _) = harness(repo);

    let missing = Uuid::new_v4().to_string();
    let response = router.oneshot(get_request(&missing, false)).await.unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let envelope = envelope_from(response).await;
    assert_eq!(envelope.status_code, 404);
    assert_eq!(envelope.message, "Object not found.");
    assert_eq!(envelope.payload, Some(serde_json::json!({ "key": missing })));
}

#[tokio::test]
async fn malformed_or_absent_key_is_not_found() {
    let repo = Arc::new(MemoryWikiRepo::new());
    let (router, _) = harness(repo);

    let response = router
        .clone()
        .oneshot(get_request("not-a-key", false))
        .await
        .unwrap();
    assert_eq!(envelope_from(response).await.status_code, 404);

    let bare = Request::builder()
        .method("GET")
        .uri(ITEM_URI)
        .body(Body::empty())
        .unwrap();
    let response = router.oneshot(bare).await.unwrap();
    assert_eq!(envelope_from(response).await.status_code, 404);
}

#[tokio::test]
async fn draft_entries_are_denied_to_members_but_exist() {
    let repo = Arc::new(MemoryWikiRepo::new());
    let draft = repo.seed(1, true, "<p>draft</p>", true).await;
    let (router, _) = harness(repo);

    let response = router
        .oneshot(get_request(&draft.to_string(), false))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let envelope = envelope_from(response).await;
    assert_eq!(envelope.status_code, 401);
    assert_eq!(envelope.message, "Access denied.");
}

#[tokio::test]
async fn members_read_published_entries_with_a_write_token() {
    let repo = Arc::new(MemoryWikiRepo::new());
    let id = repo.seed(3, false, "*markup*", false).await;
    let (router, _) = harness(repo);

    let response = router
        .oneshot(get_request(&id.to_string(), false))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let envelope = envelope_from(response).await;
    assert_eq!(envelope.status_code, 200);
    assert_eq!(envelope.message, "Success.");
    assert!(envelope.xsrf_token.is_some());

    let payload: WikiItemPayload = serde_json::from_value(envelope.payload.unwrap()).unwrap();
    assert_eq!(payload.key.as_deref(), Some(id.to_string().as_str()));
    assert_eq!(payload.position, 3);
    assert!(!payload.is_html);
    // The payload carries the stored source, not a rendered body.
    assert_eq!(payload.html, "*markup*");
}

#[tokio::test]
async fn admins_read_drafts() {
    let repo = Arc::new(MemoryWikiRepo::new());
    let draft = repo.seed(1, true, "<p>draft</p>", true).await;
    let (router, _) = harness(repo);

    let response = router
        .oneshot(get_request(&draft.to_string(), true))
        .await
        .unwrap();
    assert_eq!(envelope_from(response).await.status_code, 200);
}

#[tokio::test]
async fn put_round_trip_saves_the_editable_fields() {
    let repo = Arc::new(MemoryWikiRepo::new());
    let id = repo.seed(1, true, "<p>before</p>", true).await;
    let (router, _) = harness(repo.clone());

    let fetched = router
        .clone()
        .oneshot(get_request(&id.to_string(), true))
        .await
        .unwrap();
    let token = envelope_from(fetched).await.xsrf_token.unwrap();

    let request = WikiItemPutRequest {
        key: id.to_string(),
        payload: WikiItemPayload {
            key: Some(id.to_string()),
            position: 7,
            is_html: false,
            html: "updated *markup*".to_string(),
            is_draft: false,
        },
        xsrf_token: token,
    };
    let response = router.oneshot(put_request(&request, true)).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let envelope = envelope_from(response).await;
    assert_eq!(envelope.status_code, 200);
    assert_eq!(envelope.message, "Saved.");

    let stored = repo.get(id).await.unwrap();
    assert_eq!(stored.position, 7);
    assert!(!stored.is_html);
    assert!(!stored.is_draft);
    assert_eq!(stored.html, "updated *markup*");
}

#[tokio::test]
async fn put_with_a_bad_token_fails_before_the_store() {
    let repo = Arc::new(MemoryWikiRepo::new());
    let id = repo.seed(1, true, "<p>before</p>", true).await;
    let (router, _) = harness(repo.clone());

    let request = WikiItemPutRequest {
        key: id.to_string(),
        payload: WikiItemPayload {
            key: None,
            position: 9,
            is_html: true,
            html: "<p>tampered</p>".to_string(),
            is_draft: false,
        },
        xsrf_token: "123.deadbeef".to_string(),
    };
    let response = router.oneshot(put_request(&request, true)).await.unwrap();

    assert_eq!(response.status(), StatusCode::FORBIDDEN);
    assert_eq!(envelope_from(response).await.status_code, 403);

    let stored = repo.get(id).await.unwrap();
    assert_eq!(stored.html, "<p>before</p>");
}

#[tokio::test]
async fn put_requires_the_edit_capability() {
    let repo = Arc::new(MemoryWikiRepo::new());
    let id = repo.seed(1, true, "<p>before</p>", false).await;
    let (router, xsrf) = harness(repo.clone());

    let key = id.to_string();
    let request = WikiItemPutRequest {
        key: key.clone(),
        payload: WikiItemPayload {
            key: None,
            position: 2,
            is_html: true,
            html: "<p>member edit</p>".to_string(),
            is_draft: false,
        },
        xsrf_token: xsrf.create_token("wiki-put", Some(&key)),
    };
    let response = router.oneshot(put_request(&request, false)).await.unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(envelope_from(response).await.message, "Access denied.");
    assert_eq!(repo.get(id).await.unwrap().html, "<p>before</p>");
}

#[tokio::test]
async fn put_against_a_missing_entity_is_not_found() {
    let repo = Arc::new(MemoryWikiRepo::new());
    let (router, xsrf) = harness(repo);

    let key = Uuid::new_v4().to_string();
    let request = WikiItemPutRequest {
        key: key.clone(),
        payload: WikiItemPayload {
            key: None,
            position: 1,
            is_html: true,
            html: "<p>ghost</p>".to_string(),
            is_draft: true,
        },
        xsrf_token: xsrf.create_token("wiki-put", Some(&key)),
    };
    let response = router.oneshot(put_request(&request, true)).await.unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(envelope_from(response).await.message, "Object not found.");
}
