pub mod middleware;
mod rest;
mod wiki;

use std::sync::Arc;

use axum::{
    Router,
    extract::State,
    http::StatusCode,
    middleware as axum_middleware,
    response::{IntoResponse, Response},
    routing::{get, post},
};

use crate::application::error::{ErrorReport, HttpError};
use crate::application::repos::RepoError;
use crate::application::wiki::WikiService;
use crate::application::xsrf::XsrfTokenManager;

#[derive(Clone)]
pub struct HttpState {
    pub wiki: Arc<WikiService>,
    pub xsrf: Arc<XsrfTokenManager>,
}

pub fn build_router(state: HttpState) -> Router {
    Router::new()
        .route("/wiki", get(wiki::wiki_list))
        .route("/wiki/edit", get(wiki::wiki_edit))
        .route("/wiki/add", post(wiki::wiki_add))
        .route("/wiki/delete", post(wiki::wiki_delete))
        .route("/rest/wiki/item", get(rest::get_item).put(rest::put_item))
        .route("/healthz", get(db_health))
        .with_state(state)
        .layer(axum_middleware::from_fn(middleware::log_responses))
        .layer(axum_middleware::from_fn(middleware::resolve_viewer))
        .layer(axum_middleware::from_fn(middleware::set_request_context))
}

async fn db_health(State(state): State<HttpState>) -> Response {
    match state.wiki.ping_store().await {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(err) => {
            let mut response = StatusCode::SERVICE_UNAVAILABLE.into_response();
            ErrorReport::from_error(
                "infra::http::db_health",
                StatusCode::SERVICE_UNAVAILABLE,
                &err,
            )
            .attach(&mut response);
            response
        }
    }
}

/// Map a repository error to a consistent HTTP error response for the page
/// surface. Store failures are not caught by the wiki core; they surface here
/// as 500-class responses with the diagnostic attached for the logger.
pub fn repo_error_to_http(source: &'static str, err: RepoError) -> HttpError {
    match err {
        RepoError::NotFound => HttpError::new(
            source,
            StatusCode::NOT_FOUND,
            "Resource not found",
            "resource not found",
        ),
        RepoError::InvalidInput { message } => {
            HttpError::new(source, StatusCode::BAD_REQUEST, "Invalid input", message)
        }
        RepoError::Timeout => HttpError::new(
            source,
            StatusCode::SERVICE_UNAVAILABLE,
            "Database timeout",
            "database timeout",
        ),
        RepoError::Persistence(message) => HttpError::new(
            source,
            StatusCode::INTERNAL_SERVER_ERROR,
            "Persistence error",
            message,
        ),
    }
}

fn access_denied(source: &'static str) -> Response {
    HttpError::new(
        source,
        StatusCode::UNAUTHORIZED,
        "Access denied",
        "viewer lacks the required capability",
    )
    .into_response()
}

fn bad_xsrf_token(source: &'static str) -> Response {
    HttpError::new(
        source,
        StatusCode::FORBIDDEN,
        "Bad XSRF token. Please reload the page and try again.",
        "anti-forgery token missing or invalid",
    )
    .into_response()
}
