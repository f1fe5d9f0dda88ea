//! Item REST surface consumed by the external object editor.
//!
//! Every response is wrapped in the shared envelope; the HTTP status always
//! mirrors the envelope's `status_code`.

use axum::{
    Json,
    extract::{Extension, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use coursewiki_api_types::{RestEnvelope, WikiItemPayload, WikiItemPutRequest};
use serde::Deserialize;
use uuid::Uuid;

use crate::{
    application::repos::{RepoError, UpdateWikiEntryParams},
    domain::{
        entities::WikiEntryRecord,
        rights::{ViewerContext, apply_rights},
    },
};

use super::{HttpState, repo_error_to_http};

/// Action tag bound into every item-write anti-forgery token.
pub(crate) const WIKI_ITEM_PUT_ACTION: &str = "wiki-put";

#[derive(Debug, Deserialize)]
pub(crate) struct ItemQuery {
    key: Option<String>,
}

pub(crate) async fn get_item(
    State(state): State<HttpState>,
    Extension(viewer): Extension<ViewerContext>,
    Query(query): Query<ItemQuery>,
) -> Response {
    let key = query.key.unwrap_or_default();
    let Ok(id) = Uuid::parse_str(&key) else {
        return not_found(&key);
    };

    let record = match state.wiki.find(id).await {
        Ok(record) => record,
        Err(err) => return repo_error_to_http("infra::http::rest::get_item", err).into_response(),
    };
    let Some(record) = record else {
        return not_found(&key);
    };

    // An entry the filter removes is reported as denied, not missing.
    let Some(record) = apply_rights(&viewer, vec![record]).into_iter().next() else {
        return access_denied(&key);
    };

    let payload = serde_json::to_value(item_payload(&record)).ok();
    envelope_response(RestEnvelope::success(
        "Success.",
        payload,
        Some(state.xsrf.create_token(WIKI_ITEM_PUT_ACTION, Some(&key))),
    ))
}

pub(crate) async fn put_item(
    State(state): State<HttpState>,
    Extension(viewer): Extension<ViewerContext>,
    Json(request): Json<WikiItemPutRequest>,
) -> Response {
    let key = request.key;

    if state
        .xsrf
        .validate(&request.xsrf_token, WIKI_ITEM_PUT_ACTION, Some(&key))
        .is_err()
    {
        return bad_token(&key);
    }
    if !viewer.can_edit() {
        return access_denied(&key);
    }

    let Ok(id) = Uuid::parse_str(&key) else {
        return not_found(&key);
    };

    match state.wiki.find(id).await {
        Ok(Some(_)) => {}
        Ok(None) => return not_found(&key),
        Err(err) => return repo_error_to_http("infra::http::rest::put_item", err).into_response(),
    }

    let WikiItemPayload {
        position,
        is_html,
        html,
        is_draft,
        ..
    } = request.payload;

    match state
        .wiki
        .update(UpdateWikiEntryParams {
            id,
            position,
            is_html,
            html,
            is_draft,
        })
        .await
    {
        Ok(_) => envelope_response(RestEnvelope::success("Saved.", None, None)),
        // The entry vanished between the existence check and the write.
        Err(RepoError::NotFound) => not_found(&key),
        Err(err) => repo_error_to_http("infra::http::rest::put_item", err).into_response(),
    }
}

fn item_payload(record: &WikiEntryRecord) -> WikiItemPayload {
    WikiItemPayload {
        key: Some(record.id.to_string()),
        position: record.position,
        is_html: record.is_html,
        html: record.html.clone(),
        is_draft: record.is_draft,
    }
}

fn envelope_response(envelope: RestEnvelope) -> Response {
    let status =
        StatusCode::from_u16(envelope.status_code).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    (status, Json(envelope)).into_response()
}

fn not_found(key: &str) -> Response {
    envelope_response(RestEnvelope::failure(404, "Object not found.", key))
}

fn access_denied(key: &str) -> Response {
    envelope_response(RestEnvelope::failure(401, "Access denied.", key))
}

fn bad_token(key: &str) -> Response {
    envelope_response(RestEnvelope::failure(
        403,
        "Bad XSRF token. Please reload the page and try again.",
        key,
    ))
}
