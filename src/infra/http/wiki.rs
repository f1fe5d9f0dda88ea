//! Page handlers for the wiki listing and its editor actions.

use axum::{
    extract::{Extension, Form, Query, State},
    http::StatusCode,
    response::{IntoResponse, Redirect, Response},
};
use serde::Deserialize;
use uuid::Uuid;

use crate::{
    application::{error::HttpError, wiki::ListedEntry},
    domain::rights::ViewerContext,
    presentation::views::{
        WIKI_SCHEMA_ANNOTATIONS_JSON, WIKI_SCHEMA_JSON, WikiAddActionView, WikiEditorTemplate,
        WikiEditorView, WikiEntryActionsView, WikiEntryView, WikiListView, WikiTemplate,
        render_template_response,
    },
};

use super::{HttpState, access_denied, bad_xsrf_token, repo_error_to_http};

/// Action tags bound into the page-form anti-forgery tokens.
pub(crate) const ADD_ACTION: &str = "add";
pub(crate) const DELETE_ACTION: &str = "delete";

#[derive(Debug, Deserialize)]
pub(crate) struct EditQuery {
    key: Option<String>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct WikiAddForm {
    xsrf_token: String,
}

#[derive(Debug, Deserialize)]
pub(crate) struct WikiDeleteForm {
    key: String,
    xsrf_token: String,
}

pub(crate) async fn wiki_list(
    State(state): State<HttpState>,
    Extension(viewer): Extension<ViewerContext>,
) -> Response {
    let entries = match state.wiki.list_for_viewer(&viewer).await {
        Ok(entries) => entries,
        Err(err) => return repo_error_to_http("infra::http::wiki_list", err).into_response(),
    };

    let view = build_list_view(&state, &viewer, entries);
    render_template_response(WikiTemplate { view }, StatusCode::OK)
}

fn build_list_view(
    state: &HttpState,
    viewer: &ViewerContext,
    entries: Vec<ListedEntry>,
) -> WikiListView {
    let can_edit = viewer.can_edit();

    let children = entries
        .into_iter()
        .map(|entry| {
            let key = entry.record.id.to_string();
            let actions = can_edit.then(|| WikiEntryActionsView {
                edit_href: format!("/wiki/edit?key={key}"),
                delete_action: "/wiki/delete".to_string(),
                delete_xsrf_token: state.xsrf.create_token(DELETE_ACTION, None),
            });
            WikiEntryView {
                key,
                position: entry.record.position,
                is_draft: entry.record.is_draft,
                body_html: entry.body_html,
                actions,
            }
        })
        .collect();

    let editor = can_edit.then(|| WikiAddActionView {
        add_action: "/wiki/add".to_string(),
        add_xsrf_token: state.xsrf.create_token(ADD_ACTION, None),
    });

    WikiListView { children, editor }
}

/// Editor shell: the external object editor loads and saves the entry through
/// the item REST endpoint; this page only hands it the schema and URLs.
pub(crate) async fn wiki_edit(
    Extension(viewer): Extension<ViewerContext>,
    Query(query): Query<EditQuery>,
) -> Response {
    if !viewer.can_edit() {
        return access_denied("infra::http::wiki_edit");
    }

    let Some(key) = query.key.filter(|key| !key.is_empty()) else {
        return HttpError::new(
            "infra::http::wiki_edit",
            StatusCode::BAD_REQUEST,
            "Missing key",
            "edit requires a `key` query parameter",
        )
        .into_response();
    };

    let view = WikiEditorView {
        exit_url: format!("/wiki#{key}"),
        rest_url: "/rest/wiki/item".to_string(),
        schema_json: WIKI_SCHEMA_JSON.to_string(),
        annotations_json: WIKI_SCHEMA_ANNOTATIONS_JSON.to_string(),
        key,
    };
    render_template_response(WikiEditorTemplate { view }, StatusCode::OK)
}

pub(crate) async fn wiki_add(
    State(state): State<HttpState>,
    Extension(viewer): Extension<ViewerContext>,
    Form(form): Form<WikiAddForm>,
) -> Response {
    if state.xsrf.validate(&form.xsrf_token, ADD_ACTION, None).is_err() {
        return bad_xsrf_token("infra::http::wiki_add");
    }
    if !viewer.can_add() {
        return access_denied("infra::http::wiki_add");
    }

    match state.wiki.create_default().await {
        Ok(record) => Redirect::to(&format!("/wiki/edit?key={}", record.id)).into_response(),
        Err(err) => repo_error_to_http("infra::http::wiki_add", err).into_response(),
    }
}

/// Deleting an entry whose key no longer resolves (or never did) is a silent
/// no-op; the caller is redirected to the listing either way.
pub(crate) async fn wiki_delete(
    State(state): State<HttpState>,
    Extension(viewer): Extension<ViewerContext>,
    Form(form): Form<WikiDeleteForm>,
) -> Response {
    if state
        .xsrf
        .validate(&form.xsrf_token, DELETE_ACTION, None)
        .is_err()
    {
        return bad_xsrf_token("infra::http::wiki_delete");
    }
    if !viewer.can_delete() {
        return access_denied("infra::http::wiki_delete");
    }

    if let Ok(id) = Uuid::parse_str(&form.key) {
        if let Err(err) = state.wiki.delete(id).await {
            return repo_error_to_http("infra::http::wiki_delete", err).into_response();
        }
    }

    Redirect::to("/wiki").into_response()
}
