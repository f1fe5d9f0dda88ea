use askama::{Error as AskamaError, Template};
use axum::{
    http::StatusCode,
    response::{Html, IntoResponse, Response},
};
use thiserror::Error;

use crate::application::error::HttpError;

/// Field schema handed verbatim to the external object-editor collaborator.
pub const WIKI_SCHEMA_JSON: &str = r#"{
    "id": "Wiki Entry",
    "type": "object",
    "properties": {
        "key": {"type": "string"},
        "position": {"type": "integer", "minimum": 1},
        "is_html": {"type": "boolean"},
        "html": {"type": "text", "optional": true},
        "is_draft": {"type": "boolean"}
    }
}"#;

/// Editor look-and-feel annotations for the schema above.
pub const WIKI_SCHEMA_ANNOTATIONS_JSON: &str = r#"[
    {"field": "key", "label": "ID", "editable": false},
    {"field": "position", "label": "Position", "type": "integer", "min": 1},
    {"field": "is_html", "label": "Type", "true_label": "Html", "false_label": "WikiText"},
    {"field": "html", "label": "Body", "type": "text"},
    {"field": "is_draft", "label": "Status", "true_label": "Draft", "false_label": "Published"}
]"#;

#[derive(Debug, Error)]
#[error("{public_message}")]
pub struct TemplateRenderError {
    pub(crate) source: &'static str,
    pub(crate) public_message: &'static str,
    #[source]
    pub(crate) error: AskamaError,
}

impl From<TemplateRenderError> for HttpError {
    fn from(err: TemplateRenderError) -> Self {
        HttpError::from_error(
            err.source,
            StatusCode::INTERNAL_SERVER_ERROR,
            err.public_message,
            &err.error,
        )
    }
}

pub fn render_template<T: Template>(template: T) -> Result<Html<String>, HttpError> {
    template.render().map(Html).map_err(|err| {
        TemplateRenderError {
            source: "presentation::views::render_template",
            public_message: "Template rendering failed",
            error: err,
        }
        .into()
    })
}

pub fn render_template_response<T: Template>(template: T, status: StatusCode) -> Response {
    match render_template(template) {
        Ok(html) => (status, html).into_response(),
        Err(err) => err.into_response(),
    }
}

/// Mutating actions available to an editor for one entry.
#[derive(Debug, Clone)]
pub struct WikiEntryActionsView {
    pub edit_href: String,
    pub delete_action: String,
    pub delete_xsrf_token: String,
}

#[derive(Debug, Clone)]
pub struct WikiEntryView {
    pub key: String,
    pub position: i32,
    pub is_draft: bool,
    /// Display body: literal HTML, or markup already rendered at read time.
    pub body_html: String,
    pub actions: Option<WikiEntryActionsView>,
}

/// Add form shown to editors above the listing.
#[derive(Debug, Clone)]
pub struct WikiAddActionView {
    pub add_action: String,
    pub add_xsrf_token: String,
}

#[derive(Debug, Clone)]
pub struct WikiListView {
    pub children: Vec<WikiEntryView>,
    pub editor: Option<WikiAddActionView>,
}

#[derive(Template)]
#[template(path = "wiki.html")]
pub struct WikiTemplate {
    pub view: WikiListView,
}

/// Everything the external object editor needs to edit one entry.
#[derive(Debug, Clone)]
pub struct WikiEditorView {
    pub key: String,
    pub rest_url: String,
    pub exit_url: String,
    pub schema_json: String,
    pub annotations_json: String,
}

#[derive(Template)]
#[template(path = "wiki_edit.html")]
pub struct WikiEditorTemplate {
    pub view: WikiEditorView,
}
