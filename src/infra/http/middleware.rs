use std::time::Instant;

use axum::{body::Body, http::Request, middleware::Next, response::Response};
use tracing::{error, warn};
use uuid::Uuid;

use crate::application::error::ErrorReport;
use crate::domain::rights::{CourseRole, ViewerContext};

/// Header carrying the authenticated user, set by the platform gateway.
pub const COURSE_USER_HEADER: &str = "x-course-user";
/// Header carrying the resolved course role, set by the platform gateway.
pub const COURSE_ROLE_HEADER: &str = "x-course-role";

#[derive(Clone)]
pub struct RequestContext {
    pub request_id: String,
}

pub async fn set_request_context(mut request: Request<Body>, next: Next) -> Response {
    let ctx = RequestContext {
        request_id: Uuid::new_v4().to_string(),
    };
    request.extensions_mut().insert(ctx.clone());

    let mut response = next.run(request).await;
    response.extensions_mut().insert(ctx);
    response
}

/// Build the viewer capability context from the forwarded identity headers.
///
/// Requests without a recognized role header are treated as plain members;
/// restriction happens downstream by filtering, not by rejecting here.
pub async fn resolve_viewer(mut request: Request<Body>, next: Next) -> Response {
    let user = request
        .headers()
        .get(COURSE_USER_HEADER)
        .and_then(|value| value.to_str().ok())
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty());

    let role = request
        .headers()
        .get(COURSE_ROLE_HEADER)
        .and_then(|value| value.to_str().ok())
        .map(str::trim);

    let viewer = match role {
        Some(role) if role.eq_ignore_ascii_case("admin") => ViewerContext {
            user,
            role: CourseRole::Admin,
        },
        _ => ViewerContext {
            user,
            role: CourseRole::Member,
        },
    };

    request.extensions_mut().insert(viewer);
    next.run(request).await
}

pub async fn log_responses(request: Request<Body>, next: Next) -> Response {
    let method = request.method().clone();
    let uri = request.uri().clone();
    let start = Instant::now();

    let request_id = request
        .extensions()
        .get::<RequestContext>()
        .map(|ctx| ctx.request_id.clone())
        .unwrap_or_default();

    let viewer_user = request
        .extensions()
        .get::<ViewerContext>()
        .and_then(|viewer| viewer.user.clone())
        .unwrap_or_default();

    let mut response = next.run(request).await;
    let status = response.status();

    if status.is_client_error() || status.is_server_error() {
        let elapsed_ms = start.elapsed().as_millis();
        let report = response.extensions_mut().remove::<ErrorReport>();
        let (source, messages) = match report {
            Some(report) => (report.source, report.messages),
            None => ("unknown", Vec::new()),
        };
        let detail = messages
            .first()
            .cloned()
            .unwrap_or_else(|| "no diagnostic available".to_string());

        if status.is_server_error() {
            error!(
                target: "coursewiki::http::response",
                status = status.as_u16(),
                method = %method,
                path = %uri.path(),
                elapsed_ms = elapsed_ms,
                source = source,
                detail = %detail,
                chain = ?messages,
                request_id = request_id,
                viewer = %viewer_user,
                "request failed"
            );
        } else {
            warn!(
                target: "coursewiki::http::response",
                status = status.as_u16(),
                method = %method,
                path = %uri.path(),
                elapsed_ms = elapsed_ms,
                source = source,
                detail = %detail,
                request_id = request_id,
                viewer = %viewer_user,
                "request rejected"
            );
        }
    }

    response
}
