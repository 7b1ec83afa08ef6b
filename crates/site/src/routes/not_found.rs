//! Fallback for unknown paths.

use askama::Template;
use askama_web::WebTemplate;
use axum::{http::StatusCode, response::IntoResponse};

use crate::components::PageShell;
use crate::filters;

#[derive(Template, WebTemplate)]
#[template(path = "pages/not_found.html")]
pub struct NotFoundTemplate {
    pub shell: PageShell,
}

/// Render the not-found page inside the usual shell.
pub async fn not_found(shell: PageShell) -> impl IntoResponse {
    tracing::debug!(path = %shell.current_path, "No route");
    (StatusCode::NOT_FOUND, NotFoundTemplate { shell })
}
