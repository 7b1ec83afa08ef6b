//! About page, rendered from `content/pages/about.md`.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use tracing::instrument;

use crate::components::PageShell;
use crate::content::Page;
use crate::filters;
use crate::routes::not_found::NotFoundTemplate;
use crate::state::AppState;

const ABOUT_SLUG: &str = "about";

#[derive(Template, WebTemplate)]
#[template(path = "pages/about.html")]
pub struct AboutTemplate {
    pub shell: PageShell,
    pub page: Page,
}

/// Display the about page.
#[instrument(skip(state, shell))]
pub async fn show(State(state): State<AppState>, shell: PageShell) -> Response {
    match state.content().get_page(ABOUT_SLUG) {
        Some(page) => AboutTemplate {
            shell,
            page: page.clone(),
        }
        .into_response(),
        None => {
            tracing::error!("About page content is missing");
            (StatusCode::NOT_FOUND, NotFoundTemplate { shell }).into_response()
        }
    }
}
