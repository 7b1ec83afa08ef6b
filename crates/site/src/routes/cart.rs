//! Cart route handlers.
//!
//! The clinic sells in store, so the cart only counts what a visitor has
//! added. The count is kept per visitor and shown in the navbar badge.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::State,
    http::HeaderMap,
    response::{AppendHeaders, IntoResponse, Redirect, Response},
};
use serde::Deserialize;
use tracing::instrument;

use pareena_core::types::ProductId;

use crate::error::{AppError, Result};
use crate::models::Visitor;
use crate::state::AppState;

/// Add to cart form data.
#[derive(Debug, Deserialize)]
pub struct AddToCartForm {
    pub product_id: u32,
}

/// Cart count badge fragment.
#[derive(Template, WebTemplate)]
#[template(path = "partials/cart_count.html")]
pub struct CartCountTemplate {
    pub count: u32,
}

/// Add a product to the cart.
///
/// htmx requests get the new badge plus an `HX-Trigger: cart-updated` event;
/// plain form posts go back to the catalog.
#[instrument(skip(state, visitor, headers))]
pub async fn add(
    State(state): State<AppState>,
    visitor: Visitor,
    headers: HeaderMap,
    Form(form): Form<AddToCartForm>,
) -> Result<Response> {
    let product = state
        .catalog()
        .get(ProductId::new(form.product_id))
        .ok_or_else(|| AppError::NotFound(format!("product {}", form.product_id)))?;

    let count = state.visitors().update(visitor.id, |record| {
        record.cart_count = record.cart_count.saturating_add(1);
        record.cart_count
    });
    tracing::info!(product_id = %product.id, count, "Added to cart");

    if headers.get("hx-request").is_some() {
        Ok((
            AppendHeaders([("HX-Trigger", "cart-updated")]),
            CartCountTemplate { count },
        )
            .into_response())
    } else {
        Ok(Redirect::to("/products").into_response())
    }
}

/// Get cart item count (for badge update).
#[instrument(skip(state, visitor))]
pub async fn count(State(state): State<AppState>, visitor: Visitor) -> impl IntoResponse {
    CartCountTemplate {
        count: state.visitors().cart_count(visitor.id),
    }
}
