//! HTTP route handlers for the site.
//!
//! # Route Structure
//!
//! ```text
//! GET  /                          - Home page
//! GET  /health                    - Liveness check
//! GET  /health/ready              - Readiness check (lead desk)
//!
//! # Catalog
//! GET  /products                  - Product listing (?search, category, price, view)
//! GET  /products/{id}             - Product detail
//!
//! # Cart (HTMX fragments)
//! POST /cart/add                  - Add to cart (returns badge, triggers cart-updated)
//! GET  /cart/count                - Cart count badge (fragment)
//!
//! # Lead forms (rate limited POSTs)
//! GET  /appointment               - Appointment booking
//! POST /appointment               - Book (422 on invalid input, 303 otherwise)
//! GET  /services                  - Alias of /appointment
//! POST /services
//! GET  /quick-call                - Callback request
//! POST /quick-call
//! GET  /contact                   - Contact details and message form
//! POST /contact
//!
//! # Testimonials (HTMX fragments)
//! GET  /testimonials              - Carousel fragment (polled)
//! POST /testimonials/previous     - Previous slide
//! POST /testimonials/next         - Next slide
//! POST /testimonials/{index}      - Jump to slide
//!
//! GET  /about                     - About page (markdown content)
//! *                               - Not found page
//! ```

pub mod about;
pub mod appointment;
pub mod cart;
pub mod contact;
pub mod forms;
pub mod health;
pub mod home;
pub mod not_found;
pub mod products;
pub mod quick_call;
pub mod testimonials;

use axum::{
    Router,
    routing::{get, post},
};

use crate::middleware::lead_rate_limiter;
use crate::state::AppState;

/// Create the product routes router.
pub fn product_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(products::index))
        .route("/{id}", get(products::show))
}

/// Create the cart routes router.
pub fn cart_routes() -> Router<AppState> {
    Router::new()
        .route("/add", post(cart::add))
        .route("/count", get(cart::count))
}

/// Create the testimonial carousel routes router.
pub fn testimonial_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(testimonials::show))
        .route("/previous", post(testimonials::previous))
        .route("/next", post(testimonials::next))
        .route("/{index}", post(testimonials::select))
}

/// Create the lead form routes router.
///
/// Only the POSTs are rate limited; the four share one limiter.
pub fn lead_form_routes() -> Router<AppState> {
    let limiter = lead_rate_limiter();

    Router::new()
        .route(
            "/appointment",
            get(appointment::show).merge(post(appointment::submit).layer(limiter.clone())),
        )
        .route(
            "/services",
            get(appointment::show).merge(post(appointment::submit).layer(limiter.clone())),
        )
        .route(
            "/quick-call",
            get(quick_call::show).merge(post(quick_call::submit).layer(limiter.clone())),
        )
        .route(
            "/contact",
            get(contact::show).merge(post(contact::submit).layer(limiter)),
        )
}

/// Create all routes for the site.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(home::home))
        .route("/about", get(about::show))
        .route("/health", get(health::health))
        .route("/health/ready", get(health::readiness))
        .nest("/products", product_routes())
        .nest("/cart", cart_routes())
        .nest("/testimonials", testimonial_routes())
        .merge(lead_form_routes())
        .fallback(not_found::not_found)
}
