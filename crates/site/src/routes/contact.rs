//! Contact page: clinic details, message form, map and WhatsApp link.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::{Query, State},
    response::{IntoResponse, Response},
};
use chrono::NaiveDate;
use tracing::instrument;

use pareena_core::forms::{ContactDraft, FieldErrors};

use crate::components::{Field, InputKind, PageShell};
use crate::error::Result;
use crate::filters;
use crate::models::Visitor;
use crate::routes::forms::{self, FormPage, FormView, ReturnTo};
use crate::state::AppState;

#[derive(Template, WebTemplate)]
#[template(path = "pages/contact.html")]
pub struct ContactTemplate {
    pub shell: PageShell,
    pub form: FormView<ContactDraft>,
}

impl FormPage for ContactDraft {
    const SUBMIT_LABEL: &'static str = "Send Message";
    const SUBMITTING_LABEL: &'static str = "Sending Message...";

    fn fields(&self, errors: &FieldErrors, _today: NaiveDate) -> Vec<Field> {
        [
            Field::input("name", "Full Name", InputKind::Text)
                .required()
                .placeholder("Enter your full name")
                .bind(&self.name),
            Field::input("phone", "Phone Number", InputKind::Tel)
                .required()
                .placeholder("Enter your phone number")
                .bind(&self.phone),
            Field::input("email", "Email Address", InputKind::Email)
                .required()
                .placeholder("Enter your email address")
                .bind(&self.email),
            Field::input("subject", "Subject", InputKind::Text)
                .required()
                .placeholder("What is this regarding?")
                .bind(&self.subject),
            Field::textarea("message", "Message", 5)
                .required()
                .placeholder("Tell us how we can help you...")
                .bind(&self.message),
        ]
        .into_iter()
        .map(|field| field.with_errors(errors))
        .collect()
    }

    fn page(shell: PageShell, form: FormView<Self>) -> Response {
        ContactTemplate { shell, form }.into_response()
    }
}

/// Display the contact page.
#[instrument(skip(state, visitor, shell))]
pub async fn show(
    State(state): State<AppState>,
    visitor: Visitor,
    shell: PageShell,
) -> Response {
    forms::show::<ContactDraft>(&state, &visitor, shell)
}

/// Send a message to the clinic.
#[instrument(skip_all)]
pub async fn submit(
    State(state): State<AppState>,
    visitor: Visitor,
    shell: PageShell,
    Query(return_to): Query<ReturnTo>,
    Form(draft): Form<ContactDraft>,
) -> Result<Response> {
    forms::submit(&state, &visitor, shell, &return_to, draft).await
}
