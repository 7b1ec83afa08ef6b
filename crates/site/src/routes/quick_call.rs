//! Quick callback request page.
//!
//! The same form is embedded on the home page. It posts here with
//! `?from=/`, so the visitor is sent back home to see the confirmation.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::{Query, State},
    response::{IntoResponse, Response},
};
use chrono::NaiveDate;
use tracing::instrument;

use pareena_core::forms::{CallConcern, CallbackDraft, Choice, FieldErrors};

use crate::components::{Feature, Field, InputKind, PageShell};
use crate::error::Result;
use crate::filters;
use crate::models::Visitor;
use crate::routes::forms::{self, FormPage, FormView, ReturnTo};
use crate::state::AppState;

const FEATURES: [Feature; 4] = [
    Feature {
        title: "Quick Response",
        description: "We'll call you back within 15-30 minutes during working hours",
    },
    Feature {
        title: "Expert Consultation",
        description: "Speak directly with our experienced optometrists",
    },
    Feature {
        title: "Personalized Advice",
        description: "Get tailored recommendations for your specific eye concerns",
    },
    Feature {
        title: "No Obligation",
        description: "Free consultation with no pressure to book an appointment",
    },
];

const COMMON_ISSUES: [&str; 8] = [
    "Eye strain from computer work",
    "Dry or watery eyes",
    "Blurry or changing vision",
    "Frequent headaches",
    "Contact lens discomfort",
    "Need for prescription update",
    "Eye irritation or redness",
    "Questions about eye care",
];

#[derive(Template, WebTemplate)]
#[template(path = "pages/quick_call.html")]
pub struct QuickCallTemplate {
    pub shell: PageShell,
    pub form: FormView<CallbackDraft>,
    pub features: [Feature; 4],
    pub common_issues: [&'static str; 8],
}

impl FormPage for CallbackDraft {
    const SUBMIT_LABEL: &'static str = "Request Callback";
    const SUBMITTING_LABEL: &'static str = "Submitting...";

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
            Field::select::<CallConcern>("issue", "What's bothering you?", "Select your concern")
                .required()
                .bind(&self.issue),
        ]
        .into_iter()
        .map(|field| field.with_errors(errors))
        .collect()
    }

    fn page(shell: PageShell, form: FormView<Self>) -> Response {
        QuickCallTemplate {
            shell,
            form,
            features: FEATURES,
            common_issues: COMMON_ISSUES,
        }
        .into_response()
    }
}

/// Display the callback request page.
#[instrument(skip(state, visitor, shell))]
pub async fn show(
    State(state): State<AppState>,
    visitor: Visitor,
    shell: PageShell,
) -> Response {
    forms::show::<CallbackDraft>(&state, &visitor, shell)
}

/// Request a callback.
#[instrument(skip_all)]
pub async fn submit(
    State(state): State<AppState>,
    visitor: Visitor,
    shell: PageShell,
    Query(return_to): Query<ReturnTo>,
    Form(draft): Form<CallbackDraft>,
) -> Result<Response> {
    forms::submit(&state, &visitor, shell, &return_to, draft).await
}
