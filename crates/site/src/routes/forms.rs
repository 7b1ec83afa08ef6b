//! Shared handling for the three lead forms.
//!
//! Each form page is a GET/POST pair on the same path:
//!
//! - `GET` renders the form in its current lifecycle phase. While a
//!   confirmation is showing, a `Refresh` header brings the browser back once
//!   the display window ends and the empty form takes its place. A page
//!   rendered while the submission is still with the lead desk reloads every
//!   second until the outcome is recorded.
//! - `POST` validates the draft. An invalid draft is re-rendered with `422`
//!   and the visitor's values; a valid one is handed to the lead desk and the
//!   outcome is recorded before redirecting back with `303`.
//!
//! A form embedded on another page posts with `?from=<path>` so the visitor
//! lands back where they started and sees the confirmation there.

use axum::{
    http::{HeaderValue, StatusCode, header},
    response::{IntoResponse, Redirect, Response},
};
use chrono::{DateTime, NaiveDate, Utc};
use serde::Deserialize;

use pareena_core::clinic;
use pareena_core::forms::{FieldErrors, Lead, LeadForm};
use pareena_core::lifecycle::{FormLifecycle, Phase};
use pareena_core::nav::Route;

use crate::components::{Field, PageShell};
use crate::error::{AppError, Result};
use crate::models::Visitor;
use crate::services::{StoredForm, VisitorRecord};
use crate::state::AppState;

/// Shown when the lead desk fails. The cause is only logged.
pub const FAILURE_MESSAGE: &str =
    "Sorry, we couldn't send your request. Please try again, or call us directly.";

/// Reload interval while a submission is still with the lead desk.
const SUBMITTING_POLL_SECS: i64 = 1;

/// How a lead form page renders itself.
pub trait FormPage: StoredForm {
    const SUBMIT_LABEL: &'static str;
    const SUBMITTING_LABEL: &'static str;

    /// Controls bound to this draft, with validation messages attached.
    fn fields(&self, errors: &FieldErrors, today: NaiveDate) -> Vec<Field>;

    /// Render the full page around `view`.
    fn page(shell: PageShell, view: FormView<Self>) -> Response;
}

/// The `from` query parameter of a form post.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ReturnTo {
    from: Option<String>,
}

impl ReturnTo {
    #[must_use]
    pub fn new(route: Route) -> Self {
        Self {
            from: Some(route.path().to_string()),
        }
    }

    /// The page to go back to. Only the site's own pages qualify.
    #[must_use]
    pub fn route(&self) -> Option<Route> {
        self.from
            .as_deref()
            .filter(|path| path.starts_with('/'))
            .and_then(Route::from_path)
    }
}

/// Action for a form served at `path` that should come back to `back`.
#[must_use]
pub fn action_returning_to(path: &str, back: Route) -> String {
    format!("{path}?from={}", urlencoding::encode(back.path()))
}

/// Lifecycle phase as the template sees it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormStatus {
    Idle,
    Submitting,
    Submitted,
    Failed,
}

impl FormStatus {
    #[must_use]
    pub const fn is_submitting(self) -> bool {
        matches!(self, Self::Submitting)
    }

    #[must_use]
    pub const fn is_submitted(self) -> bool {
        matches!(self, Self::Submitted)
    }

    #[must_use]
    pub const fn is_failed(self) -> bool {
        matches!(self, Self::Failed)
    }
}

/// A lead form ready to render.
#[derive(Debug, Clone)]
pub struct FormView<F: LeadForm> {
    /// Where the form posts to.
    pub action: String,
    pub fields: Vec<Field>,
    pub status: FormStatus,
    /// The accepted request while the confirmation is showing.
    pub submitted: Option<F::Request>,
    pub submit_label: &'static str,
    pub submitting_label: &'static str,
    pub failure_message: &'static str,
    /// Whole seconds until the confirmation clears.
    pub refresh_after: Option<i64>,
}

impl<F: FormPage> FormView<F> {
    fn build(
        action: &str,
        lifecycle: &FormLifecycle<F>,
        errors: &FieldErrors,
        submitting: bool,
        now: DateTime<Utc>,
    ) -> Self {
        let (status, submitted) = match lifecycle.phase() {
            _ if submitting => (FormStatus::Submitting, None),
            Phase::Idle => (FormStatus::Idle, None),
            Phase::Submitting { .. } => (FormStatus::Submitting, None),
            Phase::Submitted { request, .. } => (FormStatus::Submitted, Some(request.clone())),
            Phase::Failed { .. } => (FormStatus::Failed, None),
        };

        // Round up so the reload never lands just before the deadline.
        let refresh_after = if status.is_submitting() {
            Some(SUBMITTING_POLL_SECS)
        } else {
            lifecycle.display_remaining(now).map(|remaining| {
                let millis = remaining.num_milliseconds();
                ((millis + 999) / 1000).max(1)
            })
        };

        Self {
            action: action.to_string(),
            fields: lifecycle.draft().fields(errors, clinic::local_today(now)),
            status,
            submitted,
            submit_label: F::SUBMIT_LABEL,
            submitting_label: F::SUBMITTING_LABEL,
            failure_message: FAILURE_MESSAGE,
            refresh_after,
        }
    }

    /// Whether the submit button is enabled.
    #[must_use]
    pub const fn accepts_submit(&self) -> bool {
        matches!(self.status, FormStatus::Idle | FormStatus::Failed)
    }
}

/// Add the `Refresh` header, if the view asked for one.
#[must_use]
pub fn with_refresh(mut response: Response, refresh_after: Option<i64>) -> Response {
    if let Some(secs) = refresh_after
        && let Ok(value) = HeaderValue::from_str(&secs.to_string())
    {
        response.headers_mut().insert(header::REFRESH, value);
    }
    response
}

/// The visitor's form of type `F`, with any reset that is due applied.
fn refreshed<F: FormPage>(
    record: &mut VisitorRecord,
    now: DateTime<Utc>,
) -> &mut FormLifecycle<F> {
    let lifecycle = record.form::<F>();
    if lifecycle.refresh(now) {
        tracing::debug!(form = F::KIND.slug(), "Confirmation window ended, form cleared");
    }
    lifecycle
}

/// The visitor's form of type `F` in its current phase, posting to `action`.
#[must_use]
pub fn current_view<F: FormPage>(
    state: &AppState,
    visitor: &Visitor,
    action: &str,
) -> FormView<F> {
    let now = state.clock().now();
    let submitting = state.in_flight().is_active(visitor.id, F::KIND);
    state.visitors().update(visitor.id, |record| {
        let lifecycle = refreshed::<F>(record, now);
        FormView::build(action, lifecycle, &FieldErrors::default(), submitting, now)
    })
}

/// `GET` for a form page.
#[must_use]
pub fn show<F: FormPage>(state: &AppState, visitor: &Visitor, shell: PageShell) -> Response {
    let view = current_view::<F>(state, visitor, &shell.current_path);
    let refresh_after = view.refresh_after;
    with_refresh(F::page(shell, view), refresh_after)
}

/// Outcome of checking a posted draft against the stored form.
enum Checked<F: FormPage> {
    /// Valid. `pending` is the stored form moved to submitting.
    Accepted {
        pending: FormLifecycle<F>,
        request: F::Request,
    },
    Rejected(FormView<F>),
}

/// `POST` for a form page.
///
/// Redirects to the page named by `return_to` when there is one, otherwise
/// back to the form's own page.
///
/// # Errors
///
/// Returns [`AppError::Conflict`] while a submission for this form is in
/// flight or its confirmation is still showing.
pub async fn submit<F: FormPage>(
    state: &AppState,
    visitor: &Visitor,
    shell: PageShell,
    return_to: &ReturnTo,
    draft: F,
) -> Result<Response> {
    let Some(_guard) = state.in_flight().acquire(visitor.id, F::KIND) else {
        return Err(AppError::Conflict(format!(
            "{} form is already being submitted",
            F::KIND.slug()
        )));
    };

    let back = return_to
        .route()
        .filter(|route| route.path() != shell.current_path);
    let action = back.map_or_else(
        || shell.current_path.clone(),
        |route| action_returning_to(&shell.current_path, route),
    );
    let now = state.clock().now();

    let checked = state.visitors().update(visitor.id, |record| -> Result<Checked<F>> {
        let lifecycle = refreshed::<F>(record, now);
        if !lifecycle.accepts_submit() {
            return Err(AppError::Conflict(format!(
                "{} form is still showing its confirmation",
                F::KIND.slug()
            )));
        }

        match draft.validate(clinic::local_today(now)) {
            Ok(request) => {
                let mut pending = lifecycle.clone();
                pending
                    .begin(draft, now)
                    .map_err(|e| AppError::Conflict(e.to_string()))?;
                Ok(Checked::Accepted { pending, request })
            }
            Err(errors) => {
                tracing::debug!(form = F::KIND.slug(), invalid = errors.len(), "Form rejected");
                lifecycle.edit(draft);
                let view = FormView::build(&action, lifecycle, &errors, false, now);
                Ok(Checked::Rejected(view))
            }
        }
    })?;

    let (mut pending, request) = match checked {
        Checked::Accepted { pending, request } => (pending, request),
        Checked::Rejected(view) => {
            return Ok((StatusCode::UNPROCESSABLE_ENTITY, F::page(shell, view)).into_response());
        }
    };

    let lead: Lead = request.clone().into();
    let outcome = state.leads().submit(&lead).await;
    let finished = state.clock().now();

    let recorded = match outcome {
        Ok(receipt) => {
            tracing::info!(
                form = F::KIND.slug(),
                receipt_id = %receipt.id,
                "Lead accepted"
            );
            pending.complete(request, finished)
        }
        Err(e) => {
            tracing::warn!(form = F::KIND.slug(), error = %e, "Lead desk failed");
            pending.fail(e.to_string(), finished)
        }
    };
    recorded.map_err(|e| AppError::Internal(e.to_string()))?;

    // The in-flight guard is still held, so nothing else has moved this form
    // since it was checked. The rest of the record is left as it is now.
    state
        .visitors()
        .update(visitor.id, |record| *record.form::<F>() = pending);

    let target = back.map_or_else(
        || shell.current_path.clone(),
        |route| format!("{}#{}-form", route.path(), F::KIND.slug()),
    );
    Ok(Redirect::to(&target).into_response())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use chrono::{TimeDelta, TimeZone};
    use pareena_core::forms::{CallConcern, CallbackDraft, CallbackRequest};
    use pareena_core::types::Phone;

    use super::*;

    fn t0() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 10, 16, 4, 30, 0).unwrap()
    }

    fn submitted_callback() -> FormLifecycle<CallbackDraft> {
        let mut form = FormLifecycle::<CallbackDraft>::new();
        form.begin(CallbackDraft::default(), t0()).unwrap();
        form.complete(
            CallbackRequest {
                name: "Anitha".to_string(),
                phone: Phone::parse("9963006059").unwrap(),
                issue: CallConcern::Headaches,
            },
            t0(),
        )
        .unwrap();
        form
    }

    #[test]
    fn test_refresh_rounds_up() {
        let form = submitted_callback();
        let view = FormView::build(
            "/quick-call",
            &form,
            &FieldErrors::default(),
            false,
            t0() + TimeDelta::milliseconds(1200),
        );
        assert_eq!(view.status, FormStatus::Submitted);
        assert_eq!(view.refresh_after, Some(2));
        assert!(!view.accepts_submit());
        assert!(view.submitted.is_some());
    }

    #[test]
    fn test_in_flight_overrides_stored_phase() {
        let form = FormLifecycle::<CallbackDraft>::new();
        let view = FormView::build("/quick-call", &form, &FieldErrors::default(), true, t0());
        assert!(view.status.is_submitting());
        assert!(!view.accepts_submit());
        assert_eq!(view.refresh_after, Some(SUBMITTING_POLL_SECS));
    }

    #[test]
    fn test_return_path_only_names_site_pages() {
        let back = |from: &str| {
            ReturnTo {
                from: Some(from.to_string()),
            }
            .route()
        };
        assert_eq!(ReturnTo::new(Route::Home).route(), Some(Route::Home));
        assert_eq!(back("/about/"), Some(Route::About));
        assert_eq!(back("https://example.com/"), None);
        assert_eq!(back("//example.com"), None);
        assert_eq!(back("/products/1"), None);
        assert_eq!(back(""), None);
        assert_eq!(ReturnTo::default().route(), None);
    }

    #[test]
    fn test_action_carries_return_path() {
        assert_eq!(
            action_returning_to("/quick-call", Route::Home),
            "/quick-call?from=%2F"
        );
    }

    #[test]
    fn test_refresh_header() {
        let response = with_refresh(().into_response(), Some(3));
        assert_eq!(response.headers().get(header::REFRESH).unwrap(), "3");
        let response = with_refresh(().into_response(), None);
        assert!(response.headers().get(header::REFRESH).is_none());
    }
}
