//! Appointment booking page, served at `/appointment` and `/services`.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::{Query, State},
    response::{IntoResponse, Response},
};
use chrono::NaiveDate;
use tracing::instrument;

use pareena_core::forms::{AppointmentDraft, Choice, FieldErrors, TimeSlot, VisitReason};

use crate::components::{Feature, Field, InputKind, PageShell};
use crate::error::Result;
use crate::filters;
use crate::models::Visitor;
use crate::routes::forms::{self, FormPage, FormView, ReturnTo};
use crate::state::AppState;

/// A bookable service with its price and duration.
#[derive(Debug, Clone, Copy)]
pub struct ServiceOffer {
    pub title: &'static str,
    pub description: &'static str,
    pub duration: &'static str,
    pub price: &'static str,
}

pub const SERVICES: [ServiceOffer; 4] = [
    ServiceOffer {
        title: "Comprehensive Eye Exam",
        description: "Complete eye health assessment with advanced diagnostic equipment",
        duration: "45-60 minutes",
        price: "₹500",
    },
    ServiceOffer {
        title: "Contact Lens Fitting",
        description: "Professional fitting and training for contact lens users",
        duration: "30-45 minutes",
        price: "₹300",
    },
    ServiceOffer {
        title: "Prescription Update",
        description: "Quick vision check and prescription adjustment",
        duration: "20-30 minutes",
        price: "₹200",
    },
    ServiceOffer {
        title: "Frame Selection Consultation",
        description: "Expert guidance in choosing the perfect frame for your face",
        duration: "15-30 minutes",
        price: "Free",
    },
];

const WHY_US: [Feature; 3] = [
    Feature {
        title: "Expert Team",
        description: "Experienced optometrists with years of expertise in eye care",
    },
    Feature {
        title: "Advanced Equipment",
        description: "Latest diagnostic technology for accurate and comprehensive eye exams",
    },
    Feature {
        title: "5-Star Service",
        description: "Exceptional customer service with personalized care for every patient",
    },
];

#[derive(Template, WebTemplate)]
#[template(path = "pages/appointment.html")]
pub struct AppointmentTemplate {
    pub shell: PageShell,
    pub form: FormView<AppointmentDraft>,
    pub services: [ServiceOffer; 4],
    pub why_us: [Feature; 3],
}

impl FormPage for AppointmentDraft {
    const SUBMIT_LABEL: &'static str = "Book Appointment";
    const SUBMITTING_LABEL: &'static str = "Booking Appointment...";

    fn fields(&self, errors: &FieldErrors, today: NaiveDate) -> Vec<Field> {
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
                .placeholder("Enter your email address")
                .bind(&self.email),
            Field::input("date", "Preferred Date", InputKind::Date)
                .required()
                .min(today.format("%Y-%m-%d").to_string())
                .bind(&self.date),
            Field::select::<TimeSlot>("time", "Preferred Time", "Select preferred time")
                .required()
                .bind(&self.time),
            Field::select::<VisitReason>("reason", "Reason for Visit", "Select reason for visit")
                .required()
                .bind(&self.reason),
            Field::textarea("notes", "Additional Notes", 3)
                .placeholder("Any specific concerns or requirements...")
                .bind(&self.notes),
        ]
        .into_iter()
        .map(|field| field.with_errors(errors))
        .collect()
    }

    fn page(shell: PageShell, form: FormView<Self>) -> Response {
        AppointmentTemplate {
            shell,
            form,
            services: SERVICES,
            why_us: WHY_US,
        }
        .into_response()
    }
}

/// Display the booking page.
#[instrument(skip(state, visitor, shell))]
pub async fn show(
    State(state): State<AppState>,
    visitor: Visitor,
    shell: PageShell,
) -> Response {
    forms::show::<AppointmentDraft>(&state, &visitor, shell)
}

/// Book an appointment.
#[instrument(skip_all)]
pub async fn submit(
    State(state): State<AppState>,
    visitor: Visitor,
    shell: PageShell,
    Query(return_to): Query<ReturnTo>,
    Form(draft): Form<AppointmentDraft>,
) -> Result<Response> {
    forms::submit(&state, &visitor, shell, &return_to, draft).await
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use pareena_core::forms::{FieldError, LeadForm};

    use super::*;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 10, 16).unwrap()
    }

    #[test]
    fn test_fields_follow_draft_order() {
        let names: Vec<_> = AppointmentDraft::default()
            .fields(&FieldErrors::default(), today())
            .iter()
            .map(Field::name)
            .collect();
        assert_eq!(names, ["name", "phone", "email", "date", "time", "reason", "notes"]);
    }

    #[test]
    fn test_rejected_draft_keeps_values_and_messages() {
        let draft = AppointmentDraft {
            name: "Vikram Singh".to_string(),
            date: "2026-10-01".to_string(),
            ..Default::default()
        };
        let errors = draft.validate(today()).unwrap_err();
        let fields = draft.fields(&errors, today());

        let Field::Text(name) = &fields[0] else {
            panic!("expected the name input");
        };
        assert_eq!(name.value, "Vikram Singh");
        assert!(name.error.is_none());

        let Field::Text(date) = &fields[3] else {
            panic!("expected the date input");
        };
        assert_eq!(date.min.as_deref(), Some("2026-10-16"));
        assert_eq!(date.error, Some(FieldError::DateInPast.to_string()));
    }

    #[test]
    fn test_slot_labels_for_confirmation() {
        assert_eq!(TimeSlot::Seven.label(), "7:00 PM");
    }
}
