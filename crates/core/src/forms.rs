//! Lead forms: drafts, choice lists, validation and typed requests.
//!
//! A draft holds the raw strings a visitor typed. [`LeadForm::validate`]
//! turns it into a typed request or a set of per-field errors, following the
//! same rules a browser applies to `required`, `type=email`, `type=tel` and
//! `type=date` controls.

use std::collections::BTreeMap;
use std::fmt::Debug;

use chrono::{NaiveDate, TimeDelta};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::types::{Email, Phone};

/// Which of the three lead forms.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FormKind {
    Appointment,
    Callback,
    Contact,
}

/// Simulated request latency and confirmation display window for a form.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FormTimings {
    pub latency: std::time::Duration,
    pub display_window: TimeDelta,
}

impl FormKind {
    pub const ALL: [Self; 3] = [Self::Appointment, Self::Callback, Self::Contact];

    #[must_use]
    pub const fn slug(self) -> &'static str {
        match self {
            Self::Appointment => "appointment",
            Self::Callback => "callback",
            Self::Contact => "contact",
        }
    }

    #[must_use]
    pub fn timings(self) -> FormTimings {
        let (latency_ms, display_secs) = match self {
            Self::Appointment => (2000, 5),
            Self::Callback => (1500, 3),
            Self::Contact => (2000, 3),
        };
        FormTimings {
            latency: std::time::Duration::from_millis(latency_ms),
            display_window: TimeDelta::seconds(display_secs),
        }
    }
}

// =============================================================================
// Choice lists
// =============================================================================

/// A fixed set of `<select>` options.
pub trait Choice: Copy + Eq + 'static {
    /// All options in display order.
    const ALL: &'static [Self];

    /// Submitted value.
    fn value(self) -> &'static str;

    /// Visible label.
    fn label(self) -> &'static str;

    /// Match a submitted value.
    fn from_value(value: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|c| c.value() == value.trim())
    }
}

macro_rules! choice_enum {
    ($(#[$meta:meta])* $name:ident { $($variant:ident => ($value:literal, $label:literal)),+ $(,)? }) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        pub enum $name {
            $($variant),+
        }

        impl Choice for $name {
            const ALL: &'static [Self] = &[$(Self::$variant),+];

            fn value(self) -> &'static str {
                match self {
                    $(Self::$variant => $value),+
                }
            }

            fn label(self) -> &'static str {
                match self {
                    $(Self::$variant => $label),+
                }
            }
        }
    };
}

choice_enum! {
    /// Appointment slots. The clinic closes for lunch at 1 PM.
    TimeSlot {
        Nine => ("09:00", "9:00 AM"),
        Ten => ("10:00", "10:00 AM"),
        Eleven => ("11:00", "11:00 AM"),
        Noon => ("12:00", "12:00 PM"),
        Two => ("14:00", "2:00 PM"),
        Three => ("15:00", "3:00 PM"),
        Four => ("16:00", "4:00 PM"),
        Five => ("17:00", "5:00 PM"),
        Six => ("18:00", "6:00 PM"),
        Seven => ("19:00", "7:00 PM"),
    }
}

choice_enum! {
    /// Reason for an appointment.
    VisitReason {
        EyeExam => ("eye-exam", "Comprehensive Eye Exam"),
        PrescriptionUpdate => ("prescription-update", "Prescription Update"),
        ContactLensFitting => ("contact-lens-fitting", "Contact Lens Fitting"),
        FrameSelection => ("frame-selection", "Frame Selection"),
        EyeProblem => ("eye-problem", "Eye Problem/Concern"),
        FollowUp => ("follow-up", "Follow-up Visit"),
        Other => ("other", "Other"),
    }
}

choice_enum! {
    /// What is bothering a visitor who asks for a callback.
    CallConcern {
        EyeStrain => ("eye-strain", "Eye Strain"),
        DryEyes => ("dry-eyes", "Dry Eyes"),
        BlurryVision => ("blurry-vision", "Blurry Vision"),
        Headaches => ("headaches", "Frequent Headaches"),
        PrescriptionUpdate => ("prescription-update", "Prescription Update"),
        ContactLens => ("contact-lens", "Contact Lens Issues"),
        Other => ("other", "Other Concerns"),
    }
}

// =============================================================================
// Field errors
// =============================================================================

/// Why a single field was rejected.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum FieldError {
    #[error("This field is required.")]
    Required,
    #[error("Please enter a valid email address.")]
    InvalidEmail,
    #[error("Please enter a valid phone number.")]
    InvalidPhone,
    #[error("Please enter a valid date.")]
    InvalidDate,
    #[error("Please choose today or a later date.")]
    DateInPast,
    #[error("Please choose one of the listed options.")]
    UnknownOption,
}

/// Field name to error, in a stable order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldErrors(BTreeMap<&'static str, FieldError>);

impl FieldErrors {
    pub fn insert(&mut self, field: &'static str, error: FieldError) {
        self.0.insert(field, error);
    }

    #[must_use]
    pub fn get(&self, field: &str) -> Option<&FieldError> {
        self.0.get(field)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&'static str, &FieldError)> {
        self.0.iter().map(|(k, v)| (*k, v))
    }

    fn into_result<T>(self, value: Option<T>) -> Result<T, Self> {
        match value {
            Some(value) if self.is_empty() => Ok(value),
            _ => Err(self),
        }
    }
}

/// Collects errors while a draft is checked field by field.
#[derive(Default)]
struct Checker {
    errors: FieldErrors,
}

impl Checker {
    fn required(&mut self, field: &'static str, value: &str) -> Option<String> {
        let value = value.trim();
        if value.is_empty() {
            self.errors.insert(field, FieldError::Required);
            None
        } else {
            Some(value.to_string())
        }
    }

    fn optional(value: &str) -> Option<String> {
        let value = value.trim();
        (!value.is_empty()).then(|| value.to_string())
    }

    fn phone(&mut self, field: &'static str, value: &str) -> Option<Phone> {
        let raw = self.required(field, value)?;
        Phone::parse(&raw)
            .map_err(|_| self.errors.insert(field, FieldError::InvalidPhone))
            .ok()
    }

    fn email(&mut self, field: &'static str, value: &str) -> Option<Email> {
        let raw = self.required(field, value)?;
        self.email_value(field, &raw)
    }

    fn optional_email(&mut self, field: &'static str, value: &str) -> Result<Option<Email>, ()> {
        match Self::optional(value) {
            None => Ok(None),
            Some(raw) => self.email_value(field, &raw).map(Some).ok_or(()),
        }
    }

    fn email_value(&mut self, field: &'static str, raw: &str) -> Option<Email> {
        Email::parse(raw)
            .map_err(|_| self.errors.insert(field, FieldError::InvalidEmail))
            .ok()
    }

    fn choice<C: Choice>(&mut self, field: &'static str, value: &str) -> Option<C> {
        let raw = self.required(field, value)?;
        let choice = C::from_value(&raw);
        if choice.is_none() {
            self.errors.insert(field, FieldError::UnknownOption);
        }
        choice
    }

    fn date_from(&mut self, field: &'static str, value: &str, today: NaiveDate) -> Option<NaiveDate> {
        let raw = self.required(field, value)?;
        match NaiveDate::parse_from_str(&raw, "%Y-%m-%d") {
            Ok(date) if date < today => {
                self.errors.insert(field, FieldError::DateInPast);
                None
            }
            Ok(date) => Some(date),
            Err(_) => {
                self.errors.insert(field, FieldError::InvalidDate);
                None
            }
        }
    }
}

// =============================================================================
// Lead forms
// =============================================================================

/// A form whose submission captures customer intent.
pub trait LeadForm:
    Debug + Default + Clone + Serialize + DeserializeOwned + Send + Sync + 'static
{
    /// The validated request this form produces.
    type Request: Debug + Clone + Serialize + DeserializeOwned + Into<Lead> + Send + Sync + 'static;

    const KIND: FormKind;

    /// Check the draft against the form's rules.
    ///
    /// `today` is the clinic's local date, the earliest bookable day.
    ///
    /// # Errors
    ///
    /// Returns every failing field at once, keyed by field name.
    fn validate(&self, today: NaiveDate) -> Result<Self::Request, FieldErrors>;
}

/// Raw appointment form values.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppointmentDraft {
    pub name: String,
    pub phone: String,
    pub email: String,
    pub date: String,
    pub time: String,
    pub reason: String,
    pub notes: String,
}

/// A validated booking.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppointmentRequest {
    pub name: String,
    pub phone: Phone,
    pub email: Option<Email>,
    pub date: NaiveDate,
    pub time: TimeSlot,
    pub reason: VisitReason,
    pub notes: Option<String>,
}

impl LeadForm for AppointmentDraft {
    type Request = AppointmentRequest;
    const KIND: FormKind = FormKind::Appointment;

    fn validate(&self, today: NaiveDate) -> Result<AppointmentRequest, FieldErrors> {
        let mut check = Checker::default();
        let name = check.required("name", &self.name);
        let phone = check.phone("phone", &self.phone);
        let email = check.optional_email("email", &self.email);
        let date = check.date_from("date", &self.date, today);
        let time = check.choice::<TimeSlot>("time", &self.time);
        let reason = check.choice::<VisitReason>("reason", &self.reason);
        let notes = Checker::optional(&self.notes);

        let request = (|| {
            Some(AppointmentRequest {
                name: name?,
                phone: phone?,
                email: email.ok()?,
                date: date?,
                time: time?,
                reason: reason?,
                notes,
            })
        })();
        check.errors.into_result(request)
    }
}

/// Raw callback form values.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CallbackDraft {
    pub name: String,
    pub phone: String,
    pub issue: String,
}

/// A validated callback request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CallbackRequest {
    pub name: String,
    pub phone: Phone,
    pub issue: CallConcern,
}

impl LeadForm for CallbackDraft {
    type Request = CallbackRequest;
    const KIND: FormKind = FormKind::Callback;

    fn validate(&self, _today: NaiveDate) -> Result<CallbackRequest, FieldErrors> {
        let mut check = Checker::default();
        let name = check.required("name", &self.name);
        let phone = check.phone("phone", &self.phone);
        let issue = check.choice::<CallConcern>("issue", &self.issue);

        let request = (|| {
            Some(CallbackRequest {
                name: name?,
                phone: phone?,
                issue: issue?,
            })
        })();
        check.errors.into_result(request)
    }
}

/// Raw contact form values.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ContactDraft {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub subject: String,
    pub message: String,
}

/// A validated contact message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactMessage {
    pub name: String,
    pub email: Email,
    pub phone: Phone,
    pub subject: String,
    pub message: String,
}

impl LeadForm for ContactDraft {
    type Request = ContactMessage;
    const KIND: FormKind = FormKind::Contact;

    fn validate(&self, _today: NaiveDate) -> Result<ContactMessage, FieldErrors> {
        let mut check = Checker::default();
        let name = check.required("name", &self.name);
        let email = check.email("email", &self.email);
        let phone = check.phone("phone", &self.phone);
        let subject = check.required("subject", &self.subject);
        let message = check.required("message", &self.message);

        let request = (|| {
            Some(ContactMessage {
                name: name?,
                email: email?,
                phone: phone?,
                subject: subject?,
                message: message?,
            })
        })();
        check.errors.into_result(request)
    }
}

/// Any validated lead, as handed to the lead desk.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Lead {
    Appointment(AppointmentRequest),
    Callback(CallbackRequest),
    Contact(ContactMessage),
}

impl Lead {
    #[must_use]
    pub const fn kind(&self) -> FormKind {
        match self {
            Self::Appointment(_) => FormKind::Appointment,
            Self::Callback(_) => FormKind::Callback,
            Self::Contact(_) => FormKind::Contact,
        }
    }
}

impl From<AppointmentRequest> for Lead {
    fn from(request: AppointmentRequest) -> Self {
        Self::Appointment(request)
    }
}

impl From<CallbackRequest> for Lead {
    fn from(request: CallbackRequest) -> Self {
        Self::Callback(request)
    }
}

impl From<ContactMessage> for Lead {
    fn from(message: ContactMessage) -> Self {
        Self::Contact(message)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 10, 16).unwrap()
    }

    fn appointment() -> AppointmentDraft {
        AppointmentDraft {
            name: " Priya Sharma ".to_string(),
            phone: "+91 98480 22338".to_string(),
            email: String::new(),
            date: "2026-10-20".to_string(),
            time: "14:00".to_string(),
            reason: "eye-exam".to_string(),
            notes: "   ".to_string(),
        }
    }

    #[test]
    fn test_appointment_valid() {
        let request = appointment().validate(today()).unwrap();
        assert_eq!(request.name, "Priya Sharma");
        assert_eq!(request.time, TimeSlot::Two);
        assert_eq!(request.time.label(), "2:00 PM");
        assert_eq!(request.reason, VisitReason::EyeExam);
        assert_eq!(request.email, None);
        assert_eq!(request.notes, None);
    }

    #[test]
    fn test_appointment_reports_every_missing_field() {
        let errors = AppointmentDraft::default().validate(today()).unwrap_err();
        for field in ["name", "phone", "date", "time", "reason"] {
            assert_eq!(errors.get(field), Some(&FieldError::Required), "{field}");
        }
        assert_eq!(errors.get("email"), None);
        assert_eq!(errors.get("notes"), None);
        assert_eq!(errors.len(), 5);
    }

    #[test]
    fn test_appointment_date_rules() {
        let mut draft = appointment();
        draft.date = "2026-10-15".to_string();
        let errors = draft.validate(today()).unwrap_err();
        assert_eq!(errors.get("date"), Some(&FieldError::DateInPast));

        draft.date = "2026-10-16".to_string();
        assert!(draft.validate(today()).is_ok(), "today is bookable");

        draft.date = "16/10/2026".to_string();
        let errors = draft.validate(today()).unwrap_err();
        assert_eq!(errors.get("date"), Some(&FieldError::InvalidDate));
    }

    #[test]
    fn test_appointment_optional_email_is_checked_when_present() {
        let mut draft = appointment();
        draft.email = "not-an-email".to_string();
        let errors = draft.validate(today()).unwrap_err();
        assert_eq!(errors.get("email"), Some(&FieldError::InvalidEmail));
        assert_eq!(errors.len(), 1);

        draft.email = "priya@example.com".to_string();
        let request = draft.validate(today()).unwrap();
        assert_eq!(request.email.unwrap().as_str(), "priya@example.com");
    }

    #[test]
    fn test_appointment_rejects_unknown_slot() {
        let mut draft = appointment();
        draft.time = "13:00".to_string();
        let errors = draft.validate(today()).unwrap_err();
        assert_eq!(errors.get("time"), Some(&FieldError::UnknownOption));
    }

    #[test]
    fn test_callback_validation() {
        let draft = CallbackDraft {
            name: "Rajesh".to_string(),
            phone: "9963006059".to_string(),
            issue: "dry-eyes".to_string(),
        };
        let request = draft.validate(today()).unwrap();
        assert_eq!(request.issue, CallConcern::DryEyes);

        let draft = CallbackDraft {
            phone: "call me".to_string(),
            ..Default::default()
        };
        let errors = draft.validate(today()).unwrap_err();
        assert_eq!(errors.get("name"), Some(&FieldError::Required));
        assert_eq!(errors.get("phone"), Some(&FieldError::InvalidPhone));
        assert_eq!(errors.get("issue"), Some(&FieldError::Required));
    }

    #[test]
    fn test_contact_requires_everything() {
        let errors = ContactDraft::default().validate(today()).unwrap_err();
        assert_eq!(errors.len(), 5);

        let draft = ContactDraft {
            name: "Anitha".to_string(),
            email: "anitha@example.com".to_string(),
            phone: "040 2374 1234".to_string(),
            subject: "Frames".to_string(),
            message: "Do you stock titanium frames?".to_string(),
        };
        let lead: Lead = draft.validate(today()).unwrap().into();
        assert_eq!(lead.kind(), FormKind::Contact);
    }

    #[test]
    fn test_choice_lists() {
        assert_eq!(TimeSlot::ALL.len(), 10);
        assert_eq!(VisitReason::ALL.len(), 7);
        assert_eq!(CallConcern::ALL.len(), 7);
        assert_eq!(CallConcern::from_value("headaches"), Some(CallConcern::Headaches));
        assert_eq!(TimeSlot::from_value("19:00").map(Choice::label), Some("7:00 PM"));
    }

    #[test]
    fn test_timings() {
        let appointment = FormKind::Appointment.timings();
        assert_eq!(appointment.latency.as_millis(), 2000);
        assert_eq!(appointment.display_window, TimeDelta::seconds(5));
        assert_eq!(FormKind::Callback.timings().latency.as_millis(), 1500);
        assert_eq!(FormKind::Callback.timings().display_window, TimeDelta::seconds(3));
        assert_eq!(FormKind::Contact.timings().display_window, TimeDelta::seconds(3));
    }
}
