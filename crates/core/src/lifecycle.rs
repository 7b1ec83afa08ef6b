//! Lead form lifecycle.
//!
//! ```text
//! Idle(draft) --begin--> Submitting --complete--> Submitted --(display window)--> Idle(empty)
//!                            |
//!                            +--fail--> Failed(draft kept) --begin--> Submitting
//! ```
//!
//! The machine holds timestamps, not timers: [`FormLifecycle::refresh`] applies
//! the automatic `Submitted -> Idle` reset once the display window has passed.

use chrono::{DateTime, TimeDelta, Utc};
use serde::{Deserialize, Serialize};

use crate::forms::LeadForm;

/// Where a form is in its lifecycle.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "phase", rename_all = "snake_case")]
pub enum Phase<R> {
    Idle,
    Submitting { since: DateTime<Utc> },
    Submitted { at: DateTime<Utc>, request: R },
    Failed { at: DateTime<Utc>, reason: String },
}

/// Rejected transition.
#[derive(thiserror::Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum LifecycleError {
    #[error("a submission is already in progress")]
    InFlight,
    #[error("the previous submission is still being confirmed")]
    AwaitingReset,
    #[error("no submission is in progress")]
    NotSubmitting,
}

/// The state of one lead form for one visitor.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(bound = "")]
pub struct FormLifecycle<F: LeadForm> {
    draft: F,
    phase: Phase<F::Request>,
}

impl<F: LeadForm> Default for FormLifecycle<F> {
    fn default() -> Self {
        Self::new()
    }
}

impl<F: LeadForm> FormLifecycle<F> {
    /// An idle form with empty fields.
    #[must_use]
    pub fn new() -> Self {
        Self {
            draft: F::default(),
            phase: Phase::Idle,
        }
    }

    /// Current field values.
    #[must_use]
    pub const fn draft(&self) -> &F {
        &self.draft
    }

    #[must_use]
    pub const fn phase(&self) -> &Phase<F::Request> {
        &self.phase
    }

    /// Whether the submit control is enabled.
    #[must_use]
    pub const fn accepts_submit(&self) -> bool {
        matches!(self.phase, Phase::Idle | Phase::Failed { .. })
    }

    /// Apply the timed `Submitted -> Idle` reset. Returns true if it fired.
    ///
    /// Fields are cleared here, not when the submission completes.
    pub fn refresh(&mut self, now: DateTime<Utc>) -> bool {
        if self.display_remaining(now) == Some(TimeDelta::zero()) {
            *self = Self::new();
            return true;
        }
        false
    }

    /// Time left before the confirmation gives way to an empty form.
    ///
    /// `None` unless the form is `Submitted`.
    #[must_use]
    pub fn display_remaining(&self, now: DateTime<Utc>) -> Option<TimeDelta> {
        let Phase::Submitted { at, .. } = &self.phase else {
            return None;
        };
        let ends = *at + F::KIND.timings().display_window;
        Some((ends - now).max(TimeDelta::zero()))
    }

    /// Keep the visitor's values without submitting (used after a failed validation).
    pub fn edit(&mut self, draft: F) {
        if self.accepts_submit() {
            self.draft = draft;
        }
    }

    /// `Idle|Failed -> Submitting`.
    ///
    /// # Errors
    ///
    /// Fails if a submission is in flight or its confirmation is showing.
    pub fn begin(&mut self, draft: F, now: DateTime<Utc>) -> Result<(), LifecycleError> {
        match self.phase {
            Phase::Idle | Phase::Failed { .. } => {
                self.draft = draft;
                self.phase = Phase::Submitting { since: now };
                Ok(())
            }
            Phase::Submitting { .. } => Err(LifecycleError::InFlight),
            Phase::Submitted { .. } => Err(LifecycleError::AwaitingReset),
        }
    }

    /// `Submitting -> Submitted`.
    ///
    /// # Errors
    ///
    /// Fails unless a submission is in flight.
    pub fn complete(&mut self, request: F::Request, now: DateTime<Utc>) -> Result<(), LifecycleError> {
        if !matches!(self.phase, Phase::Submitting { .. }) {
            return Err(LifecycleError::NotSubmitting);
        }
        self.phase = Phase::Submitted { at: now, request };
        Ok(())
    }

    /// `Submitting -> Failed`. The draft is kept so the visitor can retry.
    ///
    /// # Errors
    ///
    /// Fails unless a submission is in flight.
    pub fn fail(&mut self, reason: impl Into<String>, now: DateTime<Utc>) -> Result<(), LifecycleError> {
        if !matches!(self.phase, Phase::Submitting { .. }) {
            return Err(LifecycleError::NotSubmitting);
        }
        self.phase = Phase::Failed {
            at: now,
            reason: reason.into(),
        };
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use chrono::TimeZone;

    use super::*;
    use crate::forms::{AppointmentDraft, CallbackDraft, CallbackRequest, CallConcern};
    use crate::types::Phone;

    fn t0() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 10, 16, 4, 30, 0).unwrap()
    }

    fn callback() -> (CallbackDraft, CallbackRequest) {
        let draft = CallbackDraft {
            name: "Vikram".to_string(),
            phone: "9963006059".to_string(),
            issue: "eye-strain".to_string(),
        };
        let request = CallbackRequest {
            name: "Vikram".to_string(),
            phone: Phone::parse("9963006059").unwrap(),
            issue: CallConcern::EyeStrain,
        };
        (draft, request)
    }

    #[test]
    fn test_full_cycle_clears_fields_only_after_window() {
        let (draft, request) = callback();
        let mut form = FormLifecycle::<CallbackDraft>::new();
        assert!(form.accepts_submit());

        form.begin(draft.clone(), t0()).unwrap();
        assert!(!form.accepts_submit(), "submit is disabled while submitting");

        let done = t0() + TimeDelta::milliseconds(1500);
        form.complete(request, done).unwrap();
        assert!(matches!(form.phase(), Phase::Submitted { .. }));
        assert_eq!(form.draft(), &draft, "fields survive until the reset");

        assert!(!form.refresh(done + TimeDelta::milliseconds(2999)));
        assert_eq!(
            form.display_remaining(done + TimeDelta::seconds(2)),
            Some(TimeDelta::seconds(1))
        );

        assert!(form.refresh(done + TimeDelta::seconds(3)));
        assert_eq!(form.phase(), &Phase::Idle);
        assert_eq!(form.draft(), &CallbackDraft::default());
    }

    #[test]
    fn test_appointment_window_is_five_seconds() {
        let mut form = FormLifecycle::<AppointmentDraft>::new();
        form.begin(AppointmentDraft::default(), t0()).unwrap();
        let request = crate::forms::AppointmentRequest {
            name: "Lakshmi".to_string(),
            phone: Phone::parse("9963006059").unwrap(),
            email: None,
            date: t0().date_naive(),
            time: crate::forms::TimeSlot::Ten,
            reason: crate::forms::VisitReason::FollowUp,
            notes: None,
        };
        form.complete(request, t0()).unwrap();
        assert!(!form.refresh(t0() + TimeDelta::seconds(4)));
        assert!(form.refresh(t0() + TimeDelta::seconds(5)));
    }

    #[test]
    fn test_no_concurrent_submissions() {
        let (draft, request) = callback();
        let mut form = FormLifecycle::<CallbackDraft>::new();
        form.begin(draft.clone(), t0()).unwrap();
        assert_eq!(form.begin(draft.clone(), t0()), Err(LifecycleError::InFlight));

        form.complete(request, t0()).unwrap();
        assert_eq!(form.begin(draft, t0()), Err(LifecycleError::AwaitingReset));
    }

    #[test]
    fn test_failure_keeps_draft_and_allows_retry() {
        let (draft, request) = callback();
        let mut form = FormLifecycle::<CallbackDraft>::new();
        form.begin(draft.clone(), t0()).unwrap();
        form.fail("desk unavailable", t0()).unwrap();

        assert!(form.accepts_submit());
        assert_eq!(form.draft(), &draft);
        assert!(!form.refresh(t0() + TimeDelta::hours(1)), "failures never auto-reset");

        form.begin(draft, t0()).unwrap();
        form.complete(request, t0()).unwrap();
        assert!(matches!(form.phase(), Phase::Submitted { .. }));
    }

    #[test]
    fn test_complete_requires_submitting() {
        let (_, request) = callback();
        let mut form = FormLifecycle::<CallbackDraft>::new();
        assert_eq!(form.complete(request, t0()), Err(LifecycleError::NotSubmitting));
        assert_eq!(form.fail("x", t0()), Err(LifecycleError::NotSubmitting));
    }

    #[test]
    fn test_serde_roundtrip_keeps_phase() {
        let (draft, request) = callback();
        let mut form = FormLifecycle::<CallbackDraft>::new();
        form.begin(draft, t0()).unwrap();
        form.complete(request, t0()).unwrap();

        let json = serde_json::to_value(&form).unwrap();
        assert_eq!(json["phase"]["phase"], "submitted");
        let restored: FormLifecycle<CallbackDraft> = serde_json::from_value(json).unwrap();
        assert_eq!(restored.phase(), form.phase());
    }
}
