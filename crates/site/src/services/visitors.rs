//! Per-visitor state, updated in place.
//!
//! tower-sessions loads a session record when a request starts and writes the
//! whole record back when it ends. Two overlapping requests from one visitor
//! would each write back their own copy, so the later one silently undoes the
//! earlier. The session therefore carries only the visitor ID, and everything
//! that changes (form lifecycles, carousel, cart) lives here, keyed by that ID.
//!
//! Each record sits behind its own mutex, held only for the duration of a
//! closure and never across an `.await`. Records idle out on the same
//! schedule as the session cookie.

use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;

use moka::sync::Cache;
use uuid::Uuid;

use pareena_core::carousel::Carousel;
use pareena_core::forms::{AppointmentDraft, CallbackDraft, ContactDraft, LeadForm};
use pareena_core::lifecycle::FormLifecycle;

/// Most visitors held at once; the least recently active are evicted first.
const MAX_VISITORS: u64 = 100_000;

/// Everything one visitor has accumulated.
#[derive(Debug, Default)]
pub struct VisitorRecord {
    /// Items added to the cart.
    pub cart_count: u32,
    /// Testimonial carousel, created on first view.
    pub carousel: Option<Carousel>,
    appointment: FormLifecycle<AppointmentDraft>,
    callback: FormLifecycle<CallbackDraft>,
    contact: FormLifecycle<ContactDraft>,
}

impl VisitorRecord {
    /// The visitor's lifecycle for form `F`.
    pub fn form<F: StoredForm>(&mut self) -> &mut FormLifecycle<F> {
        F::slot(self)
    }
}

/// A lead form with a slot in [`VisitorRecord`].
pub trait StoredForm: LeadForm {
    fn slot(record: &mut VisitorRecord) -> &mut FormLifecycle<Self>;
}

impl StoredForm for AppointmentDraft {
    fn slot(record: &mut VisitorRecord) -> &mut FormLifecycle<Self> {
        &mut record.appointment
    }
}

impl StoredForm for CallbackDraft {
    fn slot(record: &mut VisitorRecord) -> &mut FormLifecycle<Self> {
        &mut record.callback
    }
}

impl StoredForm for ContactDraft {
    fn slot(record: &mut VisitorRecord) -> &mut FormLifecycle<Self> {
        &mut record.contact
    }
}

/// Visitor records by visitor ID.
#[derive(Clone)]
pub struct VisitorStore {
    records: Cache<Uuid, Arc<Mutex<VisitorRecord>>>,
}

impl VisitorStore {
    /// A store whose records expire after `idle` without access.
    #[must_use]
    pub fn new(idle: Duration) -> Self {
        Self {
            records: Cache::builder()
                .max_capacity(MAX_VISITORS)
                .time_to_idle(idle)
                .build(),
        }
    }

    /// Run `f` against the visitor's record, creating an empty one if needed.
    ///
    /// Changes are visible to every later call as soon as `f` returns.
    pub fn update<T>(&self, visitor: Uuid, f: impl FnOnce(&mut VisitorRecord) -> T) -> T {
        let record = self
            .records
            .get_with(visitor, || Arc::new(Mutex::new(VisitorRecord::default())));
        let mut record = record.lock().unwrap_or_else(PoisonError::into_inner);
        f(&mut record)
    }

    /// Items in the visitor's cart. Does not create a record.
    #[must_use]
    pub fn cart_count(&self, visitor: Uuid) -> u32 {
        self.records.get(&visitor).map_or(0, |record| {
            record.lock().unwrap_or_else(PoisonError::into_inner).cart_count
        })
    }

    /// Visitors currently held.
    #[must_use]
    pub fn len(&self) -> u64 {
        self.records.run_pending_tasks();
        self.records.entry_count()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl std::fmt::Debug for VisitorStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("VisitorStore")
            .field("entries", &self.records.entry_count())
            .finish()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use chrono::{TimeZone, Utc};
    use pareena_core::lifecycle::Phase;

    use super::*;

    fn store() -> VisitorStore {
        VisitorStore::new(Duration::from_secs(60))
    }

    #[test]
    fn test_updates_are_seen_by_later_calls() {
        let store = store();
        let visitor = Uuid::new_v4();
        assert_eq!(store.cart_count(visitor), 0);

        store.update(visitor, |record| record.cart_count += 2);
        assert_eq!(store.cart_count(visitor), 2);
        assert_eq!(store.cart_count(Uuid::new_v4()), 0, "visitors are separate");
    }

    #[test]
    fn test_cart_count_does_not_create_records() {
        let store = store();
        assert_eq!(store.cart_count(Uuid::new_v4()), 0);
        assert!(store.is_empty());
    }

    #[test]
    fn test_forms_have_separate_slots() {
        let store = store();
        let visitor = Uuid::new_v4();
        let now = Utc.with_ymd_and_hms(2026, 10, 16, 4, 30, 0).unwrap();

        store.update(visitor, |record| {
            record
                .form::<ContactDraft>()
                .begin(ContactDraft::default(), now)
                .unwrap();
        });

        store.update(visitor, |record| {
            assert!(matches!(
                record.form::<ContactDraft>().phase(),
                Phase::Submitting { .. }
            ));
            assert!(matches!(record.form::<CallbackDraft>().phase(), Phase::Idle));
            assert!(matches!(record.form::<AppointmentDraft>().phase(), Phase::Idle));
        });
    }
}
