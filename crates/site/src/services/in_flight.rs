//! One submission in flight per form per visitor.
//!
//! Session writes only land when a response finishes, so a second request
//! from the same visitor cannot see that the first one is still waiting on the
//! lead desk. This registry is the shared, in-process record of that. A slot
//! is held by an [`InFlightGuard`] and freed when the guard drops, which also
//! happens when the request future is cancelled.

use std::collections::HashSet;
use std::sync::{Arc, Mutex, PoisonError};

use uuid::Uuid;

use pareena_core::forms::FormKind;

type Slot = (Uuid, FormKind);

/// Registry of submissions currently waiting on the lead desk.
#[derive(Debug, Clone, Default)]
pub struct InFlight {
    slots: Arc<Mutex<HashSet<Slot>>>,
}

impl InFlight {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Claim the slot for `(visitor, kind)`.
    ///
    /// Returns `None` if a submission already holds it.
    #[must_use]
    pub fn acquire(&self, visitor: Uuid, kind: FormKind) -> Option<InFlightGuard> {
        let inserted = self
            .slots
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .insert((visitor, kind));
        inserted.then(|| InFlightGuard {
            slots: Arc::clone(&self.slots),
            slot: (visitor, kind),
        })
    }

    /// Whether a submission for `(visitor, kind)` is waiting on the desk.
    #[must_use]
    pub fn is_active(&self, visitor: Uuid, kind: FormKind) -> bool {
        self.slots
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .contains(&(visitor, kind))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.slots.lock().unwrap_or_else(PoisonError::into_inner).len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Holds an in-flight slot until dropped.
#[derive(Debug)]
pub struct InFlightGuard {
    slots: Arc<Mutex<HashSet<Slot>>>,
    slot: Slot,
}

impl Drop for InFlightGuard {
    fn drop(&mut self) {
        self.slots
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(&self.slot);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_second_acquire_is_refused() {
        let registry = InFlight::new();
        let visitor = Uuid::new_v4();

        let guard = registry.acquire(visitor, FormKind::Appointment);
        assert!(guard.is_some());
        assert!(registry.is_active(visitor, FormKind::Appointment));
        assert!(registry.acquire(visitor, FormKind::Appointment).is_none());

        drop(guard);
        assert!(!registry.is_active(visitor, FormKind::Appointment));
        assert!(registry.acquire(visitor, FormKind::Appointment).is_some());
    }

    #[test]
    fn test_slots_are_per_visitor_and_form() {
        let registry = InFlight::new();
        let (a, b) = (Uuid::new_v4(), Uuid::new_v4());

        let _first = registry.acquire(a, FormKind::Callback);
        let other_form = registry.acquire(a, FormKind::Contact);
        let other_visitor = registry.acquire(b, FormKind::Callback);

        assert!(other_form.is_some());
        assert!(other_visitor.is_some());
        assert_eq!(registry.len(), 3);
    }

    #[tokio::test]
    async fn test_cancelled_future_releases_slot() {
        let registry = InFlight::new();
        let visitor = Uuid::new_v4();

        let task = {
            let registry = registry.clone();
            tokio::spawn(async move {
                let _guard = registry.acquire(visitor, FormKind::Contact);
                std::future::pending::<()>().await;
            })
        };
        tokio::task::yield_now().await;
        while !registry.is_active(visitor, FormKind::Contact) {
            tokio::task::yield_now().await;
        }

        task.abort();
        let _ = task.await;
        assert!(registry.is_empty());
    }
}
