//! The lead desk: where validated form submissions are handed off.
//!
//! The clinic has no booking backend. [`SimulatedDesk`] stands in for one by
//! waiting for the form's fixed latency and then accepting the lead. The
//! [`LeadDesk`] trait keeps the request/response contract explicit so a real
//! integration, or a failing test double, can be dropped in.

use std::future::Future;
use std::pin::Pin;
use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::Serialize;
use thiserror::Error;
use uuid::Uuid;

use pareena_core::forms::{FormKind, Lead};

/// Lead desk failures.
#[derive(Debug, Clone, Error)]
pub enum LeadError {
    /// The desk could not be reached or timed out.
    #[error("lead desk unavailable: {0}")]
    Unavailable(String),

    /// The desk refused the lead.
    #[error("lead rejected: {0}")]
    Rejected(String),
}

/// Acknowledgement for an accepted lead.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Receipt {
    pub id: Uuid,
    pub kind: FormKind,
    pub accepted_at: DateTime<Utc>,
}

impl Receipt {
    #[must_use]
    pub fn new(kind: FormKind, accepted_at: DateTime<Utc>) -> Self {
        Self {
            id: Uuid::new_v4(),
            kind,
            accepted_at,
        }
    }
}

/// Boxed future returned by [`LeadDesk`] methods.
pub type LeadFuture<'a, T> = Pin<Box<dyn Future<Output = Result<T, LeadError>> + Send + 'a>>;

/// Accepts validated leads.
pub trait LeadDesk: Send + Sync + 'static {
    /// Hand a lead over. Dropping the future abandons the submission.
    fn submit<'a>(&'a self, lead: &'a Lead) -> LeadFuture<'a, Receipt>;

    /// Whether the desk can currently take leads.
    fn check(&self) -> LeadFuture<'_, ()> {
        Box::pin(async { Ok(()) })
    }
}

/// Accepts every lead after the form's configured latency.
#[derive(Debug, Clone)]
pub struct SimulatedDesk {
    scale_percent: u32,
}

impl Default for SimulatedDesk {
    fn default() -> Self {
        Self::new(100)
    }
}

impl SimulatedDesk {
    /// `scale_percent` stretches or shrinks every latency; 0 answers at once.
    #[must_use]
    pub const fn new(scale_percent: u32) -> Self {
        Self { scale_percent }
    }

    /// How long a lead of this kind takes to be accepted.
    #[must_use]
    pub fn latency(&self, kind: FormKind) -> Duration {
        kind.timings().latency * self.scale_percent / 100
    }
}

impl LeadDesk for SimulatedDesk {
    fn submit<'a>(&'a self, lead: &'a Lead) -> LeadFuture<'a, Receipt> {
        Box::pin(async move {
            let kind = lead.kind();
            tokio::time::sleep(self.latency(kind)).await;
            Ok(Receipt::new(kind, Utc::now()))
        })
    }
}
