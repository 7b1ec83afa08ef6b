//! Application state shared across handlers.

use std::sync::Arc;
use std::time::Duration;

use pareena_core::carousel::{Testimonial, testimonials};
use pareena_core::catalog::Catalog;

use crate::clock::{Clock, SystemClock};
use crate::config::SiteConfig;
use crate::content::{ContentError, ContentStore};
use crate::middleware::session::SESSION_EXPIRY_SECONDS;
use crate::services::{InFlight, LeadDesk, SimulatedDesk, VisitorStore};

/// Application state shared across all handlers.
///
/// This struct is cheaply cloneable via `Arc`. Everything in it is either
/// immutable after startup or internally synchronized.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: SiteConfig,
    catalog: Catalog,
    testimonials: Vec<Testimonial>,
    content: ContentStore,
    leads: Arc<dyn LeadDesk>,
    clock: Arc<dyn Clock>,
    in_flight: InFlight,
    visitors: VisitorStore,
}

impl AppState {
    /// Create the production state: simulated lead desk and the system clock.
    ///
    /// # Errors
    ///
    /// Returns an error if the content directory cannot be read.
    pub fn new(config: SiteConfig) -> Result<Self, ContentError> {
        let leads = Arc::new(SimulatedDesk::new(config.lead_latency_scale_percent));
        Self::with_services(config, leads, Arc::new(SystemClock))
    }

    /// Create state with a specific lead desk and clock.
    ///
    /// # Errors
    ///
    /// Returns an error if the content directory cannot be read.
    pub fn with_services(
        config: SiteConfig,
        leads: Arc<dyn LeadDesk>,
        clock: Arc<dyn Clock>,
    ) -> Result<Self, ContentError> {
        let content = ContentStore::load(&config.content_dir)?;

        Ok(Self {
            inner: Arc::new(AppStateInner {
                config,
                catalog: Catalog::sample(),
                testimonials: testimonials(),
                content,
                leads,
                clock,
                in_flight: InFlight::new(),
                visitors: VisitorStore::new(Duration::from_secs(
                    SESSION_EXPIRY_SECONDS.unsigned_abs(),
                )),
            }),
        })
    }

    /// Get a reference to the site configuration.
    #[must_use]
    pub fn config(&self) -> &SiteConfig {
        &self.inner.config
    }

    #[must_use]
    pub fn catalog(&self) -> &Catalog {
        &self.inner.catalog
    }

    #[must_use]
    pub fn testimonials(&self) -> &[Testimonial] {
        &self.inner.testimonials
    }

    /// Get a reference to the markdown content store.
    #[must_use]
    pub fn content(&self) -> &ContentStore {
        &self.inner.content
    }

    /// The desk lead forms are submitted to.
    #[must_use]
    pub fn leads(&self) -> &dyn LeadDesk {
        self.inner.leads.as_ref()
    }

    #[must_use]
    pub fn clock(&self) -> &dyn Clock {
        self.inner.clock.as_ref()
    }

    /// Registry of submissions currently waiting on the lead desk.
    #[must_use]
    pub fn in_flight(&self) -> &InFlight {
        &self.inner.in_flight
    }

    /// Mutable state for each visitor, keyed by visitor ID.
    #[must_use]
    pub fn visitors(&self) -> &VisitorStore {
        &self.inner.visitors
    }
}
