//! Integration tests for the Pareena Eye Care site.
//!
//! The site is driven in process through [`tower::ServiceExt::oneshot`], so no
//! server or network is needed:
//!
//! ```bash
//! cargo test -p pareena-integration-tests
//! ```
//!
//! [`TestApp`] carries one visitor's session cookie between requests and
//! sends a forwarded address unique to that visitor, so the rate limiter on
//! the lead forms never couples two tests. Time is a [`ManualClock`] and the
//! lead desk is chosen per test.

#![allow(clippy::missing_panics_doc, clippy::unwrap_used)]

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicU32, Ordering};

use axum::Router;
use axum::body::{Body, to_bytes};
use axum::http::{HeaderMap, Request, StatusCode, header};
use chrono::{DateTime, TimeDelta, TimeZone, Utc};
use tokio::sync::Notify;
use tower::ServiceExt;
use url::Url;

use pareena_core::forms::Lead;
use pareena_site::clock::ManualClock;
use pareena_site::config::SiteConfig;
use pareena_site::services::{LeadDesk, LeadError, LeadFuture, Receipt};
use pareena_site::state::AppState;

pub use pareena_site::routes::forms::FAILURE_MESSAGE;

/// Friday 16 October 2026, 10:00 in Hyderabad.
#[must_use]
pub fn start_time() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 10, 16, 4, 30, 0).unwrap()
}

static NEXT_VISITOR: AtomicU32 = AtomicU32::new(1);

fn next_forwarded_for() -> String {
    let n = NEXT_VISITOR.fetch_add(1, Ordering::Relaxed);
    format!("203.0.{}.{}", (n >> 8) & 0xff, n & 0xff)
}

// =============================================================================
// Lead desks
// =============================================================================

/// Accepts every lead immediately.
#[derive(Debug, Default)]
pub struct InstantDesk;

impl LeadDesk for InstantDesk {
    fn submit<'a>(&'a self, lead: &'a Lead) -> LeadFuture<'a, Receipt> {
        Box::pin(async move { Ok(Receipt::new(lead.kind(), Utc::now())) })
    }
}

/// Fails while `failing` is set, accepts otherwise.
#[derive(Debug)]
pub struct FlakyDesk {
    pub failing: AtomicBool,
}

impl FlakyDesk {
    #[must_use]
    pub const fn failing() -> Self {
        Self {
            failing: AtomicBool::new(true),
        }
    }

    pub fn recover(&self) {
        self.failing.store(false, Ordering::SeqCst);
    }
}

impl LeadDesk for FlakyDesk {
    fn submit<'a>(&'a self, lead: &'a Lead) -> LeadFuture<'a, Receipt> {
        Box::pin(async move {
            if self.failing.load(Ordering::SeqCst) {
                Err(LeadError::Unavailable("connection refused".to_string()))
            } else {
                Ok(Receipt::new(lead.kind(), Utc::now()))
            }
        })
    }

    fn check(&self) -> LeadFuture<'_, ()> {
        Box::pin(async move {
            if self.failing.load(Ordering::SeqCst) {
                Err(LeadError::Unavailable("connection refused".to_string()))
            } else {
                Ok(())
            }
        })
    }
}

/// Holds every submission until the test opens the gate.
#[derive(Debug, Default)]
pub struct GatedDesk {
    /// Signalled when a submission reaches the desk.
    pub entered: Notify,
    /// Signalled by the test to let the submission through.
    pub release: Notify,
}

impl LeadDesk for GatedDesk {
    fn submit<'a>(&'a self, lead: &'a Lead) -> LeadFuture<'a, Receipt> {
        Box::pin(async move {
            self.entered.notify_one();
            self.release.notified().await;
            Ok(Receipt::new(lead.kind(), Utc::now()))
        })
    }
}

// =============================================================================
// Harness
// =============================================================================

/// A buffered response.
#[derive(Debug)]
pub struct TestResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: String,
}

impl TestResponse {
    /// Value of a header as a string.
    #[must_use]
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).and_then(|v| v.to_str().ok())
    }

    #[must_use]
    pub fn location(&self) -> Option<&str> {
        self.header("location")
    }
}

/// The site plus one visitor.
#[derive(Clone)]
pub struct TestApp {
    pub router: Router,
    pub clock: Arc<ManualClock>,
    cookie: Option<String>,
    forwarded_for: String,
}

impl TestApp {
    /// The site with a lead desk that answers at once.
    #[must_use]
    pub fn new() -> Self {
        Self::with_desk(Arc::new(InstantDesk))
    }

    #[must_use]
    pub fn with_desk(desk: Arc<dyn LeadDesk>) -> Self {
        let config = SiteConfig::local(Url::parse("http://localhost:3000").unwrap());
        let clock = Arc::new(ManualClock::new(start_time()));
        let state = AppState::with_services(config, desk, clock.clone()).unwrap();

        Self {
            router: pareena_site::app(state),
            clock,
            cookie: None,
            forwarded_for: next_forwarded_for(),
        }
    }

    /// A second visitor on the same site: no cookie, own address.
    #[must_use]
    pub fn other_visitor(&self) -> Self {
        Self {
            router: self.router.clone(),
            clock: Arc::clone(&self.clock),
            cookie: None,
            forwarded_for: next_forwarded_for(),
        }
    }

    pub fn advance(&self, by: TimeDelta) {
        self.clock.advance(by);
    }

    pub async fn get(&mut self, path: &str) -> TestResponse {
        self.send(self.request("GET", path).body(Body::empty()).unwrap())
            .await
    }

    /// `GET` as htmx sends it.
    pub async fn hx_get(&mut self, path: &str) -> TestResponse {
        let request = self
            .request("GET", path)
            .header("hx-request", "true")
            .body(Body::empty())
            .unwrap();
        self.send(request).await
    }

    pub async fn post_form(&mut self, path: &str, fields: &[(&str, &str)]) -> TestResponse {
        let request = self.form_request(path).body(encode(fields)).unwrap();
        self.send(request).await
    }

    /// Form `POST` as htmx sends it.
    pub async fn hx_post_form(&mut self, path: &str, fields: &[(&str, &str)]) -> TestResponse {
        let request = self
            .form_request(path)
            .header("hx-request", "true")
            .body(encode(fields))
            .unwrap();
        self.send(request).await
    }

    fn form_request(&self, path: &str) -> axum::http::request::Builder {
        self.request("POST", path)
            .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
    }

    fn request(&self, method: &str, path: &str) -> axum::http::request::Builder {
        let mut builder = Request::builder()
            .method(method)
            .uri(path)
            .header("x-forwarded-for", &self.forwarded_for);
        if let Some(cookie) = &self.cookie {
            builder = builder.header(header::COOKIE, cookie);
        }
        builder
    }

    async fn send(&mut self, request: Request<Body>) -> TestResponse {
        let response = self.router.clone().oneshot(request).await.unwrap();

        if let Some(set_cookie) = response
            .headers()
            .get(header::SET_COOKIE)
            .and_then(|v| v.to_str().ok())
            && let Some(pair) = set_cookie.split(';').next()
        {
            self.cookie = Some(pair.to_string());
        }

        let status = response.status();
        let headers = response.headers().clone();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();

        TestResponse {
            status,
            headers,
            body: String::from_utf8_lossy(&bytes).into_owned(),
        }
    }
}

impl Default for TestApp {
    fn default() -> Self {
        Self::new()
    }
}

fn encode(fields: &[(&str, &str)]) -> Body {
    let body = url::form_urlencoded::Serializer::new(String::new())
        .extend_pairs(fields)
        .finish();
    Body::from(body)
}

// =============================================================================
// Form values
// =============================================================================

/// A complete callback request.
pub const CALLBACK: [(&str, &str); 3] = [
    ("name", "Rajesh Kumar"),
    ("phone", "+91 99630 06059"),
    ("issue", "dry-eyes"),
];

/// A complete appointment four days after [`start_time`].
pub const APPOINTMENT: [(&str, &str); 7] = [
    ("name", "Priya Sharma"),
    ("phone", "9963006059"),
    ("email", "priya@example.com"),
    ("date", "2026-10-20"),
    ("time", "11:00"),
    ("reason", "eye-exam"),
    ("notes", ""),
];

/// A complete contact message.
pub const CONTACT: [(&str, &str); 5] = [
    ("name", "Anitha Reddy"),
    ("phone", "9963006059"),
    ("email", "anitha@example.com"),
    ("subject", "Opening hours"),
    ("message", "Are you open on public holidays?"),
];
