//! Integration tests for the lead form lifecycle.
//!
//! Every form follows the same path: invalid input is re-rendered with `422`,
//! a valid draft goes to the lead desk and the visitor is redirected back to
//! see either the confirmation or the failure, and a confirmation clears
//! itself once its display window has passed.

#![allow(clippy::unwrap_used)]

use std::sync::Arc;

use axum::http::StatusCode;
use chrono::TimeDelta;

use pareena_integration_tests::{
    APPOINTMENT, CALLBACK, CONTACT, FlakyDesk, GatedDesk, TestApp,
};

// ============================================================================
// Validation
// ============================================================================

#[tokio::test]
async fn test_invalid_appointment_keeps_values() {
    let mut app = TestApp::new();
    app.get("/appointment").await;

    let resp = app
        .post_form(
            "/appointment",
            &[
                ("name", "Priya Sharma"),
                ("phone", "abc"),
                ("email", "not-an-email"),
                ("date", "2026-10-01"),
                ("time", "11:00"),
                ("reason", ""),
            ],
        )
        .await;

    assert_eq!(resp.status, StatusCode::UNPROCESSABLE_ENTITY);
    assert!(resp.body.contains(r#"value="Priya Sharma""#), "values survive");
    assert!(resp.body.contains("Please enter a valid phone number."));
    assert!(resp.body.contains("Please enter a valid email address."));
    assert!(resp.body.contains("Please choose today or a later date."));
    assert!(resp.body.contains("This field is required."));
    assert!(resp.body.contains(r#"<option value="11:00" selected>"#));

    // A reload shows the same values without the errors.
    let resp = app.get("/appointment").await;
    assert_eq!(resp.status, StatusCode::OK);
    assert!(resp.body.contains(r#"value="Priya Sharma""#));
    assert!(!resp.body.contains("This field is required."));
}

#[tokio::test]
async fn test_contact_requires_every_field() {
    let mut app = TestApp::new();
    let resp = app.post_form("/contact", &[("name", "Anitha Reddy")]).await;

    assert_eq!(resp.status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(resp.body.matches("This field is required.").count(), 4);
}

// ============================================================================
// Submission
// ============================================================================

#[tokio::test]
async fn test_callback_confirmation_then_reset() {
    let mut app = TestApp::new();
    app.get("/quick-call").await;

    let resp = app.post_form("/quick-call", &CALLBACK).await;
    assert_eq!(resp.status, StatusCode::SEE_OTHER);
    assert_eq!(resp.location(), Some("/quick-call"));

    let resp = app.get("/quick-call").await;
    assert_eq!(resp.status, StatusCode::OK);
    assert!(resp.body.contains("Request Submitted!"));
    assert!(resp.body.contains("Rajesh Kumar"));
    assert!(resp.body.contains("Dry Eyes"));
    assert_eq!(resp.header("refresh"), Some("3"));

    // The home page shares the callback form.
    let resp = app.get("/").await;
    assert!(resp.body.contains("Request Submitted!"));

    // Resubmitting while the confirmation shows is refused.
    let resp = app.post_form("/quick-call", &CALLBACK).await;
    assert_eq!(resp.status, StatusCode::CONFLICT);

    app.advance(TimeDelta::seconds(3));
    let resp = app.get("/quick-call").await;
    assert!(!resp.body.contains("Request Submitted!"));
    assert!(resp.body.contains("Request Callback"));
    assert!(!resp.body.contains(r#"value="Rajesh Kumar""#), "fields cleared");
    assert_eq!(resp.header("refresh"), None);
}

#[tokio::test]
async fn test_appointment_confirmation_shows_slot() {
    let mut app = TestApp::new();
    app.get("/services").await;

    let resp = app.post_form("/services", &APPOINTMENT).await;
    assert_eq!(resp.status, StatusCode::SEE_OTHER);
    assert_eq!(resp.location(), Some("/services"));

    let resp = app.get("/appointment").await;
    assert!(resp.body.contains("Appointment Booked!"));
    assert!(resp.body.contains("Tuesday, October 20, 2026"));
    assert!(resp.body.contains("11:00 AM"));
    assert_eq!(resp.header("refresh"), Some("5"));

    app.advance(TimeDelta::milliseconds(4500));
    let resp = app.get("/appointment").await;
    assert_eq!(resp.header("refresh"), Some("1"), "rounded up");
}

#[tokio::test]
async fn test_contact_confirmation() {
    let mut app = TestApp::new();
    app.get("/contact").await;

    let resp = app.post_form("/contact", &CONTACT).await;
    assert_eq!(resp.status, StatusCode::SEE_OTHER);

    let resp = app.get("/contact").await;
    assert!(resp.body.contains("Message Sent!"));
}

#[tokio::test]
async fn test_forms_are_independent() {
    let mut app = TestApp::new();
    app.get("/").await;

    app.post_form("/quick-call", &CALLBACK).await;
    let resp = app.get("/contact").await;
    assert!(!resp.body.contains("Message Sent!"));
    assert!(resp.body.contains("Send Message"));

    let mut other = app.other_visitor();
    let resp = other.get("/quick-call").await;
    assert!(!resp.body.contains("Request Submitted!"), "state is per visitor");
}

// ============================================================================
// Failure and retry
// ============================================================================

#[tokio::test]
async fn test_failed_submission_can_be_retried() {
    let desk = Arc::new(FlakyDesk::failing());
    let mut app = TestApp::with_desk(desk.clone());
    app.get("/quick-call").await;

    let resp = app.post_form("/quick-call", &CALLBACK).await;
    assert_eq!(resp.status, StatusCode::SEE_OTHER);

    let resp = app.get("/quick-call").await;
    assert!(resp.body.contains("Sorry, we couldn"));
    assert!(resp.body.contains("Try Again"));
    assert!(resp.body.contains(r#"value="Rajesh Kumar""#), "draft kept for retry");
    assert!(!resp.body.contains("connection refused"), "cause is not shown");

    desk.recover();
    let resp = app.post_form("/quick-call", &CALLBACK).await;
    assert_eq!(resp.status, StatusCode::SEE_OTHER);

    let resp = app.get("/quick-call").await;
    assert!(resp.body.contains("Request Submitted!"));
}

// ============================================================================
// In flight
// ============================================================================

#[tokio::test]
async fn test_submission_in_flight_blocks_a_second_one() {
    let desk = Arc::new(GatedDesk::default());
    let mut app = TestApp::with_desk(desk.clone());
    app.get("/contact").await;

    let mut first = app.clone();
    let pending = tokio::spawn(async move { first.post_form("/contact", &CONTACT).await });
    desk.entered.notified().await;

    let resp = app.get("/contact").await;
    assert!(resp.body.contains("Sending Message..."));
    assert!(resp.body.contains("<fieldset disabled>"));
    assert_eq!(resp.header("refresh"), Some("1"));

    let resp = app.post_form("/contact", &CONTACT).await;
    assert_eq!(resp.status, StatusCode::CONFLICT);

    desk.release.notify_one();
    let resp = pending.await.unwrap();
    assert_eq!(resp.status, StatusCode::SEE_OTHER);

    let resp = app.get("/contact").await;
    assert!(resp.body.contains("Message Sent!"));
}

#[tokio::test]
async fn test_cart_add_during_submission_is_kept() {
    let desk = Arc::new(GatedDesk::default());
    let mut app = TestApp::with_desk(desk.clone());
    app.get("/contact").await;

    let mut sender = app.clone();
    let pending = tokio::spawn(async move { sender.post_form("/contact", &CONTACT).await });
    desk.entered.notified().await;

    let resp = app.post_form("/cart/add", &[("product_id", "1")]).await;
    assert_eq!(resp.status, StatusCode::SEE_OTHER);

    desk.release.notify_one();
    let resp = pending.await.unwrap();
    assert_eq!(resp.status, StatusCode::SEE_OTHER);

    let resp = app.get("/cart/count").await;
    assert!(
        resp.body.contains(r#"<span class="badge">1</span>"#),
        "the finished submission does not roll the cart back"
    );
    let resp = app.get("/contact").await;
    assert!(resp.body.contains("Message Sent!"));
}

#[tokio::test]
async fn test_overlapping_submissions_both_confirm() {
    let desk = Arc::new(GatedDesk::default());
    let mut app = TestApp::with_desk(desk.clone());
    app.get("/").await;

    let mut tab = app.clone();
    let contact = tokio::spawn(async move { tab.post_form("/contact", &CONTACT).await });
    desk.entered.notified().await;

    let mut tab = app.clone();
    let callback = tokio::spawn(async move { tab.post_form("/quick-call", &CALLBACK).await });
    desk.entered.notified().await;

    // Contact finishes first, then the callback, which started before it
    // finished.
    desk.release.notify_one();
    assert_eq!(contact.await.unwrap().status, StatusCode::SEE_OTHER);
    desk.release.notify_one();
    assert_eq!(callback.await.unwrap().status, StatusCode::SEE_OTHER);

    let resp = app.get("/contact").await;
    assert!(resp.body.contains("Message Sent!"), "contact outcome kept");
    let resp = app.get("/quick-call").await;
    assert!(resp.body.contains("Request Submitted!"));
}

#[tokio::test]
async fn test_carousel_move_during_submission_is_kept() {
    let desk = Arc::new(GatedDesk::default());
    let mut app = TestApp::with_desk(desk.clone());
    app.get("/").await;

    let mut sender = app.clone();
    let pending = tokio::spawn(async move { sender.post_form("/quick-call", &CALLBACK).await });
    desk.entered.notified().await;

    let resp = app.hx_post_form("/testimonials/previous", &[]).await;
    assert!(resp.body.contains("Lakshmi Devi"));

    desk.release.notify_one();
    pending.await.unwrap();

    let resp = app.get("/testimonials").await;
    assert!(resp.body.contains("Lakshmi Devi"), "manual move survives");
}

// ============================================================================
// Return path
// ============================================================================

#[tokio::test]
async fn test_home_callback_returns_home() {
    let mut app = TestApp::new();
    app.get("/").await;

    let resp = app.post_form("/quick-call?from=%2F", &CALLBACK).await;
    assert_eq!(resp.status, StatusCode::SEE_OTHER);
    assert_eq!(resp.location(), Some("/#callback-form"));

    let resp = app.get("/").await;
    assert!(resp.body.contains("Request Submitted!"));
    assert_eq!(resp.header("refresh"), Some("3"));
}

#[tokio::test]
async fn test_invalid_home_callback_keeps_return_path() {
    let mut app = TestApp::new();
    app.get("/").await;

    let resp = app
        .post_form("/quick-call?from=%2F", &[("name", "Rajesh Kumar")])
        .await;
    assert_eq!(resp.status, StatusCode::UNPROCESSABLE_ENTITY);
    assert!(resp.body.contains(r#"action="/quick-call?from=%2F""#));
}

#[tokio::test]
async fn test_foreign_return_path_is_ignored() {
    let mut app = TestApp::new();
    app.get("/quick-call").await;

    let resp = app
        .post_form("/quick-call?from=https%3A%2F%2Fexample.com%2F", &CALLBACK)
        .await;
    assert_eq!(resp.status, StatusCode::SEE_OTHER);
    assert_eq!(resp.location(), Some("/quick-call"));
}

// ============================================================================
// Rate limiting
// ============================================================================

#[tokio::test]
async fn test_form_posts_are_rate_limited() {
    let mut app = TestApp::new();
    app.get("/contact").await;

    for _ in 0..5 {
        let resp = app.post_form("/contact", &[("name", "Anitha Reddy")]).await;
        assert_eq!(resp.status, StatusCode::UNPROCESSABLE_ENTITY);
    }

    let resp = app.post_form("/contact", &[("name", "Anitha Reddy")]).await;
    assert_eq!(resp.status, StatusCode::TOO_MANY_REQUESTS);

    // Pages themselves are not limited.
    let resp = app.get("/contact").await;
    assert_eq!(resp.status, StatusCode::OK);
}
