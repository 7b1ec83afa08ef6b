//! Testimonial carousel fragment and its manual controls.
//!
//! The home page polls `GET /testimonials` every five seconds. The controls
//! post to this module; htmx requests get the fragment back, plain form posts
//! are redirected to the carousel on the home page.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    extract::{Path, State},
    http::HeaderMap,
    response::{IntoResponse, Redirect, Response},
};
use chrono::{DateTime, Utc};
use tracing::instrument;

use pareena_core::carousel::{Carousel, CarouselError, Testimonial};

use crate::error::{AppError, Result};
use crate::filters;
use crate::models::Visitor;
use crate::services::VisitorRecord;
use crate::state::AppState;

/// One navigation dot.
#[derive(Debug, Clone, Copy)]
pub struct Dot {
    pub index: usize,
    pub number: usize,
    pub active: bool,
}

/// The carousel as rendered at one instant.
#[derive(Debug, Clone)]
pub struct CarouselView {
    pub testimonial: Testimonial,
    pub index: usize,
    pub dots: Vec<Dot>,
    pub autoplaying: bool,
}

impl CarouselView {
    fn new(carousel: &Carousel, testimonials: &[Testimonial], now: DateTime<Utc>) -> Result<Self> {
        let index = carousel.current(now);
        let testimonial = testimonials
            .get(index)
            .cloned()
            .ok_or_else(|| AppError::Internal(format!("no testimonial at {index}")))?;
        let dots = (0..carousel.len())
            .map(|i| Dot {
                index: i,
                number: i + 1,
                active: i == index,
            })
            .collect();

        Ok(Self {
            testimonial,
            index,
            dots,
            autoplaying: carousel.is_autoplaying(now),
        })
    }
}

#[derive(Template, WebTemplate)]
#[template(path = "partials/testimonials.html")]
pub struct TestimonialsFragment {
    pub carousel: CarouselView,
}

/// The visitor's carousel, started now on first visit.
fn carousel_of(
    record: &mut VisitorRecord,
    len: usize,
    now: DateTime<Utc>,
) -> Result<&mut Carousel> {
    let carousel = match record.carousel.take() {
        Some(carousel) if carousel.len() == len => carousel,
        _ => Carousel::new(len, now).map_err(carousel_error)?,
    };
    Ok(record.carousel.insert(carousel))
}

fn carousel_error(e: CarouselError) -> AppError {
    match e {
        CarouselError::OutOfRange { .. } => AppError::BadRequest(e.to_string()),
        CarouselError::Empty => AppError::Internal(e.to_string()),
    }
}

/// The carousel view for the home page.
///
/// # Errors
///
/// Returns an error if there are no testimonials to show.
pub fn current_view(state: &AppState, visitor: &Visitor) -> Result<CarouselView> {
    let now = state.clock().now();
    let testimonials = state.testimonials();
    state.visitors().update(visitor.id, |record| {
        let carousel = carousel_of(record, testimonials.len(), now)?;
        CarouselView::new(carousel, testimonials, now)
    })
}

/// Apply a manual action and answer in the form the client asked for.
fn navigate(
    state: &AppState,
    visitor: &Visitor,
    headers: &HeaderMap,
    action: impl FnOnce(&mut Carousel, DateTime<Utc>) -> std::result::Result<(), CarouselError>,
) -> Result<Response> {
    let now = state.clock().now();
    let testimonials = state.testimonials();
    let carousel = state.visitors().update(visitor.id, |record| {
        let carousel = carousel_of(record, testimonials.len(), now)?;
        action(carousel, now).map_err(carousel_error)?;
        carousel.settle(now);
        CarouselView::new(carousel, testimonials, now)
    })?;

    if is_htmx(headers) {
        Ok(TestimonialsFragment { carousel }.into_response())
    } else {
        Ok(Redirect::to("/#testimonials").into_response())
    }
}

fn is_htmx(headers: &HeaderMap) -> bool {
    headers
        .get("hx-request")
        .is_some_and(|value| value.as_bytes() == b"true")
}

/// Current carousel fragment (polled).
#[instrument(skip_all)]
pub async fn show(State(state): State<AppState>, visitor: Visitor) -> Result<impl IntoResponse> {
    let carousel = current_view(&state, &visitor)?;
    Ok(TestimonialsFragment { carousel })
}

#[instrument(skip_all)]
pub async fn previous(
    State(state): State<AppState>,
    visitor: Visitor,
    headers: HeaderMap,
) -> Result<Response> {
    navigate(&state, &visitor, &headers, |carousel, now| {
        carousel.previous(now);
        Ok(())
    })
}

#[instrument(skip_all)]
pub async fn next(
    State(state): State<AppState>,
    visitor: Visitor,
    headers: HeaderMap,
) -> Result<Response> {
    navigate(&state, &visitor, &headers, |carousel, now| {
        carousel.next(now);
        Ok(())
    })
}

/// Jump to a slide. Out-of-range indexes are a 400.
#[instrument(skip(state, visitor, headers))]
pub async fn select(
    State(state): State<AppState>,
    visitor: Visitor,
    headers: HeaderMap,
    Path(index): Path<usize>,
) -> Result<Response> {
    navigate(&state, &visitor, &headers, |carousel, now| {
        carousel.select(index, now)
    })
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use axum::http::HeaderValue;
    use chrono::{TimeDelta, TimeZone};
    use pareena_core::carousel::testimonials;

    use super::*;

    #[test]
    fn test_view_marks_active_dot() {
        let t0 = Utc.with_ymd_and_hms(2026, 10, 16, 6, 0, 0).unwrap();
        let all = testimonials();
        let carousel = Carousel::new(all.len(), t0).unwrap();

        let view = CarouselView::new(&carousel, &all, t0 + TimeDelta::seconds(11)).unwrap();
        assert_eq!(view.index, 2);
        assert_eq!(view.testimonial.name, "Anitha Reddy");
        let active: Vec<_> = view.dots.iter().filter(|d| d.active).map(|d| d.number).collect();
        assert_eq!(active, vec![3]);
        assert!(view.autoplaying);
    }

    #[test]
    fn test_carousel_is_kept_until_testimonials_change() {
        let t0 = Utc.with_ymd_and_hms(2026, 10, 16, 6, 0, 0).unwrap();
        let later = t0 + TimeDelta::seconds(30);
        let mut record = VisitorRecord::default();

        carousel_of(&mut record, 5, t0).unwrap().next(t0);
        let kept = carousel_of(&mut record, 5, later).unwrap().clone();
        assert_eq!(kept.current(t0), 1, "manual move survives");

        let restarted = carousel_of(&mut record, 3, later).unwrap();
        assert_eq!(restarted.len(), 3);
        assert_eq!(restarted.current(later), 0);
    }

    #[test]
    fn test_out_of_range_is_bad_request() {
        let err = carousel_error(CarouselError::OutOfRange { index: 9, len: 5 });
        assert!(matches!(err, AppError::BadRequest(_)));
    }

    #[test]
    fn test_htmx_detection() {
        let mut headers = HeaderMap::new();
        assert!(!is_htmx(&headers));
        headers.insert("hx-request", HeaderValue::from_static("true"));
        assert!(is_htmx(&headers));
    }
}
