//! Testimonials and the rotating carousel that shows them.
//!
//! The carousel keeps no timer. It stores the index it was last pinned to and
//! the instant autoplay counts from; the visible index at any moment is derived
//! from those two values. Manual navigation pins a new index and pushes the
//! autoplay start past the cooldown, so repeated clicks keep pushing it back.

use chrono::{DateTime, TimeDelta, Utc};
use serde::{Deserialize, Serialize};

use crate::types::TestimonialId;

/// A patient review shown on the home page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Testimonial {
    pub id: TestimonialId,
    pub name: &'static str,
    /// Star rating, 1 to 5.
    pub rating: u8,
    pub text: &'static str,
    pub location: &'static str,
}

impl Testimonial {
    /// Highest possible rating.
    pub const MAX_RATING: u8 = 5;
}

/// The fixed list of reviews.
#[must_use]
pub fn testimonials() -> Vec<Testimonial> {
    [
        (
            "Priya Sharma",
            "Excellent service and beautiful frames! The staff was very helpful in choosing the perfect glasses for my face shape. Highly recommended!",
            "Ameerpet, Hyderabad",
        ),
        (
            "Rajesh Kumar",
            "Professional eye examination and quick service. Got my prescription glasses ready in just 2 hours. Great quality and affordable prices.",
            "Nagarjuna Nagar",
        ),
        (
            "Anitha Reddy",
            "Amazing collection of sunglasses and contact lenses. The optometrist was very knowledgeable and explained everything clearly.",
            "Yella Reddy Guda",
        ),
        (
            "Vikram Singh",
            "Best eye care center in the area! Clean, modern facility with latest equipment. The team is friendly and professional.",
            "Sanjay Gandhi Nagar",
        ),
        (
            "Lakshmi Devi",
            "Wonderful experience! They have a great variety of frames for all budgets. My whole family gets our eye care done here.",
            "Ameerpet",
        ),
    ]
    .into_iter()
    .zip(1u32..)
    .map(|((name, text, location), id)| Testimonial {
        id: TestimonialId::new(id),
        name,
        rating: Testimonial::MAX_RATING,
        text,
        location,
    })
    .collect()
}

/// Rejected carousel operation.
#[derive(thiserror::Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum CarouselError {
    #[error("a carousel needs at least one slide")]
    Empty,
    #[error("slide {index} does not exist (there are {len})")]
    OutOfRange { index: usize, len: usize },
}

/// Deadline-based autoplay carousel.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Carousel {
    len: usize,
    anchor_index: usize,
    /// Autoplay counts intervals from here. In the future while paused.
    autoplay_from: DateTime<Utc>,
}

impl Carousel {
    /// Time between automatic advances.
    pub const INTERVAL: TimeDelta = TimeDelta::seconds(5);
    /// Pause after a manual action before autoplay resumes.
    pub const COOLDOWN: TimeDelta = TimeDelta::seconds(10);

    /// A carousel showing the first slide and autoplaying from `now`.
    ///
    /// # Errors
    ///
    /// Returns [`CarouselError::Empty`] when `len` is zero.
    pub fn new(len: usize, now: DateTime<Utc>) -> Result<Self, CarouselError> {
        if len == 0 {
            return Err(CarouselError::Empty);
        }
        Ok(Self {
            len,
            anchor_index: 0,
            autoplay_from: now,
        })
    }

    #[must_use]
    pub const fn len(&self) -> usize {
        self.len
    }

    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// The slide visible at `now`.
    #[must_use]
    pub fn current(&self, now: DateTime<Utc>) -> usize {
        (self.anchor_index + self.advances(now)) % self.len
    }

    #[must_use]
    pub fn is_autoplaying(&self, now: DateTime<Utc>) -> bool {
        now >= self.autoplay_from
    }

    /// When the visible slide will next change on its own.
    #[must_use]
    pub fn next_advance(&self, now: DateTime<Utc>) -> DateTime<Utc> {
        if !self.is_autoplaying(now) {
            return self.autoplay_from + Self::INTERVAL;
        }
        let steps = i32::try_from(self.advances(now)).unwrap_or(i32::MAX);
        self.autoplay_from + Self::INTERVAL * steps.saturating_add(1)
    }

    /// Manual: one slide forward, wrapping.
    pub fn next(&mut self, now: DateTime<Utc>) {
        let index = (self.current(now) + 1) % self.len;
        self.pin(index, now);
    }

    /// Manual: one slide back, wrapping.
    pub fn previous(&mut self, now: DateTime<Utc>) {
        let index = (self.current(now) + self.len - 1) % self.len;
        self.pin(index, now);
    }

    /// Manual: jump to a slide.
    ///
    /// # Errors
    ///
    /// Returns [`CarouselError::OutOfRange`] if there is no such slide.
    pub fn select(&mut self, index: usize, now: DateTime<Utc>) -> Result<(), CarouselError> {
        if index >= self.len {
            return Err(CarouselError::OutOfRange {
                index,
                len: self.len,
            });
        }
        self.pin(index, now);
        Ok(())
    }

    /// Fold elapsed autoplay into the anchor so stored state stays small.
    ///
    /// Does not change what [`Carousel::current`] returns.
    pub fn settle(&mut self, now: DateTime<Utc>) {
        let advances = self.advances(now);
        if advances == 0 {
            return;
        }
        let steps = i32::try_from(advances).unwrap_or(i32::MAX);
        self.anchor_index = (self.anchor_index + advances) % self.len;
        self.autoplay_from += Self::INTERVAL * steps;
    }

    fn pin(&mut self, index: usize, now: DateTime<Utc>) {
        self.anchor_index = index;
        self.autoplay_from = now + Self::COOLDOWN;
    }

    fn advances(&self, now: DateTime<Utc>) -> usize {
        let elapsed = now - self.autoplay_from;
        if elapsed < TimeDelta::zero() {
            return 0;
        }
        let ticks = elapsed.num_milliseconds() / Self::INTERVAL.num_milliseconds();
        usize::try_from(ticks).unwrap_or(0)
    }
}
