//! Scroll-driven navbar visibility.
//!
//! The bar shows near the top of the page and whenever the visitor scrolls up;
//! it hides while they scroll down. Each sample depends only on the previous
//! one.

use serde::{Deserialize, Serialize};

/// Offsets below this always show the bar.
pub const TOP_THRESHOLD: u32 = 10;

/// Tracks consecutive vertical scroll offsets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScrollVisibility {
    last_offset: u32,
    visible: bool,
}

impl Default for ScrollVisibility {
    fn default() -> Self {
        Self {
            last_offset: 0,
            visible: true,
        }
    }
}

impl ScrollVisibility {
    #[must_use]
    pub const fn visible(&self) -> bool {
        self.visible
    }

    #[must_use]
    pub const fn last_offset(&self) -> u32 {
        self.last_offset
    }

    /// Feed one scroll sample and return the new visibility.
    pub const fn observe(&mut self, offset: u32) -> bool {
        self.visible = self.last_offset > offset || offset < TOP_THRESHOLD;
        self.last_offset = offset;
        self.visible
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_starts_visible() {
        assert!(ScrollVisibility::default().visible());
    }

    #[test]
    fn test_scrolling_down_past_threshold_hides() {
        let mut nav = ScrollVisibility::default();
        assert!(nav.observe(5));
        assert!(nav.observe(9));
        assert!(!nav.observe(10));
        assert!(!nav.observe(300));
        assert!(!nav.observe(300), "no movement is not scrolling up");
    }

    #[test]
    fn test_any_decrease_shows() {
        let mut nav = ScrollVisibility::default();
        nav.observe(800);
        assert!(nav.observe(799));
        assert!(!nav.observe(850));
        assert!(nav.observe(0));
        assert_eq!(nav.last_offset(), 0);
    }
}
