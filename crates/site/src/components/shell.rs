//! The page shell: navigation bar and footer around every page.

use axum::{extract::FromRequestParts, http::request::Parts};

use pareena_core::clinic;
use pareena_core::nav::{NAV_LINKS, Route};
use pareena_core::scroll;

use crate::error::AppError;
use crate::models::Visitor;
use crate::state::AppState;

/// A navigation bar entry with its highlight precomputed.
#[derive(Debug, Clone)]
pub struct NavItem {
    pub label: &'static str,
    pub path: &'static str,
    pub active: bool,
}

/// Opening hours row.
#[derive(Debug, Clone, Copy)]
pub struct Hours {
    pub days: &'static str,
    pub time: &'static str,
}

/// Clinic details shown in the footer and on the contact pages.
#[derive(Debug, Clone, Copy)]
pub struct ClinicInfo {
    pub name: &'static str,
    pub short_name: &'static str,
    pub tagline: &'static str,
    pub phone_display: &'static str,
    pub phone_tel: &'static str,
    pub email: &'static str,
    pub email_mailto: &'static str,
    pub whatsapp_url: &'static str,
    pub address_lines: [&'static str; 4],
    pub maps_embed_url: &'static str,
    pub hours: [Hours; 2],
}

pub const CLINIC: ClinicInfo = ClinicInfo {
    name: clinic::NAME,
    short_name: clinic::SHORT_NAME,
    tagline: clinic::TAGLINE,
    phone_display: clinic::PHONE_DISPLAY,
    phone_tel: clinic::PHONE_TEL,
    email: clinic::EMAIL,
    email_mailto: clinic::EMAIL_MAILTO,
    whatsapp_url: clinic::WHATSAPP_URL,
    address_lines: clinic::ADDRESS_LINES,
    maps_embed_url: clinic::MAPS_EMBED_URL,
    hours: [
        Hours {
            days: clinic::HOURS[0].0,
            time: clinic::HOURS[0].1,
        },
        Hours {
            days: clinic::HOURS[1].0,
            time: clinic::HOURS[1].1,
        },
    ],
};

/// Footer quick links. Services points at the appointment alias.
pub const FOOTER_LINKS: [(&str, &str); 5] = [
    ("Home", "/"),
    ("Products", "/products"),
    ("Services", "/services"),
    ("About Us", "/about"),
    ("Contact", "/contact"),
];

pub const FOOTER_SERVICES: [&str; 6] = [
    "Eye Examinations",
    "Prescription Glasses",
    "Contact Lenses",
    "Sunglasses",
    "Frame Repairs",
    "Lens Replacement",
];

/// Everything the base layout needs, extracted once per request.
#[derive(Debug, Clone)]
pub struct PageShell {
    pub current_path: String,
    pub nav: Vec<NavItem>,
    pub quick_call_active: bool,
    pub cart_count: u32,
    /// Offset below which the navbar always shows, handed to the script.
    pub scroll_threshold: u32,
    /// The navbar's state before any scrolling.
    pub nav_visible: bool,
    pub clinic: ClinicInfo,
    pub footer_links: [(&'static str, &'static str); 5],
    pub footer_services: [&'static str; 6],
}

impl PageShell {
    /// Build the shell for `current_path`.
    #[must_use]
    pub fn new(current_path: &str, cart_count: u32) -> Self {
        let nav = NAV_LINKS
            .iter()
            .map(|link| NavItem {
                label: link.label,
                path: link.path(),
                active: link.is_active(current_path),
            })
            .collect();

        Self {
            current_path: current_path.to_string(),
            nav,
            quick_call_active: Route::from_path(current_path) == Some(Route::QuickCall),
            cart_count,
            scroll_threshold: scroll::TOP_THRESHOLD,
            nav_visible: scroll::ScrollVisibility::default().visible(),
            clinic: CLINIC,
            footer_links: FOOTER_LINKS,
            footer_services: FOOTER_SERVICES,
        }
    }
}

impl FromRequestParts<AppState> for PageShell {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let visitor = Visitor::from_request_parts(parts, state).await?;
        let cart_count = state.visitors().cart_count(visitor.id);
        Ok(Self::new(parts.uri.path(), cart_count))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn active(shell: &PageShell) -> Vec<&'static str> {
        shell.nav.iter().filter(|i| i.active).map(|i| i.label).collect()
    }

    #[test]
    fn test_services_highlights_appointment() {
        let shell = PageShell::new("/services", 0);
        assert_eq!(active(&shell), vec!["Appointment"]);
    }

    #[test]
    fn test_quick_call_is_not_a_nav_link() {
        let shell = PageShell::new("/quick-call", 2);
        assert!(active(&shell).is_empty());
        assert!(shell.quick_call_active);
        assert_eq!(shell.cart_count, 2);
    }

    #[test]
    fn test_unknown_path_highlights_nothing() {
        let shell = PageShell::new("/nope", 0);
        assert!(active(&shell).is_empty());
        assert!(shell.nav_visible);
        assert_eq!(shell.scroll_threshold, 10);
    }
}
