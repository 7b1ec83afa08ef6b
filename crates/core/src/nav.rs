//! Site routes and the navigation bar's active-link rule.

use serde::Serialize;

/// A page the router serves.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Route {
    Home,
    Products,
    Appointment,
    /// Alias of [`Route::Appointment`].
    Services,
    QuickCall,
    About,
    Contact,
}

impl Route {
    pub const ALL: [Self; 7] = [
        Self::Home,
        Self::Products,
        Self::Appointment,
        Self::Services,
        Self::QuickCall,
        Self::About,
        Self::Contact,
    ];

    #[must_use]
    pub const fn path(self) -> &'static str {
        match self {
            Self::Home => "/",
            Self::Products => "/products",
            Self::Appointment => "/appointment",
            Self::Services => "/services",
            Self::QuickCall => "/quick-call",
            Self::About => "/about",
            Self::Contact => "/contact",
        }
    }

    /// Exact route lookup. A trailing slash is ignored.
    #[must_use]
    pub fn from_path(path: &str) -> Option<Self> {
        let path = match path.trim_end_matches('/') {
            "" => "/",
            trimmed => trimmed,
        };
        Self::ALL.into_iter().find(|route| route.path() == path)
    }

    /// The route whose page is rendered, with aliases resolved.
    #[must_use]
    pub const fn canonical(self) -> Self {
        match self {
            Self::Services => Self::Appointment,
            other => other,
        }
    }
}

/// The top-level section a path belongs to, used for link highlighting.
///
/// Product detail pages sit under [`Route::Products`].
#[must_use]
pub fn section_for_path(path: &str) -> Option<Route> {
    if let Some(route) = Route::from_path(path) {
        return Some(route.canonical());
    }
    path.strip_prefix("/products/")
        .filter(|rest| !rest.is_empty())
        .map(|_| Route::Products)
}

/// One entry of the navigation bar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct NavLink {
    pub label: &'static str,
    pub route: Route,
}

impl NavLink {
    #[must_use]
    pub const fn path(&self) -> &'static str {
        self.route.path()
    }

    /// Whether this link is highlighted on `current_path`.
    #[must_use]
    pub fn is_active(&self, current_path: &str) -> bool {
        section_for_path(current_path) == Some(self.route)
    }
}

/// Main navigation, in display order. Quick Call is a separate action button.
pub const NAV_LINKS: [NavLink; 5] = [
    NavLink { label: "Home", route: Route::Home },
    NavLink { label: "Products", route: Route::Products },
    NavLink { label: "Appointment", route: Route::Appointment },
    NavLink { label: "About", route: Route::About },
    NavLink { label: "Contact", route: Route::Contact },
];
