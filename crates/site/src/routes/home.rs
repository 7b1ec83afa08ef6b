//! Home page route handler.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    extract::State,
    response::{IntoResponse, Response},
};
use tracing::instrument;

use pareena_core::catalog::Category;
use pareena_core::forms::{CallbackDraft, Choice};
use pareena_core::nav::Route;

use crate::components::{Feature, PageShell};
use crate::error::Result;
use crate::filters;
use crate::models::Visitor;
use crate::routes::forms::{self, FormView};
use crate::routes::testimonials::{self, CarouselView};
use crate::state::AppState;

// =============================================================================
// Static content
// =============================================================================

/// A category tile linking into the filtered catalog.
#[derive(Debug, Clone, Copy)]
pub struct CollectionCard {
    pub title: &'static str,
    pub description: &'static str,
    pub category: Category,
}

impl CollectionCard {
    #[must_use]
    pub fn url(&self) -> String {
        format!("/products?category={}", self.category.slug())
    }

    #[must_use]
    pub fn image(&self) -> String {
        format!("/static/images/products/{}.svg", self.category.slug())
    }
}

/// A headline figure in the stats band.
#[derive(Debug, Clone, Copy)]
pub struct Stat {
    pub value: &'static str,
    pub label: &'static str,
}

const FEATURES: [Feature; 4] = [
    Feature {
        title: "Expert Eye Care",
        description: "Professional eye examinations with advanced diagnostic equipment.",
    },
    Feature {
        title: "Premium Quality",
        description: "High-quality frames and lenses from trusted brands worldwide.",
    },
    Feature {
        title: "Quick Service",
        description: "Fast and efficient service with same-day lens fitting available.",
    },
    Feature {
        title: "Trusted Expertise",
        description: "Years of experience serving the community with excellence.",
    },
];

const COLLECTIONS: [CollectionCard; 3] = [
    CollectionCard {
        title: "Prescription Glasses",
        description: "Wide selection of frames for every style and budget",
        category: Category::PrescriptionGlasses,
    },
    CollectionCard {
        title: "Sunglasses",
        description: "UV protection with fashionable designs for outdoor activities",
        category: Category::Sunglasses,
    },
    CollectionCard {
        title: "Contact Lenses",
        description: "Daily, weekly, and monthly contact lenses from top brands",
        category: Category::ContactLenses,
    },
];

const STATS: [Stat; 4] = [
    Stat {
        value: "5000+",
        label: "Happy Customers",
    },
    Stat {
        value: "10000+",
        label: "Eye Tests Done",
    },
    Stat {
        value: "4.9",
        label: "Average Rating",
    },
    Stat {
        value: "15+",
        label: "Years Experience",
    },
];

#[derive(Template, WebTemplate)]
#[template(path = "pages/home.html")]
pub struct HomeTemplate {
    pub shell: PageShell,
    pub features: [Feature; 4],
    pub collections: [CollectionCard; 3],
    pub stats: [Stat; 4],
    /// The callback form, posting to the quick call page and returning here.
    pub form: FormView<CallbackDraft>,
    pub carousel: CarouselView,
}

/// Display the home page.
#[instrument(skip(state, visitor, shell))]
pub async fn home(
    State(state): State<AppState>,
    visitor: Visitor,
    shell: PageShell,
) -> Result<Response> {
    let action = forms::action_returning_to(Route::QuickCall.path(), Route::Home);
    let form = forms::current_view::<CallbackDraft>(&state, &visitor, &action);
    let carousel = testimonials::current_view(&state, &visitor)?;
    let refresh_after = form.refresh_after;

    let page = HomeTemplate {
        shell,
        features: FEATURES,
        collections: COLLECTIONS,
        stats: STATS,
        form,
        carousel,
    };
    Ok(forms::with_refresh(page.into_response(), refresh_after))
}
