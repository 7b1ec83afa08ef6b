//! Product catalog route handlers.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Deserialize;
use tracing::instrument;

use pareena_core::catalog::{Category, CatalogFilter, PriceBracket, Product};
use pareena_core::types::ProductId;

use crate::components::PageShell;
use crate::filters;
use crate::routes::not_found::NotFoundTemplate;
use crate::state::AppState;

/// How the product list is laid out.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ViewMode {
    #[default]
    Grid,
    List,
}

impl ViewMode {
    fn from_param(value: &str) -> Self {
        if value.trim().eq_ignore_ascii_case("list") {
            Self::List
        } else {
            Self::Grid
        }
    }

    #[must_use]
    pub const fn slug(self) -> &'static str {
        match self {
            Self::Grid => "grid",
            Self::List => "list",
        }
    }

    #[must_use]
    pub const fn is_list(self) -> bool {
        matches!(self, Self::List)
    }
}

/// Query parameters for the product listing.
///
/// Every parameter is optional; values that match nothing fall back to "All".
#[derive(Debug, Default, Deserialize)]
pub struct ProductsQuery {
    pub search: Option<String>,
    pub category: Option<String>,
    pub price: Option<String>,
    pub view: Option<String>,
}

impl ProductsQuery {
    fn filter(&self) -> CatalogFilter {
        CatalogFilter {
            search: self.search.clone().unwrap_or_default(),
            category: self.category.as_deref().and_then(Category::from_param),
            bracket: self.price.as_deref().and_then(PriceBracket::from_param),
        }
    }

    fn view(&self) -> ViewMode {
        self.view.as_deref().map(ViewMode::from_param).unwrap_or_default()
    }
}

/// A `<select>` option for the filter bar.
#[derive(Debug, Clone)]
pub struct FilterOption {
    pub value: &'static str,
    pub label: &'static str,
    pub selected: bool,
}

fn category_options(selected: Option<Category>) -> Vec<FilterOption> {
    std::iter::once(FilterOption {
        value: "all",
        label: "All",
        selected: selected.is_none(),
    })
    .chain(Category::ALL.into_iter().map(|c| FilterOption {
        value: c.slug(),
        label: c.label(),
        selected: selected == Some(c),
    }))
    .collect()
}

fn bracket_options(selected: Option<PriceBracket>) -> Vec<FilterOption> {
    std::iter::once(FilterOption {
        value: "all",
        label: "All",
        selected: selected.is_none(),
    })
    .chain(PriceBracket::ALL.into_iter().map(|b| FilterOption {
        value: b.slug(),
        label: b.label(),
        selected: selected == Some(b),
    }))
    .collect()
}

/// Link to the listing with the same filters in another layout.
fn listing_url(filter: &CatalogFilter, view: ViewMode) -> String {
    let mut params = Vec::new();
    let search = filter.search.trim();
    if !search.is_empty() {
        params.push(format!("search={}", urlencoding::encode(search)));
    }
    if let Some(category) = filter.category {
        params.push(format!("category={}", category.slug()));
    }
    if let Some(bracket) = filter.bracket {
        params.push(format!("price={}", bracket.slug()));
    }
    if view != ViewMode::default() {
        params.push(format!("view={}", view.slug()));
    }

    if params.is_empty() {
        "/products".to_string()
    } else {
        format!("/products?{}", params.join("&"))
    }
}

// =============================================================================
// Templates
// =============================================================================

#[derive(Template, WebTemplate)]
#[template(path = "products/index.html")]
pub struct ProductsIndexTemplate {
    pub shell: PageShell,
    pub products: Vec<Product>,
    pub total: usize,
    pub search: String,
    /// Chip text for the selected category.
    pub category_chip: Option<&'static str>,
    pub categories: Vec<FilterOption>,
    pub brackets: Vec<FilterOption>,
    pub view: ViewMode,
    pub grid_url: String,
    pub list_url: String,
}

#[derive(Template, WebTemplate)]
#[template(path = "products/show.html")]
pub struct ProductShowTemplate {
    pub shell: PageShell,
    pub product: Product,
    pub related: Vec<Product>,
}

// =============================================================================
// Route Handlers
// =============================================================================

/// Display the product listing.
#[instrument(skip(state, shell))]
pub async fn index(
    State(state): State<AppState>,
    shell: PageShell,
    Query(query): Query<ProductsQuery>,
) -> impl IntoResponse {
    let filter = query.filter();
    let view = query.view();
    let catalog = state.catalog();
    let products: Vec<Product> = catalog.filter(&filter).into_iter().cloned().collect();

    tracing::debug!(shown = products.len(), total = catalog.len(), "Filtered catalog");

    ProductsIndexTemplate {
        shell,
        total: catalog.len(),
        products,
        search: filter.search.trim().to_string(),
        category_chip: filter.category.map(Category::label),
        categories: category_options(filter.category),
        brackets: bracket_options(filter.bracket),
        view,
        grid_url: listing_url(&filter, ViewMode::Grid),
        list_url: listing_url(&filter, ViewMode::List),
    }
}

/// Display a product detail page. Ids that are not a catalog number get the
/// not-found page, like any other unknown path.
#[instrument(skip(state, shell))]
pub async fn show(
    State(state): State<AppState>,
    shell: PageShell,
    Path(id): Path<String>,
) -> Response {
    let catalog = state.catalog();
    let product = id
        .parse()
        .ok()
        .and_then(|id| catalog.get(ProductId::new(id)));
    let Some(product) = product else {
        tracing::debug!(id = %id, "Unknown product");
        return (StatusCode::NOT_FOUND, NotFoundTemplate { shell }).into_response();
    };

    ProductShowTemplate {
        shell,
        related: catalog.related(product).into_iter().cloned().collect(),
        product: product.clone(),
    }
    .into_response()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn query(category: Option<&str>, price: Option<&str>, view: Option<&str>) -> ProductsQuery {
        ProductsQuery {
            search: None,
            category: category.map(String::from),
            price: price.map(String::from),
            view: view.map(String::from),
        }
    }

    #[test]
    fn test_query_accepts_slugs_and_labels() {
        let filter = query(Some("sunglasses"), Some("under-2000"), None).filter();
        assert_eq!(filter.category, Some(Category::Sunglasses));
        assert_eq!(filter.bracket, Some(PriceBracket::Under2000));

        let filter = query(Some("Contact Lenses"), Some("Above ₹4000"), None).filter();
        assert_eq!(filter.category, Some(Category::ContactLenses));
        assert_eq!(filter.bracket, Some(PriceBracket::Above4000));
    }

    #[test]
    fn test_unknown_values_mean_all() {
        let q = query(Some("monocles"), Some("free"), Some("carousel"));
        let filter = q.filter();
        assert!(filter.is_empty());
        assert_eq!(q.view(), ViewMode::Grid);
        assert!(query(None, None, Some("LIST")).view().is_list());
    }

    #[test]
    fn test_listing_url_keeps_filters() {
        let filter = CatalogFilter {
            search: " cat eye ".to_string(),
            category: Some(Category::PrescriptionGlasses),
            bracket: None,
        };
        assert_eq!(
            listing_url(&filter, ViewMode::List),
            "/products?search=cat%20eye&category=prescription&view=list"
        );
        assert_eq!(listing_url(&CatalogFilter::default(), ViewMode::Grid), "/products");
    }

    #[test]
    fn test_filter_options_mark_selection() {
        let options = category_options(Some(Category::Sunglasses));
        assert_eq!(options.len(), 4);
        let selected: Vec<_> = options.iter().filter(|o| o.selected).map(|o| o.value).collect();
        assert_eq!(selected, vec!["sunglasses"]);
        assert!(bracket_options(None)[0].selected);
    }
}
