//! Product catalog and its filter.
//!
//! The catalog is a fixed, immutable list. [`CatalogFilter`] narrows it by
//! free-text search, category and price bracket; all three predicates are
//! ANDed and the catalog order is preserved.

use serde::{Deserialize, Serialize};

use crate::types::{Price, ProductId};

/// Product category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Category {
    PrescriptionGlasses,
    Sunglasses,
    ContactLenses,
}

impl Category {
    /// Every category, in the order the catalog page lists them.
    pub const ALL: [Self; 3] = [
        Self::PrescriptionGlasses,
        Self::Sunglasses,
        Self::ContactLenses,
    ];

    /// Display name.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::PrescriptionGlasses => "Prescription Glasses",
            Self::Sunglasses => "Sunglasses",
            Self::ContactLenses => "Contact Lenses",
        }
    }

    /// Short name used in links such as `/products?category=contacts`.
    #[must_use]
    pub const fn slug(self) -> &'static str {
        match self {
            Self::PrescriptionGlasses => "prescription",
            Self::Sunglasses => "sunglasses",
            Self::ContactLenses => "contacts",
        }
    }

    /// Accept either the slug or the display name, case-insensitively.
    #[must_use]
    pub fn from_param(value: &str) -> Option<Self> {
        let value = value.trim();
        Self::ALL.into_iter().find(|category| {
            value.eq_ignore_ascii_case(category.slug())
                || value.eq_ignore_ascii_case(category.label())
        })
    }
}

/// One of three mutually exclusive price ranges.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PriceBracket {
    /// Strictly below ₹2000.
    Under2000,
    /// ₹2000 to ₹4000, both inclusive.
    From2000To4000,
    /// Strictly above ₹4000.
    Above4000,
}

impl PriceBracket {
    pub const ALL: [Self; 3] = [Self::Under2000, Self::From2000To4000, Self::Above4000];

    const LOWER: i64 = 2000;
    const UPPER: i64 = 4000;

    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Under2000 => "Under ₹2000",
            Self::From2000To4000 => "₹2000-₹4000",
            Self::Above4000 => "Above ₹4000",
        }
    }

    #[must_use]
    pub const fn slug(self) -> &'static str {
        match self {
            Self::Under2000 => "under-2000",
            Self::From2000To4000 => "2000-4000",
            Self::Above4000 => "above-4000",
        }
    }

    /// Accept either the slug or the display label.
    #[must_use]
    pub fn from_param(value: &str) -> Option<Self> {
        let value = value.trim();
        Self::ALL.into_iter().find(|bracket| {
            value.eq_ignore_ascii_case(bracket.slug()) || value == bracket.label()
        })
    }

    /// The bracket a price falls into. Every price has exactly one.
    ///
    /// Brackets compare whole rupees, so `₹1,999.99` is still under 2000.
    #[must_use]
    pub fn of(price: &Price) -> Self {
        let rupees = price.whole_units();
        if rupees < rust_decimal::Decimal::from(Self::LOWER) {
            Self::Under2000
        } else if rupees <= rust_decimal::Decimal::from(Self::UPPER) {
            Self::From2000To4000
        } else {
            Self::Above4000
        }
    }

    #[must_use]
    pub fn contains(self, price: &Price) -> bool {
        Self::of(price) == self
    }
}

/// A catalog entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    pub price: Price,
    pub image: String,
    pub category: Category,
    pub description: String,
}

impl Product {
    fn sample(
        id: u32,
        name: &str,
        rupees: i64,
        category: Category,
        description: &str,
    ) -> Self {
        Self {
            id: ProductId::new(id),
            name: name.to_string(),
            price: Price::inr(rupees),
            image: format!("/static/images/products/{}.svg", category.slug()),
            category,
            description: description.to_string(),
        }
    }
}

/// Search text plus the two selectors. `None` means "All".
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CatalogFilter {
    pub search: String,
    pub category: Option<Category>,
    pub bracket: Option<PriceBracket>,
}

impl CatalogFilter {
    /// Whether a product passes all three predicates.
    #[must_use]
    pub fn matches(&self, product: &Product) -> bool {
        self.matches_search(product)
            && self.category.is_none_or(|c| product.category == c)
            && self.bracket.is_none_or(|b| b.contains(&product.price))
    }

    fn matches_search(&self, product: &Product) -> bool {
        let needle = self.search.trim().to_lowercase();
        needle.is_empty()
            || product.name.to_lowercase().contains(&needle)
            || product.description.to_lowercase().contains(&needle)
    }

    /// True when no predicate narrows the list.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.search.trim().is_empty() && self.category.is_none() && self.bracket.is_none()
    }
}

/// Apply a filter, keeping catalog order.
#[must_use]
pub fn filter_products<'a>(products: &'a [Product], filter: &CatalogFilter) -> Vec<&'a Product> {
    products.iter().filter(|p| filter.matches(p)).collect()
}

/// The clinic's immutable product list.
#[derive(Debug, Clone)]
pub struct Catalog {
    products: Vec<Product>,
}

impl Catalog {
    #[must_use]
    pub const fn new(products: Vec<Product>) -> Self {
        Self { products }
    }

    /// The eight products currently on display in the shop.
    #[must_use]
    pub fn sample() -> Self {
        use Category::{ContactLenses, PrescriptionGlasses, Sunglasses};

        Self::new(vec![
            Product::sample(
                1,
                "Classic Aviator",
                2999,
                Sunglasses,
                "Timeless aviator style with UV protection",
            ),
            Product::sample(
                2,
                "Modern Rectangle Frame",
                3499,
                PrescriptionGlasses,
                "Sleek rectangular frame for professional look",
            ),
            Product::sample(
                3,
                "Daily Comfort Lenses",
                1200,
                ContactLenses,
                "Daily disposable contact lenses for comfort",
            ),
            Product::sample(
                4,
                "Designer Cat Eye",
                4299,
                PrescriptionGlasses,
                "Elegant cat eye frame for a sophisticated look",
            ),
            Product::sample(
                5,
                "Sports Sunglasses",
                3799,
                Sunglasses,
                "Durable sports sunglasses with polarized lenses",
            ),
            Product::sample(
                6,
                "Monthly Soft Lenses",
                800,
                ContactLenses,
                "Monthly replacement soft contact lenses",
            ),
            Product::sample(
                7,
                "Vintage Round Frame",
                2799,
                PrescriptionGlasses,
                "Classic round frame with modern comfort",
            ),
            Product::sample(
                8,
                "Polarized Wayfarer",
                3299,
                Sunglasses,
                "Classic wayfarer style with polarized protection",
            ),
        ])
    }

    #[must_use]
    pub fn products(&self) -> &[Product] {
        &self.products
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.products.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }

    #[must_use]
    pub fn get(&self, id: ProductId) -> Option<&Product> {
        self.products.iter().find(|p| p.id == id)
    }

    #[must_use]
    pub fn filter(&self, filter: &CatalogFilter) -> Vec<&Product> {
        filter_products(&self.products, filter)
    }

    /// Other products in the same category, for the detail page.
    #[must_use]
    pub fn related(&self, product: &Product) -> Vec<&Product> {
        self.products
            .iter()
            .filter(|p| p.category == product.category && p.id != product.id)
            .collect()
    }
}
