//! Reusable view pieces shared by several pages.

pub mod fields;
pub mod shell;

pub use fields::{Field, InputKind};
pub use shell::PageShell;

/// A titled blurb, used for the feature grids on several pages.
#[derive(Debug, Clone, Copy)]
pub struct Feature {
    pub title: &'static str,
    pub description: &'static str,
}
