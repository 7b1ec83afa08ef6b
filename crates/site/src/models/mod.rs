//! Types stored in the visitor session.

pub mod session;

pub use session::Visitor;
