//! Pareena Core - Domain types and state machines for the clinic site.
//!
//! # Architecture
//!
//! The core crate contains only types and pure logic - no I/O, no HTTP, no
//! timers. Every time-dependent transition takes `now` as an argument so the
//! web layer decides where time comes from.
//!
//! # Modules
//!
//! - [`types`] - Newtype wrappers for IDs, prices, emails, and phone numbers
//! - [`catalog`] - Product catalog and its search/category/price filter
//! - [`forms`] - Lead form drafts, validation, and typed requests
//! - [`lifecycle`] - Idle/submitting/submitted state machine shared by the forms
//! - [`carousel`] - Testimonial rotation with autoplay and manual override
//! - [`scroll`] - Navbar show/hide rule driven by scroll samples
//! - [`nav`] - Site routes and navigation links
//! - [`clinic`] - Clinic contact details and local calendar

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod carousel;
pub mod catalog;
pub mod clinic;
pub mod forms;
pub mod lifecycle;
pub mod nav;
pub mod scroll;
pub mod types;

pub use types::*;
