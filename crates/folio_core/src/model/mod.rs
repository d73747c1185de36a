//! Static page configuration records.
//!
//! # Responsibility
//! - Define the content, navigation and theme data the host page supplies.
//! - Offer caller-side validation for required fields and section ids.
//!
//! # Invariants
//! - Records are loaded once at page construction and never mutated.

pub mod content;
pub mod nav;
pub mod theme;
