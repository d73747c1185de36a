//! Navigation link model.
//!
//! # Invariants
//! - `section_id` is the only identity of a nav item.
//! - Section ids are lowercase slugs and unique within one nav list.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::error::Error;
use std::fmt::{Display, Formatter};

static SECTION_ID_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[a-z][a-z0-9-]*$").expect("valid section id regex"));

/// Section id of the hero banner at the top of the page.
pub const SECTION_TOP: &str = "top";
pub const SECTION_ABOUT: &str = "about";
pub const SECTION_EXPERIENCE: &str = "experience";
pub const SECTION_EDUCATION: &str = "education";

/// One header link pointing at an in-page section.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct NavItem {
    pub label: String,
    pub section_id: String,
}

impl NavItem {
    pub fn new(label: impl Into<String>, section_id: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            section_id: section_id.into(),
        }
    }

    /// In-page anchor, e.g. `#about`.
    pub fn href(&self) -> String {
        format!("#{}", self.section_id)
    }
}

/// Header links in display order.
pub fn builtin_nav_items() -> Vec<NavItem> {
    vec![
        NavItem::new("Home", SECTION_TOP),
        NavItem::new("About Me", SECTION_ABOUT),
        NavItem::new("Experience", SECTION_EXPERIENCE),
        NavItem::new("Education", SECTION_EDUCATION),
    ]
}

/// Returns whether `value` is a well-formed section id.
pub fn is_valid_section_id(value: &str) -> bool {
    SECTION_ID_RE.is_match(value)
}

/// Validates label presence, id shape and id uniqueness.
pub fn validate_nav_items(items: &[NavItem]) -> Result<(), NavValidationError> {
    if items.is_empty() {
        return Err(NavValidationError::Empty);
    }
    let mut seen = BTreeSet::<&str>::new();
    for item in items {
        if item.label.trim().is_empty() {
            return Err(NavValidationError::BlankLabel(item.section_id.clone()));
        }
        if !is_valid_section_id(&item.section_id) {
            return Err(NavValidationError::InvalidSectionId(
                item.section_id.clone(),
            ));
        }
        if !seen.insert(item.section_id.as_str()) {
            return Err(NavValidationError::DuplicateSectionId(
                item.section_id.clone(),
            ));
        }
    }
    Ok(())
}

/// Nav list configuration errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NavValidationError {
    Empty,
    BlankLabel(String),
    InvalidSectionId(String),
    DuplicateSectionId(String),
    UnknownDefaultSection(String),
}

impl Display for NavValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Empty => write!(f, "nav list must contain at least one item"),
            Self::BlankLabel(id) => write!(f, "nav item `{id}` has a blank label"),
            Self::InvalidSectionId(id) => write!(f, "invalid section id: `{id}`"),
            Self::DuplicateSectionId(id) => write!(f, "duplicate section id: `{id}`"),
            Self::UnknownDefaultSection(id) => {
                write!(f, "default section `{id}` is not in the nav list")
            }
        }
    }
}

impl Error for NavValidationError {}
