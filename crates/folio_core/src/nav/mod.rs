//! Navigation state controllers.
//!
//! # Responsibility
//! - Header visibility from scroll samples.
//! - Active nav link from section intersection reports.
//! - Wrapping index for the gallery overlay.
//!
//! # Invariants
//! - Every transition is synchronous and never blocks.
//! - State is owned by exactly one page view; nothing here is shared.

pub mod active_section;
pub mod carousel;
pub mod drawer;
pub mod scroll;

use crate::model::nav::{builtin_nav_items, validate_nav_items, NavItem, NavValidationError};
use active_section::IntersectionBand;
use scroll::DEFAULT_SCROLL_THRESHOLD_PX;
use serde::{Deserialize, Serialize};

/// Navigation behavior configuration for one page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct NavConfig {
    pub items: Vec<NavItem>,
    /// Section highlighted before any intersection report.
    pub default_section: String,
    pub scroll_threshold_px: f64,
    pub band: IntersectionBand,
}

impl Default for NavConfig {
    fn default() -> Self {
        let items = builtin_nav_items();
        let default_section = items
            .first()
            .map(|item| item.section_id.clone())
            .unwrap_or_default();
        Self {
            items,
            default_section,
            scroll_threshold_px: DEFAULT_SCROLL_THRESHOLD_PX,
            band: IntersectionBand::default(),
        }
    }
}

impl NavConfig {
    pub fn validate(&self) -> Result<(), NavValidationError> {
        validate_nav_items(&self.items)?;
        if !self
            .items
            .iter()
            .any(|item| item.section_id == self.default_section)
        {
            return Err(NavValidationError::UnknownDefaultSection(
                self.default_section.clone(),
            ));
        }
        Ok(())
    }

    pub fn section_ids(&self) -> impl Iterator<Item = &str> {
        self.items.iter().map(|item| item.section_id.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::NavConfig;
    use crate::model::nav::NavValidationError;

    #[test]
    fn default_config_is_valid() {
        let config = NavConfig::default();
        config.validate().expect("default config should validate");
        assert_eq!(config.default_section, "top");
        assert_eq!(config.scroll_threshold_px, 80.0);
    }

    #[test]
    fn partial_json_keeps_defaults() {
        let config: NavConfig =
            serde_json::from_str(r#"{"scroll_threshold_px": 120.0}"#).expect("parse config");
        assert_eq!(config.scroll_threshold_px, 120.0);
        assert_eq!(config.items.len(), 4);
    }

    #[test]
    fn rejects_default_section_outside_items() {
        let config = NavConfig {
            default_section: "work".to_string(),
            ..NavConfig::default()
        };
        assert_eq!(
            config.validate(),
            Err(NavValidationError::UnknownDefaultSection("work".to_string()))
        );
    }
}
