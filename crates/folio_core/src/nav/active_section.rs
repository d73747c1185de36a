//! Active-section tracking for nav link highlighting.
//!
//! # Responsibility
//! - Decide which configured section is "currently viewed".
//! - Turn raw element geometry into intersection events for hosts that do
//!   not have a native intersection observer.
//!
//! # Invariants
//! - `current` is always one of the configured section ids.
//! - Before any observation `current` is the configured default.
//! - The most recent `is_intersecting == true` event wins; `false` events
//!   never change `current`.
//! - A disconnected tracker ignores every event.

use crate::model::nav::{NavItem, NavValidationError};
use log::{debug, info};
use serde::{Deserialize, Serialize};

/// Central viewport band a section must overlap to count as viewed.
///
/// Margins are fractions of the viewport height, negative values shrink the
/// band (`-0.45` top and bottom leaves the middle 10%).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct IntersectionBand {
    pub top_margin: f64,
    pub bottom_margin: f64,
    /// Minimum fraction of the element height inside the band.
    pub threshold: f64,
}

impl Default for IntersectionBand {
    fn default() -> Self {
        Self {
            top_margin: -0.45,
            bottom_margin: -0.45,
            threshold: 0.01,
        }
    }
}

impl IntersectionBand {
    /// Band edges in viewport coordinates as `(top, bottom)`.
    pub fn bounds(&self, viewport_height: f64) -> (f64, f64) {
        let top = -self.top_margin * viewport_height;
        let bottom = viewport_height + self.bottom_margin * viewport_height;
        (top, bottom)
    }

    /// Whether an element spanning `[element_top, element_bottom)` in
    /// viewport coordinates overlaps the band by at least `threshold`.
    pub fn intersects(&self, element_top: f64, element_bottom: f64, viewport_height: f64) -> bool {
        let height = element_bottom - element_top;
        if height <= 0.0 || viewport_height <= 0.0 {
            return false;
        }
        let (band_top, band_bottom) = self.bounds(viewport_height);
        let overlap = element_bottom.min(band_bottom) - element_top.max(band_top);
        if overlap <= 0.0 {
            return false;
        }
        overlap / height >= self.threshold
    }
}

/// One intersection report for a section element.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IntersectionEvent {
    pub section_id: String,
    pub is_intersecting: bool,
}

impl IntersectionEvent {
    pub fn new(section_id: impl Into<String>, is_intersecting: bool) -> Self {
        Self {
            section_id: section_id.into(),
            is_intersecting,
        }
    }
}

/// Reducer state: the id of the highlighted section.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActiveSection {
    pub current_id: String,
}

impl ActiveSection {
    /// Folds one event; ids outside `known_sections` are ignored.
    pub fn reduce(self, event: &IntersectionEvent, known_sections: &[String]) -> Self {
        if !event.is_intersecting || !known_sections.contains(&event.section_id) {
            return self;
        }
        Self {
            current_id: event.section_id.clone(),
        }
    }
}

/// Per-page active-section tracker.
#[derive(Debug, Clone)]
pub struct ActiveSectionTracker {
    sections: Vec<String>,
    active: ActiveSection,
    connected: bool,
}

impl ActiveSectionTracker {
    /// Creates a tracker over `sections` starting at `default_id`.
    pub fn new<I, S>(sections: I, default_id: &str) -> Result<Self, NavValidationError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let sections = sections.into_iter().map(Into::into).collect::<Vec<_>>();
        if sections.is_empty() {
            return Err(NavValidationError::Empty);
        }
        if !sections.iter().any(|id| id == default_id) {
            return Err(NavValidationError::UnknownDefaultSection(
                default_id.to_string(),
            ));
        }
        Ok(Self {
            sections,
            active: ActiveSection {
                current_id: default_id.to_string(),
            },
            connected: true,
        })
    }

    /// Tracker over nav items, defaulting to the first one.
    pub fn from_nav(items: &[NavItem]) -> Result<Self, NavValidationError> {
        let first = items.first().ok_or(NavValidationError::Empty)?;
        Self::new(
            items.iter().map(|item| item.section_id.clone()),
            &first.section_id,
        )
    }

    /// Applies one intersection report. Returns whether `current` changed.
    pub fn observe(&mut self, section_id: &str, is_intersecting: bool) -> bool {
        self.apply(&IntersectionEvent::new(section_id, is_intersecting))
    }

    pub fn apply(&mut self, event: &IntersectionEvent) -> bool {
        if !self.connected {
            return false;
        }
        if event.is_intersecting && !self.sections.contains(&event.section_id) {
            debug!(
                "event=section_ignored module=nav status=skip section={}",
                event.section_id
            );
            return false;
        }
        let next = self.active.clone().reduce(event, &self.sections);
        if next == self.active {
            return false;
        }
        debug!(
            "event=section_active module=nav status=ok from={} to={}",
            self.active.current_id, next.current_id
        );
        self.active = next;
        true
    }

    /// Derives the intersection flag from element geometry, then observes.
    pub fn observe_geometry(
        &mut self,
        section_id: &str,
        element_top: f64,
        element_bottom: f64,
        viewport_height: f64,
        band: &IntersectionBand,
    ) -> bool {
        let is_intersecting = band.intersects(element_top, element_bottom, viewport_height);
        self.observe(section_id, is_intersecting)
    }

    pub fn current(&self) -> &str {
        &self.active.current_id
    }

    pub fn sections(&self) -> &[String] {
        &self.sections
    }

    pub fn is_connected(&self) -> bool {
        self.connected
    }

    /// Stops observing all sections. Later events are ignored.
    pub fn disconnect(&mut self) {
        if self.connected {
            self.connected = false;
            info!(
                "event=sections_disconnect module=nav status=ok sections={}",
                self.sections.len()
            );
        }
    }
}
