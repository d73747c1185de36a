//! Navigation state core for the portfolio site.
//! Views render from the state derived here; this crate owns no markup.

pub mod logging;
pub mod model;
pub mod nav;
pub mod page;
pub mod signal;

pub use logging::{default_log_level, init_logging, logging_status};
pub use model::content::{
    AboutProfile, ContentLoadError, ContentValidationError, EducationItem, ExperienceItem,
    PortfolioContent, Project, SkillCatalog, SkillCategory, DEFAULT_ABOUT_ROLE,
};
pub use model::nav::{builtin_nav_items, NavItem, NavValidationError};
pub use model::theme::{ThemeTokens, DEFAULT_THEME};
pub use nav::active_section::{
    ActiveSection, ActiveSectionTracker, IntersectionBand, IntersectionEvent,
};
pub use nav::carousel::{
    Carousel, CarouselError, CarouselState, GalleryCommand, InvalidGalleryError,
};
pub use nav::drawer::MenuDrawer;
pub use nav::scroll::{ScrollState, ScrollVisibility, DEFAULT_SCROLL_THRESHOLD_PX};
pub use nav::NavConfig;
pub use page::{GallerySnapshot, PageError, PageSession, PageSnapshot, PageState};
pub use signal::{PageEvent, SignalHub, SignalKind, Subscription};

/// Minimal health-check API for host integration.
pub fn ping() -> &'static str {
    "pong"
}

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::{core_version, ping};

    #[test]
    fn ping_returns_pong() {
        assert_eq!(ping(), "pong");
    }

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }
}
