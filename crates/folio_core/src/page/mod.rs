//! Per-page-view navigation controller.
//!
//! # Responsibility
//! - Compose the scroll, section, carousel and drawer reducers into one
//!   [`PageState`].
//! - Wire a [`PageSession`] to a [`SignalHub`] on mount and release every
//!   subscription on unmount.
//!
//! # Invariants
//! - One session owns exactly one instance of each state holder.
//! - A rejected transition leaves the previous state in place.
//! - After unmount no signal reaches the session state.

use crate::model::content::{ContentValidationError, PortfolioContent};
use crate::model::nav::NavValidationError;
use crate::nav::active_section::ActiveSectionTracker;
use crate::nav::carousel::{Carousel, CarouselError, GalleryCommand};
use crate::nav::drawer::MenuDrawer;
use crate::nav::scroll::ScrollVisibility;
use crate::nav::NavConfig;
use crate::signal::{PageEvent, SignalHub, SignalKind, Subscription};
use log::{info, warn};
use serde::Serialize;
use std::cell::{Cell, RefCell};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::rc::Rc;
use uuid::Uuid;

const SUBSCRIBED_KINDS: [SignalKind; 4] = [
    SignalKind::Scroll,
    SignalKind::Intersection,
    SignalKind::HashChange,
    SignalKind::Command,
];

/// Gallery overlay projection for the view layer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GallerySnapshot {
    pub index: usize,
    pub len: usize,
    pub image: String,
}

/// Derived state the view renders from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PageSnapshot {
    pub header_visible: bool,
    pub active_section: String,
    pub menu_open: bool,
    pub gallery: Option<GallerySnapshot>,
}

/// Composite reducer over all navigation state of one page.
#[derive(Debug, Clone)]
pub struct PageState {
    scroll: ScrollVisibility,
    sections: ActiveSectionTracker,
    carousel: Carousel,
    drawer: MenuDrawer,
}

impl PageState {
    pub fn new(config: &NavConfig) -> Result<Self, PageError> {
        config.validate()?;
        let sections = ActiveSectionTracker::new(
            config.section_ids().map(str::to_string),
            &config.default_section,
        )?;
        Ok(Self {
            scroll: ScrollVisibility::new(config.scroll_threshold_px),
            sections,
            carousel: Carousel::default(),
            drawer: MenuDrawer::default(),
        })
    }

    /// Applies one inbound event.
    pub fn apply(&mut self, event: &PageEvent) -> Result<(), CarouselError> {
        match event {
            PageEvent::Scroll { position } => {
                self.scroll.update(*position);
            }
            PageEvent::Intersection(intersection) => {
                self.sections.apply(intersection);
            }
            PageEvent::HashChange => {
                self.drawer.close();
            }
            PageEvent::Gallery(command) => {
                self.carousel.apply(*command)?;
            }
            PageEvent::MenuToggle => {
                self.drawer.toggle();
            }
            PageEvent::NavSelected { .. } => {
                self.drawer.close();
            }
        }
        Ok(())
    }

    pub fn open_gallery(&mut self, images: Vec<String>) -> Result<usize, CarouselError> {
        self.carousel.open(images)
    }

    pub fn snapshot(&self) -> PageSnapshot {
        PageSnapshot {
            header_visible: self.scroll.is_visible(),
            active_section: self.sections.current().to_string(),
            menu_open: self.drawer.is_open(),
            gallery: self.carousel.state().map(|state| GallerySnapshot {
                index: state.index(),
                len: state.len(),
                image: state.current_image().to_string(),
            }),
        }
    }

    pub fn carousel(&self) -> &Carousel {
        &self.carousel
    }

    pub fn sections(&self) -> &ActiveSectionTracker {
        &self.sections
    }

    fn teardown(&mut self) {
        self.sections.disconnect();
        self.carousel.close();
        self.drawer.close();
    }
}

/// One mounted page view: content, state and its signal subscriptions.
pub struct PageSession {
    id: Uuid,
    content: PortfolioContent,
    state: Rc<RefCell<PageState>>,
    subscriptions: Vec<Subscription>,
    // Set when unmount found the state borrowed; the reset runs on next access.
    reset_pending: Cell<bool>,
}

impl PageSession {
    /// Validates configuration and subscribes to every page signal on `hub`.
    pub fn mount(
        hub: &SignalHub,
        content: PortfolioContent,
        config: &NavConfig,
    ) -> Result<Self, PageError> {
        content.validate()?;
        let id = Uuid::new_v4();
        let state = Rc::new(RefCell::new(PageState::new(config)?));

        let subscriptions = SUBSCRIBED_KINDS
            .iter()
            .map(|kind| {
                let state = Rc::clone(&state);
                hub.subscribe(*kind, move |event| apply_signal(id, &state, event))
            })
            .collect::<Vec<_>>();

        info!(
            "event=page_mount module=page status=ok session={} sections={} projects={}",
            id,
            config.items.len(),
            content.projects.len()
        );
        Ok(Self {
            id,
            content,
            state,
            subscriptions,
            reset_pending: Cell::new(false),
        })
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn content(&self) -> &PortfolioContent {
        &self.content
    }

    pub fn is_mounted(&self) -> bool {
        !self.subscriptions.is_empty()
    }

    /// Opens the gallery overlay for the project at `project_index`.
    pub fn open_project_gallery(&self, project_index: usize) -> Result<usize, PageError> {
        self.ensure_mounted()?;
        let project = self
            .content
            .projects
            .get(project_index)
            .ok_or_else(|| PageError::ProjectOutOfRange {
                index: project_index,
                len: self.content.projects.len(),
            })?;
        let index = self
            .state
            .borrow_mut()
            .open_gallery(project.gallery_images())?;
        Ok(index)
    }

    /// Applies an event directly, bypassing the hub.
    pub fn handle(&self, event: &PageEvent) -> Result<(), PageError> {
        self.ensure_mounted()?;
        self.state.borrow_mut().apply(event)?;
        Ok(())
    }

    pub fn gallery_command(&self, command: GalleryCommand) -> Result<(), PageError> {
        self.handle(&PageEvent::Gallery(command))
    }

    pub fn snapshot(&self) -> PageSnapshot {
        if self.reset_pending.get() {
            self.reset_state();
        }
        self.state.borrow().snapshot()
    }

    /// Releases every subscription and resets transient overlays.
    ///
    /// Idempotent. Later commands fail with [`PageError::Unmounted`].
    pub fn unmount(&mut self) {
        self.teardown();
    }

    fn ensure_mounted(&self) -> Result<(), PageError> {
        if self.is_mounted() {
            Ok(())
        } else {
            Err(PageError::Unmounted)
        }
    }

    fn teardown(&mut self) {
        if self.subscriptions.is_empty() {
            return;
        }
        let released = self.subscriptions.len();
        self.subscriptions.clear();
        self.reset_state();
        info!(
            "event=page_unmount module=page status=ok session={} released={}",
            self.id, released
        );
    }
}

impl PageSession {
    fn reset_state(&self) {
        match self.state.try_borrow_mut() {
            Ok(mut state) => {
                state.teardown();
                self.reset_pending.set(false);
            }
            Err(_) => {
                if !self.reset_pending.replace(true) {
                    warn!(
                        "event=page_unmount module=page status=deferred reason=busy session={}",
                        self.id
                    );
                }
            }
        }
    }
}

impl Drop for PageSession {
    fn drop(&mut self) {
        self.teardown();
    }
}

fn apply_signal(session: Uuid, state: &RefCell<PageState>, event: &PageEvent) {
    let Ok(mut state) = state.try_borrow_mut() else {
        warn!(
            "event=page_signal module=page status=skip reason=busy session={} kind={}",
            session,
            event.kind().as_str()
        );
        return;
    };
    if let Err(err) = state.apply(event) {
        warn!(
            "event=page_signal module=page status=rejected session={} kind={} error={}",
            session,
            event.kind().as_str(),
            err
        );
    }
}

/// Page session errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PageError {
    Nav(NavValidationError),
    Content(ContentValidationError),
    Gallery(CarouselError),
    ProjectOutOfRange { index: usize, len: usize },
    Unmounted,
}

impl Display for PageError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Nav(err) => write!(f, "invalid nav config: {err}"),
            Self::Content(err) => write!(f, "invalid content: {err}"),
            Self::Gallery(err) => write!(f, "gallery transition rejected: {err}"),
            Self::ProjectOutOfRange { index, len } => {
                write!(f, "project index {index} out of range (projects={len})")
            }
            Self::Unmounted => write!(f, "page session is unmounted"),
        }
    }
}

impl Error for PageError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Nav(err) => Some(err),
            Self::Content(err) => Some(err),
            Self::Gallery(err) => Some(err),
            Self::ProjectOutOfRange { .. } | Self::Unmounted => None,
        }
    }
}

impl From<NavValidationError> for PageError {
    fn from(value: NavValidationError) -> Self {
        Self::Nav(value)
    }
}

impl From<ContentValidationError> for PageError {
    fn from(value: ContentValidationError) -> Self {
        Self::Content(value)
    }
}

impl From<CarouselError> for PageError {
    fn from(value: CarouselError) -> Self {
        Self::Gallery(value)
    }
}
