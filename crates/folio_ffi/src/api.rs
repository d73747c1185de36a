//! FFI use-case API for the page host.
//!
//! # Responsibility
//! - Expose navigation reducers and content to the view layer via FRB.
//! - Keep the view layer the owner of per-page state: every call takes the
//!   previous state and returns the next one.
//!
//! # Invariants
//! - Exported functions must not panic across the FFI boundary.
//! - Failures are reported in response envelopes (`ok` + `message`).

use folio_core::{
    builtin_nav_items, core_version as core_version_inner, init_logging as init_logging_inner,
    ping as ping_inner, ActiveSection, CarouselError, CarouselState, GalleryCommand, IntersectionEvent,
    NavConfig, PortfolioContent, ScrollState, DEFAULT_THEME,
};
use log::warn;
use std::path::PathBuf;
use std::sync::OnceLock;

const CONTENT_PATH_ENV: &str = "FOLIO_CONTENT_PATH";
static CONTENT: OnceLock<Result<PortfolioContent, String>> = OnceLock::new();

/// Minimal health-check API for FRB smoke integration.
///
/// # FFI contract
/// - Sync call, non-blocking.
/// - Never throws; always returns a UTF-8 string.
#[flutter_rust_bridge::frb(sync)]
pub fn ping() -> String {
    ping_inner().to_owned()
}

/// Expose core crate version through FFI.
#[flutter_rust_bridge::frb(sync)]
pub fn core_version() -> String {
    core_version_inner().to_owned()
}

/// Initializes Rust core logging once per process.
///
/// # FFI contract
/// - Safe to call repeatedly with the same `level + log_dir`.
/// - Returns empty string on success and an error message on failure.
#[flutter_rust_bridge::frb(sync)]
pub fn init_logging(level: String, log_dir: String) -> String {
    match init_logging_inner(level.as_str(), log_dir.as_str()) {
        Ok(()) => String::new(),
        Err(err) => err,
    }
}

/// Content document envelope.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContentResponse {
    pub ok: bool,
    /// Validated content re-serialized as JSON; empty on failure.
    pub json: String,
    pub message: String,
}

/// Header link for the view layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavItemView {
    pub label: String,
    pub section_id: String,
    pub href: String,
}

/// Result of folding one scroll sample.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScrollUpdate {
    pub header_visible: bool,
    /// Pass back as `last_position` with the next sample.
    pub last_position: f64,
}

/// Gallery overlay envelope.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GalleryResponse {
    pub ok: bool,
    /// `false` once the overlay has been closed.
    pub open: bool,
    pub images: Vec<String>,
    pub index: u32,
    pub message: String,
}

impl GalleryResponse {
    fn open(state: &CarouselState) -> Self {
        let Ok(index) = u32::try_from(state.index()) else {
            return Self::failure(format!(
                "gallery index {} does not fit the host index type",
                state.index()
            ));
        };
        Self {
            ok: true,
            open: true,
            images: state.images().to_vec(),
            index,
            message: String::new(),
        }
    }

    fn closed() -> Self {
        Self {
            ok: true,
            open: false,
            images: Vec::new(),
            index: 0,
            message: String::new(),
        }
    }

    fn failure(message: impl Into<String>) -> Self {
        Self {
            ok: false,
            open: false,
            images: Vec::new(),
            index: 0,
            message: message.into(),
        }
    }
}

/// Returns the page content, from `FOLIO_CONTENT_PATH` when set.
///
/// # FFI contract
/// - First call reads and validates the document; later calls reuse it.
#[flutter_rust_bridge::frb(sync)]
pub fn portfolio_content_json() -> ContentResponse {
    let content = match load_content() {
        Ok(content) => content,
        Err(message) => {
            return ContentResponse {
                ok: false,
                json: String::new(),
                message: message.clone(),
            }
        }
    };
    match serde_json::to_string(content) {
        Ok(json) => ContentResponse {
            ok: true,
            json,
            message: format!("Loaded {} project(s).", content.projects.len()),
        },
        Err(err) => ContentResponse {
            ok: false,
            json: String::new(),
            message: format!("portfolio_content_json failed: {err}"),
        },
    }
}

/// Shared colour tokens as a JSON object.
#[flutter_rust_bridge::frb(sync)]
pub fn theme_tokens_json() -> String {
    // Only `&'static str` fields; serialization cannot fail.
    serde_json::to_string(&DEFAULT_THEME).unwrap_or_default()
}

/// Header links in display order.
#[flutter_rust_bridge::frb(sync)]
pub fn nav_items() -> Vec<NavItemView> {
    builtin_nav_items()
        .into_iter()
        .map(|item| NavItemView {
            href: item.href(),
            label: item.label,
            section_id: item.section_id,
        })
        .collect()
}

/// Folds one scroll sample into header visibility.
#[flutter_rust_bridge::frb(sync)]
pub fn scroll_update(last_position: f64, current_position: f64) -> ScrollUpdate {
    let threshold = NavConfig::default().scroll_threshold_px;
    let state = ScrollState {
        last_position,
        hidden: false,
    }
    .reduce(current_position, threshold);
    ScrollUpdate {
        header_visible: state.is_visible(),
        last_position: state.last_position,
    }
}

/// Returns the active section id after one intersection report.
///
/// Unknown ids and `is_intersecting == false` leave `current` unchanged.
#[flutter_rust_bridge::frb(sync)]
pub fn active_section_observe(
    current: String,
    section_id: String,
    is_intersecting: bool,
) -> String {
    let config = NavConfig::default();
    let known = config
        .section_ids()
        .map(str::to_string)
        .collect::<Vec<_>>();
    let current = if known.contains(&current) {
        current
    } else {
        config.default_section.clone()
    };
    ActiveSection {
        current_id: current,
    }
    .reduce(&IntersectionEvent::new(section_id, is_intersecting), &known)
    .current_id
}

/// Like [`active_section_observe`], deriving the flag from element geometry
/// against the default central band.
#[flutter_rust_bridge::frb(sync)]
pub fn active_section_from_geometry(
    current: String,
    section_id: String,
    element_top: f64,
    element_bottom: f64,
    viewport_height: f64,
) -> String {
    let band = NavConfig::default().band;
    let is_intersecting = band.intersects(element_top, element_bottom, viewport_height);
    active_section_observe(current, section_id, is_intersecting)
}

/// Opens the gallery of the project at `project_index`.
#[flutter_rust_bridge::frb(sync)]
pub fn gallery_open(project_index: u32) -> GalleryResponse {
    let content = match load_content() {
        Ok(content) => content,
        Err(message) => return GalleryResponse::failure(message.clone()),
    };
    let Some(project) = content.projects.get(project_index as usize) else {
        return GalleryResponse::failure(format!(
            "gallery_open failed: project index {project_index} out of range"
        ));
    };
    match CarouselState::open(project.gallery_images()) {
        Ok(state) => GalleryResponse::open(&state),
        Err(err) => GalleryResponse::failure(format!("gallery_open failed: {err}")),
    }
}

/// Applies one overlay command to a host-held gallery position.
///
/// `command` accepts `next|previous|close` or a DOM key value
/// (`ArrowRight|ArrowLeft|Escape`). Empty `images` means the overlay is
/// closed: `close` stays a no-op and stepping fails with a closed error.
/// An `index` outside `images` is rejected.
#[flutter_rust_bridge::frb(sync)]
pub fn gallery_command(images: Vec<String>, index: u32, command: String) -> GalleryResponse {
    let Some(command) = parse_gallery_command(command.trim()) else {
        return GalleryResponse::failure(format!("unsupported gallery command `{command}`"));
    };
    if images.is_empty() {
        return match command {
            GalleryCommand::Close => GalleryResponse::closed(),
            GalleryCommand::Next | GalleryCommand::Previous => GalleryResponse::failure(format!(
                "gallery_command failed: {}",
                CarouselError::Closed
            )),
        };
    }
    let Ok(index) = usize::try_from(index) else {
        return GalleryResponse::failure(format!("gallery_command failed: index {index} too large"));
    };
    let state = match CarouselState::at(images, index) {
        Ok(state) => state,
        Err(err) => return GalleryResponse::failure(format!("gallery_command failed: {err}")),
    };
    match command {
        GalleryCommand::Next => GalleryResponse::open(&state.next()),
        GalleryCommand::Previous => GalleryResponse::open(&state.previous()),
        GalleryCommand::Close => GalleryResponse::closed(),
    }
}

fn parse_gallery_command(value: &str) -> Option<GalleryCommand> {
    match value {
        "next" => Some(GalleryCommand::Next),
        "previous" | "prev" => Some(GalleryCommand::Previous),
        "close" => Some(GalleryCommand::Close),
        key => GalleryCommand::from_key(key),
    }
}

fn load_content() -> Result<&'static PortfolioContent, &'static String> {
    CONTENT
        .get_or_init(|| {
            let loaded = match content_path_override() {
                Some(path) => std::fs::read_to_string(&path)
                    .map_err(|err| format!("failed to read `{}`: {err}", path.display()))
                    .and_then(|raw| {
                        PortfolioContent::from_json_str(&raw).map_err(|err| err.to_string())
                    }),
                None => PortfolioContent::builtin().map_err(|err| err.to_string()),
            };
            if let Err(err) = &loaded {
                warn!("event=content_load module=ffi status=error error={err}");
            }
            loaded
        })
        .as_ref()
}

fn content_path_override() -> Option<PathBuf> {
    let raw = std::env::var(CONTENT_PATH_ENV).ok()?;
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(PathBuf::from(trimmed))
    }
}
