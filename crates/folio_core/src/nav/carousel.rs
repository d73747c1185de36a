//! Wrapping image carousel for the project gallery overlay.
//!
//! # Invariants
//! - An open carousel never holds an empty image sequence.
//! - `index` is always in `[0, len)`; `next`/`previous` wrap around.
//! - The image sequence is immutable while open.
//! - Rejected transitions leave the previous state untouched.
//!
//! ```text
//! Closed --open(images)--> Open(0)
//! Open(i) --next--> Open((i + 1) % n)
//! Open(i) --previous--> Open((i + n - 1) % n)
//! Open(_) --close--> Closed
//! ```

use log::{debug, warn};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Opening a gallery with zero images.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InvalidGalleryError;

impl Display for InvalidGalleryError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "gallery must contain at least one image")
    }
}

impl Error for InvalidGalleryError {}

/// Carousel transition errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CarouselError {
    InvalidGallery(InvalidGalleryError),
    /// `next`/`previous` on a closed carousel.
    Closed,
    /// Host-held position outside `[0, len)`.
    IndexOutOfRange { index: usize, len: usize },
}

impl Display for CarouselError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidGallery(err) => write!(f, "{err}"),
            Self::Closed => write!(f, "carousel is closed"),
            Self::IndexOutOfRange { index, len } => {
                write!(f, "gallery index {index} out of range for {len} image(s)")
            }
        }
    }
}

impl Error for CarouselError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::InvalidGallery(err) => Some(err),
            Self::Closed | Self::IndexOutOfRange { .. } => None,
        }
    }
}

impl From<InvalidGalleryError> for CarouselError {
    fn from(value: InvalidGalleryError) -> Self {
        Self::InvalidGallery(value)
    }
}

/// Discrete overlay commands from pointer or keyboard input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GalleryCommand {
    Next,
    Previous,
    Close,
}

impl GalleryCommand {
    /// Maps a DOM `KeyboardEvent.key` value to a command.
    pub fn from_key(key: &str) -> Option<Self> {
        match key {
            "ArrowRight" => Some(Self::Next),
            "ArrowLeft" => Some(Self::Previous),
            "Escape" | "Esc" => Some(Self::Close),
            _ => None,
        }
    }
}

/// Open carousel: an image sequence and a position in it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CarouselState {
    images: Vec<String>,
    index: usize,
}

impl CarouselState {
    /// Starts at index 0. Fails on an empty sequence.
    pub fn open(images: Vec<String>) -> Result<Self, InvalidGalleryError> {
        if images.is_empty() {
            return Err(InvalidGalleryError);
        }
        Ok(Self { images, index: 0 })
    }

    /// Rebuilds an open state from a host-held position.
    ///
    /// A stale or corrupted position is rejected instead of wrapped.
    pub fn at(images: Vec<String>, index: usize) -> Result<Self, CarouselError> {
        let state = Self::open(images)?;
        let len = state.len();
        if index >= len {
            return Err(CarouselError::IndexOutOfRange { index, len });
        }
        Ok(Self { index, ..state })
    }

    pub fn next(self) -> Self {
        let index = (self.index + 1) % self.images.len();
        Self { index, ..self }
    }

    pub fn previous(self) -> Self {
        let len = self.images.len();
        let index = (self.index + len - 1) % len;
        Self { index, ..self }
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn len(&self) -> usize {
        self.images.len()
    }

    /// Always `false`; an open carousel holds at least one image.
    pub fn is_empty(&self) -> bool {
        self.images.is_empty()
    }

    pub fn images(&self) -> &[String] {
        &self.images
    }

    pub fn current_image(&self) -> &str {
        &self.images[self.index]
    }
}

/// Closed/Open holder owned by one page view.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Carousel {
    #[default]
    Closed,
    Open(CarouselState),
}

impl Carousel {
    /// Opens (or replaces) the gallery. On failure the current state stays.
    pub fn open(&mut self, images: Vec<String>) -> Result<usize, CarouselError> {
        let state = CarouselState::open(images).inspect_err(|_| {
            warn!("event=gallery_open module=carousel status=error reason=empty_gallery");
        })?;
        debug!(
            "event=gallery_open module=carousel status=ok images={}",
            state.len()
        );
        let index = state.index();
        *self = Self::Open(state);
        Ok(index)
    }

    pub fn next(&mut self) -> Result<usize, CarouselError> {
        self.step(CarouselState::next)
    }

    pub fn previous(&mut self) -> Result<usize, CarouselError> {
        self.step(CarouselState::previous)
    }

    /// Returns `false` when already closed; closing twice is a no-op.
    pub fn close(&mut self) -> bool {
        match std::mem::take(self) {
            Self::Closed => false,
            Self::Open(_) => {
                debug!("event=gallery_close module=carousel status=ok");
                true
            }
        }
    }

    /// Applies one overlay command. `Close` yields `Ok(None)`.
    pub fn apply(&mut self, command: GalleryCommand) -> Result<Option<usize>, CarouselError> {
        match command {
            GalleryCommand::Next => self.next().map(Some),
            GalleryCommand::Previous => self.previous().map(Some),
            GalleryCommand::Close => {
                self.close();
                Ok(None)
            }
        }
    }

    pub fn is_open(&self) -> bool {
        matches!(self, Self::Open(_))
    }

    pub fn state(&self) -> Option<&CarouselState> {
        match self {
            Self::Open(state) => Some(state),
            Self::Closed => None,
        }
    }

    fn step(&mut self, f: fn(CarouselState) -> CarouselState) -> Result<usize, CarouselError> {
        let Self::Open(state) = std::mem::take(self) else {
            return Err(CarouselError::Closed);
        };
        let state = f(state);
        let index = state.index();
        *self = Self::Open(state);
        Ok(index)
    }
}
