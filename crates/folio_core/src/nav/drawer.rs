//! Mobile navigation drawer.

/// Open/closed flag for the small-screen nav menu.
///
/// The drawer closes when a nav link is chosen and on every hash change.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MenuDrawer {
    open: bool,
}

impl MenuDrawer {
    pub fn toggle(&mut self) -> bool {
        self.open = !self.open;
        self.open
    }

    /// Returns whether the drawer was open.
    pub fn close(&mut self) -> bool {
        std::mem::replace(&mut self.open, false)
    }

    pub fn is_open(&self) -> bool {
        self.open
    }
}
