//! Shared colour tokens handed to the view layer as static data.

use serde::Serialize;

/// Page-wide colour palette. Values are CSS colour strings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ThemeTokens {
    pub background: &'static str,
    pub ink: &'static str,
    pub muted: &'static str,
    pub card: &'static str,
    pub border: &'static str,
    pub accent: &'static str,
    pub chip: &'static str,
    pub primary: &'static str,
}

pub const DEFAULT_THEME: ThemeTokens = ThemeTokens {
    background: "#1f2330",
    ink: "#ffffff",
    muted: "#c9ced8",
    card: "#252a39",
    border: "rgba(255,255,255,0.08)",
    accent: "#7a5a45",
    chip: "rgba(255,255,255,0.08)",
    primary: "#9461fb",
};

impl Default for ThemeTokens {
    fn default() -> Self {
        DEFAULT_THEME
    }
}
