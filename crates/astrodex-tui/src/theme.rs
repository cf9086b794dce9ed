//! Colors and semantic styles for the viewer.
//!
//! Screens never build colors inline from RGB values; they pick a palette
//! constant or one of the style helpers below.

use ratatui::style::{Color, Modifier, Style};

// ── Palette ───────────────────────────────────────────────────────────

pub const NEBULA_VIOLET: Color = Color::Rgb(167, 139, 250); // #a78bfa
pub const ION_CYAN: Color = Color::Rgb(103, 232, 249); // #67e8f9
pub const SOLAR_ORANGE: Color = Color::Rgb(251, 146, 60); // #fb923c
pub const HAZARD_AMBER: Color = Color::Rgb(252, 211, 77); // #fcd34d
pub const OXYGEN_GREEN: Color = Color::Rgb(74, 222, 128); // #4ade80
pub const ALERT_RED: Color = Color::Rgb(248, 113, 113); // #f87171

pub const STARLIGHT: Color = Color::Rgb(226, 232, 240); // #e2e8f0
pub const HULL_GRAY: Color = Color::Rgb(100, 116, 139); // #64748b
pub const PANEL_BG: Color = Color::Rgb(30, 41, 59); // #1e293b
pub const VOID_BG: Color = Color::Rgb(15, 23, 42); // #0f172a

// ── Chrome ────────────────────────────────────────────────────────────

pub fn title_style() -> Style {
    Style::new().fg(ION_CYAN).add_modifier(Modifier::BOLD)
}

pub fn border_focused() -> Style {
    Style::new().fg(NEBULA_VIOLET)
}

pub fn border_default() -> Style {
    Style::new().fg(HULL_GRAY)
}

pub fn tab_active() -> Style {
    Style::new()
        .fg(VOID_BG)
        .bg(NEBULA_VIOLET)
        .add_modifier(Modifier::BOLD)
}

pub fn tab_inactive() -> Style {
    Style::new().fg(HULL_GRAY)
}

/// Hint text in footers, e.g. `table  recipe  search`.
pub fn key_hint() -> Style {
    Style::new().fg(HULL_GRAY)
}

/// The key itself in a hint.
pub fn key_hint_key() -> Style {
    Style::new().fg(HAZARD_AMBER).add_modifier(Modifier::BOLD)
}

// ── Tables ────────────────────────────────────────────────────────────

pub fn table_header() -> Style {
    Style::new().fg(ION_CYAN).add_modifier(Modifier::UNDERLINED)
}

pub fn table_row() -> Style {
    Style::new().fg(STARLIGHT)
}

pub fn table_selected() -> Style {
    Style::new()
        .bg(PANEL_BG)
        .fg(NEBULA_VIOLET)
        .add_modifier(Modifier::BOLD)
}

// ── Cards ─────────────────────────────────────────────────────────────

/// Icon badge of a known item.
pub fn icon_badge() -> Style {
    Style::new().fg(SOLAR_ORANGE)
}

/// Badge for a name the dataset doesn't know.
pub fn icon_fallback() -> Style {
    Style::new().fg(ALERT_RED).add_modifier(Modifier::BOLD)
}

pub fn item_name() -> Style {
    Style::new().fg(STARLIGHT).add_modifier(Modifier::BOLD)
}

pub fn item_tags() -> Style {
    Style::new().fg(HULL_GRAY).add_modifier(Modifier::ITALIC)
}
