//! Color theme for the Veneer TUI.
//!
//! Kanagawa Wave palette constants plus semantic mappings for severities,
//! categories, and models.

use ratatui::style::Color;

use veneer_types::{Model, Severity};

/// Kanagawa Wave color palette constants.
pub mod colors {
    use super::Color;

    // === Backgrounds (Sumi Ink) ===
    pub const BG_DARK: Color = Color::Rgb(22, 22, 29); // sumiInk0
    pub const BG_PANEL: Color = Color::Rgb(31, 31, 40); // sumiInk3
    pub const BG_POPUP: Color = Color::Rgb(54, 54, 70); // sumiInk5

    // === Foregrounds (Fuji) ===
    pub const TEXT_PRIMARY: Color = Color::Rgb(220, 215, 186); // fujiWhite
    pub const TEXT_SECONDARY: Color = Color::Rgb(200, 192, 147); // oldWhite
    pub const TEXT_MUTED: Color = Color::Rgb(114, 113, 105); // fujiGray
    pub const TEXT_DISABLED: Color = Color::Rgb(113, 124, 124); // katanaGray

    // === Primary/Brand ===
    pub const PRIMARY: Color = Color::Rgb(149, 127, 184); // oniViolet

    // === Accent Colors ===
    pub const BLUE: Color = Color::Rgb(126, 156, 216); // crystalBlue
    pub const CYAN: Color = Color::Rgb(127, 180, 202); // springBlue
    pub const GREEN: Color = Color::Rgb(152, 187, 108); // springGreen
    pub const YELLOW: Color = Color::Rgb(230, 195, 132); // carpYellow
    pub const ORANGE: Color = Color::Rgb(255, 160, 102); // surimiOrange
    pub const RED: Color = Color::Rgb(255, 93, 98); // peachRed

    // === Semantic Aliases ===
    pub const ACCENT: Color = CYAN;
    pub const SUCCESS: Color = GREEN;
    pub const WARNING: Color = YELLOW;
    pub const ERROR: Color = RED;
}

/// Severity accent color: critical red through low blue.
#[must_use]
pub fn severity_color(severity: Severity) -> Color {
    match severity {
        Severity::Critical => colors::RED,
        Severity::High => colors::ORANGE,
        Severity::Medium => colors::YELLOW,
        Severity::Low => colors::BLUE,
    }
}

/// Per-model accent color, used in the results list and model checkboxes.
#[must_use]
pub fn model_color(model: Model) -> Color {
    match model {
        Model::Gpt4o => colors::GREEN,
        Model::ClaudeOpus4 => colors::ORANGE,
        Model::DeepseekV3 => colors::BLUE,
        Model::LlamaMaverick => colors::CYAN,
    }
}
