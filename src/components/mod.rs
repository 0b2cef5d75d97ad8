pub mod character_card;
pub mod character_modal;
pub mod roster_view;

use ratatui::style::Color;

// Re-export core Component trait
pub use tui_dispatch::Component;

pub use character_card::{status_glyph, CharacterCard, CharacterCardProps, StatusGlyph};
pub use character_modal::{CharacterModal, CharacterModalProps};
pub use roster_view::{RosterView, RosterViewProps};

pub(crate) const BG_BASE: Color = Color::Rgb(14, 20, 34);
pub(crate) const BG_PANEL: Color = Color::Rgb(24, 36, 58);
pub(crate) const TEXT_MAIN: Color = Color::Rgb(226, 232, 240);
pub(crate) const TEXT_DIM: Color = Color::Rgb(148, 163, 184);
pub(crate) const PORTAL_GREEN: Color = Color::Rgb(151, 206, 76);
pub(crate) const MORTY_YELLOW: Color = Color::Rgb(240, 225, 48);
pub(crate) const SUMMER_ROSE: Color = Color::Rgb(232, 72, 108);

const SPINNER: [&str; 8] = ["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧"];

pub(crate) fn spinner_frame(tick_count: u32) -> &'static str {
    SPINNER[tick_count as usize % SPINNER.len()]
}
