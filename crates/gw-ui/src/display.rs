//! Color conversion for tile rendering

use gw_core::tile::Rgb;
use ratatui::style::Color;

/// Convert a tile RGB color to a ratatui Color
pub(crate) fn tile_color(rgb: Rgb) -> Color {
    Color::Rgb(rgb.0, rgb.1, rgb.2)
}
