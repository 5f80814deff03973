//! Status line widget

use chrono::Local;
use ratatui::layout::Alignment;
use ratatui::prelude::*;
use ratatui::widgets::{Paragraph, Widget};

use gw_core::world::World;

/// One-line HUD: the tile under the avatar, wanderer and move counters,
/// the latest message, and a wall clock on the right.
pub struct StatusWidget<'a> {
    world: &'a World,
    message: &'a str,
}

impl<'a> StatusWidget<'a> {
    pub fn new(world: &'a World, message: &'a str) -> Self {
        Self { world, message }
    }
}

impl Widget for StatusWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let player = self.world.player();
        let tile = self.world.tile(player.x, player.y);

        let mut left = format!(
            "Tile: {}  Wanderers left: {}  Moves: {}",
            tile.description(),
            self.world.wanderers().len(),
            self.world.recorded_actions().len(),
        );
        if !self.message.is_empty() {
            left.push_str("  ");
            left.push_str(self.message);
        }

        Paragraph::new(left).render(area, buf);

        let clock = Local::now().format("%Y-%m-%d %H:%M:%S").to_string();
        Paragraph::new(clock)
            .alignment(Alignment::Right)
            .render(area, buf);
    }
}
