//! Map widget - paints the tile grid

use ratatui::prelude::*;
use ratatui::widgets::Widget;

use gw_core::world::World;

use crate::display::tile_color;

/// Widget rendering the full grid snapshot, one glyph per cell.
/// World rows grow upward, so the top screen row shows the highest y.
pub struct MapWidget<'a> {
    world: &'a World,
}

impl<'a> MapWidget<'a> {
    pub fn new(world: &'a World) -> Self {
        Self { world }
    }
}

impl Widget for MapWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let cols = self.world.width().min(area.width as usize);
        let rows = self.world.height().min(area.height as usize);

        for sx in 0..cols {
            for sy in 0..rows {
                let kind = self.world.tile(sx, self.world.height() - 1 - sy);
                let x = area.x + sx as u16;
                let y = area.y + sy as u16;
                if let Some(cell) = buf.cell_mut((x, y)) {
                    cell.set_char(kind.glyph())
                        .set_fg(tile_color(kind.foreground()))
                        .set_bg(tile_color(kind.background()));
                }
            }
        }
    }
}
