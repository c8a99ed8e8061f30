use ratatui::{buffer::Buffer, layout::Rect, widgets::Widget};

use crate::domain::rain::RainField;

use super::styles;

/// Paints the rain field as a full-area background.
pub struct RainWidget<'a> {
    field: &'a RainField,
}

impl<'a> RainWidget<'a> {
    pub fn new(field: &'a RainField) -> Self {
        Self { field }
    }
}

impl Widget for RainWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        buf.set_style(area, styles::rain_background_style());

        let height = area.height.min(self.field.height());
        let width = area.width.min(self.field.width());
        for y in 0..height {
            for x in 0..width {
                let Some(cell) = self.field.cell(x, y).filter(|cell| cell.is_lit()) else {
                    continue;
                };
                if let Some(target) = buf.cell_mut((area.x + x, area.y + y)) {
                    target
                        .set_char(cell.glyph)
                        .set_style(styles::rain_glyph_style(cell.intensity));
                }
            }
        }
    }
}
