//! Terminal widget showing a [`PixelCanvas`].

use backdrop_core::{PixelCanvas, Rgba};
use ratatui::{buffer::Buffer, layout::Rect, style::Color, widgets::Widget};

/// Upper half block: foreground paints the top pixel, background the bottom.
const HALF_BLOCK: char = '▀';

/// Draws a canvas at two vertical pixels per terminal cell.
#[derive(Debug, Clone, Copy)]
pub struct HalfBlockCanvas<'a> {
    canvas: &'a PixelCanvas,
}

impl<'a> HalfBlockCanvas<'a> {
    pub fn new(canvas: &'a PixelCanvas) -> Self {
        Self { canvas }
    }
}

/// Pixel size of a terminal area.
pub fn pixel_size(columns: u16, rows: u16) -> (u32, u32) {
    (columns as u32, rows as u32 * 2)
}

fn to_color(color: Rgba) -> Color {
    Color::Rgb(color.r, color.g, color.b)
}

impl Widget for HalfBlockCanvas<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let background = self.canvas.background();
        for row in 0..area.height {
            for col in 0..area.width {
                let x = col as u32;
                let y = row as u32 * 2;
                let top = self.canvas.pixel(x, y).unwrap_or(background);
                let bottom = self.canvas.pixel(x, y + 1).unwrap_or(background);
                if let Some(cell) = buf.cell_mut((area.x + col, area.y + row)) {
                    cell.set_char(HALF_BLOCK)
                        .set_fg(to_color(top))
                        .set_bg(to_color(bottom));
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use backdrop_core::Surface;

    #[test]
    fn test_two_pixels_per_cell() {
        let background = Rgba::rgb(1, 2, 3);
        let mut canvas = PixelCanvas::new(2, 2, background);
        canvas.fill_rect(backdrop_core::Rect::new(0.0, 0.0, 1.0, 1.0), Rgba::WHITE);

        let area = Rect::new(0, 0, 2, 1);
        let mut buf = Buffer::empty(area);
        HalfBlockCanvas::new(&canvas).render(area, &mut buf);

        let lit = &buf[(0, 0)];
        assert_eq!(lit.symbol(), "▀");
        assert_eq!(lit.fg, Color::Rgb(255, 255, 255));
        assert_eq!(lit.bg, Color::Rgb(1, 2, 3));
        assert_eq!(buf[(1, 0)].fg, Color::Rgb(1, 2, 3));
    }

    #[test]
    fn test_area_larger_than_canvas_uses_background() {
        let background = Rgba::rgb(9, 9, 9);
        let canvas = PixelCanvas::new(1, 1, background);
        let area = Rect::new(0, 0, 3, 2);
        let mut buf = Buffer::empty(area);
        HalfBlockCanvas::new(&canvas).render(area, &mut buf);
        assert_eq!(buf[(2, 1)].bg, Color::Rgb(9, 9, 9));
    }

    #[test]
    fn test_pixel_size() {
        assert_eq!(pixel_size(80, 24), (80, 48));
    }
}
