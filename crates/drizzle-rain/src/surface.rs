//! Drawing surfaces the rain renders onto.

use drizzle_core::Rgb;
use ratatui::{buffer::Buffer, layout::Rect, widgets::Widget};

/// Minimal raster drawing capabilities, in pixel coordinates.
pub trait Surface {
    /// Composite a solid rectangle with the given opacity.
    fn fill_rect(&mut self, x: i32, y: i32, width: u32, height: u32, color: Rgb, alpha: f32);

    /// Draw a glyph whose cell starts at `(x, y)`.
    fn draw_glyph(&mut self, x: i32, y: i32, glyph: char, color: Rgb, alpha: f32);

    /// Wipe the surface to black.
    fn clear(&mut self);
}

/// A single terminal cell on the canvas.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CanvasCell {
    pub glyph: char,
    pub fg: Rgb,
    pub bg: Rgb,
}

impl Default for CanvasCell {
    fn default() -> Self {
        Self {
            glyph: ' ',
            fg: Rgb::BLACK,
            bg: Rgb::BLACK,
        }
    }
}

/// Persistent terminal-cell raster.
///
/// The terminal buffer is rebuilt every frame, so the canvas keeps the
/// partially faded history itself. Each cell covers `cell_size` pixels on
/// both axes.
#[derive(Debug, Clone)]
pub struct Canvas {
    cols: u16,
    rows: u16,
    cell_size: u32,
    cells: Vec<CanvasCell>,
}

impl Canvas {
    pub fn new(cols: u16, rows: u16, cell_size: u32) -> Self {
        Self {
            cols,
            rows,
            cell_size: cell_size.max(1),
            cells: vec![CanvasCell::default(); cols as usize * rows as usize],
        }
    }

    /// Change the canvas size in cells, wiping its contents.
    pub fn resize(&mut self, cols: u16, rows: u16) {
        self.cols = cols;
        self.rows = rows;
        self.cells = vec![CanvasCell::default(); cols as usize * rows as usize];
    }

    pub fn cols(&self) -> u16 {
        self.cols
    }

    pub fn rows(&self) -> u16 {
        self.rows
    }

    /// Size of the canvas in pixels.
    pub fn pixel_size(&self) -> (u32, u32) {
        (
            u32::from(self.cols) * self.cell_size,
            u32::from(self.rows) * self.cell_size,
        )
    }

    /// Cell at the given terminal column and row.
    pub fn cell(&self, col: u16, row: u16) -> Option<&CanvasCell> {
        if col >= self.cols || row >= self.rows {
            return None;
        }
        self.cells.get(row as usize * self.cols as usize + col as usize)
    }

    fn cell_index(&self, col: i64, row: i64) -> Option<usize> {
        if col < 0 || row < 0 || col >= i64::from(self.cols) || row >= i64::from(self.rows) {
            return None;
        }
        Some(row as usize * self.cols as usize + col as usize)
    }

    /// Inclusive cell range covering `len` pixels from `start`, clipped.
    fn cell_span(&self, start: i32, len: u32, limit: u16) -> Option<(i64, i64)> {
        if len == 0 || limit == 0 {
            return None;
        }
        let cell = i64::from(self.cell_size);
        let first = i64::from(start).div_euclid(cell).max(0);
        let last = (i64::from(start) + i64::from(len) - 1)
            .div_euclid(cell)
            .min(i64::from(limit) - 1);
        (first <= last).then_some((first, last))
    }
}

impl Surface for Canvas {
    fn fill_rect(&mut self, x: i32, y: i32, width: u32, height: u32, color: Rgb, alpha: f32) {
        let Some((col_start, col_end)) = self.cell_span(x, width, self.cols) else {
            return;
        };
        let Some((row_start, row_end)) = self.cell_span(y, height, self.rows) else {
            return;
        };

        for row in row_start..=row_end {
            for col in col_start..=col_end {
                let Some(index) = self.cell_index(col, row) else {
                    continue;
                };
                let cell = &mut self.cells[index];
                if alpha >= 1.0 {
                    *cell = CanvasCell {
                        glyph: ' ',
                        fg: color,
                        bg: color,
                    };
                    continue;
                }
                cell.fg = color.blend_over(cell.fg, alpha);
                cell.bg = color.blend_over(cell.bg, alpha);
                // Fully faded glyphs are dropped
                if cell.fg == cell.bg {
                    cell.glyph = ' ';
                }
            }
        }
    }

    fn draw_glyph(&mut self, x: i32, y: i32, glyph: char, color: Rgb, alpha: f32) {
        let cell = i64::from(self.cell_size);
        let col = i64::from(x).div_euclid(cell);
        let row = i64::from(y).div_euclid(cell);
        let Some(index) = self.cell_index(col, row) else {
            return;
        };
        let cell = &mut self.cells[index];
        cell.glyph = glyph;
        cell.fg = color.blend_over(cell.bg, alpha);
    }

    fn clear(&mut self) {
        self.cells.fill(CanvasCell::default());
    }
}

impl Widget for &Canvas {
    fn render(self, area: Rect, buf: &mut Buffer) {
        for row in 0..self.rows.min(area.height) {
            for col in 0..self.cols.min(area.width) {
                let Some(source) = self.cell(col, row) else {
                    continue;
                };
                if let Some(cell) = buf.cell_mut((area.x + col, area.y + row)) {
                    cell.set_char(source.glyph)
                        .set_fg(source.fg.into())
                        .set_bg(source.bg.into());
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use ratatui::style::Color;

    use super::*;

    const GREEN: Rgb = Rgb::new(0, 255, 65);

    #[test]
    fn test_pixel_size() {
        let canvas = Canvas::new(80, 24, 14);
        assert_eq!(canvas.pixel_size(), (1120, 336));
    }

    #[test]
    fn test_draw_glyph_maps_pixels_to_cells() {
        let mut canvas = Canvas::new(10, 10, 14);
        canvas.draw_glyph(28, 42, 'ｱ', GREEN, 1.0);

        let cell = canvas.cell(2, 3).unwrap();
        assert_eq!(cell.glyph, 'ｱ');
        assert_eq!(cell.fg, GREEN);

        // Off-canvas draws are ignored
        canvas.draw_glyph(-14, 0, 'ｲ', GREEN, 1.0);
        canvas.draw_glyph(140, 0, 'ｲ', GREEN, 1.0);
        assert_eq!(canvas.cell(0, 0).unwrap().glyph, ' ');
    }

    #[test]
    fn test_glyph_alpha_blends_with_background() {
        let mut canvas = Canvas::new(1, 1, 14);
        canvas.draw_glyph(0, 0, 'ｱ', Rgb::new(200, 100, 0), 0.5);
        assert_eq!(canvas.cell(0, 0).unwrap().fg, Rgb::new(100, 50, 0));
    }

    #[test]
    fn test_opaque_fill_replaces_cell() {
        let mut canvas = Canvas::new(3, 3, 14);
        canvas.draw_glyph(14, 14, 'ｱ', GREEN, 1.0);
        canvas.fill_rect(14, 14, 14, 14, Rgb::new(10, 10, 10), 1.0);

        let cell = canvas.cell(1, 1).unwrap();
        assert_eq!(cell.glyph, ' ');
        assert_eq!(cell.bg, Rgb::new(10, 10, 10));
        // Neighbours untouched
        assert_eq!(canvas.cell(0, 0).unwrap().bg, Rgb::BLACK);
        assert_eq!(canvas.cell(2, 2).unwrap().bg, Rgb::BLACK);
    }

    #[test]
    fn test_translucent_fill_fades_to_black() {
        let mut canvas = Canvas::new(2, 2, 14);
        canvas.draw_glyph(0, 0, 'ｱ', GREEN, 1.0);

        canvas.fill_rect(0, 0, 28, 28, Rgb::BLACK, 0.05);
        let cell = canvas.cell(0, 0).unwrap();
        assert_eq!(cell.glyph, 'ｱ');
        assert!(cell.fg.g < 255);

        for _ in 0..200 {
            canvas.fill_rect(0, 0, 28, 28, Rgb::BLACK, 0.05);
        }
        assert_eq!(*canvas.cell(0, 0).unwrap(), CanvasCell::default());
    }

    #[test]
    fn test_resize_and_clear() {
        let mut canvas = Canvas::new(2, 2, 14);
        canvas.draw_glyph(0, 0, 'ｱ', GREEN, 1.0);
        canvas.clear();
        assert_eq!(*canvas.cell(0, 0).unwrap(), CanvasCell::default());

        canvas.resize(4, 3);
        assert_eq!((canvas.cols(), canvas.rows()), (4, 3));
        assert!(canvas.cell(3, 2).is_some());
        assert!(canvas.cell(4, 2).is_none());
    }

    #[test]
    fn test_render_into_buffer() {
        let mut canvas = Canvas::new(3, 1, 14);
        canvas.draw_glyph(14, 0, 'ｱ', GREEN, 1.0);

        let area = Rect::new(0, 0, 3, 1);
        let mut buf = Buffer::empty(area);
        (&canvas).render(area, &mut buf);

        assert_eq!(buf[(1, 0)].symbol(), "ｱ");
        assert_eq!(buf[(1, 0)].fg, Color::Rgb(0, 255, 65));
        assert_eq!(buf[(0, 0)].symbol(), " ");
        assert_eq!(buf[(0, 0)].bg, Color::Rgb(0, 0, 0));
    }
}
