//! Falling glyph columns.

use drizzle_core::Rgb;
use rand::Rng;

use crate::chars::random_glyph;
use crate::grid::Grid;
use crate::surface::Surface;

/// Row every column starts at after a resize.
pub const INITIAL_ROW: u32 = 1;

/// A column past the bottom edge restarts when a uniform draw exceeds this.
pub const RESET_THRESHOLD: f64 = 0.975;

/// Background painted behind each column head.
pub const HEAD_BACKGROUND: Rgb = Rgb::new(10, 10, 10);

/// Fall positions of every column, in rows.
#[derive(Debug, Clone, Default)]
pub struct Columns {
    /// Row each column draws at next.
    rows: Vec<u32>,
    /// Row each column drew at during the latest frame.
    heads: Vec<Option<u32>>,
}

impl Columns {
    /// Fresh columns, all at [`INITIAL_ROW`].
    pub fn new(count: usize) -> Self {
        Self {
            rows: vec![INITIAL_ROW; count],
            heads: vec![None; count],
        }
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Row each column will draw at on the next frame.
    pub fn rows(&self) -> &[u32] {
        &self.rows
    }

    /// Whether a column head was drawn in the given cell during the latest frame.
    pub fn head_at(&self, col: i32, row: i32) -> bool {
        if col < 0 || row < 0 {
            return false;
        }
        self.heads.get(col as usize).copied().flatten() == Some(row as u32)
    }

    /// Draw one glyph per column and move every column down a row.
    ///
    /// Columns that have left the bottom of the surface restart at the top
    /// with a small probability each frame, so restarts are staggered.
    pub fn step<S, R, C>(&mut self, grid: &Grid, surface: &mut S, mut next_color: C, rng: &mut R)
    where
        S: Surface + ?Sized,
        R: Rng + ?Sized,
        C: FnMut() -> Rgb,
    {
        let cell = grid.cell_size();
        for (col, (row, head)) in self.rows.iter_mut().zip(&mut self.heads).enumerate() {
            let (x, y) = grid.cell_origin(col as i32, *row as i32);
            surface.fill_rect(x, y, cell, cell, HEAD_BACKGROUND, 1.0);

            let glyph = random_glyph(rng);
            surface.draw_glyph(x, y, glyph, next_color(), 1.0);
            *head = Some(*row);

            *row += 1;
            let below_bottom = u64::from(*row) * u64::from(cell) > u64::from(grid.height());
            if below_bottom && rng.random::<f64>() > RESET_THRESHOLD {
                *row = 0;
            }
        }
    }
}
