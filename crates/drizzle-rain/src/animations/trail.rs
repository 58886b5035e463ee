//! Pointer trail glyphs.

use std::collections::HashSet;
use std::f64::consts::TAU;

use drizzle_core::{Rgb, TrailProfile};
use rand::Rng;

use crate::animations::rain::Columns;
use crate::chars::random_glyph;
use crate::grid::Grid;
use crate::surface::Surface;

/// Number of glyphs placed on the ring around the pointer.
const RING_POINTS: usize = 8;

/// Ring radius, in cells.
const RING_RADIUS_CELLS: f64 = 2.0;

/// Offsets of the four grid-cardinal neighbours: up, right, down, left.
const CARDINAL_OFFSETS: [(i32, i32); 4] = [(0, -1), (1, 0), (0, 1), (-1, 0)];

/// A fading glyph left behind by pointer movement.
#[derive(Debug, Clone, PartialEq)]
pub struct TrailEntry {
    /// Grid-aligned pixel position.
    pub x: i32,
    pub y: i32,
    pub glyph: char,
    /// Opacity, starting at 1.0 and dropping every frame.
    pub alpha: f32,
}

/// Live trail entries, oldest first.
#[derive(Debug, Clone, Default)]
pub struct Trail {
    entries: Vec<TrailEntry>,
}

impl Trail {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn entries(&self) -> &[TrailEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Drop every entry at once.
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    fn occupied(&self, x: i32, y: i32) -> bool {
        self.entries.iter().any(|e| e.x == x && e.y == y)
    }

    /// Spawn entries around the pointer at pixel `(x, y)`.
    ///
    /// Returns the number of entries added.
    pub fn spawn<R: Rng + ?Sized>(
        &mut self,
        grid: &Grid,
        profile: TrailProfile,
        columns: &Columns,
        x: i32,
        y: i32,
        rng: &mut R,
    ) -> usize {
        let before = self.entries.len();
        match profile {
            TrailProfile::Ring => self.spawn_ring(grid, x, y, rng),
            TrailProfile::Cardinal => self.spawn_cardinal(grid, columns, x, y, rng),
        }
        self.entries.len() - before
    }

    fn spawn_ring<R: Rng + ?Sized>(&mut self, grid: &Grid, x: i32, y: i32, rng: &mut R) {
        let cell = grid.cell_size() as f64;
        let center_x = grid.snap(x) as f64;
        let center_y = grid.snap(y) as f64;
        let radius = cell * RING_RADIUS_CELLS;

        for i in 0..RING_POINTS {
            let angle = TAU * (i as f64 / RING_POINTS as f64);
            let px = ((center_x + angle.cos() * radius) / cell).floor() * cell;
            let py = ((center_y + angle.sin() * radius) / cell).floor() * cell;
            self.entries.push(TrailEntry {
                x: px as i32,
                y: py as i32,
                glyph: random_glyph(rng),
                alpha: 1.0,
            });
        }
    }

    fn spawn_cardinal<R: Rng + ?Sized>(
        &mut self,
        grid: &Grid,
        columns: &Columns,
        x: i32,
        y: i32,
        rng: &mut R,
    ) {
        let (col, row) = grid.cell_of(x, y);
        for (dx, dy) in CARDINAL_OFFSETS {
            let (ncol, nrow) = (col + dx, row + dy);
            if ncol < 0 || nrow < 0 || columns.head_at(ncol, nrow) {
                continue;
            }
            let (px, py) = grid.cell_origin(ncol, nrow);
            // Covers both older entries and ones added earlier in this batch
            if self.occupied(px, py) {
                continue;
            }
            self.entries.push(TrailEntry {
                x: px,
                y: py,
                glyph: random_glyph(rng),
                alpha: 1.0,
            });
        }
    }

    /// Draw every entry, newest first, then fade it and prune dead ones.
    ///
    /// With the cardinal profile an entry sharing a cell with a column head
    /// or with a newer entry is not drawn, but still fades.
    pub fn step<S, C>(
        &mut self,
        grid: &Grid,
        profile: TrailProfile,
        columns: &Columns,
        surface: &mut S,
        mut next_color: C,
    ) where
        S: Surface + ?Sized,
        C: FnMut() -> Rgb,
    {
        let fade = profile.fade_rate();
        let mut drawn = HashSet::new();

        for i in (0..self.entries.len()).rev() {
            let entry = &mut self.entries[i];
            let visible = match profile {
                TrailProfile::Ring => true,
                TrailProfile::Cardinal => {
                    let (col, row) = grid.cell_of(entry.x, entry.y);
                    !columns.head_at(col, row) && drawn.insert((entry.x, entry.y))
                }
            };
            if visible {
                surface.draw_glyph(entry.x, entry.y, entry.glyph, next_color(), entry.alpha);
            }

            entry.alpha -= fade;
            if entry.alpha <= 0.0 {
                self.entries.remove(i);
            }
        }
    }
}
