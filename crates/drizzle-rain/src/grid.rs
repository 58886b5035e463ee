//! Mapping between surface pixels and glyph cells.

/// Glyph grid laid over a surface of `width` x `height` pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Grid {
    width: u32,
    height: u32,
    cell_size: u32,
}

impl Grid {
    /// Create a grid; a zero cell size is treated as one pixel.
    pub fn new(width: u32, height: u32, cell_size: u32) -> Self {
        Self {
            width,
            height,
            cell_size: cell_size.max(1),
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn cell_size(&self) -> u32 {
        self.cell_size
    }

    /// Number of whole columns that fit across the surface.
    pub fn columns(&self) -> usize {
        (self.width / self.cell_size) as usize
    }

    /// Round a pixel coordinate down to the start of its cell.
    pub fn snap(&self, pixel: i32) -> i32 {
        let cell = self.cell_size as i32;
        pixel.div_euclid(cell) * cell
    }

    /// Cell coordinates containing a pixel.
    pub fn cell_of(&self, x: i32, y: i32) -> (i32, i32) {
        let cell = self.cell_size as i32;
        (x.div_euclid(cell), y.div_euclid(cell))
    }

    /// Pixel position of a cell's top-left corner.
    pub fn cell_origin(&self, col: i32, row: i32) -> (i32, i32) {
        let cell = self.cell_size as i32;
        (col * cell, row * cell)
    }
}
