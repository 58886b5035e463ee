//! Digital rain animation for drizzle.
//!
//! This crate provides the rain itself: falling glyph columns, a fading
//! pointer trail, rainbow or fixed coloring, and a terminal canvas to draw
//! it all on. All animation state lives in [`RainState`], and drawing goes
//! through the [`Surface`] trait so the animation runs headless in tests.

mod animations;
mod chars;
mod color;
mod grid;
mod state;
mod surface;

pub use animations::rain::Columns;
pub use animations::trail::{Trail, TrailEntry};
pub use grid::Grid;
pub use state::{Pointer, RainState};
pub use surface::{Canvas, CanvasCell, Surface};
