//! Rain animation state management.

use std::time::{Duration, Instant};

use drizzle_core::{RainSettings, Rgb, TrailProfile};
use rand::Rng;
use serde_json::Value;

use crate::animations::rain::Columns;
use crate::animations::trail::Trail;
use crate::color::ColorPolicy;
use crate::grid::Grid;
use crate::surface::Surface;

/// Trail glyphs vanish once the pointer has been still this long.
pub const IDLE_WINDOW: Duration = Duration::from_millis(100);

/// Opacity of the black wash painted over the surface every frame.
pub const FADE_ALPHA: f32 = 0.05;

/// Last known pointer position and activity.
#[derive(Debug, Clone, Copy, Default)]
pub struct Pointer {
    /// Raw pointer position in pixels.
    pub x: i32,
    pub y: i32,
    /// Whether the pointer moved within the idle window.
    pub moving: bool,
    /// When the pointer last moved.
    pub last_moved: Option<Instant>,
}

/// Everything the rain needs between frames.
#[derive(Debug, Clone)]
pub struct RainState {
    /// Live settings, adjustable through [`RainState::set_property`].
    settings: RainSettings,
    /// Glyph grid over the current surface size.
    grid: Grid,
    /// Falling column positions.
    columns: Columns,
    /// Pointer trail glyphs.
    trail: Trail,
    /// Rainbow hue cursor.
    color: ColorPolicy,
    /// Pointer tracking for the trail idle timeout.
    pointer: Pointer,
    /// Frames rendered so far.
    frames: u64,
}

impl RainState {
    /// Create a new rain state for a surface of `width` x `height` pixels.
    pub fn new(settings: RainSettings, width: u32, height: u32) -> Self {
        let grid = Grid::new(width, height, u32::from(settings.cell_size));
        tracing::debug!(width, height, columns = grid.columns(), "initialized rain");
        Self {
            settings,
            grid,
            columns: Columns::new(grid.columns()),
            trail: Trail::new(),
            color: ColorPolicy::new(),
            pointer: Pointer::default(),
            frames: 0,
        }
    }

    pub fn settings(&self) -> &RainSettings {
        &self.settings
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn columns(&self) -> &Columns {
        &self.columns
    }

    pub fn trail(&self) -> &Trail {
        &self.trail
    }

    pub fn pointer(&self) -> &Pointer {
        &self.pointer
    }

    pub fn hue(&self) -> f64 {
        self.color.hue()
    }

    pub fn frames(&self) -> u64 {
        self.frames
    }

    /// Apply a host property such as `matrixColor`, `rainBow` or `rainbowSpeed`.
    pub fn set_property(&mut self, name: &str, value: &Value) -> bool {
        let changed = self.settings.set_property(name, value);
        if changed {
            tracing::info!(name, %value, "property updated");
        }
        changed
    }

    /// Switch how future pointer movement seeds the trail.
    pub fn set_trail_profile(&mut self, profile: TrailProfile) {
        tracing::info!(profile = profile.name(), "trail profile changed");
        self.settings.trail_profile = profile;
    }

    /// Color the next glyph would be drawn in, advancing the hue.
    pub fn next_color(&mut self) -> Rgb {
        self.color.next_color(&self.settings)
    }

    /// Render one frame and advance the animation.
    pub fn tick<S, R>(&mut self, surface: &mut S, now: Instant, rng: &mut R)
    where
        S: Surface + ?Sized,
        R: Rng + ?Sized,
    {
        let Self {
            settings,
            grid,
            columns,
            trail,
            color,
            pointer,
            frames,
        } = self;

        surface.fill_rect(0, 0, grid.width(), grid.height(), Rgb::BLACK, FADE_ALPHA);

        columns.step(grid, surface, || color.next_color(settings), rng);

        let profile = settings.trail_profile;
        trail.step(grid, profile, columns, surface, || color.next_color(settings));

        let idle = pointer
            .last_moved
            .is_none_or(|moved| now.saturating_duration_since(moved) > IDLE_WINDOW);
        if idle {
            pointer.moving = false;
        }
        if !pointer.moving && !trail.is_empty() {
            tracing::trace!(entries = trail.len(), "pointer idle, clearing trail");
            trail.clear();
        }

        *frames += 1;
    }

    /// Handle pointer movement to pixel `(x, y)`.
    pub fn on_pointer_move<R: Rng + ?Sized>(&mut self, x: i32, y: i32, now: Instant, rng: &mut R) {
        self.pointer = Pointer {
            x,
            y,
            moving: true,
            last_moved: Some(now),
        };
        let added = self.trail.spawn(
            &self.grid,
            self.settings.trail_profile,
            &self.columns,
            x,
            y,
            rng,
        );
        tracing::trace!(x, y, added, "pointer moved");
    }

    /// Handle a surface resize to `width` x `height` pixels.
    ///
    /// Columns restart from the top; the trail is kept.
    pub fn resize<S: Surface + ?Sized>(&mut self, width: u32, height: u32, surface: &mut S) {
        self.grid = Grid::new(width, height, self.grid.cell_size());
        self.columns = Columns::new(self.grid.columns());
        surface.clear();
        tracing::debug!(width, height, columns = self.columns.len(), "resized rain");
    }
}

#[cfg(test)]
mod tests {
    use rand::{SeedableRng, rngs::StdRng};
    use serde_json::json;

    use super::*;
    use crate::animations::rain::{HEAD_BACKGROUND, INITIAL_ROW};

    #[derive(Debug, Clone, PartialEq)]
    enum Op {
        Fill {
            x: i32,
            y: i32,
            width: u32,
            height: u32,
            color: Rgb,
            alpha: f32,
        },
        Glyph {
            x: i32,
            y: i32,
            color: Rgb,
            alpha: f32,
        },
        Clear,
    }

    #[derive(Debug, Default)]
    struct RecordingSurface {
        ops: Vec<Op>,
    }

    impl RecordingSurface {
        fn glyphs(&self) -> Vec<&Op> {
            self.ops
                .iter()
                .filter(|op| matches!(op, Op::Glyph { .. }))
                .collect()
        }
    }

    impl Surface for RecordingSurface {
        fn fill_rect(&mut self, x: i32, y: i32, width: u32, height: u32, color: Rgb, alpha: f32) {
            self.ops.push(Op::Fill {
                x,
                y,
                width,
                height,
                color,
                alpha,
            });
        }

        fn draw_glyph(&mut self, x: i32, y: i32, _glyph: char, color: Rgb, alpha: f32) {
            self.ops.push(Op::Glyph { x, y, color, alpha });
        }

        fn clear(&mut self) {
            self.ops.push(Op::Clear);
        }
    }

    fn cardinal() -> RainSettings {
        RainSettings {
            trail_profile: TrailProfile::Cardinal,
            ..Default::default()
        }
    }

    #[test]
    fn test_new_state() {
        let state = RainState::new(RainSettings::default(), 1000, 500);
        assert_eq!(state.columns().len(), 71);
        assert!(state.columns().rows().iter().all(|&row| row == INITIAL_ROW));
        assert!(state.trail().is_empty());
        assert_eq!(state.frames(), 0);
    }

    #[test]
    fn test_tick_paint_order() {
        let settings = RainSettings {
            rainbow: false,
            color: Rgb::new(0, 255, 65),
            ..Default::default()
        };
        let mut state = RainState::new(settings, 28, 140);
        let mut surface = RecordingSurface::default();
        let mut rng = StdRng::seed_from_u64(1);

        state.tick(&mut surface, Instant::now(), &mut rng);

        let glyph = |x| Op::Glyph {
            x,
            y: 14,
            color: Rgb::new(0, 255, 65),
            alpha: 1.0,
        };
        let head = |x| Op::Fill {
            x,
            y: 14,
            width: 14,
            height: 14,
            color: HEAD_BACKGROUND,
            alpha: 1.0,
        };
        assert_eq!(
            surface.ops,
            vec![
                Op::Fill {
                    x: 0,
                    y: 0,
                    width: 28,
                    height: 140,
                    color: Rgb::BLACK,
                    alpha: FADE_ALPHA,
                },
                head(0),
                glyph(0),
                head(14),
                glyph(14),
            ]
        );
        assert_eq!(state.columns().rows(), &[2, 2]);
        assert_eq!(state.frames(), 1);
    }

    #[test]
    fn test_rainbow_advances_hue_per_glyph() {
        let mut state = RainState::new(RainSettings::default(), 140, 140);
        let mut surface = RecordingSurface::default();
        let mut rng = StdRng::seed_from_u64(2);
        let start = state.hue();

        state.tick(&mut surface, Instant::now(), &mut rng);

        // One color request per column, no trail yet
        assert!((state.hue() - (start - 10.0 * 0.01)).abs() < 1e-9);
    }

    #[test]
    fn test_resize_resets_columns() {
        let mut state = RainState::new(RainSettings::default(), 700, 280);
        let mut surface = RecordingSurface::default();
        let mut rng = StdRng::seed_from_u64(3);
        let now = Instant::now();
        for _ in 0..5 {
            state.tick(&mut surface, now, &mut rng);
        }
        state.on_pointer_move(100, 100, now, &mut rng);
        let trail_len = state.trail().len();

        let mut surface = RecordingSurface::default();
        state.resize(1000, 300, &mut surface);

        assert_eq!(state.columns().len(), 1000 / 14);
        assert!(state.columns().rows().iter().all(|&row| row == INITIAL_ROW));
        assert_eq!(state.grid().width(), 1000);
        assert_eq!(state.trail().len(), trail_len);
        assert_eq!(surface.ops, vec![Op::Clear]);
    }

    #[test]
    fn test_trail_fades_while_pointer_moves() {
        let mut state = RainState::new(RainSettings::default(), 280, 280);
        let mut surface = RecordingSurface::default();
        let mut rng = StdRng::seed_from_u64(4);
        let now = Instant::now();

        state.on_pointer_move(140, 140, now, &mut rng);
        assert_eq!(state.trail().len(), 8);
        assert!(state.pointer().moving);

        let mut frames = 0;
        let mut last = 1.0;
        while !state.trail().is_empty() {
            state.tick(&mut surface, now, &mut rng);
            frames += 1;
            if let Some(entry) = state.trail().entries().first() {
                assert!(entry.alpha <= last);
                last = entry.alpha;
            }
        }
        assert!(frames <= 6);
    }

    #[test]
    fn test_idle_pointer_clears_trail() {
        let mut state = RainState::new(RainSettings::default(), 280, 280);
        let mut surface = RecordingSurface::default();
        let mut rng = StdRng::seed_from_u64(5);
        let start = Instant::now();

        state.on_pointer_move(140, 140, start, &mut rng);
        state.tick(&mut surface, start + Duration::from_millis(50), &mut rng);
        assert_eq!(state.trail().len(), 8);

        state.tick(&mut surface, start + Duration::from_millis(150), &mut rng);
        assert!(state.trail().is_empty());
        assert!(!state.pointer().moving);
    }

    #[test]
    fn test_cardinal_skips_column_heads() {
        let mut state = RainState::new(cardinal(), 140, 140);
        let mut surface = RecordingSurface::default();
        let mut rng = StdRng::seed_from_u64(6);
        let now = Instant::now();

        // Every column head is now drawn on row 1
        state.tick(&mut surface, now, &mut rng);
        state.on_pointer_move(70, 28, now, &mut rng);

        let cells: Vec<_> = state.trail().entries().iter().map(|e| (e.x, e.y)).collect();
        assert_eq!(cells.len(), 3);
        assert!(!cells.contains(&(70, 14)));
        assert!(cells.contains(&(84, 28)));
        assert!(cells.contains(&(70, 42)));
        assert!(cells.contains(&(56, 28)));
    }

    #[test]
    fn test_cardinal_hides_entries_under_heads() {
        let mut state = RainState::new(cardinal(), 140, 140);
        let mut surface = RecordingSurface::default();
        let mut rng = StdRng::seed_from_u64(7);
        let now = Instant::now();

        state.tick(&mut surface, now, &mut rng);
        state.on_pointer_move(70, 28, now, &mut rng);

        // Heads now land on row 2, covering the left and right entries
        let mut surface = RecordingSurface::default();
        state.tick(&mut surface, now, &mut rng);

        let glyphs = surface.glyphs();
        assert_eq!(glyphs.len(), 10 + 1);
        assert!(matches!(glyphs[10], Op::Glyph { x: 70, y: 42, .. }));
        // Hidden entries still fade
        assert!(state.trail().entries().iter().all(|e| e.alpha == 0.5));
    }

    #[test]
    fn test_set_property() {
        let mut state = RainState::new(RainSettings::default(), 140, 140);
        assert!(state.set_property("rainbowSpeed", &json!(50)));
        assert_eq!(state.settings().rainbow_speed, 0.5);

        assert!(state.set_property("matrixColor", &json!("#7D34FD")));
        assert_eq!(state.settings().color, Rgb::new(125, 52, 253));

        assert!(!state.set_property("matrixColor", &json!("zzzzzz")));
        assert_eq!(state.settings().color, Rgb::new(125, 52, 253));

        assert!(state.set_property("rainBow", &json!(false)));
        assert_eq!(state.next_color(), Rgb::new(125, 52, 253));
    }
}
