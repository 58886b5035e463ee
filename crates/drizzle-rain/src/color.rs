//! Glyph color selection.

use drizzle_core::{RainSettings, Rgb};

/// Amount the hue cursor moves per rainbow color request.
pub const HUE_STEP: f64 = 0.01;

/// Starting value of the hue cursor.
pub const INITIAL_HUE: f64 = -0.01;

/// Picks the glyph color for each draw, cycling a hue in rainbow mode.
#[derive(Debug, Clone)]
pub struct ColorPolicy {
    /// Unbounded hue cursor; only its sine is ever used.
    hue: f64,
}

impl Default for ColorPolicy {
    fn default() -> Self {
        Self::new()
    }
}

impl ColorPolicy {
    pub fn new() -> Self {
        Self { hue: INITIAL_HUE }
    }

    /// Current hue cursor value.
    pub fn hue(&self) -> f64 {
        self.hue
    }

    /// Color for the next draw.
    ///
    /// In rainbow mode every call moves the hue cursor one step, so glyphs
    /// drawn within the same frame get slightly different colors.
    pub fn next_color(&mut self, settings: &RainSettings) -> Rgb {
        if !settings.rainbow {
            return settings.color;
        }

        if settings.hue_forward {
            self.hue += HUE_STEP;
        } else {
            self.hue -= HUE_STEP;
        }
        rainbow_color(self.hue, settings.rainbow_speed)
    }
}

/// Rainbow color for a hue cursor value.
///
/// Channels follow phase-shifted sine waves (0, 2 and 4 radians), which
/// keeps each of them within 1..=255 for any input.
pub fn rainbow_color(hue: f64, speed: f64) -> Rgb {
    let channel = |phase: f64| -> u8 {
        let value = (127.0 * (speed * hue + phase).sin() + 128.0).floor();
        value.clamp(0.0, 255.0) as u8
    };
    Rgb::new(channel(0.0), channel(2.0), channel(4.0))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rainbow_color_phases() {
        assert_eq!(rainbow_color(0.0, 0.5), Rgb::new(128, 243, 31));
    }

    #[test]
    fn test_rainbow_color_stays_in_range() {
        let speeds = [0.0, 0.01, 0.5, 1.0, 3.7, 100.0];
        for &speed in &speeds {
            for step in -2000..2000 {
                let hue = step as f64 * 0.37;
                let color = rainbow_color(hue, speed);
                for channel in [color.r, color.g, color.b] {
                    assert!(channel >= 1);
                }
            }
        }
    }

    #[test]
    fn test_hue_moves_backwards_by_default() {
        let settings = RainSettings::default();
        let mut policy = ColorPolicy::new();
        let first = policy.next_color(&settings);
        assert!((policy.hue() - (INITIAL_HUE - HUE_STEP)).abs() < 1e-12);
        assert_eq!(first, rainbow_color(INITIAL_HUE - HUE_STEP, settings.rainbow_speed));

        policy.next_color(&settings);
        assert!((policy.hue() - (INITIAL_HUE - 2.0 * HUE_STEP)).abs() < 1e-12);
    }

    #[test]
    fn test_hue_forward() {
        let settings = RainSettings {
            hue_forward: true,
            ..Default::default()
        };
        let mut policy = ColorPolicy::new();
        policy.next_color(&settings);
        assert!(policy.hue().abs() < 1e-12);
    }

    #[test]
    fn test_fixed_color_leaves_hue_alone() {
        let settings = RainSettings {
            rainbow: false,
            color: Rgb::new(0, 255, 65),
            ..Default::default()
        };
        let mut policy = ColorPolicy::new();
        assert_eq!(policy.next_color(&settings), Rgb::new(0, 255, 65));
        assert_eq!(policy.hue(), INITIAL_HUE);
    }
}
