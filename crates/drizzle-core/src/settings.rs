//! Live animation settings and the host property setter.

use serde_json::Value;

use crate::color::{Rgb, parse_hex_color};
use crate::profile::TrailProfile;

/// Property name for the fixed rain color (`RRGGBB` hex string).
pub const PROPERTY_COLOR: &str = "matrixColor";
/// Property name for the rainbow mode flag.
pub const PROPERTY_RAINBOW: &str = "rainBow";
/// Property name for the rainbow speed, on a 0-100 scale.
pub const PROPERTY_RAINBOW_SPEED: &str = "rainbowSpeed";

/// Default side length of a glyph cell, in pixels.
pub const DEFAULT_CELL_SIZE: u16 = 14;
/// Default period of the render loop.
pub const DEFAULT_FRAME_INTERVAL_MS: u64 = 50;

/// Settings the rain is drawn with. Any field may change between frames.
#[derive(Debug, Clone, PartialEq)]
pub struct RainSettings {
    /// Glyph color used when rainbow mode is off.
    pub color: Rgb,
    /// Derive the color from a shifting hue instead of `color`.
    pub rainbow: bool,
    /// Multiplier applied to the hue cursor (0.0-1.0 in practice).
    pub rainbow_speed: f64,
    /// Period of the render loop in milliseconds.
    pub frame_interval_ms: u64,
    /// Side length of a glyph cell in pixels.
    pub cell_size: u16,
    /// How pointer movement seeds trail glyphs.
    pub trail_profile: TrailProfile,
    /// Direction the hue cursor moves in.
    pub hue_forward: bool,
}

impl Default for RainSettings {
    fn default() -> Self {
        Self {
            color: Rgb::new(125, 52, 253),
            rainbow: true,
            rainbow_speed: 0.5,
            frame_interval_ms: DEFAULT_FRAME_INTERVAL_MS,
            cell_size: DEFAULT_CELL_SIZE,
            trail_profile: TrailProfile::default(),
            hue_forward: false,
        }
    }
}

impl RainSettings {
    /// Apply a single named property coming from a host.
    ///
    /// Returns `true` when a setting changed. Malformed values and unknown
    /// names leave the settings untouched.
    pub fn set_property(&mut self, name: &str, value: &Value) -> bool {
        match name {
            PROPERTY_COLOR => match value.as_str().and_then(parse_hex_color) {
                Some(color) => {
                    self.color = color;
                    true
                }
                None => {
                    tracing::warn!(%value, "ignoring malformed {PROPERTY_COLOR}");
                    false
                }
            },
            PROPERTY_RAINBOW => match as_flag(value) {
                Some(enabled) => {
                    self.rainbow = enabled;
                    true
                }
                None => {
                    tracing::warn!(%value, "ignoring non-boolean {PROPERTY_RAINBOW}");
                    false
                }
            },
            PROPERTY_RAINBOW_SPEED => match as_number(value) {
                Some(speed) => {
                    self.rainbow_speed = speed / 100.0;
                    true
                }
                None => {
                    tracing::warn!(%value, "ignoring non-numeric {PROPERTY_RAINBOW_SPEED}");
                    false
                }
            },
            _ => {
                tracing::debug!(name, "ignoring unknown property");
                false
            }
        }
    }
}

/// Interpret a loosely typed value as a flag.
fn as_flag(value: &Value) -> Option<bool> {
    match value {
        Value::Bool(b) => Some(*b),
        Value::Null => Some(false),
        Value::Number(n) => n.as_f64().map(|n| n != 0.0),
        Value::String(s) => Some(matches!(
            s.trim().to_ascii_lowercase().as_str(),
            "true" | "1" | "on" | "yes"
        )),
        Value::Array(_) | Value::Object(_) => None,
    }
}

/// Interpret a loosely typed value as a finite number.
fn as_number(value: &Value) -> Option<f64> {
    let n = match value {
        Value::Number(n) => n.as_f64()?,
        Value::String(s) => s.trim().parse().ok()?,
        _ => return None,
    };
    n.is_finite().then_some(n)
}
