//! Core types shared by the drizzle crates.
//!
//! Holds the color value type, the trail profiles and the live animation
//! settings together with the property setter a host uses to reconfigure
//! the rain while it runs.

mod color;
mod profile;
mod settings;

pub use color::{Rgb, parse_hex_color};
pub use profile::TrailProfile;
pub use settings::{PROPERTY_COLOR, PROPERTY_RAINBOW, PROPERTY_RAINBOW_SPEED, RainSettings};
