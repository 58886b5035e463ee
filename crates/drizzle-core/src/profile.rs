//! Trail spawning profiles.

use serde::{Deserialize, Serialize};

/// How pointer movement seeds trail glyphs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TrailProfile {
    /// Eight glyphs on a ring two cells out from the pointer.
    #[default]
    Ring,
    /// The four neighbouring cells, skipping any that are already occupied.
    Cardinal,
}

impl TrailProfile {
    /// Alpha removed from every trail entry per frame.
    pub fn fade_rate(self) -> f32 {
        match self {
            TrailProfile::Ring => 0.2,
            TrailProfile::Cardinal => 0.5,
        }
    }

    /// Switch to the other profile.
    pub fn toggle(self) -> Self {
        match self {
            TrailProfile::Ring => TrailProfile::Cardinal,
            TrailProfile::Cardinal => TrailProfile::Ring,
        }
    }

    /// Display name.
    pub fn name(self) -> &'static str {
        match self {
            TrailProfile::Ring => "ring",
            TrailProfile::Cardinal => "cardinal",
        }
    }
}
