//! Stateful pieces of the rain animation.

pub mod rain;
pub mod trail;
