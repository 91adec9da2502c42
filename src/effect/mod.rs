//! Parametric effects
//!
//! The renderer drives any [`Effect`]: each tick it hands over the current
//! [`AnimationParameters`] and a frame to fill. The glow engine is the effect
//! used on the device.

mod glow;

use embassy_time::Instant;
pub use glow::{GlowEffect, GlowPhase, GlowPoint};

use crate::{color::Rgb, mapper::AnimationParameters};

pub trait Effect {
    /// Render a single frame
    ///
    /// Called once per tick; stateful effects advance their animation here.
    fn render(&mut self, params: &AnimationParameters, now: Instant, leds: &mut [Rgb]);

    /// Reset effect state
    fn reset(&mut self) {}
}
