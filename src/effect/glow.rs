//! Glow point effect
//!
//! A small pool of soft light blobs that appear at random places on the
//! strip, swell to their peak, linger and fade out again. Blobs are added on
//! top of each other, so crowded spots drift toward white.

use embassy_time::Instant;

use super::Effect;
use crate::{
    color::{Hsv, Rgb, add_colors, fill_black, hsv2rgb},
    config::{GLOW_CAPACITY, GlowConfig},
    mapper::AnimationParameters,
    random::RandomSource,
};

/// Lifecycle phase of a glow point
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GlowPhase {
    /// Intensity rises toward the target
    Growing,
    /// Intensity holds at the target
    Stable,
    /// Intensity falls toward zero
    Fading,
}

/// A single transient light source
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GlowPoint {
    /// Center LED index
    pub position: u16,
    pub hue: u8,
    /// Radius in LEDs
    pub spread: u8,
    /// Peak intensity
    pub target: u8,
    pub intensity: u8,
    pub phase: GlowPhase,
}

impl GlowPoint {
    /// New point, dark and about to grow
    pub const fn new(position: u16, hue: u8, spread: u8, target: u8) -> Self {
        Self {
            position,
            hue,
            spread,
            target,
            intensity: 0,
            phase: GlowPhase::Growing,
        }
    }

    /// Advance one tick
    ///
    /// Returns `false` once the point has faded out and its slot can be
    /// reused.
    fn advance(&mut self, step: u8, fade_chance: u8, rng: &mut impl RandomSource) -> bool {
        match self.phase {
            GlowPhase::Growing => {
                self.intensity = self.intensity.saturating_add(step).min(self.target);
                if self.intensity >= self.target {
                    self.phase = GlowPhase::Stable;
                }
            }
            GlowPhase::Stable => {
                if rng.random8() < fade_chance {
                    self.phase = GlowPhase::Fading;
                }
            }
            GlowPhase::Fading => {
                // Fade at half the growth rate
                let fade_step = (step / 2).max(1);
                if self.intensity <= fade_step {
                    return false;
                }
                self.intensity -= fade_step;
            }
        }
        true
    }

    /// Add this point's light to the frame
    ///
    /// Falloff is quadratic, `1 - i^2 / (spread + 1)^2`, and the strip wraps
    /// around at both ends.
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    fn render(&self, saturation: u8, leds: &mut [Rgb]) {
        let len = i32::try_from(leds.len()).unwrap_or(i32::MAX);
        if len == 0 || self.intensity == 0 {
            return;
        }

        let spread = i32::from(self.spread);
        let radius_sq = (spread + 1) * (spread + 1);
        let center = i32::from(self.position);

        for offset in -spread..=spread {
            let falloff = radius_sq - offset * offset;
            let val = i32::from(self.intensity) * falloff / radius_sq;
            if val <= 0 {
                continue;
            }

            let color = hsv2rgb(Hsv {
                hue: self.hue,
                sat: saturation,
                val: val as u8,
            });
            let index = (center + offset).rem_euclid(len) as usize;
            leds[index] = add_colors(leds[index], color);
        }
    }
}

/// Pool-based glow effect
///
/// Glow points live in a fixed array of slots; the slot index is the
/// point's identity and a free slot is `None`.
#[derive(Debug, Clone)]
pub struct GlowEffect<R: RandomSource> {
    config: GlowConfig,
    points: [Option<GlowPoint>; GLOW_CAPACITY],
    rng: R,
}

impl<R: RandomSource> GlowEffect<R> {
    pub const fn new(config: GlowConfig, rng: R) -> Self {
        Self {
            config,
            points: [None; GLOW_CAPACITY],
            rng,
        }
    }

    /// Per-tick intensity change for a given speed, at least 1
    pub const fn step(speed: u8) -> u8 {
        let step = speed / 20;
        if step == 0 { 1 } else { step }
    }

    pub fn active_count(&self) -> usize {
        self.points.iter().filter(|slot| slot.is_some()).count()
    }

    /// Active points, in slot order
    pub fn points(&self) -> impl Iterator<Item = &GlowPoint> {
        self.points.iter().flatten()
    }

    /// Point in a given slot
    pub fn point(&self, slot: usize) -> Option<&GlowPoint> {
        self.points.get(slot).and_then(Option::as_ref)
    }

    /// Place a point in the first free slot
    ///
    /// Returns the slot index, or `None` when the pool is full.
    pub fn spawn(&mut self, point: GlowPoint) -> Option<usize> {
        let (index, slot) = self
            .points
            .iter_mut()
            .enumerate()
            .find(|(_, slot)| slot.is_none())?;
        *slot = Some(point);
        Some(index)
    }

    /// Age all points by one tick, freeing the ones that faded out
    fn advance(&mut self, speed: u8) {
        let step = Self::step(speed);
        let fade_chance = self.config.fade_chance;

        for slot in &mut self.points {
            let Some(point) = slot else {
                continue;
            };
            if !point.advance(step, fade_chance, &mut self.rng) {
                *slot = None;
            }
        }
    }

    /// Roll for a new point; faster speeds spawn more often
    fn try_spawn(&mut self, params: &AnimationParameters, len: usize) {
        if self.active_count() >= GLOW_CAPACITY {
            return;
        }

        let threshold = self.config.spawn_threshold.map(params.speed);
        if self.rng.random8() <= threshold {
            return;
        }

        let config = self.config;
        let rng = &mut self.rng;
        let position = rng.random16_below(u16::try_from(len).unwrap_or(u16::MAX));
        let hue = params
            .hue
            .wrapping_add(rng.random8_below(config.hue_jitter))
            .wrapping_sub(config.hue_jitter / 2);
        let spread = params
            .spread
            .saturating_add(rng.random8_below(config.spread_jitter))
            .saturating_sub(config.spread_jitter / 2);
        let target = params
            .brightness
            .saturating_sub(rng.random8_below(config.intensity_jitter))
            .max(1);

        let _ = self.spawn(GlowPoint::new(position, hue, spread, target));
    }
}

impl<R: RandomSource> Effect for GlowEffect<R> {
    fn render(&mut self, params: &AnimationParameters, _now: Instant, leds: &mut [Rgb]) {
        fill_black(leds);
        if leds.is_empty() {
            return;
        }

        self.advance(params.speed);

        let saturation = self.config.saturation;
        for point in self.points.iter().flatten() {
            point.render(saturation, leds);
        }

        self.try_spawn(params, leds.len());
    }

    fn reset(&mut self) {
        self.points = [None; GLOW_CAPACITY];
    }
}
