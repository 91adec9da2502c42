//! Maps conditioned sensor intensities onto animation parameters
//!
//! Intensities are exponentially smoothed, mapped onto hue/brightness/speed/
//! spread and only emitted when the change is visible and the previous change
//! is old enough. The rate limit is the only backpressure in the pipeline.

use embassy_time::Instant;

#[cfg(feature = "esp32-log")]
use esp_println::println;

use crate::config::MapperConfig;
use crate::math8::{blend8, diff8};
use crate::sensor::SensorStatus;

/// Parameters the glow engine renders with
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AnimationParameters {
    pub hue: u8,
    /// Peak glow intensity
    pub brightness: u8,
    /// Lifecycle speed and spawn rate
    pub speed: u8,
    /// Glow radius in LEDs
    pub spread: u8,
}

impl AnimationParameters {
    /// Calm parameter set shown while nothing is detected
    pub const fn idle(config: &MapperConfig) -> Self {
        Self {
            hue: config.cool_hue,
            brightness: config.idle_brightness(),
            speed: config.idle_speed(),
            spread: config.spread.min,
        }
    }
}

/// Exponentially smoothed channel intensities
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct SmoothedIntensity {
    pub presence: f32,
    pub motion: f32,
}

/// One exponential smoothing step: `alpha * new + (1 - alpha) * previous`
#[inline]
pub fn smooth(previous: f32, new: u8, alpha: f32) -> f32 {
    alpha * f32::from(new) + (1.0 - alpha) * previous
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn as_byte(value: f32) -> u8 {
    libm::roundf(value).clamp(0.0, 255.0) as u8
}

/// Stateful sensor-to-parameter mapper
#[derive(Debug, Clone)]
pub struct ParameterMapper {
    config: MapperConfig,
    smoothed: SmoothedIntensity,
    applied: AnimationParameters,
    last_change: Option<Instant>,
}

impl ParameterMapper {
    pub const fn new(config: MapperConfig) -> Self {
        Self {
            applied: AnimationParameters::idle(&config),
            config,
            smoothed: SmoothedIntensity {
                presence: 0.0,
                motion: 0.0,
            },
            last_change: None,
        }
    }

    /// Last applied parameter snapshot
    pub const fn parameters(&self) -> AnimationParameters {
        self.applied
    }

    pub const fn smoothed(&self) -> SmoothedIntensity {
        self.smoothed
    }

    /// Forget smoothing history and return to the idle snapshot
    pub fn reset(&mut self) {
        *self = Self::new(self.config);
    }

    /// Feed one conditioned sample
    ///
    /// Returns new parameters when they differ visibly from the last applied
    /// snapshot and `min_update_interval` has passed since the last change.
    pub fn update(
        &mut self,
        presence_detected: bool,
        motion_detected: bool,
        presence_intensity: u8,
        motion_intensity: u8,
        now: Instant,
    ) -> Option<AnimationParameters> {
        let alpha = self.config.alpha;
        self.smoothed.presence = smooth(self.smoothed.presence, presence_intensity, alpha);
        self.smoothed.motion = smooth(self.smoothed.motion, motion_intensity, alpha);

        let candidate = self.candidate(presence_detected, motion_detected);
        if !self.is_significant(&candidate) || self.is_rate_limited(now) {
            return None;
        }

        #[cfg(feature = "esp32-log")]
        println!(
            "[ParameterMapper.update] hue={} brightness={} speed={} spread={}",
            candidate.hue, candidate.brightness, candidate.speed, candidate.spread
        );

        self.applied = candidate;
        self.last_change = Some(now);
        Some(candidate)
    }

    /// Convenience wrapper taking the conditioner output directly
    pub fn update_from_status(
        &mut self,
        status: &SensorStatus,
        now: Instant,
    ) -> Option<AnimationParameters> {
        self.update(
            status.presence.detected,
            status.motion.detected,
            status.presence.intensity,
            status.motion.intensity,
            now,
        )
    }

    /// Parameters implied by the current smoothed intensities
    fn candidate(&self, presence_detected: bool, motion_detected: bool) -> AnimationParameters {
        let config = &self.config;
        let presence = self.smoothed.presence;
        let motion = self.smoothed.motion;
        let presence8 = as_byte(presence);
        let motion8 = as_byte(motion);

        let hue = if motion_detected && motion8 > config.medium_cut {
            blend8(config.cool_hue, config.warm_hue, motion8)
        } else if presence_detected && presence8 > config.low_cut {
            blend8(config.cool_hue, config.neutral_hue, presence8)
        } else {
            config.cool_hue
        };

        let spread = config.spread.map_f32(presence.max(motion));

        let (brightness, speed) = if presence_detected || motion_detected {
            (
                config.brightness.map_f32(presence),
                config.speed.map_f32(motion),
            )
        } else {
            (config.idle_brightness(), config.idle_speed())
        };

        AnimationParameters {
            hue,
            brightness,
            speed,
            spread,
        }
    }

    fn is_significant(&self, candidate: &AnimationParameters) -> bool {
        let thresholds = &self.config.thresholds;
        let applied = &self.applied;

        diff8(candidate.hue, applied.hue) > thresholds.hue
            || diff8(candidate.brightness, applied.brightness) > thresholds.brightness
            || diff8(candidate.speed, applied.speed) > thresholds.speed
            || diff8(candidate.spread, applied.spread) > thresholds.spread
    }

    fn is_rate_limited(&self, now: Instant) -> bool {
        let Some(last) = self.last_change else {
            return false;
        };
        now.checked_duration_since(last)
            .is_none_or(|elapsed| elapsed < self.config.min_update_interval)
    }
}
