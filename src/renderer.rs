use embassy_time::{Duration, Instant};

#[cfg(feature = "esp32-log")]
use esp_println::println;

use crate::color::{BLACK, Rgb};
use crate::config::{ConfigError, ReactiveConfig};
use crate::effect::{Effect, GlowEffect};
use crate::filter::{BrightnessFilter, Filter};
use crate::mapper::{AnimationParameters, ParameterMapper};
use crate::random::RandomSource;
use crate::sensor::{SensorConditioner, SensorReadings, SensorStatus};
use crate::transition::FrameTransition;

/// Reactive renderer - the main orchestrator
///
/// Owns every piece of mutable pipeline state. One call to [`tick`] runs the
/// whole chain: conditioning, parameter mapping, effect rendering, crossfade
/// and output filtering.
///
/// [`tick`]: ReactiveRenderer::tick
pub struct ReactiveRenderer<E: Effect, const N: usize> {
    // Pipeline stages
    sensors: SensorConditioner,
    mapper: ParameterMapper,
    effect: E,
    transition: FrameTransition<N>,
    brightness: BrightnessFilter,

    // Configuration
    transition_duration: Duration,

    // Internal state
    params: AnimationParameters,
    status: SensorStatus,
    target: [Rgb; N],
    output: [Rgb; N],
    frame: [Rgb; N],
}

impl<R: RandomSource, const N: usize> ReactiveRenderer<GlowEffect<R>, N> {
    /// Create a renderer driving the glow effect
    pub fn with_glow(config: &ReactiveConfig, rng: R) -> Self {
        Self::new(config, GlowEffect::new(config.glow, rng))
    }
}

impl<E: Effect, const N: usize> ReactiveRenderer<E, N> {
    /// Create a renderer from trusted constants
    pub fn new(config: &ReactiveConfig, effect: E) -> Self {
        let mapper = ParameterMapper::new(config.mapper);
        Self {
            sensors: SensorConditioner::new(config.presence, config.motion),
            params: mapper.parameters(),
            mapper,
            effect,
            transition: FrameTransition::new(),
            brightness: BrightnessFilter::new(config.brightness),
            transition_duration: config.transition,
            status: SensorStatus::default(),
            target: [BLACK; N],
            output: [BLACK; N],
            frame: [BLACK; N],
        }
    }

    /// Create a renderer after checking the configuration
    pub fn try_new(config: &ReactiveConfig, effect: E) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self::new(config, effect))
    }

    /// Process one tick
    ///
    /// Returns the frame to send to the LEDs.
    pub fn tick(&mut self, readings: SensorReadings, now: Instant) -> &[Rgb] {
        self.status = self.sensors.update(readings);

        if let Some(params) = self.mapper.update_from_status(&self.status, now) {
            self.apply_parameters(params, now);
        }

        self.effect.render(&self.params, now, &mut self.target);
        self.transition.tick(now, &self.target, &mut self.output);

        self.brightness.tick(now);
        self.frame = self.output;
        self.brightness.apply(&mut self.frame);

        &self.frame
    }

    /// Switch to new parameters, crossfading from what is on the strip now
    fn apply_parameters(&mut self, params: AnimationParameters, now: Instant) {
        #[cfg(feature = "esp32-log")]
        println!(
            "[ReactiveRenderer.apply_parameters] starting {}ms transition (restart: {})",
            self.transition_duration.as_millis(),
            self.transition.is_active()
        );

        self.transition
            .start(&self.output, self.transition_duration, now);
        self.params = params;
    }

    /// Set master output brightness
    pub fn set_brightness(&mut self, brightness: u8, duration: Duration, now: Instant) {
        self.brightness.set(brightness, duration, now);
    }

    /// Conditioned sensor state from the last tick
    pub const fn status(&self) -> SensorStatus {
        self.status
    }

    /// Parameters the effect currently renders with
    pub const fn parameters(&self) -> AnimationParameters {
        self.params
    }

    pub const fn is_transitioning(&self) -> bool {
        self.transition.is_active()
    }

    /// Last frame produced by [`tick`](ReactiveRenderer::tick)
    pub const fn frame(&self) -> &[Rgb; N] {
        &self.frame
    }

    pub const fn effect(&self) -> &E {
        &self.effect
    }

    pub const fn mapper(&self) -> &ParameterMapper {
        &self.mapper
    }

    /// Drop all volatile state, as after a power cycle
    pub fn reset(&mut self) {
        self.sensors.reset();
        self.mapper.reset();
        self.effect.reset();
        self.params = self.mapper.parameters();
        self.status = SensorStatus::default();
        self.target = [BLACK; N];
        self.output = [BLACK; N];
        self.frame = [BLACK; N];
        self.transition = FrameTransition::new();
    }
}
