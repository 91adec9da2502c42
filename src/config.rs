//! Engine configuration
//!
//! Every tunable of the pipeline is a named constant here. Hosts usually start
//! from [`ReactiveConfig::default`] and override single fields.

use core::fmt;

use embassy_time::Duration;

use crate::math8::map8;

/// Number of consecutive consistent samples required to flip detection
pub const DEBOUNCE_COUNT: u8 = 3;

pub const PRESENCE_MIN_VALUE: u16 = 70;
pub const PRESENCE_LOG_SCALE_FACTOR: u8 = 60;
pub const MOTION_MIN_VALUE: u16 = 70;
pub const MOTION_LOG_SCALE_FACTOR: u8 = 70;

pub const SMOOTHING_ALPHA: f32 = 0.3;

pub const BRIGHTNESS_MIN: u8 = 40;
pub const BRIGHTNESS_MAX: u8 = 220;
pub const SPEED_MIN: u8 = 10;
pub const SPEED_MAX: u8 = 200;
pub const SPREAD_MIN: u8 = 2;
pub const SPREAD_MAX: u8 = 8;

pub const INTENSITY_LOW: u8 = 64;
pub const INTENSITY_MEDIUM: u8 = 128;

/// Blue, shown while nothing is detected
pub const HUE_COOL: u8 = 160;
/// Green, reached by strong presence
pub const HUE_NEUTRAL: u8 = 96;
/// Red, reached by strong motion
pub const HUE_WARM: u8 = 0;

pub const MIN_UPDATE_INTERVAL: Duration = Duration::from_millis(250);
pub const TRANSITION_DURATION: Duration = Duration::from_millis(800);

/// Maximum number of simultaneously active glow points
pub const GLOW_CAPACITY: usize = 5;

/// Inclusive `u8` range used to map intensities onto parameters
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ValueRange {
    pub min: u8,
    pub max: u8,
}

impl ValueRange {
    pub const fn new(min: u8, max: u8) -> Self {
        Self { min, max }
    }

    /// Map `0..=255` onto this range
    pub const fn map(self, value: u8) -> u8 {
        map8(value, self.min, self.max)
    }

    /// Map a smoothed (floating point) intensity onto this range with rounding
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn map_f32(self, value: f32) -> u8 {
        let t = value.clamp(0.0, 255.0) / 255.0;
        let span = f32::from(self.max) - f32::from(self.min);
        libm::roundf(f32::from(self.min) + span * t).clamp(0.0, 255.0) as u8
    }

    const fn is_ascending(self) -> bool {
        self.min <= self.max
    }
}

/// Per-channel signal conditioning constants
#[derive(Debug, Clone, Copy)]
pub struct ConditionerConfig {
    /// `|raw|` must exceed this to qualify
    pub min_value: u16,
    /// Multiplier applied to `log10(|raw| + 1)`
    pub scale_factor: u8,
    pub debounce_count: u8,
}

impl ConditionerConfig {
    pub const PRESENCE: Self = Self {
        min_value: PRESENCE_MIN_VALUE,
        scale_factor: PRESENCE_LOG_SCALE_FACTOR,
        debounce_count: DEBOUNCE_COUNT,
    };

    pub const MOTION: Self = Self {
        min_value: MOTION_MIN_VALUE,
        scale_factor: MOTION_LOG_SCALE_FACTOR,
        debounce_count: DEBOUNCE_COUNT,
    };
}

/// Minimum per-field difference for a candidate to count as a change
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChangeThresholds {
    pub hue: u8,
    pub brightness: u8,
    pub speed: u8,
    pub spread: u8,
}

impl Default for ChangeThresholds {
    fn default() -> Self {
        Self {
            hue: 5,
            brightness: 8,
            speed: 5,
            spread: 1,
        }
    }
}

/// Parameter mapper constants
#[derive(Debug, Clone, Copy)]
pub struct MapperConfig {
    /// Exponential smoothing factor in `(0, 1]`; higher reacts faster
    pub alpha: f32,
    pub brightness: ValueRange,
    pub speed: ValueRange,
    pub spread: ValueRange,
    /// Smoothed presence above this tints toward `neutral_hue`
    pub low_cut: u8,
    /// Smoothed motion above this tints toward `warm_hue`
    pub medium_cut: u8,
    pub cool_hue: u8,
    pub neutral_hue: u8,
    pub warm_hue: u8,
    /// Idle brightness is `brightness.min + idle_brightness_offset`
    pub idle_brightness_offset: u8,
    /// Idle speed is `speed.min + idle_speed_offset`
    pub idle_speed_offset: u8,
    pub thresholds: ChangeThresholds,
    pub min_update_interval: Duration,
}

impl MapperConfig {
    pub const fn idle_brightness(&self) -> u8 {
        self.brightness.min.saturating_add(self.idle_brightness_offset)
    }

    pub const fn idle_speed(&self) -> u8 {
        self.speed.min.saturating_add(self.idle_speed_offset)
    }
}

impl Default for MapperConfig {
    fn default() -> Self {
        Self {
            alpha: SMOOTHING_ALPHA,
            brightness: ValueRange::new(BRIGHTNESS_MIN, BRIGHTNESS_MAX),
            speed: ValueRange::new(SPEED_MIN, SPEED_MAX),
            spread: ValueRange::new(SPREAD_MIN, SPREAD_MAX),
            low_cut: INTENSITY_LOW,
            medium_cut: INTENSITY_MEDIUM,
            cool_hue: HUE_COOL,
            neutral_hue: HUE_NEUTRAL,
            warm_hue: HUE_WARM,
            idle_brightness_offset: 20,
            idle_speed_offset: 5,
            thresholds: ChangeThresholds::default(),
            min_update_interval: MIN_UPDATE_INTERVAL,
        }
    }
}

/// Glow engine constants
#[derive(Debug, Clone, Copy)]
pub struct GlowConfig {
    /// HSV saturation of every glow point
    pub saturation: u8,
    /// A stable point starts fading when a random byte is below this
    pub fade_chance: u8,
    /// Spawn threshold at speed 0 (`min`) and speed 255 (`max`); a spawn
    /// happens when a random byte exceeds it
    pub spawn_threshold: ValueRange,
    pub hue_jitter: u8,
    pub spread_jitter: u8,
    pub intensity_jitter: u8,
}

impl Default for GlowConfig {
    fn default() -> Self {
        Self {
            saturation: 240,
            fade_chance: 5,
            spawn_threshold: ValueRange::new(250, 180),
            hue_jitter: 10,
            spread_jitter: 2,
            intensity_jitter: 20,
        }
    }
}

/// Configuration for the whole reactive pipeline
#[derive(Debug, Clone, Copy)]
pub struct ReactiveConfig {
    pub presence: ConditionerConfig,
    pub motion: ConditionerConfig,
    pub mapper: MapperConfig,
    pub glow: GlowConfig,
    /// Crossfade duration started on every parameter change
    pub transition: Duration,
    /// Master output brightness (255 = unscaled)
    pub brightness: u8,
}

impl Default for ReactiveConfig {
    fn default() -> Self {
        Self {
            presence: ConditionerConfig::PRESENCE,
            motion: ConditionerConfig::MOTION,
            mapper: MapperConfig::default(),
            glow: GlowConfig::default(),
            transition: TRANSITION_DURATION,
            brightness: 255,
        }
    }
}

/// Inconsistent configuration detected by [`ReactiveConfig::validate`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigError {
    /// A debounce count of zero would flip detection without any sample
    ZeroDebounce,
    /// Smoothing factor outside `(0, 1]`
    InvalidAlpha,
    /// A mapping range has `min > max`
    InvertedRange(RangeField),
    /// Idle floor lies above the range maximum
    IdleAboveMax(RangeField),
}

/// Which mapping range a [`ConfigError`] refers to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RangeField {
    Brightness,
    Speed,
    Spread,
}

impl RangeField {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Brightness => "brightness",
            Self::Speed => "speed",
            Self::Spread => "spread",
        }
    }
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ZeroDebounce => write!(f, "debounce count must be at least 1"),
            Self::InvalidAlpha => write!(f, "smoothing factor must be in (0, 1]"),
            Self::InvertedRange(field) => {
                write!(f, "{} range has min above max", field.as_str())
            }
            Self::IdleAboveMax(field) => {
                write!(f, "idle {} exceeds the range maximum", field.as_str())
            }
        }
    }
}

impl ReactiveConfig {
    /// Check the constants for consistency
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.presence.debounce_count == 0 || self.motion.debounce_count == 0 {
            return Err(ConfigError::ZeroDebounce);
        }

        let alpha = self.mapper.alpha;
        if !(alpha > 0.0 && alpha <= 1.0) {
            return Err(ConfigError::InvalidAlpha);
        }

        let ranges = [
            (self.mapper.brightness, RangeField::Brightness),
            (self.mapper.speed, RangeField::Speed),
            (self.mapper.spread, RangeField::Spread),
        ];
        for (range, field) in ranges {
            if !range.is_ascending() {
                return Err(ConfigError::InvertedRange(field));
            }
        }

        if self.mapper.idle_brightness() > self.mapper.brightness.max {
            return Err(ConfigError::IdleAboveMax(RangeField::Brightness));
        }
        if self.mapper.idle_speed() > self.mapper.speed.max {
            return Err(ConfigError::IdleAboveMax(RangeField::Speed));
        }

        Ok(())
    }
}
