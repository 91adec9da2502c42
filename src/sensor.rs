//! Sensor signal conditioning
//!
//! Turns raw presence/motion readings into debounced detection flags and a
//! logarithmically compressed intensity byte.

#[cfg(feature = "esp32-log")]
use esp_println::println;

use crate::config::ConditionerConfig;

/// One sample of both sensor channels, as delivered by the sensor driver
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SensorReadings {
    pub presence: i16,
    /// Hardware presence flag
    pub presence_flag: bool,
    pub motion: i16,
    /// Hardware motion flag
    pub motion_flag: bool,
}

/// Conditioned state of a single channel
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ChannelStatus {
    pub detected: bool,
    pub intensity: u8,
    /// Last raw reading, kept for diagnostics
    pub raw: i16,
}

/// Conditioned state of both channels
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SensorStatus {
    pub presence: ChannelStatus,
    pub motion: ChannelStatus,
}

impl SensorStatus {
    /// Higher of the two intensities
    pub fn combined_intensity(&self) -> u8 {
        self.presence.intensity.max(self.motion.intensity)
    }

    /// Whether either channel currently detects something
    pub const fn any_detected(&self) -> bool {
        self.presence.detected || self.motion.detected
    }
}

/// `clamp(round(log10(abs + 1) * scale), 0, 255)`
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn log_intensity(abs: u16, scale_factor: u8) -> u8 {
    let scaled = libm::log10f(f32::from(abs) + 1.0) * f32::from(scale_factor);
    libm::roundf(scaled).clamp(0.0, 255.0) as u8
}

/// Debounced detector for one sensor channel
#[derive(Debug, Clone)]
pub struct SignalConditioner {
    config: ConditionerConfig,
    status: ChannelStatus,
    detect_count: u8,
    miss_count: u8,
}

impl SignalConditioner {
    pub const fn new(config: ConditionerConfig) -> Self {
        Self {
            config,
            status: ChannelStatus {
                detected: false,
                intensity: 0,
                raw: 0,
            },
            detect_count: 0,
            miss_count: 0,
        }
    }

    /// Feed one sample
    ///
    /// A sample qualifies when `|raw|` exceeds the channel floor and the
    /// hardware flag is set. The detection flag only changes after
    /// `debounce_count` consecutive samples agree; in between the previous
    /// state is kept.
    pub fn update(&mut self, raw: i16, hw_flag: bool) -> ChannelStatus {
        let abs = raw.unsigned_abs();
        self.status.raw = raw;

        if hw_flag && abs > self.config.min_value {
            self.detect_count = self.detect_count.saturating_add(1);
            self.miss_count = 0;

            if self.detect_count >= self.config.debounce_count {
                self.status.detected = true;
                self.status.intensity = log_intensity(abs, self.config.scale_factor);
            }
        } else {
            self.miss_count = self.miss_count.saturating_add(1);
            self.detect_count = 0;

            if self.miss_count >= self.config.debounce_count {
                self.status.detected = false;
                self.status.intensity = 0;
            }
        }

        self.status
    }

    pub const fn status(&self) -> ChannelStatus {
        self.status
    }

    pub fn reset(&mut self) {
        *self = Self::new(self.config);
    }
}

/// Presence and motion conditioners fed from a single reading
#[derive(Debug, Clone)]
pub struct SensorConditioner {
    presence: SignalConditioner,
    motion: SignalConditioner,
}

impl SensorConditioner {
    pub const fn new(presence: ConditionerConfig, motion: ConditionerConfig) -> Self {
        Self {
            presence: SignalConditioner::new(presence),
            motion: SignalConditioner::new(motion),
        }
    }

    /// Condition one reading of both channels
    pub fn update(&mut self, readings: SensorReadings) -> SensorStatus {
        #[cfg(feature = "esp32-log")]
        let before = self.status();

        let status = SensorStatus {
            presence: self
                .presence
                .update(readings.presence, readings.presence_flag),
            motion: self.motion.update(readings.motion, readings.motion_flag),
        };

        #[cfg(feature = "esp32-log")]
        if before.presence.detected != status.presence.detected
            || before.motion.detected != status.motion.detected
        {
            println!(
                "[SensorConditioner.update] presence={} ({}, raw {}) motion={} ({}, raw {})",
                status.presence.detected,
                status.presence.intensity,
                status.presence.raw,
                status.motion.detected,
                status.motion.intensity,
                status.motion.raw
            );
        }

        status
    }

    pub const fn status(&self) -> SensorStatus {
        SensorStatus {
            presence: self.presence.status(),
            motion: self.motion.status(),
        }
    }

    pub fn reset(&mut self) {
        self.presence.reset();
        self.motion.reset();
    }
}
