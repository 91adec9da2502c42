//! Master output brightness
//!
//! Scales the finished frame right before it reaches the driver, so the
//! transition engine always captures unscaled frames.

use embassy_time::{Duration, Instant};

#[cfg(feature = "esp32-log")]
use esp_println::println;

use super::Filter;
use crate::{color::Rgb, math8::scale8, transition::ValueTransition};

/// Global brightness with smooth changes
#[derive(Debug, Clone)]
pub struct BrightnessFilter {
    brightness: ValueTransition<u8>,
}

impl BrightnessFilter {
    pub const fn new(brightness: u8) -> Self {
        Self {
            brightness: ValueTransition::new_u8(brightness),
        }
    }

    /// Set brightness with smooth transition
    pub fn set(&mut self, brightness: u8, duration: Duration, now: Instant) {
        #[cfg(feature = "esp32-log")]
        println!("[BrightnessFilter.set] setting brightness to {:?}", brightness);
        self.brightness.set(brightness, duration, now);
    }

    pub const fn current(&self) -> u8 {
        self.brightness.current()
    }

    pub const fn is_transitioning(&self) -> bool {
        self.brightness.is_transitioning()
    }
}

impl Filter for BrightnessFilter {
    fn apply(&mut self, frame: &mut [Rgb]) {
        let current = self.brightness.current();
        if current == 255 {
            return;
        }

        for pixel in frame.iter_mut() {
            pixel.r = scale8(pixel.r, current);
            pixel.g = scale8(pixel.g, current);
            pixel.b = scale8(pixel.b, current);
        }
    }

    fn tick(&mut self, now: Instant) {
        self.brightness.tick(now);
    }
}
