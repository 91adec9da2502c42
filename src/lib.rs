#![no_std]

pub mod channel;
pub mod color;
pub mod config;
pub mod effect;
pub mod filter;
pub mod frame_scheduler;
pub mod mapper;
pub mod math8;
pub mod random;
pub mod renderer;
pub mod sensor;
pub mod transition;

pub use channel::{ReadingChannel, ReadingReceiver, ReadingSender};
pub use config::{ConfigError, ReactiveConfig};
pub use effect::{Effect, GlowEffect, GlowPhase, GlowPoint};
pub use frame_scheduler::{FrameResult, FrameScheduler};
pub use mapper::{AnimationParameters, ParameterMapper};
pub use random::{RandomSource, SplitMix};
pub use renderer::ReactiveRenderer;
pub use sensor::{ChannelStatus, SensorConditioner, SensorReadings, SensorStatus, SignalConditioner};
pub use transition::FrameTransition;

pub use color::{Hsv, Rgb};
pub use embassy_time::{Duration, Instant};

/// Abstract LED driver trait
///
/// Implement this trait to support different hardware platforms.
/// The frame scheduler is generic over this trait.
pub trait OutputDriver {
    /// Write colors to the LED strip
    fn write(&mut self, colors: &[Rgb]);
}
