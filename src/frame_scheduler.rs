//! Frame scheduling and timing utilities.
//!
//! Provides portable frame pacing without async/await or platform-specific timers.
//! The caller is responsible for sleeping/waiting between frames.

use embassy_time::{Duration, Instant};

use crate::channel::ReadingReceiver;
use crate::effect::Effect;
use crate::sensor::SensorReadings;
use crate::{OutputDriver, ReactiveRenderer};

/// Default polling period (100 Hz).
pub const DEFAULT_FRAME_DURATION: Duration = Duration::from_millis(10);

/// Result of a frame tick operation.
#[derive(Debug, Clone, Copy)]
pub struct FrameResult {
    /// The deadline for the next frame.
    pub next_deadline: Instant,
    /// How long to wait until the next frame (may be zero if behind schedule).
    pub sleep_duration: Duration,
}

/// Portable frame scheduler that manages timing without async.
///
/// Each tick it:
/// - takes the newest sensor reading from the channel (or reuses the last one)
/// - runs the renderer and writes the frame to the output driver
/// - returns timing info so the caller can sleep appropriately
///
/// # Usage
///
/// ```ignore
/// static READINGS: ReadingChannel<4> = ReadingChannel::new();
///
/// let renderer = ReactiveRenderer::<_, 60>::with_glow(&config, SplitMix::new(seed));
/// let mut scheduler = FrameScheduler::new(renderer, driver, READINGS.receiver());
///
/// loop {
///     let result = scheduler.tick(Instant::from_millis(now_ms()));
///     sleep_ms(result.sleep_duration.as_millis());
/// }
/// ```
pub struct FrameScheduler<'a, O: OutputDriver, E: Effect, const N: usize, const SIZE: usize> {
    output: O,
    renderer: ReactiveRenderer<E, N>,
    readings: ReadingReceiver<'a, SIZE>,
    last_reading: SensorReadings,
    next_frame: Instant,
    frame_duration: Duration,
}

impl<'a, O: OutputDriver, E: Effect, const N: usize, const SIZE: usize>
    FrameScheduler<'a, O, E, N, SIZE>
{
    /// Create a new frame scheduler running at [`DEFAULT_FRAME_DURATION`].
    pub fn new(
        renderer: ReactiveRenderer<E, N>,
        driver: O,
        readings: ReadingReceiver<'a, SIZE>,
    ) -> Self {
        Self::with_frame_duration(renderer, driver, readings, DEFAULT_FRAME_DURATION)
    }

    /// Create a new frame scheduler with custom frame duration.
    pub fn with_frame_duration(
        renderer: ReactiveRenderer<E, N>,
        driver: O,
        readings: ReadingReceiver<'a, SIZE>,
        frame_duration: Duration,
    ) -> Self {
        Self {
            output: driver,
            renderer,
            readings,
            last_reading: SensorReadings::default(),
            next_frame: Instant::from_millis(0),
            frame_duration,
        }
    }

    /// Process one frame and return timing information.
    ///
    /// The caller is responsible for waiting until `next_deadline` before
    /// calling `tick` again.
    pub fn tick(&mut self, now: Instant) -> FrameResult {
        // Skip the backlog after a long stall instead of bursting to catch up
        let max_drift = Duration::from_millis(self.frame_duration.as_millis() * 2);
        if now > self.next_frame + max_drift {
            self.next_frame = now;
        }

        if let Some(reading) = self.readings.drain_latest() {
            self.last_reading = reading;
        }

        let frame = self.renderer.tick(self.last_reading, now);
        self.output.write(frame);

        self.next_frame += self.frame_duration;

        let sleep_duration = self
            .next_frame
            .checked_duration_since(now)
            .unwrap_or(Duration::from_millis(0));

        FrameResult {
            next_deadline: self.next_frame,
            sleep_duration,
        }
    }

    /// Reading the last frame was rendered from.
    pub const fn last_reading(&self) -> SensorReadings {
        self.last_reading
    }

    pub const fn renderer(&self) -> &ReactiveRenderer<E, N> {
        &self.renderer
    }

    pub fn renderer_mut(&mut self) -> &mut ReactiveRenderer<E, N> {
        &mut self.renderer
    }

    pub const fn output(&self) -> &O {
        &self.output
    }
}
