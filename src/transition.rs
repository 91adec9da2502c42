//! Time-based transitions
//!
//! [`FrameTransition`] crossfades whole frames when the animation parameters
//! change. [`ValueTransition`] fades a single value and backs the master
//! brightness.

use embassy_time::{Duration, Instant};

use crate::color::{BLACK, Rgb, blend_colors};
use crate::math8::{blend8, progress8};

/// Crossfade from a captured frame to a live target frame
///
/// `Idle --start--> Active --tick (progress < 1)--> Active --tick (progress = 1)--> Idle`
#[derive(Debug, Clone)]
pub struct FrameTransition<const N: usize> {
    previous: [Rgb; N],
    start_time: Instant,
    duration: Duration,
    active: bool,
}

impl<const N: usize> Default for FrameTransition<N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<const N: usize> FrameTransition<N> {
    pub const fn new() -> Self {
        Self {
            previous: [BLACK; N],
            start_time: Instant::from_millis(0),
            duration: Duration::from_millis(0),
            active: false,
        }
    }

    /// Check if a crossfade is in progress
    pub const fn is_active(&self) -> bool {
        self.active
    }

    /// Frame the crossfade starts from
    pub const fn previous(&self) -> &[Rgb; N] {
        &self.previous
    }

    /// Start a crossfade from `current`
    ///
    /// Any crossfade in flight is dropped. Callers pass the frame that is on
    /// the strip right now, so a restart continues from the blended image.
    pub fn start(&mut self, current: &[Rgb], duration: Duration, now: Instant) {
        let len = current.len().min(N);
        self.previous[..len].copy_from_slice(&current[..len]);
        self.previous[len..].fill(BLACK);
        self.start_time = now;
        self.duration = duration;
        self.active = true;
    }

    /// Write the blend of the captured frame and `target` into `out`
    ///
    /// Returns `true` while the crossfade is still running. Once it finishes,
    /// `out` is an exact copy of `target`.
    pub fn tick(&mut self, now: Instant, target: &[Rgb], out: &mut [Rgb]) -> bool {
        if self.active {
            let elapsed = now
                .checked_duration_since(self.start_time)
                .unwrap_or(Duration::from_millis(0));
            if elapsed >= self.duration {
                self.active = false;
            } else {
                let progress = progress8(elapsed, self.duration);
                for ((pixel, from), to) in out.iter_mut().zip(&self.previous).zip(target) {
                    *pixel = blend_colors(*from, *to, progress);
                }
                return true;
            }
        }

        for (pixel, to) in out.iter_mut().zip(target) {
            *pixel = *to;
        }
        false
    }
}

/// Blends two values of type `T` using a progress value (0-255)
pub type ValueBlender<T> = fn(T, T, u8) -> T;

/// Transition for values of type `T`
#[derive(Debug, Clone)]
pub struct ValueTransition<T: Copy> {
    blend: ValueBlender<T>,
    current: T,
    /// Value at the start of transition
    source: T,
    /// Target value (None if no transition in progress)
    target: Option<T>,
    duration: Duration,
    start_time: Instant,
}

impl<T: Copy> ValueTransition<T> {
    pub const fn new(initial: T, blend: ValueBlender<T>) -> Self {
        Self {
            blend,
            current: initial,
            source: initial,
            target: None,
            duration: Duration::from_millis(0),
            start_time: Instant::from_millis(0),
        }
    }

    pub const fn current(&self) -> T {
        self.current
    }

    pub const fn is_transitioning(&self) -> bool {
        self.target.is_some()
    }

    /// Move toward `value` over `duration`; a zero duration applies it at once
    pub fn set(&mut self, value: T, duration: Duration, now: Instant) {
        self.start_time = now;
        if duration.as_millis() == 0 {
            self.current = value;
            self.source = value;
            self.target = None;
            self.duration = duration;
        } else {
            self.source = self.current;
            self.target = Some(value);
            self.duration = duration;
        }
    }

    pub fn tick(&mut self, now: Instant) {
        let Some(target) = self.target else {
            return;
        };

        let elapsed = now
            .checked_duration_since(self.start_time)
            .unwrap_or(Duration::from_millis(0));
        if elapsed >= self.duration {
            self.current = target;
            self.source = target;
            self.target = None;
            return;
        }

        let progress = progress8(elapsed, self.duration);
        self.current = (self.blend)(self.source, target, progress);
    }
}

impl ValueTransition<u8> {
    pub const fn new_u8(initial: u8) -> Self {
        Self::new(initial, blend8)
    }
}
