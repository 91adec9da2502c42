//! Sensor reading handoff
//!
//! The sensor is usually serviced from an interrupt or a separate task while
//! the renderer runs in its own loop. Readings cross over through a small
//! bounded queue guarded by `critical-section`. Only the newest reading
//! matters to the renderer, so a full queue drops its oldest entry instead of
//! rejecting the new one.

use core::cell::RefCell;

use critical_section::Mutex;
use heapless::Deque;

use crate::sensor::SensorReadings;

/// Error returned when trying to send to a full channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TrySendError<T>(pub T);

/// A bounded, interrupt safe queue
pub struct Channel<T, const SIZE: usize> {
    inner: Mutex<RefCell<Deque<T, SIZE>>>,
}

impl<T, const SIZE: usize> Channel<T, SIZE> {
    pub const fn new() -> Self {
        Self {
            inner: Mutex::new(RefCell::new(Deque::new())),
        }
    }

    pub const fn sender(&self) -> Sender<'_, T, SIZE> {
        Sender { channel: self }
    }

    pub const fn receiver(&self) -> Receiver<'_, T, SIZE> {
        Receiver { channel: self }
    }

    /// Queue a value, failing when the queue is full
    pub fn try_send(&self, value: T) -> Result<(), TrySendError<T>> {
        critical_section::with(|cs| {
            let mut queue = self.inner.borrow(cs).borrow_mut();
            queue.push_back(value).map_err(TrySendError)
        })
    }

    /// Queue a value, evicting the oldest one when the queue is full
    ///
    /// Returns the evicted value, if any.
    pub fn push_latest(&self, value: T) -> Option<T> {
        critical_section::with(|cs| {
            let mut queue = self.inner.borrow(cs).borrow_mut();
            let evicted = if queue.is_full() {
                queue.pop_front()
            } else {
                None
            };
            // Cannot fail: a slot was freed above if needed
            let _ = queue.push_back(value);
            evicted
        })
    }

    /// Take the oldest queued value
    pub fn try_receive(&self) -> Option<T> {
        critical_section::with(|cs| self.inner.borrow(cs).borrow_mut().pop_front())
    }

    /// Empty the queue and return its newest value
    pub fn drain_latest(&self) -> Option<T> {
        critical_section::with(|cs| {
            let mut queue = self.inner.borrow(cs).borrow_mut();
            let latest = queue.pop_back();
            queue.clear();
            latest
        })
    }

    pub fn len(&self) -> usize {
        critical_section::with(|cs| self.inner.borrow(cs).borrow().len())
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl<T, const SIZE: usize> Default for Channel<T, SIZE> {
    fn default() -> Self {
        Self::new()
    }
}

/// Producer side, handed to the sensor interrupt or task
#[derive(Clone, Copy)]
pub struct Sender<'a, T, const SIZE: usize> {
    channel: &'a Channel<T, SIZE>,
}

impl<T, const SIZE: usize> Sender<'_, T, SIZE> {
    pub fn try_send(&self, value: T) -> Result<(), TrySendError<T>> {
        self.channel.try_send(value)
    }

    pub fn push_latest(&self, value: T) -> Option<T> {
        self.channel.push_latest(value)
    }
}

/// Consumer side, owned by the render loop
#[derive(Clone, Copy)]
pub struct Receiver<'a, T, const SIZE: usize> {
    channel: &'a Channel<T, SIZE>,
}

impl<T, const SIZE: usize> Receiver<'_, T, SIZE> {
    pub fn try_receive(&self) -> Option<T> {
        self.channel.try_receive()
    }

    pub fn drain_latest(&self) -> Option<T> {
        self.channel.drain_latest()
    }
}

/// Channel carrying sensor readings to the render loop
pub type ReadingChannel<const SIZE: usize> = Channel<SensorReadings, SIZE>;

/// Sender half of a [`ReadingChannel`]
pub type ReadingSender<'a, const SIZE: usize> = Sender<'a, SensorReadings, SIZE>;

/// Receiver half of a [`ReadingChannel`]
pub type ReadingReceiver<'a, const SIZE: usize> = Receiver<'a, SensorReadings, SIZE>;
