//! 8-bit fixed-point helpers shared by the mapper, the glow engine and the
//! transition engine.

use embassy_time::Duration;

/// Scale an 8-bit value by a factor (0-255 = 0.0-1.0)
///
/// Uses integer math for efficiency on embedded systems.
#[inline]
#[allow(clippy::cast_lossless, clippy::cast_possible_truncation)]
pub const fn scale8(value: u8, scale: u8) -> u8 {
    ((value as u16 * (1 + scale as u16)) >> 8) as u8
}

/// Blend two 8-bit values
///
/// `amount_of_b == 0` returns `a` and `amount_of_b == 255` returns `b`
/// exactly; everything in between stays within `[min(a, b), max(a, b)]`.
#[inline]
#[allow(clippy::cast_sign_loss, clippy::cast_possible_truncation)]
pub const fn blend8(a: u8, b: u8, amount_of_b: u8) -> u8 {
    let delta = b as i16 - a as i16;

    let mut partial: u32 = (a as u32) << 16;
    partial = partial.wrapping_add(
        (delta as u32)
            .wrapping_mul(amount_of_b as u32)
            .wrapping_mul(257),
    );
    partial = partial.wrapping_add(0x8000);

    (partial >> 16) as u8
}

/// Calculate progress (0-255) based on elapsed time and duration
///
/// A zero duration counts as already finished.
#[allow(clippy::cast_possible_truncation)]
#[inline]
pub const fn progress8(elapsed: Duration, duration: Duration) -> u8 {
    if elapsed.as_millis() >= duration.as_millis() {
        return 255;
    }

    ((elapsed.as_millis() * 255) / duration.as_millis()) as u8
}

/// Linearly map `value` from `0..=255` onto `from..=to`.
///
/// Works for descending targets too (`from > to`), which is how the spawn
/// threshold falls as speed rises.
#[inline]
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub const fn map8(value: u8, from: u8, to: u8) -> u8 {
    let span = to as i32 - from as i32;
    (from as i32 + span * value as i32 / 255) as u8
}

/// Absolute difference of two bytes
#[inline]
pub const fn diff8(a: u8, b: u8) -> u8 {
    a.abs_diff(b)
}
