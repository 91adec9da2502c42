//! Random number capability for spawn triggers and jitter.
//!
//! The glow engine is generic over [`RandomSource`] so hosts can plug in a
//! hardware RNG and tests can script the exact sequence of rolls.

/// Source of pseudo-random bytes
pub trait RandomSource {
    /// Next raw 32-bit value
    fn next_u32(&mut self) -> u32;

    /// Uniform byte in `0..=255`
    #[allow(clippy::cast_possible_truncation)]
    fn random8(&mut self) -> u8 {
        (self.next_u32() >> 24) as u8
    }

    /// Byte in `0..limit`, or 0 when `limit` is 0
    #[allow(clippy::cast_possible_truncation)]
    fn random8_below(&mut self, limit: u8) -> u8 {
        ((u16::from(self.random8()) * u16::from(limit)) >> 8) as u8
    }

    /// Value in `0..limit`, or 0 when `limit` is 0
    #[allow(clippy::cast_possible_truncation)]
    fn random16_below(&mut self, limit: u16) -> u16 {
        let raw = self.next_u32() >> 16;
        ((raw * u32::from(limit)) >> 16) as u16
    }
}

/// SplitMix64 generator
///
/// Small, fast and good enough for visual jitter. Not suitable for anything
/// security related.
#[derive(Debug, Clone)]
pub struct SplitMix {
    state: u64,
}

impl SplitMix {
    pub const fn new(seed: u64) -> Self {
        Self { state: seed }
    }

    #[inline]
    const fn mix(mut z: u64) -> u64 {
        z = (z ^ (z >> 30)).wrapping_mul(0xbf58_476d_1ce4_e5b9);
        z = (z ^ (z >> 27)).wrapping_mul(0x94d0_49bb_1331_11eb);
        z ^ (z >> 31)
    }
}

impl Default for SplitMix {
    fn default() -> Self {
        Self::new(0x5eed)
    }
}

impl RandomSource for SplitMix {
    #[allow(clippy::cast_possible_truncation)]
    fn next_u32(&mut self) -> u32 {
        self.state = self.state.wrapping_add(0x9e37_79b9_7f4a_7c15);
        (Self::mix(self.state) >> 32) as u32
    }
}
