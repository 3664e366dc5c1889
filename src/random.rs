/// A deterministic source of bounded integers.
pub trait RandomSource {
    /// Returns an integer in `[0, bound)`.
    fn next(&mut self, bound: usize) -> usize;
}

/// Seeded generator built on Robert Jenkins' 32-bit integer hash.
///
/// Every draw rehashes the state word, so the sequence depends only on the
/// seed. The arithmetic wraps at 32 bits, which keeps the output identical to
/// other implementations of the same generator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JenkinsRandom {
    state: u32,
}

pub type SeededRandom = JenkinsRandom;

const MANTISSA_MASK: u32 = 0x0fff_ffff;
const MANTISSA_SCALE: f64 = 268_435_456.0; // 2^28

impl JenkinsRandom {
    pub fn new(seed: u32) -> Self {
        Self { state: seed }
    }

    /// Returns a value in `[0, 1)` with 28 bits of precision.
    pub fn next_double(&mut self) -> f64 {
        let mut s = self.state;
        s = s.wrapping_add(0x7ed5_5d16).wrapping_add(s << 12);
        s = (s ^ 0xc761_c23c) ^ (s >> 19);
        s = s.wrapping_add(0x1656_67b1).wrapping_add(s << 5);
        s = s.wrapping_add(0xd3a2_646c) ^ (s << 9);
        s = s.wrapping_add(0xfd70_46c5).wrapping_add(s << 3);
        s = (s ^ 0xb55a_4f09) ^ (s >> 16);
        self.state = s;
        (s & MANTISSA_MASK) as f64 / MANTISSA_SCALE
    }
}

impl RandomSource for JenkinsRandom {
    #[inline]
    fn next(&mut self, bound: usize) -> usize {
        (self.next_double() * bound as f64) as usize
    }
}
