//! Deterministic PRNG for reproducible operand data.
//!
//! `SplitMix64` keeps one u64 of state, so a run is fully described by its seed.

use crate::scalar::{RealScalar, Scalar};

/// SplitMix64 PRNG. Period 2^64.
#[derive(Debug, Clone)]
pub struct SplitMix64(u64);

impl SplitMix64 {
    #[inline]
    pub fn new(seed: u64) -> Self {
        Self(seed)
    }

    /// Next raw u64.
    #[inline]
    pub fn next_u64(&mut self) -> u64 {
        self.0 = self.0.wrapping_add(0x9E3779B97F4A7C15);
        let mut z = self.0;
        z = (z ^ (z >> 30)).wrapping_mul(0xBF58476D1CE4E5B9);
        z = (z ^ (z >> 27)).wrapping_mul(0x94D049BB133111EB);
        z ^ (z >> 31)
    }

    /// Uniform f64 in [0, 1), from the top 53 bits.
    #[inline]
    pub fn next_f64(&mut self) -> f64 {
        (self.next_u64() >> 11) as f64 / (1u64 << 53) as f64
    }

    /// Uniform f64 in [-1, 1).
    #[inline]
    pub fn next_signed(&mut self) -> f64 {
        2.0 * self.next_f64() - 1.0
    }

    /// Element with each real component uniform in [-1, 1).
    pub fn next_scalar<T: Scalar>(&mut self) -> T {
        let re = self.next_signed();
        let im = if T::COMPONENTS == 2 {
            self.next_signed()
        } else {
            0.0
        };
        T::from_parts(T::Real::from_f64(re), T::Real::from_f64(im))
    }

    pub fn fill<T: Scalar>(&mut self, buf: &mut [T]) {
        for v in buf.iter_mut() {
            *v = self.next_scalar();
        }
    }

    /// Uniform index in `0..bound`. `bound` must be non-zero.
    #[inline]
    pub fn next_below(&mut self, bound: usize) -> usize {
        (self.next_u64() % bound as u64) as usize
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use num_complex::Complex32;

    #[test]
    fn test_deterministic() {
        let mut a = SplitMix64::new(42);
        let mut b = SplitMix64::new(42);
        for _ in 0..100 {
            assert_eq!(a.next_u64(), b.next_u64());
        }
    }

    #[test]
    fn test_different_seeds() {
        let mut a = SplitMix64::new(1);
        let mut b = SplitMix64::new(2);
        assert_ne!(a.next_u64(), b.next_u64());
    }

    #[test]
    fn test_signed_range() {
        let mut rng = SplitMix64::new(42);
        for _ in 0..1000 {
            let v = rng.next_signed();
            assert!((-1.0..1.0).contains(&v), "next_signed() = {} out of [-1, 1)", v);
        }
    }

    #[test]
    fn test_complex_scalar_fills_both_parts() {
        let mut rng = SplitMix64::new(3);
        let mut buf = vec![Complex32::new(0.0, 0.0); 64];
        rng.fill(&mut buf);
        assert!(buf.iter().any(|v| v.im != 0.0));
        assert!(buf
            .iter()
            .all(|v| v.re.abs() <= 1.0 && v.im.abs() <= 1.0));
    }

    #[test]
    fn test_next_below() {
        let mut rng = SplitMix64::new(9);
        for _ in 0..1000 {
            assert!(rng.next_below(5) < 5);
        }
    }
}
