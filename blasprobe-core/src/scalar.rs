//! Element types: single/double precision, real and complex.
//!
//! Complex values are `num_complex::Complex<R>`, which is `#[repr(C)]` with the
//! real part first. A complex buffer is therefore an interleaved real sequence,
//! and `as_reals` exposes it as one.

use num_complex::{Complex32, Complex64};
use num_traits::{Float, NumAssign};
use std::fmt::Debug;
use std::ops::Neg;

/// Numeric precision tag of an element type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Precision {
    Single,
    Double,
    ComplexSingle,
    ComplexDouble,
}

impl Precision {
    pub const ALL: [Precision; 4] = [
        Precision::Single,
        Precision::Double,
        Precision::ComplexSingle,
        Precision::ComplexDouble,
    ];

    /// BLAS prefix letter: s, d, c, z.
    pub fn prefix(self) -> &'static str {
        match self {
            Precision::Single => "s",
            Precision::Double => "d",
            Precision::ComplexSingle => "c",
            Precision::ComplexDouble => "z",
        }
    }

    pub fn is_complex(self) -> bool {
        matches!(self, Precision::ComplexSingle | Precision::ComplexDouble)
    }

    /// Size of one element in bytes.
    pub fn element_size(self) -> usize {
        match self {
            Precision::Single => 4,
            Precision::Double | Precision::ComplexSingle => 8,
            Precision::ComplexDouble => 16,
        }
    }
}

impl std::fmt::Display for Precision {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.prefix())
    }
}

/// Element type a routine can be instantiated for.
pub trait Scalar:
    Copy + Send + Sync + Debug + PartialEq + NumAssign + Neg<Output = Self> + 'static
{
    /// Underlying real type (`Self` for real precisions).
    type Real: RealScalar;

    const PRECISION: Precision;

    /// Reals per element: 1 for real types, 2 for complex.
    const COMPONENTS: usize;

    fn from_real(re: Self::Real) -> Self;

    /// Builds an element from parts; real types drop `im`.
    fn from_parts(re: Self::Real, im: Self::Real) -> Self;

    fn re(self) -> Self::Real;

    fn im(self) -> Self::Real;

    fn conj(self) -> Self;

    /// `|re| + |im|`, the BLAS magnitude used by asum and amax.
    fn abs1(self) -> Self::Real;

    /// Squared modulus.
    fn norm_sqr(self) -> Self::Real;

    /// Reinterprets a buffer as its interleaved real sequence.
    fn as_reals(buf: &[Self]) -> &[Self::Real];

    fn as_reals_mut(buf: &mut [Self]) -> &mut [Self::Real];

    /// Loads the element whose first real component sits at `at`.
    #[inline]
    fn load(reals: &[Self::Real], at: usize) -> Self {
        if Self::COMPONENTS == 1 {
            Self::from_real(reals[at])
        } else {
            Self::from_parts(reals[at], reals[at + 1])
        }
    }

    /// Stores `self` with its first real component at `at`.
    #[inline]
    fn store(self, reals: &mut [Self::Real], at: usize) {
        reals[at] = self.re();
        if Self::COMPONENTS == 2 {
            reals[at + 1] = self.im();
        }
    }

    /// Casts from the widest precision; real types keep the real part.
    fn from_c64(v: Complex64) -> Self {
        Self::from_parts(
            <Self::Real as RealScalar>::from_f64(v.re),
            <Self::Real as RealScalar>::from_f64(v.im),
        )
    }

    fn to_c64(self) -> Complex64 {
        Complex64::new(self.re().as_f64(), self.im().as_f64())
    }
}

/// Real element types (`f32`, `f64`).
pub trait RealScalar: Scalar<Real = Self> + Float {
    fn from_f64(v: f64) -> Self;
    fn as_f64(self) -> f64;

    #[inline]
    fn from_usize(n: usize) -> Self {
        Self::from_f64(n as f64)
    }
}

/// Complex element types (`Complex32`, `Complex64`).
pub trait ComplexScalar: Scalar {}

macro_rules! impl_real {
    ($t:ty, $p:expr) => {
        impl Scalar for $t {
            type Real = $t;
            const PRECISION: Precision = $p;
            const COMPONENTS: usize = 1;

            #[inline(always)]
            fn from_real(re: $t) -> Self {
                re
            }
            #[inline(always)]
            fn from_parts(re: $t, _im: $t) -> Self {
                re
            }
            #[inline(always)]
            fn re(self) -> $t {
                self
            }
            #[inline(always)]
            fn im(self) -> $t {
                0.0
            }
            #[inline(always)]
            fn conj(self) -> Self {
                self
            }
            #[inline(always)]
            fn abs1(self) -> $t {
                self.abs()
            }
            #[inline(always)]
            fn norm_sqr(self) -> $t {
                self * self
            }
            fn as_reals(buf: &[Self]) -> &[$t] {
                buf
            }
            fn as_reals_mut(buf: &mut [Self]) -> &mut [$t] {
                buf
            }
        }

        impl RealScalar for $t {
            #[inline(always)]
            fn from_f64(v: f64) -> Self {
                v as $t
            }
            #[inline(always)]
            fn as_f64(self) -> f64 {
                self as f64
            }
        }
    };
}

macro_rules! impl_complex {
    ($t:ty, $r:ty, $p:expr) => {
        impl Scalar for $t {
            type Real = $r;
            const PRECISION: Precision = $p;
            const COMPONENTS: usize = 2;

            #[inline(always)]
            fn from_real(re: $r) -> Self {
                <$t>::new(re, 0.0)
            }
            #[inline(always)]
            fn from_parts(re: $r, im: $r) -> Self {
                <$t>::new(re, im)
            }
            #[inline(always)]
            fn re(self) -> $r {
                self.re
            }
            #[inline(always)]
            fn im(self) -> $r {
                self.im
            }
            #[inline(always)]
            fn conj(self) -> Self {
                <$t>::conj(&self)
            }
            #[inline(always)]
            fn abs1(self) -> $r {
                self.re.abs() + self.im.abs()
            }
            #[inline(always)]
            fn norm_sqr(self) -> $r {
                <$t>::norm_sqr(&self)
            }
            fn as_reals(buf: &[Self]) -> &[$r] {
                // Safety: Complex<R> is #[repr(C)] { re: R, im: R }, so a slice of
                // n complex values is exactly 2n contiguous reals.
                unsafe { std::slice::from_raw_parts(buf.as_ptr() as *const $r, buf.len() * 2) }
            }
            fn as_reals_mut(buf: &mut [Self]) -> &mut [$r] {
                // Safety: as above; the &mut borrow is carried over unchanged.
                unsafe {
                    std::slice::from_raw_parts_mut(buf.as_mut_ptr() as *mut $r, buf.len() * 2)
                }
            }
        }

        impl ComplexScalar for $t {}
    };
}

impl_real!(f32, Precision::Single);
impl_real!(f64, Precision::Double);
impl_complex!(Complex32, f32, Precision::ComplexSingle);
impl_complex!(Complex64, f64, Precision::ComplexDouble);
