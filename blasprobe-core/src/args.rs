//! The argument bundle: every size, stride, offset, scalar and option a routine
//! family can consume, plus the buffer sizes derived from them.
//!
//! Values set through the `with_*` builders are recorded as supplied, which is
//! what [`Arguments::validate_required`] checks. Writing a public field
//! directly changes the value but does not mark it supplied.

use crate::buffers::BufferRole;
use crate::error::{ProbeError, Result};
use crate::layout::{Diagonal, Layout, Side, Transpose, Triangle};
use crate::scalar::Scalar;
use std::fmt;

/// Option tokens a routine can declare as required.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Opt {
    M,
    N,
    K,
    KL,
    KU,
    Layout,
    ATransp,
    BTransp,
    Side,
    Triangle,
    Diagonal,
    XInc,
    YInc,
    XOffset,
    YOffset,
    AOffset,
    BOffset,
    COffset,
    APOffset,
    DotOffset,
    Nrm2Offset,
    AsumOffset,
    ImaxOffset,
    ALeadDim,
    BLeadDim,
    CLeadDim,
    Alpha,
    Beta,
}

impl Opt {
    pub const ALL: [Opt; 28] = [
        Opt::M,
        Opt::N,
        Opt::K,
        Opt::KL,
        Opt::KU,
        Opt::Layout,
        Opt::ATransp,
        Opt::BTransp,
        Opt::Side,
        Opt::Triangle,
        Opt::Diagonal,
        Opt::XInc,
        Opt::YInc,
        Opt::XOffset,
        Opt::YOffset,
        Opt::AOffset,
        Opt::BOffset,
        Opt::COffset,
        Opt::APOffset,
        Opt::DotOffset,
        Opt::Nrm2Offset,
        Opt::AsumOffset,
        Opt::ImaxOffset,
        Opt::ALeadDim,
        Opt::BLeadDim,
        Opt::CLeadDim,
        Opt::Alpha,
        Opt::Beta,
    ];

    /// Command-line style name of the option.
    pub fn name(self) -> &'static str {
        match self {
            Opt::M => "m",
            Opt::N => "n",
            Opt::K => "k",
            Opt::KL => "kl",
            Opt::KU => "ku",
            Opt::Layout => "layout",
            Opt::ATransp => "transA",
            Opt::BTransp => "transB",
            Opt::Side => "side",
            Opt::Triangle => "triangle",
            Opt::Diagonal => "diagonal",
            Opt::XInc => "incx",
            Opt::YInc => "incy",
            Opt::XOffset => "offx",
            Opt::YOffset => "offy",
            Opt::AOffset => "offa",
            Opt::BOffset => "offb",
            Opt::COffset => "offc",
            Opt::APOffset => "offap",
            Opt::DotOffset => "offdot",
            Opt::Nrm2Offset => "offnrm2",
            Opt::AsumOffset => "offasum",
            Opt::ImaxOffset => "offimax",
            Opt::ALeadDim => "lda",
            Opt::BLeadDim => "ldb",
            Opt::CLeadDim => "ldc",
            Opt::Alpha => "alpha",
            Opt::Beta => "beta",
        }
    }

    #[inline(always)]
    fn bit(self) -> u32 {
        1 << (self as u32)
    }
}

impl fmt::Display for Opt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Set of supplied options.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct OptSet(u32);

impl OptSet {
    pub fn insert(&mut self, opt: Opt) {
        self.0 |= opt.bit();
    }

    pub fn contains(self, opt: Opt) -> bool {
        self.0 & opt.bit() != 0
    }

    pub fn is_empty(self) -> bool {
        self.0 == 0
    }
}

/// Per-run configuration for one routine invocation.
#[derive(Debug, Clone, PartialEq)]
pub struct Arguments<T> {
    pub m: usize,
    pub n: usize,
    pub k: usize,
    pub kl: usize,
    pub ku: usize,
    pub layout: Layout,
    pub a_transpose: Transpose,
    pub b_transpose: Transpose,
    pub side: Side,
    pub triangle: Triangle,
    pub diagonal: Diagonal,
    pub x_inc: usize,
    pub y_inc: usize,
    pub x_offset: usize,
    pub y_offset: usize,
    pub a_offset: usize,
    pub b_offset: usize,
    pub c_offset: usize,
    pub ap_offset: usize,
    pub dot_offset: usize,
    pub nrm2_offset: usize,
    pub asum_offset: usize,
    pub imax_offset: usize,
    pub a_ld: usize,
    pub b_ld: usize,
    pub c_ld: usize,
    pub alpha: T,
    pub beta: T,
    sizes: [usize; BufferRole::COUNT],
    supplied: OptSet,
}

impl<T: Scalar> Default for Arguments<T> {
    fn default() -> Self {
        Self {
            m: 0,
            n: 0,
            k: 0,
            kl: 0,
            ku: 0,
            layout: Layout::default(),
            a_transpose: Transpose::default(),
            b_transpose: Transpose::default(),
            side: Side::default(),
            triangle: Triangle::default(),
            diagonal: Diagonal::default(),
            x_inc: 1,
            y_inc: 1,
            x_offset: 0,
            y_offset: 0,
            a_offset: 0,
            b_offset: 0,
            c_offset: 0,
            ap_offset: 0,
            dot_offset: 0,
            nrm2_offset: 0,
            asum_offset: 0,
            imax_offset: 0,
            a_ld: 0,
            b_ld: 0,
            c_ld: 0,
            alpha: T::one(),
            beta: T::zero(),
            sizes: [0; BufferRole::COUNT],
            supplied: OptSet::default(),
        }
    }
}

impl<T: Scalar> Arguments<T> {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    fn mark(mut self, opt: Opt) -> Self {
        self.supplied.insert(opt);
        self
    }

    pub fn with_m(mut self, m: usize) -> Self {
        self.m = m;
        self.mark(Opt::M)
    }

    pub fn with_n(mut self, n: usize) -> Self {
        self.n = n;
        self.mark(Opt::N)
    }

    pub fn with_k(mut self, k: usize) -> Self {
        self.k = k;
        self.mark(Opt::K)
    }

    pub fn with_kl(mut self, kl: usize) -> Self {
        self.kl = kl;
        self.mark(Opt::KL)
    }

    pub fn with_ku(mut self, ku: usize) -> Self {
        self.ku = ku;
        self.mark(Opt::KU)
    }

    pub fn with_layout(mut self, layout: Layout) -> Self {
        self.layout = layout;
        self.mark(Opt::Layout)
    }

    pub fn with_a_transpose(mut self, transpose: Transpose) -> Self {
        self.a_transpose = transpose;
        self.mark(Opt::ATransp)
    }

    pub fn with_b_transpose(mut self, transpose: Transpose) -> Self {
        self.b_transpose = transpose;
        self.mark(Opt::BTransp)
    }

    pub fn with_side(mut self, side: Side) -> Self {
        self.side = side;
        self.mark(Opt::Side)
    }

    pub fn with_triangle(mut self, triangle: Triangle) -> Self {
        self.triangle = triangle;
        self.mark(Opt::Triangle)
    }

    pub fn with_diagonal(mut self, diagonal: Diagonal) -> Self {
        self.diagonal = diagonal;
        self.mark(Opt::Diagonal)
    }

    pub fn with_x_inc(mut self, inc: usize) -> Self {
        self.x_inc = inc;
        self.mark(Opt::XInc)
    }

    pub fn with_y_inc(mut self, inc: usize) -> Self {
        self.y_inc = inc;
        self.mark(Opt::YInc)
    }

    pub fn with_x_offset(mut self, offset: usize) -> Self {
        self.x_offset = offset;
        self.mark(Opt::XOffset)
    }

    pub fn with_y_offset(mut self, offset: usize) -> Self {
        self.y_offset = offset;
        self.mark(Opt::YOffset)
    }

    pub fn with_a_offset(mut self, offset: usize) -> Self {
        self.a_offset = offset;
        self.mark(Opt::AOffset)
    }

    pub fn with_b_offset(mut self, offset: usize) -> Self {
        self.b_offset = offset;
        self.mark(Opt::BOffset)
    }

    pub fn with_c_offset(mut self, offset: usize) -> Self {
        self.c_offset = offset;
        self.mark(Opt::COffset)
    }

    pub fn with_ap_offset(mut self, offset: usize) -> Self {
        self.ap_offset = offset;
        self.mark(Opt::APOffset)
    }

    pub fn with_dot_offset(mut self, offset: usize) -> Self {
        self.dot_offset = offset;
        self.mark(Opt::DotOffset)
    }

    pub fn with_nrm2_offset(mut self, offset: usize) -> Self {
        self.nrm2_offset = offset;
        self.mark(Opt::Nrm2Offset)
    }

    pub fn with_asum_offset(mut self, offset: usize) -> Self {
        self.asum_offset = offset;
        self.mark(Opt::AsumOffset)
    }

    pub fn with_imax_offset(mut self, offset: usize) -> Self {
        self.imax_offset = offset;
        self.mark(Opt::ImaxOffset)
    }

    pub fn with_a_ld(mut self, ld: usize) -> Self {
        self.a_ld = ld;
        self.mark(Opt::ALeadDim)
    }

    pub fn with_b_ld(mut self, ld: usize) -> Self {
        self.b_ld = ld;
        self.mark(Opt::BLeadDim)
    }

    pub fn with_c_ld(mut self, ld: usize) -> Self {
        self.c_ld = ld;
        self.mark(Opt::CLeadDim)
    }

    pub fn with_alpha(mut self, alpha: T) -> Self {
        self.alpha = alpha;
        self.mark(Opt::Alpha)
    }

    pub fn with_beta(mut self, beta: T) -> Self {
        self.beta = beta;
        self.mark(Opt::Beta)
    }

    /// Sets every offset option to `offset`.
    pub fn with_all_offsets(self, offset: usize) -> Self {
        self.with_x_offset(offset)
            .with_y_offset(offset)
            .with_a_offset(offset)
            .with_b_offset(offset)
            .with_c_offset(offset)
            .with_ap_offset(offset)
            .with_dot_offset(offset)
            .with_nrm2_offset(offset)
            .with_asum_offset(offset)
            .with_imax_offset(offset)
    }

    pub fn supplied(&self) -> OptSet {
        self.supplied
    }

    pub fn is_supplied(&self, opt: Opt) -> bool {
        self.supplied.contains(opt)
    }

    /// Checks that every option in `required` was supplied.
    ///
    /// Leading dimensions are skipped: they have a protocol default that the
    /// routine descriptor fills in.
    pub fn validate_required(&self, required: &[Opt]) -> Result<()> {
        for &opt in required {
            let has_default = matches!(opt, Opt::ALeadDim | Opt::BLeadDim | Opt::CLeadDim);
            if !has_default && !self.supplied.contains(opt) {
                return Err(ProbeError::MissingOption(opt));
            }
        }
        Ok(())
    }

    /// Derived element count for a buffer role (0 when unused).
    #[inline]
    pub fn size(&self, role: BufferRole) -> usize {
        self.sizes[role.slot()]
    }

    #[inline]
    pub fn set_size(&mut self, role: BufferRole, size: usize) {
        self.sizes[role.slot()] = size;
    }

    /// Same arguments for another precision; scalars go through `Complex64`.
    pub fn cast<U: Scalar>(&self) -> Arguments<U> {
        Arguments {
            m: self.m,
            n: self.n,
            k: self.k,
            kl: self.kl,
            ku: self.ku,
            layout: self.layout,
            a_transpose: self.a_transpose,
            b_transpose: self.b_transpose,
            side: self.side,
            triangle: self.triangle,
            diagonal: self.diagonal,
            x_inc: self.x_inc,
            y_inc: self.y_inc,
            x_offset: self.x_offset,
            y_offset: self.y_offset,
            a_offset: self.a_offset,
            b_offset: self.b_offset,
            c_offset: self.c_offset,
            ap_offset: self.ap_offset,
            dot_offset: self.dot_offset,
            nrm2_offset: self.nrm2_offset,
            asum_offset: self.asum_offset,
            imax_offset: self.imax_offset,
            a_ld: self.a_ld,
            b_ld: self.b_ld,
            c_ld: self.c_ld,
            alpha: U::from_c64(self.alpha.to_c64()),
            beta: U::from_c64(self.beta.to_c64()),
            sizes: self.sizes,
            supplied: self.supplied,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use num_complex::Complex64;

    #[test]
    fn test_builders_mark_supplied() {
        let args = Arguments::<f32>::new().with_n(8).with_x_inc(2);
        assert!(args.is_supplied(Opt::N));
        assert!(args.is_supplied(Opt::XInc));
        assert!(!args.is_supplied(Opt::YInc));
        assert_eq!(args.n, 8);
    }

    #[test]
    fn test_validate_required_reports_first_missing() {
        let args = Arguments::<f64>::new().with_n(4);
        let err = args
            .validate_required(&[Opt::N, Opt::XInc, Opt::Alpha])
            .unwrap_err();
        assert!(matches!(err, ProbeError::MissingOption(Opt::XInc)));
    }

    #[test]
    fn test_leading_dims_have_protocol_default() {
        let args = Arguments::<f64>::new().with_n(4);
        assert!(args.validate_required(&[Opt::N, Opt::ALeadDim]).is_ok());
    }

    #[test]
    fn test_cast_keeps_shape_and_converts_scalars() {
        let args = Arguments::<Complex64>::new()
            .with_n(3)
            .with_alpha(Complex64::new(2.0, -1.0));
        let single: Arguments<f32> = args.cast();
        assert_eq!(single.n, 3);
        assert_eq!(single.alpha, 2.0);
        assert!(single.is_supplied(Opt::Alpha));
    }

    #[test]
    fn test_opt_bits_fit() {
        assert!(Opt::ALL.len() <= 32);
        let mut set = OptSet::default();
        for opt in Opt::ALL {
            set.insert(opt);
        }
        assert!(Opt::ALL.iter().all(|&o| set.contains(o)));
    }
}
