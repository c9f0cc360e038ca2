//! System CBLAS reference backend.
//!
//! Three layers sit between a routine descriptor and the C library:
//!
//! - option conversion: core enums to CBLAS enum values;
//! - marshalling: buffers become [`InterleavedView`]s checked against the
//!   addressed extent, sizes and strides become checked `c_int`s, and scalars
//!   become fresh `[re, im]` pairs;
//! - forwarding: exactly one FFI call through the per-precision traits
//!   [`CblasScalar`], [`CblasReal`] and [`CblasComplex`].
//!
//! CBLAS reports invalid arguments through `xerbla`, which may abort the
//! process, so every condition it would reject is turned into an
//! `UnsupportedConfiguration` error before the call.

pub mod ffi;

use crate::backend::marshal::{join_scalar, split_scalar, InterleavedView, InterleavedViewMut};
use blasprobe_core::{
    BufferRole, Complex32, Complex64, ComplexScalar, Diagonal, Layout, ProbeError, RealScalar,
    Result, Scalar, Side, Transpose, Triangle,
};
use std::os::raw::c_int;

// ═══════════════════════════════════════════════════════════════
// Option conversion
// ═══════════════════════════════════════════════════════════════

pub fn layout_code(layout: Layout) -> c_int {
    match layout {
        Layout::RowMajor => ffi::CBLAS_ROW_MAJOR,
        Layout::ColMajor => ffi::CBLAS_COL_MAJOR,
    }
}

pub fn transpose_code(transpose: Transpose) -> c_int {
    match transpose {
        Transpose::No => ffi::CBLAS_NO_TRANS,
        Transpose::Yes => ffi::CBLAS_TRANS,
        Transpose::Conjugate => ffi::CBLAS_CONJ_TRANS,
    }
}

pub fn triangle_code(triangle: Triangle) -> c_int {
    match triangle {
        Triangle::Upper => ffi::CBLAS_UPPER,
        Triangle::Lower => ffi::CBLAS_LOWER,
    }
}

pub fn diagonal_code(diagonal: Diagonal) -> c_int {
    match diagonal {
        Diagonal::NonUnit => ffi::CBLAS_NON_UNIT,
        Diagonal::Unit => ffi::CBLAS_UNIT,
    }
}

pub fn side_code(side: Side) -> c_int {
    match side {
        Side::Left => ffi::CBLAS_LEFT,
        Side::Right => ffi::CBLAS_RIGHT,
    }
}

// ═══════════════════════════════════════════════════════════════
// Integer marshalling
// ═══════════════════════════════════════════════════════════════

/// A size or stride as a CBLAS integer.
pub fn to_cint(value: usize) -> Result<c_int> {
    c_int::try_from(value).map_err(|_| {
        ProbeError::UnsupportedConfiguration(format!(
            "{value} does not fit in a CBLAS integer"
        ))
    })
}

fn increment(inc: usize, role: BufferRole) -> Result<c_int> {
    if inc == 0 {
        return Err(ProbeError::UnsupportedConfiguration(format!(
            "CBLAS rejects a zero increment for {role}"
        )));
    }
    to_cint(inc)
}

fn lead_dim(ld: usize, line_len: usize, role: BufferRole) -> Result<c_int> {
    if ld < line_len.max(1) {
        return Err(ProbeError::UnsupportedConfiguration(format!(
            "CBLAS rejects leading dimension {ld} for {role}; at least {} is required",
            line_len.max(1)
        )));
    }
    to_cint(ld)
}

/// Stored (rows, cols) of an operand that is `rows x cols` after `op`.
fn stored(transpose: Transpose, rows: usize, cols: usize) -> (usize, usize) {
    if transpose.is_transposed() {
        (cols, rows)
    } else {
        (rows, cols)
    }
}

fn side_order(side: Side, m: usize, n: usize) -> usize {
    match side {
        Side::Left => m,
        Side::Right => n,
    }
}

/// Read-only dense matrix view plus its checked leading dimension.
fn dense<'a, T: Scalar>(
    buf: &'a [T],
    role: BufferRole,
    layout: Layout,
    rows: usize,
    cols: usize,
    off: usize,
    ld: usize,
) -> Result<(InterleavedView<'a, T>, c_int)> {
    let line_len = layout.leading_dim(rows, cols);
    let ld_c = lead_dim(ld, line_len, role)?;
    let view = InterleavedView::matrix(buf, role, line_len, layout.lines(rows, cols), off, ld)?;
    Ok((view, ld_c))
}

fn dense_mut<'a, T: Scalar>(
    buf: &'a mut [T],
    role: BufferRole,
    layout: Layout,
    rows: usize,
    cols: usize,
    off: usize,
    ld: usize,
) -> Result<(InterleavedViewMut<'a, T>, c_int)> {
    let line_len = layout.leading_dim(rows, cols);
    let ld_c = lead_dim(ld, line_len, role)?;
    let view = InterleavedViewMut::matrix(buf, role, line_len, layout.lines(rows, cols), off, ld)?;
    Ok((view, ld_c))
}

// ═══════════════════════════════════════════════════════════════
// Per-precision forwarding traits
// ═══════════════════════════════════════════════════════════════

/// Routines every precision provides.
///
/// # Safety
///
/// Callers pass pointers whose addressed extent was validated by the views.
/// The same contract holds for every method.
#[allow(clippy::missing_safety_doc)]
pub trait CblasScalar: Scalar {
    /// How a scalar argument crosses the boundary: by value or by address.
    type Arg: Copy;

    /// Scalar argument backed by `parts`, which must outlive the call.
    fn arg(parts: &[Self::Real; 2]) -> Self::Arg;

    unsafe fn swap(n: c_int, x: *mut Self::Real, incx: c_int, y: *mut Self::Real, incy: c_int);
    unsafe fn scal(n: c_int, alpha: Self::Arg, x: *mut Self::Real, incx: c_int);
    unsafe fn copy(n: c_int, x: *const Self::Real, incx: c_int, y: *mut Self::Real, incy: c_int);
    unsafe fn axpy(
        n: c_int,
        alpha: Self::Arg,
        x: *const Self::Real,
        incx: c_int,
        y: *mut Self::Real,
        incy: c_int,
    );
    unsafe fn nrm2(n: c_int, x: *const Self::Real, incx: c_int) -> Self::Real;
    unsafe fn asum(n: c_int, x: *const Self::Real, incx: c_int) -> Self::Real;
    unsafe fn iamax(n: c_int, x: *const Self::Real, incx: c_int) -> usize;
    unsafe fn gemv(
        layout: c_int,
        trans: c_int,
        m: c_int,
        n: c_int,
        alpha: Self::Arg,
        a: *const Self::Real,
        lda: c_int,
        x: *const Self::Real,
        incx: c_int,
        beta: Self::Arg,
        y: *mut Self::Real,
        incy: c_int,
    );
    unsafe fn gbmv(
        layout: c_int,
        trans: c_int,
        m: c_int,
        n: c_int,
        kl: c_int,
        ku: c_int,
        alpha: Self::Arg,
        a: *const Self::Real,
        lda: c_int,
        x: *const Self::Real,
        incx: c_int,
        beta: Self::Arg,
        y: *mut Self::Real,
        incy: c_int,
    );
    unsafe fn trmv(
        layout: c_int,
        uplo: c_int,
        trans: c_int,
        diag: c_int,
        n: c_int,
        a: *const Self::Real,
        lda: c_int,
        x: *mut Self::Real,
        incx: c_int,
    );
    unsafe fn tpmv(
        layout: c_int,
        uplo: c_int,
        trans: c_int,
        diag: c_int,
        n: c_int,
        ap: *const Self::Real,
        x: *mut Self::Real,
        incx: c_int,
    );
    unsafe fn trsv(
        layout: c_int,
        uplo: c_int,
        trans: c_int,
        diag: c_int,
        n: c_int,
        a: *const Self::Real,
        lda: c_int,
        x: *mut Self::Real,
        incx: c_int,
    );
    unsafe fn gemm(
        layout: c_int,
        transa: c_int,
        transb: c_int,
        m: c_int,
        n: c_int,
        k: c_int,
        alpha: Self::Arg,
        a: *const Self::Real,
        lda: c_int,
        b: *const Self::Real,
        ldb: c_int,
        beta: Self::Arg,
        c: *mut Self::Real,
        ldc: c_int,
    );
    unsafe fn symm(
        layout: c_int,
        side: c_int,
        uplo: c_int,
        m: c_int,
        n: c_int,
        alpha: Self::Arg,
        a: *const Self::Real,
        lda: c_int,
        b: *const Self::Real,
        ldb: c_int,
        beta: Self::Arg,
        c: *mut Self::Real,
        ldc: c_int,
    );
    unsafe fn syrk(
        layout: c_int,
        uplo: c_int,
        trans: c_int,
        n: c_int,
        k: c_int,
        alpha: Self::Arg,
        a: *const Self::Real,
        lda: c_int,
        beta: Self::Arg,
        c: *mut Self::Real,
        ldc: c_int,
    );
    unsafe fn syr2k(
        layout: c_int,
        uplo: c_int,
        trans: c_int,
        n: c_int,
        k: c_int,
        alpha: Self::Arg,
        a: *const Self::Real,
        lda: c_int,
        b: *const Self::Real,
        ldb: c_int,
        beta: Self::Arg,
        c: *mut Self::Real,
        ldc: c_int,
    );
    unsafe fn trmm(
        layout: c_int,
        side: c_int,
        uplo: c_int,
        transa: c_int,
        diag: c_int,
        m: c_int,
        n: c_int,
        alpha: Self::Arg,
        a: *const Self::Real,
        lda: c_int,
        b: *mut Self::Real,
        ldb: c_int,
    );
    unsafe fn trsm(
        layout: c_int,
        side: c_int,
        uplo: c_int,
        transa: c_int,
        diag: c_int,
        m: c_int,
        n: c_int,
        alpha: Self::Arg,
        a: *const Self::Real,
        lda: c_int,
        b: *mut Self::Real,
        ldb: c_int,
    );
}

/// Routines only the real precisions provide; scalars travel by value.
///
/// # Safety
///
/// Callers pass pointers whose addressed extent was validated by the views.
#[allow(clippy::missing_safety_doc)]
pub trait CblasReal: CblasScalar + RealScalar {
    unsafe fn dot(n: c_int, x: *const Self, incx: c_int, y: *const Self, incy: c_int) -> Self;
    unsafe fn rot(n: c_int, x: *mut Self, incx: c_int, y: *mut Self, incy: c_int, c: Self, s: Self);
    unsafe fn symv(
        layout: c_int,
        uplo: c_int,
        n: c_int,
        alpha: Self,
        a: *const Self,
        lda: c_int,
        x: *const Self,
        incx: c_int,
        beta: Self,
        y: *mut Self,
        incy: c_int,
    );
    unsafe fn spmv(
        layout: c_int,
        uplo: c_int,
        n: c_int,
        alpha: Self,
        ap: *const Self,
        x: *const Self,
        incx: c_int,
        beta: Self,
        y: *mut Self,
        incy: c_int,
    );
    unsafe fn ger(
        layout: c_int,
        m: c_int,
        n: c_int,
        alpha: Self,
        x: *const Self,
        incx: c_int,
        y: *const Self,
        incy: c_int,
        a: *mut Self,
        lda: c_int,
    );
    unsafe fn syr(
        layout: c_int,
        uplo: c_int,
        n: c_int,
        alpha: Self,
        x: *const Self,
        incx: c_int,
        a: *mut Self,
        lda: c_int,
    );
    unsafe fn spr(
        layout: c_int,
        uplo: c_int,
        n: c_int,
        alpha: Self,
        x: *const Self,
        incx: c_int,
        ap: *mut Self,
    );
    unsafe fn syr2(
        layout: c_int,
        uplo: c_int,
        n: c_int,
        alpha: Self,
        x: *const Self,
        incx: c_int,
        y: *const Self,
        incy: c_int,
        a: *mut Self,
        lda: c_int,
    );
    unsafe fn spr2(
        layout: c_int,
        uplo: c_int,
        n: c_int,
        alpha: Self,
        x: *const Self,
        incx: c_int,
        y: *const Self,
        incy: c_int,
        ap: *mut Self,
    );
}

/// Routines only the complex precisions provide; complex scalars travel by address.
///
/// # Safety
///
/// Callers pass pointers whose addressed extent was validated by the views.
#[allow(clippy::missing_safety_doc)]
pub trait CblasComplex: CblasScalar + ComplexScalar {
    unsafe fn dotu_sub(
        n: c_int,
        x: *const Self::Real,
        incx: c_int,
        y: *const Self::Real,
        incy: c_int,
        dotu: *mut Self::Real,
    );
    unsafe fn dotc_sub(
        n: c_int,
        x: *const Self::Real,
        incx: c_int,
        y: *const Self::Real,
        incy: c_int,
        dotc: *mut Self::Real,
    );
    unsafe fn hemv(
        layout: c_int,
        uplo: c_int,
        n: c_int,
        alpha: *const Self::Real,
        a: *const Self::Real,
        lda: c_int,
        x: *const Self::Real,
        incx: c_int,
        beta: *const Self::Real,
        y: *mut Self::Real,
        incy: c_int,
    );
    unsafe fn hpmv(
        layout: c_int,
        uplo: c_int,
        n: c_int,
        alpha: *const Self::Real,
        ap: *const Self::Real,
        x: *const Self::Real,
        incx: c_int,
        beta: *const Self::Real,
        y: *mut Self::Real,
        incy: c_int,
    );
    unsafe fn geru(
        layout: c_int,
        m: c_int,
        n: c_int,
        alpha: *const Self::Real,
        x: *const Self::Real,
        incx: c_int,
        y: *const Self::Real,
        incy: c_int,
        a: *mut Self::Real,
        lda: c_int,
    );
    unsafe fn gerc(
        layout: c_int,
        m: c_int,
        n: c_int,
        alpha: *const Self::Real,
        x: *const Self::Real,
        incx: c_int,
        y: *const Self::Real,
        incy: c_int,
        a: *mut Self::Real,
        lda: c_int,
    );
    unsafe fn her(
        layout: c_int,
        uplo: c_int,
        n: c_int,
        alpha: Self::Real,
        x: *const Self::Real,
        incx: c_int,
        a: *mut Self::Real,
        lda: c_int,
    );
    unsafe fn hpr(
        layout: c_int,
        uplo: c_int,
        n: c_int,
        alpha: Self::Real,
        x: *const Self::Real,
        incx: c_int,
        ap: *mut Self::Real,
    );
    unsafe fn her2(
        layout: c_int,
        uplo: c_int,
        n: c_int,
        alpha: *const Self::Real,
        x: *const Self::Real,
        incx: c_int,
        y: *const Self::Real,
        incy: c_int,
        a: *mut Self::Real,
        lda: c_int,
    );
    unsafe fn hpr2(
        layout: c_int,
        uplo: c_int,
        n: c_int,
        alpha: *const Self::Real,
        x: *const Self::Real,
        incx: c_int,
        y: *const Self::Real,
        incy: c_int,
        ap: *mut Self::Real,
    );
    unsafe fn hemm(
        layout: c_int,
        side: c_int,
        uplo: c_int,
        m: c_int,
        n: c_int,
        alpha: *const Self::Real,
        a: *const Self::Real,
        lda: c_int,
        b: *const Self::Real,
        ldb: c_int,
        beta: *const Self::Real,
        c: *mut Self::Real,
        ldc: c_int,
    );
    unsafe fn herk(
        layout: c_int,
        uplo: c_int,
        trans: c_int,
        n: c_int,
        k: c_int,
        alpha: Self::Real,
        a: *const Self::Real,
        lda: c_int,
        beta: Self::Real,
        c: *mut Self::Real,
        ldc: c_int,
    );
    unsafe fn her2k(
        layout: c_int,
        uplo: c_int,
        trans: c_int,
        n: c_int,
        k: c_int,
        alpha: *const Self::Real,
        a: *const Self::Real,
        lda: c_int,
        b: *const Self::Real,
        ldb: c_int,
        beta: Self::Real,
        c: *mut Self::Real,
        ldc: c_int,
    );
}

macro_rules! impl_cblas_scalar {
    (
        $t:ty, $r:ty, $arg:ty, |$p:ident| $conv:expr;
        $swap:ident, $scal:ident, $copy:ident, $axpy:ident, $nrm2:ident, $asum:ident, $amax:ident,
        $gemv:ident, $gbmv:ident, $trmv:ident, $tpmv:ident, $trsv:ident,
        $gemm:ident, $symm:ident, $syrk:ident, $syr2k:ident, $trmm:ident, $trsm:ident
    ) => {
        impl CblasScalar for $t {
            type Arg = $arg;

            #[inline(always)]
            fn arg($p: &[$r; 2]) -> $arg {
                $conv
            }

            unsafe fn swap(n: c_int, x: *mut $r, incx: c_int, y: *mut $r, incy: c_int) {
                ffi::$swap(n, x, incx, y, incy)
            }
            unsafe fn scal(n: c_int, alpha: $arg, x: *mut $r, incx: c_int) {
                ffi::$scal(n, alpha, x, incx)
            }
            unsafe fn copy(n: c_int, x: *const $r, incx: c_int, y: *mut $r, incy: c_int) {
                ffi::$copy(n, x, incx, y, incy)
            }
            unsafe fn axpy(
                n: c_int,
                alpha: $arg,
                x: *const $r,
                incx: c_int,
                y: *mut $r,
                incy: c_int,
            ) {
                ffi::$axpy(n, alpha, x, incx, y, incy)
            }
            unsafe fn nrm2(n: c_int, x: *const $r, incx: c_int) -> $r {
                ffi::$nrm2(n, x, incx)
            }
            unsafe fn asum(n: c_int, x: *const $r, incx: c_int) -> $r {
                ffi::$asum(n, x, incx)
            }
            unsafe fn iamax(n: c_int, x: *const $r, incx: c_int) -> usize {
                ffi::$amax(n, x, incx)
            }
            unsafe fn gemv(
                layout: c_int,
                trans: c_int,
                m: c_int,
                n: c_int,
                alpha: $arg,
                a: *const $r,
                lda: c_int,
                x: *const $r,
                incx: c_int,
                beta: $arg,
                y: *mut $r,
                incy: c_int,
            ) {
                ffi::$gemv(layout, trans, m, n, alpha, a, lda, x, incx, beta, y, incy)
            }
            unsafe fn gbmv(
                layout: c_int,
                trans: c_int,
                m: c_int,
                n: c_int,
                kl: c_int,
                ku: c_int,
                alpha: $arg,
                a: *const $r,
                lda: c_int,
                x: *const $r,
                incx: c_int,
                beta: $arg,
                y: *mut $r,
                incy: c_int,
            ) {
                ffi::$gbmv(layout, trans, m, n, kl, ku, alpha, a, lda, x, incx, beta, y, incy)
            }
            unsafe fn trmv(
                layout: c_int,
                uplo: c_int,
                trans: c_int,
                diag: c_int,
                n: c_int,
                a: *const $r,
                lda: c_int,
                x: *mut $r,
                incx: c_int,
            ) {
                ffi::$trmv(layout, uplo, trans, diag, n, a, lda, x, incx)
            }
            unsafe fn tpmv(
                layout: c_int,
                uplo: c_int,
                trans: c_int,
                diag: c_int,
                n: c_int,
                ap: *const $r,
                x: *mut $r,
                incx: c_int,
            ) {
                ffi::$tpmv(layout, uplo, trans, diag, n, ap, x, incx)
            }
            unsafe fn trsv(
                layout: c_int,
                uplo: c_int,
                trans: c_int,
                diag: c_int,
                n: c_int,
                a: *const $r,
                lda: c_int,
                x: *mut $r,
                incx: c_int,
            ) {
                ffi::$trsv(layout, uplo, trans, diag, n, a, lda, x, incx)
            }
            unsafe fn gemm(
                layout: c_int,
                transa: c_int,
                transb: c_int,
                m: c_int,
                n: c_int,
                k: c_int,
                alpha: $arg,
                a: *const $r,
                lda: c_int,
                b: *const $r,
                ldb: c_int,
                beta: $arg,
                c: *mut $r,
                ldc: c_int,
            ) {
                ffi::$gemm(layout, transa, transb, m, n, k, alpha, a, lda, b, ldb, beta, c, ldc)
            }
            unsafe fn symm(
                layout: c_int,
                side: c_int,
                uplo: c_int,
                m: c_int,
                n: c_int,
                alpha: $arg,
                a: *const $r,
                lda: c_int,
                b: *const $r,
                ldb: c_int,
                beta: $arg,
                c: *mut $r,
                ldc: c_int,
            ) {
                ffi::$symm(layout, side, uplo, m, n, alpha, a, lda, b, ldb, beta, c, ldc)
            }
            unsafe fn syrk(
                layout: c_int,
                uplo: c_int,
                trans: c_int,
                n: c_int,
                k: c_int,
                alpha: $arg,
                a: *const $r,
                lda: c_int,
                beta: $arg,
                c: *mut $r,
                ldc: c_int,
            ) {
                ffi::$syrk(layout, uplo, trans, n, k, alpha, a, lda, beta, c, ldc)
            }
            unsafe fn syr2k(
                layout: c_int,
                uplo: c_int,
                trans: c_int,
                n: c_int,
                k: c_int,
                alpha: $arg,
                a: *const $r,
                lda: c_int,
                b: *const $r,
                ldb: c_int,
                beta: $arg,
                c: *mut $r,
                ldc: c_int,
            ) {
                ffi::$syr2k(layout, uplo, trans, n, k, alpha, a, lda, b, ldb, beta, c, ldc)
            }
            unsafe fn trmm(
                layout: c_int,
                side: c_int,
                uplo: c_int,
                transa: c_int,
                diag: c_int,
                m: c_int,
                n: c_int,
                alpha: $arg,
                a: *const $r,
                lda: c_int,
                b: *mut $r,
                ldb: c_int,
            ) {
                ffi::$trmm(layout, side, uplo, transa, diag, m, n, alpha, a, lda, b, ldb)
            }
            unsafe fn trsm(
                layout: c_int,
                side: c_int,
                uplo: c_int,
                transa: c_int,
                diag: c_int,
                m: c_int,
                n: c_int,
                alpha: $arg,
                a: *const $r,
                lda: c_int,
                b: *mut $r,
                ldb: c_int,
            ) {
                ffi::$trsm(layout, side, uplo, transa, diag, m, n, alpha, a, lda, b, ldb)
            }
        }
    };
}

impl_cblas_scalar!(
    f32, f32, f32, |p| p[0];
    cblas_sswap, cblas_sscal, cblas_scopy, cblas_saxpy, cblas_snrm2, cblas_sasum, cblas_isamax,
    cblas_sgemv, cblas_sgbmv, cblas_strmv, cblas_stpmv, cblas_strsv,
    cblas_sgemm, cblas_ssymm, cblas_ssyrk, cblas_ssyr2k, cblas_strmm, cblas_strsm
);

impl_cblas_scalar!(
    f64, f64, f64, |p| p[0];
    cblas_dswap, cblas_dscal, cblas_dcopy, cblas_daxpy, cblas_dnrm2, cblas_dasum, cblas_idamax,
    cblas_dgemv, cblas_dgbmv, cblas_dtrmv, cblas_dtpmv, cblas_dtrsv,
    cblas_dgemm, cblas_dsymm, cblas_dsyrk, cblas_dsyr2k, cblas_dtrmm, cblas_dtrsm
);

impl_cblas_scalar!(
    Complex32, f32, *const f32, |p| p.as_ptr();
    cblas_cswap, cblas_cscal, cblas_ccopy, cblas_caxpy, cblas_scnrm2, cblas_scasum, cblas_icamax,
    cblas_cgemv, cblas_cgbmv, cblas_ctrmv, cblas_ctpmv, cblas_ctrsv,
    cblas_cgemm, cblas_csymm, cblas_csyrk, cblas_csyr2k, cblas_ctrmm, cblas_ctrsm
);

impl_cblas_scalar!(
    Complex64, f64, *const f64, |p| p.as_ptr();
    cblas_zswap, cblas_zscal, cblas_zcopy, cblas_zaxpy, cblas_dznrm2, cblas_dzasum, cblas_izamax,
    cblas_zgemv, cblas_zgbmv, cblas_ztrmv, cblas_ztpmv, cblas_ztrsv,
    cblas_zgemm, cblas_zsymm, cblas_zsyrk, cblas_zsyr2k, cblas_ztrmm, cblas_ztrsm
);

macro_rules! impl_cblas_real {
    (
        $t:ty;
        $dot:ident, $rot:ident, $symv:ident, $spmv:ident, $ger:ident,
        $syr:ident, $spr:ident, $syr2:ident, $spr2:ident
    ) => {
        impl CblasReal for $t {
            unsafe fn dot(n: c_int, x: *const $t, incx: c_int, y: *const $t, incy: c_int) -> $t {
                ffi::$dot(n, x, incx, y, incy)
            }
            unsafe fn rot(n: c_int, x: *mut $t, incx: c_int, y: *mut $t, incy: c_int, c: $t, s: $t) {
                ffi::$rot(n, x, incx, y, incy, c, s)
            }
            unsafe fn symv(
                layout: c_int,
                uplo: c_int,
                n: c_int,
                alpha: $t,
                a: *const $t,
                lda: c_int,
                x: *const $t,
                incx: c_int,
                beta: $t,
                y: *mut $t,
                incy: c_int,
            ) {
                ffi::$symv(layout, uplo, n, alpha, a, lda, x, incx, beta, y, incy)
            }
            unsafe fn spmv(
                layout: c_int,
                uplo: c_int,
                n: c_int,
                alpha: $t,
                ap: *const $t,
                x: *const $t,
                incx: c_int,
                beta: $t,
                y: *mut $t,
                incy: c_int,
            ) {
                ffi::$spmv(layout, uplo, n, alpha, ap, x, incx, beta, y, incy)
            }
            unsafe fn ger(
                layout: c_int,
                m: c_int,
                n: c_int,
                alpha: $t,
                x: *const $t,
                incx: c_int,
                y: *const $t,
                incy: c_int,
                a: *mut $t,
                lda: c_int,
            ) {
                ffi::$ger(layout, m, n, alpha, x, incx, y, incy, a, lda)
            }
            unsafe fn syr(
                layout: c_int,
                uplo: c_int,
                n: c_int,
                alpha: $t,
                x: *const $t,
                incx: c_int,
                a: *mut $t,
                lda: c_int,
            ) {
                ffi::$syr(layout, uplo, n, alpha, x, incx, a, lda)
            }
            unsafe fn spr(
                layout: c_int,
                uplo: c_int,
                n: c_int,
                alpha: $t,
                x: *const $t,
                incx: c_int,
                ap: *mut $t,
            ) {
                ffi::$spr(layout, uplo, n, alpha, x, incx, ap)
            }
            unsafe fn syr2(
                layout: c_int,
                uplo: c_int,
                n: c_int,
                alpha: $t,
                x: *const $t,
                incx: c_int,
                y: *const $t,
                incy: c_int,
                a: *mut $t,
                lda: c_int,
            ) {
                ffi::$syr2(layout, uplo, n, alpha, x, incx, y, incy, a, lda)
            }
            unsafe fn spr2(
                layout: c_int,
                uplo: c_int,
                n: c_int,
                alpha: $t,
                x: *const $t,
                incx: c_int,
                y: *const $t,
                incy: c_int,
                ap: *mut $t,
            ) {
                ffi::$spr2(layout, uplo, n, alpha, x, incx, y, incy, ap)
            }
        }
    };
}

impl_cblas_real!(
    f32;
    cblas_sdot, cblas_srot, cblas_ssymv, cblas_sspmv, cblas_sger,
    cblas_ssyr, cblas_sspr, cblas_ssyr2, cblas_sspr2
);

impl_cblas_real!(
    f64;
    cblas_ddot, cblas_drot, cblas_dsymv, cblas_dspmv, cblas_dger,
    cblas_dsyr, cblas_dspr, cblas_dsyr2, cblas_dspr2
);

macro_rules! impl_cblas_complex {
    (
        $t:ty, $r:ty;
        $dotu:ident, $dotc:ident, $hemv:ident, $hpmv:ident, $geru:ident, $gerc:ident,
        $her:ident, $hpr:ident, $her2:ident, $hpr2:ident, $hemm:ident, $herk:ident, $her2k:ident
    ) => {
        impl CblasComplex for $t {
            unsafe fn dotu_sub(
                n: c_int,
                x: *const $r,
                incx: c_int,
                y: *const $r,
                incy: c_int,
                dotu: *mut $r,
            ) {
                ffi::$dotu(n, x, incx, y, incy, dotu)
            }
            unsafe fn dotc_sub(
                n: c_int,
                x: *const $r,
                incx: c_int,
                y: *const $r,
                incy: c_int,
                dotc: *mut $r,
            ) {
                ffi::$dotc(n, x, incx, y, incy, dotc)
            }
            unsafe fn hemv(
                layout: c_int,
                uplo: c_int,
                n: c_int,
                alpha: *const $r,
                a: *const $r,
                lda: c_int,
                x: *const $r,
                incx: c_int,
                beta: *const $r,
                y: *mut $r,
                incy: c_int,
            ) {
                ffi::$hemv(layout, uplo, n, alpha, a, lda, x, incx, beta, y, incy)
            }
            unsafe fn hpmv(
                layout: c_int,
                uplo: c_int,
                n: c_int,
                alpha: *const $r,
                ap: *const $r,
                x: *const $r,
                incx: c_int,
                beta: *const $r,
                y: *mut $r,
                incy: c_int,
            ) {
                ffi::$hpmv(layout, uplo, n, alpha, ap, x, incx, beta, y, incy)
            }
            unsafe fn geru(
                layout: c_int,
                m: c_int,
                n: c_int,
                alpha: *const $r,
                x: *const $r,
                incx: c_int,
                y: *const $r,
                incy: c_int,
                a: *mut $r,
                lda: c_int,
            ) {
                ffi::$geru(layout, m, n, alpha, x, incx, y, incy, a, lda)
            }
            unsafe fn gerc(
                layout: c_int,
                m: c_int,
                n: c_int,
                alpha: *const $r,
                x: *const $r,
                incx: c_int,
                y: *const $r,
                incy: c_int,
                a: *mut $r,
                lda: c_int,
            ) {
                ffi::$gerc(layout, m, n, alpha, x, incx, y, incy, a, lda)
            }
            unsafe fn her(
                layout: c_int,
                uplo: c_int,
                n: c_int,
                alpha: $r,
                x: *const $r,
                incx: c_int,
                a: *mut $r,
                lda: c_int,
            ) {
                ffi::$her(layout, uplo, n, alpha, x, incx, a, lda)
            }
            unsafe fn hpr(
                layout: c_int,
                uplo: c_int,
                n: c_int,
                alpha: $r,
                x: *const $r,
                incx: c_int,
                ap: *mut $r,
            ) {
                ffi::$hpr(layout, uplo, n, alpha, x, incx, ap)
            }
            unsafe fn her2(
                layout: c_int,
                uplo: c_int,
                n: c_int,
                alpha: *const $r,
                x: *const $r,
                incx: c_int,
                y: *const $r,
                incy: c_int,
                a: *mut $r,
                lda: c_int,
            ) {
                ffi::$her2(layout, uplo, n, alpha, x, incx, y, incy, a, lda)
            }
            unsafe fn hpr2(
                layout: c_int,
                uplo: c_int,
                n: c_int,
                alpha: *const $r,
                x: *const $r,
                incx: c_int,
                y: *const $r,
                incy: c_int,
                ap: *mut $r,
            ) {
                ffi::$hpr2(layout, uplo, n, alpha, x, incx, y, incy, ap)
            }
            unsafe fn hemm(
                layout: c_int,
                side: c_int,
                uplo: c_int,
                m: c_int,
                n: c_int,
                alpha: *const $r,
                a: *const $r,
                lda: c_int,
                b: *const $r,
                ldb: c_int,
                beta: *const $r,
                c: *mut $r,
                ldc: c_int,
            ) {
                ffi::$hemm(layout, side, uplo, m, n, alpha, a, lda, b, ldb, beta, c, ldc)
            }
            unsafe fn herk(
                layout: c_int,
                uplo: c_int,
                trans: c_int,
                n: c_int,
                k: c_int,
                alpha: $r,
                a: *const $r,
                lda: c_int,
                beta: $r,
                c: *mut $r,
                ldc: c_int,
            ) {
                ffi::$herk(layout, uplo, trans, n, k, alpha, a, lda, beta, c, ldc)
            }
            unsafe fn her2k(
                layout: c_int,
                uplo: c_int,
                trans: c_int,
                n: c_int,
                k: c_int,
                alpha: *const $r,
                a: *const $r,
                lda: c_int,
                b: *const $r,
                ldb: c_int,
                beta: $r,
                c: *mut $r,
                ldc: c_int,
            ) {
                ffi::$her2k(layout, uplo, trans, n, k, alpha, a, lda, b, ldb, beta, c, ldc)
            }
        }
    };
}

impl_cblas_complex!(
    Complex32, f32;
    cblas_cdotu_sub, cblas_cdotc_sub, cblas_chemv, cblas_chpmv, cblas_cgeru, cblas_cgerc,
    cblas_cher, cblas_chpr, cblas_cher2, cblas_chpr2, cblas_chemm, cblas_cherk, cblas_cher2k
);

impl_cblas_complex!(
    Complex64, f64;
    cblas_zdotu_sub, cblas_zdotc_sub, cblas_zhemv, cblas_zhpmv, cblas_zgeru, cblas_zgerc,
    cblas_zher, cblas_zhpr, cblas_zher2, cblas_zhpr2, cblas_zhemm, cblas_zherk, cblas_zher2k
);

// ═══════════════════════════════════════════════════════════════
// Checked forwarding: Level 1
// ═══════════════════════════════════════════════════════════════

pub fn swap<T: CblasScalar>(
    n: usize,
    x: &mut [T],
    x_off: usize,
    x_inc: usize,
    y: &mut [T],
    y_off: usize,
    y_inc: usize,
) -> Result<()> {
    let mut xv = InterleavedViewMut::vector(x, BufferRole::X, n, x_off, x_inc)?;
    let mut yv = InterleavedViewMut::vector(y, BufferRole::Y, n, y_off, y_inc)?;
    let (n, incx, incy) = (
        to_cint(n)?,
        increment(x_inc, BufferRole::X)?,
        increment(y_inc, BufferRole::Y)?,
    );
    unsafe { T::swap(n, xv.as_mut_ptr(), incx, yv.as_mut_ptr(), incy) };
    Ok(())
}

pub fn scal<T: CblasScalar>(
    n: usize,
    alpha: T,
    x: &mut [T],
    x_off: usize,
    x_inc: usize,
) -> Result<()> {
    let mut xv = InterleavedViewMut::vector(x, BufferRole::X, n, x_off, x_inc)?;
    let alpha = split_scalar(alpha);
    let (n, incx) = (to_cint(n)?, increment(x_inc, BufferRole::X)?);
    unsafe { T::scal(n, T::arg(&alpha), xv.as_mut_ptr(), incx) };
    Ok(())
}

pub fn copy<T: CblasScalar>(
    n: usize,
    x: &[T],
    x_off: usize,
    x_inc: usize,
    y: &mut [T],
    y_off: usize,
    y_inc: usize,
) -> Result<()> {
    let xv = InterleavedView::vector(x, BufferRole::X, n, x_off, x_inc)?;
    let mut yv = InterleavedViewMut::vector(y, BufferRole::Y, n, y_off, y_inc)?;
    let (n, incx, incy) = (
        to_cint(n)?,
        increment(x_inc, BufferRole::X)?,
        increment(y_inc, BufferRole::Y)?,
    );
    unsafe { T::copy(n, xv.as_ptr(), incx, yv.as_mut_ptr(), incy) };
    Ok(())
}

pub fn axpy<T: CblasScalar>(
    n: usize,
    alpha: T,
    x: &[T],
    x_off: usize,
    x_inc: usize,
    y: &mut [T],
    y_off: usize,
    y_inc: usize,
) -> Result<()> {
    let xv = InterleavedView::vector(x, BufferRole::X, n, x_off, x_inc)?;
    let mut yv = InterleavedViewMut::vector(y, BufferRole::Y, n, y_off, y_inc)?;
    let alpha = split_scalar(alpha);
    let (n, incx, incy) = (
        to_cint(n)?,
        increment(x_inc, BufferRole::X)?,
        increment(y_inc, BufferRole::Y)?,
    );
    unsafe { T::axpy(n, T::arg(&alpha), xv.as_ptr(), incx, yv.as_mut_ptr(), incy) };
    Ok(())
}

pub fn nrm2<T: CblasScalar>(n: usize, x: &[T], x_off: usize, x_inc: usize) -> Result<T::Real> {
    let xv = InterleavedView::vector(x, BufferRole::X, n, x_off, x_inc)?;
    let (n, incx) = (to_cint(n)?, increment(x_inc, BufferRole::X)?);
    Ok(unsafe { T::nrm2(n, xv.as_ptr(), incx) })
}

pub fn asum<T: CblasScalar>(n: usize, x: &[T], x_off: usize, x_inc: usize) -> Result<T::Real> {
    let xv = InterleavedView::vector(x, BufferRole::X, n, x_off, x_inc)?;
    let (n, incx) = (to_cint(n)?, increment(x_inc, BufferRole::X)?);
    Ok(unsafe { T::asum(n, xv.as_ptr(), incx) })
}

/// Zero-based index of the first element with the largest `|re| + |im|`.
pub fn iamax<T: CblasScalar>(n: usize, x: &[T], x_off: usize, x_inc: usize) -> Result<usize> {
    let xv = InterleavedView::vector(x, BufferRole::X, n, x_off, x_inc)?;
    let (n, incx) = (to_cint(n)?, increment(x_inc, BufferRole::X)?);
    Ok(unsafe { T::iamax(n, xv.as_ptr(), incx) })
}

pub fn dot<T: CblasReal>(
    n: usize,
    x: &[T],
    x_off: usize,
    x_inc: usize,
    y: &[T],
    y_off: usize,
    y_inc: usize,
) -> Result<T> {
    let xv = InterleavedView::vector(x, BufferRole::X, n, x_off, x_inc)?;
    let yv = InterleavedView::vector(y, BufferRole::Y, n, y_off, y_inc)?;
    let (n, incx, incy) = (
        to_cint(n)?,
        increment(x_inc, BufferRole::X)?,
        increment(y_inc, BufferRole::Y)?,
    );
    Ok(unsafe { T::dot(n, xv.as_ptr(), incx, yv.as_ptr(), incy) })
}

/// Complex dot product returned through an output pair, unconjugated or with `x` conjugated.
fn complex_dot<T: CblasComplex>(
    conjugate: bool,
    n: usize,
    x: &[T],
    x_off: usize,
    x_inc: usize,
    y: &[T],
    y_off: usize,
    y_inc: usize,
) -> Result<T> {
    let xv = InterleavedView::vector(x, BufferRole::X, n, x_off, x_inc)?;
    let yv = InterleavedView::vector(y, BufferRole::Y, n, y_off, y_inc)?;
    let (n, incx, incy) = (
        to_cint(n)?,
        increment(x_inc, BufferRole::X)?,
        increment(y_inc, BufferRole::Y)?,
    );
    let mut out = split_scalar(T::zero());
    unsafe {
        if conjugate {
            T::dotc_sub(n, xv.as_ptr(), incx, yv.as_ptr(), incy, out.as_mut_ptr());
        } else {
            T::dotu_sub(n, xv.as_ptr(), incx, yv.as_ptr(), incy, out.as_mut_ptr());
        }
    }
    Ok(join_scalar(out))
}

pub fn dotu<T: CblasComplex>(
    n: usize,
    x: &[T],
    x_off: usize,
    x_inc: usize,
    y: &[T],
    y_off: usize,
    y_inc: usize,
) -> Result<T> {
    complex_dot(false, n, x, x_off, x_inc, y, y_off, y_inc)
}

pub fn dotc<T: CblasComplex>(
    n: usize,
    x: &[T],
    x_off: usize,
    x_inc: usize,
    y: &[T],
    y_off: usize,
    y_inc: usize,
) -> Result<T> {
    complex_dot(true, n, x, x_off, x_inc, y, y_off, y_inc)
}

pub fn rot<T: CblasReal>(
    n: usize,
    x: &mut [T],
    x_off: usize,
    x_inc: usize,
    y: &mut [T],
    y_off: usize,
    y_inc: usize,
    c: T,
    s: T,
) -> Result<()> {
    let mut xv = InterleavedViewMut::vector(x, BufferRole::X, n, x_off, x_inc)?;
    let mut yv = InterleavedViewMut::vector(y, BufferRole::Y, n, y_off, y_inc)?;
    let (n, incx, incy) = (
        to_cint(n)?,
        increment(x_inc, BufferRole::X)?,
        increment(y_inc, BufferRole::Y)?,
    );
    unsafe { T::rot(n, xv.as_mut_ptr(), incx, yv.as_mut_ptr(), incy, c, s) };
    Ok(())
}

// ═══════════════════════════════════════════════════════════════
// Checked forwarding: Level 2
// ═══════════════════════════════════════════════════════════════

pub fn gemv<T: CblasScalar>(
    layout: Layout,
    a_transpose: Transpose,
    m: usize,
    n: usize,
    alpha: T,
    a: &[T],
    a_off: usize,
    a_ld: usize,
    x: &[T],
    x_off: usize,
    x_inc: usize,
    beta: T,
    y: &mut [T],
    y_off: usize,
    y_inc: usize,
) -> Result<()> {
    let (x_len, y_len) = if a_transpose.is_transposed() { (m, n) } else { (n, m) };
    let (av, lda) = dense(a, BufferRole::A, layout, m, n, a_off, a_ld)?;
    let xv = InterleavedView::vector(x, BufferRole::X, x_len, x_off, x_inc)?;
    let mut yv = InterleavedViewMut::vector(y, BufferRole::Y, y_len, y_off, y_inc)?;
    let (alpha, beta) = (split_scalar(alpha), split_scalar(beta));
    let (mc, nc) = (to_cint(m)?, to_cint(n)?);
    let (incx, incy) = (increment(x_inc, BufferRole::X)?, increment(y_inc, BufferRole::Y)?);
    unsafe {
        T::gemv(
            layout_code(layout),
            transpose_code(a_transpose),
            mc,
            nc,
            T::arg(&alpha),
            av.as_ptr(),
            lda,
            xv.as_ptr(),
            incx,
            T::arg(&beta),
            yv.as_mut_ptr(),
            incy,
        )
    };
    Ok(())
}

pub fn gbmv<T: CblasScalar>(
    layout: Layout,
    a_transpose: Transpose,
    m: usize,
    n: usize,
    kl: usize,
    ku: usize,
    alpha: T,
    a: &[T],
    a_off: usize,
    a_ld: usize,
    x: &[T],
    x_off: usize,
    x_inc: usize,
    beta: T,
    y: &mut [T],
    y_off: usize,
    y_inc: usize,
) -> Result<()> {
    let (x_len, y_len) = if a_transpose.is_transposed() { (m, n) } else { (n, m) };
    let band = kl + ku + 1;
    let lda = lead_dim(a_ld, band, BufferRole::A)?;
    let av = InterleavedView::matrix(a, BufferRole::A, band, layout.lines(m, n), a_off, a_ld)?;
    let xv = InterleavedView::vector(x, BufferRole::X, x_len, x_off, x_inc)?;
    let mut yv = InterleavedViewMut::vector(y, BufferRole::Y, y_len, y_off, y_inc)?;
    let (alpha, beta) = (split_scalar(alpha), split_scalar(beta));
    let (incx, incy) = (increment(x_inc, BufferRole::X)?, increment(y_inc, BufferRole::Y)?);
    unsafe {
        T::gbmv(
            layout_code(layout),
            transpose_code(a_transpose),
            to_cint(m)?,
            to_cint(n)?,
            to_cint(kl)?,
            to_cint(ku)?,
            T::arg(&alpha),
            av.as_ptr(),
            lda,
            xv.as_ptr(),
            incx,
            T::arg(&beta),
            yv.as_mut_ptr(),
            incy,
        )
    };
    Ok(())
}

pub fn symv<T: CblasReal>(
    layout: Layout,
    triangle: Triangle,
    n: usize,
    alpha: T,
    a: &[T],
    a_off: usize,
    a_ld: usize,
    x: &[T],
    x_off: usize,
    x_inc: usize,
    beta: T,
    y: &mut [T],
    y_off: usize,
    y_inc: usize,
) -> Result<()> {
    let (av, lda) = dense(a, BufferRole::A, layout, n, n, a_off, a_ld)?;
    let xv = InterleavedView::vector(x, BufferRole::X, n, x_off, x_inc)?;
    let mut yv = InterleavedViewMut::vector(y, BufferRole::Y, n, y_off, y_inc)?;
    let (incx, incy) = (increment(x_inc, BufferRole::X)?, increment(y_inc, BufferRole::Y)?);
    unsafe {
        T::symv(
            layout_code(layout),
            triangle_code(triangle),
            to_cint(n)?,
            alpha,
            av.as_ptr(),
            lda,
            xv.as_ptr(),
            incx,
            beta,
            yv.as_mut_ptr(),
            incy,
        )
    };
    Ok(())
}

pub fn hemv<T: CblasComplex>(
    layout: Layout,
    triangle: Triangle,
    n: usize,
    alpha: T,
    a: &[T],
    a_off: usize,
    a_ld: usize,
    x: &[T],
    x_off: usize,
    x_inc: usize,
    beta: T,
    y: &mut [T],
    y_off: usize,
    y_inc: usize,
) -> Result<()> {
    let (av, lda) = dense(a, BufferRole::A, layout, n, n, a_off, a_ld)?;
    let xv = InterleavedView::vector(x, BufferRole::X, n, x_off, x_inc)?;
    let mut yv = InterleavedViewMut::vector(y, BufferRole::Y, n, y_off, y_inc)?;
    let (alpha, beta) = (split_scalar(alpha), split_scalar(beta));
    let (incx, incy) = (increment(x_inc, BufferRole::X)?, increment(y_inc, BufferRole::Y)?);
    unsafe {
        T::hemv(
            layout_code(layout),
            triangle_code(triangle),
            to_cint(n)?,
            alpha.as_ptr(),
            av.as_ptr(),
            lda,
            xv.as_ptr(),
            incx,
            beta.as_ptr(),
            yv.as_mut_ptr(),
            incy,
        )
    };
    Ok(())
}

pub fn spmv<T: CblasReal>(
    layout: Layout,
    triangle: Triangle,
    n: usize,
    alpha: T,
    ap: &[T],
    ap_off: usize,
    x: &[T],
    x_off: usize,
    x_inc: usize,
    beta: T,
    y: &mut [T],
    y_off: usize,
    y_inc: usize,
) -> Result<()> {
    let apv = InterleavedView::span(ap, BufferRole::AP, n * (n + 1) / 2, ap_off)?;
    let xv = InterleavedView::vector(x, BufferRole::X, n, x_off, x_inc)?;
    let mut yv = InterleavedViewMut::vector(y, BufferRole::Y, n, y_off, y_inc)?;
    let (incx, incy) = (increment(x_inc, BufferRole::X)?, increment(y_inc, BufferRole::Y)?);
    unsafe {
        T::spmv(
            layout_code(layout),
            triangle_code(triangle),
            to_cint(n)?,
            alpha,
            apv.as_ptr(),
            xv.as_ptr(),
            incx,
            beta,
            yv.as_mut_ptr(),
            incy,
        )
    };
    Ok(())
}

pub fn hpmv<T: CblasComplex>(
    layout: Layout,
    triangle: Triangle,
    n: usize,
    alpha: T,
    ap: &[T],
    ap_off: usize,
    x: &[T],
    x_off: usize,
    x_inc: usize,
    beta: T,
    y: &mut [T],
    y_off: usize,
    y_inc: usize,
) -> Result<()> {
    let apv = InterleavedView::span(ap, BufferRole::AP, n * (n + 1) / 2, ap_off)?;
    let xv = InterleavedView::vector(x, BufferRole::X, n, x_off, x_inc)?;
    let mut yv = InterleavedViewMut::vector(y, BufferRole::Y, n, y_off, y_inc)?;
    let (alpha, beta) = (split_scalar(alpha), split_scalar(beta));
    let (incx, incy) = (increment(x_inc, BufferRole::X)?, increment(y_inc, BufferRole::Y)?);
    unsafe {
        T::hpmv(
            layout_code(layout),
            triangle_code(triangle),
            to_cint(n)?,
            alpha.as_ptr(),
            apv.as_ptr(),
            xv.as_ptr(),
            incx,
            beta.as_ptr(),
            yv.as_mut_ptr(),
            incy,
        )
    };
    Ok(())
}

pub fn trmv<T: CblasScalar>(
    layout: Layout,
    triangle: Triangle,
    a_transpose: Transpose,
    diagonal: Diagonal,
    n: usize,
    a: &[T],
    a_off: usize,
    a_ld: usize,
    x: &mut [T],
    x_off: usize,
    x_inc: usize,
) -> Result<()> {
    let (av, lda) = dense(a, BufferRole::A, layout, n, n, a_off, a_ld)?;
    let mut xv = InterleavedViewMut::vector(x, BufferRole::X, n, x_off, x_inc)?;
    let incx = increment(x_inc, BufferRole::X)?;
    unsafe {
        T::trmv(
            layout_code(layout),
            triangle_code(triangle),
            transpose_code(a_transpose),
            diagonal_code(diagonal),
            to_cint(n)?,
            av.as_ptr(),
            lda,
            xv.as_mut_ptr(),
            incx,
        )
    };
    Ok(())
}

pub fn tpmv<T: CblasScalar>(
    layout: Layout,
    triangle: Triangle,
    a_transpose: Transpose,
    diagonal: Diagonal,
    n: usize,
    ap: &[T],
    ap_off: usize,
    x: &mut [T],
    x_off: usize,
    x_inc: usize,
) -> Result<()> {
    let apv = InterleavedView::span(ap, BufferRole::AP, n * (n + 1) / 2, ap_off)?;
    let mut xv = InterleavedViewMut::vector(x, BufferRole::X, n, x_off, x_inc)?;
    let incx = increment(x_inc, BufferRole::X)?;
    unsafe {
        T::tpmv(
            layout_code(layout),
            triangle_code(triangle),
            transpose_code(a_transpose),
            diagonal_code(diagonal),
            to_cint(n)?,
            apv.as_ptr(),
            xv.as_mut_ptr(),
            incx,
        )
    };
    Ok(())
}

pub fn trsv<T: CblasScalar>(
    layout: Layout,
    triangle: Triangle,
    a_transpose: Transpose,
    diagonal: Diagonal,
    n: usize,
    a: &[T],
    a_off: usize,
    a_ld: usize,
    x: &mut [T],
    x_off: usize,
    x_inc: usize,
) -> Result<()> {
    let (av, lda) = dense(a, BufferRole::A, layout, n, n, a_off, a_ld)?;
    let mut xv = InterleavedViewMut::vector(x, BufferRole::X, n, x_off, x_inc)?;
    let incx = increment(x_inc, BufferRole::X)?;
    unsafe {
        T::trsv(
            layout_code(layout),
            triangle_code(triangle),
            transpose_code(a_transpose),
            diagonal_code(diagonal),
            to_cint(n)?,
            av.as_ptr(),
            lda,
            xv.as_mut_ptr(),
            incx,
        )
    };
    Ok(())
}

pub fn ger<T: CblasReal>(
    layout: Layout,
    m: usize,
    n: usize,
    alpha: T,
    x: &[T],
    x_off: usize,
    x_inc: usize,
    y: &[T],
    y_off: usize,
    y_inc: usize,
    a: &mut [T],
    a_off: usize,
    a_ld: usize,
) -> Result<()> {
    let xv = InterleavedView::vector(x, BufferRole::X, m, x_off, x_inc)?;
    let yv = InterleavedView::vector(y, BufferRole::Y, n, y_off, y_inc)?;
    let (mut av, lda) = dense_mut(a, BufferRole::A, layout, m, n, a_off, a_ld)?;
    let (incx, incy) = (increment(x_inc, BufferRole::X)?, increment(y_inc, BufferRole::Y)?);
    unsafe {
        T::ger(
            layout_code(layout),
            to_cint(m)?,
            to_cint(n)?,
            alpha,
            xv.as_ptr(),
            incx,
            yv.as_ptr(),
            incy,
            av.as_mut_ptr(),
            lda,
        )
    };
    Ok(())
}

/// Complex rank-1 update, unconjugated (`geru`) or with `y` conjugated (`gerc`).
fn complex_ger<T: CblasComplex>(
    conjugate: bool,
    layout: Layout,
    m: usize,
    n: usize,
    alpha: T,
    x: &[T],
    x_off: usize,
    x_inc: usize,
    y: &[T],
    y_off: usize,
    y_inc: usize,
    a: &mut [T],
    a_off: usize,
    a_ld: usize,
) -> Result<()> {
    let xv = InterleavedView::vector(x, BufferRole::X, m, x_off, x_inc)?;
    let yv = InterleavedView::vector(y, BufferRole::Y, n, y_off, y_inc)?;
    let (mut av, lda) = dense_mut(a, BufferRole::A, layout, m, n, a_off, a_ld)?;
    let alpha = split_scalar(alpha);
    let (incx, incy) = (increment(x_inc, BufferRole::X)?, increment(y_inc, BufferRole::Y)?);
    let (layout, mc, nc) = (layout_code(layout), to_cint(m)?, to_cint(n)?);
    unsafe {
        if conjugate {
            T::gerc(
                layout,
                mc,
                nc,
                alpha.as_ptr(),
                xv.as_ptr(),
                incx,
                yv.as_ptr(),
                incy,
                av.as_mut_ptr(),
                lda,
            )
        } else {
            T::geru(
                layout,
                mc,
                nc,
                alpha.as_ptr(),
                xv.as_ptr(),
                incx,
                yv.as_ptr(),
                incy,
                av.as_mut_ptr(),
                lda,
            )
        }
    };
    Ok(())
}

pub fn geru<T: CblasComplex>(
    layout: Layout,
    m: usize,
    n: usize,
    alpha: T,
    x: &[T],
    x_off: usize,
    x_inc: usize,
    y: &[T],
    y_off: usize,
    y_inc: usize,
    a: &mut [T],
    a_off: usize,
    a_ld: usize,
) -> Result<()> {
    complex_ger(false, layout, m, n, alpha, x, x_off, x_inc, y, y_off, y_inc, a, a_off, a_ld)
}

pub fn gerc<T: CblasComplex>(
    layout: Layout,
    m: usize,
    n: usize,
    alpha: T,
    x: &[T],
    x_off: usize,
    x_inc: usize,
    y: &[T],
    y_off: usize,
    y_inc: usize,
    a: &mut [T],
    a_off: usize,
    a_ld: usize,
) -> Result<()> {
    complex_ger(true, layout, m, n, alpha, x, x_off, x_inc, y, y_off, y_inc, a, a_off, a_ld)
}

pub fn syr<T: CblasReal>(
    layout: Layout,
    triangle: Triangle,
    n: usize,
    alpha: T,
    x: &[T],
    x_off: usize,
    x_inc: usize,
    a: &mut [T],
    a_off: usize,
    a_ld: usize,
) -> Result<()> {
    let xv = InterleavedView::vector(x, BufferRole::X, n, x_off, x_inc)?;
    let (mut av, lda) = dense_mut(a, BufferRole::A, layout, n, n, a_off, a_ld)?;
    let incx = increment(x_inc, BufferRole::X)?;
    unsafe {
        T::syr(
            layout_code(layout),
            triangle_code(triangle),
            to_cint(n)?,
            alpha,
            xv.as_ptr(),
            incx,
            av.as_mut_ptr(),
            lda,
        )
    };
    Ok(())
}

pub fn her<T: CblasComplex>(
    layout: Layout,
    triangle: Triangle,
    n: usize,
    alpha: T::Real,
    x: &[T],
    x_off: usize,
    x_inc: usize,
    a: &mut [T],
    a_off: usize,
    a_ld: usize,
) -> Result<()> {
    let xv = InterleavedView::vector(x, BufferRole::X, n, x_off, x_inc)?;
    let (mut av, lda) = dense_mut(a, BufferRole::A, layout, n, n, a_off, a_ld)?;
    let incx = increment(x_inc, BufferRole::X)?;
    unsafe {
        T::her(
            layout_code(layout),
            triangle_code(triangle),
            to_cint(n)?,
            alpha,
            xv.as_ptr(),
            incx,
            av.as_mut_ptr(),
            lda,
        )
    };
    Ok(())
}

pub fn spr<T: CblasReal>(
    layout: Layout,
    triangle: Triangle,
    n: usize,
    alpha: T,
    x: &[T],
    x_off: usize,
    x_inc: usize,
    ap: &mut [T],
    ap_off: usize,
) -> Result<()> {
    let xv = InterleavedView::vector(x, BufferRole::X, n, x_off, x_inc)?;
    let mut apv = InterleavedViewMut::span(ap, BufferRole::AP, n * (n + 1) / 2, ap_off)?;
    let incx = increment(x_inc, BufferRole::X)?;
    unsafe {
        T::spr(
            layout_code(layout),
            triangle_code(triangle),
            to_cint(n)?,
            alpha,
            xv.as_ptr(),
            incx,
            apv.as_mut_ptr(),
        )
    };
    Ok(())
}

pub fn hpr<T: CblasComplex>(
    layout: Layout,
    triangle: Triangle,
    n: usize,
    alpha: T::Real,
    x: &[T],
    x_off: usize,
    x_inc: usize,
    ap: &mut [T],
    ap_off: usize,
) -> Result<()> {
    let xv = InterleavedView::vector(x, BufferRole::X, n, x_off, x_inc)?;
    let mut apv = InterleavedViewMut::span(ap, BufferRole::AP, n * (n + 1) / 2, ap_off)?;
    let incx = increment(x_inc, BufferRole::X)?;
    unsafe {
        T::hpr(
            layout_code(layout),
            triangle_code(triangle),
            to_cint(n)?,
            alpha,
            xv.as_ptr(),
            incx,
            apv.as_mut_ptr(),
        )
    };
    Ok(())
}

pub fn syr2<T: CblasReal>(
    layout: Layout,
    triangle: Triangle,
    n: usize,
    alpha: T,
    x: &[T],
    x_off: usize,
    x_inc: usize,
    y: &[T],
    y_off: usize,
    y_inc: usize,
    a: &mut [T],
    a_off: usize,
    a_ld: usize,
) -> Result<()> {
    let xv = InterleavedView::vector(x, BufferRole::X, n, x_off, x_inc)?;
    let yv = InterleavedView::vector(y, BufferRole::Y, n, y_off, y_inc)?;
    let (mut av, lda) = dense_mut(a, BufferRole::A, layout, n, n, a_off, a_ld)?;
    let (incx, incy) = (increment(x_inc, BufferRole::X)?, increment(y_inc, BufferRole::Y)?);
    unsafe {
        T::syr2(
            layout_code(layout),
            triangle_code(triangle),
            to_cint(n)?,
            alpha,
            xv.as_ptr(),
            incx,
            yv.as_ptr(),
            incy,
            av.as_mut_ptr(),
            lda,
        )
    };
    Ok(())
}

pub fn her2<T: CblasComplex>(
    layout: Layout,
    triangle: Triangle,
    n: usize,
    alpha: T,
    x: &[T],
    x_off: usize,
    x_inc: usize,
    y: &[T],
    y_off: usize,
    y_inc: usize,
    a: &mut [T],
    a_off: usize,
    a_ld: usize,
) -> Result<()> {
    let xv = InterleavedView::vector(x, BufferRole::X, n, x_off, x_inc)?;
    let yv = InterleavedView::vector(y, BufferRole::Y, n, y_off, y_inc)?;
    let (mut av, lda) = dense_mut(a, BufferRole::A, layout, n, n, a_off, a_ld)?;
    let alpha = split_scalar(alpha);
    let (incx, incy) = (increment(x_inc, BufferRole::X)?, increment(y_inc, BufferRole::Y)?);
    unsafe {
        T::her2(
            layout_code(layout),
            triangle_code(triangle),
            to_cint(n)?,
            alpha.as_ptr(),
            xv.as_ptr(),
            incx,
            yv.as_ptr(),
            incy,
            av.as_mut_ptr(),
            lda,
        )
    };
    Ok(())
}

pub fn spr2<T: CblasReal>(
    layout: Layout,
    triangle: Triangle,
    n: usize,
    alpha: T,
    x: &[T],
    x_off: usize,
    x_inc: usize,
    y: &[T],
    y_off: usize,
    y_inc: usize,
    ap: &mut [T],
    ap_off: usize,
) -> Result<()> {
    let xv = InterleavedView::vector(x, BufferRole::X, n, x_off, x_inc)?;
    let yv = InterleavedView::vector(y, BufferRole::Y, n, y_off, y_inc)?;
    let mut apv = InterleavedViewMut::span(ap, BufferRole::AP, n * (n + 1) / 2, ap_off)?;
    let (incx, incy) = (increment(x_inc, BufferRole::X)?, increment(y_inc, BufferRole::Y)?);
    unsafe {
        T::spr2(
            layout_code(layout),
            triangle_code(triangle),
            to_cint(n)?,
            alpha,
            xv.as_ptr(),
            incx,
            yv.as_ptr(),
            incy,
            apv.as_mut_ptr(),
        )
    };
    Ok(())
}

pub fn hpr2<T: CblasComplex>(
    layout: Layout,
    triangle: Triangle,
    n: usize,
    alpha: T,
    x: &[T],
    x_off: usize,
    x_inc: usize,
    y: &[T],
    y_off: usize,
    y_inc: usize,
    ap: &mut [T],
    ap_off: usize,
) -> Result<()> {
    let xv = InterleavedView::vector(x, BufferRole::X, n, x_off, x_inc)?;
    let yv = InterleavedView::vector(y, BufferRole::Y, n, y_off, y_inc)?;
    let mut apv = InterleavedViewMut::span(ap, BufferRole::AP, n * (n + 1) / 2, ap_off)?;
    let alpha = split_scalar(alpha);
    let (incx, incy) = (increment(x_inc, BufferRole::X)?, increment(y_inc, BufferRole::Y)?);
    unsafe {
        T::hpr2(
            layout_code(layout),
            triangle_code(triangle),
            to_cint(n)?,
            alpha.as_ptr(),
            xv.as_ptr(),
            incx,
            yv.as_ptr(),
            incy,
            apv.as_mut_ptr(),
        )
    };
    Ok(())
}

// ═══════════════════════════════════════════════════════════════
// Checked forwarding: Level 3
// ═══════════════════════════════════════════════════════════════

pub fn gemm<T: CblasScalar>(
    layout: Layout,
    a_transpose: Transpose,
    b_transpose: Transpose,
    m: usize,
    n: usize,
    k: usize,
    alpha: T,
    a: &[T],
    a_off: usize,
    a_ld: usize,
    b: &[T],
    b_off: usize,
    b_ld: usize,
    beta: T,
    c: &mut [T],
    c_off: usize,
    c_ld: usize,
) -> Result<()> {
    let (ar, ac) = stored(a_transpose, m, k);
    let (br, bc) = stored(b_transpose, k, n);
    let (av, lda) = dense(a, BufferRole::A, layout, ar, ac, a_off, a_ld)?;
    let (bv, ldb) = dense(b, BufferRole::B, layout, br, bc, b_off, b_ld)?;
    let (mut cv, ldc) = dense_mut(c, BufferRole::C, layout, m, n, c_off, c_ld)?;
    let (alpha, beta) = (split_scalar(alpha), split_scalar(beta));
    unsafe {
        T::gemm(
            layout_code(layout),
            transpose_code(a_transpose),
            transpose_code(b_transpose),
            to_cint(m)?,
            to_cint(n)?,
            to_cint(k)?,
            T::arg(&alpha),
            av.as_ptr(),
            lda,
            bv.as_ptr(),
            ldb,
            T::arg(&beta),
            cv.as_mut_ptr(),
            ldc,
        )
    };
    Ok(())
}

pub fn symm<T: CblasScalar>(
    layout: Layout,
    side: Side,
    triangle: Triangle,
    m: usize,
    n: usize,
    alpha: T,
    a: &[T],
    a_off: usize,
    a_ld: usize,
    b: &[T],
    b_off: usize,
    b_ld: usize,
    beta: T,
    c: &mut [T],
    c_off: usize,
    c_ld: usize,
) -> Result<()> {
    let ka = side_order(side, m, n);
    let (av, lda) = dense(a, BufferRole::A, layout, ka, ka, a_off, a_ld)?;
    let (bv, ldb) = dense(b, BufferRole::B, layout, m, n, b_off, b_ld)?;
    let (mut cv, ldc) = dense_mut(c, BufferRole::C, layout, m, n, c_off, c_ld)?;
    let (alpha, beta) = (split_scalar(alpha), split_scalar(beta));
    unsafe {
        T::symm(
            layout_code(layout),
            side_code(side),
            triangle_code(triangle),
            to_cint(m)?,
            to_cint(n)?,
            T::arg(&alpha),
            av.as_ptr(),
            lda,
            bv.as_ptr(),
            ldb,
            T::arg(&beta),
            cv.as_mut_ptr(),
            ldc,
        )
    };
    Ok(())
}

pub fn hemm<T: CblasComplex>(
    layout: Layout,
    side: Side,
    triangle: Triangle,
    m: usize,
    n: usize,
    alpha: T,
    a: &[T],
    a_off: usize,
    a_ld: usize,
    b: &[T],
    b_off: usize,
    b_ld: usize,
    beta: T,
    c: &mut [T],
    c_off: usize,
    c_ld: usize,
) -> Result<()> {
    let ka = side_order(side, m, n);
    let (av, lda) = dense(a, BufferRole::A, layout, ka, ka, a_off, a_ld)?;
    let (bv, ldb) = dense(b, BufferRole::B, layout, m, n, b_off, b_ld)?;
    let (mut cv, ldc) = dense_mut(c, BufferRole::C, layout, m, n, c_off, c_ld)?;
    let (alpha, beta) = (split_scalar(alpha), split_scalar(beta));
    unsafe {
        T::hemm(
            layout_code(layout),
            side_code(side),
            triangle_code(triangle),
            to_cint(m)?,
            to_cint(n)?,
            alpha.as_ptr(),
            av.as_ptr(),
            lda,
            bv.as_ptr(),
            ldb,
            beta.as_ptr(),
            cv.as_mut_ptr(),
            ldc,
        )
    };
    Ok(())
}

pub fn syrk<T: CblasScalar>(
    layout: Layout,
    triangle: Triangle,
    a_transpose: Transpose,
    n: usize,
    k: usize,
    alpha: T,
    a: &[T],
    a_off: usize,
    a_ld: usize,
    beta: T,
    c: &mut [T],
    c_off: usize,
    c_ld: usize,
) -> Result<()> {
    let (ar, ac) = stored(a_transpose, n, k);
    let (av, lda) = dense(a, BufferRole::A, layout, ar, ac, a_off, a_ld)?;
    let (mut cv, ldc) = dense_mut(c, BufferRole::C, layout, n, n, c_off, c_ld)?;
    let (alpha, beta) = (split_scalar(alpha), split_scalar(beta));
    unsafe {
        T::syrk(
            layout_code(layout),
            triangle_code(triangle),
            transpose_code(a_transpose),
            to_cint(n)?,
            to_cint(k)?,
            T::arg(&alpha),
            av.as_ptr(),
            lda,
            T::arg(&beta),
            cv.as_mut_ptr(),
            ldc,
        )
    };
    Ok(())
}

pub fn herk<T: CblasComplex>(
    layout: Layout,
    triangle: Triangle,
    a_transpose: Transpose,
    n: usize,
    k: usize,
    alpha: T::Real,
    a: &[T],
    a_off: usize,
    a_ld: usize,
    beta: T::Real,
    c: &mut [T],
    c_off: usize,
    c_ld: usize,
) -> Result<()> {
    let (ar, ac) = stored(a_transpose, n, k);
    let (av, lda) = dense(a, BufferRole::A, layout, ar, ac, a_off, a_ld)?;
    let (mut cv, ldc) = dense_mut(c, BufferRole::C, layout, n, n, c_off, c_ld)?;
    unsafe {
        T::herk(
            layout_code(layout),
            triangle_code(triangle),
            transpose_code(a_transpose),
            to_cint(n)?,
            to_cint(k)?,
            alpha,
            av.as_ptr(),
            lda,
            beta,
            cv.as_mut_ptr(),
            ldc,
        )
    };
    Ok(())
}

pub fn syr2k<T: CblasScalar>(
    layout: Layout,
    triangle: Triangle,
    ab_transpose: Transpose,
    n: usize,
    k: usize,
    alpha: T,
    a: &[T],
    a_off: usize,
    a_ld: usize,
    b: &[T],
    b_off: usize,
    b_ld: usize,
    beta: T,
    c: &mut [T],
    c_off: usize,
    c_ld: usize,
) -> Result<()> {
    let (r, cc) = stored(ab_transpose, n, k);
    let (av, lda) = dense(a, BufferRole::A, layout, r, cc, a_off, a_ld)?;
    let (bv, ldb) = dense(b, BufferRole::B, layout, r, cc, b_off, b_ld)?;
    let (mut cv, ldc) = dense_mut(c, BufferRole::C, layout, n, n, c_off, c_ld)?;
    let (alpha, beta) = (split_scalar(alpha), split_scalar(beta));
    unsafe {
        T::syr2k(
            layout_code(layout),
            triangle_code(triangle),
            transpose_code(ab_transpose),
            to_cint(n)?,
            to_cint(k)?,
            T::arg(&alpha),
            av.as_ptr(),
            lda,
            bv.as_ptr(),
            ldb,
            T::arg(&beta),
            cv.as_mut_ptr(),
            ldc,
        )
    };
    Ok(())
}

pub fn her2k<T: CblasComplex>(
    layout: Layout,
    triangle: Triangle,
    ab_transpose: Transpose,
    n: usize,
    k: usize,
    alpha: T,
    a: &[T],
    a_off: usize,
    a_ld: usize,
    b: &[T],
    b_off: usize,
    b_ld: usize,
    beta: T::Real,
    c: &mut [T],
    c_off: usize,
    c_ld: usize,
) -> Result<()> {
    let (r, cc) = stored(ab_transpose, n, k);
    let (av, lda) = dense(a, BufferRole::A, layout, r, cc, a_off, a_ld)?;
    let (bv, ldb) = dense(b, BufferRole::B, layout, r, cc, b_off, b_ld)?;
    let (mut cv, ldc) = dense_mut(c, BufferRole::C, layout, n, n, c_off, c_ld)?;
    let alpha = split_scalar(alpha);
    unsafe {
        T::her2k(
            layout_code(layout),
            triangle_code(triangle),
            transpose_code(ab_transpose),
            to_cint(n)?,
            to_cint(k)?,
            alpha.as_ptr(),
            av.as_ptr(),
            lda,
            bv.as_ptr(),
            ldb,
            beta,
            cv.as_mut_ptr(),
            ldc,
        )
    };
    Ok(())
}

/// Triangular multiply or solve with multiple right-hand sides.
fn triangular_mm<T: CblasScalar>(
    solve: bool,
    layout: Layout,
    side: Side,
    triangle: Triangle,
    a_transpose: Transpose,
    diagonal: Diagonal,
    m: usize,
    n: usize,
    alpha: T,
    a: &[T],
    a_off: usize,
    a_ld: usize,
    b: &mut [T],
    b_off: usize,
    b_ld: usize,
) -> Result<()> {
    let ka = side_order(side, m, n);
    let (av, lda) = dense(a, BufferRole::A, layout, ka, ka, a_off, a_ld)?;
    let (mut bv, ldb) = dense_mut(b, BufferRole::B, layout, m, n, b_off, b_ld)?;
    let alpha = split_scalar(alpha);
    let (mc, nc) = (to_cint(m)?, to_cint(n)?);
    let call = if solve { T::trsm } else { T::trmm };
    unsafe {
        call(
            layout_code(layout),
            side_code(side),
            triangle_code(triangle),
            transpose_code(a_transpose),
            diagonal_code(diagonal),
            mc,
            nc,
            T::arg(&alpha),
            av.as_ptr(),
            lda,
            bv.as_mut_ptr(),
            ldb,
        )
    };
    Ok(())
}

pub fn trmm<T: CblasScalar>(
    layout: Layout,
    side: Side,
    triangle: Triangle,
    a_transpose: Transpose,
    diagonal: Diagonal,
    m: usize,
    n: usize,
    alpha: T,
    a: &[T],
    a_off: usize,
    a_ld: usize,
    b: &mut [T],
    b_off: usize,
    b_ld: usize,
) -> Result<()> {
    triangular_mm(
        false, layout, side, triangle, a_transpose, diagonal, m, n, alpha, a, a_off, a_ld, b,
        b_off, b_ld,
    )
}

pub fn trsm<T: CblasScalar>(
    layout: Layout,
    side: Side,
    triangle: Triangle,
    a_transpose: Transpose,
    diagonal: Diagonal,
    m: usize,
    n: usize,
    alpha: T,
    a: &[T],
    a_off: usize,
    a_ld: usize,
    b: &mut [T],
    b_off: usize,
    b_ld: usize,
) -> Result<()> {
    triangular_mm(
        true, layout, side, triangle, a_transpose, diagonal, m, n, alpha, a, a_off, a_ld, b,
        b_off, b_ld,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_option_codes_are_cblas_values() {
        assert_eq!(layout_code(Layout::RowMajor), 101);
        assert_eq!(transpose_code(Transpose::Conjugate), 113);
        assert_eq!(triangle_code(Triangle::Lower), 122);
        assert_eq!(diagonal_code(Diagonal::Unit), 132);
        assert_eq!(side_code(Side::Right), 142);
    }

    #[test]
    fn test_oversized_dimension_is_unsupported() {
        let err = to_cint(usize::MAX).unwrap_err();
        assert!(matches!(err, ProbeError::UnsupportedConfiguration(_)));
        assert_eq!(to_cint(7).unwrap(), 7);
    }

    #[test]
    fn test_zero_increment_rejected_before_call() {
        let x = vec![1.0f32; 4];
        let err = nrm2(2, &x, 0, 0).unwrap_err();
        assert!(matches!(err, ProbeError::UnsupportedConfiguration(_)));
    }

    #[test]
    fn test_short_buffer_rejected_before_call() {
        let x = vec![Complex64::new(1.0, 0.0); 3];
        let mut y = vec![Complex64::new(0.0, 0.0); 3];
        let err = axpy(3, Complex64::new(1.0, 0.0), &x, 1, 1, &mut y, 0, 1).unwrap_err();
        assert!(matches!(
            err,
            ProbeError::SizeMismatch { role: BufferRole::X, required: 4, actual: 3 }
        ));
    }

    #[test]
    fn test_complex_axpy_through_cblas() {
        let x = vec![Complex32::new(1.0, 2.0), Complex32::new(3.0, -1.0)];
        let mut y = vec![Complex32::new(0.5, 0.5); 2];
        axpy(2, Complex32::new(0.0, 1.0), &x, 0, 1, &mut y, 0, 1).unwrap();
        // i * (1 + 2i) = -2 + i;  i * (3 - i) = 1 + 3i
        assert_eq!(y[0], Complex32::new(-1.5, 1.5));
        assert_eq!(y[1], Complex32::new(1.5, 3.5));
    }

    #[test]
    fn test_complex_dot_returns_through_pair() {
        let x = vec![Complex64::new(1.0, 1.0), Complex64::new(0.0, 2.0)];
        let y = vec![Complex64::new(2.0, 0.0), Complex64::new(1.0, 1.0)];
        let u = dotu(2, &x, 0, 1, &y, 0, 1).unwrap();
        let c = dotc(2, &x, 0, 1, &y, 0, 1).unwrap();
        assert_eq!(u, Complex64::new(0.0, 4.0));
        assert_eq!(c, Complex64::new(4.0, -4.0));
    }
}
