//! Raw FFI declarations for the C interface to BLAS (cblas.h).
//!
//! All functions are unsafe; the checked forwarding layer lives in the parent
//! module. Option arguments are the CBLAS enum values (101, 102, 111, ...)
//! passed as `c_int`. Complex buffers and complex scalars are declared as
//! pointers to their interleaved real parts, which is how cblas.h's `void *`
//! parameters are laid out. `CBLAS_INDEX` is `size_t`.

use std::os::raw::{c_double, c_float, c_int};

pub const CBLAS_ROW_MAJOR: c_int = 101;
pub const CBLAS_COL_MAJOR: c_int = 102;
pub const CBLAS_NO_TRANS: c_int = 111;
pub const CBLAS_TRANS: c_int = 112;
pub const CBLAS_CONJ_TRANS: c_int = 113;
pub const CBLAS_UPPER: c_int = 121;
pub const CBLAS_LOWER: c_int = 122;
pub const CBLAS_NON_UNIT: c_int = 131;
pub const CBLAS_UNIT: c_int = 132;
pub const CBLAS_LEFT: c_int = 141;
pub const CBLAS_RIGHT: c_int = 142;

/// Declares the routines every precision has. `$r` is the real element type and
/// `$s` how a scalar argument travels: by value for real precisions, by address
/// for complex ones.
macro_rules! declare_common {
    (
        $r:ty, $s:ty, $nrm:ty;
        $swap:ident, $scal:ident, $copy:ident, $axpy:ident, $nrm2:ident, $asum:ident, $amax:ident,
        $gemv:ident, $gbmv:ident, $trmv:ident, $tpmv:ident, $trsv:ident,
        $gemm:ident, $symm:ident, $syrk:ident, $syr2k:ident, $trmm:ident, $trsm:ident
    ) => {
        extern "C" {
            pub fn $swap(n: c_int, x: *mut $r, incx: c_int, y: *mut $r, incy: c_int);
            pub fn $scal(n: c_int, alpha: $s, x: *mut $r, incx: c_int);
            pub fn $copy(n: c_int, x: *const $r, incx: c_int, y: *mut $r, incy: c_int);
            pub fn $axpy(
                n: c_int,
                alpha: $s,
                x: *const $r,
                incx: c_int,
                y: *mut $r,
                incy: c_int,
            );
            pub fn $nrm2(n: c_int, x: *const $r, incx: c_int) -> $nrm;
            pub fn $asum(n: c_int, x: *const $r, incx: c_int) -> $nrm;
            pub fn $amax(n: c_int, x: *const $r, incx: c_int) -> usize;

            pub fn $gemv(
                layout: c_int,
                trans: c_int,
                m: c_int,
                n: c_int,
                alpha: $s,
                a: *const $r,
                lda: c_int,
                x: *const $r,
                incx: c_int,
                beta: $s,
                y: *mut $r,
                incy: c_int,
            );
            pub fn $gbmv(
                layout: c_int,
                trans: c_int,
                m: c_int,
                n: c_int,
                kl: c_int,
                ku: c_int,
                alpha: $s,
                a: *const $r,
                lda: c_int,
                x: *const $r,
                incx: c_int,
                beta: $s,
                y: *mut $r,
                incy: c_int,
            );
            pub fn $trmv(
                layout: c_int,
                uplo: c_int,
                trans: c_int,
                diag: c_int,
                n: c_int,
                a: *const $r,
                lda: c_int,
                x: *mut $r,
                incx: c_int,
            );
            pub fn $tpmv(
                layout: c_int,
                uplo: c_int,
                trans: c_int,
                diag: c_int,
                n: c_int,
                ap: *const $r,
                x: *mut $r,
                incx: c_int,
            );
            pub fn $trsv(
                layout: c_int,
                uplo: c_int,
                trans: c_int,
                diag: c_int,
                n: c_int,
                a: *const $r,
                lda: c_int,
                x: *mut $r,
                incx: c_int,
            );

            pub fn $gemm(
                layout: c_int,
                transa: c_int,
                transb: c_int,
                m: c_int,
                n: c_int,
                k: c_int,
                alpha: $s,
                a: *const $r,
                lda: c_int,
                b: *const $r,
                ldb: c_int,
                beta: $s,
                c: *mut $r,
                ldc: c_int,
            );
            pub fn $symm(
                layout: c_int,
                side: c_int,
                uplo: c_int,
                m: c_int,
                n: c_int,
                alpha: $s,
                a: *const $r,
                lda: c_int,
                b: *const $r,
                ldb: c_int,
                beta: $s,
                c: *mut $r,
                ldc: c_int,
            );
            pub fn $syrk(
                layout: c_int,
                uplo: c_int,
                trans: c_int,
                n: c_int,
                k: c_int,
                alpha: $s,
                a: *const $r,
                lda: c_int,
                beta: $s,
                c: *mut $r,
                ldc: c_int,
            );
            pub fn $syr2k(
                layout: c_int,
                uplo: c_int,
                trans: c_int,
                n: c_int,
                k: c_int,
                alpha: $s,
                a: *const $r,
                lda: c_int,
                b: *const $r,
                ldb: c_int,
                beta: $s,
                c: *mut $r,
                ldc: c_int,
            );
            pub fn $trmm(
                layout: c_int,
                side: c_int,
                uplo: c_int,
                transa: c_int,
                diag: c_int,
                m: c_int,
                n: c_int,
                alpha: $s,
                a: *const $r,
                lda: c_int,
                b: *mut $r,
                ldb: c_int,
            );
            pub fn $trsm(
                layout: c_int,
                side: c_int,
                uplo: c_int,
                transa: c_int,
                diag: c_int,
                m: c_int,
                n: c_int,
                alpha: $s,
                a: *const $r,
                lda: c_int,
                b: *mut $r,
                ldb: c_int,
            );
        }
    };
}

// ═══════════════════════════════════════════════════════════════
// Routines shared by all four precisions
// ═══════════════════════════════════════════════════════════════

declare_common!(
    c_float, c_float, c_float;
    cblas_sswap, cblas_sscal, cblas_scopy, cblas_saxpy, cblas_snrm2, cblas_sasum, cblas_isamax,
    cblas_sgemv, cblas_sgbmv, cblas_strmv, cblas_stpmv, cblas_strsv,
    cblas_sgemm, cblas_ssymm, cblas_ssyrk, cblas_ssyr2k, cblas_strmm, cblas_strsm
);

declare_common!(
    c_double, c_double, c_double;
    cblas_dswap, cblas_dscal, cblas_dcopy, cblas_daxpy, cblas_dnrm2, cblas_dasum, cblas_idamax,
    cblas_dgemv, cblas_dgbmv, cblas_dtrmv, cblas_dtpmv, cblas_dtrsv,
    cblas_dgemm, cblas_dsymm, cblas_dsyrk, cblas_dsyr2k, cblas_dtrmm, cblas_dtrsm
);

declare_common!(
    c_float, *const c_float, c_float;
    cblas_cswap, cblas_cscal, cblas_ccopy, cblas_caxpy, cblas_scnrm2, cblas_scasum, cblas_icamax,
    cblas_cgemv, cblas_cgbmv, cblas_ctrmv, cblas_ctpmv, cblas_ctrsv,
    cblas_cgemm, cblas_csymm, cblas_csyrk, cblas_csyr2k, cblas_ctrmm, cblas_ctrsm
);

declare_common!(
    c_double, *const c_double, c_double;
    cblas_zswap, cblas_zscal, cblas_zcopy, cblas_zaxpy, cblas_dznrm2, cblas_dzasum, cblas_izamax,
    cblas_zgemv, cblas_zgbmv, cblas_ztrmv, cblas_ztpmv, cblas_ztrsv,
    cblas_zgemm, cblas_zsymm, cblas_zsyrk, cblas_zsyr2k, cblas_ztrmm, cblas_ztrsm
);

// ═══════════════════════════════════════════════════════════════
// Real-only routines
// ═══════════════════════════════════════════════════════════════

macro_rules! declare_real {
    (
        $r:ty;
        $dot:ident, $rot:ident, $symv:ident, $spmv:ident, $ger:ident,
        $syr:ident, $spr:ident, $syr2:ident, $spr2:ident
    ) => {
        extern "C" {
            pub fn $dot(n: c_int, x: *const $r, incx: c_int, y: *const $r, incy: c_int) -> $r;
            pub fn $rot(n: c_int, x: *mut $r, incx: c_int, y: *mut $r, incy: c_int, c: $r, s: $r);
            pub fn $symv(
                layout: c_int,
                uplo: c_int,
                n: c_int,
                alpha: $r,
                a: *const $r,
                lda: c_int,
                x: *const $r,
                incx: c_int,
                beta: $r,
                y: *mut $r,
                incy: c_int,
            );
            pub fn $spmv(
                layout: c_int,
                uplo: c_int,
                n: c_int,
                alpha: $r,
                ap: *const $r,
                x: *const $r,
                incx: c_int,
                beta: $r,
                y: *mut $r,
                incy: c_int,
            );
            pub fn $ger(
                layout: c_int,
                m: c_int,
                n: c_int,
                alpha: $r,
                x: *const $r,
                incx: c_int,
                y: *const $r,
                incy: c_int,
                a: *mut $r,
                lda: c_int,
            );
            pub fn $syr(
                layout: c_int,
                uplo: c_int,
                n: c_int,
                alpha: $r,
                x: *const $r,
                incx: c_int,
                a: *mut $r,
                lda: c_int,
            );
            pub fn $spr(
                layout: c_int,
                uplo: c_int,
                n: c_int,
                alpha: $r,
                x: *const $r,
                incx: c_int,
                ap: *mut $r,
            );
            pub fn $syr2(
                layout: c_int,
                uplo: c_int,
                n: c_int,
                alpha: $r,
                x: *const $r,
                incx: c_int,
                y: *const $r,
                incy: c_int,
                a: *mut $r,
                lda: c_int,
            );
            pub fn $spr2(
                layout: c_int,
                uplo: c_int,
                n: c_int,
                alpha: $r,
                x: *const $r,
                incx: c_int,
                y: *const $r,
                incy: c_int,
                ap: *mut $r,
            );
        }
    };
}

declare_real!(
    c_float;
    cblas_sdot, cblas_srot, cblas_ssymv, cblas_sspmv, cblas_sger,
    cblas_ssyr, cblas_sspr, cblas_ssyr2, cblas_sspr2
);

declare_real!(
    c_double;
    cblas_ddot, cblas_drot, cblas_dsymv, cblas_dspmv, cblas_dger,
    cblas_dsyr, cblas_dspr, cblas_dsyr2, cblas_dspr2
);

// ═══════════════════════════════════════════════════════════════
// Complex-only routines
// ═══════════════════════════════════════════════════════════════

macro_rules! declare_complex {
    (
        $r:ty;
        $dotu:ident, $dotc:ident, $hemv:ident, $hpmv:ident, $geru:ident, $gerc:ident,
        $her:ident, $hpr:ident, $her2:ident, $hpr2:ident, $hemm:ident, $herk:ident, $her2k:ident
    ) => {
        extern "C" {
            pub fn $dotu(
                n: c_int,
                x: *const $r,
                incx: c_int,
                y: *const $r,
                incy: c_int,
                dotu: *mut $r,
            );
            pub fn $dotc(
                n: c_int,
                x: *const $r,
                incx: c_int,
                y: *const $r,
                incy: c_int,
                dotc: *mut $r,
            );
            pub fn $hemv(
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
            );
            pub fn $hpmv(
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
            );
            pub fn $geru(
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
            );
            pub fn $gerc(
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
            );
            pub fn $her(
                layout: c_int,
                uplo: c_int,
                n: c_int,
                alpha: $r,
                x: *const $r,
                incx: c_int,
                a: *mut $r,
                lda: c_int,
            );
            pub fn $hpr(
                layout: c_int,
                uplo: c_int,
                n: c_int,
                alpha: $r,
                x: *const $r,
                incx: c_int,
                ap: *mut $r,
            );
            pub fn $her2(
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
            );
            pub fn $hpr2(
                layout: c_int,
                uplo: c_int,
                n: c_int,
                alpha: *const $r,
                x: *const $r,
                incx: c_int,
                y: *const $r,
                incy: c_int,
                ap: *mut $r,
            );
            pub fn $hemm(
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
            );
            pub fn $herk(
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
            );
            pub fn $her2k(
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
            );
        }
    };
}

declare_complex!(
    c_float;
    cblas_cdotu_sub, cblas_cdotc_sub, cblas_chemv, cblas_chpmv, cblas_cgeru, cblas_cgerc,
    cblas_cher, cblas_chpr, cblas_cher2, cblas_chpr2, cblas_chemm, cblas_cherk, cblas_cher2k
);

declare_complex!(
    c_double;
    cblas_zdotu_sub, cblas_zdotc_sub, cblas_zhemv, cblas_zhpmv, cblas_zgeru, cblas_zgerc,
    cblas_zher, cblas_zhpr, cblas_zher2, cblas_zhpr2, cblas_zhemm, cblas_zherk, cblas_zher2k
);
