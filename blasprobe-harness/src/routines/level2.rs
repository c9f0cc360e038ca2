//! Level 2 descriptors: matrix-vector routines.
//!
//! Routines with identical shapes share one macro body; the macros only swap
//! the element-type bound and the three backend entry points.

use super::common::{
    as_given, bytes, condition_triangle, gemv_lengths, matrix_index, matrix_size, packed_size,
    precheck, primary, real_part, vector_size,
};
#[cfg(feature = "cblas")]
use crate::backend::cblas;
#[cfg(feature = "naive")]
use crate::backend::naive;
use crate::backend::{not_compiled, BackendComplex, BackendId, BackendReal, BackendScalar};
use crate::descriptor::{BlasLevel, LeadDim, Routine};
use blasprobe_blas::level2;
use blasprobe_core::{packed_len, Arguments, BufferRole, Buffers, Opt, Queue, Result, Transpose};

fn x_of<T>(n: usize, args: &Arguments<T>) -> usize {
    vector_size(n, args.x_inc, args.x_offset)
}

fn y_of<T>(n: usize, args: &Arguments<T>) -> usize {
    vector_size(n, args.y_inc, args.y_offset)
}

fn square_a<T>(args: &Arguments<T>) -> usize {
    matrix_size(args.layout, args.n, args.n, args.a_ld, args.a_offset)
}

fn packed_ap<T>(args: &Arguments<T>) -> usize {
    packed_size(args.n, args.ap_offset)
}

/// Index of element `(i, j)` of an updated dense A.
fn a_index<T>(args: &Arguments<T>, i: usize, j: Option<usize>) -> usize {
    matrix_index(args.layout, args.a_ld, args.a_offset, i, j.unwrap_or(0))
}

fn square_lead<T>(ld: LeadDim, args: &Arguments<T>) -> Option<usize> {
    match ld {
        LeadDim::A => Some(args.n),
        _ => None,
    }
}

// ============================================================================
// GEMV / GBMV
// ============================================================================

const GEMV_OPTIONS: &[Opt] = &[
    Opt::Layout,
    Opt::ATransp,
    Opt::M,
    Opt::N,
    Opt::Alpha,
    Opt::Beta,
    Opt::ALeadDim,
    Opt::XInc,
    Opt::YInc,
    Opt::AOffset,
    Opt::XOffset,
    Opt::YOffset,
];

const MV_INPUTS: &[BufferRole] = &[BufferRole::A, BufferRole::X, BufferRole::Y];
const PACKED_MV_INPUTS: &[BufferRole] = &[BufferRole::AP, BufferRole::X, BufferRole::Y];
const Y_ROLE: &[BufferRole] = &[BufferRole::Y];
const X_ROLE: &[BufferRole] = &[BufferRole::X];
const A_ROLE: &[BufferRole] = &[BufferRole::A];
const AP_ROLE: &[BufferRole] = &[BufferRole::AP];

/// Sizes of a general (or banded) matrix-vector product; A always has `m x n` logical shape.
fn general_mv_size<T>(role: BufferRole, args: &Arguments<T>) -> usize {
    let (x_len, y_len) = gemv_lengths(args.a_transpose, args.m, args.n);
    match role {
        BufferRole::A => matrix_size(args.layout, args.m, args.n, args.a_ld, args.a_offset),
        BufferRole::X => x_of(x_len, args),
        BufferRole::Y => y_of(y_len, args),
        _ => 0,
    }
}

/// y := alpha * op(A) * x + beta * y
pub struct Xgemv;

impl<T: BackendScalar> Routine<T> for Xgemv {
    const NAME: &'static str = "gemv";

    fn operation_level() -> BlasLevel {
        BlasLevel::Two
    }

    fn required_options() -> &'static [Opt] {
        GEMV_OPTIONS
    }

    fn input_buffer_roles() -> &'static [BufferRole] {
        MV_INPUTS
    }

    fn output_buffer_roles() -> &'static [BufferRole] {
        Y_ROLE
    }

    fn buffer_size(role: BufferRole, args: &Arguments<T>) -> usize {
        general_mv_size(role, args)
    }

    fn default_leading_dimension(ld: LeadDim, args: &Arguments<T>) -> Option<usize> {
        match ld {
            LeadDim::A => Some(args.layout.leading_dim(args.m, args.n)),
            _ => None,
        }
    }

    fn applicable_a_transposes(candidates: &[Transpose]) -> Vec<Transpose> {
        candidates.to_vec()
    }

    fn run_primary(args: &Arguments<T>, b: &mut Buffers<T>, queue: &mut Queue) -> Result<()> {
        precheck::<Self, T>(args, b)?;
        primary(level2::gemv(
            queue,
            args.layout,
            args.a_transpose,
            args.m,
            args.n,
            args.alpha,
            &b.a_mat,
            args.a_offset,
            args.a_ld,
            &b.x_vec,
            args.x_offset,
            args.x_inc,
            args.beta,
            &mut b.y_vec,
            args.y_offset,
            args.y_inc,
        ))
    }

    fn run_reference(backend: BackendId, args: &Arguments<T>, b: &mut Buffers<T>) -> Result<()> {
        precheck::<Self, T>(args, b)?;
        match backend {
            #[cfg(feature = "naive")]
            BackendId::Naive => {
                naive::gemv(
                    naive::layout_code(args.layout),
                    naive::transpose_code(args.a_transpose),
                    args.m,
                    args.n,
                    args.alpha,
                    &b.a_mat,
                    args.a_offset,
                    args.a_ld,
                    &b.x_vec,
                    args.x_offset,
                    args.x_inc,
                    args.beta,
                    &mut b.y_vec,
                    args.y_offset,
                    args.y_inc,
                );
                Ok(())
            }
            #[cfg(feature = "cblas")]
            BackendId::Cblas => cblas::gemv(
                args.layout,
                args.a_transpose,
                args.m,
                args.n,
                args.alpha,
                &b.a_mat,
                args.a_offset,
                args.a_ld,
                &b.x_vec,
                args.x_offset,
                args.x_inc,
                args.beta,
                &mut b.y_vec,
                args.y_offset,
                args.y_inc,
            ),
            #[allow(unreachable_patterns)]
            other => Err(not_compiled(other)),
        }
    }

    fn result_extent(args: &Arguments<T>) -> (usize, Option<usize>) {
        (gemv_lengths(args.a_transpose, args.m, args.n).1, None)
    }

    fn result_index(args: &Arguments<T>, i: usize, _j: Option<usize>) -> usize {
        args.y_offset + i * args.y_inc
    }

    fn flop_count(args: &Arguments<T>) -> usize {
        2 * args.m * args.n
    }

    fn byte_count(args: &Arguments<T>) -> usize {
        let (x_len, y_len) = gemv_lengths(args.a_transpose, args.m, args.n);
        bytes::<T>(args.m * args.n + 2 * y_len + x_len)
    }
}

/// y := alpha * op(A) * x + beta * y, with A banded (kl sub-, ku super-diagonals)
pub struct Xgbmv;

impl<T: BackendScalar> Routine<T> for Xgbmv {
    const NAME: &'static str = "gbmv";

    fn operation_level() -> BlasLevel {
        BlasLevel::Two
    }

    fn required_options() -> &'static [Opt] {
        &[
            Opt::Layout,
            Opt::ATransp,
            Opt::M,
            Opt::N,
            Opt::KL,
            Opt::KU,
            Opt::Alpha,
            Opt::Beta,
            Opt::ALeadDim,
            Opt::XInc,
            Opt::YInc,
            Opt::AOffset,
            Opt::XOffset,
            Opt::YOffset,
        ]
    }

    fn input_buffer_roles() -> &'static [BufferRole] {
        MV_INPUTS
    }

    fn output_buffer_roles() -> &'static [BufferRole] {
        Y_ROLE
    }

    fn buffer_size(role: BufferRole, args: &Arguments<T>) -> usize {
        general_mv_size(role, args)
    }

    fn default_leading_dimension(ld: LeadDim, args: &Arguments<T>) -> Option<usize> {
        match ld {
            LeadDim::A => Some(args.kl + args.ku + 1),
            _ => None,
        }
    }

    fn applicable_a_transposes(candidates: &[Transpose]) -> Vec<Transpose> {
        candidates.to_vec()
    }

    fn run_primary(args: &Arguments<T>, b: &mut Buffers<T>, queue: &mut Queue) -> Result<()> {
        precheck::<Self, T>(args, b)?;
        primary(level2::gbmv(
            queue,
            args.layout,
            args.a_transpose,
            args.m,
            args.n,
            args.kl,
            args.ku,
            args.alpha,
            &b.a_mat,
            args.a_offset,
            args.a_ld,
            &b.x_vec,
            args.x_offset,
            args.x_inc,
            args.beta,
            &mut b.y_vec,
            args.y_offset,
            args.y_inc,
        ))
    }

    fn run_reference(backend: BackendId, args: &Arguments<T>, b: &mut Buffers<T>) -> Result<()> {
        precheck::<Self, T>(args, b)?;
        match backend {
            #[cfg(feature = "naive")]
            BackendId::Naive => {
                naive::gbmv(
                    naive::layout_code(args.layout),
                    naive::transpose_code(args.a_transpose),
                    args.m,
                    args.n,
                    args.kl,
                    args.ku,
                    args.alpha,
                    &b.a_mat,
                    args.a_offset,
                    args.a_ld,
                    &b.x_vec,
                    args.x_offset,
                    args.x_inc,
                    args.beta,
                    &mut b.y_vec,
                    args.y_offset,
                    args.y_inc,
                );
                Ok(())
            }
            #[cfg(feature = "cblas")]
            BackendId::Cblas => cblas::gbmv(
                args.layout,
                args.a_transpose,
                args.m,
                args.n,
                args.kl,
                args.ku,
                args.alpha,
                &b.a_mat,
                args.a_offset,
                args.a_ld,
                &b.x_vec,
                args.x_offset,
                args.x_inc,
                args.beta,
                &mut b.y_vec,
                args.y_offset,
                args.y_inc,
            ),
            #[allow(unreachable_patterns)]
            other => Err(not_compiled(other)),
        }
    }

    fn result_extent(args: &Arguments<T>) -> (usize, Option<usize>) {
        (gemv_lengths(args.a_transpose, args.m, args.n).1, None)
    }

    fn result_index(args: &Arguments<T>, i: usize, _j: Option<usize>) -> usize {
        args.y_offset + i * args.y_inc
    }

    fn flop_count(args: &Arguments<T>) -> usize {
        let (x_len, y_len) = gemv_lengths(args.a_transpose, args.m, args.n);
        2 * y_len * x_len.min(args.kl + args.ku + 1)
    }

    fn byte_count(args: &Arguments<T>) -> usize {
        let (x_len, y_len) = gemv_lengths(args.a_transpose, args.m, args.n);
        bytes::<T>(y_len * (args.kl + args.ku + 1) + 2 * y_len + x_len)
    }
}

// ============================================================================
// SYMV / HEMV / SPMV / HPMV
// ============================================================================

const SYMMETRIC_MV_OPTIONS: &[Opt] = &[
    Opt::Layout,
    Opt::Triangle,
    Opt::N,
    Opt::Alpha,
    Opt::Beta,
    Opt::ALeadDim,
    Opt::XInc,
    Opt::YInc,
    Opt::AOffset,
    Opt::XOffset,
    Opt::YOffset,
];

const PACKED_MV_OPTIONS: &[Opt] = &[
    Opt::Layout,
    Opt::Triangle,
    Opt::N,
    Opt::Alpha,
    Opt::Beta,
    Opt::XInc,
    Opt::YInc,
    Opt::APOffset,
    Opt::XOffset,
    Opt::YOffset,
];

macro_rules! symmetric_mv {
    (
        $(#[$doc:meta])*
        $name:ident, $label:literal, $bound:ident,
        primary = $primary:path, naive = $naive:ident, cblas = $cblas:ident
    ) => {
        $(#[$doc])*
        pub struct $name;

        impl<T: $bound> Routine<T> for $name {
            const NAME: &'static str = $label;

            fn operation_level() -> BlasLevel {
                BlasLevel::Two
            }

            fn required_options() -> &'static [Opt] {
                SYMMETRIC_MV_OPTIONS
            }

            fn input_buffer_roles() -> &'static [BufferRole] {
                MV_INPUTS
            }

            fn output_buffer_roles() -> &'static [BufferRole] {
                Y_ROLE
            }

            fn buffer_size(role: BufferRole, args: &Arguments<T>) -> usize {
                match role {
                    BufferRole::A => square_a(args),
                    BufferRole::X => x_of(args.n, args),
                    BufferRole::Y => y_of(args.n, args),
                    _ => 0,
                }
            }

            fn default_leading_dimension(ld: LeadDim, args: &Arguments<T>) -> Option<usize> {
                square_lead(ld, args)
            }

            fn run_primary(
                args: &Arguments<T>,
                b: &mut Buffers<T>,
                queue: &mut Queue,
            ) -> Result<()> {
                precheck::<Self, T>(args, b)?;
                primary($primary(
                    queue,
                    args.layout,
                    args.triangle,
                    args.n,
                    args.alpha,
                    &b.a_mat,
                    args.a_offset,
                    args.a_ld,
                    &b.x_vec,
                    args.x_offset,
                    args.x_inc,
                    args.beta,
                    &mut b.y_vec,
                    args.y_offset,
                    args.y_inc,
                ))
            }

            fn run_reference(
                backend: BackendId,
                args: &Arguments<T>,
                b: &mut Buffers<T>,
            ) -> Result<()> {
                precheck::<Self, T>(args, b)?;
                match backend {
                    #[cfg(feature = "naive")]
                    BackendId::Naive => {
                        naive::$naive(
                            naive::layout_code(args.layout),
                            naive::triangle_code(args.triangle),
                            args.n,
                            args.alpha,
                            &b.a_mat,
                            args.a_offset,
                            args.a_ld,
                            &b.x_vec,
                            args.x_offset,
                            args.x_inc,
                            args.beta,
                            &mut b.y_vec,
                            args.y_offset,
                            args.y_inc,
                        );
                        Ok(())
                    }
                    #[cfg(feature = "cblas")]
                    BackendId::Cblas => cblas::$cblas(
                        args.layout,
                        args.triangle,
                        args.n,
                        args.alpha,
                        &b.a_mat,
                        args.a_offset,
                        args.a_ld,
                        &b.x_vec,
                        args.x_offset,
                        args.x_inc,
                        args.beta,
                        &mut b.y_vec,
                        args.y_offset,
                        args.y_inc,
                    ),
                    #[allow(unreachable_patterns)]
                    other => Err(not_compiled(other)),
                }
            }

            fn result_extent(args: &Arguments<T>) -> (usize, Option<usize>) {
                (args.n, None)
            }

            fn result_index(args: &Arguments<T>, i: usize, _j: Option<usize>) -> usize {
                args.y_offset + i * args.y_inc
            }

            fn flop_count(args: &Arguments<T>) -> usize {
                2 * args.n * args.n
            }

            fn byte_count(args: &Arguments<T>) -> usize {
                bytes::<T>(args.n * args.n + 3 * args.n)
            }
        }
    };
}

symmetric_mv!(
    /// y := alpha * A * x + beta * y, A symmetric
    Xsymv, "symv", BackendReal,
    primary = level2::symv, naive = symv, cblas = symv
);

symmetric_mv!(
    /// y := alpha * A * x + beta * y, A Hermitian
    Xhemv, "hemv", BackendComplex,
    primary = level2::hemv, naive = hemv, cblas = hemv
);

macro_rules! packed_mv {
    (
        $(#[$doc:meta])*
        $name:ident, $label:literal, $bound:ident,
        primary = $primary:path, naive = $naive:ident, cblas = $cblas:ident
    ) => {
        $(#[$doc])*
        pub struct $name;

        impl<T: $bound> Routine<T> for $name {
            const NAME: &'static str = $label;

            fn operation_level() -> BlasLevel {
                BlasLevel::Two
            }

            fn required_options() -> &'static [Opt] {
                PACKED_MV_OPTIONS
            }

            fn input_buffer_roles() -> &'static [BufferRole] {
                PACKED_MV_INPUTS
            }

            fn output_buffer_roles() -> &'static [BufferRole] {
                Y_ROLE
            }

            fn buffer_size(role: BufferRole, args: &Arguments<T>) -> usize {
                match role {
                    BufferRole::AP => packed_ap(args),
                    BufferRole::X => x_of(args.n, args),
                    BufferRole::Y => y_of(args.n, args),
                    _ => 0,
                }
            }

            fn run_primary(
                args: &Arguments<T>,
                b: &mut Buffers<T>,
                queue: &mut Queue,
            ) -> Result<()> {
                precheck::<Self, T>(args, b)?;
                primary($primary(
                    queue,
                    args.layout,
                    args.triangle,
                    args.n,
                    args.alpha,
                    &b.ap_mat,
                    args.ap_offset,
                    &b.x_vec,
                    args.x_offset,
                    args.x_inc,
                    args.beta,
                    &mut b.y_vec,
                    args.y_offset,
                    args.y_inc,
                ))
            }

            fn run_reference(
                backend: BackendId,
                args: &Arguments<T>,
                b: &mut Buffers<T>,
            ) -> Result<()> {
                precheck::<Self, T>(args, b)?;
                match backend {
                    #[cfg(feature = "naive")]
                    BackendId::Naive => {
                        naive::$naive(
                            naive::layout_code(args.layout),
                            naive::triangle_code(args.triangle),
                            args.n,
                            args.alpha,
                            &b.ap_mat,
                            args.ap_offset,
                            &b.x_vec,
                            args.x_offset,
                            args.x_inc,
                            args.beta,
                            &mut b.y_vec,
                            args.y_offset,
                            args.y_inc,
                        );
                        Ok(())
                    }
                    #[cfg(feature = "cblas")]
                    BackendId::Cblas => cblas::$cblas(
                        args.layout,
                        args.triangle,
                        args.n,
                        args.alpha,
                        &b.ap_mat,
                        args.ap_offset,
                        &b.x_vec,
                        args.x_offset,
                        args.x_inc,
                        args.beta,
                        &mut b.y_vec,
                        args.y_offset,
                        args.y_inc,
                    ),
                    #[allow(unreachable_patterns)]
                    other => Err(not_compiled(other)),
                }
            }

            fn result_extent(args: &Arguments<T>) -> (usize, Option<usize>) {
                (args.n, None)
            }

            fn result_index(args: &Arguments<T>, i: usize, _j: Option<usize>) -> usize {
                args.y_offset + i * args.y_inc
            }

            fn flop_count(args: &Arguments<T>) -> usize {
                2 * args.n * args.n
            }

            fn byte_count(args: &Arguments<T>) -> usize {
                bytes::<T>(packed_len(args.n) + 3 * args.n)
            }
        }
    };
}

packed_mv!(
    /// y := alpha * AP * x + beta * y, AP symmetric packed
    Xspmv, "spmv", BackendReal,
    primary = level2::spmv, naive = spmv, cblas = spmv
);

packed_mv!(
    /// y := alpha * AP * x + beta * y, AP Hermitian packed
    Xhpmv, "hpmv", BackendComplex,
    primary = level2::hpmv, naive = hpmv, cblas = hpmv
);

// ============================================================================
// TRMV / TRSV / TPMV
// ============================================================================

const TRIANGULAR_MV_OPTIONS: &[Opt] = &[
    Opt::Layout,
    Opt::Triangle,
    Opt::ATransp,
    Opt::Diagonal,
    Opt::N,
    Opt::ALeadDim,
    Opt::XInc,
    Opt::AOffset,
    Opt::XOffset,
];

/// Triangular matrix-vector operations that read a dense A and update x in place.
macro_rules! triangular_mv {
    (
        $(#[$doc:meta])*
        $name:ident, $label:literal,
        primary = $primary:path, naive = $naive:ident, cblas = $cblas:ident
        $(, prepare = $prepare:path)?
    ) => {
        $(#[$doc])*
        pub struct $name;

        impl<T: BackendScalar> Routine<T> for $name {
            const NAME: &'static str = $label;

            fn operation_level() -> BlasLevel {
                BlasLevel::Two
            }

            fn required_options() -> &'static [Opt] {
                TRIANGULAR_MV_OPTIONS
            }

            fn input_buffer_roles() -> &'static [BufferRole] {
                &[BufferRole::A, BufferRole::X]
            }

            fn output_buffer_roles() -> &'static [BufferRole] {
                X_ROLE
            }

            fn buffer_size(role: BufferRole, args: &Arguments<T>) -> usize {
                match role {
                    BufferRole::A => square_a(args),
                    BufferRole::X => x_of(args.n, args),
                    _ => 0,
                }
            }

            fn default_leading_dimension(ld: LeadDim, args: &Arguments<T>) -> Option<usize> {
                square_lead(ld, args)
            }

            fn applicable_a_transposes(candidates: &[Transpose]) -> Vec<Transpose> {
                candidates.to_vec()
            }

            #[allow(unused_variables)]
            fn prepare_inputs(args: &Arguments<T>, b: &mut Buffers<T>) {
                $($prepare(args, args.n, &mut b.a_mat);)?
            }

            fn run_primary(
                args: &Arguments<T>,
                b: &mut Buffers<T>,
                queue: &mut Queue,
            ) -> Result<()> {
                precheck::<Self, T>(args, b)?;
                primary($primary(
                    queue,
                    args.layout,
                    args.triangle,
                    args.a_transpose,
                    args.diagonal,
                    args.n,
                    &b.a_mat,
                    args.a_offset,
                    args.a_ld,
                    &mut b.x_vec,
                    args.x_offset,
                    args.x_inc,
                ))
            }

            fn run_reference(
                backend: BackendId,
                args: &Arguments<T>,
                b: &mut Buffers<T>,
            ) -> Result<()> {
                precheck::<Self, T>(args, b)?;
                match backend {
                    #[cfg(feature = "naive")]
                    BackendId::Naive => {
                        naive::$naive(
                            naive::layout_code(args.layout),
                            naive::triangle_code(args.triangle),
                            naive::transpose_code(args.a_transpose),
                            naive::diagonal_code(args.diagonal),
                            args.n,
                            &b.a_mat,
                            args.a_offset,
                            args.a_ld,
                            &mut b.x_vec,
                            args.x_offset,
                            args.x_inc,
                        );
                        Ok(())
                    }
                    #[cfg(feature = "cblas")]
                    BackendId::Cblas => cblas::$cblas(
                        args.layout,
                        args.triangle,
                        args.a_transpose,
                        args.diagonal,
                        args.n,
                        &b.a_mat,
                        args.a_offset,
                        args.a_ld,
                        &mut b.x_vec,
                        args.x_offset,
                        args.x_inc,
                    ),
                    #[allow(unreachable_patterns)]
                    other => Err(not_compiled(other)),
                }
            }

            fn result_extent(args: &Arguments<T>) -> (usize, Option<usize>) {
                (args.n, None)
            }

            fn result_index(args: &Arguments<T>, i: usize, _j: Option<usize>) -> usize {
                args.x_offset + i * args.x_inc
            }

            fn flop_count(args: &Arguments<T>) -> usize {
                triangular_flops(args.n)
            }

            fn byte_count(args: &Arguments<T>) -> usize {
                bytes::<T>(packed_len(args.n) + 2 * args.n)
            }
        }
    };
}

fn triangular_flops(n: usize) -> usize {
    n * (n + 1)
}

triangular_mv!(
    /// x := op(A) * x, A triangular
    Xtrmv, "trmv",
    primary = level2::trmv, naive = trmv, cblas = trmv
);

triangular_mv!(
    /// x := op(A)^-1 * x, A triangular
    Xtrsv, "trsv",
    primary = level2::trsv, naive = trsv, cblas = trsv,
    prepare = condition_triangle
);

/// x := op(AP) * x, AP triangular packed
pub struct Xtpmv;

impl<T: BackendScalar> Routine<T> for Xtpmv {
    const NAME: &'static str = "tpmv";

    fn operation_level() -> BlasLevel {
        BlasLevel::Two
    }

    fn required_options() -> &'static [Opt] {
        &[
            Opt::Layout,
            Opt::Triangle,
            Opt::ATransp,
            Opt::Diagonal,
            Opt::N,
            Opt::XInc,
            Opt::APOffset,
            Opt::XOffset,
        ]
    }

    fn input_buffer_roles() -> &'static [BufferRole] {
        &[BufferRole::AP, BufferRole::X]
    }

    fn output_buffer_roles() -> &'static [BufferRole] {
        X_ROLE
    }

    fn buffer_size(role: BufferRole, args: &Arguments<T>) -> usize {
        match role {
            BufferRole::AP => packed_ap(args),
            BufferRole::X => x_of(args.n, args),
            _ => 0,
        }
    }

    fn applicable_a_transposes(candidates: &[Transpose]) -> Vec<Transpose> {
        candidates.to_vec()
    }

    fn run_primary(args: &Arguments<T>, b: &mut Buffers<T>, queue: &mut Queue) -> Result<()> {
        precheck::<Self, T>(args, b)?;
        primary(level2::tpmv(
            queue,
            args.layout,
            args.triangle,
            args.a_transpose,
            args.diagonal,
            args.n,
            &b.ap_mat,
            args.ap_offset,
            &mut b.x_vec,
            args.x_offset,
            args.x_inc,
        ))
    }

    fn run_reference(backend: BackendId, args: &Arguments<T>, b: &mut Buffers<T>) -> Result<()> {
        precheck::<Self, T>(args, b)?;
        match backend {
            #[cfg(feature = "naive")]
            BackendId::Naive => {
                naive::tpmv(
                    naive::layout_code(args.layout),
                    naive::triangle_code(args.triangle),
                    naive::transpose_code(args.a_transpose),
                    naive::diagonal_code(args.diagonal),
                    args.n,
                    &b.ap_mat,
                    args.ap_offset,
                    &mut b.x_vec,
                    args.x_offset,
                    args.x_inc,
                );
                Ok(())
            }
            #[cfg(feature = "cblas")]
            BackendId::Cblas => cblas::tpmv(
                args.layout,
                args.triangle,
                args.a_transpose,
                args.diagonal,
                args.n,
                &b.ap_mat,
                args.ap_offset,
                &mut b.x_vec,
                args.x_offset,
                args.x_inc,
            ),
            #[allow(unreachable_patterns)]
            other => Err(not_compiled(other)),
        }
    }

    fn result_extent(args: &Arguments<T>) -> (usize, Option<usize>) {
        (args.n, None)
    }

    fn result_index(args: &Arguments<T>, i: usize, _j: Option<usize>) -> usize {
        args.x_offset + i * args.x_inc
    }

    fn flop_count(args: &Arguments<T>) -> usize {
        triangular_flops(args.n)
    }

    fn byte_count(args: &Arguments<T>) -> usize {
        bytes::<T>(packed_len(args.n) + 2 * args.n)
    }
}

// ============================================================================
// GER / GERU / GERC
// ============================================================================

macro_rules! general_rank1 {
    (
        $(#[$doc:meta])*
        $name:ident, $label:literal, $bound:ident,
        primary = $primary:path, naive = $naive:ident, cblas = $cblas:ident
    ) => {
        $(#[$doc])*
        pub struct $name;

        impl<T: $bound> Routine<T> for $name {
            const NAME: &'static str = $label;

            fn operation_level() -> BlasLevel {
                BlasLevel::Two
            }

            fn required_options() -> &'static [Opt] {
                &[
                    Opt::Layout,
                    Opt::M,
                    Opt::N,
                    Opt::Alpha,
                    Opt::ALeadDim,
                    Opt::XInc,
                    Opt::YInc,
                    Opt::AOffset,
                    Opt::XOffset,
                    Opt::YOffset,
                ]
            }

            fn input_buffer_roles() -> &'static [BufferRole] {
                &[BufferRole::X, BufferRole::Y, BufferRole::A]
            }

            fn output_buffer_roles() -> &'static [BufferRole] {
                A_ROLE
            }

            fn buffer_size(role: BufferRole, args: &Arguments<T>) -> usize {
                match role {
                    BufferRole::A => {
                        matrix_size(args.layout, args.m, args.n, args.a_ld, args.a_offset)
                    }
                    BufferRole::X => x_of(args.m, args),
                    BufferRole::Y => y_of(args.n, args),
                    _ => 0,
                }
            }

            fn default_leading_dimension(ld: LeadDim, args: &Arguments<T>) -> Option<usize> {
                match ld {
                    LeadDim::A => Some(args.layout.leading_dim(args.m, args.n)),
                    _ => None,
                }
            }

            fn run_primary(
                args: &Arguments<T>,
                b: &mut Buffers<T>,
                queue: &mut Queue,
            ) -> Result<()> {
                precheck::<Self, T>(args, b)?;
                primary($primary(
                    queue,
                    args.layout,
                    args.m,
                    args.n,
                    args.alpha,
                    &b.x_vec,
                    args.x_offset,
                    args.x_inc,
                    &b.y_vec,
                    args.y_offset,
                    args.y_inc,
                    &mut b.a_mat,
                    args.a_offset,
                    args.a_ld,
                ))
            }

            fn run_reference(
                backend: BackendId,
                args: &Arguments<T>,
                b: &mut Buffers<T>,
            ) -> Result<()> {
                precheck::<Self, T>(args, b)?;
                match backend {
                    #[cfg(feature = "naive")]
                    BackendId::Naive => {
                        naive::$naive(
                            naive::layout_code(args.layout),
                            args.m,
                            args.n,
                            args.alpha,
                            &b.x_vec,
                            args.x_offset,
                            args.x_inc,
                            &b.y_vec,
                            args.y_offset,
                            args.y_inc,
                            &mut b.a_mat,
                            args.a_offset,
                            args.a_ld,
                        );
                        Ok(())
                    }
                    #[cfg(feature = "cblas")]
                    BackendId::Cblas => cblas::$cblas(
                        args.layout,
                        args.m,
                        args.n,
                        args.alpha,
                        &b.x_vec,
                        args.x_offset,
                        args.x_inc,
                        &b.y_vec,
                        args.y_offset,
                        args.y_inc,
                        &mut b.a_mat,
                        args.a_offset,
                        args.a_ld,
                    ),
                    #[allow(unreachable_patterns)]
                    other => Err(not_compiled(other)),
                }
            }

            fn result_extent(args: &Arguments<T>) -> (usize, Option<usize>) {
                (args.m, Some(args.n))
            }

            fn result_index(args: &Arguments<T>, i: usize, j: Option<usize>) -> usize {
                a_index(args, i, j)
            }

            fn flop_count(args: &Arguments<T>) -> usize {
                2 * args.m * args.n
            }

            fn byte_count(args: &Arguments<T>) -> usize {
                bytes::<T>(2 * args.m * args.n + args.m + args.n)
            }
        }
    };
}

general_rank1!(
    /// A := alpha * x * y^T + A (real)
    Xger, "ger", BackendReal,
    primary = level2::ger, naive = ger, cblas = ger
);

general_rank1!(
    /// A := alpha * x * y^T + A (complex, unconjugated)
    Xgeru, "geru", BackendComplex,
    primary = level2::geru, naive = ger, cblas = geru
);

general_rank1!(
    /// A := alpha * x * y^H + A
    Xgerc, "gerc", BackendComplex,
    primary = level2::gerc, naive = gerc, cblas = gerc
);

// ============================================================================
// SYR / HER / SPR / HPR
// ============================================================================

fn rank1_flops(n: usize) -> usize {
    3 * packed_len(n)
}

fn rank2_flops(n: usize) -> usize {
    5 * packed_len(n)
}

/// Rank-1 update of a dense symmetric or Hermitian A.
macro_rules! symmetric_rank1 {
    (
        $(#[$doc:meta])*
        $name:ident, $label:literal, $bound:ident, alpha = $alpha:path,
        primary = $primary:path, naive = $naive:ident, cblas = $cblas:ident
    ) => {
        $(#[$doc])*
        pub struct $name;

        impl<T: $bound> Routine<T> for $name {
            const NAME: &'static str = $label;

            fn operation_level() -> BlasLevel {
                BlasLevel::Two
            }

            fn required_options() -> &'static [Opt] {
                &[
                    Opt::Layout,
                    Opt::Triangle,
                    Opt::N,
                    Opt::Alpha,
                    Opt::ALeadDim,
                    Opt::XInc,
                    Opt::AOffset,
                    Opt::XOffset,
                ]
            }

            fn input_buffer_roles() -> &'static [BufferRole] {
                &[BufferRole::X, BufferRole::A]
            }

            fn output_buffer_roles() -> &'static [BufferRole] {
                A_ROLE
            }

            fn buffer_size(role: BufferRole, args: &Arguments<T>) -> usize {
                match role {
                    BufferRole::A => square_a(args),
                    BufferRole::X => x_of(args.n, args),
                    _ => 0,
                }
            }

            fn default_leading_dimension(ld: LeadDim, args: &Arguments<T>) -> Option<usize> {
                square_lead(ld, args)
            }

            fn run_primary(
                args: &Arguments<T>,
                b: &mut Buffers<T>,
                queue: &mut Queue,
            ) -> Result<()> {
                precheck::<Self, T>(args, b)?;
                primary($primary(
                    queue,
                    args.layout,
                    args.triangle,
                    args.n,
                    $alpha(args.alpha),
                    &b.x_vec,
                    args.x_offset,
                    args.x_inc,
                    &mut b.a_mat,
                    args.a_offset,
                    args.a_ld,
                ))
            }

            fn run_reference(
                backend: BackendId,
                args: &Arguments<T>,
                b: &mut Buffers<T>,
            ) -> Result<()> {
                precheck::<Self, T>(args, b)?;
                match backend {
                    #[cfg(feature = "naive")]
                    BackendId::Naive => {
                        naive::$naive(
                            naive::layout_code(args.layout),
                            naive::triangle_code(args.triangle),
                            args.n,
                            $alpha(args.alpha),
                            &b.x_vec,
                            args.x_offset,
                            args.x_inc,
                            &mut b.a_mat,
                            args.a_offset,
                            args.a_ld,
                        );
                        Ok(())
                    }
                    #[cfg(feature = "cblas")]
                    BackendId::Cblas => cblas::$cblas(
                        args.layout,
                        args.triangle,
                        args.n,
                        $alpha(args.alpha),
                        &b.x_vec,
                        args.x_offset,
                        args.x_inc,
                        &mut b.a_mat,
                        args.a_offset,
                        args.a_ld,
                    ),
                    #[allow(unreachable_patterns)]
                    other => Err(not_compiled(other)),
                }
            }

            fn result_extent(args: &Arguments<T>) -> (usize, Option<usize>) {
                (args.n, Some(args.n))
            }

            fn result_index(args: &Arguments<T>, i: usize, j: Option<usize>) -> usize {
                a_index(args, i, j)
            }

            fn flop_count(args: &Arguments<T>) -> usize {
                rank1_flops(args.n)
            }

            fn byte_count(args: &Arguments<T>) -> usize {
                bytes::<T>(args.n * (args.n + 1) + args.n)
            }
        }
    };
}

symmetric_rank1!(
    /// A := alpha * x * x^T + A, A symmetric
    Xsyr, "syr", BackendReal, alpha = as_given,
    primary = level2::syr, naive = syr, cblas = syr
);

symmetric_rank1!(
    /// A := alpha * x * x^H + A, A Hermitian, alpha real
    Xher, "her", BackendComplex, alpha = real_part,
    primary = level2::her, naive = her, cblas = her
);

/// Rank-1 update of a packed symmetric or Hermitian AP.
macro_rules! packed_rank1 {
    (
        $(#[$doc:meta])*
        $name:ident, $label:literal, $bound:ident, alpha = $alpha:path,
        primary = $primary:path, naive = $naive:ident, cblas = $cblas:ident
    ) => {
        $(#[$doc])*
        pub struct $name;

        impl<T: $bound> Routine<T> for $name {
            const NAME: &'static str = $label;

            fn operation_level() -> BlasLevel {
                BlasLevel::Two
            }

            fn required_options() -> &'static [Opt] {
                &[
                    Opt::Layout,
                    Opt::Triangle,
                    Opt::N,
                    Opt::Alpha,
                    Opt::XInc,
                    Opt::APOffset,
                    Opt::XOffset,
                ]
            }

            fn input_buffer_roles() -> &'static [BufferRole] {
                &[BufferRole::X, BufferRole::AP]
            }

            fn output_buffer_roles() -> &'static [BufferRole] {
                AP_ROLE
            }

            fn buffer_size(role: BufferRole, args: &Arguments<T>) -> usize {
                match role {
                    BufferRole::AP => packed_ap(args),
                    BufferRole::X => x_of(args.n, args),
                    _ => 0,
                }
            }

            fn run_primary(
                args: &Arguments<T>,
                b: &mut Buffers<T>,
                queue: &mut Queue,
            ) -> Result<()> {
                precheck::<Self, T>(args, b)?;
                primary($primary(
                    queue,
                    args.layout,
                    args.triangle,
                    args.n,
                    $alpha(args.alpha),
                    &b.x_vec,
                    args.x_offset,
                    args.x_inc,
                    &mut b.ap_mat,
                    args.ap_offset,
                ))
            }

            fn run_reference(
                backend: BackendId,
                args: &Arguments<T>,
                b: &mut Buffers<T>,
            ) -> Result<()> {
                precheck::<Self, T>(args, b)?;
                match backend {
                    #[cfg(feature = "naive")]
                    BackendId::Naive => {
                        naive::$naive(
                            naive::layout_code(args.layout),
                            naive::triangle_code(args.triangle),
                            args.n,
                            $alpha(args.alpha),
                            &b.x_vec,
                            args.x_offset,
                            args.x_inc,
                            &mut b.ap_mat,
                            args.ap_offset,
                        );
                        Ok(())
                    }
                    #[cfg(feature = "cblas")]
                    BackendId::Cblas => cblas::$cblas(
                        args.layout,
                        args.triangle,
                        args.n,
                        $alpha(args.alpha),
                        &b.x_vec,
                        args.x_offset,
                        args.x_inc,
                        &mut b.ap_mat,
                        args.ap_offset,
                    ),
                    #[allow(unreachable_patterns)]
                    other => Err(not_compiled(other)),
                }
            }

            fn result_extent(args: &Arguments<T>) -> (usize, Option<usize>) {
                (packed_len(args.n), None)
            }

            fn result_index(args: &Arguments<T>, i: usize, _j: Option<usize>) -> usize {
                args.ap_offset + i
            }

            fn flop_count(args: &Arguments<T>) -> usize {
                rank1_flops(args.n)
            }

            fn byte_count(args: &Arguments<T>) -> usize {
                bytes::<T>(args.n * (args.n + 1) + args.n)
            }
        }
    };
}

packed_rank1!(
    /// AP := alpha * x * x^T + AP, AP symmetric packed
    Xspr, "spr", BackendReal, alpha = as_given,
    primary = level2::spr, naive = spr, cblas = spr
);

packed_rank1!(
    /// AP := alpha * x * x^H + AP, AP Hermitian packed, alpha real
    Xhpr, "hpr", BackendComplex, alpha = real_part,
    primary = level2::hpr, naive = hpr, cblas = hpr
);

// ============================================================================
// SYR2 / HER2 / SPR2 / HPR2
// ============================================================================

/// Rank-2 update of a dense symmetric or Hermitian A.
macro_rules! symmetric_rank2 {
    (
        $(#[$doc:meta])*
        $name:ident, $label:literal, $bound:ident,
        primary = $primary:path, naive = $naive:ident, cblas = $cblas:ident
    ) => {
        $(#[$doc])*
        pub struct $name;

        impl<T: $bound> Routine<T> for $name {
            const NAME: &'static str = $label;

            fn operation_level() -> BlasLevel {
                BlasLevel::Two
            }

            fn required_options() -> &'static [Opt] {
                &[
                    Opt::Layout,
                    Opt::Triangle,
                    Opt::N,
                    Opt::Alpha,
                    Opt::ALeadDim,
                    Opt::XInc,
                    Opt::YInc,
                    Opt::AOffset,
                    Opt::XOffset,
                    Opt::YOffset,
                ]
            }

            fn input_buffer_roles() -> &'static [BufferRole] {
                &[BufferRole::X, BufferRole::Y, BufferRole::A]
            }

            fn output_buffer_roles() -> &'static [BufferRole] {
                A_ROLE
            }

            fn buffer_size(role: BufferRole, args: &Arguments<T>) -> usize {
                match role {
                    BufferRole::A => square_a(args),
                    BufferRole::X => x_of(args.n, args),
                    BufferRole::Y => y_of(args.n, args),
                    _ => 0,
                }
            }

            fn default_leading_dimension(ld: LeadDim, args: &Arguments<T>) -> Option<usize> {
                square_lead(ld, args)
            }

            fn run_primary(
                args: &Arguments<T>,
                b: &mut Buffers<T>,
                queue: &mut Queue,
            ) -> Result<()> {
                precheck::<Self, T>(args, b)?;
                primary($primary(
                    queue,
                    args.layout,
                    args.triangle,
                    args.n,
                    args.alpha,
                    &b.x_vec,
                    args.x_offset,
                    args.x_inc,
                    &b.y_vec,
                    args.y_offset,
                    args.y_inc,
                    &mut b.a_mat,
                    args.a_offset,
                    args.a_ld,
                ))
            }

            fn run_reference(
                backend: BackendId,
                args: &Arguments<T>,
                b: &mut Buffers<T>,
            ) -> Result<()> {
                precheck::<Self, T>(args, b)?;
                match backend {
                    #[cfg(feature = "naive")]
                    BackendId::Naive => {
                        naive::$naive(
                            naive::layout_code(args.layout),
                            naive::triangle_code(args.triangle),
                            args.n,
                            args.alpha,
                            &b.x_vec,
                            args.x_offset,
                            args.x_inc,
                            &b.y_vec,
                            args.y_offset,
                            args.y_inc,
                            &mut b.a_mat,
                            args.a_offset,
                            args.a_ld,
                        );
                        Ok(())
                    }
                    #[cfg(feature = "cblas")]
                    BackendId::Cblas => cblas::$cblas(
                        args.layout,
                        args.triangle,
                        args.n,
                        args.alpha,
                        &b.x_vec,
                        args.x_offset,
                        args.x_inc,
                        &b.y_vec,
                        args.y_offset,
                        args.y_inc,
                        &mut b.a_mat,
                        args.a_offset,
                        args.a_ld,
                    ),
                    #[allow(unreachable_patterns)]
                    other => Err(not_compiled(other)),
                }
            }

            fn result_extent(args: &Arguments<T>) -> (usize, Option<usize>) {
                (args.n, Some(args.n))
            }

            fn result_index(args: &Arguments<T>, i: usize, j: Option<usize>) -> usize {
                a_index(args, i, j)
            }

            fn flop_count(args: &Arguments<T>) -> usize {
                rank2_flops(args.n)
            }

            fn byte_count(args: &Arguments<T>) -> usize {
                bytes::<T>(args.n * (args.n + 1) + 2 * args.n)
            }
        }
    };
}

symmetric_rank2!(
    /// A := alpha * x * y^T + alpha * y * x^T + A, A symmetric
    Xsyr2, "syr2", BackendReal,
    primary = level2::syr2, naive = syr2, cblas = syr2
);

symmetric_rank2!(
    /// A := alpha * x * y^H + conj(alpha) * y * x^H + A, A Hermitian
    Xher2, "her2", BackendComplex,
    primary = level2::her2, naive = her2, cblas = her2
);

/// Rank-2 update of a packed symmetric or Hermitian AP.
macro_rules! packed_rank2 {
    (
        $(#[$doc:meta])*
        $name:ident, $label:literal, $bound:ident,
        primary = $primary:path, naive = $naive:ident, cblas = $cblas:ident
    ) => {
        $(#[$doc])*
        pub struct $name;

        impl<T: $bound> Routine<T> for $name {
            const NAME: &'static str = $label;

            fn operation_level() -> BlasLevel {
                BlasLevel::Two
            }

            fn required_options() -> &'static [Opt] {
                &[
                    Opt::Layout,
                    Opt::Triangle,
                    Opt::N,
                    Opt::Alpha,
                    Opt::XInc,
                    Opt::YInc,
                    Opt::APOffset,
                    Opt::XOffset,
                    Opt::YOffset,
                ]
            }

            fn input_buffer_roles() -> &'static [BufferRole] {
                &[BufferRole::X, BufferRole::Y, BufferRole::AP]
            }

            fn output_buffer_roles() -> &'static [BufferRole] {
                AP_ROLE
            }

            fn buffer_size(role: BufferRole, args: &Arguments<T>) -> usize {
                match role {
                    BufferRole::AP => packed_ap(args),
                    BufferRole::X => x_of(args.n, args),
                    BufferRole::Y => y_of(args.n, args),
                    _ => 0,
                }
            }

            fn run_primary(
                args: &Arguments<T>,
                b: &mut Buffers<T>,
                queue: &mut Queue,
            ) -> Result<()> {
                precheck::<Self, T>(args, b)?;
                primary($primary(
                    queue,
                    args.layout,
                    args.triangle,
                    args.n,
                    args.alpha,
                    &b.x_vec,
                    args.x_offset,
                    args.x_inc,
                    &b.y_vec,
                    args.y_offset,
                    args.y_inc,
                    &mut b.ap_mat,
                    args.ap_offset,
                ))
            }

            fn run_reference(
                backend: BackendId,
                args: &Arguments<T>,
                b: &mut Buffers<T>,
            ) -> Result<()> {
                precheck::<Self, T>(args, b)?;
                match backend {
                    #[cfg(feature = "naive")]
                    BackendId::Naive => {
                        naive::$naive(
                            naive::layout_code(args.layout),
                            naive::triangle_code(args.triangle),
                            args.n,
                            args.alpha,
                            &b.x_vec,
                            args.x_offset,
                            args.x_inc,
                            &b.y_vec,
                            args.y_offset,
                            args.y_inc,
                            &mut b.ap_mat,
                            args.ap_offset,
                        );
                        Ok(())
                    }
                    #[cfg(feature = "cblas")]
                    BackendId::Cblas => cblas::$cblas(
                        args.layout,
                        args.triangle,
                        args.n,
                        args.alpha,
                        &b.x_vec,
                        args.x_offset,
                        args.x_inc,
                        &b.y_vec,
                        args.y_offset,
                        args.y_inc,
                        &mut b.ap_mat,
                        args.ap_offset,
                    ),
                    #[allow(unreachable_patterns)]
                    other => Err(not_compiled(other)),
                }
            }

            fn result_extent(args: &Arguments<T>) -> (usize, Option<usize>) {
                (packed_len(args.n), None)
            }

            fn result_index(args: &Arguments<T>, i: usize, _j: Option<usize>) -> usize {
                args.ap_offset + i
            }

            fn flop_count(args: &Arguments<T>) -> usize {
                rank2_flops(args.n)
            }

            fn byte_count(args: &Arguments<T>) -> usize {
                bytes::<T>(args.n * (args.n + 1) + 2 * args.n)
            }
        }
    };
}

packed_rank2!(
    /// AP := alpha * x * y^T + alpha * y * x^T + AP, AP symmetric packed
    Xspr2, "spr2", BackendReal,
    primary = level2::spr2, naive = spr2, cblas = spr2
);

packed_rank2!(
    /// AP := alpha * x * y^H + conj(alpha) * y * x^H + AP, AP Hermitian packed
    Xhpr2, "hpr2", BackendComplex,
    primary = level2::hpr2, naive = hpr2, cblas = hpr2
);

#[cfg(test)]
mod tests {
    use super::*;
    use blasprobe_core::{Complex32, Complex64, Layout, Triangle};

    #[test]
    fn test_gemv_sizes_follow_transpose() {
        let mut args = Arguments::<f32>::new()
            .with_layout(Layout::ColMajor)
            .with_a_transpose(Transpose::Yes)
            .with_m(3)
            .with_n(5)
            .with_x_inc(2)
            .with_y_inc(1);
        <Xgemv as Routine<f32>>::apply_default_leading_dimensions(&mut args);
        <Xgemv as Routine<f32>>::apply_derived_sizes(&mut args);
        assert_eq!(args.a_ld, 3);
        assert_eq!(args.size(BufferRole::A), 15);
        // op(A) is 5 x 3, so x has m entries and y has n
        assert_eq!(args.size(BufferRole::X), 6);
        assert_eq!(args.size(BufferRole::Y), 5);
        assert_eq!(<Xgemv as Routine<f32>>::result_extent(&args), (5, None));
    }

    #[test]
    fn test_band_default_lead_dim() {
        let mut args = Arguments::<f64>::new()
            .with_layout(Layout::RowMajor)
            .with_m(6)
            .with_n(6)
            .with_kl(1)
            .with_ku(2);
        <Xgbmv as Routine<f64>>::apply_default_leading_dimensions(&mut args);
        <Xgbmv as Routine<f64>>::apply_derived_sizes(&mut args);
        assert_eq!(args.a_ld, 4);
        assert_eq!(args.size(BufferRole::A), 24);
    }

    #[test]
    fn test_supplied_lead_dim_is_kept() {
        let mut args = Arguments::<Complex32>::new().with_n(4).with_a_ld(7);
        <Xhemv as Routine<Complex32>>::apply_default_leading_dimensions(&mut args);
        assert_eq!(args.a_ld, 7);
    }

    #[test]
    fn test_packed_routines_have_no_lead_dim() {
        let args = Arguments::<Complex64>::new().with_n(4);
        for ld in LeadDim::ALL {
            assert_eq!(<Xhpr2 as Routine<Complex64>>::default_leading_dimension(ld, &args), None);
        }
        assert!(<Xhpr2 as Routine<Complex64>>::applicable_a_transposes(&Transpose::ALL).is_empty());
    }

    #[test]
    fn test_hpr2_cost_for_order_four() {
        let args = Arguments::<Complex64>::new().with_n(4);
        assert_eq!(<Xhpr2 as Routine<Complex64>>::flop_count(&args), 50);
        assert_eq!(<Xhpr2 as Routine<Complex64>>::byte_count(&args), 28 * 16);
        let single = Arguments::<Complex32>::new().with_n(4);
        assert_eq!(<Xhpr2 as Routine<Complex32>>::byte_count(&single), 28 * 8);
    }

    #[test]
    fn test_packed_extent_and_index() {
        let mut args = Arguments::<f32>::new().with_n(4).with_ap_offset(3);
        <Xspr as Routine<f32>>::apply_derived_sizes(&mut args);
        assert_eq!(args.size(BufferRole::AP), 13);
        assert_eq!(<Xspr as Routine<f32>>::result_extent(&args), (10, None));
        assert_eq!(<Xspr as Routine<f32>>::result_index(&args, 9, None), 12);
    }

    #[test]
    fn test_rank_update_index_is_layout_aware() {
        let row = Arguments::<f64>::new()
            .with_layout(Layout::RowMajor)
            .with_a_ld(5)
            .with_a_offset(2);
        let col = row.clone().with_layout(Layout::ColMajor);
        assert_eq!(<Xger as Routine<f64>>::result_index(&row, 1, Some(3)), 10);
        assert_eq!(<Xger as Routine<f64>>::result_index(&col, 1, Some(3)), 18);
    }

    #[test]
    fn test_trsv_prepare_conditions_matrix() {
        let mut args = Arguments::<f32>::new()
            .with_layout(Layout::RowMajor)
            .with_triangle(Triangle::Lower)
            .with_n(3);
        <Xtrsv as Routine<f32>>::apply_default_leading_dimensions(&mut args);
        <Xtrsv as Routine<f32>>::apply_derived_sizes(&mut args);
        let mut b = Buffers::allocate(&args, &[BufferRole::A, BufferRole::X]);
        b.a_mat.iter_mut().for_each(|v| *v = 0.9);
        <Xtrsv as Routine<f32>>::prepare_inputs(&args, &mut b);
        assert_eq!(b.a_mat[0], 2.0);
        assert_eq!(b.a_mat[4], 2.0);
        assert!((b.a_mat[3] - 0.3).abs() < 1e-6);
    }

    #[test]
    fn test_short_lead_dim_rejected_before_backend() {
        let mut args = Arguments::<f64>::new()
            .with_layout(Layout::RowMajor)
            .with_m(3)
            .with_n(4)
            .with_a_ld(2);
        <Xgemv as Routine<f64>>::apply_derived_sizes(&mut args);
        let mut b = Buffers::allocate(&args, &<Xgemv as Routine<f64>>::buffer_roles());
        for backend in crate::backend::available_backends() {
            let err = <Xgemv as Routine<f64>>::run_reference(backend, &args, &mut b).unwrap_err();
            assert!(matches!(err, blasprobe_core::ProbeError::UnsupportedConfiguration(_)));
        }
    }
}
