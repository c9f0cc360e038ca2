//! Level 3 descriptors: matrix-matrix routines.

use super::common::{
    as_given, bytes, condition_triangle, filter_transposes, matrix_index, matrix_size, precheck,
    primary, real_part, require_transpose, side_order, stored_dims,
};
#[cfg(feature = "cblas")]
use crate::backend::cblas;
#[cfg(feature = "naive")]
use crate::backend::naive;
use crate::backend::{not_compiled, BackendComplex, BackendId, BackendScalar};
use crate::descriptor::{BlasLevel, LeadDim, Routine};
use blasprobe_blas::level3;
use blasprobe_core::{packed_len, Arguments, BufferRole, Buffers, Opt, Queue, Result, Transpose};

const ABC_INPUTS: &[BufferRole] = &[BufferRole::A, BufferRole::B, BufferRole::C];
const C_ROLE: &[BufferRole] = &[BufferRole::C];

/// Transposes a real symmetric rank-k update accepts.
const SYMMETRIC_TRANSPOSES: &[Transpose] = &[Transpose::No, Transpose::Yes];
/// Transposes a Hermitian rank-k update accepts.
const HERMITIAN_TRANSPOSES: &[Transpose] = &[Transpose::No, Transpose::Conjugate];

fn c_general<T>(args: &Arguments<T>) -> usize {
    matrix_size(args.layout, args.m, args.n, args.c_ld, args.c_offset)
}

fn c_index<T>(args: &Arguments<T>, i: usize, j: Option<usize>) -> usize {
    matrix_index(args.layout, args.c_ld, args.c_offset, i, j.unwrap_or(0))
}

// ============================================================================
// GEMM
// ============================================================================

/// C := alpha * op(A) * op(B) + beta * C
pub struct Xgemm;

impl<T: BackendScalar> Routine<T> for Xgemm {
    const NAME: &'static str = "gemm";

    fn operation_level() -> BlasLevel {
        BlasLevel::Three
    }

    fn required_options() -> &'static [Opt] {
        &[
            Opt::Layout,
            Opt::ATransp,
            Opt::BTransp,
            Opt::M,
            Opt::N,
            Opt::K,
            Opt::Alpha,
            Opt::Beta,
            Opt::ALeadDim,
            Opt::BLeadDim,
            Opt::CLeadDim,
            Opt::AOffset,
            Opt::BOffset,
            Opt::COffset,
        ]
    }

    fn input_buffer_roles() -> &'static [BufferRole] {
        ABC_INPUTS
    }

    fn output_buffer_roles() -> &'static [BufferRole] {
        C_ROLE
    }

    fn buffer_size(role: BufferRole, args: &Arguments<T>) -> usize {
        match role {
            BufferRole::A => {
                let (rows, cols) = stored_dims(args.a_transpose, args.m, args.k);
                matrix_size(args.layout, rows, cols, args.a_ld, args.a_offset)
            }
            BufferRole::B => {
                let (rows, cols) = stored_dims(args.b_transpose, args.k, args.n);
                matrix_size(args.layout, rows, cols, args.b_ld, args.b_offset)
            }
            BufferRole::C => c_general(args),
            _ => 0,
        }
    }

    fn default_leading_dimension(ld: LeadDim, args: &Arguments<T>) -> Option<usize> {
        let (rows, cols) = match ld {
            LeadDim::A => stored_dims(args.a_transpose, args.m, args.k),
            LeadDim::B => stored_dims(args.b_transpose, args.k, args.n),
            LeadDim::C => (args.m, args.n),
        };
        Some(args.layout.leading_dim(rows, cols))
    }

    fn applicable_a_transposes(candidates: &[Transpose]) -> Vec<Transpose> {
        candidates.to_vec()
    }

    fn applicable_b_transposes(candidates: &[Transpose]) -> Vec<Transpose> {
        candidates.to_vec()
    }

    fn run_primary(args: &Arguments<T>, b: &mut Buffers<T>, queue: &mut Queue) -> Result<()> {
        precheck::<Self, T>(args, b)?;
        primary(level3::gemm(
            queue,
            args.layout,
            args.a_transpose,
            args.b_transpose,
            args.m,
            args.n,
            args.k,
            args.alpha,
            &b.a_mat,
            args.a_offset,
            args.a_ld,
            &b.b_mat,
            args.b_offset,
            args.b_ld,
            args.beta,
            &mut b.c_mat,
            args.c_offset,
            args.c_ld,
        ))
    }

    fn run_reference(backend: BackendId, args: &Arguments<T>, b: &mut Buffers<T>) -> Result<()> {
        precheck::<Self, T>(args, b)?;
        match backend {
            #[cfg(feature = "naive")]
            BackendId::Naive => {
                naive::gemm(
                    naive::layout_code(args.layout),
                    naive::transpose_code(args.a_transpose),
                    naive::transpose_code(args.b_transpose),
                    args.m,
                    args.n,
                    args.k,
                    args.alpha,
                    &b.a_mat,
                    args.a_offset,
                    args.a_ld,
                    &b.b_mat,
                    args.b_offset,
                    args.b_ld,
                    args.beta,
                    &mut b.c_mat,
                    args.c_offset,
                    args.c_ld,
                );
                Ok(())
            }
            #[cfg(feature = "cblas")]
            BackendId::Cblas => cblas::gemm(
                args.layout,
                args.a_transpose,
                args.b_transpose,
                args.m,
                args.n,
                args.k,
                args.alpha,
                &b.a_mat,
                args.a_offset,
                args.a_ld,
                &b.b_mat,
                args.b_offset,
                args.b_ld,
                args.beta,
                &mut b.c_mat,
                args.c_offset,
                args.c_ld,
            ),
            #[allow(unreachable_patterns)]
            other => Err(not_compiled(other)),
        }
    }

    fn result_extent(args: &Arguments<T>) -> (usize, Option<usize>) {
        (args.m, Some(args.n))
    }

    fn result_index(args: &Arguments<T>, i: usize, j: Option<usize>) -> usize {
        c_index(args, i, j)
    }

    fn flop_count(args: &Arguments<T>) -> usize {
        2 * args.m * args.n * args.k
    }

    fn byte_count(args: &Arguments<T>) -> usize {
        let (m, n, k) = (args.m, args.n, args.k);
        bytes::<T>(m * k + k * n + 2 * m * n)
    }
}

// ============================================================================
// SYMM / HEMM
// ============================================================================

macro_rules! symmetric_mm {
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
                BlasLevel::Three
            }

            fn required_options() -> &'static [Opt] {
                &[
                    Opt::Layout,
                    Opt::Side,
                    Opt::Triangle,
                    Opt::M,
                    Opt::N,
                    Opt::Alpha,
                    Opt::Beta,
                    Opt::ALeadDim,
                    Opt::BLeadDim,
                    Opt::CLeadDim,
                    Opt::AOffset,
                    Opt::BOffset,
                    Opt::COffset,
                ]
            }

            fn input_buffer_roles() -> &'static [BufferRole] {
                ABC_INPUTS
            }

            fn output_buffer_roles() -> &'static [BufferRole] {
                C_ROLE
            }

            fn buffer_size(role: BufferRole, args: &Arguments<T>) -> usize {
                let k = side_order(args.side, args.m, args.n);
                match role {
                    BufferRole::A => matrix_size(args.layout, k, k, args.a_ld, args.a_offset),
                    BufferRole::B => {
                        matrix_size(args.layout, args.m, args.n, args.b_ld, args.b_offset)
                    }
                    BufferRole::C => c_general(args),
                    _ => 0,
                }
            }

            fn default_leading_dimension(ld: LeadDim, args: &Arguments<T>) -> Option<usize> {
                match ld {
                    LeadDim::A => Some(side_order(args.side, args.m, args.n)),
                    LeadDim::B | LeadDim::C => Some(args.layout.leading_dim(args.m, args.n)),
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
                    args.side,
                    args.triangle,
                    args.m,
                    args.n,
                    args.alpha,
                    &b.a_mat,
                    args.a_offset,
                    args.a_ld,
                    &b.b_mat,
                    args.b_offset,
                    args.b_ld,
                    args.beta,
                    &mut b.c_mat,
                    args.c_offset,
                    args.c_ld,
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
                            naive::side_code(args.side),
                            naive::triangle_code(args.triangle),
                            args.m,
                            args.n,
                            args.alpha,
                            &b.a_mat,
                            args.a_offset,
                            args.a_ld,
                            &b.b_mat,
                            args.b_offset,
                            args.b_ld,
                            args.beta,
                            &mut b.c_mat,
                            args.c_offset,
                            args.c_ld,
                        );
                        Ok(())
                    }
                    #[cfg(feature = "cblas")]
                    BackendId::Cblas => cblas::$cblas(
                        args.layout,
                        args.side,
                        args.triangle,
                        args.m,
                        args.n,
                        args.alpha,
                        &b.a_mat,
                        args.a_offset,
                        args.a_ld,
                        &b.b_mat,
                        args.b_offset,
                        args.b_ld,
                        args.beta,
                        &mut b.c_mat,
                        args.c_offset,
                        args.c_ld,
                    ),
                    #[allow(unreachable_patterns)]
                    other => Err(not_compiled(other)),
                }
            }

            fn result_extent(args: &Arguments<T>) -> (usize, Option<usize>) {
                (args.m, Some(args.n))
            }

            fn result_index(args: &Arguments<T>, i: usize, j: Option<usize>) -> usize {
                c_index(args, i, j)
            }

            fn flop_count(args: &Arguments<T>) -> usize {
                2 * args.m * args.n * side_order(args.side, args.m, args.n)
            }

            fn byte_count(args: &Arguments<T>) -> usize {
                let k = side_order(args.side, args.m, args.n);
                bytes::<T>(k * k + 3 * args.m * args.n)
            }
        }
    };
}

symmetric_mm!(
    /// C := alpha * A * B + beta * C (or B * A), A symmetric
    Xsymm, "symm", BackendScalar,
    primary = level3::symm, naive = symm, cblas = symm
);

symmetric_mm!(
    /// C := alpha * A * B + beta * C (or B * A), A Hermitian
    Xhemm, "hemm", BackendComplex,
    primary = level3::hemm, naive = hemm, cblas = hemm
);

// ============================================================================
// SYRK / HERK / SYR2K / HER2K
// ============================================================================

/// Stored A (and B) of a rank-k update: `op(A)` is `n x k`.
fn rank_k_operand<T>(args: &Arguments<T>, ld: usize, offset: usize) -> usize {
    let (rows, cols) = stored_dims(args.a_transpose, args.n, args.k);
    matrix_size(args.layout, rows, cols, ld, offset)
}

fn rank_k_lead<T>(ld: LeadDim, args: &Arguments<T>) -> Option<usize> {
    match ld {
        LeadDim::A | LeadDim::B => {
            let (rows, cols) = stored_dims(args.a_transpose, args.n, args.k);
            Some(args.layout.leading_dim(rows, cols))
        }
        LeadDim::C => Some(args.n),
    }
}

macro_rules! rank_k {
    (
        $(#[$doc:meta])*
        $name:ident, $label:literal, $bound:ident, transposes = $allowed:expr,
        alpha = $alpha:path, beta = $beta:path,
        primary = $primary:path, naive = $naive:ident, cblas = $cblas:ident
    ) => {
        $(#[$doc])*
        pub struct $name;

        impl<T: $bound> Routine<T> for $name {
            const NAME: &'static str = $label;

            fn operation_level() -> BlasLevel {
                BlasLevel::Three
            }

            fn required_options() -> &'static [Opt] {
                &[
                    Opt::Layout,
                    Opt::Triangle,
                    Opt::ATransp,
                    Opt::N,
                    Opt::K,
                    Opt::Alpha,
                    Opt::Beta,
                    Opt::ALeadDim,
                    Opt::CLeadDim,
                    Opt::AOffset,
                    Opt::COffset,
                ]
            }

            fn input_buffer_roles() -> &'static [BufferRole] {
                &[BufferRole::A, BufferRole::C]
            }

            fn output_buffer_roles() -> &'static [BufferRole] {
                C_ROLE
            }

            fn buffer_size(role: BufferRole, args: &Arguments<T>) -> usize {
                match role {
                    BufferRole::A => rank_k_operand(args, args.a_ld, args.a_offset),
                    BufferRole::C => {
                        matrix_size(args.layout, args.n, args.n, args.c_ld, args.c_offset)
                    }
                    _ => 0,
                }
            }

            fn default_leading_dimension(ld: LeadDim, args: &Arguments<T>) -> Option<usize> {
                rank_k_lead(ld, args)
            }

            fn applicable_a_transposes(candidates: &[Transpose]) -> Vec<Transpose> {
                filter_transposes(candidates, $allowed)
            }

            fn run_primary(
                args: &Arguments<T>,
                b: &mut Buffers<T>,
                queue: &mut Queue,
            ) -> Result<()> {
                precheck::<Self, T>(args, b)?;
                require_transpose($label, args.a_transpose, $allowed)?;
                primary($primary(
                    queue,
                    args.layout,
                    args.triangle,
                    args.a_transpose,
                    args.n,
                    args.k,
                    $alpha(args.alpha),
                    &b.a_mat,
                    args.a_offset,
                    args.a_ld,
                    $beta(args.beta),
                    &mut b.c_mat,
                    args.c_offset,
                    args.c_ld,
                ))
            }

            fn run_reference(
                backend: BackendId,
                args: &Arguments<T>,
                b: &mut Buffers<T>,
            ) -> Result<()> {
                require_transpose($label, args.a_transpose, $allowed)?;
                precheck::<Self, T>(args, b)?;
                match backend {
                    #[cfg(feature = "naive")]
                    BackendId::Naive => {
                        naive::$naive(
                            naive::layout_code(args.layout),
                            naive::triangle_code(args.triangle),
                            naive::transpose_code(args.a_transpose),
                            args.n,
                            args.k,
                            $alpha(args.alpha),
                            &b.a_mat,
                            args.a_offset,
                            args.a_ld,
                            $beta(args.beta),
                            &mut b.c_mat,
                            args.c_offset,
                            args.c_ld,
                        );
                        Ok(())
                    }
                    #[cfg(feature = "cblas")]
                    BackendId::Cblas => cblas::$cblas(
                        args.layout,
                        args.triangle,
                        args.a_transpose,
                        args.n,
                        args.k,
                        $alpha(args.alpha),
                        &b.a_mat,
                        args.a_offset,
                        args.a_ld,
                        $beta(args.beta),
                        &mut b.c_mat,
                        args.c_offset,
                        args.c_ld,
                    ),
                    #[allow(unreachable_patterns)]
                    other => Err(not_compiled(other)),
                }
            }

            fn result_extent(args: &Arguments<T>) -> (usize, Option<usize>) {
                (args.n, Some(args.n))
            }

            fn result_index(args: &Arguments<T>, i: usize, j: Option<usize>) -> usize {
                c_index(args, i, j)
            }

            fn flop_count(args: &Arguments<T>) -> usize {
                args.n * (args.n + 1) * args.k
            }

            fn byte_count(args: &Arguments<T>) -> usize {
                bytes::<T>(args.n * args.k + args.n * args.n)
            }
        }
    };
}

rank_k!(
    /// C := alpha * op(A) * op(A)^T + beta * C, C symmetric
    Xsyrk, "syrk", BackendScalar, transposes = SYMMETRIC_TRANSPOSES,
    alpha = as_given, beta = as_given,
    primary = level3::syrk, naive = syrk, cblas = syrk
);

rank_k!(
    /// C := alpha * op(A) * op(A)^H + beta * C, C Hermitian, alpha and beta real
    Xherk, "herk", BackendComplex, transposes = HERMITIAN_TRANSPOSES,
    alpha = real_part, beta = real_part,
    primary = level3::herk, naive = herk, cblas = herk
);

macro_rules! rank_2k {
    (
        $(#[$doc:meta])*
        $name:ident, $label:literal, $bound:ident, transposes = $allowed:expr,
        beta = $beta:path,
        primary = $primary:path, naive = $naive:ident, cblas = $cblas:ident
    ) => {
        $(#[$doc])*
        pub struct $name;

        impl<T: $bound> Routine<T> for $name {
            const NAME: &'static str = $label;

            fn operation_level() -> BlasLevel {
                BlasLevel::Three
            }

            fn required_options() -> &'static [Opt] {
                &[
                    Opt::Layout,
                    Opt::Triangle,
                    Opt::ATransp,
                    Opt::N,
                    Opt::K,
                    Opt::Alpha,
                    Opt::Beta,
                    Opt::ALeadDim,
                    Opt::BLeadDim,
                    Opt::CLeadDim,
                    Opt::AOffset,
                    Opt::BOffset,
                    Opt::COffset,
                ]
            }

            fn input_buffer_roles() -> &'static [BufferRole] {
                ABC_INPUTS
            }

            fn output_buffer_roles() -> &'static [BufferRole] {
                C_ROLE
            }

            fn buffer_size(role: BufferRole, args: &Arguments<T>) -> usize {
                match role {
                    BufferRole::A => rank_k_operand(args, args.a_ld, args.a_offset),
                    BufferRole::B => rank_k_operand(args, args.b_ld, args.b_offset),
                    BufferRole::C => {
                        matrix_size(args.layout, args.n, args.n, args.c_ld, args.c_offset)
                    }
                    _ => 0,
                }
            }

            fn default_leading_dimension(ld: LeadDim, args: &Arguments<T>) -> Option<usize> {
                rank_k_lead(ld, args)
            }

            fn applicable_a_transposes(candidates: &[Transpose]) -> Vec<Transpose> {
                filter_transposes(candidates, $allowed)
            }

            fn run_primary(
                args: &Arguments<T>,
                b: &mut Buffers<T>,
                queue: &mut Queue,
            ) -> Result<()> {
                precheck::<Self, T>(args, b)?;
                require_transpose($label, args.a_transpose, $allowed)?;
                primary($primary(
                    queue,
                    args.layout,
                    args.triangle,
                    args.a_transpose,
                    args.n,
                    args.k,
                    args.alpha,
                    &b.a_mat,
                    args.a_offset,
                    args.a_ld,
                    &b.b_mat,
                    args.b_offset,
                    args.b_ld,
                    $beta(args.beta),
                    &mut b.c_mat,
                    args.c_offset,
                    args.c_ld,
                ))
            }

            fn run_reference(
                backend: BackendId,
                args: &Arguments<T>,
                b: &mut Buffers<T>,
            ) -> Result<()> {
                require_transpose($label, args.a_transpose, $allowed)?;
                precheck::<Self, T>(args, b)?;
                match backend {
                    #[cfg(feature = "naive")]
                    BackendId::Naive => {
                        naive::$naive(
                            naive::layout_code(args.layout),
                            naive::triangle_code(args.triangle),
                            naive::transpose_code(args.a_transpose),
                            args.n,
                            args.k,
                            args.alpha,
                            &b.a_mat,
                            args.a_offset,
                            args.a_ld,
                            &b.b_mat,
                            args.b_offset,
                            args.b_ld,
                            $beta(args.beta),
                            &mut b.c_mat,
                            args.c_offset,
                            args.c_ld,
                        );
                        Ok(())
                    }
                    #[cfg(feature = "cblas")]
                    BackendId::Cblas => cblas::$cblas(
                        args.layout,
                        args.triangle,
                        args.a_transpose,
                        args.n,
                        args.k,
                        args.alpha,
                        &b.a_mat,
                        args.a_offset,
                        args.a_ld,
                        &b.b_mat,
                        args.b_offset,
                        args.b_ld,
                        $beta(args.beta),
                        &mut b.c_mat,
                        args.c_offset,
                        args.c_ld,
                    ),
                    #[allow(unreachable_patterns)]
                    other => Err(not_compiled(other)),
                }
            }

            fn result_extent(args: &Arguments<T>) -> (usize, Option<usize>) {
                (args.n, Some(args.n))
            }

            fn result_index(args: &Arguments<T>, i: usize, j: Option<usize>) -> usize {
                c_index(args, i, j)
            }

            fn flop_count(args: &Arguments<T>) -> usize {
                2 * args.n * (args.n + 1) * args.k
            }

            fn byte_count(args: &Arguments<T>) -> usize {
                bytes::<T>(2 * args.n * args.k + args.n * args.n)
            }
        }
    };
}

rank_2k!(
    /// C := alpha * op(A) * op(B)^T + alpha * op(B) * op(A)^T + beta * C, C symmetric
    Xsyr2k, "syr2k", BackendScalar, transposes = SYMMETRIC_TRANSPOSES,
    beta = as_given,
    primary = level3::syr2k, naive = syr2k, cblas = syr2k
);

rank_2k!(
    /// C := alpha * op(A) * op(B)^H + conj(alpha) * op(B) * op(A)^H + beta * C, beta real
    Xher2k, "her2k", BackendComplex, transposes = HERMITIAN_TRANSPOSES,
    beta = real_part,
    primary = level3::her2k, naive = her2k, cblas = her2k
);

// ============================================================================
// TRMM / TRSM
// ============================================================================

macro_rules! triangular_mm {
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
                BlasLevel::Three
            }

            fn required_options() -> &'static [Opt] {
                &[
                    Opt::Layout,
                    Opt::Side,
                    Opt::Triangle,
                    Opt::ATransp,
                    Opt::Diagonal,
                    Opt::M,
                    Opt::N,
                    Opt::Alpha,
                    Opt::ALeadDim,
                    Opt::BLeadDim,
                    Opt::AOffset,
                    Opt::BOffset,
                ]
            }

            fn input_buffer_roles() -> &'static [BufferRole] {
                &[BufferRole::A, BufferRole::B]
            }

            fn output_buffer_roles() -> &'static [BufferRole] {
                &[BufferRole::B]
            }

            fn buffer_size(role: BufferRole, args: &Arguments<T>) -> usize {
                let k = side_order(args.side, args.m, args.n);
                match role {
                    BufferRole::A => matrix_size(args.layout, k, k, args.a_ld, args.a_offset),
                    BufferRole::B => {
                        matrix_size(args.layout, args.m, args.n, args.b_ld, args.b_offset)
                    }
                    _ => 0,
                }
            }

            fn default_leading_dimension(ld: LeadDim, args: &Arguments<T>) -> Option<usize> {
                match ld {
                    LeadDim::A => Some(side_order(args.side, args.m, args.n)),
                    LeadDim::B => Some(args.layout.leading_dim(args.m, args.n)),
                    LeadDim::C => None,
                }
            }

            fn applicable_a_transposes(candidates: &[Transpose]) -> Vec<Transpose> {
                candidates.to_vec()
            }

            #[allow(unused_variables)]
            fn prepare_inputs(args: &Arguments<T>, b: &mut Buffers<T>) {
                $($prepare(args, side_order(args.side, args.m, args.n), &mut b.a_mat);)?
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
                    args.side,
                    args.triangle,
                    args.a_transpose,
                    args.diagonal,
                    args.m,
                    args.n,
                    args.alpha,
                    &b.a_mat,
                    args.a_offset,
                    args.a_ld,
                    &mut b.b_mat,
                    args.b_offset,
                    args.b_ld,
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
                            naive::side_code(args.side),
                            naive::triangle_code(args.triangle),
                            naive::transpose_code(args.a_transpose),
                            naive::diagonal_code(args.diagonal),
                            args.m,
                            args.n,
                            args.alpha,
                            &b.a_mat,
                            args.a_offset,
                            args.a_ld,
                            &mut b.b_mat,
                            args.b_offset,
                            args.b_ld,
                        );
                        Ok(())
                    }
                    #[cfg(feature = "cblas")]
                    BackendId::Cblas => cblas::$cblas(
                        args.layout,
                        args.side,
                        args.triangle,
                        args.a_transpose,
                        args.diagonal,
                        args.m,
                        args.n,
                        args.alpha,
                        &b.a_mat,
                        args.a_offset,
                        args.a_ld,
                        &mut b.b_mat,
                        args.b_offset,
                        args.b_ld,
                    ),
                    #[allow(unreachable_patterns)]
                    other => Err(not_compiled(other)),
                }
            }

            fn result_extent(args: &Arguments<T>) -> (usize, Option<usize>) {
                (args.m, Some(args.n))
            }

            fn result_index(args: &Arguments<T>, i: usize, j: Option<usize>) -> usize {
                matrix_index(args.layout, args.b_ld, args.b_offset, i, j.unwrap_or(0))
            }

            fn flop_count(args: &Arguments<T>) -> usize {
                args.m * args.n * side_order(args.side, args.m, args.n)
            }

            fn byte_count(args: &Arguments<T>) -> usize {
                let k = side_order(args.side, args.m, args.n);
                bytes::<T>(packed_len(k) + 2 * args.m * args.n)
            }
        }
    };
}

triangular_mm!(
    /// B := alpha * op(A) * B (or B * op(A)), A triangular
    Xtrmm, "trmm",
    primary = level3::trmm, naive = trmm, cblas = trmm
);

triangular_mm!(
    /// B := alpha * op(A)^-1 * B (or B * op(A)^-1), A triangular
    Xtrsm, "trsm",
    primary = level3::trsm, naive = trsm, cblas = trsm,
    prepare = condition_triangle
);

#[cfg(test)]
mod tests {
    use super::*;
    use blasprobe_core::{Complex32, Complex64, Layout, ProbeError, Side};

    fn derive<R: Routine<T>, T: BackendScalar>(mut args: Arguments<T>) -> Arguments<T> {
        R::apply_default_leading_dimensions(&mut args);
        R::apply_derived_sizes(&mut args);
        args
    }

    #[test]
    fn test_gemm_lead_dims_track_transposes() {
        let args = derive::<Xgemm, f64>(
            Arguments::new()
                .with_layout(Layout::RowMajor)
                .with_a_transpose(Transpose::Yes)
                .with_m(2)
                .with_n(3)
                .with_k(4),
        );
        // A stored 4 x 2, B stored 4 x 3, C 2 x 3
        assert_eq!((args.a_ld, args.b_ld, args.c_ld), (2, 3, 3));
        assert_eq!(args.size(BufferRole::A), 8);
        assert_eq!(args.size(BufferRole::B), 12);
        assert_eq!(args.size(BufferRole::C), 6);
    }

    #[test]
    fn test_gemm_cost() {
        let args = Arguments::<f32>::new().with_m(2).with_n(3).with_k(4);
        assert_eq!(<Xgemm as Routine<f32>>::flop_count(&args), 48);
        assert_eq!(<Xgemm as Routine<f32>>::byte_count(&args), (8 + 12 + 12) * 4);
    }

    #[test]
    fn test_right_side_uses_n_for_a() {
        let args = derive::<Xsymm, f32>(
            Arguments::new()
                .with_layout(Layout::ColMajor)
                .with_side(Side::Right)
                .with_m(5)
                .with_n(2),
        );
        assert_eq!(args.a_ld, 2);
        assert_eq!(args.size(BufferRole::A), 4);
        assert_eq!(args.b_ld, 5);
        assert_eq!(<Xsymm as Routine<f32>>::flop_count(&args), 40);
    }

    #[test]
    fn test_rank_k_transposes_are_filtered() {
        assert_eq!(
            <Xsyrk as Routine<f64>>::applicable_a_transposes(&Transpose::ALL),
            vec![Transpose::No, Transpose::Yes]
        );
        assert_eq!(
            <Xherk as Routine<Complex32>>::applicable_a_transposes(&Transpose::ALL),
            vec![Transpose::No, Transpose::Conjugate]
        );
        assert!(<Xher2k as Routine<Complex64>>::applicable_b_transposes(&Transpose::ALL).is_empty());
    }

    #[test]
    fn test_herk_rejects_plain_transpose() {
        let args = derive::<Xherk, Complex64>(
            Arguments::new()
                .with_layout(Layout::ColMajor)
                .with_a_transpose(Transpose::Yes)
                .with_n(3)
                .with_k(2),
        );
        let mut b = Buffers::allocate(&args, &<Xherk as Routine<Complex64>>::buffer_roles());
        let mut queue = Queue::new(1);
        let err = <Xherk as Routine<Complex64>>::run_primary(&args, &mut b, &mut queue).unwrap_err();
        assert!(matches!(err, ProbeError::UnsupportedConfiguration(_)));
        let err =
            <Xherk as Routine<Complex64>>::run_reference(BackendId::Naive, &args, &mut b).unwrap_err();
        assert!(matches!(err, ProbeError::UnsupportedConfiguration(_)));
    }

    #[test]
    fn test_syr2k_b_matches_a_shape() {
        let args = derive::<Xsyr2k, f32>(
            Arguments::new()
                .with_layout(Layout::RowMajor)
                .with_n(3)
                .with_k(5)
                .with_b_offset(1),
        );
        assert_eq!(args.a_ld, 5);
        assert_eq!(args.b_ld, 5);
        assert_eq!(args.size(BufferRole::B), args.size(BufferRole::A) + 1);
        assert_eq!(args.size(BufferRole::C), 9);
    }

    #[test]
    fn test_trsm_prepare_and_output() {
        let args = derive::<Xtrsm, f64>(
            Arguments::new()
                .with_layout(Layout::ColMajor)
                .with_side(Side::Left)
                .with_m(2)
                .with_n(3),
        );
        assert_eq!(<Xtrsm as Routine<f64>>::output_buffer_roles(), &[BufferRole::B]);
        assert_eq!(<Xtrsm as Routine<f64>>::result_extent(&args), (2, Some(3)));
        let mut b = Buffers::allocate(&args, &<Xtrsm as Routine<f64>>::buffer_roles());
        b.a_mat.iter_mut().for_each(|v| *v = 1.0);
        <Xtrsm as Routine<f64>>::prepare_inputs(&args, &mut b);
        assert_eq!(b.a_mat, vec![2.0, 0.5, 0.5, 2.0]);
    }

    #[test]
    fn test_trmm_leaves_a_untouched_on_prepare() {
        let args = derive::<Xtrmm, f32>(Arguments::new().with_m(2).with_n(2));
        let mut b = Buffers::allocate(&args, &<Xtrmm as Routine<f32>>::buffer_roles());
        b.a_mat.iter_mut().for_each(|v| *v = 1.0);
        <Xtrmm as Routine<f32>>::prepare_inputs(&args, &mut b);
        assert!(b.a_mat.iter().all(|&v| v == 1.0));
    }
}
