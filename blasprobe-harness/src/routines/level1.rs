//! Level 1 descriptors: vector-vector routines.

use super::common::{bytes, precheck, primary, vector_size};
#[cfg(feature = "cblas")]
use crate::backend::cblas;
#[cfg(feature = "naive")]
use crate::backend::naive;
use crate::backend::{not_compiled, BackendComplex, BackendId, BackendReal, BackendScalar};
use crate::descriptor::{BlasLevel, Routine};
use blasprobe_blas::level1;
use blasprobe_core::{
    Arguments, BufferRole, Buffers, Opt, ProbeError, Queue, RealScalar, Result, Scalar,
};

const XY_OPTIONS: &[Opt] = &[Opt::N, Opt::XInc, Opt::YInc, Opt::XOffset, Opt::YOffset];
const XY_ROLES: &[BufferRole] = &[BufferRole::X, BufferRole::Y];
const X_ROLE: &[BufferRole] = &[BufferRole::X];
const Y_ROLE: &[BufferRole] = &[BufferRole::Y];
const SCALAR_ROLE: &[BufferRole] = &[BufferRole::Scalar];

fn x_size<T>(args: &Arguments<T>) -> usize {
    vector_size(args.n, args.x_inc, args.x_offset)
}

fn y_size<T>(args: &Arguments<T>) -> usize {
    vector_size(args.n, args.y_inc, args.y_offset)
}

fn xy_size<T>(role: BufferRole, args: &Arguments<T>) -> usize {
    match role {
        BufferRole::X => x_size(args),
        BufferRole::Y => y_size(args),
        _ => 0,
    }
}

/// X followed by Y, for routines that update both vectors.
fn concat_xy<T: Scalar>(args: &Arguments<T>, buffers: &Buffers<T>) -> Vec<T> {
    let x = buffers.x_vec.iter().take(args.size(BufferRole::X));
    let y = buffers.y_vec.iter().take(args.size(BufferRole::Y));
    x.chain(y).copied().collect()
}

/// Index into [`concat_xy`]: `j == Some(1)` selects Y.
fn xy_index<T: Scalar>(args: &Arguments<T>, i: usize, j: Option<usize>) -> usize {
    match j {
        Some(1) => args.size(BufferRole::X) + args.y_offset + i * args.y_inc,
        _ => args.x_offset + i * args.x_inc,
    }
}

/// Reads the (c, s) pair a rotation routine keeps in its scalar buffer.
fn rotation<T: Scalar>(buffers: &Buffers<T>) -> Result<(T, T)> {
    match buffers.scalar[..] {
        [c, s, ..] => Ok((c, s)),
        _ => Err(ProbeError::SizeMismatch {
            role: BufferRole::Scalar,
            required: 2,
            actual: buffers.scalar.len(),
        }),
    }
}

// ============================================================================
// SWAP / SCAL / COPY / AXPY
// ============================================================================

/// x <-> y
pub struct Xswap;

impl<T: BackendScalar> Routine<T> for Xswap {
    const NAME: &'static str = "swap";

    fn operation_level() -> BlasLevel {
        BlasLevel::One
    }

    fn required_options() -> &'static [Opt] {
        XY_OPTIONS
    }

    fn input_buffer_roles() -> &'static [BufferRole] {
        XY_ROLES
    }

    fn output_buffer_roles() -> &'static [BufferRole] {
        XY_ROLES
    }

    fn buffer_size(role: BufferRole, args: &Arguments<T>) -> usize {
        xy_size(role, args)
    }

    fn run_primary(args: &Arguments<T>, b: &mut Buffers<T>, queue: &mut Queue) -> Result<()> {
        precheck::<Self, T>(args, b)?;
        primary(level1::swap(
            queue,
            args.n,
            &mut b.x_vec,
            args.x_offset,
            args.x_inc,
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
                naive::swap(
                    args.n,
                    &mut b.x_vec,
                    args.x_offset,
                    args.x_inc,
                    &mut b.y_vec,
                    args.y_offset,
                    args.y_inc,
                );
                Ok(())
            }
            #[cfg(feature = "cblas")]
            BackendId::Cblas => cblas::swap(
                args.n,
                &mut b.x_vec,
                args.x_offset,
                args.x_inc,
                &mut b.y_vec,
                args.y_offset,
                args.y_inc,
            ),
            #[allow(unreachable_patterns)]
            other => Err(not_compiled(other)),
        }
    }

    fn extract_result(args: &Arguments<T>, b: &Buffers<T>) -> Vec<T> {
        concat_xy(args, b)
    }

    fn result_extent(args: &Arguments<T>) -> (usize, Option<usize>) {
        (args.n, Some(2))
    }

    fn result_index(args: &Arguments<T>, i: usize, j: Option<usize>) -> usize {
        xy_index(args, i, j)
    }

    fn flop_count(args: &Arguments<T>) -> usize {
        args.n
    }

    fn byte_count(args: &Arguments<T>) -> usize {
        bytes::<T>(4 * args.n)
    }
}

/// x := alpha * x
pub struct Xscal;

impl<T: BackendScalar> Routine<T> for Xscal {
    const NAME: &'static str = "scal";

    fn operation_level() -> BlasLevel {
        BlasLevel::One
    }

    fn required_options() -> &'static [Opt] {
        &[Opt::N, Opt::XInc, Opt::XOffset, Opt::Alpha]
    }

    fn input_buffer_roles() -> &'static [BufferRole] {
        X_ROLE
    }

    fn output_buffer_roles() -> &'static [BufferRole] {
        X_ROLE
    }

    fn buffer_size(role: BufferRole, args: &Arguments<T>) -> usize {
        match role {
            BufferRole::X => x_size(args),
            _ => 0,
        }
    }

    fn run_primary(args: &Arguments<T>, b: &mut Buffers<T>, queue: &mut Queue) -> Result<()> {
        precheck::<Self, T>(args, b)?;
        primary(level1::scal(
            queue,
            args.n,
            args.alpha,
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
                naive::scal(args.n, args.alpha, &mut b.x_vec, args.x_offset, args.x_inc);
                Ok(())
            }
            #[cfg(feature = "cblas")]
            BackendId::Cblas => cblas::scal(args.n, args.alpha, &mut b.x_vec, args.x_offset, args.x_inc),
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
        args.n
    }

    fn byte_count(args: &Arguments<T>) -> usize {
        bytes::<T>(2 * args.n)
    }
}

/// y := x
pub struct Xcopy;

impl<T: BackendScalar> Routine<T> for Xcopy {
    const NAME: &'static str = "copy";

    fn operation_level() -> BlasLevel {
        BlasLevel::One
    }

    fn required_options() -> &'static [Opt] {
        XY_OPTIONS
    }

    fn input_buffer_roles() -> &'static [BufferRole] {
        X_ROLE
    }

    fn output_buffer_roles() -> &'static [BufferRole] {
        Y_ROLE
    }

    fn buffer_size(role: BufferRole, args: &Arguments<T>) -> usize {
        xy_size(role, args)
    }

    fn run_primary(args: &Arguments<T>, b: &mut Buffers<T>, queue: &mut Queue) -> Result<()> {
        precheck::<Self, T>(args, b)?;
        primary(level1::copy(
            queue,
            args.n,
            &b.x_vec,
            args.x_offset,
            args.x_inc,
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
                naive::copy(
                    args.n,
                    &b.x_vec,
                    args.x_offset,
                    args.x_inc,
                    &mut b.y_vec,
                    args.y_offset,
                    args.y_inc,
                );
                Ok(())
            }
            #[cfg(feature = "cblas")]
            BackendId::Cblas => cblas::copy(
                args.n,
                &b.x_vec,
                args.x_offset,
                args.x_inc,
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
        args.n
    }

    fn byte_count(args: &Arguments<T>) -> usize {
        bytes::<T>(2 * args.n)
    }
}

/// y := alpha * x + y
pub struct Xaxpy;

impl<T: BackendScalar> Routine<T> for Xaxpy {
    const NAME: &'static str = "axpy";

    fn operation_level() -> BlasLevel {
        BlasLevel::One
    }

    fn required_options() -> &'static [Opt] {
        &[Opt::N, Opt::XInc, Opt::YInc, Opt::XOffset, Opt::YOffset, Opt::Alpha]
    }

    fn input_buffer_roles() -> &'static [BufferRole] {
        XY_ROLES
    }

    fn output_buffer_roles() -> &'static [BufferRole] {
        Y_ROLE
    }

    fn buffer_size(role: BufferRole, args: &Arguments<T>) -> usize {
        xy_size(role, args)
    }

    fn run_primary(args: &Arguments<T>, b: &mut Buffers<T>, queue: &mut Queue) -> Result<()> {
        precheck::<Self, T>(args, b)?;
        primary(level1::axpy(
            queue,
            args.n,
            args.alpha,
            &b.x_vec,
            args.x_offset,
            args.x_inc,
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
                naive::axpy(
                    args.n,
                    args.alpha,
                    &b.x_vec,
                    args.x_offset,
                    args.x_inc,
                    &mut b.y_vec,
                    args.y_offset,
                    args.y_inc,
                );
                Ok(())
            }
            #[cfg(feature = "cblas")]
            BackendId::Cblas => cblas::axpy(
                args.n,
                args.alpha,
                &b.x_vec,
                args.x_offset,
                args.x_inc,
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
        2 * args.n
    }

    fn byte_count(args: &Arguments<T>) -> usize {
        bytes::<T>(3 * args.n)
    }
}

// ============================================================================
// DOT / DOTU / DOTC
// ============================================================================

const DOT_OPTIONS: &[Opt] = &[
    Opt::N,
    Opt::XInc,
    Opt::YInc,
    Opt::XOffset,
    Opt::YOffset,
    Opt::DotOffset,
];

fn dot_size<T>(role: BufferRole, args: &Arguments<T>) -> usize {
    match role {
        BufferRole::Scalar => 1 + args.dot_offset,
        other => xy_size(other, args),
    }
}

/// Shared descriptor body of the three dot products; only the backend calls differ.
macro_rules! dot_routine {
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
                BlasLevel::One
            }

            fn required_options() -> &'static [Opt] {
                DOT_OPTIONS
            }

            fn input_buffer_roles() -> &'static [BufferRole] {
                XY_ROLES
            }

            fn output_buffer_roles() -> &'static [BufferRole] {
                SCALAR_ROLE
            }

            fn buffer_size(role: BufferRole, args: &Arguments<T>) -> usize {
                dot_size(role, args)
            }

            fn run_primary(
                args: &Arguments<T>,
                b: &mut Buffers<T>,
                queue: &mut Queue,
            ) -> Result<()> {
                precheck::<Self, T>(args, b)?;
                primary($primary(
                    queue,
                    args.n,
                    &mut b.scalar,
                    args.dot_offset,
                    &b.x_vec,
                    args.x_offset,
                    args.x_inc,
                    &b.y_vec,
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
                let value = match backend {
                    #[cfg(feature = "naive")]
                    BackendId::Naive => naive::$naive(
                        args.n,
                        &b.x_vec,
                        args.x_offset,
                        args.x_inc,
                        &b.y_vec,
                        args.y_offset,
                        args.y_inc,
                    ),
                    #[cfg(feature = "cblas")]
                    BackendId::Cblas => cblas::$cblas(
                        args.n,
                        &b.x_vec,
                        args.x_offset,
                        args.x_inc,
                        &b.y_vec,
                        args.y_offset,
                        args.y_inc,
                    )?,
                    #[allow(unreachable_patterns)]
                    other => return Err(not_compiled(other)),
                };
                b.scalar[args.dot_offset] = value;
                Ok(())
            }

            fn result_extent(_args: &Arguments<T>) -> (usize, Option<usize>) {
                (1, None)
            }

            fn result_index(args: &Arguments<T>, i: usize, _j: Option<usize>) -> usize {
                args.dot_offset + i
            }

            fn flop_count(args: &Arguments<T>) -> usize {
                2 * args.n
            }

            fn byte_count(args: &Arguments<T>) -> usize {
                bytes::<T>(2 * args.n)
            }
        }
    };
}

dot_routine!(
    /// dot := x^T * y (real)
    Xdot, "dot", BackendReal,
    primary = level1::dot, naive = dot, cblas = dot
);

dot_routine!(
    /// dot := x^T * y (complex, unconjugated)
    Xdotu, "dotu", BackendComplex,
    primary = level1::dotu, naive = dot, cblas = dotu
);

dot_routine!(
    /// dot := x^H * y
    Xdotc, "dotc", BackendComplex,
    primary = level1::dotc, naive = dotc, cblas = dotc
);

// ============================================================================
// NRM2 / ASUM / AMAX
// ============================================================================

/// Which single-value reduction a descriptor runs.
#[derive(Clone, Copy)]
enum Reduction {
    Nrm2,
    Asum,
    Amax,
}

impl Reduction {
    fn offset<T>(self, args: &Arguments<T>) -> usize {
        match self {
            Reduction::Nrm2 => args.nrm2_offset,
            Reduction::Asum => args.asum_offset,
            Reduction::Amax => args.imax_offset,
        }
    }

    fn size<T>(self, role: BufferRole, args: &Arguments<T>) -> usize {
        match role {
            BufferRole::X => x_size(args),
            BufferRole::Scalar => 1 + self.offset(args),
            _ => 0,
        }
    }

    fn primary<T: Scalar>(
        self,
        args: &Arguments<T>,
        b: &mut Buffers<T>,
        queue: &mut Queue,
    ) -> Result<()> {
        let call = match self {
            Reduction::Nrm2 => level1::nrm2::<T>,
            Reduction::Asum => level1::asum::<T>,
            Reduction::Amax => level1::amax::<T>,
        };
        primary(call(
            queue,
            args.n,
            &mut b.scalar,
            self.offset(args),
            &b.x_vec,
            args.x_offset,
            args.x_inc,
        ))
    }

    fn reference<T: BackendScalar>(
        self,
        backend: BackendId,
        args: &Arguments<T>,
        b: &mut Buffers<T>,
    ) -> Result<()> {
        let (n, x, off, inc) = (args.n, &b.x_vec, args.x_offset, args.x_inc);
        let value: T = match backend {
            #[cfg(feature = "naive")]
            BackendId::Naive => match self {
                Reduction::Nrm2 => T::from_real(naive::nrm2(n, x, off, inc)),
                Reduction::Asum => T::from_real(naive::asum(n, x, off, inc)),
                Reduction::Amax => index_scalar(naive::iamax(n, x, off, inc)),
            },
            #[cfg(feature = "cblas")]
            BackendId::Cblas => match self {
                Reduction::Nrm2 => T::from_real(cblas::nrm2(n, x, off, inc)?),
                Reduction::Asum => T::from_real(cblas::asum(n, x, off, inc)?),
                Reduction::Amax => index_scalar(cblas::iamax(n, x, off, inc)?),
            },
            #[allow(unreachable_patterns)]
            other => return Err(not_compiled(other)),
        };
        b.scalar[self.offset(args)] = value;
        Ok(())
    }
}

/// A zero-based index stored as an element, the way amax reports it.
#[allow(dead_code)]
fn index_scalar<T: Scalar>(index: usize) -> T {
    T::from_real(<T::Real as RealScalar>::from_usize(index))
}

macro_rules! reduction_routine {
    (
        $(#[$doc:meta])*
        $name:ident, $label:literal, $kind:expr, $offset_opt:expr, flops = $flops:expr
    ) => {
        $(#[$doc])*
        pub struct $name;

        impl<T: BackendScalar> Routine<T> for $name {
            const NAME: &'static str = $label;

            fn operation_level() -> BlasLevel {
                BlasLevel::One
            }

            fn required_options() -> &'static [Opt] {
                &[Opt::N, Opt::XInc, Opt::XOffset, $offset_opt]
            }

            fn input_buffer_roles() -> &'static [BufferRole] {
                X_ROLE
            }

            fn output_buffer_roles() -> &'static [BufferRole] {
                SCALAR_ROLE
            }

            fn buffer_size(role: BufferRole, args: &Arguments<T>) -> usize {
                $kind.size(role, args)
            }

            fn run_primary(
                args: &Arguments<T>,
                b: &mut Buffers<T>,
                queue: &mut Queue,
            ) -> Result<()> {
                precheck::<Self, T>(args, b)?;
                $kind.primary(args, b, queue)
            }

            fn run_reference(
                backend: BackendId,
                args: &Arguments<T>,
                b: &mut Buffers<T>,
            ) -> Result<()> {
                precheck::<Self, T>(args, b)?;
                $kind.reference(backend, args, b)
            }

            fn result_extent(_args: &Arguments<T>) -> (usize, Option<usize>) {
                (1, None)
            }

            fn result_index(args: &Arguments<T>, i: usize, _j: Option<usize>) -> usize {
                $kind.offset(args) + i
            }

            fn flop_count(args: &Arguments<T>) -> usize {
                $flops * args.n
            }

            fn byte_count(args: &Arguments<T>) -> usize {
                bytes::<T>(args.n)
            }
        }
    };
}

reduction_routine!(
    /// nrm2 := ||x||_2
    Xnrm2, "nrm2", Reduction::Nrm2, Opt::Nrm2Offset, flops = 2
);

reduction_routine!(
    /// asum := sum |re(x_i)| + |im(x_i)|
    Xasum, "asum", Reduction::Asum, Opt::AsumOffset, flops = 1
);

reduction_routine!(
    /// imax := first index of the largest |re(x_i)| + |im(x_i)|
    Xamax, "amax", Reduction::Amax, Opt::ImaxOffset, flops = 1
);

// ============================================================================
// ROT
// ============================================================================

/// [x; y] := [c s; -s c] * [x; y], with (c, s) held in the scalar buffer.
pub struct Xrot;

impl<T: BackendReal> Routine<T> for Xrot {
    const NAME: &'static str = "rot";

    fn operation_level() -> BlasLevel {
        BlasLevel::One
    }

    fn required_options() -> &'static [Opt] {
        XY_OPTIONS
    }

    fn input_buffer_roles() -> &'static [BufferRole] {
        &[BufferRole::X, BufferRole::Y, BufferRole::Scalar]
    }

    fn output_buffer_roles() -> &'static [BufferRole] {
        XY_ROLES
    }

    fn buffer_size(role: BufferRole, args: &Arguments<T>) -> usize {
        match role {
            BufferRole::Scalar => 2,
            other => xy_size(other, args),
        }
    }

    /// Normalises the random (c, s) pair onto the unit circle.
    fn prepare_inputs(_args: &Arguments<T>, b: &mut Buffers<T>) {
        if let [c, s, ..] = b.scalar[..] {
            let r = c.hypot(s);
            let (c, s) = if r == T::zero() {
                (T::one(), T::zero())
            } else {
                (c / r, s / r)
            };
            b.scalar[0] = c;
            b.scalar[1] = s;
        }
    }

    fn run_primary(args: &Arguments<T>, b: &mut Buffers<T>, queue: &mut Queue) -> Result<()> {
        precheck::<Self, T>(args, b)?;
        let (c, s) = rotation(b)?;
        primary(level1::rot(
            queue,
            args.n,
            &mut b.x_vec,
            args.x_offset,
            args.x_inc,
            &mut b.y_vec,
            args.y_offset,
            args.y_inc,
            c,
            s,
        ))
    }

    fn run_reference(backend: BackendId, args: &Arguments<T>, b: &mut Buffers<T>) -> Result<()> {
        precheck::<Self, T>(args, b)?;
        let (c, s) = rotation(b)?;
        match backend {
            #[cfg(feature = "naive")]
            BackendId::Naive => {
                naive::rot(
                    args.n,
                    &mut b.x_vec,
                    args.x_offset,
                    args.x_inc,
                    &mut b.y_vec,
                    args.y_offset,
                    args.y_inc,
                    c,
                    s,
                );
                Ok(())
            }
            #[cfg(feature = "cblas")]
            BackendId::Cblas => cblas::rot(
                args.n,
                &mut b.x_vec,
                args.x_offset,
                args.x_inc,
                &mut b.y_vec,
                args.y_offset,
                args.y_inc,
                c,
                s,
            ),
            #[allow(unreachable_patterns)]
            other => {
                let _ = (c, s);
                Err(not_compiled(other))
            }
        }
    }

    fn extract_result(args: &Arguments<T>, b: &Buffers<T>) -> Vec<T> {
        concat_xy(args, b)
    }

    fn result_extent(args: &Arguments<T>) -> (usize, Option<usize>) {
        (args.n, Some(2))
    }

    fn result_index(args: &Arguments<T>, i: usize, j: Option<usize>) -> usize {
        xy_index(args, i, j)
    }

    fn flop_count(args: &Arguments<T>) -> usize {
        6 * args.n
    }

    fn byte_count(args: &Arguments<T>) -> usize {
        bytes::<T>(4 * args.n)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use blasprobe_core::{Complex32, Complex64};

    fn vec_args<T: Scalar>(n: usize) -> Arguments<T> {
        Arguments::new()
            .with_n(n)
            .with_x_inc(1)
            .with_y_inc(1)
            .with_x_offset(0)
            .with_y_offset(0)
    }

    #[test]
    fn test_strided_sizes() {
        let mut args = vec_args::<f32>(5).with_x_inc(3).with_y_offset(2);
        <Xaxpy as Routine<f32>>::apply_derived_sizes(&mut args);
        assert_eq!(args.size(BufferRole::X), 15);
        assert_eq!(args.size(BufferRole::Y), 7);
        assert_eq!(args.size(BufferRole::A), 0);
    }

    #[test]
    fn test_dot_scalar_slot_honours_offset() {
        let mut args = vec_args::<Complex64>(4).with_dot_offset(3);
        <Xdotc as Routine<Complex64>>::apply_derived_sizes(&mut args);
        assert_eq!(args.size(BufferRole::Scalar), 4);
        assert_eq!(<Xdotc as Routine<Complex64>>::result_index(&args, 0, None), 3);
    }

    #[test]
    fn test_swap_result_concatenates_x_then_y() {
        let mut args = vec_args::<f64>(2).with_y_offset(1);
        <Xswap as Routine<f64>>::apply_derived_sizes(&mut args);
        let b = Buffers {
            x_vec: vec![1.0, 2.0],
            y_vec: vec![9.0, 3.0, 4.0],
            ..Buffers::default()
        };
        let out = <Xswap as Routine<f64>>::extract_result(&args, &b);
        assert_eq!(out, vec![1.0, 2.0, 9.0, 3.0, 4.0]);
        let at = <Xswap as Routine<f64>>::result_index(&args, 1, Some(1));
        assert_eq!(out[at], 4.0);
    }

    #[test]
    fn test_rot_prepare_normalises_pair() {
        let args = vec_args::<f64>(1);
        let mut b = Buffers::<f64> {
            scalar: vec![3.0, 4.0],
            ..Buffers::default()
        };
        <Xrot as Routine<f64>>::prepare_inputs(&args, &mut b);
        assert_eq!(b.scalar, vec![0.6, 0.8]);

        b.scalar = vec![0.0, 0.0];
        <Xrot as Routine<f64>>::prepare_inputs(&args, &mut b);
        assert_eq!(b.scalar, vec![1.0, 0.0]);
    }

    #[test]
    fn test_level1_costs() {
        let args = vec_args::<Complex32>(10);
        assert_eq!(<Xaxpy as Routine<Complex32>>::flop_count(&args), 20);
        assert_eq!(<Xaxpy as Routine<Complex32>>::byte_count(&args), 30 * 8);
        assert_eq!(<Xnrm2 as Routine<Complex32>>::flop_count(&args), 20);
        let real = vec_args::<f32>(10);
        assert_eq!(<Xrot as Routine<f32>>::flop_count(&real), 60);
        assert_eq!(<Xdot as Routine<f32>>::byte_count(&real), 80);
    }

    #[test]
    fn test_short_scalar_buffer_rejected() {
        let mut args = vec_args::<f32>(3).with_nrm2_offset(2);
        <Xnrm2 as Routine<f32>>::apply_derived_sizes(&mut args);
        let mut b = Buffers::allocate(&args, &[BufferRole::X]);
        b.scalar = vec![0.0; 2];
        for backend in crate::backend::available_backends() {
            let err = <Xnrm2 as Routine<f32>>::run_reference(backend, &args, &mut b).unwrap_err();
            assert!(matches!(
                err,
                ProbeError::SizeMismatch { role: BufferRole::Scalar, required: 3, actual: 2 }
            ));
        }
    }

    #[cfg(feature = "naive")]
    #[test]
    fn test_amax_reports_index_as_element() {
        let mut args = vec_args::<Complex32>(3).with_imax_offset(1);
        <Xamax as Routine<Complex32>>::apply_derived_sizes(&mut args);
        let mut b = Buffers::allocate(&args, &[BufferRole::X, BufferRole::Scalar]);
        b.x_vec = vec![
            Complex32::new(0.5, 0.5),
            Complex32::new(-2.0, 0.0),
            Complex32::new(1.0, 1.0),
        ];
        <Xamax as Routine<Complex32>>::run_reference(BackendId::Naive, &args, &mut b).unwrap();
        assert_eq!(b.scalar[1], Complex32::new(1.0, 0.0));
    }
}
