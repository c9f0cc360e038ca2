//! Size, index and cost building blocks shared by the routine descriptors.

use crate::descriptor::Routine;
use blasprobe_core::{
    Arguments, Buffers, Event, Layout, ProbeError, RealScalar, Result, Scalar, Side, StatusCode,
    Transpose,
};

/// Backend name reported when the accelerated library fails.
pub const PRIMARY: &str = "blasprobe-blas";

/// Strided vector: `n * inc + offset`.
#[inline]
pub fn vector_size(n: usize, inc: usize, offset: usize) -> usize {
    n * inc + offset
}

/// Dense matrix: stored lines times leading dimension, plus offset.
#[inline]
pub fn matrix_size(layout: Layout, rows: usize, cols: usize, ld: usize, offset: usize) -> usize {
    layout.lines(rows, cols) * ld + offset
}

/// Packed triangle of order `n`: `n * (n + 1) / 2 + offset`.
#[inline]
pub fn packed_size(n: usize, offset: usize) -> usize {
    n * (n + 1) / 2 + offset
}

/// Flat offset of element `(i, j)` of a dense matrix.
#[inline]
pub fn matrix_index(layout: Layout, ld: usize, offset: usize, i: usize, j: usize) -> usize {
    layout.index(i, j, ld) + offset
}

/// Stored (rows, cols) of an operand that is `rows x cols` after applying `transpose`.
#[inline]
pub fn stored_dims(transpose: Transpose, rows: usize, cols: usize) -> (usize, usize) {
    if transpose.is_transposed() {
        (cols, rows)
    } else {
        (rows, cols)
    }
}

/// Order of the square A operand of a side-dependent routine.
#[inline]
pub fn side_order(side: Side, m: usize, n: usize) -> usize {
    match side {
        Side::Left => m,
        Side::Right => n,
    }
}

/// Vector lengths (x, y) of a general matrix-vector product.
#[inline]
pub fn gemv_lengths(transpose: Transpose, m: usize, n: usize) -> (usize, usize) {
    if transpose.is_transposed() {
        (m, n)
    } else {
        (n, m)
    }
}

pub fn filter_transposes(candidates: &[Transpose], allowed: &[Transpose]) -> Vec<Transpose> {
    candidates
        .iter()
        .copied()
        .filter(|t| allowed.contains(t))
        .collect()
}

/// Fails before any backend call when `transpose` is outside `allowed`.
pub fn require_transpose(routine: &str, transpose: Transpose, allowed: &[Transpose]) -> Result<()> {
    if allowed.contains(&transpose) {
        Ok(())
    } else {
        Err(ProbeError::UnsupportedConfiguration(format!(
            "{routine} does not accept transpose `{transpose}`"
        )))
    }
}

/// Waits on a successful primary call or reports its status unchanged.
pub fn primary(result: std::result::Result<Event, StatusCode>) -> Result<()> {
    match result {
        Ok(event) => {
            event.wait();
            Ok(())
        }
        Err(status) => Err(ProbeError::backend(PRIMARY, status)),
    }
}

/// Validation shared by every reference dispatch.
pub fn precheck<R: Routine<T>, T: Scalar>(args: &Arguments<T>, buffers: &Buffers<T>) -> Result<()> {
    crate::descriptor::check_operands::<R, T>(args, buffers)
}

/// Makes the stored triangle of the order-`order` matrix A well conditioned:
/// off-diagonal entries shrink by `1 / order` and the diagonal becomes 2.
pub fn condition_triangle<T: Scalar>(args: &Arguments<T>, order: usize, a: &mut [T]) {
    let shrink = T::from_real(<T::Real as RealScalar>::from_f64(1.0 / order.max(1) as f64));
    let two = T::from_real(<T::Real as RealScalar>::from_f64(2.0));
    for i in 0..order {
        for j in 0..order {
            let at = matrix_index(args.layout, args.a_ld, args.a_offset, i, j);
            if let Some(v) = a.get_mut(at) {
                *v = if i == j { two } else { *v * shrink };
            }
        }
    }
}

/// Scalar argument passed through unchanged; pairs with [`real_part`] in routine tables.
#[inline]
pub fn as_given<T>(value: T) -> T {
    value
}

/// `count` elements in bytes.
#[inline]
pub fn bytes<T: Scalar>(count: usize) -> usize {
    count * T::PRECISION.element_size()
}

/// Real part of a scalar argument, for routines that only use it.
#[inline]
pub fn real_part<T: Scalar>(value: T) -> T::Real {
    value.re()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_matrix_size_follows_layout() {
        // 3 x 5, row-major: 3 lines of ld 6
        assert_eq!(matrix_size(Layout::RowMajor, 3, 5, 6, 2), 20);
        // column-major: 5 lines of ld 4
        assert_eq!(matrix_size(Layout::ColMajor, 3, 5, 4, 0), 20);
    }

    #[test]
    fn test_stored_dims_swap_when_transposed() {
        assert_eq!(stored_dims(Transpose::No, 2, 7), (2, 7));
        assert_eq!(stored_dims(Transpose::Conjugate, 2, 7), (7, 2));
        assert_eq!(gemv_lengths(Transpose::Yes, 3, 4), (3, 4));
    }

    #[test]
    fn test_transpose_filter_and_requirement() {
        let allowed = [Transpose::No, Transpose::Conjugate];
        assert_eq!(
            filter_transposes(&Transpose::ALL, &allowed),
            vec![Transpose::No, Transpose::Conjugate]
        );
        assert!(require_transpose("herk", Transpose::Yes, &allowed).is_err());
        assert!(require_transpose("herk", Transpose::No, &allowed).is_ok());
    }

    #[test]
    fn test_condition_triangle_sets_diagonal_and_shrinks_rest() {
        let args = Arguments::<f64>::new()
            .with_layout(Layout::ColMajor)
            .with_a_ld(3)
            .with_a_offset(1);
        let mut a = vec![1.0; 1 + 3 * 2];
        condition_triangle(&args, 2, &mut a);
        assert_eq!(a[0], 1.0);
        assert_eq!((a[1], a[2], a[4], a[5]), (2.0, 0.5, 0.5, 2.0));
        // padding row of the leading dimension is untouched
        assert_eq!(a[3], 1.0);
    }

    #[test]
    fn test_primary_status_is_kept() {
        let err = primary(Err(StatusCode::InvalidLeadDimA)).unwrap_err();
        assert!(matches!(
            err,
            ProbeError::BackendInvocation { backend: PRIMARY, status: StatusCode::InvalidLeadDimA }
        ));
    }
}
