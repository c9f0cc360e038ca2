//! BLAS Level 2: matrix-vector operations.
//!
//! All operations support both row-major and column-major layouts. Symmetric,
//! Hermitian and triangular routines share one kernel for full and packed
//! storage through [`Tri`].

use crate::access::{Dense, Storage, Tri};
use crate::checks::{check_a, check_packed, check_x, check_y};
use blasprobe_core::{
    ComplexScalar, Diagonal, Event, Layout, Queue, RealScalar, Scalar, StatusCode, Transpose,
    Triangle,
};

#[inline]
fn check_tri<T>(tri: &Tri, n: usize, a: &[T]) -> Result<(), StatusCode> {
    match tri.storage {
        Storage::Full { off, ld } => check_a(n, n, a, off, ld),
        Storage::Packed { off, .. } => check_packed(n, a, off),
    }
}

/// y[i] := alpha * acc_i + beta * y[i], with beta == 0 overwriting y.
#[inline(always)]
fn update_y<T: Scalar>(y: &mut T, alpha: T, acc: T, beta: T) {
    *y = if beta == T::zero() {
        alpha * acc
    } else {
        alpha * acc + beta * *y
    };
}

// ============================================================================
// GEMV / GBMV: general (banded) matrix-vector multiply
// y := alpha * op(A) * x + beta * y
// ============================================================================

/// General matrix-vector multiply on an `m` x `n` matrix.
pub fn gemv<T: Scalar>(
    queue: &mut Queue,
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
) -> Result<Event, StatusCode> {
    queue.run(|_| {
        let (rows, cols) = if a_transpose.is_transposed() {
            (n, m)
        } else {
            (m, n)
        };
        check_a(layout.leading_dim(m, n), layout.lines(m, n), a, a_off, a_ld)?;
        check_x(cols, x, x_off, x_inc)?;
        check_y(rows, y, y_off, y_inc)?;

        let d = Dense::new(layout, a_off, a_ld);
        for i in 0..rows {
            let mut acc = T::zero();
            if alpha != T::zero() {
                for j in 0..cols {
                    acc += d.op(a, a_transpose, i, j) * x[x_off + j * x_inc];
                }
            }
            update_y(&mut y[y_off + i * y_inc], alpha, acc, beta);
        }
        Ok(())
    })
}

/// Band matrix element (i, j); zero outside the `kl`/`ku` band.
#[inline(always)]
fn band<T: Scalar>(
    a: &[T],
    layout: Layout,
    off: usize,
    ld: usize,
    kl: usize,
    ku: usize,
    i: usize,
    j: usize,
) -> T {
    if i + ku < j || i > j + kl {
        return T::zero();
    }
    match layout {
        Layout::ColMajor => a[off + ku + i - j + j * ld],
        Layout::RowMajor => a[off + kl + j - i + i * ld],
    }
}

/// General band matrix-vector multiply; A stores `kl + ku + 1` diagonals.
pub fn gbmv<T: Scalar>(
    queue: &mut Queue,
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
) -> Result<Event, StatusCode> {
    queue.run(|_| {
        let (rows, cols) = if a_transpose.is_transposed() {
            (n, m)
        } else {
            (m, n)
        };
        check_a(kl + ku + 1, layout.lines(m, n), a, a_off, a_ld)?;
        check_x(cols, x, x_off, x_inc)?;
        check_y(rows, y, y_off, y_inc)?;

        for i in 0..rows {
            let mut acc = T::zero();
            if alpha != T::zero() {
                for j in 0..cols {
                    let aij = match a_transpose {
                        Transpose::No => band(a, layout, a_off, a_ld, kl, ku, i, j),
                        Transpose::Yes => band(a, layout, a_off, a_ld, kl, ku, j, i),
                        Transpose::Conjugate => band(a, layout, a_off, a_ld, kl, ku, j, i).conj(),
                    };
                    acc += aij * x[x_off + j * x_inc];
                }
            }
            update_y(&mut y[y_off + i * y_inc], alpha, acc, beta);
        }
        Ok(())
    })
}

// ============================================================================
// SYMV / HEMV / SPMV / HPMV: symmetric or Hermitian matrix-vector multiply
// ============================================================================

fn sym_mv<T: Scalar>(
    tri: Tri,
    herm: bool,
    n: usize,
    alpha: T,
    a: &[T],
    x: &[T],
    x_off: usize,
    x_inc: usize,
    beta: T,
    y: &mut [T],
    y_off: usize,
    y_inc: usize,
) -> Result<(), StatusCode> {
    check_tri(&tri, n, a)?;
    check_x(n, x, x_off, x_inc)?;
    check_y(n, y, y_off, y_inc)?;
    for i in 0..n {
        let mut acc = T::zero();
        if alpha != T::zero() {
            for j in 0..n {
                acc += tri.sym(a, herm, i, j) * x[x_off + j * x_inc];
            }
        }
        update_y(&mut y[y_off + i * y_inc], alpha, acc, beta);
    }
    Ok(())
}

/// Symmetric matrix-vector multiply, full storage.
pub fn symv<T: RealScalar>(
    queue: &mut Queue,
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
) -> Result<Event, StatusCode> {
    let tri = Tri::full(layout, triangle, a_off, a_ld);
    queue.run(|_| sym_mv(tri, false, n, alpha, a, x, x_off, x_inc, beta, y, y_off, y_inc))
}

/// Hermitian matrix-vector multiply, full storage.
pub fn hemv<T: ComplexScalar>(
    queue: &mut Queue,
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
) -> Result<Event, StatusCode> {
    let tri = Tri::full(layout, triangle, a_off, a_ld);
    queue.run(|_| sym_mv(tri, true, n, alpha, a, x, x_off, x_inc, beta, y, y_off, y_inc))
}

/// Symmetric matrix-vector multiply, packed storage.
pub fn spmv<T: RealScalar>(
    queue: &mut Queue,
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
) -> Result<Event, StatusCode> {
    let tri = Tri::packed(layout, triangle, ap_off, n);
    queue.run(|_| sym_mv(tri, false, n, alpha, ap, x, x_off, x_inc, beta, y, y_off, y_inc))
}

/// Hermitian matrix-vector multiply, packed storage.
pub fn hpmv<T: ComplexScalar>(
    queue: &mut Queue,
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
) -> Result<Event, StatusCode> {
    let tri = Tri::packed(layout, triangle, ap_off, n);
    queue.run(|_| sym_mv(tri, true, n, alpha, ap, x, x_off, x_inc, beta, y, y_off, y_inc))
}

// ============================================================================
// TRMV / TPMV / TRSV: triangular multiply and solve
// ============================================================================

fn tri_mv<T: Scalar>(
    tri: Tri,
    a_transpose: Transpose,
    diagonal: Diagonal,
    n: usize,
    a: &[T],
    x: &mut [T],
    x_off: usize,
    x_inc: usize,
) -> Result<(), StatusCode> {
    check_tri(&tri, n, a)?;
    check_x(n, x, x_off, x_inc)?;
    let unit = diagonal.is_unit();
    let src: Vec<T> = (0..n).map(|j| x[x_off + j * x_inc]).collect();
    for i in 0..n {
        let mut acc = T::zero();
        for (j, &xj) in src.iter().enumerate() {
            acc += tri.tri_op(a, unit, a_transpose, i, j) * xj;
        }
        x[x_off + i * x_inc] = acc;
    }
    Ok(())
}

/// x := op(A) * x, A triangular in full storage.
pub fn trmv<T: Scalar>(
    queue: &mut Queue,
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
) -> Result<Event, StatusCode> {
    let tri = Tri::full(layout, triangle, a_off, a_ld);
    queue.run(|_| tri_mv(tri, a_transpose, diagonal, n, a, x, x_off, x_inc))
}

/// x := op(A) * x, A triangular in packed storage.
pub fn tpmv<T: Scalar>(
    queue: &mut Queue,
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
) -> Result<Event, StatusCode> {
    let tri = Tri::packed(layout, triangle, ap_off, n);
    queue.run(|_| tri_mv(tri, a_transpose, diagonal, n, ap, x, x_off, x_inc))
}

/// Solves op(A) * x = b in place, A triangular in full storage.
///
/// No singularity check: a zero on a non-unit diagonal yields inf/NaN.
pub fn trsv<T: Scalar>(
    queue: &mut Queue,
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
) -> Result<Event, StatusCode> {
    let tri = Tri::full(layout, triangle, a_off, a_ld);
    queue.run(|_| {
        check_a(n, n, a, a_off, a_ld)?;
        check_x(n, x, x_off, x_inc)?;
        let unit = diagonal.is_unit();
        let at = |i: usize| x_off + i * x_inc;
        if tri.op_is_upper(a_transpose) {
            for i in (0..n).rev() {
                let mut v = x[at(i)];
                for j in i + 1..n {
                    v -= tri.tri_op(a, unit, a_transpose, i, j) * x[at(j)];
                }
                if !unit {
                    v /= tri.tri_op(a, false, a_transpose, i, i);
                }
                x[at(i)] = v;
            }
        } else {
            for i in 0..n {
                let mut v = x[at(i)];
                for j in 0..i {
                    v -= tri.tri_op(a, unit, a_transpose, i, j) * x[at(j)];
                }
                if !unit {
                    v /= tri.tri_op(a, false, a_transpose, i, i);
                }
                x[at(i)] = v;
            }
        }
        Ok(())
    })
}

// ============================================================================
// GER / GERU / GERC: general rank-1 update
// A := alpha * x * y^T (or y^H) + A
// ============================================================================

fn rank1_general<T: Scalar>(
    layout: Layout,
    conj_y: bool,
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
) -> Result<(), StatusCode> {
    check_x(m, x, x_off, x_inc)?;
    check_y(n, y, y_off, y_inc)?;
    check_a(layout.leading_dim(m, n), layout.lines(m, n), a, a_off, a_ld)?;
    if alpha == T::zero() {
        return Ok(());
    }
    let d = Dense::new(layout, a_off, a_ld);
    for j in 0..n {
        let yj = y[y_off + j * y_inc];
        let yj = alpha * if conj_y { yj.conj() } else { yj };
        for i in 0..m {
            a[d.at(i, j)] += x[x_off + i * x_inc] * yj;
        }
    }
    Ok(())
}

/// Real rank-1 update.
pub fn ger<T: RealScalar>(
    queue: &mut Queue,
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
) -> Result<Event, StatusCode> {
    queue.run(|_| {
        rank1_general(
            layout, false, m, n, alpha, x, x_off, x_inc, y, y_off, y_inc, a, a_off, a_ld,
        )
    })
}

/// Complex rank-1 update, unconjugated.
pub fn geru<T: ComplexScalar>(
    queue: &mut Queue,
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
) -> Result<Event, StatusCode> {
    queue.run(|_| {
        rank1_general(
            layout, false, m, n, alpha, x, x_off, x_inc, y, y_off, y_inc, a, a_off, a_ld,
        )
    })
}

/// Complex rank-1 update with y conjugated.
pub fn gerc<T: ComplexScalar>(
    queue: &mut Queue,
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
) -> Result<Event, StatusCode> {
    queue.run(|_| {
        rank1_general(
            layout, true, m, n, alpha, x, x_off, x_inc, y, y_off, y_inc, a, a_off, a_ld,
        )
    })
}

// ============================================================================
// SYR / HER / SPR / HPR: symmetric or Hermitian rank-1 update
// ============================================================================

fn rank1_tri<T: Scalar>(
    tri: Tri,
    herm: bool,
    n: usize,
    alpha: T,
    x: &[T],
    x_off: usize,
    x_inc: usize,
    a: &mut [T],
) -> Result<(), StatusCode> {
    check_x(n, x, x_off, x_inc)?;
    check_tri(&tri, n, a)?;
    for i in 0..n {
        for j in 0..n {
            if !tri.triangle.contains(i, j) {
                continue;
            }
            let xj = x[x_off + j * x_inc];
            let xj = if herm { xj.conj() } else { xj };
            let at = tri.at(i, j);
            a[at] += alpha * x[x_off + i * x_inc] * xj;
            if herm && i == j {
                a[at] = T::from_real(a[at].re());
            }
        }
    }
    Ok(())
}

/// Symmetric rank-1 update, full storage.
pub fn syr<T: RealScalar>(
    queue: &mut Queue,
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
) -> Result<Event, StatusCode> {
    let tri = Tri::full(layout, triangle, a_off, a_ld);
    queue.run(|_| rank1_tri(tri, false, n, alpha, x, x_off, x_inc, a))
}

/// Symmetric rank-1 update, packed storage.
pub fn spr<T: RealScalar>(
    queue: &mut Queue,
    layout: Layout,
    triangle: Triangle,
    n: usize,
    alpha: T,
    x: &[T],
    x_off: usize,
    x_inc: usize,
    ap: &mut [T],
    ap_off: usize,
) -> Result<Event, StatusCode> {
    let tri = Tri::packed(layout, triangle, ap_off, n);
    queue.run(|_| rank1_tri(tri, false, n, alpha, x, x_off, x_inc, ap))
}

/// Hermitian rank-1 update with real alpha, full storage.
pub fn her<T: ComplexScalar>(
    queue: &mut Queue,
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
) -> Result<Event, StatusCode> {
    let tri = Tri::full(layout, triangle, a_off, a_ld);
    queue.run(|_| rank1_tri(tri, true, n, T::from_real(alpha), x, x_off, x_inc, a))
}

/// Hermitian rank-1 update with real alpha, packed storage.
pub fn hpr<T: ComplexScalar>(
    queue: &mut Queue,
    layout: Layout,
    triangle: Triangle,
    n: usize,
    alpha: T::Real,
    x: &[T],
    x_off: usize,
    x_inc: usize,
    ap: &mut [T],
    ap_off: usize,
) -> Result<Event, StatusCode> {
    let tri = Tri::packed(layout, triangle, ap_off, n);
    queue.run(|_| rank1_tri(tri, true, n, T::from_real(alpha), x, x_off, x_inc, ap))
}

// ============================================================================
// SYR2 / HER2 / SPR2 / HPR2: symmetric or Hermitian rank-2 update
// A := alpha * x * y^H + conj(alpha) * y * x^H + A
// ============================================================================

fn rank2_tri<T: Scalar>(
    tri: Tri,
    herm: bool,
    n: usize,
    alpha: T,
    x: &[T],
    x_off: usize,
    x_inc: usize,
    y: &[T],
    y_off: usize,
    y_inc: usize,
    a: &mut [T],
) -> Result<(), StatusCode> {
    check_x(n, x, x_off, x_inc)?;
    check_y(n, y, y_off, y_inc)?;
    check_tri(&tri, n, a)?;
    let alpha2 = if herm { alpha.conj() } else { alpha };
    let c = |v: T| if herm { v.conj() } else { v };
    for i in 0..n {
        let xi = x[x_off + i * x_inc];
        let yi = y[y_off + i * y_inc];
        for j in 0..n {
            if !tri.triangle.contains(i, j) {
                continue;
            }
            let xj = x[x_off + j * x_inc];
            let yj = y[y_off + j * y_inc];
            let at = tri.at(i, j);
            a[at] += alpha * xi * c(yj) + alpha2 * yi * c(xj);
            if herm && i == j {
                a[at] = T::from_real(a[at].re());
            }
        }
    }
    Ok(())
}

/// Symmetric rank-2 update, full storage.
pub fn syr2<T: RealScalar>(
    queue: &mut Queue,
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
) -> Result<Event, StatusCode> {
    let tri = Tri::full(layout, triangle, a_off, a_ld);
    queue.run(|_| rank2_tri(tri, false, n, alpha, x, x_off, x_inc, y, y_off, y_inc, a))
}

/// Symmetric rank-2 update, packed storage.
pub fn spr2<T: RealScalar>(
    queue: &mut Queue,
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
) -> Result<Event, StatusCode> {
    let tri = Tri::packed(layout, triangle, ap_off, n);
    queue.run(|_| rank2_tri(tri, false, n, alpha, x, x_off, x_inc, y, y_off, y_inc, ap))
}

/// Hermitian rank-2 update, full storage.
pub fn her2<T: ComplexScalar>(
    queue: &mut Queue,
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
) -> Result<Event, StatusCode> {
    let tri = Tri::full(layout, triangle, a_off, a_ld);
    queue.run(|_| rank2_tri(tri, true, n, alpha, x, x_off, x_inc, y, y_off, y_inc, a))
}

/// Hermitian rank-2 update, packed storage.
pub fn hpr2<T: ComplexScalar>(
    queue: &mut Queue,
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
) -> Result<Event, StatusCode> {
    let tri = Tri::packed(layout, triangle, ap_off, n);
    queue.run(|_| rank2_tri(tri, true, n, alpha, x, x_off, x_inc, y, y_off, y_inc, ap))
}

#[cfg(test)]
mod tests {
    use super::*;
    use blasprobe_core::{Complex32, Complex64};

    fn queue() -> Queue {
        Queue::new(1)
    }

    #[test]
    fn test_gemv_rowmajor_notrans() {
        // A = [1 2 3; 4 5 6], x = [1 1 1]
        let a = vec![1.0f32, 2.0, 3.0, 4.0, 5.0, 6.0];
        let x = vec![1.0f32; 3];
        let mut y = vec![0.0f32; 2];
        let _ = gemv(
            &mut queue(), Layout::RowMajor, Transpose::No, 2, 3, 1.0, &a, 0, 3, &x, 0, 1, 0.0,
            &mut y, 0, 1,
        )
        .unwrap();
        assert_eq!(y, vec![6.0, 15.0]);
    }

    #[test]
    fn test_gemv_with_alpha_beta() {
        let a = vec![1.0f64, 2.0, 3.0, 4.0];
        let x = vec![1.0f64, 1.0];
        let mut y = vec![10.0f64, 20.0];
        let _ = gemv(
            &mut queue(), Layout::RowMajor, Transpose::No, 2, 2, 2.0, &a, 0, 2, &x, 0, 1, 0.5,
            &mut y, 0, 1,
        )
        .unwrap();
        assert_eq!(y, vec![11.0, 24.0]);
    }

    #[test]
    fn test_gemv_trans_colmajor() {
        // Col-major 2x3 A = [1 2 3; 4 5 6] stored [1 4 2 5 3 6]; A^T * [1, 1]
        let a = vec![1.0f32, 4.0, 2.0, 5.0, 3.0, 6.0];
        let x = vec![1.0f32, 1.0];
        let mut y = vec![0.0f32; 3];
        let _ = gemv(
            &mut queue(), Layout::ColMajor, Transpose::Yes, 2, 3, 1.0, &a, 0, 2, &x, 0, 1, 0.0,
            &mut y, 0, 1,
        )
        .unwrap();
        assert_eq!(y, vec![5.0, 7.0, 9.0]);
    }

    #[test]
    fn test_gemv_strided_with_offsets() {
        let a = vec![0.0f32, 1.0, 2.0, 3.0, 4.0];
        let x = vec![9.0f32, 1.0, 9.0, 2.0];
        let mut y = vec![0.0f32; 4];
        let _ = gemv(
            &mut queue(), Layout::RowMajor, Transpose::No, 2, 2, 1.0, &a, 1, 2, &x, 1, 2, 0.0,
            &mut y, 1, 2,
        )
        .unwrap();
        assert_eq!(y, vec![0.0, 5.0, 0.0, 11.0]);
    }

    #[test]
    fn test_gemv_rejects_small_lead_dim() {
        let a = vec![0.0f32; 6];
        let x = vec![0.0f32; 3];
        let mut y = vec![3.0f32; 2];
        let err = gemv(
            &mut queue(), Layout::RowMajor, Transpose::No, 2, 3, 1.0, &a, 0, 2, &x, 0, 1, 0.0,
            &mut y, 0, 1,
        )
        .unwrap_err();
        assert_eq!(err, StatusCode::InvalidLeadDimA);
        assert_eq!(y, vec![3.0, 3.0]);
    }

    #[test]
    fn test_gbmv_matches_dense() {
        // 3x3 tridiagonal [2 1 0; 1 2 1; 0 1 2], col-major band with kl = ku = 1
        // column j holds [a(j-1, j), a(j, j), a(j+1, j)]
        let band_a = vec![0.0f64, 2.0, 1.0, 1.0, 2.0, 1.0, 1.0, 2.0, 0.0];
        let dense = vec![2.0f64, 1.0, 0.0, 1.0, 2.0, 1.0, 0.0, 1.0, 2.0];
        let x = vec![1.0f64, 2.0, 3.0];
        let mut yb = vec![0.0f64; 3];
        let mut yd = vec![0.0f64; 3];
        let _ = gbmv(
            &mut queue(), Layout::ColMajor, Transpose::No, 3, 3, 1, 1, 1.0, &band_a, 0, 3, &x, 0,
            1, 0.0, &mut yb, 0, 1,
        )
        .unwrap();
        let _ = gemv(
            &mut queue(), Layout::ColMajor, Transpose::No, 3, 3, 1.0, &dense, 0, 3, &x, 0, 1,
            0.0, &mut yd, 0, 1,
        )
        .unwrap();
        assert_eq!(yb, yd);
        assert_eq!(yb, vec![4.0, 8.0, 8.0]);
    }

    #[test]
    fn test_symv_upper_and_spmv_agree() {
        // Symmetric [1 2; 2 3], upper row-major full = [1 2 _ 3], packed = [1 2 3]
        let a = vec![1.0f32, 2.0, 99.0, 3.0];
        let ap = vec![1.0f32, 2.0, 3.0];
        let x = vec![1.0f32, 1.0];
        let mut y1 = vec![0.0f32; 2];
        let mut y2 = vec![0.0f32; 2];
        let _ = symv(
            &mut queue(), Layout::RowMajor, Triangle::Upper, 2, 1.0, &a, 0, 2, &x, 0, 1, 0.0,
            &mut y1, 0, 1,
        )
        .unwrap();
        let _ = spmv(
            &mut queue(), Layout::RowMajor, Triangle::Upper, 2, 1.0, &ap, 0, &x, 0, 1, 0.0,
            &mut y2, 0, 1,
        )
        .unwrap();
        assert_eq!(y1, vec![3.0, 5.0]);
        assert_eq!(y1, y2);
    }

    #[test]
    fn test_hemv_uses_conjugate_mirror() {
        // Hermitian [2, 1+i; 1-i, 3] stored lower col-major: [2, 1-i, _, 3]
        let a = vec![
            Complex64::new(2.0, 5.0),
            Complex64::new(1.0, -1.0),
            Complex64::new(0.0, 0.0),
            Complex64::new(3.0, 0.0),
        ];
        let x = vec![Complex64::new(0.0, 0.0), Complex64::new(1.0, 0.0)];
        let mut y = vec![Complex64::new(0.0, 0.0); 2];
        let one = Complex64::new(1.0, 0.0);
        let zero = Complex64::new(0.0, 0.0);
        let _ = hemv(
            &mut queue(), Layout::ColMajor, Triangle::Lower, 2, one, &a, 0, 2, &x, 0, 1, zero,
            &mut y, 0, 1,
        )
        .unwrap();
        assert_eq!(y, vec![Complex64::new(1.0, 1.0), Complex64::new(3.0, 0.0)]);
    }

    #[test]
    fn test_trmv_then_trsv_restores_x() {
        let a = vec![2.0f64, 1.0, 0.5, 0.0, 3.0, 1.0, 0.0, 0.0, 4.0];
        for triangle in Triangle::ALL {
            for trans in Transpose::ALL {
                let orig = vec![1.0f64, -2.0, 3.0];
                let mut x = orig.clone();
                let _ = trmv(
                    &mut queue(), Layout::RowMajor, triangle, trans, Diagonal::NonUnit, 3, &a, 0,
                    3, &mut x, 0, 1,
                )
                .unwrap();
                let _ = trsv(
                    &mut queue(), Layout::RowMajor, triangle, trans, Diagonal::NonUnit, 3, &a, 0,
                    3, &mut x, 0, 1,
                )
                .unwrap();
                for (got, want) in x.iter().zip(&orig) {
                    assert!((got - want).abs() < 1e-12, "{triangle}/{trans}: {got} vs {want}");
                }
            }
        }
    }

    #[test]
    fn test_tpmv_unit_diagonal() {
        // Upper col-major packed [a00, a01, a11] = [5, 2, 7], unit diagonal ignores 5 and 7
        let ap = vec![5.0f32, 2.0, 7.0];
        let mut x = vec![1.0f32, 1.0];
        let _ = tpmv(
            &mut queue(), Layout::ColMajor, Triangle::Upper, Transpose::No, Diagonal::Unit, 2,
            &ap, 0, &mut x, 0, 1,
        )
        .unwrap();
        assert_eq!(x, vec![3.0, 1.0]);
    }

    #[test]
    fn test_ger() {
        let x = vec![1.0f32, 2.0];
        let y = vec![3.0f32, 4.0];
        let mut a = vec![0.0f32; 4];
        let _ = ger(
            &mut queue(), Layout::RowMajor, 2, 2, 1.0, &x, 0, 1, &y, 0, 1, &mut a, 0, 2,
        )
        .unwrap();
        assert_eq!(a, vec![3.0, 4.0, 6.0, 8.0]);
    }

    #[test]
    fn test_gerc_conjugates_y() {
        let x = vec![Complex32::new(1.0, 0.0)];
        let y = vec![Complex32::new(0.0, 1.0)];
        let one = Complex32::new(1.0, 0.0);
        let mut au = vec![Complex32::new(0.0, 0.0)];
        let mut ac = vec![Complex32::new(0.0, 0.0)];
        let _ = geru(&mut queue(), Layout::ColMajor, 1, 1, one, &x, 0, 1, &y, 0, 1, &mut au, 0, 1)
            .unwrap();
        let _ = gerc(&mut queue(), Layout::ColMajor, 1, 1, one, &x, 0, 1, &y, 0, 1, &mut ac, 0, 1)
            .unwrap();
        assert_eq!(au[0], Complex32::new(0.0, 1.0));
        assert_eq!(ac[0], Complex32::new(0.0, -1.0));
    }

    #[test]
    fn test_her_zeroes_diagonal_imaginary() {
        let x = vec![Complex64::new(1.0, 1.0), Complex64::new(0.0, 2.0)];
        let mut a = vec![Complex64::new(0.0, 0.5); 4];
        let _ = her(
            &mut queue(), Layout::ColMajor, Triangle::Upper, 2, 1.0, &x, 0, 1, &mut a, 0, 2,
        )
        .unwrap();
        // diag: |x0|^2 = 2, |x1|^2 = 4; a01 += x0 * conj(x1) = (1+i)(-2i) = 2 - 2i
        assert_eq!(a[0], Complex64::new(2.0, 0.0));
        assert_eq!(a[3], Complex64::new(4.0, 0.0));
        assert_eq!(a[2], Complex64::new(2.0, -1.5));
        // lower element is outside the stored triangle
        assert_eq!(a[1], Complex64::new(0.0, 0.5));
    }

    #[test]
    fn test_hpr2_matches_her2() {
        let n = 3;
        let x: Vec<Complex64> = (0..n).map(|i| Complex64::new(i as f64, 1.0)).collect();
        let y: Vec<Complex64> = (0..n).map(|i| Complex64::new(1.0, -(i as f64))).collect();
        let alpha = Complex64::new(0.5, 2.0);
        for layout in Layout::ALL {
            for triangle in Triangle::ALL {
                let mut full = vec![Complex64::new(0.0, 0.0); n * n];
                let mut ap = vec![Complex64::new(0.0, 0.0); n * (n + 1) / 2];
                let _ = her2(
                    &mut queue(), layout, triangle, n, alpha, &x, 0, 1, &y, 0, 1, &mut full, 0, n,
                )
                .unwrap();
                let _ = hpr2(
                    &mut queue(), layout, triangle, n, alpha, &x, 0, 1, &y, 0, 1, &mut ap, 0,
                )
                .unwrap();
                let t_full = Tri::full(layout, triangle, 0, n);
                let t_pack = Tri::packed(layout, triangle, 0, n);
                for i in 0..n {
                    for j in 0..n {
                        if triangle.contains(i, j) {
                            assert_eq!(full[t_full.at(i, j)], ap[t_pack.at(i, j)]);
                        }
                    }
                }
            }
        }
    }

    #[test]
    fn test_syr2_symmetric_result() {
        let x = vec![1.0f64, 2.0];
        let y = vec![3.0f64, -1.0];
        let mut upper = vec![0.0f64; 4];
        let mut lower = vec![0.0f64; 4];
        let _ = syr2(
            &mut queue(), Layout::RowMajor, Triangle::Upper, 2, 1.0, &x, 0, 1, &y, 0, 1,
            &mut upper, 0, 2,
        )
        .unwrap();
        let _ = syr2(
            &mut queue(), Layout::RowMajor, Triangle::Lower, 2, 1.0, &x, 0, 1, &y, 0, 1,
            &mut lower, 0, 2,
        )
        .unwrap();
        // a01 = x0*y1 + y0*x1 = -1 + 6 = 5
        assert_eq!(upper[1], 5.0);
        assert_eq!(lower[2], 5.0);
        assert_eq!(upper[0], 6.0);
        assert_eq!(upper[3], -4.0);
    }

    #[test]
    fn test_spr_packed_offset() {
        let x = vec![2.0f32, 3.0];
        let mut ap = vec![1.0f32; 4];
        let _ = spr(
            &mut queue(), Layout::ColMajor, Triangle::Lower, 2, 1.0, &x, 0, 1, &mut ap, 1,
        )
        .unwrap();
        assert_eq!(ap, vec![1.0, 5.0, 7.0, 10.0]);
    }
}
