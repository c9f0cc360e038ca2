//! BLAS Level 3: matrix-matrix operations.
//!
//! Output matrices are split into storage lines (rows for row-major, columns
//! for column-major) and the lines are spread over the queue's worker threads.
//! `trsm` parallelises over independent right-hand sides instead, since the
//! solve couples the elements of one line.

use crate::access::{Dense, Tri};
use crate::checks::{check_a, check_b, check_c};
use blasprobe_core::{
    parallel_lines_mut, parallel_map_chunks, ComplexScalar, Diagonal, Event, Layout, Queue, Scalar,
    Side, StatusCode, Transpose, Triangle,
};
use tracing::trace;

/// Shape of an output matrix and which of its elements an update touches.
#[derive(Debug, Clone, Copy)]
struct Output {
    layout: Layout,
    rows: usize,
    cols: usize,
    ld: usize,
    /// Only this triangle is written (rank-k updates).
    triangle: Option<Triangle>,
    /// Force a real diagonal (Hermitian rank-k updates).
    herm: bool,
}

impl Output {
    fn general(layout: Layout, rows: usize, cols: usize, ld: usize) -> Self {
        Self {
            layout,
            rows,
            cols,
            ld,
            triangle: None,
            herm: false,
        }
    }

    fn triangle(layout: Layout, n: usize, ld: usize, triangle: Triangle, herm: bool) -> Self {
        Self {
            layout,
            rows: n,
            cols: n,
            ld,
            triangle: Some(triangle),
            herm,
        }
    }
}

/// c(i, j) := value(i, j) + beta * c(i, j), one storage line per work item.
///
/// `c` starts at the matrix's first element. `beta == 0` overwrites C.
fn write_output<T, F>(threads: usize, out: Output, c: &mut [T], beta: T, value: F)
where
    T: Scalar,
    F: Fn(usize, usize) -> T + Sync,
{
    let line_len = out.layout.leading_dim(out.rows, out.cols);
    let lines = out.layout.lines(out.rows, out.cols);
    parallel_lines_mut(threads, c, out.ld, lines, |line, chunk| {
        for (p, slot) in chunk.iter_mut().take(line_len).enumerate() {
            let (i, j) = match out.layout {
                Layout::RowMajor => (line, p),
                Layout::ColMajor => (p, line),
            };
            if let Some(t) = out.triangle {
                if !t.contains(i, j) {
                    continue;
                }
            }
            let v = value(i, j);
            *slot = if beta == T::zero() { v } else { v + beta * *slot };
            if out.herm && i == j {
                *slot = T::from_real(slot.re());
            }
        }
    });
}

/// Stored shape of an operand whose op() is `rows` x `cols`.
#[inline]
fn stored(trans: Transpose, rows: usize, cols: usize) -> (usize, usize) {
    if trans.is_transposed() {
        (cols, rows)
    } else {
        (rows, cols)
    }
}

// ============================================================================
// GEMM: C := alpha * op(A) * op(B) + beta * C
// ============================================================================

pub fn gemm<T: Scalar>(
    queue: &mut Queue,
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
) -> Result<Event, StatusCode> {
    queue.run(|q| {
        let (ar, ac) = stored(a_transpose, m, k);
        let (br, bc) = stored(b_transpose, k, n);
        check_a(layout.leading_dim(ar, ac), layout.lines(ar, ac), a, a_off, a_ld)?;
        check_b(layout.leading_dim(br, bc), layout.lines(br, bc), b, b_off, b_ld)?;
        check_c(layout.leading_dim(m, n), layout.lines(m, n), c, c_off, c_ld)?;
        if m == 0 || n == 0 {
            return Ok(());
        }
        trace!(m, n, k, threads = q.threads(), "gemm");

        let da = Dense::new(layout, a_off, a_ld);
        let db = Dense::new(layout, b_off, b_ld);
        let out = Output::general(layout, m, n, c_ld);
        write_output(q.threads(), out, &mut c[c_off..], beta, |i, j| {
            if alpha == T::zero() {
                return T::zero();
            }
            let mut acc = T::zero();
            for l in 0..k {
                acc += da.op(a, a_transpose, i, l) * db.op(b, b_transpose, l, j);
            }
            alpha * acc
        });
        Ok(())
    })
}

// ============================================================================
// SYMM / HEMM: C := alpha * A * B + beta * C (Left) or alpha * B * A + beta * C (Right)
// ============================================================================

fn sym_mm<T: Scalar>(
    q: &Queue,
    herm: bool,
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
) -> Result<(), StatusCode> {
    let ka = match side {
        Side::Left => m,
        Side::Right => n,
    };
    check_a(ka, ka, a, a_off, a_ld)?;
    check_b(layout.leading_dim(m, n), layout.lines(m, n), b, b_off, b_ld)?;
    check_c(layout.leading_dim(m, n), layout.lines(m, n), c, c_off, c_ld)?;
    if m == 0 || n == 0 {
        return Ok(());
    }
    let ta = Tri::full(layout, triangle, a_off, a_ld);
    let db = Dense::new(layout, b_off, b_ld);
    let out = Output::general(layout, m, n, c_ld);
    write_output(q.threads(), out, &mut c[c_off..], beta, |i, j| {
        let mut acc = T::zero();
        match side {
            Side::Left => {
                for l in 0..m {
                    acc += ta.sym(a, herm, i, l) * b[db.at(l, j)];
                }
            }
            Side::Right => {
                for l in 0..n {
                    acc += b[db.at(i, l)] * ta.sym(a, herm, l, j);
                }
            }
        }
        alpha * acc
    });
    Ok(())
}

/// Symmetric matrix-matrix multiply.
pub fn symm<T: Scalar>(
    queue: &mut Queue,
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
) -> Result<Event, StatusCode> {
    queue.run(|q| {
        sym_mm(
            q, false, layout, side, triangle, m, n, alpha, a, a_off, a_ld, b, b_off, b_ld, beta,
            c, c_off, c_ld,
        )
    })
}

/// Hermitian matrix-matrix multiply.
pub fn hemm<T: ComplexScalar>(
    queue: &mut Queue,
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
) -> Result<Event, StatusCode> {
    queue.run(|q| {
        sym_mm(
            q, true, layout, side, triangle, m, n, alpha, a, a_off, a_ld, b, b_off, b_ld, beta,
            c, c_off, c_ld,
        )
    })
}

// ============================================================================
// SYRK / HERK / SYR2K / HER2K: rank-k updates of one triangle of C
// ============================================================================

/// Transposes a rank-k update accepts; real Conjugate behaves as Yes.
fn check_rank_k_transpose<T: Scalar>(herm: bool, trans: Transpose) -> Result<(), StatusCode> {
    let complex = T::PRECISION.is_complex();
    let ok = match trans {
        Transpose::No => true,
        Transpose::Yes => !herm,
        Transpose::Conjugate => herm || !complex,
    };
    if ok {
        Ok(())
    } else {
        Err(StatusCode::InvalidTranspose)
    }
}

fn rank_k<T: Scalar>(
    q: &Queue,
    herm: bool,
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
) -> Result<(), StatusCode> {
    check_rank_k_transpose::<T>(herm, a_transpose)?;
    let (ar, ac) = stored(a_transpose, n, k);
    check_a(layout.leading_dim(ar, ac), layout.lines(ar, ac), a, a_off, a_ld)?;
    check_c(n, n, c, c_off, c_ld)?;
    if n == 0 {
        return Ok(());
    }
    let da = Dense::new(layout, a_off, a_ld);
    let out = Output::triangle(layout, n, c_ld, triangle, herm);
    write_output(q.threads(), out, &mut c[c_off..], beta, |i, j| {
        let mut acc = T::zero();
        for l in 0..k {
            let aj = da.op(a, a_transpose, j, l);
            acc += da.op(a, a_transpose, i, l) * if herm { aj.conj() } else { aj };
        }
        alpha * acc
    });
    Ok(())
}

/// C := alpha * op(A) * op(A)^T + beta * C, one triangle of C.
pub fn syrk<T: Scalar>(
    queue: &mut Queue,
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
) -> Result<Event, StatusCode> {
    queue.run(|q| {
        rank_k(
            q, false, layout, triangle, a_transpose, n, k, alpha, a, a_off, a_ld, beta, c, c_off,
            c_ld,
        )
    })
}

/// C := alpha * op(A) * op(A)^H + beta * C with real alpha and beta.
pub fn herk<T: ComplexScalar>(
    queue: &mut Queue,
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
) -> Result<Event, StatusCode> {
    queue.run(|q| {
        rank_k(
            q,
            true,
            layout,
            triangle,
            a_transpose,
            n,
            k,
            T::from_real(alpha),
            a,
            a_off,
            a_ld,
            T::from_real(beta),
            c,
            c_off,
            c_ld,
        )
    })
}

fn rank_2k<T: Scalar>(
    q: &Queue,
    herm: bool,
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
) -> Result<(), StatusCode> {
    check_rank_k_transpose::<T>(herm, ab_transpose)?;
    let (r, cc) = stored(ab_transpose, n, k);
    check_a(layout.leading_dim(r, cc), layout.lines(r, cc), a, a_off, a_ld)?;
    check_b(layout.leading_dim(r, cc), layout.lines(r, cc), b, b_off, b_ld)?;
    check_c(n, n, c, c_off, c_ld)?;
    if n == 0 {
        return Ok(());
    }
    let da = Dense::new(layout, a_off, a_ld);
    let db = Dense::new(layout, b_off, b_ld);
    let alpha2 = if herm { alpha.conj() } else { alpha };
    let h = |v: T| if herm { v.conj() } else { v };
    let out = Output::triangle(layout, n, c_ld, triangle, herm);
    write_output(q.threads(), out, &mut c[c_off..], beta, |i, j| {
        let mut ab = T::zero();
        let mut ba = T::zero();
        for l in 0..k {
            let ai = da.op(a, ab_transpose, i, l);
            let aj = da.op(a, ab_transpose, j, l);
            let bi = db.op(b, ab_transpose, i, l);
            let bj = db.op(b, ab_transpose, j, l);
            ab += ai * h(bj);
            ba += bi * h(aj);
        }
        alpha * ab + alpha2 * ba
    });
    Ok(())
}

/// C := alpha * (op(A) * op(B)^T + op(B) * op(A)^T) + beta * C, one triangle of C.
pub fn syr2k<T: Scalar>(
    queue: &mut Queue,
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
) -> Result<Event, StatusCode> {
    queue.run(|q| {
        rank_2k(
            q, false, layout, triangle, ab_transpose, n, k, alpha, a, a_off, a_ld, b, b_off, b_ld,
            beta, c, c_off, c_ld,
        )
    })
}

/// C := alpha * op(A) * op(B)^H + conj(alpha) * op(B) * op(A)^H + beta * C, real beta.
pub fn her2k<T: ComplexScalar>(
    queue: &mut Queue,
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
) -> Result<Event, StatusCode> {
    queue.run(|q| {
        rank_2k(
            q,
            true,
            layout,
            triangle,
            ab_transpose,
            n,
            k,
            alpha,
            a,
            a_off,
            a_ld,
            b,
            b_off,
            b_ld,
            T::from_real(beta),
            c,
            c_off,
            c_ld,
        )
    })
}

// ============================================================================
// TRMM / TRSM: triangular multiply and solve with multiple right-hand sides
// ============================================================================

/// B := alpha * op(A) * B (Left) or alpha * B * op(A) (Right).
pub fn trmm<T: Scalar>(
    queue: &mut Queue,
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
) -> Result<Event, StatusCode> {
    queue.run(|q| {
        let ka = match side {
            Side::Left => m,
            Side::Right => n,
        };
        check_a(ka, ka, a, a_off, a_ld)?;
        check_b(layout.leading_dim(m, n), layout.lines(m, n), b, b_off, b_ld)?;
        if m == 0 || n == 0 {
            return Ok(());
        }
        let ta = Tri::full(layout, triangle, a_off, a_ld);
        let unit = diagonal.is_unit();
        let src = Dense::new(layout, 0, b_ld);
        let snapshot: Vec<T> = b[b_off..].to_vec();
        let snap = &snapshot;
        let out = Output::general(layout, m, n, b_ld);
        write_output(q.threads(), out, &mut b[b_off..], T::zero(), |i, j| {
            let mut acc = T::zero();
            match side {
                Side::Left => {
                    for l in 0..m {
                        acc += ta.tri_op(a, unit, a_transpose, i, l) * snap[src.at(l, j)];
                    }
                }
                Side::Right => {
                    for l in 0..n {
                        acc += snap[src.at(i, l)] * ta.tri_op(a, unit, a_transpose, l, j);
                    }
                }
            }
            alpha * acc
        });
        Ok(())
    })
}

/// Forward or back substitution on a triangular system given by `coef`.
fn substitute<T: Scalar>(
    mut rhs: Vec<T>,
    upper: bool,
    unit: bool,
    coef: impl Fn(usize, usize) -> T,
) -> Vec<T> {
    let n = rhs.len();
    if upper {
        for i in (0..n).rev() {
            let mut v = rhs[i];
            for j in i + 1..n {
                v -= coef(i, j) * rhs[j];
            }
            if !unit {
                v /= coef(i, i);
            }
            rhs[i] = v;
        }
    } else {
        for i in 0..n {
            let mut v = rhs[i];
            for j in 0..i {
                v -= coef(i, j) * rhs[j];
            }
            if !unit {
                v /= coef(i, i);
            }
            rhs[i] = v;
        }
    }
    rhs
}

/// Solves op(A) * X = alpha * B (Left) or X * op(A) = alpha * B (Right); X overwrites B.
pub fn trsm<T: Scalar>(
    queue: &mut Queue,
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
) -> Result<Event, StatusCode> {
    queue.run(|q| {
        let ka = match side {
            Side::Left => m,
            Side::Right => n,
        };
        check_a(ka, ka, a, a_off, a_ld)?;
        check_b(layout.leading_dim(m, n), layout.lines(m, n), b, b_off, b_ld)?;
        if m == 0 || n == 0 {
            return Ok(());
        }
        let ta = Tri::full(layout, triangle, a_off, a_ld);
        let db = Dense::new(layout, b_off, b_ld);
        let unit = diagonal.is_unit();
        // Left: one system per column of B; Right: one per row.
        let (systems, len) = match side {
            Side::Left => (n, m),
            Side::Right => (m, n),
        };
        let pos = move |s: usize, p: usize| match side {
            Side::Left => db.at(p, s),
            Side::Right => db.at(s, p),
        };

        let solved: Vec<Vec<Vec<T>>> = {
            let rhs_src: &[T] = b;
            parallel_map_chunks(q.threads(), 0, systems, move |start, end| {
                (start..end)
                    .map(|s| {
                        let rhs: Vec<T> = (0..len).map(|p| alpha * rhs_src[pos(s, p)]).collect();
                        match side {
                            Side::Left => substitute(rhs, ta.op_is_upper(a_transpose), unit, |r, c| {
                                ta.tri_op(a, unit, a_transpose, r, c)
                            }),
                            Side::Right => {
                                substitute(rhs, !ta.op_is_upper(a_transpose), unit, |r, c| {
                                    ta.tri_op(a, unit, a_transpose, c, r)
                                })
                            }
                        }
                    })
                    .collect()
            })
        };
        for (s, sol) in solved.into_iter().flatten().enumerate() {
            for (p, v) in sol.into_iter().enumerate() {
                b[pos(s, p)] = v;
            }
        }
        Ok(())
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use blasprobe_core::{Complex64, SplitMix64};

    fn reference_gemm(
        layout: Layout,
        ta: Transpose,
        tb: Transpose,
        m: usize,
        n: usize,
        k: usize,
        a: &[f64],
        lda: usize,
        b: &[f64],
        ldb: usize,
    ) -> Vec<f64> {
        let da = Dense::new(layout, 0, lda);
        let db = Dense::new(layout, 0, ldb);
        let mut c = vec![0.0; m * n];
        for i in 0..m {
            for j in 0..n {
                let mut acc = 0.0;
                for l in 0..k {
                    acc += da.op(a, ta, i, l) * db.op(b, tb, l, j);
                }
                c[layout.index(i, j, layout.leading_dim(m, n))] = acc;
            }
        }
        c
    }

    #[test]
    fn test_gemm_rowmajor_2x2() {
        let a = vec![1.0f32, 2.0, 3.0, 4.0];
        let b = vec![5.0f32, 6.0, 7.0, 8.0];
        let mut c = vec![0.0f32; 4];
        let _ = gemm(
            &mut Queue::new(2), Layout::RowMajor, Transpose::No, Transpose::No, 2, 2, 2, 1.0, &a,
            0, 2, &b, 0, 2, 0.0, &mut c, 0, 2,
        )
        .unwrap();
        assert_eq!(c, vec![19.0, 22.0, 43.0, 50.0]);
    }

    #[test]
    fn test_gemm_all_transposes_and_layouts() {
        let (m, n, k) = (5, 4, 3);
        let mut rng = SplitMix64::new(11);
        let mut a = vec![0.0f64; 15];
        let mut b = vec![0.0f64; 12];
        rng.fill(&mut a);
        rng.fill(&mut b);
        for layout in Layout::ALL {
            for ta in [Transpose::No, Transpose::Yes] {
                for tb in [Transpose::No, Transpose::Yes] {
                    let (ar, ac) = stored(ta, m, k);
                    let (br, bc) = stored(tb, k, n);
                    let lda = layout.leading_dim(ar, ac);
                    let ldb = layout.leading_dim(br, bc);
                    let ldc = layout.leading_dim(m, n);
                    let mut c = vec![0.0f64; m * n];
                    let _ = gemm(
                        &mut Queue::new(3), layout, ta, tb, m, n, k, 1.0, &a, 0, lda, &b, 0, ldb,
                        0.0, &mut c, 0, ldc,
                    )
                    .unwrap();
                    let want = reference_gemm(layout, ta, tb, m, n, k, &a, lda, &b, ldb);
                    for (g, w) in c.iter().zip(&want) {
                        assert!((g - w).abs() < 1e-12, "{layout} {ta} {tb}");
                    }
                }
            }
        }
    }

    #[test]
    fn test_gemm_thread_count_does_not_change_result() {
        let (m, n, k) = (17, 9, 6);
        let mut rng = SplitMix64::new(5);
        let mut a = vec![0.0f32; m * k];
        let mut b = vec![0.0f32; k * n];
        let mut c0 = vec![0.0f32; m * n + 3];
        rng.fill(&mut a);
        rng.fill(&mut b);
        rng.fill(&mut c0);
        let mut c1 = c0.clone();
        let _ = gemm(
            &mut Queue::new(1), Layout::ColMajor, Transpose::No, Transpose::No, m, n, k, 0.5, &a,
            0, m, &b, 0, k, 2.0, &mut c0, 3, m,
        )
        .unwrap();
        let _ = gemm(
            &mut Queue::new(8), Layout::ColMajor, Transpose::No, Transpose::No, m, n, k, 0.5, &a,
            0, m, &b, 0, k, 2.0, &mut c1, 3, m,
        )
        .unwrap();
        assert_eq!(c0, c1);
    }

    #[test]
    fn test_gemm_insufficient_c_leaves_buffers() {
        let a = vec![1.0f64; 4];
        let b = vec![1.0f64; 4];
        let mut c = vec![9.0f64; 3];
        let err = gemm(
            &mut Queue::new(1), Layout::RowMajor, Transpose::No, Transpose::No, 2, 2, 2, 1.0, &a,
            0, 2, &b, 0, 2, 0.0, &mut c, 0, 2,
        )
        .unwrap_err();
        assert_eq!(err, StatusCode::InsufficientMemoryC);
        assert_eq!(c, vec![9.0; 3]);
    }

    #[test]
    fn test_symm_left_and_right() {
        // Symmetric A = [2 1; 1 3] stored upper row-major, B = I
        let a = vec![2.0f64, 1.0, -7.0, 3.0];
        let b = vec![1.0f64, 0.0, 0.0, 1.0];
        for side in Side::ALL {
            let mut c = vec![0.0f64; 4];
            let _ = symm(
                &mut Queue::new(2), Layout::RowMajor, side, Triangle::Upper, 2, 2, 1.0, &a, 0, 2,
                &b, 0, 2, 0.0, &mut c, 0, 2,
            )
            .unwrap();
            assert_eq!(c, vec![2.0, 1.0, 1.0, 3.0], "{side}");
        }
    }

    #[test]
    fn test_syrk_touches_only_triangle() {
        let a = vec![1.0f32, 2.0, 3.0, 4.0]; // 2x2 row-major
        let mut c = vec![-1.0f32; 4];
        let _ = syrk(
            &mut Queue::new(2), Layout::RowMajor, Triangle::Lower, Transpose::No, 2, 2, 1.0, &a,
            0, 2, 0.0, &mut c, 0, 2,
        )
        .unwrap();
        // A A^T = [5 11; 11 25]
        assert_eq!(c, vec![5.0, -1.0, 11.0, 25.0]);
    }

    #[test]
    fn test_rank_k_transpose_rules() {
        let a = vec![Complex64::new(1.0, 0.0); 4];
        let mut c = vec![Complex64::new(0.0, 0.0); 4];
        let one = Complex64::new(1.0, 0.0);
        let err = syrk(
            &mut Queue::new(1), Layout::RowMajor, Triangle::Upper, Transpose::Conjugate, 2, 2,
            one, &a, 0, 2, one, &mut c, 0, 2,
        )
        .unwrap_err();
        assert_eq!(err, StatusCode::InvalidTranspose);
        let err = herk(
            &mut Queue::new(1), Layout::RowMajor, Triangle::Upper, Transpose::Yes, 2, 2, 1.0, &a,
            0, 2, 1.0, &mut c, 0, 2,
        )
        .unwrap_err();
        assert_eq!(err, StatusCode::InvalidTranspose);

        let ar = vec![1.0f64; 4];
        let mut cr = vec![0.0f64; 4];
        assert!(syrk(
            &mut Queue::new(1), Layout::RowMajor, Triangle::Upper, Transpose::Conjugate, 2, 2,
            1.0, &ar, 0, 2, 0.0, &mut cr, 0, 2,
        )
        .is_ok());
    }

    #[test]
    fn test_herk_real_diagonal() {
        let a = vec![Complex64::new(1.0, 1.0), Complex64::new(0.0, 2.0)]; // 2x1 col-major
        let mut c = vec![Complex64::new(0.0, 3.0); 4];
        let _ = herk(
            &mut Queue::new(1), Layout::ColMajor, Triangle::Upper, Transpose::No, 2, 1, 1.0, &a,
            0, 2, 1.0, &mut c, 0, 2,
        )
        .unwrap();
        assert_eq!(c[0], Complex64::new(2.0, 0.0));
        assert_eq!(c[3], Complex64::new(4.0, 0.0));
        // c01 += a0 * conj(a1) = (1+i)(-2i) = 2 - 2i
        assert_eq!(c[2], Complex64::new(2.0, 1.0));
        assert_eq!(c[1], Complex64::new(0.0, 3.0));
    }

    #[test]
    fn test_her2k_matches_two_herk_like_terms() {
        // With B = A, her2k = 2 Re(alpha) * A A^H
        let a = vec![Complex64::new(1.0, -1.0), Complex64::new(2.0, 0.5)];
        let alpha = Complex64::new(0.75, 3.0);
        let mut c2 = vec![Complex64::new(0.0, 0.0); 4];
        let mut c1 = vec![Complex64::new(0.0, 0.0); 4];
        let _ = her2k(
            &mut Queue::new(1), Layout::RowMajor, Triangle::Upper, Transpose::No, 2, 1, alpha,
            &a, 0, 1, &a, 0, 1, 0.0, &mut c2, 0, 2,
        )
        .unwrap();
        let _ = herk(
            &mut Queue::new(1), Layout::RowMajor, Triangle::Upper, Transpose::No, 2, 1, 1.5, &a,
            0, 1, 0.0, &mut c1, 0, 2,
        )
        .unwrap();
        for (x, y) in c2.iter().zip(&c1) {
            assert!((x - y).norm() < 1e-12);
        }
    }

    #[test]
    fn test_trmm_then_trsm_restores_b() {
        let a = vec![2.0f64, 0.5, -1.0, 0.25, 3.0, 0.5, 1.0, -0.5, 4.0];
        let mut rng = SplitMix64::new(21);
        for layout in Layout::ALL {
            for side in Side::ALL {
                for triangle in Triangle::ALL {
                    for trans in [Transpose::No, Transpose::Yes] {
                        let (m, n) = match side {
                            Side::Left => (3, 2),
                            Side::Right => (2, 3),
                        };
                        let ldb = layout.leading_dim(m, n);
                        let mut b = vec![0.0f64; m * n];
                        rng.fill(&mut b);
                        let orig = b.clone();
                        let _ = trmm(
                            &mut Queue::new(2), layout, side, triangle, trans, Diagonal::NonUnit,
                            m, n, 2.0, &a, 0, 3, &mut b, 0, ldb,
                        )
                        .unwrap();
                        let _ = trsm(
                            &mut Queue::new(2), layout, side, triangle, trans, Diagonal::NonUnit,
                            m, n, 0.5, &a, 0, 3, &mut b, 0, ldb,
                        )
                        .unwrap();
                        for (g, w) in b.iter().zip(&orig) {
                            assert!(
                                (g - w).abs() < 1e-10,
                                "{layout} {side} {triangle} {trans}: {g} vs {w}"
                            );
                        }
                    }
                }
            }
        }
    }
}
