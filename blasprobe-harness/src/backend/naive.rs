//! Textbook reference backend.
//!
//! Routines here are written directly from the BLAS definitions, one element
//! at a time, and speak the Fortran vocabulary: options are single ASCII
//! characters (`b'N'`, `b'T'`, `b'C'`, `b'U'`, `b'L'`, ...) plus a layout
//! character, `b'R'` or `b'C'`. Any transpose character other than `b'N'`
//! transposes, as with `LSAME`-style option parsing. Scalars are passed and
//! returned by value.
//!
//! Nothing here validates sizes: callers hand in buffers already checked
//! against the derived sizes.

use blasprobe_core::{Diagonal, Layout, RealScalar, Scalar, Side, Transpose, Triangle};
use num_traits::{Float, Zero};

// ============================================================================
// Option characters
// ============================================================================

pub fn layout_code(layout: Layout) -> u8 {
    match layout {
        Layout::RowMajor => b'R',
        Layout::ColMajor => b'C',
    }
}

pub fn transpose_code(transpose: Transpose) -> u8 {
    match transpose {
        Transpose::No => b'N',
        Transpose::Yes => b'T',
        Transpose::Conjugate => b'C',
    }
}

pub fn triangle_code(triangle: Triangle) -> u8 {
    match triangle {
        Triangle::Upper => b'U',
        Triangle::Lower => b'L',
    }
}

pub fn diagonal_code(diagonal: Diagonal) -> u8 {
    match diagonal {
        Diagonal::Unit => b'U',
        Diagonal::NonUnit => b'N',
    }
}

pub fn side_code(side: Side) -> u8 {
    match side {
        Side::Left => b'L',
        Side::Right => b'R',
    }
}

// ============================================================================
// Element addressing
// ============================================================================

/// Buffer index of stored element (i, j) of a dense matrix.
fn dense(layout: u8, off: usize, ld: usize, i: usize, j: usize) -> usize {
    if layout == b'R' {
        off + i * ld + j
    } else {
        off + j * ld + i
    }
}

/// Buffer index of stored element (i, j) of a packed triangle of order n.
fn packed(layout: u8, uplo: u8, off: usize, n: usize, i: usize, j: usize) -> usize {
    // Row-major packing of one triangle is column-major packing of the other
    // triangle of the transpose.
    let (i, j, upper) = if layout == b'R' {
        (j, i, uplo != b'U')
    } else {
        (i, j, uplo == b'U')
    };
    if upper {
        off + i + j * (j + 1) / 2
    } else {
        off + (i - j) + j * n - j * j.saturating_sub(1) / 2
    }
}

fn in_triangle(uplo: u8, i: usize, j: usize) -> bool {
    if uplo == b'U' {
        i <= j
    } else {
        i >= j
    }
}

fn conj_if<T: Scalar>(yes: bool, v: T) -> T {
    if yes {
        v.conj()
    } else {
        v
    }
}

/// Element (i, j) of op(A) for a general matrix read through `get`.
fn op<T: Scalar>(trans: u8, get: impl Fn(usize, usize) -> T, i: usize, j: usize) -> T {
    if trans == b'N' {
        get(i, j)
    } else {
        conj_if(trans == b'C', get(j, i))
    }
}

/// Element (i, j) of a symmetric or Hermitian matrix stored in triangle `uplo`.
fn symmetric<T: Scalar>(
    herm: bool,
    uplo: u8,
    get: impl Fn(usize, usize) -> T,
    i: usize,
    j: usize,
) -> T {
    if i == j {
        let v = get(i, i);
        return if herm { T::from_real(v.re()) } else { v };
    }
    if in_triangle(uplo, i, j) {
        get(i, j)
    } else {
        conj_if(herm, get(j, i))
    }
}

/// Element (i, j) of a triangular matrix; zero outside `uplo`.
fn triangular<T: Scalar>(
    uplo: u8,
    diag: u8,
    get: impl Fn(usize, usize) -> T,
    i: usize,
    j: usize,
) -> T {
    if i == j && diag == b'U' {
        T::one()
    } else if in_triangle(uplo, i, j) {
        get(i, j)
    } else {
        T::zero()
    }
}

/// Whether op(A) is upper triangular for a triangle stored as `uplo`.
fn op_upper(uplo: u8, trans: u8) -> bool {
    (uplo == b'U') == (trans == b'N')
}

/// Solves `coef * x = rhs` in place for a triangular `coef` of order n.
fn substitute<T: Scalar>(n: usize, upper: bool, coef: impl Fn(usize, usize) -> T, rhs: &mut [T]) {
    if upper {
        for i in (0..n).rev() {
            let mut acc = rhs[i];
            for j in i + 1..n {
                acc -= coef(i, j) * rhs[j];
            }
            rhs[i] = acc / coef(i, i);
        }
    } else {
        for i in 0..n {
            let mut acc = rhs[i];
            for j in 0..i {
                acc -= coef(i, j) * rhs[j];
            }
            rhs[i] = acc / coef(i, i);
        }
    }
}

fn gather<T: Scalar>(n: usize, x: &[T], off: usize, inc: usize) -> Vec<T> {
    (0..n).map(|i| x[off + i * inc]).collect()
}

fn scatter<T: Scalar>(values: &[T], x: &mut [T], off: usize, inc: usize) {
    for (i, &v) in values.iter().enumerate() {
        x[off + i * inc] = v;
    }
}

/// `beta * old + value`, with `beta == 0` discarding `old` entirely.
fn blend<T: Scalar>(beta: T, old: T, value: T) -> T {
    if beta == T::zero() {
        value
    } else {
        beta * old + value
    }
}

// ============================================================================
// Level 1
// ============================================================================

pub fn swap<T: Scalar>(
    n: usize,
    x: &mut [T],
    x_off: usize,
    x_inc: usize,
    y: &mut [T],
    y_off: usize,
    y_inc: usize,
) {
    for i in 0..n {
        std::mem::swap(&mut x[x_off + i * x_inc], &mut y[y_off + i * y_inc]);
    }
}

pub fn scal<T: Scalar>(n: usize, alpha: T, x: &mut [T], x_off: usize, x_inc: usize) {
    for i in 0..n {
        x[x_off + i * x_inc] *= alpha;
    }
}

pub fn copy<T: Scalar>(
    n: usize,
    x: &[T],
    x_off: usize,
    x_inc: usize,
    y: &mut [T],
    y_off: usize,
    y_inc: usize,
) {
    for i in 0..n {
        y[y_off + i * y_inc] = x[x_off + i * x_inc];
    }
}

pub fn axpy<T: Scalar>(
    n: usize,
    alpha: T,
    x: &[T],
    x_off: usize,
    x_inc: usize,
    y: &mut [T],
    y_off: usize,
    y_inc: usize,
) {
    for i in 0..n {
        y[y_off + i * y_inc] += alpha * x[x_off + i * x_inc];
    }
}

/// Unconjugated dot product (`dot` for real, `dotu` for complex).
pub fn dot<T: Scalar>(
    n: usize,
    x: &[T],
    x_off: usize,
    x_inc: usize,
    y: &[T],
    y_off: usize,
    y_inc: usize,
) -> T {
    (0..n).fold(T::zero(), |acc, i| acc + x[x_off + i * x_inc] * y[y_off + i * y_inc])
}

/// Dot product with `x` conjugated.
pub fn dotc<T: Scalar>(
    n: usize,
    x: &[T],
    x_off: usize,
    x_inc: usize,
    y: &[T],
    y_off: usize,
    y_inc: usize,
) -> T {
    (0..n).fold(T::zero(), |acc, i| {
        acc + x[x_off + i * x_inc].conj() * y[y_off + i * y_inc]
    })
}

pub fn nrm2<T: Scalar>(n: usize, x: &[T], x_off: usize, x_inc: usize) -> T::Real {
    let sum = (0..n).fold(T::Real::zero(), |acc, i| acc + x[x_off + i * x_inc].norm_sqr());
    sum.sqrt()
}

pub fn asum<T: Scalar>(n: usize, x: &[T], x_off: usize, x_inc: usize) -> T::Real {
    (0..n).fold(T::Real::zero(), |acc, i| acc + x[x_off + i * x_inc].abs1())
}

/// Zero-based index of the first element with the largest `|re| + |im|`.
pub fn iamax<T: Scalar>(n: usize, x: &[T], x_off: usize, x_inc: usize) -> usize {
    let mut best = 0;
    let mut best_val = T::Real::zero();
    for i in 0..n {
        let v = x[x_off + i * x_inc].abs1();
        if i == 0 || v > best_val {
            best = i;
            best_val = v;
        }
    }
    best
}

/// Applies the plane rotation `[c s; -s c]` to the pairs (x_i, y_i).
pub fn rot<T: RealScalar>(
    n: usize,
    x: &mut [T],
    x_off: usize,
    x_inc: usize,
    y: &mut [T],
    y_off: usize,
    y_inc: usize,
    c: T,
    s: T,
) {
    for i in 0..n {
        let xi = x[x_off + i * x_inc];
        let yi = y[y_off + i * y_inc];
        x[x_off + i * x_inc] = c * xi + s * yi;
        y[y_off + i * y_inc] = c * yi - s * xi;
    }
}

// ============================================================================
// Level 2
// ============================================================================

/// y := alpha * op(A) * x + beta * y for a matrix read through `get`.
fn matvec<T: Scalar>(
    trans: u8,
    m: usize,
    n: usize,
    get: impl Fn(usize, usize) -> T,
    alpha: T,
    x: &[T],
    x_off: usize,
    x_inc: usize,
    beta: T,
    y: &mut [T],
    y_off: usize,
    y_inc: usize,
) {
    let (rows, cols) = if trans == b'N' { (m, n) } else { (n, m) };
    for i in 0..rows {
        let mut acc = T::zero();
        for j in 0..cols {
            acc += op(trans, &get, i, j) * x[x_off + j * x_inc];
        }
        let at = y_off + i * y_inc;
        y[at] = blend(beta, y[at], alpha * acc);
    }
}

pub fn gemv<T: Scalar>(
    layout: u8,
    trans: u8,
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
) {
    let get = |i, j| a[dense(layout, a_off, a_ld, i, j)];
    matvec(trans, m, n, get, alpha, x, x_off, x_inc, beta, y, y_off, y_inc);
}

/// General band matrix-vector product with `kl` sub- and `ku` super-diagonals.
///
/// Column-major bands store A(i, j) at row `ku + i - j` of column j; row-major
/// bands store it at column `kl + j - i` of row i.
pub fn gbmv<T: Scalar>(
    layout: u8,
    trans: u8,
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
) {
    let get = |i: usize, j: usize| {
        if j > i + ku || i > j + kl {
            return T::zero();
        }
        if layout == b'R' {
            a[a_off + i * a_ld + (kl + j - i)]
        } else {
            a[a_off + j * a_ld + (ku + i - j)]
        }
    };
    matvec(trans, m, n, get, alpha, x, x_off, x_inc, beta, y, y_off, y_inc);
}

fn sym_matvec<T: Scalar>(
    herm: bool,
    uplo: u8,
    n: usize,
    get: impl Fn(usize, usize) -> T,
    alpha: T,
    x: &[T],
    x_off: usize,
    x_inc: usize,
    beta: T,
    y: &mut [T],
    y_off: usize,
    y_inc: usize,
) {
    let full = |i, j| symmetric(herm, uplo, &get, i, j);
    matvec(b'N', n, n, full, alpha, x, x_off, x_inc, beta, y, y_off, y_inc);
}

pub fn symv<T: Scalar>(
    layout: u8,
    uplo: u8,
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
) {
    let get = |i, j| a[dense(layout, a_off, a_ld, i, j)];
    sym_matvec(false, uplo, n, get, alpha, x, x_off, x_inc, beta, y, y_off, y_inc);
}

pub fn hemv<T: Scalar>(
    layout: u8,
    uplo: u8,
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
) {
    let get = |i, j| a[dense(layout, a_off, a_ld, i, j)];
    sym_matvec(true, uplo, n, get, alpha, x, x_off, x_inc, beta, y, y_off, y_inc);
}

pub fn spmv<T: Scalar>(
    layout: u8,
    uplo: u8,
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
) {
    let get = |i, j| ap[packed(layout, uplo, ap_off, n, i, j)];
    sym_matvec(false, uplo, n, get, alpha, x, x_off, x_inc, beta, y, y_off, y_inc);
}

pub fn hpmv<T: Scalar>(
    layout: u8,
    uplo: u8,
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
) {
    let get = |i, j| ap[packed(layout, uplo, ap_off, n, i, j)];
    sym_matvec(true, uplo, n, get, alpha, x, x_off, x_inc, beta, y, y_off, y_inc);
}

/// x := op(T) * x for a triangle read through `get`.
fn tri_matvec<T: Scalar>(
    uplo: u8,
    trans: u8,
    diag: u8,
    n: usize,
    get: impl Fn(usize, usize) -> T,
    x: &mut [T],
    x_off: usize,
    x_inc: usize,
) {
    let tri = |i, j| triangular(uplo, diag, &get, i, j);
    let old = gather(n, x, x_off, x_inc);
    let new: Vec<T> = (0..n)
        .map(|i| (0..n).fold(T::zero(), |acc, j| acc + op(trans, &tri, i, j) * old[j]))
        .collect();
    scatter(&new, x, x_off, x_inc);
}

pub fn trmv<T: Scalar>(
    layout: u8,
    uplo: u8,
    trans: u8,
    diag: u8,
    n: usize,
    a: &[T],
    a_off: usize,
    a_ld: usize,
    x: &mut [T],
    x_off: usize,
    x_inc: usize,
) {
    let get = |i, j| a[dense(layout, a_off, a_ld, i, j)];
    tri_matvec(uplo, trans, diag, n, get, x, x_off, x_inc);
}

pub fn tpmv<T: Scalar>(
    layout: u8,
    uplo: u8,
    trans: u8,
    diag: u8,
    n: usize,
    ap: &[T],
    ap_off: usize,
    x: &mut [T],
    x_off: usize,
    x_inc: usize,
) {
    let get = |i, j| ap[packed(layout, uplo, ap_off, n, i, j)];
    tri_matvec(uplo, trans, diag, n, get, x, x_off, x_inc);
}

/// Solves op(T) * x = b, with b given in and the solution written to x.
pub fn trsv<T: Scalar>(
    layout: u8,
    uplo: u8,
    trans: u8,
    diag: u8,
    n: usize,
    a: &[T],
    a_off: usize,
    a_ld: usize,
    x: &mut [T],
    x_off: usize,
    x_inc: usize,
) {
    let get = |i, j| a[dense(layout, a_off, a_ld, i, j)];
    let tri = |i, j| triangular(uplo, diag, get, i, j);
    let mut rhs = gather(n, x, x_off, x_inc);
    substitute(n, op_upper(uplo, trans), |i, j| op(trans, tri, i, j), &mut rhs);
    scatter(&rhs, x, x_off, x_inc);
}

/// A(i, j) += alpha * x_i * y_j, with y conjugated when `conj_y`.
fn rank1<T: Scalar>(
    conj_y: bool,
    layout: u8,
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
) {
    for i in 0..m {
        for j in 0..n {
            let yj = conj_if(conj_y, y[y_off + j * y_inc]);
            a[dense(layout, a_off, a_ld, i, j)] += alpha * x[x_off + i * x_inc] * yj;
        }
    }
}

/// Unconjugated rank-1 update (`ger` for real, `geru` for complex).
pub fn ger<T: Scalar>(
    layout: u8,
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
) {
    rank1(false, layout, m, n, alpha, x, x_off, x_inc, y, y_off, y_inc, a, a_off, a_ld);
}

pub fn gerc<T: Scalar>(
    layout: u8,
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
) {
    rank1(true, layout, m, n, alpha, x, x_off, x_inc, y, y_off, y_inc, a, a_off, a_ld);
}

/// Stored-triangle update `A(i, j) += f(i, j)`; Hermitian diagonals end real.
fn update_triangle<T: Scalar>(
    herm: bool,
    uplo: u8,
    n: usize,
    a: &mut [T],
    index: impl Fn(usize, usize) -> usize,
    f: impl Fn(usize, usize) -> T,
) {
    for i in 0..n {
        for j in 0..n {
            if !in_triangle(uplo, i, j) {
                continue;
            }
            let at = index(i, j);
            a[at] += f(i, j);
            if herm && i == j {
                a[at] = T::from_real(a[at].re());
            }
        }
    }
}

fn sym_rank1<T: Scalar>(
    herm: bool,
    uplo: u8,
    n: usize,
    alpha: T,
    x: &[T],
    x_off: usize,
    x_inc: usize,
    a: &mut [T],
    index: impl Fn(usize, usize) -> usize,
) {
    let xv = gather(n, x, x_off, x_inc);
    update_triangle(herm, uplo, n, a, index, |i, j| alpha * xv[i] * conj_if(herm, xv[j]));
}

pub fn syr<T: Scalar>(
    layout: u8,
    uplo: u8,
    n: usize,
    alpha: T,
    x: &[T],
    x_off: usize,
    x_inc: usize,
    a: &mut [T],
    a_off: usize,
    a_ld: usize,
) {
    let index = |i, j| dense(layout, a_off, a_ld, i, j);
    sym_rank1(false, uplo, n, alpha, x, x_off, x_inc, a, index);
}

pub fn her<T: Scalar>(
    layout: u8,
    uplo: u8,
    n: usize,
    alpha: T::Real,
    x: &[T],
    x_off: usize,
    x_inc: usize,
    a: &mut [T],
    a_off: usize,
    a_ld: usize,
) {
    let index = |i, j| dense(layout, a_off, a_ld, i, j);
    sym_rank1(true, uplo, n, T::from_real(alpha), x, x_off, x_inc, a, index);
}

pub fn spr<T: Scalar>(
    layout: u8,
    uplo: u8,
    n: usize,
    alpha: T,
    x: &[T],
    x_off: usize,
    x_inc: usize,
    ap: &mut [T],
    ap_off: usize,
) {
    let index = |i, j| packed(layout, uplo, ap_off, n, i, j);
    sym_rank1(false, uplo, n, alpha, x, x_off, x_inc, ap, index);
}

pub fn hpr<T: Scalar>(
    layout: u8,
    uplo: u8,
    n: usize,
    alpha: T::Real,
    x: &[T],
    x_off: usize,
    x_inc: usize,
    ap: &mut [T],
    ap_off: usize,
) {
    let index = |i, j| packed(layout, uplo, ap_off, n, i, j);
    sym_rank1(true, uplo, n, T::from_real(alpha), x, x_off, x_inc, ap, index);
}

/// Rank-2 update of one triangle:
/// `alpha x y^T + alpha y x^T`, or `alpha x y^H + conj(alpha) y x^H` when Hermitian.
fn sym_rank2<T: Scalar>(
    herm: bool,
    uplo: u8,
    n: usize,
    alpha: T,
    x: &[T],
    x_off: usize,
    x_inc: usize,
    y: &[T],
    y_off: usize,
    y_inc: usize,
    a: &mut [T],
    index: impl Fn(usize, usize) -> usize,
) {
    let xv = gather(n, x, x_off, x_inc);
    let yv = gather(n, y, y_off, y_inc);
    let alpha2 = conj_if(herm, alpha);
    update_triangle(herm, uplo, n, a, index, |i, j| {
        alpha * xv[i] * conj_if(herm, yv[j]) + alpha2 * yv[i] * conj_if(herm, xv[j])
    });
}

pub fn syr2<T: Scalar>(
    layout: u8,
    uplo: u8,
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
) {
    let index = |i, j| dense(layout, a_off, a_ld, i, j);
    sym_rank2(false, uplo, n, alpha, x, x_off, x_inc, y, y_off, y_inc, a, index);
}

pub fn her2<T: Scalar>(
    layout: u8,
    uplo: u8,
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
) {
    let index = |i, j| dense(layout, a_off, a_ld, i, j);
    sym_rank2(true, uplo, n, alpha, x, x_off, x_inc, y, y_off, y_inc, a, index);
}

pub fn spr2<T: Scalar>(
    layout: u8,
    uplo: u8,
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
) {
    let index = |i, j| packed(layout, uplo, ap_off, n, i, j);
    sym_rank2(false, uplo, n, alpha, x, x_off, x_inc, y, y_off, y_inc, ap, index);
}

pub fn hpr2<T: Scalar>(
    layout: u8,
    uplo: u8,
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
) {
    let index = |i, j| packed(layout, uplo, ap_off, n, i, j);
    sym_rank2(true, uplo, n, alpha, x, x_off, x_inc, y, y_off, y_inc, ap, index);
}

// ============================================================================
// Level 3
// ============================================================================

/// C(i, j) := beta * C(i, j) + value(i, j) over an m x n region (or one triangle).
fn update_matrix<T: Scalar>(
    layout: u8,
    m: usize,
    n: usize,
    only: Option<u8>,
    herm_diag: bool,
    beta: T,
    c: &mut [T],
    c_off: usize,
    c_ld: usize,
    value: impl Fn(usize, usize) -> T,
) {
    for i in 0..m {
        for j in 0..n {
            if let Some(uplo) = only {
                if !in_triangle(uplo, i, j) {
                    continue;
                }
            }
            let at = dense(layout, c_off, c_ld, i, j);
            c[at] = blend(beta, c[at], value(i, j));
            if herm_diag && i == j {
                c[at] = T::from_real(c[at].re());
            }
        }
    }
}

pub fn gemm<T: Scalar>(
    layout: u8,
    trans_a: u8,
    trans_b: u8,
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
) {
    let ga = |i, j| a[dense(layout, a_off, a_ld, i, j)];
    let gb = |i, j| b[dense(layout, b_off, b_ld, i, j)];
    update_matrix(layout, m, n, None, false, beta, c, c_off, c_ld, |i, j| {
        let acc = (0..k).fold(T::zero(), |acc, l| {
            acc + op(trans_a, ga, i, l) * op(trans_b, gb, l, j)
        });
        alpha * acc
    });
}

fn sym_matmat<T: Scalar>(
    herm: bool,
    layout: u8,
    side: u8,
    uplo: u8,
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
) {
    let ga = |i, j| a[dense(layout, a_off, a_ld, i, j)];
    let sa = |i, j| symmetric(herm, uplo, ga, i, j);
    let gb = |i, j| b[dense(layout, b_off, b_ld, i, j)];
    update_matrix(layout, m, n, None, false, beta, c, c_off, c_ld, |i, j| {
        let acc = if side == b'L' {
            (0..m).fold(T::zero(), |acc, l| acc + sa(i, l) * gb(l, j))
        } else {
            (0..n).fold(T::zero(), |acc, l| acc + gb(i, l) * sa(l, j))
        };
        alpha * acc
    });
}

pub fn symm<T: Scalar>(
    layout: u8,
    side: u8,
    uplo: u8,
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
) {
    sym_matmat(
        false, layout, side, uplo, m, n, alpha, a, a_off, a_ld, b, b_off, b_ld, beta, c, c_off,
        c_ld,
    );
}

pub fn hemm<T: Scalar>(
    layout: u8,
    side: u8,
    uplo: u8,
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
) {
    sym_matmat(
        true, layout, side, uplo, m, n, alpha, a, a_off, a_ld, b, b_off, b_ld, beta, c, c_off,
        c_ld,
    );
}

/// One triangle of `alpha * op(A) * op(A)^T` (or `^H` when Hermitian) into C.
fn rank_k<T: Scalar>(
    herm: bool,
    layout: u8,
    uplo: u8,
    trans: u8,
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
) {
    let ga = |i, j| a[dense(layout, a_off, a_ld, i, j)];
    update_matrix(layout, n, n, Some(uplo), herm, beta, c, c_off, c_ld, |i, j| {
        let acc = (0..k).fold(T::zero(), |acc, l| {
            acc + op(trans, ga, i, l) * conj_if(herm, op(trans, ga, j, l))
        });
        alpha * acc
    });
}

pub fn syrk<T: Scalar>(
    layout: u8,
    uplo: u8,
    trans: u8,
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
) {
    rank_k(false, layout, uplo, trans, n, k, alpha, a, a_off, a_ld, beta, c, c_off, c_ld);
}

pub fn herk<T: Scalar>(
    layout: u8,
    uplo: u8,
    trans: u8,
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
) {
    rank_k(
        true,
        layout,
        uplo,
        trans,
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
    );
}

fn rank_2k<T: Scalar>(
    herm: bool,
    layout: u8,
    uplo: u8,
    trans: u8,
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
) {
    let ga = |i, j| a[dense(layout, a_off, a_ld, i, j)];
    let gb = |i, j| b[dense(layout, b_off, b_ld, i, j)];
    let alpha2 = conj_if(herm, alpha);
    update_matrix(layout, n, n, Some(uplo), herm, beta, c, c_off, c_ld, |i, j| {
        let mut ab = T::zero();
        let mut ba = T::zero();
        for l in 0..k {
            ab += op(trans, ga, i, l) * conj_if(herm, op(trans, gb, j, l));
            ba += op(trans, gb, i, l) * conj_if(herm, op(trans, ga, j, l));
        }
        alpha * ab + alpha2 * ba
    });
}

pub fn syr2k<T: Scalar>(
    layout: u8,
    uplo: u8,
    trans: u8,
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
) {
    rank_2k(
        false, layout, uplo, trans, n, k, alpha, a, a_off, a_ld, b, b_off, b_ld, beta, c, c_off,
        c_ld,
    );
}

pub fn her2k<T: Scalar>(
    layout: u8,
    uplo: u8,
    trans: u8,
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
) {
    rank_2k(
        true,
        layout,
        uplo,
        trans,
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
    );
}

/// B := alpha * op(T) * B (side `L`) or alpha * B * op(T) (side `R`).
pub fn trmm<T: Scalar>(
    layout: u8,
    side: u8,
    uplo: u8,
    trans: u8,
    diag: u8,
    m: usize,
    n: usize,
    alpha: T,
    a: &[T],
    a_off: usize,
    a_ld: usize,
    b: &mut [T],
    b_off: usize,
    b_ld: usize,
) {
    let ga = |i, j| a[dense(layout, a_off, a_ld, i, j)];
    let ta = |i, j| triangular(uplo, diag, ga, i, j);
    let old = b.to_vec();
    let gb = |i, j| old[dense(layout, b_off, b_ld, i, j)];
    for i in 0..m {
        for j in 0..n {
            let acc = if side == b'L' {
                (0..m).fold(T::zero(), |acc, l| acc + op(trans, ta, i, l) * gb(l, j))
            } else {
                (0..n).fold(T::zero(), |acc, l| acc + gb(i, l) * op(trans, ta, l, j))
            };
            b[dense(layout, b_off, b_ld, i, j)] = alpha * acc;
        }
    }
}

/// Solves op(T) * X = alpha * B (side `L`) or X * op(T) = alpha * B (side `R`); X overwrites B.
pub fn trsm<T: Scalar>(
    layout: u8,
    side: u8,
    uplo: u8,
    trans: u8,
    diag: u8,
    m: usize,
    n: usize,
    alpha: T,
    a: &[T],
    a_off: usize,
    a_ld: usize,
    b: &mut [T],
    b_off: usize,
    b_ld: usize,
) {
    let ga = |i, j| a[dense(layout, a_off, a_ld, i, j)];
    let ta = |i, j| triangular(uplo, diag, ga, i, j);
    let upper = op_upper(uplo, trans);
    if side == b'L' {
        for j in 0..n {
            let mut col: Vec<T> = (0..m)
                .map(|i| alpha * b[dense(layout, b_off, b_ld, i, j)])
                .collect();
            substitute(m, upper, |p, q| op(trans, ta, p, q), &mut col);
            for (i, v) in col.into_iter().enumerate() {
                b[dense(layout, b_off, b_ld, i, j)] = v;
            }
        }
    } else {
        // Row i of X solves op(T)^T * x = alpha * b_i, whose matrix flips triangle.
        for i in 0..m {
            let mut row: Vec<T> = (0..n)
                .map(|j| alpha * b[dense(layout, b_off, b_ld, i, j)])
                .collect();
            substitute(n, !upper, |p, q| op(trans, ta, q, p), &mut row);
            for (j, v) in row.into_iter().enumerate() {
                b[dense(layout, b_off, b_ld, i, j)] = v;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use blasprobe_core::Complex64;

    #[test]
    fn test_packed_positions_cover_the_triangle() {
        for layout in [b'R', b'C'] {
            for uplo in [b'U', b'L'] {
                let n = 4;
                let mut seen = vec![false; n * (n + 1) / 2];
                for i in 0..n {
                    for j in 0..n {
                        if in_triangle(uplo, i, j) {
                            let at = packed(layout, uplo, 0, n, i, j);
                            assert!(!seen[at], "position {at} visited twice");
                            seen[at] = true;
                        }
                    }
                }
                assert!(seen.iter().all(|&s| s));
            }
        }
    }

    #[test]
    fn test_gemv_transposed_row_major() {
        // A = [1 2 3; 4 5 6], x = [1, 1], A^T x = [5, 7, 9]
        let a = [1.0f64, 2.0, 3.0, 4.0, 5.0, 6.0];
        let x = [1.0, 1.0];
        let mut y = [0.0; 3];
        gemv(b'R', b'T', 2, 3, 1.0, &a, 0, 3, &x, 0, 1, 0.0, &mut y, 0, 1);
        assert_eq!(y, [5.0, 7.0, 9.0]);
    }

    #[test]
    fn test_gbmv_matches_dense_tridiagonal() {
        // 3x3 tridiagonal, column-major band with kl = ku = 1, lda = 3:
        // [2 1 0; 1 2 1; 0 1 2]
        let band = [0.0f64, 2.0, 1.0, 1.0, 2.0, 1.0, 1.0, 2.0, 0.0];
        let x = [1.0, 2.0, 3.0];
        let mut y = [0.0; 3];
        gbmv(b'C', b'N', 3, 3, 1, 1, 1.0, &band, 0, 3, &x, 0, 1, 0.0, &mut y, 0, 1);
        assert_eq!(y, [4.0, 8.0, 8.0]);
    }

    #[test]
    fn test_conjugate_transpose_conjugates() {
        let a = [Complex64::new(0.0, 1.0)];
        let x = [Complex64::new(1.0, 0.0)];
        let mut yt = [Complex64::new(0.0, 0.0)];
        let mut yc = [Complex64::new(0.0, 0.0)];
        let one = Complex64::new(1.0, 0.0);
        let zero = Complex64::new(0.0, 0.0);
        gemv(b'C', b'T', 1, 1, one, &a, 0, 1, &x, 0, 1, zero, &mut yt, 0, 1);
        gemv(b'C', b'C', 1, 1, one, &a, 0, 1, &x, 0, 1, zero, &mut yc, 0, 1);
        assert_eq!(yt[0], Complex64::new(0.0, 1.0));
        assert_eq!(yc[0], Complex64::new(0.0, -1.0));
    }

    #[test]
    fn test_trsv_inverts_trmv() {
        let a = [2.0f64, 1.0, 0.5, 0.0, 3.0, -1.0, 0.0, 0.0, 4.0];
        for trans in [b'N', b'T'] {
            let mut x = [1.0, -2.0, 0.5];
            trmv(b'R', b'U', trans, b'N', 3, &a, 0, 3, &mut x, 0, 1);
            trsv(b'R', b'U', trans, b'N', 3, &a, 0, 3, &mut x, 0, 1);
            for (got, want) in x.iter().zip([1.0, -2.0, 0.5]) {
                assert!((got - want).abs() < 1e-12);
            }
        }
    }

    #[test]
    fn test_hpr2_keeps_diagonal_real() {
        let n = 2;
        let mut ap = vec![Complex64::new(1.0, 0.5); 3];
        let x = [Complex64::new(1.0, 2.0), Complex64::new(-1.0, 0.0)];
        let y = [Complex64::new(0.5, -1.0), Complex64::new(2.0, 1.0)];
        hpr2(b'C', b'U', n, Complex64::new(1.0, 1.0), &x, 0, 1, &y, 0, 1, &mut ap, 0);
        assert_eq!(ap[0].im, 0.0);
        assert_eq!(ap[2].im, 0.0);
    }

    #[test]
    fn test_iamax_takes_first_maximum() {
        let x = [1.0f32, -3.0, 3.0, 2.0];
        assert_eq!(iamax(4, &x, 0, 1), 1);
        assert_eq!(iamax(0, &x, 0, 1), 0);
    }

    #[test]
    fn test_trsm_right_solves() {
        // X * A = B with A = [2 1; 0 4] (upper), B = [2 9]  =>  X = [1 2]
        let a = [2.0f64, 1.0, 0.0, 4.0];
        let mut b = [2.0, 9.0];
        trsm(b'R', b'R', b'U', b'N', b'N', 1, 2, 1.0, &a, 0, 2, &mut b, 0, 2);
        assert!((b[0] - 1.0).abs() < 1e-12 && (b[1] - 2.0).abs() < 1e-12);
    }
}
