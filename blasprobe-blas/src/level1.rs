//! BLAS Level 1: vector-vector operations.
//!
//! Every vector argument is a slice plus an element offset and increment.
//! Single-value results are written to a result buffer at its own offset.

use crate::checks::{check_scalar, check_x, check_y};
use blasprobe_core::{ComplexScalar, Event, Queue, RealScalar, Scalar, StatusCode};
use num_traits::{Float, One, Zero};

// ============================================================================
// SWAP / SCAL / COPY / AXPY
// ============================================================================

/// x <-> y
pub fn swap<T: Scalar>(
    queue: &mut Queue,
    n: usize,
    x: &mut [T],
    x_off: usize,
    x_inc: usize,
    y: &mut [T],
    y_off: usize,
    y_inc: usize,
) -> Result<Event, StatusCode> {
    queue.run(|_| {
        check_x(n, x, x_off, x_inc)?;
        check_y(n, y, y_off, y_inc)?;
        for i in 0..n {
            std::mem::swap(&mut x[x_off + i * x_inc], &mut y[y_off + i * y_inc]);
        }
        Ok(())
    })
}

/// x := alpha * x
pub fn scal<T: Scalar>(
    queue: &mut Queue,
    n: usize,
    alpha: T,
    x: &mut [T],
    x_off: usize,
    x_inc: usize,
) -> Result<Event, StatusCode> {
    queue.run(|_| {
        check_x(n, x, x_off, x_inc)?;
        for i in 0..n {
            x[x_off + i * x_inc] *= alpha;
        }
        Ok(())
    })
}

/// y := x
pub fn copy<T: Scalar>(
    queue: &mut Queue,
    n: usize,
    x: &[T],
    x_off: usize,
    x_inc: usize,
    y: &mut [T],
    y_off: usize,
    y_inc: usize,
) -> Result<Event, StatusCode> {
    queue.run(|_| {
        check_x(n, x, x_off, x_inc)?;
        check_y(n, y, y_off, y_inc)?;
        if x_inc == 1 && y_inc == 1 {
            y[y_off..y_off + n].copy_from_slice(&x[x_off..x_off + n]);
        } else {
            for i in 0..n {
                y[y_off + i * y_inc] = x[x_off + i * x_inc];
            }
        }
        Ok(())
    })
}

/// y := alpha * x + y
pub fn axpy<T: Scalar>(
    queue: &mut Queue,
    n: usize,
    alpha: T,
    x: &[T],
    x_off: usize,
    x_inc: usize,
    y: &mut [T],
    y_off: usize,
    y_inc: usize,
) -> Result<Event, StatusCode> {
    queue.run(|_| {
        check_x(n, x, x_off, x_inc)?;
        check_y(n, y, y_off, y_inc)?;
        if alpha == T::zero() {
            return Ok(());
        }
        for i in 0..n {
            y[y_off + i * y_inc] += alpha * x[x_off + i * x_inc];
        }
        Ok(())
    })
}

// ============================================================================
// DOT family: result written to `dot[dot_off]`
// ============================================================================

fn dot_kernel<T: Scalar>(
    queue: &mut Queue,
    conj_x: bool,
    n: usize,
    dot: &mut [T],
    dot_off: usize,
    x: &[T],
    x_off: usize,
    x_inc: usize,
    y: &[T],
    y_off: usize,
    y_inc: usize,
) -> Result<Event, StatusCode> {
    queue.run(|_| {
        check_x(n, x, x_off, x_inc)?;
        check_y(n, y, y_off, y_inc)?;
        check_scalar(dot, dot_off)?;
        let mut acc = T::zero();
        for i in 0..n {
            let xi = x[x_off + i * x_inc];
            let xi = if conj_x { xi.conj() } else { xi };
            acc += xi * y[y_off + i * y_inc];
        }
        dot[dot_off] = acc;
        Ok(())
    })
}

/// dot := x^T * y (real)
pub fn dot<T: RealScalar>(
    queue: &mut Queue,
    n: usize,
    dot: &mut [T],
    dot_off: usize,
    x: &[T],
    x_off: usize,
    x_inc: usize,
    y: &[T],
    y_off: usize,
    y_inc: usize,
) -> Result<Event, StatusCode> {
    dot_kernel(queue, false, n, dot, dot_off, x, x_off, x_inc, y, y_off, y_inc)
}

/// dot := x^T * y (complex, unconjugated)
pub fn dotu<T: ComplexScalar>(
    queue: &mut Queue,
    n: usize,
    dot: &mut [T],
    dot_off: usize,
    x: &[T],
    x_off: usize,
    x_inc: usize,
    y: &[T],
    y_off: usize,
    y_inc: usize,
) -> Result<Event, StatusCode> {
    dot_kernel(queue, false, n, dot, dot_off, x, x_off, x_inc, y, y_off, y_inc)
}

/// dot := x^H * y
pub fn dotc<T: ComplexScalar>(
    queue: &mut Queue,
    n: usize,
    dot: &mut [T],
    dot_off: usize,
    x: &[T],
    x_off: usize,
    x_inc: usize,
    y: &[T],
    y_off: usize,
    y_inc: usize,
) -> Result<Event, StatusCode> {
    dot_kernel(queue, true, n, dot, dot_off, x, x_off, x_inc, y, y_off, y_inc)
}

// ============================================================================
// Reductions: NRM2 / ASUM / AMAX
// ============================================================================

/// nrm2 := sqrt(sum |x_i|^2), stored as a real value.
///
/// Accumulates with a running scale so large or tiny inputs do not over/underflow.
pub fn nrm2<T: Scalar>(
    queue: &mut Queue,
    n: usize,
    nrm2: &mut [T],
    nrm2_off: usize,
    x: &[T],
    x_off: usize,
    x_inc: usize,
) -> Result<Event, StatusCode> {
    queue.run(|_| {
        check_x(n, x, x_off, x_inc)?;
        check_scalar(nrm2, nrm2_off)?;
        let mut scale = T::Real::zero();
        let mut ssq = T::Real::one();
        for i in 0..n {
            let v = x[x_off + i * x_inc];
            for part in [v.re(), v.im()] {
                if part != T::Real::zero() {
                    let a = part.abs();
                    if scale < a {
                        let r = scale / a;
                        ssq = T::Real::one() + ssq * r * r;
                        scale = a;
                    } else {
                        let r = a / scale;
                        ssq += r * r;
                    }
                }
            }
        }
        nrm2[nrm2_off] = T::from_real(scale * ssq.sqrt());
        Ok(())
    })
}

/// asum := sum (|re x_i| + |im x_i|), stored as a real value.
pub fn asum<T: Scalar>(
    queue: &mut Queue,
    n: usize,
    asum: &mut [T],
    asum_off: usize,
    x: &[T],
    x_off: usize,
    x_inc: usize,
) -> Result<Event, StatusCode> {
    queue.run(|_| {
        check_x(n, x, x_off, x_inc)?;
        check_scalar(asum, asum_off)?;
        let mut acc = T::Real::zero();
        for i in 0..n {
            acc += x[x_off + i * x_inc].abs1();
        }
        asum[asum_off] = T::from_real(acc);
        Ok(())
    })
}

/// imax := first zero-based index of max (|re x_i| + |im x_i|), stored as an element.
pub fn amax<T: Scalar>(
    queue: &mut Queue,
    n: usize,
    imax: &mut [T],
    imax_off: usize,
    x: &[T],
    x_off: usize,
    x_inc: usize,
) -> Result<Event, StatusCode> {
    queue.run(|_| {
        check_x(n, x, x_off, x_inc)?;
        check_scalar(imax, imax_off)?;
        let mut best = 0usize;
        let mut best_val = T::Real::neg_infinity();
        for i in 0..n {
            let v = x[x_off + i * x_inc].abs1();
            if v > best_val {
                best_val = v;
                best = i;
            }
        }
        imax[imax_off] = T::from_real(T::Real::from_usize(best));
        Ok(())
    })
}

// ============================================================================
// ROT: plane rotation
// ============================================================================

/// [x; y] := [c s; -s c] * [x; y]
pub fn rot<T: RealScalar>(
    queue: &mut Queue,
    n: usize,
    x: &mut [T],
    x_off: usize,
    x_inc: usize,
    y: &mut [T],
    y_off: usize,
    y_inc: usize,
    c: T,
    s: T,
) -> Result<Event, StatusCode> {
    queue.run(|_| {
        check_x(n, x, x_off, x_inc)?;
        check_y(n, y, y_off, y_inc)?;
        for i in 0..n {
            let xi = x[x_off + i * x_inc];
            let yi = y[y_off + i * y_inc];
            x[x_off + i * x_inc] = c * xi + s * yi;
            y[y_off + i * y_inc] = c * yi - s * xi;
        }
        Ok(())
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use blasprobe_core::Complex32;

    fn queue() -> Queue {
        Queue::new(2)
    }

    #[test]
    fn test_dot() {
        let x = vec![1.0f32, 2.0, 3.0, 4.0];
        let y = vec![5.0f32, 6.0, 7.0, 8.0];
        let mut out = vec![0.0f32; 2];
        let _ = dot(&mut queue(), 4, &mut out, 1, &x, 0, 1, &y, 0, 1).unwrap();
        assert_eq!(out, vec![0.0, 70.0]);
    }

    #[test]
    fn test_dot_strided_with_offsets() {
        let x = vec![9.0f64, 1.0, 0.0, 2.0, 0.0, 3.0];
        let y = vec![4.0f64, 0.0, 5.0, 0.0, 6.0];
        let mut out = vec![0.0f64];
        let _ = dot(&mut queue(), 3, &mut out, 0, &x, 1, 2, &y, 0, 2).unwrap();
        assert_eq!(out[0], 32.0);
    }

    #[test]
    fn test_dotc_conjugates_x() {
        let x = vec![Complex32::new(1.0, 2.0)];
        let y = vec![Complex32::new(3.0, 4.0)];
        let mut u = vec![Complex32::new(0.0, 0.0)];
        let mut c = vec![Complex32::new(0.0, 0.0)];
        let _ = dotu(&mut queue(), 1, &mut u, 0, &x, 0, 1, &y, 0, 1).unwrap();
        let _ = dotc(&mut queue(), 1, &mut c, 0, &x, 0, 1, &y, 0, 1).unwrap();
        assert_eq!(u[0], Complex32::new(-5.0, 10.0));
        assert_eq!(c[0], Complex32::new(11.0, -2.0));
    }

    #[test]
    fn test_axpy() {
        let x = vec![1.0f32, 2.0, 3.0, 4.0];
        let mut y = vec![10.0f32, 20.0, 30.0, 40.0];
        let _ = axpy(&mut queue(), 4, 2.0, &x, 0, 1, &mut y, 0, 1).unwrap();
        assert_eq!(y, vec![12.0, 24.0, 36.0, 48.0]);
    }

    #[test]
    fn test_axpy_strided() {
        let x = vec![1.0f32, 0.0, 2.0, 0.0, 3.0];
        let mut y = vec![10.0f32, 0.0, 20.0, 0.0, 30.0];
        let _ = axpy(&mut queue(), 3, 2.0, &x, 0, 2, &mut y, 0, 2).unwrap();
        assert_eq!(y, vec![12.0, 0.0, 24.0, 0.0, 36.0]);
    }

    #[test]
    fn test_scal_and_copy() {
        let mut x = vec![1.0f64, 2.0, 3.0, 4.0];
        let _ = scal(&mut queue(), 4, 3.0, &mut x, 0, 1).unwrap();
        assert_eq!(x, vec![3.0, 6.0, 9.0, 12.0]);
        let mut y = vec![0.0f64; 5];
        let _ = copy(&mut queue(), 2, &x, 2, 1, &mut y, 1, 2).unwrap();
        assert_eq!(y, vec![0.0, 9.0, 0.0, 12.0, 0.0]);
    }

    #[test]
    fn test_swap() {
        let mut x = vec![1.0f32, 2.0, 3.0];
        let mut y = vec![4.0f32, 5.0, 6.0];
        let _ = swap(&mut queue(), 3, &mut x, 0, 1, &mut y, 0, 1).unwrap();
        assert_eq!(x, vec![4.0, 5.0, 6.0]);
        assert_eq!(y, vec![1.0, 2.0, 3.0]);
    }

    #[test]
    fn test_nrm2() {
        let x = vec![3.0f32, 4.0];
        let mut out = vec![0.0f32];
        let _ = nrm2(&mut queue(), 2, &mut out, 0, &x, 0, 1).unwrap();
        assert!((out[0] - 5.0).abs() < 1e-6);

        let z = vec![Complex32::new(3.0, 4.0), Complex32::new(0.0, 12.0)];
        let mut zout = vec![Complex32::new(9.0, 9.0)];
        let _ = nrm2(&mut queue(), 2, &mut zout, 0, &z, 0, 1).unwrap();
        assert!((zout[0].re - 13.0).abs() < 1e-5);
        assert_eq!(zout[0].im, 0.0);
    }

    #[test]
    fn test_asum_and_amax() {
        let x = vec![1.0f64, -5.0, 3.0, 5.0];
        let mut out = vec![0.0f64; 2];
        let _ = asum(&mut queue(), 4, &mut out, 0, &x, 0, 1).unwrap();
        let _ = amax(&mut queue(), 4, &mut out, 1, &x, 0, 1).unwrap();
        assert_eq!(out, vec![14.0, 1.0]);
    }

    #[test]
    fn test_rot_quarter_turn() {
        let mut x = vec![1.0f64, 2.0];
        let mut y = vec![3.0f64, 4.0];
        let _ = rot(&mut queue(), 2, &mut x, 0, 1, &mut y, 0, 1, 0.0, 1.0).unwrap();
        assert_eq!(x, vec![3.0, 4.0]);
        assert_eq!(y, vec![-1.0, -2.0]);
    }

    #[test]
    fn test_validation_leaves_buffers_untouched() {
        let x = vec![1.0f32; 4];
        let mut y = vec![7.0f32; 3];
        let err = axpy(&mut queue(), 4, 2.0, &x, 0, 1, &mut y, 0, 1).unwrap_err();
        assert_eq!(err, StatusCode::InsufficientMemoryY);
        assert_eq!(y, vec![7.0; 3]);

        let mut out: Vec<f32> = Vec::new();
        let err = asum(&mut queue(), 4, &mut out, 0, &x, 0, 1).unwrap_err();
        assert_eq!(err, StatusCode::InsufficientMemoryScalar);
        let err = asum(&mut queue(), 4, &mut out, 0, &x, 0, 0).unwrap_err();
        assert_eq!(err, StatusCode::InvalidIncrementX);
    }
}
