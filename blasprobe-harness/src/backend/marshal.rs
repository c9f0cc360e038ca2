//! Buffer and scalar marshalling for backends that speak in flat real arrays.
//!
//! A complex buffer of `n` elements is handed to a C-style backend as `2n`
//! interleaved reals. The views here translate element offsets and strides
//! into real-sequence addressing (both scaled by `T::COMPONENTS`) and check,
//! before any pointer is taken, that every addressed element exists.

use blasprobe_core::{BufferRole, ProbeError, Result, Scalar};

/// Elements a strided vector of `n` entries spans, offset included.
fn vector_extent(n: usize, offset: usize, inc: usize) -> usize {
    if n == 0 {
        offset
    } else {
        offset + (n - 1) * inc + 1
    }
}

/// Elements a matrix of `lines` stored lines of `line_len` entries spans.
fn matrix_extent(line_len: usize, lines: usize, offset: usize, ld: usize) -> usize {
    if line_len == 0 || lines == 0 {
        offset
    } else {
        offset + (lines - 1) * ld + line_len
    }
}

fn ensure(role: BufferRole, required: usize, actual: usize) -> Result<()> {
    if required > actual {
        return Err(ProbeError::SizeMismatch {
            role,
            required,
            actual,
        });
    }
    Ok(())
}

/// Read-only view of a buffer as its interleaved real sequence.
#[derive(Debug, Clone, Copy)]
pub struct InterleavedView<'a, T: Scalar> {
    reals: &'a [T::Real],
    offset: usize,
    inc: usize,
}

impl<'a, T: Scalar> InterleavedView<'a, T> {
    /// Strided vector of `n` elements starting at element `offset`.
    pub fn vector(
        buf: &'a [T],
        role: BufferRole,
        n: usize,
        offset: usize,
        inc: usize,
    ) -> Result<Self> {
        ensure(role, vector_extent(n, offset, inc), buf.len())?;
        Ok(Self::new(buf, offset, inc))
    }

    /// Dense matrix with `lines` stored lines of `line_len` elements, `ld` apart.
    pub fn matrix(
        buf: &'a [T],
        role: BufferRole,
        line_len: usize,
        lines: usize,
        offset: usize,
        ld: usize,
    ) -> Result<Self> {
        ensure(role, matrix_extent(line_len, lines, offset, ld), buf.len())?;
        Ok(Self::new(buf, offset, 1))
    }

    /// Contiguous run of `len` elements starting at `offset` (packed storage).
    pub fn span(buf: &'a [T], role: BufferRole, len: usize, offset: usize) -> Result<Self> {
        ensure(role, offset + len, buf.len())?;
        Ok(Self::new(buf, offset, 1))
    }

    fn new(buf: &'a [T], offset: usize, inc: usize) -> Self {
        Self {
            reals: T::as_reals(buf),
            offset: offset * T::COMPONENTS,
            inc: inc * T::COMPONENTS,
        }
    }

    /// Offset of the first addressed element, in reals.
    pub fn real_offset(&self) -> usize {
        self.offset
    }

    /// Distance between consecutive addressed elements, in reals.
    pub fn real_inc(&self) -> usize {
        self.inc
    }

    /// Logical element `i` of the view.
    pub fn get(&self, i: usize) -> T {
        T::load(self.reals, self.offset + i * self.inc)
    }

    /// Pointer to the first addressed real.
    pub fn as_ptr(&self) -> *const T::Real {
        self.reals[self.offset..].as_ptr()
    }
}

/// Mutable counterpart of [`InterleavedView`].
#[derive(Debug)]
pub struct InterleavedViewMut<'a, T: Scalar> {
    reals: &'a mut [T::Real],
    offset: usize,
    inc: usize,
}

impl<'a, T: Scalar> InterleavedViewMut<'a, T> {
    pub fn vector(
        buf: &'a mut [T],
        role: BufferRole,
        n: usize,
        offset: usize,
        inc: usize,
    ) -> Result<Self> {
        ensure(role, vector_extent(n, offset, inc), buf.len())?;
        Ok(Self::new(buf, offset, inc))
    }

    pub fn matrix(
        buf: &'a mut [T],
        role: BufferRole,
        line_len: usize,
        lines: usize,
        offset: usize,
        ld: usize,
    ) -> Result<Self> {
        ensure(role, matrix_extent(line_len, lines, offset, ld), buf.len())?;
        Ok(Self::new(buf, offset, 1))
    }

    pub fn span(buf: &'a mut [T], role: BufferRole, len: usize, offset: usize) -> Result<Self> {
        ensure(role, offset + len, buf.len())?;
        Ok(Self::new(buf, offset, 1))
    }

    fn new(buf: &'a mut [T], offset: usize, inc: usize) -> Self {
        Self {
            reals: T::as_reals_mut(buf),
            offset: offset * T::COMPONENTS,
            inc: inc * T::COMPONENTS,
        }
    }

    pub fn real_offset(&self) -> usize {
        self.offset
    }

    pub fn real_inc(&self) -> usize {
        self.inc
    }

    pub fn get(&self, i: usize) -> T {
        T::load(self.reals, self.offset + i * self.inc)
    }

    pub fn set(&mut self, i: usize, value: T) {
        value.store(self.reals, self.offset + i * self.inc);
    }

    pub fn as_mut_ptr(&mut self) -> *mut T::Real {
        self.reals[self.offset..].as_mut_ptr()
    }
}

/// Splits a scalar into a fresh `[re, im]` pair for by-address passing.
///
/// Every call returns a new array, so one argument never aliases another.
pub fn split_scalar<T: Scalar>(value: T) -> [T::Real; 2] {
    [value.re(), value.im()]
}

/// Rebuilds a scalar from a `[re, im]` pair written by a backend.
pub fn join_scalar<T: Scalar>(parts: [T::Real; 2]) -> T {
    T::from_parts(parts[0], parts[1])
}

#[cfg(test)]
mod tests {
    use super::*;
    use blasprobe_core::{Complex32, Complex64};

    #[test]
    fn test_complex_addressing_is_doubled() {
        let buf: Vec<Complex32> = (0..8).map(|i| Complex32::new(i as f32, -(i as f32))).collect();
        let view = InterleavedView::vector(&buf, BufferRole::X, 3, 1, 2).unwrap();
        assert_eq!(view.real_offset(), 2);
        assert_eq!(view.real_inc(), 4);
        assert_eq!(view.get(0), Complex32::new(1.0, -1.0));
        assert_eq!(view.get(2), Complex32::new(5.0, -5.0));
    }

    #[test]
    fn test_real_addressing_is_unchanged() {
        let buf = vec![0.0f64, 1.0, 2.0, 3.0, 4.0];
        let view = InterleavedView::vector(&buf, BufferRole::Y, 2, 1, 3).unwrap();
        assert_eq!((view.real_offset(), view.real_inc()), (1, 3));
        assert_eq!(view.get(1), 4.0);
    }

    #[test]
    fn test_short_buffer_is_size_mismatch() {
        let buf = vec![Complex64::new(0.0, 0.0); 5];
        let err = InterleavedView::vector(&buf, BufferRole::X, 3, 0, 3).unwrap_err();
        assert!(matches!(
            err,
            ProbeError::SizeMismatch { role: BufferRole::X, required: 7, actual: 5 }
        ));
        let err = InterleavedView::matrix(&buf, BufferRole::A, 2, 3, 0, 2).unwrap_err();
        assert!(matches!(err, ProbeError::SizeMismatch { required: 6, .. }));
        assert!(InterleavedView::span(&buf, BufferRole::AP, 3, 2).is_ok());
    }

    #[test]
    fn test_mut_view_writes_through() {
        let mut buf = vec![Complex64::new(0.0, 0.0); 4];
        {
            let mut view = InterleavedViewMut::vector(&mut buf, BufferRole::Y, 2, 1, 2).unwrap();
            view.set(1, Complex64::new(3.0, 4.0));
            assert_eq!(view.get(1), Complex64::new(3.0, 4.0));
        }
        assert_eq!(buf[3], Complex64::new(3.0, 4.0));
    }

    #[test]
    fn test_scalar_pairs_are_fresh() {
        let alpha = Complex32::new(1.5, -0.5);
        let mut a = split_scalar(alpha);
        let b = split_scalar(alpha);
        a[0] = 9.0;
        assert_eq!(b, [1.5, -0.5]);
        assert_eq!(join_scalar::<Complex32>(b), alpha);
        assert_eq!(split_scalar(2.0f64), [2.0, 0.0]);
    }
}
