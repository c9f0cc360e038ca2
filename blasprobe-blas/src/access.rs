//! Element addressing for dense, packed and triangular operands.

use blasprobe_core::{packed_index, Layout, Scalar, Transpose, Triangle};

/// A dense matrix operand: layout, base offset and leading dimension.
#[derive(Debug, Clone, Copy)]
pub(crate) struct Dense {
    pub layout: Layout,
    pub off: usize,
    pub ld: usize,
}

impl Dense {
    pub fn new(layout: Layout, off: usize, ld: usize) -> Self {
        Self { layout, off, ld }
    }

    #[inline(always)]
    pub fn at(&self, i: usize, j: usize) -> usize {
        self.off + self.layout.index(i, j, self.ld)
    }

    /// Element (i, j) of op(A).
    #[inline(always)]
    pub fn op<T: Scalar>(&self, a: &[T], trans: Transpose, i: usize, j: usize) -> T {
        match trans {
            Transpose::No => a[self.at(i, j)],
            Transpose::Yes => a[self.at(j, i)],
            Transpose::Conjugate => a[self.at(j, i)].conj(),
        }
    }
}

/// Where the stored half of a symmetric, Hermitian or triangular matrix lives.
#[derive(Debug, Clone, Copy)]
pub(crate) enum Storage {
    Full { off: usize, ld: usize },
    Packed { off: usize, n: usize },
}

/// A matrix of which only one triangle is stored.
#[derive(Debug, Clone, Copy)]
pub(crate) struct Tri {
    pub layout: Layout,
    pub triangle: Triangle,
    pub storage: Storage,
}

impl Tri {
    pub fn full(layout: Layout, triangle: Triangle, off: usize, ld: usize) -> Self {
        Self {
            layout,
            triangle,
            storage: Storage::Full { off, ld },
        }
    }

    pub fn packed(layout: Layout, triangle: Triangle, off: usize, n: usize) -> Self {
        Self {
            layout,
            triangle,
            storage: Storage::Packed { off, n },
        }
    }

    /// Buffer index of (i, j); the position must lie in the stored triangle.
    #[inline(always)]
    pub fn at(&self, i: usize, j: usize) -> usize {
        match self.storage {
            Storage::Full { off, ld } => off + self.layout.index(i, j, ld),
            Storage::Packed { off, n } => off + packed_index(self.layout, self.triangle, n, i, j),
        }
    }

    /// Element (i, j) of the full symmetric (or, with `herm`, Hermitian) matrix.
    ///
    /// Hermitian diagonals read as real.
    #[inline]
    pub fn sym<T: Scalar>(&self, a: &[T], herm: bool, i: usize, j: usize) -> T {
        if self.triangle.contains(i, j) {
            let v = a[self.at(i, j)];
            if herm && i == j {
                T::from_real(v.re())
            } else {
                v
            }
        } else {
            let v = a[self.at(j, i)];
            if herm {
                v.conj()
            } else {
                v
            }
        }
    }

    /// Element (i, j) of the triangular matrix; zero outside the stored half.
    #[inline]
    pub fn tri<T: Scalar>(&self, a: &[T], unit: bool, i: usize, j: usize) -> T {
        if i == j && unit {
            T::one()
        } else if self.triangle.contains(i, j) {
            a[self.at(i, j)]
        } else {
            T::zero()
        }
    }

    /// Element (i, j) of op(T) for a triangular T.
    #[inline]
    pub fn tri_op<T: Scalar>(
        &self,
        a: &[T],
        unit: bool,
        trans: Transpose,
        i: usize,
        j: usize,
    ) -> T {
        match trans {
            Transpose::No => self.tri(a, unit, i, j),
            Transpose::Yes => self.tri(a, unit, j, i),
            Transpose::Conjugate => self.tri(a, unit, j, i).conj(),
        }
    }

    /// Whether op(T) is upper triangular.
    #[inline]
    pub fn op_is_upper(&self, trans: Transpose) -> bool {
        (self.triangle == Triangle::Upper) != trans.is_transposed()
    }
}
