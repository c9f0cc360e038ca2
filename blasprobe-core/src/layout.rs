//! CBLAS-style option enumerations shared by every routine.
//!
//! These five enums are the whole option vocabulary: no routine adds private
//! variants. Discriminants carry the CBLAS values (101, 102, 111, ...) so the
//! accelerated library and the CBLAS adapter agree on one numbering.

use std::fmt;

/// Memory layout for matrices.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[repr(u32)]
pub enum Layout {
    /// Row-major (C-style): elements in a row are contiguous.
    #[default]
    RowMajor = 101,
    /// Column-major (Fortran-style): elements in a column are contiguous.
    ColMajor = 102,
}

/// Transpose operation for a matrix operand.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[repr(u32)]
pub enum Transpose {
    /// Use the operand as stored.
    #[default]
    No = 111,
    /// Transpose.
    Yes = 112,
    /// Conjugate transpose. Identical to `Yes` for real element types.
    Conjugate = 113,
}

/// Which half of a symmetric, Hermitian or triangular matrix is stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[repr(u32)]
pub enum Triangle {
    #[default]
    Upper = 121,
    Lower = 122,
}

/// Whether a triangular matrix has an implicit unit diagonal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[repr(u32)]
pub enum Diagonal {
    #[default]
    NonUnit = 131,
    Unit = 132,
}

/// Which side the special matrix multiplies from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[repr(u32)]
pub enum Side {
    #[default]
    Left = 141,
    Right = 142,
}

impl Layout {
    pub const ALL: [Layout; 2] = [Layout::RowMajor, Layout::ColMajor];

    /// Leading dimension stride for an M x N matrix.
    #[inline(always)]
    pub fn leading_dim(self, rows: usize, cols: usize) -> usize {
        match self {
            Layout::RowMajor => cols,
            Layout::ColMajor => rows,
        }
    }

    /// Linear index into a flat array for element (i, j) of a matrix.
    #[inline(always)]
    pub fn index(self, i: usize, j: usize, ld: usize) -> usize {
        match self {
            Layout::RowMajor => i * ld + j,
            Layout::ColMajor => j * ld + i,
        }
    }

    /// Number of stored lines (rows for row-major, columns for column-major).
    #[inline(always)]
    pub fn lines(self, rows: usize, cols: usize) -> usize {
        match self {
            Layout::RowMajor => rows,
            Layout::ColMajor => cols,
        }
    }
}

impl Transpose {
    pub const ALL: [Transpose; 3] = [Transpose::No, Transpose::Yes, Transpose::Conjugate];

    #[inline(always)]
    pub fn is_transposed(self) -> bool {
        self != Transpose::No
    }

    #[inline(always)]
    pub fn is_conjugated(self) -> bool {
        self == Transpose::Conjugate
    }
}

impl Triangle {
    pub const ALL: [Triangle; 2] = [Triangle::Upper, Triangle::Lower];

    /// True when logical element (i, j) lies in the stored half (diagonal included).
    #[inline(always)]
    pub fn contains(self, i: usize, j: usize) -> bool {
        match self {
            Triangle::Upper => i <= j,
            Triangle::Lower => i >= j,
        }
    }

    pub fn flipped(self) -> Triangle {
        match self {
            Triangle::Upper => Triangle::Lower,
            Triangle::Lower => Triangle::Upper,
        }
    }
}

impl Diagonal {
    pub const ALL: [Diagonal; 2] = [Diagonal::NonUnit, Diagonal::Unit];

    #[inline(always)]
    pub fn is_unit(self) -> bool {
        self == Diagonal::Unit
    }
}

impl Side {
    pub const ALL: [Side; 2] = [Side::Left, Side::Right];
}

/// Offset of element (i, j) inside packed triangular storage of order `n`.
///
/// `(i, j)` must lie in the stored `triangle`. Row-major upper packing is the
/// same sequence as column-major lower packing of the transpose, and vice versa.
#[inline]
pub fn packed_index(layout: Layout, triangle: Triangle, n: usize, i: usize, j: usize) -> usize {
    match (layout, triangle) {
        (Layout::ColMajor, Triangle::Upper) => i + j * (j + 1) / 2,
        (Layout::ColMajor, Triangle::Lower) => i + j * (2 * n - j - 1) / 2,
        (Layout::RowMajor, Triangle::Upper) => j + i * (2 * n - i - 1) / 2,
        (Layout::RowMajor, Triangle::Lower) => j + i * (i + 1) / 2,
    }
}

/// Element count of packed triangular storage of order `n`.
#[inline(always)]
pub fn packed_len(n: usize) -> usize {
    n * (n + 1) / 2
}

impl fmt::Display for Layout {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Layout::RowMajor => write!(f, "row-major"),
            Layout::ColMajor => write!(f, "col-major"),
        }
    }
}

impl fmt::Display for Transpose {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Transpose::No => write!(f, "no"),
            Transpose::Yes => write!(f, "yes"),
            Transpose::Conjugate => write!(f, "conjugate"),
        }
    }
}

impl fmt::Display for Triangle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Triangle::Upper => write!(f, "upper"),
            Triangle::Lower => write!(f, "lower"),
        }
    }
}

impl fmt::Display for Diagonal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Diagonal::NonUnit => write!(f, "non-unit"),
            Diagonal::Unit => write!(f, "unit"),
        }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Side::Left => write!(f, "left"),
            Side::Right => write!(f, "right"),
        }
    }
}
