//! Named buffer bundle: the seven operand buffers a routine can touch.
//!
//! Each role is its own `Vec`, so a routine can hold `&mut c_mat` while reading
//! `a_mat` and `b_mat` through plain field borrows. Roles a routine does not use
//! stay empty.

use crate::args::Arguments;
use crate::error::{ProbeError, Result};
use crate::rng::SplitMix64;
use crate::scalar::Scalar;
use std::fmt;

/// Operand slot a buffer plays in a routine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum BufferRole {
    X,
    Y,
    A,
    B,
    C,
    AP,
    Scalar,
}

impl BufferRole {
    pub const COUNT: usize = 7;

    pub const ALL: [BufferRole; BufferRole::COUNT] = [
        BufferRole::X,
        BufferRole::Y,
        BufferRole::A,
        BufferRole::B,
        BufferRole::C,
        BufferRole::AP,
        BufferRole::Scalar,
    ];

    pub fn name(self) -> &'static str {
        match self {
            BufferRole::X => "x_vec",
            BufferRole::Y => "y_vec",
            BufferRole::A => "a_mat",
            BufferRole::B => "b_mat",
            BufferRole::C => "c_mat",
            BufferRole::AP => "ap_mat",
            BufferRole::Scalar => "scalar",
        }
    }

    #[inline(always)]
    pub(crate) fn slot(self) -> usize {
        self as usize
    }
}

impl fmt::Display for BufferRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Operand data for one routine run.
#[derive(Debug, Clone, PartialEq)]
pub struct Buffers<T> {
    pub x_vec: Vec<T>,
    pub y_vec: Vec<T>,
    pub a_mat: Vec<T>,
    pub b_mat: Vec<T>,
    pub c_mat: Vec<T>,
    pub ap_mat: Vec<T>,
    pub scalar: Vec<T>,
}

impl<T> Default for Buffers<T> {
    fn default() -> Self {
        Self {
            x_vec: Vec::new(),
            y_vec: Vec::new(),
            a_mat: Vec::new(),
            b_mat: Vec::new(),
            c_mat: Vec::new(),
            ap_mat: Vec::new(),
            scalar: Vec::new(),
        }
    }
}

impl<T: Scalar> Buffers<T> {
    /// Zero-filled buffers sized from `args` for every role in `roles`.
    pub fn allocate(args: &Arguments<T>, roles: &[BufferRole]) -> Self {
        let mut buffers = Self::default();
        for &role in roles {
            *buffers.get_mut(role) = vec![T::zero(); args.size(role)];
        }
        buffers
    }

    pub fn get(&self, role: BufferRole) -> &[T] {
        match role {
            BufferRole::X => &self.x_vec,
            BufferRole::Y => &self.y_vec,
            BufferRole::A => &self.a_mat,
            BufferRole::B => &self.b_mat,
            BufferRole::C => &self.c_mat,
            BufferRole::AP => &self.ap_mat,
            BufferRole::Scalar => &self.scalar,
        }
    }

    pub fn get_mut(&mut self, role: BufferRole) -> &mut Vec<T> {
        match role {
            BufferRole::X => &mut self.x_vec,
            BufferRole::Y => &mut self.y_vec,
            BufferRole::A => &mut self.a_mat,
            BufferRole::B => &mut self.b_mat,
            BufferRole::C => &mut self.c_mat,
            BufferRole::AP => &mut self.ap_mat,
            BufferRole::Scalar => &mut self.scalar,
        }
    }

    pub fn len(&self, role: BufferRole) -> usize {
        self.get(role).len()
    }

    /// Overwrites the listed roles with uniform values in [-1, 1).
    pub fn fill_random(&mut self, roles: &[BufferRole], rng: &mut SplitMix64) {
        for &role in roles {
            rng.fill(self.get_mut(role));
        }
    }

    /// Fails with `SizeMismatch` for the first role shorter than its derived size.
    pub fn check_sizes(&self, args: &Arguments<T>, roles: &[BufferRole]) -> Result<()> {
        for &role in roles {
            let required = args.size(role);
            let actual = self.len(role);
            if actual < required {
                return Err(ProbeError::SizeMismatch {
                    role,
                    required,
                    actual,
                });
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sized_args() -> Arguments<f32> {
        let mut args = Arguments::new().with_n(4);
        args.set_size(BufferRole::X, 4);
        args.set_size(BufferRole::Scalar, 1);
        args
    }

    #[test]
    fn test_allocate_only_listed_roles() {
        let args = sized_args();
        let bufs = Buffers::allocate(&args, &[BufferRole::X]);
        assert_eq!(bufs.x_vec.len(), 4);
        assert!(bufs.scalar.is_empty());
        assert!(bufs.a_mat.is_empty());
    }

    #[test]
    fn test_check_sizes_reports_short_role() {
        let args = sized_args();
        let bufs = Buffers::allocate(&args, &[BufferRole::X]);
        let err = bufs
            .check_sizes(&args, &[BufferRole::X, BufferRole::Scalar])
            .unwrap_err();
        match err {
            ProbeError::SizeMismatch {
                role,
                required,
                actual,
            } => {
                assert_eq!(role, BufferRole::Scalar);
                assert_eq!(required, 1);
                assert_eq!(actual, 0);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_fill_random_is_seeded() {
        let args = sized_args();
        let mut a = Buffers::allocate(&args, &[BufferRole::X]);
        let mut b = a.clone();
        a.fill_random(&[BufferRole::X], &mut SplitMix64::new(7));
        b.fill_random(&[BufferRole::X], &mut SplitMix64::new(7));
        assert_eq!(a, b);
        assert!(a.x_vec.iter().all(|v| (-1.0..1.0).contains(v)));
    }

    #[test]
    fn test_role_slots_match_all_order() {
        for (i, role) in BufferRole::ALL.iter().enumerate() {
            assert_eq!(role.slot(), i);
        }
    }
}
