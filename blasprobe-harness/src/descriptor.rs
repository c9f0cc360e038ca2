//! The routine descriptor protocol.
//!
//! A [`Routine`] describes one BLAS routine for one element type: which options
//! it consumes, which buffers it reads and writes and how large they must be,
//! how to call the accelerated library and each reference backend, where its
//! result lives, and what it costs. The tester drives every routine through
//! this trait alone.

use crate::backend::BackendId;
use blasprobe_core::{
    Arguments, BufferRole, Buffers, Opt, ProbeError, Queue, Result, Scalar, Transpose,
};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Vector-vector, matrix-vector or matrix-matrix.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum BlasLevel {
    One = 1,
    Two = 2,
    Three = 3,
}

impl BlasLevel {
    pub fn number(self) -> u8 {
        self as u8
    }
}

impl fmt::Display for BlasLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "level {}", self.number())
    }
}

/// A leading-dimension slot of the argument bundle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LeadDim {
    A,
    B,
    C,
}

impl LeadDim {
    pub const ALL: [LeadDim; 3] = [LeadDim::A, LeadDim::B, LeadDim::C];

    pub fn opt(self) -> Opt {
        match self {
            LeadDim::A => Opt::ALeadDim,
            LeadDim::B => Opt::BLeadDim,
            LeadDim::C => Opt::CLeadDim,
        }
    }

    pub fn role(self) -> BufferRole {
        match self {
            LeadDim::A => BufferRole::A,
            LeadDim::B => BufferRole::B,
            LeadDim::C => BufferRole::C,
        }
    }

    pub fn get<T>(self, args: &Arguments<T>) -> usize {
        match self {
            LeadDim::A => args.a_ld,
            LeadDim::B => args.b_ld,
            LeadDim::C => args.c_ld,
        }
    }

    fn set<T>(self, args: &mut Arguments<T>, ld: usize) {
        match self {
            LeadDim::A => args.a_ld = ld,
            LeadDim::B => args.b_ld = ld,
            LeadDim::C => args.c_ld = ld,
        }
    }
}

/// One routine at one element type.
///
/// Descriptors are stateless: every method is an associated function over the
/// argument bundle and the buffer bundle the caller owns.
pub trait Routine<T: Scalar> {
    /// Routine name without the precision prefix (`"axpy"`, `"hpr2"`).
    const NAME: &'static str;

    fn operation_level() -> BlasLevel;

    /// Options this routine consumes, in a fixed order.
    fn required_options() -> &'static [Opt];

    fn input_buffer_roles() -> &'static [BufferRole];

    fn output_buffer_roles() -> &'static [BufferRole];

    /// Every role the routine touches, inputs first, without repeats.
    fn buffer_roles() -> Vec<BufferRole> {
        let mut roles = Self::input_buffer_roles().to_vec();
        for &role in Self::output_buffer_roles() {
            if !roles.contains(&role) {
                roles.push(role);
            }
        }
        roles
    }

    /// Elements buffer `role` needs for `args`; 0 for roles the routine does not use.
    fn buffer_size(role: BufferRole, args: &Arguments<T>) -> usize;

    /// Stores every role's size in the bundle. Calling it again changes nothing.
    fn apply_derived_sizes(args: &mut Arguments<T>) {
        for role in BufferRole::ALL {
            let size = Self::buffer_size(role, args);
            args.set_size(role, size);
        }
    }

    /// Natural leading dimension for `ld`, or `None` where the routine has no such matrix.
    fn default_leading_dimension(_ld: LeadDim, _args: &Arguments<T>) -> Option<usize> {
        None
    }

    /// Fills each leading dimension the routine consumes but the caller left unset.
    fn apply_default_leading_dimensions(args: &mut Arguments<T>) {
        for ld in LeadDim::ALL {
            if !Self::required_options().contains(&ld.opt()) || args.is_supplied(ld.opt()) {
                continue;
            }
            if let Some(value) = Self::default_leading_dimension(ld, args) {
                ld.set(args, value);
            }
        }
    }

    /// Subset of `candidates` that is meaningful for the A operand.
    fn applicable_a_transposes(_candidates: &[Transpose]) -> Vec<Transpose> {
        Vec::new()
    }

    /// Subset of `candidates` that is meaningful for the B operand.
    fn applicable_b_transposes(_candidates: &[Transpose]) -> Vec<Transpose> {
        Vec::new()
    }

    /// Rewrites freshly generated inputs into a valid problem. Most routines need nothing.
    fn prepare_inputs(_args: &Arguments<T>, _buffers: &mut Buffers<T>) {}

    /// Runs the accelerated library and waits for it to finish.
    fn run_primary(args: &Arguments<T>, buffers: &mut Buffers<T>, queue: &mut Queue)
        -> Result<()>;

    /// Runs reference backend `backend` on its own copy of the buffers.
    fn run_reference(backend: BackendId, args: &Arguments<T>, buffers: &mut Buffers<T>)
        -> Result<()>;

    /// The output buffer, truncated to its computed size.
    fn extract_result(args: &Arguments<T>, buffers: &Buffers<T>) -> Vec<T> {
        match Self::output_buffer_roles().first() {
            Some(&role) => buffers
                .get(role)
                .iter()
                .take(args.size(role))
                .copied()
                .collect(),
            None => Vec::new(),
        }
    }

    /// Logical output extent: primary count and, for two-dimensional outputs, secondary count.
    fn result_extent(args: &Arguments<T>) -> (usize, Option<usize>);

    /// Position of logical element `(i, j)` inside the extracted result.
    fn result_index(args: &Arguments<T>, i: usize, j: Option<usize>) -> usize;

    fn flop_count(args: &Arguments<T>) -> usize;

    /// Elements read plus elements written, times the element size.
    fn byte_count(args: &Arguments<T>) -> usize;
}

/// Rejects a run whose buffers or leading dimensions cannot hold the problem.
///
/// Leading dimensions below the routine's natural default would address
/// past the end of each stored line.
pub fn check_operands<R: Routine<T>, T: Scalar>(
    args: &Arguments<T>,
    buffers: &Buffers<T>,
) -> Result<()> {
    for ld in LeadDim::ALL {
        if !R::required_options().contains(&ld.opt()) {
            continue;
        }
        if let Some(min) = R::default_leading_dimension(ld, args) {
            let actual = ld.get(args);
            if actual < min {
                return Err(ProbeError::UnsupportedConfiguration(format!(
                    "{}: {} = {actual} is below the minimum {min}",
                    R::NAME,
                    ld.opt()
                )));
            }
        }
    }
    buffers.check_sizes(args, &R::buffer_roles())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lead_dims_map_to_options_and_roles() {
        assert_eq!(LeadDim::A.opt(), Opt::ALeadDim);
        assert_eq!(LeadDim::C.role(), BufferRole::C);
        let mut args = Arguments::<f32>::new();
        LeadDim::B.set(&mut args, 9);
        assert_eq!(LeadDim::B.get(&args), 9);
        assert!(!args.is_supplied(Opt::BLeadDim));
    }

    #[test]
    fn test_levels_are_numbered() {
        assert_eq!(BlasLevel::One.number(), 1);
        assert_eq!(BlasLevel::Three.to_string(), "level 3");
        assert!(BlasLevel::Two < BlasLevel::Three);
    }
}
