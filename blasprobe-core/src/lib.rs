//! # Blasprobe Core
//!
//! Shared vocabulary for the blasprobe crates.
//!
//! This crate provides:
//! - **Options**: CBLAS-numbered layout, transpose, triangle, diagonal and side enums.
//! - **Scalars**: the four element types (`f32`, `f64`, `Complex32`, `Complex64`) behind one trait.
//! - **Argument bundle**: sizes, strides, offsets, scalars and which of them were supplied.
//! - **Buffer bundle**: the seven named operand buffers of a routine run.
//! - **Queue / Event**: the execution context the accelerated library runs on.

pub mod args;
pub mod buffers;
pub mod error;
pub mod layout;
pub mod parallel;
pub mod queue;
pub mod rng;
pub mod scalar;

pub use args::{Arguments, Opt, OptSet};
pub use buffers::{BufferRole, Buffers};
pub use error::{ProbeError, Result, StatusCode};
pub use layout::{packed_index, packed_len, Diagonal, Layout, Side, Transpose, Triangle};
pub use num_complex::{Complex32, Complex64};
pub use parallel::{parallel_lines_mut, parallel_map_chunks};
pub use queue::{Event, Queue};
pub use rng::SplitMix64;
pub use scalar::{ComplexScalar, Precision, RealScalar, Scalar};
