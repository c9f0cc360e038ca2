// Backend entry points mirror the BLAS argument lists one-to-one.
#![allow(clippy::too_many_arguments)]

//! # Blasprobe Harness
//!
//! Checks `blasprobe-blas` against reference BLAS implementations.
//!
//! This crate provides:
//! - **Descriptor protocol**: the [`Routine`] trait, one stateless descriptor per
//!   routine that says which options it needs, how large its buffers are, how to run
//!   it everywhere, where its result lives and what it costs.
//! - **Backend adapters**: the pure-Rust `naive` reference (default) and system CBLAS
//!   over FFI (`cblas` feature), each with its own option vocabulary.
//! - **Registry**: every (routine, precision) pair behind type-erased entry points.
//! - **Drivers**: [`Tester::check`] compares outputs position by position and
//!   [`Tester::bench`] reports best time, GFLOPS and GB/s.
//!
//! ```
//! use blasprobe_harness::{HarnessConfig, Tester, routines::Xaxpy};
//! use blasprobe_core::Arguments;
//!
//! let tester = Tester::new(HarnessConfig::default());
//! let args = Arguments::<f64>::new()
//!     .with_n(16)
//!     .with_alpha(0.5)
//!     .with_x_inc(1)
//!     .with_y_inc(1)
//!     .with_x_offset(0)
//!     .with_y_offset(0);
//! for report in tester.check::<Xaxpy, f64>(&args).unwrap() {
//!     assert!(report.passed());
//! }
//! ```

pub mod backend;
pub mod config;
pub mod descriptor;
pub mod registry;
pub mod routines;
pub mod tester;

pub use backend::{available_backends, BackendId};
pub use config::HarnessConfig;
pub use descriptor::{check_operands, BlasLevel, LeadDim, Routine};
pub use registry::{lookup, lookup_full, registry, RegistryEntry};
pub use tester::{CaseReport, PerfReport, Tester, Tolerance};
