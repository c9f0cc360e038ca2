// BLAS functions follow the CLBlast argument order: every buffer carries its own
// offset, increment or leading dimension, so parameter counts are inherent to the API.
#![allow(clippy::too_many_arguments)]

//! # Blasprobe BLAS
//!
//! Pure Rust BLAS generic over `f32`, `f64`, `Complex32` and `Complex64`.
//!
//! Every routine runs on a [`Queue`], takes its buffers as slices with explicit
//! element offsets, increments and leading dimensions, validates all of them
//! before writing, and returns an [`Event`] or a typed [`StatusCode`].
//!
//! ## BLAS Levels
//!
//! - **Level 1** (vector-vector): `swap`, `scal`, `copy`, `axpy`, `dot`, `dotu`, `dotc`,
//!   `nrm2`, `asum`, `amax`, `rot`
//! - **Level 2** (matrix-vector): `gemv`, `gbmv`, `hemv`, `hpmv`, `symv`, `spmv`, `trmv`,
//!   `tpmv`, `trsv`, `ger`, `geru`, `gerc`, `her`, `hpr`, `her2`, `hpr2`, `syr`, `spr`,
//!   `syr2`, `spr2`
//! - **Level 3** (matrix-matrix): `gemm`, `symm`, `hemm`, `syrk`, `herk`, `syr2k`, `her2k`,
//!   `trmm`, `trsm`; output lines are spread over the queue's threads
//!
//! ```
//! use blasprobe_blas::{level3, Layout, Queue, Transpose};
//!
//! let mut queue = Queue::new(4);
//! let a = vec![1.0f32, 2.0, 3.0, 4.0];
//! let b = vec![5.0f32, 6.0, 7.0, 8.0];
//! let mut c = vec![0.0f32; 4];
//! let event = level3::gemm(&mut queue, Layout::RowMajor, Transpose::No, Transpose::No,
//!                          2, 2, 2, 1.0, &a, 0, 2, &b, 0, 2, 0.0, &mut c, 0, 2).unwrap();
//! let _elapsed = event.wait();
//! assert_eq!(c, vec![19.0, 22.0, 43.0, 50.0]);
//! ```

mod access;
mod checks;
pub mod level1;
pub mod level2;
pub mod level3;

pub use blasprobe_core::{Diagonal, Event, Layout, Queue, Side, StatusCode, Transpose, Triangle};
