//! Reference backends and the capability table that says which are compiled in.
//!
//! Each backend lives behind a cargo feature. Routine descriptors dispatch on
//! [`BackendId`]; asking for a backend that is not compiled in is an
//! `UnsupportedConfiguration` error, never a link failure.

use blasprobe_core::{ComplexScalar, Precision, ProbeError, RealScalar, Scalar};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

pub mod marshal;

#[cfg(feature = "naive")]
pub mod naive;

#[cfg(feature = "cblas")]
pub mod cblas;

/// A reference implementation the accelerated library is compared against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BackendId {
    /// Textbook loops in Rust, driven by Fortran-style option characters.
    Naive,
    /// System CBLAS over FFI.
    Cblas,
}

impl BackendId {
    pub const ALL: [BackendId; 2] = [BackendId::Naive, BackendId::Cblas];

    pub fn name(self) -> &'static str {
        match self {
            BackendId::Naive => "naive",
            BackendId::Cblas => "cblas",
        }
    }

    /// Returns true if this backend is compiled in the current build.
    pub fn is_compiled(self) -> bool {
        match self {
            BackendId::Naive => cfg!(feature = "naive"),
            BackendId::Cblas => cfg!(feature = "cblas"),
        }
    }

    /// Whether a conjugate-transpose request differs from a plain transpose.
    ///
    /// Both backends honour conjugation for complex precisions; for real
    /// precisions the two requests are the same operation.
    pub fn distinguishes_conjugate(self, precision: Precision) -> bool {
        precision.is_complex()
    }
}

impl fmt::Display for BackendId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for BackendId {
    type Err = ProbeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "naive" => Ok(BackendId::Naive),
            "cblas" => Ok(BackendId::Cblas),
            other => Err(ProbeError::UnsupportedConfiguration(format!(
                "unknown reference backend `{other}`"
            ))),
        }
    }
}

/// Backends compiled into this build, in a fixed order.
pub fn available_backends() -> Vec<BackendId> {
    BackendId::ALL
        .into_iter()
        .filter(|b| b.is_compiled())
        .collect()
}

/// Error for a dispatch on a backend this build does not carry.
pub(crate) fn not_compiled(backend: BackendId) -> ProbeError {
    ProbeError::UnsupportedConfiguration(format!(
        "reference backend `{backend}` is not compiled in (enable the `{backend}` feature)"
    ))
}

// The element-type bounds routine descriptors use. With CBLAS compiled in they
// also require the per-precision FFI forwarding traits, which all four
// element types implement.

#[cfg(feature = "cblas")]
pub trait BackendScalar: Scalar + cblas::CblasScalar {}
#[cfg(feature = "cblas")]
impl<T: Scalar + cblas::CblasScalar> BackendScalar for T {}

#[cfg(not(feature = "cblas"))]
pub trait BackendScalar: Scalar {}
#[cfg(not(feature = "cblas"))]
impl<T: Scalar> BackendScalar for T {}

#[cfg(feature = "cblas")]
pub trait BackendReal: BackendScalar + RealScalar + cblas::CblasReal {}
#[cfg(feature = "cblas")]
impl<T: BackendScalar + RealScalar + cblas::CblasReal> BackendReal for T {}

#[cfg(not(feature = "cblas"))]
pub trait BackendReal: BackendScalar + RealScalar {}
#[cfg(not(feature = "cblas"))]
impl<T: BackendScalar + RealScalar> BackendReal for T {}

#[cfg(feature = "cblas")]
pub trait BackendComplex: BackendScalar + ComplexScalar + cblas::CblasComplex {}
#[cfg(feature = "cblas")]
impl<T: BackendScalar + ComplexScalar + cblas::CblasComplex> BackendComplex for T {}

#[cfg(not(feature = "cblas"))]
pub trait BackendComplex: BackendScalar + ComplexScalar {}
#[cfg(not(feature = "cblas"))]
impl<T: BackendScalar + ComplexScalar> BackendComplex for T {}
