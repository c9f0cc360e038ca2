//! Status codes reported by the accelerated library and the harness error taxonomy.

use crate::args::Opt;
use crate::buffers::BufferRole;
use thiserror::Error;

/// Failure reported by a routine implementation. Success is `Ok(..)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Error)]
pub enum StatusCode {
    #[error("invalid leading dimension for A")]
    InvalidLeadDimA,
    #[error("invalid leading dimension for B")]
    InvalidLeadDimB,
    #[error("invalid leading dimension for C")]
    InvalidLeadDimC,
    #[error("invalid increment for X")]
    InvalidIncrementX,
    #[error("invalid increment for Y")]
    InvalidIncrementY,
    #[error("buffer A is too small")]
    InsufficientMemoryA,
    #[error("buffer B is too small")]
    InsufficientMemoryB,
    #[error("buffer C is too small")]
    InsufficientMemoryC,
    #[error("buffer AP is too small")]
    InsufficientMemoryAP,
    #[error("buffer X is too small")]
    InsufficientMemoryX,
    #[error("buffer Y is too small")]
    InsufficientMemoryY,
    #[error("scalar buffer is too small")]
    InsufficientMemoryScalar,
    #[error("transpose option not supported by this routine")]
    InvalidTranspose,
    #[error("argument does not fit the backend's integer type")]
    DimensionOverflow,
}

impl StatusCode {
    /// Stable numeric code, negative like the CLBlast status enumeration.
    pub fn code(self) -> i32 {
        match self {
            StatusCode::InvalidLeadDimA => -2013,
            StatusCode::InvalidLeadDimB => -2012,
            StatusCode::InvalidLeadDimC => -2011,
            StatusCode::InvalidIncrementX => -2010,
            StatusCode::InvalidIncrementY => -2009,
            StatusCode::InsufficientMemoryA => -2008,
            StatusCode::InsufficientMemoryB => -2007,
            StatusCode::InsufficientMemoryC => -2006,
            StatusCode::InsufficientMemoryX => -2005,
            StatusCode::InsufficientMemoryY => -2004,
            StatusCode::InsufficientMemoryAP => -2003,
            StatusCode::InsufficientMemoryScalar => -2002,
            StatusCode::InvalidTranspose => -1001,
            StatusCode::DimensionOverflow => -1000,
        }
    }
}

/// Errors surfaced by the test protocol.
#[derive(Debug, Error)]
pub enum ProbeError {
    /// The accelerated library or a reference backend reported a failure.
    #[error("{backend} reported {status} (code {})", .status.code())]
    BackendInvocation {
        backend: &'static str,
        status: StatusCode,
    },

    /// An option value has no meaning for the routine or backend.
    #[error("unsupported configuration: {0}")]
    UnsupportedConfiguration(String),

    /// A buffer is smaller than the size derived from the arguments.
    #[error("buffer {role} holds {actual} elements but {required} are required")]
    SizeMismatch {
        role: BufferRole,
        required: usize,
        actual: usize,
    },

    /// A routine option was not supplied and has no protocol default.
    #[error("required option `{0}` was not supplied")]
    MissingOption(Opt),
}

impl ProbeError {
    pub fn backend(backend: &'static str, status: StatusCode) -> Self {
        ProbeError::BackendInvocation { backend, status }
    }
}

/// Result type for protocol operations.
pub type Result<T> = std::result::Result<T, ProbeError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_codes_are_distinct() {
        let all = [
            StatusCode::InvalidLeadDimA,
            StatusCode::InvalidLeadDimB,
            StatusCode::InvalidLeadDimC,
            StatusCode::InvalidIncrementX,
            StatusCode::InvalidIncrementY,
            StatusCode::InsufficientMemoryA,
            StatusCode::InsufficientMemoryB,
            StatusCode::InsufficientMemoryC,
            StatusCode::InsufficientMemoryAP,
            StatusCode::InsufficientMemoryX,
            StatusCode::InsufficientMemoryY,
            StatusCode::InsufficientMemoryScalar,
            StatusCode::InvalidTranspose,
            StatusCode::DimensionOverflow,
        ];
        let mut codes: Vec<i32> = all.iter().map(|s| s.code()).collect();
        codes.sort_unstable();
        codes.dedup();
        assert_eq!(codes.len(), all.len());
    }

    #[test]
    fn test_backend_error_message_keeps_status() {
        let err = ProbeError::backend("blasprobe", StatusCode::InsufficientMemoryX);
        let msg = err.to_string();
        assert!(msg.contains("blasprobe"));
        assert!(msg.contains("buffer X is too small"));
        assert!(msg.contains("-2005"));
    }
}
