//! Argument validation shared by all routines.
//!
//! Every check runs before the routine writes anything, so a failed call
//! leaves its buffers untouched.

use blasprobe_core::{packed_len, StatusCode};

/// Vector of `n` elements at `off` with stride `inc`.
#[inline]
pub(crate) fn check_vector<T>(
    n: usize,
    buf: &[T],
    off: usize,
    inc: usize,
    inc_err: StatusCode,
    mem_err: StatusCode,
) -> Result<(), StatusCode> {
    if inc == 0 {
        return Err(inc_err);
    }
    if n == 0 {
        return Ok(());
    }
    let required = off + (n - 1) * inc + 1;
    if buf.len() < required {
        return Err(mem_err);
    }
    Ok(())
}

#[inline]
pub(crate) fn check_x<T>(n: usize, buf: &[T], off: usize, inc: usize) -> Result<(), StatusCode> {
    check_vector(
        n,
        buf,
        off,
        inc,
        StatusCode::InvalidIncrementX,
        StatusCode::InsufficientMemoryX,
    )
}

#[inline]
pub(crate) fn check_y<T>(n: usize, buf: &[T], off: usize, inc: usize) -> Result<(), StatusCode> {
    check_vector(
        n,
        buf,
        off,
        inc,
        StatusCode::InvalidIncrementY,
        StatusCode::InsufficientMemoryY,
    )
}

/// Matrix stored as `two` lines of `one` elements each, `ld` apart.
#[inline]
pub(crate) fn check_matrix<T>(
    one: usize,
    two: usize,
    buf: &[T],
    off: usize,
    ld: usize,
    ld_err: StatusCode,
    mem_err: StatusCode,
) -> Result<(), StatusCode> {
    if ld < one.max(1) {
        return Err(ld_err);
    }
    if one == 0 || two == 0 {
        return Ok(());
    }
    let required = off + (two - 1) * ld + one;
    if buf.len() < required {
        return Err(mem_err);
    }
    Ok(())
}

#[inline]
pub(crate) fn check_a<T>(
    one: usize,
    two: usize,
    buf: &[T],
    off: usize,
    ld: usize,
) -> Result<(), StatusCode> {
    check_matrix(
        one,
        two,
        buf,
        off,
        ld,
        StatusCode::InvalidLeadDimA,
        StatusCode::InsufficientMemoryA,
    )
}

#[inline]
pub(crate) fn check_b<T>(
    one: usize,
    two: usize,
    buf: &[T],
    off: usize,
    ld: usize,
) -> Result<(), StatusCode> {
    check_matrix(
        one,
        two,
        buf,
        off,
        ld,
        StatusCode::InvalidLeadDimB,
        StatusCode::InsufficientMemoryB,
    )
}

#[inline]
pub(crate) fn check_c<T>(
    one: usize,
    two: usize,
    buf: &[T],
    off: usize,
    ld: usize,
) -> Result<(), StatusCode> {
    check_matrix(
        one,
        two,
        buf,
        off,
        ld,
        StatusCode::InvalidLeadDimC,
        StatusCode::InsufficientMemoryC,
    )
}

/// Packed triangle of order `n` at `off`.
#[inline]
pub(crate) fn check_packed<T>(n: usize, buf: &[T], off: usize) -> Result<(), StatusCode> {
    if n > 0 && buf.len() < off + packed_len(n) {
        return Err(StatusCode::InsufficientMemoryAP);
    }
    Ok(())
}

#[inline]
pub(crate) fn check_scalar<T>(buf: &[T], off: usize) -> Result<(), StatusCode> {
    if buf.len() <= off {
        return Err(StatusCode::InsufficientMemoryScalar);
    }
    Ok(())
}
