//! Descriptors for every routine the harness can probe, grouped by BLAS level.

pub mod common;
pub mod level1;
pub mod level2;
pub mod level3;

pub use level1::{Xamax, Xasum, Xaxpy, Xcopy, Xdot, Xdotc, Xdotu, Xnrm2, Xrot, Xscal, Xswap};
pub use level2::{
    Xgbmv, Xgemv, Xger, Xgerc, Xgeru, Xhemv, Xher, Xher2, Xhpmv, Xhpr, Xhpr2, Xspmv, Xspr, Xspr2,
    Xsymv, Xsyr, Xsyr2, Xtpmv, Xtrmv, Xtrsv,
};
pub use level3::{Xgemm, Xhemm, Xher2k, Xherk, Xsymm, Xsyr2k, Xsyrk, Xtrmm, Xtrsm};
