//! Failures surface as typed errors rather than as mismatching reports.

use blasprobe_core::{
    Arguments, BufferRole, Buffers, Complex64, Layout, Opt, ProbeError, Queue, Transpose,
};
use blasprobe_harness::config::parse_backends;
use blasprobe_harness::routines::{Xaxpy, Xgemv};
use blasprobe_harness::{available_backends, lookup_full, BackendId, HarnessConfig, Routine, Tester};

fn gemm_template() -> Arguments<Complex64> {
    Arguments::new()
        .with_m(3)
        .with_n(4)
        .with_k(2)
        .with_layout(Layout::ColMajor)
        .with_a_transpose(Transpose::No)
        .with_b_transpose(Transpose::No)
        .with_all_offsets(0)
        .with_alpha(Complex64::new(1.0, 0.5))
}

#[test]
fn missing_option_is_named() {
    let tester = Tester::new(HarnessConfig::default());
    let entry = lookup_full("zgemm").unwrap();
    let err = entry.check(&tester, &gemm_template()).unwrap_err();
    assert!(matches!(err, ProbeError::MissingOption(Opt::Beta)), "{err}");

    let err = entry.bench(&tester, &gemm_template(), 3).unwrap_err();
    assert!(matches!(err, ProbeError::MissingOption(Opt::Beta)));
}

#[test]
fn plain_transpose_is_rejected_for_hermitian_rank_k() {
    let tester = Tester::new(HarnessConfig::default());
    let template = Arguments::<Complex64>::new()
        .with_n(3)
        .with_k(2)
        .with_layout(Layout::RowMajor)
        .with_triangle(blasprobe_core::Triangle::Upper)
        .with_a_transpose(Transpose::Yes)
        .with_all_offsets(0)
        .with_alpha(Complex64::new(0.5, 0.0))
        .with_beta(Complex64::new(2.0, 0.0));
    for name in ["cherk", "zherk"] {
        let err = lookup_full(name).unwrap().check(&tester, &template).unwrap_err();
        assert!(matches!(err, ProbeError::UnsupportedConfiguration(_)), "{name}: {err}");
        assert!(err.to_string().contains("herk"));
    }
}

fn assert_size_mismatch(err: ProbeError, expected: (BufferRole, usize, usize), path: &str) {
    match err {
        ProbeError::SizeMismatch {
            role,
            required,
            actual,
        } => assert_eq!((role, required, actual), expected, "{path}"),
        other => panic!("{path}: unexpected {other}"),
    }
}

#[test]
fn short_buffer_is_a_size_mismatch_on_every_path() {
    let mut args = Arguments::<f64>::new()
        .with_n(8)
        .with_alpha(2.0)
        .with_x_inc(2)
        .with_y_inc(1)
        .with_x_offset(1)
        .with_y_offset(0);
    <Xaxpy as Routine<f64>>::apply_derived_sizes(&mut args);
    assert_eq!(args.size(BufferRole::X), 17);

    // 16 elements still cover the last strided read at 1 + 7 * 2
    let roles = <Xaxpy as Routine<f64>>::buffer_roles();
    let mut buffers = Buffers::allocate(&args, &roles);
    buffers.get_mut(BufferRole::X).truncate(16);
    let expected = (BufferRole::X, 17, 16);

    let mut primary = buffers.clone();
    let err = <Xaxpy as Routine<f64>>::run_primary(&args, &mut primary, &mut Queue::new(1))
        .unwrap_err();
    assert_size_mismatch(err, expected, "primary");
    assert_eq!(primary, buffers);

    for backend in available_backends() {
        let err = <Xaxpy as Routine<f64>>::run_reference(backend, &args, &mut buffers.clone())
            .unwrap_err();
        assert_size_mismatch(err, expected, backend.name());
    }
}

fn gemv_args() -> Arguments<f32> {
    let mut args = Arguments::<f32>::new()
        .with_m(4)
        .with_n(3)
        .with_layout(Layout::RowMajor)
        .with_a_transpose(Transpose::No)
        .with_x_inc(1)
        .with_y_inc(1)
        .with_all_offsets(0)
        .with_alpha(1.0)
        .with_beta(0.0);
    <Xgemv as Routine<f32>>::apply_default_leading_dimensions(&mut args);
    <Xgemv as Routine<f32>>::apply_derived_sizes(&mut args);
    args
}

#[test]
fn primary_checks_buffers_before_calling_the_library() {
    let args = gemv_args();
    let roles = <Xgemv as Routine<f32>>::buffer_roles();
    let mut buffers = Buffers::allocate(&args, &roles);
    buffers.get_mut(BufferRole::A).truncate(5);

    let err = <Xgemv as Routine<f32>>::run_primary(&args, &mut buffers, &mut Queue::new(1))
        .unwrap_err();
    assert_size_mismatch(err, (BufferRole::A, 12, 5), "primary");
}

#[test]
fn short_leading_dimension_is_unsupported_on_every_path() {
    let mut args = gemv_args().with_a_ld(2);
    <Xgemv as Routine<f32>>::apply_derived_sizes(&mut args);
    let roles = <Xgemv as Routine<f32>>::buffer_roles();
    let buffers = Buffers::allocate(&args, &roles);

    let err = <Xgemv as Routine<f32>>::run_primary(&args, &mut buffers.clone(), &mut Queue::new(1))
        .unwrap_err();
    assert!(matches!(err, ProbeError::UnsupportedConfiguration(_)), "{err}");
    for backend in available_backends() {
        let err = <Xgemv as Routine<f32>>::run_reference(backend, &args, &mut buffers.clone())
            .unwrap_err();
        assert!(matches!(err, ProbeError::UnsupportedConfiguration(_)), "{backend}: {err}");
    }
}

#[test]
fn unknown_backend_names_are_rejected() {
    let err = "mkl".parse::<BackendId>().unwrap_err();
    assert!(matches!(err, ProbeError::UnsupportedConfiguration(_)));
    assert!(parse_backends("naive, openblas").is_err());
    assert_eq!(parse_backends(" naive ,,naive").unwrap(), vec![BackendId::Naive]);
}
