//! Packed Hermitian rank-2 update of order 4: agreement and cost.

use blasprobe_core::{
    packed_len, Arguments, BufferRole, Buffers, Complex32, Complex64, Layout, Queue, Scalar,
    SplitMix64, Triangle,
};
use blasprobe_harness::routines::Xhpr2;
use blasprobe_harness::{available_backends, HarnessConfig, Routine, Tester};

fn hpr2_args<T: Scalar>(layout: Layout, triangle: Triangle) -> Arguments<T> {
    Arguments::<T>::new()
        .with_layout(layout)
        .with_triangle(triangle)
        .with_n(4)
        .with_alpha(T::from_c64(Complex64::new(0.8, -0.3)))
        .with_x_inc(1)
        .with_y_inc(1)
        .with_ap_offset(0)
        .with_x_offset(0)
        .with_y_offset(0)
}

#[test]
fn ten_packed_positions_agree() {
    let mut args = hpr2_args::<Complex64>(Layout::ColMajor, Triangle::Upper);
    <Xhpr2 as Routine<Complex64>>::apply_derived_sizes(&mut args);
    assert_eq!(args.size(BufferRole::AP), 10);

    let roles = <Xhpr2 as Routine<Complex64>>::buffer_roles();
    let mut inputs = Buffers::allocate(&args, &roles);
    inputs.fill_random(&roles, &mut SplitMix64::new(2024));

    let mut primary = inputs.clone();
    <Xhpr2 as Routine<Complex64>>::run_primary(&args, &mut primary, &mut Queue::new(2)).unwrap();
    let expected = <Xhpr2 as Routine<Complex64>>::extract_result(&args, &primary);
    assert_eq!(expected.len(), 10);

    for backend in available_backends() {
        let mut reference = inputs.clone();
        <Xhpr2 as Routine<Complex64>>::run_reference(backend, &args, &mut reference).unwrap();
        let actual = <Xhpr2 as Routine<Complex64>>::extract_result(&args, &reference);
        for i in 0..packed_len(4) {
            let at = <Xhpr2 as Routine<Complex64>>::result_index(&args, i, None);
            let (e, a) = (expected[at], actual[at]);
            let scale = e.norm().max(a.norm()).max(f64::MIN_POSITIVE);
            assert!((e - a).norm() / scale <= 1e-5, "{backend} position {i}: {e} vs {a}");
        }
    }
}

#[test]
fn tester_agrees_for_both_complex_precisions() {
    let tester = Tester::new(HarnessConfig::default().with_tolerance(1e-5));
    for layout in Layout::ALL {
        for triangle in Triangle::ALL {
            let single = tester
                .check::<Xhpr2, Complex32>(&hpr2_args(layout, triangle))
                .unwrap();
            let double = tester
                .check::<Xhpr2, Complex64>(&hpr2_args(layout, triangle))
                .unwrap();
            for report in single.iter().chain(&double) {
                assert_eq!(report.compared, 10);
                assert!(report.passed(), "{report:?}");
            }
        }
    }
}

#[test]
fn cost_of_order_four() {
    let double = hpr2_args::<Complex64>(Layout::RowMajor, Triangle::Lower);
    assert_eq!(<Xhpr2 as Routine<Complex64>>::flop_count(&double), 50);
    assert_eq!(<Xhpr2 as Routine<Complex64>>::byte_count(&double), (4 * 5 + 2 * 4) * 16);

    let single = hpr2_args::<Complex32>(Layout::RowMajor, Triangle::Lower);
    assert_eq!(<Xhpr2 as Routine<Complex32>>::flop_count(&single), 50);
    assert_eq!(<Xhpr2 as Routine<Complex32>>::byte_count(&single), (4 * 5 + 2 * 4) * 8);
}
