//! Property tests over the descriptor size, index and option-conversion rules.

use blasprobe_core::{
    Arguments, BufferRole, Complex64, Diagonal, Layout, Side, Transpose, Triangle,
};
use blasprobe_harness::routines::{Xaxpy, Xgbmv, Xgemm, Xger, Xhpr2, Xspr, Xswap, Xsyrk, Xtrmm};
use blasprobe_harness::Routine;
use proptest::prelude::*;
use proptest::sample::select;

fn completed<R: Routine<T>, T: blasprobe_core::Scalar>(mut args: Arguments<T>) -> Arguments<T> {
    R::apply_default_leading_dimensions(&mut args);
    R::apply_derived_sizes(&mut args);
    args
}

/// Every logical output position lands inside the output buffer.
fn indices_in_bounds<R: Routine<T>, T: blasprobe_core::Scalar>(args: &Arguments<T>) -> bool {
    let role = R::output_buffer_roles()[0];
    let (rows, cols) = R::result_extent(args);
    (0..rows).all(|i| match cols {
        Some(cols) => (0..cols).all(|j| R::result_index(args, i, Some(j)) < args.size(role)),
        None => R::result_index(args, i, None) < args.size(role),
    })
}

proptest! {
    #[test]
    fn strided_vector_size(n in 0usize..200, inc in 1usize..8, off in 0usize..16) {
        let args = completed::<Xaxpy, f32>(
            Arguments::new().with_n(n).with_x_inc(inc).with_x_offset(off).with_y_inc(1),
        );
        prop_assert_eq!(args.size(BufferRole::X), n * inc + off);
        prop_assert_eq!(args.size(BufferRole::Y), n);
        prop_assert_eq!(args.size(BufferRole::A), 0);
    }

    #[test]
    fn packed_triangle_size(n in 0usize..100, off in 0usize..16) {
        let args = completed::<Xspr, f64>(Arguments::new().with_n(n).with_ap_offset(off));
        prop_assert_eq!(args.size(BufferRole::AP), n * (n + 1) / 2 + off);
    }

    #[test]
    fn derived_sizing_is_idempotent(
        m in 0usize..12,
        n in 0usize..12,
        k in 0usize..12,
        kl in 0usize..4,
        ku in 0usize..4,
        layout in select(Layout::ALL.to_vec()),
        a_t in select(Transpose::ALL.to_vec()),
        off in 0usize..4,
    ) {
        let base = Arguments::<Complex64>::new()
            .with_m(m)
            .with_n(n)
            .with_k(k)
            .with_kl(kl)
            .with_ku(ku)
            .with_layout(layout)
            .with_a_transpose(a_t)
            .with_all_offsets(off);

        let once = completed::<Xgemm, Complex64>(base.clone());
        let mut twice = once.clone();
        <Xgemm as Routine<Complex64>>::apply_derived_sizes(&mut twice);
        prop_assert_eq!(&once, &twice);

        let once = completed::<Xgbmv, Complex64>(base.clone());
        let mut twice = once.clone();
        <Xgbmv as Routine<Complex64>>::apply_derived_sizes(&mut twice);
        prop_assert_eq!(&once, &twice);

        let once = completed::<Xhpr2, Complex64>(base.clone());
        let mut twice = once.clone();
        <Xhpr2 as Routine<Complex64>>::apply_derived_sizes(&mut twice);
        prop_assert_eq!(&once, &twice);

        let once = completed::<Xswap, Complex64>(base);
        let mut twice = once.clone();
        <Xswap as Routine<Complex64>>::apply_derived_sizes(&mut twice);
        prop_assert_eq!(&once, &twice);
    }

    #[test]
    fn result_indices_stay_inside_outputs(
        m in 1usize..10,
        n in 1usize..10,
        k in 1usize..10,
        layout in select(Layout::ALL.to_vec()),
        a_t in select(vec![Transpose::No, Transpose::Yes]),
        side in select(Side::ALL.to_vec()),
        off in 0usize..5,
        pad in 0usize..3,
    ) {
        let base = Arguments::<f32>::new()
            .with_m(m)
            .with_n(n)
            .with_k(k)
            .with_layout(layout)
            .with_a_transpose(a_t)
            .with_side(side)
            .with_all_offsets(off);

        let gemm = completed::<Xgemm, f32>(base.clone());
        let padded = {
            let ld = gemm.c_ld + pad;
            completed::<Xgemm, f32>(base.clone().with_c_ld(ld))
        };
        prop_assert!(indices_in_bounds::<Xgemm, f32>(&gemm));
        prop_assert!(indices_in_bounds::<Xgemm, f32>(&padded));
        prop_assert!(indices_in_bounds::<Xsyrk, f32>(&completed::<Xsyrk, f32>(base.clone())));
        prop_assert!(indices_in_bounds::<Xger, f32>(&completed::<Xger, f32>(base.clone())));
        prop_assert!(indices_in_bounds::<Xtrmm, f32>(&completed::<Xtrmm, f32>(base)));
    }

    #[test]
    fn indexing_is_layout_consistent(
        rows in 1usize..10,
        cols in 1usize..10,
        pad in 0usize..4,
        off in 0usize..6,
    ) {
        // The same m x n result stored row-major and, transposed, column-major
        // occupies the same physical offsets.
        let ld = cols + pad;
        let row = Arguments::<f64>::new()
            .with_layout(Layout::RowMajor)
            .with_m(rows)
            .with_n(cols)
            .with_c_ld(ld)
            .with_c_offset(off);
        let col = Arguments::<f64>::new()
            .with_layout(Layout::ColMajor)
            .with_m(cols)
            .with_n(rows)
            .with_c_ld(ld)
            .with_c_offset(off);
        for i in 0..rows {
            for j in 0..cols {
                let r = <Xgemm as Routine<f64>>::result_index(&row, i, Some(j));
                let c = <Xgemm as Routine<f64>>::result_index(&col, j, Some(i));
                prop_assert_eq!(r, c);
                prop_assert_eq!(r, Layout::RowMajor.index(i, j, ld) + off);
            }
        }
    }
}

#[cfg(feature = "naive")]
#[test]
fn naive_codes_cover_every_variant() {
    use blasprobe_harness::backend::naive;
    use std::collections::HashSet;

    let layouts: HashSet<u8> = Layout::ALL.iter().map(|&l| naive::layout_code(l)).collect();
    assert_eq!(layouts, HashSet::from([b'R', b'C']));
    let transposes: HashSet<u8> = Transpose::ALL.iter().map(|&t| naive::transpose_code(t)).collect();
    assert_eq!(transposes, HashSet::from([b'N', b'T', b'C']));
    let triangles: HashSet<u8> = Triangle::ALL.iter().map(|&t| naive::triangle_code(t)).collect();
    assert_eq!(triangles, HashSet::from([b'U', b'L']));
    let diagonals: HashSet<u8> = Diagonal::ALL.iter().map(|&d| naive::diagonal_code(d)).collect();
    assert_eq!(diagonals, HashSet::from([b'U', b'N']));
    let sides: HashSet<u8> = Side::ALL.iter().map(|&s| naive::side_code(s)).collect();
    assert_eq!(sides, HashSet::from([b'L', b'R']));
}

#[cfg(feature = "cblas")]
#[test]
fn cblas_codes_cover_every_variant() {
    use blasprobe_harness::backend::cblas;

    let codes: Vec<i32> = Layout::ALL.iter().map(|&l| cblas::layout_code(l) as i32).collect();
    assert_eq!(codes, vec![101, 102]);
    let codes: Vec<i32> = Transpose::ALL
        .iter()
        .map(|&t| cblas::transpose_code(t) as i32)
        .collect();
    assert_eq!(codes, vec![111, 112, 113]);
    let codes: Vec<i32> = Triangle::ALL.iter().map(|&t| cblas::triangle_code(t) as i32).collect();
    assert_eq!(codes, vec![121, 122]);
    let codes: Vec<i32> = Diagonal::ALL.iter().map(|&d| cblas::diagonal_code(d) as i32).collect();
    assert_eq!(codes, vec![131, 132]);
    let codes: Vec<i32> = Side::ALL.iter().map(|&s| cblas::side_code(s) as i32).collect();
    assert_eq!(codes, vec![141, 142]);
}
