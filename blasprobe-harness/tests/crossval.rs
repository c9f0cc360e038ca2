//! Every registered (routine, precision) pair against every compiled reference backend.

use blasprobe_core::{Arguments, Complex64, Diagonal, Layout, Side, Transpose, Triangle};
use blasprobe_harness::{registry, HarnessConfig, RegistryEntry, Tester};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_test_writer()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .try_init();
}

/// A template that supplies every option, leaving leading dimensions to the descriptors.
fn random_template(rng: &mut StdRng, layout: Layout) -> Arguments<Complex64> {
    let pick = |rng: &mut StdRng, n: usize| rng.gen_range(0..n);
    Arguments::new()
        .with_m(rng.gen_range(1..7))
        .with_n(rng.gen_range(1..7))
        .with_k(rng.gen_range(1..5))
        .with_kl(rng.gen_range(0..3))
        .with_ku(rng.gen_range(0..3))
        .with_layout(layout)
        .with_a_transpose(Transpose::No)
        .with_b_transpose(Transpose::No)
        .with_side(Side::ALL[pick(rng, 2)])
        .with_triangle(Triangle::ALL[pick(rng, 2)])
        .with_diagonal(Diagonal::ALL[pick(rng, 2)])
        .with_x_inc(rng.gen_range(1..4))
        .with_y_inc(rng.gen_range(1..4))
        .with_all_offsets(rng.gen_range(0..3))
        .with_alpha(Complex64::new(rng.gen_range(-1.5..1.5), rng.gen_range(-1.0..1.0)))
        .with_beta(Complex64::new(rng.gen_range(-1.0..1.0), rng.gen_range(-0.5..0.5)))
}

fn transposes_or_default(found: Vec<Transpose>) -> Vec<Transpose> {
    if found.is_empty() {
        vec![Transpose::No]
    } else {
        found
    }
}

/// Transpose variants worth running: conjugation only when some backend tells it apart.
fn candidates(tester: &Tester, entry: &RegistryEntry) -> Vec<Transpose> {
    let conjugate = tester
        .backends()
        .iter()
        .any(|b| b.distinguishes_conjugate(entry.precision));
    Transpose::ALL
        .into_iter()
        .filter(|&t| conjugate || t != Transpose::Conjugate)
        .collect()
}

fn check_all_variants(tester: &Tester, entry: &RegistryEntry, template: &Arguments<Complex64>) {
    let candidates = candidates(tester, entry);
    for a_t in transposes_or_default(entry.a_transposes(&candidates)) {
        for b_t in transposes_or_default(entry.b_transposes(&candidates)) {
            let args = template.clone().with_a_transpose(a_t).with_b_transpose(b_t);
            let reports = entry
                .check(tester, &args)
                .unwrap_or_else(|e| panic!("{} ({a_t}, {b_t}): {e}", entry.full_name()));
            assert_eq!(reports.len(), tester.backends().len());
            for report in reports {
                assert!(
                    report.passed(),
                    "{} {:?} a={a_t} b={b_t}: {report:?}",
                    entry.full_name(),
                    args.layout
                );
                assert!(report.compared > 0);
            }
        }
    }
}

#[test]
fn every_routine_matches_the_references() {
    init_tracing();
    let tester = Tester::new(HarnessConfig::default().with_threads(3));
    let mut rng = StdRng::seed_from_u64(42);

    for entry in registry() {
        for layout in Layout::ALL {
            for _ in 0..2 {
                let template = random_template(&mut rng, layout);
                check_all_variants(&tester, &entry, &template);
            }
        }
    }
}

#[test]
fn explicit_leading_dimensions_with_padding() {
    init_tracing();
    let tester = Tester::new(HarnessConfig::default().with_seed(7));
    for name in ["sgemm", "zgemm", "dsymm", "chemm", "ztrsm", "dsyr2k", "cher2k"] {
        let entry = blasprobe_harness::lookup_full(name).unwrap();
        for layout in Layout::ALL {
            // every stored line is at most 6 long, so 9 always leaves padding
            let template = Arguments::<Complex64>::new()
                .with_m(5)
                .with_n(6)
                .with_k(4)
                .with_layout(layout)
                .with_a_transpose(Transpose::No)
                .with_b_transpose(Transpose::No)
                .with_side(Side::Right)
                .with_triangle(Triangle::Lower)
                .with_diagonal(Diagonal::NonUnit)
                .with_a_ld(9)
                .with_b_ld(9)
                .with_c_ld(9)
                .with_a_offset(2)
                .with_b_offset(1)
                .with_c_offset(3)
                .with_alpha(Complex64::new(0.75, 0.5))
                .with_beta(Complex64::new(-0.5, 0.25));
            for report in entry.check(&tester, &template).unwrap() {
                assert!(report.passed(), "{name} {layout:?}: {report:?}");
            }
        }
    }
}

#[test]
fn empty_problems_compare_nothing() {
    let tester = Tester::new(HarnessConfig::default());
    let template = Arguments::<Complex64>::new()
        .with_m(0)
        .with_n(0)
        .with_k(0)
        .with_layout(Layout::RowMajor)
        .with_a_transpose(Transpose::No)
        .with_b_transpose(Transpose::No)
        .with_a_ld(1)
        .with_b_ld(1)
        .with_c_ld(1)
        .with_x_inc(1)
        .with_y_inc(1)
        .with_all_offsets(0)
        .with_alpha(Complex64::new(1.0, 0.0))
        .with_beta(Complex64::new(0.0, 0.0));
    for name in ["daxpy", "zgemv", "sgemm"] {
        let entry = blasprobe_harness::lookup_full(name).unwrap();
        for report in entry.check(&tester, &template).unwrap() {
            assert_eq!(report.compared, 0, "{name}");
            assert!(report.passed());
        }
    }
}
