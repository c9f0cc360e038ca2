//! Lean correctness and performance drivers over the descriptor protocol.
//!
//! Neither driver knows any routine by name: everything it needs comes from
//! the [`Routine`] implementation it is instantiated with.

use crate::backend::BackendId;
use crate::config::HarnessConfig;
use crate::descriptor::Routine;
use crate::routines::common::PRIMARY;
use blasprobe_core::{
    Arguments, Buffers, Complex64, Precision, Queue, Result, Scalar, SplitMix64,
};
use serde::{Deserialize, Serialize};
use std::time::{Duration, Instant};
use tracing::{debug, info, warn};

/// Acceptance band for one compared position:
/// `|expected - actual| <= abs + rel * max(|expected|, |actual|)`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Tolerance {
    pub rel: f64,
    pub abs: f64,
}

impl Tolerance {
    pub fn for_precision(precision: Precision) -> Self {
        match precision {
            Precision::Single | Precision::ComplexSingle => Self { rel: 1e-4, abs: 1e-4 },
            Precision::Double | Precision::ComplexDouble => Self { rel: 1e-10, abs: 1e-10 },
        }
    }

    pub fn with_rel(self, rel: f64) -> Self {
        Self { rel, ..self }
    }

    /// Relative error of the pair and whether it is inside the band.
    pub fn compare(&self, expected: Complex64, actual: Complex64) -> (f64, bool) {
        let diff = (expected - actual).norm();
        let scale = expected.norm().max(actual.norm());
        let rel_error = if scale > 0.0 { diff / scale } else { 0.0 };
        (rel_error, diff <= self.abs + self.rel * scale)
    }
}

/// Outcome of comparing the accelerated library with one reference backend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CaseReport {
    pub routine: String,
    pub precision: String,
    pub backend: BackendId,
    pub compared: usize,
    pub mismatches: usize,
    pub max_rel_error: f64,
}

impl CaseReport {
    pub fn passed(&self) -> bool {
        self.mismatches == 0
    }

    pub fn to_json_line(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}

/// Best-of-N timing of one implementation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PerfReport {
    pub routine: String,
    pub precision: String,
    /// `blasprobe-blas` for the accelerated library, else the reference backend name.
    pub backend: String,
    pub runs: usize,
    pub best_ms: f64,
    pub gflops: f64,
    pub gbps: f64,
}

impl PerfReport {
    fn new<R: Routine<T>, T: Scalar>(
        args: &Arguments<T>,
        backend: &str,
        runs: usize,
        best: Duration,
    ) -> Self {
        let secs = best.as_secs_f64();
        let rate = |count: usize| {
            if secs > 0.0 {
                count as f64 / secs / 1e9
            } else {
                0.0
            }
        };
        Self {
            routine: R::NAME.to_string(),
            precision: T::PRECISION.prefix().to_string(),
            backend: backend.to_string(),
            runs,
            best_ms: secs * 1e3,
            gflops: rate(R::flop_count(args)),
            gbps: rate(R::byte_count(args)),
        }
    }

    pub fn to_json_line(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}

pub struct Tester {
    config: HarnessConfig,
}

impl Tester {
    pub fn new(config: HarnessConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &HarnessConfig {
        &self.config
    }

    /// Configured reference backends that are compiled into this build.
    pub fn backends(&self) -> Vec<BackendId> {
        self.config
            .backends
            .iter()
            .copied()
            .filter(|b| b.is_compiled())
            .collect()
    }

    fn tolerance(&self, precision: Precision) -> Tolerance {
        let tolerance = Tolerance::for_precision(precision);
        match self.config.tolerance {
            Some(rel) => tolerance.with_rel(rel),
            None => tolerance,
        }
    }

    /// Completes `args` for routine `R` and generates its seeded input buffers.
    pub fn setup<R: Routine<T>, T: Scalar>(
        &self,
        args: &Arguments<T>,
    ) -> Result<(Arguments<T>, Buffers<T>)> {
        args.validate_required(R::required_options())?;
        let mut args = args.clone();
        R::apply_default_leading_dimensions(&mut args);
        R::apply_derived_sizes(&mut args);

        let mut buffers = Buffers::allocate(&args, &R::buffer_roles());
        let mut rng = SplitMix64::new(self.config.seed);
        buffers.fill_random(R::input_buffer_roles(), &mut rng);
        R::prepare_inputs(&args, &mut buffers);
        Ok((args, buffers))
    }

    /// Runs the accelerated library and every reference backend on identical
    /// inputs and compares their outputs position by position.
    pub fn check<R: Routine<T>, T: Scalar>(&self, args: &Arguments<T>) -> Result<Vec<CaseReport>> {
        let (args, inputs) = self.setup::<R, T>(args)?;
        let precision = T::PRECISION;

        let mut primary = inputs.clone();
        let mut queue = Queue::new(self.config.threads);
        debug!(routine = R::NAME, %precision, backend = PRIMARY, "invoking");
        R::run_primary(&args, &mut primary, &mut queue)?;
        let expected = R::extract_result(&args, &primary);

        let tolerance = self.tolerance(precision);
        let mut reports = Vec::new();
        for backend in self.backends() {
            let mut buffers = inputs.clone();
            debug!(routine = R::NAME, %precision, %backend, "invoking");
            R::run_reference(backend, &args, &mut buffers)?;
            let actual = R::extract_result(&args, &buffers);

            let report = compare::<R, T>(&args, &expected, &actual, tolerance, backend);
            if report.passed() {
                info!(
                    routine = R::NAME,
                    %precision,
                    %backend,
                    compared = report.compared,
                    max_rel_error = report.max_rel_error,
                    "case passed"
                );
            } else {
                warn!(
                    routine = R::NAME,
                    %precision,
                    %backend,
                    mismatches = report.mismatches,
                    compared = report.compared,
                    max_rel_error = report.max_rel_error,
                    "results differ"
                );
            }
            reports.push(report);
        }
        Ok(reports)
    }

    /// Times the accelerated library and every reference backend, best of `runs`.
    pub fn bench<R: Routine<T>, T: Scalar>(
        &self,
        args: &Arguments<T>,
        runs: usize,
    ) -> Result<Vec<PerfReport>> {
        let (args, inputs) = self.setup::<R, T>(args)?;
        let runs = runs.max(1);

        let mut queue = Queue::new(self.config.threads);
        let best = best_of(runs, &inputs, |b| R::run_primary(&args, b, &mut queue))?;
        let mut reports = vec![PerfReport::new::<R, T>(&args, PRIMARY, runs, best)];

        for backend in self.backends() {
            let best = best_of(runs, &inputs, |b| R::run_reference(backend, &args, b))?;
            reports.push(PerfReport::new::<R, T>(&args, backend.name(), runs, best));
        }

        for report in &reports {
            info!(
                routine = R::NAME,
                precision = %T::PRECISION,
                backend = %report.backend,
                best_ms = report.best_ms,
                gflops = report.gflops,
                gbps = report.gbps,
                "benchmark"
            );
        }
        Ok(reports)
    }
}

/// Fastest of `runs` executions, each on a fresh copy of `inputs`.
fn best_of<T: Scalar, F>(runs: usize, inputs: &Buffers<T>, mut run: F) -> Result<Duration>
where
    F: FnMut(&mut Buffers<T>) -> Result<()>,
{
    let mut best = Duration::MAX;
    for _ in 0..runs {
        let mut buffers = inputs.clone();
        let start = Instant::now();
        run(&mut buffers)?;
        best = best.min(start.elapsed());
    }
    Ok(best)
}

fn compare<R: Routine<T>, T: Scalar>(
    args: &Arguments<T>,
    expected: &[T],
    actual: &[T],
    tolerance: Tolerance,
    backend: BackendId,
) -> CaseReport {
    let (primary, secondary) = R::result_extent(args);
    let columns: Vec<Option<usize>> = match secondary {
        Some(count) => (0..count).map(Some).collect(),
        None => vec![None],
    };

    let mut compared = 0;
    let mut mismatches = 0;
    let mut max_rel_error = 0.0_f64;
    for i in 0..primary {
        for &j in &columns {
            let at = R::result_index(args, i, j);
            compared += 1;
            match (expected.get(at), actual.get(at)) {
                (Some(e), Some(a)) => {
                    let (rel_error, ok) = tolerance.compare(e.to_c64(), a.to_c64());
                    max_rel_error = max_rel_error.max(rel_error);
                    if !ok {
                        mismatches += 1;
                    }
                }
                _ => mismatches += 1,
            }
        }
    }

    CaseReport {
        routine: R::NAME.to_string(),
        precision: T::PRECISION.prefix().to_string(),
        backend,
        compared,
        mismatches,
        max_rel_error,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::routines::{Xaxpy, Xhpr2, Xswap};
    use blasprobe_core::{Complex32, Opt, ProbeError};

    fn init_tracing() {
        let _ = tracing_subscriber::fmt()
            .with_test_writer()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .try_init();
    }

    fn tester() -> Tester {
        Tester::new(HarnessConfig::default().with_threads(2))
    }

    #[test]
    fn test_tolerance_band() {
        let tol = Tolerance::for_precision(Precision::Double);
        let (rel, ok) = tol.compare(Complex64::new(1.0, 0.0), Complex64::new(1.0 + 1e-12, 0.0));
        assert!(ok);
        assert!(rel < 1e-11);
        let (_, ok) = tol.compare(Complex64::new(1.0, 0.0), Complex64::new(1.001, 0.0));
        assert!(!ok);
        assert_eq!(tol.compare(Complex64::new(0.0, 0.0), Complex64::new(0.0, 0.0)), (0.0, true));
        assert_eq!(tol.with_rel(0.5).rel, 0.5);
    }

    #[test]
    fn test_setup_is_seeded() {
        let args = Arguments::<f64>::new()
            .with_n(5)
            .with_alpha(0.5)
            .with_x_inc(1)
            .with_y_inc(2)
            .with_x_offset(0)
            .with_y_offset(1);
        let t = tester();
        let (a1, b1) = t.setup::<Xaxpy, f64>(&args).unwrap();
        let (_, b2) = t.setup::<Xaxpy, f64>(&args).unwrap();
        assert_eq!(a1.size(blasprobe_core::BufferRole::Y), 11);
        assert_eq!(b1, b2);
        assert!(b1.y_vec.iter().any(|&v| v != 0.0));
    }

    #[test]
    fn test_missing_option_stops_check() {
        let args = Arguments::<f32>::new().with_n(4);
        let err = tester().check::<Xaxpy, f32>(&args).unwrap_err();
        assert!(matches!(err, ProbeError::MissingOption(Opt::XInc)));
    }

    #[test]
    fn test_check_swap_against_backends() {
        init_tracing();
        let args = Arguments::<Complex32>::new()
            .with_n(7)
            .with_x_inc(2)
            .with_y_inc(1)
            .with_x_offset(1)
            .with_y_offset(0);
        let reports = tester().check::<Xswap, Complex32>(&args).unwrap();
        assert_eq!(reports.len(), tester().backends().len());
        for report in reports {
            assert!(report.passed(), "{report:?}");
            assert_eq!(report.compared, 14);
        }
    }

    #[test]
    fn test_bench_reports_primary_first() {
        init_tracing();
        let args = Arguments::<Complex64>::new()
            .with_layout(blasprobe_core::Layout::ColMajor)
            .with_triangle(blasprobe_core::Triangle::Upper)
            .with_n(4)
            .with_alpha(Complex64::new(0.5, -0.25))
            .with_x_inc(1)
            .with_y_inc(1)
            .with_ap_offset(0)
            .with_x_offset(0)
            .with_y_offset(0);
        let reports = tester().bench::<Xhpr2, Complex64>(&args, 2).unwrap();
        assert_eq!(reports[0].backend, PRIMARY);
        assert_eq!(reports.len(), 1 + tester().backends().len());
        assert!(reports.iter().all(|r| r.runs == 2 && r.best_ms >= 0.0));
        let line = reports[0].to_json_line().unwrap();
        assert!(line.contains("\"routine\":\"hpr2\""));
    }
}
