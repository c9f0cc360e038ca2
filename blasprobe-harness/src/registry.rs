//! Every (routine, precision) pair the harness knows, behind type-erased entry points.
//!
//! A caller that only has a routine name and a precision at run time picks an
//! entry here and hands it a full-precision argument template; the entry casts
//! the template to its own element type before driving the tester.

use crate::backend::BackendScalar;
use crate::descriptor::{BlasLevel, Routine};
use crate::routines::*;
use crate::tester::{CaseReport, PerfReport, Tester};
use blasprobe_core::{Arguments, Complex32, Complex64, Opt, Precision, Result, Transpose};
use std::fmt;

pub type CheckFn = fn(&Tester, &Arguments<Complex64>) -> Result<Vec<CaseReport>>;
pub type BenchFn = fn(&Tester, &Arguments<Complex64>, usize) -> Result<Vec<PerfReport>>;
pub type TransposeFilter = fn(&[Transpose]) -> Vec<Transpose>;

#[derive(Clone, Copy)]
pub struct RegistryEntry {
    pub name: &'static str,
    pub precision: Precision,
    pub level: BlasLevel,
    pub required_options: &'static [Opt],
    a_transposes: TransposeFilter,
    b_transposes: TransposeFilter,
    check: CheckFn,
    bench: BenchFn,
}

impl RegistryEntry {
    pub fn of<R: Routine<T>, T: BackendScalar>() -> Self {
        Self {
            name: R::NAME,
            precision: T::PRECISION,
            level: R::operation_level(),
            required_options: R::required_options(),
            a_transposes: R::applicable_a_transposes,
            b_transposes: R::applicable_b_transposes,
            check: check_erased::<R, T>,
            bench: bench_erased::<R, T>,
        }
    }

    /// Conventional BLAS name with its precision prefix (`"zhpr2"`).
    pub fn full_name(&self) -> String {
        format!("{}{}", self.precision.prefix(), self.name)
    }

    /// Transposes of `candidates` the routine accepts for A; empty when it has no such option.
    pub fn a_transposes(&self, candidates: &[Transpose]) -> Vec<Transpose> {
        (self.a_transposes)(candidates)
    }

    pub fn b_transposes(&self, candidates: &[Transpose]) -> Vec<Transpose> {
        (self.b_transposes)(candidates)
    }

    pub fn check(&self, tester: &Tester, template: &Arguments<Complex64>) -> Result<Vec<CaseReport>> {
        (self.check)(tester, template)
    }

    pub fn bench(
        &self,
        tester: &Tester,
        template: &Arguments<Complex64>,
        runs: usize,
    ) -> Result<Vec<PerfReport>> {
        (self.bench)(tester, template, runs)
    }
}

impl fmt::Debug for RegistryEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RegistryEntry")
            .field("name", &self.full_name())
            .field("level", &self.level)
            .finish()
    }
}

fn check_erased<R: Routine<T>, T: BackendScalar>(
    tester: &Tester,
    template: &Arguments<Complex64>,
) -> Result<Vec<CaseReport>> {
    tester.check::<R, T>(&template.cast::<T>())
}

fn bench_erased<R: Routine<T>, T: BackendScalar>(
    tester: &Tester,
    template: &Arguments<Complex64>,
    runs: usize,
) -> Result<Vec<PerfReport>> {
    tester.bench::<R, T>(&template.cast::<T>(), runs)
}

macro_rules! push_entries {
    ($list:ident, all: $r:ty) => {
        push_entries!($list, real: $r);
        push_entries!($list, complex: $r);
    };
    ($list:ident, real: $r:ty) => {
        $list.push(RegistryEntry::of::<$r, f32>());
        $list.push(RegistryEntry::of::<$r, f64>());
    };
    ($list:ident, complex: $r:ty) => {
        $list.push(RegistryEntry::of::<$r, Complex32>());
        $list.push(RegistryEntry::of::<$r, Complex64>());
    };
}

/// All entries, in catalogue order (level, then routine, then precision).
pub fn registry() -> Vec<RegistryEntry> {
    let mut list = Vec::new();

    push_entries!(list, all: Xswap);
    push_entries!(list, all: Xscal);
    push_entries!(list, all: Xcopy);
    push_entries!(list, all: Xaxpy);
    push_entries!(list, real: Xdot);
    push_entries!(list, complex: Xdotu);
    push_entries!(list, complex: Xdotc);
    push_entries!(list, all: Xnrm2);
    push_entries!(list, all: Xasum);
    push_entries!(list, all: Xamax);
    push_entries!(list, real: Xrot);

    push_entries!(list, all: Xgemv);
    push_entries!(list, all: Xgbmv);
    push_entries!(list, complex: Xhemv);
    push_entries!(list, complex: Xhpmv);
    push_entries!(list, real: Xsymv);
    push_entries!(list, real: Xspmv);
    push_entries!(list, all: Xtrmv);
    push_entries!(list, all: Xtpmv);
    push_entries!(list, all: Xtrsv);
    push_entries!(list, real: Xger);
    push_entries!(list, complex: Xgeru);
    push_entries!(list, complex: Xgerc);
    push_entries!(list, complex: Xher);
    push_entries!(list, complex: Xhpr);
    push_entries!(list, complex: Xher2);
    push_entries!(list, complex: Xhpr2);
    push_entries!(list, real: Xsyr);
    push_entries!(list, real: Xspr);
    push_entries!(list, real: Xsyr2);
    push_entries!(list, real: Xspr2);

    push_entries!(list, all: Xgemm);
    push_entries!(list, all: Xsymm);
    push_entries!(list, complex: Xhemm);
    push_entries!(list, all: Xsyrk);
    push_entries!(list, complex: Xherk);
    push_entries!(list, all: Xsyr2k);
    push_entries!(list, complex: Xher2k);
    push_entries!(list, all: Xtrmm);
    push_entries!(list, all: Xtrsm);

    list
}

pub fn lookup(name: &str, precision: Precision) -> Option<RegistryEntry> {
    registry()
        .into_iter()
        .find(|e| e.name == name && e.precision == precision)
}

/// Finds an entry by its prefixed name, e.g. `"dgemm"` or `"chemv"`.
pub fn lookup_full(full_name: &str) -> Option<RegistryEntry> {
    registry().into_iter().find(|e| e.full_name() == full_name)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_registry_has_every_pair_once() {
        let entries = registry();
        // 18 routines at all four precisions, 9 real-only and 13 complex-only at two
        assert_eq!(entries.len(), 18 * 4 + 9 * 2 + 13 * 2);
        let names: HashSet<String> = entries.iter().map(|e| e.full_name()).collect();
        assert_eq!(names.len(), entries.len());
    }

    #[test]
    fn test_precision_restrictions() {
        assert!(lookup("dot", Precision::Double).is_some());
        assert!(lookup("dot", Precision::ComplexDouble).is_none());
        assert!(lookup("herk", Precision::ComplexSingle).is_some());
        assert!(lookup("herk", Precision::Single).is_none());
        assert!(lookup_full("zgemm").is_some());
        assert!(lookup_full("sgerc").is_none());
    }

    #[test]
    fn test_entries_carry_levels() {
        assert_eq!(lookup_full("samax").map(|e| e.level), Some(BlasLevel::One));
        assert_eq!(lookup_full("zhpr2").map(|e| e.level), Some(BlasLevel::Two));
        assert_eq!(lookup_full("ctrsm").map(|e| e.level), Some(BlasLevel::Three));
    }

    #[test]
    fn test_entries_expose_transpose_filters() {
        let zherk = lookup_full("zherk").unwrap();
        assert_eq!(
            zherk.a_transposes(&Transpose::ALL),
            vec![Transpose::No, Transpose::Conjugate]
        );
        assert!(zherk.b_transposes(&Transpose::ALL).is_empty());
        assert_eq!(lookup_full("sgemm").unwrap().b_transposes(&Transpose::ALL).len(), 3);
        assert!(lookup_full("daxpy").unwrap().a_transposes(&Transpose::ALL).is_empty());
    }
}
