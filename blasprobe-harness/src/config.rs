//! Harness configuration: defaults plus `BLASPROBE_*` environment overrides.

use crate::backend::{available_backends, BackendId};
use blasprobe_core::parallel::default_threads;
use blasprobe_core::{ProbeError, Result};
use serde::{Deserialize, Serialize};
use std::env;
use std::str::FromStr;

/// Seed used when none is configured.
pub const DEFAULT_SEED: u64 = 0x5eed_b1a5;

/// Knobs shared by the correctness and performance drivers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HarnessConfig {
    /// Seed for input generation; the same seed reproduces the same buffers.
    pub seed: u64,
    /// Timed repetitions per backend in a benchmark.
    pub runs: usize,
    /// Worker threads the accelerated library's queue may use.
    pub threads: usize,
    /// Reference backends to compare against. Entries not compiled in are skipped.
    pub backends: Vec<BackendId>,
    /// Relative tolerance override; `None` keeps the per-precision default.
    pub tolerance: Option<f64>,
}

impl Default for HarnessConfig {
    fn default() -> Self {
        Self {
            seed: DEFAULT_SEED,
            runs: 10,
            threads: default_threads(),
            backends: available_backends(),
            tolerance: None,
        }
    }
}

impl HarnessConfig {
    /// Defaults overridden by `BLASPROBE_SEED`, `BLASPROBE_RUNS`,
    /// `BLASPROBE_THREADS`, `BLASPROBE_BACKENDS` (comma separated) and
    /// `BLASPROBE_TOLERANCE`.
    pub fn from_env() -> Result<Self> {
        let mut cfg = Self::default();

        if let Ok(v) = env::var("BLASPROBE_SEED") {
            cfg.seed = parse_env("BLASPROBE_SEED", &v)?;
        }
        if let Ok(v) = env::var("BLASPROBE_RUNS") {
            cfg.runs = parse_env::<usize>("BLASPROBE_RUNS", &v)?.max(1);
        }
        if let Ok(v) = env::var("BLASPROBE_THREADS") {
            cfg.threads = parse_env::<usize>("BLASPROBE_THREADS", &v)?.max(1);
        }
        if let Ok(v) = env::var("BLASPROBE_BACKENDS") {
            cfg.backends = parse_backends(&v)?;
        }
        if let Ok(v) = env::var("BLASPROBE_TOLERANCE") {
            cfg.tolerance = Some(parse_env("BLASPROBE_TOLERANCE", &v)?);
        }

        Ok(cfg)
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    pub fn with_threads(mut self, threads: usize) -> Self {
        self.threads = threads.max(1);
        self
    }

    pub fn with_backends(mut self, backends: Vec<BackendId>) -> Self {
        self.backends = backends;
        self
    }

    pub fn with_tolerance(mut self, tolerance: f64) -> Self {
        self.tolerance = Some(tolerance);
        self
    }
}

fn parse_env<V: FromStr>(key: &str, value: &str) -> Result<V> {
    value.trim().parse().map_err(|_| {
        ProbeError::UnsupportedConfiguration(format!("{key}: cannot parse `{value}`"))
    })
}

/// Comma-separated backend names; empty entries are ignored.
pub fn parse_backends(value: &str) -> Result<Vec<BackendId>> {
    let mut backends = Vec::new();
    for name in value.split(',').map(str::trim).filter(|s| !s.is_empty()) {
        let backend: BackendId = name.parse()?;
        if !backends.contains(&backend) {
            backends.push(backend);
        }
    }
    Ok(backends)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_uses_compiled_backends() {
        let cfg = HarnessConfig::default();
        assert_eq!(cfg.backends, available_backends());
        assert!(cfg.threads >= 1);
        assert_eq!(cfg.tolerance, None);
    }

    #[test]
    fn test_parse_backends_dedups_and_trims() {
        assert_eq!(
            parse_backends(" naive, cblas ,naive,").unwrap(),
            vec![BackendId::Naive, BackendId::Cblas]
        );
        assert!(parse_backends("").unwrap().is_empty());
        assert!(matches!(
            parse_backends("naive,mkl"),
            Err(ProbeError::UnsupportedConfiguration(_))
        ));
    }

    #[test]
    fn test_parse_env_reports_key() {
        let err = parse_env::<usize>("BLASPROBE_RUNS", "ten").unwrap_err();
        assert!(err.to_string().contains("BLASPROBE_RUNS"));
        assert_eq!(parse_env::<f64>("BLASPROBE_TOLERANCE", " 1e-3 ").unwrap(), 1e-3);
    }

    #[test]
    fn test_config_serializes() {
        let cfg = HarnessConfig::default().with_seed(7).with_tolerance(0.5);
        let json = serde_json::to_string(&cfg).unwrap();
        let back: HarnessConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(back, cfg);
    }
}
