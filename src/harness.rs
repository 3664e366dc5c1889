use crate::config::HarnessConfig;
use itertools::Itertools;
use serde::Serialize;
use std::fmt;
use std::time::{Duration, Instant};
use tracing::{debug, info};

/// Largest batch the calibration step will try.
const MAX_BATCH: u64 = 1 << 24;

/// Two-sided 95% Student t critical values, indexed by degrees of freedom.
const T_TABLE: [f64; 31] = [
    0.0, 12.706, 4.303, 3.182, 2.776, 2.571, 2.447, 2.365, 2.306, 2.262, 2.228, 2.201, 2.179,
    2.16, 2.145, 2.131, 2.12, 2.11, 2.101, 2.093, 2.086, 2.08, 2.074, 2.069, 2.064, 2.06, 2.056,
    2.052, 2.048, 2.045, 2.042,
];
const T_INFINITY: f64 = 1.96;

fn critical_value(df: usize) -> f64 {
    T_TABLE.get(df).copied().unwrap_or(T_INFINITY)
}

/// Timing statistics for one workload.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BenchmarkResult {
    pub label: String,
    pub samples: usize,
    /// Mean seconds per call.
    pub mean: f64,
    /// Sample standard deviation of the per-call time.
    pub deviation: f64,
    /// Margin of error in seconds at 95% confidence.
    pub moe: f64,
    /// Margin of error relative to the mean, in percent.
    pub rme: f64,
}

impl BenchmarkResult {
    pub fn from_samples(label: impl Into<String>, samples: &[f64]) -> Self {
        let n = samples.len();
        let mean = if n == 0 {
            0.0
        } else {
            samples.iter().sum::<f64>() / n as f64
        };
        let variance = if n > 1 {
            samples.iter().map(|s| (s - mean).powi(2)).sum::<f64>() / (n - 1) as f64
        } else {
            0.0
        };
        let deviation = variance.sqrt();
        let sem = if n > 0 { deviation / (n as f64).sqrt() } else { 0.0 };
        let moe = sem * critical_value(n.saturating_sub(1));
        let rme = if mean > 0.0 { moe / mean * 100.0 } else { 0.0 };
        Self {
            label: label.into(),
            samples: n,
            mean,
            deviation,
            moe,
            rme,
        }
    }

    /// Calls per second.
    pub fn hz(&self) -> f64 {
        if self.mean > 0.0 { 1.0 / self.mean } else { f64::INFINITY }
    }

    fn overlaps(&self, other: &BenchmarkResult) -> bool {
        self.mean - self.moe <= other.mean + other.moe && other.mean - other.moe <= self.mean + self.moe
    }
}

impl fmt::Display for BenchmarkResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} x {} ops/sec ±{:.2}% ({} run{} sampled)",
            self.label,
            format_hz(self.hz()),
            self.rme,
            self.samples,
            if self.samples == 1 { "" } else { "s" }
        )
    }
}

/// Formats a rate with thousands separators, keeping two decimals below 100.
pub fn format_hz(hz: f64) -> String {
    if !hz.is_finite() {
        return "∞".to_string();
    }
    let fixed = if hz < 100.0 {
        format!("{:.2}", hz)
    } else {
        format!("{:.0}", hz)
    };
    let (int_part, frac_part) = match fixed.split_once('.') {
        Some((i, f)) => (i, Some(f)),
        None => (fixed.as_str(), None),
    };
    let grouped = int_part
        .as_bytes()
        .rchunks(3)
        .rev()
        .map(|chunk| String::from_utf8_lossy(chunk).into_owned())
        .join(",");
    match frac_part {
        Some(frac) => format!("{}.{}", grouped, frac),
        None => grouped,
    }
}

/// Results of a suite run, in registration order.
#[derive(Debug, Clone, Serialize)]
pub struct Report {
    pub suite: String,
    pub results: Vec<BenchmarkResult>,
}

impl Report {
    /// Labels of the fastest workload and of any whose confidence interval
    /// overlaps it.
    pub fn fastest(&self) -> Vec<&str> {
        let Some(leader) = self
            .results
            .iter()
            .min_by(|a, b| a.mean.total_cmp(&b.mean))
        else {
            return Vec::new();
        };
        self.results
            .iter()
            .filter(|r| r.overlaps(leader))
            .map(|r| r.label.as_str())
            .collect()
    }

    pub fn fastest_line(&self) -> String {
        format!("Fastest is {}", self.fastest().join(","))
    }

    pub fn get(&self, label: &str) -> Option<&BenchmarkResult> {
        self.results.iter().find(|r| r.label == label)
    }
}

/// A named group of workloads, each a zero-argument callback that may be
/// invoked any number of times.
pub struct Suite<'a> {
    name: String,
    workloads: Vec<(String, Box<dyn FnMut() + 'a>)>,
}

impl<'a> Suite<'a> {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            workloads: Vec::new(),
        }
    }

    pub fn add<F: FnMut() + 'a>(mut self, label: impl Into<String>, workload: F) -> Self {
        self.workloads.push((label.into(), Box::new(workload)));
        self
    }

    pub fn len(&self) -> usize {
        self.workloads.len()
    }

    pub fn is_empty(&self) -> bool {
        self.workloads.is_empty()
    }

    /// Runs every workload in order, printing one line per workload.
    pub fn run(self, config: &HarnessConfig) -> Report {
        self.run_with(config, |result| println!("{}", result))
    }

    /// Runs every workload in order, handing each result to `on_cycle` as soon
    /// as it is measured.
    pub fn run_with<C: FnMut(&BenchmarkResult)>(self, config: &HarnessConfig, mut on_cycle: C) -> Report {
        info!(suite = %self.name, workloads = self.workloads.len(), "running suite");
        let mut results = Vec::with_capacity(self.workloads.len());
        for (label, mut workload) in self.workloads {
            let result = measure(&label, workload.as_mut(), config);
            on_cycle(&result);
            results.push(result);
        }
        info!(suite = %self.name, "suite complete");
        Report {
            suite: self.name,
            results,
        }
    }
}

fn run_batch(workload: &mut dyn FnMut(), batch: u64) -> Duration {
    let start = Instant::now();
    for _ in 0..batch {
        workload();
    }
    start.elapsed()
}

/// Doubles the batch size until one batch takes at least `min_sample_time`.
fn calibrate(workload: &mut dyn FnMut(), min_sample_time: Duration) -> u64 {
    let mut batch = 1;
    loop {
        let elapsed = run_batch(workload, batch);
        if elapsed >= min_sample_time || batch >= MAX_BATCH {
            return batch;
        }
        batch *= 2;
    }
}

/// Times one workload: a warm-up call, calibration, then samples until both
/// the sample floor and the time budget are met.
pub fn measure(label: &str, workload: &mut dyn FnMut(), config: &HarnessConfig) -> BenchmarkResult {
    workload();
    let batch = calibrate(workload, config.min_sample_time);
    let min_samples = config.min_samples.max(1);
    let max_samples = config.max_samples.max(min_samples);
    debug!(label, batch, "calibrated");

    let mut samples = Vec::with_capacity(min_samples);
    let start = Instant::now();
    while samples.len() < max_samples
        && (samples.len() < min_samples || start.elapsed() < config.max_time)
    {
        let elapsed = run_batch(workload, batch);
        samples.push(elapsed.as_secs_f64() / batch as f64);
    }
    debug!(label, samples = samples.len(), elapsed_ms = start.elapsed().as_millis() as u64, "sampled");
    BenchmarkResult::from_samples(label, &samples)
}
