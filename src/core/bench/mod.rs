//! Micro-benchmark runner.
//!
//! Each task registered with [`Bench::add`] runs `iterations` times back to
//! back on the calling thread. Every invocation is timed individually and the
//! samples are reduced to total/average/fastest/slowest/median/std-dev in the
//! configured unit, rounded to 3 decimals. Tasks never run concurrently so
//! timings of different tasks stay comparable.

mod clock;
mod stats;
mod table;
mod unit;

pub use clock::{Clock, MonotonicClock};
pub use stats::{round3, summarize, Summary};
pub use table::render_table;
pub use unit::TimeUnit;

use crate::argv::ParsedArgs;
use crate::error::{Error, Result};
use serde::Serialize;
use std::any::Any;
use std::fmt::Display;
use std::panic::{self, AssertUnwindSafe};

pub const DEFAULT_ITERATIONS: usize = 1000;

/// Upper bound on sample storage reserved before a task first runs.
const MAX_PRESIZED_SAMPLES: usize = 1 << 20;

/// Benchmark settings.
///
/// `iterations` is carried as a number so that values arriving from config
/// files or the command line (`-1`, `1.5`) are rejected instead of truncated.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BenchOptions {
    pub iterations: f64,
    pub unit: TimeUnit,
}

impl Default for BenchOptions {
    fn default() -> Self {
        Self {
            iterations: DEFAULT_ITERATIONS as f64,
            unit: TimeUnit::default(),
        }
    }
}

impl BenchOptions {
    pub fn iterations(mut self, iterations: impl Into<f64>) -> Self {
        self.iterations = iterations.into();
        self
    }

    pub fn unit(mut self, unit: TimeUnit) -> Self {
        self.unit = unit;
        self
    }

    /// Read `--iterations` and `--unit` from parsed arguments, keeping `self`
    /// for anything not given.
    pub fn merge_args(self, args: &ParsedArgs) -> Result<Self> {
        let mut options = self;

        if let Some(value) = args.get("iterations") {
            options.iterations = value.as_f64().ok_or_else(|| {
                Error::bench_invalid_config(
                    "iterations",
                    Some(value.to_string()),
                    "Times must be a positive integer",
                )
            })?;
        }

        if let Some(value) = args.get("unit") {
            options.unit = value.to_string().parse()?;
        }

        Ok(options)
    }

    fn validated_iterations(&self) -> Result<usize> {
        let n = self.iterations;
        if !n.is_finite() || n <= 0.0 || n.fract() != 0.0 || n >= usize::MAX as f64 {
            return Err(Error::bench_invalid_config(
                "iterations",
                Some(n.to_string()),
                "Times must be a positive integer",
            ));
        }
        Ok(n as usize)
    }
}

/// Statistics for one task, already converted to `unit` and rounded.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TaskResult {
    pub name: String,
    pub unit: TimeUnit,
    pub iterations: usize,
    pub total: f64,
    pub average: f64,
    pub fastest: f64,
    pub slowest: f64,
    pub median: f64,
    pub std_dev: f64,
    /// Raw elapsed nanoseconds per invocation, in invocation order.
    #[serde(skip_serializing)]
    pub samples: Vec<u64>,
}

impl TaskResult {
    pub fn from_samples(name: impl Into<String>, samples: Vec<u64>, unit: TimeUnit) -> Self {
        let summary = summarize(&samples);
        let scale = |nanos: f64| round3(unit.from_nanos(nanos));

        Self {
            name: name.into(),
            unit,
            iterations: samples.len(),
            total: scale(summary.total),
            average: scale(summary.average),
            fastest: scale(summary.fastest),
            slowest: scale(summary.slowest),
            median: scale(summary.median),
            std_dev: scale(summary.std_dev),
            samples,
        }
    }

    /// Rescale the stored scalars into another unit (rounded to 3 decimals).
    pub fn in_unit(&self, unit: TimeUnit) -> Self {
        let factor = self.unit.divisor() / unit.divisor();
        let scale = |value: f64| round3(value * factor);

        Self {
            name: self.name.clone(),
            unit,
            iterations: self.iterations,
            total: scale(self.total),
            average: scale(self.average),
            fastest: scale(self.fastest),
            slowest: scale(self.slowest),
            median: scale(self.median),
            std_dev: scale(self.std_dev),
            samples: self.samples.clone(),
        }
    }
}

/// Sequential benchmark runner.
pub struct Bench {
    iterations: usize,
    unit: TimeUnit,
    clock: Box<dyn Clock>,
    results: Vec<TaskResult>,
}

impl Bench {
    pub fn new(options: BenchOptions) -> Result<Self> {
        Self::with_clock(options, MonotonicClock::default())
    }

    pub fn with_clock(options: BenchOptions, clock: impl Clock + 'static) -> Result<Self> {
        Ok(Self {
            iterations: options.validated_iterations()?,
            unit: options.unit,
            clock: Box::new(clock),
            results: Vec::new(),
        })
    }

    pub fn iterations(&self) -> usize {
        self.iterations
    }

    pub fn unit(&self) -> TimeUnit {
        self.unit
    }

    /// Benchmark an infallible task. A panic inside the task aborts this
    /// task's measurement and is reported as `bench.task_failed`.
    pub fn add<F: FnMut()>(&mut self, name: &str, mut task: F) -> Result<&mut Self> {
        self.try_add(name, || {
            panic::catch_unwind(AssertUnwindSafe(&mut task)).map_err(panic_message)
        })
    }

    /// Benchmark a fallible task. The first `Err` aborts the measurement; results
    /// of earlier tasks are kept.
    pub fn try_add<F, E>(&mut self, name: &str, mut task: F) -> Result<&mut Self>
    where
        F: FnMut() -> std::result::Result<(), E>,
        E: Display,
    {
        if name.is_empty() {
            return Err(Error::bench_invalid_config(
                "name",
                None,
                "Task name must be a non-empty string",
            ));
        }

        crate::log_status!("bench", "{} ({} iterations)", name, self.iterations);

        let mut samples = Vec::with_capacity(self.iterations.min(MAX_PRESIZED_SAMPLES));
        for iteration in 0..self.iterations {
            let start = self.clock.now_ns();
            let outcome = task();
            let end = self.clock.now_ns();

            if let Err(err) = outcome {
                return Err(Error::bench_task_failed(name, iteration, err.to_string()));
            }

            let elapsed = end.saturating_sub(start);
            samples.push(u64::try_from(elapsed).unwrap_or(u64::MAX));
        }

        self.results
            .push(TaskResult::from_samples(name, samples, self.unit));
        Ok(self)
    }

    /// Snapshot of all results in registration order.
    pub fn results(&self) -> Vec<TaskResult> {
        self.results.clone()
    }

    pub fn render_table(&self) -> String {
        render_table(&self.results)
    }

    /// Print the results table to stderr, or a warning when there is nothing to show.
    pub fn print(&self) {
        if self.results.is_empty() {
            eprintln!("warning: No benchmark results to display");
            return;
        }
        eprint!("{}", self.render_table());
    }
}

fn panic_message(payload: Box<dyn Any + Send>) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        message.to_string()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        "task panicked".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    /// Advances by the next scripted delta on every start/end pair.
    struct StepClock {
        now: Cell<u128>,
        deltas: Vec<u128>,
        reads: Cell<usize>,
    }

    impl StepClock {
        fn new(deltas: Vec<u128>) -> Self {
            Self {
                now: Cell::new(0),
                deltas,
                reads: Cell::new(0),
            }
        }
    }

    impl Clock for StepClock {
        fn now_ns(&self) -> u128 {
            let reads = self.reads.get();
            self.reads.set(reads + 1);
            // odd reads close an iteration
            if reads % 2 == 1 {
                let delta = self.deltas[(reads / 2) % self.deltas.len()];
                self.now.set(self.now.get() + delta);
            }
            self.now.get()
        }
    }

    #[test]
    fn records_one_sample_per_iteration() {
        let mut bench = Bench::new(BenchOptions::default().iterations(100)).unwrap();
        bench.add("t", || {}).unwrap();
        let results = bench.results();
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].samples.len(), 100);
        assert_eq!(results[0].iterations, 100);
    }

    #[test]
    fn default_options() {
        let bench = Bench::new(BenchOptions::default()).unwrap();
        assert_eq!(bench.iterations(), 1000);
        assert_eq!(bench.unit(), TimeUnit::Nanoseconds);
    }

    #[test]
    fn rejects_invalid_iterations() {
        for bad in [-1.0, 0.0, 1.5, f64::NAN, f64::INFINITY] {
            let err = Bench::new(BenchOptions::default().iterations(bad))
                .err()
                .expect("invalid iterations must fail");
            assert_eq!(err.code.as_str(), "bench.invalid_config");
        }
    }

    #[test]
    fn rejects_empty_name() {
        let mut bench = Bench::new(BenchOptions::default().iterations(1)).unwrap();
        let err = bench.add("", || {}).err().unwrap();
        assert_eq!(err.code.as_str(), "bench.invalid_config");
        assert!(err.message.contains("non-empty"));
    }

    #[test]
    fn runs_task_exactly_iterations_times() {
        let mut calls = 0;
        let mut bench = Bench::new(BenchOptions::default().iterations(37)).unwrap();
        bench.add("count", || calls += 1).unwrap();
        assert_eq!(calls, 37);
    }

    #[test]
    fn scripted_samples_produce_exact_statistics() {
        let clock = StepClock::new(vec![10, 40, 20, 30]);
        let mut bench = Bench::with_clock(BenchOptions::default().iterations(4), clock).unwrap();
        bench.add("scripted", || {}).unwrap();

        let result = &bench.results()[0];
        assert_eq!(result.samples, vec![10, 40, 20, 30]);
        assert_eq!(result.total, 100.0);
        assert_eq!(result.average, 25.0);
        assert_eq!(result.fastest, 10.0);
        assert_eq!(result.slowest, 40.0);
        assert_eq!(result.median, 30.0);
        assert_eq!(result.std_dev, round3(125f64.sqrt()));
    }

    #[test]
    fn converts_into_configured_unit() {
        let clock = StepClock::new(vec![1_500_000]);
        let options = BenchOptions::default()
            .iterations(2)
            .unit(TimeUnit::Milliseconds);
        let mut bench = Bench::with_clock(options, clock).unwrap();
        bench.add("ms", || {}).unwrap();

        let result = &bench.results()[0];
        assert_eq!(result.unit, TimeUnit::Milliseconds);
        assert_eq!(result.total, 3.0);
        assert_eq!(result.average, 1.5);
        assert_eq!(result.std_dev, 0.0);
    }

    #[test]
    fn failing_task_is_wrapped_and_earlier_results_kept() {
        let mut bench = Bench::new(BenchOptions::default().iterations(5)).unwrap();
        bench.add("ok", || {}).unwrap();

        let mut calls = 0;
        let err = bench
            .try_add("flaky", || {
                calls += 1;
                if calls == 3 {
                    Err("disk full")
                } else {
                    Ok(())
                }
            })
            .err()
            .unwrap();

        assert_eq!(err.code.as_str(), "bench.task_failed");
        assert!(err.message.contains("flaky"));
        assert!(err.message.contains("disk full"));
        assert_eq!(err.details["iteration"], 2);

        let results = bench.results();
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].name, "ok");
    }

    #[test]
    fn panicking_task_is_reported() {
        let mut bench = Bench::new(BenchOptions::default().iterations(2)).unwrap();
        let err = bench.add("boom", || panic!("kaput")).err().unwrap();
        assert_eq!(err.code.as_str(), "bench.task_failed");
        assert!(err.message.contains("kaput"));
        assert!(bench.results().is_empty());
    }

    #[test]
    fn add_chains() {
        let mut bench = Bench::new(BenchOptions::default().iterations(3)).unwrap();
        bench
            .add("a", || {})
            .and_then(|b| b.add("b", || {}))
            .unwrap();
        let names: Vec<String> = bench.results().into_iter().map(|r| r.name).collect();
        assert_eq!(names, vec!["a", "b"]);
    }

    #[test]
    fn results_are_a_snapshot() {
        let mut bench = Bench::new(BenchOptions::default().iterations(1)).unwrap();
        bench.add("a", || {}).unwrap();
        let mut snapshot = bench.results();
        snapshot.clear();
        assert_eq!(bench.results().len(), 1);
    }

    #[test]
    fn merge_args_reads_iterations_and_unit() {
        let args = crate::argv::parse_argv(
            &["--iterations=50", "--unit", "ms"],
            &crate::argv::ParseOptions::default(),
        );
        let options = BenchOptions::default().merge_args(&args).unwrap();
        assert_eq!(options.iterations, 50.0);
        assert_eq!(options.unit, TimeUnit::Milliseconds);
    }

    #[test]
    fn merge_args_rejects_non_numeric_iterations() {
        let args = crate::argv::parse_argv(
            &["--iterations=lots"],
            &crate::argv::ParseOptions::default(),
        );
        let err = BenchOptions::default().merge_args(&args).unwrap_err();
        assert_eq!(err.code.as_str(), "bench.invalid_config");
    }

    #[test]
    fn in_unit_round_trip_within_tolerance() {
        let result = TaskResult::from_samples("rt", vec![1_234_567, 2_345_678], TimeUnit::Nanoseconds);
        let back = result.in_unit(TimeUnit::Milliseconds).in_unit(TimeUnit::Nanoseconds);
        for (a, b) in [
            (result.total, back.total),
            (result.average, back.average),
            (result.fastest, back.fastest),
            (result.slowest, back.slowest),
            (result.median, back.median),
        ] {
            assert!((a - b).abs() <= 500.0, "{} vs {}", a, b);
        }
    }

    #[test]
    fn table_has_header_and_row_per_task() {
        let clock = StepClock::new(vec![5]);
        let mut bench = Bench::with_clock(BenchOptions::default().iterations(2), clock).unwrap();
        bench.add("first", || {}).unwrap();
        bench.add("second", || {}).unwrap();

        let table = bench.render_table();
        let lines: Vec<&str> = table.lines().collect();
        assert_eq!(lines.len(), 4);
        assert!(lines[0].contains("Task name"));
        assert!(lines[0].contains("Average (ns)"));
        assert!(lines[2].contains("first"));
        assert!(lines[3].contains("second"));
        assert!(lines[2].contains("5.000"));
    }

    #[test]
    fn huge_iteration_count_fails_on_task_error() {
        let mut bench = Bench::new(BenchOptions::default().iterations(1e15)).unwrap();
        let mut calls = 0;
        let err = bench
            .try_add("t", || {
                calls += 1;
                if calls == 3 {
                    Err("stop")
                } else {
                    Ok(())
                }
            })
            .err()
            .unwrap();

        assert_eq!(err.code.as_str(), "bench.task_failed");
        assert_eq!(err.details["iteration"], 2);
        assert!(bench.results().is_empty());
    }

    #[test]
    fn iterations_at_usize_max_are_rejected() {
        let err = Bench::new(BenchOptions::default().iterations(2f64.powi(64)))
            .err()
            .unwrap();
        assert_eq!(err.code.as_str(), "bench.invalid_config");
    }
}
