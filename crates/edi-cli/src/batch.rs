// Dweve EDI - Schema-driven EDI segment tree parser
//
// Copyright (c) 2025 Dweve IP B.V. and individual contributors.
//
// SPDX-License-Identifier: Apache-2.0
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License in the LICENSE file at the
// root of this repository or at: http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Batch processing for many EDI documents with parallel execution and
//! progress reporting.
//!
//! Every document gets its own parse context, so documents are matched
//! independently against one shared, read-only schema. Rayon's work-stealing
//! pool runs larger batches in parallel; small batches stay serial.
//!
//! # Examples
//!
//! ```rust,no_run
//! use edi_cli::batch::{BatchConfig, BatchProcessor, ValidationOperation};
//! use edi_cli::commands::load_schema;
//! use std::path::PathBuf;
//! use std::sync::Arc;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let schema = Arc::new(load_schema("schemas/850.json")?);
//! let processor = BatchProcessor::new(BatchConfig::default());
//!
//! let files = vec![PathBuf::from("a.edi"), PathBuf::from("b.edi")];
//! let results = processor.process(&files, ValidationOperation::new(schema), true)?;
//!
//! println!(
//!     "{} succeeded, {} failed",
//!     results.success_count(),
//!     results.failure_count()
//! );
//! # Ok(())
//! # }
//! ```

use crate::commands::read_file;
use crate::error::CliError;
use colored::Colorize;
use edi_core::{parse, traverse, EdiSchema, StatsCollector};
use rayon::prelude::*;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Instant;
use tracing::debug;

/// Configuration for batch processing operations.
#[derive(Debug, Clone)]
pub struct BatchConfig {
    /// Minimum number of files to trigger parallel processing.
    /// Default: 10
    pub parallel_threshold: usize,

    /// Maximum number of threads to use for parallel processing.
    /// None means Rayon's default (number of CPU cores).
    pub max_threads: Option<usize>,

    /// Number of files between progress updates. 0 disables progress lines.
    /// Default: 1
    pub progress_interval: usize,

    /// Show file names and per-file status.
    pub verbose: bool,
}

impl Default for BatchConfig {
    fn default() -> Self {
        Self {
            parallel_threshold: 10,
            max_threads: None,
            progress_interval: 1,
            verbose: false,
        }
    }
}

/// Result of processing a single file in a batch operation.
#[derive(Debug, Clone)]
pub struct FileResult<T> {
    /// The file path that was processed
    pub path: PathBuf,
    /// The result of processing (Ok or Err)
    pub result: Result<T, CliError>,
}

impl<T> FileResult<T> {
    pub fn success(path: PathBuf, value: T) -> Self {
        Self {
            path,
            result: Ok(value),
        }
    }

    pub fn failure(path: PathBuf, error: CliError) -> Self {
        Self {
            path,
            result: Err(error),
        }
    }

    pub fn is_success(&self) -> bool {
        self.result.is_ok()
    }

    pub fn is_failure(&self) -> bool {
        self.result.is_err()
    }
}

/// Aggregated results from a batch run, in input order.
#[derive(Debug, Clone)]
pub struct BatchResults<T> {
    /// Individual results for each processed file
    pub results: Vec<FileResult<T>>,
    /// Total processing time in milliseconds
    pub elapsed_ms: u128,
}

impl<T> BatchResults<T> {
    pub fn new(results: Vec<FileResult<T>>, elapsed_ms: u128) -> Self {
        Self { results, elapsed_ms }
    }

    pub fn total_files(&self) -> usize {
        self.results.len()
    }

    pub fn success_count(&self) -> usize {
        self.results.iter().filter(|r| r.is_success()).count()
    }

    pub fn failure_count(&self) -> usize {
        self.results.iter().filter(|r| r.is_failure()).count()
    }

    pub fn all_succeeded(&self) -> bool {
        self.results.iter().all(|r| r.is_success())
    }

    pub fn has_failures(&self) -> bool {
        self.results.iter().any(|r| r.is_failure())
    }

    pub fn successes(&self) -> impl Iterator<Item = &FileResult<T>> {
        self.results.iter().filter(|r| r.is_success())
    }

    pub fn failures(&self) -> impl Iterator<Item = &FileResult<T>> {
        self.results.iter().filter(|r| r.is_failure())
    }

    /// Processing throughput in files per second.
    pub fn throughput(&self) -> f64 {
        if self.elapsed_ms == 0 {
            0.0
        } else {
            (self.total_files() as f64) / (self.elapsed_ms as f64 / 1000.0)
        }
    }
}

/// An operation applied to each file of a batch.
///
/// Operations must be `Send + Sync`: the parallel path shares one instance
/// across the Rayon pool.
pub trait BatchOperation: Send + Sync {
    /// The output type for successful processing
    type Output: Send;

    /// Process a single file.
    fn process_file(&self, path: &Path) -> Result<Self::Output, CliError>;

    /// Name used in progress output and the summary banner.
    fn name(&self) -> &str;
}

/// Lock-free progress counters shared by the worker threads.
#[derive(Debug)]
struct ProgressTracker {
    total: usize,
    processed: AtomicUsize,
    succeeded: AtomicUsize,
    failed: AtomicUsize,
    interval: usize,
    verbose: bool,
    start_time: Instant,
}

impl ProgressTracker {
    fn new(total: usize, interval: usize, verbose: bool) -> Self {
        Self {
            total,
            processed: AtomicUsize::new(0),
            succeeded: AtomicUsize::new(0),
            failed: AtomicUsize::new(0),
            interval,
            verbose,
            start_time: Instant::now(),
        }
    }

    fn record_success(&self, path: &Path) {
        let processed = self.processed.fetch_add(1, Ordering::Relaxed) + 1;
        self.succeeded.fetch_add(1, Ordering::Relaxed);

        if self.should_report(processed) {
            self.report_progress(path, true);
        }
    }

    fn record_failure(&self, path: &Path, error: &CliError) {
        let processed = self.processed.fetch_add(1, Ordering::Relaxed) + 1;
        self.failed.fetch_add(1, Ordering::Relaxed);

        if self.verbose {
            eprintln!("{} {} - {}", "✗".red().bold(), path.display(), error);
        }

        if self.should_report(processed) {
            self.report_progress(path, false);
        }
    }

    fn should_report(&self, processed: usize) -> bool {
        self.interval > 0 && (processed % self.interval == 0 || processed == self.total)
    }

    fn report_progress(&self, current_file: &Path, success: bool) {
        let processed = self.processed.load(Ordering::Relaxed);
        let succeeded = self.succeeded.load(Ordering::Relaxed);
        let failed = self.failed.load(Ordering::Relaxed);
        let rate = processed as f64 / self.start_time.elapsed().as_secs_f64();

        if self.verbose {
            let status = if success {
                "✓".green().bold()
            } else {
                "✗".red().bold()
            };
            eprintln!(
                "{} [{}/{}] {} ({:.1} files/s)",
                status,
                processed,
                self.total,
                current_file.display(),
                rate
            );
        } else {
            eprintln!(
                "Progress: [{}/{}] {} succeeded, {} failed ({:.1} files/s)",
                processed, self.total, succeeded, failed, rate
            );
        }
    }

    fn print_summary(&self, operation_name: &str) {
        let processed = self.processed.load(Ordering::Relaxed);
        let succeeded = self.succeeded.load(Ordering::Relaxed);
        let failed = self.failed.load(Ordering::Relaxed);
        let elapsed = self.start_time.elapsed();

        println!();
        println!("{}", "═".repeat(60).bright_blue());
        println!(
            "{} {}",
            "Batch Operation:".bright_blue().bold(),
            operation_name.bright_white()
        );
        println!("{}", "═".repeat(60).bright_blue());
        println!(
            "  {} {}",
            "Total files:".bright_cyan(),
            processed.to_string().bright_white()
        );
        println!(
            "  {} {}",
            "Succeeded:".green().bold(),
            succeeded.to_string().bright_white()
        );
        println!(
            "  {} {}",
            "Failed:".red().bold(),
            failed.to_string().bright_white()
        );
        println!("  {} {:.2}s", "Elapsed:".bright_cyan(), elapsed.as_secs_f64());
        println!("{}", "═".repeat(60).bright_blue());
    }
}

/// Runs a [`BatchOperation`] over a set of files, serially or on the Rayon
/// pool depending on [`BatchConfig::parallel_threshold`].
#[derive(Debug, Clone)]
pub struct BatchProcessor {
    config: BatchConfig,
}

impl BatchProcessor {
    pub fn new(config: BatchConfig) -> Self {
        Self { config }
    }

    pub fn default_config() -> Self {
        Self::new(BatchConfig::default())
    }

    /// Process every file and collect all results, successes and failures
    /// alike, in input order.
    ///
    /// # Errors
    ///
    /// Only catastrophic failures are returned as `Err`; per-file errors are
    /// recorded in the [`BatchResults`].
    pub fn process<O>(
        &self,
        files: &[PathBuf],
        operation: O,
        show_progress: bool,
    ) -> Result<BatchResults<O::Output>, CliError>
    where
        O: BatchOperation,
    {
        let start_time = Instant::now();

        if files.is_empty() {
            return Ok(BatchResults::new(vec![], 0));
        }

        if let Some(max_threads) = self.config.max_threads {
            // Fails harmlessly when the global pool already exists.
            rayon::ThreadPoolBuilder::new()
                .num_threads(max_threads)
                .build_global()
                .ok();
        }

        let parallel = files.len() >= self.config.parallel_threshold;
        debug!(
            operation = operation.name(),
            files = files.len(),
            parallel,
            "starting batch"
        );

        let tracker = show_progress.then(|| {
            ProgressTracker::new(files.len(), self.config.progress_interval, self.config.verbose)
        });

        let run = |path: &PathBuf| {
            let result = operation.process_file(path);
            if let Some(t) = &tracker {
                match &result {
                    Ok(_) => t.record_success(path),
                    Err(e) => t.record_failure(path, e),
                }
            }
            FileResult {
                path: path.clone(),
                result,
            }
        };

        let results: Vec<FileResult<O::Output>> = if parallel {
            files.par_iter().map(run).collect()
        } else {
            files.iter().map(run).collect()
        };

        if let Some(tracker) = &tracker {
            tracker.print_summary(operation.name());
        }

        Ok(BatchResults::new(results, start_time.elapsed().as_millis()))
    }
}

// ============================================================================
// Standard Operations
// ============================================================================

/// Batch validation: parse each document against one shared schema.
///
/// The output is the number of matched segments in the document.
#[derive(Debug, Clone)]
pub struct ValidationOperation {
    schema: Arc<EdiSchema>,
}

impl ValidationOperation {
    pub fn new(schema: Arc<EdiSchema>) -> Self {
        Self { schema }
    }
}

impl BatchOperation for ValidationOperation {
    type Output = usize;

    fn process_file(&self, path: &Path) -> Result<Self::Output, CliError> {
        let content = read_file(path)?;
        let result = parse(&content, &self.schema)?;

        let mut stats = StatsCollector::default();
        let _ = traverse(&result, &mut stats);
        Ok(stats.segment_count)
    }

    fn name(&self) -> &str {
        "validate"
    }
}
