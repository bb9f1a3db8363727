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

//! Batch command implementations - validate many EDI documents at once

use super::load_schema;
use crate::batch::{BatchConfig, BatchProcessor, ValidationOperation};
use crate::error::CliError;
use colored::Colorize;
use std::path::PathBuf;
use std::sync::Arc;

/// Batch validate multiple EDI documents against one schema.
///
/// The schema is loaded once and shared by every worker. Each document is
/// parsed independently, so one failure never affects another.
///
/// # Arguments
///
/// * `files` - Document paths to validate
/// * `schema_path` - Path to the JSON/YAML schema
/// * `parallel` - If `true`, processes files on the Rayon pool
/// * `verbose` - If `true`, shows per-file progress
///
/// # Errors
///
/// Returns `Err` if the schema cannot be loaded, or
/// [`CliError::BatchFailed`] when any document fails.
///
/// # Examples
///
/// ```no_run
/// use edi_cli::commands::batch_validate;
///
/// # fn main() -> Result<(), edi_cli::error::CliError> {
/// let files = vec!["a.edi".to_string(), "b.edi".to_string()];
/// batch_validate(files, "schemas/850.json", true, false)?;
/// # Ok(())
/// # }
/// ```
pub fn batch_validate(
    files: Vec<String>,
    schema_path: &str,
    parallel: bool,
    verbose: bool,
) -> Result<(), CliError> {
    let schema = Arc::new(load_schema(schema_path)?);
    let paths: Vec<PathBuf> = files.iter().map(PathBuf::from).collect();

    let config = BatchConfig {
        parallel_threshold: if parallel { 1 } else { usize::MAX },
        verbose,
        ..Default::default()
    };

    let processor = BatchProcessor::new(config);
    let results = processor.process(&paths, ValidationOperation::new(schema), true)?;

    if results.has_failures() {
        eprintln!();
        eprintln!("{}", "Validation failures:".red().bold());
        for failure in results.failures() {
            eprintln!("  {} {}", "✗".red(), failure.path.display());
            if let Err(e) = &failure.result {
                eprintln!("    {}", e.to_string().dimmed());
            }
        }
        return Err(CliError::BatchFailed {
            failed: results.failure_count(),
            total: results.total_files(),
        });
    }

    Ok(())
}
