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

//! Validate command - check an EDI document against its schema

use super::{load_schema, read_file};
use crate::error::CliError;
use colored::Colorize;
use edi_core::{parse, traverse, StatsCollector};

/// Validate an EDI document against a schema.
///
/// # Errors
///
/// Returns `Err` if:
/// - The document or schema cannot be read
/// - The schema is not valid JSON/YAML
/// - The document does not match the schema
///
/// # Examples
///
/// ```no_run
/// use edi_cli::commands::validate;
///
/// # fn main() -> Result<(), edi_cli::error::CliError> {
/// validate("order.edi", "schemas/850.json")?;
/// # Ok(())
/// # }
/// ```
///
/// # Output
///
/// Prints a summary to stdout including:
/// - File validation status (✓ or ✗)
/// - Schema name
/// - Count of matched segments and group instances
/// - Number of top-level tags
pub fn validate(file: &str, schema_path: &str) -> Result<(), CliError> {
    let schema = load_schema(schema_path)?;
    let content = read_file(file)?;

    match parse(&content, &schema) {
        Ok(result) => {
            let mut stats = StatsCollector::default();
            let _ = traverse(&result, &mut stats);

            println!("{} {}", "✓".green().bold(), file);
            println!("  Schema: {}", schema.name);
            println!("  Segments: {}", stats.segment_count);
            println!("  Groups: {}", stats.group_count);
            println!("  Top-level tags: {}", result.len());
            Ok(())
        }
        Err(e) => {
            println!("{} {}", "✗".red().bold(), file);
            Err(e.into())
        }
    }
}
