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

//! Inspect command - matched segment tree visualization

use super::{load_schema, read_file};
use crate::error::CliError;
use colored::Colorize;
use edi_core::{parse, GroupResult, Segment, Slot};

/// Inspect and visualize the matched structure of an EDI document.
///
/// Parses the document against the schema and prints the resulting group
/// tree with color highlighting. Useful for checking how a schema carves up
/// an interchange.
///
/// # Arguments
///
/// * `file` - Path to the EDI document
/// * `schema_path` - Path to the JSON/YAML schema
/// * `verbose` - If `true`, prints every segment with its data elements
///
/// # Errors
///
/// Returns `Err` if:
/// - The document or schema cannot be read
/// - The document does not match the schema
///
/// # Examples
///
/// ```no_run
/// use edi_cli::commands::inspect;
///
/// # fn main() -> Result<(), edi_cli::error::CliError> {
/// inspect("order.edi", "schemas/850.json", true)?;
/// # Ok(())
/// # }
/// ```
pub fn inspect(file: &str, schema_path: &str, verbose: bool) -> Result<(), CliError> {
    let schema = load_schema(schema_path)?;
    let content = read_file(file)?;
    let result = parse(&content, &schema)?;

    println!("{}", "EDI Document".bold().underline());
    println!();
    println!("{}  {}", "Schema:".cyan(), schema.name);
    if !schema.ignorable_codes.is_empty() {
        let ignored: Vec<&str> = schema.ignorable_codes.iter().map(String::as_str).collect();
        println!("{}  {}", "Ignored:".cyan(), ignored.join(", "));
    }

    println!();
    println!("{}", "Root:".cyan());
    print_group(&result, 1, verbose);

    Ok(())
}

fn print_group(group: &GroupResult, indent: usize, verbose: bool) {
    let prefix = "  ".repeat(indent);

    for (tag, slot) in group.iter() {
        match slot {
            Slot::One(segment) => {
                println!("{}{}: {}", prefix, tag.yellow(), segment.code.green());
                if verbose {
                    print_elements(segment, &prefix);
                }
            }
            Slot::Many(segments) => {
                println!(
                    "{}{}: {} ({} occurrences)",
                    prefix,
                    tag.yellow(),
                    segments.first().map(|s| s.code.as_str()).unwrap_or_default().green(),
                    segments.len()
                );
                if verbose {
                    for (i, segment) in segments.iter().enumerate() {
                        println!("{}  [{}] at segment {}", prefix, i, segment.position);
                        print_elements(segment, &format!("{}  ", prefix));
                    }
                }
            }
            Slot::OneGroup(nested) => {
                println!("{}{}:", prefix, tag.yellow());
                print_group(nested, indent + 1, verbose);
            }
            Slot::ManyGroup(instances) => {
                println!("{}{}: ({} instances)", prefix, tag.yellow(), instances.len());
                for (i, instance) in instances.iter().enumerate() {
                    println!("{}  [{}]", prefix, i);
                    print_group(instance, indent + 2, verbose);
                }
            }
        }
    }
}

fn print_elements(segment: &Segment, prefix: &str) {
    for (i, value) in segment.fields.iter().enumerate() {
        if value.is_empty() {
            continue;
        }
        println!("{}    {}{:02}: {}", prefix, segment.code, i + 1, value);
    }
}
