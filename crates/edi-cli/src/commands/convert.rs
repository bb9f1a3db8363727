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

//! Conversion command - EDI to JSON

use super::{load_schema, read_file, write_output};
use crate::error::CliError;
use edi_core::parse;

/// Convert an EDI document to JSON.
///
/// The matched group tree is serialized as nested objects keyed by tag.
/// Singular units become a segment object (or a nested group object);
/// repeatable units become arrays. Each segment carries its `code`, its
/// data elements as `fields` and its raw-segment `position`.
///
/// # Arguments
///
/// * `file` - Path to the EDI document
/// * `schema_path` - Path to the JSON/YAML schema
/// * `output` - Optional output file path. If `None`, writes to stdout
/// * `pretty` - If `true`, pretty-prints the JSON with indentation
///
/// # Errors
///
/// Returns `Err` if:
/// - The document or schema cannot be read
/// - The document does not match the schema
/// - Output writing fails
///
/// # Examples
///
/// ```no_run
/// use edi_cli::commands::to_json;
///
/// # fn main() -> Result<(), edi_cli::error::CliError> {
/// // Compact JSON on stdout
/// to_json("order.edi", "schemas/850.json", None, false)?;
///
/// // Pretty JSON to a file
/// to_json("order.edi", "schemas/850.json", Some("order.json"), true)?;
/// # Ok(())
/// # }
/// ```
pub fn to_json(
    file: &str,
    schema_path: &str,
    output: Option<&str>,
    pretty: bool,
) -> Result<(), CliError> {
    let schema = load_schema(schema_path)?;
    let content = read_file(file)?;
    let result = parse(&content, &schema)?;

    let mut output_str = if pretty {
        serde_json::to_string_pretty(&result)?
    } else {
        serde_json::to_string(&result)?
    };
    output_str.push('\n');

    write_output(&output_str, output)
}
