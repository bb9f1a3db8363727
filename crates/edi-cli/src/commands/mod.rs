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

//! CLI command implementations

mod batch_commands;
mod completion;
mod convert;
mod inspect;
mod validate;

pub use batch_commands::batch_validate;
pub use completion::{generate_completion_for_command, print_installation_instructions};
pub use convert::to_json;
pub use inspect::inspect;
pub use validate::validate;

use crate::error::CliError;
use edi_core::EdiSchema;
use std::fs;
use std::io::{self, Write};
use std::path::Path;
use tracing::debug;

/// Default maximum file size to prevent OOM attacks (1 GB)
/// Can be overridden via EDI_MAX_FILE_SIZE environment variable
pub const DEFAULT_MAX_FILE_SIZE: u64 = 1024 * 1024 * 1024;

/// Maximum file size from `EDI_MAX_FILE_SIZE`, or [`DEFAULT_MAX_FILE_SIZE`]
/// when unset or unparsable.
fn get_max_file_size() -> u64 {
    std::env::var("EDI_MAX_FILE_SIZE")
        .ok()
        .and_then(|s| s.parse::<u64>().ok())
        .unwrap_or(DEFAULT_MAX_FILE_SIZE)
}

/// Read a file from disk with size validation.
///
/// The size is checked against the metadata before anything is read. The
/// raw bytes are returned; encoding is checked by the parser.
///
/// # Errors
///
/// Returns `Err` if:
/// - The file metadata cannot be accessed
/// - The file size exceeds the maximum allowed size (configurable via `EDI_MAX_FILE_SIZE`)
/// - The file cannot be read
///
/// # Examples
///
/// ```no_run
/// use edi_cli::commands::read_file;
///
/// # fn main() -> Result<(), edi_cli::error::CliError> {
/// let content = read_file("order.edi")?;
/// assert!(!content.is_empty());
/// # Ok(())
/// # }
/// ```
pub fn read_file(path: impl AsRef<Path>) -> Result<Vec<u8>, CliError> {
    let path = path.as_ref();
    let metadata = fs::metadata(path).map_err(|e| CliError::io_error(path, e))?;

    let max_file_size = get_max_file_size();
    if metadata.len() > max_file_size {
        return Err(CliError::file_too_large(path, metadata.len(), max_file_size));
    }

    fs::read(path).map_err(|e| CliError::io_error(path, e))
}

/// Write content to a file or stdout.
///
/// # Errors
///
/// Returns `Err` if writing the file or stdout fails.
pub fn write_output(content: &str, path: Option<&str>) -> Result<(), CliError> {
    match path {
        Some(p) => fs::write(p, content).map_err(|e| CliError::io_error(p, e)),
        None => io::stdout()
            .write_all(content.as_bytes())
            .map_err(|e| CliError::io_error("<stdout>", e)),
    }
}

/// Load a schema definition from a JSON or YAML file.
///
/// The format follows the extension: `.yaml`/`.yml` is YAML, anything else
/// is JSON.
///
/// # Errors
///
/// Returns `Err` if the file cannot be read or does not deserialize into an
/// [`EdiSchema`].
///
/// # Examples
///
/// ```no_run
/// use edi_cli::commands::load_schema;
///
/// # fn main() -> Result<(), edi_cli::error::CliError> {
/// let schema = load_schema("schemas/850.yaml")?;
/// println!("{} top-level units", schema.units.len());
/// # Ok(())
/// # }
/// ```
pub fn load_schema(path: impl AsRef<Path>) -> Result<EdiSchema, CliError> {
    let path = path.as_ref();
    let content = fs::read_to_string(path).map_err(|e| CliError::io_error(path, e))?;

    let is_yaml = matches!(
        path.extension().and_then(|ext| ext.to_str()),
        Some("yaml") | Some("yml")
    );

    let schema: EdiSchema = if is_yaml {
        serde_yaml::from_str(&content).map_err(|e| CliError::schema(path, e.to_string()))?
    } else {
        serde_json::from_str(&content).map_err(|e| CliError::schema(path, e.to_string()))?
    };

    debug!(
        path = %path.display(),
        schema = %schema.name,
        units = schema.units.len(),
        "loaded schema"
    );
    Ok(schema)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write as _;
    use tempfile::NamedTempFile;

    fn temp_with(suffix: &str, content: &str) -> NamedTempFile {
        let mut file = tempfile::Builder::new().suffix(suffix).tempfile().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_load_json_schema() {
        let file = temp_with(
            ".json",
            r#"{
                "name": "850",
                "units": [
                    { "type": "segment", "code": "ST", "tag": "st", "min_occurs": 1, "max_occurs": 1 },
                    { "type": "segment", "code": "SE", "tag": "se", "min_occurs": 1 }
                ]
            }"#,
        );
        let schema = load_schema(file.path()).unwrap();
        assert_eq!(schema.name, "850");
        assert_eq!(schema.units.len(), 2);
        assert_eq!(schema.field_delimiter, '*');
        assert_eq!(schema.segment_terminator, Some('~'));
    }

    #[test]
    fn test_load_yaml_schema() {
        let file = temp_with(
            ".yaml",
            "name: ORDERS\n\
             field_delimiter: '+'\n\
             segment_terminator: \"'\"\n\
             ignorable_codes: [UNA, UNB, UNZ]\n\
             units:\n\
             \x20 - { type: segment, code: UNH, tag: unh, min_occurs: 1, max_occurs: 1 }\n\
             \x20 - type: group\n\
             \x20   tag: lin_loop\n\
             \x20   min_occurs: 1\n\
             \x20   max_occurs: -1\n\
             \x20   children:\n\
             \x20     - { type: segment, code: LIN, tag: lin, min_occurs: 1 }\n",
        );
        let schema = load_schema(file.path()).unwrap();
        assert_eq!(schema.field_delimiter, '+');
        assert_eq!(schema.segment_terminator, Some('\''));
        assert!(schema.is_ignorable("UNB"));
        assert_eq!(schema.units[1].tag(), "lin_loop");
        assert!(schema.units[1].is_repeatable());
    }

    #[test]
    fn test_load_schema_rejects_bad_max_occurs() {
        let file = temp_with(
            ".json",
            r#"{ "name": "x", "units": [
                { "type": "segment", "code": "ST", "tag": "st", "min_occurs": 1, "max_occurs": 0 }
            ] }"#,
        );
        let err = load_schema(file.path()).unwrap_err();
        assert!(matches!(err, CliError::Schema { .. }));
        assert!(err.to_string().contains("max_occurs"));
    }

    #[test]
    fn test_read_file_missing() {
        let err = read_file("/definitely/not/here.edi").unwrap_err();
        assert!(matches!(err, CliError::Io { .. }));
    }

    #[test]
    fn test_read_file_returns_bytes() {
        let file = temp_with(".edi", "ST*850*0001~SE*2*0001~");
        let bytes = read_file(file.path()).unwrap();
        assert_eq!(bytes, b"ST*850*0001~SE*2*0001~");
    }
}
