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

//! Structured error types for the EDI CLI.
//!
//! All CLI operations return `Result<T, CliError>`. Core parse errors are
//! flattened to strings here so the type stays `Clone` for the parallel
//! batch path.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// The main error type for EDI CLI operations.
///
/// # Examples
///
/// ```rust,no_run
/// use edi_cli::error::CliError;
///
/// fn read(path: &str) -> Result<String, CliError> {
///     std::fs::read_to_string(path).map_err(|e| CliError::io_error(path, e))
/// }
/// ```
#[derive(Error, Debug, Clone)]
pub enum CliError {
    /// I/O operation failed (file read, write, or metadata access).
    #[error("I/O error for '{path}': {message}")]
    Io {
        /// The file path that caused the error
        path: PathBuf,
        /// The error message
        message: String,
    },

    /// File size exceeds the configured maximum (`EDI_MAX_FILE_SIZE`).
    #[error("File '{path}' is too large ({actual} bytes). Maximum allowed: {max} bytes ({max_mb} MB)")]
    FileTooLarge {
        path: PathBuf,
        actual: u64,
        max: u64,
        max_mb: u64,
    },

    /// The document did not match its schema.
    #[error("Parse error: {0}")]
    Parse(String),

    /// The schema file could not be loaded.
    #[error("Schema error in '{path}': {message}")]
    Schema {
        /// The schema file path
        path: PathBuf,
        /// The deserializer's message
        message: String,
    },

    /// JSON serialization error.
    #[error("JSON format error: {message}")]
    JsonFormat {
        /// The error message
        message: String,
    },

    /// One or more documents in a batch failed.
    #[error("{failed} of {total} files failed validation")]
    BatchFailed {
        /// Number of failed documents
        failed: usize,
        /// Number of documents processed
        total: usize,
    },

    /// Invalid input provided by the user.
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

impl CliError {
    /// Create an I/O error with file path context.
    pub fn io_error(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::Io {
            path: path.into(),
            message: source.to_string(),
        }
    }

    /// Create a file-too-large error.
    pub fn file_too_large(path: impl Into<PathBuf>, actual: u64, max: u64) -> Self {
        Self::FileTooLarge {
            path: path.into(),
            actual,
            max,
            max_mb: max / (1024 * 1024),
        }
    }

    /// Create a parse error.
    pub fn parse(msg: impl Into<String>) -> Self {
        Self::Parse(msg.into())
    }

    /// Create a schema loading error.
    pub fn schema(path: impl Into<PathBuf>, msg: impl Into<String>) -> Self {
        Self::Schema {
            path: path.into(),
            message: msg.into(),
        }
    }

    /// Create an invalid input error.
    pub fn invalid_input(msg: impl Into<String>) -> Self {
        Self::InvalidInput(msg.into())
    }
}

impl From<edi_core::EdiError> for CliError {
    fn from(source: edi_core::EdiError) -> Self {
        let mut message = source.to_string();
        if let Some(context) = &source.context {
            message.push_str(&format!(" ({})", context));
        }
        if let Some(segment) = &source.segment {
            message.push_str(&format!(" near `{}`", segment));
        }
        Self::Parse(message)
    }
}

// Automatic conversion from serde_json::Error
impl From<serde_json::Error> for CliError {
    fn from(source: serde_json::Error) -> Self {
        Self::JsonFormat {
            message: source.to_string(),
        }
    }
}
