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

//! EDI CLI library for command-line parsing and execution.
//!
//! Every command takes a document plus a schema file (JSON or YAML) and
//! runs it through [`edi_core`].
//!
//! # Commands
//!
//! - **validate**: match a document against its schema
//! - **inspect**: print the matched group tree
//! - **to-json**: serialize the matched tree as JSON
//! - **batch-validate**: validate many documents, optionally in parallel
//! - **completion**: generate shell completion scripts
//!
//! # Examples
//!
//! ```no_run
//! use edi_cli::commands::{to_json, validate};
//!
//! # fn main() -> Result<(), edi_cli::error::CliError> {
//! validate("order.edi", "schemas/850.yaml")?;
//! to_json("order.edi", "schemas/850.yaml", Some("order.json"), true)?;
//! # Ok(())
//! # }
//! ```
//!
//! # Security
//!
//! Input files larger than 1 GB are rejected before they are read; set
//! `EDI_MAX_FILE_SIZE` (in bytes) to change the limit. The parser applies
//! its own [`edi_core::Limits`] on top.

pub mod batch;
pub mod cli;
pub mod commands;
pub mod error;
