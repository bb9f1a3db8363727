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

//! CLI command definitions and argument parsing.
//!
//! Commands are grouped by category, each in its own module, and flattened
//! into one top-level [`Commands`] enum:
//!
//! - [`core`]: validate, inspect
//! - [`conversion`]: to-json
//! - [`batch`]: batch-validate
//! - [`utility`]: completion

mod batch;
mod conversion;
mod core;
mod utility;

use crate::error::CliError;
use clap::{Parser, Subcommand};

pub use batch::BatchCommands;
pub use conversion::ConversionCommands;
pub use core::CoreCommands;
pub use utility::UtilityCommands;

/// EDI - schema-driven EDI segment tree parser
///
/// Validates, inspects and converts X12/EDIFACT-style interchanges against a
/// JSON or YAML schema of segments and segment groups.
///
/// # Examples
///
/// ```bash
/// # Validate a purchase order
/// edi validate order.edi --schema 850.json
///
/// # Show the matched group tree
/// edi inspect order.edi --schema 850.json --verbose
///
/// # Convert to JSON
/// edi to-json order.edi --schema 850.json --pretty
///
/// # Validate a directory of documents in parallel
/// edi batch-validate inbox/*.edi --schema 850.json --parallel
/// ```
#[derive(Parser)]
#[command(name = "edi")]
#[command(author, version, about = "EDI - schema-driven EDI segment tree parser", long_about = None)]
pub struct Cli {
    /// Log matcher decisions to stderr (same as RUST_LOG=edi_core=trace)
    #[arg(long, global = true)]
    pub trace: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Top-level CLI commands.
///
/// ```text
/// Commands
/// ├── Core (validate, inspect)
/// ├── Conversion (to-json)
/// ├── Batch (batch-validate)
/// └── Utility (completion)
/// ```
#[derive(Subcommand)]
pub enum Commands {
    #[command(flatten)]
    Core(CoreCommands),

    #[command(flatten)]
    Conversion(ConversionCommands),

    #[command(flatten)]
    Batch(BatchCommands),

    #[command(flatten)]
    Utility(UtilityCommands),
}

impl Commands {
    /// Execute the command.
    ///
    /// # Errors
    ///
    /// Returns `Err` if:
    /// - File I/O fails
    /// - The schema cannot be loaded
    /// - A document does not match its schema
    pub fn execute(self) -> Result<(), CliError> {
        match self {
            Commands::Core(cmd) => cmd.execute(),
            Commands::Conversion(cmd) => cmd.execute(),
            Commands::Batch(cmd) => cmd.execute(),
            Commands::Utility(cmd) => cmd.execute(),
        }
    }
}
