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

//! Batch processing commands.

use crate::commands;
use crate::error::CliError;
use clap::Subcommand;

/// Batch processing commands.
///
/// Documents in a batch share one schema but are matched independently;
/// `--parallel` spreads them over all cores.
#[derive(Subcommand)]
pub enum BatchCommands {
    /// Validate many EDI documents against one schema
    ///
    /// Prints a summary and lists every failing document with its error.
    BatchValidate {
        /// Input document paths
        #[arg(value_name = "FILES", num_args = 1.., required = true)]
        files: Vec<String>,

        /// Schema file (.json, .yaml or .yml)
        #[arg(short, long, value_name = "SCHEMA")]
        schema: String,

        /// Force parallel processing
        #[arg(short, long)]
        parallel: bool,

        /// Show verbose progress
        #[arg(short, long)]
        verbose: bool,
    },
}

impl BatchCommands {
    pub fn execute(self) -> Result<(), CliError> {
        match self {
            BatchCommands::BatchValidate {
                files,
                schema,
                parallel,
                verbose,
            } => commands::batch_validate(files, &schema, parallel, verbose),
        }
    }
}
