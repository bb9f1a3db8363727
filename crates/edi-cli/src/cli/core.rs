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

//! Core commands: validation and inspection of a single document.

use crate::commands;
use crate::error::CliError;
use clap::Subcommand;

#[derive(Subcommand)]
pub enum CoreCommands {
    /// Validate an EDI document against a schema
    ///
    /// Matches every segment against the schema's segment and group
    /// definitions, enforcing occurrence limits at every level.
    Validate {
        /// Input document path
        #[arg(value_name = "FILE")]
        file: String,

        /// Schema file (.json, .yaml or .yml)
        #[arg(short, long, value_name = "SCHEMA")]
        schema: String,
    },

    /// Print the matched segment tree
    ///
    /// Displays the group tree produced by matching the document, useful
    /// for checking how a schema carves up an interchange.
    Inspect {
        /// Input document path
        #[arg(value_name = "FILE")]
        file: String,

        /// Schema file (.json, .yaml or .yml)
        #[arg(short, long, value_name = "SCHEMA")]
        schema: String,

        /// Show every segment with its data elements
        #[arg(short, long)]
        verbose: bool,
    },
}

impl CoreCommands {
    pub fn execute(self) -> Result<(), CliError> {
        match self {
            CoreCommands::Validate { file, schema } => commands::validate(&file, &schema),
            CoreCommands::Inspect {
                file,
                schema,
                verbose,
            } => commands::inspect(&file, &schema, verbose),
        }
    }
}
