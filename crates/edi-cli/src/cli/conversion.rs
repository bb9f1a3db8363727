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

//! Format conversion commands.

use crate::commands;
use crate::error::CliError;
use clap::Subcommand;

/// Conversion commands.
///
/// The matched group tree is the source of every conversion; documents
/// that do not match their schema are never converted.
#[derive(Subcommand)]
pub enum ConversionCommands {
    /// Convert an EDI document to JSON
    ToJson {
        /// Input document path
        #[arg(value_name = "FILE")]
        file: String,

        /// Schema file (.json, .yaml or .yml)
        #[arg(short, long, value_name = "SCHEMA")]
        schema: String,

        /// Output file path (defaults to stdout)
        #[arg(short, long)]
        output: Option<String>,

        /// Pretty-print JSON
        #[arg(short, long)]
        pretty: bool,
    },
}

impl ConversionCommands {
    pub fn execute(self) -> Result<(), CliError> {
        match self {
            ConversionCommands::ToJson {
                file,
                schema,
                output,
                pretty,
            } => commands::to_json(&file, &schema, output.as_deref(), pretty),
        }
    }
}
