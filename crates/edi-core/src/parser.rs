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

//! Parsing entry points for EDI documents.
//!
//! # Phases
//!
//! 1. Split the input into raw segments ([`split_segments`]).
//! 2. Match the segments against the schema's top-level units
//!    ([`read_group`] with `is_root = true`).
//! 3. Account for whatever the root level left unconsumed: trailing
//!    ignorable segments are skipped, anything else is unmatched.
//!
//! # Security Limits
//!
//! - `max_input_size`: Maximum input size (default: 1GB)
//! - `max_segments`: Maximum number of raw segments (default: 10M)
//! - `max_segment_length`: Maximum bytes per segment (default: 64KB)
//! - `max_group_depth`: Maximum nested group depth (default: 64)
//! - `max_fields`: Maximum data elements per segment (default: 512)
//!
//! # Concurrency
//!
//! Every call builds its own [`ParseContext`]; nothing is shared between
//! documents, so separate documents can be parsed on separate threads.

use crate::context::ParseContext;
use crate::error::{EdiError, EdiResult};
use crate::limits::Limits;
use crate::matcher::read_group;
use crate::preprocess::split_segments;
use crate::result::GroupResult;
use crate::schema::EdiSchema;
use crate::segment::{segment_code, PlainSegmentReader, SegmentReader};
use tracing::debug;

/// Parsing options for configuring EDI document parsing behavior.
///
/// ```text
/// use edi_core::ParseOptions;
///
/// let opts = ParseOptions::builder()
///     .max_group_depth(16)
///     .max_segments(100_000)
///     .build();
/// ```
#[derive(Debug, Clone, Default)]
pub struct ParseOptions {
    /// Security limits.
    pub limits: Limits,
}

impl ParseOptions {
    /// Create a new builder for ParseOptions.
    pub fn builder() -> ParseOptionsBuilder {
        ParseOptionsBuilder::new()
    }
}

/// Builder for ergonomic construction of ParseOptions.
#[derive(Debug, Clone, Default)]
pub struct ParseOptionsBuilder {
    limits: Limits,
}

impl ParseOptionsBuilder {
    /// Create a new builder with default options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the maximum input size in bytes.
    pub fn max_input_size(mut self, size: usize) -> Self {
        self.limits.max_input_size = size;
        self
    }

    /// Set the maximum number of raw segments.
    pub fn max_segments(mut self, count: usize) -> Self {
        self.limits.max_segments = count;
        self
    }

    /// Set the maximum length of a single raw segment in bytes.
    pub fn max_segment_length(mut self, length: usize) -> Self {
        self.limits.max_segment_length = length;
        self
    }

    /// Set the maximum nested group depth.
    pub fn max_group_depth(mut self, depth: usize) -> Self {
        self.limits.max_group_depth = depth;
        self
    }

    /// Set the maximum data elements per segment.
    pub fn max_fields(mut self, count: usize) -> Self {
        self.limits.max_fields = count;
        self
    }

    /// Replace all limits at once.
    pub fn limits(mut self, limits: Limits) -> Self {
        self.limits = limits;
        self
    }

    pub fn build(self) -> ParseOptions {
        ParseOptions {
            limits: self.limits,
        }
    }
}

/// Parse an EDI document with default options.
pub fn parse(input: &[u8], schema: &EdiSchema) -> EdiResult<GroupResult> {
    parse_with_options(input, schema, ParseOptions::default())
}

/// Parse an EDI document with custom options and the plain segment reader.
pub fn parse_with_options(
    input: &[u8],
    schema: &EdiSchema,
    options: ParseOptions,
) -> EdiResult<GroupResult> {
    let reader = PlainSegmentReader::with_limits(&options.limits);
    parse_with_reader(input, schema, &options, &reader)
}

/// Parse an EDI document with a caller-supplied segment reader.
pub fn parse_with_reader(
    input: &[u8],
    schema: &EdiSchema,
    options: &ParseOptions,
    reader: &dyn SegmentReader,
) -> EdiResult<GroupResult> {
    let raw = split_segments(input, schema, &options.limits)?;
    let segments = raw.segments();
    parse_segments(&segments, schema, options, reader)
}

/// Match already-split raw segments against `schema`.
pub fn parse_segments(
    segments: &[&str],
    schema: &EdiSchema,
    options: &ParseOptions,
    reader: &dyn SegmentReader,
) -> EdiResult<GroupResult> {
    if segments.len() > options.limits.max_segments {
        return Err(EdiError::security(
            format!(
                "too many segments: exceeds limit of {}",
                options.limits.max_segments
            ),
            Some(options.limits.max_segments),
        ));
    }

    let mut ctx = ParseContext::new(schema, segments, &options.limits);
    let result = read_group(&schema.units, &mut ctx, true, reader)?;
    finish(&mut ctx)?;

    debug!(
        schema = %schema.name,
        segments = segments.len(),
        tags = result.len(),
        "parsed document"
    );
    Ok(result)
}

/// The root level stops once its last entry is satisfied; every segment it
/// left behind must be ignorable.
fn finish(ctx: &mut ParseContext<'_>) -> EdiResult<()> {
    let delimiter = ctx.schema().field_delimiter;
    while ctx.has_remaining() {
        let position = ctx.position();
        let raw = ctx.peek()?;
        let code = segment_code(raw, delimiter);
        if !ctx.schema().is_ignorable(code) {
            return Err(EdiError::unmatched_segment(
                format!("segment `{}` follows the end of the schema", code),
                position,
            )
            .with_segment(raw));
        }
        ctx.advance();
    }
    Ok(())
}
