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

//! Per-document parse state shared by every level of the group matcher.

use crate::error::{EdiError, EdiResult};
use crate::limits::Limits;
use crate::schema::EdiSchema;

/// Raw segment cursor for one document.
///
/// A single `ParseContext` is threaded by `&mut` through the whole
/// recursive descent, so consumption inside a nested group is visible to its
/// ancestors without returning positions. The cursor never moves backwards.
#[derive(Debug)]
pub struct ParseContext<'a> {
    schema: &'a EdiSchema,
    segments: &'a [&'a str],
    limits: &'a Limits,
    position: usize,
    depth: usize,
}

impl<'a> ParseContext<'a> {
    pub fn new(schema: &'a EdiSchema, segments: &'a [&'a str], limits: &'a Limits) -> Self {
        Self {
            schema,
            segments,
            limits,
            position: 0,
            depth: 0,
        }
    }

    pub fn schema(&self) -> &'a EdiSchema {
        self.schema
    }

    pub fn limits(&self) -> &'a Limits {
        self.limits
    }

    /// Index of the next unconsumed raw segment.
    pub fn position(&self) -> usize {
        self.position
    }

    pub fn has_remaining(&self) -> bool {
        self.position < self.segments.len()
    }

    pub fn remaining(&self) -> usize {
        self.segments.len().saturating_sub(self.position)
    }

    /// The current raw segment, or `EndOfInput` when exhausted.
    pub fn peek(&self) -> EdiResult<&'a str> {
        self.segments
            .get(self.position)
            .copied()
            .ok_or_else(|| EdiError::end_of_input(self.position))
    }

    /// Consume the current raw segment.
    pub fn advance(&mut self) {
        if self.has_remaining() {
            self.position += 1;
        }
    }

    /// Current group nesting depth (0 at the root).
    pub fn depth(&self) -> usize {
        self.depth
    }

    pub(crate) fn enter_group(&mut self) -> EdiResult<()> {
        if self.depth >= self.limits.max_group_depth {
            return Err(EdiError::security(
                format!(
                    "group depth exceeds limit of {}",
                    self.limits.max_group_depth
                ),
                Some(self.position),
            ));
        }
        self.depth += 1;
        Ok(())
    }

    pub(crate) fn exit_group(&mut self) {
        self.depth = self.depth.saturating_sub(1);
    }
}
