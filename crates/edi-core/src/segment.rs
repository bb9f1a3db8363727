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

//! Leaf segments and the field-level reader seam.
//!
//! The group matcher decides *where* a raw segment belongs; turning its
//! fields into a [`Segment`] is delegated to a [`SegmentReader`]. Callers
//! that need typed elements, code-list checks or data-type validation plug
//! in their own reader. [`PlainSegmentReader`] keeps the elements as text.

use crate::error::{EdiError, EdiResult};
use crate::limits::Limits;
use crate::schema::{EdiSchema, SegmentSchema};

const LINE_TERMINATORS: [char; 2] = ['\r', '\n'];

/// Strip trailing line breaks from a raw segment.
pub(crate) fn trim_terminators(raw: &str) -> &str {
    raw.trim_end_matches(LINE_TERMINATORS)
}

/// The segment code of a raw segment: its first field, line breaks removed.
pub(crate) fn segment_code(raw: &str, delimiter: char) -> &str {
    trim_terminators(raw).split(delimiter).next().unwrap_or_default()
}

/// A matched leaf segment.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Segment {
    /// Segment code (the first field of the raw segment).
    pub code: String,
    /// Data elements following the code.
    pub fields: Vec<String>,
    /// Index of the raw segment this was read from.
    pub position: usize,
}

impl Segment {
    pub fn new(code: impl Into<String>, fields: Vec<String>, position: usize) -> Self {
        Self {
            code: code.into(),
            fields,
            position,
        }
    }

    /// Data element by 1-based reference number (`element(1)` is the first
    /// element after the code), as in `BEG01`.
    pub fn element(&self, reference: usize) -> Option<&str> {
        reference
            .checked_sub(1)
            .and_then(|i| self.fields.get(i))
            .map(String::as_str)
    }

    /// Number of data elements.
    pub fn element_count(&self) -> usize {
        self.fields.len()
    }
}

/// Field-level segment reader.
///
/// `fields` is the raw segment split on the schema's field delimiter;
/// `fields[0]` is the segment code. Errors are propagated unchanged by the
/// matcher and abort the parse.
pub trait SegmentReader: Send + Sync {
    fn read(
        &self,
        schema: &SegmentSchema,
        fields: &[&str],
        meta: &EdiSchema,
        raw: &str,
        position: usize,
    ) -> EdiResult<Segment>;
}

/// Default reader: keeps elements as text and enforces the element limit.
#[derive(Debug, Clone, Default)]
pub struct PlainSegmentReader {
    max_fields: Option<usize>,
}

impl PlainSegmentReader {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reader that rejects segments with more elements than `limits.max_fields`.
    pub fn with_limits(limits: &Limits) -> Self {
        Self {
            max_fields: Some(limits.max_fields),
        }
    }
}

impl SegmentReader for PlainSegmentReader {
    fn read(
        &self,
        schema: &SegmentSchema,
        fields: &[&str],
        _meta: &EdiSchema,
        raw: &str,
        position: usize,
    ) -> EdiResult<Segment> {
        let (code, elements) = fields
            .split_first()
            .ok_or_else(|| EdiError::field("segment has no code", position).with_segment(raw))?;

        if let Some(max) = self.max_fields {
            if elements.len() > max {
                return Err(EdiError::field(
                    format!(
                        "segment `{}` has {} elements, limit is {}",
                        schema.code,
                        elements.len(),
                        max
                    ),
                    position,
                )
                .with_segment(raw));
            }
        }

        Ok(Segment::new(
            *code,
            elements.iter().map(|e| e.to_string()).collect(),
            position,
        ))
    }
}
