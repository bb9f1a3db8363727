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

//! Error types for EDI parsing.

use std::fmt;
use thiserror::Error;

/// The kind of error that occurred during parsing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EdiErrorKind {
    /// A group definition opens with a nested group instead of a segment.
    MalformedSchema,
    /// A root-level segment matched no schema entry.
    UnmatchedSegment,
    /// A required schema entry had no matching segment.
    MandatoryMissing,
    /// A bounded repeatable entry exceeded its declared maximum.
    TooManyOccurrences,
    /// The segment reader rejected a segment's fields.
    Field,
    /// The raw input was exhausted while a segment was expected.
    EndOfInput,
    /// Encoding-level violation (invalid UTF-8).
    Syntax,
    /// Security limit exceeded.
    Security,
}

impl fmt::Display for EdiErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MalformedSchema => write!(f, "MalformedSchemaError"),
            Self::UnmatchedSegment => write!(f, "UnmatchedSegmentError"),
            Self::MandatoryMissing => write!(f, "MandatoryMissingError"),
            Self::TooManyOccurrences => write!(f, "TooManyOccurrencesError"),
            Self::Field => write!(f, "FieldError"),
            Self::EndOfInput => write!(f, "EndOfInputError"),
            Self::Syntax => write!(f, "SyntaxError"),
            Self::Security => write!(f, "SecurityError"),
        }
    }
}

/// An error that occurred during EDI parsing.
///
/// `position` is the 0-based index of the raw segment the parser was looking
/// at when the error was raised. It is `None` when the error is not tied to
/// a segment (for example, an oversized input).
#[derive(Debug, Clone, PartialEq, Error)]
#[error("{kind}{}: {message}", position_suffix(.position))]
pub struct EdiError {
    /// The kind of error.
    pub kind: EdiErrorKind,
    /// Human-readable error message.
    pub message: String,
    /// Raw segment index (0-based, optional).
    pub position: Option<usize>,
    /// The offending raw segment text, if any.
    pub segment: Option<String>,
    /// Additional context (e.g., "in group `n1_loop`").
    pub context: Option<String>,
}

fn position_suffix(position: &Option<usize>) -> String {
    match position {
        Some(p) => format!(" at segment {}", p),
        None => String::new(),
    }
}

impl EdiError {
    /// Create a new error.
    pub fn new(kind: EdiErrorKind, message: impl Into<String>, position: Option<usize>) -> Self {
        Self {
            kind,
            message: message.into(),
            position,
            segment: None,
            context: None,
        }
    }

    /// Attach the raw segment text.
    pub fn with_segment(mut self, segment: impl Into<String>) -> Self {
        self.segment = Some(segment.into());
        self
    }

    /// Add context information.
    pub fn with_context(mut self, context: impl Into<String>) -> Self {
        self.context = Some(context.into());
        self
    }

    // Convenience constructors for each error kind
    pub fn malformed_schema(message: impl Into<String>, position: usize) -> Self {
        Self::new(EdiErrorKind::MalformedSchema, message, Some(position))
    }

    pub fn unmatched_segment(message: impl Into<String>, position: usize) -> Self {
        Self::new(EdiErrorKind::UnmatchedSegment, message, Some(position))
    }

    pub fn mandatory_missing(message: impl Into<String>, position: usize) -> Self {
        Self::new(EdiErrorKind::MandatoryMissing, message, Some(position))
    }

    pub fn too_many_occurrences(message: impl Into<String>, position: usize) -> Self {
        Self::new(EdiErrorKind::TooManyOccurrences, message, Some(position))
    }

    pub fn field(message: impl Into<String>, position: usize) -> Self {
        Self::new(EdiErrorKind::Field, message, Some(position))
    }

    pub fn end_of_input(position: usize) -> Self {
        Self::new(EdiErrorKind::EndOfInput, "unexpected end of input", Some(position))
    }

    pub fn syntax(message: impl Into<String>, position: Option<usize>) -> Self {
        Self::new(EdiErrorKind::Syntax, message, position)
    }

    pub fn security(message: impl Into<String>, position: Option<usize>) -> Self {
        Self::new(EdiErrorKind::Security, message, position)
    }
}

/// Result type for EDI operations.
pub type EdiResult<T> = Result<T, EdiError>;

#[cfg(test)]
mod tests {
    use super::*;

    // ==================== EdiErrorKind Display tests ====================

    #[test]
    fn test_error_kind_display() {
        assert_eq!(EdiErrorKind::MalformedSchema.to_string(), "MalformedSchemaError");
        assert_eq!(EdiErrorKind::UnmatchedSegment.to_string(), "UnmatchedSegmentError");
        assert_eq!(EdiErrorKind::MandatoryMissing.to_string(), "MandatoryMissingError");
        assert_eq!(EdiErrorKind::TooManyOccurrences.to_string(), "TooManyOccurrencesError");
        assert_eq!(EdiErrorKind::Field.to_string(), "FieldError");
        assert_eq!(EdiErrorKind::EndOfInput.to_string(), "EndOfInputError");
        assert_eq!(EdiErrorKind::Syntax.to_string(), "SyntaxError");
        assert_eq!(EdiErrorKind::Security.to_string(), "SecurityError");
    }

    // ==================== EdiError Display tests ====================

    #[test]
    fn test_error_display_with_position() {
        let err = EdiError::unmatched_segment("no schema entry for `B`", 0);
        let msg = err.to_string();
        assert_eq!(msg, "UnmatchedSegmentError at segment 0: no schema entry for `B`");
    }

    #[test]
    fn test_error_display_without_position() {
        let err = EdiError::security("input too large", None);
        assert_eq!(err.to_string(), "SecurityError: input too large");
    }

    #[test]
    fn test_error_chained_builders() {
        let err = EdiError::mandatory_missing("segment `BEG` is required", 3)
            .with_segment("REF*DP*038")
            .with_context("in group `po1_loop`");
        assert_eq!(err.segment.as_deref(), Some("REF*DP*038"));
        assert_eq!(err.context.as_deref(), Some("in group `po1_loop`"));
        assert_eq!(err.position, Some(3));
    }

    // ==================== Convenience constructor tests ====================

    #[test]
    fn test_constructors_set_kind() {
        assert_eq!(EdiError::malformed_schema("x", 1).kind, EdiErrorKind::MalformedSchema);
        assert_eq!(EdiError::too_many_occurrences("x", 2).kind, EdiErrorKind::TooManyOccurrences);
        assert_eq!(EdiError::field("x", 3).kind, EdiErrorKind::Field);
        assert_eq!(EdiError::syntax("x", None).kind, EdiErrorKind::Syntax);
    }

    #[test]
    fn test_end_of_input() {
        let err = EdiError::end_of_input(7);
        assert_eq!(err.kind, EdiErrorKind::EndOfInput);
        assert_eq!(err.position, Some(7));
    }

    #[test]
    fn test_error_is_std_error() {
        fn accepts_error<E: std::error::Error>(_: E) {}
        accepts_error(EdiError::field("bad element", 1));
    }
}
