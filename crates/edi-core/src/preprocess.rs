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

//! Input preprocessing: splitting an interchange into raw segments.

use crate::error::{EdiError, EdiResult};
use crate::limits::Limits;
use crate::schema::EdiSchema;

const LINE_TERMINATORS: [char; 2] = ['\r', '\n'];

/// Raw segments ready for matching.
/// Stores the decoded text once plus segment offsets.
#[derive(Debug)]
pub struct RawSegments {
    text: String,
    offsets: Vec<(usize, usize)>,
}

impl RawSegments {
    /// Segments as borrowed slices, in input order.
    pub fn segments(&self) -> Vec<&str> {
        self.iter().collect()
    }

    #[inline]
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.offsets
            .iter()
            .map(move |&(start, end)| &self.text[start..end])
    }

    pub fn len(&self) -> usize {
        self.offsets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.offsets.is_empty()
    }
}

/// Split raw input bytes into segments.
///
/// This handles:
/// - Size limits
/// - UTF-8 validation
/// - BOM skipping
/// - Splitting on the schema's segment terminator (or on newlines)
/// - Stripping line terminators around each segment and dropping blank ones
/// - Segment length and count limits
pub fn split_segments(input: &[u8], schema: &EdiSchema, limits: &Limits) -> EdiResult<RawSegments> {
    if input.len() > limits.max_input_size {
        return Err(EdiError::security(
            format!("input too large: exceeds limit of {} bytes", limits.max_input_size),
            None,
        ));
    }

    let text = std::str::from_utf8(input)
        .map_err(|e| EdiError::syntax(format!("invalid UTF-8 encoding: {}", e), None))?;
    let text = text.strip_prefix('\u{FEFF}').unwrap_or(text);

    let terminator = schema.segment_terminator.unwrap_or('\n');
    let mut offsets = Vec::new();

    for (start, piece) in pieces(text, terminator) {
        let trimmed_start = piece.trim_start_matches(LINE_TERMINATORS);
        let trimmed = trimmed_start.trim_end_matches(LINE_TERMINATORS);
        if trimmed.trim().is_empty() {
            continue;
        }

        let position = offsets.len();
        if trimmed.len() > limits.max_segment_length {
            return Err(EdiError::security(
                format!(
                    "segment too long: exceeds limit of {} bytes",
                    limits.max_segment_length
                ),
                Some(position),
            ));
        }
        if position >= limits.max_segments {
            return Err(EdiError::security(
                format!("too many segments: exceeds limit of {}", limits.max_segments),
                Some(position),
            ));
        }

        let begin = start + (piece.len() - trimmed_start.len());
        offsets.push((begin, begin + trimmed.len()));
    }

    Ok(RawSegments {
        text: text.to_string(),
        offsets,
    })
}

/// Split `text` on `terminator`, yielding each piece with its byte offset.
fn pieces(text: &str, terminator: char) -> Vec<(usize, &str)> {
    let mut out = Vec::new();
    let mut start = 0;

    if terminator.is_ascii() {
        for end in memchr::memchr_iter(terminator as u8, text.as_bytes()) {
            out.push((start, &text[start..end]));
            start = end + 1;
        }
    } else {
        for (end, _) in text.match_indices(terminator) {
            out.push((start, &text[start..end]));
            start = end + terminator.len_utf8();
        }
    }
    out.push((start, &text[start..]));
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::EdiErrorKind;

    fn x12() -> EdiSchema {
        EdiSchema::new("test", vec![])
    }

    fn lines() -> EdiSchema {
        EdiSchema::new("test", vec![]).with_terminator(None)
    }

    #[test]
    fn test_split_on_terminator() {
        let raw = split_segments(b"ST*850*0001~BEG*00*SA~SE*2*0001~", &x12(), &Limits::default()).unwrap();
        assert_eq!(raw.segments(), vec!["ST*850*0001", "BEG*00*SA", "SE*2*0001"]);
    }

    #[test]
    fn test_split_strips_line_breaks_after_terminator() {
        let raw = split_segments(b"ST*850~\r\nBEG*00~\nSE*2~\n", &x12(), &Limits::default()).unwrap();
        assert_eq!(raw.segments(), vec!["ST*850", "BEG*00", "SE*2"]);
    }

    #[test]
    fn test_split_on_lines() {
        let raw = split_segments(b"LX*1\r\nLX*2\n\nLX*3", &lines(), &Limits::default()).unwrap();
        assert_eq!(raw.segments(), vec!["LX*1", "LX*2", "LX*3"]);
        assert_eq!(raw.len(), 3);
    }

    #[test]
    fn test_split_keeps_trailing_spaces_in_data() {
        let raw = split_segments(b"N1*ST*ACME  ~", &x12(), &Limits::default()).unwrap();
        assert_eq!(raw.segments(), vec!["N1*ST*ACME  "]);
    }

    #[test]
    fn test_split_non_ascii_terminator() {
        let schema = x12().with_terminator(Some('§'));
        let raw = split_segments("A*1§B*2§".as_bytes(), &schema, &Limits::default()).unwrap();
        assert_eq!(raw.segments(), vec!["A*1", "B*2"]);
    }

    #[test]
    fn test_split_skips_bom() {
        let raw = split_segments("\u{FEFF}ST*850~".as_bytes(), &x12(), &Limits::default()).unwrap();
        assert_eq!(raw.segments(), vec!["ST*850"]);
    }

    #[test]
    fn test_split_empty_input() {
        let raw = split_segments(b"", &x12(), &Limits::default()).unwrap();
        assert!(raw.is_empty());
    }

    #[test]
    fn test_invalid_utf8() {
        let err = split_segments(&[0xff, 0xfe, b'~'], &x12(), &Limits::default()).unwrap_err();
        assert_eq!(err.kind, EdiErrorKind::Syntax);
    }

    #[test]
    fn test_input_size_limit() {
        let limits = Limits {
            max_input_size: 4,
            ..Limits::default()
        };
        let err = split_segments(b"ST*850~", &x12(), &limits).unwrap_err();
        assert_eq!(err.kind, EdiErrorKind::Security);
        assert_eq!(err.position, None);
    }

    #[test]
    fn test_segment_length_limit() {
        let limits = Limits {
            max_segment_length: 5,
            ..Limits::default()
        };
        let err = split_segments(b"A*1~BEG*00*SA~", &x12(), &limits).unwrap_err();
        assert_eq!(err.kind, EdiErrorKind::Security);
        assert_eq!(err.position, Some(1));
    }

    #[test]
    fn test_segment_count_limit() {
        let limits = Limits {
            max_segments: 2,
            ..Limits::default()
        };
        let err = split_segments(b"A~B~C~", &x12(), &limits).unwrap_err();
        assert_eq!(err.kind, EdiErrorKind::Security);
        assert_eq!(err.position, Some(2));
    }
}
