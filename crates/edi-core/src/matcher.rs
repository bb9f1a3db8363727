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

//! Segment-group matcher.
//!
//! Walks one level of the schema tree and the raw segment cursor in
//! lockstep. Each level owns its own schema index; the raw cursor lives in
//! the shared [`ParseContext`].
//!
//! # Algorithm
//!
//! For every raw segment:
//!
//! 1. Ignorable codes are consumed without touching the schema index.
//! 2. Schema entries from the current index are tried in order. An entry
//!    that does not match is skipped if it is optional, or if it is
//!    repeatable and already matched at least once; otherwise the parse
//!    fails with `MandatoryMissing`.
//! 3. A matching segment entry is read and stored. A matching group entry
//!    (identified by its first segment's code) recurses with the same
//!    context.
//! 4. When nothing matches, the root fails with `UnmatchedSegment`; a nested
//!    level returns without consuming anything, handing the segment back to
//!    its parent. This is how a group ends.
//!
//! Singular entries advance the schema index once matched. Repeatable
//! entries stay current so the next segment can repeat them. There is no
//! backtracking: a skipped entry is never revisited.

use crate::context::ParseContext;
use crate::error::{EdiError, EdiResult};
use crate::result::{GroupResult, Slot};
use crate::schema::{GroupSchema, SegmentSchema, UnitSchema};
use crate::segment::{trim_terminators, Segment, SegmentReader};
use tracing::trace;

/// Match `children` against the raw segments at the context's cursor.
///
/// `is_root` selects the behavior on a segment that fits nothing at this
/// level: an error at the root, a silent return elsewhere.
pub fn read_group(
    children: &[UnitSchema],
    ctx: &mut ParseContext<'_>,
    is_root: bool,
    reader: &dyn SegmentReader,
) -> EdiResult<GroupResult> {
    let schema = ctx.schema();
    if let Some(tag) = duplicate_tag(children) {
        return Err(EdiError::malformed_schema(
            format!("tag `{}` is used by more than one entry at the same level", tag),
            ctx.position(),
        ));
    }

    let mut child_index = 0;
    let mut result = GroupResult::new();

    while ctx.has_remaining() {
        let position = ctx.position();
        let raw = ctx.peek()?;
        let line = trim_terminators(raw);
        let fields: Vec<&str> = line.split(schema.field_delimiter).collect();
        let code = fields.first().copied().unwrap_or_default();

        if schema.is_ignorable(code) {
            trace!(position, code, "ignoring segment");
            ctx.advance();
            continue;
        }

        let mut matched = false;
        while let Some(child) = children.get(child_index) {
            match child {
                UnitSchema::Segment(segment_schema) => {
                    if segment_schema.code != code {
                        try_skip(child, &result, code, raw, position)
                            .map_err(|e| reclassify_at_root(e, children, is_root, code))?;
                        child_index += 1;
                        continue;
                    }

                    trace!(position, code, tag = %segment_schema.tag, "matched segment");
                    let segment = reader.read(segment_schema, &fields, schema, raw, position)?;
                    if place_segment(&mut result, segment_schema, segment, raw)? {
                        child_index += 1;
                    }
                    ctx.advance();
                    matched = true;
                    break;
                }
                UnitSchema::Group(group) => {
                    let first = group.first_segment().ok_or_else(|| {
                        EdiError::malformed_schema(
                            format!(
                                "group `{}` must open with a segment, not a nested group",
                                group.tag
                            ),
                            position,
                        )
                    })?;
                    if first.code != code {
                        try_skip(child, &result, code, raw, position)
                            .map_err(|e| reclassify_at_root(e, children, is_root, code))?;
                        child_index += 1;
                        continue;
                    }

                    trace!(position, code, tag = %group.tag, "entering group");
                    ctx.enter_group()?;
                    let nested = read_group(&group.children, ctx, false, reader).map_err(|e| {
                        if e.context.is_none() {
                            e.with_context(format!("in group `{}`", group.tag))
                        } else {
                            e
                        }
                    })?;
                    ctx.exit_group();
                    trace!(position = ctx.position(), tag = %group.tag, "leaving group");

                    if !nested.is_empty() && place_group(&mut result, group, nested, raw, position)? {
                        child_index += 1;
                    }
                    matched = true;
                    break;
                }
            }
        }

        if !matched {
            if is_root {
                return Err(EdiError::unmatched_segment(
                    format!("segment `{}` does not match any schema entry", code),
                    position,
                )
                .with_segment(raw));
            }
            trace!(position, code, "segment does not belong to this group");
            break;
        }

        if child_index >= children.len() {
            trace!(position = ctx.position(), "schema level complete");
            break;
        }
    }

    validate_remaining(children, child_index, &result, ctx)?;
    Ok(result)
}

/// Decide whether a non-matching schema entry may be bypassed.
fn try_skip(
    child: &UnitSchema,
    result: &GroupResult,
    code: &str,
    raw: &str,
    position: usize,
) -> EdiResult<()> {
    if child.min_occurs() == 0 {
        trace!(position, unit = %child.tag(), "skipping optional unit");
        return Ok(());
    }
    if child.is_repeatable() && result.occurrences(child.tag()) > 0 {
        trace!(position, unit = %child.tag(), "skipping satisfied repeatable unit");
        return Ok(());
    }
    Err(EdiError::mandatory_missing(
        format!("{} is required but found `{}`", child.describe(), code),
        position,
    )
    .with_segment(raw))
}

/// At the root, a segment that no entry of the level could ever match is
/// reported as unmatched rather than as the mandatory entry it displaced.
fn reclassify_at_root(err: EdiError, children: &[UnitSchema], is_root: bool, code: &str) -> EdiError {
    let known = children.iter().any(|child| opening_code(child) == Some(code));
    if !is_root || known {
        return err;
    }
    let position = err.position.unwrap_or_default();
    let mut unmatched = EdiError::unmatched_segment(
        format!("segment `{}` does not match any schema entry", code),
        position,
    );
    unmatched.segment = err.segment;
    unmatched
}

/// The first tag claimed by two entries of one level. Results are keyed by
/// tag, so such a level cannot be stored.
fn duplicate_tag(children: &[UnitSchema]) -> Option<&str> {
    children.iter().enumerate().find_map(|(i, child)| {
        children[..i]
            .iter()
            .any(|earlier| earlier.tag() == child.tag())
            .then(|| child.tag())
    })
}

/// The code that identifies a unit: its own for segments, the first
/// child's for groups.
fn opening_code(unit: &UnitSchema) -> Option<&str> {
    match unit {
        UnitSchema::Segment(s) => Some(s.code.as_str()),
        UnitSchema::Group(g) => g.first_segment().map(|s| s.code.as_str()),
    }
}

/// Store a matched segment. Returns true when the schema index should
/// advance (singular entries).
fn place_segment(
    result: &mut GroupResult,
    schema: &SegmentSchema,
    segment: Segment,
    raw: &str,
) -> EdiResult<bool> {
    if schema.max_occurs.is_singular() {
        result.set(&schema.tag, Slot::One(segment));
        return Ok(true);
    }

    let position = segment.position;
    let Slot::Many(items) = result.slot_mut(&schema.tag, || Slot::Many(Vec::new())) else {
        return Err(shape_conflict(&schema.tag, position));
    };
    if schema.max_occurs.is_full(items.len()) {
        return Err(EdiError::too_many_occurrences(
            format!(
                "segment `{}` ({}) occurs more than {} times",
                schema.code, schema.tag, schema.max_occurs
            ),
            position,
        )
        .with_segment(raw));
    }
    items.push(segment);
    Ok(false)
}

/// Store a completed nested group. Same policy as [`place_segment`].
fn place_group(
    result: &mut GroupResult,
    schema: &GroupSchema,
    nested: GroupResult,
    raw: &str,
    position: usize,
) -> EdiResult<bool> {
    if schema.max_occurs.is_singular() {
        result.set(&schema.tag, Slot::OneGroup(nested));
        return Ok(true);
    }

    let Slot::ManyGroup(items) = result.slot_mut(&schema.tag, || Slot::ManyGroup(Vec::new())) else {
        return Err(shape_conflict(&schema.tag, position));
    };
    if schema.max_occurs.is_full(items.len()) {
        return Err(EdiError::too_many_occurrences(
            format!(
                "group `{}` occurs more than {} times",
                schema.tag, schema.max_occurs
            ),
            position,
        )
        .with_segment(raw));
    }
    items.push(nested);
    Ok(false)
}

fn shape_conflict(tag: &str, position: usize) -> EdiError {
    EdiError::malformed_schema(format!("tag `{}` already holds a different kind of value", tag), position)
}

/// Every entry the loop did not get past must be optional or already
/// matched.
fn validate_remaining(
    children: &[UnitSchema],
    child_index: usize,
    result: &GroupResult,
    ctx: &ParseContext<'_>,
) -> EdiResult<()> {
    let missing = children
        .iter()
        .skip(child_index)
        .find(|child| child.min_occurs() > 0 && result.occurrences(child.tag()) == 0);

    match missing {
        None => Ok(()),
        Some(child) => {
            let mut err = EdiError::mandatory_missing(
                format!("{} is required but was not found", child.describe()),
                ctx.position(),
            );
            if let Ok(raw) = ctx.peek() {
                err = err.with_segment(raw);
            }
            Err(err)
        }
    }
}
