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

//! Schema model: segment and segment-group definitions with occurrence
//! constraints.
//!
//! A schema is a tree of [`UnitSchema`] entries. Leaves are
//! [`SegmentSchema`]s identified by their segment code; inner nodes are
//! [`GroupSchema`]s whose identity is the code of their first child, which
//! must therefore be a segment.
//!
//! With the `serde` feature enabled, schemas deserialize from JSON/YAML:
//!
//! ```text
//! {
//!   "name": "850",
//!   "field_delimiter": "*",
//!   "segment_terminator": "~",
//!   "ignorable_codes": ["ISA", "GS", "GE", "IEA"],
//!   "units": [
//!     { "type": "segment", "code": "ST", "tag": "st", "min_occurs": 1, "max_occurs": 1 },
//!     { "type": "group", "tag": "po1_loop", "min_occurs": 1, "max_occurs": -1,
//!       "children": [
//!         { "type": "segment", "code": "PO1", "tag": "po1", "min_occurs": 1, "max_occurs": 1 }
//!       ] }
//!   ]
//! }
//! ```

use std::collections::BTreeSet;
use std::fmt;

/// Upper occurrence bound of a schema unit.
///
/// Serialized as an integer where `-1` means unbounded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MaxOccurs {
    /// At most `n` occurrences.
    Bounded(usize),
    /// Any number of occurrences.
    Unbounded,
}

impl MaxOccurs {
    /// True for `Bounded(1)`: the unit is stored as a scalar.
    pub fn is_singular(&self) -> bool {
        matches!(self, Self::Bounded(1))
    }

    /// True when `count` occurrences already fill the bound.
    pub fn is_full(&self, count: usize) -> bool {
        match self {
            Self::Bounded(max) => count >= *max,
            Self::Unbounded => false,
        }
    }

    /// Strict conversion from the integer form: `-1` or a positive count.
    pub fn from_i64(value: i64) -> Option<Self> {
        match value {
            -1 => Some(Self::Unbounded),
            n if n > 0 => usize::try_from(n).ok().map(Self::Bounded),
            _ => None,
        }
    }

    /// The integer form (`-1` for unbounded).
    pub fn as_i64(&self) -> i64 {
        match self {
            Self::Bounded(n) => i64::try_from(*n).unwrap_or(i64::MAX),
            Self::Unbounded => -1,
        }
    }
}

impl Default for MaxOccurs {
    fn default() -> Self {
        Self::Bounded(1)
    }
}

/// Lenient conversion used by the schema constructors: any negative value
/// means unbounded and `0` stays `Bounded(0)`. See [`MaxOccurs::from_i64`]
/// for the strict form.
impl From<i64> for MaxOccurs {
    fn from(value: i64) -> Self {
        if value < 0 {
            Self::Unbounded
        } else {
            Self::Bounded(value as usize)
        }
    }
}

impl fmt::Display for MaxOccurs {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bounded(n) => write!(f, "{}", n),
            Self::Unbounded => write!(f, "unbounded"),
        }
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for MaxOccurs {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_i64(self.as_i64())
    }
}

#[cfg(feature = "serde")]
impl<'de> serde::Deserialize<'de> for MaxOccurs {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = i64::deserialize(deserializer)?;
        Self::from_i64(value).ok_or_else(|| {
            serde::de::Error::custom(format!(
                "max_occurs must be -1 (unbounded) or a positive integer, got {}",
                value
            ))
        })
    }
}

/// A leaf segment definition.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SegmentSchema {
    /// Segment code matched against the first field of a raw segment.
    pub code: String,
    /// Key under which matched segments are stored.
    pub tag: String,
    #[cfg_attr(feature = "serde", serde(default))]
    pub min_occurs: usize,
    #[cfg_attr(feature = "serde", serde(default))]
    pub max_occurs: MaxOccurs,
}

/// A segment-group definition.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GroupSchema {
    /// Key under which matched group instances are stored.
    pub tag: String,
    #[cfg_attr(feature = "serde", serde(default))]
    pub min_occurs: usize,
    #[cfg_attr(feature = "serde", serde(default))]
    pub max_occurs: MaxOccurs,
    /// Ordered child units. The first child must be a segment.
    pub children: Vec<UnitSchema>,
}

impl GroupSchema {
    /// The segment that opens this group, if the group is well formed.
    pub fn first_segment(&self) -> Option<&SegmentSchema> {
        match self.children.first() {
            Some(UnitSchema::Segment(segment)) => Some(segment),
            _ => None,
        }
    }
}

/// A schema entry: either a leaf segment or a nested group.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(tag = "type", rename_all = "snake_case"))]
pub enum UnitSchema {
    Segment(SegmentSchema),
    Group(GroupSchema),
}

impl UnitSchema {
    /// Build a segment entry. A negative `max` means unbounded; `0` builds an
    /// entry that may never occur, unlike schema files where `0` is rejected.
    pub fn segment(
        code: impl Into<String>,
        tag: impl Into<String>,
        min: usize,
        max: i64,
    ) -> Self {
        Self::Segment(SegmentSchema {
            code: code.into(),
            tag: tag.into(),
            min_occurs: min,
            max_occurs: MaxOccurs::from(max),
        })
    }

    /// Build a group entry. `max` follows [`UnitSchema::segment`].
    pub fn group(
        tag: impl Into<String>,
        min: usize,
        max: i64,
        children: Vec<UnitSchema>,
    ) -> Self {
        Self::Group(GroupSchema {
            tag: tag.into(),
            min_occurs: min,
            max_occurs: MaxOccurs::from(max),
            children,
        })
    }

    pub fn tag(&self) -> &str {
        match self {
            Self::Segment(s) => &s.tag,
            Self::Group(g) => &g.tag,
        }
    }

    pub fn min_occurs(&self) -> usize {
        match self {
            Self::Segment(s) => s.min_occurs,
            Self::Group(g) => g.min_occurs,
        }
    }

    pub fn max_occurs(&self) -> MaxOccurs {
        match self {
            Self::Segment(s) => s.max_occurs,
            Self::Group(g) => g.max_occurs,
        }
    }

    /// True when the unit may occur more than once (stored as a sequence).
    pub fn is_repeatable(&self) -> bool {
        !self.max_occurs().is_singular()
    }

    /// Human-readable label for diagnostics.
    pub fn describe(&self) -> String {
        match self {
            Self::Segment(s) => format!("segment `{}` ({})", s.code, s.tag),
            Self::Group(g) => format!("group `{}`", g.tag),
        }
    }
}

/// A complete interchange schema: delimiters, ignorable codes and the
/// top-level unit sequence.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EdiSchema {
    #[cfg_attr(feature = "serde", serde(default))]
    pub name: String,
    /// Separator between the code and the data elements of a segment.
    #[cfg_attr(feature = "serde", serde(default = "default_field_delimiter"))]
    pub field_delimiter: char,
    /// Segment terminator. `None` means one segment per line.
    #[cfg_attr(feature = "serde", serde(default = "default_segment_terminator"))]
    pub segment_terminator: Option<char>,
    /// Codes of segments that are consumed without being matched.
    #[cfg_attr(feature = "serde", serde(default))]
    pub ignorable_codes: BTreeSet<String>,
    pub units: Vec<UnitSchema>,
}

fn default_field_delimiter() -> char {
    '*'
}

fn default_segment_terminator() -> Option<char> {
    Some('~')
}

impl EdiSchema {
    /// Create a schema with X12-style delimiters (`*` and `~`).
    pub fn new(name: impl Into<String>, units: Vec<UnitSchema>) -> Self {
        Self {
            name: name.into(),
            field_delimiter: default_field_delimiter(),
            segment_terminator: default_segment_terminator(),
            ignorable_codes: BTreeSet::new(),
            units,
        }
    }

    pub fn with_delimiter(mut self, delimiter: char) -> Self {
        self.field_delimiter = delimiter;
        self
    }

    pub fn with_terminator(mut self, terminator: Option<char>) -> Self {
        self.segment_terminator = terminator;
        self
    }

    /// Mark a segment code as ignorable.
    pub fn ignore(mut self, code: impl Into<String>) -> Self {
        self.ignorable_codes.insert(code.into());
        self
    }

    /// Append a top-level unit.
    pub fn unit(mut self, unit: UnitSchema) -> Self {
        self.units.push(unit);
        self
    }

    pub fn is_ignorable(&self, code: &str) -> bool {
        self.ignorable_codes.contains(code)
    }
}
