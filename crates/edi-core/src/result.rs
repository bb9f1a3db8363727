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

//! Matched document tree.

use crate::segment::Segment;
use std::collections::BTreeMap;

/// Content stored under one tag.
///
/// The variant is fixed by the schema unit's `max_occurs`: singular units
/// use `One`/`OneGroup`, everything else `Many`/`ManyGroup`. An absent unit
/// has no slot at all.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[cfg_attr(feature = "serde", serde(untagged))]
pub enum Slot {
    One(Segment),
    Many(Vec<Segment>),
    OneGroup(GroupResult),
    ManyGroup(Vec<GroupResult>),
}

impl Slot {
    pub fn as_segment(&self) -> Option<&Segment> {
        match self {
            Self::One(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_segments(&self) -> Option<&[Segment]> {
        match self {
            Self::Many(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_group(&self) -> Option<&GroupResult> {
        match self {
            Self::OneGroup(g) => Some(g),
            _ => None,
        }
    }

    pub fn as_groups(&self) -> Option<&[GroupResult]> {
        match self {
            Self::ManyGroup(g) => Some(g),
            _ => None,
        }
    }

    /// Number of occurrences held by this slot.
    pub fn occurrences(&self) -> usize {
        match self {
            Self::One(_) | Self::OneGroup(_) => 1,
            Self::Many(s) => s.len(),
            Self::ManyGroup(g) => g.len(),
        }
    }
}

/// The result of matching one group level (or the root).
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct GroupResult {
    slots: BTreeMap<String, Slot>,
}

impl GroupResult {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, tag: &str) -> Option<&Slot> {
        self.slots.get(tag)
    }

    pub fn contains(&self, tag: &str) -> bool {
        self.slots.contains_key(tag)
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn tags(&self) -> impl Iterator<Item = &str> {
        self.slots.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Slot)> {
        self.slots.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Occurrences stored under `tag` (0 when absent).
    pub fn occurrences(&self, tag: &str) -> usize {
        self.slots.get(tag).map_or(0, Slot::occurrences)
    }

    pub fn segment(&self, tag: &str) -> Option<&Segment> {
        self.get(tag).and_then(Slot::as_segment)
    }

    pub fn segments(&self, tag: &str) -> Option<&[Segment]> {
        self.get(tag).and_then(Slot::as_segments)
    }

    pub fn group(&self, tag: &str) -> Option<&GroupResult> {
        self.get(tag).and_then(Slot::as_group)
    }

    pub fn groups(&self, tag: &str) -> Option<&[GroupResult]> {
        self.get(tag).and_then(Slot::as_groups)
    }

    /// Store a singular value, replacing any previous one.
    pub(crate) fn set(&mut self, tag: &str, slot: Slot) {
        self.slots.insert(tag.to_string(), slot);
    }

    /// Mutable access to a repeated slot, creating it with `empty` if absent.
    pub(crate) fn slot_mut(&mut self, tag: &str, empty: impl FnOnce() -> Slot) -> &mut Slot {
        self.slots.entry(tag.to_string()).or_insert_with(empty)
    }
}
