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

//! Security limits for EDI parsing.

/// Configurable limits for parser security.
///
/// These limits bound the resources consumed while splitting and matching a
/// single interchange. The matcher recurses once per nested group, so
/// `max_group_depth` also bounds stack usage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Limits {
    /// Maximum input size in bytes (default: 1GB).
    pub max_input_size: usize,
    /// Maximum number of raw segments (default: 10M).
    pub max_segments: usize,
    /// Maximum length of a single raw segment in bytes (default: 64KB).
    pub max_segment_length: usize,
    /// Maximum nested group depth (default: 64).
    pub max_group_depth: usize,
    /// Maximum data elements per segment, excluding the code (default: 512).
    pub max_fields: usize,
}

impl Default for Limits {
    fn default() -> Self {
        Self {
            max_input_size: 1024 * 1024 * 1024, // 1GB
            max_segments: 10_000_000,
            max_segment_length: 64 * 1024, // 64KB
            max_group_depth: 64,
            max_fields: 512,
        }
    }
}

impl Limits {
    /// Create limits with no restrictions (for testing).
    pub fn unlimited() -> Self {
        Self {
            max_input_size: usize::MAX,
            max_segments: usize::MAX,
            max_segment_length: usize::MAX,
            max_group_depth: usize::MAX,
            max_fields: usize::MAX,
        }
    }
}
