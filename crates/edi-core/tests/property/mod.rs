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

//! Property test modules, grouped by the invariant they exercise.

use edi_core::{EdiSchema, UnitSchema};

pub mod cursor;
pub mod mandatory;
pub mod occurrences;

/// `ST`, one or more `l` loops of `A` plus up to `max_b` `B`s, then `SE`.
pub fn looping_schema(max_b: i64) -> EdiSchema {
    EdiSchema::new(
        "loops",
        vec![
            UnitSchema::segment("ST", "st", 1, 1),
            UnitSchema::group(
                "l",
                1,
                -1,
                vec![
                    UnitSchema::segment("A", "a", 1, 1),
                    UnitSchema::segment("B", "b", 0, max_b),
                ],
            ),
            UnitSchema::segment("SE", "se", 1, 1),
        ],
    )
    .with_terminator(None)
    .ignore("ISA")
}

/// Render the document for `looping_schema`: one entry per loop giving its
/// number of `B` segments.
pub fn looping_lines(loops: &[usize]) -> Vec<String> {
    let mut lines = vec!["ST*1".to_string()];
    for (i, b_count) in loops.iter().enumerate() {
        lines.push(format!("A*{}", i));
        for j in 0..*b_count {
            lines.push(format!("B*{}*{}", i, j));
        }
    }
    lines.push("SE*1".to_string());
    lines
}

pub fn join(lines: &[String]) -> String {
    lines.join("\n")
}
