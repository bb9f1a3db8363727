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

//! Property-based tests for raw cursor discipline.
//!
//! Every raw segment is consumed exactly once: either stored in the result
//! at its own position or skipped as ignorable.

use super::{join, looping_lines, looping_schema};
use edi_core::traverse::{traverse, GroupVisitor, VisitorContext};
use edi_core::{parse, GroupResult, Segment};
use proptest::prelude::*;
use std::convert::Infallible;

#[derive(Default)]
struct PositionCollector {
    positions: Vec<usize>,
    codes: Vec<(usize, String)>,
}

impl GroupVisitor for PositionCollector {
    type Error = Infallible;

    fn visit_segment(
        &mut self,
        _tag: &str,
        segment: &Segment,
        _ctx: &VisitorContext,
    ) -> Result<(), Self::Error> {
        self.positions.push(segment.position);
        self.codes.push((segment.position, segment.code.clone()));
        Ok(())
    }
}

fn collect(result: &GroupResult) -> PositionCollector {
    let mut collector = PositionCollector::default();
    traverse(result, &mut collector).unwrap();
    collector.positions.sort_unstable();
    collector.codes.sort();
    collector
}

/// Insert an ignorable segment before line `i` wherever `flags[i]` is set,
/// and after the last line when the final flag is set.
fn with_ignorables(lines: &[String], flags: &[bool]) -> Vec<String> {
    let mut out = Vec::new();
    for (i, line) in lines.iter().enumerate() {
        if flags.get(i).copied().unwrap_or(false) {
            out.push(format!("ISA*{}", i));
        }
        out.push(line.clone());
    }
    if flags.get(lines.len()).copied().unwrap_or(false) {
        out.push("ISA*end".to_string());
    }
    out
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(500))]

    /// Property: matched segments carry their raw index, and together with
    /// the ignorable ones they cover the whole input.
    #[test]
    fn prop_every_segment_consumed_once(
        loops in prop::collection::vec(0usize..4, 1..8),
        flags in prop::collection::vec(proptest::bool::ANY, 40)
    ) {
        let schema = looping_schema(-1);
        let lines = with_ignorables(&looping_lines(&loops), &flags);

        let result = parse(join(&lines).as_bytes(), &schema);
        prop_assert!(result.is_ok(), "Failed to parse: {:?}", result.err());
        let collected = collect(&result.unwrap());

        let expected: Vec<usize> = lines
            .iter()
            .enumerate()
            .filter(|(_, line)| !line.starts_with("ISA*"))
            .map(|(i, _)| i)
            .collect();
        prop_assert_eq!(&collected.positions, &expected);

        for (position, code) in &collected.codes {
            let raw_code = lines[*position].split('*').next().unwrap();
            prop_assert_eq!(code.as_str(), raw_code);
        }
    }

    /// Property: ignorable segments never change the matched tree.
    #[test]
    fn prop_ignorables_do_not_change_structure(
        loops in prop::collection::vec(0usize..4, 1..8),
        flags in prop::collection::vec(proptest::bool::ANY, 40)
    ) {
        let schema = looping_schema(-1);
        let plain = looping_lines(&loops);
        let noisy = with_ignorables(&plain, &flags);

        let plain_result = parse(join(&plain).as_bytes(), &schema).unwrap();
        let noisy_result = parse(join(&noisy).as_bytes(), &schema).unwrap();

        let plain_instances = plain_result.groups("l").unwrap();
        let noisy_instances = noisy_result.groups("l").unwrap();
        prop_assert_eq!(plain_instances.len(), noisy_instances.len());
        for (a, b) in plain_instances.iter().zip(noisy_instances) {
            prop_assert_eq!(a.occurrences("b"), b.occurrences("b"));
            prop_assert_eq!(&a.segment("a").unwrap().fields, &b.segment("a").unwrap().fields);
        }
    }
}
