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

//! Property-based tests for occurrence counting.

use super::{join, looping_lines, looping_schema};
use edi_core::{parse, EdiErrorKind};
use proptest::prelude::*;

const MAX_B: usize = 5;

proptest! {
    #![proptest_config(ProptestConfig::with_cases(500))]

    /// Property: a repeatable group yields one result per occurrence, and
    /// each occurrence keeps its own repeated children.
    #[test]
    fn prop_group_occurrences_match_input(
        loops in prop::collection::vec(0..=MAX_B, 1..20)
    ) {
        let schema = looping_schema(MAX_B as i64);
        let doc = join(&looping_lines(&loops));

        let result = parse(doc.as_bytes(), &schema);
        prop_assert!(result.is_ok(), "Failed to parse: {:?}", result.err());
        let result = result.unwrap();

        let instances = result.groups("l").unwrap();
        prop_assert_eq!(instances.len(), loops.len());

        for (i, (instance, expected)) in instances.iter().zip(&loops).enumerate() {
            let a = instance.segment("a").unwrap();
            prop_assert_eq!(a.fields[0].clone(), i.to_string());
            prop_assert_eq!(instance.occurrences("b"), *expected);
            prop_assert_eq!(instance.contains("b"), *expected > 0);
        }
    }

    /// Property: one segment past a bounded maximum fails at that segment.
    #[test]
    fn prop_bounded_overflow_reports_extra_segment(
        loops in prop::collection::vec(0..=MAX_B, 0..10)
    ) {
        let schema = looping_schema(MAX_B as i64);
        let mut all = loops.clone();
        all.push(MAX_B + 1);
        let lines = looping_lines(&all);

        let err = parse(join(&lines).as_bytes(), &schema).unwrap_err();
        prop_assert_eq!(err.kind, EdiErrorKind::TooManyOccurrences);

        // ST + every earlier loop + the last loop's A + MAX_B accepted Bs
        let earlier: usize = loops.iter().map(|b| b + 1).sum();
        let expected = 1 + earlier + 1 + MAX_B;
        prop_assert_eq!(err.position, Some(expected));
        prop_assert_eq!(err.segment.as_deref(), Some(lines[expected].as_str()));
        prop_assert_eq!(err.context.as_deref(), Some("in group `l`"));
    }

    /// Property: an unbounded repeat accepts any count.
    #[test]
    fn prop_unbounded_repeat_accepts_any_count(count in 1usize..500) {
        let schema = looping_schema(-1);
        let doc = join(&looping_lines(&[count]));

        let result = parse(doc.as_bytes(), &schema).unwrap();
        let instance = &result.groups("l").unwrap()[0];
        let b = instance.segments("b").unwrap();
        prop_assert_eq!(b.len(), count);
        for (j, segment) in b.iter().enumerate() {
            prop_assert_eq!(segment.fields[1].clone(), j.to_string());
        }
    }

    /// Property: parsing is deterministic.
    #[test]
    fn prop_parse_is_deterministic(
        loops in prop::collection::vec(0..=MAX_B, 1..10)
    ) {
        let schema = looping_schema(MAX_B as i64);
        let doc = join(&looping_lines(&loops));

        let first = parse(doc.as_bytes(), &schema).unwrap();
        let second = parse(doc.as_bytes(), &schema).unwrap();
        prop_assert_eq!(first, second);
    }
}
