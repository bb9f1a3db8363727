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

//! Property-based tests for mandatory coverage and optional absence.

use edi_core::{parse, EdiErrorKind, EdiSchema, UnitSchema};
use proptest::prelude::*;

fn chain(len: usize, min: usize) -> EdiSchema {
    let units = (0..len)
        .map(|i| UnitSchema::segment(format!("S{}", i), format!("s{}", i), min, 1))
        .collect();
    EdiSchema::new("chain", units).with_terminator(None)
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(500))]

    /// Property: dropping any mandatory segment from a chain is reported
    /// at the index where it was expected.
    #[test]
    fn prop_missing_mandatory_reported_in_place(
        (len, missing) in (1usize..8).prop_flat_map(|len| (Just(len), 0..len))
    ) {
        let schema = chain(len, 1);
        let doc = (0..len)
            .filter(|i| *i != missing)
            .map(|i| format!("S{}*{}", i, i))
            .collect::<Vec<_>>()
            .join("\n");

        let err = parse(doc.as_bytes(), &schema).unwrap_err();
        prop_assert_eq!(err.kind, EdiErrorKind::MandatoryMissing);
        prop_assert_eq!(err.position, Some(missing));
        let expected_tag = format!("s{}", missing);
        prop_assert!(err.message.contains(&expected_tag), "message: {}", err.message);
    }

    /// Property: any ordered subset of optional segments parses, and only
    /// the present tags appear in the result.
    #[test]
    fn prop_optional_subset_parses(
        present in prop::collection::vec(proptest::bool::ANY, 1..8)
    ) {
        let schema = chain(present.len(), 0);
        let doc = present
            .iter()
            .enumerate()
            .filter(|(_, keep)| **keep)
            .map(|(i, _)| format!("S{}", i))
            .collect::<Vec<_>>()
            .join("\n");

        let result = parse(doc.as_bytes(), &schema);
        prop_assert!(result.is_ok(), "Failed to parse: {:?}", result.err());
        let result = result.unwrap();

        for (i, keep) in present.iter().enumerate() {
            prop_assert_eq!(result.contains(&format!("s{}", i)), *keep);
        }
        prop_assert_eq!(result.len(), present.iter().filter(|k| **k).count());
    }

    /// Property: a segment out of order breaks the chain at its position.
    #[test]
    fn prop_swapped_segments_fail(
        (len, at) in (2usize..8).prop_flat_map(|len| (Just(len), 0..len - 1))
    ) {
        let schema = chain(len, 1);
        let mut order: Vec<usize> = (0..len).collect();
        order.swap(at, at + 1);
        let doc = order
            .iter()
            .map(|i| format!("S{}", i))
            .collect::<Vec<_>>()
            .join("\n");

        let err = parse(doc.as_bytes(), &schema).unwrap_err();
        prop_assert_eq!(err.position, Some(at));
        prop_assert_eq!(err.kind, EdiErrorKind::MandatoryMissing);
    }
}
