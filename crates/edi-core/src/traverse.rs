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

//! Result traversal for consumers of a matched document.
//!
//! The visitor pattern separates the recursive walk over a [`GroupResult`]
//! from what a consumer does with each element. Tags are visited in map
//! order, depth-first; repeated slots visit their occurrences in input
//! order.
//!
//! # Example
//!
//! ```text
//! use edi_core::traverse::{traverse, GroupVisitor, VisitorContext};
//!
//! struct Printer;
//!
//! impl GroupVisitor for Printer {
//!     type Error = std::convert::Infallible;
//!
//!     fn visit_segment(&mut self, tag: &str, segment: &Segment, ctx: &VisitorContext) -> Result<(), Self::Error> {
//!         println!("{}{} = {}", "  ".repeat(ctx.depth), tag, segment.code);
//!         Ok(())
//!     }
//! }
//!
//! traverse(&result, &mut Printer)?;
//! ```

use crate::result::{GroupResult, Slot};
use crate::segment::Segment;
use std::collections::BTreeMap;

/// Context provided to visitors during traversal.
#[derive(Debug, Clone, Default)]
pub struct VisitorContext {
    /// Current nesting depth (0 = root level).
    pub depth: usize,
    /// Path from root to the current group (`tag` or `tag[i]` per level).
    pub path: Vec<String>,
}

impl VisitorContext {
    /// Create a new context for the root level.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a child context one level deeper.
    pub fn child(&self, tag: &str, index: Option<usize>) -> Self {
        let mut path = self.path.clone();
        path.push(match index {
            Some(i) => format!("{}[{}]", tag, i),
            None => tag.to_string(),
        });
        Self {
            depth: self.depth + 1,
            path,
        }
    }

    /// Get the current path as a string (for diagnostics).
    pub fn path_string(&self) -> String {
        if self.path.is_empty() {
            "root".to_string()
        } else {
            self.path.join(".")
        }
    }
}

/// Trait for visiting elements of a matched document.
pub trait GroupVisitor {
    /// Error type returned by visitor methods.
    type Error;

    /// Called for each matched segment.
    fn visit_segment(
        &mut self,
        tag: &str,
        segment: &Segment,
        ctx: &VisitorContext,
    ) -> Result<(), Self::Error>;

    /// Called before a nested group's contents. `index` is set for
    /// occurrences of a repeatable group.
    fn begin_group(
        &mut self,
        _tag: &str,
        _index: Option<usize>,
        _ctx: &VisitorContext,
    ) -> Result<(), Self::Error> {
        Ok(())
    }

    /// Called after a nested group's contents.
    fn end_group(
        &mut self,
        _tag: &str,
        _index: Option<usize>,
        _ctx: &VisitorContext,
    ) -> Result<(), Self::Error> {
        Ok(())
    }
}

/// Traverse a matched document, calling visitor methods for each element.
pub fn traverse<V: GroupVisitor>(result: &GroupResult, visitor: &mut V) -> Result<(), V::Error> {
    traverse_group(result, visitor, &VisitorContext::new())
}

fn traverse_group<V: GroupVisitor>(
    group: &GroupResult,
    visitor: &mut V,
    ctx: &VisitorContext,
) -> Result<(), V::Error> {
    for (tag, slot) in group.iter() {
        match slot {
            Slot::One(segment) => visitor.visit_segment(tag, segment, ctx)?,
            Slot::Many(segments) => {
                for segment in segments {
                    visitor.visit_segment(tag, segment, ctx)?;
                }
            }
            Slot::OneGroup(nested) => {
                visitor.begin_group(tag, None, ctx)?;
                traverse_group(nested, visitor, &ctx.child(tag, None))?;
                visitor.end_group(tag, None, ctx)?;
            }
            Slot::ManyGroup(nested) => {
                for (i, instance) in nested.iter().enumerate() {
                    visitor.begin_group(tag, Some(i), ctx)?;
                    traverse_group(instance, visitor, &ctx.child(tag, Some(i)))?;
                    visitor.end_group(tag, Some(i), ctx)?;
                }
            }
        }
    }
    Ok(())
}

/// Statistics collector visitor for testing and analysis.
#[derive(Debug, Default)]
pub struct StatsCollector {
    /// Number of segments visited.
    pub segment_count: usize,
    /// Number of group instances visited.
    pub group_count: usize,
    /// Maximum depth reached.
    pub max_depth: usize,
    /// Segments per code.
    pub codes: BTreeMap<String, usize>,
}

impl GroupVisitor for StatsCollector {
    type Error = std::convert::Infallible;

    fn visit_segment(
        &mut self,
        _tag: &str,
        segment: &Segment,
        ctx: &VisitorContext,
    ) -> Result<(), Self::Error> {
        self.segment_count += 1;
        self.max_depth = self.max_depth.max(ctx.depth);
        *self.codes.entry(segment.code.clone()).or_default() += 1;
        Ok(())
    }

    fn begin_group(
        &mut self,
        _tag: &str,
        _index: Option<usize>,
        ctx: &VisitorContext,
    ) -> Result<(), Self::Error> {
        self.group_count += 1;
        self.max_depth = self.max_depth.max(ctx.depth + 1);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::{EdiSchema, UnitSchema};
    use crate::parse;

    fn invoice() -> EdiSchema {
        EdiSchema::new(
            "810",
            vec![
                UnitSchema::segment("ST", "st", 1, 1),
                UnitSchema::group(
                    "it1_loop",
                    1,
                    -1,
                    vec![
                        UnitSchema::segment("IT1", "it1", 1, 1),
                        UnitSchema::group(
                            "sac_loop",
                            0,
                            1,
                            vec![UnitSchema::segment("SAC", "sac", 1, 1)],
                        ),
                    ],
                ),
                UnitSchema::segment("SE", "se", 1, 1),
            ],
        )
    }

    #[test]
    fn test_traverse_empty_result() {
        let mut stats = StatsCollector::default();
        traverse(&GroupResult::new(), &mut stats).unwrap();
        assert_eq!(stats.segment_count, 0);
        assert_eq!(stats.group_count, 0);
    }

    #[test]
    fn test_traverse_counts() {
        let result = parse(b"ST*810~IT1*1~SAC*A~IT1*2~SE*5~", &invoice()).unwrap();
        let mut stats = StatsCollector::default();
        traverse(&result, &mut stats).unwrap();

        assert_eq!(stats.segment_count, 5);
        assert_eq!(stats.group_count, 3);
        assert_eq!(stats.max_depth, 2);
        assert_eq!(stats.codes.get("IT1"), Some(&2));
    }

    #[test]
    fn test_visitor_context_path() {
        struct PathCollector {
            paths: Vec<String>,
        }

        impl GroupVisitor for PathCollector {
            type Error = std::convert::Infallible;

            fn visit_segment(&mut self, tag: &str, _segment: &Segment, ctx: &VisitorContext) -> Result<(), Self::Error> {
                self.paths.push(format!("{}:{}", ctx.path_string(), tag));
                Ok(())
            }
        }

        let result = parse(b"ST*810~IT1*1~SAC*A~SE*3~", &invoice()).unwrap();
        let mut collector = PathCollector { paths: Vec::new() };
        traverse(&result, &mut collector).unwrap();

        assert!(collector.paths.contains(&"root:st".to_string()));
        assert!(collector.paths.contains(&"it1_loop[0]:it1".to_string()));
        assert!(collector.paths.contains(&"it1_loop[0].sac_loop:sac".to_string()));
    }

    #[test]
    fn test_visitor_error_stops_traversal() {
        struct FailOnSac;

        impl GroupVisitor for FailOnSac {
            type Error = String;

            fn visit_segment(&mut self, _tag: &str, segment: &Segment, _ctx: &VisitorContext) -> Result<(), Self::Error> {
                if segment.code == "SAC" {
                    return Err("sac not allowed".to_string());
                }
                Ok(())
            }
        }

        let result = parse(b"ST*810~IT1*1~SAC*A~SE*3~", &invoice()).unwrap();
        assert_eq!(traverse(&result, &mut FailOnSac), Err("sac not allowed".to_string()));
    }
}
