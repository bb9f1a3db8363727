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

//! Core parser and data model for schema-driven EDI documents.
//!
//! An interchange is a flat sequence of delimited segments. This crate
//! turns that sequence into a [`GroupResult`] tree by walking an
//! [`EdiSchema`] of segment and segment-group definitions, enforcing
//! `min_occurs`/`max_occurs` at every level.
//!
//! # Pipeline
//!
//! - [`preprocess`]: split raw bytes into segments
//! - [`context`]: the shared raw-segment cursor
//! - [`matcher`]: the recursive segment-group matcher
//! - [`segment`]: the field-level [`SegmentReader`] seam
//! - [`traverse`]: visitor-based walks over the result
//!
//! ```text
//! use edi_core::{parse, EdiSchema, UnitSchema};
//!
//! let schema = EdiSchema::new("850", vec![
//!     UnitSchema::segment("ST", "st", 1, 1),
//!     UnitSchema::group("po1_loop", 1, -1, vec![
//!         UnitSchema::segment("PO1", "po1", 1, 1),
//!     ]),
//!     UnitSchema::segment("SE", "se", 1, 1),
//! ]);
//!
//! let result = parse(b"ST*850*0001~PO1*1*10~SE*3*0001~", &schema)?;
//! assert_eq!(result.groups("po1_loop").unwrap().len(), 1);
//! ```

pub mod context;
mod error;
mod limits;
pub mod matcher;
mod parser;
pub mod preprocess;
mod result;
mod schema;
pub mod segment;
pub mod traverse;

pub use context::ParseContext;
pub use error::{EdiError, EdiErrorKind, EdiResult};
pub use limits::Limits;
pub use matcher::read_group;
pub use parser::{
    parse, parse_segments, parse_with_options, parse_with_reader, ParseOptions,
    ParseOptionsBuilder,
};
pub use preprocess::{split_segments, RawSegments};
pub use result::{GroupResult, Slot};
pub use schema::{EdiSchema, GroupSchema, MaxOccurs, SegmentSchema, UnitSchema};
pub use segment::{PlainSegmentReader, Segment, SegmentReader};
pub use traverse::{traverse, GroupVisitor, StatsCollector, VisitorContext};
