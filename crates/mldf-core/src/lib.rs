// Dweve MLDF - Mining Level Data Format
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

//! Core parser and data model for MLDF level files.
//!
//! An MLDF level is a sequence of named, brace-delimited sections
//! (`info{...}`, `tiles{...}`, `script{...}` and friends) in any order,
//! with `#` line comments. This crate turns that text into a typed
//! [`MldfDocument`]:
//!
//! 1. [`preprocess`](mod@preprocess): normalization, limits, comment
//!    blanking (comments never shift line numbers).
//! 2. [`scanner`]: depth-aware section splitting with partial-failure
//!    recovery.
//! 3. [`section`]: per-section semantic parsers.
//! 4. [`parser`]: the `parse` facade assembling the document and the
//!    collected issue list.
//!
//! The [`tiles`] module carries the published tile-code reference used
//! by the validation and analysis crates. Everything here is pure and
//! synchronous: no I/O, no global mutable state, safe to call from
//! multiple threads on different documents.

mod document;
mod error;
mod limits;
pub mod preprocess;
mod parser;
mod scanner;
pub mod section;
pub mod tiles;

pub use document::{MldfDocument, KNOWN_SECTIONS, TOOL_STORE};
pub use error::{IssueSeverity, MldfError, MldfErrorKind, MldfResult};
pub use limits::Limits;
pub use parser::{parse, parse_with_options, ParseOptions, ParseOptionsBuilder, Parsed};
pub use scanner::Section;

// Re-export the section data model at the crate root.
pub use section::entities::{Entity, EntityCoords, Rotation, Vec3};
pub use section::grid::{Grid, GridRow};
pub use section::info::InfoSection;
pub use section::objectives::Objective;
pub use section::resources::ResourceGrids;
pub use section::script::{
    condition_identifiers, EventChain, ScriptCommand, ScriptDocument, ScriptRef, ScriptTrigger,
    ScriptVariable,
};
pub use tiles::{TileCategory, TileDef, TileTable, BLOCK_SIZE, DEFAULT_FLOOR, SOLID_ROCK};
