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

//! # MLDF - Mining Level Data Format
//!
//! Toolchain for the section-based level files of the mining simulation:
//! parsing, structural validation, reachability analysis and quick
//! fixes, with position-accurate diagnostics throughout.
//!
//! ## Quick Start
//!
//! ```rust
//! use mldf::{analyze, parse, validate, AnalyzeOptions};
//!
//! let source = r#"
//! info{
//! rowcount:3;
//! colcount:3;
//! }
//! tiles{
//! 38,38,38,
//! 38,1,38,
//! 38,38,38,
//! }
//! "#;
//!
//! // Parse; recoverable problems land in `parsed.issues`.
//! let parsed = parse(source).expect("readable input");
//!
//! // Validate; this map has no Tool Store, so one error comes back.
//! let diagnostics = validate(&parsed.document);
//! assert_eq!(diagnostics.len(), 1);
//!
//! // Analyze reachability from the center tile.
//! let result = analyze(
//!     &parsed.document,
//!     &AnalyzeOptions::walking().from_origin((1, 1)),
//! );
//! assert_eq!(result.reachable_floor, 1);
//! ```
//!
//! ## Crates behind this facade
//!
//! - [`mldf_core`]: preprocessing, section scanning, section parsers,
//!   document model, tile table.
//! - [`mldf_lint`]: rule-based structural validation.
//! - [`mldf_analysis`]: BFS reachability, isolated regions, choke
//!   points.
//! - [`mldf_fix`]: quick-fix proposals for diagnostics.

// Re-export core types
pub use mldf_core::{
    condition_identifiers, parse, parse_with_options, Entity, EntityCoords, EventChain, Grid,
    GridRow, InfoSection, IssueSeverity, Limits, MldfDocument, MldfError, MldfErrorKind,
    MldfResult, Objective, ParseOptions, ParseOptionsBuilder, Parsed, ResourceGrids, Rotation,
    ScriptCommand, ScriptDocument, ScriptRef, ScriptTrigger, ScriptVariable, Section,
    TileCategory, TileDef, TileTable, Vec3, BLOCK_SIZE, DEFAULT_FLOOR, KNOWN_SECTIONS,
    SOLID_ROCK, TOOL_STORE,
};

// Re-export validation
pub use mldf_lint::{
    default_rules, validate, validate_with_config, Diagnostic, DiagnosticKind, LintConfig,
    LintContext, LintRule, LintRunner, RuleConfig, Severity,
};

// Re-export analysis
pub use mldf_analysis::{analyze, analyze_with_table, AnalyzeOptions, ReachabilityResult};

// Re-export fixes
pub use mldf_fix::propose_fix;
