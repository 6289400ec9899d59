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

//! Main parser for MLDF level documents.
//!
//! `parse` is the facade over preprocessing, section scanning and the
//! per-section parsers. Recoverable problems (a malformed section, an
//! unparsable cell, a bad entity line) are collected into
//! [`Parsed::issues`] and never abort the rest of the document; an
//! editor consumer must be able to show partial results on a
//! partially-broken file. Only structurally unreadable input (empty
//! text, control characters, a blown security limit in preprocessing)
//! returns `Err`.

use crate::document::MldfDocument;
use crate::error::{IssueSeverity, MldfError, MldfResult};
use crate::limits::Limits;
use crate::preprocess::preprocess;
use crate::scanner::{scan, Section};
use crate::section::entities::parse_entities;
use crate::section::grid::parse_grid;
use crate::section::info::parse_info;
use crate::section::objectives::parse_objectives;
use crate::section::resources::parse_resources;
use crate::section::script::parse_script;
use std::collections::BTreeSet;

/// Parsing options.
#[derive(Debug, Clone, Default)]
pub struct ParseOptions {
    /// Security limits.
    pub limits: Limits,
}

impl ParseOptions {
    /// Create a new builder for ParseOptions.
    pub fn builder() -> ParseOptionsBuilder {
        ParseOptionsBuilder::new()
    }
}

/// Builder for ergonomic construction of ParseOptions.
#[derive(Debug, Clone, Default)]
pub struct ParseOptionsBuilder {
    limits: Limits,
}

impl ParseOptionsBuilder {
    /// Create a new builder with default options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the maximum input size in bytes (default: 256MB).
    pub fn max_file_size(mut self, size: usize) -> Self {
        self.limits.max_file_size = size;
        self
    }

    /// Set the maximum line length in bytes (default: 1MB).
    pub fn max_line_length(mut self, length: usize) -> Self {
        self.limits.max_line_length = length;
        self
    }

    /// Set the maximum cells per grid section (default: 16M).
    pub fn max_grid_cells(mut self, cells: usize) -> Self {
        self.limits.max_grid_cells = cells;
        self
    }

    /// Set the maximum number of sections (default: 1,000).
    pub fn max_sections(mut self, count: usize) -> Self {
        self.limits.max_sections = count;
        self
    }

    /// Set the maximum entities per collection (default: 100,000).
    pub fn max_entities(mut self, count: usize) -> Self {
        self.limits.max_entities = count;
        self
    }

    /// Set the maximum script lines (default: 1M).
    pub fn max_script_lines(mut self, count: usize) -> Self {
        self.limits.max_script_lines = count;
        self
    }

    /// Replace the whole limit set.
    pub fn limits(mut self, limits: Limits) -> Self {
        self.limits = limits;
        self
    }

    /// Build the options.
    pub fn build(self) -> ParseOptions {
        ParseOptions { limits: self.limits }
    }
}

/// A parsed document plus the issues collected along the way.
#[derive(Debug, Clone)]
pub struct Parsed {
    /// The assembled document.
    pub document: MldfDocument,
    /// Recoverable issues, in discovery order.
    pub issues: Vec<MldfError>,
}

impl Parsed {
    /// Issues with error severity (data was dropped or defaulted).
    pub fn errors(&self) -> impl Iterator<Item = &MldfError> {
        self.issues
            .iter()
            .filter(|i| i.severity == IssueSeverity::Error)
    }

    /// Issues with warning severity.
    pub fn warnings(&self) -> impl Iterator<Item = &MldfError> {
        self.issues
            .iter()
            .filter(|i| i.severity == IssueSeverity::Warning)
    }

    /// Whether any error-severity issue was collected.
    pub fn has_errors(&self) -> bool {
        self.errors().next().is_some()
    }
}

/// Parse a level document with default options.
pub fn parse(input: &str) -> MldfResult<Parsed> {
    parse_with_options(input, &ParseOptions::default())
}

/// Parse a level document with explicit options.
pub fn parse_with_options(input: &str, options: &ParseOptions) -> MldfResult<Parsed> {
    if input.trim().is_empty() {
        return Err(MldfError::empty("input document is empty"));
    }

    let pre = preprocess(input, &options.limits)?;
    let (sections, mut issues) = scan(&pre, &options.limits);

    let mut document = MldfDocument::default();
    let mut seen: BTreeSet<&str> = BTreeSet::new();

    for section in &sections {
        if !seen.insert(section.name.as_str()) {
            issues.push(
                MldfError::collision(
                    format!("duplicate section '{}' ignored", section.name),
                    section.start_line,
                )
                .with_section(&section.name)
                .warning(),
            );
            continue;
        }
        assemble_section(section, options, &mut document, &mut issues);
    }

    document.sections = sections;
    Ok(Parsed { document, issues })
}

/// Route one section to its parser. Unknown and raw-text sections stay
/// span-only; the unknown-section lint decides what to say about them.
fn assemble_section(
    section: &Section,
    options: &ParseOptions,
    document: &mut MldfDocument,
    issues: &mut Vec<MldfError>,
) {
    match section.name.as_str() {
        "info" => {
            let (info, mut section_issues) = parse_info(section);
            document.info = Some(info);
            issues.append(&mut section_issues);
        }
        "tiles" | "height" | "blocks" => {
            let (grid, mut section_issues) = parse_grid(section, &options.limits);
            match section.name.as_str() {
                "tiles" => document.tiles = Some(grid),
                "height" => document.height = Some(grid),
                _ => document.blocks = Some(grid),
            }
            issues.append(&mut section_issues);
        }
        "resources" => {
            let (resources, mut section_issues) = parse_resources(section, &options.limits);
            document.resources = Some(resources);
            issues.append(&mut section_issues);
        }
        "objectives" => {
            let (objectives, mut section_issues) = parse_objectives(section);
            document.objectives = Some(objectives);
            issues.append(&mut section_issues);
        }
        "buildings" | "vehicles" | "creatures" | "miners" => {
            let (entities, mut section_issues) = parse_entities(section, &options.limits);
            match section.name.as_str() {
                "buildings" => document.buildings = Some(entities),
                "vehicles" => document.vehicles = Some(entities),
                "creatures" => document.creatures = Some(entities),
                _ => document.miners = Some(entities),
            }
            issues.append(&mut section_issues);
        }
        "script" => {
            let (script, mut section_issues) = parse_script(section, &options.limits);
            document.script = Some(script);
            issues.append(&mut section_issues);
        }
        _ => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::MldfErrorKind;

    const MINIMAL: &str = "info{\nrowcount:3;\ncolcount:3;\n}\ntiles{\n38,38,38,\n38,1,38,\n38,38,38,\n}";

    // ==================== Facade tests ====================

    #[test]
    fn test_parse_minimal_document() {
        let parsed = parse(MINIMAL).unwrap();
        assert!(parsed.issues.is_empty());
        let doc = &parsed.document;
        assert_eq!(doc.dimensions(), Some((3, 3)));
        assert_eq!(doc.tile_at(1, 1), Some(1));
        assert_eq!(doc.sections.len(), 2);
    }

    #[test]
    fn test_parse_empty_input_is_hard_failure() {
        let err = parse("").unwrap_err();
        assert_eq!(err.kind, MldfErrorKind::Empty);
        let err = parse("   \n\t\n").unwrap_err();
        assert_eq!(err.kind, MldfErrorKind::Empty);
    }

    #[test]
    fn test_parse_comment_only_input_is_empty() {
        // Comments blank to whitespace, but the raw text is non-empty and
        // simply yields a document with no sections.
        let parsed = parse("# nothing here").unwrap();
        assert!(parsed.document.sections.is_empty());
    }

    #[test]
    fn test_absent_sections_stay_none() {
        let parsed = parse(MINIMAL).unwrap();
        let doc = &parsed.document;
        assert!(doc.height.is_none());
        assert!(doc.resources.is_none());
        assert!(doc.objectives.is_none());
        assert!(doc.buildings.is_none());
        assert!(doc.script.is_none());
    }

    #[test]
    fn test_parse_full_document() {
        let input = "\
info{\nrowcount:2;\ncolcount:2;\n}\n\
tiles{\n1,38,\n38,1,\n}\n\
height{\n0,0,\n0,0,\n}\n\
resources{\ncrystals:\n0,1,\n0,0,\n}\n\
objectives{\nresources: 1,0,0\n}\n\
buildings{\nBuildingToolStore_C,Translation: X=0.0 Y=0.0 Z=0.0 Rotation: P=0.0 Y=0.0 R=0.0 Scale X=1.0 Y=1.0 Z=1.0,ID=base\n}\n\
script{\nint Got=0\nWin::\nmsg:done;\n}";
        let parsed = parse(input).unwrap();
        assert!(parsed.issues.is_empty(), "issues: {:?}", parsed.issues);
        let doc = &parsed.document;
        assert!(doc.height.is_some());
        assert!(doc.resources.is_some());
        assert_eq!(doc.objectives.as_ref().unwrap().len(), 1);
        assert_eq!(doc.tool_store().unwrap().id.as_deref(), Some("base"));
        assert_eq!(doc.script.as_ref().unwrap().chains.len(), 1);
    }

    // ==================== Partial failure tests ====================

    #[test]
    fn test_malformed_section_others_still_parse() {
        let input = "broken{\ninfo{\nrowcount:3;\ncolcount:3;\n}\ntiles{\n38,1,\n}";
        let parsed = parse(input).unwrap();
        assert_eq!(
            parsed
                .issues
                .iter()
                .filter(|i| i.kind == MldfErrorKind::Section)
                .count(),
            1
        );
        assert_eq!(parsed.document.dimensions(), Some((3, 3)));
        assert!(parsed.document.tiles.is_some());
    }

    #[test]
    fn test_bad_cell_does_not_abort_document() {
        let input = "info{\nrowcount:1;\ncolcount:2;\n}\ntiles{\n38,oops,\n}";
        let parsed = parse(input).unwrap();
        assert!(parsed.has_errors());
        assert_eq!(parsed.document.tiles.as_ref().unwrap().rows[0].values, vec![38]);
    }

    #[test]
    fn test_duplicate_section_first_wins() {
        let input = "info{\nrowcount:3;\n}\ninfo{\nrowcount:9;\n}";
        let parsed = parse(input).unwrap();
        assert_eq!(parsed.document.info.as_ref().unwrap().rowcount, Some(3));
        let dup: Vec<_> = parsed
            .issues
            .iter()
            .filter(|i| i.kind == MldfErrorKind::Collision)
            .collect();
        assert_eq!(dup.len(), 1);
        assert_eq!(dup[0].severity, IssueSeverity::Warning);
        // Both spans remain addressable.
        assert_eq!(
            parsed
                .document
                .sections
                .iter()
                .filter(|s| s.name == "info")
                .count(),
            2
        );
    }

    // ==================== Order independence tests ====================

    #[test]
    fn test_section_order_does_not_change_content() {
        let forward = parse(MINIMAL).unwrap().document;
        let reversed = parse(
            "tiles{\n38,38,38,\n38,1,38,\n38,38,38,\n}\ninfo{\nrowcount:3;\ncolcount:3;\n}",
        )
        .unwrap()
        .document;
        assert_eq!(forward.info, reversed.info);
        assert_eq!(forward.tiles, reversed.tiles);
        // Only the spans differ.
        assert_ne!(
            forward.section("tiles").unwrap().start_line,
            reversed.section("tiles").unwrap().start_line
        );
    }

    // ==================== Issue accessor tests ====================

    #[test]
    fn test_errors_and_warnings_split() {
        let input = "info{\nrowcount:x;\n}\nobjectives{\nescort:1,1\n}";
        let parsed = parse(input).unwrap();
        assert_eq!(parsed.errors().count(), 1);
        assert_eq!(parsed.warnings().count(), 1);
        assert!(parsed.has_errors());
    }

    // ==================== Options tests ====================

    #[test]
    fn test_options_builder() {
        let options = ParseOptions::builder()
            .max_grid_cells(10)
            .max_sections(5)
            .build();
        assert_eq!(options.limits.max_grid_cells, 10);
        assert_eq!(options.limits.max_sections, 5);
    }

    #[test]
    fn test_options_limit_enforced_through_facade() {
        let options = ParseOptions::builder().max_file_size(8).build();
        let err = parse_with_options(MINIMAL, &options).unwrap_err();
        assert_eq!(err.kind, MldfErrorKind::Security);
    }

    #[test]
    fn test_section_at_line_round_trip() {
        let parsed = parse(MINIMAL).unwrap();
        let doc = &parsed.document;
        let info = doc.section("info").unwrap();
        for line in info.start_line..=info.end_line {
            assert_eq!(doc.section_at_line(line).unwrap().name, "info");
        }
    }
}
