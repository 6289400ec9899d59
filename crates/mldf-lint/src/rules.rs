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

//! Validation rules.
//!
//! Every rule is independent: the set of diagnostics produced never
//! depends on the order rules run in. Rules read the document and the
//! injected tile table; nothing here mutates either.

use crate::diagnostic::{Diagnostic, DiagnosticKind};
use mldf_core::{
    condition_identifiers, Grid, MldfDocument, Objective, TileTable, KNOWN_SECTIONS,
};
use std::collections::{BTreeMap, BTreeSet, HashSet};

/// Configuration for a single rule.
#[derive(Debug, Clone)]
pub struct RuleConfig {
    /// Whether the rule is enabled.
    pub enabled: bool,
    /// Whether to escalate warnings from this rule to errors.
    pub error: bool,
}

impl Default for RuleConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            error: false,
        }
    }
}

/// Read-only inputs shared by every rule.
pub struct LintContext<'a> {
    /// Tile-code reference table.
    pub tiles: &'a TileTable,
}

impl<'a> LintContext<'a> {
    /// Context over the published game tile table.
    pub fn game_default() -> Self {
        Self {
            tiles: TileTable::game_default(),
        }
    }

    /// Context over an injected table.
    pub fn with_table(tiles: &'a TileTable) -> Self {
        Self { tiles }
    }
}

/// Trait for validation rules.
pub trait LintRule: Send + Sync {
    /// Rule identifier.
    fn id(&self) -> &str;

    /// Rule description.
    fn description(&self) -> &str;

    /// Run the rule on a document.
    fn check(&self, doc: &MldfDocument, context: &LintContext<'_>) -> Vec<Diagnostic>;
}

/// The default rule set, in presentation order.
pub fn default_rules() -> Vec<Box<dyn LintRule>> {
    vec![
        Box::new(RequiredSectionsRule),
        Box::new(GridDimensionsRule),
        Box::new(TileCodesRule),
        Box::new(HeightRangeRule),
        Box::new(ToolStoreRule),
        Box::new(ObjectiveBoundsRule),
        Box::new(ObjectiveVariablesRule),
        Box::new(EntityIdCollisionRule),
        Box::new(UnknownSectionRule),
        Box::new(ScriptReferenceRule),
    ]
}

/// Rule: required sections must be present.
pub struct RequiredSectionsRule;

impl LintRule for RequiredSectionsRule {
    fn id(&self) -> &str {
        "required-sections"
    }
    fn description(&self) -> &str {
        "Require the info and tiles sections"
    }

    fn check(&self, doc: &MldfDocument, _context: &LintContext<'_>) -> Vec<Diagnostic> {
        let mut diagnostics = Vec::new();
        if doc.info.is_none() {
            diagnostics.push(missing_section(self.id(), "info"));
        }
        if doc.tiles.is_none() {
            diagnostics.push(missing_section(self.id(), "tiles"));
        }
        diagnostics
    }
}

fn missing_section(rule_id: &str, name: &str) -> Diagnostic {
    Diagnostic::error(
        DiagnosticKind::MissingSection {
            name: name.to_string(),
        },
        format!("required section '{}' is missing", name),
        rule_id,
    )
    .with_line(0)
}

/// Rule: grid dimensions must match the declared rowcount/colcount.
///
/// Each offending row gets its own diagnostic so an editor can offer a
/// point-fix per row instead of one vague message for the section.
pub struct GridDimensionsRule;

impl LintRule for GridDimensionsRule {
    fn id(&self) -> &str {
        "grid-dimensions"
    }
    fn description(&self) -> &str {
        "Check tiles/height grids against info rowcount/colcount"
    }

    fn check(&self, doc: &MldfDocument, _context: &LintContext<'_>) -> Vec<Diagnostic> {
        let Some((rows, cols)) = doc.dimensions() else {
            return Vec::new();
        };
        let mut diagnostics = Vec::new();
        for (name, grid) in [("tiles", &doc.tiles), ("height", &doc.height)] {
            let Some(grid) = grid.as_ref() else { continue };
            check_grid_dimensions(self.id(), name, grid, rows, cols, doc, &mut diagnostics);
        }
        diagnostics
    }
}

fn check_grid_dimensions(
    rule_id: &str,
    name: &str,
    grid: &Grid,
    rows: usize,
    cols: usize,
    doc: &MldfDocument,
    diagnostics: &mut Vec<Diagnostic>,
) {
    if grid.row_count() != rows {
        let line = doc.section(name).map(|s| s.start_line).unwrap_or(0);
        diagnostics.push(
            Diagnostic::error(
                DiagnosticKind::GridRowCount {
                    section: name.to_string(),
                    expected: rows,
                    actual: grid.row_count(),
                },
                format!(
                    "{} grid has {} rows, info declares rowcount:{}",
                    name,
                    grid.row_count(),
                    rows
                ),
                rule_id,
            )
            .with_line(line)
            .with_section(name),
        );
    }
    for (index, row) in grid.rows.iter().enumerate() {
        if row.values.len() != cols {
            diagnostics.push(
                Diagnostic::error(
                    DiagnosticKind::GridRowLength {
                        section: name.to_string(),
                        row: index,
                        expected: cols,
                        actual: row.values.len(),
                    },
                    format!(
                        "{} row {} has {} values, info declares colcount:{}",
                        name,
                        index + 1,
                        row.values.len(),
                        cols
                    ),
                    rule_id,
                )
                .with_line(row.line)
                .with_section(name),
            );
        }
    }
}

/// Rule: every tile cell must hold a known code.
pub struct TileCodesRule;

impl LintRule for TileCodesRule {
    fn id(&self) -> &str {
        "tile-codes"
    }
    fn description(&self) -> &str {
        "Check tile cells against the known-code table"
    }

    fn check(&self, doc: &MldfDocument, context: &LintContext<'_>) -> Vec<Diagnostic> {
        let Some(grid) = doc.tiles.as_ref() else {
            return Vec::new();
        };
        let mut diagnostics = Vec::new();
        for (row, col, code) in grid.cells() {
            if !context.tiles.is_valid(code) {
                diagnostics.push(
                    Diagnostic::error(
                        DiagnosticKind::InvalidTileCode { row, col, code },
                        format!("unknown tile code {} at ({}, {})", code, row, col),
                        self.id(),
                    )
                    .with_line(grid.rows[row].line)
                    .with_section("tiles"),
                );
            }
        }
        diagnostics
    }
}

/// Rule: height values stay inside the 0-15 elevation range.
pub struct HeightRangeRule;

impl LintRule for HeightRangeRule {
    fn id(&self) -> &str {
        "height-range"
    }
    fn description(&self) -> &str {
        "Check height cells stay within 0-15"
    }

    fn check(&self, doc: &MldfDocument, _context: &LintContext<'_>) -> Vec<Diagnostic> {
        let Some(grid) = doc.height.as_ref() else {
            return Vec::new();
        };
        let mut diagnostics = Vec::new();
        for (row, col, value) in grid.cells() {
            if value > 15 {
                diagnostics.push(
                    Diagnostic::warning(
                        DiagnosticKind::Custom("height-range".to_string()),
                        format!("height value {} at ({}, {}) exceeds 15", value, row, col),
                        self.id(),
                    )
                    .with_line(grid.rows[row].line)
                    .with_section("height"),
                );
            }
        }
        diagnostics
    }
}

/// Rule: a playable map needs a Tool Store.
///
/// The single hard playability requirement enforced structurally; every
/// other building is optional.
pub struct ToolStoreRule;

impl LintRule for ToolStoreRule {
    fn id(&self) -> &str {
        "tool-store"
    }
    fn description(&self) -> &str {
        "Require a starting Tool Store building"
    }

    fn check(&self, doc: &MldfDocument, _context: &LintContext<'_>) -> Vec<Diagnostic> {
        if doc.tool_store().is_some() {
            return Vec::new();
        }
        let line = doc.section("buildings").map(|s| s.start_line).unwrap_or(0);
        vec![Diagnostic::error(
            DiagnosticKind::MissingToolStore,
            "no Tool Store building placed; the map cannot be played",
            self.id(),
        )
        .with_line(line)]
    }
}

/// Rule: objectives must reference tiles inside the grid.
pub struct ObjectiveBoundsRule;

impl LintRule for ObjectiveBoundsRule {
    fn id(&self) -> &str {
        "objective-bounds"
    }
    fn description(&self) -> &str {
        "Check objective tile coordinates against the grid"
    }

    fn check(&self, doc: &MldfDocument, _context: &LintContext<'_>) -> Vec<Diagnostic> {
        let Some(objectives) = doc.objectives.as_ref() else {
            return Vec::new();
        };
        // Declared dimensions take precedence; fall back to the actual
        // grid extent when info is incomplete.
        let dims = doc.dimensions().or_else(|| {
            doc.tiles
                .as_ref()
                .map(|g| (g.row_count(), g.max_width()))
        });
        let Some((rows, cols)) = dims else {
            return Vec::new();
        };
        let mut diagnostics = Vec::new();
        for objective in objectives {
            if let Some((row, col)) = objective.tile() {
                if row >= rows || col >= cols {
                    diagnostics.push(
                        Diagnostic::error(
                            DiagnosticKind::ObjectiveOutOfBounds { row, col },
                            format!(
                                "objective references tile ({}, {}) outside the {}x{} grid",
                                row, col, rows, cols
                            ),
                            self.id(),
                        )
                        .with_line(objective.line())
                        .with_section("objectives"),
                    );
                }
            }
        }
        diagnostics
    }
}

/// Names the script runtime provides without declaration.
const BUILTIN_ATOMS: &[&str] = &[
    "crystals", "ore", "studs", "air", "time", "miners", "vehicles", "buildings", "true", "false",
    "and", "or", "not",
];

/// Rule: variable objectives must reference declared script variables.
pub struct ObjectiveVariablesRule;

impl LintRule for ObjectiveVariablesRule {
    fn id(&self) -> &str {
        "objective-variables"
    }
    fn description(&self) -> &str {
        "Check variable objectives against script declarations"
    }

    fn check(&self, doc: &MldfDocument, _context: &LintContext<'_>) -> Vec<Diagnostic> {
        let Some(objectives) = doc.objectives.as_ref() else {
            return Vec::new();
        };
        let declared: HashSet<&str> = doc
            .script
            .as_ref()
            .map(|s| s.variables.iter().map(|v| v.name.as_str()).collect())
            .unwrap_or_default();

        let mut diagnostics = Vec::new();
        for objective in objectives {
            let Objective::Variable { condition, line, .. } = objective else {
                continue;
            };
            for name in condition_identifiers(condition) {
                if BUILTIN_ATOMS.contains(&name.as_str()) || declared.contains(name.as_str()) {
                    continue;
                }
                diagnostics.push(
                    Diagnostic::warning(
                        DiagnosticKind::UndeclaredVariable { name: name.clone() },
                        format!("objective references undeclared script variable '{}'", name),
                        self.id(),
                    )
                    .with_line(*line)
                    .with_section("objectives"),
                );
            }
        }
        diagnostics
    }
}

/// Rule: entity IDs must be unique within their collection.
pub struct EntityIdCollisionRule;

impl LintRule for EntityIdCollisionRule {
    fn id(&self) -> &str {
        "entity-ids"
    }
    fn description(&self) -> &str {
        "Check ID= uniqueness within each entity collection"
    }

    fn check(&self, doc: &MldfDocument, _context: &LintContext<'_>) -> Vec<Diagnostic> {
        let mut diagnostics = Vec::new();
        for (collection, entities) in doc.entity_collections() {
            let mut seen: BTreeSet<&str> = BTreeSet::new();
            for entity in entities {
                let Some(id) = entity.id.as_deref() else { continue };
                if !seen.insert(id) {
                    diagnostics.push(
                        Diagnostic::error(
                            DiagnosticKind::IdCollision {
                                collection: collection.to_string(),
                                id: id.to_string(),
                            },
                            format!("ID collision: '{}' is declared more than once in {}", id, collection),
                            self.id(),
                        )
                        .with_line(entity.line)
                        .with_section(collection),
                    );
                }
            }
        }
        diagnostics
    }
}

/// Rule: flag sections from unknown format revisions.
///
/// A warning, never an error: files written by a newer editor must stay
/// loadable.
pub struct UnknownSectionRule;

impl LintRule for UnknownSectionRule {
    fn id(&self) -> &str {
        "unknown-sections"
    }
    fn description(&self) -> &str {
        "Warn about unrecognized top-level section names"
    }

    fn check(&self, doc: &MldfDocument, _context: &LintContext<'_>) -> Vec<Diagnostic> {
        let mut diagnostics = Vec::new();
        for section in &doc.sections {
            if !KNOWN_SECTIONS.contains(&section.name.as_str()) {
                diagnostics.push(
                    Diagnostic::warning(
                        DiagnosticKind::UnknownSection {
                            name: section.name.clone(),
                        },
                        format!("unknown section '{}'", section.name),
                        self.id(),
                    )
                    .with_line(section.start_line)
                    .with_section(section.name.clone()),
                );
            }
        }
        diagnostics
    }
}

/// Rule: script event and variable references must resolve.
pub struct ScriptReferenceRule;

impl LintRule for ScriptReferenceRule {
    fn id(&self) -> &str {
        "script-refs"
    }
    fn description(&self) -> &str {
        "Check event-chain and variable references in the script"
    }

    fn check(&self, doc: &MldfDocument, _context: &LintContext<'_>) -> Vec<Diagnostic> {
        let Some(script) = doc.script.as_ref() else {
            return Vec::new();
        };
        let mut diagnostics = Vec::new();

        // Duplicate chain declarations.
        let mut chain_names: BTreeSet<&str> = BTreeSet::new();
        for chain in &script.chains {
            if !chain_names.insert(chain.name.as_str()) {
                diagnostics.push(
                    Diagnostic::error(
                        DiagnosticKind::DuplicateEvent {
                            name: chain.name.clone(),
                        },
                        format!("event chain '{}' is declared more than once", chain.name),
                        self.id(),
                    )
                    .with_line(chain.line)
                    .with_section("script"),
                );
            }
        }

        // Unresolved event references.
        for event_ref in &script.event_refs {
            if !chain_names.contains(event_ref.name.as_str()) {
                diagnostics.push(
                    Diagnostic::error(
                        DiagnosticKind::UndeclaredEvent {
                            name: event_ref.name.clone(),
                        },
                        format!("reference to undeclared event chain '{}'", event_ref.name),
                        self.id(),
                    )
                    .with_line(event_ref.line)
                    .with_section("script"),
                );
            }
        }

        // Variables used before their declaration line. Names never
        // declared at all are left to the runtime's builtin atoms.
        let declared: BTreeMap<&str, usize> = script
            .variables
            .iter()
            .map(|v| (v.name.as_str(), v.line))
            .collect();
        for var_ref in &script.var_refs {
            if let Some(&decl_line) = declared.get(var_ref.name.as_str()) {
                if var_ref.line < decl_line {
                    diagnostics.push(
                        Diagnostic::warning(
                            DiagnosticKind::UseBeforeDeclaration {
                                name: var_ref.name.clone(),
                            },
                            format!(
                                "variable '{}' is used before its declaration on line {}",
                                var_ref.name, decl_line
                            ),
                            self.id(),
                        )
                        .with_line(var_ref.line)
                        .with_section("script"),
                    );
                }
            }
        }

        diagnostics
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mldf_core::parse;

    fn doc_of(input: &str) -> MldfDocument {
        parse(input).unwrap().document
    }

    fn run_rule(rule: &dyn LintRule, doc: &MldfDocument) -> Vec<Diagnostic> {
        rule.check(doc, &LintContext::game_default())
    }

    const MINIMAL: &str =
        "info{\nrowcount:3;\ncolcount:3;\n}\ntiles{\n38,38,38,\n38,1,38,\n38,38,38,\n}";

    const TOOL_STORE_LINE: &str = "BuildingToolStore_C,Translation: X=450.0 Y=450.0 Z=0.0 Rotation: P=0.0 Y=0.0 R=0.0 Scale X=1.0 Y=1.0 Z=1.0";

    // ==================== RequiredSectionsRule ====================

    #[test]
    fn test_missing_info_and_tiles() {
        let doc = doc_of("objectives{\nresources: 1,0,0\n}");
        let diagnostics = run_rule(&RequiredSectionsRule, &doc);
        assert_eq!(diagnostics.len(), 2);
        assert!(diagnostics.iter().all(|d| d.severity() == crate::Severity::Error));
    }

    #[test]
    fn test_required_sections_present() {
        let doc = doc_of(MINIMAL);
        assert!(run_rule(&RequiredSectionsRule, &doc).is_empty());
    }

    // ==================== GridDimensionsRule ====================

    #[test]
    fn test_ragged_row_one_error_at_row() {
        let doc = doc_of("info{\nrowcount:3;\ncolcount:3;\n}\ntiles{\n38,38,38,\n38,1,\n38,38,38,\n}");
        let diagnostics = run_rule(&GridDimensionsRule, &doc);
        assert_eq!(diagnostics.len(), 1);
        let diag = &diagnostics[0];
        assert!(matches!(
            diag.kind(),
            DiagnosticKind::GridRowLength { row: 1, expected: 3, actual: 2, .. }
        ));
        // Row 2 of the grid sits on document line 6.
        assert_eq!(diag.line(), Some(6));
    }

    #[test]
    fn test_row_count_mismatch() {
        let doc = doc_of("info{\nrowcount:3;\ncolcount:2;\n}\ntiles{\n38,38,\n38,38,\n}");
        let diagnostics = run_rule(&GridDimensionsRule, &doc);
        assert_eq!(diagnostics.len(), 1);
        assert!(matches!(
            diagnostics[0].kind(),
            DiagnosticKind::GridRowCount { expected: 3, actual: 2, .. }
        ));
    }

    #[test]
    fn test_every_bad_row_reported() {
        let doc = doc_of("info{\nrowcount:2;\ncolcount:3;\n}\ntiles{\n38,\n38,38,\n}");
        let diagnostics = run_rule(&GridDimensionsRule, &doc);
        let row_errors = diagnostics
            .iter()
            .filter(|d| matches!(d.kind(), DiagnosticKind::GridRowLength { .. }))
            .count();
        assert_eq!(row_errors, 2);
    }

    #[test]
    fn test_height_checked_too() {
        let doc = doc_of("info{\nrowcount:1;\ncolcount:2;\n}\ntiles{\n38,38,\n}\nheight{\n0,\n}");
        let diagnostics = run_rule(&GridDimensionsRule, &doc);
        assert_eq!(diagnostics.len(), 1);
        assert_eq!(diagnostics[0].section(), Some("height"));
    }

    #[test]
    fn test_no_dimensions_no_check() {
        let doc = doc_of("tiles{\n38,1,\n}");
        assert!(run_rule(&GridDimensionsRule, &doc).is_empty());
    }

    // ==================== TileCodesRule ====================

    #[test]
    fn test_invalid_tile_code_per_cell() {
        let doc = doc_of("info{\nrowcount:1;\ncolcount:3;\n}\ntiles{\n38,39,40,\n}");
        let diagnostics = run_rule(&TileCodesRule, &doc);
        assert_eq!(diagnostics.len(), 2);
        assert!(matches!(
            diagnostics[0].kind(),
            DiagnosticKind::InvalidTileCode { code: 39, col: 1, .. }
        ));
        assert!(matches!(
            diagnostics[1].kind(),
            DiagnosticKind::InvalidTileCode { code: 40, col: 2, .. }
        ));
    }

    #[test]
    fn test_valid_codes_pass() {
        let doc = doc_of(MINIMAL);
        assert!(run_rule(&TileCodesRule, &doc).is_empty());
    }

    // ==================== HeightRangeRule ====================

    #[test]
    fn test_height_out_of_range_warns() {
        let doc = doc_of("height{\n0,16,\n}");
        let diagnostics = run_rule(&HeightRangeRule, &doc);
        assert_eq!(diagnostics.len(), 1);
        assert_eq!(diagnostics[0].severity(), crate::Severity::Warning);
    }

    // ==================== ToolStoreRule ====================

    #[test]
    fn test_no_tool_store_is_error() {
        let doc = doc_of(MINIMAL);
        let diagnostics = run_rule(&ToolStoreRule, &doc);
        assert_eq!(diagnostics.len(), 1);
        assert!(matches!(diagnostics[0].kind(), DiagnosticKind::MissingToolStore));
    }

    #[test]
    fn test_tool_store_present() {
        let doc = doc_of(&format!("{}\nbuildings{{\n{}\n}}", MINIMAL, TOOL_STORE_LINE));
        assert!(run_rule(&ToolStoreRule, &doc).is_empty());
    }

    #[test]
    fn test_other_buildings_do_not_satisfy() {
        let doc = doc_of(&format!(
            "{}\nbuildings{{\nBuildingPowerStation_C,Translation: X=0.0 Y=0.0 Z=0.0 Rotation: P=0.0 Y=0.0 R=0.0 Scale X=1.0 Y=1.0 Z=1.0\n}}",
            MINIMAL
        ));
        assert_eq!(run_rule(&ToolStoreRule, &doc).len(), 1);
    }

    // ==================== ObjectiveBoundsRule ====================

    #[test]
    fn test_objective_out_of_bounds() {
        let doc = doc_of(&format!("{}\nobjectives{{\ndiscovertile:5,1/too far\n}}", MINIMAL));
        let diagnostics = run_rule(&ObjectiveBoundsRule, &doc);
        assert_eq!(diagnostics.len(), 1);
        assert!(matches!(
            diagnostics[0].kind(),
            DiagnosticKind::ObjectiveOutOfBounds { row: 5, col: 1 }
        ));
    }

    #[test]
    fn test_objective_in_bounds() {
        let doc = doc_of(&format!("{}\nobjectives{{\ndiscovertile:2,2/fine\n}}", MINIMAL));
        assert!(run_rule(&ObjectiveBoundsRule, &doc).is_empty());
    }

    // ==================== ObjectiveVariablesRule ====================

    #[test]
    fn test_undeclared_objective_variable_warns() {
        let doc = doc_of(&format!(
            "{}\nobjectives{{\nvariable:MyCounter>=5/collect\n}}",
            MINIMAL
        ));
        let diagnostics = run_rule(&ObjectiveVariablesRule, &doc);
        assert_eq!(diagnostics.len(), 1);
        assert_eq!(diagnostics[0].severity(), crate::Severity::Warning);
        assert!(matches!(
            diagnostics[0].kind(),
            DiagnosticKind::UndeclaredVariable { .. }
        ));
    }

    #[test]
    fn test_declared_objective_variable_passes() {
        let doc = doc_of(&format!(
            "{}\nobjectives{{\nvariable:MyCounter>=5/collect\n}}\nscript{{\nint MyCounter=0\n}}",
            MINIMAL
        ));
        assert!(run_rule(&ObjectiveVariablesRule, &doc).is_empty());
    }

    #[test]
    fn test_builtin_atoms_not_flagged() {
        let doc = doc_of(&format!(
            "{}\nobjectives{{\nvariable:crystals>=5/collect\n}}",
            MINIMAL
        ));
        assert!(run_rule(&ObjectiveVariablesRule, &doc).is_empty());
    }

    // ==================== EntityIdCollisionRule ====================

    #[test]
    fn test_id_collision_single_error() {
        let doc = doc_of(&format!(
            "buildings{{\n{},ID=base1\n{},ID=base1\n}}",
            TOOL_STORE_LINE, TOOL_STORE_LINE
        ));
        let diagnostics = run_rule(&EntityIdCollisionRule, &doc);
        assert_eq!(diagnostics.len(), 1);
        assert!(diagnostics[0].message().contains("base1"));
        assert_eq!(diagnostics[0].line(), Some(2));
    }

    #[test]
    fn test_same_id_different_collections_ok() {
        let doc = doc_of(&format!(
            "buildings{{\n{},ID=alpha\n}}\nvehicles{{\nVehicleHoverScout_C,Translation: X=0.0 Y=0.0 Z=0.0 Rotation: P=0.0 Y=0.0 R=0.0 Scale X=1.0 Y=1.0 Z=1.0,ID=alpha\n}}",
            TOOL_STORE_LINE
        ));
        assert!(run_rule(&EntityIdCollisionRule, &doc).is_empty());
    }

    #[test]
    fn test_entities_without_ids_never_collide() {
        let doc = doc_of(&format!(
            "buildings{{\n{}\n{}\n}}",
            TOOL_STORE_LINE, TOOL_STORE_LINE
        ));
        assert!(run_rule(&EntityIdCollisionRule, &doc).is_empty());
    }

    // ==================== UnknownSectionRule ====================

    #[test]
    fn test_unknown_section_warns() {
        let doc = doc_of(&format!("{}\nfuturestuff{{\nwhatever\n}}", MINIMAL));
        let diagnostics = run_rule(&UnknownSectionRule, &doc);
        assert_eq!(diagnostics.len(), 1);
        assert_eq!(diagnostics[0].severity(), crate::Severity::Warning);
        assert!(diagnostics[0].message().contains("futurestuff"));
    }

    #[test]
    fn test_known_sections_not_flagged() {
        let doc = doc_of(&format!("{}\nbriefing{{\nGood luck out there.\n}}", MINIMAL));
        assert!(run_rule(&UnknownSectionRule, &doc).is_empty());
    }

    // ==================== ScriptReferenceRule ====================

    #[test]
    fn test_undeclared_event_is_error() {
        let doc = doc_of("script{\nwhen(crystals>=5)[Missing]\n}");
        let diagnostics = run_rule(&ScriptReferenceRule, &doc);
        assert_eq!(diagnostics.len(), 1);
        assert!(matches!(
            diagnostics[0].kind(),
            DiagnosticKind::UndeclaredEvent { .. }
        ));
        assert_eq!(diagnostics[0].severity(), crate::Severity::Error);
    }

    #[test]
    fn test_duplicate_chain_is_error() {
        let doc = doc_of("script{\nGo::\nmsg:a;\nGo::\nmsg:b;\n}");
        let diagnostics = run_rule(&ScriptReferenceRule, &doc);
        assert_eq!(diagnostics.len(), 1);
        assert!(matches!(
            diagnostics[0].kind(),
            DiagnosticKind::DuplicateEvent { .. }
        ));
        assert_eq!(diagnostics[0].line(), Some(3));
    }

    #[test]
    fn test_use_before_declaration_warns() {
        let doc = doc_of("script{\nGo::\nmsg:a;\nwhen(Flag>0)[Go]\nint Flag=0\n}");
        let diagnostics = run_rule(&ScriptReferenceRule, &doc);
        assert_eq!(diagnostics.len(), 1);
        assert!(matches!(
            diagnostics[0].kind(),
            DiagnosticKind::UseBeforeDeclaration { .. }
        ));
        assert_eq!(diagnostics[0].severity(), crate::Severity::Warning);
    }

    #[test]
    fn test_resolved_references_pass() {
        let doc = doc_of("script{\nint Flag=0\nGo::\nmsg:a;\nwhen(Flag>0)[Go]\n}");
        assert!(run_rule(&ScriptReferenceRule, &doc).is_empty());
    }

    #[test]
    fn test_call_to_declared_chain_passes() {
        let doc = doc_of("script{\nA::\ncall:B;\nB::\nmsg:b;\n}");
        assert!(run_rule(&ScriptReferenceRule, &doc).is_empty());
    }
}
