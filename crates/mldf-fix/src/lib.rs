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

//! Quick-fix proposals for validation diagnostics.
//!
//! [`propose_fix`] maps a diagnostic to the minimal corrected document,
//! or `None` when no safe automatic fix exists. The input document is
//! never mutated; a fix is a clone with one change. Fixes operate on the
//! typed document: the raw section spans keep describing the original
//! source, and serializing a fixed document back to text is the editor
//! collaborator's job.
//!
//! "No Tool Store" deliberately has no fix: inventing a placement would
//! decide gameplay on the user's behalf.

use mldf_core::{Grid, GridRow, InfoSection, Limits, MldfDocument, DEFAULT_FLOOR, SOLID_ROCK};
use mldf_lint::{Diagnostic, DiagnosticKind};

/// Propose a corrected document for a diagnostic.
///
/// Supported fixes:
///
/// - too-short grid row: pad with the default floor code (tiles) or 0
///   (height),
/// - missing `info`: derive rowcount/colcount from the tiles grid,
/// - missing `tiles`: fill a solid-rock grid from the declared
///   dimensions,
/// - entity ID collision: rename later duplicates with a numeric
///   suffix.
///
/// Everything else returns `None`.
pub fn propose_fix(doc: &MldfDocument, diagnostic: &Diagnostic) -> Option<MldfDocument> {
    let fixed = match diagnostic.kind() {
        DiagnosticKind::GridRowLength {
            section,
            row,
            expected,
            actual,
        } => pad_grid_row(doc, section, *row, *expected, *actual),
        DiagnosticKind::MissingSection { name } => match name.as_str() {
            "info" => derive_info(doc),
            "tiles" => derive_tiles(doc),
            _ => None,
        },
        DiagnosticKind::IdCollision { collection, id } => rename_collisions(doc, collection, id),
        _ => None,
    }?;

    #[cfg(debug_assertions)]
    {
        let remaining = mldf_lint::validate(&fixed);
        debug_assert!(
            !remaining
                .iter()
                .any(|d| same_finding(d.kind(), diagnostic.kind())),
            "proposed fix did not resolve {:?}",
            diagnostic.kind()
        );
    }

    Some(fixed)
}

/// Pad a too-short row up to the expected width.
///
/// A too-long row has no safe fix: truncation would silently discard
/// map data.
fn pad_grid_row(
    doc: &MldfDocument,
    section: &str,
    row: usize,
    expected: usize,
    actual: usize,
) -> Option<MldfDocument> {
    if actual >= expected {
        return None;
    }
    let fill = match section {
        "tiles" => DEFAULT_FLOOR,
        "height" => 0,
        _ => return None,
    };
    let mut fixed = doc.clone();
    let grid = match section {
        "tiles" => fixed.tiles.as_mut()?,
        _ => fixed.height.as_mut()?,
    };
    let grid_row = grid.rows.get_mut(row)?;
    if grid_row.values.len() != actual {
        // The diagnostic no longer matches this document.
        return None;
    }
    grid_row.values.resize(expected, fill);
    Some(fixed)
}

/// Derive an info section from the tiles grid.
fn derive_info(doc: &MldfDocument) -> Option<MldfDocument> {
    if doc.info.is_some() {
        return None;
    }
    let tiles = doc.tiles.as_ref()?;
    if tiles.row_count() == 0 {
        return None;
    }
    let mut fixed = doc.clone();
    fixed.info = Some(InfoSection {
        rowcount: Some(tiles.row_count()),
        colcount: Some(tiles.max_width()),
        ..InfoSection::default()
    });
    Some(fixed)
}

/// Derive a solid-rock tiles grid from the declared dimensions.
///
/// Synthesized rows carry line 0: they have no source position until an
/// editor writes the section out.
fn derive_tiles(doc: &MldfDocument) -> Option<MldfDocument> {
    if doc.tiles.is_some() {
        return None;
    }
    let (rows, cols) = doc.dimensions()?;
    if rows == 0 || cols == 0 {
        return None;
    }
    // Never synthesize a grid bigger than the parser itself would take.
    if rows.saturating_mul(cols) > Limits::default().max_grid_cells {
        return None;
    }
    let mut fixed = doc.clone();
    fixed.tiles = Some(Grid {
        rows: (0..rows)
            .map(|_| GridRow {
                values: vec![SOLID_ROCK; cols],
                line: 0,
            })
            .collect(),
    });
    Some(fixed)
}

/// Rename every duplicate of a colliding ID by appending a numeric
/// suffix, keeping the first occurrence untouched.
fn rename_collisions(doc: &MldfDocument, collection: &str, id: &str) -> Option<MldfDocument> {
    let mut fixed = doc.clone();
    let entities = match collection {
        "buildings" => fixed.buildings.as_mut()?,
        "vehicles" => fixed.vehicles.as_mut()?,
        "creatures" => fixed.creatures.as_mut()?,
        "miners" => fixed.miners.as_mut()?,
        _ => return None,
    };

    let taken: Vec<String> = entities.iter().filter_map(|e| e.id.clone()).collect();
    let mut suffix = 2usize;
    let mut next_free = move |taken: &mut Vec<String>| loop {
        let candidate = format!("{}{}", id, suffix);
        suffix += 1;
        if !taken.contains(&candidate) {
            taken.push(candidate.clone());
            return candidate;
        }
    };

    let mut taken = taken;
    let mut seen_first = false;
    let mut renamed = false;
    for entity in entities.iter_mut() {
        if entity.id.as_deref() != Some(id) {
            continue;
        }
        if !seen_first {
            seen_first = true;
            continue;
        }
        entity.id = Some(next_free(&mut taken));
        renamed = true;
    }

    if renamed {
        Some(fixed)
    } else {
        None
    }
}

/// Whether two diagnostic kinds describe the same finding, ignoring
/// fields a fix is expected to change.
#[cfg(debug_assertions)]
fn same_finding(a: &DiagnosticKind, b: &DiagnosticKind) -> bool {
    match (a, b) {
        (
            DiagnosticKind::GridRowLength {
                section: sa,
                row: ra,
                ..
            },
            DiagnosticKind::GridRowLength {
                section: sb,
                row: rb,
                ..
            },
        ) => sa == sb && ra == rb,
        (
            DiagnosticKind::MissingSection { name: na },
            DiagnosticKind::MissingSection { name: nb },
        ) => na == nb,
        (
            DiagnosticKind::IdCollision {
                collection: ca,
                id: ia,
            },
            DiagnosticKind::IdCollision {
                collection: cb,
                id: ib,
            },
        ) => ca == cb && ia == ib,
        _ => a == b,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mldf_core::parse;
    use mldf_lint::validate;

    const TOOL_STORE_LINE: &str = "BuildingToolStore_C,Translation: X=450.0 Y=450.0 Z=0.0 Rotation: P=0.0 Y=0.0 R=0.0 Scale X=1.0 Y=1.0 Z=1.0";

    fn doc_of(input: &str) -> MldfDocument {
        parse(input).unwrap().document
    }

    fn find<'a>(
        diagnostics: &'a [Diagnostic],
        pred: impl Fn(&DiagnosticKind) -> bool,
    ) -> &'a Diagnostic {
        diagnostics
            .iter()
            .find(|d| pred(d.kind()))
            .expect("expected diagnostic")
    }

    // ==================== Grid row padding ====================

    #[test]
    fn test_pad_short_tiles_row() {
        let input = format!(
            "info{{\nrowcount:3;\ncolcount:3;\n}}\ntiles{{\n38,38,38,\n38,1,\n38,38,38,\n}}\nbuildings{{\n{}\n}}",
            TOOL_STORE_LINE
        );
        let doc = doc_of(&input);
        let diagnostics = validate(&doc);
        let diag = find(&diagnostics, |k| {
            matches!(k, DiagnosticKind::GridRowLength { .. })
        });

        let fixed = propose_fix(&doc, diag).expect("fix expected");
        let row = &fixed.tiles.as_ref().unwrap().rows[1];
        assert_eq!(row.values, vec![38, 1, DEFAULT_FLOOR]);
        // Original untouched.
        assert_eq!(doc.tiles.as_ref().unwrap().rows[1].values, vec![38, 1]);
        // The fixed document validates clean on that rule.
        assert!(!validate(&fixed)
            .iter()
            .any(|d| matches!(d.kind(), DiagnosticKind::GridRowLength { .. })));
    }

    #[test]
    fn test_pad_height_row_with_zero() {
        let input = "info{\nrowcount:1;\ncolcount:3;\n}\ntiles{\n1,1,1,\n}\nheight{\n5,\n}";
        let doc = doc_of(input);
        let diagnostics = validate(&doc);
        let diag = find(&diagnostics, |k| {
            matches!(k, DiagnosticKind::GridRowLength { section, .. } if section == "height")
        });
        let fixed = propose_fix(&doc, diag).unwrap();
        assert_eq!(fixed.height.as_ref().unwrap().rows[0].values, vec![5, 0, 0]);
    }

    #[test]
    fn test_too_long_row_has_no_fix() {
        let input = "info{\nrowcount:1;\ncolcount:2;\n}\ntiles{\n1,1,1,\n}";
        let doc = doc_of(input);
        let diagnostics = validate(&doc);
        let diag = find(&diagnostics, |k| {
            matches!(k, DiagnosticKind::GridRowLength { .. })
        });
        assert!(propose_fix(&doc, diag).is_none());
    }

    // ==================== Missing sections ====================

    #[test]
    fn test_derive_info_from_tiles() {
        let doc = doc_of("tiles{\n1,1,1,\n1,1,1,\n}");
        let diagnostics = validate(&doc);
        let diag = find(&diagnostics, |k| {
            matches!(k, DiagnosticKind::MissingSection { name } if name == "info")
        });
        let fixed = propose_fix(&doc, diag).unwrap();
        let info = fixed.info.as_ref().unwrap();
        assert_eq!(info.rowcount, Some(2));
        assert_eq!(info.colcount, Some(3));
        assert!(doc.info.is_none());
    }

    #[test]
    fn test_derive_tiles_from_info() {
        let doc = doc_of("info{\nrowcount:2;\ncolcount:2;\n}");
        let diagnostics = validate(&doc);
        let diag = find(&diagnostics, |k| {
            matches!(k, DiagnosticKind::MissingSection { name } if name == "tiles")
        });
        let fixed = propose_fix(&doc, diag).unwrap();
        let tiles = fixed.tiles.as_ref().unwrap();
        assert_eq!(tiles.row_count(), 2);
        assert!(tiles.rows.iter().all(|r| r.values == vec![SOLID_ROCK; 2]));
    }

    #[test]
    fn test_missing_both_sections_no_fix() {
        // Nothing to derive from.
        let doc = doc_of("objectives{\nresources: 1,0,0\n}");
        let diagnostics = validate(&doc);
        for diag in diagnostics
            .iter()
            .filter(|d| matches!(d.kind(), DiagnosticKind::MissingSection { .. }))
        {
            assert!(propose_fix(&doc, diag).is_none());
        }
    }

    // ==================== ID collisions ====================

    #[test]
    fn test_rename_colliding_ids() {
        let input = format!(
            "buildings{{\n{},ID=base1\n{},ID=base1\n{},ID=base1\n}}",
            TOOL_STORE_LINE, TOOL_STORE_LINE, TOOL_STORE_LINE
        );
        let doc = doc_of(&input);
        let diagnostics = validate(&doc);
        let diag = find(&diagnostics, |k| {
            matches!(k, DiagnosticKind::IdCollision { .. })
        });
        let fixed = propose_fix(&doc, diag).unwrap();
        let ids: Vec<_> = fixed
            .buildings
            .as_ref()
            .unwrap()
            .iter()
            .map(|e| e.id.clone().unwrap())
            .collect();
        assert_eq!(ids, vec!["base1", "base12", "base13"]);
        assert!(!validate(&fixed)
            .iter()
            .any(|d| matches!(d.kind(), DiagnosticKind::IdCollision { .. })));
    }

    #[test]
    fn test_rename_skips_taken_suffix() {
        let input = format!(
            "vehicles{{\nVehicleHoverScout_C,Translation: X=0.0 Y=0.0 Z=0.0 Rotation: P=0.0 Y=0.0 R=0.0 Scale X=1.0 Y=1.0 Z=1.0,ID=scout\n{},ID=scout\n{},ID=scout2\n}}",
            "VehicleHoverScout_C,Translation: X=0.0 Y=0.0 Z=0.0 Rotation: P=0.0 Y=0.0 R=0.0 Scale X=1.0 Y=1.0 Z=1.0",
            "VehicleHoverScout_C,Translation: X=0.0 Y=0.0 Z=0.0 Rotation: P=0.0 Y=0.0 R=0.0 Scale X=1.0 Y=1.0 Z=1.0"
        );
        let doc = doc_of(&input);
        let diagnostics = validate(&doc);
        let diag = find(&diagnostics, |k| {
            matches!(k, DiagnosticKind::IdCollision { id, .. } if id == "scout")
        });
        let fixed = propose_fix(&doc, diag).unwrap();
        let ids: Vec<_> = fixed
            .vehicles
            .as_ref()
            .unwrap()
            .iter()
            .map(|e| e.id.clone().unwrap())
            .collect();
        // "scout2" was taken, so the duplicate becomes "scout3".
        assert_eq!(ids, vec!["scout", "scout3", "scout2"]);
    }

    // ==================== No-fix diagnostics ====================

    #[test]
    fn test_tool_store_has_no_fix() {
        let doc = doc_of("info{\nrowcount:1;\ncolcount:1;\n}\ntiles{\n1,\n}");
        let diagnostics = validate(&doc);
        let diag = find(&diagnostics, |k| {
            matches!(k, DiagnosticKind::MissingToolStore)
        });
        assert!(propose_fix(&doc, diag).is_none());
    }

    #[test]
    fn test_invalid_tile_code_has_no_fix() {
        let input = format!(
            "info{{\nrowcount:1;\ncolcount:2;\n}}\ntiles{{\n1,9,\n}}\nbuildings{{\n{}\n}}",
            TOOL_STORE_LINE
        );
        let doc = doc_of(&input);
        let diagnostics = validate(&doc);
        let diag = find(&diagnostics, |k| {
            matches!(k, DiagnosticKind::InvalidTileCode { .. })
        });
        assert!(propose_fix(&doc, diag).is_none());
    }

    #[test]
    fn test_fix_never_mutates_input() {
        let input = "info{\nrowcount:1;\ncolcount:3;\n}\ntiles{\n1,1,\n}";
        let doc = doc_of(input);
        let before = doc.clone();
        let diagnostics = validate(&doc);
        for diag in &diagnostics {
            let _ = propose_fix(&doc, diag);
        }
        assert_eq!(doc, before);
    }
}
