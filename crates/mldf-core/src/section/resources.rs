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

//! Resources section parsing.
//!
//! The section interleaves up to three labeled sub-grids:
//!
//! ```text
//! resources{
//! crystals:
//! 0,0,1,
//! 0,2,0,
//! ore:
//! 0,0,0,
//! 1,0,0,
//! }
//! ```
//!
//! Each label starts a new grid; rows before any label are reported and
//! skipped.

use crate::error::MldfError;
use crate::limits::Limits;
use crate::scanner::Section;
use crate::section::grid::{parse_grid_lines, Grid};

/// Parsed per-tile resource placement grids.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ResourceGrids {
    /// Energy crystals per tile.
    pub crystals: Option<Grid>,
    /// Ore per tile.
    pub ore: Option<Grid>,
    /// Studs per tile.
    pub studs: Option<Grid>,
}

impl ResourceGrids {
    /// Crystals at (row, col), 0 when no crystal grid is present.
    pub fn crystals_at(&self, row: usize, col: usize) -> u16 {
        self.crystals
            .as_ref()
            .and_then(|g| g.get(row, col))
            .unwrap_or(0)
    }

    /// Ore at (row, col), 0 when no ore grid is present.
    pub fn ore_at(&self, row: usize, col: usize) -> u16 {
        self.ore.as_ref().and_then(|g| g.get(row, col)).unwrap_or(0)
    }
}

/// Parse the `resources` section.
pub fn parse_resources(section: &Section, limits: &Limits) -> (ResourceGrids, Vec<MldfError>) {
    let mut grids = ResourceGrids::default();
    let mut issues = Vec::new();

    // Partition content lines by label, then reuse the grid parser per
    // label so cell handling stays identical to the tiles section.
    let mut current: Option<(String, Vec<(usize, String)>)> = None;
    let mut in_unknown_label = false;
    let mut flush = |label: &str,
                     lines: Vec<(usize, String)>,
                     grids: &mut ResourceGrids,
                     issues: &mut Vec<MldfError>| {
        let (grid, mut grid_issues) = parse_grid_lines(
            lines.iter().map(|(n, s)| (*n, s.as_str())),
            &section.name,
            limits,
        );
        issues.append(&mut grid_issues);
        let slot = match label {
            "crystals" => &mut grids.crystals,
            "ore" => &mut grids.ore,
            "studs" => &mut grids.studs,
            _ => unreachable!("label checked before flush"),
        };
        if slot.is_some() {
            // Second grid under the same label: first one wins.
            return;
        }
        *slot = Some(grid);
    };

    for (line, text) in section.content_lines() {
        let trimmed = text.trim();
        if trimmed.is_empty() {
            continue;
        }
        let label = trimmed.strip_suffix(':').map(str::to_ascii_lowercase);
        match label.as_deref() {
            Some(l @ ("crystals" | "ore" | "studs")) => {
                if let Some((prev, lines)) = current.take() {
                    flush(&prev, lines, &mut grids, &mut issues);
                }
                in_unknown_label = false;
                current = Some((l.to_string(), Vec::new()));
            }
            Some(other) => {
                issues.push(
                    MldfError::syntax(
                        format!("unknown resource label '{}:'", other),
                        line,
                    )
                    .with_section(&section.name)
                    .warning(),
                );
                // Rows under an unknown label belong to it; drop them
                // without further noise.
                if let Some((prev, lines)) = current.take() {
                    flush(&prev, lines, &mut grids, &mut issues);
                }
                in_unknown_label = true;
            }
            None => match &mut current {
                Some((_, lines)) => lines.push((line, text.to_string())),
                None if in_unknown_label => {}
                None => {
                    issues.push(
                        MldfError::syntax("resource rows before any label", line)
                            .with_section(&section.name),
                    );
                }
            },
        }
    }
    if let Some((prev, lines)) = current.take() {
        flush(&prev, lines, &mut grids, &mut issues);
    }

    (grids, issues)
}
