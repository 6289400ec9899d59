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

//! Objectives section parsing.
//!
//! One objective per non-empty line, dispatched on the leading keyword.
//! An unrecognized keyword is a warning and the line is skipped, so maps
//! from newer format revisions still parse.

use crate::error::MldfError;
use crate::scanner::Section;

/// A win-condition objective.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Objective {
    /// Collect the given resource totals.
    Resources {
        crystals: u32,
        ore: u32,
        studs: u32,
        line: usize,
    },
    /// Construct a building of the given class.
    Building { type_name: String, line: usize },
    /// Reveal the tile at (row, col).
    DiscoverTile {
        row: usize,
        col: usize,
        description: String,
        line: usize,
    },
    /// Satisfy a script variable condition.
    Variable {
        condition: String,
        description: String,
        line: usize,
    },
    /// Locate the buried building at (row, col).
    FindBuilding { row: usize, col: usize, line: usize },
    /// Rescue the miner with the given ID.
    FindMiner { miner_id: String, line: usize },
}

impl Objective {
    /// Absolute document line of the objective (0-based).
    pub fn line(&self) -> usize {
        match self {
            Self::Resources { line, .. }
            | Self::Building { line, .. }
            | Self::DiscoverTile { line, .. }
            | Self::Variable { line, .. }
            | Self::FindBuilding { line, .. }
            | Self::FindMiner { line, .. } => *line,
        }
    }

    /// Tile coordinate referenced by the objective, when it has one.
    pub fn tile(&self) -> Option<(usize, usize)> {
        match self {
            Self::DiscoverTile { row, col, .. } | Self::FindBuilding { row, col, .. } => {
                Some((*row, *col))
            }
            _ => None,
        }
    }
}

/// Parse the `objectives` section.
pub fn parse_objectives(section: &Section) -> (Vec<Objective>, Vec<MldfError>) {
    let mut objectives = Vec::new();
    let mut issues = Vec::new();

    for (line, text) in section.content_lines() {
        let trimmed = text.trim();
        if trimmed.is_empty() {
            continue;
        }
        let (keyword, rest) = match trimmed.find(':') {
            Some(colon) => (
                trimmed[..colon].trim().to_ascii_lowercase(),
                trimmed[colon + 1..].trim(),
            ),
            None => {
                issues.push(
                    MldfError::objective(format!("objective line has no keyword: '{}'", trimmed), line)
                        .with_section(&section.name),
                );
                continue;
            }
        };

        let parsed = match keyword.as_str() {
            "resources" => parse_resources_objective(rest, line),
            "building" => Some(Objective::Building {
                type_name: rest.to_string(),
                line,
            }),
            "discovertile" => parse_tile_objective(rest, line, true),
            "variable" => parse_variable_objective(rest, line),
            "findbuilding" => parse_tile_objective(rest, line, false),
            "findminer" => Some(Objective::FindMiner {
                miner_id: rest.to_string(),
                line,
            }),
            other => {
                issues.push(
                    MldfError::objective(format!("unknown objective keyword '{}'", other), line)
                        .with_section(&section.name)
                        .warning(),
                );
                continue;
            }
        };

        match parsed {
            Some(objective) => objectives.push(objective),
            None => issues.push(
                MldfError::objective(
                    format!("malformed '{}' objective: '{}'", keyword, rest),
                    line,
                )
                .with_section(&section.name),
            ),
        }
    }

    (objectives, issues)
}

/// `resources: CRYSTALS,ORE,STUDS`; missing trailing counts are zero.
fn parse_resources_objective(rest: &str, line: usize) -> Option<Objective> {
    let mut counts = [0u32; 3];
    let mut n = 0;
    for token in rest.split(',') {
        let token = token.trim();
        if token.is_empty() {
            continue;
        }
        if n >= 3 {
            return None;
        }
        counts[n] = token.parse().ok()?;
        n += 1;
    }
    if n == 0 {
        return None;
    }
    Some(Objective::Resources {
        crystals: counts[0],
        ore: counts[1],
        studs: counts[2],
        line,
    })
}

/// `ROW,COL` with an optional `/description` tail.
fn parse_tile_objective(rest: &str, line: usize, with_description: bool) -> Option<Objective> {
    let (coords, description) = match rest.split_once('/') {
        Some((c, d)) => (c, d.trim().to_string()),
        None => (rest, String::new()),
    };
    let (row, col) = coords.split_once(',')?;
    let row = row.trim().parse().ok()?;
    let col = col.trim().parse().ok()?;
    if with_description {
        Some(Objective::DiscoverTile {
            row,
            col,
            description,
            line,
        })
    } else {
        Some(Objective::FindBuilding { row, col, line })
    }
}

/// `condition/description`.
fn parse_variable_objective(rest: &str, line: usize) -> Option<Objective> {
    let (condition, description) = match rest.split_once('/') {
        Some((c, d)) => (c.trim(), d.trim()),
        None => (rest, ""),
    };
    if condition.is_empty() {
        return None;
    }
    Some(Objective::Variable {
        condition: condition.to_string(),
        description: description.to_string(),
        line,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::limits::Limits;
    use crate::preprocess::preprocess;
    use crate::scanner::scan;

    fn objectives_of(input: &str) -> (Vec<Objective>, Vec<MldfError>) {
        let limits = Limits::default();
        let pre = preprocess(input, &limits).unwrap();
        let (sections, issues) = scan(&pre, &limits);
        assert!(issues.is_empty());
        parse_objectives(&sections[0])
    }

    // ==================== Variant parsing tests ====================

    #[test]
    fn test_parse_resources_objective() {
        let (objectives, issues) = objectives_of("objectives{\nresources: 5,2,0\n}");
        assert!(issues.is_empty());
        assert_eq!(
            objectives[0],
            Objective::Resources {
                crystals: 5,
                ore: 2,
                studs: 0,
                line: 1
            }
        );
    }

    #[test]
    fn test_resources_missing_counts_default_zero() {
        let (objectives, _) = objectives_of("objectives{\nresources: 10\n}");
        assert_eq!(
            objectives[0],
            Objective::Resources {
                crystals: 10,
                ore: 0,
                studs: 0,
                line: 1
            }
        );
    }

    #[test]
    fn test_parse_building_objective() {
        let (objectives, _) = objectives_of("objectives{\nbuilding:BuildingPowerStation_C\n}");
        assert_eq!(
            objectives[0],
            Objective::Building {
                type_name: "BuildingPowerStation_C".to_string(),
                line: 1
            }
        );
    }

    #[test]
    fn test_parse_discovertile_objective() {
        let (objectives, _) =
            objectives_of("objectives{\ndiscovertile:12,34/Find the hidden cavern\n}");
        assert_eq!(
            objectives[0],
            Objective::DiscoverTile {
                row: 12,
                col: 34,
                description: "Find the hidden cavern".to_string(),
                line: 1
            }
        );
        assert_eq!(objectives[0].tile(), Some((12, 34)));
    }

    #[test]
    fn test_parse_variable_objective() {
        let (objectives, _) =
            objectives_of("objectives{\nvariable:crystals>=5/Collect five crystals\n}");
        assert_eq!(
            objectives[0],
            Objective::Variable {
                condition: "crystals>=5".to_string(),
                description: "Collect five crystals".to_string(),
                line: 1
            }
        );
    }

    #[test]
    fn test_parse_findbuilding_objective() {
        let (objectives, _) = objectives_of("objectives{\nfindbuilding:3,7\n}");
        assert_eq!(objectives[0], Objective::FindBuilding { row: 3, col: 7, line: 1 });
    }

    #[test]
    fn test_parse_findminer_objective() {
        let (objectives, _) = objectives_of("objectives{\nfindminer:2\n}");
        assert_eq!(
            objectives[0],
            Objective::FindMiner {
                miner_id: "2".to_string(),
                line: 1
            }
        );
    }

    #[test]
    fn test_keyword_case_insensitive() {
        let (objectives, _) = objectives_of("objectives{\nResources: 1,0,0\n}");
        assert_eq!(objectives.len(), 1);
    }

    // ==================== Skip/warning tests ====================

    #[test]
    fn test_unknown_keyword_warns_and_skips() {
        let (objectives, issues) =
            objectives_of("objectives{\nescort:5,5\nresources: 1,0,0\n}");
        assert_eq!(objectives.len(), 1);
        assert_eq!(issues.len(), 1);
        assert!(issues[0].message.contains("escort"));
        assert_eq!(issues[0].severity, crate::error::IssueSeverity::Warning);
        assert_eq!(issues[0].line, 1);
    }

    #[test]
    fn test_malformed_coords_error() {
        let (objectives, issues) = objectives_of("objectives{\ndiscovertile:x,y/desc\n}");
        assert!(objectives.is_empty());
        assert_eq!(issues.len(), 1);
        assert_eq!(issues[0].severity, crate::error::IssueSeverity::Error);
    }

    #[test]
    fn test_line_without_colon_reported() {
        let (_, issues) = objectives_of("objectives{\njust words\n}");
        assert_eq!(issues.len(), 1);
        assert!(issues[0].message.contains("no keyword"));
    }

    #[test]
    fn test_multiple_objectives_ordered() {
        let (objectives, _) = objectives_of(
            "objectives{\nresources: 5,0,0\nbuilding:BuildingDocks_C\nfindminer:1\n}",
        );
        assert_eq!(objectives.len(), 3);
        assert_eq!(objectives[0].line(), 1);
        assert_eq!(objectives[2].line(), 3);
    }
}
