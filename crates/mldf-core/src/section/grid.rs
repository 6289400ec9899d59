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

//! 2D numeric grid parsing (tiles, height, blocks, resource maps).
//!
//! Rows are newline-separated, cells comma-separated; trailing commas and
//! blank tokens are ignored. Ragged rows are preserved as parsed: the
//! validator reports raggedness, the parser does not pad or truncate.

use crate::error::MldfError;
use crate::limits::Limits;
use crate::scanner::Section;

/// One parsed grid row plus the document line it came from.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GridRow {
    /// Cell values in source order.
    pub values: Vec<u16>,
    /// Absolute document line of this row (0-based).
    pub line: usize,
}

/// A parsed 2D grid. Possibly ragged; see [`Grid::is_rectangular`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Grid {
    /// Rows in source order.
    pub rows: Vec<GridRow>,
}

impl Grid {
    /// Number of rows.
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Cell value at (row, col), if present.
    pub fn get(&self, row: usize, col: usize) -> Option<u16> {
        self.rows.get(row).and_then(|r| r.values.get(col)).copied()
    }

    /// Whether every row has exactly `width` cells.
    pub fn is_rectangular(&self, width: usize) -> bool {
        self.rows.iter().all(|r| r.values.len() == width)
    }

    /// Widest row length (0 for an empty grid).
    pub fn max_width(&self) -> usize {
        self.rows.iter().map(|r| r.values.len()).max().unwrap_or(0)
    }

    /// Total number of cells across all rows.
    pub fn cell_count(&self) -> usize {
        self.rows.iter().map(|r| r.values.len()).sum()
    }

    /// Iterate all cells as (row, col, value).
    pub fn cells(&self) -> impl Iterator<Item = (usize, usize, u16)> + '_ {
        self.rows.iter().enumerate().flat_map(|(r, row)| {
            row.values.iter().enumerate().map(move |(c, &v)| (r, c, v))
        })
    }
}

/// Parse a grid section's content.
pub fn parse_grid(section: &Section, limits: &Limits) -> (Grid, Vec<MldfError>) {
    let (grid, issues) = parse_grid_lines(section.content_lines(), &section.name, limits);
    (grid, issues)
}

/// Parse grid rows from (absolute_line, text) pairs.
///
/// Shared with the resources parser, which carves labeled sub-grids out
/// of one section.
pub(crate) fn parse_grid_lines<'a>(
    lines: impl Iterator<Item = (usize, &'a str)>,
    section_name: &str,
    limits: &Limits,
) -> (Grid, Vec<MldfError>) {
    let mut rows = Vec::new();
    let mut issues = Vec::new();
    let mut cell_count = 0usize;

    for (line, text) in lines {
        if text.trim().is_empty() {
            continue;
        }
        let mut values = Vec::new();
        for token in text.split(',') {
            let token = token.trim();
            if token.is_empty() {
                continue; // trailing comma or stray blank token
            }
            match token.parse::<u16>() {
                Ok(v) => values.push(v),
                Err(_) => {
                    issues.push(
                        MldfError::grid(format!("invalid grid value '{}'", token), line)
                            .with_section(section_name),
                    );
                }
            }
        }
        cell_count += values.len();
        if cell_count > limits.max_grid_cells {
            issues.push(
                MldfError::security(
                    format!("grid too large: exceeds limit of {} cells", limits.max_grid_cells),
                    line,
                )
                .with_section(section_name),
            );
            break;
        }
        rows.push(GridRow { values, line });
    }

    (Grid { rows }, issues)
}
