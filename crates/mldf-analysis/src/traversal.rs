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

//! Traversability rules over the tile grid.

use mldf_core::{Grid, TileTable};

/// Analysis options.
#[derive(Debug, Clone, Copy, Default)]
pub struct AnalyzeOptions {
    /// Treat drillable walls as passable (weighted by their drill cost).
    pub can_mine: bool,
    /// BFS origin; defaults to the first Tool Store's tile, else (0, 0).
    pub origin: Option<(usize, usize)>,
}

impl AnalyzeOptions {
    /// Walking-only analysis from the default origin.
    pub fn walking() -> Self {
        Self::default()
    }

    /// Mining-capable analysis from the default origin.
    pub fn mining() -> Self {
        Self {
            can_mine: true,
            origin: None,
        }
    }

    /// Fix the BFS origin.
    pub fn from_origin(mut self, origin: (usize, usize)) -> Self {
        self.origin = Some(origin);
        self
    }
}

/// Neighbor offsets in fixed N, E, S, W order.
///
/// The order is part of the analyzer's determinism contract: identical
/// input must yield bit-identical results, so neighbor visitation never
/// varies.
pub(crate) const NEIGHBORS: [(isize, isize); 4] = [(-1, 0), (0, 1), (1, 0), (0, -1)];

/// Whether a unit can occupy or pass through a tile code.
pub(crate) fn is_traversable(table: &TileTable, code: u16, can_mine: bool) -> bool {
    table.is_floor(code) || (can_mine && table.drill_cost(code).is_some())
}

/// In-grid 4-neighbors of (row, col) in N, E, S, W order.
///
/// Ragged grids are handled cell-by-cell: a coordinate only counts as a
/// neighbor when its row actually extends that far.
pub(crate) fn neighbors(
    grid: &Grid,
    row: usize,
    col: usize,
) -> impl Iterator<Item = (usize, usize)> + '_ {
    NEIGHBORS.iter().filter_map(move |&(dr, dc)| {
        let r = row.checked_add_signed(dr)?;
        let c = col.checked_add_signed(dc)?;
        grid.get(r, c).map(|_| (r, c))
    })
}
