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

//! Reachability analysis over the tile grid.
//!
//! Tiles are graph nodes; 4-adjacent traversable tiles share an edge.
//! BFS from the origin (explicit queue; recursion is off the table for
//! grids this size) yields the visited set; flood fill over floor tiles
//! counts isolated regions; articulation points of the visited subgraph
//! are the choke points.
//!
//! Everything is deterministic: sorted containers, fixed neighbor order,
//! no hashing of coordinates anywhere in the result path.

use crate::choke::articulation_points;
use crate::traversal::{is_traversable, neighbors, AnalyzeOptions};
use mldf_core::{Grid, MldfDocument, TileTable};
use std::collections::{BTreeMap, BTreeSet, VecDeque};

/// Result of one reachability analysis.
///
/// Derived, read-only view; owned by the caller and recomputed on
/// demand, never persisted on the document.
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ReachabilityResult {
    /// The BFS origin actually used.
    pub origin: Option<(usize, usize)>,
    /// BFS distance (in steps) per reached tile, sorted by coordinate.
    pub distances: BTreeMap<(usize, usize), u32>,
    /// Reached floor-type tiles.
    pub reachable_floor: usize,
    /// All floor-type tiles in the grid.
    pub total_floor: usize,
    /// `reachable_floor / total_floor`, 0.0 for a floorless grid.
    pub accessibility_ratio: f64,
    /// Floor regions disconnected from the origin's region.
    pub isolated_regions: usize,
    /// Traversable tiles whose removal splits the reachable area.
    pub choke_points: Vec<(usize, usize)>,
    /// Crystals on reached tiles.
    pub reachable_crystals: u64,
    /// Ore on reached tiles.
    pub reachable_ore: u64,
}

impl ReachabilityResult {
    /// Degenerate empty result (missing grid, bad origin).
    fn degenerate(origin: Option<(usize, usize)>) -> Self {
        Self {
            origin,
            ..Self::default()
        }
    }

    /// Whether the analysis reached the given tile.
    pub fn is_reachable(&self, row: usize, col: usize) -> bool {
        self.distances.contains_key(&(row, col))
    }

    /// BFS distance to a tile, when reached.
    pub fn distance(&self, row: usize, col: usize) -> Option<u32> {
        self.distances.get(&(row, col)).copied()
    }

    /// Number of reached tiles (floor plus mined-through walls).
    pub fn reachable_count(&self) -> usize {
        self.distances.len()
    }
}

/// Analyze a document over the published game tile table.
pub fn analyze(doc: &MldfDocument, options: &AnalyzeOptions) -> ReachabilityResult {
    analyze_with_table(doc, TileTable::game_default(), options)
}

/// Analyze a document over an injected tile table.
pub fn analyze_with_table(
    doc: &MldfDocument,
    table: &TileTable,
    options: &AnalyzeOptions,
) -> ReachabilityResult {
    let Some(grid) = doc.tiles.as_ref() else {
        return ReachabilityResult::degenerate(None);
    };

    let origin = options
        .origin
        .or_else(|| doc.tool_store().and_then(|e| e.tile()))
        .unwrap_or((0, 0));

    // Origin outside the grid, or on an impassable tile: a precondition
    // the caller should have validated. Degenerate result, not a panic.
    let Some(origin_code) = grid.get(origin.0, origin.1) else {
        return ReachabilityResult::degenerate(Some(origin));
    };
    if !is_traversable(table, origin_code, options.can_mine) {
        return ReachabilityResult::degenerate(Some(origin));
    }

    let distances = bfs(grid, table, origin, options.can_mine);

    let total_floor = grid
        .cells()
        .filter(|&(_, _, code)| table.is_floor(code))
        .count();
    let reachable_floor = distances
        .keys()
        .filter(|&&(r, c)| grid.get(r, c).is_some_and(|code| table.is_floor(code)))
        .count();
    let accessibility_ratio = if total_floor == 0 {
        0.0
    } else {
        reachable_floor as f64 / total_floor as f64
    };

    let (reachable_crystals, reachable_ore) = count_resources(doc, &distances);

    ReachabilityResult {
        origin: Some(origin),
        choke_points: articulation_points(&distances, origin),
        isolated_regions: isolated_floor_regions(grid, table, origin),
        reachable_floor,
        total_floor,
        accessibility_ratio,
        reachable_crystals,
        reachable_ore,
        distances,
    }
}

/// Explicit-queue BFS with fixed N, E, S, W neighbor order.
fn bfs(
    grid: &Grid,
    table: &TileTable,
    origin: (usize, usize),
    can_mine: bool,
) -> BTreeMap<(usize, usize), u32> {
    let mut distances = BTreeMap::new();
    let mut queue = VecDeque::new();
    distances.insert(origin, 0u32);
    queue.push_back(origin);

    while let Some((row, col)) = queue.pop_front() {
        let next = distances[&(row, col)] + 1;
        for (r, c) in neighbors(grid, row, col) {
            if distances.contains_key(&(r, c)) {
                continue;
            }
            let code = grid.get(r, c).unwrap_or_default();
            if !is_traversable(table, code, can_mine) {
                continue;
            }
            distances.insert((r, c), next);
            queue.push_back((r, c));
        }
    }
    distances
}

/// Count floor-tile connected components that exclude the origin's.
///
/// Iterative flood fill; component adjacency runs over floor tiles only,
/// regardless of the mining flag. A region you can only drill into is
/// still isolated terrain.
fn isolated_floor_regions(grid: &Grid, table: &TileTable, origin: (usize, usize)) -> usize {
    let mut labeled: BTreeSet<(usize, usize)> = BTreeSet::new();
    let mut regions = 0usize;
    let mut origin_region_seen = false;

    for (row, col, code) in grid.cells() {
        if !table.is_floor(code) || labeled.contains(&(row, col)) {
            continue;
        }
        regions += 1;
        let mut contains_origin = false;
        let mut queue = VecDeque::new();
        labeled.insert((row, col));
        queue.push_back((row, col));
        while let Some((r, c)) = queue.pop_front() {
            if (r, c) == origin {
                contains_origin = true;
            }
            for (nr, nc) in neighbors(grid, r, c) {
                if labeled.contains(&(nr, nc)) {
                    continue;
                }
                let ncode = grid.get(nr, nc).unwrap_or_default();
                if !table.is_floor(ncode) {
                    continue;
                }
                labeled.insert((nr, nc));
                queue.push_back((nr, nc));
            }
        }
        if contains_origin {
            origin_region_seen = true;
        }
    }

    if origin_region_seen {
        regions - 1
    } else {
        regions
    }
}

/// Sum crystals and ore over the visited set.
fn count_resources(
    doc: &MldfDocument,
    distances: &BTreeMap<(usize, usize), u32>,
) -> (u64, u64) {
    let Some(resources) = doc.resources.as_ref() else {
        return (0, 0);
    };
    let mut crystals = 0u64;
    let mut ore = 0u64;
    for &(row, col) in distances.keys() {
        crystals += u64::from(resources.crystals_at(row, col));
        ore += u64::from(resources.ore_at(row, col));
    }
    (crystals, ore)
}

#[cfg(test)]
mod tests {
    use super::*;
    use mldf_core::parse;

    fn doc_of(input: &str) -> MldfDocument {
        parse(input).unwrap().document
    }

    fn map(rows: usize, cols: usize, body: &str) -> String {
        format!(
            "info{{\nrowcount:{};\ncolcount:{};\n}}\ntiles{{\n{}\n}}",
            rows, cols, body
        )
    }

    // ==================== Open-grid tests ====================

    #[test]
    fn test_fully_open_grid_full_accessibility() {
        let doc = doc_of(&map(3, 3, "1,1,1,\n1,1,1,\n1,1,1,"));
        let result = analyze(&doc, &AnalyzeOptions::walking().from_origin((1, 1)));
        assert_eq!(result.accessibility_ratio, 1.0);
        assert_eq!(result.isolated_regions, 0);
        assert_eq!(result.reachable_floor, 9);
        assert_eq!(result.total_floor, 9);
        assert_eq!(result.reachable_count(), 9);
    }

    #[test]
    fn test_open_grid_any_interior_origin() {
        let doc = doc_of(&map(4, 4, "1,1,1,1,\n1,1,1,1,\n1,1,1,1,\n1,1,1,1,"));
        for origin in [(0, 0), (1, 2), (3, 3)] {
            let result = analyze(&doc, &AnalyzeOptions::walking().from_origin(origin));
            assert_eq!(result.accessibility_ratio, 1.0, "origin {:?}", origin);
            assert_eq!(result.isolated_regions, 0);
        }
    }

    #[test]
    fn test_bfs_distances() {
        let doc = doc_of(&map(1, 4, "1,1,1,1,"));
        let result = analyze(&doc, &AnalyzeOptions::walking().from_origin((0, 0)));
        assert_eq!(result.distance(0, 0), Some(0));
        assert_eq!(result.distance(0, 1), Some(1));
        assert_eq!(result.distance(0, 3), Some(3));
    }

    // ==================== Isolation tests ====================

    #[test]
    fn test_wall_split_isolated_region_and_half_ratio() {
        // Solid wall column splits the floor into two 3x2 halves.
        let doc = doc_of(&map(3, 5, "1,1,38,1,1,\n1,1,38,1,1,\n1,1,38,1,1,"));
        let result = analyze(&doc, &AnalyzeOptions::walking().from_origin((0, 0)));
        assert_eq!(result.isolated_regions, 1);
        assert_eq!(result.reachable_floor, 6);
        assert_eq!(result.total_floor, 12);
        assert!((result.accessibility_ratio - 0.5).abs() < f64::EPSILON);
        assert!(!result.is_reachable(0, 3));
    }

    #[test]
    fn test_mining_connects_through_drillable_wall() {
        // Dirt (26) is drillable; the two halves connect when mining.
        let doc = doc_of(&map(1, 3, "1,26,1,"));
        let walking = analyze(&doc, &AnalyzeOptions::walking().from_origin((0, 0)));
        assert_eq!(walking.reachable_floor, 1);
        assert_eq!(walking.isolated_regions, 1);

        let mining = analyze(&doc, &AnalyzeOptions::mining().from_origin((0, 0)));
        assert_eq!(mining.reachable_floor, 2);
        assert!(mining.is_reachable(0, 1));
        // Floor adjacency still has two regions; mining does not merge
        // isolated terrain, it only reaches it.
        assert_eq!(mining.isolated_regions, 1);
    }

    #[test]
    fn test_solid_rock_blocks_even_when_mining() {
        let doc = doc_of(&map(1, 3, "1,38,1,"));
        let mining = analyze(&doc, &AnalyzeOptions::mining().from_origin((0, 0)));
        assert!(!mining.is_reachable(0, 2));
    }

    // ==================== Choke point tests ====================

    #[test]
    fn test_corridor_choke_points() {
        // Two open rooms joined by a one-tile corridor at (1,2).
        let doc = doc_of(&map(
            3,
            5,
            "1,1,38,1,1,\n1,1,1,1,1,\n1,1,38,1,1,",
        ));
        let result = analyze(&doc, &AnalyzeOptions::walking().from_origin((0, 0)));
        assert_eq!(result.accessibility_ratio, 1.0);
        assert!(result.choke_points.contains(&(1, 2)));
    }

    #[test]
    fn test_open_grid_has_no_choke_points() {
        let doc = doc_of(&map(3, 3, "1,1,1,\n1,1,1,\n1,1,1,"));
        let result = analyze(&doc, &AnalyzeOptions::walking().from_origin((0, 0)));
        assert!(result.choke_points.is_empty());
    }

    // ==================== Origin selection tests ====================

    #[test]
    fn test_default_origin_is_tool_store_tile() {
        let input = format!(
            "{}\nbuildings{{\nBuildingToolStore_C,Translation: X=450.0 Y=150.0 Z=0.0 Rotation: P=0.0 Y=0.0 R=0.0 Scale X=1.0 Y=1.0 Z=1.0\n}}",
            map(2, 2, "1,1,\n1,1,")
        );
        let doc = doc_of(&input);
        let result = analyze(&doc, &AnalyzeOptions::walking());
        // Y=150 -> row 0, X=450 -> col 1.
        assert_eq!(result.origin, Some((0, 1)));
        assert_eq!(result.distance(0, 1), Some(0));
    }

    #[test]
    fn test_default_origin_without_tool_store_is_zero() {
        let doc = doc_of(&map(2, 2, "1,1,\n1,1,"));
        let result = analyze(&doc, &AnalyzeOptions::walking());
        assert_eq!(result.origin, Some((0, 0)));
    }

    // ==================== Degenerate input tests ====================

    #[test]
    fn test_origin_out_of_bounds_degenerate() {
        let doc = doc_of(&map(2, 2, "1,1,\n1,1,"));
        let result = analyze(&doc, &AnalyzeOptions::walking().from_origin((9, 9)));
        assert_eq!(result.reachable_count(), 0);
        assert_eq!(result.accessibility_ratio, 0.0);
        assert_eq!(result.origin, Some((9, 9)));
    }

    #[test]
    fn test_origin_on_wall_degenerate() {
        let doc = doc_of(&map(1, 2, "38,1,"));
        let result = analyze(&doc, &AnalyzeOptions::walking().from_origin((0, 0)));
        assert_eq!(result.reachable_count(), 0);
    }

    #[test]
    fn test_missing_tiles_degenerate() {
        let doc = doc_of("info{\nrowcount:2;\ncolcount:2;\n}");
        let result = analyze(&doc, &AnalyzeOptions::walking());
        assert_eq!(result, ReachabilityResult::degenerate(None));
    }

    // ==================== Resource counting tests ====================

    #[test]
    fn test_reachable_resources_counted() {
        let input = format!(
            "{}\nresources{{\ncrystals:\n0,0,3,\nore:\n1,0,2,\n}}",
            map(1, 3, "1,1,38,")
        );
        let doc = doc_of(&input);
        let result = analyze(&doc, &AnalyzeOptions::walking().from_origin((0, 0)));
        // The crystal/ore under the unreachable wall is not counted.
        assert_eq!(result.reachable_crystals, 0);
        assert_eq!(result.reachable_ore, 1);
    }

    #[test]
    fn test_mined_tile_resources_counted() {
        let input = format!(
            "{}\nresources{{\ncrystals:\n0,4,0,\n}}",
            map(1, 3, "1,42,1,")
        );
        let doc = doc_of(&input);
        let result = analyze(&doc, &AnalyzeOptions::mining().from_origin((0, 0)));
        assert_eq!(result.reachable_crystals, 4);
    }

    // ==================== Determinism tests ====================

    #[test]
    fn test_analyze_twice_identical() {
        let doc = doc_of(&map(3, 5, "1,1,38,1,1,\n1,1,1,1,1,\n1,26,38,1,6,"));
        let options = AnalyzeOptions::mining().from_origin((0, 0));
        let a = analyze(&doc, &options);
        let b = analyze(&doc, &options);
        assert_eq!(a, b);
    }

    #[test]
    fn test_ragged_grid_does_not_panic() {
        let doc = doc_of(&map(2, 3, "1,1,1,\n1,"));
        let result = analyze(&doc, &AnalyzeOptions::walking().from_origin((0, 0)));
        assert_eq!(result.reachable_floor, 4);
    }
}
