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

//! Choke-point detection.
//!
//! A choke point is a traversable tile whose removal disconnects two
//! otherwise-connected reachable regions: exactly the articulation
//! points of the reachable subgraph. Detection runs Tarjan's low-link
//! algorithm with an explicit frame stack: grids are routinely large
//! enough that recursive DFS would overflow the call stack.

use crate::traversal::NEIGHBORS;
use std::collections::BTreeMap;

/// Articulation points of the subgraph induced by `nodes`, sorted.
///
/// `nodes` must be the visited set of one BFS, i.e. a single connected
/// component containing `root`. Adjacency follows the fixed N, E, S, W
/// order, so output is deterministic.
pub(crate) fn articulation_points(
    nodes: &BTreeMap<(usize, usize), u32>,
    root: (usize, usize),
) -> Vec<(usize, usize)> {
    let n = nodes.len();
    if n < 3 {
        // One or two mutually-adjacent tiles cannot have a cut vertex.
        return Vec::new();
    }

    // Stable index assignment from the sorted map.
    let index: BTreeMap<(usize, usize), usize> = nodes
        .keys()
        .enumerate()
        .map(|(i, &coord)| (coord, i))
        .collect();
    let coords: Vec<(usize, usize)> = nodes.keys().copied().collect();

    let adjacency: Vec<Vec<usize>> = coords
        .iter()
        .map(|&(row, col)| {
            NEIGHBORS
                .iter()
                .filter_map(|&(dr, dc)| {
                    let r = row.checked_add_signed(dr)?;
                    let c = col.checked_add_signed(dc)?;
                    index.get(&(r, c)).copied()
                })
                .collect()
        })
        .collect();

    let root = index[&root];
    let mut disc = vec![0u32; n];
    let mut low = vec![0u32; n];
    let mut visited = vec![false; n];
    let mut is_cut = vec![false; n];
    let mut root_children = 0usize;
    let mut timer = 0u32;

    // Explicit DFS frames: (node, parent, next adjacency index).
    let mut stack: Vec<(usize, usize, usize)> = vec![(root, usize::MAX, 0)];
    while let Some(frame) = stack.last_mut() {
        let (u, parent) = (frame.0, frame.1);
        if frame.2 == 0 {
            visited[u] = true;
            disc[u] = timer;
            low[u] = timer;
            timer += 1;
        }
        if frame.2 < adjacency[u].len() {
            let v = adjacency[u][frame.2];
            frame.2 += 1;
            if v == parent {
                continue;
            }
            if visited[v] {
                low[u] = low[u].min(disc[v]);
            } else {
                stack.push((v, u, 0));
            }
        } else {
            stack.pop();
            if parent != usize::MAX {
                low[parent] = low[parent].min(low[u]);
                if parent == root {
                    root_children += 1;
                } else if low[u] >= disc[parent] {
                    is_cut[parent] = true;
                }
            }
        }
    }
    if root_children >= 2 {
        is_cut[root] = true;
    }

    coords
        .into_iter()
        .enumerate()
        .filter(|&(i, _)| is_cut[i])
        .map(|(_, coord)| coord)
        .collect()
}
