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

//! Tile-code lookup table.
//!
//! Tile codes are sparse: valid codes cluster into bands (basic terrain,
//! walls/seams/hazards, reinforced variants) with gaps between them, so
//! membership is a table lookup rather than a range check. The table is
//! an immutable asset transcribed from the game's published tile
//! reference; it is injected into the validator and analyzer by shared
//! reference and holds no mutable state.

use std::collections::BTreeMap;
use std::sync::OnceLock;

/// Default floor code used when a fix pads a grid row.
pub const DEFAULT_FLOOR: u16 = 1;
/// Regular solid rock, the default impassable fill.
pub const SOLID_ROCK: u16 = 38;
/// World units per tile edge, for entity-translation to tile mapping.
pub const BLOCK_SIZE: f64 = 300.0;

/// Category of a tile code.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TileCategory {
    /// Open, walkable ground.
    Ground,
    /// Walkable rubble left by collapses or drilling.
    Rubble,
    /// Power path (walkable, buildable).
    PowerPath,
    /// Water hazard (impassable on foot).
    Water,
    /// Lava hazard (impassable).
    Lava,
    /// Slimy slug hole (impassable emergence point).
    SlugHole,
    /// Drillable or solid wall.
    Wall,
    /// Crystal or ore seam embedded in a wall.
    ResourceSeam,
    /// Recharge seam (wall, never drillable).
    RechargeSeam,
    /// Impassable cliff edge.
    Cliff,
}

impl TileCategory {
    /// Floor-type codes: open tiles units can stand on.
    pub fn is_floor(self) -> bool {
        matches!(self, Self::Ground | Self::Rubble | Self::PowerPath)
    }

    /// Wall-type codes, including seams.
    pub fn is_wall(self) -> bool {
        matches!(self, Self::Wall | Self::ResourceSeam | Self::RechargeSeam)
    }
}

/// One entry in the tile table.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct TileDef {
    /// Display name from the tile reference.
    pub name: &'static str,
    /// Category of the code.
    pub category: TileCategory,
    /// Drill cost when a mining-capable analysis may pass through this
    /// wall; `None` means not drillable.
    pub drill_cost: Option<u8>,
    /// Base code for reinforced variants; `None` for base codes.
    pub base: Option<u16>,
}

/// Immutable tile-code lookup table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TileTable {
    defs: BTreeMap<u16, TileDef>,
}

impl TileTable {
    /// Build a table from explicit entries. Intended for tests and for
    /// callers carrying a newer tile reference than the built-in one.
    pub fn custom(entries: impl IntoIterator<Item = (u16, TileDef)>) -> Self {
        Self {
            defs: entries.into_iter().collect(),
        }
    }

    /// The published game tile reference. Constructed once and shared.
    pub fn game_default() -> &'static TileTable {
        static TABLE: OnceLock<TileTable> = OnceLock::new();
        TABLE.get_or_init(|| TileTable {
            defs: game_reference().into_iter().collect(),
        })
    }

    /// Whether `code` is a known tile code.
    pub fn is_valid(&self, code: u16) -> bool {
        self.defs.contains_key(&code)
    }

    /// Look up the full definition of a code.
    pub fn get(&self, code: u16) -> Option<&TileDef> {
        self.defs.get(&code)
    }

    /// Category of a code, if known.
    pub fn category(&self, code: u16) -> Option<TileCategory> {
        self.defs.get(&code).map(|d| d.category)
    }

    /// Whether a code is a floor-type (walkable) tile.
    pub fn is_floor(&self, code: u16) -> bool {
        self.category(code).is_some_and(TileCategory::is_floor)
    }

    /// Whether a code is a wall-type tile.
    pub fn is_wall(&self, code: u16) -> bool {
        self.category(code).is_some_and(TileCategory::is_wall)
    }

    /// Drill cost for a code; `None` when the code is not drillable.
    pub fn drill_cost(&self, code: u16) -> Option<u8> {
        self.defs.get(&code).and_then(|d| d.drill_cost)
    }

    /// Resolve a reinforced variant to its base code, or return the code
    /// itself when it is already a base code.
    ///
    /// The reinforced band has documented gaps; unknown codes resolve to
    /// `None`.
    pub fn base_code(&self, code: u16) -> Option<u16> {
        let def = self.defs.get(&code)?;
        Some(def.base.unwrap_or(code))
    }

    /// Iterate all known codes in ascending order.
    pub fn codes(&self) -> impl Iterator<Item = u16> + '_ {
        self.defs.keys().copied()
    }
}

/// The published tile reference, transcribed.
///
/// Reinforced wall variants sit 50 above their base code. The bands have
/// gaps; codes absent here are invalid even when they fall inside a band.
fn game_reference() -> Vec<(u16, TileDef)> {
    fn def(
        name: &'static str,
        category: TileCategory,
        drill_cost: Option<u8>,
        base: Option<u16>,
    ) -> TileDef {
        TileDef {
            name,
            category,
            drill_cost,
            base,
        }
    }

    use TileCategory::*;
    vec![
        // Basic terrain band
        (1, def("Ground", Ground, None, None)),
        (2, def("Rubble 1", Rubble, None, None)),
        (3, def("Rubble 2", Rubble, None, None)),
        (4, def("Rubble 3", Rubble, None, None)),
        (5, def("Rubble 4", Rubble, None, None)),
        (6, def("Lava", Lava, None, None)),
        (11, def("Water", Water, None, None)),
        (12, def("Slimy Slug Hole", SlugHole, None, None)),
        (13, def("Power Path In Progress", PowerPath, None, None)),
        (14, def("Power Path", PowerPath, None, None)),
        // Wall band
        (26, def("Dirt", Wall, Some(1), None)),
        (30, def("Loose Rock", Wall, Some(2), None)),
        (34, def("Hard Rock", Wall, Some(4), None)),
        (38, def("Solid Rock", Wall, None, None)),
        (42, def("Crystal Seam", ResourceSeam, Some(3), None)),
        (46, def("Ore Seam", ResourceSeam, Some(3), None)),
        (50, def("Recharge Seam", RechargeSeam, None, None)),
        (60, def("Landslide Rubble 1", Rubble, None, None)),
        (61, def("Landslide Rubble 2", Rubble, None, None)),
        (62, def("Landslide Rubble 3", Rubble, None, None)),
        (63, def("Landslide Rubble 4", Rubble, None, None)),
        // Reinforced/special band
        (64, def("Cliff", Cliff, None, None)),
        (76, def("Reinforced Dirt", Wall, Some(3), Some(26))),
        (80, def("Reinforced Loose Rock", Wall, Some(4), Some(30))),
        (84, def("Reinforced Hard Rock", Wall, Some(6), Some(34))),
        (88, def("Reinforced Solid Rock", Wall, None, Some(38))),
        (92, def("Reinforced Crystal Seam", ResourceSeam, Some(5), Some(42))),
        (96, def("Reinforced Ore Seam", ResourceSeam, Some(5), Some(46))),
        (100, def("Reinforced Recharge Seam", RechargeSeam, None, Some(50))),
        (163, def("Dense Rubble 1", Rubble, None, None)),
        (164, def("Dense Rubble 2", Rubble, None, None)),
        (165, def("Dense Rubble 3", Rubble, None, None)),
    ]
}
