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

//! Document structure for parsed MLDF levels.

use crate::scanner::Section;
use crate::section::entities::Entity;
use crate::section::grid::Grid;
use crate::section::info::InfoSection;
use crate::section::objectives::Objective;
use crate::section::resources::ResourceGrids;
use crate::section::script::ScriptDocument;

/// The Tool Store class name: the one building a playable map requires.
pub const TOOL_STORE: &str = "BuildingToolStore_C";

/// Section names understood by this format revision.
///
/// Sections outside this list are retained as raw spans and flagged by
/// the unknown-section lint, never rejected.
pub const KNOWN_SECTIONS: &[&str] = &[
    "comments",
    "info",
    "tiles",
    "height",
    "resources",
    "objectives",
    "buildings",
    "vehicles",
    "creatures",
    "miners",
    "blocks",
    "script",
    "briefing",
    "briefingsuccess",
    "briefingfailure",
    "landslidefrequency",
    "lavaspread",
];

/// A parsed MLDF level document.
///
/// The document owns every parsed section. Sections absent from the
/// source are `None`, never defaulted to empty, so callers can tell
/// "no objectives section" from "an empty one". Raw [`Section`] spans
/// are kept for position mapping.
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MldfDocument {
    /// Map metadata.
    pub info: Option<InfoSection>,
    /// Tile-type codes.
    pub tiles: Option<Grid>,
    /// Elevation grid (0-15).
    pub height: Option<Grid>,
    /// Block metadata grid.
    pub blocks: Option<Grid>,
    /// Crystal/ore/stud placement grids.
    pub resources: Option<ResourceGrids>,
    /// Win conditions in declaration order.
    pub objectives: Option<Vec<Objective>>,
    /// Placed buildings.
    pub buildings: Option<Vec<Entity>>,
    /// Placed vehicles.
    pub vehicles: Option<Vec<Entity>>,
    /// Placed creatures.
    pub creatures: Option<Vec<Entity>>,
    /// Placed miners.
    pub miners: Option<Vec<Entity>>,
    /// Script variables and event chains.
    pub script: Option<ScriptDocument>,
    /// All scanned section spans, in source order.
    pub sections: Vec<Section>,
}

impl MldfDocument {
    /// Case-insensitive section lookup. First occurrence wins.
    pub fn section(&self, name: &str) -> Option<&Section> {
        let name = name.to_ascii_lowercase();
        self.sections.iter().find(|s| s.name == name)
    }

    /// Section whose `[start_line, end_line]` span contains the given
    /// 0-based document line; `None` between sections.
    pub fn section_at_line(&self, line: usize) -> Option<&Section> {
        self.sections.iter().find(|s| s.contains_line(line))
    }

    /// Declared (rowcount, colcount), when both are present.
    pub fn dimensions(&self) -> Option<(usize, usize)> {
        let info = self.info.as_ref()?;
        Some((info.rowcount?, info.colcount?))
    }

    /// Tile code at (row, col), if the tiles grid covers it.
    pub fn tile_at(&self, row: usize, col: usize) -> Option<u16> {
        self.tiles.as_ref().and_then(|g| g.get(row, col))
    }

    /// The first Tool Store building, when one is placed.
    pub fn tool_store(&self) -> Option<&Entity> {
        self.buildings
            .as_ref()?
            .iter()
            .find(|b| b.type_name == TOOL_STORE)
    }

    /// Find an entity by `ID=` key across one collection.
    pub fn entity_by_id<'a>(collection: &'a [Entity], id: &str) -> Option<&'a Entity> {
        collection.iter().find(|e| e.id.as_deref() == Some(id))
    }

    /// All entity collections with their section names, present ones only.
    pub fn entity_collections(&self) -> impl Iterator<Item = (&'static str, &[Entity])> + '_ {
        [
            ("buildings", &self.buildings),
            ("vehicles", &self.vehicles),
            ("creatures", &self.creatures),
            ("miners", &self.miners),
        ]
        .into_iter()
        .filter_map(|(name, list)| list.as_ref().map(|l| (name, l.as_slice())))
    }
}
