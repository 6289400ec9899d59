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

//! Entity list parsing (buildings, vehicles, creatures, miners).
//!
//! One entity per line:
//!
//! ```text
//! BuildingToolStore_C,Translation: X=450.0 Y=750.0 Z=0.0 Rotation: P=0.0 Y=89.9 R=0.0 Scale X=1.0 Y=1.0 Z=1.0,ID=base1
//! ```
//!
//! Trailing `,Key=Value` pairs land in the property map; `ID` is lifted
//! out as the script cross-reference key. A malformed coordinate block
//! degrades to a warning with the coordinates defaulted, never a dropped
//! entity.

use crate::error::MldfError;
use crate::limits::Limits;
use crate::scanner::Section;
use crate::tiles::BLOCK_SIZE;
use std::collections::BTreeMap;

/// A 3D vector (world units).
#[derive(Debug, Clone, Copy, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Vec3 {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

/// Pitch/yaw/roll rotation (degrees).
#[derive(Debug, Clone, Copy, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Rotation {
    pub pitch: f64,
    pub yaw: f64,
    pub roll: f64,
}

/// Translation/rotation/scale triple of a placed entity.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EntityCoords {
    pub translation: Vec3,
    pub rotation: Rotation,
    pub scale: Vec3,
}

impl Default for EntityCoords {
    fn default() -> Self {
        Self {
            translation: Vec3::default(),
            rotation: Rotation::default(),
            scale: Vec3 { x: 1.0, y: 1.0, z: 1.0 },
        }
    }
}

/// A placed building, vehicle, creature or miner.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Entity {
    /// Class identifier, e.g. `BuildingToolStore_C`.
    pub type_name: String,
    /// Placement in world units.
    pub coords: EntityCoords,
    /// Optional script cross-reference key (`ID=` pair).
    pub id: Option<String>,
    /// Remaining `Key=Value` pairs, verbatim.
    pub properties: BTreeMap<String, String>,
    /// Absolute document line of the entity (0-based).
    pub line: usize,
}

impl Entity {
    /// Tile coordinate of the entity's translation, when inside the map
    /// quadrant. World units map to tiles at [`BLOCK_SIZE`] per edge.
    pub fn tile(&self) -> Option<(usize, usize)> {
        let row = self.coords.translation.y / BLOCK_SIZE;
        let col = self.coords.translation.x / BLOCK_SIZE;
        if row < 0.0 || col < 0.0 || !row.is_finite() || !col.is_finite() {
            return None;
        }
        Some((row as usize, col as usize))
    }
}

/// Parse one entity-list section.
pub fn parse_entities(section: &Section, limits: &Limits) -> (Vec<Entity>, Vec<MldfError>) {
    let mut entities = Vec::new();
    let mut issues = Vec::new();

    for (line, text) in section.content_lines() {
        let trimmed = text.trim();
        if trimmed.is_empty() {
            continue;
        }
        if entities.len() >= limits.max_entities {
            issues.push(
                MldfError::security(
                    format!("too many entities: exceeds limit of {}", limits.max_entities),
                    line,
                )
                .with_section(&section.name),
            );
            break;
        }

        let mut pieces = trimmed.split(',');
        let type_name = match pieces.next().map(str::trim) {
            Some(t) if !t.is_empty() => t.to_string(),
            _ => {
                issues.push(
                    MldfError::entity("entity line with no type name", line)
                        .with_section(&section.name),
                );
                continue;
            }
        };

        let mut coords = EntityCoords::default();
        let mut have_coords = false;
        let mut id = None;
        let mut properties = BTreeMap::new();

        for piece in pieces {
            let piece = piece.trim();
            if piece.is_empty() {
                continue;
            }
            if piece.starts_with("Translation") {
                match parse_coords(piece) {
                    Some(parsed) => {
                        coords = parsed;
                        have_coords = true;
                    }
                    None => {
                        issues.push(
                            MldfError::entity(
                                format!("malformed coordinates for '{}', defaulting to origin", type_name),
                                line,
                            )
                            .with_section(&section.name)
                            .warning(),
                        );
                    }
                }
            } else if let Some(eq) = piece.find('=') {
                let key = piece[..eq].trim();
                let value = piece[eq + 1..].trim();
                if key.eq_ignore_ascii_case("id") {
                    id = Some(value.to_string());
                } else {
                    properties.insert(key.to_string(), value.to_string());
                }
            } else {
                issues.push(
                    MldfError::entity(format!("unrecognized entity field '{}'", piece), line)
                        .with_section(&section.name)
                        .warning(),
                );
            }
        }

        if !have_coords {
            issues.push(
                MldfError::entity(
                    format!("missing coordinates for '{}', defaulting to origin", type_name),
                    line,
                )
                .with_section(&section.name)
                .warning(),
            );
        }

        entities.push(Entity {
            type_name,
            coords,
            id,
            properties,
            line,
        });
    }

    (entities, issues)
}

/// Parse a `Translation: ... Rotation: ... Scale ...` block.
///
/// Tokens are whitespace-separated `K=V` pairs grouped by the marker
/// words. Returns `None` on any unparsable number or missing marker.
fn parse_coords(block: &str) -> Option<EntityCoords> {
    #[derive(Clone, Copy, PartialEq)]
    enum Group {
        Translation,
        Rotation,
        Scale,
    }

    let mut coords = EntityCoords::default();
    let mut group = None;
    let mut seen_translation = false;

    for token in block.split_whitespace() {
        match token.trim_end_matches(':') {
            "Translation" => {
                group = Some(Group::Translation);
                seen_translation = true;
                continue;
            }
            "Rotation" => {
                group = Some(Group::Rotation);
                continue;
            }
            "Scale" => {
                group = Some(Group::Scale);
                continue;
            }
            _ => {}
        }

        let eq = token.find('=')?;
        let key = &token[..eq];
        let value: f64 = token[eq + 1..].parse().ok()?;
        match (group?, key) {
            (Group::Translation, "X") => coords.translation.x = value,
            (Group::Translation, "Y") => coords.translation.y = value,
            (Group::Translation, "Z") => coords.translation.z = value,
            (Group::Rotation, "P") => coords.rotation.pitch = value,
            (Group::Rotation, "Y") => coords.rotation.yaw = value,
            (Group::Rotation, "R") => coords.rotation.roll = value,
            (Group::Scale, "X") => coords.scale.x = value,
            (Group::Scale, "Y") => coords.scale.y = value,
            (Group::Scale, "Z") => coords.scale.z = value,
            _ => return None,
        }
    }

    if seen_translation {
        Some(coords)
    } else {
        None
    }
}
