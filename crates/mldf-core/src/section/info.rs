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

//! Info section parsing.
//!
//! Lines are `key:value;` pairs (trailing semicolon optional, several
//! pairs may share a line). `rowcount`/`colcount` are the dimension
//! contract for every grid section. Unknown keys pass through untouched
//! in `extra` so files from newer format revisions keep their metadata.

use crate::error::MldfError;
use crate::scanner::Section;
use std::collections::BTreeMap;

/// Parsed map metadata.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct InfoSection {
    /// Declared grid row count.
    pub rowcount: Option<usize>,
    /// Declared grid column count.
    pub colcount: Option<usize>,
    /// Level display name.
    pub level_name: Option<String>,
    /// Author.
    pub creator: Option<String>,
    /// Biome name (rock, ice, lava).
    pub biome: Option<String>,
    /// Format/editor version string.
    pub version: Option<String>,
    /// Unrecognized keys, retained verbatim (keys lowercased).
    pub extra: BTreeMap<String, String>,
}

/// Parse the `info` section.
pub fn parse_info(section: &Section) -> (InfoSection, Vec<MldfError>) {
    let mut info = InfoSection::default();
    let mut issues = Vec::new();

    for (line, text) in section.content_lines() {
        for pair in text.split(';') {
            let pair = pair.trim();
            if pair.is_empty() {
                continue;
            }
            let Some(colon) = pair.find(':') else {
                issues.push(
                    MldfError::syntax(format!("expected 'key:value' in info entry '{}'", pair), line)
                        .with_section(&section.name),
                );
                continue;
            };
            let key = pair[..colon].trim().to_ascii_lowercase();
            let value = pair[colon + 1..].trim();

            match key.as_str() {
                "rowcount" => info.rowcount = parse_count(&key, value, line, &section.name, &mut issues),
                "colcount" => info.colcount = parse_count(&key, value, line, &section.name, &mut issues),
                "levelname" => info.level_name = Some(value.to_string()),
                "creator" => info.creator = Some(value.to_string()),
                "biome" => info.biome = Some(value.to_string()),
                "version" => info.version = Some(value.to_string()),
                _ => {
                    info.extra.insert(key, value.to_string());
                }
            }
        }
    }

    (info, issues)
}

/// Parse a numeric info field; on failure the field stays absent.
fn parse_count(
    key: &str,
    value: &str,
    line: usize,
    section_name: &str,
    issues: &mut Vec<MldfError>,
) -> Option<usize> {
    match value.parse::<usize>() {
        Ok(v) => Some(v),
        Err(_) => {
            issues.push(
                MldfError::number(format!("info field '{}' is not an integer: '{}'", key, value), line)
                    .with_section(section_name),
            );
            None
        }
    }
}
