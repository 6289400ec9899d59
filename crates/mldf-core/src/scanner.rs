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

//! Section scanner for MLDF level files.
//!
//! A level file is a sequence of `name{...}` blocks in any order. The
//! scanner splits preprocessed text into [`Section`] spans with depth-aware
//! brace matching, so script blocks containing `{}` pairs of their own
//! are captured whole. A section with unbalanced braces produces one
//! issue and scanning resumes after its opening brace, so the remaining
//! sections still come through.

use crate::error::MldfError;
use crate::limits::Limits;
use crate::preprocess::PreprocessedInput;
use memchr::{memchr, memchr_iter};

/// A named, brace-delimited span of the source.
///
/// `start_line` and `end_line` are 0-based and inclusive of the opening
/// and closing brace lines. `content` is exactly the text between the
/// outermost braces; content line `k` (by `\n` split) sits on absolute
/// line `start_line + k`.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Section {
    /// Lowercased section name.
    pub name: String,
    /// Line of the opening brace (0-based).
    pub start_line: usize,
    /// Line of the closing brace (0-based, inclusive).
    pub end_line: usize,
    /// Raw interior text between the outermost braces.
    pub content: String,
}

impl Section {
    /// Whether the given 0-based document line falls inside this span.
    pub fn contains_line(&self, line: usize) -> bool {
        line >= self.start_line && line <= self.end_line
    }

    /// Iterate content lines as (absolute_line, text) pairs.
    ///
    /// The first yielded line is the remainder of the opening-brace line,
    /// which is usually empty for multi-line sections.
    pub fn content_lines(&self) -> impl Iterator<Item = (usize, &str)> {
        let base = self.start_line;
        self.content
            .split('\n')
            .enumerate()
            .map(move |(k, text)| (base + k, text))
    }
}

/// Split preprocessed text into sections.
///
/// Returns every well-formed section in source order plus one issue per
/// malformed one. Duplicate names are not resolved here; document
/// assembly keeps the first and reports the rest.
pub fn scan(pre: &PreprocessedInput, limits: &Limits) -> (Vec<Section>, Vec<MldfError>) {
    let text = pre.text();
    let bytes = text.as_bytes();
    let mut sections: Vec<Section> = Vec::new();
    let mut issues: Vec<MldfError> = Vec::new();

    let mut pos = 0;
    let mut line = 0;
    while pos < bytes.len() {
        let b = bytes[pos];
        if b == b'\n' {
            line += 1;
            pos += 1;
            continue;
        }
        if b.is_ascii_whitespace() {
            pos += 1;
            continue;
        }

        let name_start = pos;
        while pos < bytes.len() && is_name_byte(bytes[pos]) {
            pos += 1;
        }
        let mut brace = pos;
        while brace < bytes.len() && (bytes[brace] == b' ' || bytes[brace] == b'\t') {
            brace += 1;
        }

        if brace < bytes.len() && bytes[brace] == b'{' {
            let name = text[name_start..pos].to_ascii_lowercase();
            if name.is_empty() {
                issues.push(MldfError::section("section with no name", line).with_column(
                    column_of(bytes, brace),
                ));
                pos = brace + 1;
                continue;
            }
            if sections.len() >= limits.max_sections {
                issues.push(
                    MldfError::security(
                        format!("too many sections: exceeds limit of {}", limits.max_sections),
                        line,
                    )
                    .with_section(name),
                );
                break;
            }
            match find_matching_brace(bytes, brace) {
                Some(close) => {
                    let end_line = line + count_newlines(&bytes[brace..=close]);
                    sections.push(Section {
                        name,
                        start_line: line,
                        end_line,
                        content: text[brace + 1..close].to_string(),
                    });
                    line = end_line;
                    pos = close + 1;
                }
                None => {
                    issues.push(
                        MldfError::section(
                            format!("unbalanced braces in section '{}'", name),
                            line,
                        )
                        .with_section(name),
                    );
                    // Resume just past the opening brace: blocks nested
                    // inside the broken one are recovered as sections.
                    pos = brace + 1;
                }
            }
        } else {
            // Stray text between sections. Skip the rest of the line;
            // the loop head picks up the newline.
            pos = memchr(b'\n', &bytes[pos..])
                .map(|i| pos + i)
                .unwrap_or(bytes.len());
        }
    }

    (sections, issues)
}

fn is_name_byte(b: u8) -> bool {
    b.is_ascii_alphanumeric() || b == b'_' || b == b'-'
}

/// Find the closing brace matching the `{` at `open`, tracking depth.
fn find_matching_brace(bytes: &[u8], open: usize) -> Option<usize> {
    let mut depth = 0usize;
    let mut pos = open;
    while pos < bytes.len() {
        match bytes[pos] {
            b'{' => depth += 1,
            b'}' => {
                depth -= 1;
                if depth == 0 {
                    return Some(pos);
                }
            }
            _ => {}
        }
        pos += 1;
    }
    None
}

fn count_newlines(bytes: &[u8]) -> usize {
    memchr_iter(b'\n', bytes).count()
}

fn column_of(bytes: &[u8], pos: usize) -> usize {
    let line_start = bytes[..pos]
        .iter()
        .rposition(|&b| b == b'\n')
        .map(|i| i + 1)
        .unwrap_or(0);
    pos - line_start
}
