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

//! Input preprocessing for MLDF parsing.
//!
//! Normalizes raw level text before section scanning:
//!
//! - BOM skipping
//! - CRLF normalization, bare CR rejection
//! - Control character validation
//! - Size and line length limits
//! - `#` line comments blanked in place
//!
//! Comments are replaced with spaces rather than deleted so every byte
//! keeps its original line and the diagnostics downstream stay
//! position-accurate.

use crate::error::{MldfError, MldfResult};
use crate::limits::Limits;
use memchr::{memchr, memchr_iter};

/// Preprocessed input ready for section scanning.
///
/// Stores the normalized, comment-blanked text plus a line-offset table so
/// lines can be handed out without further allocation.
#[derive(Debug)]
pub struct PreprocessedInput {
    /// Normalized text with comments blanked.
    text: String,
    /// Line boundaries: (line_number, start_offset, end_offset). 0-based.
    line_offsets: Vec<(usize, usize, usize)>,
}

impl PreprocessedInput {
    /// Iterate lines as (line_num, &str) pairs. Zero allocation.
    #[inline]
    pub fn lines(&self) -> impl Iterator<Item = (usize, &str)> {
        self.line_offsets
            .iter()
            .map(move |&(num, start, end)| (num, &self.text[start..end]))
    }

    /// Number of lines in the input.
    pub fn line_count(&self) -> usize {
        self.line_offsets.len()
    }

    /// The normalized text (comments blanked, CRLF collapsed).
    pub fn text(&self) -> &str {
        &self.text
    }
}

/// Preprocess raw input text into scannable lines.
pub fn preprocess(input: &str, limits: &Limits) -> MldfResult<PreprocessedInput> {
    if input.len() > limits.max_file_size {
        return Err(MldfError::security(
            format!("file too large: exceeds limit of {} bytes", limits.max_file_size),
            0,
        ));
    }

    // Skip BOM if present
    let text = input.strip_prefix('\u{FEFF}').unwrap_or(input);

    // Check for control characters (allow LF, CR, TAB), tracking the line
    // number during the scan so errors deep in large files stay cheap.
    let bytes = text.as_bytes();
    let mut line_num = 0;
    for &b in bytes.iter() {
        if b == b'\n' {
            line_num += 1;
        } else if b < 0x20 && b != 0x09 && b != 0x0D {
            return Err(MldfError::syntax(
                format!("control character U+{:04X} not allowed", b),
                line_num,
            ));
        }
    }

    // Normalize line endings and reject bare CR.
    let text = if text.contains('\r') {
        let normalized = text.replace("\r\n", "\n");
        if let Some(pos) = normalized.find('\r') {
            let line_num = normalized[..pos].matches('\n').count();
            return Err(MldfError::syntax(
                "bare CR (U+000D) not allowed - use LF or CRLF",
                line_num,
            ));
        }
        normalized
    } else {
        text.to_string()
    };

    let text = blank_comments(&text);

    // Split into lines and validate lengths - zero copy using offsets.
    let bytes = text.as_bytes();
    let estimated_lines = memchr_iter(b'\n', bytes).count() + 1;
    let mut line_offsets = Vec::with_capacity(estimated_lines);

    let mut start = 0;
    let mut line_num = 0;
    for i in memchr_iter(b'\n', bytes) {
        let line_len = i - start;
        if line_len > limits.max_line_length {
            return Err(MldfError::security(
                format!("line too long: exceeds limit of {} bytes", limits.max_line_length),
                line_num,
            ));
        }
        line_offsets.push((line_num, start, i));
        start = i + 1;
        line_num += 1;
    }

    // Last line (no trailing newline)
    if start <= bytes.len() {
        let line_len = bytes.len() - start;
        if line_len > limits.max_line_length {
            return Err(MldfError::security(
                format!("line too long: exceeds limit of {} bytes", limits.max_line_length),
                line_num,
            ));
        }
        line_offsets.push((line_num, start, bytes.len()));
    }

    Ok(PreprocessedInput { text, line_offsets })
}

/// Replace `#` comments with spaces, byte for byte.
///
/// Operates on the UTF-8 buffer directly: every byte from the `#` to the
/// end of its line becomes a space, so offsets before the comment and all
/// line boundaries are untouched. Multi-byte characters inside a comment
/// collapse to multiple spaces, which is harmless because the region is
/// discarded text.
fn blank_comments(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for (i, line) in text.split('\n').enumerate() {
        if i > 0 {
            out.push('\n');
        }
        match memchr(b'#', line.as_bytes()) {
            Some(pos) => {
                out.push_str(&line[..pos]);
                // One space per blanked byte keeps every offset stable.
                for _ in pos..line.len() {
                    out.push(' ');
                }
            }
            None => out.push_str(line),
        }
    }
    out
}

/// Check if a line is blank (empty or whitespace only).
pub fn is_blank_line(line: &str) -> bool {
    line.trim().is_empty()
}
